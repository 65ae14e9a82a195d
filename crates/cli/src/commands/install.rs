use log::debug;

use fzf_harness_core::config::{get_install_dir, ProvisionConfig};
use fzf_harness_core::error::Result;
use fzf_harness_core::provision::{provision, Provisioned};

use crate::cli_args::InstallArgs;

/// Builds the provisioning configuration: environment first, then flags.
#[must_use]
pub fn provision_config(args: &InstallArgs) -> ProvisionConfig {
    let mut config = ProvisionConfig::from_env();

    if args.install_dir.is_some() {
        config.install_dir = get_install_dir(&args.install_dir);
    }
    config.check_path = !args.force_local;

    config
}

/// Makes sure fzf is available.
///
/// # Errors
///
/// Returns an error if downloading or unpacking the release fails.
pub async fn install(args: &InstallArgs) -> Result<Provisioned> {
    let config = provision_config(args);
    debug!("provisioning with {config:?}");

    provision(&config).await
}
