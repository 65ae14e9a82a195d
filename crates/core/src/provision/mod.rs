//! Making sure an fzf binary is available.
//!
//! Provisioning is a one-off, pre-flight step: if `fzf` is already on the
//! lookup path nothing happens, otherwise the platform's release archive is
//! downloaded, unpacked into the install directory and marked executable.
//! A completed install records its release version next to the binary; a
//! local copy without a matching record is replaced.
//!
//! Every step runs strictly in sequence, without retries or timeouts.

use std::path::PathBuf;

use log::{debug, info, warn};

use crate::config::{ProvisionConfig, FZF_BINARY};
use crate::error::{Error, Result};

mod extract;
mod fetch;
mod local;
mod release;

// Re-exports for convenience
pub use extract::extract;
pub use fetch::{fetch, http_client, MAX_REDIRECTS};
pub use local::{ensure_executable, locate};
pub use release::{resolve_release_url, ReleaseDescriptor};

/// What a provisioning run found or did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Provisioned {
    /// `fzf` is already resolvable on the lookup path.
    OnPath,
    /// A local copy of the same release, installed by an earlier completed run.
    AlreadyInstalled(PathBuf),
    /// The release was downloaded and installed at this path.
    Installed(PathBuf),
}

/// Ensures an fzf executable is available.
///
/// # Errors
///
/// Returns an error if the download, extraction or permission change fails.
/// On failure, the downloaded archive and any extracted binary are removed.
pub async fn provision(config: &ProvisionConfig) -> Result<Provisioned> {
    debug!("checking if {FZF_BINARY} is installed");
    if config.check_path && locate(FZF_BINARY) {
        debug!("{FZF_BINARY} already in path, won't install a local version");
        return Ok(Provisioned::OnPath);
    }

    let release = ReleaseDescriptor::resolve(config)?;
    if installed_version(config).await.as_deref() == Some(release.version.as_str())
        && release.binary_path.is_file()
    {
        debug!(
            "{} {} already installed",
            release.binary_path.display(),
            release.version
        );
        ensure_executable(&release.binary_path)?;
        return Ok(Provisioned::AlreadyInstalled(release.binary_path));
    }

    tokio::fs::create_dir_all(&config.install_dir)
        .await
        .map_err(|e| Error::io_error("install directory", &config.install_dir, e))?;

    if let Err(e) = install(&release, config).await {
        discard(&release, config).await;
        return Err(e);
    }

    if let Err(e) = tokio::fs::remove_file(&release.archive_path).await {
        warn!(
            "could not remove {}: {e}",
            release.archive_path.display()
        );
    }

    info!(
        "successfully installed {FZF_BINARY} {} in {}",
        release.version,
        release.binary_path.display()
    );
    Ok(Provisioned::Installed(release.binary_path))
}

async fn install(release: &ReleaseDescriptor, config: &ProvisionConfig) -> Result<()> {
    // Whatever copy was there before no longer matches this release.
    if let Err(e) = tokio::fs::remove_file(config.version_marker_path()).await {
        if e.kind() != std::io::ErrorKind::NotFound {
            warn!("could not remove stale version marker: {e}");
        }
    }

    let client = http_client()?;

    debug!("downloading {FZF_BINARY} from {}", release.url);
    fetch(&client, &release.url, &release.archive_path).await?;

    debug!("extracting {}", release.archive_path.display());
    extract(&release.archive_path, &config.install_dir).await?;

    if !release.binary_path.is_file() {
        return Err(Error::Misc(format!(
            "{} did not contain a `{FZF_BINARY}` binary",
            release.archive_path.display()
        )));
    }

    ensure_executable(&release.binary_path)?;

    // Written last: a binary without a matching marker is never trusted.
    let marker = config.version_marker_path();
    tokio::fs::write(&marker, &release.version)
        .await
        .map_err(|e| Error::io_error("version marker", &marker, e))
}

/// The release version recorded by the last completed install, if any.
async fn installed_version(config: &ProvisionConfig) -> Option<String> {
    tokio::fs::read_to_string(config.version_marker_path())
        .await
        .ok()
        .map(|version| version.trim().to_string())
}

async fn discard(release: &ReleaseDescriptor, config: &ProvisionConfig) {
    let marker = config.version_marker_path();
    for path in [&release.archive_path, &release.binary_path, &marker] {
        match tokio::fs::remove_file(path).await {
            Ok(()) => debug!("removed {}", path.display()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => warn!("could not remove {}: {e}", path.display()),
        }
    }
}
