//! Release asset resolution.

use std::collections::HashMap;
use std::path::PathBuf;

use leon::Template;
use reqwest::Url;

use crate::config::{ProvisionConfig, RELEASE_URL_TEMPLATE};
use crate::error::Result;

/// Archive name used when a download URL has no usable file name.
const FALLBACK_ARCHIVE_NAME: &str = "fzf.tar.gz";

/// Everything one provisioning run needs to know about the release it installs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseDescriptor {
    pub version: String,
    pub platform: String,
    pub arch: String,
    pub url: String,
    pub archive_path: PathBuf,
    pub binary_path: PathBuf,
}

impl ReleaseDescriptor {
    /// Resolves the release described by `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL template cannot be rendered.
    pub fn resolve(config: &ProvisionConfig) -> Result<Self> {
        let url = match &config.url {
            Some(url) => url.clone(),
            None => resolve_release_url(&config.version, &config.platform, &config.arch)?,
        };

        Ok(Self {
            version: config.version.clone(),
            platform: config.platform.clone(),
            arch: config.arch.clone(),
            archive_path: config.install_dir.join(archive_name(&url)),
            binary_path: config.binary_path(),
            url,
        })
    }
}

/// Renders [`RELEASE_URL_TEMPLATE`] for one version, platform and architecture.
///
/// # Errors
///
/// Returns an error if the template fails to parse or render.
///
/// # Examples
///
/// ```
/// use fzf_harness_core::provision::resolve_release_url;
///
/// let url = resolve_release_url("0.29.0", "linux", "amd64")?;
/// assert_eq!(
///     url,
///     "https://github.com/junegunn/fzf/releases/download/0.29.0/fzf-0.29.0-linux_amd64.tar.gz"
/// );
/// # Ok::<(), fzf_harness_core::error::Error>(())
/// ```
pub fn resolve_release_url(version: &str, platform: &str, arch: &str) -> Result<String> {
    let template = Template::parse(RELEASE_URL_TEMPLATE)?;

    let values: HashMap<&str, &str> =
        HashMap::from([("version", version), ("platform", platform), ("arch", arch)]);

    Ok(template.render(&values)?)
}

/// The file name the archive is saved under: the last path segment of `url`.
fn archive_name(url: &str) -> String {
    Url::parse(url)
        .ok()
        .and_then(|url| {
            url.path_segments()
                .and_then(|mut segments| segments.next_back().map(ToString::to_string))
        })
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| FALLBACK_ARCHIVE_NAME.to_string())
}
