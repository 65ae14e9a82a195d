//! Provisioning configuration and path utilities for fzf-harness.
//!
//! This module holds the defaults used when locating or installing the fzf
//! binary, and the typed configuration populated from environment variables.

use std::env;
use std::path::{Path, PathBuf};

/// Name of the selector executable, both on the lookup path and locally.
pub const FZF_BINARY: &str = "fzf";

/// fzf release installed when no version override is set
pub const DEFAULT_FZF_VERSION: &str = "0.29.0";
/// File next to the local fzf copy recording which release it came from
pub const VERSION_MARKER: &str = ".fzf-version";
/// Default directory the local fzf copy is installed into
pub const DEFAULT_INSTALL_DIR: &str = "~/.fzf-harness/bin";
/// Download URL for a release archive, rendered with `version`, `platform` and `arch`.
pub const RELEASE_URL_TEMPLATE: &str = "https://github.com/junegunn/fzf/releases/download/{version}/fzf-{version}-{platform}_{arch}.tar.gz";

pub const VERSION_ENV: &str = "FZF_HARNESS_FZF_VERSION";
pub const ARCH_ENV: &str = "FZF_HARNESS_ARCH";
pub const PLATFORM_ENV: &str = "FZF_HARNESS_PLATFORM";
pub const URL_ENV: &str = "FZF_HARNESS_FZF_URL";
pub const INSTALL_DIR_ENV: &str = "FZF_HARNESS_INSTALL_DIR";

/// Host architecture names mapped to the names used in release archives.
pub const ARCH_ALIASES: &[(&str, &str)] = &[("x86_64", "amd64"), ("x64", "amd64"), ("aarch64", "arm64")];
/// Host platform names mapped to the names used in release archives.
pub const PLATFORM_ALIASES: &[(&str, &str)] = &[("macos", "darwin")];

fn alias<'a>(table: &[(&str, &'a str)], name: &'a str) -> &'a str {
    table
        .iter()
        .find(|(from, _)| *from == name)
        .map_or(name, |(_, to)| *to)
}

/// Maps an architecture name through [`ARCH_ALIASES`], passing unknown names through.
///
/// ```
/// use fzf_harness_core::config::normalize_arch;
///
/// assert_eq!(normalize_arch("x86_64"), "amd64");
/// assert_eq!(normalize_arch("armv7"), "armv7");
/// ```
#[must_use]
pub fn normalize_arch(arch: &str) -> &str {
    alias(ARCH_ALIASES, arch)
}

/// Maps a platform name through [`PLATFORM_ALIASES`], passing unknown names through.
#[must_use]
pub fn normalize_platform(platform: &str) -> &str {
    alias(PLATFORM_ALIASES, platform)
}

/// Settings for one provisioning run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvisionConfig {
    pub version: String,
    pub platform: String,
    pub arch: String,
    /// Replaces the templated download URL wholesale when set.
    pub url: Option<String>,
    pub install_dir: PathBuf,
    /// Skip installing when `fzf` is already on the lookup path.
    pub check_path: bool,
}

impl ProvisionConfig {
    /// Reads the overrides from the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds a configuration from an arbitrary variable lookup.
    ///
    /// Empty values count as unset. Overrides are taken verbatim; only the
    /// host-derived defaults go through the alias tables.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |name: &str| lookup(name).filter(|value| !value.is_empty());

        Self {
            version: lookup(VERSION_ENV).unwrap_or_else(|| DEFAULT_FZF_VERSION.to_string()),
            platform: lookup(PLATFORM_ENV)
                .unwrap_or_else(|| normalize_platform(env::consts::OS).to_string()),
            arch: lookup(ARCH_ENV).unwrap_or_else(|| normalize_arch(env::consts::ARCH).to_string()),
            url: lookup(URL_ENV),
            install_dir: get_install_dir(&lookup(INSTALL_DIR_ENV)),
            check_path: true,
        }
    }

    /// Where the extracted fzf binary ends up.
    #[must_use]
    pub fn binary_path(&self) -> PathBuf {
        self.install_dir.join(FZF_BINARY)
    }

    /// Where the version of a completed install is recorded.
    #[must_use]
    pub fn version_marker_path(&self) -> PathBuf {
        self.install_dir.join(VERSION_MARKER)
    }
}

/// Resolves the install directory.
///
/// If a custom path is provided, uses that path. Otherwise, uses the default
/// install directory. Shell expansions like `~` are resolved.
///
/// # Examples
///
/// ```
/// use fzf_harness_core::config::get_install_dir;
///
/// let custom = get_install_dir(&Some("/opt/fzf".to_string()));
/// assert_eq!(custom, std::path::PathBuf::from("/opt/fzf"));
/// ```
#[must_use]
pub fn get_install_dir(install_dir_arg: &Option<String>) -> PathBuf {
    let install_dir = match install_dir_arg {
        Some(install_dir) => install_dir,
        None => DEFAULT_INSTALL_DIR,
    };

    PathBuf::from(shellexpand::tilde(install_dir).to_string())
}

/// The selector binary used when none is configured explicitly.
///
/// Prefers a locally installed copy, falling back to `fzf` on the lookup path.
#[must_use]
pub fn default_selector_bin() -> PathBuf {
    let local = ProvisionConfig::from_env().binary_path();
    selector_bin_in(&local)
}

fn selector_bin_in(local: &Path) -> PathBuf {
    if local.is_file() {
        local.to_path_buf()
    } else {
        PathBuf::from(FZF_BINARY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_defaults_without_environment() {
        let config = ProvisionConfig::from_lookup(lookup_from(&[]));

        assert_eq!(config.version, DEFAULT_FZF_VERSION);
        assert_eq!(config.platform, normalize_platform(env::consts::OS));
        assert_eq!(config.arch, normalize_arch(env::consts::ARCH));
        assert!(config.url.is_none());
        assert!(config.check_path);
        assert!(!config.install_dir.to_string_lossy().starts_with('~'));
        assert!(config.install_dir.ends_with(".fzf-harness/bin"));
    }

    #[test]
    fn test_environment_overrides() {
        let config = ProvisionConfig::from_lookup(lookup_from(&[
            (VERSION_ENV, "0.44.1"),
            (ARCH_ENV, "x86_64"),
            (PLATFORM_ENV, "freebsd"),
            (URL_ENV, "https://mirror.example/fzf.tgz"),
            (INSTALL_DIR_ENV, "/opt/fzf"),
        ]));

        assert_eq!(config.version, "0.44.1");
        // Overrides are not aliased.
        assert_eq!(config.arch, "x86_64");
        assert_eq!(config.platform, "freebsd");
        assert_eq!(config.url.as_deref(), Some("https://mirror.example/fzf.tgz"));
        assert_eq!(config.install_dir, PathBuf::from("/opt/fzf"));
        assert_eq!(config.binary_path(), PathBuf::from("/opt/fzf/fzf"));
        assert_eq!(
            config.version_marker_path(),
            PathBuf::from("/opt/fzf/.fzf-version")
        );
    }

    #[test]
    fn test_empty_override_is_unset() {
        let config = ProvisionConfig::from_lookup(lookup_from(&[(VERSION_ENV, ""), (URL_ENV, "")]));
        assert_eq!(config.version, DEFAULT_FZF_VERSION);
        assert!(config.url.is_none());
    }

    #[test]
    fn test_aliases() {
        assert_eq!(normalize_arch("x64"), "amd64");
        assert_eq!(normalize_arch("aarch64"), "arm64");
        assert_eq!(normalize_arch("amd64"), "amd64");
        assert_eq!(normalize_platform("macos"), "darwin");
        assert_eq!(normalize_platform("linux"), "linux");
    }

    #[test]
    fn test_get_install_dir_with_tilde() {
        let result = get_install_dir(&Some("~/tools/fzf".to_string()));
        assert!(!result.to_string_lossy().starts_with('~'));
        assert!(result.ends_with("tools/fzf"));
    }

    #[test]
    fn test_selector_bin_prefers_local_copy() {
        let dir = tempfile::tempdir().unwrap();
        let local = dir.path().join(FZF_BINARY);

        assert_eq!(selector_bin_in(&local), PathBuf::from("fzf"));

        std::fs::write(&local, "#!/bin/sh\n").unwrap();
        assert_eq!(selector_bin_in(&local), local);
    }
}
