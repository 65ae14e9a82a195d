use std::path::Path;

use log::debug;

use crate::error::{Error, Result};

/// Whether an executable called `name` is resolvable on the lookup path.
#[must_use]
pub fn locate(name: &str) -> bool {
    match which::which(name) {
        Ok(path) => {
            debug!("found {name} at {}", path.display());
            true
        }
        Err(_) => false,
    }
}

/// Marks `path` as executable by owner, group and others (mode `0755`).
///
/// # Errors
///
/// Returns an error if the permissions cannot be changed.
#[cfg(unix)]
pub fn ensure_executable(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    debug!("adding +x file mode to {}", path.display());
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o755))
        .map_err(|e| Error::io_error("fzf binary", path, e))
}

/// Marks `path` as executable. Permissions carry no such bit here, so this
/// only checks that the file exists.
///
/// # Errors
///
/// Returns an error if `path` cannot be read.
#[cfg(not(unix))]
pub fn ensure_executable(path: &Path) -> Result<()> {
    std::fs::metadata(path)
        .map(|_| ())
        .map_err(|e| Error::io_error("fzf binary", path, e))
}
