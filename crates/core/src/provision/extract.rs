use std::path::Path;
use std::process::Stdio;

use log::{debug, log_enabled, Level};
use tokio::process::Command;

use crate::error::{exit_code, Error, Result};

/// Unpacks a gzipped tarball into `working_dir` with the system `tar`.
///
/// With debug logging on, tar runs verbosely and its output is forwarded to
/// the logger; otherwise its output is discarded.
///
/// # Errors
///
/// Returns [`Error::Extraction`] with tar's exit code if it fails, or an
/// error if tar cannot be started.
pub async fn extract(archive: &Path, working_dir: &Path) -> Result<()> {
    // tar runs inside `working_dir`, so a relative archive path would miss.
    let archive = tokio::fs::canonicalize(archive)
        .await
        .map_err(|e| Error::io_error("archive", archive, e))?;

    let mut command = Command::new("tar");
    command
        .arg("-xvzf")
        .arg(&archive)
        .current_dir(working_dir)
        .stdin(Stdio::null());

    debug!("extracting {} into {}", archive.display(), working_dir.display());

    let status = if log_enabled!(Level::Debug) {
        let output = command
            .output()
            .await
            .map_err(|e| Error::spawn_error(Path::new("tar"), e))?;

        for line in String::from_utf8_lossy(&output.stdout)
            .lines()
            .chain(String::from_utf8_lossy(&output.stderr).lines())
        {
            debug!("tar: {line}");
        }

        output.status
    } else {
        command
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await
            .map_err(|e| Error::spawn_error(Path::new("tar"), e))?
    };

    if status.success() {
        Ok(())
    } else {
        Err(Error::Extraction {
            code: exit_code(status),
        })
    }
}
