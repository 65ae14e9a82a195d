use std::process::{ExitStatus, Stdio};

use log::{debug, log_enabled, trace, Level};
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::Command;

use crate::error::{exit_code, Error, Result};
use crate::selection::arguments::command_line;
use crate::selection::input::{feed, Candidates};
use crate::selection::output::{clean_line, SelectionOutput};
use crate::selection::Selection;

impl<T> Selection<T> {
    /// Runs the selector once over `candidates`.
    ///
    /// Output lines are cleaned and transformed as they arrive. A non-zero
    /// exit yields [`Error::ProcessExit`] as soon as the process exits, even
    /// when lines were already read. After a zero exit the remaining output
    /// is drained and the selection returned.
    ///
    /// Dropping the returned future kills the selector.
    ///
    /// # Errors
    ///
    /// Returns an error if the selector cannot be spawned, exits non-zero,
    /// or the candidate source fails while being read.
    pub async fn run(&self, candidates: impl Into<Candidates>) -> Result<SelectionOutput<T>> {
        let mut command = Command::new(&self.bin);
        command
            .args(&self.arguments)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .kill_on_drop(true);

        if log_enabled!(Level::Debug) {
            debug!("running: {}", command_line(&self.bin, &self.arguments));
        }

        let mut child = command
            .spawn()
            .map_err(|e| Error::spawn_error(&self.bin, e))?;
        let stdin = child.stdin.take().ok_or(Error::MissingPipe("stdin"))?;
        let stdout = child.stdout.take().ok_or(Error::MissingPipe("stdout"))?;

        let feeder = tokio::spawn(feed(stdin, candidates.into()));

        // Descendants may inherit stdout and hold it open after the selector
        // exits, so the exit status is watched alongside the output.
        let mut collecting = std::pin::pin!(self.collect(stdout));
        let mut lines = None;
        let status = loop {
            tokio::select! {
                collected = &mut collecting, if lines.is_none() => lines = Some(collected),
                status = child.wait() => break status?,
            }
        };

        if !status.success() {
            feeder.abort();
            return Err(Error::ProcessExit {
                code: exit_code(status),
            });
        }

        let lines = match lines {
            Some(lines) => lines,
            None => collecting.await,
        };

        // A source that is still producing once the selector is gone is dropped.
        let fed = if feeder.is_finished() {
            Some(
                feeder
                    .await
                    .unwrap_or_else(|e| Err(std::io::Error::other(e.to_string()))),
            )
        } else {
            feeder.abort();
            None
        };

        settle(self.multi, status, lines, fed)
    }

    async fn collect<R>(&self, stdout: R) -> std::io::Result<Vec<T>>
    where
        R: AsyncRead + Unpin,
    {
        let mut reader = BufReader::new(stdout);
        let mut buffer = Vec::new();
        let mut results = Vec::new();

        loop {
            buffer.clear();
            if reader.read_until(b'\n', &mut buffer).await? == 0 {
                break;
            }

            let raw = String::from_utf8_lossy(&buffer);
            if let Some(line) = clean_line(&raw) {
                trace!("selector emitted `{line}`");
                results.push(self.transform(line));
            }
        }

        Ok(results)
    }
}

/// Combines the exit status, the collected output and the feeder's result
/// into the single outcome of a run.
fn settle<T>(
    multi: Option<Option<usize>>,
    status: ExitStatus,
    lines: std::io::Result<Vec<T>>,
    fed: Option<std::io::Result<()>>,
) -> Result<SelectionOutput<T>> {
    if !status.success() {
        return Err(Error::ProcessExit {
            code: exit_code(status),
        });
    }

    let mut lines = lines?;
    if let Some(Err(e)) = fed {
        return Err(Error::Input(e));
    }

    debug!("selector exited cleanly with {} line(s)", lines.len());

    Ok(match multi {
        Some(limit) => {
            if let Some(limit) = limit.filter(|limit| *limit > 0) {
                lines.truncate(limit);
            }
            SelectionOutput::Multi(lines)
        }
        None => SelectionOutput::Single(lines.into_iter().next()),
    })
}
