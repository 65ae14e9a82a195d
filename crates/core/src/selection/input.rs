//! Candidate sources fed to the selector's stdin.

use std::fmt::{Debug, Formatter};
use std::io::ErrorKind;

use log::{debug, warn};
use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt};

/// The lines offered to the selector. Consumed exactly once per run.
pub enum Candidates {
    /// A finite list, joined with newlines.
    Lines(Vec<String>),
    /// A live stream piped through as-is, e.g. another process's stdout.
    Stream(Box<dyn AsyncRead + Send + Unpin>),
}

impl Candidates {
    pub fn stream<R>(reader: R) -> Self
    where
        R: AsyncRead + Send + Unpin + 'static,
    {
        Self::Stream(Box::new(reader))
    }
}

impl Debug for Candidates {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Lines(lines) => formatter.debug_tuple("Lines").field(lines).finish(),
            Self::Stream(_) => formatter.write_str("Stream(..)"),
        }
    }
}

impl From<Vec<String>> for Candidates {
    fn from(lines: Vec<String>) -> Self {
        Self::Lines(lines)
    }
}

impl From<Vec<&str>> for Candidates {
    fn from(lines: Vec<&str>) -> Self {
        Self::Lines(lines.into_iter().map(ToString::to_string).collect())
    }
}

impl<const N: usize> From<[&str; N]> for Candidates {
    fn from(lines: [&str; N]) -> Self {
        Self::Lines(lines.iter().map(ToString::to_string).collect())
    }
}

/// Writes all candidates into `sink`, then shuts it down.
///
/// A broken pipe means the selector stopped reading (it already exited, for
/// instance after an early accept), which is not an error for the feeder.
pub(crate) async fn feed<W>(mut sink: W, candidates: Candidates) -> std::io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    let written = match candidates {
        Candidates::Lines(lines) => {
            debug!("Feeding {} candidate lines", lines.len());
            sink.write_all(lines.join("\n").as_bytes()).await
        }
        Candidates::Stream(mut reader) => {
            debug!("Piping candidate stream");
            tokio::io::copy(&mut reader, &mut sink).await.map(|bytes| {
                debug!("Piped {bytes} bytes of candidates");
            })
        }
    };

    let closed = match written {
        Ok(()) => sink.shutdown().await,
        Err(e) => Err(e),
    };

    match closed {
        Err(e) if e.kind() == ErrorKind::BrokenPipe => {
            warn!("Selector closed its input before all candidates were written");
            Ok(())
        }
        other => other,
    }
}
