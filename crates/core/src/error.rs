use leon::{ParseError, RenderError};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("fzf exited with error code {}", .code)]
    ProcessExit { code: i32 },

    #[error("Error with sub process: {}", _0)]
    SubProcess(#[from] std::io::Error),

    #[error("Could not start `{}`: {}", .program, .original)]
    Spawn {
        program: String,
        original: std::io::Error,
    },

    #[error("The sub process was spawned without a piped {}.", _0)]
    MissingPipe(&'static str),

    #[error("Error reading candidates: {}", _0)]
    Input(std::io::Error),

    #[error("GET {}: {} ({})", .url, .status, .message)]
    Fetch {
        url: String,
        status: u16,
        /// Canonical reason phrase for `status`, not the one the server sent.
        message: String,
    },

    #[error("GET {}: gave up after {} redirects", .url, .limit)]
    TooManyRedirects { url: String, limit: usize },

    #[error("HTTP error: {}", _0)]
    Http(#[from] reqwest::Error),

    #[error("tar exited with error code {}", .code)]
    Extraction { code: i32 },

    #[error("IO error with {} at path `{}`: {}", .description, .path, .original)]
    Io {
        description: String,
        path: String,
        original: std::io::Error,
    },

    #[error("Error parsing placeholder string: {}", .0)]
    Parse(#[from] ParseError),

    #[error("Error placeholder template string: {}", .0)]
    Render(#[from] RenderError),

    #[error("Invalid preview option `{}`: expected KEY=VALUE", .0)]
    PreviewOptionFormat(String),

    #[error("Candidates may come from `--candidate` values or `--source`, not both.")]
    MixedCandidateSources,

    #[error("Misc error: {}", .0)]
    Misc(String),
}

impl Error {
    pub fn io_error(description: &str, path: &std::path::Path, original: std::io::Error) -> Self {
        Self::Io {
            description: description.to_string(),
            path: path.display().to_string(),
            original,
        }
    }

    pub fn spawn_error(program: &std::path::Path, original: std::io::Error) -> Self {
        Self::Spawn {
            program: program.display().to_string(),
            original,
        }
    }

    /// A failed download. The message is the canonical reason phrase of
    /// `status` ("Unknown" for unregistered codes); the server's own phrase
    /// is not kept.
    pub fn fetch_error(url: &str, status: reqwest::StatusCode) -> Self {
        Self::Fetch {
            url: url.to_string(),
            status: status.as_u16(),
            message: status.canonical_reason().unwrap_or("Unknown").to_string(),
        }
    }

    /// The exit code carried by process failures, if any.
    #[must_use]
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            Self::ProcessExit { code } | Self::Extraction { code } => Some(*code),
            _ => None,
        }
    }
}

/// Converts an exit status to a numeric code.
///
/// Processes killed by a signal have no code of their own, so they are
/// reported the way shells do: `128 + signal`.
#[must_use]
pub fn exit_code(status: std::process::ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }

    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }

    -1
}
