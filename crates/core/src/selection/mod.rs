//! Driving fzf as a subprocess.
//!
//! A [`Selection`] is configured through a [`SelectionBuilder`], sealed with
//! `build()`, and then run any number of times against a set of
//! [`Candidates`]. Each run spawns one selector process with stdin and stdout
//! piped and stderr inherited, so the interactive UI keeps the terminal.

use std::path::{Path, PathBuf};
use std::sync::Arc;

pub mod arguments;
pub mod builder;
mod execution;
pub mod input;
pub mod output;

// Re-exports for convenience
pub use builder::SelectionBuilder;
pub use input::Candidates;
pub use output::SelectionOutput;

/// Per-line result transform.
pub type Transform<T> = Arc<dyn Fn(&str) -> T + Send + Sync>;

/// A sealed selector invocation.
///
/// Immutable once built; cloning is cheap and clones can run concurrently,
/// each owning its own process.
pub struct Selection<T> {
    bin: PathBuf,
    arguments: Vec<String>,
    multi: Option<Option<usize>>,
    transform: Transform<T>,
}

impl Selection<String> {
    #[must_use]
    pub fn builder() -> SelectionBuilder<String> {
        SelectionBuilder::new()
    }
}

impl<T> Selection<T> {
    #[must_use]
    pub fn bin(&self) -> &Path {
        &self.bin
    }

    /// The full argument vector passed to the selector.
    #[must_use]
    pub fn arguments(&self) -> &[String] {
        &self.arguments
    }

    #[must_use]
    pub fn is_multi(&self) -> bool {
        self.multi.is_some()
    }

    /// The maximum number of selections, if multi-select is capped.
    #[must_use]
    pub fn limit(&self) -> Option<usize> {
        self.multi.flatten()
    }

    /// Applies the result transform to one cleaned line.
    pub fn transform(&self, line: &str) -> T {
        (self.transform)(line)
    }
}

impl<T> Clone for Selection<T> {
    fn clone(&self) -> Self {
        Self {
            bin: self.bin.clone(),
            arguments: self.arguments.clone(),
            multi: self.multi,
            transform: Arc::clone(&self.transform),
        }
    }
}

impl<T> std::fmt::Debug for Selection<T> {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("Selection")
            .field("bin", &self.bin)
            .field("arguments", &self.arguments)
            .field("multi", &self.multi)
            .finish_non_exhaustive()
    }
}
