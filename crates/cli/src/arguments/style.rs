//! Candidate source determination and validation.
//!
//! This module defines where the candidates of a `select` run come from
//! and validates that only one source is used at a time.

use fzf_harness_core::error::Error::MixedCandidateSources;
use fzf_harness_core::error::Result;

/// Represents where candidate lines are read from.
#[derive(PartialEq, Clone, Debug)]
pub enum Style {
    /// Nothing given on the command line: candidates are streamed from stdin
    Stdin,
    /// Candidates given with repeated `--candidate` flags
    List(Vec<String>),
    /// A shell command whose stdout is streamed in as candidates
    Command(String),
}

/// Trait for objects that can determine their candidate source.
pub trait Provider {
    /// Validates that candidate sources aren't mixed and returns the
    /// appropriate `Style`.
    ///
    /// # Errors
    ///
    /// Returns an error if both `--candidate` and `--source` are given.
    fn get_style(&self) -> Result<Style>;
}

/// Determines the candidate source from the provided arguments.
///
/// # Errors
///
/// Returns [`MixedCandidateSources`] if both a candidate list and a source
/// command are provided.
///
/// # Examples
///
/// ```rust
/// use fzf_harness_cli::arguments::{determine, Style};
///
/// let style = determine(&["a".to_string()], None).unwrap();
/// assert_eq!(style, Style::List(vec!["a".to_string()]));
///
/// let style = determine(&[], None).unwrap();
/// assert_eq!(style, Style::Stdin);
/// ```
pub fn determine(candidates: &[String], source: Option<&str>) -> Result<Style> {
    match (candidates.is_empty(), source) {
        (false, Some(_)) => Err(MixedCandidateSources),
        (false, None) => Ok(Style::List(candidates.to_vec())),
        (true, Some(command)) => Ok(Style::Command(command.to_string())),
        (true, None) => Ok(Style::Stdin),
    }
}
