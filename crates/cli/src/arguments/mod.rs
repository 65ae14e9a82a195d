//! Argument processing for the fzh CLI.
//!
//! This module turns the raw `select` arguments into what a selection needs:
//! - **Candidate source**: `--candidate` values, a `--source` command, or stdin
//! - **Preview options**: `--preview-opt KEY=VALUE` pairs, in order
//! - **Result transform**: optional field extraction from each selected line
//!
//! The candidate source styles cannot be mixed.

// Export public items from submodules
pub mod processing;
pub mod style;
pub mod transform;

// Re-exports for convenience
pub use processing::process_preview_options;
pub use style::determine;
pub use style::Provider;
pub use style::Style;
pub use transform::extract_field;
