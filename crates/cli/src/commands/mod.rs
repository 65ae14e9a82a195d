//! The work behind each subcommand.
//!
//! - [`select`]: builds a selection from the CLI arguments and runs it
//! - [`install`]: provisions the fzf binary

pub mod install;
pub mod select;

pub use install::install;
pub use select::select;
