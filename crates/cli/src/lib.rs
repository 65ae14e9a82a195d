//! fzf-harness CLI Library
//!
//! This crate provides the `fzh` command-line interface on top of
//! fzf-harness-core. It lets shell scripts hand a list of lines to fzf and
//! read back what the user picked, and installs fzf when it is missing.
//!
//! # Architecture
//!
//! - [`cli_args`]: Command-line argument parsing and validation
//! - [`arguments`]: Candidate sources, preview options and field extraction
//! - [`commands`]: The `select` and `install` workflows
//!
//! # Examples
//!
//! ```bash
//! # Pick one file from stdin
//! ls | fzh select
//!
//! # Pick up to two entries and print their first `:`-separated field
//! fzh select --limit 2 -d : -f 1 -c 1:first -c 2:second -c 3:third
//!
//! # Pick a container, previewing it, with the header line kept out of the list
//! fzh select -s 'docker ps -a' -f 1 -p 'docker inspect {1}' -o window=right:40% \
//!     -- --header-lines 1
//!
//! # Install fzf locally unless it is already on the PATH
//! fzh install
//! ```
//!
//! Set `FZF_HARNESS_LOG=debug` to log the fzf command line, downloads and
//! extraction progress.

pub mod arguments;
pub mod cli_args;
pub mod commands;
