//! fzf-harness Core Library
//!
//! This crate drives [fzf](https://github.com/junegunn/fzf) from Rust: it
//! feeds candidate lines to an fzf subprocess, lets the user pick one or more
//! of them, and hands the picked lines back, optionally transformed.
//!
//! # Key Features
//!
//! - **Selection**: Chained configuration sealed into a reusable [`selection::Selection`]
//! - **Candidate Sources**: Finite line lists or live streams such as another process's stdout
//! - **Typed Results**: Per-line transforms producing any output type
//! - **Provisioning**: Locating fzf or installing a platform-specific release
//! - **Error Handling**: Exit codes, HTTP failures and extraction failures as typed errors
//!
//! # Examples
//!
//! Picking up to two entries and keeping only their numeric prefix:
//!
//! ```no_run
//! use fzf_harness_core::selection::Selection;
//!
//! # async fn pick() -> fzf_harness_core::error::Result<()> {
//! let selection = Selection::builder()
//!     .multi(2)
//!     .result(|line| line.split(':').next().unwrap_or(line).to_string())
//!     .build();
//!
//! let picked = selection
//!     .run(["1:first", "2:second", "3:third", "4:fourth"])
//!     .await?
//!     .into_vec();
//! println!("{picked:?}");
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod provision;
pub mod selection;
