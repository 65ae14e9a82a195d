//! Command-line argument parsing and validation.
//!
//! This module defines the command-line interface structure and provides
//! validation for CLI arguments using the `clap` crate.

use crate::arguments::{determine, Provider, Style};
use clap::{Parser, Subcommand};
use fzf_harness_core::error::Result;

/// Command-line arguments for the fzh CLI tool.
///
/// # Examples
///
/// ```rust
/// use clap::Parser;
/// use fzf_harness_cli::cli_args::{Args, Commands};
///
/// let args = Args::parse_from(["fzh", "select", "--multi"]);
/// assert!(matches!(args.command, Commands::Select(_)));
/// ```
#[derive(Parser, Debug)] // requires `derive` feature
#[command(name = "fzh", version, about = "Drive fzf from scripts and install it when missing")]
#[command(term_width = 0)] // Just to make testing across clap features easier
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Let the user pick lines with fzf and print the picked lines.
    Select(SelectArgs),
    /// Make sure an fzf binary is available, downloading it if needed.
    Install(InstallArgs),
}

/// Arguments of the `select` subcommand.
#[derive(clap::Args, Debug, Default)]
pub struct SelectArgs {
    /// Path or name of the fzf executable.
    ///
    /// If not provided, a local install is used when present, otherwise `fzf`.
    #[arg(long, short = 'b')]
    pub bin: Option<String>,

    /// Allow selecting more than one line.
    #[arg(long, short = 'm', action)]
    pub multi: bool,

    /// Maximum number of lines that can be selected. Implies `--multi`.
    #[arg(long, short = 'l')]
    pub limit: Option<usize>,

    /// Command run by fzf to preview the highlighted line, e.g. `cat {1}`.
    #[arg(long, short = 'p')]
    pub preview: Option<String>,

    /// Preview display options in the format key=value, passed as `--preview-<key> <value>`.
    ///
    /// # Examples
    /// ```bash
    /// fzh select --preview 'cat {}' -o window=right:40% -o label=file
    /// ```
    #[arg(
        long = "preview-opt",
        short = 'o',
        value_name = "KEY=VALUE",
        action = clap::ArgAction::Append,
        requires = "preview"
    )]
    pub preview_options: Vec<String>,

    /// Delimiter used to split selected lines into fields.
    ///
    /// Defaults to runs of whitespace.
    #[arg(long, short = 'd')]
    pub delimiter: Option<String>,

    /// Print only this 1-based field of each selected line.
    #[arg(long, short = 'f', value_parser = clap::value_parser!(u32).range(1..))]
    pub field: Option<u32>,

    /// A candidate line. Repeat for more; stdin is not read when given.
    #[arg(long = "candidate", short = 'c', action = clap::ArgAction::Append)]
    pub candidates: Vec<String>,

    /// Shell command whose output is streamed in as candidates.
    #[arg(long, short = 's')]
    pub source: Option<String>,

    /// Raw arguments passed to fzf after all other options.
    ///
    /// # Examples
    /// ```bash
    /// fzh select -- --header-lines 1 --with-nth 2..
    /// ```
    #[arg(last = true)]
    pub raw_args: Vec<String>,
}

impl SelectArgs {
    /// Whether multi-selection is requested, and its cap.
    #[must_use]
    pub fn multi_limit(&self) -> Option<Option<usize>> {
        if self.multi || self.limit.is_some() {
            Some(self.limit)
        } else {
            None
        }
    }
}

impl Provider for SelectArgs {
    fn get_style(&self) -> Result<Style> {
        determine(&self.candidates, self.source.as_deref())
    }
}

/// Arguments of the `install` subcommand.
#[derive(clap::Args, Debug, Default)]
pub struct InstallArgs {
    /// Directory to install fzf into.
    ///
    /// If not provided, defaults to `FZF_HARNESS_INSTALL_DIR` or `~/.fzf-harness/bin`.
    #[arg(long, short = 'i')]
    pub install_dir: Option<String>,

    /// Install a local copy even when fzf is already on the PATH.
    #[arg(long, action)]
    pub force_local: bool,
}
