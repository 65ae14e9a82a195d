use clap::Parser;
use env_logger::Env;
use itertools::Itertools;
use log::debug;
use std::process::ExitCode;

use fzf_harness_cli::cli_args::{Args, Commands};
use fzf_harness_cli::commands;
use fzf_harness_core::error::{Error, Result};
use fzf_harness_core::provision::Provisioned;

/// Environment variable holding the log filter, e.g. `debug`.
const LOG_ENV: &str = "FZF_HARNESS_LOG";

async fn execute(args: Args) -> Result<()> {
    match args.command {
        Commands::Select(select_args) => {
            let selected = commands::select(&select_args).await?;
            debug!("{} line(s) selected", selected.len());

            if !selected.is_empty() {
                println!("{}", selected.iter().join("\n"));
            }
        }
        Commands::Install(install_args) => match commands::install(&install_args).await? {
            Provisioned::OnPath => println!("fzf is already on the PATH, nothing to install."),
            Provisioned::AlreadyInstalled(path) => {
                println!("fzf is already installed at {}", path.display());
            }
            Provisioned::Installed(path) => {
                println!("Successfully installed fzf in {}", path.display());
            }
        },
    }

    Ok(())
}

fn exit_code_for(error: &Error) -> ExitCode {
    match error {
        Error::ProcessExit { code } => u8::try_from(*code).map_or(ExitCode::FAILURE, ExitCode::from),
        _ => ExitCode::FAILURE,
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(Env::default().filter_or(LOG_ENV, "warn")).init();

    let args = Args::parse();

    let runtime = match tokio::runtime::Runtime::new() {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let result = runtime.block_on(execute(args));
    // A stdin reader may still be blocked on the pipe; don't wait for it.
    runtime.shutdown_background();

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            exit_code_for(&e)
        }
    }
}
