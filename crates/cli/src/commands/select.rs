use std::path::Path;
use std::process::Stdio;

use log::{debug, warn};
use tokio::process::Command;

use fzf_harness_core::error::{Error, Result};
use fzf_harness_core::selection::{Candidates, Selection};

use crate::arguments::{extract_field, process_preview_options, Provider, Style};
use crate::cli_args::SelectArgs;

/// Shell used to run `--source` commands.
const SOURCE_SHELL: &str = "sh";

/// Builds the selection described by `args`.
///
/// # Errors
///
/// Returns an error if a preview option is malformed.
pub fn build_selection(args: &SelectArgs) -> Result<Selection<String>> {
    let mut builder = Selection::builder();

    if let Some(bin) = &args.bin {
        builder = builder.bin(bin);
    }

    if let Some(limit) = args.multi_limit() {
        builder = builder.multi(limit);
    }

    if let Some(preview) = &args.preview {
        builder = builder.preview(preview, process_preview_options(&args.preview_options)?);
    }

    let builder = builder.args(&args.raw_args);

    Ok(match args.field {
        Some(field) => {
            let delimiter = args.delimiter.clone();
            let field = field as usize;
            builder
                .result(move |line| extract_field(line, delimiter.as_deref(), field))
                .build()
        }
        None => builder.build(),
    })
}

/// Runs the selection and returns the picked lines.
///
/// # Errors
///
/// Returns an error if the candidate sources are mixed, the source command
/// cannot be started, or fzf fails or is cancelled.
pub async fn select(args: &SelectArgs) -> Result<Vec<String>> {
    let selection = build_selection(args)?;

    let output = match args.get_style()? {
        Style::List(candidates) => selection.run(candidates).await?,
        Style::Stdin => {
            debug!("reading candidates from stdin");
            selection
                .run(Candidates::stream(tokio::io::stdin()))
                .await?
        }
        Style::Command(command) => {
            debug!("reading candidates from `{command}`");
            let mut source = Command::new(SOURCE_SHELL)
                .arg("-c")
                .arg(&command)
                .stdin(Stdio::null())
                .stdout(Stdio::piped())
                .stderr(Stdio::inherit())
                .kill_on_drop(true)
                .spawn()
                .map_err(|e| Error::spawn_error(Path::new(SOURCE_SHELL), e))?;
            let stdout = source.stdout.take().ok_or(Error::MissingPipe("stdout"))?;

            let output = selection.run(Candidates::stream(stdout)).await;

            // The source may still be producing when fzf is done with it.
            if let Err(e) = source.start_kill() {
                debug!("source command already finished: {e}");
            }
            if let Err(e) = source.wait().await {
                warn!("could not reap source command: {e}");
            }

            output?
        }
    };

    Ok(output.into_vec())
}
