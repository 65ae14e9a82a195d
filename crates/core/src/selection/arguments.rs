//! Command-line construction for the selector process.

use std::path::Path;

use indexmap::IndexMap;

/// Preview command plus its `--preview-<key>` options, in registration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preview {
    pub command: String,
    pub options: IndexMap<String, String>,
}

/// Builds the selector's argument vector.
///
/// Structured options come first (`--multi [N]`, then `--preview` and its
/// options), followed by the raw extra arguments in registration order.
///
/// ```
/// use fzf_harness_core::selection::arguments::build_arguments;
///
/// let args = build_arguments(Some(Some(2)), None, &["--ansi".to_string()]);
/// assert_eq!(args, vec!["--multi", "2", "--ansi"]);
/// ```
#[must_use]
pub fn build_arguments(
    multi: Option<Option<usize>>,
    preview: Option<&Preview>,
    extra_args: &[String],
) -> Vec<String> {
    let mut arguments = Vec::new();

    if let Some(limit) = multi {
        arguments.push("--multi".to_string());
        if let Some(limit) = limit {
            arguments.push(limit.to_string());
        }
    }

    if let Some(preview) = preview {
        arguments.push("--preview".to_string());
        arguments.push(preview.command.clone());
        for (key, value) in &preview.options {
            arguments.push(format!("--preview-{key}"));
            arguments.push(value.clone());
        }
    }

    arguments.extend(extra_args.iter().cloned());
    arguments
}

/// Quotes an argument for display as part of a shell command.
///
/// Arguments containing whitespace (or that are empty) are wrapped in single
/// quotes, with embedded single quotes escaped as `'\''`.
#[must_use]
pub fn shell_quote(argument: &str) -> String {
    if !argument.is_empty() && !argument.chars().any(char::is_whitespace) {
        return argument.to_string();
    }

    format!("'{}'", argument.replace('\'', r"'\''"))
}

/// Renders the shell equivalent of running `bin` with `arguments`.
#[must_use]
pub fn command_line(bin: &Path, arguments: &[String]) -> String {
    std::iter::once(shell_quote(&bin.to_string_lossy()))
        .chain(arguments.iter().map(|argument| shell_quote(argument)))
        .collect::<Vec<_>>()
        .join(" ")
}
