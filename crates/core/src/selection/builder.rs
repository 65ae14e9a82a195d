use std::path::PathBuf;
use std::sync::Arc;

use indexmap::IndexMap;

use crate::config::default_selector_bin;
use crate::selection::arguments::{build_arguments, Preview};
use crate::selection::{Selection, Transform};

/// Chained configuration for a [`Selection`].
///
/// Nothing is validated or resolved until [`build`](Self::build), which seals
/// the configuration into an immutable, shareable `Selection`.
///
/// # Examples
///
/// ```
/// use fzf_harness_core::selection::Selection;
///
/// let selection = Selection::builder()
///     .multi(2)
///     .result(|line| line.split(':').next().unwrap_or(line).to_string())
///     .bin("fzf")
///     .build();
///
/// assert_eq!(selection.arguments(), ["--multi", "2"]);
/// ```
pub struct SelectionBuilder<T> {
    bin: Option<PathBuf>,
    multi: Option<Option<usize>>,
    preview: Option<Preview>,
    extra_args: Vec<String>,
    transform: Transform<T>,
}

impl SelectionBuilder<String> {
    /// A builder for single selection returning lines unchanged.
    #[must_use]
    pub fn new() -> Self {
        Self {
            bin: None,
            multi: None,
            preview: None,
            extra_args: Vec::new(),
            transform: Arc::new(str::to_string),
        }
    }
}

impl Default for SelectionBuilder<String> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> SelectionBuilder<T> {
    /// Sets the selector executable. Defaults to [`default_selector_bin`].
    #[must_use]
    pub fn bin(mut self, bin: impl Into<PathBuf>) -> Self {
        self.bin = Some(bin.into());
        self
    }

    /// Enables multi-selection, optionally capped at `limit` selections.
    #[must_use]
    pub fn multi(mut self, limit: impl Into<Option<usize>>) -> Self {
        self.multi = Some(limit.into());
        self
    }

    /// Sets the preview command and its `--preview-<key> <value>` options.
    ///
    /// The command is passed through verbatim, so field placeholders such as
    /// `{1}` are left for the selector to substitute. A later call replaces
    /// the earlier preview entirely.
    #[must_use]
    pub fn preview<C, I, K, V>(mut self, command: C, options: I) -> Self
    where
        C: Into<String>,
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let options: IndexMap<String, String> = options
            .into_iter()
            .map(|(key, value)| (key.into(), value.into()))
            .collect();

        self.preview = Some(Preview {
            command: command.into(),
            options,
        });
        self
    }

    /// Appends one raw argument.
    #[must_use]
    pub fn arg(mut self, name: impl Into<String>) -> Self {
        self.extra_args.push(name.into());
        self
    }

    /// Appends a raw argument followed by its value.
    #[must_use]
    pub fn arg_value(self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.arg(name).arg(value)
    }

    /// Appends raw arguments in order.
    #[must_use]
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extra_args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Sets the transform applied to every cleaned output line.
    #[must_use]
    pub fn result<U, F>(self, transform: F) -> SelectionBuilder<U>
    where
        F: Fn(&str) -> U + Send + Sync + 'static,
    {
        SelectionBuilder {
            bin: self.bin,
            multi: self.multi,
            preview: self.preview,
            extra_args: self.extra_args,
            transform: Arc::new(transform),
        }
    }

    /// Seals the configuration.
    #[must_use]
    pub fn build(self) -> Selection<T> {
        let arguments = build_arguments(self.multi, self.preview.as_ref(), &self.extra_args);

        Selection {
            bin: self.bin.unwrap_or_else(default_selector_bin),
            arguments,
            multi: self.multi,
            transform: self.transform,
        }
    }
}
