//! Parsing of the selector's output stream.

/// What a run resolves to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionOutput<T> {
    /// Single-select mode: the first emitted line, if any.
    Single(Option<T>),
    /// Multi-select mode: every emitted line, in emission order.
    Multi(Vec<T>),
}

impl<T> SelectionOutput<T> {
    /// The single selection, or the first of several.
    pub fn into_single(self) -> Option<T> {
        match self {
            Self::Single(item) => item,
            Self::Multi(items) => items.into_iter().next(),
        }
    }

    /// All selections as a list.
    pub fn into_vec(self) -> Vec<T> {
        match self {
            Self::Single(item) => item.into_iter().collect(),
            Self::Multi(items) => items,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Single(item) => item.is_none(),
            Self::Multi(items) => items.is_empty(),
        }
    }
}

/// Cleans one raw output line; `None` for lines that are blank once trimmed.
///
/// ```
/// use fzf_harness_core::selection::output::clean_line;
///
/// assert_eq!(clean_line("  2:second \r\n"), Some("2:second"));
/// assert_eq!(clean_line("\r\n"), None);
/// ```
#[must_use]
pub fn clean_line(raw: &str) -> Option<&str> {
    let line = raw.trim_end_matches(['\r', '\n']).trim();
    if line.is_empty() {
        None
    } else {
        Some(line)
    }
}
