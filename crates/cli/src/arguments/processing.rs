use indexmap::IndexMap;

use fzf_harness_core::error::Error::PreviewOptionFormat;
use fzf_harness_core::error::Result;

/// Parses `KEY=VALUE` preview options, keeping their order.
///
/// Only the first `=` separates key from value, so values may contain `=`.
/// A repeated key keeps its first position and takes the last value.
///
/// # Errors
///
/// Returns an error if an option has no `=` or an empty key.
pub fn process_preview_options(options: &[String]) -> Result<IndexMap<String, String>> {
    let mut processed = IndexMap::new();

    for option in options {
        let Some((key, value)) = option.split_once('=') else {
            return Err(PreviewOptionFormat(option.clone()));
        };

        if key.is_empty() {
            return Err(PreviewOptionFormat(option.clone()));
        }

        processed.insert(key.to_string(), value.to_string());
    }

    Ok(processed)
}
