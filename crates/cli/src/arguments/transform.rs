/// Extracts the 1-based `field` of `line`.
///
/// Fields are split on `delimiter`, or on runs of whitespace when no
/// delimiter is given. Lines with fewer fields are returned unchanged.
///
/// # Examples
///
/// ```rust
/// use fzf_harness_cli::arguments::extract_field;
///
/// assert_eq!(extract_field("2:second", Some(":"), 1), "2");
/// assert_eq!(extract_field("f00ba4  nginx  Up 2 hours", None, 2), "nginx");
/// ```
#[must_use]
pub fn extract_field(line: &str, delimiter: Option<&str>, field: usize) -> String {
    let index = field.saturating_sub(1);

    let extracted = match delimiter {
        Some(delimiter) if !delimiter.is_empty() => line.split(delimiter).nth(index),
        _ => line.split_whitespace().nth(index),
    };

    extracted.unwrap_or(line).trim().to_string()
}
