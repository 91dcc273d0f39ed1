//! Whitespace normalization

/// Collapse every run of whitespace into one ASCII space and trim the ends.
///
/// Newlines, tabs and Unicode spaces all count as whitespace. Applying it
/// twice gives the same result as applying it once.
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
