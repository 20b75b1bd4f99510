//! Header and cell cleaning
//!
//! Uploaded spreadsheets arrive with byte-order marks glued to the first header, headers and
//! values wrapped in stray quotes, and padding whitespace. Both functions here are pure and
//! total: input that matches none of the patterns comes back unchanged.

const BYTE_ORDER_MARK: char = '\u{FEFF}';

/// Clean a header: drop one leading BOM, strip one layer of surrounding quotes, trim.
pub fn normalize_header(raw: &str) -> String {
    let without_bom = raw.strip_prefix(BYTE_ORDER_MARK).unwrap_or(raw);
    strip_surrounding_quotes(without_bom).trim().to_string()
}

/// Clean a cell value: strip one layer of surrounding quotes, trim.
pub fn normalize_value(raw: &str) -> String {
    strip_surrounding_quotes(raw).trim().to_string()
}

/// Remove the first and last character when both are `'` or `"`.
///
/// A lone quote character is not a pair and is left alone.
pub fn strip_surrounding_quotes(value: &str) -> &str {
    let mut chars = value.chars();
    match (chars.next(), chars.next_back()) {
        (Some(first), Some(last)) if is_quote(first) && is_quote(last) => chars.as_str(),
        _ => value,
    }
}

fn is_quote(c: char) -> bool {
    c == '"' || c == '\''
}
