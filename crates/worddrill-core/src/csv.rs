//! Line and field splitting for sheet exports.
//!
//! Sheet exports are comma-separated with optional double-quote wrapping.
//! Records never span lines: a quoted span is closed at the end of its line.

const SEPARATOR: char = ',';
const QUOTE: char = '"';

/// Split raw export text into non-blank lines.
///
/// A leading byte order mark is ignored, and a trailing `\r` is dropped so
/// CRLF exports split the same as LF ones.
pub fn split_lines(text: &str) -> impl Iterator<Item = &str> {
    text.strip_prefix('\u{feff}')
        .unwrap_or(text)
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .filter(|line| !line.trim().is_empty())
}

/// Split one line into trimmed fields.
///
/// A quote toggles the in-quotes state, `""` inside a quoted span is one
/// literal quote, and a separator inside quotes does not split.
pub fn split_fields(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            QUOTE if in_quotes && chars.peek() == Some(&QUOTE) => {
                current.push(QUOTE);
                chars.next();
            }
            QUOTE => in_quotes = !in_quotes,
            SEPARATOR if !in_quotes => {
                fields.push(current.trim().to_string());
                current.clear();
            }
            _ => current.push(c),
        }
    }
    fields.push(current.trim().to_string());
    fields
}

/// Split raw export text into rows of fields.
pub fn parse_rows(text: &str) -> Vec<Vec<String>> {
    split_lines(text).map(split_fields).collect()
}
