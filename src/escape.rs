//! Escaping rules for the INI text form.
//!
//! Values reserve three characters: `;` and `#` open an inline comment and a
//! raw newline ends the line. Inside a value they are written as `\;`, `\#`
//! and `\N`. The parser reverses this: a backslash takes the next character
//! literally, except that `N`/`n` after a backslash in a value becomes a
//! newline. A literal backslash is written as `\\` so that every string
//! survives a write/read cycle. A carriage return is written as a backslash
//! followed by the raw `\r`, which keeps it from being trimmed as line padding.
//!
//! ```rust
//! use serde_ini_doc::escape::escape_value;
//!
//! assert_eq!(escape_value("a;b#c"), r"a\;b\#c");
//! assert_eq!(escape_value("line1\nline2"), r"line1\Nline2");
//! ```

/// Characters that may not appear in a key.
pub const DISALLOWED_KEY_CHARS: &str = "?{}|&~![()^\n";

/// Returns `true` when `key` can be stored in a document.
///
/// Rejects the empty string and any key containing one of
/// [`DISALLOWED_KEY_CHARS`].
///
/// # Examples
///
/// ```rust
/// use serde_ini_doc::escape::is_key_valid;
///
/// assert!(is_key_valid("user.name"));
/// assert!(!is_key_valid(""));
/// assert!(!is_key_valid("what?"));
/// ```
#[must_use]
pub fn is_key_valid(key: &str) -> bool {
    !key.is_empty() && !key.contains(|c: char| DISALLOWED_KEY_CHARS.contains(c))
}

/// Escapes a value for the right-hand side of `key=value`.
#[must_use]
pub fn escape_value(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len() + 8);
    for ch in value.chars() {
        match ch {
            '\\' => escaped.push_str("\\\\"),
            ';' => escaped.push_str("\\;"),
            '#' => escaped.push_str("\\#"),
            '\n' => escaped.push_str("\\N"),
            '\r' => escaped.push_str("\\\r"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// Decodes an escaped value, the same way the parser reads it.
///
/// # Examples
///
/// ```rust
/// use serde_ini_doc::escape::{escape_value, unescape_value};
///
/// let raw = "50% off; today only # really\nsee C:\\deals";
/// assert_eq!(unescape_value(&escape_value(raw)), raw);
/// ```
#[must_use]
pub fn unescape_value(escaped: &str) -> String {
    let mut value = String::with_capacity(escaped.len());
    let mut chars = escaped.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            value.push(ch);
            continue;
        }
        match chars.next() {
            Some('N' | 'n') => value.push('\n'),
            Some(next) => value.push(next),
            None => {}
        }
    }
    value
}

/// Escapes a key for the left-hand side of `key=value`.
///
/// `=` ends a key anywhere, while `;`, `#` and `[` only change the meaning of
/// a line when they come first.
#[must_use]
pub fn escape_key(key: &str) -> String {
    let mut escaped = String::with_capacity(key.len() + 2);
    for (i, ch) in key.chars().enumerate() {
        match ch {
            '\\' | '=' => {
                escaped.push('\\');
                escaped.push(ch);
            }
            ';' | '#' | '[' if i == 0 => {
                escaped.push('\\');
                escaped.push(ch);
            }
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// Escapes a section name for use between `[` and `]`.
#[must_use]
pub fn escape_section_name(name: &str) -> String {
    let mut escaped = String::with_capacity(name.len() + 2);
    for ch in name.chars() {
        if matches!(ch, '\\' | ']' | '\n') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

/// Escapes comment text. An escaped newline stays inside the comment.
#[must_use]
pub fn escape_comment(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len() + 2);
    for ch in text.chars() {
        if matches!(ch, '\\' | '\n') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}
