//! Text cleanup for scraped cells

use regex::Regex;
use std::sync::LazyLock;

static FOOTNOTE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[\d+\]").expect("Failed to compile footnote regex - this is a bug")
});

static WHITESPACE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\s+").expect("Failed to compile whitespace regex - this is a bug")
});

/// Remove bracketed numeric reference markers such as `[3]` or `[12]`
pub fn strip_footnotes(text: &str) -> String {
    FOOTNOTE_RE.replace_all(text, "").into_owned()
}

/// Collapse whitespace runs to a single space and trim
pub fn collapse_whitespace(text: &str) -> String {
    WHITESPACE_RE.replace_all(text, " ").trim().to_string()
}

/// Footnotes stripped, whitespace collapsed, trimmed
pub fn clean_text(text: &str) -> String {
    collapse_whitespace(&strip_footnotes(text))
}

/// Non-empty and made only of ASCII digits
pub fn is_row_number(text: &str) -> bool {
    !text.is_empty() && text.chars().all(|c| c.is_ascii_digit())
}

/// Length in characters, not bytes
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}
