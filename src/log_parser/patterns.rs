use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Whole-token IPv4 match; the anchors keep `256.1.1.1` or `1.2.3.4x` out.
    pub static ref IPV4_EXACT_PATTERN: Regex = Regex::new(
        r"^((25[0-5]|2[0-4][0-9]|[01]?[0-9][0-9]?)\.){3}(25[0-5]|2[0-4][0-9]|[01]?[0-9][0-9]?)$"
    ).unwrap();

    pub static ref QUOTED_PATTERN: Regex = Regex::new(r#""(.+?)""#).unwrap();

    pub static ref BRACKETED_PATTERN: Regex = Regex::new(r"\[(.+?)\]").unwrap();
}

/// Every non-overlapping `"..."` group on the line, left to right.
pub fn find_all_quoted(text: &str) -> Vec<&str> {
    QUOTED_PATTERN
        .captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str())
        .collect()
}

pub fn first_quoted(text: &str) -> Option<&str> {
    QUOTED_PATTERN
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

pub fn first_bracketed(text: &str) -> Option<&str> {
    BRACKETED_PATTERN
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}
