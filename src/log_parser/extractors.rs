//! Single-field extractors for the hosting access-log layout.
//!
//! The layout mixes brackets (timestamp), double quotes (request and user
//! agent) and bare whitespace (everything else), with no escaping. Each
//! extractor pulls one field using the narrowest rule that finds it, and
//! returns `None` when the structure it relies on is absent.

use super::patterns::{find_all_quoted, first_bracketed, first_quoted, IPV4_EXACT_PATTERN};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Request<'a> {
    pub method: &'a str,
    pub url: &'a str,
    pub protocol: &'a str,
}

pub fn validate_ip(token: &str) -> Option<&str> {
    IPV4_EXACT_PATTERN.find(token).map(|m| m.as_str())
}

pub fn leading_token(line: &str) -> Option<&str> {
    line.split_whitespace().next()
}

/// Last quoted group on the line. A line with extra quoted fields still
/// resolves to whatever comes last.
pub fn user_agent(line: &str) -> Option<&str> {
    find_all_quoted(line).last().copied()
}

pub fn date(line: &str) -> Option<&str> {
    let stamp = first_bracketed(line)?;
    Some(stamp.split_once(':').map_or(stamp, |(date, _)| date))
}

pub fn time(line: &str) -> Option<&str> {
    let stamp = first_bracketed(line)?;
    stamp.split_once(':').map(|(_, time)| time)
}

pub fn request(line: &str) -> Option<Request<'_>> {
    let quoted = first_quoted(line)?;
    let mut parts = quoted.split_whitespace();
    let method = parts.next()?;
    let url = parts.next()?;
    let protocol = parts.last().unwrap_or(url);
    Some(Request {
        method,
        url,
        protocol,
    })
}

pub fn website(line: &str) -> Option<&str> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    tokens.len().checked_sub(2).map(|i| tokens[i])
}

pub fn dest_url(line: &str) -> Option<&str> {
    line.split_whitespace().last()
}
