use std::collections::HashSet;

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref PATTERN: Regex = Regex::new(r"[A-Za-z0-9]+-[0-9]+").unwrap();
}

/// Extract issue keys (e.g. "PLY-123") from a list of commit messages
///
/// Keys are deduplicated in first-seen order and only those whose prefix is
/// one of `prefixes` are kept. Prefix comparison is case-sensitive.
pub fn extract_from_vec<S: AsRef<str>>(messages: &[S], prefixes: &[String]) -> Vec<String> {
    let joined = messages
        .iter()
        .map(|m| m.as_ref())
        .collect::<Vec<_>>()
        .join(" ");

    let mut seen = HashSet::new();

    PATTERN
        .find_iter(&joined)
        .map(|m| m.as_str())
        .filter(|key| seen.insert(*key))
        .filter(|key| has_accepted_prefix(key, prefixes))
        .map(str::to_string)
        .collect()
}

/// Project part of an issue key ("PLY-123" -> "PLY")
pub fn prefix_of(key: &str) -> &str {
    key.split_once('-').map(|(prefix, _)| prefix).unwrap_or(key)
}

fn has_accepted_prefix(key: &str, prefixes: &[String]) -> bool {
    let prefix = prefix_of(key);
    prefixes.iter().any(|p| p == prefix)
}
