//! # Candidate Extraction & Validation
//!
//! Finds IPv4-looking tokens in free-form text and decides which of them
//! are eligible for a remote lookup.
//!
//! Extraction is purely lexical: the pattern accepts any four dot-separated
//! 1-3 digit groups, so `999.999.999.999` is a perfectly good *candidate*.
//! Octet-range enforcement happens in [`is_strict_ipv4`], immediately before
//! a lookup would be issued. Keeping the two stages separate means every
//! token the user typed shows up in the result list, valid or not.

use std::sync::LazyLock;

use regex::Regex;

static IPV4_CANDIDATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(?:\d{1,3}\.){3}\d{1,3}\b").expect("static pattern"));

/// Scans a multi-line text blob and returns every IPv4-looking token in
/// first-seen order, duplicates included.
///
/// Lines are trimmed first and empty lines skipped; lines without a match
/// contribute nothing. Zero matches yield an empty vec, never an error.
pub fn extract_candidates(input: &str) -> Vec<String> {
    input
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .flat_map(|line| {
            IPV4_CANDIDATE
                .find_iter(line)
                .map(|m| m.as_str().to_string())
        })
        .collect()
}

/// Strict IPv4 syntax check: exactly four dot-separated parts, each a
/// base-10 integer in 0..=255.
///
/// Leading zeros are accepted as long as the value parses (`010` is 10).
/// Tokens failing this check never reach the provider.
pub fn is_strict_ipv4(token: &str) -> bool {
    let parts: Vec<&str> = token.split('.').collect();
    if parts.len() != 4 {
        return false;
    }

    parts.iter().all(|part| {
        !part.is_empty()
            && part.chars().all(|c| c.is_ascii_digit())
            && part.parse::<u16>().is_ok_and(|n| n <= 255)
    })
}
