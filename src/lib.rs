// Core library for git-reword

pub mod app;
pub mod batch;
pub mod error;
pub mod event;
pub mod git;
pub mod inject;
pub mod log;
pub mod logging;
pub mod plan;
pub mod range;
pub mod rewrite;
pub mod views;

use std::fmt;
use std::str::FromStr;

pub use error::{Result, RewordError};

/// Number of hash characters used when comparing commits.
pub const DEFAULT_ABBREV_LEN: usize = 7;

/// A single commit as reported by the log query.
///
/// Immutable snapshot: `hash` is git's abbreviated object id and `message`
/// is the commit subject, which may contain spaces and quotes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Commit {
    pub hash: String,
    pub message: String,
}

impl Commit {
    pub fn new(hash: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            hash: hash.into(),
            message: message.into(),
        }
    }

    /// Leading `len` characters of the hash, used for target matching.
    pub fn abbrev(&self, len: usize) -> &str {
        abbreviate(&self.hash, len)
    }
}

impl fmt::Display for Commit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.hash, self.message)
    }
}

impl FromStr for Commit {
    type Err = RewordError;

    /// Parse a `"<hash> <message>"` log line, splitting on the first space.
    fn from_str(line: &str) -> Result<Self> {
        match line.split_once(' ') {
            Some((hash, message)) if !hash.is_empty() => Ok(Commit::new(hash, message)),
            _ => Err(RewordError::Parse {
                line: line.to_string(),
            }),
        }
    }
}

/// Truncate a hash to at most `len` characters.
pub fn abbreviate(hash: &str, len: usize) -> &str {
    match hash.char_indices().nth(len) {
        Some((idx, _)) => &hash[..idx],
        None => hash,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn parses_hash_and_message() {
        let commit: Commit = "abc1234 Fix the \"quoted\" parser".parse().unwrap();
        assert_eq!(commit.hash, "abc1234");
        assert_eq!(commit.message, "Fix the \"quoted\" parser");
    }

    #[test]
    fn keeps_empty_message() {
        let commit: Commit = "abc1234 ".parse().unwrap();
        assert_eq!(commit, Commit::new("abc1234", ""));
    }

    #[test]
    fn rejects_line_without_separator() {
        let err = "abc1234".parse::<Commit>().unwrap_err();
        assert!(matches!(err, RewordError::Parse { line } if line == "abc1234"));
    }

    #[test]
    fn rejects_blank_and_hashless_lines() {
        assert!("".parse::<Commit>().is_err());
        assert!(" message without hash".parse::<Commit>().is_err());
    }

    #[test]
    fn abbreviate_is_bounded_by_hash_length() {
        assert_eq!(abbreviate("abcdef0123", 7), "abcdef0");
        assert_eq!(abbreviate("abc", 7), "abc");
        assert_eq!(Commit::new("abcdef0123", "x").abbrev(4), "abcd");
    }

    proptest! {
        #[test]
        fn display_then_parse_round_trips(
            hash in "[0-9a-f]{4,40}",
            message in "[^\n\r]{0,60}",
        ) {
            let commit = Commit::new(hash, message);
            let parsed: Commit = commit.to_string().parse().unwrap();
            prop_assert_eq!(parsed, commit);
        }
    }
}
