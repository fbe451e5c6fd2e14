//! Symbolic version tokens.

use crate::error::{DepotError, Result};
use std::fmt;
use std::str::FromStr;

/// A version selector, either relative to the versions on disk or absolute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionToken {
    /// One past the highest existing version (1 when none exist).
    Next,
    /// Highest existing version. Also spelled `last`.
    Latest,
    /// Second-highest existing version. Also spelled `prev`.
    Previous,
    /// Lowest existing version.
    First,
    /// Second-lowest existing version.
    Second,
    /// An explicit version number; not checked against the disk.
    Exact(u32),
}

impl VersionToken {
    /// Whether resolving this token needs a directory listing.
    pub fn needs_listing(&self) -> bool {
        !matches!(self, VersionToken::Exact(_))
    }
}

impl FromStr for VersionToken {
    type Err = DepotError;

    /// Parse a token, ignoring ASCII case.
    fn from_str(s: &str) -> Result<Self> {
        let token = s.trim();
        if !token.is_empty() && token.bytes().all(|b| b.is_ascii_digit()) {
            return match token.parse::<u32>() {
                Ok(n) if n > 0 => Ok(VersionToken::Exact(n)),
                _ => Err(DepotError::UnknownVersionToken(s.to_string())),
            };
        }

        match token.to_ascii_lowercase().as_str() {
            "next" => Ok(VersionToken::Next),
            "latest" | "last" => Ok(VersionToken::Latest),
            "previous" | "prev" => Ok(VersionToken::Previous),
            "first" => Ok(VersionToken::First),
            "second" => Ok(VersionToken::Second),
            _ => Err(DepotError::UnknownVersionToken(s.to_string())),
        }
    }
}

impl fmt::Display for VersionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VersionToken::Next => f.write_str("next"),
            VersionToken::Latest => f.write_str("latest"),
            VersionToken::Previous => f.write_str("previous"),
            VersionToken::First => f.write_str("first"),
            VersionToken::Second => f.write_str("second"),
            VersionToken::Exact(n) => write!(f, "{}", n),
        }
    }
}
