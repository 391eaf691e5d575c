//! Log identifiers.
//!
//! A `LogId` is the short token a client receives after sharing a log.
//! Parsing is purely syntactic; it never touches storage, so a malformed
//! token can be rejected before any lookup happens.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Maximum accepted identifier length, in bytes (ASCII only).
pub const MAX_ID_LEN: usize = 32;

/// Reasons an untrusted string is not a valid log identifier.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdError {
    #[error("log identifier is empty")]
    Empty,

    #[error("log identifier is {len} characters long (max {MAX_ID_LEN})")]
    TooLong { len: usize },

    #[error("log identifier contains invalid character {ch:?} at position {position}")]
    InvalidChar { ch: char, position: usize },
}

/// Validated, opaque log identifier (1..=32 ASCII alphanumerics).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LogId(String);

impl LogId {
    /// Validate an untrusted token.
    pub fn parse(raw: &str) -> Result<Self, IdError> {
        if raw.is_empty() {
            return Err(IdError::Empty);
        }

        if let Some((position, ch)) = raw
            .chars()
            .enumerate()
            .find(|(_, c)| !c.is_ascii_alphanumeric())
        {
            return Err(IdError::InvalidChar { ch, position });
        }

        // All ASCII at this point, so byte length == char count.
        if raw.len() > MAX_ID_LEN {
            return Err(IdError::TooLong { len: raw.len() });
        }

        Ok(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LogId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for LogId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for LogId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Serialize for LogId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for LogId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_valid_ids() {
        for raw in ["a", "abc1234", "Z9", "0000000"] {
            let id = LogId::parse(raw).unwrap();
            assert_eq!(id.as_str(), raw);
            assert_eq!(id.to_string(), raw);
        }
    }

    #[test]
    fn parse_is_case_sensitive() {
        let lower = LogId::parse("abcdef").unwrap();
        let upper = LogId::parse("ABCDEF").unwrap();
        assert_ne!(lower, upper);
    }

    #[test]
    fn reject_empty() {
        assert_eq!(LogId::parse(""), Err(IdError::Empty));
    }

    #[test]
    fn reject_too_long() {
        let raw = "a".repeat(MAX_ID_LEN + 1);
        assert_eq!(
            LogId::parse(&raw),
            Err(IdError::TooLong {
                len: MAX_ID_LEN + 1
            })
        );
        assert!(LogId::parse(&"a".repeat(MAX_ID_LEN)).is_ok());
    }

    #[test]
    fn reject_path_and_query_characters() {
        assert!(matches!(
            LogId::parse("../etc"),
            Err(IdError::InvalidChar { ch: '.', position: 0 })
        ));
        assert!(matches!(
            LogId::parse("abc?x=1"),
            Err(IdError::InvalidChar { ch: '?', position: 3 })
        ));
        assert!(LogId::parse("abc def").is_err());
        assert!(LogId::parse("abc\n").is_err());
    }

    #[test]
    fn reject_non_ascii() {
        assert!(matches!(
            LogId::parse("lög"),
            Err(IdError::InvalidChar { ch: 'ö', position: 1 })
        ));
    }

    #[test]
    fn from_str_matches_parse() {
        let id: LogId = "xYz42".parse().unwrap();
        assert_eq!(id, LogId::parse("xYz42").unwrap());
        assert!("".parse::<LogId>().is_err());
    }

    #[test]
    fn serde_roundtrip_validates() {
        let id = LogId::parse("abc123").unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"abc123\"");

        let back: LogId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);

        let bad: Result<LogId, _> = serde_json::from_str("\"no/slash\"");
        assert!(bad.is_err());
    }
}
