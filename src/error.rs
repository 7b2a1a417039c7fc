//! Error types for conversion and configuration loading.

use std::io;

use thiserror::Error;

use crate::utils::format_thousand;
use crate::MAX_NUMBER;

/// Input-validation failures reported by [`convert`](crate::VietnameseConverter::convert).
///
/// Both variants are detected before any rendering work starts and carry the
/// rejected input so callers can echo it back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConvertError {
    /// The input is below zero.
    #[error("negative numbers not supported: {0}")]
    NegativeNumber(i64),

    /// The input exceeds [`MAX_NUMBER`].
    #[error("number too large: {0} (max: {})", format_thousand(MAX_NUMBER))]
    NumberTooLarge(i64),
}

impl ConvertError {
    /// The rejected input value.
    pub fn number(&self) -> i64 {
        match *self {
            ConvertError::NegativeNumber(n) | ConvertError::NumberTooLarge(n) => n,
        }
    }
}

/// Errors raised while loading or validating a [`ConverterConfig`](crate::ConverterConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O Error: {0}")]
    Io(#[from] io::Error),

    #[error("Parse Error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid setting `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn too_large_message_shows_grouped_maximum() {
        let err = ConvertError::NumberTooLarge(1_000_000_000_000_000);
        assert_eq!(
            err.to_string(),
            "number too large: 1000000000000000 (max: 999,999,999,999,999)"
        );
        assert_eq!(err.number(), 1_000_000_000_000_000);
    }

    #[test]
    fn negative_message_echoes_input() {
        let err = ConvertError::NegativeNumber(-42);
        assert_eq!(err.to_string(), "negative numbers not supported: -42");
        assert_eq!(err.number(), -42);
    }
}
