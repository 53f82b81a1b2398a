//! # Engine Error Types
//!
//! Hashing itself cannot fail on any input. The only errors are lifecycle
//! misuse of a [`HashState`](crate::HashState) and malformed hex digests.

use thiserror::Error;

/// Errors from the SHA-256 engine and digest parsing.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// `update` or `finalize` was called on a state that was already finalized.
    #[error("hash state already finalized; call reset() before reuse")]
    Finalized,

    /// A hex digest was not exactly 64 bytes long.
    #[error("invalid hex digest length: expected 64 hex characters, got {0} bytes")]
    InvalidHexLength(usize),

    /// A hex digest contained a non-hex character.
    #[error("invalid hex character {found:?} at index {index}")]
    InvalidHexChar {
        /// Byte offset of the offending character.
        index: usize,
        /// The character found.
        found: char,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finalized_display_mentions_reset() {
        let msg = format!("{}", EngineError::Finalized);
        assert!(msg.contains("already finalized"));
        assert!(msg.contains("reset()"));
    }

    #[test]
    fn invalid_hex_length_display() {
        let msg = format!("{}", EngineError::InvalidHexLength(63));
        assert!(msg.contains("64"));
        assert!(msg.contains("63"));
    }

    #[test]
    fn invalid_hex_char_display() {
        let err = EngineError::InvalidHexChar {
            index: 5,
            found: 'z',
        };
        let msg = format!("{err}");
        assert!(msg.contains("'z'"));
        assert!(msg.contains("index 5"));
    }
}
