//! # Digest — 32-Byte SHA-256 Output
//!
//! A typed wrapper around the raw digest bytes. Renders as lowercase hex and
//! serializes as a hex string so it drops straight into JSON output.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::constants::DIGEST_LEN;
use crate::error::EngineError;

/// A finished SHA-256 digest in standard (big-endian word) byte order.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Digest([u8; DIGEST_LEN]);

impl Digest {
    /// Wrap raw digest bytes.
    pub const fn new(bytes: [u8; DIGEST_LEN]) -> Self {
        Self(bytes)
    }

    /// Borrow the raw bytes.
    pub fn as_bytes(&self) -> &[u8; DIGEST_LEN] {
        &self.0
    }

    /// Unwrap into the raw bytes.
    pub fn into_bytes(self) -> [u8; DIGEST_LEN] {
        self.0
    }

    /// Render the digest as a lowercase hex string.
    pub fn to_hex(&self) -> String {
        self.0.iter().map(|b| format!("{b:02x}")).collect()
    }

    /// Parse a 64-character hex string. Accepts upper and lower case.
    pub fn from_hex(s: &str) -> Result<Self, EngineError> {
        let raw = s.as_bytes();
        if raw.len() != DIGEST_LEN * 2 {
            return Err(EngineError::InvalidHexLength(raw.len()));
        }
        let mut bytes = [0u8; DIGEST_LEN];
        for (i, out) in bytes.iter_mut().enumerate() {
            let hi = nibble(raw, i * 2)?;
            let lo = nibble(raw, i * 2 + 1)?;
            *out = (hi << 4) | lo;
        }
        Ok(Self(bytes))
    }
}

fn nibble(raw: &[u8], index: usize) -> Result<u8, EngineError> {
    let c = raw[index];
    match c {
        b'0'..=b'9' => Ok(c - b'0'),
        b'a'..=b'f' => Ok(c - b'a' + 10),
        b'A'..=b'F' => Ok(c - b'A' + 10),
        _ => Err(EngineError::InvalidHexChar {
            index,
            found: char::from(c),
        }),
    }
}

impl From<[u8; DIGEST_LEN]> for Digest {
    fn from(bytes: [u8; DIGEST_LEN]) -> Self {
        Self(bytes)
    }
}

impl From<Digest> for [u8; DIGEST_LEN] {
    fn from(digest: Digest) -> Self {
        digest.0
    }
}

impl AsRef<[u8]> for Digest {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl FromStr for Digest {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Digest({})", self.to_hex())
    }
}

impl Serialize for Digest {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Digest {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EMPTY_HEX: &str = "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855";

    #[test]
    fn to_hex_is_lowercase_64_chars() {
        let digest = Digest::new([0xab; DIGEST_LEN]);
        let hex = digest.to_hex();
        assert_eq!(hex.len(), 64);
        assert_eq!(hex, "ab".repeat(32));
    }

    #[test]
    fn from_hex_accepts_uppercase() {
        let lower = Digest::from_hex(EMPTY_HEX).unwrap();
        let upper = Digest::from_hex(&EMPTY_HEX.to_uppercase()).unwrap();
        assert_eq!(lower, upper);
        assert_eq!(lower.as_bytes()[0], 0xe3);
        assert_eq!(lower.as_bytes()[31], 0x55);
    }

    #[test]
    fn from_hex_rejects_wrong_length() {
        assert_eq!(
            Digest::from_hex(&EMPTY_HEX[..62]),
            Err(EngineError::InvalidHexLength(62))
        );
        assert_eq!(Digest::from_hex(""), Err(EngineError::InvalidHexLength(0)));
    }

    #[test]
    fn from_hex_rejects_non_hex() {
        let mut bad = EMPTY_HEX.to_string();
        bad.replace_range(10..11, "g");
        assert_eq!(
            Digest::from_hex(&bad),
            Err(EngineError::InvalidHexChar {
                index: 10,
                found: 'g'
            })
        );
    }

    #[test]
    fn from_hex_rejects_multibyte_without_panicking() {
        // 32 two-byte chars: 64 bytes, but not hex.
        let s = "é".repeat(32);
        assert!(matches!(
            Digest::from_hex(&s),
            Err(EngineError::InvalidHexChar { index: 0, .. })
        ));
    }

    #[test]
    fn display_and_debug() {
        let digest: Digest = EMPTY_HEX.parse().unwrap();
        assert_eq!(digest.to_string(), EMPTY_HEX);
        assert_eq!(format!("{digest:?}"), format!("Digest({EMPTY_HEX})"));
    }

    #[test]
    fn serde_uses_hex_string() {
        let digest: Digest = EMPTY_HEX.parse().unwrap();
        let json = serde_json::to_string(&digest).unwrap();
        assert_eq!(json, format!("\"{EMPTY_HEX}\""));
        let back: Digest = serde_json::from_str(&json).unwrap();
        assert_eq!(back, digest);
    }

    #[test]
    fn serde_rejects_bad_hex() {
        let result: Result<Digest, _> = serde_json::from_str("\"not-a-digest\"");
        assert!(result.is_err());
    }

    #[test]
    fn byte_conversions() {
        let bytes = [7u8; DIGEST_LEN];
        let digest = Digest::from(bytes);
        assert_eq!(digest.as_ref(), &bytes[..]);
        let back: [u8; DIGEST_LEN] = digest.into();
        assert_eq!(back, bytes);
        assert_eq!(digest.into_bytes(), bytes);
    }
}
