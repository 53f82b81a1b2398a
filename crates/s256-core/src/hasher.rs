//! # Consuming Hasher
//!
//! [`Sha256`] wraps a [`HashState`] behind an infallible API. `finalize`
//! takes `self`, so a finished hasher cannot be fed again.

use std::io;

use crate::digest::Digest;
use crate::state::HashState;

/// Streaming SHA-256 hasher.
#[derive(Clone, Debug, Default)]
pub struct Sha256 {
    state: HashState,
}

impl Sha256 {
    /// Create a hasher with a fresh state.
    pub const fn new() -> Self {
        Self {
            state: HashState::new(),
        }
    }

    /// Feed more input.
    pub fn update(&mut self, data: impl AsRef<[u8]>) {
        self.state.absorb(data.as_ref());
    }

    /// Builder-style [`update`](Self::update).
    #[must_use]
    pub fn chain(mut self, data: impl AsRef<[u8]>) -> Self {
        self.update(data);
        self
    }

    /// Total input absorbed so far, in bits, modulo 2^64.
    pub fn message_len_bits(&self) -> u64 {
        self.state.message_len_bits()
    }

    /// Consume the hasher and return the digest.
    pub fn finalize(mut self) -> Digest {
        self.state.finish()
    }
}

impl io::Write for Sha256 {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.update(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Compute the SHA-256 digest of `data` in one call.
pub fn sha256(data: &[u8]) -> Digest {
    Sha256::new().chain(data).finalize()
}
