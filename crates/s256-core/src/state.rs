//! # Hash State — The Streaming Engine
//!
//! [`HashState`] owns everything one SHA-256 computation needs: the
//! partial-block buffer, the running bit counter and the 8-word chaining
//! value. Its lifecycle is `init` → `update`* → `finalize`.
//!
//! ## Lifecycle Invariant
//!
//! Between calls `buffered_len < 64`: a full buffer is always compressed
//! before `update` returns. Once finalized the state rejects further
//! `update`/`finalize` calls with [`EngineError::Finalized`] until
//! [`HashState::reset`] is called.
//!
//! ## Length Counter
//!
//! `total_bits` counts only compressed input and is advanced with
//! `wrapping_add`, so inputs beyond 2^64 bits encode their length modulo
//! 2^64 as FIPS 180-4 prescribes.
//!
//! A `HashState` holds no shared data. Concurrent use of one instance needs
//! external synchronization, which `&mut self` receivers already enforce.

use std::fmt;

use crate::compress::compress;
use crate::constants::{BLOCK_LEN, DIGEST_LEN, H0, LENGTH_OFFSET};
use crate::digest::Digest;
use crate::error::EngineError;

/// Bits contributed to the length counter by one compressed block.
const BLOCK_BITS: u64 = (BLOCK_LEN as u64) * 8;

/// Mutable state for one SHA-256 computation.
#[derive(Clone)]
pub struct HashState {
    buffer: [u8; BLOCK_LEN],
    buffered_len: usize,
    total_bits: u64,
    digest_state: [u32; 8],
    finalized: bool,
}

impl HashState {
    /// Create a fresh state initialized to H(0) with an empty buffer.
    pub const fn new() -> Self {
        Self {
            buffer: [0u8; BLOCK_LEN],
            buffered_len: 0,
            total_bits: 0,
            digest_state: H0,
            finalized: false,
        }
    }

    /// Feed `bytes` into the computation. Any length, including zero, is valid.
    ///
    /// Fails with [`EngineError::Finalized`] without touching the state if
    /// [`finalize`](Self::finalize) already ran.
    pub fn update(&mut self, bytes: &[u8]) -> Result<(), EngineError> {
        if self.finalized {
            return Err(EngineError::Finalized);
        }
        self.absorb(bytes);
        Ok(())
    }

    /// Pad the message, run the final compression(s) and return the digest.
    ///
    /// The state is consumed logically: a second call, or an `update` after
    /// this one, fails with [`EngineError::Finalized`].
    pub fn finalize(&mut self) -> Result<Digest, EngineError> {
        if self.finalized {
            return Err(EngineError::Finalized);
        }
        let digest = self.finish();
        self.finalized = true;
        Ok(digest)
    }

    /// Return the state to its freshly-initialized condition.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Whether [`finalize`](Self::finalize) has consumed this state.
    pub fn is_finalized(&self) -> bool {
        self.finalized
    }

    /// Number of bytes waiting in the partial-block buffer.
    pub fn buffered_len(&self) -> usize {
        self.buffered_len
    }

    /// Total message length absorbed so far, in bits, modulo 2^64.
    pub fn message_len_bits(&self) -> u64 {
        self.total_bits
            .wrapping_add((self.buffered_len as u64).wrapping_mul(8))
    }

    /// Unguarded absorb used by both front ends.
    pub(crate) fn absorb(&mut self, mut data: &[u8]) {
        if self.buffered_len > 0 {
            let needed = BLOCK_LEN - self.buffered_len;
            if data.len() < needed {
                self.buffer[self.buffered_len..self.buffered_len + data.len()]
                    .copy_from_slice(data);
                self.buffered_len += data.len();
                return;
            }
            self.buffer[self.buffered_len..].copy_from_slice(&data[..needed]);
            let block = self.buffer;
            self.compress_block(&block);
            self.buffered_len = 0;
            data = &data[needed..];
        }

        let mut blocks = data.chunks_exact(BLOCK_LEN);
        let mut block = [0u8; BLOCK_LEN];
        for chunk in &mut blocks {
            block.copy_from_slice(chunk);
            self.compress_block(&block);
        }

        let rest = blocks.remainder();
        self.buffer[..rest.len()].copy_from_slice(rest);
        self.buffered_len = rest.len();
    }

    /// Unguarded padding and output. Leaves the buffer wiped.
    pub(crate) fn finish(&mut self) -> Digest {
        let bit_len = self.message_len_bits();
        let pad_start = self.buffered_len;

        self.buffer[pad_start] = 0x80;
        if pad_start < LENGTH_OFFSET {
            self.buffer[pad_start + 1..LENGTH_OFFSET].fill(0);
        } else {
            // No room for the length field: flush a padding-only block first.
            self.buffer[pad_start + 1..].fill(0);
            compress(&mut self.digest_state, &self.buffer);
            self.buffer[..LENGTH_OFFSET].fill(0);
        }
        self.buffer[LENGTH_OFFSET..].copy_from_slice(&bit_len.to_be_bytes());
        compress(&mut self.digest_state, &self.buffer);

        let mut out = [0u8; DIGEST_LEN];
        for (chunk, word) in out.chunks_exact_mut(4).zip(self.digest_state.iter()) {
            chunk.copy_from_slice(&word.to_be_bytes());
        }

        self.buffer = [0u8; BLOCK_LEN];
        self.buffered_len = 0;
        Digest::new(out)
    }

    fn compress_block(&mut self, block: &[u8; BLOCK_LEN]) {
        compress(&mut self.digest_state, block);
        self.total_bits = self.total_bits.wrapping_add(BLOCK_BITS);
    }
}

impl Default for HashState {
    fn default() -> Self {
        Self::new()
    }
}

// Buffered input may be sensitive; only the bookkeeping is shown.
impl fmt::Debug for HashState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashState")
            .field("buffered_len", &self.buffered_len)
            .field("total_bits", &self.total_bits)
            .field("finalized", &self.finalized)
            .finish_non_exhaustive()
    }
}

/// Create a fresh [`HashState`].
pub fn init() -> HashState {
    HashState::new()
}

/// Feed `bytes` into `state`. See [`HashState::update`].
pub fn update(state: &mut HashState, bytes: &[u8]) -> Result<(), EngineError> {
    state.update(bytes)
}

/// Finish `state` and return its digest. See [`HashState::finalize`].
pub fn finalize(state: &mut HashState) -> Result<Digest, EngineError> {
    state.finalize()
}
