//! # s256-core — Streaming SHA-256 Engine
//!
//! A self-contained implementation of SHA-256 (FIPS 180-4) that accepts
//! input in arbitrary chunks and produces a fixed 32-byte [`Digest`].
//!
//! Two front ends share the same engine:
//!
//! - [`HashState`] with the free functions [`init`], [`update`] and
//!   [`finalize`]. Reusing a finalized state is rejected at runtime with
//!   [`EngineError::Finalized`].
//! - [`Sha256`], a consuming hasher whose `finalize(self)` makes reuse a
//!   compile error. Implements [`std::io::Write`] for streaming.
//!
//! ```
//! use s256_core::{sha256, Sha256};
//!
//! let mut hasher = Sha256::new();
//! hasher.update(b"ab");
//! hasher.update(b"c");
//! assert_eq!(hasher.finalize(), sha256(b"abc"));
//! ```
//!
//! ## Crate Policy
//!
//! - No heap allocation and no `unsafe` in the engine.
//! - No `panic!()` or `.unwrap()` outside tests.
//! - All arithmetic on state words and the length counter is explicitly
//!   wrapping.

pub mod compress;
pub mod constants;
pub mod digest;
pub mod error;
pub mod hasher;
pub mod state;

// Re-export primary types for ergonomic imports.
pub use constants::{BLOCK_LEN, DIGEST_LEN};
pub use digest::Digest;
pub use error::EngineError;
pub use hasher::{sha256, Sha256};
pub use state::{finalize, init, update, HashState};
