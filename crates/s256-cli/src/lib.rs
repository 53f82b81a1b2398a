//! # s256-cli — Command-Line Front End
//!
//! Provides the `s256` binary. All hashing is delegated to `s256-core`;
//! this crate only reads input, renders output and maps failures to exit
//! codes.
//!
//! ## Subcommands
//!
//! - `s256 hash` — digest files or stdin, `sha256sum`-style or JSON lines.
//! - `s256 check` — verify a `<hex>  <path>` digest list.
//!
//! ```bash
//! s256 hash Cargo.toml src/lib.rs
//! cat blob | s256 hash --json
//! s256 hash *.tar > SHA256SUMS && s256 check SHA256SUMS
//! ```

pub mod check;
pub mod hash;

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use anyhow::{Context, Result};
use clap::builder::RangedU64ValueParser;
use s256_core::{Digest, Sha256};

/// Default read size when streaming input into the engine.
pub const DEFAULT_CHUNK_SIZE: usize = 64 * 1024;

/// Largest accepted read size. Bounds the read buffer allocation.
pub const MAX_CHUNK_SIZE: usize = 64 * 1024 * 1024;

/// `--chunk-size` parser accepting `1..=MAX_CHUNK_SIZE`.
pub fn chunk_size_parser() -> RangedU64ValueParser<usize> {
    RangedU64ValueParser::<usize>::new().range(1..=MAX_CHUNK_SIZE as u64)
}

/// Name used for standard input in arguments and output.
pub const STDIN_NAME: &str = "-";

/// Stream `reader` into a fresh hasher using `chunk_size`-byte reads.
///
/// `chunk_size` is clamped to `1..=MAX_CHUNK_SIZE`.
pub fn hash_reader<R: Read>(mut reader: R, chunk_size: usize) -> io::Result<Digest> {
    let mut buf = vec![0u8; chunk_size.clamp(1, MAX_CHUNK_SIZE)];
    let mut hasher = Sha256::new();
    loop {
        match reader.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => hasher.update(&buf[..n]),
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(hasher.finalize())
}

/// Hash a file, or stdin when `name` is `-`.
pub fn hash_input(name: &str, chunk_size: usize) -> Result<Digest> {
    if name == STDIN_NAME {
        return hash_reader(io::stdin().lock(), chunk_size).context("failed to read stdin");
    }
    let path = Path::new(name);
    let file = File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    hash_reader(file, chunk_size).with_context(|| format!("failed to read {}", path.display()))
}
