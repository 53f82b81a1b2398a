//! # Hash Subcommand
//!
//! Digests each input and prints one line per input.

use std::io::{self, Write};

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use s256_core::Digest;

use crate::{chunk_size_parser, hash_input, DEFAULT_CHUNK_SIZE, STDIN_NAME};

/// Arguments for the hash subcommand.
#[derive(Args, Debug)]
pub struct HashArgs {
    /// Files to hash. Reads stdin when empty or `-`.
    pub files: Vec<String>,

    /// Read size in bytes when streaming input (1 to 64 MiB).
    #[arg(long, default_value_t = DEFAULT_CHUNK_SIZE, value_parser = chunk_size_parser())]
    pub chunk_size: usize,

    /// Emit one JSON object per line instead of `sha256sum` text.
    #[arg(long)]
    pub json: bool,
}

/// One hashed input, as rendered by `--json`.
#[derive(Debug, Serialize)]
pub struct HashRecord<'a> {
    pub path: &'a str,
    pub sha256: Digest,
}

/// Render a single output line.
pub fn format_line(name: &str, digest: &Digest, json: bool) -> Result<String> {
    if json {
        let record = HashRecord {
            path: name,
            sha256: *digest,
        };
        Ok(serde_json::to_string(&record)?)
    } else {
        Ok(format!("{digest}  {name}"))
    }
}

/// Execute the hash subcommand. Returns 1 if any input could not be read.
pub fn run_hash(args: &HashArgs) -> Result<u8> {
    let inputs: Vec<&str> = if args.files.is_empty() {
        vec![STDIN_NAME]
    } else {
        args.files.iter().map(String::as_str).collect()
    };
    let chunk_size = args.chunk_size;
    tracing::debug!(inputs = inputs.len(), chunk_size, "hashing inputs");

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut failures = 0usize;

    for name in inputs {
        match hash_input(name, chunk_size) {
            Ok(digest) => {
                tracing::trace!(input = name, %digest, "digest computed");
                writeln!(out, "{}", format_line(name, &digest, args.json)?)?;
            }
            Err(e) => {
                failures += 1;
                tracing::error!("{e:#}");
            }
        }
    }

    if failures > 0 {
        tracing::warn!(failures, "some inputs could not be hashed");
        return Ok(1);
    }
    Ok(0)
}
