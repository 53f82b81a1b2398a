//! # Check Subcommand
//!
//! Verifies a digest list in `sha256sum` format: `<hex>  <path>` or
//! `<hex> *<path>` per line. Blank lines and `#` comments are skipped.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use s256_core::Digest;

use crate::{chunk_size_parser, hash_input, DEFAULT_CHUNK_SIZE};

/// Arguments for the check subcommand.
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Digest list to verify.
    pub list: PathBuf,

    /// Read size in bytes when streaming input (1 to 64 MiB).
    #[arg(long, default_value_t = DEFAULT_CHUNK_SIZE, value_parser = chunk_size_parser())]
    pub chunk_size: usize,

    /// Only print failures.
    #[arg(long)]
    pub quiet: bool,
}

/// Outcome of verifying one list entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckOutcome {
    Ok,
    Mismatch { actual: Digest },
    Unreadable(String),
}

/// Tally across a whole list.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CheckSummary {
    pub ok: usize,
    pub mismatched: usize,
    pub unreadable: usize,
    pub malformed: usize,
}

impl CheckSummary {
    /// Exit code for this summary: 0 only if every entry verified.
    pub fn exit_code(&self) -> u8 {
        if self.mismatched + self.unreadable + self.malformed == 0 {
            0
        } else {
            1
        }
    }
}

/// Parse one list line into its expected digest and path.
///
/// Returns `None` for lines that do not follow the format.
pub fn parse_line(line: &str) -> Option<(Digest, &str)> {
    let (hex, rest) = line.split_once(' ')?;
    let expected = Digest::from_hex(hex).ok()?;
    let path = rest.strip_prefix(' ').or_else(|| rest.strip_prefix('*'))?;
    if path.is_empty() {
        return None;
    }
    Some((expected, path))
}

/// Recompute the digest for `path` and compare against `expected`.
pub fn verify_entry(expected: &Digest, path: &str, chunk_size: usize) -> CheckOutcome {
    match hash_input(path, chunk_size) {
        Ok(actual) if actual == *expected => CheckOutcome::Ok,
        Ok(actual) => CheckOutcome::Mismatch { actual },
        Err(e) => CheckOutcome::Unreadable(format!("{e:#}")),
    }
}

/// Verify every entry in `contents`, printing one status line per entry.
pub fn verify_list(contents: &str, chunk_size: usize, quiet: bool) -> CheckSummary {
    let mut summary = CheckSummary::default();

    for (lineno, raw) in contents.lines().enumerate() {
        let line = raw.trim_end_matches('\r');
        if line.trim().is_empty() || line.starts_with('#') {
            continue;
        }
        let Some((expected, path)) = parse_line(line) else {
            summary.malformed += 1;
            tracing::warn!(line = lineno + 1, "improperly formatted checksum line");
            continue;
        };

        match verify_entry(&expected, path, chunk_size) {
            CheckOutcome::Ok => {
                summary.ok += 1;
                if !quiet {
                    println!("{path}: OK");
                }
            }
            CheckOutcome::Mismatch { actual } => {
                summary.mismatched += 1;
                tracing::debug!(path, %expected, %actual, "digest mismatch");
                println!("{path}: FAILED");
            }
            CheckOutcome::Unreadable(reason) => {
                summary.unreadable += 1;
                tracing::error!("{reason}");
                println!("{path}: FAILED open or read");
            }
        }
    }

    summary
}

/// Execute the check subcommand.
pub fn run_check(args: &CheckArgs) -> Result<u8> {
    let contents = fs::read_to_string(&args.list)
        .with_context(|| format!("failed to read digest list {}", args.list.display()))?;

    let summary = verify_list(&contents, args.chunk_size, args.quiet);
    tracing::info!(
        ok = summary.ok,
        mismatched = summary.mismatched,
        unreadable = summary.unreadable,
        malformed = summary.malformed,
        "check complete"
    );
    if summary.mismatched > 0 {
        tracing::warn!("{} computed checksum(s) did NOT match", summary.mismatched);
    }
    Ok(summary.exit_code())
}

#[cfg(test)]
mod tests {
    use super::*;
    use s256_core::sha256;

    const ABC_HEX: &str = "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad";

    #[test]
    fn parse_text_mode_line() {
        let line = format!("{ABC_HEX}  some file.txt");
        let (digest, path) = parse_line(&line).unwrap();
        assert_eq!(digest.to_hex(), ABC_HEX);
        assert_eq!(path, "some file.txt");
    }

    #[test]
    fn parse_binary_mode_line() {
        let line = format!("{ABC_HEX} *blob.bin");
        let (_, path) = parse_line(&line).unwrap();
        assert_eq!(path, "blob.bin");
    }

    #[test]
    fn parse_rejects_malformed_lines() {
        assert!(parse_line("").is_none());
        assert!(parse_line("deadbeef  file").is_none());
        assert!(parse_line(&format!("{ABC_HEX}  ")).is_none());
        assert!(parse_line(&format!("{ABC_HEX}-file")).is_none());
        assert!(parse_line(&format!("{ABC_HEX} file")).is_none());
    }

    #[test]
    fn verify_list_counts_each_outcome() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("good.txt");
        let bad = dir.path().join("bad.txt");
        std::fs::write(&good, b"abc").unwrap();
        std::fs::write(&bad, b"abd").unwrap();
        let missing = dir.path().join("missing.txt");

        let contents = format!(
            "# digest list\n{ABC_HEX}  {}\n{ABC_HEX}  {}\n{ABC_HEX}  {}\nnot a line\n\n",
            good.display(),
            bad.display(),
            missing.display(),
        );
        let summary = verify_list(&contents, 4, true);
        assert_eq!(
            summary,
            CheckSummary {
                ok: 1,
                mismatched: 1,
                unreadable: 1,
                malformed: 1,
            }
        );
        assert_eq!(summary.exit_code(), 1);
    }

    #[test]
    fn verify_entry_reports_actual_digest_on_mismatch() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("f");
        std::fs::write(&path, b"xyz").unwrap();
        let expected = sha256(b"abc");
        let outcome = verify_entry(&expected, path.to_str().unwrap(), 64);
        assert_eq!(
            outcome,
            CheckOutcome::Mismatch {
                actual: sha256(b"xyz")
            }
        );
    }

    #[test]
    fn run_check_all_ok_exits_zero() {
        let dir = tempfile::tempdir().unwrap();
        let data = dir.path().join("data.bin");
        std::fs::write(&data, b"abc").unwrap();
        let list = dir.path().join("SHA256SUMS");
        std::fs::write(&list, format!("{ABC_HEX}  {}\r\n", data.display())).unwrap();

        let args = CheckArgs {
            list,
            chunk_size: 1,
            quiet: true,
        };
        assert_eq!(run_check(&args).unwrap(), 0);
    }

    #[test]
    fn run_check_missing_list_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let args = CheckArgs {
            list: dir.path().join("absent"),
            chunk_size: DEFAULT_CHUNK_SIZE,
            quiet: false,
        };
        let err = run_check(&args).unwrap_err();
        assert!(format!("{err:#}").contains("failed to read digest list"));
    }
}
