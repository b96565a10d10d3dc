// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Artifact fingerprints: SHA-256 over the PDF bytes, in memory or on disk.

use std::io::Read;
use std::path::Path;

use sha2::{Digest, Sha256};

/// Lowercase hex SHA-256 of `data`.
pub fn hash_bytes(data: &[u8]) -> String {
    hex::encode(Sha256::digest(data))
}

/// Lowercase hex SHA-256 of the file at `path`, streamed in chunks.
pub fn hash_file(path: &Path) -> std::io::Result<String> {
    let mut file = std::fs::File::open(path)?;
    let mut hasher = Sha256::new();
    let mut buf = [0u8; 16 * 1024];
    loop {
        let n = file.read(&mut buf)?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }
    Ok(hex::encode(hasher.finalize()))
}

/// Whether the file at `path` still hashes to `expected`. Unreadable files
/// never match.
pub fn file_matches(path: &Path, expected: &str) -> bool {
    match hash_file(path) {
        Ok(actual) => actual.eq_ignore_ascii_case(expected),
        Err(e) => {
            tracing::debug!(path = %path.display(), error = %e, "cannot fingerprint file");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EMPTY: &str = "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855";

    #[test]
    fn empty_pdf_has_well_known_digest() {
        assert_eq!(hash_bytes(&[]), EMPTY);
    }

    #[test]
    fn file_digest_equals_memory_digest() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("scan.pdf");
        // Larger than one read chunk.
        let data: Vec<u8> = (0..40_000u32).map(|i| (i % 251) as u8).collect();
        std::fs::write(&path, &data).expect("write");

        assert_eq!(hash_file(&path).expect("hash"), hash_bytes(&data));
        assert!(file_matches(&path, &hash_bytes(&data).to_uppercase()));
    }

    #[test]
    fn missing_file_never_matches() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("gone.pdf");
        assert!(hash_file(&path).is_err());
        assert!(!file_matches(&path, EMPTY));
    }
}
