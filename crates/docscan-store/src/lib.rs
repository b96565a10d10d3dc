// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// docscan-store: the single temporary PDF on disk, the advisory preference
// that remembers where it was written, and SHA-256 fingerprints for both.

pub mod artifact;
pub mod integrity;
pub mod preferences;

pub use artifact::{ArtifactStore, TempArtifactHandle};
pub use integrity::{file_matches, hash_bytes, hash_file};
pub use preferences::Preferences;
