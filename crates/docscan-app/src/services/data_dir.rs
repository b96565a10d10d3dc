// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Platform-aware data directory resolution.

use std::path::{Path, PathBuf};

const APP_DIR: &str = "docscan";

/// Return the application data directory, creating it if needed.
///
/// Holds `config.json` and `preferences.json`. The scanned PDF itself goes
/// to the configured temp dir, not here.
pub fn data_dir() -> PathBuf {
    let dir = resolve(
        std::env::var_os("XDG_DATA_HOME").as_deref().map(Path::new),
        std::env::var_os("HOME").as_deref().map(Path::new),
    );
    if let Err(e) = std::fs::create_dir_all(&dir) {
        tracing::warn!(path = %dir.display(), error = %e, "could not create data dir");
    }
    dir
}

/// XDG data dir, then `~/.local/share`, then `/tmp`.
fn resolve(xdg_data_home: Option<&Path>, home: Option<&Path>) -> PathBuf {
    let base = match (xdg_data_home, home) {
        (Some(xdg), _) if !xdg.as_os_str().is_empty() => xdg.to_path_buf(),
        (_, Some(home)) if !home.as_os_str().is_empty() => home.join(".local").join("share"),
        _ => PathBuf::from("/tmp"),
    };
    base.join(APP_DIR)
}
