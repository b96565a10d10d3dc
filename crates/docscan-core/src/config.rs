// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Application configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::types::PageLayout;

/// Suggested file name for exports and the fixed temp file name.
pub const DEFAULT_FILE_NAME: &str = "Scanned Document.pdf";

/// Title embedded in the PDF /Info dictionary.
pub const DEFAULT_DOCUMENT_TITLE: &str = "Scanned Document";

/// What happens after a session ends cancelled or failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionEndPolicy {
    /// One scan per run: quit the application.
    Exit,
    /// Go back to the scan button.
    ReturnToIdle,
}

/// Persistent application settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Behaviour after a cancelled or failed scan.
    pub end_of_session: SessionEndPolicy,
    /// Page geometry for assembled PDFs.
    pub page_layout: PageLayout,
    /// PDF title metadata.
    pub document_title: String,
    /// Temp file name, also suggested to the export surface.
    pub export_file_name: String,
    /// Directory for the temporary artifact. `None` means the OS temp dir.
    pub temp_dir: Option<PathBuf>,
    /// Open the capture source as soon as the screen appears.
    pub auto_start_scan: bool,
}

impl ScanConfig {
    /// Resolved directory for the temporary artifact.
    pub fn temp_dir(&self) -> PathBuf {
        self.temp_dir.clone().unwrap_or_else(std::env::temp_dir)
    }
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            end_of_session: SessionEndPolicy::Exit,
            page_layout: PageLayout::Native,
            document_title: DEFAULT_DOCUMENT_TITLE.into(),
            export_file_name: DEFAULT_FILE_NAME.into(),
            temp_dir: None,
            auto_start_scan: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PaperSize;

    #[test]
    fn partial_json_fills_defaults() {
        let config: ScanConfig =
            serde_json::from_str(r#"{ "end_of_session": "ReturnToIdle" }"#).unwrap();
        assert_eq!(config.end_of_session, SessionEndPolicy::ReturnToIdle);
        assert_eq!(config.export_file_name, DEFAULT_FILE_NAME);
        assert_eq!(config.page_layout, PageLayout::Native);
    }

    #[test]
    fn paper_layout_round_trips() {
        let config = ScanConfig {
            page_layout: PageLayout::Paper(PaperSize::Letter),
            ..ScanConfig::default()
        };
        let json = serde_json::to_string(&config).unwrap();
        let back: ScanConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn temp_dir_defaults_to_os_temp() {
        assert_eq!(ScanConfig::default().temp_dir(), std::env::temp_dir());
    }
}
