// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Desktop bridge.
//
// There is no document camera on desktop, so the capture session is an image
// file dialog: the selected files become the scanned pages. Export is a save
// dialog. Both dialogs are modal and run on the calling (UI) thread, so the
// capture completion is signalled before `start_capture` returns.

use std::cmp::Ordering;
use std::iter::Peekable;
use std::path::{Path, PathBuf};
use std::str::Chars;

use docscan_core::error::{CaptureError, DocScanError, Result};
use docscan_core::{DocumentArtifact, PageImage};
use docscan_document::decode_page_file;
use tracing::info;

use crate::completion::CaptureCompletion;
use crate::traits::*;

/// Image extensions offered by the capture dialog.
const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "tiff", "tif", "bmp"];

/// File-dialog backed bridge for desktop builds.
#[derive(Debug, Default)]
pub struct DesktopBridge;

impl DesktopBridge {
    pub fn new() -> Self {
        Self
    }
}

impl PlatformBridge for DesktopBridge {
    fn platform_name(&self) -> &str {
        "Desktop"
    }
}

impl CaptureSource for DesktopBridge {
    fn start_capture(&self, completion: CaptureCompletion) -> Result<()> {
        let picked = rfd::FileDialog::new()
            .set_title("Select scanned pages")
            .add_filter("Images", IMAGE_EXTENSIONS)
            .pick_files();

        match picked {
            None => {
                info!("page selection dismissed");
                completion.cancel();
            }
            Some(paths) => match decode_in_order(paths) {
                Ok(pages) => {
                    info!(pages = pages.len(), "pages loaded for scanning");
                    completion.pages(pages);
                }
                Err(e) => {
                    completion.fail(e);
                }
            },
        }
        Ok(())
    }
}

impl ExportSurface for DesktopBridge {
    fn export(&self, pdf: &DocumentArtifact, suggested_name: &str) -> Result<()> {
        let Some(dest) = rfd::FileDialog::new()
            .set_title("Save scanned document")
            .set_file_name(suggested_name)
            .add_filter("PDF", &["pdf"])
            .save_file()
        else {
            info!("export dismissed");
            return Ok(());
        };

        write_export(&dest, pdf)?;
        info!(path = %dest.display(), pages = pdf.page_count(), "PDF exported");
        Ok(())
    }
}

/// Write the PDF where the save dialog pointed.
fn write_export(dest: &Path, pdf: &DocumentArtifact) -> Result<()> {
    std::fs::write(dest, pdf.bytes())
        .map_err(|e| DocScanError::Bridge(format!("cannot write {}: {e}", dest.display())))
}

/// Decode the selected files as pages, in natural path order so numbered
/// scans (`page-2.png` before `page-10.png`) keep their order regardless of
/// how the dialog reports the selection.
fn decode_in_order(mut paths: Vec<PathBuf>) -> std::result::Result<Vec<PageImage>, CaptureError> {
    paths.sort_by(|a, b| natural_cmp(&a.to_string_lossy(), &b.to_string_lossy()));
    paths
        .iter()
        .enumerate()
        .map(|(index, path)| decode_page_file(index, path))
        .collect()
}

/// Compare strings treating runs of ASCII digits as numbers.
fn natural_cmp(a: &str, b: &str) -> Ordering {
    let mut a = a.chars().peekable();
    let mut b = b.chars().peekable();
    loop {
        match (a.peek().copied(), b.peek().copied()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(x), Some(y)) if x.is_ascii_digit() && y.is_ascii_digit() => {
                let left = digit_run(&mut a);
                let right = digit_run(&mut b);
                let ord = compare_numbers(&left, &right);
                if ord != Ordering::Equal {
                    return ord;
                }
            }
            (Some(x), Some(y)) => {
                if x != y {
                    return x.cmp(&y);
                }
                a.next();
                b.next();
            }
        }
    }
}

fn digit_run(chars: &mut Peekable<Chars<'_>>) -> String {
    let mut run = String::new();
    while let Some(c) = chars.next_if(char::is_ascii_digit) {
        run.push(c);
    }
    run
}

/// Numeric order on digit strings of any length; `007` sorts after `7`.
fn compare_numbers(a: &str, b: &str) -> Ordering {
    let a_trim = a.trim_start_matches('0');
    let b_trim = b.trim_start_matches('0');
    a_trim
        .len()
        .cmp(&b_trim.len())
        .then_with(|| a_trim.cmp(b_trim))
        .then_with(|| a.len().cmp(&b.len()))
}
