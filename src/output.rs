//! CLI output formatting.
//!
//! Each surface has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes it out. Format functions
//! are pure — no I/O, no side effects.
//!
//! Intake warnings (rejected files, decode failures) are operator
//! diagnostics, not errors: the print wrapper sends them to stderr and the
//! run continues.
//!
//! ```text
//! Images
//! 001 banner.jpg (1000x2000)
//! 002 broken.png (decode failed)
//!
//! Exported
//! 001 screenshots-1280x800-1.png
//! 002 screenshots-1280x800-2.png
//! 2 files -> out/
//! ```

use crate::catalog;
use crate::intake::{ImageRecord, IntakeReport};
use std::path::{Path, PathBuf};

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// The catalog as indented text: category key + label, then sizes.
pub fn format_catalog() -> Vec<String> {
    let mut lines = Vec::new();
    for c in catalog::categories() {
        lines.push(format!("{} ({})", c.key, c.label));
        for s in &c.sizes {
            lines.push(format!("    {}", s.label));
        }
    }
    lines
}

/// One line per gallery record: index, name, dimensions or a placeholder.
pub fn format_gallery(gallery: &[ImageRecord]) -> Vec<String> {
    let mut lines = vec!["Images".to_string()];
    for (i, record) in gallery.iter().enumerate() {
        let detail = match record.dimensions {
            Some(d) => format!("{}x{}", d.width, d.height),
            None => "decode failed".to_string(),
        };
        lines.push(format!("{} {} ({})", format_index(i + 1), record.name, detail));
    }
    lines
}

/// Warning lines for files the intake dropped or could not decode.
pub fn format_intake_warnings(report: &IntakeReport) -> Vec<String> {
    let mut lines = Vec::new();
    for name in &report.rejected {
        lines.push(format!("skipped {name}: not a JPEG or PNG"));
    }
    for name in &report.undecodable {
        lines.push(format!("warning: could not decode {name}"));
    }
    lines
}

/// Export results: one line per written file plus a summary.
pub fn format_export_output(paths: &[PathBuf], dir: &Path) -> Vec<String> {
    let mut lines = vec!["Exported".to_string()];
    for (i, path) in paths.iter().enumerate() {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        lines.push(format!("{} {}", format_index(i + 1), name));
    }
    lines.push(format!("{} files -> {}", paths.len(), dir.display()));
    lines
}

pub fn print_catalog() {
    for line in format_catalog() {
        println!("{line}");
    }
}

pub fn print_intake(gallery: &[ImageRecord], report: &IntakeReport) {
    for line in format_intake_warnings(report) {
        eprintln!("{line}");
    }
    for line in format_gallery(gallery) {
        println!("{line}");
    }
}

pub fn print_export_output(paths: &[PathBuf], dir: &Path) {
    for line in format_export_output(paths, dir) {
        println!("{line}");
    }
}
