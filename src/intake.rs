//! Image intake: filtering, decoding, and record construction.
//!
//! Intake accepts a batch of named byte buffers (the CLI reads them from
//! files or directories), keeps only JPEG/PNG content, and produces one
//! [`ImageRecord`] per accepted file, in submission order.
//!
//! ## Acceptance
//!
//! A file is accepted when content sniffing of its bytes says JPEG or PNG,
//! falling back to a filename-extension match (`.jpg`, `.jpeg`, `.png`)
//! when sniffing is inconclusive. Everything else is dropped — not an
//! error, but counted in the [`IntakeReport`] so the operator can see it.
//!
//! ## Decode failures
//!
//! An accepted file that fails to decode still gets a record, just with no
//! dimensions. Display layers substitute a placeholder; the resize pipeline
//! will surface its own error if asked to process it.

use crate::imaging::{Dimensions, ImageBackend, get_dimensions};
use image::ImageFormat;
use rayon::prelude::*;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};
use thiserror::Error;
use walkdir::WalkDir;

/// Extensions accepted when content sniffing is inconclusive.
const ACCEPTED_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png"];

static NEXT_SEQ: AtomicU64 = AtomicU64::new(0);

#[derive(Error, Debug)]
pub enum IntakeError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("input not found: {0}")]
    NotFound(PathBuf),
}

/// Unique record identity: creation-time milliseconds plus a process-local
/// sequence tie-breaker for records created within the same millisecond.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RecordId {
    pub millis: u64,
    pub seq: u64,
}

impl RecordId {
    fn next() -> Self {
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0);
        Self {
            millis,
            seq: NEXT_SEQ.fetch_add(1, Ordering::Relaxed),
        }
    }
}

impl std::fmt::Display for RecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.millis, self.seq)
    }
}

/// An uploaded image plus its decoded metadata.
///
/// The original bytes are owned by the record and never change after
/// creation; every resize re-derives from them.
#[derive(Debug, Clone)]
pub struct ImageRecord {
    pub id: RecordId,
    /// Source filename, for display and diagnostics.
    pub name: String,
    bytes: Vec<u8>,
    /// Natural dimensions; `None` when decoding failed.
    pub dimensions: Option<Dimensions>,
}

impl ImageRecord {
    fn new(name: String, bytes: Vec<u8>, dimensions: Option<Dimensions>) -> Self {
        Self {
            id: RecordId::next(),
            name,
            bytes,
            dimensions,
        }
    }

    /// The original, untouched bytes.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }
}

/// One file handed to intake: a display name plus its raw content.
#[derive(Debug, Clone)]
pub struct SubmittedFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl SubmittedFile {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
        }
    }
}

/// What happened to one submission batch.
#[derive(Debug, Clone, Default)]
pub struct IntakeReport {
    /// Count of files that passed the type filter (records created).
    pub accepted: usize,
    /// Names of files dropped by the type filter.
    pub rejected: Vec<String>,
    /// Names of accepted files whose dimensions could not be decoded.
    pub undecodable: Vec<String>,
}

/// Filter, decode, and build records for a batch of files.
///
/// Dimension decoding fans out in parallel, but records are appended in
/// submission order — the whole batch is collected before anything is
/// returned, so ordering never depends on decode completion order.
pub fn submit(
    backend: &impl ImageBackend,
    files: Vec<SubmittedFile>,
) -> (Vec<ImageRecord>, IntakeReport) {
    let mut rejected = Vec::new();
    let mut accepted = Vec::new();
    for file in files {
        if is_supported(&file.name, &file.bytes) {
            accepted.push(file);
        } else {
            rejected.push(file.name);
        }
    }

    let decoded: Vec<(SubmittedFile, Option<Dimensions>)> = accepted
        .into_par_iter()
        .map(|file| {
            let dims = get_dimensions(backend, &file.bytes).ok();
            (file, dims)
        })
        .collect();

    let mut report = IntakeReport {
        accepted: decoded.len(),
        rejected,
        undecodable: Vec::new(),
    };
    let mut records = Vec::with_capacity(decoded.len());
    for (file, dims) in decoded {
        if dims.is_none() {
            report.undecodable.push(file.name.clone());
        }
        records.push(ImageRecord::new(file.name, file.bytes, dims));
    }
    (records, report)
}

/// Content sniff first, extension fallback second.
fn is_supported(name: &str, bytes: &[u8]) -> bool {
    if matches!(
        image::guess_format(bytes),
        Ok(ImageFormat::Jpeg | ImageFormat::Png)
    ) {
        return true;
    }
    has_accepted_extension(name)
}

fn has_accepted_extension(name: &str) -> bool {
    name.rsplit_once('.')
        .is_some_and(|(_, ext)| ACCEPTED_EXTENSIONS.iter().any(|a| ext.eq_ignore_ascii_case(a)))
}

/// Expand CLI inputs into a flat file list.
///
/// Files pass through; directories are walked recursively with entries
/// sorted by filename so batch order is deterministic across platforms.
/// The type filter is NOT applied here — that is [`submit`]'s job.
pub fn collect_input_paths(inputs: &[PathBuf]) -> Result<Vec<PathBuf>, IntakeError> {
    let mut paths = Vec::new();
    for input in inputs {
        if !input.exists() {
            return Err(IntakeError::NotFound(input.clone()));
        }
        if input.is_dir() {
            for entry in WalkDir::new(input)
                .sort_by_file_name()
                .into_iter()
                .filter_map(|e| e.ok())
            {
                if entry.file_type().is_file() {
                    paths.push(entry.into_path());
                }
            }
        } else {
            paths.push(input.clone());
        }
    }
    Ok(paths)
}

/// Read a file list into submission buffers.
pub fn read_files(paths: &[PathBuf]) -> Result<Vec<SubmittedFile>, IntakeError> {
    paths
        .iter()
        .map(|path| {
            let bytes = std::fs::read(path)?;
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string());
            Ok(SubmittedFile::new(name, bytes))
        })
        .collect()
}
