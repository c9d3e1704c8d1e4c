//! Image processing backend trait and shared types.
//!
//! The [`ImageBackend`] trait defines the two operations every backend must
//! support: identify and stretch. Both work on in-memory byte buffers — an
//! image record owns its original bytes and every resize re-derives from
//! them, so nothing here touches the filesystem.
//!
//! The production implementation is
//! [`RustBackend`](super::rust_backend::RustBackend) — pure Rust, everything
//! statically linked into the binary.

use super::params::StretchParams;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("decode failed: {0}")]
    Decode(String),
    #[error("encode failed: {0}")]
    Encode(String),
}

/// Natural pixel dimensions of a decoded image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

/// Trait for image processing backends.
///
/// Every backend must implement both operations so the rest of the codebase
/// is backend-agnostic. Failures are explicit `Result`s at every stage —
/// callers decide whether to surface or swallow them.
pub trait ImageBackend: Sync {
    /// Decode just enough of `bytes` to learn the natural dimensions.
    fn identify(&self, bytes: &[u8]) -> Result<Dimensions, BackendError>;

    /// Decode `bytes`, stretch to the exact target box, encode as PNG.
    fn stretch(&self, bytes: &[u8], params: &StretchParams) -> Result<Vec<u8>, BackendError>;
}
