//! High-level image operations.
//!
//! The decode → stretch → encode pipeline that turns original image bytes
//! into a [`ResizedOutput`]. Operations always start from the original
//! bytes, never from a previously produced output, so repeated resizes can
//! never accumulate resampling drift.

use super::backend::{BackendError, Dimensions, ImageBackend};
use super::params::{Smoothing, StretchParams};
use crate::catalog::SizeSpec;

/// Result type for image operations.
pub type Result<T> = std::result::Result<T, BackendError>;

/// A PNG-encoded raster at exactly one catalog size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResizedOutput {
    pub png: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

/// Get natural image dimensions using the backend.
pub fn get_dimensions(backend: &impl ImageBackend, bytes: &[u8]) -> Result<Dimensions> {
    backend.identify(bytes)
}

/// Run the full pipeline for one image at one catalog size.
pub fn render(
    backend: &impl ImageBackend,
    bytes: &[u8],
    spec: &SizeSpec,
    smoothing: Smoothing,
) -> Result<ResizedOutput> {
    let params = StretchParams::for_spec(spec).with_smoothing(smoothing);
    let png = backend.stretch(bytes, &params)?;
    Ok(ResizedOutput {
        png,
        width: spec.width,
        height: spec.height,
    })
}
