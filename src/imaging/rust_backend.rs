//! Pure Rust image processing backend — zero external dependencies.
//!
//! Everything is statically linked into the binary.
//!
//! ## Crate mapping
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Identify (JPEG, PNG) | `image::ImageReader::into_dimensions` (header only) |
//! | Decode | `image::load_from_memory` |
//! | Stretch | `DynamicImage::resize_exact` (Lanczos3 for high smoothing) |
//! | Encode → PNG | `DynamicImage::write_to` with `ImageFormat::Png` |

use super::backend::{BackendError, Dimensions, ImageBackend};
use super::params::{Smoothing, StretchParams};
use image::imageops::FilterType;
use image::{ImageFormat, ImageReader};
use std::io::Cursor;

/// Pure Rust backend using the `image` crate.
pub struct RustBackend;

impl RustBackend {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RustBackend {
    fn default() -> Self {
        Self::new()
    }
}

fn filter_for(smoothing: Smoothing) -> FilterType {
    match smoothing {
        Smoothing::Fast => FilterType::Triangle,
        Smoothing::High => FilterType::Lanczos3,
    }
}

impl ImageBackend for RustBackend {
    fn identify(&self, bytes: &[u8]) -> Result<Dimensions, BackendError> {
        let (width, height) = ImageReader::new(Cursor::new(bytes))
            .with_guessed_format()
            .map_err(BackendError::Io)?
            .into_dimensions()
            .map_err(|e| BackendError::Decode(format!("failed to read dimensions: {e}")))?;
        Ok(Dimensions { width, height })
    }

    fn stretch(&self, bytes: &[u8], params: &StretchParams) -> Result<Vec<u8>, BackendError> {
        let img = image::load_from_memory(bytes)
            .map_err(|e| BackendError::Decode(e.to_string()))?;

        // Exact-box stretch: non-uniform scale, aspect ratio not preserved.
        let stretched = img.resize_exact(params.width, params.height, filter_for(params.smoothing));

        let mut out = Vec::new();
        stretched
            .write_to(&mut Cursor::new(&mut out), ImageFormat::Png)
            .map_err(|e| BackendError::Encode(format!("PNG encode failed: {e}")))?;
        Ok(out)
    }
}
