//! Parameter types for image operations.
//!
//! These structs describe *what* to do, not *how* to do it. They are the
//! interface between the high-level [`operations`](super::operations) module
//! (which decides what to produce) and the [`backend`](super::backend)
//! (which does the actual pixel work). This separation allows swapping
//! backends (e.g. for testing with a mock) without changing operation logic.

use crate::catalog::SizeSpec;

/// Resampling quality for the stretch.
///
/// `High` (Lanczos3) is the default everywhere; `Fast` backs the CLI's
/// `--fast` draft mode, where iteration speed matters more than resampling
/// quality. Output dimensions are identical either way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Smoothing {
    Fast,
    #[default]
    High,
}

/// Full specification for a stretch: target box plus resampling quality.
///
/// The source is always stretched to fill the box exactly. Aspect ratio is
/// deliberately NOT preserved — store asset slots have fixed dimensions and
/// the user is responsible for supplying sources with a sane ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StretchParams {
    pub width: u32,
    pub height: u32,
    pub smoothing: Smoothing,
}

impl StretchParams {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            smoothing: Smoothing::High,
        }
    }

    /// Parameters targeting a catalog size.
    pub fn for_spec(spec: &SizeSpec) -> Self {
        Self::new(spec.width, spec.height)
    }

    pub fn with_smoothing(mut self, smoothing: Smoothing) -> Self {
        self.smoothing = smoothing;
        self
    }
}
