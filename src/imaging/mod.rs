//! Image processing — pure Rust, zero external dependencies.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Identify** | `image::ImageReader::into_dimensions` |
//! | **Stretch** | `resize_exact` (Lanczos3) |
//! | **Encode** | PNG, always, regardless of source format |
//!
//! The module is split into:
//! - **Parameters**: Data structures describing image operations
//! - **Backend**: [`ImageBackend`] trait + [`RustBackend`]
//! - **Operations**: The decode → stretch → encode pipeline

pub mod backend;
pub mod operations;
mod params;
pub mod rust_backend;

pub use backend::{BackendError, Dimensions, ImageBackend};
pub use operations::{ResizedOutput, get_dimensions, render};
pub use params::{Smoothing, StretchParams};
pub use rust_backend::RustBackend;
