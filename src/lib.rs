//! # crochrome
//!
//! Batch-resize images to Chrome Web Store asset dimensions. The store
//! rejects screenshots and promo tiles at anything other than its fixed
//! pixel sizes; this tool takes your JPEG/PNG sources and produces
//! correctly-dimensioned PNG copies, named the way the upload form expects
//! to find them.
//!
//! # Architecture
//!
//! Everything flows through one [`session::Session`] controller:
//!
//! ```text
//! intake    files → filter (JPEG/PNG) → decode dims → ImageRecords
//! catalog   category + size selection (screenshots, promo tiles)
//! pipeline  original bytes → stretch to exact box → PNG
//! export    cached or inline render → <category>-<size>-<N>.png
//! ```
//!
//! The session owns all mutable state — gallery, selection, active index,
//! the per-index resized-output cache, and a batch state machine — behind a
//! single-writer discipline. There is no hidden shared mutation anywhere.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`catalog`] | Static table of store asset categories and their fixed sizes |
//! | [`intake`] | File filtering, dimension decoding, record construction |
//! | [`imaging`] | The decode → stretch → encode pipeline behind a backend trait |
//! | [`session`] | The controller: gallery, selection, cache, batch operations |
//! | [`pacing`] | Swappable inter-item pause policy for batch loops |
//! | [`naming`] | `<category>-<sizeValue>-<N>.png` output filename convention |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Stretch, Not Fit
//!
//! The pipeline stretches sources to the exact target box with a
//! non-uniform scale. No letterboxing, no cropping: asset slots have fixed
//! dimensions, and a source with the wrong aspect ratio comes out squashed
//! rather than padded. Supplying sensible sources is the user's job.
//!
//! ## Always Re-derive From Originals
//!
//! A record's raw bytes never change after intake, and every resize decodes
//! them afresh. Resizing twice at the same size is byte-identical, and a
//! resize after a size change can never compound resampling loss from an
//! earlier output.
//!
//! ## Explicit Failure At Every Stage
//!
//! Decode, stretch, and encode each return typed errors. The intake layer
//! chooses to downgrade decode failures (a record without dimensions plus
//! an operator warning); nothing is silently swallowed inside the pipeline.

pub mod catalog;
pub mod imaging;
pub mod intake;
pub mod naming;
pub mod output;
pub mod pacing;
pub mod session;

#[cfg(test)]
pub(crate) mod test_helpers;
