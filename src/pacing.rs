//! Pacing policy for batch operations.
//!
//! Batch resize and export loops pause between items. This is not a
//! correctness requirement — it keeps a UI responsive during a resize
//! batch, and keeps rapid successive file saves from being throttled by
//! the environment during an export batch. Because it is policy rather
//! than logic, it lives behind a trait so tests can disable it and tools
//! can tune it.

use std::time::Duration;

/// Pause between consecutive batch resizes.
pub const RESIZE_PAUSE: Duration = Duration::from_millis(100);
/// Pause between consecutive batch exports. Larger, since environments
/// tend to rate-limit rapid successive file saves.
pub const EXPORT_PAUSE: Duration = Duration::from_millis(300);

/// A pacing strategy for the batch loops.
pub trait Pacer {
    fn between_resizes(&self);
    fn between_exports(&self);
}

/// Default policy: sleep the fixed politeness intervals.
#[derive(Debug, Clone)]
pub struct ThrottlePacer {
    resize_pause: Duration,
    export_pause: Duration,
}

impl ThrottlePacer {
    pub fn new(resize_pause: Duration, export_pause: Duration) -> Self {
        Self {
            resize_pause,
            export_pause,
        }
    }
}

impl Default for ThrottlePacer {
    fn default() -> Self {
        Self::new(RESIZE_PAUSE, EXPORT_PAUSE)
    }
}

impl Pacer for ThrottlePacer {
    fn between_resizes(&self) {
        std::thread::sleep(self.resize_pause);
    }

    fn between_exports(&self) {
        std::thread::sleep(self.export_pause);
    }
}

/// No pauses at all. Used by tests and `--no-pause`.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPacing;

impl Pacer for NoPacing {
    fn between_resizes(&self) {}

    fn between_exports(&self) {}
}
