//! The session controller: gallery, selection, and the resized-output cache.
//!
//! One [`Session`] owns all mutable state the tool has — the original's
//! scattered view-state globals collapsed into a single struct with a
//! single-writer discipline. Every operation a UI button would trigger is a
//! method here, so the whole interactive surface is testable without any
//! view layer.
//!
//! ## State invariants
//!
//! - The resized-output cache holds at most one [`ResizedOutput`] per
//!   gallery index; replacing or invalidating an entry drops it (releasing
//!   the encoded bytes).
//! - Changing the selected category or size invalidates the entire cache:
//!   every cached output was produced at the old dimensions.
//! - Removing an image re-keys cache entries above it down by one, so an
//!   entry always belongs to the record at its key.
//! - The active index is always in range while the gallery is non-empty.
//!
//! ## Batch state machine
//!
//! `resize_all` and `export_all` run start-to-finish with no cancellation.
//! Re-entrant batch starts are rejected through [`BatchState`] — a request
//! is only accepted from `Idle`.

use crate::catalog::{self, AssetCategory, SizeSpec};
use crate::imaging::{BackendError, ImageBackend, ResizedOutput, RustBackend, Smoothing, render};
use crate::intake::{self, ImageRecord, IntakeReport, SubmittedFile};
use crate::naming;
use crate::pacing::{Pacer, ThrottlePacer};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("no category/size selected")]
    NoSelection,
    #[error("no image at index {0}")]
    NoSuchImage(usize),
    #[error("unknown asset category '{0}'")]
    UnknownCategory(String),
    #[error("unknown size '{value}' for category '{category}'")]
    UnknownSize { category: String, value: String },
    #[error("a batch operation is already in progress")]
    BatchInProgress,
    #[error("image processing failed: {0}")]
    Imaging(#[from] BackendError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Where the session is in its batch lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BatchState {
    #[default]
    Idle,
    ResizingBatch,
    ExportingBatch,
}

/// All session state plus the backend and pacing policy that operate on it.
pub struct Session<B: ImageBackend = RustBackend> {
    backend: B,
    pacer: Box<dyn Pacer>,
    gallery: Vec<ImageRecord>,
    selected_category: Option<&'static AssetCategory>,
    selected_size: Option<&'static SizeSpec>,
    active_index: usize,
    preview_mode: bool,
    smoothing: Smoothing,
    resized: HashMap<usize, ResizedOutput>,
    batch: BatchState,
}

impl Session<RustBackend> {
    /// A production session: pure-Rust backend, default politeness pauses.
    pub fn new() -> Self {
        Self::with_backend(RustBackend::new(), Box::new(ThrottlePacer::default()))
    }

    /// A production session with a custom pacing policy (`--no-pause`).
    pub fn with_pacer(pacer: Box<dyn Pacer>) -> Self {
        Self::with_backend(RustBackend::new(), pacer)
    }
}

impl Default for Session<RustBackend> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B: ImageBackend> Session<B> {
    pub fn with_backend(backend: B, pacer: Box<dyn Pacer>) -> Self {
        Self {
            backend,
            pacer,
            gallery: Vec::new(),
            selected_category: None,
            selected_size: None,
            active_index: 0,
            preview_mode: false,
            smoothing: Smoothing::High,
            resized: HashMap::new(),
            batch: BatchState::Idle,
        }
    }

    /// Switch resampling quality (draft vs. final renders). Cached outputs
    /// were produced at the old quality, so the cache is invalidated the
    /// same way a size change would.
    pub fn set_smoothing(&mut self, smoothing: Smoothing) {
        if self.smoothing != smoothing {
            self.smoothing = smoothing;
            self.invalidate_outputs();
        }
    }

    // ------------------------------------------------------------------
    // Intake
    // ------------------------------------------------------------------

    /// Submit a batch of files and append the accepted ones to the gallery.
    ///
    /// The active index moves to the first newly added image and any
    /// side-by-side preview is exited. Existing cached outputs stay valid:
    /// appending never changes the indices of images already present.
    pub fn ingest(&mut self, files: Vec<SubmittedFile>) -> IntakeReport {
        let (records, report) = intake::submit(&self.backend, files);
        if !records.is_empty() {
            self.active_index = self.gallery.len();
            self.preview_mode = false;
        }
        self.gallery.extend(records);
        report
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    pub fn gallery(&self) -> &[ImageRecord] {
        &self.gallery
    }

    pub fn active_index(&self) -> usize {
        self.active_index
    }

    pub fn active_record(&self) -> Option<&ImageRecord> {
        self.gallery.get(self.active_index)
    }

    pub fn preview_mode(&self) -> bool {
        self.preview_mode
    }

    pub fn batch_state(&self) -> BatchState {
        self.batch
    }

    pub fn selected_category(&self) -> Option<&'static AssetCategory> {
        self.selected_category
    }

    pub fn selected_size(&self) -> Option<&'static SizeSpec> {
        self.selected_size
    }

    /// The cached output for a gallery index, if one exists.
    pub fn cached(&self, index: usize) -> Option<&ResizedOutput> {
        self.resized.get(&index)
    }

    pub fn cached_count(&self) -> usize {
        self.resized.len()
    }

    // ------------------------------------------------------------------
    // Selection and gallery mutation
    // ------------------------------------------------------------------

    /// Make the image at `index` the active one (single-image preview).
    pub fn set_active(&mut self, index: usize) -> Result<(), SessionError> {
        if index >= self.gallery.len() {
            return Err(SessionError::NoSuchImage(index));
        }
        self.active_index = index;
        Ok(())
    }

    /// Select a category; size defaults to the category's first entry.
    /// Invalidates every cached output and exits preview mode.
    pub fn select_category(&mut self, key: &str) -> Result<(), SessionError> {
        let category = catalog::find_category(key)
            .ok_or_else(|| SessionError::UnknownCategory(key.to_string()))?;
        self.selected_category = Some(category);
        self.selected_size = category.sizes.first();
        self.invalidate_outputs();
        Ok(())
    }

    /// Select a size within the current category. Same invalidation as
    /// [`select_category`](Self::select_category).
    pub fn select_size(&mut self, value: &str) -> Result<(), SessionError> {
        let category = self.selected_category.ok_or(SessionError::NoSelection)?;
        let size = category
            .sizes
            .iter()
            .find(|s| s.value == value)
            .ok_or_else(|| SessionError::UnknownSize {
                category: category.key.clone(),
                value: value.to_string(),
            })?;
        self.selected_size = Some(size);
        self.invalidate_outputs();
        Ok(())
    }

    /// Remove an image, dropping its cached output and re-keying the cache
    /// entries above it. The active index is clamped back into range; an
    /// emptied gallery also exits preview mode.
    pub fn remove_image(&mut self, index: usize) -> Result<(), SessionError> {
        if index >= self.gallery.len() {
            return Err(SessionError::NoSuchImage(index));
        }
        self.resized.remove(&index);
        let shifted = self
            .resized
            .drain()
            .map(|(k, v)| if k > index { (k - 1, v) } else { (k, v) })
            .collect();
        self.resized = shifted;
        self.gallery.remove(index);

        if self.gallery.is_empty() {
            self.active_index = 0;
            self.preview_mode = false;
        } else if self.active_index >= self.gallery.len() {
            self.active_index = self.gallery.len() - 1;
        }
        Ok(())
    }

    fn invalidate_outputs(&mut self) {
        self.resized.clear();
        self.preview_mode = false;
    }

    fn current_target(&self) -> Result<(&'static AssetCategory, &'static SizeSpec), SessionError> {
        match (self.selected_category, self.selected_size) {
            (Some(category), Some(size)) => Ok((category, size)),
            _ => Err(SessionError::NoSelection),
        }
    }

    // ------------------------------------------------------------------
    // Resize
    // ------------------------------------------------------------------

    /// Resize one image at the current selection, caching the result.
    ///
    /// Always re-derives from the record's original bytes; a stale cache
    /// entry for the index is dropped on replacement.
    pub fn resize(&mut self, index: usize) -> Result<(), SessionError> {
        let (_, size) = self.current_target()?;
        let record = self
            .gallery
            .get(index)
            .ok_or(SessionError::NoSuchImage(index))?;
        let output = render(&self.backend, record.bytes(), size, self.smoothing)?;
        self.resized.insert(index, output);
        Ok(())
    }

    /// Resize every image in gallery order, then enter preview mode.
    ///
    /// Sequential, with the pacing pause between items. Rejected unless the
    /// session is `Idle`. A failure aborts the remainder of the batch; the
    /// machine returns to `Idle` either way. An empty gallery is a no-op
    /// that does not enter preview mode.
    pub fn resize_all(&mut self) -> Result<(), SessionError> {
        if self.gallery.is_empty() {
            return Ok(());
        }
        self.begin_batch(BatchState::ResizingBatch)?;
        let result = self.run_resize_batch();
        self.batch = BatchState::Idle;
        result?;
        self.preview_mode = true;
        Ok(())
    }

    fn run_resize_batch(&mut self) -> Result<(), SessionError> {
        for index in 0..self.gallery.len() {
            if index > 0 {
                self.pacer.between_resizes();
            }
            self.resize(index)?;
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Export
    // ------------------------------------------------------------------

    /// Write one image's output into `dir` as
    /// `<category>-<sizeValue>-<N>.png`.
    ///
    /// Reuses the cached output when one exists for the index; otherwise
    /// runs the pipeline inline without populating the cache.
    pub fn export(&self, index: usize, dir: &Path) -> Result<PathBuf, SessionError> {
        let (category, size) = self.current_target()?;
        let record = self
            .gallery
            .get(index)
            .ok_or(SessionError::NoSuchImage(index))?;

        let path = dir.join(naming::output_filename(&category.key, &size.value, index));
        match self.resized.get(&index) {
            Some(output) => std::fs::write(&path, &output.png)?,
            None => {
                let output = render(&self.backend, record.bytes(), size, self.smoothing)?;
                std::fs::write(&path, &output.png)?;
            }
        }
        Ok(path)
    }

    /// Export every image sequentially with the (larger) export pause
    /// between items. Rejected unless the session is `Idle`.
    pub fn export_all(&mut self, dir: &Path) -> Result<Vec<PathBuf>, SessionError> {
        self.begin_batch(BatchState::ExportingBatch)?;
        let result = self.run_export_batch(dir);
        self.batch = BatchState::Idle;
        result
    }

    fn run_export_batch(&self, dir: &Path) -> Result<Vec<PathBuf>, SessionError> {
        let mut paths = Vec::with_capacity(self.gallery.len());
        for index in 0..self.gallery.len() {
            if index > 0 {
                self.pacer.between_exports();
            }
            paths.push(self.export(index, dir)?);
        }
        Ok(paths)
    }

    fn begin_batch(&mut self, next: BatchState) -> Result<(), SessionError> {
        if self.batch != BatchState::Idle {
            return Err(SessionError::BatchInProgress);
        }
        self.batch = next;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imaging::backend::tests::MockBackend;
    use crate::imaging::{Dimensions, StretchParams};
    use crate::pacing::NoPacing;

    fn mock_session() -> Session<MockBackend> {
        Session::with_backend(MockBackend::always_identifying(100, 100), Box::new(NoPacing))
    }

    fn files(n: usize) -> Vec<SubmittedFile> {
        (0..n)
            .map(|i| SubmittedFile::new(format!("img-{i}.png"), vec![b'x'; 8]))
            .collect()
    }

    fn selected_session(n: usize) -> Session<MockBackend> {
        let mut session = mock_session();
        session.ingest(files(n));
        session.select_category("screenshots").unwrap();
        session
    }

    #[test]
    fn ingest_appends_and_activates_first_new() {
        let mut session = mock_session();
        session.ingest(files(2));
        assert_eq!(session.gallery().len(), 2);
        assert_eq!(session.active_index(), 0);

        session.ingest(files(2));
        assert_eq!(session.gallery().len(), 4);
        assert_eq!(session.active_index(), 2);
    }

    #[test]
    fn ingest_exits_preview_mode() {
        let mut session = selected_session(1);
        session.resize_all().unwrap();
        assert!(session.preview_mode());

        session.ingest(files(1));
        assert!(!session.preview_mode());
    }

    #[test]
    fn ingest_keeps_existing_cached_outputs() {
        let mut session = selected_session(2);
        session.resize_all().unwrap();
        assert_eq!(session.cached_count(), 2);

        session.ingest(files(1));
        assert_eq!(session.cached_count(), 2);
        assert!(session.cached(0).is_some());
        assert!(session.cached(1).is_some());
    }

    #[test]
    fn ingest_of_only_rejects_changes_nothing() {
        let mut session = selected_session(1);
        session.set_active(0).unwrap();
        session.resize_all().unwrap();

        let report = session.ingest(vec![SubmittedFile::new("notes.txt", b"text".to_vec())]);
        assert_eq!(report.accepted, 0);
        assert_eq!(session.gallery().len(), 1);
        assert!(session.preview_mode());
    }

    #[test]
    fn select_category_defaults_to_first_size() {
        let mut session = mock_session();
        session.select_category("screenshots").unwrap();
        assert_eq!(session.selected_size().unwrap().value, "1280x800");
    }

    #[test]
    fn select_category_unknown_errors() {
        let mut session = mock_session();
        let result = session.select_category("posters");
        assert!(matches!(result, Err(SessionError::UnknownCategory(_))));
    }

    #[test]
    fn select_size_requires_category() {
        let mut session = mock_session();
        let result = session.select_size("1280x800");
        assert!(matches!(result, Err(SessionError::NoSelection)));
    }

    #[test]
    fn select_size_outside_category_errors() {
        let mut session = mock_session();
        session.select_category("small-promo").unwrap();
        let result = session.select_size("1280x800");
        assert!(matches!(result, Err(SessionError::UnknownSize { .. })));
    }

    #[test]
    fn category_change_empties_cache() {
        let mut session = selected_session(2);
        session.resize_all().unwrap();
        assert_eq!(session.cached_count(), 2);

        session.select_category("small-promo").unwrap();
        assert_eq!(session.cached_count(), 0);
        assert!(!session.preview_mode());
    }

    #[test]
    fn size_change_empties_cache() {
        let mut session = selected_session(2);
        session.resize_all().unwrap();

        session.select_size("640x400").unwrap();
        assert_eq!(session.cached_count(), 0);
        assert!(!session.preview_mode());
    }

    #[test]
    fn remove_rekeys_higher_cache_entries() {
        let mut session = selected_session(3);
        session.resize_all().unwrap();

        session.remove_image(0).unwrap();
        assert_eq!(session.gallery().len(), 2);
        assert_eq!(session.cached_count(), 2);
        assert!(session.cached(0).is_some());
        assert!(session.cached(1).is_some());
        assert!(session.cached(2).is_none());
    }

    #[test]
    fn remove_middle_keeps_lower_keys() {
        let mut session = selected_session(3);
        session.resize_all().unwrap();

        session.remove_image(1).unwrap();
        assert_eq!(session.cached_count(), 2);
        assert!(session.cached(0).is_some());
        assert!(session.cached(1).is_some());
    }

    #[test]
    fn remove_clamps_active_index() {
        let mut session = mock_session();
        session.ingest(files(3));
        session.set_active(2).unwrap();

        session.remove_image(2).unwrap();
        assert_eq!(session.active_index(), 1);
    }

    #[test]
    fn remove_last_image_resets_and_exits_preview() {
        let mut session = selected_session(1);
        session.resize_all().unwrap();

        session.remove_image(0).unwrap();
        assert!(session.gallery().is_empty());
        assert_eq!(session.active_index(), 0);
        assert!(!session.preview_mode());
        assert_eq!(session.cached_count(), 0);
    }

    #[test]
    fn remove_out_of_range_errors() {
        let mut session = mock_session();
        session.ingest(files(1));
        assert!(matches!(
            session.remove_image(5),
            Err(SessionError::NoSuchImage(5))
        ));
    }

    #[test]
    fn set_active_out_of_range_errors() {
        let mut session = mock_session();
        assert!(matches!(
            session.set_active(0),
            Err(SessionError::NoSuchImage(0))
        ));
    }

    #[test]
    fn resize_without_selection_errors() {
        let mut session = mock_session();
        session.ingest(files(1));
        assert!(matches!(
            session.resize(0),
            Err(SessionError::NoSelection)
        ));
    }

    #[test]
    fn resize_replaces_stale_entry() {
        let mut session = selected_session(1);
        session.resize(0).unwrap();
        session.resize(0).unwrap();

        assert_eq!(session.cached_count(), 1);
        assert_eq!(session.backend.stretch_count(), 2);
    }

    #[test]
    fn resize_all_caches_everything_and_enters_preview() {
        let mut session = selected_session(3);
        session.resize_all().unwrap();

        assert_eq!(session.cached_count(), 3);
        assert!(session.preview_mode());
        assert_eq!(session.batch_state(), BatchState::Idle);
        let out = session.cached(1).unwrap();
        assert_eq!((out.width, out.height), (1280, 800));
    }

    #[test]
    fn resize_all_on_empty_gallery_is_a_no_op() {
        let mut session = mock_session();
        session.select_category("screenshots").unwrap();

        session.resize_all().unwrap();
        assert!(!session.preview_mode());
        assert_eq!(session.batch_state(), BatchState::Idle);
        assert_eq!(session.backend.stretch_count(), 0);
    }

    #[test]
    fn fast_smoothing_reaches_the_backend() {
        use crate::imaging::backend::tests::RecordedOp;

        let mut session = selected_session(1);
        session.set_smoothing(Smoothing::Fast);
        session.resize(0).unwrap();

        let ops = session.backend.get_operations();
        assert!(matches!(
            ops.last().unwrap(),
            RecordedOp::Stretch {
                smoothing: Smoothing::Fast,
                ..
            }
        ));
    }

    #[test]
    fn smoothing_change_empties_cache() {
        let mut session = selected_session(2);
        session.resize_all().unwrap();
        assert_eq!(session.cached_count(), 2);

        session.set_smoothing(Smoothing::Fast);
        assert_eq!(session.cached_count(), 0);

        // Same value again is not a change and must not invalidate.
        session.resize_all().unwrap();
        session.set_smoothing(Smoothing::Fast);
        assert_eq!(session.cached_count(), 2);
    }

    #[test]
    fn resize_all_runs_again_after_completion() {
        let mut session = selected_session(2);
        session.resize_all().unwrap();
        session.resize_all().unwrap();
        assert_eq!(session.backend.stretch_count(), 4);
    }

    #[test]
    fn begin_batch_rejects_when_not_idle() {
        let mut session = mock_session();
        session.begin_batch(BatchState::ResizingBatch).unwrap();
        assert!(matches!(
            session.begin_batch(BatchState::ExportingBatch),
            Err(SessionError::BatchInProgress)
        ));
    }

    #[test]
    fn resize_all_failure_returns_to_idle() {
        struct FailingBackend;
        impl ImageBackend for FailingBackend {
            fn identify(&self, _: &[u8]) -> Result<Dimensions, BackendError> {
                Err(BackendError::Decode("mock".to_string()))
            }
            fn stretch(&self, _: &[u8], _: &StretchParams) -> Result<Vec<u8>, BackendError> {
                Err(BackendError::Decode("mock".to_string()))
            }
        }

        let mut session = Session::with_backend(FailingBackend, Box::new(NoPacing));
        session.ingest(files(2));
        session.select_category("screenshots").unwrap();

        let result = session.resize_all();
        assert!(matches!(result, Err(SessionError::Imaging(_))));
        assert_eq!(session.batch_state(), BatchState::Idle);
        assert!(!session.preview_mode());
    }

    #[test]
    fn export_reuses_cached_output() {
        let tmp = tempfile::TempDir::new().unwrap();
        let mut session = selected_session(1);
        session.resize(0).unwrap();
        assert_eq!(session.backend.stretch_count(), 1);

        let path = session.export(0, tmp.path()).unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), b"mock-png");
        // No second pipeline run for a cached index.
        assert_eq!(session.backend.stretch_count(), 1);
    }

    #[test]
    fn export_renders_inline_without_caching() {
        let tmp = tempfile::TempDir::new().unwrap();
        let session = {
            let mut s = mock_session();
            s.ingest(files(1));
            s.select_category("screenshots").unwrap();
            s
        };

        let path = session.export(0, tmp.path()).unwrap();
        assert!(path.exists());
        assert_eq!(session.cached_count(), 0);
        assert_eq!(session.backend.stretch_count(), 1);
    }

    #[test]
    fn export_uses_naming_convention() {
        let tmp = tempfile::TempDir::new().unwrap();
        let mut session = selected_session(2);
        session.select_size("640x400").unwrap();

        let path = session.export(1, tmp.path()).unwrap();
        assert_eq!(
            path.file_name().unwrap().to_str().unwrap(),
            "screenshots-640x400-2.png"
        );
    }

    #[test]
    fn export_without_selection_errors() {
        let tmp = tempfile::TempDir::new().unwrap();
        let mut session = mock_session();
        session.ingest(files(1));
        assert!(matches!(
            session.export(0, tmp.path()),
            Err(SessionError::NoSelection)
        ));
    }

    #[test]
    fn export_all_writes_every_image() {
        let tmp = tempfile::TempDir::new().unwrap();
        let mut session = selected_session(3);
        session.resize_all().unwrap();

        let paths = session.export_all(tmp.path()).unwrap();
        assert_eq!(paths.len(), 3);
        for path in &paths {
            assert!(path.exists());
        }
        assert_eq!(session.batch_state(), BatchState::Idle);
    }
}
