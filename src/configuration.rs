//! Extraction configuration.
//!
//! [`ExtractOptions`] is a builder that threads the progress callback, PNG
//! compression level, and output location through extraction without
//! polluting every function signature.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use unreel::{ExtractOptions, PngCompression, ProgressCallback, ProgressInfo};
//!
//! struct LogProgress;
//! impl ProgressCallback for LogProgress {
//!     fn on_progress(&self, info: &ProgressInfo) {
//!         println!("{:?}: {} done", info.operation, info.current);
//!     }
//! }
//!
//! let options = ExtractOptions::new()
//!     .with_progress(Arc::new(LogProgress))
//!     .with_compression(PngCompression::Fast)
//!     .with_base_directory("frames");
//! ```

use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use image::codecs::png::{CompressionType, FilterType};

use crate::output::DEFAULT_BASE_DIRECTORY;
use crate::progress::{NoOpProgress, ProgressCallback};

/// How hard the PNG encoder works to shrink each frame file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PngCompression {
    /// Fastest encoding, largest files.
    Fast,
    /// The encoder's balanced default.
    Default,
    /// Smallest files. This is the default.
    #[default]
    Best,
}

impl PngCompression {
    /// Map to the `image` crate's compression and filter settings.
    pub(crate) fn to_png_settings(self) -> (CompressionType, FilterType) {
        match self {
            PngCompression::Fast => (CompressionType::Fast, FilterType::NoFilter),
            PngCompression::Default => (CompressionType::Default, FilterType::Adaptive),
            PngCompression::Best => (CompressionType::Best, FilterType::Adaptive),
        }
    }
}

/// Configuration for extraction operations.
///
/// A default-constructed value writes size-optimised PNGs under
/// [`DEFAULT_BASE_DIRECTORY`] and reports no progress.
#[derive(Clone)]
pub struct ExtractOptions {
    /// Progress callback. Defaults to a no-op.
    pub(crate) progress: Arc<dyn ProgressCallback>,
    /// How often to fire the progress callback (every N frames).
    pub(crate) batch_size: u64,
    /// PNG compression level for written frames.
    pub(crate) compression: PngCompression,
    /// Directory under which the timestamped output directory is created.
    pub(crate) base_directory: PathBuf,
}

impl Debug for ExtractOptions {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("ExtractOptions")
            .field("batch_size", &self.batch_size)
            .field("compression", &self.compression)
            .field("base_directory", &self.base_directory)
            .finish()
    }
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl ExtractOptions {
    /// Create options with default settings.
    ///
    /// Defaults: no progress callback, batch size 1, best compression,
    /// base directory `gif_frames`.
    pub fn new() -> Self {
        Self {
            progress: Arc::new(NoOpProgress),
            batch_size: 1,
            compression: PngCompression::default(),
            base_directory: PathBuf::from(DEFAULT_BASE_DIRECTORY),
        }
    }

    /// Attach a progress callback.
    #[must_use]
    pub fn with_progress(mut self, callback: Arc<dyn ProgressCallback>) -> Self {
        self.progress = callback;
        self
    }

    /// Set how often the progress callback fires.
    ///
    /// A value of 1 means every frame; 10 means every 10th frame. Clamped to
    /// a minimum of 1.
    #[must_use]
    pub fn with_batch_size(mut self, size: u64) -> Self {
        self.batch_size = size.max(1);
        self
    }

    /// Set the PNG compression level.
    #[must_use]
    pub fn with_compression(mut self, compression: PngCompression) -> Self {
        self.compression = compression;
        self
    }

    /// Set the directory under which `gif_frames_<timestamp>` is created.
    #[must_use]
    pub fn with_base_directory<P: Into<PathBuf>>(mut self, directory: P) -> Self {
        self.base_directory = directory.into();
        self
    }

    /// The configured PNG compression level.
    pub fn compression(&self) -> PngCompression {
        self.compression
    }

    /// The configured base directory.
    pub fn base_directory(&self) -> &Path {
        &self.base_directory
    }
}
