//! Progress reporting.
//!
//! This module provides [`ProgressCallback`] for monitoring frame counting and
//! export, and [`ProgressInfo`] for detailed progress snapshots.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use unreel::{ExtractOptions, ProgressCallback, ProgressInfo, UnreelError};
//!
//! struct PrintProgress;
//!
//! impl ProgressCallback for PrintProgress {
//!     fn on_progress(&self, info: &ProgressInfo) {
//!         if let (Some(pct), Some(name)) = (info.percentage, &info.file_name) {
//!             println!("Progress: {pct:.1}% - Saved {name}");
//!         }
//!     }
//! }
//!
//! let options = ExtractOptions::new().with_progress(Arc::new(PrintProgress));
//! let report = unreel::extract("input.gif", &options)?;
//! println!("{} frames", report.total_frames);
//! # Ok::<(), UnreelError>(())
//! ```

use std::sync::Arc;
use std::time::{Duration, Instant};

/// The kind of operation currently in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum OperationType {
    /// Seeking through the animation to find its length.
    FrameCounting,
    /// Writing frames out as still images.
    FrameExport,
}

/// A snapshot of extraction progress.
///
/// Delivered to [`ProgressCallback::on_progress`] at a cadence controlled
/// by [`ExtractOptions::with_batch_size`](crate::ExtractOptions::with_batch_size).
#[derive(Debug, Clone)]
pub struct ProgressInfo {
    /// What kind of work is being performed.
    pub operation: OperationType,
    /// How many frames have been processed so far.
    pub current: u64,
    /// Total frames expected, if known ahead of time.
    pub total: Option<u64>,
    /// Completion percentage (0.0 – 100.0), if `total` is known.
    pub percentage: Option<f32>,
    /// Wall-clock time elapsed since the operation started.
    pub elapsed: Duration,
    /// Estimated time remaining, based on current throughput.
    pub estimated_remaining: Option<Duration>,
    /// Index of the frame that was just processed.
    pub frame_index: Option<u64>,
    /// Name of the file that was just written (export only).
    pub file_name: Option<String>,
}

/// Trait for receiving progress updates during extraction.
///
/// Implementations must be [`Send`] and [`Sync`] so a single recorder can be
/// shared behind an [`Arc`].
///
/// Progress callbacks are **infallible**: they observe but cannot halt the
/// operation.
pub trait ProgressCallback: Send + Sync {
    /// Called at regular intervals during counting and export.
    fn on_progress(&self, info: &ProgressInfo);
}

/// A no-op implementation that discards all progress notifications.
///
/// This is the default when no callback is configured.
pub(crate) struct NoOpProgress;

impl ProgressCallback for NoOpProgress {
    fn on_progress(&self, _info: &ProgressInfo) {}
}

/// Internal helper that tracks progress timing and emits callbacks.
pub(crate) struct ProgressTracker {
    callback: Arc<dyn ProgressCallback>,
    operation: OperationType,
    total: Option<u64>,
    current: u64,
    batch_size: u64,
    start_time: Instant,
    items_since_last_report: u64,
    last_frame_index: Option<u64>,
    last_file_name: Option<String>,
}

impl ProgressTracker {
    pub(crate) fn new(
        callback: Arc<dyn ProgressCallback>,
        operation: OperationType,
        total: Option<u64>,
        batch_size: u64,
    ) -> Self {
        Self {
            callback,
            operation,
            total,
            current: 0,
            batch_size: batch_size.max(1),
            start_time: Instant::now(),
            items_since_last_report: 0,
            last_frame_index: None,
            last_file_name: None,
        }
    }

    /// Record one completed frame and fire the callback if the batch
    /// threshold is reached.
    pub(crate) fn advance(&mut self, frame_index: u64, file_name: Option<String>) {
        self.current += 1;
        self.items_since_last_report += 1;
        self.last_frame_index = Some(frame_index);
        self.last_file_name = file_name;

        if self.items_since_last_report >= self.batch_size {
            self.report();
            self.items_since_last_report = 0;
        }
    }

    /// Emit a final report for any frames not yet covered by a batch.
    pub(crate) fn finish(&mut self) {
        if self.items_since_last_report > 0 {
            self.report();
            self.items_since_last_report = 0;
        }
    }

    fn report(&self) {
        let elapsed = self.start_time.elapsed();

        let percentage = self
            .total
            .filter(|&t| t > 0)
            .map(|t| (self.current as f32 / t as f32) * 100.0);

        let estimated_remaining = self.total.filter(|_| self.current > 0).and_then(|t| {
            let remaining = t.saturating_sub(self.current) as f64;
            Duration::try_from_secs_f64(elapsed.as_secs_f64() * remaining / self.current as f64)
                .ok()
        });

        let info = ProgressInfo {
            operation: self.operation,
            current: self.current,
            total: self.total,
            percentage,
            elapsed,
            estimated_remaining,
            frame_index: self.last_frame_index,
            file_name: self.last_file_name.clone(),
        };

        self.callback.on_progress(&info);
    }
}
