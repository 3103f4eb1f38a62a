//! End-to-end extraction of an animation into a timestamped directory.
//!
//! [`Extraction`] splits a run into two steps so a caller can show the
//! metadata and destination before any frame is written:
//!
//! 1. [`Extraction::prepare`] checks the source, probes it, and creates the
//!    output directory.
//! 2. [`Extraction::run`] counts the frames and exports them.
//!
//! [`extract`] does both in one call.

use std::{
    fs,
    path::{Path, PathBuf},
    time::{Duration, Instant},
};

use chrono::Local;

use crate::{
    animation::AnimatedImage,
    configuration::ExtractOptions,
    error::UnreelError,
    export::export_frames,
    metadata::AnimationInfo,
    output::create_output_directory,
    probe::AnimationProbe,
};

/// A prepared extraction: the source is readable, its metadata is known, and
/// the output directory exists.
///
/// # Example
///
/// ```no_run
/// use unreel::{ExtractOptions, Extraction, UnreelError};
///
/// let extraction = Extraction::prepare("input.gif", ExtractOptions::new())?;
/// println!("{}", extraction.info());
/// println!("Output directory: {}", extraction.output_directory().display());
///
/// let report = extraction.run()?;
/// println!("Total frames extracted: {}", report.total_frames);
/// # Ok::<(), UnreelError>(())
/// ```
#[derive(Debug)]
pub struct Extraction {
    source: PathBuf,
    info: AnimationInfo,
    output_directory: PathBuf,
    options: ExtractOptions,
    started: Instant,
}

impl Extraction {
    /// Validate the source, probe it, and create the output directory.
    ///
    /// The directory is `<base>/gif_frames_<YYYYMMDD_HHMMSS>` using the local
    /// time of this call. Nothing is created when the source is missing or
    /// cannot be decoded.
    ///
    /// # Errors
    ///
    /// Returns [`UnreelError::FileNotFound`] if `path` is not a readable
    /// file, probe errors from [`AnimationProbe::probe`], and I/O errors from
    /// directory creation.
    pub fn prepare<P: AsRef<Path>>(path: P, options: ExtractOptions) -> Result<Self, UnreelError> {
        let source = path.as_ref().to_path_buf();
        ensure_source_file(&source)?;

        let started = Instant::now();
        let info = AnimationProbe::probe(&source)?;
        let output_directory =
            create_output_directory(&options.base_directory, Local::now().naive_local())?;

        Ok(Self {
            source,
            info,
            output_directory,
            options,
            started,
        })
    }

    /// Metadata probed from the source.
    pub fn info(&self) -> &AnimationInfo {
        &self.info
    }

    /// Directory the frames will be written into.
    pub fn output_directory(&self) -> &Path {
        &self.output_directory
    }

    /// Count and export every frame.
    ///
    /// The decode handle is scoped to this call and closed on both success
    /// and failure. On failure the output directory is left in place,
    /// possibly holding the frames written so far.
    pub fn run(self) -> Result<ExtractionReport, UnreelError> {
        let total_frames = {
            let mut image = AnimatedImage::open(&self.source)?;
            let total_frames = image.count_frames_with_options(&self.options)?;
            export_frames(
                &mut image,
                &self.output_directory,
                total_frames,
                &self.options,
            )?
        };

        let elapsed = self.started.elapsed();
        log::info!(
            "Extracted {total_frames} frames from {} into {} in {:.2?}",
            self.source.display(),
            self.output_directory.display(),
            elapsed,
        );

        Ok(ExtractionReport {
            info: self.info,
            output_directory: self.output_directory,
            total_frames,
            elapsed,
        })
    }
}

/// Prepare and run an extraction in one call.
///
/// # Example
///
/// ```no_run
/// use unreel::{ExtractOptions, UnreelError};
///
/// let report = unreel::extract("input.gif", &ExtractOptions::new())?;
/// println!("Files saved to: {}", report.output_directory.display());
/// # Ok::<(), UnreelError>(())
/// ```
pub fn extract<P: AsRef<Path>>(
    path: P,
    options: &ExtractOptions,
) -> Result<ExtractionReport, UnreelError> {
    Extraction::prepare(path, options.clone())?.run()
}

/// Outcome of a completed extraction.
#[derive(Debug, Clone)]
#[must_use]
pub struct ExtractionReport {
    /// Metadata of the source.
    pub info: AnimationInfo,
    /// Directory holding `frame_0000.png` and onwards.
    pub output_directory: PathBuf,
    /// Number of frames written.
    pub total_frames: u64,
    /// Wall-clock time from [`Extraction::prepare`] to the last frame.
    pub elapsed: Duration,
}

impl ExtractionReport {
    /// Mean wall-clock time spent per frame.
    pub fn average_per_frame(&self) -> Duration {
        match u32::try_from(self.total_frames) {
            Ok(0) => Duration::ZERO,
            Ok(frames) => self.elapsed / frames,
            Err(_) => {
                Duration::from_secs_f64(self.elapsed.as_secs_f64() / self.total_frames as f64)
            }
        }
    }
}

fn ensure_source_file(path: &Path) -> Result<(), UnreelError> {
    match fs::metadata(path) {
        Ok(metadata) if metadata.is_file() => Ok(()),
        Ok(_) => Err(UnreelError::FileNotFound {
            path: path.to_path_buf(),
        }),
        Err(error) => Err(UnreelError::from_open_error(path, error)),
    }
}
