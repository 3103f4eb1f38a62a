//! # unreel
//!
//! Unreel animated images. Extract every frame of a GIF, animated PNG, or
//! animated WebP as a standalone RGBA PNG.
//!
//! `unreel` opens an animation through the [`image`] crate's decoders,
//! counts its frames, and writes each one as `frame_0000.png`,
//! `frame_0001.png`, … into a timestamped `gif_frames_<YYYYMMDD_HHMMSS>`
//! directory. Still images are treated as one-frame animations.
//!
//! ## Quick Start
//!
//! ### Extract Every Frame
//!
//! ```no_run
//! use unreel::ExtractOptions;
//!
//! let report = unreel::extract("input.gif", &ExtractOptions::new()).unwrap();
//! println!(
//!     "Extracted {} frames to {}",
//!     report.total_frames,
//!     report.output_directory.display(),
//! );
//! ```
//!
//! ### Count Frames
//!
//! ```no_run
//! let total = unreel::count_frames("input.gif").unwrap();
//! ```
//!
//! ### Seek Through an Animation
//!
//! ```no_run
//! use unreel::AnimatedImage;
//!
//! let mut image = AnimatedImage::open("input.gif").unwrap();
//! image.seek(3).unwrap();
//! let frame = image.current_frame().unwrap();
//! frame.save("fourth_frame.png").unwrap();
//! ```
//!
//! ## Features
//!
//! - **Frame counting**: seeks to the end of the sequence once
//! - **Uniform output**: every frame is normalised to 8-bit RGBA
//! - **Size-optimised PNGs**: best compression with adaptive filtering by
//!   default, configurable via [`PngCompression`]
//! - **Progress reporting**: [`ProgressCallback`] receives percentage,
//!   throughput estimates, and the file just written
//! - **Probing**: [`AnimationProbe`] reads format, size, and colour type
//!   without holding the file open

pub mod animation;
pub mod configuration;
mod conversion;
pub mod error;
pub mod export;
pub mod extraction;
pub mod metadata;
pub mod output;
pub mod probe;
pub mod progress;

pub use animation::{AnimatedImage, count_frames};
pub use configuration::{ExtractOptions, PngCompression};
pub use error::UnreelError;
pub use export::export_frames;
pub use extraction::{Extraction, ExtractionReport, extract};
pub use metadata::AnimationInfo;
pub use output::{
    DEFAULT_BASE_DIRECTORY, OUTPUT_DIRECTORY_PREFIX, create_output_directory, frame_file_name,
    output_directory_name,
};
pub use probe::AnimationProbe;
pub use progress::{OperationType, ProgressCallback, ProgressInfo};
