//! Error types for the `unreel` crate.
//!
//! This module defines [`UnreelError`], the unified error type returned by all
//! fallible operations in the crate. Errors carry the path or frame index
//! involved so the caller can report them without extra logging.

use std::{
    io::{Error as IoError, ErrorKind},
    path::{Path, PathBuf},
};

use image::ImageError;
use thiserror::Error;

/// The unified error type for all `unreel` operations.
///
/// Every public method that can fail returns `Result<T, UnreelError>`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum UnreelError {
    /// The source path does not resolve to a readable file.
    #[error("File not found: {path}")]
    FileNotFound {
        /// Path that was requested.
        path: PathBuf,
    },

    /// The source file exists but could not be opened.
    #[error("Failed to open image file at {path}: {reason}")]
    FileOpen {
        /// Path that was passed to [`crate::AnimatedImage::open`].
        path: PathBuf,
        /// Underlying reason the open failed.
        reason: String,
    },

    /// The file is not in a format the decoder recognises.
    #[error("Unsupported image format: {0}")]
    UnsupportedFormat(String),

    /// Frame data could not be decoded.
    #[error("Failed to decode frame: {0}")]
    DecodeError(String),

    /// The decoder has no frame at the requested index.
    ///
    /// Frame counting relies on this variant to detect the end of an
    /// animation; it is not a failure in that context.
    #[error("No frame at index {frame_index}: end of sequence")]
    EndOfSequence {
        /// The frame index that was requested.
        frame_index: u64,
    },

    /// The requested frame index exceeds a known total frame count.
    #[error("Frame {frame_index} is out of range (animation has {total_frames} frames)")]
    FrameOutOfRange {
        /// The frame index that was requested.
        frame_index: u64,
        /// The total number of frames in the animation.
        total_frames: u64,
    },

    /// An extracted frame could not be written to disk.
    #[error("Failed to write frame to {path}: {reason}")]
    FrameWrite {
        /// Destination file.
        path: PathBuf,
        /// Underlying reason the write failed.
        reason: String,
    },

    /// An I/O error occurred while reading or writing files.
    #[error("I/O error: {0}")]
    IoError(#[from] IoError),

    /// An error from the `image` crate during decoding or encoding.
    #[error("Image processing error: {0}")]
    ImageError(#[from] ImageError),
}

impl UnreelError {
    /// Returns `true` when the error means the source file does not exist.
    ///
    /// Every other variant is a generic failure from the caller's point of
    /// view.
    pub fn is_not_found(&self) -> bool {
        match self {
            UnreelError::FileNotFound { .. } => true,
            UnreelError::IoError(error) => error.kind() == ErrorKind::NotFound,
            _ => false,
        }
    }

    /// Classify an I/O error raised while opening `path`.
    pub(crate) fn from_open_error(path: &Path, error: IoError) -> Self {
        if error.kind() == ErrorKind::NotFound {
            UnreelError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            UnreelError::FileOpen {
                path: path.to_path_buf(),
                reason: error.to_string(),
            }
        }
    }
}
