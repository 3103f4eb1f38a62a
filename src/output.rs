//! Output directory and frame file naming.
//!
//! Each run writes into `<base>/gif_frames_<YYYYMMDD_HHMMSS>`, and each frame
//! into `frame_<index>.png` with the index zero-padded to four digits so the
//! files sort in frame order.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;

use crate::error::UnreelError;

/// Base directory used when none is configured.
pub const DEFAULT_BASE_DIRECTORY: &str = "gif_frames";

/// Prefix of every timestamped output directory.
pub const OUTPUT_DIRECTORY_PREFIX: &str = "gif_frames_";

/// Extension of every written frame file.
pub const FRAME_FILE_EXTENSION: &str = "png";

const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Name of the output directory for a run started at `timestamp`.
///
/// Second resolution: two runs started in the same second share a name.
pub fn output_directory_name(timestamp: NaiveDateTime) -> String {
    format!("{OUTPUT_DIRECTORY_PREFIX}{}", timestamp.format(TIMESTAMP_FORMAT))
}

/// Create (if needed) and return `<base>/gif_frames_<timestamp>`.
///
/// An existing directory is reused as-is.
pub fn create_output_directory(
    base_directory: &Path,
    timestamp: NaiveDateTime,
) -> Result<PathBuf, UnreelError> {
    let directory = base_directory.join(output_directory_name(timestamp));
    fs::create_dir_all(&directory)?;
    log::debug!("Created output directory {}", directory.display());
    Ok(directory)
}

/// File name for the frame at `frame_index`, e.g. `frame_0007.png`.
pub fn frame_file_name(frame_index: u64) -> String {
    format!("frame_{frame_index:04}.{FRAME_FILE_EXTENSION}")
}
