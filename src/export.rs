//! Frame export.
//!
//! [`export_frames`] walks an open [`AnimatedImage`] from frame 0 to the end
//! and writes every frame as an RGBA PNG named by [`frame_file_name`].

use std::path::Path;

use crate::{
    animation::AnimatedImage,
    configuration::ExtractOptions,
    conversion::{to_rgba8, write_png},
    error::UnreelError,
    output::frame_file_name,
    progress::{OperationType, ProgressTracker},
};

/// Write frames `0..total_frames` of `image` into `directory`.
///
/// The handle is rewound to frame 0 first. Each frame is converted to RGBA8,
/// written as `frame_<index>.png`, and reported through the progress
/// callback before the handle advances to the next index.
///
/// Returns the number of frames written, always `total_frames` on success.
///
/// # Errors
///
/// Any decode or write failure aborts the export and is returned as-is.
/// Frames already written stay on disk. If the animation turns out shorter
/// than `total_frames`, [`UnreelError::FrameOutOfRange`] is returned.
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
///
/// use unreel::{AnimatedImage, ExtractOptions, UnreelError, export_frames};
///
/// let mut image = AnimatedImage::open("input.gif")?;
/// let total = image.count_frames()?;
/// std::fs::create_dir_all("frames")?;
/// export_frames(&mut image, Path::new("frames"), total, &ExtractOptions::new())?;
/// # Ok::<(), UnreelError>(())
/// ```
pub fn export_frames(
    image: &mut AnimatedImage,
    directory: &Path,
    total_frames: u64,
    options: &ExtractOptions,
) -> Result<u64, UnreelError> {
    log::debug!(
        "Exporting {total_frames} frames to {} ({:?})",
        directory.display(),
        options.compression,
    );

    let mut tracker = ProgressTracker::new(
        options.progress.clone(),
        OperationType::FrameExport,
        Some(total_frames),
        options.batch_size,
    );

    if total_frames > 0 {
        seek_within(image, 0, total_frames)?;
    }

    for frame_index in 0..total_frames {
        let frame = image
            .current_frame()
            .ok_or(UnreelError::FrameOutOfRange {
                frame_index,
                total_frames,
            })?;

        let file_name = frame_file_name(frame_index);
        let path = directory.join(&file_name);
        write_png(&to_rgba8(frame), &path, options.compression)?;
        log::debug!("Saved frame {frame_index} -> {}", path.display());

        tracker.advance(frame_index, Some(file_name));

        if frame_index + 1 < total_frames {
            seek_within(image, frame_index + 1, total_frames)?;
        }
    }
    tracker.finish();

    Ok(total_frames)
}

/// Seek, reporting a premature end of sequence against the expected total.
fn seek_within(
    image: &mut AnimatedImage,
    frame_index: u64,
    total_frames: u64,
) -> Result<(), UnreelError> {
    image.seek(frame_index).map_err(|error| match error {
        UnreelError::EndOfSequence { frame_index } => UnreelError::FrameOutOfRange {
            frame_index,
            total_frames,
        },
        other => other,
    })
}
