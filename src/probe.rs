//! Lightweight image file probing.
//!
//! [`AnimationProbe`] reads metadata from an image file without keeping the
//! decoder open. Use [`AnimatedImage::open`](crate::AnimatedImage::open) when
//! frames are needed.

use std::path::Path;

use crate::animation::AnimatedImage;
use crate::error::UnreelError;
use crate::metadata::AnimationInfo;

/// Lightweight image file probe.
///
/// Opens the file, captures its [`AnimationInfo`], and closes it again.
///
/// # Example
///
/// ```no_run
/// use unreel::AnimationProbe;
///
/// let info = AnimationProbe::probe("input.gif")?;
/// println!("{info}");
/// # Ok::<(), unreel::UnreelError>(())
/// ```
pub struct AnimationProbe;

impl AnimationProbe {
    /// Probe an image file and return its metadata.
    ///
    /// # Errors
    ///
    /// Returns [`UnreelError::FileNotFound`] for a missing path and the same
    /// errors as [`AnimatedImage::open`] otherwise.
    pub fn probe<P: AsRef<Path>>(path: P) -> Result<AnimationInfo, UnreelError> {
        let image = AnimatedImage::open(path)?;
        Ok(image.info().clone())
    }

    /// Probe multiple image files.
    ///
    /// Files that cannot be probed produce an `Err` entry rather than
    /// aborting the batch.
    pub fn probe_many<P: AsRef<Path>>(paths: &[P]) -> Vec<Result<AnimationInfo, UnreelError>> {
        paths.iter().map(Self::probe).collect()
    }
}
