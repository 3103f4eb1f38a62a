//! Pixel format normalisation and PNG encoding for extracted frames.

use std::borrow::Cow;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use image::{DynamicImage, RgbaImage, codecs::png::PngEncoder};

use crate::configuration::PngCompression;
use crate::error::UnreelError;

/// View `image` as 8-bit RGBA, converting only when it is stored otherwise.
///
/// Palette, greyscale, RGB, and 16-bit sources all come out with four
/// channels so every written frame has the same layout.
pub(crate) fn to_rgba8(image: &DynamicImage) -> Cow<'_, RgbaImage> {
    match image {
        DynamicImage::ImageRgba8(buffer) => Cow::Borrowed(buffer),
        other => Cow::Owned(other.to_rgba8()),
    }
}

/// Encode `frame` as a PNG file at `path`.
pub(crate) fn write_png(
    frame: &RgbaImage,
    path: &Path,
    compression: PngCompression,
) -> Result<(), UnreelError> {
    let (compression_type, filter_type) = compression.to_png_settings();

    let file = File::create(path).map_err(|error| UnreelError::FrameWrite {
        path: path.to_path_buf(),
        reason: error.to_string(),
    })?;
    let mut writer = BufWriter::new(file);

    let encoder = PngEncoder::new_with_quality(&mut writer, compression_type, filter_type);
    frame
        .write_with_encoder(encoder)
        .map_err(|error| UnreelError::FrameWrite {
            path: path.to_path_buf(),
            reason: error.to_string(),
        })?;

    writer.into_inner().map_err(|error| UnreelError::FrameWrite {
        path: path.to_path_buf(),
        reason: error.error().to_string(),
    })?;
    Ok(())
}
