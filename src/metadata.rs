//! Animation metadata.
//!
//! [`AnimationInfo`] is captured when an [`AnimatedImage`](crate::AnimatedImage)
//! is opened and describes the source before any frame is decoded.

use std::fmt::{Display, Formatter, Result as FmtResult};
use std::path::PathBuf;

use image::{ColorType, ImageFormat};

/// Metadata for an animated (or still) image file.
///
/// # Example
///
/// ```no_run
/// use unreel::AnimationProbe;
///
/// let info = AnimationProbe::probe("input.gif")?;
/// println!("{}x{} {}", info.width, info.height, info.format_name());
/// # Ok::<(), unreel::UnreelError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
#[must_use]
pub struct AnimationInfo {
    /// Container format detected from the file contents (or its extension).
    pub format: ImageFormat,
    /// Canvas width in pixels.
    pub width: u32,
    /// Canvas height in pixels.
    pub height: u32,
    /// Colour type the decoder reports for the source.
    ///
    /// Palette sources are reported with the type the decoder expands them
    /// to (`Rgb8` or `Rgba8`), never as an indexed mode.
    pub color_type: ColorType,
    /// Whether the decoder exposes more than a single still image.
    pub animated: bool,
    /// Final path component of the source, for display.
    pub file_name: String,
    /// Path the source was opened from.
    pub path: PathBuf,
}

impl AnimationInfo {
    /// Upper-case format name, e.g. `"GIF"` or `"WEBP"`.
    pub fn format_name(&self) -> String {
        self.format
            .extensions_str()
            .first()
            .map(|extension| extension.to_ascii_uppercase())
            .unwrap_or_else(|| format!("{:?}", self.format).to_ascii_uppercase())
    }

    /// Colour mode name, e.g. `"Rgba8"`.
    ///
    /// This is the [`Debug`] name of [`color_type`](Self::color_type), so an
    /// indexed GIF or PNG shows its expanded mode.
    pub fn color_mode(&self) -> String {
        format!("{:?}", self.color_type)
    }
}

impl Display for AnimationInfo {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        writeln!(f, "Format: {}", self.format_name())?;
        writeln!(f, "Size: {}x{} pixels", self.width, self.height)?;
        writeln!(f, "Mode: {}", self.color_mode())?;
        write!(f, "Input file: {}", self.file_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_lines() {
        let info = AnimationInfo {
            format: ImageFormat::Gif,
            width: 32,
            height: 16,
            color_type: ColorType::Rgba8,
            animated: true,
            file_name: "spin.gif".to_string(),
            path: PathBuf::from("assets/spin.gif"),
        };

        let rendered = info.to_string();
        assert!(rendered.contains("Format: GIF"));
        assert!(rendered.contains("Size: 32x16 pixels"));
        assert!(rendered.contains("Mode: Rgba8"));
        assert!(rendered.ends_with("Input file: spin.gif"));
    }
}
