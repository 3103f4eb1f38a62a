//! The decode handle over an animated image file.
//!
//! [`AnimatedImage`] opens a GIF, APNG, or animated WebP and exposes it as a
//! sequence of frames addressed by index. Any other image the `image` crate
//! can decode is exposed as a one-frame sequence.
//!
//! The handle owns the open file. Dropping it closes the file, so keeping
//! its use inside a block guarantees release on every exit path, including
//! early returns through `?`.
//!
//! # Example
//!
//! ```no_run
//! use unreel::{AnimatedImage, UnreelError};
//!
//! let total = {
//!     let mut image = AnimatedImage::open("input.gif")?;
//!     image.count_frames()?
//! }; // file closed here
//! println!("{total} frames");
//! # Ok::<(), UnreelError>(())
//! ```

use std::{
    fmt::{Debug, Formatter, Result as FmtResult},
    fs::File,
    io::BufReader,
    iter::Fuse,
    path::{Path, PathBuf},
};

use image::{
    AnimationDecoder, ColorType, DynamicImage, Frames, ImageDecoder, ImageError, ImageFormat,
    ImageReader,
    codecs::{gif::GifDecoder, png::PngDecoder, webp::WebPDecoder},
};

use crate::{
    configuration::ExtractOptions,
    error::UnreelError,
    metadata::AnimationInfo,
    progress::{OperationType, ProgressTracker},
};

type SourceReader = BufReader<File>;

/// Where decoded frames come from.
enum FrameSource {
    /// A multi-frame decoder. Frames arrive composited onto the full canvas.
    Animated(Fuse<Frames<'static>>),
    /// A single still image, handed out once.
    Still(Option<DynamicImage>),
}

impl FrameSource {
    fn animated(frames: Frames<'static>) -> Self {
        FrameSource::Animated(frames.fuse())
    }

    /// Decode the next frame, or `None` once the sequence is exhausted.
    fn next_frame(&mut self) -> Result<Option<DynamicImage>, UnreelError> {
        match self {
            FrameSource::Animated(frames) => match frames.next() {
                Some(Ok(frame)) => Ok(Some(DynamicImage::ImageRgba8(frame.into_buffer()))),
                Some(Err(error)) => Err(classify_image_error(error)),
                None => Ok(None),
            },
            FrameSource::Still(image) => Ok(image.take()),
        }
    }
}

/// Decoder output gathered at open time.
struct OpenedSource {
    source: FrameSource,
    width: u32,
    height: u32,
    color_type: ColorType,
    animated: bool,
}

impl OpenedSource {
    fn from_decoder<D: ImageDecoder>(decoder: &D, source: FrameSource, animated: bool) -> Self {
        let (width, height) = decoder.dimensions();
        Self {
            source,
            width,
            height,
            color_type: decoder.color_type(),
            animated,
        }
    }

    fn still(image: DynamicImage) -> Self {
        Self {
            width: image.width(),
            height: image.height(),
            color_type: image.color(),
            animated: false,
            source: FrameSource::Still(Some(image)),
        }
    }
}

/// An open, seekable decode handle over an animated image file.
///
/// Frames are addressed by a zero-based index. Seeking forward decodes
/// frames one at a time; seeking backward reopens the file and decodes
/// forward from the start, since the underlying decoders only stream.
pub struct AnimatedImage {
    path: PathBuf,
    info: AnimationInfo,
    source: FrameSource,
    /// Index of the frame held in `current`, `None` before the first seek.
    position: Option<u64>,
    current: Option<DynamicImage>,
}

impl Debug for AnimatedImage {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("AnimatedImage")
            .field("path", &self.path)
            .field("info", &self.info)
            .field("position", &self.position)
            .finish_non_exhaustive()
    }
}

impl AnimatedImage {
    /// Open an image file for frame extraction.
    ///
    /// The format is detected from the file contents, falling back to the
    /// extension. No frame is selected until [`seek`](AnimatedImage::seek)
    /// is called.
    ///
    /// # Errors
    ///
    /// Returns [`UnreelError::FileNotFound`] if the path does not exist,
    /// [`UnreelError::FileOpen`] if it cannot be read,
    /// [`UnreelError::UnsupportedFormat`] if no decoder recognises it, and
    /// [`UnreelError::DecodeError`] if the header is corrupt.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, UnreelError> {
        let path = path.as_ref();
        log::debug!("Opening image file: {}", path.display());

        let format = detect_format(path)?;
        let opened = open_source(path, format)?;

        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        let info = AnimationInfo {
            format,
            width: opened.width,
            height: opened.height,
            color_type: opened.color_type,
            animated: opened.animated,
            file_name,
            path: path.to_path_buf(),
        };

        log::debug!(
            "Opened {} ({:?}, {}x{}, {:?}, animated={})",
            path.display(),
            info.format,
            info.width,
            info.height,
            info.color_type,
            info.animated,
        );

        Ok(Self {
            path: path.to_path_buf(),
            info,
            source: opened.source,
            position: None,
            current: None,
        })
    }

    /// Metadata captured when the file was opened.
    pub fn info(&self) -> &AnimationInfo {
        &self.info
    }

    /// Index of the currently selected frame, if any.
    pub fn position(&self) -> Option<u64> {
        self.position
    }

    /// The currently selected frame in the decoder's pixel format.
    ///
    /// Returns `None` before the first successful [`seek`](AnimatedImage::seek).
    pub fn current_frame(&self) -> Option<&DynamicImage> {
        self.current.as_ref()
    }

    /// Select the frame at `frame_index` as current.
    ///
    /// # Errors
    ///
    /// Returns [`UnreelError::EndOfSequence`] when the animation has no frame
    /// at that index. The previously selected frame stays current in that
    /// case.
    pub fn seek(&mut self, frame_index: u64) -> Result<(), UnreelError> {
        match self.position {
            Some(position) if position == frame_index => return Ok(()),
            Some(position) if position > frame_index => self.rewind()?,
            _ => {}
        }

        while self.position.is_none_or(|position| position < frame_index) {
            match self.source.next_frame()? {
                Some(frame) => {
                    self.position = Some(self.position.map_or(0, |position| position + 1));
                    self.current = Some(frame);
                }
                None => return Err(UnreelError::EndOfSequence { frame_index }),
            }
        }

        Ok(())
    }

    /// Count the frames by seeking forward until the end of the sequence,
    /// then rewind to frame 0.
    ///
    /// # Errors
    ///
    /// Returns [`UnreelError::DecodeError`] if a frame is corrupt or the file
    /// contains no frames at all.
    pub fn count_frames(&mut self) -> Result<u64, UnreelError> {
        self.count_frames_with_options(&ExtractOptions::default())
    }

    /// Count the frames, reporting each one found through the configured
    /// progress callback.
    pub fn count_frames_with_options(
        &mut self,
        options: &ExtractOptions,
    ) -> Result<u64, UnreelError> {
        let mut tracker = ProgressTracker::new(
            options.progress.clone(),
            OperationType::FrameCounting,
            None,
            options.batch_size,
        );

        let mut total_frames = 0;
        loop {
            match self.seek(total_frames) {
                Ok(()) => {
                    tracker.advance(total_frames, None);
                    total_frames += 1;
                }
                Err(UnreelError::EndOfSequence { .. }) => break,
                Err(error) => return Err(error),
            }
        }
        tracker.finish();

        if total_frames == 0 {
            return Err(UnreelError::DecodeError(format!(
                "{} contains no frames",
                self.path.display()
            )));
        }

        log::debug!("Counted {total_frames} frames in {}", self.path.display());
        self.seek(0)?;
        Ok(total_frames)
    }

    /// Reopen the file so decoding restarts from frame 0.
    fn rewind(&mut self) -> Result<(), UnreelError> {
        log::debug!("Rewinding {}", self.path.display());
        self.source = open_source(&self.path, self.info.format)?.source;
        self.position = None;
        self.current = None;
        Ok(())
    }
}

impl Drop for AnimatedImage {
    fn drop(&mut self) {
        log::debug!("Closing image file: {}", self.path.display());
    }
}

/// Count the frames of the animation at `path`.
///
/// Opens its own handle and closes it before returning.
pub fn count_frames<P: AsRef<Path>>(path: P) -> Result<u64, UnreelError> {
    let mut image = AnimatedImage::open(path)?;
    image.count_frames()
}

fn open_reader(path: &Path) -> Result<SourceReader, UnreelError> {
    File::open(path)
        .map(BufReader::new)
        .map_err(|error| UnreelError::from_open_error(path, error))
}

fn detect_format(path: &Path) -> Result<ImageFormat, UnreelError> {
    let reader = ImageReader::new(open_reader(path)?).with_guessed_format()?;
    reader
        .format()
        .or_else(|| ImageFormat::from_path(path).ok())
        .ok_or_else(|| {
            UnreelError::UnsupportedFormat(format!(
                "cannot determine the format of {}",
                path.display()
            ))
        })
}

fn open_source(path: &Path, format: ImageFormat) -> Result<OpenedSource, UnreelError> {
    match format {
        ImageFormat::Gif => {
            let decoder = GifDecoder::new(open_reader(path)?).map_err(classify_image_error)?;
            let mut opened = OpenedSource::from_decoder(&decoder, FrameSource::Still(None), true);
            opened.source = FrameSource::animated(decoder.into_frames());
            Ok(opened)
        }
        ImageFormat::Png => {
            let decoder = PngDecoder::new(open_reader(path)?).map_err(classify_image_error)?;
            if decoder.is_apng().map_err(classify_image_error)? {
                let mut opened =
                    OpenedSource::from_decoder(&decoder, FrameSource::Still(None), true);
                let apng = decoder.apng().map_err(classify_image_error)?;
                opened.source = FrameSource::animated(apng.into_frames());
                Ok(opened)
            } else {
                let image = DynamicImage::from_decoder(decoder).map_err(classify_image_error)?;
                Ok(OpenedSource::still(image))
            }
        }
        ImageFormat::WebP => {
            let decoder = WebPDecoder::new(open_reader(path)?).map_err(classify_image_error)?;
            if decoder.has_animation() {
                let mut opened =
                    OpenedSource::from_decoder(&decoder, FrameSource::Still(None), true);
                opened.source = FrameSource::animated(decoder.into_frames());
                Ok(opened)
            } else {
                let image = DynamicImage::from_decoder(decoder).map_err(classify_image_error)?;
                Ok(OpenedSource::still(image))
            }
        }
        other => {
            let image = ImageReader::with_format(open_reader(path)?, other)
                .decode()
                .map_err(classify_image_error)?;
            Ok(OpenedSource::still(image))
        }
    }
}

/// Sort decoder errors into the crate's error kinds.
fn classify_image_error(error: ImageError) -> UnreelError {
    match error {
        ImageError::Unsupported(error) => UnreelError::UnsupportedFormat(error.to_string()),
        ImageError::IoError(error) => UnreelError::IoError(error),
        other => UnreelError::DecodeError(other.to_string()),
    }
}
