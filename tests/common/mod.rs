//! Fixture builders shared by the integration tests.
//!
//! Animations are generated on the fly with the `image` crate's encoders so
//! the tests need no checked-in binary files.

#![allow(dead_code)]

use std::{fs::File, io::BufWriter, path::Path};

use image::{
    Delay, Frame, GrayImage, ImageFormat, Luma, Rgba, RgbaImage,
    codecs::gif::{GifEncoder, Repeat},
};

/// Solid colours used for successive fixture frames, cycled as needed.
pub const PALETTE: [[u8; 3]; 3] = [[255, 0, 0], [0, 255, 0], [0, 0, 255]];

/// Write a `width`×`height` GIF with `frame_count` solid-colour frames.
///
/// Frame `i` is filled with `PALETTE[i % 3]`; the left column of every frame
/// is fully transparent.
pub fn write_gif(path: &Path, frame_count: usize, width: u32, height: u32) {
    let file = File::create(path).expect("Failed to create GIF fixture");
    let mut encoder = GifEncoder::new(file);
    encoder
        .set_repeat(Repeat::Infinite)
        .expect("Failed to set GIF repeat");

    let frames = (0..frame_count).map(|index| {
        let [r, g, b] = PALETTE[index % PALETTE.len()];
        let buffer = RgbaImage::from_fn(width, height, |x, _| {
            if x == 0 {
                Rgba([0, 0, 0, 0])
            } else {
                Rgba([r, g, b, 255])
            }
        });
        Frame::from_parts(buffer, 0, 0, Delay::from_numer_denom_ms(100, 1))
    });
    encoder
        .encode_frames(frames)
        .expect("Failed to encode GIF fixture");
}

/// Write a `width`×`height` indexed-colour APNG with `frame_count` frames.
///
/// The palette is `PALETTE`; frame `i` uses palette entry `i % 3` for every
/// pixel, so the source carries no alpha channel at all.
pub fn write_indexed_apng(path: &Path, frame_count: u32, width: u32, height: u32) {
    let file = File::create(path).expect("Failed to create APNG fixture");
    let mut encoder = png::Encoder::new(BufWriter::new(file), width, height);
    encoder.set_color(png::ColorType::Indexed);
    encoder.set_depth(png::BitDepth::Eight);
    encoder.set_palette(PALETTE.concat());
    encoder
        .set_animated(frame_count, 0)
        .expect("Failed to mark PNG as animated");

    let mut writer = encoder.write_header().expect("Failed to write APNG header");
    for index in 0..frame_count {
        let palette_index = (index as usize % PALETTE.len()) as u8;
        let pixels = vec![palette_index; (width * height) as usize];
        writer
            .write_image_data(&pixels)
            .expect("Failed to write APNG frame");
    }
    writer.finish().expect("Failed to finish APNG fixture");
}

/// Write a single lossless WebP still filled with `color`.
pub fn write_webp(path: &Path, width: u32, height: u32, color: Rgba<u8>) {
    RgbaImage::from_pixel(width, height, color)
        .save_with_format(path, ImageFormat::WebP)
        .expect("Failed to write WebP fixture");
}

/// Write a single greyscale PNG still.
pub fn write_grey_png(path: &Path, width: u32, height: u32) {
    GrayImage::from_pixel(width, height, Luma([128]))
        .save(path)
        .expect("Failed to write PNG fixture");
}

/// Index of the strongest colour channel of `pixel`.
pub fn dominant_channel(pixel: &Rgba<u8>) -> usize {
    let [r, g, b, _] = pixel.0;
    if r >= g && r >= b {
        0
    } else if g >= b {
        1
    } else {
        2
    }
}

/// Sorted file names in `directory`.
pub fn file_names(directory: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(directory)
        .expect("Failed to read output directory")
        .map(|entry| {
            entry
                .expect("Failed to read directory entry")
                .file_name()
                .to_string_lossy()
                .into_owned()
        })
        .collect();
    names.sort();
    names
}
