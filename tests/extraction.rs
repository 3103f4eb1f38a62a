//! End-to-end extraction tests.

mod common;

use image::{ColorType, ImageFormat, Rgba};
use unreel::{
    AnimatedImage, ExtractOptions, Extraction, OUTPUT_DIRECTORY_PREFIX, PngCompression,
    UnreelError, export_frames, frame_file_name,
};

use common::{
    PALETTE, dominant_channel, file_names, write_gif, write_grey_png, write_indexed_apng,
    write_webp,
};

#[test]
fn extracts_every_frame_in_order() {
    let workspace = tempfile::tempdir().expect("Failed to create temp dir");
    let source = workspace.path().join("spin.gif");
    write_gif(&source, 6, 10, 10);

    let options = ExtractOptions::new().with_base_directory(workspace.path().join("gif_frames"));
    let report = unreel::extract(&source, &options).expect("Failed to extract");

    assert_eq!(report.total_frames, 6);
    assert!(report.output_directory.starts_with(workspace.path().join("gif_frames")));

    let expected: Vec<String> = (0..6).map(frame_file_name).collect();
    assert_eq!(file_names(&report.output_directory), expected);

    for (index, name) in expected.iter().enumerate() {
        let frame = image::open(report.output_directory.join(name)).expect("Failed to decode");
        assert_eq!(frame.color(), ColorType::Rgba8, "{name} should be RGBA");
        assert_eq!((frame.width(), frame.height()), (10, 10));
        let pixel = *frame.to_rgba8().get_pixel(5, 5);
        assert_eq!(dominant_channel(&pixel), index % 3, "{name} has the wrong colour");
    }
}

#[test]
fn output_directory_is_timestamped() {
    let workspace = tempfile::tempdir().expect("Failed to create temp dir");
    let source = workspace.path().join("spin.gif");
    write_gif(&source, 2, 4, 4);

    let options = ExtractOptions::new().with_base_directory(workspace.path());
    let extraction = Extraction::prepare(&source, options).expect("Failed to prepare");

    let name = extraction
        .output_directory()
        .file_name()
        .expect("Directory has a name")
        .to_string_lossy()
        .into_owned();
    let timestamp = name
        .strip_prefix(OUTPUT_DIRECTORY_PREFIX)
        .expect("Directory name has the prefix");
    assert_eq!(timestamp.len(), "YYYYMMDD_HHMMSS".len());
    assert_eq!(timestamp.as_bytes()[8], b'_');
    assert!(
        timestamp
            .chars()
            .enumerate()
            .all(|(position, c)| position == 8 || c.is_ascii_digit())
    );

    // The directory exists before any frame is written.
    assert!(extraction.output_directory().is_dir());
    assert!(file_names(extraction.output_directory()).is_empty());
    assert_eq!(extraction.info().file_name, "spin.gif");

    let report = extraction.run().expect("Failed to run");
    assert_eq!(file_names(&report.output_directory).len(), 2);
}

#[test]
fn still_image_yields_one_rgba_frame() {
    let workspace = tempfile::tempdir().expect("Failed to create temp dir");
    let source = workspace.path().join("still.png");
    write_grey_png(&source, 7, 3);

    let options = ExtractOptions::new()
        .with_base_directory(workspace.path().join("out"))
        .with_compression(PngCompression::Fast);
    let report = unreel::extract(&source, &options).expect("Failed to extract");

    assert_eq!(report.total_frames, 1);
    assert_eq!(file_names(&report.output_directory), vec!["frame_0000.png"]);

    let frame = image::open(report.output_directory.join("frame_0000.png"))
        .expect("Failed to decode");
    assert_eq!(frame.color(), ColorType::Rgba8);
    assert_eq!(frame.to_rgba8().get_pixel(0, 0).0, [128, 128, 128, 255]);
}

#[test]
fn indexed_apng_frames_gain_alpha() {
    let workspace = tempfile::tempdir().expect("Failed to create temp dir");
    let source = workspace.path().join("palette.png");
    write_indexed_apng(&source, 3, 5, 4);

    let options = ExtractOptions::new().with_base_directory(workspace.path().join("out"));
    let report = unreel::extract(&source, &options).expect("Failed to extract");

    assert_eq!(report.info.format, ImageFormat::Png);
    assert!(report.info.animated);
    assert!(!report.info.color_type.has_alpha());
    assert_eq!(report.total_frames, 3);

    let expected: Vec<String> = (0..3).map(frame_file_name).collect();
    assert_eq!(file_names(&report.output_directory), expected);

    for (name, [r, g, b]) in expected.iter().zip(PALETTE) {
        let frame = image::open(report.output_directory.join(name)).expect("Failed to decode");
        assert_eq!(frame.color(), ColorType::Rgba8, "{name} should be RGBA");
        assert_eq!((frame.width(), frame.height()), (5, 4));
        assert!(
            frame
                .to_rgba8()
                .pixels()
                .all(|pixel| pixel.0 == [r, g, b, 255]),
            "{name} should be opaque {:?}",
            [r, g, b]
        );
    }
}

#[test]
fn still_webp_yields_one_rgba_frame() {
    let workspace = tempfile::tempdir().expect("Failed to create temp dir");
    let source = workspace.path().join("still.webp");
    write_webp(&source, 6, 2, Rgba([10, 200, 30, 255]));

    let info = unreel::AnimationProbe::probe(&source).expect("Failed to probe");
    assert_eq!(info.format, ImageFormat::WebP);
    assert!(!info.animated);

    let options = ExtractOptions::new().with_base_directory(workspace.path().join("out"));
    let report = unreel::extract(&source, &options).expect("Failed to extract");

    assert_eq!(report.total_frames, 1);
    assert_eq!(file_names(&report.output_directory), vec!["frame_0000.png"]);

    let frame = image::open(report.output_directory.join("frame_0000.png"))
        .expect("Failed to decode");
    assert_eq!(frame.color(), ColorType::Rgba8);
    assert_eq!((frame.width(), frame.height()), (6, 2));
    assert_eq!(frame.to_rgba8().get_pixel(3, 1).0, [10, 200, 30, 255]);
}

#[test]
fn export_with_overstated_total_fails() {
    let workspace = tempfile::tempdir().expect("Failed to create temp dir");
    let source = workspace.path().join("spin.gif");
    write_gif(&source, 2, 4, 4);

    let mut image = AnimatedImage::open(&source).expect("Failed to open fixture");
    let result = export_frames(&mut image, workspace.path(), 3, &ExtractOptions::new());

    match result {
        Err(UnreelError::FrameOutOfRange {
            frame_index,
            total_frames,
        }) => {
            assert_eq!(frame_index, 2);
            assert_eq!(total_frames, 3);
        }
        other => panic!("Expected FrameOutOfRange, got: {other:?}"),
    }

    // Frames written before the failure stay on disk.
    assert!(workspace.path().join("frame_0001.png").exists());
}

#[test]
fn export_into_missing_directory_fails() {
    let workspace = tempfile::tempdir().expect("Failed to create temp dir");
    let source = workspace.path().join("spin.gif");
    write_gif(&source, 2, 4, 4);

    let mut image = AnimatedImage::open(&source).expect("Failed to open fixture");
    let total = image.count_frames().expect("Failed to count");
    let error = export_frames(
        &mut image,
        &workspace.path().join("absent"),
        total,
        &ExtractOptions::new(),
    )
    .expect_err("Expected write failure");

    assert!(matches!(error, UnreelError::FrameWrite { .. }));
    assert!(!error.is_not_found());
}

#[test]
fn report_timing() {
    let workspace = tempfile::tempdir().expect("Failed to create temp dir");
    let source = workspace.path().join("spin.gif");
    write_gif(&source, 4, 4, 4);

    let options = ExtractOptions::new().with_base_directory(workspace.path());
    let report = unreel::extract(&source, &options).expect("Failed to extract");

    assert!(report.elapsed > std::time::Duration::ZERO);
    assert!(report.average_per_frame() <= report.elapsed);
}
