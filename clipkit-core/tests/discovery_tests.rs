// clipkit-core/tests/discovery_tests.rs

use clipkit_core::discovery::find_image_files;
use clipkit_core::{EncoderConfig, images_to_video};
use clipkit_core::error::CoreError;
use std::fs::{self, File};
use std::path::PathBuf;
use tempfile::tempdir;

#[test]
fn test_find_image_files_filters_and_sorts() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let input_dir = dir.path();

    File::create(input_dir.join("frame_010.png"))?;
    File::create(input_dir.join("frame_002.JPG"))?; // Case insensitivity
    File::create(input_dir.join("frame_001.jpeg"))?;
    File::create(input_dir.join("cover.bmp"))?;
    File::create(input_dir.join("notes.txt"))?;
    File::create(input_dir.join("clip.gif"))?;
    fs::create_dir(input_dir.join("nested"))?;
    File::create(input_dir.join("nested").join("frame_000.png"))?; // Not recursive

    let files = find_image_files(input_dir)?;
    let names: Vec<String> = files
        .iter()
        .map(|f| f.file_name().unwrap().to_string_lossy().into_owned())
        .collect();

    assert_eq!(
        names,
        vec!["cover.bmp", "frame_001.jpeg", "frame_002.JPG", "frame_010.png"]
    );

    dir.close()?;
    Ok(())
}

#[test]
fn test_find_image_files_empty() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    File::create(dir.path().join("readme.md"))?;

    match find_image_files(dir.path()) {
        Err(CoreError::NoImagesFound(path)) => assert_eq!(path, dir.path()),
        other => panic!("Unexpected result: {other:?}"),
    }

    dir.close()?;
    Ok(())
}

#[test]
fn test_find_image_files_nonexistent_dir() {
    let missing = PathBuf::from("surely_this_does_not_exist_42_clipkit");
    assert!(find_image_files(&missing).is_err());
}

#[test]
fn test_images_to_video_empty_folder_writes_nothing() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let images = dir.path().join("images");
    fs::create_dir(&images)?;
    let output = dir.path().join("out.mp4");

    let result = images_to_video(&images, &output, 30.0, &EncoderConfig::default());
    assert!(matches!(result, Err(CoreError::NoImagesFound(_))));
    assert!(!output.exists());
    Ok(())
}
