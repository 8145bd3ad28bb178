//! Image discovery for building a video from an image sequence.
//!
//! Searches only the top level of the given folder. Files are returned sorted
//! by file name, which is the frame order of the assembled video.

use crate::error::{CoreError, CoreResult};
use crate::utils::is_image_file;

use std::path::{Path, PathBuf};

/// Finds image files (png, jpg, jpeg, bmp) in the specified directory.
///
/// # Returns
///
/// * `Ok(Vec<PathBuf>)` - The image paths, sorted by file name
/// * `Err(CoreError::Io)` - If the directory cannot be read
/// * `Err(CoreError::NoImagesFound)` - If the directory holds no images
///
/// # Examples
///
/// ```rust,no_run
/// use clipkit_core::find_image_files;
/// use std::path::Path;
///
/// match find_image_files(Path::new("/path/to/frames")) {
///     Ok(files) => println!("Found {} images", files.len()),
///     Err(e) => println!("Error finding images: {}", e),
/// }
/// ```
pub fn find_image_files(image_dir: &Path) -> CoreResult<Vec<PathBuf>> {
    let read_dir = std::fs::read_dir(image_dir)?;
    let mut files: Vec<PathBuf> = read_dir
        .filter_map(|entry| {
            let path = entry.ok()?.path();
            is_image_file(&path).then_some(path)
        })
        .collect();

    if files.is_empty() {
        return Err(CoreError::NoImagesFound(image_dir.to_path_buf()));
    }

    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    log::debug!("Found {} image(s) in {}", files.len(), image_dir.display());
    Ok(files)
}
