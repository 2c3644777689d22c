use image::{GrayImage, Luma};
use std::path::{Path, PathBuf};

/// Writes a uniform grayscale JPEG and returns its path.
pub fn uniform_jpeg(dir: &Path, name: &str, width: u32, height: u32, value: u8) -> PathBuf {
    assert!(width > 0 && height > 0, "image dimensions must be positive");

    let path = dir.join(name);
    GrayImage::from_pixel(width, height, Luma([value]))
        .save(&path)
        .expect("failed to write synthetic jpeg");
    path
}

/// Writes an empty file with a JPEG name.
pub fn empty_jpeg(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, b"").expect("failed to write empty file");
    path
}

/// Names of the regular files directly inside `dir`, sorted.
pub fn file_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .expect("failed to list directory")
        .filter_map(|e| e.ok())
        .filter(|e| e.path().is_file())
        .map(|e| e.file_name().to_string_lossy().to_string())
        .collect();
    names.sort();
    names
}
