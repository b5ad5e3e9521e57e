#![allow(dead_code)]

use image::{ImageFormat, Rgb, RgbImage, Rgba, RgbaImage};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Writes a gradient image so the encoder has real detail to work on.
pub fn create_image(dir: &Path, name: &str, width: u32, height: u32) -> PathBuf {
    let path = dir.join(name);
    let format = ImageFormat::from_path(&path).unwrap();
    let img = RgbImage::from_fn(width, height, |x, y| {
        Rgb([
            (x * 255 / width.max(1)) as u8,
            (y * 255 / height.max(1)) as u8,
            ((x ^ y) % 256) as u8,
        ])
    });
    img.save_with_format(&path, format).unwrap();
    path
}

pub fn create_transparent_png(dir: &Path, name: &str, width: u32, height: u32) -> PathBuf {
    let path = dir.join(name);
    let img = RgbaImage::from_fn(width, height, |x, y| {
        Rgba([(x % 256) as u8, (y % 256) as u8, 128, ((x + y) % 256) as u8])
    });
    img.save_with_format(&path, ImageFormat::Png).unwrap();
    path
}

pub fn create_fake_image(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    File::create(&path)
        .unwrap()
        .write_all(b"fake image data")
        .unwrap();
    path
}

/// `a.jpg`, `b.png` and a stray `c.txt`.
pub fn create_mixed_directory(dir: &Path) -> Vec<PathBuf> {
    let a = create_image(dir, "a.jpg", 64, 48);
    let b = create_image(dir, "b.png", 40, 40);
    File::create(dir.join("c.txt"))
        .unwrap()
        .write_all(b"not an image")
        .unwrap();
    vec![a, b]
}

pub fn create_temp_directory() -> TempDir {
    TempDir::new().unwrap()
}

pub fn webp_files_in(dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<_> = std::fs::read_dir(dir)
        .unwrap()
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.extension().map_or(false, |ext| ext == "webp"))
        .collect();
    files.sort();
    files
}
