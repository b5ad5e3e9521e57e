use crate::constants::{BYTES_PER_KB, DEFAULT_QUALITY, OUTPUT_EXTENSION};
use crate::error::{CompressionError, Result};
use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView, ImageReader};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompressionConfig {
    pub quality: u8,
    pub resize_factor: Option<f64>,
}

impl Default for CompressionConfig {
    fn default() -> Self {
        Self {
            quality: DEFAULT_QUALITY,
            resize_factor: None,
        }
    }
}

impl CompressionConfig {
    /// Builds the run configuration, rejecting resize factors outside `(0, 1]`.
    ///
    /// Quality is not range-checked here; the WebP encoder validates it.
    pub fn new(quality: u8, resize_factor: Option<f64>) -> Result<Self> {
        if let Some(factor) = resize_factor {
            if !(factor > 0.0 && factor <= 1.0) {
                return Err(CompressionError::InvalidConfig(format!(
                    "resize factor must be between 0 (exclusive) and 1 (inclusive), got {}",
                    factor
                )));
            }
        }

        Ok(Self {
            quality,
            resize_factor,
        })
    }
}

/// Outcome of compressing one image.
#[derive(Debug, Clone, PartialEq)]
pub struct CompressionResult {
    pub original_path: PathBuf,
    pub original_size_kb: f64,
    pub output_path: PathBuf,
    pub compressed_size_kb: f64,
    pub savings_percent: f64,
    pub original_bytes: u64,
    pub compressed_bytes: u64,
    /// Dimensions of the encoded image.
    pub dimensions: (u32, u32),
    pub resized: bool,
}

impl CompressionResult {
    pub fn from_sizes(
        original_path: PathBuf,
        output_path: PathBuf,
        original_bytes: u64,
        compressed_bytes: u64,
        dimensions: (u32, u32),
        resized: bool,
    ) -> Self {
        Self {
            original_path,
            original_size_kb: bytes_to_kb(original_bytes),
            output_path,
            compressed_size_kb: bytes_to_kb(compressed_bytes),
            savings_percent: savings_percent(original_bytes, compressed_bytes),
            original_bytes,
            compressed_bytes,
            dimensions,
            resized,
        }
    }
}

pub fn bytes_to_kb(bytes: u64) -> f64 {
    bytes as f64 / BYTES_PER_KB
}

/// Relative size reduction in percent. Negative when the output grew.
pub fn savings_percent(original_bytes: u64, compressed_bytes: u64) -> f64 {
    if original_bytes == 0 {
        return 0.0;
    }
    100.0 * (original_bytes as f64 - compressed_bytes as f64) / original_bytes as f64
}

/// Compresses one image into `output_dir` as `<stem>.webp`.
///
/// The output directory must already exist; the batch driver creates it once
/// before the first file. Any failure while reading, resizing, encoding or
/// writing is reported as `CompressionError::Processing` for `input_path`.
pub fn compress(
    input_path: &Path,
    output_dir: &Path,
    config: &CompressionConfig,
) -> Result<CompressionResult> {
    debug!("Compressing {:?}", input_path);

    let original_bytes = fs::metadata(input_path)
        .map_err(|e| CompressionError::processing(input_path, e))?
        .len();
    let mut img = load_image(input_path)?;

    let resized = match config.resize_factor {
        Some(factor) => {
            resize_image(&mut img, factor)
                .map_err(|reason| CompressionError::processing(input_path, reason))?;
            true
        }
        None => false,
    };

    let output_path = output_path_for(input_path, output_dir)?;
    let encoded = encode_webp(&img, config.quality)
        .map_err(|reason| CompressionError::processing(input_path, reason))?;
    fs::write(&output_path, &encoded).map_err(|e| CompressionError::processing(input_path, e))?;

    let compressed_bytes = fs::metadata(&output_path)
        .map_err(|e| CompressionError::processing(input_path, e))?
        .len();

    debug!(
        "Wrote {:?} ({} -> {} bytes)",
        output_path, original_bytes, compressed_bytes
    );

    Ok(CompressionResult::from_sizes(
        input_path.to_path_buf(),
        output_path,
        original_bytes,
        compressed_bytes,
        img.dimensions(),
        resized,
    ))
}

/// Decodes an image, sniffing the format from its content rather than its
/// extension.
pub fn load_image(input_path: &Path) -> Result<DynamicImage> {
    ImageReader::open(input_path)
        .and_then(|reader| reader.with_guessed_format())
        .map_err(|e| CompressionError::processing(input_path, e))?
        .decode()
        .map_err(|e| CompressionError::processing(input_path, e))
}

/// Target size for a uniform scale factor: each side is `floor(side * factor)`.
pub fn scaled_dimensions(width: u32, height: u32, factor: f64) -> (u32, u32) {
    let scale = |side: u32| (f64::from(side) * factor).floor() as u32;
    (scale(width), scale(height))
}

/// Scales both sides of `img` by `factor`. Fails when a side would shrink to 0.
pub fn resize_image(img: &mut DynamicImage, factor: f64) -> std::result::Result<(), String> {
    let (width, height) = img.dimensions();
    let (new_width, new_height) = scaled_dimensions(width, height, factor);

    if new_width == 0 || new_height == 0 {
        return Err(format!(
            "resize factor {} reduces {}x{} to an empty {}x{} image",
            factor, width, height, new_width, new_height
        ));
    }

    if (new_width, new_height) != (width, height) {
        *img = img.resize_exact(new_width, new_height, FilterType::CatmullRom);
    }
    debug!("Resized {}x{} to {}x{}", width, height, new_width, new_height);

    Ok(())
}

/// `<output_dir>/<input stem>.webp`
pub fn output_path_for(input_path: &Path, output_dir: &Path) -> Result<PathBuf> {
    let file_stem = input_path
        .file_stem()
        .ok_or_else(|| CompressionError::processing(input_path, "invalid file name"))?;

    let mut file_name = file_stem.to_os_string();
    file_name.push(".");
    file_name.push(OUTPUT_EXTENSION);
    Ok(output_dir.join(file_name))
}

/// Lossy WebP encode. Images with an alpha channel keep it.
pub fn encode_webp(img: &DynamicImage, quality: u8) -> std::result::Result<Vec<u8>, String> {
    let (width, height) = img.dimensions();
    let quality = f32::from(quality);

    let encoded = if img.color().has_alpha() {
        let rgba = img.to_rgba8();
        webp::Encoder::from_rgba(rgba.as_raw(), width, height).encode_simple(false, quality)
    } else {
        let rgb = img.to_rgb8();
        webp::Encoder::from_rgb(rgb.as_raw(), width, height).encode_simple(false, quality)
    };

    encoded
        .map(|memory| memory.to_vec())
        .map_err(|e| format!("WebP encoding failed: {:?}", e))
}
