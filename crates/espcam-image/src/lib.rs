//! JPEG decoding and encoding for camera frames.
//!
//! Frames are `Tensor<u8>` in HWC layout `[height, width, 3]`, RGB.

pub mod error;

pub use error::ImageError;

use crates_image::{DynamicImage, ImageEncoder, ImageFormat};
use espcam_base::Tensor;
use std::path::Path;

/// Default quality for frames written to disk.
pub const DEFAULT_JPEG_QUALITY: u8 = 90;

/// Decodes JPEG bytes into an RGB frame.
///
/// Grayscale and CMYK JPEGs are converted to RGB so every frame leaving this
/// function has three channels.
///
/// # Errors
///
/// Returns `ImageError::Decode` if the bytes are not a complete JPEG image.
pub fn decode_frame(data: &[u8]) -> Result<Tensor<u8>, ImageError> {
    let img = crates_image::load_from_memory_with_format(data, ImageFormat::Jpeg)?;
    let rgb = match img {
        DynamicImage::ImageRgb8(buf) => buf,
        other => other.to_rgb8(),
    };
    let (width, height) = rgb.dimensions();
    Ok(Tensor::new(
        vec![height as usize, width as usize, 3],
        rgb.into_raw(),
    )?)
}

/// Encodes an RGB frame as JPEG bytes.
///
/// # Errors
///
/// `ImageError::NotRgb` if the frame is not `[H, W, 3]`, `ImageError::Encode`
/// if the encoder fails.
pub fn encode_jpeg(frame: &Tensor<u8>, quality: u8) -> Result<Vec<u8>, ImageError> {
    let Some((height, width, 3)) = frame.hwc() else {
        return Err(ImageError::NotRgb(frame.shape.clone()));
    };

    let mut buffer = Vec::new();
    crates_image::codecs::jpeg::JpegEncoder::new_with_quality(&mut buffer, quality.clamp(1, 100))
        .write_image(
            &frame.data,
            width as u32,
            height as u32,
            crates_image::ExtendedColorType::Rgb8,
        )
        .map_err(|e| ImageError::Encode(e.to_string()))?;

    Ok(buffer)
}

/// Encodes a frame and writes it to `path`, creating parent directories.
pub fn save_jpeg(frame: &Tensor<u8>, path: &Path, quality: u8) -> Result<(), ImageError> {
    let bytes = encode_jpeg(frame, quality)?;
    let write_err = |source| ImageError::Write {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(write_err)?;
    }
    std::fs::write(path, bytes).map_err(write_err)
}
