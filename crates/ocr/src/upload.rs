use image::DynamicImage;
use std::io::Cursor;

use crate::preprocess::PreprocessError;

/// Default cap for stored receipt photos.
pub const DEFAULT_MAX_WIDTH: u32 = 1600;

const JPEG_QUALITY: u8 = 80;

/// Downscale an uploaded photo for storage and re-encode it as JPEG.
///
/// Never upscales: a capture narrower than `max_width` keeps its original
/// dimensions. The OCR preprocessor is the one path that is allowed to
/// enlarge images.
pub fn resize_for_storage(data: &[u8], max_width: u32) -> Result<Vec<u8>, PreprocessError> {
    let img = image::load_from_memory(data)?;
    let img = if img.width() > max_width {
        let height = ((img.height() as u64 * max_width as u64) / img.width() as u64).max(1) as u32;
        img.resize_exact(max_width, height, image::imageops::FilterType::Lanczos3)
    } else {
        img
    };
    encode_as_jpeg(&img)
}

fn encode_as_jpeg(img: &DynamicImage) -> Result<Vec<u8>, PreprocessError> {
    // JPEG has no alpha; flatten to RGB first.
    let rgb = img.to_rgb8();
    let mut buf = Vec::new();
    image::codecs::jpeg::JpegEncoder::new_with_quality(Cursor::new(&mut buf), JPEG_QUALITY)
        .encode(rgb.as_raw(), rgb.width(), rgb.height(), image::ExtendedColorType::Rgb8)
        .map_err(|e| PreprocessError::Encode(e.to_string()))?;
    Ok(buf)
}
