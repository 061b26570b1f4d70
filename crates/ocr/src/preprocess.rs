use image::{DynamicImage, GrayImage, ImageBuffer, Luma};
use std::io::Cursor;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PreprocessError {
    #[error("invalid image: {0}")]
    InvalidImage(#[from] image::ImageError),
    #[error("failed to encode processed image: {0}")]
    Encode(String),
}

/// Width every scan is normalized to before recognition. Small captures are
/// upscaled — unlike the storage resizer in `upload`, which never enlarges.
const TARGET_WIDTH: u32 = 2000;

/// Fixed binarization cut-off on the 0–255 intensity scale.
const BINARY_THRESHOLD: u8 = 120;

const BOOST_SCALE: f32 = 1.5;
const BOOST_OFFSET: f32 = -20.0;

/// Sharpening kernel applied after the contrast boost.
const SHARPEN_KERNEL: [f32; 9] = [0.0, -1.0, 0.0, -1.0, 5.0, -1.0, 0.0, -1.0, 0.0];

/// Process raw image bytes (JPEG / PNG / WEBP / …) into thresholded PNG
/// bytes ready for the recognition engine.
///
/// The pipeline is fixed: resize to [`TARGET_WIDTH`], grayscale, contrast
/// stretch, linear boost, sharpen, binarize, PNG-encode. A buffer that does
/// not decode as an image is the caller's error, not ours — surfaced as
/// [`PreprocessError::InvalidImage`] and never retried.
pub fn prepare_for_recognition(data: &[u8]) -> Result<Vec<u8>, PreprocessError> {
    let img = image::load_from_memory(data)?;
    let img = resize_to_width(img, TARGET_WIDTH);
    let gray = stretch_contrast(img.to_luma8());
    let gray = linear_boost(&gray, BOOST_SCALE, BOOST_OFFSET);
    let gray = image::imageops::filter3x3(&gray, &SHARPEN_KERNEL);
    let gray = binarize(&gray, BINARY_THRESHOLD);
    encode_as_png(DynamicImage::ImageLuma8(gray))
}

fn resize_to_width(img: DynamicImage, width: u32) -> DynamicImage {
    if img.width() == width {
        return img;
    }
    let height = ((img.height() as u64 * width as u64) / img.width() as u64).max(1) as u32;
    img.resize_exact(width, height, image::imageops::FilterType::Lanczos3)
}

/// Stretch the intensity histogram to the full 0–255 range.
fn stretch_contrast(gray: GrayImage) -> GrayImage {
    let (min_px, max_px) = gray
        .pixels()
        .fold((255u8, 0u8), |(mn, mx), p| (mn.min(p[0]), mx.max(p[0])));

    if max_px == min_px {
        // Uniform image — nothing to stretch.
        return gray;
    }

    let range = (max_px - min_px) as u32;
    ImageBuffer::from_fn(gray.width(), gray.height(), |x, y| {
        let p = gray.get_pixel(x, y)[0];
        Luma([((p - min_px) as u32 * 255 / range) as u8])
    })
}

/// v' = clamp(scale·v + offset) — lifts faint print out of paper noise.
fn linear_boost(gray: &GrayImage, scale: f32, offset: f32) -> GrayImage {
    ImageBuffer::from_fn(gray.width(), gray.height(), |x, y| {
        let v = gray.get_pixel(x, y)[0] as f32;
        Luma([(v * scale + offset).clamp(0.0, 255.0) as u8])
    })
}

/// Collapse to pure black/white at a fixed threshold.
fn binarize(gray: &GrayImage, threshold: u8) -> GrayImage {
    ImageBuffer::from_fn(gray.width(), gray.height(), |x, y| {
        Luma([if gray.get_pixel(x, y)[0] >= threshold { 255 } else { 0 }])
    })
}

fn encode_as_png(img: DynamicImage) -> Result<Vec<u8>, PreprocessError> {
    let mut buf = Vec::new();
    img.write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .map_err(|e| PreprocessError::Encode(e.to_string()))?;
    Ok(buf)
}
