//! Pure Rust image processing backend.
//!
//! Everything is statically linked into the binary.
//!
//! ## Crate mapping
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Format detection | `image::guess_format` (magic bytes, not the APIC MIME string) |
//! | Decode (JPEG, PNG, GIF, BMP, TIFF, WebP) | `image` crate decoders |
//! | Resize | `DynamicImage::resize_exact` with `Lanczos3`, dimensions from [`calculate_fit_dimensions`] |
//! | Encode → JPEG | `JpegEncoder::new_with_quality` |
//! | Encode → PNG | `PngEncoder::new_with_quality`, quality picks the compression tier |
//! | Encode → other | `DynamicImage::write_to` (lossless) |

use super::backend::{BackendError, Dimensions, ImageBackend, ResizedImage};
use super::calculations::calculate_fit_dimensions;
use super::params::{Quality, ResizeParams};
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::{CompressionType, FilterType as PngFilterType, PngEncoder};
use image::imageops::FilterType;
use image::{DynamicImage, ImageFormat, ImageReader};
use std::io::Cursor;

/// Pure Rust backend using the `image` crate ecosystem.
///
/// See the [module docs](self) for the crate-to-operation mapping.
pub struct RustBackend;

impl RustBackend {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RustBackend {
    fn default() -> Self {
        Self::new()
    }
}

fn detect_format(data: &[u8]) -> Result<ImageFormat, BackendError> {
    image::guess_format(data).map_err(|e| BackendError::Decode(e.to_string()))
}

fn decode(data: &[u8], format: ImageFormat) -> Result<DynamicImage, BackendError> {
    image::load_from_memory_with_format(data, format)
        .map_err(|e| BackendError::Decode(format!("{format:?}: {e}")))
}

/// The JPEG encoder's quality scale starts at 1.
fn jpeg_quality(quality: Quality) -> u8 {
    quality.value().max(1)
}

/// PNG is lossless, so quality selects zlib effort the way `quality / 10`
/// selects the zlib level in other tools.
fn png_compression(quality: Quality) -> CompressionType {
    match quality.value() / 10 {
        0..=3 => CompressionType::Fast,
        4..=7 => CompressionType::Default,
        _ => CompressionType::Best,
    }
}

/// Encode into the given container format.
fn encode(img: &DynamicImage, format: ImageFormat, quality: Quality) -> Result<Vec<u8>, BackendError> {
    let mut buf = Vec::new();
    let result = match format {
        ImageFormat::Jpeg => {
            let encoder = JpegEncoder::new_with_quality(&mut buf, jpeg_quality(quality));
            img.write_with_encoder(encoder)
        }
        ImageFormat::Png => {
            let encoder = PngEncoder::new_with_quality(
                &mut buf,
                png_compression(quality),
                PngFilterType::Adaptive,
            );
            img.write_with_encoder(encoder)
        }
        other => img.write_to(&mut Cursor::new(&mut buf), other),
    };
    result.map_err(|e| BackendError::Encode(format!("{format:?}: {e}")))?;
    Ok(buf)
}

impl ImageBackend for RustBackend {
    fn identify(&self, data: &[u8]) -> Result<(ImageFormat, Dimensions), BackendError> {
        let reader = ImageReader::new(Cursor::new(data))
            .with_guessed_format()
            .map_err(|e| BackendError::Decode(e.to_string()))?;
        let format = reader
            .format()
            .ok_or_else(|| BackendError::Decode("Unrecognized image format".into()))?;
        let (width, height) = reader
            .into_dimensions()
            .map_err(|e| BackendError::Decode(format!("{format:?}: {e}")))?;
        Ok((format, Dimensions { width, height }))
    }

    fn resize(&self, params: &ResizeParams<'_>) -> Result<ResizedImage, BackendError> {
        let format = detect_format(params.data)?;
        let img = decode(params.data, format)?;

        let (width, height) =
            calculate_fit_dimensions((img.width(), img.height()), (params.width, params.height));
        let resized = img.resize_exact(width, height, FilterType::Lanczos3);

        let data = encode(&resized, format, params.quality)?;
        Ok(ResizedImage {
            data,
            format,
            dimensions: Dimensions { width, height },
        })
    }
}
