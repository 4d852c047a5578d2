//! Image processing backend trait and shared types.
//!
//! The [`ImageBackend`] trait defines the two operations the pipeline needs:
//! identify (read dimensions from encoded bytes) and resize (decode, fit,
//! re-encode). Both work on in-memory buffers because covers live inside
//! ID3 frames, never as standalone files.
//!
//! The production implementation is
//! [`RustBackend`](super::rust_backend::RustBackend), built on the `image`
//! crate and statically linked into the binary.

use super::params::ResizeParams;
use image::ImageFormat;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("Could not decode image: {0}")]
    Decode(String),
    #[error("Could not encode image: {0}")]
    Encode(String),
}

/// Result of an identify operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl std::fmt::Display for Dimensions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// A re-encoded picture.
#[derive(Debug, Clone, PartialEq)]
pub struct ResizedImage {
    pub data: Vec<u8>,
    /// Container format, always the one detected on the input.
    pub format: ImageFormat,
    pub dimensions: Dimensions,
}

/// Trait for image processing backends.
pub trait ImageBackend {
    /// Detect format and dimensions of an encoded image.
    fn identify(&self, data: &[u8]) -> Result<(ImageFormat, Dimensions), BackendError>;

    /// Fit the image into the bounding box and re-encode it in its own format.
    fn resize(&self, params: &ResizeParams<'_>) -> Result<ResizedImage, BackendError>;
}
