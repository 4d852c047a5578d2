//! Shared test utilities: synthetic images, tagged MP3 fixtures and a
//! logger that remembers what it was told.

use crate::logger::Logger;
use id3::frame::{Picture, PictureType};
use id3::{Tag, TagLike, Version};
use image::{ImageEncoder, RgbImage, RgbaImage};
use std::path::Path;
use std::sync::Mutex;

// =========================================================================
// Images
// =========================================================================

/// Encode a gradient JPEG with the given dimensions.
pub fn jpeg_bytes(width: u32, height: u32) -> Vec<u8> {
    let img = RgbImage::from_fn(width, height, |x, y| {
        image::Rgb([(x % 256) as u8, (y % 256) as u8, 128])
    });
    let mut buf = Vec::new();
    image::codecs::jpeg::JpegEncoder::new_with_quality(&mut buf, 95)
        .write_image(img.as_raw(), width, height, image::ExtendedColorType::Rgb8)
        .unwrap();
    buf
}

/// Encode a half-transparent PNG with the given dimensions.
pub fn png_rgba_bytes(width: u32, height: u32) -> Vec<u8> {
    let img = RgbaImage::from_fn(width, height, |x, y| {
        image::Rgba([(x % 256) as u8, (y % 256) as u8, 64, 128])
    });
    let mut buf = Vec::new();
    image::codecs::png::PngEncoder::new(&mut buf)
        .write_image(img.as_raw(), width, height, image::ExtendedColorType::Rgba8)
        .unwrap();
    buf
}

// =========================================================================
// MP3 fixtures
// =========================================================================

/// A few MPEG-1 Layer III frame headers followed by silence.
fn audio_payload() -> Vec<u8> {
    let mut data = Vec::new();
    for _ in 0..4 {
        data.extend_from_slice(&[0xFF, 0xFB, 0x90, 0x64]);
        data.extend_from_slice(&[0u8; 413]);
    }
    data
}

pub fn picture(picture_type: PictureType, data: &[u8]) -> Picture {
    Picture {
        mime_type: "image/jpeg".to_string(),
        picture_type,
        description: String::new(),
        data: data.to_vec(),
    }
}

/// Write an audio file without any tag.
pub fn write_untagged_mp3(path: &Path) {
    std::fs::write(path, audio_payload()).unwrap();
}

/// Write an audio file carrying an ID3v2.4 tag with the given pictures.
pub fn write_mp3(path: &Path, pictures: &[Picture]) {
    write_untagged_mp3(path);
    let mut tag = Tag::new();
    tag.set_title("Fixture");
    for picture in pictures {
        tag.add_frame(picture.clone());
    }
    tag.write_to_path(path, Version::Id3v24).unwrap();
}

/// Pictures currently stored in the file's tag.
pub fn read_pictures(path: &Path) -> Vec<Picture> {
    Tag::read_from_path(path)
        .unwrap()
        .pictures()
        .cloned()
        .collect()
}

// =========================================================================
// Logging
// =========================================================================

/// Logger that keeps every message, split by level.
#[derive(Default)]
pub struct RecordingLogger {
    infos: Mutex<Vec<String>>,
    errors: Mutex<Vec<String>>,
}

impl RecordingLogger {
    pub fn infos(&self) -> Vec<String> {
        self.infos.lock().unwrap().clone()
    }

    pub fn errors(&self) -> Vec<String> {
        self.errors.lock().unwrap().clone()
    }
}

impl Logger for RecordingLogger {
    fn info(&self, message: &str) {
        self.infos.lock().unwrap().push(message.to_string());
    }

    fn error(&self, message: &str) {
        self.errors.lock().unwrap().push(message.to_string());
    }
}
