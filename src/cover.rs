//! Cover override: an image file next to the audio file that replaces the
//! embedded pictures.
//!
//! Resolution is a plain existence check. A missing file is the normal
//! case, not an error, so [`resolve`] returns an `Option`.

use crate::imaging::{BackendError, ImageBackend};
use id3::frame::{Picture, PictureType};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoverError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Image(#[from] BackendError),
}

/// A cover image file found next to an audio file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverrideSource {
    pub path: PathBuf,
}

/// Look for `file_name` in the directory that contains `audio_path`.
///
/// Only regular files count; a directory with a matching name does not.
pub fn resolve(audio_path: &Path, file_name: &str) -> Option<OverrideSource> {
    let dir = audio_path.parent()?;
    let candidate = dir.join(file_name);
    candidate.is_file().then_some(OverrideSource { path: candidate })
}

/// Read the override image and wrap it as a front cover picture.
///
/// The bytes are identified before use so an unreadable or non-image file
/// fails here rather than as a resize error later.
pub fn load(source: &OverrideSource, backend: &impl ImageBackend) -> Result<Picture, CoverError> {
    let data = fs::read(&source.path)?;
    let (format, _) = backend.identify(&data)?;
    Ok(Picture {
        mime_type: format.to_mime_type().to_string(),
        picture_type: PictureType::CoverFront,
        description: String::new(),
        data,
    })
}
