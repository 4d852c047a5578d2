//! Per-file cover processing.
//!
//! [`process_file`] runs one audio file through a fixed sequence:
//!
//! ```text
//! open tag → cover override (optional) → resize every picture → write tag
//! ```
//!
//! Each step after the open is a function over `&mut Tag`, so the steps can
//! be tested without touching the filesystem. Failures are returned as
//! values: a picture that fails to resize becomes a failed
//! [`PictureOutcome`] and keeps its original bytes, while anything that
//! stops the file as a whole is a [`FileError`]. Logging and the decision to
//! carry on belong to the caller ([`batch`](crate::batch)).
//!
//! Each file is held through one read-write [`AudioFile`] handle from the
//! tag read until write-back. The handle is dropped on every exit path.

use crate::config::ResizeConfig;
use crate::cover::{self, CoverError};
use crate::imaging::{BackendError, Dimensions, ImageBackend, ResizeParams};
use crate::tags::{self, AudioFile};
use id3::Tag;
use id3::TagLike;
use id3::frame::PictureType;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FileError {
    #[error("Could not open {path} for read-write access: {source}")]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("File does not have an ID3v2 tag. No cover available.")]
    TagMissing,
    #[error("Could not read ID3v2 tag: {0}")]
    TagRead(#[source] id3::Error),
    #[error("Could not write ID3v2 tag: {0}")]
    TagWrite(#[source] id3::Error),
    #[error("Could not load cover override {path}: {source}")]
    OverrideLoad { path: PathBuf, source: CoverError },
}

/// Result of resizing one picture slot.
#[derive(Debug)]
pub struct PictureOutcome {
    /// Position among the tag's pictures, 0-based.
    pub index: usize,
    pub picture_type: PictureType,
    /// New dimensions, or why the picture was left as it was.
    pub result: Result<Dimensions, BackendError>,
}

/// What happened to a file that was written back.
#[derive(Debug, Default)]
pub struct FileSummary {
    /// Override image that replaced the embedded pictures, if one was used.
    pub cover_override: Option<PathBuf>,
    pub pictures: Vec<PictureOutcome>,
}

impl FileSummary {
    pub fn resized_count(&self) -> usize {
        self.pictures.iter().filter(|p| p.result.is_ok()).count()
    }

    pub fn failed_count(&self) -> usize {
        self.pictures.iter().filter(|p| p.result.is_err()).count()
    }
}

/// Resize the covers of one audio file and write its tag back.
///
/// The tag is written whenever it could be read, even if some pictures
/// failed; those keep their original bytes.
pub fn process_file(
    path: &Path,
    config: &ResizeConfig,
    backend: &impl ImageBackend,
) -> Result<FileSummary, FileError> {
    process_audio_file(AudioFile::open(path)?, config, backend)
}

/// [`process_file`] on a file that is already open. The handle is held
/// from the tag read until write-back and dropped on return.
pub fn process_audio_file(
    mut file: AudioFile,
    config: &ResizeConfig,
    backend: &impl ImageBackend,
) -> Result<FileSummary, FileError> {
    let mut tag = file.read_tag()?;

    let cover_override = if config.cover.override_from_file {
        apply_cover_override(&mut tag, file.path(), &config.cover.file_name, backend)?
    } else {
        None
    };

    let pictures = resize_pictures(&mut tag, config, backend);
    file.write_tag(&tag)?;

    Ok(FileSummary {
        cover_override,
        pictures,
    })
}

/// Replace all pictures in `tag` with the override image, if there is one.
///
/// The existing pictures are removed before the override is loaded, so a
/// load failure leaves `tag` with no pictures at all. [`process_file`]
/// stops before writing in that case, which keeps the file on disk intact.
pub fn apply_cover_override(
    tag: &mut Tag,
    audio_path: &Path,
    file_name: &str,
    backend: &impl ImageBackend,
) -> Result<Option<PathBuf>, FileError> {
    let Some(source) = cover::resolve(audio_path, file_name) else {
        return Ok(None);
    };

    tag.remove_all_pictures();
    let picture = cover::load(&source, backend).map_err(|e| FileError::OverrideLoad {
        path: source.path.clone(),
        source: e,
    })?;
    tag.add_frame(picture);

    Ok(Some(source.path))
}

/// Resize every picture in `tag` in place.
///
/// Pictures are independent: a failure is recorded in that picture's
/// outcome and the loop moves on.
pub fn resize_pictures(
    tag: &mut Tag,
    config: &ResizeConfig,
    backend: &impl ImageBackend,
) -> Vec<PictureOutcome> {
    let mut pictures = tags::pictures(tag);
    let mut outcomes = Vec::with_capacity(pictures.len());

    for (index, picture) in pictures.iter_mut().enumerate() {
        let params = ResizeParams {
            data: &picture.data,
            width: config.width,
            height: config.height,
            quality: config.quality,
        };
        let result = match backend.resize(&params) {
            Ok(resized) => {
                picture.mime_type = resized.format.to_mime_type().to_string();
                picture.data = resized.data;
                Ok(resized.dimensions)
            }
            Err(e) => Err(e),
        };
        outcomes.push(PictureOutcome {
            index,
            picture_type: picture.picture_type,
            result,
        });
    }

    tags::replace_pictures(tag, pictures);
    outcomes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imaging::backend::tests::{CORRUPT, MockBackend, RecordedOp};
    use crate::imaging::{Quality, RustBackend};
    use crate::test_helpers::{
        jpeg_bytes, picture, read_pictures, write_mp3, write_untagged_mp3,
    };
    use std::fs;
    use tempfile::TempDir;

    fn override_config() -> ResizeConfig {
        let mut config = ResizeConfig::default();
        config.cover.override_from_file = true;
        config
    }

    // =========================================================================
    // Step functions on an in-memory tag
    // =========================================================================

    #[test]
    fn resize_pictures_uses_configured_box_and_quality() {
        let mut tag = Tag::new();
        tag.add_frame(picture(PictureType::CoverFront, b"front"));
        let config = ResizeConfig {
            width: 320,
            height: 240,
            quality: Quality::new(120),
            ..Default::default()
        };
        let backend = MockBackend::new();

        let outcomes = resize_pictures(&mut tag, &config, &backend);

        assert_eq!(outcomes.len(), 1);
        assert!(outcomes[0].result.is_ok());
        assert_eq!(
            backend.get_operations(),
            vec![RecordedOp::Resize {
                data: b"front".to_vec(),
                width: 320,
                height: 240,
                quality: 100,
            }]
        );
        assert_eq!(tags::pictures(&tag)[0].data, b"resized:front");
    }

    #[test]
    fn resize_pictures_continues_after_failure() {
        let mut tag = Tag::new();
        tag.add_frame(picture(PictureType::CoverFront, CORRUPT));
        tag.add_frame(picture(PictureType::CoverBack, b"back"));
        let backend = MockBackend::new();

        let outcomes = resize_pictures(&mut tag, &ResizeConfig::default(), &backend);

        assert_eq!(backend.resize_count(), 2);
        assert!(outcomes[0].result.is_err());
        assert_eq!(outcomes[0].picture_type, PictureType::CoverFront);
        assert!(outcomes[1].result.is_ok());

        let pics = tags::pictures(&tag);
        assert_eq!(pics[0].data, CORRUPT, "failed picture keeps its bytes");
        assert_eq!(pics[1].data, b"resized:back");
    }

    #[test]
    fn resize_pictures_on_tag_without_pictures() {
        let mut tag = Tag::new();
        let backend = MockBackend::new();
        assert!(resize_pictures(&mut tag, &ResizeConfig::default(), &backend).is_empty());
        assert!(backend.get_operations().is_empty());
    }

    #[test]
    fn apply_override_without_file_keeps_pictures() {
        let tmp = TempDir::new().unwrap();
        let mut tag = Tag::new();
        tag.add_frame(picture(PictureType::CoverFront, b"front"));

        let used = apply_cover_override(
            &mut tag,
            &tmp.path().join("track.mp3"),
            "cover.jpg",
            &MockBackend::new(),
        )
        .unwrap();

        assert_eq!(used, None);
        assert_eq!(tags::pictures(&tag).len(), 1);
    }

    #[test]
    fn apply_override_replaces_all_pictures_with_one() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("cover.jpg"), b"override").unwrap();
        let mut tag = Tag::new();
        tag.add_frame(picture(PictureType::CoverFront, b"front"));
        tag.add_frame(picture(PictureType::CoverBack, b"back"));

        let used = apply_cover_override(
            &mut tag,
            &tmp.path().join("track.mp3"),
            "cover.jpg",
            &MockBackend::new(),
        )
        .unwrap();

        assert_eq!(used, Some(tmp.path().join("cover.jpg")));
        let pics = tags::pictures(&tag);
        assert_eq!(pics.len(), 1);
        assert_eq!(pics[0].data, b"override");
        assert_eq!(pics[0].picture_type, PictureType::CoverFront);
    }

    #[test]
    fn apply_override_load_failure_leaves_tag_without_pictures() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("cover.jpg"), CORRUPT).unwrap();
        let mut tag = Tag::new();
        tag.add_frame(picture(PictureType::CoverFront, b"front"));

        let result = apply_cover_override(
            &mut tag,
            &tmp.path().join("track.mp3"),
            "cover.jpg",
            &MockBackend::new(),
        );

        assert!(matches!(result, Err(FileError::OverrideLoad { .. })));
        assert!(tags::pictures(&tag).is_empty());
    }

    // =========================================================================
    // process_file against files on disk
    // =========================================================================

    #[test]
    fn process_file_rewrites_pictures() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("track.mp3");
        write_mp3(
            &path,
            &[
                picture(PictureType::CoverFront, &jpeg_bytes(800, 600)),
                picture(PictureType::CoverBack, &jpeg_bytes(300, 900)),
            ],
        );

        let summary = process_file(&path, &ResizeConfig::default(), &RustBackend::new()).unwrap();

        assert_eq!(summary.resized_count(), 2);
        assert_eq!(summary.failed_count(), 0);
        let dims: Vec<(u32, u32)> = read_pictures(&path)
            .iter()
            .map(|p| {
                let img = image::load_from_memory(&p.data).unwrap();
                (img.width(), img.height())
            })
            .collect();
        assert_eq!(dims, vec![(500, 375), (167, 500)]);
    }

    #[test]
    fn process_file_without_tag_does_not_write() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("bare.mp3");
        write_untagged_mp3(&path);
        let before = fs::read(&path).unwrap();

        let result = process_file(&path, &ResizeConfig::default(), &MockBackend::new());

        assert!(matches!(result, Err(FileError::TagMissing)));
        assert_eq!(fs::read(&path).unwrap(), before);
    }

    #[test]
    fn process_file_keeps_failed_picture_and_writes_the_rest() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("track.mp3");
        write_mp3(
            &path,
            &[
                picture(PictureType::CoverFront, b"garbage bytes"),
                picture(PictureType::CoverBack, &jpeg_bytes(1000, 1000)),
            ],
        );

        let summary = process_file(&path, &ResizeConfig::default(), &RustBackend::new()).unwrap();

        assert_eq!(summary.resized_count(), 1);
        assert_eq!(summary.failed_count(), 1);
        let pics = read_pictures(&path);
        assert_eq!(pics[0].data, b"garbage bytes");
        let back = image::load_from_memory(&pics[1].data).unwrap();
        assert_eq!((back.width(), back.height()), (500, 500));
    }

    #[test]
    fn process_file_with_override() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("track.mp3");
        write_mp3(
            &path,
            &[
                picture(PictureType::CoverFront, &jpeg_bytes(50, 50)),
                picture(PictureType::Media, &jpeg_bytes(60, 60)),
            ],
        );
        fs::write(tmp.path().join("cover.jpg"), jpeg_bytes(1200, 600)).unwrap();

        let summary = process_file(&path, &override_config(), &RustBackend::new()).unwrap();

        assert_eq!(summary.cover_override, Some(tmp.path().join("cover.jpg")));
        let pics = read_pictures(&path);
        assert_eq!(pics.len(), 1);
        assert_eq!(pics[0].picture_type, PictureType::CoverFront);
        let img = image::load_from_memory(&pics[0].data).unwrap();
        assert_eq!((img.width(), img.height()), (500, 250));
    }

    #[test]
    fn process_file_corrupt_override_leaves_file_untouched() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("track.mp3");
        write_mp3(&path, &[picture(PictureType::CoverFront, &jpeg_bytes(40, 40))]);
        fs::write(tmp.path().join("cover.jpg"), b"corrupt").unwrap();
        let before = fs::read(&path).unwrap();

        let result = process_file(&path, &override_config(), &RustBackend::new());

        assert!(matches!(result, Err(FileError::OverrideLoad { .. })));
        assert_eq!(fs::read(&path).unwrap(), before);
    }

    #[test]
    fn process_audio_file_write_failure_is_tag_write_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("track.mp3");
        write_mp3(&path, &[picture(PictureType::CoverFront, b"front")]);
        let before = fs::read(&path).unwrap();
        let read_only = AudioFile::from_handle(&path, fs::File::open(&path).unwrap());
        let backend = MockBackend::new();

        let result = process_audio_file(read_only, &ResizeConfig::default(), &backend);

        assert!(matches!(result, Err(FileError::TagWrite(_))));
        assert_eq!(backend.resize_count(), 1, "pictures were resized before the write");
        assert_eq!(fs::read(&path).unwrap(), before);
    }

    #[test]
    fn file_error_messages() {
        assert_eq!(
            FileError::TagMissing.to_string(),
            "File does not have an ID3v2 tag. No cover available."
        );
    }
}
