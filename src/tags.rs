//! ID3v2 tag access on top of the `id3` crate.
//!
//! Only what the pipeline needs: open a file read-write and read its ID3v2
//! tag, snapshot and replace its pictures, and write the tag back. Frames
//! other than APIC/PIC are carried through untouched.

use crate::pipeline::FileError;
use id3::frame::Picture;
use id3::{ErrorKind, Tag, TagLike, Version};
use std::fs::{File, OpenOptions};
use std::io::Seek;
use std::path::{Path, PathBuf};

/// An audio file held open read-write from the tag read until write-back.
///
/// The handle is released when the value is dropped, on every exit path of
/// the caller.
pub struct AudioFile {
    path: PathBuf,
    file: File,
}

impl AudioFile {
    /// Open `path` for reading and writing.
    ///
    /// Fails fast on read-only files, before any image work is spent on them.
    pub fn open(path: &Path) -> Result<Self, FileError> {
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .open(path)
            .map_err(|source| FileError::Open {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(Self::from_handle(path, file))
    }

    /// Wrap a handle that is already open on `path`.
    pub fn from_handle(path: &Path, file: File) -> Self {
        Self {
            path: path.to_path_buf(),
            file,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the ID3v2 tag. ID3v1-only files report [`FileError::TagMissing`].
    pub fn read_tag(&mut self) -> Result<Tag, FileError> {
        self.file
            .rewind()
            .map_err(|e| FileError::TagRead(e.into()))?;
        match Tag::read_from2(&mut self.file) {
            Ok(tag) => Ok(tag),
            Err(e) if matches!(e.kind, ErrorKind::NoTag) => Err(FileError::TagMissing),
            Err(e) => Err(FileError::TagRead(e)),
        }
    }

    /// Write the tag back through the same handle, replacing the file's
    /// existing tag as a whole.
    pub fn write_tag(&mut self, tag: &Tag) -> Result<(), FileError> {
        self.file
            .rewind()
            .map_err(|e| FileError::TagWrite(e.into()))?;
        tag.write_to_file(&mut self.file, write_version(tag))
            .map_err(FileError::TagWrite)
    }
}

/// Snapshot of the tag's pictures, in frame order.
pub fn pictures(tag: &Tag) -> Vec<Picture> {
    tag.pictures().cloned().collect()
}

/// Swap every picture frame in the tag for `pictures`, keeping their order.
pub fn replace_pictures(tag: &mut Tag, pictures: Vec<Picture>) {
    tag.remove_all_pictures();
    for picture in pictures {
        tag.add_frame(picture);
    }
}

/// Version a tag is written back as. There is no ID3v2.2 writer, so those
/// tags are upgraded to v2.3, the closest format players still read.
fn write_version(tag: &Tag) -> Version {
    match tag.version() {
        Version::Id3v22 => Version::Id3v23,
        other => other,
    }
}
