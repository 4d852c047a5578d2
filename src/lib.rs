//! # MP3 Cover Resizer
//!
//! Shrinks (or grows) the album art embedded in the ID3v2 tags of a folder
//! of MP3 files, so every cover fits a common bounding box at a common
//! quality. Optionally, a `cover.jpg` sitting next to the tracks replaces
//! whatever was embedded before it is resized.
//!
//! # Architecture: One File at a Time
//!
//! ```text
//! scan      root/    →  [track paths]     (glob filter, optional recursion)
//! pipeline  track    →  rewritten tag     (override → resize pictures → write)
//! batch     paths    →  BatchReport       (log, continue past failures)
//! ```
//!
//! Files are handled strictly one after another. Each file is opened,
//! rewritten and released before the next one is touched, so nothing is
//! shared between files and no locking is needed.
//!
//! Failures never escape a file. A picture that cannot be decoded keeps its
//! original bytes; a file without an ID3v2 tag is skipped; both are logged
//! and the batch moves on. Only a root directory that cannot be listed
//! stops the run.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`scan`] | Lists the audio files under the root directory |
//! | [`batch`] | Runs the pipeline over every file, logs outcomes, builds the [`batch::BatchReport`] |
//! | [`pipeline`] | Per-file steps: cover override, picture resize, tag write-back |
//! | [`cover`] | Finds and loads the override image next to a track |
//! | [`tags`] | ID3v2 access via the `id3` crate |
//! | [`imaging`] | Fit-within-box resize that keeps each picture's own format |
//! | [`config`] | `ResizeConfig`, TOML loading and validation |
//! | [`logger`] | `Logger` trait with console and null implementations |
//! | [`output`] | End-of-run summary formatting |
//!
//! # Design Decisions
//!
//! ## Keep the Picture's Format
//!
//! A PNG cover stays a PNG and a JPEG stays a JPEG. The format is detected
//! from the bytes rather than trusted from the APIC MIME string, and the
//! MIME string is rewritten to match after resizing.
//!
//! ## Fit, Never Stretch
//!
//! The width and height describe a box. Covers are scaled uniformly until
//! they touch it, which also means small covers are enlarged. Square
//! covers, by far the common case, end up exactly at the box size.
//!
//! ## Pure-Rust Imaging
//!
//! The [`imaging`] module uses the `image` crate (Lanczos3 resampling) for
//! decoding, resizing and encoding. There is no ImageMagick to install.

pub mod batch;
pub mod config;
pub mod cover;
pub mod imaging;
pub mod logger;
pub mod output;
pub mod pipeline;
pub mod scan;
pub mod tags;

#[cfg(test)]
pub(crate) mod test_helpers;
