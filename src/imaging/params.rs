//! Parameter types for image operations.
//!
//! These structs describe *what* to do, not *how* to do it. They are the
//! interface between the [`pipeline`](crate::pipeline) (which decides which
//! pictures to touch) and the [`backend`](super::backend) (which does the
//! actual pixel work), so a mock backend can stand in during tests.
//!
//! ## Types
//!
//! - [`Quality`] — Lossy encoding quality (0–100, default 90). Clamped on construction.
//! - [`ResizeParams`] — Encoded source bytes, bounding box and quality for one picture.

use serde::{Deserialize, Serialize};

/// Quality setting for image encoding (0-100).
///
/// Every way of building one (CLI flag, config file, code) goes through
/// [`Quality::new`], so an out-of-range value can never be stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "i64", into = "i64")]
pub struct Quality(u8);

impl Quality {
    pub fn new(value: i64) -> Self {
        Self(value.clamp(0, 100) as u8)
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl Default for Quality {
    fn default() -> Self {
        Self(90)
    }
}

impl From<i64> for Quality {
    fn from(value: i64) -> Self {
        Self::new(value)
    }
}

impl From<Quality> for i64 {
    fn from(quality: Quality) -> Self {
        quality.0 as i64
    }
}

/// Parameters for resizing one embedded picture.
///
/// `width`/`height` describe a bounding box: the picture is scaled to fit
/// inside it with its aspect ratio preserved.
#[derive(Debug, Clone, PartialEq)]
pub struct ResizeParams<'a> {
    pub data: &'a [u8],
    pub width: u32,
    pub height: u32,
    pub quality: Quality,
}
