//! Parameter types for pixel transforms and encoding.
//!
//! The transforms themselves are pure functions; everything they are allowed
//! to vary on arrives through these types, built once from the loaded config
//! and passed into each call.
//!
//! ## Types
//!
//! - [`Quality`] — JPEG encoding quality (1–100, default 95). Clamped on construction.
//! - [`Rgb8`] — An 8-bit color triple in the buffer's native channel order.
//! - [`DuotoneParams`] — The two colors blended by grayscale intensity.
//! - [`MonochromeParams`] — The constant written to the first channel.
//! - [`TransformParams`] — Bundle of the above, one per processing call.

use serde::{Deserialize, Serialize};

/// Quality setting for lossy image encoding (1-100).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quality(pub u8);

impl Quality {
    pub fn new(value: u32) -> Self {
        Self(value.clamp(1, 100) as u8)
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl Default for Quality {
    fn default() -> Self {
        Self(95)
    }
}

/// An 8-bit color triple, serialized as `[c0, c1, c2]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "[u8; 3]", into = "[u8; 3]")]
pub struct Rgb8(pub [u8; 3]);

impl From<[u8; 3]> for Rgb8 {
    fn from(channels: [u8; 3]) -> Self {
        Self(channels)
    }
}

impl From<Rgb8> for [u8; 3] {
    fn from(color: Rgb8) -> Self {
        color.0
    }
}

/// Colors for the duotone blend.
///
/// `color_a` wins as gray intensity rises, `color_b` is what pure black maps to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DuotoneParams {
    pub color_a: Rgb8,
    pub color_b: Rgb8,
}

impl Default for DuotoneParams {
    fn default() -> Self {
        Self {
            color_a: Rgb8([255, 0, 0]),
            color_b: Rgb8([0, 255, 255]),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonochromeParams {
    pub hue: u8,
}

impl Default for MonochromeParams {
    fn default() -> Self {
        Self { hue: 128 }
    }
}

/// Per-call parameters for the transforms that take any.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TransformParams {
    pub duotone: DuotoneParams,
    pub monochrome: MonochromeParams,
}
