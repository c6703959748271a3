//! Pixel transforms.
//!
//! Every function here maps a decoded RGB buffer to a new buffer of the same
//! width and height. None of them touch the filesystem or fail: the buffer is
//! assumed valid once it has been decoded.
//!
//! Channels are read and written in the decoder's native order (`[R, G, B]`
//! for `image::RgbImage`). Coefficient tables and colors below are indexed in
//! that same order.
//!
//! | Transform | Output | Notes |
//! |---|---|---|
//! | [`grayscale`] | 1 channel | BT.601 luma, fixed point |
//! | [`edges`] | 1 channel | grayscale, then Canny (100 / 200) |
//! | [`sepia`] | 3 channels | fixed 3×3 matrix, rounded and saturated |
//! | [`duotone`] | 3 channels | `g·A + (1−g)·B` with unnormalized `g` |
//! | [`monochrome`] | 3 channels | `(hue, gray, gray)` |
//! | [`cyanotype`] | 3 channels | `(255, 255−c0, 255−c0)` |

use super::params::{DuotoneParams, MonochromeParams, TransformParams};
use image::{DynamicImage, GrayImage, Luma, Rgb, RgbImage};

/// Lower hysteresis threshold for the edge detector.
pub const EDGE_LOW_THRESHOLD: f32 = 100.0;
/// Upper hysteresis threshold for the edge detector.
pub const EDGE_HIGH_THRESHOLD: f32 = 200.0;

/// Row `i` produces output channel `i` from the input channel vector.
pub const SEPIA_MATRIX: [[f32; 3]; 3] = [
    [0.393, 0.769, 0.189],
    [0.349, 0.686, 0.168],
    [0.272, 0.534, 0.131],
];

/// The pixel transform an operation runs, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transform {
    /// Pure re-encode: the decoded buffer is written back unchanged.
    None,
    Grayscale,
    Edges,
    Sepia,
    Duotone,
    Monochrome,
    Cyanotype,
}

/// Run `transform` over a decoded buffer.
///
/// Consumes the buffer so [`Transform::None`] can hand it straight to the
/// encoder without a copy.
pub fn apply(transform: Transform, image: RgbImage, params: &TransformParams) -> DynamicImage {
    match transform {
        Transform::None => DynamicImage::ImageRgb8(image),
        Transform::Grayscale => DynamicImage::ImageLuma8(grayscale(&image)),
        Transform::Edges => DynamicImage::ImageLuma8(edges(&image)),
        Transform::Sepia => DynamicImage::ImageRgb8(sepia(&image)),
        Transform::Duotone => DynamicImage::ImageRgb8(duotone(&image, &params.duotone)),
        Transform::Monochrome => DynamicImage::ImageRgb8(monochrome(&image, &params.monochrome)),
        Transform::Cyanotype => DynamicImage::ImageRgb8(cyanotype(&image)),
    }
}

/// BT.601 luma of one pixel in 14-bit fixed point.
///
/// The weights sum to exactly `1 << 14`, so a pixel with equal channels maps
/// to that same value.
#[inline]
pub fn luma(Rgb([r, g, b]): Rgb<u8>) -> u8 {
    let y = 4899 * u32::from(r) + 9617 * u32::from(g) + 1868 * u32::from(b);
    ((y + (1 << 13)) >> 14) as u8
}

pub fn grayscale(image: &RgbImage) -> GrayImage {
    GrayImage::from_fn(image.width(), image.height(), |x, y| {
        Luma([luma(*image.get_pixel(x, y))])
    })
}

/// Canny edge map of the grayscale reduction. Pixels are either 0 or 255.
pub fn edges(image: &RgbImage) -> GrayImage {
    imageproc::edges::canny(&grayscale(image), EDGE_LOW_THRESHOLD, EDGE_HIGH_THRESHOLD)
}

pub fn sepia(image: &RgbImage) -> RgbImage {
    map_pixels(image, |Rgb(c)| Rgb(SEPIA_MATRIX.map(|row| weighted_sum(row, c))))
}

/// Blend two colors by gray intensity, with the intensity left in `0..=255`.
///
/// Per channel: `g·a + (1 − g)·b`, saturated to a byte. Black maps to
/// `color_b`; white (and, for strongly contrasting colors, nearly any
/// nonzero gray) maps to `color_a`.
pub fn duotone(image: &RgbImage, params: &DuotoneParams) -> RgbImage {
    let a = params.color_a.0;
    let b = params.color_b.0;
    map_pixels(image, |px| {
        let g = f32::from(luma(px));
        Rgb(std::array::from_fn(|c| {
            let mixed = g * f32::from(a[c]) + (1.0 - g) * f32::from(b[c]);
            mixed.clamp(0.0, 255.0) as u8
        }))
    })
}

pub fn monochrome(image: &RgbImage, params: &MonochromeParams) -> RgbImage {
    map_pixels(image, |px| {
        let g = luma(px);
        Rgb([params.hue, g, g])
    })
}

/// First channel saturated; the other two both carry the complement of the
/// source's first channel.
pub fn cyanotype(image: &RgbImage) -> RgbImage {
    map_pixels(image, |Rgb([c0, _, _])| Rgb([255, 255 - c0, 255 - c0]))
}

fn weighted_sum(row: [f32; 3], c: [u8; 3]) -> u8 {
    let v = row[0] * f32::from(c[0]) + row[1] * f32::from(c[1]) + row[2] * f32::from(c[2]);
    v.round().clamp(0.0, 255.0) as u8
}

fn map_pixels(image: &RgbImage, f: impl Fn(Rgb<u8>) -> Rgb<u8>) -> RgbImage {
    let mut out = image.clone();
    for px in out.pixels_mut() {
        *px = f(*px);
    }
    out
}
