//! Image processing — pure Rust, no system libraries.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Decode** | `image::ImageReader` (content-sniffed) |
//! | **Grayscale, sepia, tints** | hand-written per-pixel maps |
//! | **Edges** | `imageproc::edges::canny` |
//! | **Encode** | `image` encoders, format from the output extension |
//!
//! The module is split into:
//! - **Transforms**: Pure buffer-to-buffer functions (unit testable)
//! - **Parameters**: Per-call knobs for the transforms and the encoder
//! - **Backend**: [`ImageBackend`] trait + [`RustBackend`]

pub mod backend;
pub mod params;
pub mod rust_backend;
pub mod transforms;

pub use backend::{DecodeError, EncodeError, ImageBackend};
pub use params::{DuotoneParams, MonochromeParams, Quality, Rgb8, TransformParams};
pub use rust_backend::RustBackend;
pub use transforms::Transform;
