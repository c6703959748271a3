//! Pure Rust image I/O backend.
//!
//! ## Crate mapping
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Decode (JPEG, PNG, WebP, GIF) | `image::ImageReader`, format sniffed from content |
//! | Encode → JPEG | `image::codecs::jpeg::JpegEncoder` at the configured quality |
//! | Encode → PNG, WebP | `DynamicImage::write_to` (both lossless) |
//! | Encode → GIF | `DynamicImage::write_to` on an RGBA expansion |
//! | Atomic write | `tempfile::NamedTempFile` in the target directory, then `persist` |
//!
//! Decoding always produces 8-bit RGB. Alpha is dropped and gray or palette
//! sources are expanded, so every transform sees the same channel layout.

use super::backend::{DecodeError, EncodeError, ImageBackend};
use super::params::Quality;
use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, ImageFormat, ImageReader, ImageResult, RgbImage};
use std::io::{BufWriter, Seek, Write};
use std::path::{Path, PathBuf};

/// Output extensions with an encoder compiled in.
const OUTPUT_FORMATS: &[(&str, ImageFormat)] = &[
    ("jpg", ImageFormat::Jpeg),
    ("jpeg", ImageFormat::Jpeg),
    ("png", ImageFormat::Png),
    ("webp", ImageFormat::WebP),
    ("gif", ImageFormat::Gif),
];

/// Map an output path's extension to the format it will be encoded as.
pub fn output_format(path: &Path) -> Option<ImageFormat> {
    let ext = path.extension()?.to_str()?;
    OUTPUT_FORMATS
        .iter()
        .find(|(candidate, _)| candidate.eq_ignore_ascii_case(ext))
        .map(|(_, format)| *format)
}

/// Pure Rust backend using the `image` crate.
pub struct RustBackend;

impl RustBackend {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RustBackend {
    fn default() -> Self {
        Self::new()
    }
}

fn encode<W: Write + Seek>(
    image: &DynamicImage,
    writer: &mut W,
    format: ImageFormat,
    quality: Quality,
) -> ImageResult<()> {
    match format {
        ImageFormat::Jpeg => {
            image.write_with_encoder(JpegEncoder::new_with_quality(writer, quality.value()))
        }
        // The GIF encoder only takes RGB(A) frames.
        ImageFormat::Gif => DynamicImage::ImageRgba8(image.to_rgba8()).write_to(writer, format),
        _ => image.write_to(writer, format),
    }
}

impl ImageBackend for RustBackend {
    fn decode(&self, path: &Path) -> Result<RgbImage, DecodeError> {
        let io_err = |source: std::io::Error| DecodeError::Io {
            path: path.to_path_buf(),
            source,
        };

        let reader = ImageReader::open(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => DecodeError::NotFound(path.to_path_buf()),
            _ => io_err(e),
        })?;
        let decoded = reader
            .with_guessed_format()
            .map_err(io_err)?
            .decode()
            .map_err(|source| DecodeError::Image {
                path: path.to_path_buf(),
                source,
            })?;

        Ok(decoded.into_rgb8())
    }

    fn write(
        &self,
        image: &DynamicImage,
        path: &Path,
        quality: Quality,
    ) -> Result<PathBuf, EncodeError> {
        if image.width() == 0 || image.height() == 0 {
            return Err(EncodeError::EmptyBuffer);
        }
        let format =
            output_format(path).ok_or_else(|| EncodeError::UnsupportedFormat(path.to_path_buf()))?;

        let io_err = |source: std::io::Error| EncodeError::Io {
            path: path.to_path_buf(),
            source,
        };
        let dir = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or(Path::new("."));

        let mut staged = tempfile::Builder::new()
            .prefix(".pixelcraft-")
            .tempfile_in(dir)
            .map_err(io_err)?;
        {
            let mut writer = BufWriter::new(staged.as_file_mut());
            encode(image, &mut writer, format, quality).map_err(|source| EncodeError::Image {
                path: path.to_path_buf(),
                source,
            })?;
            writer.flush().map_err(io_err)?;
        }
        // Last writer wins when two calls target the same name.
        staged.persist(path).map_err(|e| io_err(e.error))?;

        Ok(path.to_path_buf())
    }
}
