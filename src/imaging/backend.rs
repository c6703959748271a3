//! Decode/encode seam between the pipeline and the codecs.
//!
//! The [`ImageBackend`] trait covers the two operations that touch the
//! filesystem: decoding a source into an RGB buffer, and encoding a finished
//! buffer to an output path. Pixel work never goes through it.
//!
//! The production implementation is
//! [`RustBackend`](super::rust_backend::RustBackend). Tests swap in the
//! recording `MockBackend` below to exercise dispatch and naming without
//! running any codec.

use super::params::Quality;
use image::{DynamicImage, RgbImage};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// The source could not be turned into a pixel buffer.
#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("Source image not found: {0}")]
    NotFound(PathBuf),
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to decode {path}: {source}")]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

/// A finished buffer could not be written to its output path.
#[derive(Error, Debug)]
pub enum EncodeError {
    #[error("Refusing to encode an empty image")]
    EmptyBuffer,
    #[error("Unsupported output format: {0}")]
    UnsupportedFormat(PathBuf),
    #[error("IO error writing {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to encode {path}: {source}")]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

/// Trait for image I/O backends.
pub trait ImageBackend: Sync {
    /// Decode the image at `path` into an 8-bit RGB buffer.
    fn decode(&self, path: &Path) -> Result<RgbImage, DecodeError>;

    /// Encode `image` to `path`, choosing the format from the extension.
    ///
    /// Returns the written path. Nothing is visible at `path` unless the
    /// whole encode succeeded.
    fn write(
        &self,
        image: &DynamicImage,
        path: &Path,
        quality: Quality,
    ) -> Result<PathBuf, EncodeError>;
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Mock backend that records operations without executing them.
    ///
    /// `decode` hands out queued buffers (last in, first out) and fails with
    /// `NotFound` once the queue is empty.
    #[derive(Default)]
    pub struct MockBackend {
        pub decode_results: Mutex<Vec<RgbImage>>,
        pub operations: Mutex<Vec<RecordedOp>>,
    }

    #[derive(Debug, Clone, PartialEq)]
    pub enum RecordedOp {
        Decode(String),
        Write {
            output: String,
            width: u32,
            height: u32,
            channels: u8,
            quality: u8,
        },
    }

    impl MockBackend {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_images(images: Vec<RgbImage>) -> Self {
            Self {
                decode_results: Mutex::new(images),
                operations: Mutex::new(Vec::new()),
            }
        }

        pub fn get_operations(&self) -> Vec<RecordedOp> {
            self.operations.lock().unwrap().clone()
        }
    }

    impl ImageBackend for MockBackend {
        fn decode(&self, path: &Path) -> Result<RgbImage, DecodeError> {
            self.operations
                .lock()
                .unwrap()
                .push(RecordedOp::Decode(path.to_string_lossy().to_string()));

            self.decode_results
                .lock()
                .unwrap()
                .pop()
                .ok_or_else(|| DecodeError::NotFound(path.to_path_buf()))
        }

        fn write(
            &self,
            image: &DynamicImage,
            path: &Path,
            quality: Quality,
        ) -> Result<PathBuf, EncodeError> {
            self.operations.lock().unwrap().push(RecordedOp::Write {
                output: path.to_string_lossy().to_string(),
                width: image.width(),
                height: image.height(),
                channels: image.color().channel_count(),
                quality: quality.value(),
            });
            Ok(path.to_path_buf())
        }
    }

    #[test]
    fn mock_records_decode() {
        let backend = MockBackend::with_images(vec![RgbImage::new(8, 6)]);

        let img = backend.decode(Path::new("/uploads/cat.png")).unwrap();
        assert_eq!(img.dimensions(), (8, 6));

        let ops = backend.get_operations();
        assert_eq!(ops.len(), 1);
        assert!(matches!(&ops[0], RecordedOp::Decode(p) if p == "/uploads/cat.png"));
    }

    #[test]
    fn mock_decode_fails_when_queue_empty() {
        let backend = MockBackend::new();
        let result = backend.decode(Path::new("/uploads/missing.png"));
        assert!(matches!(result, Err(DecodeError::NotFound(_))));
    }

    #[test]
    fn mock_records_write() {
        let backend = MockBackend::new();
        let img = DynamicImage::ImageLuma8(image::GrayImage::new(4, 3));

        let out = backend
            .write(&img, Path::new("/static/cat_bw.jpg"), Quality::new(80))
            .unwrap();
        assert_eq!(out, PathBuf::from("/static/cat_bw.jpg"));

        let ops = backend.get_operations();
        assert_eq!(
            ops,
            vec![RecordedOp::Write {
                output: "/static/cat_bw.jpg".to_string(),
                width: 4,
                height: 3,
                channels: 1,
                quality: 80,
            }]
        );
    }
}
