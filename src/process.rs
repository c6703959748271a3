//! The processing pipeline: one upload, one operation, one output file.
//!
//! ```text
//! tag ──parse──▶ Operation ──registry──▶ Transform + Naming
//!                                             │
//! upload_dir/filename ──decode──▶ RgbImage ──apply──▶ DynamicImage ──write──▶ output_dir/<name>
//! ```
//!
//! Each call is independent: it decodes once, runs at most one transform,
//! writes exactly one file, and keeps nothing afterwards. Unknown tags are
//! rejected before the source is opened, so they never produce output.
//!
//! Two calls that derive the same output name race on the filesystem and
//! the last completed write wins. No locking is done.

use crate::config::Config;
use crate::imaging::{
    DecodeError, EncodeError, ImageBackend, Quality, RustBackend, TransformParams, transforms,
};
use crate::operation::{Operation, UnknownOperation};
use std::path::{Component, Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProcessError {
    #[error("Unsupported operation: {0:?}")]
    UnknownOperation(String),
    #[error("File name must be a single path component: {0:?}")]
    InvalidFileName(String),
    #[error(transparent)]
    Decode(#[from] DecodeError),
    #[error(transparent)]
    Encode(#[from] EncodeError),
}

impl From<UnknownOperation> for ProcessError {
    fn from(err: UnknownOperation) -> Self {
        ProcessError::UnknownOperation(err.0)
    }
}

/// Configuration for the processing pipeline.
#[derive(Debug, Clone)]
pub struct ProcessConfig {
    pub upload_dir: PathBuf,
    pub output_dir: PathBuf,
    pub quality: Quality,
    pub params: TransformParams,
}

impl ProcessConfig {
    /// Build a ProcessConfig from loaded config values.
    pub fn from_config(config: &Config) -> Self {
        Self {
            upload_dir: config.paths.upload_dir.clone(),
            output_dir: config.paths.output_dir.clone(),
            quality: Quality::new(config.encoding.jpeg_quality),
            params: config.transform_params(),
        }
    }
}

impl Default for ProcessConfig {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

/// Runs operations against uploads using a specific backend.
pub struct Processor<B: ImageBackend = RustBackend> {
    config: ProcessConfig,
    backend: B,
}

impl Processor<RustBackend> {
    pub fn new(config: ProcessConfig) -> Self {
        Self::with_backend(config, RustBackend::new())
    }
}

impl<B: ImageBackend> Processor<B> {
    /// Use a specific backend (allows testing with mock).
    pub fn with_backend(config: ProcessConfig, backend: B) -> Self {
        Self { config, backend }
    }

    pub fn config(&self) -> &ProcessConfig {
        &self.config
    }

    /// Apply `operation` to `upload_dir/filename` and return the written path.
    ///
    /// `filename` must be a bare name inside the upload directory; anything
    /// with a directory part, a root, or `..` is rejected before decoding.
    pub fn process_image(&self, filename: &str, operation: &str) -> Result<PathBuf, ProcessError> {
        let op: Operation = operation.parse()?;
        self.run(filename, op)
    }

    /// Like [`process_image`](Self::process_image) with a parsed operation.
    pub fn run(&self, filename: &str, op: Operation) -> Result<PathBuf, ProcessError> {
        if !is_bare_file_name(filename) {
            return Err(ProcessError::InvalidFileName(filename.to_string()));
        }
        let source = self.config.upload_dir.join(filename);
        let output = self.config.output_dir.join(op.output_file_name(filename));

        let decoded = self.backend.decode(&source)?;
        tracing::debug!(
            operation = %op,
            source = %source.display(),
            width = decoded.width(),
            height = decoded.height(),
            "Decoded source"
        );

        let result = transforms::apply(op.transform(), decoded, &self.config.params);
        tracing::debug!(operation = %op, transform = ?op.transform(), "Applied transform");

        let written = self.backend.write(&result, &output, self.config.quality)?;
        tracing::info!(operation = %op, output = %written.display(), "Wrote result");

        Ok(written)
    }
}

/// True when `filename` is exactly one normal path component.
fn is_bare_file_name(filename: &str) -> bool {
    let mut components = Path::new(filename).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}

/// One-shot convenience wrapper around [`Processor::process_image`].
pub fn process_image(
    config: &ProcessConfig,
    filename: &str,
    operation: &str,
) -> Result<PathBuf, ProcessError> {
    Processor::new(config.clone()).process_image(filename, operation)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imaging::MonochromeParams;
    use crate::imaging::backend::tests::{MockBackend, RecordedOp};
    use image::{Rgb, RgbImage};

    fn mock_config() -> ProcessConfig {
        ProcessConfig {
            upload_dir: PathBuf::from("/uploads"),
            output_dir: PathBuf::from("/static"),
            quality: Quality::new(90),
            params: TransformParams::default(),
        }
    }

    fn source_image() -> RgbImage {
        RgbImage::from_pixel(12, 8, Rgb([200, 100, 50]))
    }

    #[test]
    fn process_config_default_values() {
        let config = ProcessConfig::default();
        assert_eq!(config.upload_dir, PathBuf::from("uploads"));
        assert_eq!(config.output_dir, PathBuf::from("static"));
        assert_eq!(config.quality.value(), 95);
        assert_eq!(config.params, TransformParams::default());
    }

    #[test]
    fn process_config_from_custom_config() {
        let mut config = Config::default();
        config.encoding.jpeg_quality = 70;
        config.monochrome.hue = 3;
        config.paths.output_dir = PathBuf::from("public");

        let pc = ProcessConfig::from_config(&config);
        assert_eq!(pc.quality.value(), 70);
        assert_eq!(pc.params.monochrome, MonochromeParams { hue: 3 });
        assert_eq!(pc.output_dir, PathBuf::from("public"));
    }

    #[test]
    fn process_with_mock_records_decode_then_write() {
        let backend = MockBackend::with_images(vec![source_image()]);
        let processor = Processor::with_backend(mock_config(), backend);

        let out = processor.process_image("cat.png", "sepia").unwrap();
        assert_eq!(out, PathBuf::from("/static/cat_sepia.jpg"));

        let ops = processor.backend.get_operations();
        assert_eq!(
            ops,
            vec![
                RecordedOp::Decode("/uploads/cat.png".to_string()),
                RecordedOp::Write {
                    output: "/static/cat_sepia.jpg".to_string(),
                    width: 12,
                    height: 8,
                    channels: 3,
                    quality: 90,
                },
            ]
        );
    }

    #[test]
    fn process_with_mock_every_tag_writes_predicted_path() {
        let cases = [
            ("cgray", "/static/cat.png", 1),
            ("cwebp", "/static/cat.webp", 3),
            ("cjpg", "/static/cat.jpg", 3),
            ("cpng", "/static/cat.png", 3),
            ("edge", "/static/cat_edges.jpg", 1),
            ("sepia", "/static/cat_sepia.jpg", 3),
            ("bw", "/static/cat_bw.jpg", 1),
            ("duotone", "/static/cat_duotone.jpg", 3),
            ("monochrome", "/static/cat_monochrome.jpg", 3),
            ("cyanotype", "/static/cat_cyanotype.jpg", 3),
        ];

        for (tag, expected, expected_channels) in cases {
            let backend = MockBackend::with_images(vec![source_image()]);
            let processor = Processor::with_backend(mock_config(), backend);

            let out = processor.process_image("cat.png", tag).unwrap();
            assert_eq!(out, Path::new(expected), "{tag}");

            let ops = processor.backend.get_operations();
            assert!(
                matches!(
                    &ops[1],
                    RecordedOp::Write { output, channels, .. }
                        if output == expected && *channels == expected_channels
                ),
                "{tag}: {ops:?}"
            );
        }
    }

    #[test]
    fn unknown_operation_touches_nothing() {
        let backend = MockBackend::with_images(vec![source_image()]);
        let processor = Processor::with_backend(mock_config(), backend);

        let err = processor.process_image("cat.png", "flip").unwrap_err();
        assert!(matches!(err, ProcessError::UnknownOperation(ref t) if t == "flip"));
        assert!(processor.backend.get_operations().is_empty());
    }

    #[test]
    fn decode_failure_skips_write() {
        let processor = Processor::with_backend(mock_config(), MockBackend::new());

        let err = processor.process_image("missing.png", "cpng").unwrap_err();
        assert!(matches!(err, ProcessError::Decode(DecodeError::NotFound(_))));

        let ops = processor.backend.get_operations();
        assert_eq!(ops, vec![RecordedOp::Decode("/uploads/missing.png".to_string())]);
    }

    #[test]
    fn run_accepts_parsed_operation() {
        let backend = MockBackend::with_images(vec![source_image()]);
        let processor = Processor::with_backend(mock_config(), backend);

        let out = processor.run("dog.jpeg", Operation::ToPng).unwrap();
        assert_eq!(out, PathBuf::from("/static/dog.png"));
    }

    #[test]
    fn file_names_escaping_the_directories_are_rejected() {
        for name in [
            "/elsewhere/keep.png",
            "../keep.png",
            "sub/cat.png",
            "..",
            ".",
            "",
        ] {
            let backend = MockBackend::with_images(vec![source_image()]);
            let processor = Processor::with_backend(mock_config(), backend);

            let err = processor.process_image(name, "cgray").unwrap_err();
            assert!(
                matches!(err, ProcessError::InvalidFileName(ref n) if n == name),
                "{name:?}: {err:?}"
            );
            assert!(processor.backend.get_operations().is_empty(), "{name:?}");
        }
    }

    #[test]
    fn bare_file_names_are_accepted() {
        assert!(is_bare_file_name("cat.png"));
        assert!(is_bare_file_name(".hidden.png"));
        assert!(!is_bare_file_name("./cat.png"));
    }

    #[test]
    fn unknown_operation_error_message() {
        let err = ProcessError::from(UnknownOperation("flip".into()));
        assert_eq!(err.to_string(), "Unsupported operation: \"flip\"");
    }
}
