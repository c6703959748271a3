//! Upload intake: accept a file from outside, store it in the upload
//! directory under a safe name, then run the pipeline on it.
//!
//! ## Accepted Files
//!
//! Only names whose last extension (case-insensitive) is one of
//! [`ALLOWED_EXTENSIONS`] are accepted. The extension is a gate, not a
//! format hint: decoding still sniffs the content.
//!
//! ## Safe Names
//!
//! [`secure_filename`] reduces an arbitrary client-supplied name to a flat
//! ASCII file name that cannot escape the upload directory:
//!
//! - `"My cool movie.mov"` → `"My_cool_movie.mov"`
//! - `"../../../etc/passwd"` → `"etc_passwd"`
//! - `"i contain cool \u{fc}ml\u{e4}uts.txt"` → `"i_contain_cool_mluts.txt"`

use crate::imaging::ImageBackend;
use crate::operation::Operation;
use crate::process::{ProcessError, Processor};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Extensions accepted for upload.
pub const ALLOWED_EXTENSIONS: &[&str] = &["png", "webp", "jpg", "jpeg", "gif"];

#[derive(Error, Debug)]
pub enum UploadError {
    #[error("No file name given")]
    MissingFileName,
    #[error("File type not allowed: {0}")]
    DisallowedExtension(String),
    #[error("File name {0:?} has no usable characters")]
    EmptyFileName(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Process(#[from] ProcessError),
}

/// Result of a successful intake.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ingested {
    /// Where the upload was stored.
    pub stored: PathBuf,
    /// Where the processed result was written.
    pub output: PathBuf,
}

/// Whether `filename` has an extension from [`ALLOWED_EXTENSIONS`].
pub fn allowed_file(filename: &str) -> bool {
    filename
        .rsplit_once('.')
        .is_some_and(|(_, ext)| ALLOWED_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
}

/// Reduce a client-supplied name to a flat ASCII file name.
///
/// May return an empty string; callers must reject that.
pub fn secure_filename(filename: &str) -> String {
    let ascii: String = filename
        .chars()
        .filter(char::is_ascii)
        .map(|c| if c == '/' || c == '\\' { ' ' } else { c })
        .collect();
    let joined = ascii.split_whitespace().collect::<Vec<_>>().join("_");
    let kept: String = joined
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
        .collect();
    kept.trim_matches(|c| c == '.' || c == '_').to_string()
}

/// Validate, store and process an upload located at `source`.
///
/// The operation is checked before anything is copied, so a bad tag leaves
/// the upload directory untouched.
pub fn ingest<B: ImageBackend>(
    processor: &Processor<B>,
    source: &Path,
    operation: &str,
) -> Result<Ingested, UploadError> {
    let original = source
        .file_name()
        .and_then(|n| n.to_str())
        .filter(|n| !n.is_empty())
        .ok_or(UploadError::MissingFileName)?;

    if !allowed_file(original) {
        tracing::warn!(file = original, "Rejected upload with disallowed extension");
        return Err(UploadError::DisallowedExtension(original.to_string()));
    }

    let filename = secure_filename(original);
    if filename.is_empty() || !allowed_file(&filename) {
        tracing::warn!(file = original, "Rejected upload with unusable name");
        return Err(UploadError::EmptyFileName(original.to_string()));
    }

    let op: Operation = operation.parse().map_err(ProcessError::from)?;

    let stored = processor.config().upload_dir.join(&filename);
    std::fs::copy(source, &stored)?;
    tracing::debug!(from = %source.display(), to = %stored.display(), "Stored upload");

    let output = processor.run(&filename, op)?;
    Ok(Ingested { stored, output })
}
