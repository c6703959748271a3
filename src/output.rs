//! CLI output formatting.
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format functions
//! are pure and do no I/O.
//!
//! ```text
//! $ pixelcraft process cat.png sepia
//! sepia cat.png
//!     Output: static/cat_sepia.jpg
//!
//! $ pixelcraft operations
//! cgray       cat.png → cat.png              Convert to grayscale, ...
//! cwebp       cat.png → cat.webp             Re-encode as WebP
//! ...
//! ```

use crate::operation::{Operation, REGISTRY};
use crate::upload::Ingested;
use std::path::Path;

const EXAMPLE_UPLOAD: &str = "cat.png";

pub fn format_process_result(op: Operation, filename: &str, output: &Path) -> Vec<String> {
    vec![
        format!("{} {}", op, filename),
        format!("    Output: {}", output.display()),
    ]
}

pub fn format_ingest_result(op: Operation, original: &Path, ingested: &Ingested) -> Vec<String> {
    vec![
        format!("{} {}", op, original.display()),
        format!("    Stored: {}", ingested.stored.display()),
        format!("    Output: {}", ingested.output.display()),
    ]
}

/// One line per registry entry: tag, example naming, summary.
pub fn format_operations() -> Vec<String> {
    let tag_width = REGISTRY.iter().map(|e| e.tag.len()).max().unwrap_or(0);
    let rows: Vec<(String, &str)> = REGISTRY
        .iter()
        .map(|e| {
            let naming = format!(
                "{} → {}",
                EXAMPLE_UPLOAD,
                e.operation.output_file_name(EXAMPLE_UPLOAD)
            );
            (naming, e.summary)
        })
        .collect();
    let naming_width = rows.iter().map(|(n, _)| n.chars().count()).max().unwrap_or(0);

    REGISTRY
        .iter()
        .zip(rows)
        .map(|(e, (naming, summary))| {
            format!(
                "{:<tag_width$}  {:<naming_width$}  {}",
                e.tag, naming, summary
            )
        })
        .collect()
}

pub fn print_process_result(op: Operation, filename: &str, output: &Path) {
    for line in format_process_result(op, filename, output) {
        println!("{}", line);
    }
}

pub fn print_ingest_result(op: Operation, original: &Path, ingested: &Ingested) {
    for line in format_ingest_result(op, original, ingested) {
        println!("{}", line);
    }
}

pub fn print_operations() {
    for line in format_operations() {
        println!("{}", line);
    }
}
