//! Operation registry: tag → transform + output naming.
//!
//! Every supported operation is one row of [`REGISTRY`]. Parsing a tag,
//! choosing the pixel transform and deriving the output file name all read
//! from that table, so adding an operation is a one-row change.
//!
//! ## Output Names
//!
//! `<stem>` is the upload's file name without its final extension.
//!
//! | Tag | Output |
//! |---|---|
//! | `cgray` | original file name, unchanged |
//! | `cwebp` / `cjpg` / `cpng` | `<stem>.webp` / `<stem>.jpg` / `<stem>.png` |
//! | `edge` | `<stem>_edges.jpg` |
//! | everything else | `<stem>_<tag>.jpg` |

use crate::imaging::Transform;
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unsupported operation: {0:?}")]
pub struct UnknownOperation(pub String);

/// A supported operation. Discriminants index into [`REGISTRY`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Grayscale,
    ToWebp,
    ToJpeg,
    ToPng,
    Edges,
    Sepia,
    BlackAndWhite,
    Duotone,
    Monochrome,
    Cyanotype,
}

/// How an operation derives its output file name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Naming {
    /// Reuse the uploaded file name; the format follows its extension.
    KeepOriginal,
    /// `<stem>.<ext>`
    Reencode(&'static str),
    /// `<stem>_<suffix>.jpg`
    Suffixed(&'static str),
}

/// One registry row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Entry {
    pub operation: Operation,
    pub tag: &'static str,
    pub transform: Transform,
    pub naming: Naming,
    pub summary: &'static str,
}

pub static REGISTRY: [Entry; 10] = [
    Entry {
        operation: Operation::Grayscale,
        tag: "cgray",
        transform: Transform::Grayscale,
        naming: Naming::KeepOriginal,
        summary: "Convert to grayscale, keeping the original name and format",
    },
    Entry {
        operation: Operation::ToWebp,
        tag: "cwebp",
        transform: Transform::None,
        naming: Naming::Reencode("webp"),
        summary: "Re-encode as WebP",
    },
    Entry {
        operation: Operation::ToJpeg,
        tag: "cjpg",
        transform: Transform::None,
        naming: Naming::Reencode("jpg"),
        summary: "Re-encode as JPEG",
    },
    Entry {
        operation: Operation::ToPng,
        tag: "cpng",
        transform: Transform::None,
        naming: Naming::Reencode("png"),
        summary: "Re-encode as PNG",
    },
    Entry {
        operation: Operation::Edges,
        tag: "edge",
        transform: Transform::Edges,
        naming: Naming::Suffixed("edges"),
        summary: "Canny edge map",
    },
    Entry {
        operation: Operation::Sepia,
        tag: "sepia",
        transform: Transform::Sepia,
        naming: Naming::Suffixed("sepia"),
        summary: "Sepia tone",
    },
    Entry {
        operation: Operation::BlackAndWhite,
        tag: "bw",
        transform: Transform::Grayscale,
        naming: Naming::Suffixed("bw"),
        summary: "Black and white, saved as JPEG",
    },
    Entry {
        operation: Operation::Duotone,
        tag: "duotone",
        transform: Transform::Duotone,
        naming: Naming::Suffixed("duotone"),
        summary: "Two-color blend by brightness",
    },
    Entry {
        operation: Operation::Monochrome,
        tag: "monochrome",
        transform: Transform::Monochrome,
        naming: Naming::Suffixed("monochrome"),
        summary: "Single-hue tint",
    },
    Entry {
        operation: Operation::Cyanotype,
        tag: "cyanotype",
        transform: Transform::Cyanotype,
        naming: Naming::Suffixed("cyanotype"),
        summary: "Cyanotype print look",
    },
];

impl Operation {
    pub fn entry(self) -> &'static Entry {
        &REGISTRY[self as usize]
    }

    pub fn tag(self) -> &'static str {
        self.entry().tag
    }

    pub fn transform(self) -> Transform {
        self.entry().transform
    }

    /// Derive the output file name for an uploaded `filename`.
    ///
    /// - `("cat.png", cgray)` → `"cat.png"`
    /// - `("cat.png", cwebp)` → `"cat.webp"`
    /// - `("cat.png", sepia)` → `"cat_sepia.jpg"`
    /// - `("my.cat.png", edge)` → `"my.cat_edges.jpg"`
    pub fn output_file_name(self, filename: &str) -> String {
        match self.entry().naming {
            Naming::KeepOriginal => filename.to_string(),
            Naming::Reencode(ext) => format!("{}.{ext}", stem(filename)),
            Naming::Suffixed(suffix) => format!("{}_{suffix}.jpg", stem(filename)),
        }
    }
}

/// File name without its final extension.
pub fn stem(filename: &str) -> &str {
    Path::new(filename)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(filename)
}

impl FromStr for Operation {
    type Err = UnknownOperation;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        REGISTRY
            .iter()
            .find(|e| e.tag == tag)
            .map(|e| e.operation)
            .ok_or_else(|| UnknownOperation(tag.to_string()))
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}
