//! # Pixelcraft
//!
//! Apply one pixel effect or format conversion to an uploaded image and write
//! the result to a public output directory.
//!
//! # Architecture: One Call, One File
//!
//! ```text
//! (filename, tag) → parse tag → decode upload → transform → encode → output path
//! ```
//!
//! A call never keeps state between invocations. The only side effect is the
//! single output file; everything else is a pure function of the decoded
//! buffer and the per-call parameters.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`operation`] | Registry of the ten operation tags: transform and output naming per tag |
//! | [`imaging`] | Pixel transforms, their parameters, and the decode/encode backend |
//! | [`process`] | The pipeline entry point, [`process::Processor::process_image`] |
//! | [`upload`] | Extension gate, file-name sanitizing, and copying uploads into place |
//! | [`config`] | `config.toml` loading, validation, and merging over stock defaults |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Native Channel Order
//!
//! Sources are always decoded to 8-bit RGB. Every transform indexes channels
//! in that order, so "first channel" means red everywhere: the sepia matrix
//! rows, the duotone colors, the monochrome hue slot and the cyanotype roles.
//!
//! ## Unknown Tags Are Errors
//!
//! An unrecognized operation tag is reported as
//! [`process::ProcessError::UnknownOperation`]. It is detected before the
//! source is opened, so no file is read or written.
//!
//! ## Output Format From the Extension
//!
//! The encoder is picked from the output file's extension alone. Most
//! operations write `.jpg`; `cgray` keeps the upload's own name and therefore
//! its format. PNG and WebP are written losslessly.
//!
//! ## Atomic Replace, No Locking
//!
//! Each result is encoded into a hidden temporary file next to its target and
//! renamed over it. Readers never see a half-written file, but two calls that
//! derive the same name simply overwrite each other: the last one to finish
//! wins.
//!
//! ## Explicit Configuration
//!
//! Directories, JPEG quality and the duotone/monochrome parameters live in a
//! [`process::ProcessConfig`] handed to the processor at construction. There
//! are no process-wide globals, which keeps every test on its own temporary
//! directories.

pub mod config;
pub mod imaging;
pub mod operation;
pub mod output;
pub mod process;
pub mod upload;
