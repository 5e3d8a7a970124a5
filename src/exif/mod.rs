//! exif
//!
//! Instruction streams for the external metadata tool.
//!
//! # Overview
//!
//! The tool reads its arguments from a file (`exiftool -@ ARGFILE`), one
//! argument per line. Each record sets fields on one target file and ends
//! with `-execute`, so a single argument file can carry many records.
//!
//! This module only writes the argument file. Running the tool is left to
//! the caller, after the stream has been fully written.
//!
//! # Modules
//!
//! - [`argfile`] - Record serialization and append-only file output

pub mod argfile;

pub use argfile::{append_to_file, to_string, write_record, ExifError, Field, OverwritePolicy, PendingMetadata};
