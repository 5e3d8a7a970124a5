//! folio - Page names, archive paths and metadata for scanned book series
//!
//! folio turns the position of a page inside a book series (volume 3,
//! plate 12, subpage 2) into a file name, an archive path and a record of
//! descriptive metadata for an external tagging tool.
//!
//! # Architecture
//!
//! - [`cli`] - Command-line interface layer (parses args, loads config, dispatches)
//! - [`core`] - Series, page identities, templates, tag taxonomy, genres
//!   and manifestations, filename composition, configuration
//! - [`exif`] - Argument-file serialization for the tagging tool
//! - [`ui`] - Output helpers
//!
//! # Invariants
//!
//! 1. A page identity always has exactly one slot per specificity axis
//! 2. Template resolution either yields a complete name or reports which
//!    fragment could not be resolved; it never yields a partial name
//! 3. Genre resolution is independent of tag order and ignores special tags
//! 4. Argument files are only ever appended to

pub mod cli;
pub mod core;
pub mod exif;
pub mod ui;
