//! core
//!
//! Core domain types and resolution engines for folio.
//!
//! # Modules
//!
//! - [`types`] - Strong types: SeriesName, AxisName, Specificity, TagSet, etc.
//! - [`series`] - Book series definitions and the series registry
//! - [`identity`] - Page identities bound to a series
//! - [`template`] - Filename template resolution
//! - [`taxonomy`] - Tag lookup table
//! - [`genre`] - Genre agreement over a tag set
//! - [`manifest`] - Tag set expansion into output representations
//! - [`compose`] - Final file names and archive paths
//! - [`library`] - The constructed-once tables passed to the resolvers
//! - [`config`] - Configuration schema and loading
//!
//! # Design Principles
//!
//! - Strong typing prevents invalid states at construction time
//! - Tables are built once and passed in, never global
//! - Resolution is deterministic apart from the clock

pub mod compose;
pub mod config;
pub mod genre;
pub mod identity;
pub mod library;
pub mod manifest;
pub mod series;
pub mod taxonomy;
pub mod template;
pub mod types;
