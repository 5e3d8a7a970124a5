//! ui
//!
//! User interaction utilities.
//!
//! # Modules
//!
//! - [`output`] - Output formatting and display
//!
//! # Design
//!
//! All user-facing output goes through this module so quiet and debug
//! modes are honored consistently. Diagnostics from the core go through
//! `tracing` instead.

pub mod output;
