//! core::series
//!
//! Book series definitions and the series registry.
//!
//! # Overview
//!
//! A [`BookSeries`] names a numbered publication, declares the specificity
//! axes that identify a page within it (e.g. `page`, `subpage`), and carries
//! the filename template that turns a page identity into a name.
//!
//! The [`SeriesRegistry`] is the process-lifetime table of known series.
//! It is read-mostly: lookups take a shared lock, registration and removal
//! take the lock exclusively.
//!
//! # Example
//!
//! ```
//! use folio::core::series::{BookSeries, Fragment, SeriesRegistry};
//! use folio::core::types::{AxisName, SeriesName, Specificity};
//!
//! let page = AxisName::new("page").unwrap();
//! let series = BookSeries::new(
//!     SeriesName::new("journal").unwrap(),
//!     vec![Specificity::new(page.clone(), 1, 999).unwrap()],
//!     vec![Fragment::literal("J"), Fragment::axis(page, 3), Fragment::property("title")],
//! )
//! .unwrap();
//!
//! let registry = SeriesRegistry::new();
//! registry.register(series);
//! assert!(registry.lookup(&SeriesName::new("journal").unwrap()).is_ok());
//! ```

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

use super::types::{AxisName, SeriesName, Specificity};

/// Errors from building a series definition.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SeriesError {
    #[error("series '{series}' declares axis '{axis}' more than once")]
    DuplicateAxis { series: String, axis: String },

    #[error("series '{series}' template references undeclared axis '{axis}'")]
    UnknownAxis { series: String, axis: String },

    #[error("series '{series}' has invalid output folder '{folder}'")]
    InvalidFolder { series: String, folder: String },

    #[error("series '{series}' writes axis '{axis}' in letters but its range starts at 0")]
    LetterAxisFromZero { series: String, axis: String },

    #[error("series '{series}' has invalid timestamp format '{format}'")]
    InvalidTimestamp { series: String, format: String },
}

/// Errors from registry lookups.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("unknown series: {0}")]
    NotFound(String),
}

/// How an axis value is rendered into a name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AxisMode {
    /// Decimal digits, optionally zero padded.
    #[default]
    Numeric,
    /// Bijective base-26 letters: 1 is `A`, 26 is `Z`, 27 is `AA`.
    Letter,
}

/// One piece of a filename template.
///
/// In configuration files fragments are written as a bare string (literal)
/// or a small table:
///
/// ```toml
/// template = [
///     "J",
///     { axis = "page", pad = 3 },
///     { axis = "side", mode = "letter" },
///     { timestamp = "%Y" },
///     { property = "title" },
/// ]
/// ```
///
/// Unknown keys in a fragment table are rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Fragment {
    /// Emitted verbatim.
    Literal(String),

    /// Reference to a specificity axis.
    Axis {
        axis: AxisName,
        /// Minimum width, zero padded (numeric mode only).
        #[serde(skip_serializing_if = "is_zero")]
        pad: usize,
        #[serde(skip_serializing_if = "is_numeric")]
        mode: AxisMode,
    },

    /// Reference to a key in the page's property table.
    Property { property: String },

    /// Current time, formatted with a chrono format string.
    Timestamp { timestamp: String },
}

/// Config-file shape of a fragment. Table forms refuse unknown keys.
#[derive(Deserialize)]
#[serde(untagged)]
enum FragmentRepr {
    Literal(String),
    Axis(AxisRepr),
    Property(PropertyRepr),
    Timestamp(TimestampRepr),
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct AxisRepr {
    axis: AxisName,
    #[serde(default)]
    pad: usize,
    #[serde(default)]
    mode: AxisMode,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct PropertyRepr {
    property: String,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct TimestampRepr {
    timestamp: String,
}

impl From<FragmentRepr> for Fragment {
    fn from(repr: FragmentRepr) -> Self {
        match repr {
            FragmentRepr::Literal(text) => Self::Literal(text),
            FragmentRepr::Axis(AxisRepr { axis, pad, mode }) => Self::Axis { axis, pad, mode },
            FragmentRepr::Property(PropertyRepr { property }) => Self::Property { property },
            FragmentRepr::Timestamp(TimestampRepr { timestamp }) => Self::Timestamp { timestamp },
        }
    }
}

impl<'de> Deserialize<'de> for Fragment {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        FragmentRepr::deserialize(deserializer).map(Self::from)
    }
}

fn is_zero(pad: &usize) -> bool {
    *pad == 0
}

fn is_numeric(mode: &AxisMode) -> bool {
    *mode == AxisMode::Numeric
}

impl Fragment {
    /// A literal fragment.
    pub fn literal(text: impl Into<String>) -> Self {
        Self::Literal(text.into())
    }

    /// A numeric axis reference with the given zero-pad width.
    pub fn axis(axis: AxisName, pad: usize) -> Self {
        Self::Axis {
            axis,
            pad,
            mode: AxisMode::Numeric,
        }
    }

    /// A letter-mode axis reference.
    pub fn letters(axis: AxisName) -> Self {
        Self::Axis {
            axis,
            pad: 0,
            mode: AxisMode::Letter,
        }
    }

    /// A property reference.
    pub fn property(key: impl Into<String>) -> Self {
        Self::Property {
            property: key.into(),
        }
    }

    /// A timestamp directive.
    pub fn timestamp(format: impl Into<String>) -> Self {
        Self::Timestamp {
            timestamp: format.into(),
        }
    }
}

impl fmt::Display for Fragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(text) => write!(f, "literal {text:?}"),
            Self::Axis { axis, .. } => write!(f, "axis '{axis}'"),
            Self::Property { property } => write!(f, "property '{property}'"),
            Self::Timestamp { timestamp } => write!(f, "timestamp '{timestamp}'"),
        }
    }
}

/// A numbered serial publication.
///
/// # Invariants
///
/// - Axis names are unique within the series
/// - Every axis reference in the template names a declared axis
/// - The output folder is a single path component
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookSeries {
    name: SeriesName,
    folder: String,
    specificities: Vec<Specificity>,
    template: Vec<Fragment>,
}

impl BookSeries {
    /// Build a series. The output folder defaults to the series name.
    ///
    /// # Errors
    ///
    /// Returns `SeriesError` if an axis is declared twice, the template
    /// references an undeclared axis, a letter-mode axis can be 0, or a
    /// timestamp format is invalid.
    pub fn new(
        name: SeriesName,
        specificities: Vec<Specificity>,
        template: Vec<Fragment>,
    ) -> Result<Self, SeriesError> {
        let mut seen = HashSet::new();
        for spec in &specificities {
            if !seen.insert(spec.axis()) {
                return Err(SeriesError::DuplicateAxis {
                    series: name.to_string(),
                    axis: spec.axis().to_string(),
                });
            }
        }

        for fragment in &template {
            match fragment {
                Fragment::Axis { axis, mode, .. } => {
                    let spec = specificities
                        .iter()
                        .find(|spec| spec.axis() == axis)
                        .ok_or_else(|| SeriesError::UnknownAxis {
                            series: name.to_string(),
                            axis: axis.to_string(),
                        })?;
                    // Letters start at A = 1.
                    if *mode == AxisMode::Letter && spec.min() == 0 {
                        return Err(SeriesError::LetterAxisFromZero {
                            series: name.to_string(),
                            axis: axis.to_string(),
                        });
                    }
                }
                Fragment::Timestamp { timestamp } => {
                    if StrftimeItems::new(timestamp).any(|item| matches!(item, Item::Error)) {
                        return Err(SeriesError::InvalidTimestamp {
                            series: name.to_string(),
                            format: timestamp.clone(),
                        });
                    }
                }
                Fragment::Literal(_) | Fragment::Property { .. } => {}
            }
        }

        Ok(Self {
            folder: name.to_string(),
            name,
            specificities,
            template,
        })
    }

    /// Override the output folder.
    ///
    /// # Errors
    ///
    /// Returns `SeriesError::InvalidFolder` unless `folder` is a single path component.
    pub fn with_folder(mut self, folder: impl Into<String>) -> Result<Self, SeriesError> {
        let folder = folder.into();
        if SeriesName::new(folder.as_str()).is_err() {
            return Err(SeriesError::InvalidFolder {
                series: self.name.to_string(),
                folder,
            });
        }
        self.folder = folder;
        Ok(self)
    }

    pub fn name(&self) -> &SeriesName {
        &self.name
    }

    /// Output folder under the archival root.
    pub fn folder(&self) -> &str {
        &self.folder
    }

    pub fn specificities(&self) -> &[Specificity] {
        &self.specificities
    }

    pub fn template(&self) -> &[Fragment] {
        &self.template
    }

    /// Position of `axis` among the series' specificities.
    pub fn axis_position(&self, axis: &AxisName) -> Option<usize> {
        self.specificities.iter().position(|s| s.axis() == axis)
    }

    /// Whether the template references the property `key`.
    pub fn references_property(&self, key: &str) -> bool {
        self.template
            .iter()
            .any(|f| matches!(f, Fragment::Property { property } if property == key))
    }
}

/// Registry of known book series, keyed by name.
///
/// The last registration for a name wins.
#[derive(Debug, Default)]
pub struct SeriesRegistry {
    entries: RwLock<HashMap<SeriesName, Arc<BookSeries>>>,
}

impl SeriesRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a series. Returns the definition it replaced, if any.
    pub fn register(&self, series: BookSeries) -> Option<Arc<BookSeries>> {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        let replaced = entries.insert(series.name().clone(), Arc::new(series));
        if let Some(old) = &replaced {
            tracing::debug!(series = %old.name(), "replaced series definition");
        }
        replaced
    }

    /// Look up a series by name.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::NotFound` if no series has that name.
    pub fn lookup(&self, name: &SeriesName) -> Result<Arc<BookSeries>, RegistryError> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        entries
            .get(name)
            .cloned()
            .ok_or_else(|| RegistryError::NotFound(name.to_string()))
    }

    /// Look up a series by a raw name string.
    ///
    /// An invalid name can never be registered, so it is reported as not found.
    pub fn lookup_str(&self, name: &str) -> Result<Arc<BookSeries>, RegistryError> {
        let name = SeriesName::new(name).map_err(|_| RegistryError::NotFound(name.to_string()))?;
        self.lookup(&name)
    }

    /// Remove a series. Returns the removed definition, if any.
    pub fn unregister(&self, name: &SeriesName) -> Option<Arc<BookSeries>> {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        entries.remove(name)
    }

    /// Registered series names, sorted.
    pub fn names(&self) -> Vec<SeriesName> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        let mut names: Vec<_> = entries.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
