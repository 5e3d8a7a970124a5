//! core::config::schema
//!
//! Configuration schema types.
//!
//! # Example
//!
//! ```toml
//! root = "/archive"
//! timezone = "+09:00"
//! special_category = "special"
//!
//! [[series]]
//! name = "journal"
//! folder = "Journal"
//! specificities = [{ axis = "page", min = 1, max = 999 }]
//! template = ["J", { axis = "page", pad = 3 }, ".", { property = "title" }]
//!
//! [tags.oak]
//! category = "tree"
//! plain = "Oak"
//! ascii = "oak"
//! social = "#oak"
//!
//! [genres.tree]
//! metadata_head = "Flora"
//! social_head = "#flora"
//! default_fragment = "mixed-flora"
//! ```
//!
//! # Validation
//!
//! Values are validated after parsing: series names and folders must be
//! single path components, axes must be unique with `min <= max`, template
//! axes must be declared, and the timezone must be a fixed UTC offset.

use std::collections::BTreeMap;
use std::path::PathBuf;

use chrono::{FixedOffset, Offset, Utc};
use serde::{Deserialize, Serialize};

use super::ConfigError;
use crate::core::genre::Genre;
use crate::core::manifest::GenreConfig;
use crate::core::series::{BookSeries, Fragment};
use crate::core::taxonomy::TagRecord;
use crate::core::types::{SeriesName, Specificity};

/// Top-level configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct FolioConfig {
    /// Archival root (default: current directory)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub root: Option<PathBuf>,

    /// Fixed UTC offset for timestamp fragments, e.g. "+09:00" (default: UTC)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,

    /// Category excluded from genre agreement (default: "special")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub special_category: Option<String>,

    /// Book series definitions
    pub series: Vec<SeriesConfig>,

    /// Tag taxonomy, keyed by tag
    pub tags: BTreeMap<String, TagRecord>,

    /// Manifestation settings, keyed by category name, "mixed" or "unclassified"
    pub genres: BTreeMap<String, GenreConfig>,
}

impl FolioConfig {
    /// Validate the configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.parsed_timezone()?;

        if let Some(special) = &self.special_category {
            if special.is_empty() {
                return Err(ConfigError::InvalidValue(
                    "special_category cannot be empty".to_string(),
                ));
            }
        }

        for series in &self.series {
            series.build()?;
        }

        for (tag, record) in &self.tags {
            if tag.is_empty() {
                return Err(ConfigError::InvalidValue("tag name cannot be empty".into()));
            }
            if Genre::is_reserved_key(record.category.as_str()) {
                return Err(ConfigError::InvalidValue(format!(
                    "tag '{}' uses reserved category name '{}'",
                    tag, record.category
                )));
            }
        }

        Ok(())
    }

    /// The configured timezone, defaulting to UTC.
    pub fn parsed_timezone(&self) -> Result<FixedOffset, ConfigError> {
        match self.timezone.as_deref() {
            None | Some("UTC") | Some("Z") => Ok(Utc.fix()),
            Some(offset) => offset.parse::<FixedOffset>().map_err(|e| {
                ConfigError::InvalidValue(format!("invalid timezone offset '{}': {}", offset, e))
            }),
        }
    }
}

/// One `[[series]]` entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct SeriesConfig {
    /// Series name
    pub name: String,

    /// Output folder under the root (default: the series name)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub folder: Option<String>,

    /// Ordered specificity axes
    #[serde(default)]
    pub specificities: Vec<Specificity>,

    /// Filename template
    #[serde(default)]
    pub template: Vec<Fragment>,
}

impl SeriesConfig {
    /// Build the validated series definition.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` describing the first problem found.
    pub fn build(&self) -> Result<BookSeries, ConfigError> {
        let name = SeriesName::new(self.name.as_str())
            .map_err(|e| ConfigError::InvalidValue(e.to_string()))?;

        let series = BookSeries::new(name, self.specificities.clone(), self.template.clone())
            .map_err(|e| ConfigError::InvalidValue(e.to_string()))?;

        match &self.folder {
            Some(folder) => series
                .with_folder(folder.as_str())
                .map_err(|e| ConfigError::InvalidValue(e.to_string())),
            None => Ok(series),
        }
    }
}
