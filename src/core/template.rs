//! core::template
//!
//! Resolve a series' filename template against a page identity.
//!
//! # Missing fragments
//!
//! A fragment is *missing* when the identity cannot supply it: an axis with
//! no bound number, an axis past the optional limit axis, or a property key
//! that is not set. [`MissingPolicy`] decides what happens next:
//!
//! | Policy   | Result                                   |
//! |----------|------------------------------------------|
//! | `Glob`   | fragment renders as `*`, resolution goes on |
//! | `Absent` | whole resolution yields `None`           |
//! | `Fail`   | `TemplateError::MissingComponent`        |
//!
//! `Glob` is the default and is meant for search patterns. Anything that
//! needs a real file name should use `Fail`.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use folio::core::identity::PageIdentity;
//! use folio::core::series::{BookSeries, Fragment};
//! use folio::core::template::{MissingPolicy, TemplateResolver};
//! use folio::core::types::{AxisName, SeriesName, Specificity};
//!
//! let page = AxisName::new("page").unwrap();
//! let series = Arc::new(
//!     BookSeries::new(
//!         SeriesName::new("journal").unwrap(),
//!         vec![Specificity::new(page.clone(), 1, 999).unwrap()],
//!         vec![
//!             Fragment::literal("J"),
//!             Fragment::axis(page, 3),
//!             Fragment::literal("."),
//!             Fragment::property("title"),
//!         ],
//!     )
//!     .unwrap(),
//! );
//!
//! let resolver = TemplateResolver::new();
//! let page7 = PageIdentity::complete(series.clone(), &[7]).unwrap();
//!
//! let named = page7.clone().with_property("title", "draft");
//! assert_eq!(
//!     resolver.resolve(&named, MissingPolicy::Fail, None).unwrap().as_deref(),
//!     Some("J007.draft")
//! );
//! assert_eq!(
//!     resolver.resolve(&page7, MissingPolicy::Glob, None).unwrap().as_deref(),
//!     Some("J007.*")
//! );
//! assert_eq!(resolver.resolve(&page7, MissingPolicy::Absent, None).unwrap(), None);
//! ```

use std::fmt::{self, Write as _};
use std::str::FromStr;
use std::sync::Arc;

use chrono::{DateTime, FixedOffset, Offset, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::identity::PageIdentity;
use super::series::{AxisMode, Fragment};
use super::types::AxisName;

/// Wildcard emitted for missing fragments under [`MissingPolicy::Glob`].
pub const WILDCARD: char = '*';

/// Errors from template resolution.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TemplateError {
    #[error("cannot resolve {fragment} for series '{series}'")]
    MissingComponent { series: String, fragment: String },

    #[error("series '{series}' has no axis '{axis}'")]
    UnknownAxis { series: String, axis: String },

    #[error("{value} cannot be written in letters for axis '{axis}'")]
    Unrepresentable { axis: String, value: u32 },

    #[error("invalid timestamp format '{0}'")]
    InvalidTimestampFormat(String),
}

/// What to do with a fragment the identity cannot supply.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MissingPolicy {
    /// Signal `TemplateError::MissingComponent`.
    Fail,
    /// Abandon the whole resolution and return nothing.
    Absent,
    /// Render the fragment as `*` and continue.
    #[default]
    Glob,
}

impl FromStr for MissingPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fail" => Ok(Self::Fail),
            "absent" => Ok(Self::Absent),
            "glob" => Ok(Self::Glob),
            other => Err(format!(
                "unknown policy '{other}', must be one of: fail, absent, glob"
            )),
        }
    }
}

impl fmt::Display for MissingPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Fail => "fail",
            Self::Absent => "absent",
            Self::Glob => "glob",
        };
        f.write_str(s)
    }
}

/// Source of the current time for timestamp fragments.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Reads the system clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Always returns the same instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Encode `n` in bijective base 26: 1 is `A`, 26 is `Z`, 27 is `AA`.
///
/// Zero has no representation.
///
/// ```
/// use folio::core::template::letters;
///
/// assert_eq!(letters(1).as_deref(), Some("A"));
/// assert_eq!(letters(26).as_deref(), Some("Z"));
/// assert_eq!(letters(27).as_deref(), Some("AA"));
/// assert_eq!(letters(702).as_deref(), Some("ZZ"));
/// assert_eq!(letters(0), None);
/// ```
pub fn letters(n: u32) -> Option<String> {
    if n == 0 {
        return None;
    }
    let mut n = n;
    let mut digits = Vec::new();
    while n > 0 {
        n -= 1;
        digits.push(char::from(b'A' + (n % 26) as u8));
        n /= 26;
    }
    Some(digits.into_iter().rev().collect())
}

/// Result of rendering a single fragment.
enum Rendered {
    Text(String),
    Missing,
}

/// Why a resolution stopped early.
enum Abort {
    Absent,
    Failed(TemplateError),
}

impl From<TemplateError> for Abort {
    fn from(err: TemplateError) -> Self {
        Abort::Failed(err)
    }
}

/// Resolves filename templates.
///
/// The resolver carries the base-location prefix prepended to every result,
/// the timezone used for timestamp fragments, and the clock.
#[derive(Clone)]
pub struct TemplateResolver {
    base: String,
    timezone: FixedOffset,
    clock: Arc<dyn Clock>,
}

impl fmt::Debug for TemplateResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TemplateResolver")
            .field("base", &self.base)
            .field("timezone", &self.timezone)
            .finish_non_exhaustive()
    }
}

impl Default for TemplateResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateResolver {
    /// A resolver with an empty base, UTC, and the system clock.
    pub fn new() -> Self {
        Self {
            base: String::new(),
            timezone: Utc.fix(),
            clock: Arc::new(SystemClock),
        }
    }

    /// Set the prefix prepended to every resolved name.
    pub fn with_base(mut self, base: impl Into<String>) -> Self {
        self.base = base.into();
        self
    }

    pub fn with_timezone(mut self, timezone: FixedOffset) -> Self {
        self.timezone = timezone;
        self
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    /// Resolve the identity's series template.
    ///
    /// With `limit` set, axes positioned after the limit axis are treated as
    /// missing.
    ///
    /// # Errors
    ///
    /// - `TemplateError::MissingComponent` under `MissingPolicy::Fail`
    /// - `TemplateError::UnknownAxis` if `limit` is not an axis of the series
    /// - `TemplateError::Unrepresentable` for 0 in letter mode
    /// - `TemplateError::InvalidTimestampFormat` for a bad format string
    pub fn resolve(
        &self,
        identity: &PageIdentity,
        policy: MissingPolicy,
        limit: Option<&AxisName>,
    ) -> Result<Option<String>, TemplateError> {
        let series = identity.series();
        let limit_pos = match limit {
            Some(axis) => Some(series.axis_position(axis).ok_or_else(|| {
                TemplateError::UnknownAxis {
                    series: series.name().to_string(),
                    axis: axis.to_string(),
                }
            })?),
            None => None,
        };

        let now = self.clock.now().with_timezone(&self.timezone);

        let folded = series
            .template()
            .iter()
            .try_fold(self.base.clone(), |mut out, fragment| {
                match self.render(fragment, identity, limit_pos, &now)? {
                    Rendered::Text(text) => out.push_str(&text),
                    Rendered::Missing => match policy {
                        MissingPolicy::Glob => out.push(WILDCARD),
                        MissingPolicy::Absent => return Err(Abort::Absent),
                        MissingPolicy::Fail => {
                            return Err(Abort::Failed(TemplateError::MissingComponent {
                                series: series.name().to_string(),
                                fragment: fragment.to_string(),
                            }))
                        }
                    },
                }
                Ok(out)
            });

        match folded {
            Ok(name) => {
                tracing::debug!(series = %series.name(), %policy, name = %name, "resolved template");
                Ok(Some(name))
            }
            Err(Abort::Absent) => {
                tracing::debug!(series = %series.name(), "template resolution abandoned");
                Ok(None)
            }
            Err(Abort::Failed(err)) => Err(err),
        }
    }

    fn render(
        &self,
        fragment: &Fragment,
        identity: &PageIdentity,
        limit_pos: Option<usize>,
        now: &DateTime<FixedOffset>,
    ) -> Result<Rendered, TemplateError> {
        match fragment {
            Fragment::Literal(text) => Ok(Rendered::Text(text.clone())),

            Fragment::Timestamp { timestamp } => {
                let mut out = String::new();
                write!(out, "{}", now.format(timestamp))
                    .map_err(|_| TemplateError::InvalidTimestampFormat(timestamp.clone()))?;
                Ok(Rendered::Text(out))
            }

            Fragment::Axis { axis, pad, mode } => {
                // Construction guarantees template axes are declared.
                let Some(pos) = identity.series().axis_position(axis) else {
                    return Ok(Rendered::Missing);
                };
                if limit_pos.is_some_and(|limit| pos > limit) {
                    return Ok(Rendered::Missing);
                }
                let Some(value) = identity.number_at(pos) else {
                    return Ok(Rendered::Missing);
                };
                match mode {
                    AxisMode::Numeric => Ok(Rendered::Text(format!("{value:0pad$}"))),
                    AxisMode::Letter => letters(value).map(Rendered::Text).ok_or_else(|| {
                        TemplateError::Unrepresentable {
                            axis: axis.to_string(),
                            value,
                        }
                    }),
                }
            }

            Fragment::Property { property } => Ok(identity
                .property(property)
                .map(|value| Rendered::Text(value.to_string()))
                .unwrap_or(Rendered::Missing)),
        }
    }
}
