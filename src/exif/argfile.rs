//! exif::argfile
//!
//! Serialize pending metadata into argument-file records.
//!
//! # Record layout
//!
//! ```text
//! -Title=Oak leaf
//! -Comment=pressed 1998
//! -Keywords=
//! -Keywords+=Flora
//! -Keywords+=oak
//! -overwrite_original
//! /archive/herbarium/H0012_oak_pressed.tif
//! -execute
//! ```
//!
//! - Scalar fields are one `-<field>=<value>` line.
//! - List fields are cleared with an empty `-<field>=` line, then appended
//!   with one `-<field>+=<item>` line per item, in order.
//! - The overwrite policy adds a bare option line unless it is `None`.
//! - The target path is a bare line, and `-execute` closes the record.

use std::fmt::{self, Write as _};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from writing argument files.
#[derive(Debug, Error)]
pub enum ExifError {
    #[error("{field} value cannot span multiple lines")]
    MultilineValue { field: String },

    #[error("target path is not valid UTF-8: {}", path.display())]
    NonUtf8Path { path: PathBuf },

    #[error("failed to write argument file '{path}': {source}")]
    WriteError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write argument record: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to format argument record")]
    Format(#[from] fmt::Error),
}

/// Tag names used in the records.
pub struct Field;

impl Field {
    pub const TITLE: &'static str = "Title";
    pub const COMMENT: &'static str = "Comment";
    pub const KEYWORDS: &'static str = "Keywords";
}

/// Whether the tool keeps a backup of the original file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OverwritePolicy {
    /// Leave the tool's default (it keeps an `_original` backup).
    #[default]
    None,
    /// `-overwrite_original`: replace the file, no backup.
    Original,
    /// `-overwrite_original_in_place`: rewrite the existing file in place,
    /// keeping its filesystem attributes.
    InPlace,
}

impl OverwritePolicy {
    /// The option line for this policy, if any.
    pub fn option(&self) -> Option<&'static str> {
        match self {
            Self::None => None,
            Self::Original => Some("-overwrite_original"),
            Self::InPlace => Some("-overwrite_original_in_place"),
        }
    }
}

impl FromStr for OverwritePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(Self::None),
            "original" => Ok(Self::Original),
            "in-place" => Ok(Self::InPlace),
            other => Err(format!(
                "unknown overwrite policy '{other}', must be one of: none, original, in-place"
            )),
        }
    }
}

impl fmt::Display for OverwritePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::None => "none",
            Self::Original => "original",
            Self::InPlace => "in-place",
        })
    }
}

/// Everything one record writes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PendingMetadata {
    pub title: String,
    pub comment: String,
    /// Keywords, written in this order.
    pub tags: Vec<String>,
    pub overwrite: OverwritePolicy,
    pub path: PathBuf,
}

impl PendingMetadata {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            ..Default::default()
        }
    }
}

fn single_line(field: &str, value: &str) -> Result<(), ExifError> {
    if value.contains(|c: char| c == '\n' || c == '\r') {
        return Err(ExifError::MultilineValue {
            field: field.to_string(),
        });
    }
    Ok(())
}

fn write_scalar(out: &mut String, field: &str, value: &str) -> Result<(), ExifError> {
    single_line(field, value)?;
    writeln!(out, "-{field}={value}")?;
    Ok(())
}

fn write_list(out: &mut String, field: &str, values: &[String]) -> Result<(), ExifError> {
    for value in values {
        single_line(field, value)?;
    }
    writeln!(out, "-{field}=")?;
    for value in values {
        writeln!(out, "-{field}+={value}")?;
    }
    Ok(())
}

/// Write one record to `out`.
///
/// Every value is checked before anything is written, so a rejected record
/// leaves `out` untouched.
///
/// # Errors
///
/// Returns `ExifError::MultilineValue` if a value or the path contains a line
/// break, `ExifError::NonUtf8Path` if the path is not UTF-8, or
/// `ExifError::Io` if writing fails.
pub fn write_record<W: Write>(out: &mut W, pending: &PendingMetadata) -> Result<(), ExifError> {
    let record = to_string(pending)?;
    out.write_all(record.as_bytes())?;
    Ok(())
}

/// Render one record as a string.
///
/// ```
/// use folio::exif::{to_string, OverwritePolicy, PendingMetadata};
///
/// let pending = PendingMetadata {
///     title: "Oak".into(),
///     comment: String::new(),
///     tags: vec!["Flora".into(), "oak".into()],
///     overwrite: OverwritePolicy::Original,
///     path: "/archive/H0012.tif".into(),
/// };
///
/// assert_eq!(
///     to_string(&pending).unwrap(),
///     "-Title=Oak\n-Comment=\n-Keywords=\n-Keywords+=Flora\n-Keywords+=oak\n\
///      -overwrite_original\n/archive/H0012.tif\n-execute\n"
/// );
/// ```
pub fn to_string(pending: &PendingMetadata) -> Result<String, ExifError> {
    let path = pending.path.to_str().ok_or_else(|| ExifError::NonUtf8Path {
        path: pending.path.clone(),
    })?;
    single_line("path", path)?;

    let mut buf = String::new();
    write_scalar(&mut buf, Field::TITLE, &pending.title)?;
    write_scalar(&mut buf, Field::COMMENT, &pending.comment)?;
    write_list(&mut buf, Field::KEYWORDS, &pending.tags)?;
    if let Some(option) = pending.overwrite.option() {
        writeln!(buf, "{option}")?;
    }
    writeln!(buf, "{path}")?;
    writeln!(buf, "-execute")?;
    Ok(buf)
}

/// Append one record to the argument file at `path`, creating it if needed.
///
/// Existing content is never truncated.
pub fn append_to_file(path: &Path, pending: &PendingMetadata) -> Result<(), ExifError> {
    let record = to_string(pending)?;

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| ExifError::WriteError {
            path: path.to_path_buf(),
            source: e,
        })?;

    file.write_all(record.as_bytes())
        .map_err(|e| ExifError::WriteError {
            path: path.to_path_buf(),
            source: e,
        })?;

    tracing::debug!(argfile = %path.display(), target = %pending.path.display(), "appended record");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn pending() -> PendingMetadata {
        PendingMetadata {
            title: "Oak leaf".into(),
            comment: "pressed 1998".into(),
            tags: vec!["Flora".into(), "oak".into(), "Ash".into()],
            overwrite: OverwritePolicy::None,
            path: PathBuf::from("/archive/herbarium/H0012.tif"),
        }
    }

    #[test]
    fn scalar_is_one_set_line() {
        let out = to_string(&pending()).unwrap();
        let titles: Vec<_> = out.lines().filter(|l| l.starts_with("-Title")).collect();
        assert_eq!(titles, vec!["-Title=Oak leaf"]);
    }

    #[test]
    fn list_clears_then_appends_in_order() {
        let out = to_string(&pending()).unwrap();
        let keywords: Vec<_> = out.lines().filter(|l| l.starts_with("-Keywords")).collect();
        assert_eq!(
            keywords,
            vec![
                "-Keywords=",
                "-Keywords+=Flora",
                "-Keywords+=oak",
                "-Keywords+=Ash"
            ]
        );
    }

    #[test]
    fn empty_list_still_clears() {
        let mut p = pending();
        p.tags.clear();
        let out = to_string(&p).unwrap();
        assert!(out.contains("-Keywords=\n"));
        assert!(!out.contains("+="));
    }

    #[test]
    fn record_layout() {
        let out = to_string(&pending()).unwrap();
        assert_eq!(
            out,
            "-Title=Oak leaf\n\
             -Comment=pressed 1998\n\
             -Keywords=\n\
             -Keywords+=Flora\n\
             -Keywords+=oak\n\
             -Keywords+=Ash\n\
             /archive/herbarium/H0012.tif\n\
             -execute\n"
        );
    }

    #[test]
    fn overwrite_options() {
        let mut p = pending();

        p.overwrite = OverwritePolicy::Original;
        let out = to_string(&p).unwrap();
        assert!(out.contains("\n-overwrite_original\n/archive"));

        p.overwrite = OverwritePolicy::InPlace;
        let out = to_string(&p).unwrap();
        assert!(out.contains("\n-overwrite_original_in_place\n/archive"));

        p.overwrite = OverwritePolicy::None;
        let out = to_string(&p).unwrap();
        assert!(!out.contains("overwrite"));
    }

    #[test]
    fn multiline_values_rejected() {
        let mut p = pending();
        p.comment = "line one\nline two".into();
        assert!(matches!(
            to_string(&p),
            Err(ExifError::MultilineValue { field }) if field == "Comment"
        ));

        let mut p = pending();
        p.tags.push("bad\r\ntag".into());
        assert!(matches!(
            to_string(&p),
            Err(ExifError::MultilineValue { field }) if field == "Keywords"
        ));
    }

    #[cfg(unix)]
    #[test]
    fn non_utf8_path_rejected() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let temp = TempDir::new().unwrap();
        let argfile = temp.path().join("args.txt");
        let mut p = pending();
        p.path = PathBuf::from(OsStr::from_bytes(b"/archive/herbarium/\xff.tif"));

        assert!(matches!(to_string(&p), Err(ExifError::NonUtf8Path { .. })));
        assert!(append_to_file(&argfile, &p).is_err());
        assert!(!argfile.exists());
    }

    #[test]
    fn rejected_record_writes_nothing() {
        let mut p = pending();
        p.title = "a\nb".into();
        let mut out = Vec::new();
        assert!(write_record(&mut out, &p).is_err());
        assert!(out.is_empty());
    }

    #[test]
    fn append_keeps_previous_records() {
        let temp = TempDir::new().unwrap();
        let argfile = temp.path().join("args.txt");
        std::fs::write(&argfile, "-common_args\n").unwrap();

        append_to_file(&argfile, &pending()).unwrap();
        let mut second = pending();
        second.path = PathBuf::from("/archive/herbarium/H0013.tif");
        append_to_file(&argfile, &second).unwrap();

        let contents = std::fs::read_to_string(&argfile).unwrap();
        assert!(contents.starts_with("-common_args\n-Title=Oak leaf\n"));
        assert_eq!(contents.matches("-execute\n").count(), 2);
        assert!(contents.ends_with("/archive/herbarium/H0013.tif\n-execute\n"));
    }

    #[test]
    fn append_creates_missing_file() {
        let temp = TempDir::new().unwrap();
        let argfile = temp.path().join("new.args");
        append_to_file(&argfile, &pending()).unwrap();
        assert!(argfile.exists());
    }

    #[test]
    fn policy_parsing() {
        assert_eq!("in-place".parse::<OverwritePolicy>(), Ok(OverwritePolicy::InPlace));
        assert_eq!("original".parse::<OverwritePolicy>(), Ok(OverwritePolicy::Original));
        assert!("always".parse::<OverwritePolicy>().is_err());
    }
}
