//! Profile file discovery, format detection, and parsing.
//!
//! A profile lives in a single `profile.{ron,toml,json}` file. The
//! loader finds it, rejects ambiguous directories holding more than one
//! format, parses it into [`ProfileData`], and hands the result to the
//! resolver.

use std::path::{Path, PathBuf};

use crate::Profile;
use crate::schema::ProfileData;

/// Base name of the profile file, without extension.
const PROFILE_BASE_NAME: &str = "profile";

// ===========================================================================
// Errors
// ===========================================================================

/// Errors that can occur while loading or resolving a profile.
#[derive(Debug, thiserror::Error)]
pub enum ProfileError {
    /// No profile file exists in the given directory.
    #[error("no profile file found in {dir}")]
    Missing { dir: PathBuf },

    /// The file has an extension we don't support.
    #[error("unsupported format for file: {file}")]
    UnsupportedFormat { file: PathBuf },

    /// Two profile files with different formats exist side by side.
    #[error("conflicting formats: {a} and {b}")]
    ConflictingFormats { a: PathBuf, b: PathBuf },

    /// A deserialization error occurred.
    #[error("parse error in {file}: {detail}")]
    Parse { file: PathBuf, detail: String },

    /// Two entries of the same kind share a name.
    #[error("duplicate {kind} name '{name}'")]
    DuplicateName { kind: &'static str, name: String },

    /// A rate, ratio, interval, or size that must be positive is not.
    #[error("{kind} '{name}' has non-positive {field}")]
    NonPositive {
        kind: &'static str,
        name: String,
        field: &'static str,
    },

    /// A rule or converter references a resource no supply declares.
    #[error("unknown resource '{resource}' referenced by {referenced_by}")]
    UnknownResource {
        resource: String,
        referenced_by: String,
    },

    /// An I/O error occurred.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

// ===========================================================================
// Format detection
// ===========================================================================

/// Supported profile file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Ron,
    Toml,
    Json,
}

/// Detect the format of a file based on its extension.
pub fn detect_format(path: &Path) -> Result<Format, ProfileError> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("ron") => Ok(Format::Ron),
        Some("toml") => Ok(Format::Toml),
        Some("json") => Ok(Format::Json),
        _ => Err(ProfileError::UnsupportedFormat {
            file: path.to_path_buf(),
        }),
    }
}

// ===========================================================================
// File discovery
// ===========================================================================

/// Look for `profile.ron`, `profile.toml`, or `profile.json` in `dir`.
///
/// Returns `Ok(None)` if no file is found, or `ConflictingFormats` if
/// more than one exists.
pub fn find_profile_file(dir: &Path) -> Result<Option<PathBuf>, ProfileError> {
    let extensions = ["ron", "toml", "json"];
    let mut found: Option<PathBuf> = None;

    for ext in &extensions {
        let candidate = dir.join(format!("{PROFILE_BASE_NAME}.{ext}"));
        if candidate.exists() {
            if let Some(existing) = found {
                return Err(ProfileError::ConflictingFormats {
                    a: existing,
                    b: candidate,
                });
            }
            found = Some(candidate);
        }
    }

    Ok(found)
}

// ===========================================================================
// Parsing and loading
// ===========================================================================

/// Parse one profile file into its raw data form.
pub fn parse_profile(path: &Path) -> Result<ProfileData, ProfileError> {
    let format = detect_format(path)?;
    let text = std::fs::read_to_string(path)?;

    let parse_err = |detail: String| ProfileError::Parse {
        file: path.to_path_buf(),
        detail,
    };

    match format {
        Format::Ron => ron::from_str(&text).map_err(|e| parse_err(e.to_string())),
        Format::Toml => toml::from_str(&text).map_err(|e| parse_err(e.to_string())),
        Format::Json => serde_json::from_str(&text).map_err(|e| parse_err(e.to_string())),
    }
}

/// Find, parse, and resolve the profile in `dir`.
pub fn load_profile(dir: &Path) -> Result<Profile, ProfileError> {
    let path = find_profile_file(dir)?.ok_or_else(|| ProfileError::Missing {
        dir: dir.to_path_buf(),
    })?;
    let data = parse_profile(&path)?;
    Profile::resolve(data)
}

// ===========================================================================
// Tests
// ===========================================================================
