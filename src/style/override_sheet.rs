//! User-loaded override stylesheet
//!
//! A raw stylesheet the user picks from disk. It is appended to the preview
//! document's `<style>` block and never passes through the inliner.

use log::{info, warn};
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Accepted file extension for override sheets.
const STYLESHEET_EXTENSION: &str = "css";

// ─────────────────────────────────────────────────────────────────────────────
// Error Type
// ─────────────────────────────────────────────────────────────────────────────

/// Errors that can occur while loading an override sheet.
#[derive(Debug)]
pub enum OverrideSheetError {
    /// The file does not have a `.css` extension (rejected before reading)
    UnsupportedFile(PathBuf),
    /// The file could not be read
    Read { path: PathBuf, source: io::Error },
}

impl fmt::Display for OverrideSheetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OverrideSheetError::UnsupportedFile(path) => {
                write!(f, "Please choose a CSS file ('{}' is not one)", path.display())
            }
            OverrideSheetError::Read { path, source } => {
                write!(f, "Failed to read '{}': {}", path.display(), source)
            }
        }
    }
}

impl std::error::Error for OverrideSheetError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            OverrideSheetError::UnsupportedFile(_) => None,
            OverrideSheetError::Read { source, .. } => Some(source),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Override Sheet
// ─────────────────────────────────────────────────────────────────────────────

/// A loaded stylesheet and where it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverrideSheet {
    /// File the sheet was read from
    pub source_path: PathBuf,
    /// Raw stylesheet text
    pub css: String,
}

impl OverrideSheet {
    /// Read a stylesheet from disk.
    ///
    /// Files without a `.css` extension are rejected without touching the
    /// filesystem.
    pub fn load(path: &Path) -> Result<Self, OverrideSheetError> {
        if !is_stylesheet_path(path) {
            warn!("Rejected override sheet with unsupported extension: {}", path.display());
            return Err(OverrideSheetError::UnsupportedFile(path.to_path_buf()));
        }

        let css = fs::read_to_string(path).map_err(|source| OverrideSheetError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        info!("Loaded override sheet from {}", path.display());
        Ok(Self {
            source_path: path.to_path_buf(),
            css,
        })
    }
}

/// Whether the path carries a `.css` extension (case-insensitive).
pub fn is_stylesheet_path(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case(STYLESHEET_EXTENSION))
        .unwrap_or(false)
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
