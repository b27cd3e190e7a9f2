//! Crate-wide error type
//!
//! Covers file I/O,
//! configuration, template selection, and session bookkeeping. Errors that
//! belong to a single subsystem (generation, clipboard, override sheets)
//! live next to that subsystem and convert into this type where needed.

use crate::export::ClipboardError;
use crate::generate::GenerationError;
use crate::style::OverrideSheetError;
use log::warn;
use std::fmt;
use std::io;
use std::path::PathBuf;

// ─────────────────────────────────────────────────────────────────────────────
// Result Alias
// ─────────────────────────────────────────────────────────────────────────────

/// A specialized `Result` type for the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// The centralized error type for the crate.
#[derive(Debug)]
pub enum Error {
    // ─────────────────────────────────────────────────────────────────────────
    // File I/O Errors
    // ─────────────────────────────────────────────────────────────────────────
    /// Unattributed I/O failure
    Io(io::Error),

    /// Failed to read an input file
    FileRead { path: PathBuf, source: io::Error },

    /// Writing an output file failed
    FileWrite { path: PathBuf, source: io::Error },

    // ─────────────────────────────────────────────────────────────────────────
    // Configuration Errors
    // ─────────────────────────────────────────────────────────────────────────
    /// The settings file exists but could not be read
    ConfigLoad {
        path: PathBuf,
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Writing or renaming the settings file failed
    ConfigSave {
        path: PathBuf,
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The settings file is not valid settings JSON
    ConfigParse {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The platform has no config directory
    ConfigDirNotFound,

    /// A required setting was left blank
    MissingSetting(&'static str),

    // ─────────────────────────────────────────────────────────────────────────
    // Styling Errors
    // ─────────────────────────────────────────────────────────────────────────
    /// The requested template is not one of the known templates
    InvalidTemplate(String),

    // ─────────────────────────────────────────────────────────────────────────
    // Session Errors
    // ─────────────────────────────────────────────────────────────────────────
    /// No variant with this id exists in the session
    UnknownVariant(String),

    /// The variant already has a generation request in flight
    AlreadyGenerating(String),

    /// No example document with this name
    UnknownSample(String),

    /// Not one of the toolbar formatting commands
    UnknownFormatCommand(String),

    // ─────────────────────────────────────────────────────────────────────────
    // Subsystem Errors
    // ─────────────────────────────────────────────────────────────────────────
    /// Copy to clipboard failed on every path
    Clipboard(ClipboardError),

    /// Override sheet rejected or unreadable
    OverrideSheet(OverrideSheetError),

    /// Generation request failed
    Generation(GenerationError),
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<ClipboardError> for Error {
    fn from(err: ClipboardError) -> Self {
        Error::Clipboard(err)
    }
}

impl From<OverrideSheetError> for Error {
    fn from(err: OverrideSheetError) -> Self {
        Error::OverrideSheet(err)
    }
}

impl From<GenerationError> for Error {
    fn from(err: GenerationError) -> Self {
        Error::Generation(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::ConfigParse {
            message: err.to_string(),
            source: Some(Box::new(err)),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Display
// ─────────────────────────────────────────────────────────────────────────────
impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // File I/O Errors
            Error::Io(err) => write!(f, "I/O error: {}", err),
            Error::FileRead { path, source } => {
                write!(f, "Failed to read '{}': {}", path.display(), source)
            }
            Error::FileWrite { path, source } => {
                write!(f, "Failed to write '{}': {}", path.display(), source)
            }

            // Configuration Errors
            Error::ConfigLoad { path, source } => {
                write!(
                    f,
                    "Could not read settings from '{}': {}",
                    path.display(),
                    source
                )
            }
            Error::ConfigSave { path, source } => {
                write!(
                    f,
                    "Could not save settings to '{}': {}",
                    path.display(),
                    source
                )
            }
            Error::ConfigParse { message, .. } => {
                write!(f, "Invalid settings: {}", message)
            }
            Error::ConfigDirNotFound => {
                write!(f, "No configuration directory on this platform")
            }
            Error::MissingSetting(field) => write!(f, "Please enter the {}", field),

            // Styling Errors
            Error::InvalidTemplate(name) => write!(f, "Unknown template '{}'", name),

            // Session Errors
            Error::UnknownVariant(id) => write!(f, "No variant with id '{}'", id),
            Error::AlreadyGenerating(id) => {
                write!(f, "Variant '{}' is already generating", id)
            }
            Error::UnknownSample(name) => write!(f, "No sample named '{}'", name),
            Error::UnknownFormatCommand(name) => {
                write!(f, "Unknown formatting command '{}'", name)
            }

            // Subsystem Errors
            Error::Clipboard(err) => write!(f, "{}", err),
            Error::OverrideSheet(err) => write!(f, "{}", err),
            Error::Generation(err) => write!(f, "{}", err),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Source Chaining
// ─────────────────────────────────────────────────────────────────────────────
impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(err) => Some(err),
            Error::FileRead { source, .. } | Error::FileWrite { source, .. } => Some(source),
            Error::ConfigLoad { source, .. } => Some(source.as_ref()),
            Error::ConfigSave { source, .. } => Some(source.as_ref()),
            Error::ConfigParse { source, .. } => source
                .as_ref()
                .map(|s| s.as_ref() as &(dyn std::error::Error + 'static)),
            Error::Clipboard(err) => Some(err),
            Error::OverrideSheet(err) => Some(err),
            Error::Generation(err) => Some(err),
            Error::ConfigDirNotFound
            | Error::MissingSetting(_)
            | Error::InvalidTemplate(_)
            | Error::UnknownVariant(_)
            | Error::AlreadyGenerating(_)
            | Error::UnknownSample(_)
            | Error::UnknownFormatCommand(_) => None,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Fallback Helpers
// ─────────────────────────────────────────────────────────────────────────────

/// Fall back to a default instead of propagating.
pub trait ResultExt<T> {
    /// The `Ok` value, or `default` after logging the error at `warn!`.
    fn unwrap_or_warn_default(self, default: T, context: &str) -> T;
}

impl<T> ResultExt<T> for Result<T> {
    fn unwrap_or_warn_default(self, default: T, context: &str) -> T {
        match self {
            Ok(value) => value,
            Err(err) => {
                warn!("{}: {}. Using default.", context, err);
                default
            }
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
