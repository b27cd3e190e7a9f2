//! Clipboard Operations for Inlined Export
//!
//! Copies an inlined fragment as rich HTML (with its text as the plain
//! alternative) and falls back to plain text when the rich write fails.
//! The destination is a [`ClipboardSink`] so the fallback logic can be
//! exercised without a display server.

use crate::inline::{inlined, Element};
use crate::style::Template;
use arboard::Clipboard;
use log::{debug, info, warn};

// ─────────────────────────────────────────────────────────────────────────────
// Clipboard Error
// ─────────────────────────────────────────────────────────────────────────────

/// Errors that can occur during clipboard operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClipboardError {
    /// Failed to access clipboard
    Access(String),
    /// Failed to set clipboard content
    Write(String),
    /// Neither the rich nor the plain-text write succeeded
    CopyFailed { rich: String, plain: String },
}

impl std::fmt::Display for ClipboardError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClipboardError::Access(msg) => write!(f, "Clipboard access error: {}", msg),
            ClipboardError::Write(msg) => write!(f, "Clipboard write error: {}", msg),
            ClipboardError::CopyFailed { rich, plain } => write!(
                f,
                "Copy failed (rich: {}; plain text: {})",
                rich, plain
            ),
        }
    }
}

impl std::error::Error for ClipboardError {}

impl From<arboard::Error> for ClipboardError {
    fn from(err: arboard::Error) -> Self {
        ClipboardError::Write(err.to_string())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Sinks
// ─────────────────────────────────────────────────────────────────────────────

/// A clipboard-like destination.
pub trait ClipboardSink {
    /// Put HTML on the clipboard with `alt_text` as the plain-text flavor.
    fn write_html(&mut self, html: &str, alt_text: &str) -> Result<(), ClipboardError>;

    /// Put plain text on the clipboard.
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError>;
}

/// The system clipboard via arboard.
pub struct SystemClipboard {
    clipboard: Clipboard,
}

impl SystemClipboard {
    pub fn new() -> Result<Self, ClipboardError> {
        let clipboard = Clipboard::new().map_err(|e| ClipboardError::Access(e.to_string()))?;
        Ok(Self { clipboard })
    }
}

impl ClipboardSink for SystemClipboard {
    fn write_html(&mut self, html: &str, alt_text: &str) -> Result<(), ClipboardError> {
        self.clipboard.set_html(html, Some(alt_text))?;
        Ok(())
    }

    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        self.clipboard.set_text(text)?;
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Copy
// ─────────────────────────────────────────────────────────────────────────────

/// Which clipboard flavor ended up being written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyOutcome {
    /// Inlined HTML plus plain-text alternative
    Rich,
    /// Plain text only, after the rich path failed or had nothing to copy
    PlainText,
}

/// Inline `template` into a copy of `root` and put it on `sink`.
///
/// `root` is only borrowed; the styled copy is dropped before returning. A
/// missing root skips the rich path and copies empty plain text.
pub fn export_inlined_content(
    root: Option<&Element>,
    template: &Template,
    sink: &mut dyn ClipboardSink,
) -> Result<CopyOutcome, ClipboardError> {
    let (rich_error, plain_text) = match root {
        Some(root) => {
            let plain_text = root.text_content();
            let html = inlined(root, template).to_html();
            debug!(
                "Copying {} bytes of inlined HTML with template '{}'",
                html.len(),
                template.name
            );
            match sink.write_html(&html, &plain_text) {
                Ok(()) => {
                    info!("Copied inlined content with template '{}'", template.name);
                    return Ok(CopyOutcome::Rich);
                }
                Err(e) => (e.to_string(), plain_text),
            }
        }
        None => ("nothing to copy".to_string(), String::new()),
    };

    warn!("Rich copy failed ({}), falling back to plain text", rich_error);
    match sink.write_text(&plain_text) {
        Ok(()) => Ok(CopyOutcome::PlainText),
        Err(e) => {
            warn!("Plain-text copy failed: {}", e);
            Err(ClipboardError::CopyFailed {
                rich: rich_error,
                plain: e.to_string(),
            })
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
