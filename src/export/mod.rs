//! Document Export Module for ContentMorph
//!
//! - `html.rs` - preview document and inlined fragment generation
//! - `clipboard.rs` - rich copy with plain-text fallback

pub mod clipboard;
pub mod html;

pub use clipboard::{export_inlined_content, ClipboardError, ClipboardSink, CopyOutcome, SystemClipboard};
pub use html::{
    export_to_html_file, generate_inlined_fragment, generate_preview_document, write_html_file,
};
