//! ContentMorph
//!
//! Rewrite a Markdown document into AI-generated variants and copy any of
//! them as HTML whose styling is inlined into every element, so it survives
//! pasting into editors that strip stylesheets.
//!
//! - `markdown` - Markdown to element tree, and source formatting commands
//! - `style` - templates of tag declarations and the user override sheet
//! - `inline` - the element tree and the inliner
//! - `export` - preview documents, inlined fragments, clipboard copy
//! - `generate` - the generation endpoint client and background dispatch
//! - `state` - the editing session: base document, variants, feedback
//! - `config` - persisted settings

pub mod config;
pub mod error;
pub mod export;
pub mod generate;
pub mod inline;
pub mod markdown;
pub mod samples;
pub mod state;
pub mod style;

pub use error::{Error, Result};
