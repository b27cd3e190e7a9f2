//! Publishing styles
//!
//! Templates map element tags to literal inline declarations and carry the
//! stylesheet used for the on-screen preview. Override sheets are raw user
//! stylesheets that only affect the preview document.
//!
//! # Architecture
//!
//! - `rules.rs` - `StyleRule`, `Template` and the `TemplateRegistry` lookup
//! - `templates.rs` - built-in rule tables and fixed declarations
//! - `override_sheet.rs` - loading user stylesheets from disk

pub mod override_sheet;
pub mod rules;
pub mod templates;

pub use override_sheet::{OverrideSheet, OverrideSheetError};
pub use rules::{StyleRule, Template, TemplateRegistry};
pub use templates::{BASE_READING_STYLE, CODE_BLOCK_STYLE, DEFAULT_TEMPLATE, SOCIAL_TEMPLATE};
