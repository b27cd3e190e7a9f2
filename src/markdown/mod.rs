//! Markdown parsing and source formatting
//!
//! This module turns Markdown source into the rendered element tree using
//! the comrak library, a CommonMark + GFM compatible parser, and provides the
//! toolbar formatting commands used while editing the source.
//!
//! # Example
//! ```ignore
//! use contentmorph::markdown::{render_tree, apply_format, FormatCommand};
//!
//! let root = render_tree("# Hello\n\nThis is **bold** text.");
//! let edited = apply_format("Hello", Some((0, 5)), FormatCommand::Bold);
//! ```

pub mod formatting;
pub mod parser;

pub use formatting::{apply_format, FormatCommand, FormatResult};
pub use parser::{render_fragment, render_tree, render_tree_with_options, MarkdownOptions};
