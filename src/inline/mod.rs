//! Inline styling of rendered markup
//!
//! - `node.rs` - the owned element tree and its HTML serialization
//! - `inliner.rs` - the template walk that writes declarations into `style`

pub mod inliner;
pub mod node;

pub use inliner::{inline_tree, inlined};
pub use node::{Element, RenderedNode};
