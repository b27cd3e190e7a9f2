//! Configuration module for ContentMorph
//!
//! This module handles user preferences, including serialization to JSON and
//! persistent storage in platform-specific directories.

mod persistence;
mod settings;

pub use persistence::*;
pub use settings::*;
