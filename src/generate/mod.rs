//! AI rewrite generation
//!
//! - `client.rs` - the HTTP generator and its wire formats
//! - `dispatcher.rs` - background threads and response polling

pub mod client;
pub mod dispatcher;

pub use client::{ApiConfig, GenerationClient, GenerationError, Generator};
pub use dispatcher::{GenerationDispatcher, GenerationRequest, GenerationResponse};
