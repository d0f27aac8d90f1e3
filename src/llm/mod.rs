//! LLM client module for the Sugar Labs AI service.
//!
//! Covers the API key lifecycle, request construction and failure classification.

mod client;
mod error;
mod keystore;
mod prompt;
mod transport;

pub use client::{Answer, DEFAULT_API_URL, LlmClient};
pub use error::{AskError, FailureKind};
pub use keystore::KeyStore;
pub use prompt::DEFAULT_PROMPT;
