//! Configuration module for the AI client.
//!
//! Provides CLI argument parsing, the host data root and the voice catalogue.

#[allow(clippy::module_inception)]
mod config;
mod root;
pub mod voices;

pub use config::AppConfig;
pub use root::{ActivityRoot, DataRoot, RootError};
