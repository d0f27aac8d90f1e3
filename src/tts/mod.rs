//! Text-to-speech asset management.
//!
//! Locates the cache used for downloaded Kokoro voices.

mod cache;

pub use cache::resolve_voice_cache_dir;
