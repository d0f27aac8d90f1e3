//! Download cache for Kokoro voice assets.
//!
//! The directory layout below the cache root belongs to the asset downloader.
//! We only decide where the root lives.

use std::fs;
use std::io;
use std::path::PathBuf;

use thiserror::Error;
use tracing::{debug, warn};

use crate::config::{DataRoot, RootError};
use crate::llm::FailureKind;

pub const VOICE_CACHE_DIR_NAME: &str = "kokoro_cache";

#[derive(Debug, Error)]
pub enum CacheError {
    #[error("activity root unavailable: {0}")]
    RootUnavailable(#[from] RootError),

    #[error("failed to create {path}: {source}")]
    Create {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl CacheError {
    pub fn kind(&self) -> FailureKind {
        FailureKind::CacheUnavailable
    }
}

/// `<root>/data/kokoro_cache`, created if missing.
pub fn voice_cache_dir(root: &impl DataRoot) -> Result<PathBuf, CacheError> {
    let dir = root.data_dir()?.join(VOICE_CACHE_DIR_NAME);
    fs::create_dir_all(&dir).map_err(|source| CacheError::Create { path: dir.clone(), source })?;
    Ok(dir)
}

/// Resolve the voice cache directory.
///
/// # Arguments
/// * `root` - Host data root the cache lives under
///
/// # Returns
/// The cache directory, created if needed, or `None` when it cannot be set up.
/// `None` means "let the downloader use its own default"; it is not an error
/// to show to the user.
pub fn resolve_voice_cache_dir(root: &impl DataRoot) -> Option<PathBuf> {
    match voice_cache_dir(root) {
        Ok(dir) => {
            debug!("Voice cache directory: {}", dir.display());
            Some(dir)
        }
        Err(e) => {
            warn!("Voice cache unavailable ({:?}): {}, using downloader default", e.kind(), e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ActivityRoot;
    use crate::config::voices::BUNDLED_VOICES;

    struct BrokenRoot;

    impl DataRoot for BrokenRoot {
        fn root(&self) -> Result<PathBuf, RootError> {
            Err(RootError::Missing)
        }
    }

    #[test]
    fn test_creates_cache_dir() {
        let dir = tempfile::tempdir().unwrap();
        let root = ActivityRoot::new(Some(dir.path().to_path_buf()));

        let cache = resolve_voice_cache_dir(&root).unwrap();
        assert_eq!(cache, dir.path().join("data").join("kokoro_cache"));
        assert!(cache.is_dir());

        // Second call finds the existing directory.
        assert_eq!(resolve_voice_cache_dir(&root), Some(cache));
    }

    #[test]
    fn test_unavailable_root_yields_none() {
        assert_eq!(resolve_voice_cache_dir(&BrokenRoot), None);
        assert!(matches!(voice_cache_dir(&BrokenRoot), Err(CacheError::RootUnavailable(_))));
        assert!(!BUNDLED_VOICES.is_empty());
    }

    #[test]
    fn test_create_failure_yields_none() {
        let dir = tempfile::tempdir().unwrap();
        // A file where the data directory should be.
        std::fs::write(dir.path().join("data"), "").unwrap();
        let root = ActivityRoot::new(Some(dir.path().to_path_buf()));

        let err = voice_cache_dir(&root).unwrap_err();
        assert_eq!(err.kind(), FailureKind::CacheUnavailable);
        assert_eq!(resolve_voice_cache_dir(&root), None);
    }
}
