//! Host application data root.
//!
//! Inside Sugar the activity root is handed to us through `SUGAR_ACTIVITY_ROOT`
//! (read by clap into [`AppConfig`](super::AppConfig)). Outside the host there is
//! no root at all, and consumers degrade instead of failing.

use std::path::PathBuf;

use thiserror::Error;

/// Name of the per-activity data directory below the root.
pub const DATA_DIR_NAME: &str = "data";

/// The host environment could not provide a data root.
#[derive(Debug, Error)]
pub enum RootError {
    #[error("no activity root set (SUGAR_ACTIVITY_ROOT is missing)")]
    Missing,

    #[error("activity root {0} is not a directory")]
    NotADirectory(PathBuf),
}

/// Resolves the writable base directory owned by the application.
pub trait DataRoot {
    fn root(&self) -> Result<PathBuf, RootError>;

    /// `<root>/data`, without creating it.
    fn data_dir(&self) -> Result<PathBuf, RootError> {
        Ok(self.root()?.join(DATA_DIR_NAME))
    }
}

/// Data root supplied by the Sugar shell.
#[derive(Debug, Clone, Default)]
pub struct ActivityRoot {
    path: Option<PathBuf>,
}

impl ActivityRoot {
    pub fn new(path: Option<PathBuf>) -> Self {
        Self { path }
    }
}

impl DataRoot for ActivityRoot {
    fn root(&self) -> Result<PathBuf, RootError> {
        let path = self.path.as_ref().ok_or(RootError::Missing)?;
        // A root that does not exist yet is fine, it gets created on demand.
        if path.exists() && !path.is_dir() {
            return Err(RootError::NotADirectory(path.clone()));
        }
        Ok(path.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_root() {
        let root = ActivityRoot::new(None);
        assert!(matches!(root.root(), Err(RootError::Missing)));
        assert!(root.data_dir().is_err());
    }

    #[test]
    fn test_data_dir_below_root() {
        let dir = tempfile::tempdir().unwrap();
        let root = ActivityRoot::new(Some(dir.path().to_path_buf()));
        assert_eq!(root.data_dir().unwrap(), dir.path().join("data"));
    }

    #[test]
    fn test_root_pointing_at_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("not-a-dir");
        std::fs::write(&file, "x").unwrap();

        let root = ActivityRoot::new(Some(file));
        assert!(matches!(root.root(), Err(RootError::NotADirectory(_))));
    }
}
