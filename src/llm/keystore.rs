//! API key storage.
//!
//! The key lives in `<activity-root>/data/API_KEY.txt` as a single trimmed line.
//! [`KeyStore`] owns the file and the single active [`Credential`]; clients only
//! get a read handle ([`CredentialCell`]) and observe `reload` results through it.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::RwLock;
use thiserror::Error;
use tracing::{error, info};

use crate::config::{DataRoot, RootError};

pub const KEY_FILE_NAME: &str = "API_KEY.txt";

/// Shared secret for the AI service. `Debug` never prints the value.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    /// Trims the value; blank input yields `None`.
    pub fn new(value: &str) -> Option<Self> {
        let trimmed = value.trim();
        if trimmed.is_empty() { None } else { Some(Self(trimmed.to_string())) }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Credential(***)")
    }
}

/// Read handle on the active credential.
///
/// Writes only happen through [`KeyStore::reload`], and always replace the whole value.
#[derive(Debug, Clone, Default)]
pub struct CredentialCell(Arc<RwLock<Option<Credential>>>);

impl CredentialCell {
    pub fn new(credential: Option<Credential>) -> Self {
        Self(Arc::new(RwLock::new(credential)))
    }

    pub fn get(&self) -> Option<Credential> {
        self.0.read().clone()
    }

    pub(crate) fn replace(&self, credential: Option<Credential>) {
        *self.0.write() = credential;
    }
}

#[derive(Debug, Error)]
pub enum KeyStoreError {
    #[error("API key file not found at {0}")]
    NotFound(PathBuf),

    #[error("permission denied accessing {0}")]
    PermissionDenied(PathBuf),

    #[error("cannot store an empty API key")]
    Empty,

    #[error(transparent)]
    Root(#[from] RootError),

    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl KeyStoreError {
    fn from_io(path: &Path, err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::NotFound => KeyStoreError::NotFound(path.to_path_buf()),
            io::ErrorKind::PermissionDenied => KeyStoreError::PermissionDenied(path.to_path_buf()),
            _ => KeyStoreError::Io { path: path.to_path_buf(), source: err },
        }
    }
}

/// Persistent API key plus the process-wide active value.
pub struct KeyStore<R: DataRoot> {
    root: R,
    active: CredentialCell,
}

impl<R: DataRoot> KeyStore<R> {
    /// Open the store and load the current key from disk.
    pub fn open(root: R) -> Self {
        let mut store = Self { root, active: CredentialCell::default() };
        store.active = CredentialCell::new(store.load());
        store
    }

    /// Handle for consumers of the active credential.
    pub fn credential(&self) -> CredentialCell {
        self.active.clone()
    }

    /// `<root>/data/API_KEY.txt`, creating `<root>/data` if needed.
    pub fn locate_key_path(&self) -> Result<PathBuf, KeyStoreError> {
        let data_dir = self.root.data_dir()?;
        fs::create_dir_all(&data_dir).map_err(|e| KeyStoreError::from_io(&data_dir, e))?;
        Ok(data_dir.join(KEY_FILE_NAME))
    }

    /// Write the trimmed key to disk. Does not touch the active credential.
    ///
    /// # Arguments
    /// * `api_key` - The new key, surrounding whitespace is dropped
    ///
    /// # Errors
    /// Returns [`KeyStoreError::Empty`] for a blank key, or the I/O failure
    /// (already logged) when the file cannot be written.
    pub fn save(&self, api_key: &str) -> Result<(), KeyStoreError> {
        let result = self.write_key(api_key);
        if let Err(ref e) = result {
            error!("Error saving API key: {}", e);
        }
        result
    }

    fn write_key(&self, api_key: &str) -> Result<(), KeyStoreError> {
        let credential = Credential::new(api_key).ok_or(KeyStoreError::Empty)?;
        let path = self.locate_key_path()?;
        fs::write(&path, credential.as_str()).map_err(|e| KeyStoreError::from_io(&path, e))?;
        info!("API key saved to {}", path.display());
        Ok(())
    }

    /// Read the key from disk.
    ///
    /// # Returns
    /// The trimmed key, or `None` when the file is missing, blank or
    /// unreadable. Failures are logged, never returned.
    pub fn load(&self) -> Option<Credential> {
        match self.read_key() {
            Ok(credential) => credential,
            Err(KeyStoreError::NotFound(path)) => {
                error!("API key file not found at {}", path.display());
                None
            }
            Err(e) => {
                error!("Error reading API key: {}", e);
                None
            }
        }
    }

    fn read_key(&self) -> Result<Option<Credential>, KeyStoreError> {
        let path = self.locate_key_path()?;
        let contents = fs::read_to_string(&path).map_err(|e| KeyStoreError::from_io(&path, e))?;
        Ok(Credential::new(&contents))
    }

    /// Re-read the key file and make the result the active credential.
    pub fn reload(&self) -> Option<Credential> {
        let credential = self.load();
        self.active.replace(credential.clone());
        credential
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;
    use crate::config::ActivityRoot;

    fn store_in(dir: &TempDir) -> KeyStore<ActivityRoot> {
        KeyStore::open(ActivityRoot::new(Some(dir.path().to_path_buf())))
    }

    #[test]
    fn test_locate_key_path_creates_data_dir() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        let path = store.locate_key_path().unwrap();
        assert_eq!(path, dir.path().join("data").join("API_KEY.txt"));
        assert!(dir.path().join("data").is_dir());

        // Idempotent.
        assert_eq!(store.locate_key_path().unwrap(), path);
    }

    #[test]
    fn test_load_without_key_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        assert!(store.load().is_none());
        assert!(store.credential().get().is_none());
    }

    #[test]
    fn test_save_then_load_trims() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        for key in ["plain", "  padded\t", "\nsk-123 456\n"] {
            store.save(key).unwrap();
            assert_eq!(store.load().unwrap().as_str(), key.trim());
        }

        let on_disk = fs::read_to_string(dir.path().join("data").join(KEY_FILE_NAME)).unwrap();
        assert_eq!(on_disk, "sk-123 456");
    }

    #[test]
    fn test_save_rejects_blank_key() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        assert!(matches!(store.save("   \n"), Err(KeyStoreError::Empty)));
        assert!(store.load().is_none());
    }

    #[test]
    fn test_blank_key_file_is_unconfigured() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        fs::write(store.locate_key_path().unwrap(), "  \n").unwrap();

        assert!(store.load().is_none());
    }

    #[test]
    fn test_reload_updates_shared_credential() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        let cell = store.credential();
        assert!(cell.get().is_none());

        store.save("first").unwrap();
        // Saving alone does not change the active key.
        assert!(cell.get().is_none());

        assert_eq!(store.reload().unwrap().as_str(), "first");
        assert_eq!(cell.get().unwrap().as_str(), "first");

        store.save("second").unwrap();
        store.reload();
        assert_eq!(cell.get().unwrap().as_str(), "second");
    }

    #[test]
    fn test_open_loads_existing_key() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("data")).unwrap();
        fs::write(dir.path().join("data").join(KEY_FILE_NAME), "existing\n").unwrap();

        let store = store_in(&dir);
        assert_eq!(store.credential().get().unwrap().as_str(), "existing");
    }

    #[test]
    fn test_missing_root_never_panics() {
        let store = KeyStore::open(ActivityRoot::new(None));
        assert!(store.load().is_none());
        assert!(matches!(store.save("key"), Err(KeyStoreError::Root(RootError::Missing))));
    }

    #[test]
    fn test_credential_debug_is_redacted() {
        let credential = Credential::new("secret").unwrap();
        assert!(!format!("{credential:?}").contains("secret"));
    }
}
