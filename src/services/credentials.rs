use directories::ProjectDirs;
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use thiserror::Error;

/// Storage key the API credential lives under
pub const CREDENTIAL_KEY: &str = "gemini_api_key";
pub const CREDENTIAL_PREFIX: &str = "AIza";
pub const CREDENTIAL_MIN_LENGTH: usize = 30;

#[derive(Debug, Error)]
pub enum CredentialError {
    #[error("API key cannot be empty")]
    Empty,
    #[error("API key must start with 'AIza' and be at least 30 characters")]
    InvalidFormat,
    #[error("credential storage failed: {0}")]
    Storage(String),
}

/// Minimal string key/value persistence the credential store sits on
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, CredentialError>;
    fn set(&self, key: &str, value: &str) -> Result<(), CredentialError>;
    fn remove(&self, key: &str) -> Result<(), CredentialError>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Box<T> {
    fn get(&self, key: &str) -> Result<Option<String>, CredentialError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), CredentialError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), CredentialError> {
        (**self).remove(key)
    }
}

/// Plaintext TOML table on disk, one file per user
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `storage.toml` in the platform data directory
    pub fn open_default() -> Result<Self, CredentialError> {
        let proj_dirs = ProjectDirs::from("", "", "scriptdesk").ok_or_else(|| {
            CredentialError::Storage("Could not determine data directory".to_string())
        })?;
        Ok(Self::new(proj_dirs.data_dir().join("storage.toml")))
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_table(&self) -> Result<BTreeMap<String, String>, CredentialError> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let contents = fs::read_to_string(&self.path).map_err(storage_error)?;
        toml::from_str(&contents).map_err(storage_error)
    }

    fn write_table(&self, table: &BTreeMap<String, String>) -> Result<(), CredentialError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(storage_error)?;
        }
        let contents = toml::to_string_pretty(table).map_err(storage_error)?;
        fs::write(&self.path, contents).map_err(storage_error)
    }
}

fn storage_error(error: impl std::fmt::Display) -> CredentialError {
    CredentialError::Storage(error.to_string())
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, CredentialError> {
        Ok(self.read_table()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), CredentialError> {
        let mut table = self.read_table()?;
        table.insert(key.to_string(), value.to_string());
        self.write_table(&table)
    }

    fn remove(&self, key: &str) -> Result<(), CredentialError> {
        let mut table = self.read_table()?;
        if table.remove(key).is_some() {
            self.write_table(&table)?;
        }
        Ok(())
    }
}

/// In-process store, used when no data directory is available and in tests
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, String>>, CredentialError> {
        self.values
            .lock()
            .map_err(|_| CredentialError::Storage("memory store poisoned".to_string()))
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, CredentialError> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), CredentialError> {
        self.lock()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), CredentialError> {
        self.lock()?.remove(key);
        Ok(())
    }
}

/// Coarse shape check; the service does the real validation
pub fn validate_credential(key: &str) -> Result<&str, CredentialError> {
    let key = key.trim();
    if key.is_empty() {
        return Err(CredentialError::Empty);
    }
    if !key.starts_with(CREDENTIAL_PREFIX) || key.chars().count() < CREDENTIAL_MIN_LENGTH {
        return Err(CredentialError::InvalidFormat);
    }
    Ok(key)
}

/// Hides a key for display, keeping the prefix recognisable
#[must_use]
pub fn masked(key: &str) -> String {
    let length = key.chars().count();
    if length <= CREDENTIAL_PREFIX.len() {
        return "•".repeat(length);
    }
    let prefix: String = key.chars().take(CREDENTIAL_PREFIX.len()).collect();
    format!("{}{}", prefix, "•".repeat((length - CREDENTIAL_PREFIX.len()).min(36)))
}

/// The optional API credential, persisted under [`CREDENTIAL_KEY`]
pub struct CredentialStore<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> CredentialStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Overwrites any prior value. Malformed keys are rejected and nothing changes.
    pub fn save(&self, key: &str) -> Result<(), CredentialError> {
        let key = validate_credential(key)?;
        self.store.set(CREDENTIAL_KEY, key)?;
        tracing::info!("API credential saved");
        Ok(())
    }

    pub fn get(&self) -> Option<String> {
        match self.store.get(CREDENTIAL_KEY) {
            Ok(value) => value.filter(|key| !key.trim().is_empty()),
            Err(error) => {
                tracing::warn!(%error, "failed to read stored credential");
                None
            }
        }
    }

    pub fn clear(&self) -> Result<(), CredentialError> {
        self.store.remove(CREDENTIAL_KEY)?;
        tracing::info!("API credential cleared");
        Ok(())
    }

    pub fn has_credential(&self) -> bool {
        self.get().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID_KEY: &str = "AIzaXXXXXXXXXXXXXXXXXXXXXXXXXXXX";

    #[test]
    fn test_save_get_clear_round_trip() {
        let store = CredentialStore::new(MemoryStore::default());
        assert_eq!(store.get(), None);

        store.save(VALID_KEY).unwrap();
        assert_eq!(store.get().as_deref(), Some(VALID_KEY));
        assert!(store.has_credential());

        store.clear().unwrap();
        assert_eq!(store.get(), None);
        assert!(!store.has_credential());
    }

    #[test]
    fn test_rejected_keys_leave_prior_value() {
        let store = CredentialStore::new(MemoryStore::default());
        store.save(VALID_KEY).unwrap();

        assert!(matches!(store.save(""), Err(CredentialError::Empty)));
        assert!(matches!(store.save("   "), Err(CredentialError::Empty)));
        assert!(matches!(
            store.save("short"),
            Err(CredentialError::InvalidFormat)
        ));
        assert!(matches!(
            store.save("XXXXAIzaXXXXXXXXXXXXXXXXXXXXXXXXXXXX"),
            Err(CredentialError::InvalidFormat)
        ));
        assert_eq!(store.get().as_deref(), Some(VALID_KEY));
    }

    #[test]
    fn test_save_overwrites_and_trims() {
        let store = CredentialStore::new(MemoryStore::default());
        store.save(VALID_KEY).unwrap();
        let replacement = format!("  {}YYYY  ", VALID_KEY);
        store.save(&replacement).unwrap();
        assert_eq!(store.get(), Some(format!("{}YYYY", VALID_KEY)));
    }

    #[test]
    fn test_clear_without_value_is_ok() {
        let store = CredentialStore::new(MemoryStore::default());
        assert!(store.clear().is_ok());
    }

    #[test]
    fn test_file_store_persists_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("storage.toml");

        CredentialStore::new(FileStore::new(&path)).save(VALID_KEY).unwrap();
        let reopened = CredentialStore::new(FileStore::new(&path));
        assert_eq!(reopened.get().as_deref(), Some(VALID_KEY));

        reopened.clear().unwrap();
        assert_eq!(CredentialStore::new(FileStore::new(&path)).get(), None);
    }

    #[test]
    fn test_file_store_keeps_other_keys() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("storage.toml"));
        store.set("other", "value").unwrap();

        let credentials = CredentialStore::new(store.clone());
        credentials.save(VALID_KEY).unwrap();
        credentials.clear().unwrap();
        assert_eq!(store.get("other").unwrap().as_deref(), Some("value"));
    }

    #[test]
    fn test_masked_keeps_prefix() {
        assert_eq!(masked(""), "");
        assert_eq!(masked("AIza1234"), "AIza••••");
    }
}
