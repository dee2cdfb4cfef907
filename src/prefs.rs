use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::models::UserType;

const KEY_AUTHENTICATED: &str = "isAuthenticated";
const KEY_USER_TYPE: &str = "userType";
const KEY_SEEN_TUTORIAL: &str = "hasSeenTutorial";

/// Small persistent flag store, handed to whatever needs to remember
/// something between runs.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
    fn clear(&mut self, key: &str) -> Result<()>;
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    values: BTreeMap<String, String>,
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn clear(&mut self, key: &str) -> Result<()> {
        self.values.remove(key);
        Ok(())
    }
}

/// JSON object on disk, rewritten on every change.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl FileStore {
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let values = if path.exists() {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            if content.trim().is_empty() {
                BTreeMap::new()
            } else {
                serde_json::from_str(&content)
                    .with_context(|| format!("Corrupt preferences file: {}", path.display()))?
            }
        } else {
            BTreeMap::new()
        };
        Ok(Self { path, values })
    }

    pub fn default_path() -> PathBuf {
        if let Some(proj_dirs) = directories::ProjectDirs::from("", "", "swipehire") {
            proj_dirs.data_dir().join("prefs.json")
        } else {
            PathBuf::from("swipehire-prefs.json")
        }
    }

    fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(&self.values)?;
        std::fs::write(&self.path, json)
            .with_context(|| format!("Failed to write {}", self.path.display()))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        self.save()
    }

    fn clear(&mut self, key: &str) -> Result<()> {
        if self.values.remove(key).is_some() {
            self.save()?;
        }
        Ok(())
    }
}

/// Sign-in flags over an injected store. There is no real authentication.
pub struct Session<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> Session<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn is_authenticated(&self) -> bool {
        self.store.get(KEY_AUTHENTICATED).as_deref() == Some("true")
    }

    /// Stored user type, if any and recognised.
    pub fn user_type(&self) -> Option<UserType> {
        self.store.get(KEY_USER_TYPE).as_deref().and_then(UserType::parse)
    }

    pub fn sign_in(&mut self, user_type: UserType) -> Result<()> {
        self.store.set(KEY_AUTHENTICATED, "true")?;
        self.store.set(KEY_USER_TYPE, user_type.as_str())
    }

    pub fn sign_out(&mut self) -> Result<()> {
        self.store.clear(KEY_AUTHENTICATED)?;
        self.store.clear(KEY_USER_TYPE)
    }

    pub fn has_seen_tutorial(&self) -> bool {
        self.store.get(KEY_SEEN_TUTORIAL).as_deref() == Some("true")
    }

    pub fn mark_tutorial_seen(&mut self) -> Result<()> {
        self.store.set(KEY_SEEN_TUTORIAL, "true")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("swipehire-test-{}-{}.json", name, std::process::id()))
    }

    #[test]
    fn test_session_sign_in_out() {
        let mut session = Session::new(MemoryStore::default());
        assert!(!session.is_authenticated());
        assert_eq!(session.user_type(), None);

        session.sign_in(UserType::Employer).unwrap();
        assert!(session.is_authenticated());
        assert_eq!(session.user_type(), Some(UserType::Employer));

        session.sign_out().unwrap();
        assert!(!session.is_authenticated());
        assert_eq!(session.user_type(), None);
    }

    #[test]
    fn test_unknown_user_type_ignored() {
        let mut store = MemoryStore::default();
        store.set(KEY_USER_TYPE, "admin").unwrap();
        let session = Session::new(store);
        assert_eq!(session.user_type(), None);
    }

    #[test]
    fn test_tutorial_flag_survives_sign_out() {
        let mut session = Session::new(MemoryStore::default());
        session.mark_tutorial_seen().unwrap();
        session.sign_out().unwrap();
        assert!(session.has_seen_tutorial());
    }

    #[test]
    fn test_file_store_persists() {
        let path = temp_path("persist");
        let _ = std::fs::remove_file(&path);

        let mut store = FileStore::open(&path).unwrap();
        store.set("a", "1").unwrap();
        store.set("b", "2").unwrap();
        store.clear("a").unwrap();

        let reopened = FileStore::open(&path).unwrap();
        assert_eq!(reopened.get("a"), None);
        assert_eq!(reopened.get("b").as_deref(), Some("2"));

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_file_store_rejects_corrupt_file() {
        let path = temp_path("corrupt");
        std::fs::write(&path, "not json").unwrap();
        assert!(FileStore::open(&path).is_err());
        std::fs::remove_file(&path).unwrap();
    }
}
