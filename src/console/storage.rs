use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use anyhow::{Context, Error};
use log::{debug, warn};

/// key the manager's bearer token is stored under
pub(crate) const ACCESS_TOKEN_KEY: &str = "managerAccessToken";

/// Persistent string key/value storage on the client side.
pub(crate) trait LocalStorage {
    fn get_item(&self, key: &str) -> Option<String>;
    fn set_item(&mut self, key: &str, value: &str) -> Result<(), Error>;
    fn remove_item(&mut self, key: &str) -> Result<(), Error>;
}

/// Stored access token. An empty value counts as signed out.
pub(crate) fn access_token(storage: &impl LocalStorage) -> Option<String> {
    storage
        .get_item(ACCESS_TOKEN_KEY)
        .filter(|token| !token.is_empty())
}

/// Storage backed by a single JSON object file.
pub(crate) struct FileStorage {
    path: PathBuf,
    items: BTreeMap<String, String>,
}

impl FileStorage {
    pub fn open(path: PathBuf) -> Result<Self, Error> {
        let items = match fs::read_to_string(&path) {
            Ok(raw) => serde_json::from_str(&raw)
                .with_context(|| format!("corrupted storage file {}", path.display()))?,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("no storage file at {}, starting empty", path.display());
                BTreeMap::new()
            }
            Err(e) => return Err(e).context("failed to read storage file"),
        };
        Ok(Self { path, items })
    }

    fn flush(&self) -> Result<(), Error> {
        let raw = serde_json::to_string_pretty(&self.items)?;
        fs::write(&self.path, raw)
            .with_context(|| format!("failed to write storage file {}", self.path.display()))
    }
}

impl LocalStorage for FileStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.get(key).cloned()
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), Error> {
        self.items.insert(key.to_string(), value.to_string());
        self.flush()
    }

    fn remove_item(&mut self, key: &str) -> Result<(), Error> {
        if self.items.remove(key).is_none() {
            warn!("nothing stored under {}", key);
            return Ok(());
        }
        self.flush()
    }
}

/// for test
#[cfg(test)]
#[derive(Default)]
pub(crate) struct MemoryStorage(BTreeMap<String, String>);

#[cfg(test)]
impl MemoryStorage {
    pub fn with_token(token: &str) -> Self {
        let mut storage = Self::default();
        storage.0.insert(ACCESS_TOKEN_KEY.to_string(), token.to_string());
        storage
    }
}

#[cfg(test)]
impl LocalStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.0.get(key).cloned()
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), Error> {
        self.0.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> Result<(), Error> {
        self.0.remove(key);
        Ok(())
    }
}
