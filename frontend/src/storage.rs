//! Key/value persistence seam.
//!
//! Production code goes through [`BrowserStorage`] (localStorage via
//! `gloo-storage`); tests swap in [`MemoryStore`] so session logic runs
//! on the host without a browser.

use serde::Serialize;
use serde::de::DeserializeOwned;

/// Typed key/value storage.
///
/// Values are stored as JSON. A failed read (missing key, corrupt value)
/// is reported as `None`; writes report success as a bool because the
/// browser can refuse them (quota, private mode) and callers treat that
/// as non-fatal.
pub trait KeyValueStore {
    fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T>;
    fn set<T: Serialize>(&self, key: &str, value: &T) -> bool;
    fn remove(&self, key: &str);
}

/// localStorage-backed store used by the running application.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserStorage;

impl KeyValueStore for BrowserStorage {
    fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        use gloo_storage::{LocalStorage, Storage};
        LocalStorage::get(key).ok()
    }

    fn set<T: Serialize>(&self, key: &str, value: &T) -> bool {
        use gloo_storage::{LocalStorage, Storage};
        LocalStorage::set(key, value).is_ok()
    }

    fn remove(&self, key: &str) {
        use gloo_storage::{LocalStorage, Storage};
        LocalStorage::delete(key);
    }
}

/// In-memory store for tests. Keeps the JSON encoding step so values go
/// through the same serialization path as localStorage.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: std::cell::RefCell<std::collections::HashMap<String, String>>,
}

#[cfg(test)]
impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.borrow().contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }
}

#[cfg(test)]
impl KeyValueStore for MemoryStore {
    fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let entries = self.entries.borrow();
        let raw = entries.get(key)?;
        serde_json::from_str(raw).ok()
    }

    fn set<T: Serialize>(&self, key: &str, value: &T) -> bool {
        match serde_json::to_string(value) {
            Ok(raw) => {
                self.entries.borrow_mut().insert(key.to_string(), raw);
                true
            }
            Err(_) => false,
        }
    }

    fn remove(&self, key: &str) {
        self.entries.borrow_mut().remove(key);
    }
}
