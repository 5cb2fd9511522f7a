use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use gloo_storage::{LocalStorage, Storage};

/// Key holding the email awaiting signup verification
pub const PENDING_EMAIL_KEY: &str = "email";

/// Shown when no pending email is stored
pub const PLACEHOLDER_EMAIL: &str = "example@gmail.com";

/// Small persisted string store
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<(), String>;
    fn remove(&self, key: &str);
}

/// Browser LocalStorage
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserStore;

/// Values are stored as plain strings, readable by any page on the origin
impl KeyValueStore for BrowserStore {
    fn get(&self, key: &str) -> Option<String> {
        stored_text(LocalStorage::raw().get_item(key).ok().flatten())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), String> {
        LocalStorage::raw()
            .set_item(key, value)
            .map_err(|e| format!("Failed to persist {}: {:?}", key, e))
    }

    fn remove(&self, key: &str) {
        if let Err(e) = LocalStorage::raw().remove_item(key) {
            log::warn!("Failed to remove {}: {:?}", key, e);
        }
    }
}

/// Decode a stored value. Earlier builds wrote JSON-quoted strings.
fn stored_text(raw: Option<String>) -> Option<String> {
    let raw = raw?;
    if raw.len() >= 2 && raw.starts_with('"') && raw.ends_with('"') {
        if let Ok(text) = serde_json::from_str::<String>(&raw) {
            return Some(text);
        }
    }
    Some(raw)
}

/// In-memory store, used off the browser and in tests
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    values: Rc<RefCell<HashMap<String, String>>>,
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), String> {
        self.values.borrow_mut().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) {
        self.values.borrow_mut().remove(key);
    }
}

/// Remember the email that has to be verified next
pub fn set_pending_email(store: &dyn KeyValueStore, email: &str) -> Result<(), String> {
    store.set(PENDING_EMAIL_KEY, email.trim())
}

pub fn pending_email(store: &dyn KeyValueStore) -> Option<String> {
    store.get(PENDING_EMAIL_KEY).filter(|e| !e.trim().is_empty())
}

pub fn clear_pending_email(store: &dyn KeyValueStore) {
    store.remove(PENDING_EMAIL_KEY);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pending_email_lifecycle() {
        let store = MemoryStore::default();
        assert_eq!(pending_email(&store), None);

        set_pending_email(&store, " ada@example.com ").unwrap();
        assert_eq!(pending_email(&store).as_deref(), Some("ada@example.com"));

        clear_pending_email(&store);
        assert_eq!(pending_email(&store), None);
    }

    #[test]
    fn test_blank_email_counts_as_missing() {
        let store = MemoryStore::default();
        store.set(PENDING_EMAIL_KEY, "  ").unwrap();
        assert_eq!(pending_email(&store), None);
    }

    #[test]
    fn test_stored_text_reads_plain_values() {
        assert_eq!(stored_text(Some("ada@example.com".into())).as_deref(), Some("ada@example.com"));
        assert_eq!(stored_text(None), None);
    }

    #[test]
    fn test_stored_text_unquotes_json_strings() {
        assert_eq!(stored_text(Some("\"ada@example.com\"".into())).as_deref(), Some("ada@example.com"));
        // A lone quote is kept as written
        assert_eq!(stored_text(Some("\"".into())).as_deref(), Some("\""));
    }

    #[test]
    fn test_clones_share_storage() {
        let store = MemoryStore::default();
        let other = store.clone();
        store.set("k", "v").unwrap();
        assert_eq!(other.get("k").as_deref(), Some("v"));
    }
}
