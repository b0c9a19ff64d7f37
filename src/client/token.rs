use serde_json::Value;
use std::collections::HashMap;
use std::sync::RwLock;

use crate::types::json::message_field;

pub const USER_KEY: &str = "user";
pub const TOKEN_KEY: &str = "token";

/// Key/value store the client reads its session token from.
pub trait TokenStore: Send + Sync {
    fn get_item(&self, key: &str) -> Option<String>;
}

/// Resolve the bearer token: the `token` of the stored `user` object wins,
/// then the bare `token` entry. An empty `user` entry counts as absent; a
/// corrupt one yields no token at all.
pub fn resolve_bearer(store: &dyn TokenStore) -> Option<String> {
    if let Some(user_str) = store.get_item(USER_KEY).filter(|s| !s.is_empty()) {
        let user: Value = serde_json::from_str(&user_str).ok()?;
        if user.is_null() {
            return None;
        }
        if let Some(token) = message_field(&user, TOKEN_KEY) {
            return Some(token);
        }
    }
    store.get_item(TOKEN_KEY).filter(|t| !t.is_empty())
}

/// In-process store, for CLIs and tests.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    items: RwLock<HashMap<String, String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_item(&self, key: impl Into<String>, value: impl Into<String>) {
        if let Ok(mut items) = self.items.write() {
            items.insert(key.into(), value.into());
        }
    }

    pub fn remove_item(&self, key: &str) {
        if let Ok(mut items) = self.items.write() {
            items.remove(key);
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.read().ok()?.get(key).cloned()
    }
}
