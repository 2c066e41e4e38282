//! Browser localStorage backend.
//!
//! Persistent across reloads within the same origin. Documents are
//! whole JSON strings, so every write replaces the key. Quota and
//! privacy-mode failures surface as storage errors.

use async_trait::async_trait;
use radchat_core::ports::StoragePort;
use radchat_types::{AppError, Result};
use wasm_bindgen::JsValue;

fn js_err(context: &str, e: JsValue) -> AppError {
    AppError::Storage(format!("{}: {:?}", context, e))
}

pub struct LocalStorage;

impl LocalStorage {
    /// Open the window's localStorage area. Fails when running outside
    /// a window context or when the browser blocks access.
    pub fn open() -> Result<Self> {
        store()?;
        Ok(Self)
    }
}

fn store() -> Result<web_sys::Storage> {
    let window =
        web_sys::window().ok_or_else(|| AppError::Storage("no window context".to_string()))?;
    match window.local_storage() {
        Ok(Some(storage)) => Ok(storage),
        Ok(None) => Err(AppError::Storage("localStorage unavailable".to_string())),
        Err(e) => Err(js_err("localStorage blocked", e)),
    }
}

#[async_trait(?Send)]
impl StoragePort for LocalStorage {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        store()?.get_item(key).map_err(|e| js_err(key, e))
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        store()?.set_item(key, value).map_err(|e| js_err(key, e))
    }

    async fn delete(&self, key: &str) -> Result<()> {
        store()?.remove_item(key).map_err(|e| js_err(key, e))
    }

    async fn list_keys(&self, prefix: &str) -> Result<Vec<String>> {
        let storage = store()?;
        let len = storage
            .length()
            .map_err(|e| js_err("localStorage length", e))?;
        let mut keys = Vec::new();
        for i in 0..len {
            if let Some(key) = storage.key(i).map_err(|e| js_err("localStorage key", e))? {
                if key.starts_with(prefix) {
                    keys.push(key);
                }
            }
        }
        Ok(keys)
    }

    fn backend_name(&self) -> &str {
        "localStorage"
    }
}
