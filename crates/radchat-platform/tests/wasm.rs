//! WASM-target tests for radchat-platform (Node.js runtime).
//!
//! Tests MemoryStorage and the backend selector under
//! wasm32-unknown-unknown via `wasm-pack test --node`.
//!
//! localStorage needs a window and is exercised in a browser run.

use wasm_bindgen_test::*;

use radchat_core::ports::StoragePort;
use radchat_core::sessions::{SessionStore, SESSIONS_KEY};
use radchat_platform::storage::{auto_detect_storage, MemoryStorage};
use radchat_types::config::StorageBackendType;

// ─── MemoryStorage Tests ─────────────────────────────────

#[wasm_bindgen_test]
fn memory_storage_backend_name() {
    let storage = MemoryStorage::new();
    assert_eq!(storage.backend_name(), "memory");
}

#[wasm_bindgen_test]
async fn memory_storage_get_missing() {
    let storage = MemoryStorage::new();
    let result = storage.get("nonexistent").await.unwrap();
    assert!(result.is_none());
}

#[wasm_bindgen_test]
async fn memory_storage_set_and_get() {
    let storage = MemoryStorage::new();
    storage.set("key1", "value1").await.unwrap();
    let result = storage.get("key1").await.unwrap();
    assert_eq!(result, Some("value1".to_string()));
}

#[wasm_bindgen_test]
async fn memory_storage_overwrite() {
    let storage = MemoryStorage::new();
    storage.set("key", "v1").await.unwrap();
    storage.set("key", "v2").await.unwrap();
    let result = storage.get("key").await.unwrap();
    assert_eq!(result, Some("v2".to_string()));
}

#[wasm_bindgen_test]
async fn memory_storage_delete() {
    let storage = MemoryStorage::new();
    storage.set("key", "val").await.unwrap();
    storage.delete("key").await.unwrap();
    assert!(storage.get("key").await.unwrap().is_none());
}

#[wasm_bindgen_test]
async fn memory_storage_delete_nonexistent() {
    let storage = MemoryStorage::new();
    storage.delete("nonexistent").await.unwrap();
}

#[wasm_bindgen_test]
async fn memory_storage_exists() {
    let storage = MemoryStorage::new();
    assert!(!storage.exists("key").await.unwrap());
    storage.set("key", "val").await.unwrap();
    assert!(storage.exists("key").await.unwrap());
}

#[wasm_bindgen_test]
async fn memory_storage_list_keys_by_prefix() {
    let storage = MemoryStorage::new();
    storage.set("radiology-cases", "[]").await.unwrap();
    storage.set("radiology-chat-sessions", "[]").await.unwrap();
    storage.set("other", "x").await.unwrap();

    let keys = storage.list_keys("radiology-").await.unwrap();
    assert_eq!(keys, vec!["radiology-cases", "radiology-chat-sessions"]);
}

#[wasm_bindgen_test]
async fn memory_storage_unicode_document() {
    let storage = MemoryStorage::new();
    let doc = r#"[{"title":"胸部CT 🩻"}]"#;
    storage.set(SESSIONS_KEY, doc).await.unwrap();
    assert_eq!(storage.get(SESSIONS_KEY).await.unwrap().as_deref(), Some(doc));
}

// ─── Backend selection ───────────────────────────────────

#[wasm_bindgen_test]
async fn explicit_memory_backend() {
    let storage = auto_detect_storage(StorageBackendType::Memory);
    assert_eq!(storage.backend_name(), "memory");
}

#[wasm_bindgen_test]
async fn auto_falls_back_without_window() {
    // Node has no window, so auto-detection lands on memory
    let storage = auto_detect_storage(StorageBackendType::Auto);
    assert_eq!(storage.backend_name(), "memory");
}

// ─── Store round-trip over a real backend ────────────────

#[wasm_bindgen_test]
async fn session_store_round_trip_over_backend() {
    let storage = auto_detect_storage(StorageBackendType::Memory);
    let mut store = SessionStore::new();
    store.create(None, None);
    store.persist(storage.as_ref()).await.unwrap();

    let mut restored = SessionStore::new();
    restored.load(storage.as_ref()).await.unwrap();
    assert_eq!(restored.len(), 1);
}
