//! Auto-detect the best available storage backend.
//!
//! Priority: localStorage → Memory (fallback)

use super::{LocalStorage, MemoryStorage};
use radchat_core::ports::StoragePort;
use radchat_types::config::StorageBackendType;
use std::rc::Rc;

/// Open the backend the config asks for, falling back to memory when
/// localStorage is unavailable. Returns a trait object so callers are
/// backend-agnostic.
pub fn auto_detect_storage(backend: StorageBackendType) -> Rc<dyn StoragePort> {
    match backend {
        StorageBackendType::Memory => Rc::new(MemoryStorage::new()),
        StorageBackendType::LocalStorage | StorageBackendType::Auto => {
            match LocalStorage::open() {
                Ok(ls) => {
                    log::info!("Storage backend: localStorage");
                    Rc::new(ls)
                }
                Err(e) => {
                    log::warn!("localStorage unavailable ({}), falling back to memory", e);
                    Rc::new(MemoryStorage::new())
                }
            }
        }
    }
}
