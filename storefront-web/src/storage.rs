//! Session storage backend for the selection mirror.
use gloo::storage::{SessionStorage, Storage};
use storefront_core::SelectionStorage;

use crate::dom;

/// Per-tab `sessionStorage`, checked on every call so a page that gains or
/// loses storage access mid-session is handled.
#[derive(Debug, Clone, Copy, Default)]
pub struct WebSessionStorage;

#[derive(Debug, thiserror::Error)]
pub enum WebStorageError {
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
    #[error("Storage error: {0}")]
    Operation(String),
}

/// `SessionStorage::raw` throws when storage is blocked, so probe first.
fn handle() -> Result<web_sys::Storage, WebStorageError> {
    dom::session_storage().map_err(|e| WebStorageError::Unavailable(dom::js_error_message(&e)))?;
    Ok(SessionStorage::raw())
}

impl SelectionStorage for WebSessionStorage {
    type Error = WebStorageError;

    // Raw text in and out: decoding stays with `Selection::decode`.
    fn read(&self, key: &str) -> Result<Option<String>, Self::Error> {
        handle()?
            .get_item(key)
            .map_err(|e| WebStorageError::Operation(dom::js_error_message(&e)))
    }

    fn write(&self, key: &str, value: &str) -> Result<(), Self::Error> {
        handle()?
            .set_item(key, value)
            .map_err(|e| WebStorageError::Operation(dom::js_error_message(&e)))
    }

    fn remove(&self, key: &str) -> Result<(), Self::Error> {
        handle()?;
        SessionStorage::delete(key);
        Ok(())
    }
}
