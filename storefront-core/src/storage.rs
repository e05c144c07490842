//! Key-value storage abstraction for persisted selections.
use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use thiserror::Error;

/// Trait for abstracting the per-tab storage used to mirror selections.
/// Platform-specific implementations should provide this.
pub trait SelectionStorage {
    type Error: std::error::Error + 'static;

    /// Read the raw text stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage backend is unavailable.
    fn read(&self, key: &str) -> Result<Option<String>, Self::Error>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend is unavailable or refuses the write (quota).
    fn write(&self, key: &str, value: &str) -> Result<(), Self::Error>;

    /// Remove `key` if present.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage backend is unavailable.
    fn remove(&self, key: &str) -> Result<(), Self::Error>;
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("storage unavailable")]
pub struct MemoryStorageError;

/// In-memory storage, used off-browser and in tests.
///
/// `set_unavailable(true)` makes every operation fail, mimicking disabled
/// storage or an exhausted quota.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: RefCell<BTreeMap<String, String>>,
    unavailable: Cell<bool>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.set(unavailable);
    }

    #[must_use]
    pub fn raw(&self, key: &str) -> Option<String> {
        self.items.borrow().get(key).cloned()
    }

    /// Seed a raw value, bypassing the unavailable flag.
    pub fn insert_raw(&self, key: &str, value: &str) {
        self.items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
    }

    fn check(&self) -> Result<(), MemoryStorageError> {
        if self.unavailable.get() {
            Err(MemoryStorageError)
        } else {
            Ok(())
        }
    }
}

impl SelectionStorage for MemoryStorage {
    type Error = MemoryStorageError;

    fn read(&self, key: &str) -> Result<Option<String>, Self::Error> {
        self.check()?;
        Ok(self.raw(key))
    }

    fn write(&self, key: &str, value: &str) -> Result<(), Self::Error> {
        self.check()?;
        self.insert_raw(key, value);
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), Self::Error> {
        self.check()?;
        self.items.borrow_mut().remove(key);
        Ok(())
    }
}

impl<S: SelectionStorage + ?Sized> SelectionStorage for std::rc::Rc<S> {
    type Error = S::Error;

    fn read(&self, key: &str) -> Result<Option<String>, Self::Error> {
        (**self).read(key)
    }

    fn write(&self, key: &str, value: &str) -> Result<(), Self::Error> {
        (**self).write(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), Self::Error> {
        (**self).remove(key)
    }
}
