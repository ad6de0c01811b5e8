use std::cell::RefCell;
use std::collections::HashMap;

use log::warn;
use thiserror::Error;

use crate::widget::drag::WidgetPosition;

/// Storage key of the remembered floating position.
pub const POSITION_STORAGE_KEY: &str = "contactDockPosition";

/// Storage key for the `instance`-th dock of a page. The first dock keeps the
/// bare key so positions stored before multi-dock pages stay valid.
pub fn position_key(instance: usize) -> String {
    match instance {
        0 => POSITION_STORAGE_KEY.to_string(),
        n => format!("{}-{}", POSITION_STORAGE_KEY, n),
    }
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage is not available")]
    Unavailable,
    #[error("storage rejected the write: {0}")]
    Rejected(String),
}

/// Client-side string key/value store (`localStorage` in the browser).
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// Best-effort persistence of the floating widget position.
///
/// Reads treat a corrupt payload like a missing one; failed writes are
/// logged and otherwise ignored, so the current page keeps working.
pub struct PositionStore<S> {
    store: S,
    key: String,
}

impl<S: KeyValueStore> PositionStore<S> {
    pub fn new(store: S) -> Self {
        Self::with_key(store, POSITION_STORAGE_KEY)
    }

    /// Store of the `instance`-th dock on the page, see [`position_key`].
    pub fn for_instance(store: S, instance: usize) -> Self {
        Self::with_key(store, &position_key(instance))
    }

    pub fn with_key(store: S, key: &str) -> Self {
        Self {
            store,
            key: key.to_string(),
        }
    }

    pub fn load(&self) -> Option<WidgetPosition> {
        self.store.get(&self.key).as_deref().and_then(WidgetPosition::decode)
    }

    /// Returns whether the position was persisted.
    pub fn save(&self, position: WidgetPosition) -> bool {
        match self.store.set(&self.key, &position.encode()) {
            Ok(()) => true,
            Err(e) => {
                warn!("could not persist widget position: {}", e);
                false
            }
        }
    }
}

/// In-memory store, optionally refusing every write.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<HashMap<String, String>>,
    read_only: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose writes always fail, like a full quota or private mode.
    pub fn read_only() -> Self {
        Self {
            entries: RefCell::default(),
            read_only: true,
        }
    }

    pub fn insert(&self, key: &str, value: &str) {
        self.entries.borrow_mut().insert(key.to_string(), value.to_string());
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        if self.read_only {
            return Err(StoreError::Rejected("quota exceeded".to_string()));
        }
        self.insert(key, value);
        Ok(())
    }
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for &T {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set(key, value)
    }
}
