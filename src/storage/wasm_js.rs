//! Browser storage backend.

use super::{NoteStorage, StorageError, StorageFuture};
use web_sys::{wasm_bindgen::JsValue, Storage};

const LOCAL_STORAGE_PREFIX: &str = "note-";

impl From<JsValue> for StorageError {
    fn from(err: JsValue) -> Self {
        StorageError::WebSys(format!("{err:?}"))
    }
}

/// `window.localStorage` backed storage.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalStorage;

impl LocalStorage {
    /// Creates a new instance of [`LocalStorage`].
    pub fn new() -> Self {
        LocalStorage
    }

    fn local_storage(&self) -> Result<Storage, StorageError> {
        gloo_utils::window()
            .local_storage()?
            .ok_or_else(|| StorageError::Unavailable("localStorage is not available".to_string()))
    }
}

impl NoteStorage for LocalStorage {
    fn get<'a>(
        &'a mut self,
        key: &'a str,
    ) -> StorageFuture<'a, Result<Option<String>, StorageError>> {
        Box::pin(async move {
            let local_storage = self.local_storage()?;
            let key = format!("{LOCAL_STORAGE_PREFIX}{key}");
            Ok(local_storage.get_item(&key)?)
        })
    }

    fn set<'a>(
        &'a mut self,
        key: &'a str,
        value: String,
    ) -> StorageFuture<'a, Result<(), StorageError>> {
        Box::pin(async move {
            let local_storage = self.local_storage()?;
            let key = format!("{LOCAL_STORAGE_PREFIX}{key}");
            local_storage.set_item(&key, &value)?;
            Ok(())
        })
    }

    fn remove<'a>(&'a mut self, key: &'a str) -> StorageFuture<'a, Result<(), StorageError>> {
        Box::pin(async move {
            let local_storage = self.local_storage()?;
            let key = format!("{LOCAL_STORAGE_PREFIX}{key}");
            local_storage.remove_item(&key)?;
            Ok(())
        })
    }
}

impl From<LocalStorage> for Box<dyn NoteStorage> {
    fn from(storage: LocalStorage) -> Self {
        Box::new(storage)
    }
}
