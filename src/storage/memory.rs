//! In-memory storage backend.

use super::{NoteStorage, StorageError, StorageFuture};
use parking_lot::Mutex;
use std::{collections::HashMap, sync::Arc};

/// Map-backed storage for tests and headless embeddings.
///
/// Clones share the same underlying map, so a handle kept by the caller
/// observes writes made through a [`NoteStore`](crate::NoteStore) that owns
/// another clone.
#[derive(Debug, Default, Clone)]
pub struct MemoryStorage {
    values: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStorage {
    /// Creates an empty [`MemoryStorage`].
    pub fn new() -> Self {
        Self::default()
    }
}

impl NoteStorage for MemoryStorage {
    fn get<'a>(
        &'a mut self,
        key: &'a str,
    ) -> StorageFuture<'a, Result<Option<String>, StorageError>> {
        Box::pin(async move { Ok(self.values.lock().get(key).cloned()) })
    }

    fn set<'a>(
        &'a mut self,
        key: &'a str,
        value: String,
    ) -> StorageFuture<'a, Result<(), StorageError>> {
        Box::pin(async move {
            self.values.lock().insert(key.to_string(), value);
            Ok(())
        })
    }

    fn remove<'a>(&'a mut self, key: &'a str) -> StorageFuture<'a, Result<(), StorageError>> {
        Box::pin(async move {
            self.values.lock().remove(key);
            Ok(())
        })
    }
}

impl From<MemoryStorage> for Box<dyn NoteStorage> {
    fn from(storage: MemoryStorage) -> Self {
        Box::new(storage)
    }
}
