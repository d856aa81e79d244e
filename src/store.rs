//! The note store: sole owner of durable note state.
//!
//! Every operation is a full read-modify-write cycle over the one serialized
//! collection. The dataset is personal-notes sized, so write amplification is
//! traded for a single storage shape; overlapping cycles are last-write-wins
//! on the whole collection, which is the documented behavior for a
//! single-screen-active application.

use crate::{
    note::Note,
    storage::{NoteStorage, StorageError, NOTES_STORAGE_KEY},
};
use parking_lot::Mutex;
use std::{fmt, sync::Arc};

/// Errors raised by [`NoteStore`] operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Reading the stored collection failed.
    #[error("Failed to read notes: {0}")]
    Read(#[source] StorageError),
    /// Writing the collection back failed.
    #[error("Failed to write notes: {0}")]
    Write(#[source] StorageError),
    /// The stored value is not a valid serialized note collection.
    #[error("Malformed note data: {0}")]
    Malformed(#[from] serde_json::Error),
}

struct NoteStoreInner {
    storage: Mutex<Box<dyn NoteStorage>>,
    key: String,
}

/// Handle to the durable note collection.
///
/// Clones share the same underlying storage, so every screen observes the
/// same persisted state.
#[derive(Clone)]
pub struct NoteStore(Arc<NoteStoreInner>);

impl NoteStore {
    /// Creates a store over `storage`, using [`NOTES_STORAGE_KEY`].
    pub fn new(storage: impl Into<Box<dyn NoteStorage>>) -> Self {
        Self::with_key(storage, NOTES_STORAGE_KEY)
    }

    /// Creates a store reading and writing under a custom collection key.
    pub fn with_key(storage: impl Into<Box<dyn NoteStorage>>, key: impl Into<String>) -> Self {
        Self(Arc::new(NoteStoreInner {
            storage: Mutex::new(storage.into()),
            key: key.into(),
        }))
    }

    /// Loads the full note collection.
    ///
    /// A key that has never been written reads as an empty collection; a
    /// present but unparseable value is [`StoreError::Malformed`], which the
    /// list boundary downgrades to an empty render.
    pub async fn load_all(&self) -> Result<Vec<Note>, StoreError> {
        let raw = {
            let mut storage = self.0.storage.lock();
            storage.get(&self.0.key).await.map_err(StoreError::Read)?
        };
        match raw {
            Some(raw) => Ok(serde_json::from_str(&raw)?),
            None => Ok(Vec::new()),
        }
    }

    /// Inserts `note`, or replaces the first entry with the same id in
    /// place.
    ///
    /// New ids are appended; the order of every other entry is unchanged.
    pub async fn upsert(&self, note: Note) -> Result<(), StoreError> {
        let mut notes = self.load_all().await?;
        match notes.iter_mut().find(|existing| existing.id == note.id) {
            Some(existing) => *existing = note,
            None => notes.push(note),
        }
        self.write_all(&notes).await
    }

    /// Removes every entry whose id equals `id` and writes the reduced
    /// collection back.
    ///
    /// Deleting an absent id rewrites the collection unchanged.
    pub async fn delete_by_id(&self, id: &str) -> Result<(), StoreError> {
        let mut notes = self.load_all().await?;
        notes.retain(|note| note.id != id);
        self.write_all(&notes).await
    }

    async fn write_all(&self, notes: &[Note]) -> Result<(), StoreError> {
        let serialized = serde_json::to_string(notes)?;
        let mut storage = self.0.storage.lock();
        storage
            .set(&self.0.key, serialized)
            .await
            .map_err(StoreError::Write)
    }
}

impl fmt::Debug for NoteStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NoteStore").field("key", &self.0.key).finish()
    }
}
