//! Key-value persistence boundary for the note collection.
//!
//! Backends implement [`NoteStorage`]; the note store serializes the whole
//! collection as one value under [`NOTES_STORAGE_KEY`].

use futures::future::LocalBoxFuture;

#[cfg(feature = "native")]
mod file;
mod memory;
#[cfg(feature = "wasm-js")]
mod wasm_js;

#[cfg(feature = "native")]
pub use file::FileStorage;
pub use memory::MemoryStorage;
#[cfg(feature = "wasm-js")]
pub use wasm_js::LocalStorage;

/// The well-known key holding the serialized note collection.
pub const NOTES_STORAGE_KEY: &str = "notes";

/// Future type returned by [`NoteStorage`] operations.
pub type StorageFuture<'a, T> = LocalBoxFuture<'a, T>;

/// Errors raised by a storage backend.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// Filesystem I/O failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// A browser storage API call failed.
    #[cfg(feature = "wasm-js")]
    #[error("Web storage error: {0}")]
    WebSys(String),
    /// The backend is not usable in the current environment.
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

/// Trait for persisting raw values by key.
///
/// All operations are suspending; callers must tolerate an arbitrary delay
/// before a returned future resolves.
pub trait NoteStorage: Send {
    /// Retrieves the raw value stored under `key`.
    ///
    /// Returns `Ok(None)` when the key has never been written.
    fn get<'a>(
        &'a mut self,
        key: &'a str,
    ) -> StorageFuture<'a, Result<Option<String>, StorageError>>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set<'a>(
        &'a mut self,
        key: &'a str,
        value: String,
    ) -> StorageFuture<'a, Result<(), StorageError>>;

    /// Removes the value stored under `key`. Removing an absent key is not
    /// an error.
    fn remove<'a>(&'a mut self, key: &'a str) -> StorageFuture<'a, Result<(), StorageError>>;
}
