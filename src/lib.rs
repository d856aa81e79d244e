//! Client library for two-screen rich-text note-taking applications.
//!
//! A [`NoteStore`] owns the serialized note collection in key-value storage,
//! an [`EditorSession`] binds a rich-text editor widget to it, and a
//! [`ListSession`] drives the list screen, reloading whenever it regains
//! focus. Storage, editor widget, and navigation are boundary traits the
//! embedding shell implements.

pub mod callback;
pub mod editor;
pub mod focus_manager;
pub mod list;
pub mod navigation;
pub mod note;
pub mod option;
pub mod storage;
pub mod store;
mod util;

pub use callback::{OnSaveError, OnSaved};
pub use editor::{EditorBridge, EditorError, EditorSession, SaveError};
pub use focus_manager::{FocusManager, FocusManagerOptions};
pub use list::ListSession;
pub use navigation::{Navigator, Route, SharedNavigator};
pub use note::Note;
pub use option::EditorSessionOptions;
#[cfg(feature = "native")]
pub use storage::FileStorage;
#[cfg(feature = "wasm-js")]
pub use storage::LocalStorage;
pub use storage::{MemoryStorage, NoteStorage, StorageError, NOTES_STORAGE_KEY};
pub use store::{NoteStore, StoreError};
