//! The note list screen's controller.

use crate::{
    focus_manager::FocusManager,
    navigation::{Route, SharedNavigator},
    note::Note,
    store::{NoteStore, StoreError},
};
use parking_lot::Mutex;
use std::{
    fmt,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
};
#[cfg(feature = "tracing")]
use tracing::{error, warn};

struct ListSessionInner {
    store: NoteStore,
    navigator: SharedNavigator,
    notes: Mutex<Vec<Note>>,
    stale: AtomicBool,
}

/// Clone-able handle to the list screen state.
///
/// The cached collection is what the screen renders; it is replaced from the
/// store on every focus event and after every delete, never mutated in
/// place.
#[derive(Clone)]
pub struct ListSession(Arc<ListSessionInner>);

impl ListSession {
    /// Creates a session over `store`, navigating through `navigator`.
    ///
    /// The session starts stale, so the first [`sync`](Self::sync) performs
    /// the initial load.
    pub fn new(store: NoteStore, navigator: impl Into<SharedNavigator>) -> Self {
        Self(Arc::new(ListSessionInner {
            store,
            navigator: navigator.into(),
            notes: Mutex::new(Vec::new()),
            stale: AtomicBool::new(true),
        }))
    }

    /// Subscribes this session to a focus event source.
    ///
    /// Every event marks the cached collection stale; the next
    /// [`sync`](Self::sync) reloads it.
    pub fn attach_focus(&self, focus: &FocusManager) {
        let session = self.clone();
        focus.register_callback(move || session.mark_stale());
    }

    /// Marks the cached collection stale.
    pub fn mark_stale(&self) {
        self.0.stale.store(true, Ordering::SeqCst);
    }

    /// Reloads the cached collection when a focus event has marked it
    /// stale.
    pub async fn sync(&self) {
        if self.0.stale.swap(false, Ordering::SeqCst) {
            self.refresh().await;
        }
    }

    /// Replaces the cached collection from the store.
    ///
    /// A failed or malformed read renders as an empty list; the screen must
    /// still draw.
    pub async fn refresh(&self) {
        match self.0.store.load_all().await {
            Ok(notes) => *self.0.notes.lock() = notes,
            Err(_e) => {
                #[cfg(feature = "tracing")]
                error!("Failed to load notes: {_e}");
                self.0.notes.lock().clear();
            }
        }
    }

    /// Snapshot of the cached collection.
    pub fn notes(&self) -> Vec<Note> {
        self.0.notes.lock().clone()
    }

    /// Whether the cached collection is empty and the screen shows its
    /// placeholder row.
    pub fn is_empty(&self) -> bool {
        self.0.notes.lock().is_empty()
    }

    /// Navigates to the editor seeded with an existing note's markup.
    ///
    /// An id that is not in the cached collection is ignored.
    pub fn open_note(&self, id: &str) {
        let route = {
            let notes = self.0.notes.lock();
            let Some(note) = notes.iter().find(|note| note.id == id) else {
                #[cfg(feature = "tracing")]
                warn!("Ignoring open request for unknown note id {id}");
                return;
            };
            Route::Editor {
                note_id: Some(note.id.clone()),
                note_content: Some(note.html.clone()),
            }
            // lock released before navigating; the shell may call back in
        };
        self.0.navigator.navigate(route);
    }

    /// Navigates to the editor with no parameters, for a new note.
    pub fn create_note(&self) {
        self.0.navigator.navigate(Route::Editor {
            note_id: None,
            note_content: None,
        });
    }

    /// Deletes a note, then re-reads the collection so the cached state
    /// reflects what was actually persisted.
    pub async fn delete_note(&self, id: &str) -> Result<(), StoreError> {
        if let Err(e) = self.0.store.delete_by_id(id).await {
            #[cfg(feature = "tracing")]
            error!("Failed to delete note {id}: {e}");
            return Err(e);
        }
        self.refresh().await;
        Ok(())
    }
}

impl fmt::Debug for ListSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListSession")
            .field("notes", &self.0.notes.lock().len())
            .field("stale", &self.0.stale.load(Ordering::SeqCst))
            .finish()
    }
}

#[cfg(all(test, not(target_family = "wasm")))]
mod tests {
    use super::*;
    use crate::{
        navigation::Navigator,
        storage::{MemoryStorage, NoteStorage, NOTES_STORAGE_KEY},
    };

    #[derive(Clone, Default)]
    struct RecordingNavigator {
        routes: Arc<Mutex<Vec<Route>>>,
    }

    impl Navigator for RecordingNavigator {
        fn navigate(&mut self, route: Route) {
            self.routes.lock().push(route);
        }

        fn go_back(&mut self) {}
    }

    fn note(id: &str, content: &str) -> Note {
        Note::with_id(id, content, format!("<p>{content}</p>"))
    }

    async fn seeded_session() -> (ListSession, NoteStore, RecordingNavigator) {
        let store = NoteStore::new(MemoryStorage::new());
        for id in ["A", "B", "C"] {
            store.upsert(note(id, id)).await.unwrap();
        }
        let navigator = RecordingNavigator::default();
        let session = ListSession::new(store.clone(), navigator.clone());
        session.sync().await;
        (session, store, navigator)
    }

    #[tokio::test]
    async fn first_sync_loads_the_collection() {
        let (session, _, _) = seeded_session().await;
        assert_eq!(session.notes().len(), 3);
        assert!(!session.is_empty());
    }

    #[tokio::test]
    async fn sync_without_focus_event_does_not_reload() {
        let (session, store, _) = seeded_session().await;
        store.upsert(note("D", "later")).await.unwrap();
        session.sync().await;
        assert_eq!(session.notes().len(), 3);
    }

    #[tokio::test]
    async fn focus_event_marks_stale_and_sync_reloads() {
        let (session, store, _) = seeded_session().await;
        let focus = FocusManager::new(None);
        session.attach_focus(&focus);

        store.upsert(note("D", "later")).await.unwrap();
        focus.notify_focus();
        session.sync().await;
        assert_eq!(session.notes().len(), 4);
    }

    #[tokio::test]
    async fn malformed_data_renders_as_empty() {
        let storage = MemoryStorage::new();
        let store = NoteStore::new(storage.clone());
        store.upsert(note("A", "body")).await.unwrap();
        let session = ListSession::new(store, RecordingNavigator::default());
        session.sync().await;
        assert_eq!(session.notes().len(), 1);

        let mut raw = storage.clone();
        raw.set(NOTES_STORAGE_KEY, "not json".to_string())
            .await
            .unwrap();
        session.refresh().await;
        assert!(session.is_empty());
    }

    #[tokio::test]
    async fn open_note_navigates_with_the_markup() {
        let (session, _, navigator) = seeded_session().await;
        session.open_note("B");
        let routes = navigator.routes.lock();
        assert_eq!(
            *routes,
            vec![Route::Editor {
                note_id: Some("B".to_string()),
                note_content: Some("<p>B</p>".to_string()),
            }]
        );
    }

    #[tokio::test]
    async fn open_note_with_unknown_id_is_ignored() {
        let (session, _, navigator) = seeded_session().await;
        session.open_note("Z");
        assert!(navigator.routes.lock().is_empty());
    }

    #[tokio::test]
    async fn create_note_navigates_without_parameters() {
        let (session, _, navigator) = seeded_session().await;
        session.create_note();
        let routes = navigator.routes.lock();
        assert_eq!(
            *routes,
            vec![Route::Editor {
                note_id: None,
                note_content: None,
            }]
        );
    }

    #[tokio::test]
    async fn delete_note_removes_and_reads_back() {
        let (session, store, _) = seeded_session().await;
        session.delete_note("B").await.unwrap();

        let cached: Vec<String> = session.notes().into_iter().map(|n| n.id).collect();
        assert_eq!(cached, ["A", "C"]);
        let stored: Vec<String> = store
            .load_all()
            .await
            .unwrap()
            .into_iter()
            .map(|n| n.id)
            .collect();
        assert_eq!(stored, ["A", "C"]);
    }
}
