//! Editor sessions over an embeddable rich-text widget.

use crate::{
    callback::{OnSaveError, OnSaved},
    navigation::SharedNavigator,
    note::Note,
    option::EditorSessionOptions,
    store::{NoteStore, StoreError},
};
use futures::future::LocalBoxFuture;
use std::fmt;
#[cfg(feature = "tracing")]
use tracing::error;

/// Future type returned by [`EditorBridge`] operations.
pub type EditorFuture<'a, T> = LocalBoxFuture<'a, T>;

/// An error raised by the rich-text widget.
///
/// Widgets typically run in a webview and report failures as messages, so
/// this carries the message through unchanged.
#[derive(Debug, Clone, thiserror::Error)]
#[error("Editor error: {0}")]
pub struct EditorError(pub String);

/// Trait implemented by the embedding rich-text editor widget.
///
/// Extraction is suspending: the widget answers over a bridge, not from
/// local state.
pub trait EditorBridge {
    /// Replaces the editing surface content with `html`.
    fn set_content<'a>(&'a mut self, html: &'a str) -> EditorFuture<'a, Result<(), EditorError>>;

    /// Returns the plain-text rendering of the current document.
    fn get_text<'a>(&'a mut self) -> EditorFuture<'a, Result<String, EditorError>>;

    /// Returns the markup rendering of the current document.
    fn get_html<'a>(&'a mut self) -> EditorFuture<'a, Result<String, EditorError>>;
}

/// Errors raised while saving an editor session.
#[derive(Debug, thiserror::Error)]
pub enum SaveError {
    /// Extracting a rendering from the widget failed.
    #[error(transparent)]
    Editor(#[from] EditorError),
    /// Persisting the note failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// A single editing session over one note.
///
/// Seed it with an existing note's id and markup to edit, or with nothing to
/// create. There is no draft autosave and no undo stack here; anything of
/// that kind belongs to the widget.
pub struct EditorSession {
    editor: Box<dyn EditorBridge>,
    store: NoteStore,
    note_id: Option<String>,
    navigator: Option<SharedNavigator>,
    on_saved: Option<OnSaved>,
    on_save_error: Option<OnSaveError>,
}

impl EditorSession {
    /// Opens a session for a new, empty note with default options.
    pub async fn new<E>(store: NoteStore, editor: E) -> Result<Self, EditorError>
    where
        E: EditorBridge + 'static,
    {
        Self::new_with_options(store, editor, EditorSessionOptions::default()).await
    }

    /// Opens a session, seeding the editing surface when
    /// `options.initial_content` is provided.
    pub async fn new_with_options<E>(
        store: NoteStore,
        editor: E,
        options: EditorSessionOptions,
    ) -> Result<Self, EditorError>
    where
        E: EditorBridge + 'static,
    {
        let mut editor: Box<dyn EditorBridge> = Box::new(editor);
        if let Some(initial_content) = options.initial_content.as_deref() {
            editor.set_content(initial_content).await?;
        }
        Ok(Self {
            editor,
            store,
            note_id: options.note_id,
            navigator: options.navigator,
            on_saved: options.on_saved,
            on_save_error: options.on_save_error,
        })
    }

    /// The id the next save will write under, when editing an existing note.
    pub fn note_id(&self) -> Option<&str> {
        self.note_id.as_deref()
    }

    /// Extracts both renderings from the widget and upserts them as one
    /// note, reusing the session's note id when present.
    ///
    /// Resolves only once the write has completed. A failed save fires the
    /// error callback and leaves the stored collection untouched; the caller
    /// stays on the editor screen.
    pub async fn save(&mut self) -> Result<Note, SaveError> {
        match self.save_inner().await {
            Ok(note) => {
                if let Some(on_saved) = &self.on_saved {
                    (on_saved.0.lock())(note.clone());
                }
                Ok(note)
            }
            Err(e) => {
                #[cfg(feature = "tracing")]
                error!("Failed to save note: {e}");
                if let Some(on_save_error) = &self.on_save_error {
                    (on_save_error.0.lock())(e.to_string());
                }
                Err(e)
            }
        }
    }

    /// Saves, then navigates back to the list screen.
    ///
    /// Navigation happens only after persistence has confirmed; on failure
    /// the editor stays on screen.
    pub async fn save_and_close(&mut self) -> Result<Note, SaveError> {
        let note = self.save().await?;
        if let Some(navigator) = &self.navigator {
            navigator.go_back();
        }
        Ok(note)
    }

    async fn save_inner(&mut self) -> Result<Note, SaveError> {
        let content = self.editor.get_text().await?;
        let html = self.editor.get_html().await?;
        let note = match self.note_id.clone() {
            Some(id) => Note::with_id(id, content, html),
            None => Note::new(content, html),
        };
        self.store.upsert(note.clone()).await?;
        Ok(note)
    }
}

impl fmt::Debug for EditorSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EditorSession")
            .field("note_id", &self.note_id)
            .finish()
    }
}

#[cfg(all(test, not(target_family = "wasm")))]
mod tests {
    use super::*;
    use crate::{
        navigation::{Navigator, Route},
        storage::MemoryStorage,
    };
    use parking_lot::Mutex;
    use std::sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    };

    /// Widget double that answers extraction calls from scripted fields.
    #[derive(Default)]
    struct ScriptedEditor {
        seeded: Arc<Mutex<Option<String>>>,
        text: String,
        html: String,
        fail_extraction: bool,
    }

    impl EditorBridge for ScriptedEditor {
        fn set_content<'a>(
            &'a mut self,
            html: &'a str,
        ) -> EditorFuture<'a, Result<(), EditorError>> {
            Box::pin(async move {
                *self.seeded.lock() = Some(html.to_string());
                Ok(())
            })
        }

        fn get_text<'a>(&'a mut self) -> EditorFuture<'a, Result<String, EditorError>> {
            Box::pin(async move {
                if self.fail_extraction {
                    return Err(EditorError("bridge detached".to_string()));
                }
                Ok(self.text.clone())
            })
        }

        fn get_html<'a>(&'a mut self) -> EditorFuture<'a, Result<String, EditorError>> {
            Box::pin(async move {
                if self.fail_extraction {
                    return Err(EditorError("bridge detached".to_string()));
                }
                Ok(self.html.clone())
            })
        }
    }

    #[derive(Clone, Default)]
    struct RecordingNavigator {
        backs: Arc<AtomicUsize>,
    }

    impl Navigator for RecordingNavigator {
        fn navigate(&mut self, _route: Route) {}

        fn go_back(&mut self) {
            self.backs.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn store() -> NoteStore {
        NoteStore::new(MemoryStorage::new())
    }

    #[tokio::test]
    async fn construction_seeds_the_editor() {
        let seeded = Arc::new(Mutex::new(None));
        let editor = ScriptedEditor {
            seeded: seeded.clone(),
            ..Default::default()
        };
        let options = EditorSessionOptions::builder()
            .initial_content("<p>seed</p>")
            .build();
        EditorSession::new_with_options(store(), editor, options)
            .await
            .unwrap();
        assert_eq!(seeded.lock().as_deref(), Some("<p>seed</p>"));
    }

    #[tokio::test]
    async fn construction_without_content_leaves_editor_empty() {
        let seeded = Arc::new(Mutex::new(None));
        let editor = ScriptedEditor {
            seeded: seeded.clone(),
            ..Default::default()
        };
        EditorSession::new(store(), editor).await.unwrap();
        assert!(seeded.lock().is_none());
    }

    #[tokio::test]
    async fn save_of_a_new_session_appends_a_note() {
        let store = store();
        let editor = ScriptedEditor {
            text: "hello".to_string(),
            html: "<p>hello</p>".to_string(),
            ..Default::default()
        };
        let mut session = EditorSession::new(store.clone(), editor).await.unwrap();
        let saved = session.save().await.unwrap();

        let notes = store.load_all().await.unwrap();
        assert_eq!(notes, vec![saved.clone()]);
        assert_eq!(saved.content, "hello");
        assert_eq!(saved.html, "<p>hello</p>");
        assert!(!saved.id.is_empty());
    }

    #[tokio::test]
    async fn save_with_existing_id_replaces_the_note() {
        let store = store();
        store
            .upsert(Note::with_id("A", "old", "<p>old</p>"))
            .await
            .unwrap();

        let editor = ScriptedEditor {
            text: "new".to_string(),
            html: "<p>new</p>".to_string(),
            ..Default::default()
        };
        let options = EditorSessionOptions::builder().note_id("A").build();
        let mut session = EditorSession::new_with_options(store.clone(), editor, options)
            .await
            .unwrap();
        session.save().await.unwrap();

        let notes = store.load_all().await.unwrap();
        assert_eq!(notes, vec![Note::with_id("A", "new", "<p>new</p>")]);
    }

    #[tokio::test]
    async fn failed_extraction_fires_error_callback_and_writes_nothing() {
        let store = store();
        let editor = ScriptedEditor {
            fail_extraction: true,
            ..Default::default()
        };
        let messages = Arc::new(Mutex::new(Vec::new()));
        let messages_clone = messages.clone();
        let options = EditorSessionOptions::builder()
            .on_save_error(move |message: String| {
                messages_clone.lock().push(message);
            })
            .build();
        let mut session = EditorSession::new_with_options(store.clone(), editor, options)
            .await
            .unwrap();

        assert!(matches!(session.save().await, Err(SaveError::Editor(_))));
        assert!(store.load_all().await.unwrap().is_empty());
        assert_eq!(messages.lock().len(), 1);
        assert!(messages.lock()[0].contains("bridge detached"));
    }

    #[tokio::test]
    async fn successful_save_fires_on_saved() {
        let saved_notes = Arc::new(Mutex::new(Vec::new()));
        let saved_clone = saved_notes.clone();
        let editor = ScriptedEditor {
            text: "hello".to_string(),
            html: "<p>hello</p>".to_string(),
            ..Default::default()
        };
        let options = EditorSessionOptions::builder()
            .on_saved(move |note: Note| {
                saved_clone.lock().push(note);
            })
            .build();
        let mut session = EditorSession::new_with_options(store(), editor, options)
            .await
            .unwrap();
        session.save().await.unwrap();
        assert_eq!(saved_notes.lock().len(), 1);
        assert_eq!(saved_notes.lock()[0].content, "hello");
    }

    #[tokio::test]
    async fn save_and_close_goes_back_only_after_success() {
        let navigator = RecordingNavigator::default();
        let editor = ScriptedEditor {
            text: "hello".to_string(),
            html: "<p>hello</p>".to_string(),
            ..Default::default()
        };
        let options = EditorSessionOptions::builder()
            .navigator(navigator.clone())
            .build();
        let mut session = EditorSession::new_with_options(store(), editor, options)
            .await
            .unwrap();
        session.save_and_close().await.unwrap();
        assert_eq!(navigator.backs.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn failed_save_and_close_stays_on_the_editor() {
        let navigator = RecordingNavigator::default();
        let editor = ScriptedEditor {
            fail_extraction: true,
            ..Default::default()
        };
        let options = EditorSessionOptions::builder()
            .navigator(navigator.clone())
            .build();
        let mut session = EditorSession::new_with_options(store(), editor, options)
            .await
            .unwrap();
        assert!(session.save_and_close().await.is_err());
        assert_eq!(navigator.backs.load(Ordering::SeqCst), 0);
    }
}
