//! Session options and configuration types.

use crate::{
    callback::{OnSaveError, OnSaved},
    navigation::{Route, SharedNavigator},
};

/// Options for [`EditorSession::new_with_options`](crate::EditorSession::new_with_options).
#[derive(Clone, Default, bon::Builder)]
#[builder(on(String, into))]
pub struct EditorSessionOptions {
    /// Identifier of the note being edited. Absent for a new note; the save
    /// path then generates a fresh identifier.
    pub note_id: Option<String>,

    /// Markup used to pre-populate the editing surface.
    pub initial_content: Option<String>,

    /// Navigation handle used by
    /// [`save_and_close`](crate::EditorSession::save_and_close).
    #[builder(into)]
    pub navigator: Option<SharedNavigator>,

    /// Callback once a save has been persisted.
    #[builder(into)]
    pub on_saved: Option<OnSaved>,

    /// Callback in case a save fails.
    #[builder(into)]
    pub on_save_error: Option<OnSaveError>,
}

impl EditorSessionOptions {
    /// Builds options carrying an editor route's parameter bag.
    ///
    /// The list route has no parameters and maps to the defaults.
    pub fn from_route(route: &Route) -> Self {
        match route {
            Route::Editor {
                note_id,
                note_content,
            } => Self::builder()
                .maybe_note_id(note_id.clone())
                .maybe_initial_content(note_content.clone())
                .build(),
            Route::List => Self::default(),
        }
    }
}
