//! Save-outcome callback handlers for editor sessions.

use crate::note::Note;
use parking_lot::Mutex;
use std::sync::Arc;

pub(crate) type OnSavedInner = Box<dyn FnMut(Note) + Send>;

/// The callback executed once a note has been persisted, taking the saved
/// [`Note`] as an argument.
///
/// # Usage
/// ```
/// use note_client::callback::OnSaved;
///
/// let on_saved = OnSaved::from(|note| {
///     // Update the surrounding screen
///     let _ = note;
/// });
/// ```
#[derive(Clone)]
pub struct OnSaved(pub(crate) Arc<Mutex<OnSavedInner>>);

impl<F> From<F> for OnSaved
where
    F: FnMut(Note) + Send + 'static,
{
    fn from(f: F) -> Self {
        OnSaved(Arc::new(Mutex::new(Box::new(f))))
    }
}

pub(crate) type OnSaveErrorInner = Box<dyn FnMut(String) + Send>;

/// The callback executed when a save fails, taking the error message as an
/// argument.
///
/// # Usage
/// ```
/// use note_client::callback::OnSaveError;
///
/// let on_save_error = OnSaveError::from(|message: String| {
///     // Surface the failure
///     let _ = message;
/// });
/// ```
#[derive(Clone)]
pub struct OnSaveError(pub(crate) Arc<Mutex<OnSaveErrorInner>>);

impl<F> From<F> for OnSaveError
where
    F: FnMut(String) + Send + 'static,
{
    fn from(f: F) -> Self {
        OnSaveError(Arc::new(Mutex::new(Box::new(f))))
    }
}
