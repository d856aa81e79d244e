//! Screen navigation boundary.
//!
//! The library never renders screens itself; the embedding shell implements
//! [`Navigator`] over its own navigation stack and the sessions drive it.

use parking_lot::Mutex;
use std::{fmt, sync::Arc};

/// A navigation target with its parameter bag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// The note list screen.
    List,
    /// The editor screen, optionally seeded with an existing note.
    Editor {
        /// Identifier of the note being edited, absent for a new note.
        note_id: Option<String>,
        /// Markup used to pre-populate the editing surface.
        note_content: Option<String>,
    },
}

/// Trait implemented by the embedding shell's navigation stack.
pub trait Navigator: Send {
    /// Navigates to `route`, pushing it onto the navigation stack.
    fn navigate(&mut self, route: Route);

    /// Returns to the previous screen.
    fn go_back(&mut self);
}

/// A cloneable handle to a shared [`Navigator`].
///
/// Sessions hold one of these so the list and editor screens can drive the
/// same navigation stack.
#[derive(Clone)]
pub struct SharedNavigator(pub(crate) Arc<Mutex<Box<dyn Navigator>>>);

impl SharedNavigator {
    pub(crate) fn navigate(&self, route: Route) {
        self.0.lock().navigate(route);
    }

    pub(crate) fn go_back(&self) {
        self.0.lock().go_back();
    }
}

impl<N> From<N> for SharedNavigator
where
    N: Navigator + 'static,
{
    fn from(navigator: N) -> Self {
        SharedNavigator(Arc::new(Mutex::new(Box::new(navigator))))
    }
}

impl fmt::Debug for SharedNavigator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SharedNavigator")
    }
}
