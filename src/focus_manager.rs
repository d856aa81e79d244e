//! Focus event source for the list screen.
//!
//! The list screen re-synchronizes from the note store every time it regains
//! focus. [`FocusManager`] is the event source the screen subscribes to: the
//! embedding shell fires it from its navigation stack (on `wasm-js` the
//! browser window can drive it directly), and every registered callback runs.

use parking_lot::Mutex;
use std::{
    fmt, mem,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    },
};

#[cfg(feature = "wasm-js")]
mod wasm_js;

/// A registered focus callback.
pub type Callback = Box<dyn FnMut() + Send>;

static NEXT_MANAGER_ID: AtomicUsize = AtomicUsize::new(0);

/// Dispatches focus events to registered callbacks.
///
/// Clones share the same callback list; dropping the last clone releases any
/// window listeners attached on `wasm-js`.
#[derive(Clone)]
pub struct FocusManager {
    callbacks: Arc<Mutex<Vec<Callback>>>,
    /// A unique identifier for this instance and its clones, used to
    /// associate it with thread-local window listeners.
    id: Arc<usize>,
}

impl FocusManager {
    /// Constructs a new [`FocusManager`] with the given options.
    pub fn new(options: Option<FocusManagerOptions>) -> Self {
        let callbacks = options
            .map(|options| options.on_focus)
            .unwrap_or_else(|| Arc::new(Mutex::new(Vec::new())));

        Self {
            callbacks,
            id: Arc::new(NEXT_MANAGER_ID.fetch_add(1, Ordering::Relaxed)),
        }
    }

    /// Registers a callback executed on every focus event.
    pub fn register_callback(&self, callback: impl FnMut() + Send + 'static) {
        self.callbacks.lock().push(Box::new(callback));
    }

    /// Fires a focus event, running every registered callback.
    ///
    /// The embedding shell calls this when the list screen becomes the
    /// active screen again.
    pub fn notify_focus(&self) {
        run_callbacks(&self.callbacks);
    }
}

pub(crate) fn run_callbacks(callbacks: &Mutex<Vec<Callback>>) {
    for callback in callbacks.lock().iter_mut() {
        (callback)();
    }
}

impl fmt::Debug for FocusManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FocusManager")
            .field("id", &*self.id)
            .field("callbacks", &self.callbacks.lock().len())
            .finish()
    }
}

/// Options for the [`FocusManager`].
#[derive(Clone, Default)]
pub struct FocusManagerOptions {
    /// Callbacks executed when the list screen regains focus.
    pub on_focus: Arc<Mutex<Vec<Callback>>>,
}

impl fmt::Debug for FocusManagerOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let callback_count = self.on_focus.lock().len();
        f.debug_struct("FocusManagerOptions")
            .field("on_focus", &format!("{} callbacks", callback_count))
            .finish()
    }
}

impl FocusManagerOptions {
    /// Returns a new `FocusManagerOptionsBuilder` to construct a
    /// `FocusManagerOptions` struct.
    pub fn builder() -> FocusManagerOptionsBuilder {
        FocusManagerOptionsBuilder::default()
    }
}

/// Builder for the [`FocusManagerOptions`].
#[derive(Default)]
pub struct FocusManagerOptionsBuilder {
    on_focus: Vec<Callback>,
}

impl FocusManagerOptionsBuilder {
    /// A callback function to be executed when focus returns to the list
    /// screen.
    pub fn on_focus(&mut self, on_focus: fn()) -> &mut Self {
        self.on_focus
            .push(Box::new(on_focus) as Box<dyn FnMut() + Send>);
        self
    }

    /// Builds the [`FocusManagerOptions`] struct.
    pub fn build(&mut self) -> FocusManagerOptions {
        FocusManagerOptions {
            on_focus: Arc::new(Mutex::new(mem::take(&mut self.on_focus))),
        }
    }
}
