//! Browser window wiring for the focus manager.

use super::{run_callbacks, FocusManager};
use gloo_events::EventListener;
use std::{cell::RefCell, collections::HashMap, sync::Arc};

thread_local! {
    static WINDOW_LISTENERS: RefCell<HashMap<usize, Vec<EventListener>>> =
        RefCell::new(HashMap::new());
}

impl FocusManager {
    /// Attaches window `focus` and document `visibilitychange` listeners
    /// that forward to [`notify_focus`](Self::notify_focus).
    ///
    /// Listeners are released when the last clone of this manager drops.
    pub fn listen_to_window(&self) {
        // The listeners capture only the callback list; holding a full
        // clone here would keep the instance alive forever.
        let callbacks = self.callbacks.clone();
        let on_focus = EventListener::new(&gloo_utils::window(), "focus", move |_| {
            run_callbacks(&callbacks);
        });

        let callbacks = self.callbacks.clone();
        let on_visibility =
            EventListener::new(&gloo_utils::document(), "visibilitychange", move |_| {
                if !gloo_utils::document().hidden() {
                    run_callbacks(&callbacks);
                }
            });

        WINDOW_LISTENERS.with(|cell| {
            cell.borrow_mut()
                .insert(*self.id, vec![on_focus, on_visibility]);
        });
    }
}

impl Drop for FocusManager {
    fn drop(&mut self) {
        if Arc::strong_count(&self.id) == 1 {
            let id = *self.id;
            WINDOW_LISTENERS.with(|cell| {
                // try_borrow_mut so a drop during event dispatch cannot panic
                if let Ok(mut map) = cell.try_borrow_mut() {
                    map.remove(&id);
                }
            });
        }
    }
}
