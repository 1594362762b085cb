use std::cell::RefCell;
use std::rc::Rc;

use crate::event::KeyboardEvent;

pub type ListenerId = u64;

type KeyListener = Rc<dyn Fn(&KeyboardEvent)>;

#[derive(Default)]
struct Listeners {
    next_id: ListenerId,
    entries: Vec<(ListenerId, KeyListener)>,
}

/// Window-level keyboard listener registry (`addEventListener("keydown")`).
///
/// Cloning yields another handle to the same registry.
#[derive(Clone, Default)]
pub struct Window {
    listeners: Rc<RefCell<Listeners>>,
}

impl Window {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_key_listener(&self, listener: impl Fn(&KeyboardEvent) + 'static) -> ListenerId {
        let mut listeners = self.listeners.borrow_mut();
        let id = listeners.next_id;
        listeners.next_id += 1;
        listeners.entries.push((id, Rc::new(listener)));
        log::trace!("[window] added key listener {id}");
        id
    }

    /// Returns false if no listener with `id` was registered.
    pub fn remove_key_listener(&self, id: ListenerId) -> bool {
        let mut listeners = self.listeners.borrow_mut();
        let before = listeners.entries.len();
        listeners.entries.retain(|(entry, _)| *entry != id);
        let removed = listeners.entries.len() != before;
        if removed {
            log::trace!("[window] removed key listener {id}");
        }
        removed
    }

    pub fn key_listener_count(&self) -> usize {
        self.listeners.borrow().entries.len()
    }

    /// Deliver `event` to every listener registered at the time of the call.
    /// Listeners may add or remove listeners while being called.
    pub fn dispatch_key(&self, event: &KeyboardEvent) {
        let snapshot: Vec<KeyListener> = self
            .listeners
            .borrow()
            .entries
            .iter()
            .map(|(_, listener)| Rc::clone(listener))
            .collect();

        for listener in snapshot {
            listener(event);
        }
    }
}

impl std::fmt::Debug for Window {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Window")
            .field("key_listeners", &self.key_listener_count())
            .finish()
    }
}
