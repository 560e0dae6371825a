//! Change notifications for views bound to a controller.
//!
//! Listeners are `Rc<dyn Fn(&E)>`; emission iterates over a copy of the
//! listener list, so a listener may register or remove listeners (or read
//! controller state) while being called.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

pub type ListenerId = u64;

/// What changed inside a controller
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncEvent {
    LoadStarted,
    SnapshotReplaced { seq: u64, len: usize },
    LoadFailed,
    SessionChanged,
    FormChanged,
    NoticeChanged,
}

pub(crate) struct Emitter<E> {
    listeners: RefCell<Vec<(ListenerId, Rc<dyn Fn(&E)>)>>,
    next_id: Cell<ListenerId>,
}

impl<E> Emitter<E> {
    pub fn new() -> Self {
        Self {
            listeners: RefCell::new(Vec::new()),
            next_id: Cell::new(1),
        }
    }

    pub fn on(&self, callback: impl Fn(&E) + 'static) -> ListenerId {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        self.listeners.borrow_mut().push((id, Rc::new(callback)));
        id
    }

    /// No-op for an unknown id.
    pub fn off(&self, id: ListenerId) {
        self.listeners.borrow_mut().retain(|(lid, _)| *lid != id);
    }

    pub fn emit(&self, event: &E) {
        let snapshot: Vec<Rc<dyn Fn(&E)>> = self
            .listeners
            .borrow()
            .iter()
            .map(|(_, cb)| Rc::clone(cb))
            .collect();
        for cb in snapshot {
            cb(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emit_reaches_listeners_until_removed() {
        let emitter = Emitter::<SyncEvent>::new();
        let seen = Rc::new(RefCell::new(Vec::new()));

        let sink = Rc::clone(&seen);
        let id = emitter.on(move |e| sink.borrow_mut().push(e.clone()));

        emitter.emit(&SyncEvent::FormChanged);
        emitter.off(id);
        emitter.emit(&SyncEvent::NoticeChanged);

        assert_eq!(*seen.borrow(), vec![SyncEvent::FormChanged]);
    }

    #[test]
    fn test_listener_may_register_during_emit() {
        let emitter = Rc::new(Emitter::<SyncEvent>::new());
        let calls = Rc::new(Cell::new(0));

        let inner = Rc::clone(&emitter);
        let counter = Rc::clone(&calls);
        emitter.on(move |_| {
            counter.set(counter.get() + 1);
            let counter = Rc::clone(&counter);
            inner.on(move |_| counter.set(counter.get() + 1));
        });

        emitter.emit(&SyncEvent::LoadStarted);
        assert_eq!(calls.get(), 1);
    }
}
