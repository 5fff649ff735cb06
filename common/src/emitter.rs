//! Listener registry used to hand out subscriptions with disposers.

use crate::client::Unsubscribe;
use std::cell::RefCell;
use std::rc::{Rc, Weak};

struct Registry<L: ?Sized> {
    next_id: u64,
    listeners: Vec<(u64, Rc<L>)>,
}

/// A list of listeners of type `L` (usually a `dyn Fn(..)`).
///
/// `subscribe` returns a disposer that removes exactly that listener. The
/// disposer only keeps a weak reference, so it is safe to call after the
/// emitter itself is gone.
pub struct Emitter<L: ?Sized> {
    inner: Rc<RefCell<Registry<L>>>,
}

impl<L: ?Sized + 'static> Emitter<L> {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(Registry {
                next_id: 0,
                listeners: Vec::new(),
            })),
        }
    }

    pub fn subscribe(&self, listener: Box<L>) -> Unsubscribe {
        let id = {
            let mut registry = self.inner.borrow_mut();
            let id = registry.next_id;
            registry.next_id += 1;
            registry.listeners.push((id, Rc::from(listener)));
            id
        };

        let weak: Weak<RefCell<Registry<L>>> = Rc::downgrade(&self.inner);
        Box::new(move || {
            if let Some(registry) = weak.upgrade() {
                registry
                    .borrow_mut()
                    .listeners
                    .retain(|(listener_id, _)| *listener_id != id);
            }
        })
    }

    /// Calls `f` for every listener registered at the moment of the call.
    ///
    /// Listeners may subscribe or unsubscribe while being notified.
    pub fn emit_with(&self, mut f: impl FnMut(&L)) {
        let snapshot: Vec<Rc<L>> = self
            .inner
            .borrow()
            .listeners
            .iter()
            .map(|(_, listener)| Rc::clone(listener))
            .collect();
        for listener in snapshot {
            f(&*listener);
        }
    }

    pub fn len(&self) -> usize {
        self.inner.borrow().listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<L: ?Sized + 'static> Default for Emitter<L> {
    fn default() -> Self {
        Self::new()
    }
}
