//! Deferred callbacks on the host event loop.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;
use tracing::warn;

/// Opaque id of a scheduled task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskHandle(pub u64);

/// Runs callbacks later on the same thread.
///
/// Implementations never run a task synchronously from inside `schedule`.
pub trait Scheduler {
    /// Returns `None` if the host refused to schedule the task
    fn schedule(&self, delay: Duration, task: Box<dyn FnOnce()>) -> Option<TaskHandle>;

    /// Cancelling an unknown or already fired task is a no-op
    fn cancel(&self, handle: TaskHandle);
}

/// A single timer slot: scheduling replaces whatever is pending.
///
/// `K` labels the pending task so owners can ask what they are waiting for.
pub struct Debounced<K: Copy + 'static> {
    scheduler: Rc<dyn Scheduler>,
    pending: Cell<Option<(TaskHandle, K)>>,
    generation: Cell<u64>,
}

impl<K: Copy + 'static> Debounced<K> {
    pub fn new(scheduler: Rc<dyn Scheduler>) -> Rc<Self> {
        Rc::new(Self {
            scheduler,
            pending: Cell::new(None),
            generation: Cell::new(0),
        })
    }

    /// Cancels the pending task, if any, and schedules `task` in its place.
    pub fn schedule(this: &Rc<Self>, kind: K, delay: Duration, task: impl FnOnce() + 'static) {
        this.cancel();

        let generation = this.generation.get().wrapping_add(1);
        this.generation.set(generation);

        let weak = Rc::downgrade(this);
        let wrapped = Box::new(move || {
            let Some(timer) = weak.upgrade() else {
                return;
            };
            // A cancelled task may still fire if the host could not drop it
            if timer.generation.get() != generation || timer.pending.get().is_none() {
                return;
            }
            timer.pending.set(None);
            task();
        });

        match this.scheduler.schedule(delay, wrapped) {
            Some(handle) => this.pending.set(Some((handle, kind))),
            None => warn!("Scheduler refused a task with delay {:?}", delay),
        }
    }

    pub fn cancel(&self) {
        if let Some((handle, _)) = self.pending.take() {
            self.generation.set(self.generation.get().wrapping_add(1));
            self.scheduler.cancel(handle);
        }
    }

    /// Label of the pending task
    pub fn pending(&self) -> Option<K> {
        self.pending.get().map(|(_, kind)| kind)
    }
}
