//! In-memory collaborators: a scriptable client, a virtual-clock scheduler
//! and a surface that records what was drawn. Used by the test-suite and by
//! the web demo, which drives the badge from buttons instead of a server.

use crate::client::{
    Action, AddListener, ErrorListener, Meta, NodeState, StateListener, SyncClient, SyncError,
    Unsubscribe,
};
use crate::emitter::Emitter;
use crate::scheduler::{Scheduler, TaskHandle};
use crate::surface::{BadgeSurface, Part};
use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, HashMap};
use std::time::Duration;

/// A client whose node state and log are driven by hand
pub struct MemoryClient {
    state: Cell<NodeState>,
    connected: Cell<bool>,
    next_added: Cell<u64>,
    state_listeners: Emitter<dyn Fn(NodeState)>,
    error_listeners: Emitter<dyn Fn(&SyncError)>,
    client_error_listeners: Emitter<dyn Fn(&SyncError)>,
    add_listeners: Emitter<dyn Fn(&Action, &Meta)>,
}

impl MemoryClient {
    pub fn new() -> Self {
        Self {
            state: Cell::new(NodeState::Disconnected),
            connected: Cell::new(false),
            next_added: Cell::new(1),
            state_listeners: Emitter::new(),
            error_listeners: Emitter::new(),
            client_error_listeners: Emitter::new(),
            add_listeners: Emitter::new(),
        }
    }

    pub fn set_connected(&self, connected: bool) {
        self.connected.set(connected);
    }

    /// Changes the node state and notifies listeners
    pub fn set_state(&self, state: NodeState) {
        self.state.set(state);
        self.state_listeners.emit_with(|listener| listener(state));
    }

    pub fn emit_error(&self, error: SyncError) {
        self.error_listeners.emit_with(|listener| listener(&error));
    }

    pub fn emit_client_error(&self, error: SyncError) {
        self.client_error_listeners
            .emit_with(|listener| listener(&error));
    }

    /// Adds an action that must reach the server. Returns its meta id.
    pub fn add_sync(&self, action: Action) -> String {
        let added = self.next_added.get();
        self.next_added.set(added + 1);
        let meta = Meta {
            id: format!("{} 1:1:1 0", added),
            sync: true,
            added: Some(added),
        };
        let id = meta.id.clone();
        self.add(action, meta);
        id
    }

    /// Adds a local action, e.g. one received from the server
    pub fn add_local(&self, action: Action) {
        let added = self.next_added.get();
        self.next_added.set(added + 1);
        let meta = Meta {
            id: format!("{} server:1:1 0", added),
            sync: false,
            added: Some(added),
        };
        self.add(action, meta);
    }

    pub fn add(&self, action: Action, meta: Meta) {
        self.add_listeners
            .emit_with(|listener| listener(&action, &meta));
    }

    /// Number of live subscriptions across all events
    pub fn listener_count(&self) -> usize {
        self.state_listeners.len()
            + self.error_listeners.len()
            + self.client_error_listeners.len()
            + self.add_listeners.len()
    }
}

impl Default for MemoryClient {
    fn default() -> Self {
        Self::new()
    }
}

impl SyncClient for MemoryClient {
    fn state(&self) -> NodeState {
        self.state.get()
    }

    fn connected(&self) -> bool {
        self.connected.get()
    }

    fn on_state(&self, listener: StateListener) -> Unsubscribe {
        self.state_listeners.subscribe(listener)
    }

    fn on_error(&self, listener: ErrorListener) -> Unsubscribe {
        self.error_listeners.subscribe(listener)
    }

    fn on_client_error(&self, listener: ErrorListener) -> Unsubscribe {
        self.client_error_listeners.subscribe(listener)
    }

    fn on_add(&self, listener: AddListener) -> Unsubscribe {
        self.add_listeners.subscribe(listener)
    }
}

/// Scheduler with a virtual clock advanced explicitly
pub struct ManualScheduler {
    now: Cell<Duration>,
    next_id: Cell<u64>,
    tasks: RefCell<BTreeMap<(Duration, u64), Box<dyn FnOnce()>>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self {
            now: Cell::new(Duration::ZERO),
            next_id: Cell::new(1),
            tasks: RefCell::new(BTreeMap::new()),
        }
    }

    pub fn now(&self) -> Duration {
        self.now.get()
    }

    pub fn pending_tasks(&self) -> usize {
        self.tasks.borrow().len()
    }

    /// Moves the clock forward, running every task that falls due in order
    pub fn advance(&self, by: Duration) {
        let target = self.now.get() + by;
        loop {
            let due = {
                let mut tasks = self.tasks.borrow_mut();
                match tasks.keys().next().copied() {
                    Some(key) if key.0 <= target => tasks.remove(&key).map(|task| (key.0, task)),
                    _ => None,
                }
            };
            let Some((at, task)) = due else {
                break;
            };
            self.now.set(at);
            task();
        }
        self.now.set(target);
    }
}

impl Default for ManualScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&self, delay: Duration, task: Box<dyn FnOnce()>) -> Option<TaskHandle> {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        self.tasks
            .borrow_mut()
            .insert((self.now.get() + delay, id), task);
        Some(TaskHandle(id))
    }

    fn cancel(&self, handle: TaskHandle) {
        self.tasks.borrow_mut().retain(|(_, id), _| *id != handle.0);
    }
}

/// Records styles and text the way a DOM element would hold them
#[derive(Default)]
pub struct MemorySurface {
    styles: RefCell<HashMap<Part, BTreeMap<String, String>>>,
    text: RefCell<String>,
    removed: Cell<bool>,
    writes: Cell<usize>,
}

impl MemorySurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn style(&self, part: Part, property: &str) -> Option<String> {
        self.styles
            .borrow()
            .get(&part)
            .and_then(|styles| styles.get(property).cloned())
    }

    pub fn text(&self) -> String {
        self.text.borrow().clone()
    }

    pub fn is_visible(&self) -> bool {
        !self.removed.get()
            && self.style(Part::Widget, "display").as_deref() != Some("none")
    }

    pub fn is_removed(&self) -> bool {
        self.removed.get()
    }

    /// Total number of mutations, including removal
    pub fn writes(&self) -> usize {
        self.writes.get()
    }

    fn touch(&self) {
        self.writes.set(self.writes.get() + 1);
    }
}

impl BadgeSurface for MemorySurface {
    fn set_style(&self, part: Part, property: &str, value: &str) {
        self.touch();
        self.styles
            .borrow_mut()
            .entry(part)
            .or_default()
            .insert(property.to_string(), value.to_string());
    }

    fn set_text(&self, text: &str) {
        self.touch();
        *self.text.borrow_mut() = text.to_string();
    }

    fn remove(&self) {
        self.touch();
        self.removed.set(true);
    }
}
