//! Reduces raw client events into a stream of [`Status`] values.
//!
//! The tracker keeps the bookkeeping a status indicator needs and the client
//! does not expose directly: which sync actions still wait for the server,
//! whether actions were added while offline, and whether the server already
//! rejected our protocol. Any indicator can be built on top of it; the badge
//! is one of them.

use crate::client::{
    Action, Meta, NodeState, SyncClient, SyncError, Unsubscribe, PROCESSED, REASON_DENIED,
    SUBSCRIBE, UNDO, UNSUBSCRIBE,
};
use crate::constants::CONNECTING_DELAY_MS;
use crate::scheduler::{Debounced, Scheduler};
use std::cell::{Cell, RefCell};
use std::collections::HashSet;
use std::rc::{Rc, Weak};
use std::time::Duration;
use tracing::debug;

/// Reduced client status
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    /// Everything is confirmed and nothing was waiting; nothing to report
    Synchronized,
    /// Actions made while offline reached the server
    SynchronizedAfterWait,
    Disconnected,
    /// Actions were made offline and will be sent later
    Wait,
    /// Still connecting after the connecting delay
    Connecting { after_wait: bool },
    Sending { after_wait: bool },
    /// A node state with no dedicated status, like `connected`
    Other { state: NodeState, after_wait: bool },
    ProtocolError(SyncError),
    SyncError(SyncError),
    UndoError(Action),
    UndoDenied(Action),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TimerKind {
    Connecting,
    Hide,
}

#[derive(Default)]
struct TrackerState {
    disconnected: bool,
    wait: bool,
    protocol_error: bool,
    processing: HashSet<String>,
}

struct Tracker {
    state: RefCell<TrackerState>,
    timer: Rc<Debounced<TimerKind>>,
    duration: Duration,
    unbound: Cell<bool>,
    callback: Box<dyn Fn(Status)>,
}

impl Tracker {
    fn emit(&self, status: Status) {
        if self.unbound.get() {
            return;
        }
        debug!("Sync status: {:?}", status);
        (self.callback)(status);
    }

    fn on_state(this: &Rc<Self>, state: NodeState) {
        this.timer.cancel();

        let status = {
            let mut s = this.state.borrow_mut();
            if s.protocol_error {
                debug!("Ignoring {} after a protocol error", state);
                return;
            }
            match state {
                NodeState::Disconnected => {
                    s.disconnected = true;
                    Some(if s.wait {
                        Status::Wait
                    } else {
                        Status::Disconnected
                    })
                }
                NodeState::Synchronized => {
                    s.disconnected = false;
                    None
                }
                NodeState::Connecting => {
                    let weak = Rc::downgrade(this);
                    Debounced::schedule(
                        &this.timer,
                        TimerKind::Connecting,
                        Duration::from_millis(CONNECTING_DELAY_MS),
                        move || Tracker::connecting_elapsed(&weak),
                    );
                    return;
                }
                NodeState::Sending => Some(Status::Sending { after_wait: s.wait }),
                NodeState::Wait if s.wait || !s.processing.is_empty() => Some(Status::Wait),
                other => Some(Status::Other {
                    state: other,
                    after_wait: s.wait,
                }),
            }
        };

        match status {
            Some(status) => this.emit(status),
            None => Tracker::set_synchronized(this),
        }
    }

    fn connecting_elapsed(weak: &Weak<Self>) {
        if let Some(this) = weak.upgrade() {
            let after_wait = this.state.borrow().wait;
            this.emit(Status::Connecting { after_wait });
        }
    }

    fn set_synchronized(this: &Rc<Self>) {
        let after_wait = {
            let mut s = this.state.borrow_mut();
            if s.protocol_error || !s.processing.is_empty() {
                return;
            }
            std::mem::replace(&mut s.wait, false)
        };

        if after_wait {
            this.emit(Status::SynchronizedAfterWait);
            let weak = Rc::downgrade(this);
            Debounced::schedule(&this.timer, TimerKind::Hide, this.duration, move || {
                if let Some(this) = weak.upgrade() {
                    this.emit(Status::Synchronized);
                }
            });
        } else if this.timer.pending() != Some(TimerKind::Hide) {
            // With a hide pending the synchronized message is still on screen
            this.emit(Status::Synchronized);
        }
    }

    fn on_error(&self, error: &SyncError) {
        self.timer.cancel();
        if error.is_protocol_mismatch() {
            self.state.borrow_mut().protocol_error = true;
            self.emit(Status::ProtocolError(error.clone()));
        } else {
            self.emit(Status::SyncError(error.clone()));
        }
    }

    fn on_client_error(&self, error: &SyncError) {
        self.timer.cancel();
        self.emit(Status::SyncError(error.clone()));
    }

    fn on_add(this: &Rc<Self>, action: &Action, meta: &Meta) {
        match action.kind.as_str() {
            SUBSCRIBE | UNSUBSCRIBE => return,
            PROCESSED => {
                if let Some(id) = &action.id {
                    this.state.borrow_mut().processing.remove(id);
                }
                Tracker::set_synchronized(this);
            }
            UNDO => {
                if let Some(id) = &action.id {
                    this.state.borrow_mut().processing.remove(id);
                }
                // Undo without a reason is a plain revert, not a failure
                match action.reason.as_deref() {
                    Some(REASON_DENIED) => {
                        this.timer.cancel();
                        this.emit(Status::UndoDenied(action.clone()));
                    }
                    Some(_) => {
                        this.timer.cancel();
                        this.emit(Status::UndoError(action.clone()));
                    }
                    None => {}
                }
            }
            _ if meta.sync => {
                this.state.borrow_mut().processing.insert(meta.id.clone());
            }
            _ => {}
        }

        let waiting = {
            let mut s = this.state.borrow_mut();
            if s.disconnected && !s.protocol_error && meta.sync && meta.added.is_some() {
                s.wait = true;
                true
            } else {
                false
            }
        };
        if waiting {
            this.emit(Status::Wait);
        }
    }
}

/// Subscription to a client's status. Dropping it keeps the subscription
/// alive; call [`StatusHandle::unbind`] to stop.
pub struct StatusHandle {
    tracker: Rc<Tracker>,
    unsubscribes: RefCell<Vec<Unsubscribe>>,
}

impl StatusHandle {
    /// Detaches every listener and cancels the pending timer. Idempotent.
    pub fn unbind(&self) {
        if self.tracker.unbound.replace(true) {
            return;
        }
        self.tracker.timer.cancel();
        let unsubscribes = std::mem::take(&mut *self.unsubscribes.borrow_mut());
        for unsubscribe in unsubscribes {
            unsubscribe();
        }
        debug!("Status tracker unbound");
    }

    pub fn is_bound(&self) -> bool {
        !self.tracker.unbound.get()
    }
}

/// Starts tracking `client`, reporting every status change to `callback`.
///
/// `duration` is how long [`Status::SynchronizedAfterWait`] lasts before a
/// follow-up [`Status::Synchronized`] is reported.
pub fn track_status<C, F>(
    client: &C,
    scheduler: Rc<dyn Scheduler>,
    duration: Duration,
    callback: F,
) -> StatusHandle
where
    C: SyncClient + ?Sized,
    F: Fn(Status) + 'static,
{
    let tracker = Rc::new(Tracker {
        state: RefCell::new(TrackerState {
            disconnected: !client.connected(),
            ..TrackerState::default()
        }),
        timer: Debounced::new(scheduler),
        duration,
        unbound: Cell::new(false),
        callback: Box::new(callback),
    });

    let mut unsubscribes = Vec::with_capacity(4);

    let t = tracker.clone();
    unsubscribes.push(client.on_state(Box::new(move |state| Tracker::on_state(&t, state))));
    let t = tracker.clone();
    unsubscribes.push(client.on_error(Box::new(move |error: &SyncError| t.on_error(error))));
    let t = tracker.clone();
    unsubscribes.push(client.on_client_error(Box::new(move |error: &SyncError| {
        t.on_client_error(error)
    })));
    let t = tracker.clone();
    unsubscribes.push(client.on_add(Box::new(move |action: &Action, meta: &Meta| {
        Tracker::on_add(&t, action, meta)
    })));

    debug!(
        "Tracking sync status, node is {} ({})",
        client.state(),
        if client.connected() { "connected" } else { "offline" }
    );

    StatusHandle {
        tracker,
        unsubscribes: RefCell::new(unsubscribes),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::{WRONG_PROTOCOL, WRONG_SUBPROTOCOL};
    use crate::memory::{ManualScheduler, MemoryClient};

    struct Fixture {
        client: MemoryClient,
        scheduler: Rc<ManualScheduler>,
        statuses: Rc<RefCell<Vec<Status>>>,
        handle: StatusHandle,
    }

    impl Fixture {
        fn new() -> Self {
            let client = MemoryClient::new();
            let scheduler = Rc::new(ManualScheduler::new());
            let statuses = Rc::new(RefCell::new(Vec::new()));
            let sink = statuses.clone();
            let handle = track_status(
                &client,
                scheduler.clone(),
                Duration::from_millis(10),
                move |status| sink.borrow_mut().push(status),
            );
            Self {
                client,
                scheduler,
                statuses,
                handle,
            }
        }

        fn take(&self) -> Vec<Status> {
            std::mem::take(&mut *self.statuses.borrow_mut())
        }

        fn advance(&self, ms: u64) {
            self.scheduler.advance(Duration::from_millis(ms));
        }
    }

    #[test]
    fn synchronized_without_waiting_reports_plain_synchronized() {
        let f = Fixture::new();
        f.client.set_state(NodeState::Synchronized);
        assert_eq!(f.take(), [Status::Synchronized]);
        assert_eq!(f.scheduler.pending_tasks(), 0);
    }

    #[test]
    fn offline_actions_produce_wait_then_confirmation() {
        let f = Fixture::new();
        f.client.set_state(NodeState::Disconnected);
        let id = f.client.add_sync(Action::new("A"));
        assert_eq!(f.take(), [Status::Disconnected, Status::Wait]);

        f.client.set_state(NodeState::Connecting);
        f.client.set_state(NodeState::Sending);
        f.client.set_state(NodeState::Synchronized);
        assert_eq!(f.take(), [Status::Sending { after_wait: true }]);

        f.client.add_local(Action::processed(id));
        assert_eq!(f.take(), [Status::SynchronizedAfterWait]);

        f.advance(10);
        assert_eq!(f.take(), [Status::Synchronized]);
    }

    #[test]
    fn disconnect_while_waiting_reports_wait() {
        let f = Fixture::new();
        f.client.set_state(NodeState::Disconnected);
        f.client.add_sync(Action::new("A"));
        f.client.set_state(NodeState::Connecting);
        f.client.set_state(NodeState::Disconnected);
        assert_eq!(f.take(), [Status::Disconnected, Status::Wait, Status::Wait]);
    }

    #[test]
    fn connecting_is_reported_after_delay() {
        let f = Fixture::new();
        f.client.set_state(NodeState::Connecting);
        f.advance(99);
        assert!(f.take().is_empty());
        f.advance(1);
        assert_eq!(f.take(), [Status::Connecting { after_wait: false }]);
    }

    #[test]
    fn next_state_cancels_connecting_delay() {
        let f = Fixture::new();
        f.client.set_state(NodeState::Connecting);
        f.client.set_state(NodeState::Connected);
        f.advance(200);
        assert_eq!(
            f.take(),
            [Status::Other {
                state: NodeState::Connected,
                after_wait: false
            }]
        );
    }

    #[test]
    fn wait_state_requires_pending_actions() {
        let f = Fixture::new();
        f.client.set_state(NodeState::Wait);
        f.client.add_sync(Action::new("A"));
        f.client.set_state(NodeState::Wait);
        assert_eq!(
            f.take(),
            [
                Status::Other {
                    state: NodeState::Wait,
                    after_wait: false
                },
                Status::Wait,
                Status::Wait,
            ]
        );
    }

    #[test]
    fn protocol_error_latches() {
        let f = Fixture::new();
        f.client.emit_error(SyncError::new(WRONG_SUBPROTOCOL));
        f.client.set_state(NodeState::Synchronized);
        f.client.set_state(NodeState::Disconnected);
        assert_eq!(f.take(), [Status::ProtocolError(SyncError::new(WRONG_SUBPROTOCOL))]);
    }

    #[test]
    fn errors_cancel_pending_hide() {
        let f = Fixture::new();
        f.client.set_state(NodeState::Disconnected);
        let id = f.client.add_sync(Action::new("A"));
        f.client.set_state(NodeState::Synchronized);
        f.client.add_local(Action::processed(id));
        f.take();

        f.client.emit_error(SyncError::new(WRONG_PROTOCOL));
        f.advance(50);
        assert_eq!(f.take(), [Status::ProtocolError(SyncError::new(WRONG_PROTOCOL))]);
    }

    #[test]
    fn repeated_processed_keeps_scheduled_hide() {
        let f = Fixture::new();
        f.client.set_state(NodeState::Disconnected);
        let first = f.client.add_sync(Action::new("A"));
        f.client.set_state(NodeState::Synchronized);
        f.client.add_local(Action::processed(first));
        f.take();

        f.client.add_local(Action::processed("unknown"));
        assert!(f.take().is_empty());
        f.advance(10);
        assert_eq!(f.take(), [Status::Synchronized]);
    }

    #[test]
    fn undo_reasons() {
        let f = Fixture::new();
        f.client.add_local(Action::undo("1", "denied"));
        f.client.add_local(Action::undo("2", "error"));
        f.client.add_local(Action::undo("3", "timeout"));
        let statuses = f.take();
        assert!(matches!(statuses[0], Status::UndoDenied(_)));
        assert!(matches!(statuses[1], Status::UndoError(_)));
        assert!(matches!(statuses[2], Status::UndoError(_)));
    }

    #[test]
    fn undo_without_reason_is_not_reported() {
        let f = Fixture::new();
        f.client.set_state(NodeState::Disconnected);
        let id = f.client.add_sync(Action::new("A"));
        f.client.set_state(NodeState::Synchronized);
        f.take();

        f.client.add_local(Action::new(UNDO).with_id(id));
        assert!(f.take().is_empty());
    }

    #[test]
    fn subscriptions_are_ignored() {
        let f = Fixture::new();
        f.client.set_state(NodeState::Disconnected);
        f.take();
        f.client.add_sync(Action::new(SUBSCRIBE));
        f.client.add_sync(Action::new(UNSUBSCRIBE));
        assert!(f.take().is_empty());
    }

    #[test]
    fn unbind_detaches_and_is_idempotent() {
        let f = Fixture::new();
        f.client.set_state(NodeState::Connecting);
        f.handle.unbind();
        f.handle.unbind();

        assert!(!f.handle.is_bound());
        assert_eq!(f.client.listener_count(), 0);
        assert_eq!(f.scheduler.pending_tasks(), 0);

        f.client.emit_error(SyncError::new(WRONG_PROTOCOL));
        f.advance(500);
        assert!(f.take().is_empty());
    }
}
