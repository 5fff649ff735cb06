#![allow(non_snake_case)]

//! Demo page: a badge driven by an in-memory client and a few buttons.

use dioxus::logger::tracing::info;
use dioxus::prelude::*;
use futures_timer::Delay;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;
use syncbadge_core::client::{REASON_DENIED, WRONG_PROTOCOL};
use syncbadge_core::memory::MemoryClient;
use syncbadge_core::{Action, BadgeConfig, Messages, NodeState, Position, Styles, SyncClient, SyncError};
use syncbadge_web::{SharedClient, SyncBadge};
use wasm_bindgen_futures::spawn_local;

/// Simulated round trip to the server
const SERVER_DELAY_MS: u64 = 600;

#[derive(Clone)]
struct Demo {
    client: Rc<MemoryClient>,
    /// Meta ids of actions the server has not processed yet
    pending: Rc<RefCell<Vec<String>>>,
}

impl Demo {
    fn new() -> Self {
        let client = Rc::new(MemoryClient::new());
        client.set_connected(true);
        client.set_state(NodeState::Synchronized);
        Self {
            client,
            pending: Rc::new(RefCell::new(Vec::new())),
        }
    }

    fn go_offline(&self) {
        info!("Demo: going offline");
        self.client.set_connected(false);
        self.client.set_state(NodeState::Disconnected);
    }

    fn add_action(&self) {
        let id = self.client.add_sync(Action::new("demo/save"));
        self.pending.borrow_mut().push(id);
        if self.client.connected() {
            let demo = self.clone();
            spawn_local(async move {
                demo.client.set_state(NodeState::Sending);
                Delay::new(Duration::from_millis(SERVER_DELAY_MS)).await;
                demo.confirm_pending();
            });
        }
    }

    fn reconnect(&self) {
        let demo = self.clone();
        spawn_local(async move {
            demo.client.set_state(NodeState::Connecting);
            Delay::new(Duration::from_millis(SERVER_DELAY_MS)).await;
            demo.client.set_connected(true);
            demo.client.set_state(NodeState::Sending);
            Delay::new(Duration::from_millis(SERVER_DELAY_MS)).await;
            demo.confirm_pending();
        });
    }

    fn confirm_pending(&self) {
        self.client.set_state(NodeState::Synchronized);
        let ids: Vec<String> = self.pending.borrow_mut().drain(..).collect();
        for id in ids {
            self.client.add_local(Action::processed(id));
        }
    }
}

#[component]
fn App() -> Element {
    let demo = use_hook(Demo::new);
    let config = BadgeConfig::new(Messages::en(), Styles::preset())
        .with_position(Position::BottomRight);

    let offline = {
        let demo = demo.clone();
        move |_: MouseEvent| demo.go_offline()
    };
    let save = {
        let demo = demo.clone();
        move |_: MouseEvent| demo.add_action()
    };
    let reconnect = {
        let demo = demo.clone();
        move |_: MouseEvent| demo.reconnect()
    };
    let denied = {
        let demo = demo.clone();
        move |_: MouseEvent| {
            demo.client
                .add_local(Action::new("logux/undo").with_reason(REASON_DENIED))
        }
    };
    let client_error = {
        let demo = demo.clone();
        move |_: MouseEvent| demo.client.emit_client_error(SyncError::new("timeout"))
    };
    let outdated = {
        let demo = demo.clone();
        move |_: MouseEvent| demo.client.emit_error(SyncError::new(WRONG_PROTOCOL))
    };

    rsx! {
        SyncBadge { client: SharedClient::new(demo.client.clone()), config }
        div {
            h1 { "Sync badge" }
            button { onclick: offline, "Go offline" }
            button { onclick: save, "Save something" }
            button { onclick: reconnect, "Reconnect" }
            button { onclick: denied, "Undo: denied" }
            button { onclick: client_error, "Client error" }
            button { onclick: outdated, "Outdated protocol" }
        }
    }
}

fn main() {
    dioxus::logger::initialize_default();

    launch(App);
}
