use crate::badge;
use dioxus::logger::tracing::error;
use dioxus::prelude::*;
use std::rc::Rc;
use syncbadge_core::{BadgeConfig, SyncClient};

/// A client handle that can be passed as a component prop.
///
/// Two handles are equal when they point at the same client.
#[derive(Clone)]
pub struct SharedClient(pub Rc<dyn SyncClient>);

impl SharedClient {
    pub fn new<C: SyncClient + 'static>(client: Rc<C>) -> Self {
        Self(client)
    }
}

impl PartialEq for SharedClient {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

/// Mounts the badge on first render and removes it when the component is
/// dropped. The badge lives directly under `document.body`, so this
/// component renders nothing in place.
#[component]
pub fn SyncBadge(client: SharedClient, config: BadgeConfig) -> Element {
    let mounted = use_hook(move || match badge(client.0.as_ref(), config) {
        Ok(badge) => Some(Rc::new(badge)),
        Err(e) => {
            error!("Failed to mount sync badge: {}", e);
            None
        }
    });

    use_drop(move || {
        if let Some(badge) = &mounted {
            badge.unbind();
        }
    });

    rsx! {}
}
