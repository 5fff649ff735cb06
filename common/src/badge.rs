//! The connection badge: maps tracker statuses to what is on screen.

use crate::client::SyncClient;
use crate::config::BadgeConfig;
use crate::display::DisplayState;
use crate::error::ConfigError;
use crate::messages::Messages;
use crate::scheduler::Scheduler;
use crate::status::{track_status, Status, StatusHandle};
use crate::styles::Styles;
use crate::surface::{apply_style, BadgeSurface, Part};
use std::cell::Cell;
use std::rc::Rc;
use tracing::{debug, info, warn};

struct BadgeView {
    surface: Rc<dyn BadgeSurface>,
    messages: Messages,
    styles: Styles,
    current: Cell<DisplayState>,
    /// Last state drawn on the surface, `None` while hidden
    shown: Cell<DisplayState>,
    removed: Cell<bool>,
}

impl BadgeView {
    fn on_status(&self, status: Status) {
        if self.removed.get() {
            return;
        }

        let next = match status {
            Status::Synchronized => DisplayState::None,
            Status::SynchronizedAfterWait => DisplayState::Synchronized,
            Status::Disconnected => DisplayState::Disconnected,
            Status::Wait => DisplayState::Wait,
            Status::Connecting { after_wait } => {
                let offline = matches!(
                    self.shown.get(),
                    DisplayState::Wait | DisplayState::Disconnected
                );
                if after_wait || offline {
                    DisplayState::Sending
                } else {
                    DisplayState::Connecting
                }
            }
            Status::Sending { .. } => DisplayState::Sending,
            Status::Other { .. } => return,
            Status::ProtocolError(_) => DisplayState::ProtocolError,
            Status::SyncError(_) => DisplayState::Error,
            Status::UndoError(_) => DisplayState::UndoError,
            Status::UndoDenied(_) => DisplayState::UndoDenied,
        };

        self.transition(next);
    }

    fn transition(&self, next: DisplayState) {
        let previous = self.current.replace(next);
        if previous != next {
            debug!("Badge {} -> {}", previous, next);
        }

        match next {
            DisplayState::None => self.hide(),
            // Keep showing whatever was there until the reconnect resolves
            DisplayState::Connecting => {}
            state => self.show(state),
        }
    }

    fn show(&self, state: DisplayState) {
        let (Some(style), Some(text)) = (self.styles.get(state), self.messages.get(state)) else {
            warn!("No style or message for the {} state, badge left unchanged", state);
            return;
        };
        apply_style(self.surface.as_ref(), Part::Widget, style);
        self.surface.set_text(text);
        self.surface.set_style(Part::Widget, "display", "block");
        self.shown.set(state);
    }

    fn hide(&self) {
        self.surface.set_style(Part::Widget, "display", "none");
        self.shown.set(DisplayState::None);
    }
}

/// A badge bound to a client. Call [`Badge::unbind`] to remove it.
pub struct Badge {
    view: Rc<BadgeView>,
    status: StatusHandle,
}

impl Badge {
    /// Draws a hidden badge on `surface` and starts following `client`.
    ///
    /// The configuration is validated before anything is drawn.
    pub fn bind<C>(
        client: &C,
        surface: Rc<dyn BadgeSurface>,
        scheduler: Rc<dyn Scheduler>,
        config: BadgeConfig,
    ) -> Result<Self, ConfigError>
    where
        C: SyncClient + ?Sized,
    {
        config.validate()?;
        let BadgeConfig {
            messages,
            styles,
            position,
            duration,
        } = config;

        apply_style(surface.as_ref(), Part::Widget, &styles.base);
        apply_style(surface.as_ref(), Part::Text, &styles.text);
        for (property, value) in position.declarations() {
            surface.set_style(Part::Widget, property, value);
        }

        let view = Rc::new(BadgeView {
            surface,
            messages,
            styles,
            current: Cell::new(DisplayState::None),
            shown: Cell::new(DisplayState::None),
            removed: Cell::new(false),
        });
        view.hide();

        let sink = view.clone();
        let status = track_status(client, scheduler, duration, move |status| {
            sink.on_status(status)
        });

        info!("Sync badge mounted at {}", position);
        Ok(Self { view, status })
    }

    /// State currently on display
    pub fn state(&self) -> DisplayState {
        self.view.current.get()
    }

    pub fn is_bound(&self) -> bool {
        !self.view.removed.get()
    }

    /// Stops listening, cancels the pending timer and removes the element.
    /// Calling it again does nothing.
    pub fn unbind(&self) {
        self.status.unbind();
        if self.view.removed.replace(true) {
            return;
        }
        self.view.surface.remove();
        info!("Sync badge removed");
    }
}
