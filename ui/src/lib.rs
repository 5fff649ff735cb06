//! Browser bindings for the sync status badge.
//!
//! [`badge`] mounts the badge under `document.body` and drives its timers
//! with `window.setTimeout`. [`SyncBadge`] does the same from a Dioxus tree.

mod component;
mod dom;
mod error;
mod timer;

pub use component::{SharedClient, SyncBadge};
pub use dom::DomSurface;
pub use error::WebError;
pub use timer::WindowScheduler;

use std::rc::Rc;
use syncbadge_core::{Badge, BadgeConfig, SyncClient};

/// Shows a sync badge for `client` in the current document.
///
/// The configuration is checked before anything is added to the page.
pub fn badge<C>(client: &C, config: BadgeConfig) -> Result<Badge, WebError>
where
    C: SyncClient + ?Sized,
{
    config.validate()?;
    let scheduler = Rc::new(WindowScheduler::new()?);
    let surface = Rc::new(DomSurface::mount()?);
    Ok(Badge::bind(client, surface, scheduler, config)?)
}
