//! Connection badge for log-synchronizing clients.
//!
//! [`Badge::bind`] follows a [`SyncClient`] and shows a small floating
//! message whenever the user should know about synchronization: offline,
//! waiting to send, sending, synchronized, or an error. Drawing goes through
//! a [`BadgeSurface`] and timers through a [`Scheduler`], so the same logic
//! runs in a browser and in tests.

pub mod badge;
pub mod client;
pub mod config;
pub mod constants;
pub mod display;
pub mod emitter;
pub mod error;
pub mod memory;
pub mod messages;
pub mod position;
pub mod scheduler;
pub mod status;
pub mod styles;
pub mod surface;

pub use badge::Badge;
pub use client::{Action, Meta, NodeState, SyncClient, SyncError, Unsubscribe};
pub use config::{BadgeConfig, BadgeOptions};
pub use display::DisplayState;
pub use error::ConfigError;
pub use messages::Messages;
pub use position::Position;
pub use scheduler::{Scheduler, TaskHandle};
pub use status::{track_status, Status, StatusHandle};
pub use styles::{Style, Styles};
pub use surface::{BadgeSurface, Part};
