//! The capability set the badge consumes from a synchronization client.
//!
//! The badge never talks to a concrete client type. Anything that can report
//! its node state and connectivity and hand out event subscriptions can drive
//! it; each subscription returns an [`Unsubscribe`] disposer so cleanup is a
//! plain sequence of calls.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Error code sent by the server when the client speaks an old protocol.
pub const WRONG_PROTOCOL: &str = "wrong-protocol";
/// Error code sent by the server when the application subprotocol is outdated.
pub const WRONG_SUBPROTOCOL: &str = "wrong-subprotocol";

/// Server confirmed that an action was applied.
pub const PROCESSED: &str = "logux/processed";
/// Server reverted an action.
pub const UNDO: &str = "logux/undo";
pub const SUBSCRIBE: &str = "logux/subscribe";
pub const UNSUBSCRIBE: &str = "logux/unsubscribe";

/// Undo reason used when the server refused an action for access reasons.
pub const REASON_DENIED: &str = "denied";
pub const REASON_ERROR: &str = "error";

/// Disposer returned by every subscription.
pub type Unsubscribe = Box<dyn FnOnce()>;

pub type StateListener = Box<dyn Fn(NodeState)>;
pub type ErrorListener = Box<dyn Fn(&SyncError)>;
pub type AddListener = Box<dyn Fn(&Action, &Meta)>;

/// Lifecycle state of the synchronization node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeState {
    Disconnected,
    Connecting,
    Connected,
    Sending,
    Synchronized,
    Wait,
}

impl NodeState {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeState::Disconnected => "disconnected",
            NodeState::Connecting => "connecting",
            NodeState::Connected => "connected",
            NodeState::Sending => "sending",
            NodeState::Synchronized => "synchronized",
            NodeState::Wait => "wait",
        }
    }
}

impl fmt::Display for NodeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NodeState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "disconnected" => Ok(NodeState::Disconnected),
            "connecting" => Ok(NodeState::Connecting),
            "connected" => Ok(NodeState::Connected),
            "sending" => Ok(NodeState::Sending),
            "synchronized" => Ok(NodeState::Synchronized),
            "wait" => Ok(NodeState::Wait),
            other => Err(format!("unknown node state: {}", other)),
        }
    }
}

/// Error reported by the node, either from the server (`error`) or raised
/// locally (`clientError`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncError {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl SyncError {
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Whether the server rejected our protocol or subprotocol version
    pub fn is_protocol_mismatch(&self) -> bool {
        self.kind == WRONG_PROTOCOL || self.kind == WRONG_SUBPROTOCOL
    }
}

impl fmt::Display for SyncError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.description {
            Some(description) => write!(f, "{}: {}", self.kind, description),
            None => f.write_str(&self.kind),
        }
    }
}

/// An action added to the shared log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    #[serde(rename = "type")]
    pub kind: String,
    /// Id of the referenced action for `logux/processed` and `logux/undo`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl Action {
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            id: None,
            reason: None,
        }
    }

    pub fn processed(id: impl Into<String>) -> Self {
        Self::new(PROCESSED).with_id(id)
    }

    pub fn undo(id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::new(UNDO).with_id(id).with_reason(reason)
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }
}

/// Log metadata attached to an action
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Meta {
    pub id: String,
    /// Action must be delivered to the server
    #[serde(default)]
    pub sync: bool,
    /// Sequence number assigned by the log once the action was stored
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub added: Option<u64>,
}

/// Everything the badge needs from a synchronization client.
pub trait SyncClient {
    /// Current node state
    fn state(&self) -> NodeState;

    /// Whether the node currently has an open connection
    fn connected(&self) -> bool;

    fn on_state(&self, listener: StateListener) -> Unsubscribe;

    fn on_error(&self, listener: ErrorListener) -> Unsubscribe;

    fn on_client_error(&self, listener: ErrorListener) -> Unsubscribe;

    /// Subscribe to actions added to the log
    fn on_add(&self, listener: AddListener) -> Unsubscribe;
}
