use std::rc::Rc;
use std::time::Duration;
use syncbadge_core::client::{WRONG_PROTOCOL, WRONG_SUBPROTOCOL};
use syncbadge_core::memory::{ManualScheduler, MemoryClient, MemorySurface};
use syncbadge_core::{
    Action, Badge, BadgeConfig, ConfigError, DisplayState, Messages, NodeState, Part, Position,
    Style, Styles, SyncError,
};

const IMAGE: &str = "url(IMAGE_MOCK)";

fn styles() -> Styles {
    let state = || Style::new().with("background-image", IMAGE);
    Styles {
        base: Style::new().with("position", "fixed"),
        text: Style::new().with("display", "table-cell"),
        error: state(),
        synchronized: Some(state()),
        disconnected: Some(state()),
        wait: Some(state()),
        sending: Some(state()),
        sync_error: None,
        protocol_error: None,
        denied: None,
    }
}

struct TestBadge {
    client: MemoryClient,
    scheduler: Rc<ManualScheduler>,
    surface: Rc<MemorySurface>,
    badge: Badge,
    messages: Messages,
}

impl TestBadge {
    fn new() -> Self {
        Self::with(|config| config)
    }

    fn with(configure: impl FnOnce(BadgeConfig) -> BadgeConfig) -> Self {
        let client = MemoryClient::new();
        let scheduler = Rc::new(ManualScheduler::new());
        let surface = Rc::new(MemorySurface::new());
        let messages = Messages::en();
        let config = configure(BadgeConfig::new(messages.clone(), styles()));
        let badge = Badge::bind(&client, surface.clone(), scheduler.clone(), config).unwrap();
        Self {
            client,
            scheduler,
            surface,
            badge,
            messages,
        }
    }

    fn display(&self) -> Option<String> {
        self.surface.style(Part::Widget, "display")
    }

    fn widget(&self, property: &str) -> Option<String> {
        self.surface.style(Part::Widget, property)
    }

    fn message(&self, state: DisplayState) -> String {
        self.messages.get(state).unwrap().to_string()
    }

    fn advance(&self, ms: u64) {
        self.scheduler.advance(Duration::from_millis(ms));
    }

    fn assert_shown(&self, state: DisplayState) {
        assert_eq!(self.display().as_deref(), Some("block"));
        assert_eq!(self.widget("background-image").as_deref(), Some(IMAGE));
        assert_eq!(self.surface.text(), self.message(state));
        assert_eq!(self.badge.state(), state);
    }
}

#[test]
fn injects_base_widget_styles() {
    let test = TestBadge::new();
    assert_eq!(test.widget("position").as_deref(), Some("fixed"));
    assert_eq!(
        test.surface.style(Part::Text, "display").as_deref(),
        Some("table-cell")
    );
    assert_eq!(test.display().as_deref(), Some("none"));
    assert_eq!(test.badge.state(), DisplayState::None);
}

#[test]
fn shows_synchronized_state() {
    let test = TestBadge::with(|config| config.with_duration(Duration::from_millis(10)));

    test.client.set_connected(true);
    test.client.set_state(NodeState::Synchronized);
    assert_eq!(test.display().as_deref(), Some("none"));

    test.client.set_connected(false);
    test.client.set_state(NodeState::Disconnected);
    let id = test.client.add_sync(Action::new("A"));

    test.client.set_state(NodeState::Connecting);
    test.client.set_connected(true);
    test.client.set_state(NodeState::Sending);
    test.client.set_state(NodeState::Synchronized);
    assert_eq!(test.display().as_deref(), Some("block"));
    assert_eq!(test.widget("background-image").as_deref(), Some(IMAGE));

    test.client.add_local(Action::processed(id));
    test.advance(1);
    test.assert_shown(DisplayState::Synchronized);

    test.advance(10);
    assert_eq!(test.display().as_deref(), Some("none"));
    assert_eq!(test.badge.state(), DisplayState::None);
}

#[test]
fn shows_disconnected_state() {
    let test = TestBadge::new();
    test.client.set_connected(true);
    test.client.set_state(NodeState::Connected);
    test.client.set_connected(false);
    test.client.set_state(NodeState::Disconnected);
    test.assert_shown(DisplayState::Disconnected);
}

#[test]
fn shows_wait_state() {
    let test = TestBadge::new();
    test.client.set_connected(false);
    test.client.set_state(NodeState::Disconnected);
    test.client.set_state(NodeState::Wait);
    test.client.add_sync(Action::new("A"));
    test.assert_shown(DisplayState::Wait);
}

#[test]
fn shows_sending_state() {
    let test = TestBadge::new();

    test.client.set_connected(false);
    test.client.set_state(NodeState::Disconnected);
    test.client.set_state(NodeState::Connecting);
    assert_eq!(test.surface.text(), test.message(DisplayState::Disconnected));

    test.client.set_state(NodeState::Wait);
    test.client.add_sync(Action::new("A"));

    test.client.set_state(NodeState::Connecting);
    test.assert_shown(DisplayState::Wait);

    test.advance(105);
    test.assert_shown(DisplayState::Sending);

    test.client.set_state(NodeState::Sending);
    test.assert_shown(DisplayState::Sending);
}

#[test]
fn connecting_after_disconnect_escalates_to_sending() {
    let test = TestBadge::new();
    test.client.set_state(NodeState::Disconnected);
    test.client.set_state(NodeState::Connecting);

    test.advance(99);
    test.assert_shown(DisplayState::Disconnected);
    test.advance(1);
    test.assert_shown(DisplayState::Sending);
}

#[test]
fn quick_reconnect_does_not_flash() {
    let test = TestBadge::new();
    test.client.set_connected(true);
    test.client.set_state(NodeState::Synchronized);
    test.client.set_state(NodeState::Connecting);
    test.advance(50);
    test.client.set_state(NodeState::Synchronized);
    test.advance(500);

    assert_eq!(test.display().as_deref(), Some("none"));
    assert_eq!(test.badge.state(), DisplayState::None);
}

#[test]
fn shows_error() {
    let test = TestBadge::new();
    test.client.emit_error(SyncError::new("any error"));
    test.assert_shown(DisplayState::Error);
}

#[test]
fn shows_server_errors() {
    let test = TestBadge::new();
    test.client.emit_error(SyncError::new(WRONG_PROTOCOL));
    test.assert_shown(DisplayState::ProtocolError);

    test.client.emit_error(SyncError::new(WRONG_SUBPROTOCOL));
    test.assert_shown(DisplayState::ProtocolError);
}

#[test]
fn protocol_error_is_not_hidden_by_timer() {
    let test = TestBadge::with(|config| config.with_duration(Duration::from_millis(10)));
    test.client.set_state(NodeState::Disconnected);
    let id = test.client.add_sync(Action::new("A"));
    test.client.set_state(NodeState::Synchronized);
    test.client.add_local(Action::processed(id));
    test.assert_shown(DisplayState::Synchronized);

    test.client.emit_error(SyncError::new(WRONG_PROTOCOL));
    test.client.set_state(NodeState::Synchronized);
    test.advance(100);
    test.assert_shown(DisplayState::ProtocolError);
}

#[test]
fn shows_client_error() {
    let test = TestBadge::new();
    test.client
        .emit_client_error(SyncError::new("test").with_description("type"));
    test.assert_shown(DisplayState::Error);
}

#[test]
fn shows_error_undo_actions() {
    let test = TestBadge::new();
    test.client.add_local(Action::new("logux/undo").with_reason("error"));
    test.assert_shown(DisplayState::UndoError);
}

#[test]
fn shows_denied_undo_actions() {
    let test = TestBadge::new();
    test.client.add_local(Action::new("logux/undo").with_reason("denied"));
    test.assert_shown(DisplayState::UndoDenied);
    assert_ne!(test.surface.text(), test.message(DisplayState::Error));
}

#[test]
fn supports_bottom_left_position() {
    let test = TestBadge::with(|config| config.with_position(Position::BottomLeft));
    assert_eq!(test.widget("bottom").as_deref(), Some("0px"));
    assert_eq!(test.widget("left").as_deref(), Some("0px"));
    assert_eq!(test.widget("transform"), None);
}

#[test]
fn supports_middle_right_position() {
    let test = TestBadge::with(|config| config.with_position(Position::MiddleRight));
    assert_eq!(test.widget("top").as_deref(), Some("50%"));
    assert_eq!(test.widget("right").as_deref(), Some("0px"));
    assert_eq!(test.widget("transform").as_deref(), Some("translateY(-50%)"));
}

#[test]
fn supports_bottom_center_position() {
    let test = TestBadge::with(|config| config.with_position(Position::BottomCenter));
    assert_eq!(test.widget("bottom").as_deref(), Some("0px"));
    assert_eq!(test.widget("left").as_deref(), Some("50%"));
    assert_eq!(test.widget("transform").as_deref(), Some("translateX(-50%)"));
}

#[test]
fn supports_middle_center_and_center_middle_positions() {
    for name in ["middle-center", "center-middle"] {
        let position: Position = name.parse().unwrap();
        let test = TestBadge::with(|config| config.with_position(position));
        assert_eq!(test.widget("top").as_deref(), Some("50%"));
        assert_eq!(test.widget("left").as_deref(), Some("50%"));
        assert_eq!(
            test.widget("transform").as_deref(),
            Some("translate(-50%, -50%)")
        );
    }
}

#[test]
fn removes_badge_from_dom() {
    let test = TestBadge::new();
    test.badge.unbind();
    assert!(test.surface.is_removed());
    assert!(!test.badge.is_bound());
    assert_eq!(test.client.listener_count(), 0);

    let writes = test.surface.writes();
    test.client.emit_error(SyncError::new(WRONG_PROTOCOL));
    test.badge.unbind();
    assert_eq!(test.surface.writes(), writes);
}

#[test]
fn rejects_incomplete_config_before_drawing() {
    let surface = Rc::new(MemorySurface::new());
    let mut styles = styles();
    styles.sending = None;

    let result = Badge::bind(
        &MemoryClient::new(),
        surface.clone(),
        Rc::new(ManualScheduler::new()),
        BadgeConfig::new(Messages::en(), styles),
    );

    assert!(matches!(
        result,
        Err(ConfigError::MissingStyle(DisplayState::Sending))
    ));
    assert_eq!(surface.writes(), 0);
}
