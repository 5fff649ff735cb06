/// How long the synchronized message stays visible, in milliseconds
pub const DEFAULT_DURATION_MS: u64 = 3000;

/// Delay before a `connecting` node state is reported, in milliseconds.
/// Short reconnects finish inside it and never flash the badge.
pub const CONNECTING_DELAY_MS: u64 = 100;
