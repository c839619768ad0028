//! Storage keys and lifetimes shared by the store, the navigator and the CLI.

/// Storage key of the per-channel tab document
pub const CHANNEL_TAB_STATE_KEY: &str = "navstate.channelTabState";

/// Storage key of the global navigation document
pub const GLOBAL_NAV_STATE_KEY: &str = "navstate.globalNavigationState";

/// Lifetime of a persisted entry, measured from its last write (30 days)
pub const STATE_EXPIRY_MS: u64 = 30 * 24 * 60 * 60 * 1000;

/// Current version of both persisted documents.
///
/// Documents carrying a newer version are discarded at hydration.
pub const SCHEMA_VERSION: u32 = 1;

/// First path segment of every messaging route
pub const CHANNELS_ROUTE: &str = "channels";
