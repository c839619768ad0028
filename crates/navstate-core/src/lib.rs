pub mod config;
pub mod constants;
pub mod models;
pub mod navigator;
pub mod route;
pub mod store;

pub use config::NavConfig;
pub use models::{ChannelKind, ChannelRecord, ChannelTabState, GlobalNavigationState, MessagingLocation, Tab};
pub use navigator::{tab_catalog, ChannelDirectory, RecordingRouter, Router, TabNavigator};
pub use route::{resolve_route, resolve_segments, tab_path, ContentType, RouteState};
pub use store::{FileStore, KeyValueStore, MemoryStore, SharedTabState, StoreError, TabStateManager};
