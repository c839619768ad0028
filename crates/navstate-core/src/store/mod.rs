pub mod kv;
pub mod tab_state;

pub use kv::{FileStore, KeyValueStore, MemoryStore, StoreError};
pub use tab_state::{now_millis, SharedTabState, StateError, TabStateManager};
