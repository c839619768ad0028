//! Per-channel tab memory plus the global "last messaging location" pointer.
//!
//! Both documents are hydrated once when the manager is built, mirrored in
//! memory, and written through to the [`KeyValueStore`] on every change.
//!
//! # Expiry
//! Channel entries whose age is at least [`STATE_EXPIRY_MS`] are dropped at
//! hydration and the pruned document is rewritten right away. The global
//! document carries a single pointer and expires as a whole.
//!
//! # Failures
//! This is a best-effort cache. Unreadable, corrupt or future-versioned
//! documents hydrate as empty state; failed writes are logged and the
//! in-memory state keeps serving the session. No operation returns an error.

use super::kv::{KeyValueStore, StoreError};
use crate::constants::{CHANNEL_TAB_STATE_KEY, GLOBAL_NAV_STATE_KEY, SCHEMA_VERSION, STATE_EXPIRY_MS};
use crate::models::nav_state::StoredChannelTabs;
use crate::models::{ChannelTabDocument, ChannelTabState, GlobalNavigationState, MessagingLocation, Tab};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;

/// Handle shared by the navigator and UI readers
pub type SharedTabState = Arc<Mutex<TabStateManager>>;

/// Current Unix time in milliseconds
pub fn now_millis() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Malformed document: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Unsupported schema version {found} (supported up to {supported})")]
    UnsupportedSchema { found: u32, supported: u32 },
}

fn check_schema(found: u32) -> Result<(), StateError> {
    if found > SCHEMA_VERSION {
        return Err(StateError::UnsupportedSchema {
            found,
            supported: SCHEMA_VERSION,
        });
    }
    Ok(())
}

fn load_channel_tabs(store: &dyn KeyValueStore) -> Result<HashMap<String, ChannelTabState>, StateError> {
    let Some(contents) = store.get(CHANNEL_TAB_STATE_KEY)? else {
        return Ok(HashMap::new());
    };
    let doc = serde_json::from_str::<StoredChannelTabs>(&contents)?.into_document();
    check_schema(doc.schema_version)?;
    Ok(doc.channels)
}

fn load_global(store: &dyn KeyValueStore) -> Result<Option<GlobalNavigationState>, StateError> {
    let Some(contents) = store.get(GLOBAL_NAV_STATE_KEY)? else {
        return Ok(None);
    };
    let state: GlobalNavigationState = serde_json::from_str(&contents)?;
    check_schema(state.schema_version)?;
    Ok(Some(state))
}

pub struct TabStateManager {
    store: Box<dyn KeyValueStore>,
    clock: fn() -> u64,
    channels: HashMap<String, ChannelTabState>,
    global: Option<GlobalNavigationState>,
}

impl TabStateManager {
    /// Hydrate from `store` using the system clock.
    pub fn hydrate(store: impl KeyValueStore + 'static) -> Self {
        Self::hydrate_with_clock(store, now_millis)
    }

    /// Hydrate from `store`; `clock` supplies epoch millis for expiry checks
    /// and for every timestamp written afterwards.
    pub fn hydrate_with_clock(store: impl KeyValueStore + 'static, clock: fn() -> u64) -> Self {
        let store: Box<dyn KeyValueStore> = Box::new(store);
        let now = clock();

        let mut channels = load_channel_tabs(store.as_ref()).unwrap_or_else(|e| {
            tracing::warn!("Discarding channel tab state: {}", e);
            HashMap::new()
        });

        let before = channels.len();
        channels.retain(|_, state| !state.is_expired(now));
        let pruned = before - channels.len();

        let global = match load_global(store.as_ref()) {
            Ok(Some(state)) if state.is_expired(now) => {
                tracing::info!(
                    "Global navigation state expired (age={}ms max={}ms), discarding",
                    now.saturating_sub(state.timestamp),
                    STATE_EXPIRY_MS
                );
                if let Err(e) = store.remove(GLOBAL_NAV_STATE_KEY) {
                    tracing::warn!("Failed to remove expired global navigation state: {}", e);
                }
                None
            }
            Ok(state) => state,
            Err(e) => {
                tracing::warn!("Discarding global navigation state: {}", e);
                None
            }
        };

        let manager = Self {
            store,
            clock,
            channels,
            global,
        };

        if pruned > 0 {
            tracing::info!("Pruned {} expired channel tab entries", pruned);
            manager.persist_channels();
        }

        manager
    }

    pub fn into_shared(self) -> SharedTabState {
        Arc::new(Mutex::new(self))
    }

    // ===== Reads =====

    /// Remembered tab for `channel_id`, provided it is still one of
    /// `available_tabs`. Falls back to [`Tab::Messages`].
    pub fn get_last_tab(&self, channel_id: &str, available_tabs: &[Tab]) -> Tab {
        self.channels
            .get(channel_id)
            .and_then(|state| state.tab)
            .filter(|tab| available_tabs.contains(tab))
            .unwrap_or_default()
    }

    pub fn get_last_sub_tab(&self, channel_id: &str, tab: Tab) -> Option<&str> {
        self.channels.get(channel_id)?.sub_tab(tab)
    }

    pub fn get_last_messaging_state(&self) -> Option<&MessagingLocation> {
        self.global.as_ref()?.last_messaging_state.as_ref()
    }

    pub fn channel_state(&self, channel_id: &str) -> Option<&ChannelTabState> {
        self.channels.get(channel_id)
    }

    /// Channel ids with remembered state, sorted
    pub fn channel_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.channels.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }

    pub fn global_state(&self) -> Option<&GlobalNavigationState> {
        self.global.as_ref()
    }

    // ===== Writes =====

    /// Record the channel's top-level tab. Sub-tabs are kept.
    pub fn save_tab(&mut self, channel_id: &str, tab: Tab) {
        let now = (self.clock)();
        let state = self.channels.entry(channel_id.to_string()).or_default();
        state.tab = Some(tab);
        state.timestamp = now;
        self.persist_channels();
    }

    /// Record `sub_tab` as the last sub-tab of `tab`. A channel without a
    /// top-level tab yet gets `tab` as its tab.
    pub fn save_sub_tab(&mut self, channel_id: &str, tab: Tab, sub_tab: &str) {
        let now = (self.clock)();
        let state = self.channels.entry(channel_id.to_string()).or_default();
        state.sub_tabs.insert(tab.as_str().to_string(), sub_tab.to_string());
        if state.tab.is_none() {
            state.tab = Some(tab);
        }
        state.timestamp = now;
        self.persist_channels();
    }

    /// Replace the global messaging location wholesale.
    pub fn save_messaging_state(&mut self, channel_id: &str, tab: Tab, sub_tab: Option<&str>) {
        let now = (self.clock)();
        let location = MessagingLocation {
            channel_id: channel_id.to_string(),
            tab,
            sub_tab: sub_tab.map(str::to_string),
            timestamp: now,
        };
        self.global = Some(GlobalNavigationState::new(Some(location), now));
        self.persist_global();
    }

    pub fn clear_channel_tab_state(&mut self, channel_id: &str) {
        if self.channels.remove(channel_id).is_some() {
            self.persist_channels();
        }
    }

    pub fn clear_all_tab_state(&mut self) {
        self.channels.clear();
        if let Err(e) = self.store.remove(CHANNEL_TAB_STATE_KEY) {
            tracing::error!("Failed to clear channel tab state: {}", e);
        }
    }

    pub fn clear_global_state(&mut self) {
        self.global = None;
        if let Err(e) = self.store.remove(GLOBAL_NAV_STATE_KEY) {
            tracing::error!("Failed to clear global navigation state: {}", e);
        }
    }

    /// Drop sub-tab entries of `channel_id` whose tab is not in
    /// `available_tabs`. Returns the number removed.
    ///
    /// Stale sub-tabs are otherwise left in place; they are only shadowed by
    /// the catalog check in the navigator.
    pub fn prune_stale_sub_tabs(&mut self, channel_id: &str, available_tabs: &[Tab]) -> usize {
        let Some(state) = self.channels.get_mut(channel_id) else {
            return 0;
        };
        let before = state.sub_tabs.len();
        state
            .sub_tabs
            .retain(|name, _| Tab::parse(name).is_some_and(|tab| available_tabs.contains(&tab)));
        let removed = before - state.sub_tabs.len();
        if removed > 0 {
            self.persist_channels();
        }
        removed
    }

    // ===== Persistence =====

    fn write_channels(&self) -> Result<(), StateError> {
        let doc = ChannelTabDocument {
            schema_version: SCHEMA_VERSION,
            channels: self.channels.clone(),
        };
        let json = serde_json::to_string(&doc)?;
        self.store.set(CHANNEL_TAB_STATE_KEY, &json)?;
        Ok(())
    }

    fn write_global(&self) -> Result<(), StateError> {
        match &self.global {
            Some(state) => {
                let json = serde_json::to_string(state)?;
                self.store.set(GLOBAL_NAV_STATE_KEY, &json)?;
            }
            None => self.store.remove(GLOBAL_NAV_STATE_KEY)?,
        }
        Ok(())
    }

    fn persist_channels(&self) {
        if let Err(e) = self.write_channels() {
            tracing::error!("Failed to save channel tab state: {}", e);
        }
    }

    fn persist_global(&self) {
        if let Err(e) = self.write_global() {
            tracing::error!("Failed to save global navigation state: {}", e);
        }
    }
}
