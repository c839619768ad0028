use super::Tab;
use crate::constants::{SCHEMA_VERSION, STATE_EXPIRY_MS};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Remembered tab state of one channel
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelTabState {
    /// Unset until a tab (or a sub-tab) is saved for the channel
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tab: Option<Tab>,
    /// Epoch millis of the last write
    #[serde(default)]
    pub timestamp: u64,
    /// Last sub-tab per tab name
    #[serde(default)]
    pub sub_tabs: HashMap<String, String>,
}

impl ChannelTabState {
    pub fn age_ms(&self, now_ms: u64) -> u64 {
        now_ms.saturating_sub(self.timestamp)
    }

    pub fn is_expired(&self, now_ms: u64) -> bool {
        self.age_ms(now_ms) >= STATE_EXPIRY_MS
    }

    pub fn sub_tab(&self, tab: Tab) -> Option<&str> {
        self.sub_tabs.get(tab.as_str()).map(String::as_str)
    }
}

/// The most recent location visited inside the messaging section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessagingLocation {
    pub channel_id: String,
    pub tab: Tab,
    #[serde(default)]
    pub sub_tab: Option<String>,
    pub timestamp: u64,
}

/// Global navigation document. Holds at most one messaging location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobalNavigationState {
    /// Missing in documents written before versioning (reads as 0)
    #[serde(default)]
    pub schema_version: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_messaging_state: Option<MessagingLocation>,
    #[serde(default)]
    pub timestamp: u64,
}

impl GlobalNavigationState {
    pub fn new(last_messaging_state: Option<MessagingLocation>, timestamp: u64) -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            last_messaging_state,
            timestamp,
        }
    }

    /// The global document expires as a whole, strictly after the lifetime.
    pub fn is_expired(&self, now_ms: u64) -> bool {
        now_ms.saturating_sub(self.timestamp) > STATE_EXPIRY_MS
    }
}

/// Versioned envelope of the per-channel document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelTabDocument {
    pub schema_version: u32,
    #[serde(default)]
    pub channels: HashMap<String, ChannelTabState>,
}

/// On-disk shapes accepted for the per-channel document.
///
/// Unversioned documents are the bare `{ channelId: state }` map.
#[derive(Deserialize)]
#[serde(untagged)]
pub(crate) enum StoredChannelTabs {
    Versioned(ChannelTabDocument),
    Legacy(HashMap<String, ChannelTabState>),
}

impl StoredChannelTabs {
    pub(crate) fn into_document(self) -> ChannelTabDocument {
        match self {
            Self::Versioned(doc) => doc,
            Self::Legacy(channels) => ChannelTabDocument {
                schema_version: 0,
                channels,
            },
        }
    }
}
