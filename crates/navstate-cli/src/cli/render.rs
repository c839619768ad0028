use chrono::{DateTime, Utc};
use navstate_core::{ChannelTabState, MessagingLocation, TabStateManager};
use serde_json::{json, Value};

/// Epoch millis → RFC 3339, or the raw number when out of range
pub fn format_timestamp(ms: u64) -> String {
    i64::try_from(ms)
        .ok()
        .and_then(DateTime::<Utc>::from_timestamp_millis)
        .map(|dt| dt.to_rfc3339())
        .unwrap_or_else(|| ms.to_string())
}

fn age_days(ms: u64, now_ms: u64) -> u64 {
    now_ms.saturating_sub(ms) / (24 * 60 * 60 * 1000)
}

pub(crate) fn channel_json(channel_id: &str, state: &ChannelTabState, now_ms: u64) -> Value {
    let sub_tabs: serde_json::Map<String, Value> = state
        .sub_tabs
        .iter()
        .map(|(tab, sub_tab)| (tab.clone(), Value::from(sub_tab.as_str())))
        .collect();
    json!({
        "channelId": channel_id,
        "tab": state.tab,
        "subTabs": sub_tabs,
        "lastWritten": format_timestamp(state.timestamp),
        "ageDays": age_days(state.timestamp, now_ms),
    })
}

pub(crate) fn location_json(location: &MessagingLocation) -> Value {
    json!({
        "channelId": location.channel_id,
        "tab": location.tab,
        "subTab": location.sub_tab,
        "lastWritten": format_timestamp(location.timestamp),
    })
}

/// Full dump of the manager, optionally narrowed to one channel
pub(crate) fn state_json(manager: &TabStateManager, channel_id: Option<&str>, now_ms: u64) -> Value {
    let channels: Vec<Value> = manager
        .channel_ids()
        .into_iter()
        .filter(|id| channel_id.map_or(true, |wanted| wanted == *id))
        .filter_map(|id| manager.channel_state(id).map(|state| channel_json(id, state, now_ms)))
        .collect();

    json!({
        "channels": channels,
        "lastMessagingState": manager.get_last_messaging_state().map(location_json),
    })
}
