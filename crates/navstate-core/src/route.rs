//! URL path → channel view state.
//!
//! Messaging routes look like `/channels/{channelId}/{tab}[/{extra...}]`.
//! Resolution is total and side-effect free: anything unrecognized lands on
//! the messages tab.

use crate::constants::CHANNELS_ROUTE;
use crate::models::Tab;
use serde::Serialize;

/// Kind of item a route points at inside a tab
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    Thread,
    Task,
    Page,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteState {
    pub current_tab: Tab,
    pub content_type: Option<ContentType>,
    pub content_id: Option<String>,
    pub sub_tab: Option<String>,
    pub channel_id: Option<String>,
}

impl RouteState {
    /// Canonical path for this state, or `None` without a channel.
    pub fn to_path(&self) -> Option<String> {
        let channel_id = self.channel_id.as_deref()?;
        let mut path = tab_path(channel_id, self.current_tab, self.sub_tab.as_deref());
        match (self.content_type, self.content_id.as_deref()) {
            (Some(ContentType::Thread), Some(id)) => {
                path.push_str("/thread/");
                path.push_str(id);
            }
            (Some(ContentType::Task | ContentType::Page), Some(id)) => {
                path.push('/');
                path.push_str(id);
            }
            _ => {}
        }
        Some(path)
    }
}

/// `/channels/{channel_id}/{tab}[/{sub_tab}]`
pub fn tab_path(channel_id: &str, tab: Tab, sub_tab: Option<&str>) -> String {
    match sub_tab {
        Some(sub) => format!("/{}/{}/{}/{}", CHANNELS_ROUTE, channel_id, tab, sub),
        None => format!("/{}/{}/{}", CHANNELS_ROUTE, channel_id, tab),
    }
}

/// Resolve a full path. The channel id is segment 1 when segment 0 is
/// `channels`. Query strings and fragments are ignored.
pub fn resolve_route(path: &str) -> RouteState {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    let channel_id = match segments.as_slice() {
        [CHANNELS_ROUTE, channel_id, ..] => Some(*channel_id),
        _ => None,
    };
    resolve_segments(&segments, channel_id)
}

/// Resolve pre-split, non-empty path segments. `channel_id` is the router's
/// channel parameter and is carried through unchanged.
pub fn resolve_segments(segments: &[&str], channel_id: Option<&str>) -> RouteState {
    let mut state = RouteState {
        channel_id: channel_id.map(str::to_string),
        ..Default::default()
    };

    let Some(tab) = segments.get(2).and_then(|name| Tab::parse(name)) else {
        return state;
    };
    state.current_tab = tab;

    let extra = segments.get(3).copied();
    match tab {
        Tab::Messages => {
            if let (Some("thread"), Some(thread_id)) = (extra, segments.get(4)) {
                state.content_type = Some(ContentType::Thread);
                state.content_id = Some(thread_id.to_string());
            }
        }
        Tab::Tasks => {
            if let Some(task_id) = extra {
                state.content_type = Some(ContentType::Task);
                state.content_id = Some(task_id.to_string());
            }
        }
        Tab::Classes => {
            state.sub_tab = extra.map(str::to_string);
        }
        Tab::Import => {}
        Tab::Wiki => {
            if let Some(page_id) = extra {
                state.content_type = Some(ContentType::Page);
                state.content_id = Some(page_id.to_string());
            }
        }
    }

    state
}
