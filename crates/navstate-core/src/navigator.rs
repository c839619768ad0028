//! Tab and channel switching.
//!
//! The navigator combines the remembered state in [`TabStateManager`] with
//! the tab catalog of the destination channel and hands the resulting path
//! to the host's [`Router`]. A channel switch therefore never lands on a tab
//! the destination channel does not offer.

use crate::models::{ChannelKind, ChannelRecord, Tab};
use crate::route::{resolve_route, tab_path, RouteState};
use crate::store::{SharedTabState, TabStateManager};
use std::collections::HashMap;

/// Path navigation provided by the host application
pub trait Router {
    fn navigate(&mut self, path: &str);
}

/// Channel type lookup provided by the host application
pub trait ChannelDirectory {
    /// `None` when the channel is unknown to the directory
    fn channel_kind(&self, channel_id: &str) -> Option<ChannelKind>;
}

impl ChannelDirectory for Vec<ChannelRecord> {
    fn channel_kind(&self, channel_id: &str) -> Option<ChannelKind> {
        self.iter().find(|c| c.id == channel_id).map(|c| c.kind)
    }
}

impl ChannelDirectory for HashMap<String, ChannelKind> {
    fn channel_kind(&self, channel_id: &str) -> Option<ChannelKind> {
        self.get(channel_id).copied()
    }
}

/// Router that only remembers where it was sent
#[derive(Debug, Clone, Default)]
pub struct RecordingRouter {
    history: Vec<String>,
}

impl RecordingRouter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn history(&self) -> &[String] {
        &self.history
    }

    pub fn last(&self) -> Option<&str> {
        self.history.last().map(String::as_str)
    }
}

impl Router for RecordingRouter {
    fn navigate(&mut self, path: &str) {
        self.history.push(path.to_string());
    }
}

/// Tabs offered by a channel of the given kind.
///
/// Base set is messages, tasks, wiki. `classes` and `import` are each
/// inserted at position 1 when the kind calls for them.
pub fn tab_catalog(kind: Option<ChannelKind>) -> Vec<Tab> {
    let mut tabs = vec![Tab::Messages, Tab::Tasks, Tab::Wiki];
    if kind == Some(ChannelKind::Class) {
        tabs.insert(1, Tab::Classes);
    }
    if kind == Some(ChannelKind::Import) {
        tabs.insert(1, Tab::Import);
    }
    tabs
}

pub struct TabNavigator<R, D> {
    state: SharedTabState,
    router: R,
    directory: D,
    current_channel: Option<String>,
}

impl<R: Router, D: ChannelDirectory> TabNavigator<R, D> {
    pub fn new(state: SharedTabState, router: R, directory: D) -> Self {
        Self {
            state,
            router,
            directory,
            current_channel: None,
        }
    }

    /// Convenience constructor taking ownership of a hydrated manager
    pub fn with_manager(manager: TabStateManager, router: R, directory: D) -> Self {
        Self::new(manager.into_shared(), router, directory)
    }

    pub fn state(&self) -> &SharedTabState {
        &self.state
    }

    pub fn router(&self) -> &R {
        &self.router
    }

    pub fn directory(&self) -> &D {
        &self.directory
    }

    pub fn current_channel(&self) -> Option<&str> {
        self.current_channel.as_deref()
    }

    pub fn set_current_channel(&mut self, channel_id: Option<String>) {
        self.current_channel = channel_id.filter(|id| !id.is_empty());
    }

    pub fn available_tabs(&self, channel_id: &str) -> Vec<Tab> {
        tab_catalog(self.directory.channel_kind(channel_id))
    }

    /// Switch the current channel to `tab`. Unknown names select messages.
    /// Returns the path navigated to, or `None` without a current channel.
    pub fn handle_tab_select(&mut self, tab: &str) -> Option<String> {
        let Some(channel_id) = self.current_channel.clone() else {
            tracing::debug!("Tab select '{}' ignored: no current channel", tab);
            return None;
        };
        let tab = Tab::parse(tab).unwrap_or_default();
        self.state.lock().save_tab(&channel_id, tab);
        Some(self.navigate_to_tab(&channel_id, tab))
    }

    /// Open `new_channel_id` on its last tab that is valid for its type.
    pub fn handle_channel_select(&mut self, new_channel_id: &str) -> Option<String> {
        if new_channel_id.is_empty() {
            return None;
        }
        let available = self.available_tabs(new_channel_id);
        let tab = self.state.lock().get_last_tab(new_channel_id, &available);
        tracing::debug!(
            "Channel {} resolved to tab {} (catalog: {:?})",
            new_channel_id,
            tab,
            available
        );
        self.current_channel = Some(new_channel_id.to_string());
        Some(self.navigate_to_tab(new_channel_id, tab))
    }

    /// Remember a sub-tab choice. Returns false (and does nothing) unless
    /// all three arguments are present and `tab` is a known tab.
    pub fn handle_sub_tab_select(&self, channel_id: &str, tab: &str, sub_tab: &str) -> bool {
        if channel_id.is_empty() || sub_tab.is_empty() {
            return false;
        }
        let Some(tab) = Tab::parse(tab) else {
            return false;
        };
        self.state.lock().save_sub_tab(channel_id, tab, sub_tab);
        true
    }

    /// Record the location the router landed on: current channel, its tab,
    /// its classes sub-tab, and the global messaging pointer.
    pub fn sync_from_path(&mut self, path: &str) -> RouteState {
        let route = resolve_route(path);
        let Some(channel_id) = route.channel_id.clone() else {
            return route;
        };

        {
            let mut state = self.state.lock();
            state.save_tab(&channel_id, route.current_tab);
            if let (Tab::Classes, Some(sub_tab)) = (route.current_tab, route.sub_tab.as_deref()) {
                state.save_sub_tab(&channel_id, Tab::Classes, sub_tab);
            }
            state.save_messaging_state(&channel_id, route.current_tab, route.sub_tab.as_deref());
        }

        self.current_channel = Some(channel_id);
        route
    }

    /// Return to the last messaging location after visiting another section.
    /// The remembered tab is re-validated against the channel's catalog.
    pub fn restore_messaging_location(&mut self) -> Option<String> {
        let last = self.state.lock().get_last_messaging_state().cloned()?;
        let available = self.available_tabs(&last.channel_id);
        let tab = if available.contains(&last.tab) {
            last.tab
        } else {
            Tab::Messages
        };

        let sub_tab = match (tab, last.sub_tab) {
            (Tab::Classes, Some(sub_tab)) => Some(sub_tab),
            (Tab::Classes, None) => self
                .state
                .lock()
                .get_last_sub_tab(&last.channel_id, Tab::Classes)
                .map(str::to_string),
            _ => None,
        };

        let path = tab_path(&last.channel_id, tab, sub_tab.as_deref());
        self.router.navigate(&path);
        self.current_channel = Some(last.channel_id);
        Some(path)
    }

    /// Forget everything (used on sign-out)
    pub fn logout(&mut self) {
        let mut state = self.state.lock();
        state.clear_all_tab_state();
        state.clear_global_state();
        drop(state);
        self.current_channel = None;
    }

    fn navigate_to_tab(&mut self, channel_id: &str, tab: Tab) -> String {
        let sub_tab = if tab.has_sub_tabs() {
            self.state
                .lock()
                .get_last_sub_tab(channel_id, tab)
                .map(str::to_string)
        } else {
            None
        };
        let path = tab_path(channel_id, tab, sub_tab.as_deref());
        self.router.navigate(&path);
        path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn directory() -> Vec<ChannelRecord> {
        vec![
            ChannelRecord::new("class-1", ChannelKind::Class),
            ChannelRecord::new("import-1", ChannelKind::Import),
            ChannelRecord::new("general-1", ChannelKind::General),
        ]
    }

    fn navigator(store: &MemoryStore) -> TabNavigator<RecordingRouter, Vec<ChannelRecord>> {
        let manager = TabStateManager::hydrate(store.clone());
        TabNavigator::with_manager(manager, RecordingRouter::new(), directory())
    }

    #[test]
    fn test_tab_catalog_rule() {
        assert_eq!(tab_catalog(None), vec![Tab::Messages, Tab::Tasks, Tab::Wiki]);
        assert_eq!(
            tab_catalog(Some(ChannelKind::General)),
            vec![Tab::Messages, Tab::Tasks, Tab::Wiki]
        );
        assert_eq!(
            tab_catalog(Some(ChannelKind::Class)),
            vec![Tab::Messages, Tab::Classes, Tab::Tasks, Tab::Wiki]
        );
        assert_eq!(
            tab_catalog(Some(ChannelKind::Import)),
            vec![Tab::Messages, Tab::Import, Tab::Tasks, Tab::Wiki]
        );
    }

    #[test]
    fn test_tab_select_requires_current_channel() {
        let mut nav = navigator(&MemoryStore::new());
        assert_eq!(nav.handle_tab_select("tasks"), None);
        assert!(nav.router().history().is_empty());
        assert_eq!(nav.state().lock().channel_count(), 0);
    }

    #[test]
    fn test_tab_select_saves_and_navigates() {
        let mut nav = navigator(&MemoryStore::new());
        nav.set_current_channel(Some("general-1".to_string()));

        assert_eq!(
            nav.handle_tab_select("tasks").as_deref(),
            Some("/channels/general-1/tasks")
        );
        assert_eq!(nav.state().lock().get_last_tab("general-1", &Tab::ALL), Tab::Tasks);

        assert_eq!(
            nav.handle_tab_select("calendar").as_deref(),
            Some("/channels/general-1/messages")
        );
        assert_eq!(
            nav.state().lock().get_last_tab("general-1", &Tab::ALL),
            Tab::Messages
        );
    }

    #[test]
    fn test_classes_select_restores_sub_tab() {
        let mut nav = navigator(&MemoryStore::new());
        nav.set_current_channel(Some("class-1".to_string()));

        assert_eq!(
            nav.handle_tab_select("classes").as_deref(),
            Some("/channels/class-1/classes")
        );
        assert!(nav.handle_sub_tab_select("class-1", "classes", "info"));
        assert_eq!(
            nav.handle_tab_select("classes").as_deref(),
            Some("/channels/class-1/classes/info")
        );
    }

    #[test]
    fn test_sub_tab_select_requires_all_arguments() {
        let nav = navigator(&MemoryStore::new());
        assert!(!nav.handle_sub_tab_select("", "classes", "info"));
        assert!(!nav.handle_sub_tab_select("class-1", "", "info"));
        assert!(!nav.handle_sub_tab_select("class-1", "classes", ""));
        assert!(!nav.handle_sub_tab_select("class-1", "bogus", "info"));
        assert_eq!(nav.state().lock().channel_count(), 0);
    }

    #[test]
    fn test_channel_select_restores_last_tab() {
        let store = MemoryStore::new();
        let mut nav = navigator(&store);
        nav.set_current_channel(Some("class-1".to_string()));
        nav.handle_tab_select("classes");
        nav.handle_sub_tab_select("class-1", "classes", "courses");

        nav.handle_channel_select("general-1");
        assert_eq!(nav.current_channel(), Some("general-1"));
        assert_eq!(nav.router().last(), Some("/channels/general-1/messages"));

        // A fresh session over the same store lands back on the classes sub-tab
        let mut nav = navigator(&store);
        assert_eq!(
            nav.handle_channel_select("class-1").as_deref(),
            Some("/channels/class-1/classes/courses")
        );
    }

    #[test]
    fn test_channel_select_rejects_tab_invalid_for_type() {
        let mut nav = navigator(&MemoryStore::new());
        // Remembered while the channel was a class channel
        nav.state().lock().save_tab("general-1", Tab::Classes);

        assert_eq!(
            nav.handle_channel_select("general-1").as_deref(),
            Some("/channels/general-1/messages")
        );
        assert_eq!(
            nav.handle_channel_select("unknown-channel").as_deref(),
            Some("/channels/unknown-channel/messages")
        );
        assert_eq!(nav.handle_channel_select(""), None);
    }

    #[test]
    fn test_import_channel_keeps_import_tab() {
        let mut nav = navigator(&MemoryStore::new());
        nav.handle_channel_select("import-1");
        nav.handle_tab_select("import");
        nav.handle_channel_select("general-1");

        assert_eq!(
            nav.handle_channel_select("import-1").as_deref(),
            Some("/channels/import-1/import")
        );
    }

    #[test]
    fn test_sync_from_path_records_location() {
        let mut nav = navigator(&MemoryStore::new());
        let route = nav.sync_from_path("/channels/class-1/classes/info");
        assert_eq!(route.sub_tab.as_deref(), Some("info"));
        assert_eq!(nav.current_channel(), Some("class-1"));

        let state = nav.state().lock();
        assert_eq!(state.get_last_tab("class-1", &Tab::ALL), Tab::Classes);
        assert_eq!(state.get_last_sub_tab("class-1", Tab::Classes), Some("info"));
        let last = state.get_last_messaging_state().unwrap();
        assert_eq!(last.channel_id, "class-1");
        assert_eq!(last.tab, Tab::Classes);
        assert_eq!(last.sub_tab.as_deref(), Some("info"));
    }

    #[test]
    fn test_sync_from_foreign_path_changes_nothing() {
        let mut nav = navigator(&MemoryStore::new());
        let route = nav.sync_from_path("/bookkeeping/payments/2024");
        assert_eq!(route.channel_id, None);
        assert_eq!(nav.current_channel(), None);
        assert!(nav.state().lock().get_last_messaging_state().is_none());
    }

    #[test]
    fn test_restore_messaging_location() {
        let mut nav = navigator(&MemoryStore::new());
        assert_eq!(nav.restore_messaging_location(), None);

        nav.sync_from_path("/channels/class-1/classes/courses");
        nav.set_current_channel(None);

        assert_eq!(
            nav.restore_messaging_location().as_deref(),
            Some("/channels/class-1/classes/courses")
        );
        assert_eq!(nav.current_channel(), Some("class-1"));
    }

    #[test]
    fn test_restore_revalidates_tab_against_catalog() {
        let mut nav = navigator(&MemoryStore::new());
        nav.state()
            .lock()
            .save_messaging_state("general-1", Tab::Import, None);

        assert_eq!(
            nav.restore_messaging_location().as_deref(),
            Some("/channels/general-1/messages")
        );
    }

    #[test]
    fn test_logout_clears_everything() {
        let store = MemoryStore::new();
        let mut nav = navigator(&store);
        nav.sync_from_path("/channels/general-1/tasks/7");
        assert!(!store.is_empty());

        nav.logout();
        assert!(store.is_empty());
        assert_eq!(nav.current_channel(), None);
        assert_eq!(nav.handle_tab_select("tasks"), None);
    }

    #[test]
    fn test_hash_map_directory() {
        let mut kinds = HashMap::new();
        kinds.insert("c".to_string(), ChannelKind::Class);
        assert_eq!(kinds.channel_kind("c"), Some(ChannelKind::Class));
        assert_eq!(kinds.channel_kind("missing"), None);
    }
}
