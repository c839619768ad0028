use std::collections::HashMap;

use anyhow::{Context, Result};
use navstate_core::store::now_millis;
use navstate_core::{
    resolve_route, ChannelKind, FileStore, NavConfig, RecordingRouter, TabNavigator,
    TabStateManager,
};
use serde_json::{json, Value};

use super::command::NavCommand;
use super::render::state_json;

pub type CliNavigator = TabNavigator<RecordingRouter, HashMap<String, ChannelKind>>;

/// Hydrate state from the configured data directory.
pub fn open_navigator(config: &NavConfig) -> Result<CliNavigator> {
    let data_dir = config.resolved_data_dir();
    let store = FileStore::open(&data_dir)
        .with_context(|| format!("Failed to open data directory: {}", data_dir.display()))?;
    tracing::debug!("Using data directory {}", data_dir.display());

    let manager = TabStateManager::hydrate(store);
    Ok(TabNavigator::with_manager(
        manager,
        RecordingRouter::new(),
        config.channel_directory(),
    ))
}

/// Run a command against an open navigator and describe the outcome as JSON.
pub fn execute(navigator: &mut CliNavigator, command: NavCommand) -> Result<Value> {
    let output = match command {
        NavCommand::Resolve { path } => {
            serde_json::to_value(resolve_route(&path)).context("Failed to serialize route")?
        }
        NavCommand::SelectChannel { channel_id } => {
            let path = navigator.handle_channel_select(&channel_id);
            json!({ "navigatedTo": path })
        }
        NavCommand::SelectTab { channel_id, tab } => {
            navigator.set_current_channel(Some(channel_id));
            let path = navigator.handle_tab_select(&tab);
            json!({ "navigatedTo": path })
        }
        NavCommand::SelectSubTab {
            channel_id,
            tab,
            sub_tab,
        } => {
            let recorded = navigator.handle_sub_tab_select(&channel_id, &tab, &sub_tab);
            json!({ "recorded": recorded })
        }
        NavCommand::Visit { path } => {
            let route = navigator.sync_from_path(&path);
            serde_json::to_value(route).context("Failed to serialize route")?
        }
        NavCommand::Restore => {
            let path = navigator.restore_messaging_location();
            json!({ "navigatedTo": path })
        }
        NavCommand::Show { channel_id } => {
            let state = navigator.state().lock();
            state_json(&state, channel_id.as_deref(), now_millis())
        }
        NavCommand::Clear { channel_id, global } => {
            let mut state = navigator.state().lock();
            match channel_id.as_deref() {
                Some(id) => state.clear_channel_tab_state(id),
                None if !global => state.clear_all_tab_state(),
                None => {}
            }
            if global {
                state.clear_global_state();
            }
            json!({ "cleared": true })
        }
        NavCommand::Logout => {
            navigator.logout();
            json!({ "cleared": true })
        }
    };
    Ok(output)
}

/// Entry point used by the binary. `resolve` never opens the data directory.
pub fn run_command(config: &NavConfig, command: NavCommand) -> Result<Value> {
    if let NavCommand::Resolve { path } = &command {
        return serde_json::to_value(resolve_route(path)).context("Failed to serialize route");
    }
    let mut navigator = open_navigator(config)?;
    execute(&mut navigator, command)
}

#[cfg(test)]
mod tests {
    use super::*;
    use navstate_core::ChannelRecord;
    use tempfile::tempdir;

    fn config_in(dir: &std::path::Path) -> NavConfig {
        let mut config = NavConfig::new(dir.join("state"));
        config.channels = vec![
            ChannelRecord::new("algebra", ChannelKind::Class),
            ChannelRecord::new("leads", ChannelKind::Import),
            ChannelRecord::new("staff", ChannelKind::General),
        ];
        config
    }

    #[test]
    fn test_resolve_does_not_create_data_dir() {
        let dir = tempdir().unwrap();
        let config = config_in(dir.path());

        let output = run_command(
            &config,
            NavCommand::Resolve {
                path: "/channels/abc/tasks/42".to_string(),
            },
        )
        .unwrap();

        assert_eq!(output["currentTab"], "tasks");
        assert_eq!(output["contentType"], "task");
        assert_eq!(output["contentId"], "42");
        assert_eq!(output["channelId"], "abc");
        assert!(!dir.path().join("state").exists());
    }

    #[test]
    fn test_state_persists_between_invocations() {
        let dir = tempdir().unwrap();
        let config = config_in(dir.path());

        run_command(
            &config,
            NavCommand::SelectTab {
                channel_id: "algebra".to_string(),
                tab: "classes".to_string(),
            },
        )
        .unwrap();
        let recorded = run_command(
            &config,
            NavCommand::SelectSubTab {
                channel_id: "algebra".to_string(),
                tab: "classes".to_string(),
                sub_tab: "courses".to_string(),
            },
        )
        .unwrap();
        assert_eq!(recorded["recorded"], true);

        let output = run_command(
            &config,
            NavCommand::SelectChannel {
                channel_id: "algebra".to_string(),
            },
        )
        .unwrap();
        assert_eq!(output["navigatedTo"], "/channels/algebra/classes/courses");

        let shown = run_command(
            &config,
            NavCommand::Show {
                channel_id: Some("algebra".to_string()),
            },
        )
        .unwrap();
        let channels = shown["channels"].as_array().unwrap();
        assert_eq!(channels.len(), 1);
        assert_eq!(channels[0]["tab"], "classes");
        assert_eq!(channels[0]["subTabs"]["classes"], "courses");
        assert_eq!(channels[0]["ageDays"], 0);
    }

    #[test]
    fn test_visit_then_restore() {
        let dir = tempdir().unwrap();
        let config = config_in(dir.path());

        run_command(
            &config,
            NavCommand::Visit {
                path: "/channels/leads/import".to_string(),
            },
        )
        .unwrap();

        let output = run_command(&config, NavCommand::Restore).unwrap();
        assert_eq!(output["navigatedTo"], "/channels/leads/import");
    }

    #[test]
    fn test_clear_variants() {
        let dir = tempdir().unwrap();
        let config = config_in(dir.path());
        let mut navigator = open_navigator(&config).unwrap();

        navigator.sync_from_path("/channels/staff/tasks");
        navigator.sync_from_path("/channels/algebra/wiki");

        execute(
            &mut navigator,
            NavCommand::Clear {
                channel_id: None,
                global: true,
            },
        )
        .unwrap();
        assert_eq!(navigator.state().lock().channel_count(), 2);
        assert!(navigator.state().lock().get_last_messaging_state().is_none());

        execute(
            &mut navigator,
            NavCommand::Clear {
                channel_id: Some("staff".to_string()),
                global: false,
            },
        )
        .unwrap();
        assert_eq!(navigator.state().lock().channel_ids(), vec!["algebra"]);

        execute(
            &mut navigator,
            NavCommand::Clear {
                channel_id: None,
                global: false,
            },
        )
        .unwrap();
        assert_eq!(navigator.state().lock().channel_count(), 0);
    }

    #[test]
    fn test_logout_wipes_files() {
        let dir = tempdir().unwrap();
        let config = config_in(dir.path());

        run_command(
            &config,
            NavCommand::Visit {
                path: "/channels/staff/messages/thread/t1".to_string(),
            },
        )
        .unwrap();
        run_command(&config, NavCommand::Logout).unwrap();

        let shown = run_command(&config, NavCommand::Show { channel_id: None }).unwrap();
        assert!(shown["channels"].as_array().unwrap().is_empty());
        assert!(shown["lastMessagingState"].is_null());
    }
}
