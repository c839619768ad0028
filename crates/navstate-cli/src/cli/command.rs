/// One CLI invocation, decoupled from clap
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavCommand {
    /// Resolve a path without touching stored state
    Resolve { path: String },
    SelectChannel { channel_id: String },
    SelectTab { channel_id: String, tab: String },
    SelectSubTab {
        channel_id: String,
        tab: String,
        sub_tab: String,
    },
    /// Record the location a router landed on
    Visit { path: String },
    /// Go back to the last messaging location
    Restore,
    Show { channel_id: Option<String> },
    /// `channel_id` clears one channel; otherwise all channels are cleared
    /// unless only `global` was requested
    Clear {
        channel_id: Option<String>,
        global: bool,
    },
    Logout,
}
