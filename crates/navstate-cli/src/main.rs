use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use navstate_cli::cli::{run_command, NavCommand};
use navstate_cli::tracing_setup::init_tracing;
use navstate_core::NavConfig;

#[derive(Parser)]
#[command(name = "navstate-cli")]
#[command(about = "Inspect and drive per-channel tab navigation state")]
struct Cli {
    /// Pretty-print JSON output
    #[arg(long, short)]
    pretty: bool,

    /// Path to JSON config file (contains dataDir, channels)
    #[arg(long, short = 'c')]
    config: Option<PathBuf>,

    /// Override the data directory from the config file
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Log debug output to stderr
    #[arg(long, short)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve a URL path into tab/content state
    Resolve {
        /// Path such as /channels/abc/tasks/42
        path: String,
    },

    /// Switch to a channel, landing on its last valid tab
    SelectChannel {
        /// Channel ID
        channel_id: String,
    },

    /// Select a tab in a channel (unknown tabs select messages)
    SelectTab {
        /// Channel ID
        channel_id: String,
        /// messages, tasks, classes, import or wiki
        tab: String,
    },

    /// Remember a sub-tab choice
    SelectSubTab {
        /// Channel ID
        channel_id: String,
        /// Tab owning the sub-tab (classes)
        tab: String,
        /// Sub-tab name, e.g. courses or info
        sub_tab: String,
    },

    /// Record a path the application navigated to
    Visit {
        /// Path such as /channels/abc/classes/info
        path: String,
    },

    /// Return to the last messaging location
    Restore,

    /// Dump the remembered state
    Show {
        /// Only show this channel
        channel_id: Option<String>,
    },

    /// Clear remembered state (all channels by default)
    Clear {
        /// Clear only this channel
        #[arg(long)]
        channel: Option<String>,
        /// Clear the global messaging location
        #[arg(long)]
        global: bool,
    },

    /// Clear everything
    Logout,
}

impl From<Commands> for NavCommand {
    fn from(command: Commands) -> Self {
        match command {
            Commands::Resolve { path } => NavCommand::Resolve { path },
            Commands::SelectChannel { channel_id } => NavCommand::SelectChannel { channel_id },
            Commands::SelectTab { channel_id, tab } => NavCommand::SelectTab { channel_id, tab },
            Commands::SelectSubTab {
                channel_id,
                tab,
                sub_tab,
            } => NavCommand::SelectSubTab {
                channel_id,
                tab,
                sub_tab,
            },
            Commands::Visit { path } => NavCommand::Visit { path },
            Commands::Restore => NavCommand::Restore,
            Commands::Show { channel_id } => NavCommand::Show { channel_id },
            Commands::Clear { channel, global } => NavCommand::Clear {
                channel_id: channel,
                global,
            },
            Commands::Logout => NavCommand::Logout,
        }
    }
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    init_tracing(cli.verbose)?;

    let mut config = match &cli.config {
        Some(path) => NavConfig::load(path)?,
        None => NavConfig::default(),
    };
    if let Some(data_dir) = cli.data_dir {
        config.data_dir = Some(data_dir);
    }

    let output = run_command(&config, cli.command.into())?;
    let rendered = if cli.pretty {
        serde_json::to_string_pretty(&output)?
    } else {
        serde_json::to_string(&output)?
    };
    println!("{}", rendered);
    Ok(())
}
