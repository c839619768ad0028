mod command;
mod render;
mod session;

pub use command::NavCommand;
pub use render::format_timestamp;
pub use session::{execute, open_navigator, run_command, CliNavigator};
