pub mod channel;
pub mod nav_state;
pub mod tab;

pub use channel::{ChannelKind, ChannelRecord};
pub use nav_state::{ChannelTabDocument, ChannelTabState, GlobalNavigationState, MessagingLocation};
pub use tab::Tab;
