use serde::{Deserialize, Serialize};
use std::fmt;

/// Top-level tab of a channel view.
///
/// Deserialization is lenient: any unrecognized name reads back as
/// [`Tab::Messages`], so a stale or hand-edited document can never put an
/// invalid tab into memory.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum Tab {
    #[default]
    Messages,
    Tasks,
    Classes,
    Import,
    Wiki,
}

impl Tab {
    pub const ALL: [Tab; 5] = [Tab::Messages, Tab::Tasks, Tab::Classes, Tab::Import, Tab::Wiki];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Messages => "messages",
            Self::Tasks => "tasks",
            Self::Classes => "classes",
            Self::Import => "import",
            Self::Wiki => "wiki",
        }
    }

    /// Strict parse. Returns `None` for names outside the closed set.
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "messages" => Some(Self::Messages),
            "tasks" => Some(Self::Tasks),
            "classes" => Some(Self::Classes),
            "import" => Some(Self::Import),
            "wiki" => Some(Self::Wiki),
            _ => None,
        }
    }

    /// Only the classes tab remembers a sub-tab (courses, info, ...)
    pub fn has_sub_tabs(&self) -> bool {
        matches!(self, Self::Classes)
    }
}

impl From<String> for Tab {
    fn from(name: String) -> Self {
        Self::parse(&name).unwrap_or_default()
    }
}

impl fmt::Display for Tab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
