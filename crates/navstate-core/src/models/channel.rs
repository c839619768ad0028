use serde::{Deserialize, Serialize};

/// Channel type as reported by the channel directory.
///
/// Only `class` and `import` change the tab catalog; every other type is
/// treated as a general channel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChannelKind {
    Class,
    Import,
    #[default]
    #[serde(other)]
    General,
}

impl ChannelKind {
    pub fn parse(name: &str) -> Self {
        match name {
            "class" => Self::Class,
            "import" => Self::Import,
            _ => Self::General,
        }
    }
}

/// `{ id, type }` record of the channel directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelRecord {
    pub id: String,
    #[serde(rename = "type", default)]
    pub kind: ChannelKind,
}

impl ChannelRecord {
    pub fn new(id: impl Into<String>, kind: ChannelKind) -> Self {
        Self {
            id: id.into(),
            kind,
        }
    }
}
