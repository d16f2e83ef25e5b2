use serde::{Deserialize, Serialize};

/// Standard fields every record carries on the remote side
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocMeta {
    /// Primary key (e.g. "PO/024/00012/25-26", "PROJ-0001")
    #[serde(default)]
    pub name: String,
    /// Creation timestamp, "YYYY-MM-DD HH:MM:SS.ffffff"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creation: Option<String>,
    /// Last modification timestamp
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modified: Option<String>,
    /// User that created the record
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
}

impl DocMeta {
    pub fn named(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Self::default()
        }
    }
}
