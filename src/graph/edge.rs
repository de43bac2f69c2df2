use serde::{Deserialize, Serialize};

/// A directed wire from one node's output connector to another node's
/// input connector.
///
/// Both endpoints must reference nodes in the same graph; the editor's
/// connection validation enforces multiplicity, not this crate.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphEdge {
    pub id: String,
    pub source: String,
    pub target: String,
    #[serde(default)]
    pub source_handle: Option<String>,
    #[serde(default)]
    pub target_handle: Option<String>,
}

impl GraphEdge {
    pub fn new(
        id: impl Into<String>,
        source: impl Into<String>,
        source_handle: Option<&str>,
        target: impl Into<String>,
        target_handle: Option<&str>,
    ) -> Self {
        Self {
            id: id.into(),
            source: source.into(),
            target: target.into(),
            source_handle: source_handle.map(str::to_string),
            target_handle: target_handle.map(str::to_string),
        }
    }
}
