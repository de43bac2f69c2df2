use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The payload type carried by a connector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataKind {
    Text,
    Image,
    Video,
    Audio,
    Any,
}

/// Node type discriminator, matching the editor's `type` strings.
///
/// The first four kinds are pure source nodes: the node itself is the
/// input, held in a designated value field. Unrecognized type strings
/// survive round-trips through `Other` so old saved graphs stay loadable.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NodeKind {
    Text,
    Image,
    Video,
    Audio,
    TextGeneration,
    ImageGeneration,
    VideoGeneration,
    MusicGeneration,
    UpscaleImage,
    MergeVideos,
    Compound,
    #[serde(untagged)]
    Other(String),
}

/// Canvas coordinates. Irrelevant to composition and execution; carried
/// so that saved internal workflows re-open where the user left them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// A single operation or data source in a workflow graph.
///
/// `data` is a JSON object owned by the node: `label`, the type-specific
/// parameter set, `inputs` (values wired in by edges or injected by a
/// compound execution), and `outputs` (populated by the graph executor).
/// All addressing into `data` goes through [`crate::path`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphNode {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: NodeKind,
    #[serde(default)]
    pub position: Position,
    pub data: Value,
}

impl GraphNode {
    pub fn new(id: impl Into<String>, kind: NodeKind, data: Value) -> Self {
        Self {
            id: id.into(),
            kind,
            position: Position::default(),
            data,
        }
    }

    /// The display label, or the empty string when the editor left none.
    pub fn label(&self) -> &str {
        self.data
            .get("label")
            .and_then(Value::as_str)
            .unwrap_or_default()
    }

    /// Reads a node-record path such as `data.outputs.image`.
    ///
    /// Mapping paths always start at the record root, so anything not
    /// under `data.` resolves to `None`.
    pub fn value_at(&self, record_path: &str) -> Option<&Value> {
        let inner = record_path.strip_prefix("data.")?;
        crate::path::get(&self.data, inner)
    }

    /// Writes through a node-record path, creating intermediate objects.
    /// Paths outside `data.` are ignored (a malformed mapping is a soft
    /// miss, not an error).
    pub fn set_value_at(&mut self, record_path: &str, value: Value) {
        if let Some(inner) = record_path.strip_prefix("data.") {
            crate::path::set(&mut self.data, inner, value);
        }
    }
}
