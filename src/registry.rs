//! Static capability table for node types.
//!
//! Each node type declares its input/output connectors, its exposable
//! parameters, and (for source and generation types) the designated value
//! field or generation output the compound machinery keys off. The table
//! is an explicit match over [`NodeKind`]: there is no runtime-mutable
//! registry, and unknown kinds fall through to `None` so callers can log
//! and degrade instead of failing an entire analysis.

use serde_json::Value;

use crate::definition::{CompoundControl, CompoundInput, CompoundOutput, ControlKind};
use crate::graph::{DataKind, GraphNode, NodeKind};

/// A declared input or output connector of a node type.
#[derive(Debug, Clone)]
pub struct ConnectorDecl {
    pub id: String,
    pub label: String,
    pub kind: DataKind,
    pub required: bool,
    /// Inputs only: whether several edges may target this connector.
    pub accepts_multiple: bool,
}

/// An exposable parameter of a node type.
#[derive(Debug, Clone)]
pub struct ParamDecl {
    /// Suggested display name, e.g. "Aspect Ratio".
    pub name: String,
    /// Identity segment combined with the node id, e.g. "aspectRatio".
    pub key: String,
    /// Dotted path into the node's data, e.g. "data.aspectRatio".
    pub path: String,
    pub control: ControlKind,
}

/// Everything the compound machinery needs to know about one node type.
#[derive(Debug, Clone)]
pub struct NodeDecl {
    pub label: String,
    pub inputs: Vec<ConnectorDecl>,
    pub outputs: Vec<ConnectorDecl>,
    /// Pure source nodes: `(identity key, data path)` of the designated
    /// value field representing the node itself.
    pub source_value: Option<(String, String)>,
    /// Generation types: the connector id whose value is auto-exposed as a
    /// compound output.
    pub generation_output: Option<String>,
    pub params: Vec<ParamDecl>,
}

impl NodeDecl {
    pub fn is_source(&self) -> bool {
        self.source_value.is_some()
    }
}

fn input(id: &str, label: &str, kind: DataKind, required: bool) -> ConnectorDecl {
    ConnectorDecl {
        id: id.to_string(),
        label: label.to_string(),
        kind,
        required,
        accepts_multiple: false,
    }
}

fn multi_input(id: &str, label: &str, kind: DataKind, required: bool) -> ConnectorDecl {
    ConnectorDecl {
        accepts_multiple: true,
        ..input(id, label, kind, required)
    }
}

fn output(id: &str, label: &str, kind: DataKind) -> ConnectorDecl {
    ConnectorDecl {
        id: id.to_string(),
        label: label.to_string(),
        kind,
        required: false,
        accepts_multiple: false,
    }
}

fn param(name: &str, key: &str, control: ControlKind) -> ParamDecl {
    ParamDecl {
        name: name.to_string(),
        key: key.to_string(),
        path: format!("data.{key}"),
        control,
    }
}

fn source(label: &str, key: &str, kind: DataKind) -> NodeDecl {
    NodeDecl {
        label: label.to_string(),
        inputs: Vec::new(),
        outputs: vec![output(key, label, kind)],
        source_value: Some((key.to_string(), format!("data.{key}"))),
        generation_output: None,
        params: Vec::new(),
    }
}

/// Resolves the static declaration for a node kind.
///
/// `Compound` and unknown kinds return `None` here; compound surfaces are
/// per-node and resolved by [`node_declarations`].
pub fn declarations(kind: &NodeKind) -> Option<NodeDecl> {
    let decl = match kind {
        NodeKind::Text => source("Text", "promptText", DataKind::Text),
        NodeKind::Image => source("Image", "imageUrl", DataKind::Image),
        NodeKind::Video => source("Video", "videoUrl", DataKind::Video),
        NodeKind::Audio => source("Audio", "audioUrl", DataKind::Audio),

        NodeKind::TextGeneration => NodeDecl {
            label: "Text Generation".to_string(),
            inputs: vec![
                input("prompt", "Prompt", DataKind::Text, true),
                input("context", "Context", DataKind::Text, false),
            ],
            outputs: vec![output("text", "Text", DataKind::Text)],
            source_value: None,
            generation_output: Some("text".to_string()),
            params: vec![
                param(
                    "Temperature",
                    "temperature",
                    ControlKind::Slider {
                        min: 0.0,
                        max: 2.0,
                        step: 0.1,
                    },
                ),
                param("System Prompt", "systemPrompt", ControlKind::Text),
            ],
        },

        NodeKind::ImageGeneration => NodeDecl {
            label: "Image Generation".to_string(),
            inputs: vec![
                input("prompt", "Prompt", DataKind::Text, true),
                multi_input(
                    "referenceImages",
                    "Reference Images",
                    DataKind::Image,
                    false,
                ),
            ],
            outputs: vec![output("image", "Image", DataKind::Image)],
            source_value: None,
            generation_output: Some("image".to_string()),
            params: vec![
                param(
                    "Aspect Ratio",
                    "aspectRatio",
                    ControlKind::Select {
                        options: ["1:1", "16:9", "9:16", "4:3", "3:4"]
                            .map(str::to_string)
                            .to_vec(),
                    },
                ),
                param(
                    "Resolution",
                    "resolution",
                    ControlKind::Select {
                        options: ["1K", "2K"].map(str::to_string).to_vec(),
                    },
                ),
            ],
        },

        NodeKind::VideoGeneration => NodeDecl {
            label: "Video Generation".to_string(),
            inputs: vec![
                input("prompt", "Prompt", DataKind::Text, true),
                input("firstFrame", "First Frame", DataKind::Image, false),
                input("lastFrame", "Last Frame", DataKind::Image, false),
            ],
            outputs: vec![output("video", "Video", DataKind::Video)],
            source_value: None,
            generation_output: Some("video".to_string()),
            params: vec![
                param(
                    "Aspect Ratio",
                    "aspectRatio",
                    ControlKind::Select {
                        options: ["16:9", "9:16"].map(str::to_string).to_vec(),
                    },
                ),
                param(
                    "Duration (seconds)",
                    "durationSeconds",
                    ControlKind::Slider {
                        min: 1.0,
                        max: 30.0,
                        step: 1.0,
                    },
                ),
                param("Generate Audio", "generateAudio", ControlKind::Toggle),
            ],
        },

        NodeKind::MusicGeneration => NodeDecl {
            label: "Music Generation".to_string(),
            inputs: vec![input("prompt", "Prompt", DataKind::Text, true)],
            outputs: vec![output("audio", "Audio", DataKind::Audio)],
            source_value: None,
            generation_output: Some("audio".to_string()),
            params: Vec::new(),
        },

        NodeKind::UpscaleImage => NodeDecl {
            label: "Upscale Image".to_string(),
            inputs: vec![input("image", "Image", DataKind::Image, true)],
            outputs: vec![output("image", "Image", DataKind::Image)],
            source_value: None,
            generation_output: Some("image".to_string()),
            params: vec![param(
                "Upscale Factor",
                "upscaleFactor",
                ControlKind::Select {
                    options: ["x2", "x4"].map(str::to_string).to_vec(),
                },
            )],
        },

        NodeKind::MergeVideos => NodeDecl {
            label: "Merge Videos".to_string(),
            inputs: vec![multi_input("videos", "Videos", DataKind::Video, true)],
            outputs: vec![output("video", "Video", DataKind::Video)],
            source_value: None,
            generation_output: Some("video".to_string()),
            params: Vec::new(),
        },

        NodeKind::Compound | NodeKind::Other(_) => return None,
    };
    Some(decl)
}

/// Resolves the declaration for a concrete node.
///
/// Compound nodes carry their surface in `data` (copied from the
/// definition at placement time); it is translated into connector and
/// parameter declarations here, with controls addressed at
/// `data.controlValues.{id}`.
pub fn node_declarations(node: &GraphNode) -> Option<NodeDecl> {
    if node.kind != NodeKind::Compound {
        return declarations(&node.kind);
    }

    let inputs: Vec<CompoundInput> = collection(&node.data, "inputs");
    let outputs: Vec<CompoundOutput> = collection(&node.data, "outputs");
    let controls: Vec<CompoundControl> = collection(&node.data, "controls");

    Some(NodeDecl {
        label: if node.label().is_empty() {
            "Compound".to_string()
        } else {
            node.label().to_string()
        },
        inputs: inputs
            .into_iter()
            .map(|i| input(&i.id, &i.name, i.kind, false))
            .collect(),
        outputs: outputs
            .into_iter()
            .map(|o| output(&o.id, &o.name, o.kind))
            .collect(),
        source_value: None,
        generation_output: None,
        params: controls
            .into_iter()
            .map(|c| ParamDecl {
                name: c.name,
                key: c.id.clone(),
                path: format!("data.controlValues.{}", c.id),
                control: c.control,
            })
            .collect(),
    })
}

/// The exposable-parameter list for a concrete node; empty for node types
/// with nothing to expose and for unknown types.
pub fn exposable_params(node: &GraphNode) -> Vec<ParamDecl> {
    node_declarations(node).map(|d| d.params).unwrap_or_default()
}

fn collection<T: serde::de::DeserializeOwned>(data: &Value, field: &str) -> Vec<T> {
    data.get(field)
        .cloned()
        .and_then(|v| serde_json::from_value(v).ok())
        .unwrap_or_default()
}
