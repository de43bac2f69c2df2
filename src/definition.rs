use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::StoreError;
use crate::graph::{DataKind, GraphNode, NodeKind, Workflow};

/// The `type` discriminator carried by every persisted definition.
pub const COMPOUND_TYPE: &str = "compound";

/// How an exposed control is rendered and constrained.
///
/// Serialized flattened into [`CompoundControl`], so a slider control reads
/// `{"controlType": "slider", "min": .., "max": .., "step": ..}` on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "controlType", rename_all = "camelCase")]
pub enum ControlKind {
    Slider { min: f64, max: f64, step: f64 },
    Select { options: Vec<String> },
    Toggle,
    Text,
}

impl ControlKind {
    /// The fallback default used when the parameter has no current value
    /// at build time: `min` for sliders, the first option for selects,
    /// `false` for toggles, the empty string for text.
    pub fn synthetic_default(&self) -> Value {
        match self {
            ControlKind::Slider { min, .. } => Value::from(*min),
            ControlKind::Select { options } => {
                Value::from(options.first().cloned().unwrap_or_default())
            }
            ControlKind::Toggle => Value::Bool(false),
            ControlKind::Text => Value::from(""),
        }
    }
}

/// A declared input slot on a compound unit's surface.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompoundInput {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: DataKind,
}

/// A declared output on a compound unit's surface.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompoundOutput {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: DataKind,
}

/// A declared control on a compound unit's surface.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompoundControl {
    pub id: String,
    pub name: String,
    #[serde(flatten)]
    pub control: ControlKind,
    pub default: Value,
}

/// Where inside the internal workflow an exposed item's value lives.
///
/// `node_id` must name a node of the definition's internal workflow and
/// `param` a dotted path into that node's `data`. Stale mappings (the
/// graph evolved after old definitions were saved) are treated as soft
/// misses at execution time, never as errors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParamMapping {
    pub node_id: String,
    pub param: String,
}

impl ParamMapping {
    pub fn new(node_id: impl Into<String>, param: impl Into<String>) -> Self {
        Self {
            node_id: node_id.into(),
            param: param.into(),
        }
    }
}

/// The three mapping tables tying a compound unit's surface to locations
/// inside its internal workflow. A control maps to an *ordered list* of
/// targets: one exposed control may drive several internal parameters.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CompoundMappings {
    pub inputs: AHashMap<String, ParamMapping>,
    pub controls: AHashMap<String, Vec<ParamMapping>>,
    pub outputs: AHashMap<String, ParamMapping>,
}

/// The persisted, immutable-once-saved compound unit ("wizard").
///
/// `internal_workflow` is a point-in-time snapshot, structurally
/// independent of the graph it was built from. Serialized as plain JSON
/// with camelCase keys; this shape is the compatibility contract.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompoundDefinition {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub name: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub description: String,
    pub inputs: Vec<CompoundInput>,
    pub outputs: Vec<CompoundOutput>,
    pub controls: Vec<CompoundControl>,
    pub internal_workflow: Workflow,
    pub mappings: CompoundMappings,
    pub created_at: u64,
    pub updated_at: u64,
}

impl CompoundDefinition {
    /// Serializes the definition to its persisted JSON form.
    pub fn to_json(&self) -> Result<String, StoreError> {
        serde_json::to_string(self).map_err(|e| StoreError::Serialization(e.to_string()))
    }

    /// Restores a definition from its persisted JSON form.
    pub fn from_json(json: &str) -> Result<Self, StoreError> {
        serde_json::from_str(json).map_err(|e| StoreError::Serialization(e.to_string()))
    }

    /// Creates a live instance for placement inside another graph.
    ///
    /// The instance takes read-only copies of the surface, workflow, and
    /// mappings; editing the definition later never changes instances that
    /// were already placed.
    pub fn instantiate(&self) -> CompoundInstance {
        let control_values = self
            .controls
            .iter()
            .map(|c| (c.id.clone(), c.default.clone()))
            .collect();
        CompoundInstance {
            definition_id: self.id.clone(),
            name: self.name.clone(),
            icon: self.icon.clone(),
            inputs: self.inputs.clone(),
            outputs: self.outputs.clone(),
            controls: self.controls.clone(),
            control_values,
            internal_workflow: self.internal_workflow.clone(),
            mappings: self.mappings.clone(),
        }
    }
}

/// One placement of a compound unit inside another graph.
///
/// Carries its own mutable `control_values`, seeded from the declared
/// defaults and adjusted by the user afterwards. Everything else is a
/// frozen copy taken from the definition at placement time.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompoundInstance {
    pub definition_id: String,
    pub name: String,
    #[serde(default)]
    pub icon: String,
    pub inputs: Vec<CompoundInput>,
    pub outputs: Vec<CompoundOutput>,
    pub controls: Vec<CompoundControl>,
    pub control_values: AHashMap<String, Value>,
    pub internal_workflow: Workflow,
    pub mappings: CompoundMappings,
}

impl CompoundInstance {
    /// Wraps the instance into a graph node for placement on a canvas.
    pub fn to_node(&self, node_id: impl Into<String>) -> GraphNode {
        let mut data = serde_json::to_value(self).unwrap_or_default();
        if let Value::Object(map) = &mut data {
            map.insert("label".to_string(), Value::from(self.name.clone()));
        }
        GraphNode::new(node_id, NodeKind::Compound, data)
    }

    /// Recovers an instance from a compound graph node's data, if the node
    /// carries a well-formed one.
    pub fn from_node(node: &GraphNode) -> Option<Self> {
        if node.kind != NodeKind::Compound {
            return None;
        }
        serde_json::from_value(node.data.clone()).ok()
    }
}
