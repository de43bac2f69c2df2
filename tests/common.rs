//! Common test utilities: workflow fixtures and mock graph executors.
use async_trait::async_trait;
use kumitate::prelude::*;
use serde_json::{Value, json};
use std::sync::Mutex;

#[allow(dead_code)]
pub fn text_node(id: &str, label: &str, prompt: &str) -> GraphNode {
    GraphNode::new(
        id,
        NodeKind::Text,
        json!({ "label": label, "promptText": prompt }),
    )
}

#[allow(dead_code)]
pub fn image_gen_node(id: &str, label: &str) -> GraphNode {
    GraphNode::new(
        id,
        NodeKind::ImageGeneration,
        json!({ "label": label, "aspectRatio": "1:1", "resolution": "1K" }),
    )
}

#[allow(dead_code)]
pub fn video_gen_node(id: &str, label: &str) -> GraphNode {
    GraphNode::new(
        id,
        NodeKind::VideoGeneration,
        json!({ "label": label, "aspectRatio": "16:9", "durationSeconds": 8 }),
    )
}

/// A text prompt wired into an image generation node.
#[allow(dead_code)]
pub fn two_node_workflow() -> Workflow {
    Workflow::new(
        vec![
            text_node("n1", "Prompt", "a quiet harbor at dawn"),
            image_gen_node("n2", "Render"),
        ],
        vec![GraphEdge::new(
            "e1",
            "n1",
            Some("promptText"),
            "n2",
            Some("prompt"),
        )],
    )
}

/// Definition over [`two_node_workflow`] exposing the prompt as "Prompt"
/// and the render node's aspect ratio as "Aspect Ratio".
#[allow(dead_code)]
pub fn two_node_definition() -> CompoundDefinition {
    let workflow = two_node_workflow();
    let analysis = analyze_workflow(&workflow);
    let prompt = analysis
        .available_inputs
        .iter()
        .find(|i| i.node_id == "n1")
        .expect("source node is exposable");
    let aspect = analysis
        .available_controls
        .iter()
        .find(|c| c.node_id == "n2" && c.suggested_name == "Aspect Ratio")
        .expect("render node declares an aspect ratio");

    DefinitionBuilder::new("Harbor Painter", workflow)
        .description("Renders a prompt as a single image")
        .expose_input(InputSelection::from_available(prompt, "Prompt"))
        .expose_control(ControlSelection::from_available(aspect, "Aspect Ratio"))
        .build()
        .expect("definition builds")
}

#[allow(dead_code)]
pub fn value_map(pairs: &[(&str, Value)]) -> AHashMap<String, Value> {
    pairs
        .iter()
        .map(|(k, v)| ((*k).to_string(), v.clone()))
        .collect()
}

/// Fills the image output of every image generation node and remembers
/// the node list each invocation received, so tests can assert on the
/// state injected *before* delegation.
pub struct RecordingExecutor {
    pub seen: Mutex<Vec<Vec<GraphNode>>>,
}

#[allow(dead_code)]
impl RecordingExecutor {
    pub fn new() -> Self {
        Self {
            seen: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl GraphExecutor for RecordingExecutor {
    async fn execute(
        &self,
        mut nodes: Vec<GraphNode>,
        _edges: Vec<GraphEdge>,
        _depth: NestingDepth,
    ) -> GraphRunResult {
        self.seen.lock().expect("seen lock").push(nodes.clone());
        for node in &mut nodes {
            if node.kind == NodeKind::ImageGeneration {
                node.set_value_at("data.outputs.image", json!("img://done"));
            }
        }
        GraphRunResult::ok(nodes)
    }
}

/// Echoes each image generation node's aspect ratio into its image
/// output, so a result can be traced back to the values its own
/// invocation injected.
pub struct AspectEchoExecutor;

#[async_trait]
impl GraphExecutor for AspectEchoExecutor {
    async fn execute(
        &self,
        mut nodes: Vec<GraphNode>,
        _edges: Vec<GraphEdge>,
        _depth: NestingDepth,
    ) -> GraphRunResult {
        for node in &mut nodes {
            if node.kind == NodeKind::ImageGeneration {
                let aspect = node
                    .value_at("data.aspectRatio")
                    .and_then(Value::as_str)
                    .unwrap_or("unset")
                    .to_string();
                node.set_value_at("data.outputs.image", json!(format!("img://{aspect}")));
            }
        }
        GraphRunResult::ok(nodes)
    }
}

/// Always fails without touching the nodes.
pub struct FailingExecutor;

#[async_trait]
impl GraphExecutor for FailingExecutor {
    async fn execute(
        &self,
        _nodes: Vec<GraphNode>,
        _edges: Vec<GraphEdge>,
        _depth: NestingDepth,
    ) -> GraphRunResult {
        GraphRunResult::failed("boom")
    }
}

/// Succeeds but returns no node list, like an executor that mutated the
/// graph in place.
pub struct InPlaceExecutor;

#[async_trait]
impl GraphExecutor for InPlaceExecutor {
    async fn execute(
        &self,
        _nodes: Vec<GraphNode>,
        _edges: Vec<GraphEdge>,
        _depth: NestingDepth,
    ) -> GraphRunResult {
        GraphRunResult {
            success: true,
            nodes: None,
            error: None,
        }
    }
}

/// Minimal stand-in for the real graph executor's compound handling:
/// recurses into compound nodes with the depth it was handed and writes
/// their outputs back onto the node; fills image generation outputs like
/// [`RecordingExecutor`] otherwise.
pub struct NestingExecutor;

#[async_trait]
impl GraphExecutor for NestingExecutor {
    async fn execute(
        &self,
        mut nodes: Vec<GraphNode>,
        _edges: Vec<GraphEdge>,
        depth: NestingDepth,
    ) -> GraphRunResult {
        for node in &mut nodes {
            if node.kind == NodeKind::Compound {
                let Some(instance) = CompoundInstance::from_node(node) else {
                    continue;
                };
                let inputs = AHashMap::new();
                let controls = instance.control_values.clone();
                match execute_instance(&instance, &inputs, &controls, self, depth).await {
                    Ok(outputs) => {
                        for (id, value) in outputs {
                            node.set_value_at(&format!("data.outputs.{id}"), value);
                        }
                    }
                    Err(e) => return GraphRunResult::failed(e.to_string()),
                }
            } else if node.kind == NodeKind::ImageGeneration {
                node.set_value_at("data.outputs.image", json!("img://done"));
            }
        }
        GraphRunResult::ok(nodes)
    }
}
