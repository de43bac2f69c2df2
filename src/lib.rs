//! # Kumitate - Compound Workflow Composition and Execution Engine
//!
//! **Kumitate** turns a sub-graph of a node-based media-generation workflow
//! into a reusable, parameterized unit: a *compound definition*. A
//! definition freezes a deep copy of the graph together with a declared
//! surface of inputs, controls, and outputs, plus the path mappings that
//! tie the surface to locations inside the frozen graph. Executing a
//! placed instance re-runs the whole internal graph with the caller's
//! values injected and the mapped outputs collected.
//!
//! ## Core Workflow
//!
//! 1.  **Analyze**: [`analyzer::analyze_workflow`] scans a graph and
//!     produces the catalog of everything that *could* be exposed —
//!     unwired input connectors, source-node values, declared parameters,
//!     and output connectors.
//! 2.  **Build**: [`builder::DefinitionBuilder`] consumes the user's
//!     exposure choices plus the graph and compiles an immutable
//!     [`definition::CompoundDefinition`]. Outputs are derived
//!     automatically from the graph's generation nodes.
//! 3.  **Instantiate**: [`definition::CompoundDefinition::instantiate`]
//!     produces a placeable instance with its own control values, seeded
//!     from the declared defaults.
//! 4.  **Execute**: [`executor::execute_instance`] clones the internal
//!     workflow, injects the caller's inputs and controls through the
//!     mappings, delegates to a [`executor::GraphExecutor`], and extracts
//!     the mapped outputs. Nested compounds recurse through the delegate
//!     under an explicit depth budget.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use async_trait::async_trait;
//! use kumitate::prelude::*;
//! use serde_json::json;
//!
//! // A delegate standing in for the real graph executor.
//! struct FakeRunner;
//!
//! #[async_trait]
//! impl GraphExecutor for FakeRunner {
//!     async fn execute(
//!         &self,
//!         mut nodes: Vec<GraphNode>,
//!         _edges: Vec<GraphEdge>,
//!         _depth: NestingDepth,
//!     ) -> GraphRunResult {
//!         for node in &mut nodes {
//!             if node.kind == NodeKind::ImageGeneration {
//!                 node.set_value_at("data.outputs.image", json!("https://cdn.example/1.png"));
//!             }
//!         }
//!         GraphRunResult::ok(nodes)
//!     }
//! }
//!
//! fn main() -> Result<()> {
//!     // 1. A two-node graph: a text prompt feeding image generation.
//!     let workflow = Workflow::new(
//!         vec![
//!             GraphNode::new(
//!                 "n1",
//!                 NodeKind::Text,
//!                 json!({ "label": "Prompt", "promptText": "a quiet harbor at dawn" }),
//!             ),
//!             GraphNode::new(
//!                 "n2",
//!                 NodeKind::ImageGeneration,
//!                 json!({ "label": "Render", "aspectRatio": "1:1" }),
//!             ),
//!         ],
//!         vec![GraphEdge::new("e1", "n1", Some("promptText"), "n2", Some("prompt"))],
//!     );
//!
//!     // 2. Discover the exposable surface.
//!     let analysis = analyze_workflow(&workflow);
//!     let prompt = analysis
//!         .available_inputs
//!         .iter()
//!         .find(|i| i.node_id == "n1")
//!         .expect("source node is exposable");
//!     let aspect = analysis
//!         .available_controls
//!         .iter()
//!         .find(|c| c.suggested_name == "Aspect Ratio")
//!         .expect("image generation declares an aspect ratio");
//!
//!     // 3. Compile the definition.
//!     let definition = DefinitionBuilder::new("Harbor Painter", workflow)
//!         .description("Renders a prompt as a single image")
//!         .expose_input(InputSelection::from_available(prompt, "Prompt"))
//!         .expose_control(ControlSelection::from_available(aspect, "Aspect Ratio"))
//!         .build()?;
//!
//!     // 4. Place an instance and execute it with overrides.
//!     let instance = definition.instantiate();
//!     let mut inputs = AHashMap::new();
//!     inputs.insert("prompt".to_string(), json!("a white cat"));
//!     let mut controls = AHashMap::new();
//!     controls.insert("aspect_ratio".to_string(), json!("16:9"));
//!
//!     let outputs = tokio_test::block_on(execute_instance(
//!         &instance,
//!         &inputs,
//!         &controls,
//!         &FakeRunner,
//!         NestingDepth::default(),
//!     ))?;
//!
//!     // The generation node "Render" surfaced as the output "render".
//!     println!("rendered: {:?}", outputs.get("render"));
//!     Ok(())
//! }
//! ```

pub mod analyzer;
pub mod builder;
pub mod definition;
pub mod error;
pub mod executor;
pub mod graph;
pub mod ident;
pub mod path;
pub mod prelude;
pub mod registry;
pub mod store;
