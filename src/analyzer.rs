//! Graph analysis: discovering the exposable surface of a workflow.
//!
//! The analyzer is a pure function over the workflow and the static type
//! registry. It produces the catalog a caller picks from when building a
//! compound definition; nothing it returns is ever persisted.

use ahash::AHashSet;
use serde_json::Value;
use tracing::warn;

use crate::definition::ControlKind;
use crate::graph::{DataKind, GraphNode, Workflow};
use crate::registry::{self, NodeDecl};

/// An input slot that could be exposed on a compound unit.
///
/// Source nodes contribute exactly one of these (the node itself is the
/// input); processing nodes contribute one per input connector that no
/// edge already feeds.
#[derive(Debug, Clone)]
pub struct AvailableInput {
    /// `{nodeId}-{handleOrKey}`, unique within one analysis.
    pub id: String,
    pub node_id: String,
    pub node_label: String,
    pub suggested_name: String,
    pub kind: DataKind,
    /// Where the builder maps this input: the designated value field for
    /// source nodes, `data.inputs.{handle}` otherwise.
    pub param: String,
    pub current_value: Option<Value>,
}

/// A parameter that could be exposed as a compound control, regardless of
/// how the node is wired.
#[derive(Debug, Clone)]
pub struct AvailableControl {
    pub id: String,
    pub node_id: String,
    pub node_label: String,
    pub suggested_name: String,
    pub param: String,
    pub control: ControlKind,
    pub current_value: Option<Value>,
}

/// An output connector that could be exposed. No connectivity filter:
/// an output already consumed internally may still be surfaced.
#[derive(Debug, Clone)]
pub struct AvailableOutput {
    pub id: String,
    pub node_id: String,
    pub node_label: String,
    pub suggested_name: String,
    pub handle: String,
    pub kind: DataKind,
    pub param: String,
}

/// The exposable catalog for one workflow.
#[derive(Debug, Clone, Default)]
pub struct WorkflowAnalysis {
    pub available_inputs: Vec<AvailableInput>,
    pub available_controls: Vec<AvailableControl>,
    pub available_outputs: Vec<AvailableOutput>,
}

/// Scans a workflow and returns everything that could be exposed.
///
/// Iteration order follows node order, then declaration order; this fixes
/// default display ordering and nothing else. Nodes of unknown type are
/// skipped with a warning rather than failing the analysis.
pub fn analyze_workflow(workflow: &Workflow) -> WorkflowAnalysis {
    // "{target}-{handle}" for every wired input, handle defaulted, for
    // O(1) occupancy checks below.
    let wired: AHashSet<String> = workflow
        .edges
        .iter()
        .map(|e| {
            format!(
                "{}-{}",
                e.target,
                e.target_handle.as_deref().unwrap_or("default")
            )
        })
        .collect();

    let mut analysis = WorkflowAnalysis::default();

    for node in &workflow.nodes {
        let Some(decl) = registry::node_declarations(node) else {
            warn!(
                node_id = %node.id,
                kind = ?node.kind,
                "skipping node of unknown type during analysis"
            );
            continue;
        };
        let node_label = display_label(node, &decl);

        if let Some((key, value_path)) = &decl.source_value {
            analysis.available_inputs.push(AvailableInput {
                id: format!("{}-{}", node.id, key),
                node_id: node.id.clone(),
                node_label: node_label.clone(),
                suggested_name: node_label.clone(),
                kind: decl
                    .outputs
                    .first()
                    .map(|o| o.kind)
                    .unwrap_or(DataKind::Any),
                param: value_path.clone(),
                current_value: node.value_at(value_path).cloned(),
            });
        } else {
            for connector in &decl.inputs {
                if wired.contains(&format!("{}-{}", node.id, connector.id)) {
                    continue;
                }
                let param = format!("data.inputs.{}", connector.id);
                analysis.available_inputs.push(AvailableInput {
                    id: format!("{}-{}", node.id, connector.id),
                    node_id: node.id.clone(),
                    node_label: node_label.clone(),
                    suggested_name: format!("{} {}", node_label, connector.label),
                    kind: connector.kind,
                    current_value: node.value_at(&param).cloned(),
                    param,
                });
            }
        }

        for param in &decl.params {
            analysis.available_controls.push(AvailableControl {
                id: format!("{}-{}", node.id, param.key),
                node_id: node.id.clone(),
                node_label: node_label.clone(),
                suggested_name: param.name.clone(),
                param: param.path.clone(),
                control: param.control.clone(),
                current_value: node.value_at(&param.path).cloned(),
            });
        }

        for connector in &decl.outputs {
            analysis.available_outputs.push(AvailableOutput {
                id: format!("{}-{}", node.id, connector.id),
                node_id: node.id.clone(),
                node_label: node_label.clone(),
                suggested_name: format!("{} {}", node_label, connector.label),
                handle: connector.id.clone(),
                kind: connector.kind,
                param: format!("data.outputs.{}", connector.id),
            });
        }
    }

    analysis
}

fn display_label(node: &GraphNode, decl: &NodeDecl) -> String {
    if node.label().is_empty() {
        decl.label.clone()
    } else {
        node.label().to_string()
    }
}
