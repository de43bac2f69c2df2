//! Executing compound instances.
//!
//! One invocation clones the instance's internal workflow, writes the
//! caller's input and control values through the mapping tables, hands the
//! result to the delegated graph executor, and reads the mapped outputs
//! back out. The clone-per-invocation is the isolation guarantee: two
//! concurrent executions of the same definition share no node state.

use ahash::AHashMap;
use serde_json::Value;
use tracing::debug;

use crate::definition::{CompoundInstance, ParamMapping};
use crate::error::ExecutionError;
use crate::graph::Workflow;

mod delegate;

pub use delegate::{GraphExecutor, GraphRunResult};

/// Default nesting budget. Deep enough for any composition built by hand;
/// shallow enough to stop a definition that (transitively) contains
/// itself.
pub const MAX_NESTING_DEPTH: u32 = 8;

/// Remaining levels of compound nesting an execution may descend.
///
/// Every [`execute_instance`] call consumes one level and passes the rest
/// to its delegate; at zero the executor fails closed with
/// [`ExecutionError::NestingTooDeep`] instead of recursing until the
/// stack gives out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NestingDepth(u32);

impl Default for NestingDepth {
    fn default() -> Self {
        Self(MAX_NESTING_DEPTH)
    }
}

impl NestingDepth {
    pub fn new(levels: u32) -> Self {
        Self(levels)
    }

    pub fn remaining(&self) -> u32 {
        self.0
    }

    fn descend(self) -> Option<Self> {
        self.0.checked_sub(1).map(Self)
    }
}

/// Extracted output values, keyed by exposed output id. Best-effort: a
/// mapping whose target value never materialized has no entry.
pub type ExecutionOutputs = AHashMap<String, Value>;

/// Runs one compound instance against a graph-executor delegate.
///
/// `external_inputs` and `control_values` are overrides, not
/// requirements: an exposed item with no supplied value keeps whatever
/// the internal workflow froze at build time. Mappings that no longer
/// resolve (the node vanished, the path is gone) are skipped silently so
/// definitions built against an older graph shape keep working.
///
/// Never panics and never mutates the instance; every failure comes back
/// as a typed [`ExecutionError`].
pub async fn execute_instance(
    instance: &CompoundInstance,
    external_inputs: &AHashMap<String, Value>,
    control_values: &AHashMap<String, Value>,
    delegate: &dyn GraphExecutor,
    depth: NestingDepth,
) -> Result<ExecutionOutputs, ExecutionError> {
    let Some(inner_depth) = depth.descend() else {
        return Err(ExecutionError::NestingTooDeep);
    };

    debug!(
        definition_id = %instance.definition_id,
        remaining_depth = inner_depth.remaining(),
        "executing compound instance"
    );

    // The template is never touched; everything below operates on this
    // invocation's own copy.
    let mut workflow = instance.internal_workflow.clone();

    for (exposed_id, mapping) in &instance.mappings.inputs {
        if let Some(value) = external_inputs.get(exposed_id) {
            inject(&mut workflow, mapping, value);
        }
    }

    for (control_id, targets) in &instance.mappings.controls {
        if let Some(value) = control_values.get(control_id) {
            for mapping in targets {
                inject(&mut workflow, mapping, value);
            }
        }
    }

    // Sole suspension point. The injected nodes are kept for extraction
    // in case the delegate executes in place and returns no node list.
    let run = delegate
        .execute(workflow.nodes.clone(), workflow.edges, inner_depth)
        .await;

    if !run.success {
        return Err(ExecutionError::Delegate(
            run.error.unwrap_or_else(|| "unknown error".to_string()),
        ));
    }

    let nodes = run.nodes.unwrap_or(workflow.nodes);
    let mut outputs = ExecutionOutputs::default();
    for (output_id, mapping) in &instance.mappings.outputs {
        let value = nodes
            .iter()
            .find(|n| n.id == mapping.node_id)
            .and_then(|n| n.value_at(&mapping.param));
        if let Some(value) = value {
            outputs.insert(output_id.clone(), value.clone());
        }
    }

    Ok(outputs)
}

fn inject(workflow: &mut Workflow, mapping: &ParamMapping, value: &Value) {
    match workflow.node_mut(&mapping.node_id) {
        Some(node) => node.set_value_at(&mapping.param, value.clone()),
        None => debug!(
            node_id = %mapping.node_id,
            param = %mapping.param,
            "mapping references a node absent from the internal workflow; skipped"
        ),
    }
}
