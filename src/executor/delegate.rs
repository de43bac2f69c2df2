use async_trait::async_trait;

use super::NestingDepth;
use crate::graph::{GraphEdge, GraphNode};

/// Outcome of one delegated graph run.
///
/// Mirrors the generic executor's `{ success, data?: { nodes }, error? }`
/// contract: `nodes` is the post-execution node list when the executor
/// returns one (some execute in place and return nothing).
#[derive(Debug, Clone, Default)]
pub struct GraphRunResult {
    pub success: bool,
    pub nodes: Option<Vec<GraphNode>>,
    pub error: Option<String>,
}

impl GraphRunResult {
    pub fn ok(nodes: Vec<GraphNode>) -> Self {
        Self {
            success: true,
            nodes: Some(nodes),
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            nodes: None,
            error: Some(error.into()),
        }
    }
}

/// The generic graph executor seam.
///
/// Implementations walk the nodes in dependency order and perform the
/// actual generation work. When an implementation encounters a compound
/// node it calls back into [`super::execute_instance`] with the `depth`
/// it was handed, which is how the nesting budget travels through
/// arbitrarily deep compositions.
#[async_trait]
pub trait GraphExecutor: Send + Sync {
    async fn execute(
        &self,
        nodes: Vec<GraphNode>,
        edges: Vec<GraphEdge>,
        depth: NestingDepth,
    ) -> GraphRunResult;
}
