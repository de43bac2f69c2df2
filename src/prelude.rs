//! Prelude module for convenient imports
//!
//! Re-exports the types and functions needed for the usual
//! analyze → build → instantiate → execute round trip, so callers can
//! start with a single `use kumitate::prelude::*;`.

// Analysis
pub use crate::analyzer::{
    AvailableControl, AvailableInput, AvailableOutput, WorkflowAnalysis, analyze_workflow,
};

// Building
pub use crate::builder::{ControlSelection, DefinitionBuilder, InputSelection};

// Definitions and instances
pub use crate::definition::{
    CompoundControl, CompoundDefinition, CompoundInput, CompoundInstance, CompoundMappings,
    CompoundOutput, ControlKind, ParamMapping,
};

// Graph model
pub use crate::graph::{DataKind, GraphEdge, GraphNode, NodeKind, Position, Workflow};

// Execution
pub use crate::executor::{
    ExecutionOutputs, GraphExecutor, GraphRunResult, NestingDepth, execute_instance,
};

// Persistence
pub use crate::store::{DefinitionStore, MemoryStore};

// Error types
pub use crate::error::{BuildError, ExecutionError, StoreError};

// The map type used for external inputs and control values
pub use ahash::AHashMap;

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
