use thiserror::Error;

/// Errors reported by the definition builder.
///
/// Validation runs before any other work; a build either fails with one of
/// these or produces a complete definition. Nothing partial is ever
/// handed to a store.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BuildError {
    #[error("Definition name must not be empty")]
    EmptyName,

    #[error("Definition name exceeds the limit of {max} characters")]
    NameTooLong { max: usize },

    #[error("Workflow must contain at least one node")]
    EmptyWorkflow,

    #[error("Workflow has {count} nodes, exceeding the limit of {max}")]
    TooManyNodes { count: usize, max: usize },

    #[error("Workflow has {count} edges, exceeding the limit of {max}")]
    TooManyEdges { count: usize, max: usize },
}

/// Failures crossing the compound executor's public boundary.
///
/// Mapping resolution misses are deliberately absent: a mapping whose node
/// or path no longer resolves is skipped, so definitions built against an
/// older graph shape remain executable.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExecutionError {
    #[error("Graph execution failed: {0}")]
    Delegate(String),

    #[error("Compound nesting depth budget exhausted")]
    NestingTooDeep,
}

/// Errors at the definition store boundary.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("No definition with id '{0}' exists in the store")]
    NotFound(String),

    #[error("Definition serialization failed: {0}")]
    Serialization(String),
}
