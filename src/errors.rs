use thiserror::Error;

use crate::{AlgorithmKind, EdgeId, NodeId, RunHandle};

/// Edge id text that is not `"{lo}-{hi}"` with numeric ids.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid edge id `{0}`, expected `<node>-<node>`")]
pub struct ParseEdgeIdError(pub String);

/// An algorithm run that could not start. Reported through the completion callback.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RunError {
    #[error("{0} needs a start node")]
    MissingStart(AlgorithmKind),

    #[error("start node {id} for {kind} is not in the graph")]
    StartNotFound { kind: AlgorithmKind, id: NodeId },
}

/// Returned synchronously by [`crate::Engine::run`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// Another run is active. Nothing changed and no callback fired.
    #[error("run {active} is still active")]
    Busy { active: RunHandle },

    #[error(transparent)]
    Invalid(#[from] RunError),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
    #[error("node {0} already exists")]
    DuplicateNode(NodeId),

    #[error("node {0} is not in the graph")]
    UnknownNode(NodeId),

    #[error("self loop on node {0} is not allowed")]
    SelfLoop(NodeId),

    #[error("edge {0} already exists")]
    DuplicateEdge(EdgeId),
}
