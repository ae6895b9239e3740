use serde::{Deserialize, Serialize};

use crate::{AlgorithmKind, EdgeId, NodeId, Outcome};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PayloadRunStarted {
    pub run: u64,
    pub kind: AlgorithmKind,
    pub start: Option<NodeId>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PayloadNodeVisited {
    pub run: u64,
    pub id: NodeId,
    pub component: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PayloadEdge {
    pub run: u64,
    pub id: EdgeId,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PayloadRunCompleted {
    /// `None` when the run never started.
    pub run: Option<u64>,
    pub kind: AlgorithmKind,
    pub outcome: Option<Outcome>,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PayloadRunRejected {
    pub kind: AlgorithmKind,
    pub active: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PayloadRunCancelled {
    pub run: u64,
    pub steps: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Event {
    RunStarted(PayloadRunStarted),
    NodeVisited(PayloadNodeVisited),
    EdgeHighlighted(PayloadEdge),
    EdgeReverted(PayloadEdge),
    RunCompleted(PayloadRunCompleted),
    RunRejected(PayloadRunRejected),
    RunCancelled(PayloadRunCancelled),
}
