use serde::{Deserialize, Serialize};

use crate::{EdgeColor, EdgeId, NodeColor, NodeId};

/// One visual delta produced by an algorithm step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mutation {
    Node {
        id: NodeId,
        color: NodeColor,
        /// `None` leaves the stored component tag untouched.
        component: Option<usize>,
    },
    Edge {
        id: EdgeId,
        color: EdgeColor,
        /// `None` leaves the stored flag untouched.
        highlighted: Option<bool>,
    },
}

impl Mutation {
    pub fn node(id: NodeId, color: NodeColor) -> Self {
        Self::Node {
            id,
            color,
            component: None,
        }
    }

    pub fn node_in_component(id: NodeId, color: NodeColor, component: usize) -> Self {
        Self::Node {
            id,
            color,
            component: Some(component),
        }
    }

    pub fn highlight_edge(id: EdgeId, color: EdgeColor) -> Self {
        Self::Edge {
            id,
            color,
            highlighted: Some(true),
        }
    }

    pub fn revert_edge(id: EdgeId, color: EdgeColor) -> Self {
        Self::Edge {
            id,
            color,
            highlighted: Some(false),
        }
    }

    pub fn node_id(&self) -> Option<NodeId> {
        match self {
            Self::Node { id, .. } => Some(*id),
            Self::Edge { .. } => None,
        }
    }

    pub fn edge_id(&self) -> Option<EdgeId> {
        match self {
            Self::Edge { id, .. } => Some(*id),
            Self::Node { .. } => None,
        }
    }
}

/// Receives visual state changes. The engine never touches topology through it.
pub trait VisualSink {
    /// Returns `false` when the node is unknown; the mutation is then dropped.
    fn set_node_visual(&mut self, id: NodeId, color: NodeColor, component: Option<usize>) -> bool;

    /// Returns `false` when the edge is unknown; the mutation is then dropped.
    fn set_edge_visual(&mut self, id: EdgeId, color: EdgeColor, highlighted: Option<bool>) -> bool;

    /// Restores every node and edge to its default look.
    fn reset_visuals(&mut self);

    fn apply(&mut self, m: &Mutation) -> bool {
        match *m {
            Mutation::Node {
                id,
                color,
                component,
            } => self.set_node_visual(id, color, component),
            Mutation::Edge {
                id,
                color,
                highlighted,
            } => self.set_edge_visual(id, color, highlighted),
        }
    }
}
