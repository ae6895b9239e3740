use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};

use super::NodeColor;

/// Opaque node identity. Unique within a graph and totally ordered, which is what edge ids rely on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub u64);

impl Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for NodeId {
    fn from(v: u64) -> Self {
        Self(v)
    }
}

/// Stores properties of a node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    id: NodeId,
    label: String,
    color: NodeColor,

    /// Written only by the connected components run.
    component: Option<usize>,
}

impl Node {
    pub fn new(id: NodeId, label: impl Into<String>) -> Self {
        Self {
            id,
            label: label.into(),
            color: NodeColor::default(),
            component: None,
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn set_label(&mut self, label: impl Into<String>) {
        self.label = label.into();
    }

    pub fn color(&self) -> NodeColor {
        self.color
    }

    pub fn set_color(&mut self, color: NodeColor) {
        self.color = color;
    }

    pub fn with_color(mut self, color: NodeColor) -> Self {
        self.color = color;
        self
    }

    pub fn component(&self) -> Option<usize> {
        self.component
    }

    pub fn set_component(&mut self, component: Option<usize>) {
        self.component = component;
    }
}
