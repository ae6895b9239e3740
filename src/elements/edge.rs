use std::{
    fmt::{self, Display},
    str::FromStr,
};

use serde::{Deserialize, Serialize};

use super::{EdgeColor, NodeId};
use crate::errors::ParseEdgeIdError;

/// Identity of an undirected edge, derived from its endpoints.
///
/// Endpoints are stored sorted, so `EdgeId::new(a, b) == EdgeId::new(b, a)`. The canonical text
/// form is `"{lo}-{hi}"`, e.g. `"1-2"`. The editor and the cycle path reconstruction both go
/// through [`EdgeId::new`], so ids always agree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct EdgeId {
    lo: NodeId,
    hi: NodeId,
}

impl EdgeId {
    pub fn new(a: NodeId, b: NodeId) -> Self {
        if a <= b {
            Self { lo: a, hi: b }
        } else {
            Self { lo: b, hi: a }
        }
    }

    /// Endpoints in ascending order.
    pub fn endpoints(&self) -> (NodeId, NodeId) {
        (self.lo, self.hi)
    }
}

impl Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.lo, self.hi)
    }
}

impl FromStr for EdgeId {
    type Err = ParseEdgeIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (a, b) = s
            .split_once('-')
            .ok_or_else(|| ParseEdgeIdError(s.to_string()))?;
        let a = a.parse().map_err(|_| ParseEdgeIdError(s.to_string()))?;
        let b = b.parse().map_err(|_| ParseEdgeIdError(s.to_string()))?;

        Ok(Self::new(NodeId(a), NodeId(b)))
    }
}

impl From<EdgeId> for String {
    fn from(id: EdgeId) -> Self {
        id.to_string()
    }
}

impl TryFrom<String> for EdgeId {
    type Error = ParseEdgeIdError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

/// Stores properties of an edge. `from`/`to` keep the order the user connected the nodes in,
/// which carries no meaning for the algorithms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    id: EdgeId,
    from: NodeId,
    to: NodeId,
    color: EdgeColor,

    /// Set only by cycle detection.
    highlighted: bool,
}

impl Edge {
    pub fn new(from: NodeId, to: NodeId) -> Self {
        Self {
            id: EdgeId::new(from, to),
            from,
            to,
            color: EdgeColor::default(),
            highlighted: false,
        }
    }

    pub fn id(&self) -> EdgeId {
        self.id
    }

    pub fn from(&self) -> NodeId {
        self.from
    }

    pub fn to(&self) -> NodeId {
        self.to
    }

    pub fn color(&self) -> EdgeColor {
        self.color
    }

    pub fn set_color(&mut self, color: EdgeColor) {
        self.color = color;
    }

    pub fn highlighted(&self) -> bool {
        self.highlighted
    }

    pub fn set_highlighted(&mut self, highlighted: bool) {
        self.highlighted = highlighted;
    }
}
