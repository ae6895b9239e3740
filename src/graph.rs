use std::collections::BTreeMap;

use petgraph::{
    stable_graph::{EdgeIndex, NodeIndex, StableGraph},
    visit::IntoEdgeReferences,
    Undirected,
};
use tracing::{debug, warn};

use crate::{
    Edge, EdgeColor, EdgeId, EditError, GraphAccess, Node, NodeColor, NodeId, SettingsStyle,
    VisualSink,
};

type StableGraphType = StableGraph<Node, Edge, Undirected>;

/// Wrapper around [`petgraph::stable_graph::StableGraph`] holding the editable graph.
///
/// Nodes are addressed by [`NodeId`] and edges by [`EdgeId`]; petgraph indices stay internal.
/// Implements [`GraphAccess`] for the algorithms and [`VisualSink`] for their output.
#[derive(Debug, Clone)]
pub struct Graph {
    g: StableGraphType,
    index: BTreeMap<NodeId, NodeIndex>,

    node_default: NodeColor,
    edge_default: EdgeColor,
}

impl Default for Graph {
    fn default() -> Self {
        Self::new()
    }
}

impl Graph {
    pub fn new() -> Self {
        Self {
            g: StableGraph::default(),
            index: BTreeMap::new(),
            node_default: NodeColor::default(),
            edge_default: EdgeColor::default(),
        }
    }

    /// Graph whose reset colors come from `style`.
    pub fn with_style(mut self, style: &SettingsStyle) -> Self {
        self.node_default = style.node_default;
        self.edge_default = style.edge_default;
        self.reset_visuals();
        self
    }

    /// Starter graph: nodes 1 to 4, edges 1-2, 1-3 and 2-4.
    pub fn sample() -> Self {
        let mut g = Self::new();
        for _ in 0..4 {
            g.add_node();
        }
        for (a, b) in [(1, 2), (1, 3), (2, 4)] {
            // ids are known to be fresh and distinct
            let _ = g.add_edge(NodeId(a), NodeId(b));
        }
        g
    }

    pub fn g(&self) -> &StableGraphType {
        &self.g
    }

    pub fn node_count(&self) -> usize {
        self.g.node_count()
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.index.get(&id).and_then(|&idx| self.g.node_weight(idx))
    }

    pub fn edge(&self, id: EdgeId) -> Option<&Edge> {
        self.edge_index(id).and_then(|idx| self.g.edge_weight(idx))
    }

    pub fn nodes_iter(&self) -> impl Iterator<Item = &Node> {
        self.index.values().filter_map(|&idx| self.g.node_weight(idx))
    }

    /// Edges sorted by id.
    pub fn edges_iter(&self) -> impl Iterator<Item = &Edge> {
        let mut edges: Vec<_> = self.g.edge_references().map(|e| e.weight()).collect();
        edges.sort_by_key(|e| e.id());
        edges.into_iter()
    }

    /// Next free id: one past the largest id in use, 1 for an empty graph.
    pub fn next_node_id(&self) -> NodeId {
        self.index
            .keys()
            .next_back()
            .map_or(NodeId(1), |last| NodeId(last.0 + 1))
    }

    /// Adds a node with the next free id and the label `"Node {id}"`.
    pub fn add_node(&mut self) -> NodeId {
        let id = self.next_node_id();
        self.insert_node(Node::new(id, format!("Node {id}")));
        id
    }

    /// # Errors
    ///
    /// [`EditError::DuplicateNode`] if `id` is taken.
    pub fn add_node_with_label(
        &mut self,
        id: NodeId,
        label: impl Into<String>,
    ) -> Result<NodeId, EditError> {
        if self.index.contains_key(&id) {
            return Err(EditError::DuplicateNode(id));
        }
        self.insert_node(Node::new(id, label));
        Ok(id)
    }

    fn insert_node(&mut self, node: Node) {
        let id = node.id();
        let idx = self.g.add_node(node.with_color(self.node_default));
        self.index.insert(id, idx);
        debug!(%id, "node added");
    }

    /// Removes a node together with its edges.
    pub fn remove_node(&mut self, id: NodeId) -> Option<Node> {
        let idx = self.index.remove(&id)?;
        // StableGraph drops incident edges along with the node
        let node = self.g.remove_node(idx);
        debug!(%id, "node removed");
        node
    }

    /// Removes the node with the largest id.
    pub fn remove_last_node(&mut self) -> Option<Node> {
        let id = *self.index.keys().next_back()?;
        self.remove_node(id)
    }

    /// Connects two nodes. The order of `from` and `to` is kept but has no meaning.
    ///
    /// # Errors
    ///
    /// [`EditError::SelfLoop`], [`EditError::UnknownNode`] or [`EditError::DuplicateEdge`].
    pub fn add_edge(&mut self, from: NodeId, to: NodeId) -> Result<EdgeId, EditError> {
        if from == to {
            return Err(EditError::SelfLoop(from));
        }
        let a = *self.index.get(&from).ok_or(EditError::UnknownNode(from))?;
        let b = *self.index.get(&to).ok_or(EditError::UnknownNode(to))?;

        let id = EdgeId::new(from, to);
        if self.g.find_edge(a, b).is_some() {
            return Err(EditError::DuplicateEdge(id));
        }

        let mut edge = Edge::new(from, to);
        edge.set_color(self.edge_default);
        self.g.add_edge(a, b, edge);
        debug!(%id, "edge added");

        Ok(id)
    }

    pub fn remove_edge(&mut self, id: EdgeId) -> Option<Edge> {
        let idx = self.edge_index(id)?;
        self.g.remove_edge(idx)
    }

    /// Removes the edge with the greatest id.
    pub fn remove_last_edge(&mut self) -> Option<Edge> {
        let id = self.g.edge_references().map(|e| e.weight().id()).max()?;
        self.remove_edge(id)
    }

    pub fn clear(&mut self) {
        self.g.clear();
        self.index.clear();
    }

    fn edge_index(&self, id: EdgeId) -> Option<EdgeIndex> {
        let (lo, hi) = id.endpoints();
        let a = *self.index.get(&lo)?;
        let b = *self.index.get(&hi)?;
        self.g.find_edge(a, b)
    }
}

impl GraphAccess for Graph {
    fn contains_node(&self, id: NodeId) -> bool {
        self.index.contains_key(&id)
    }

    fn node_ids(&self) -> Vec<NodeId> {
        self.index.keys().copied().collect()
    }

    fn neighbors(&self, id: NodeId) -> Vec<NodeId> {
        let Some(&idx) = self.index.get(&id) else {
            return Vec::new();
        };

        let mut res: Vec<_> = self
            .g
            .neighbors(idx)
            .filter_map(|n| self.g.node_weight(n).map(Node::id))
            .collect();
        res.sort_unstable();
        res.dedup();
        res
    }

    fn edge_count(&self) -> usize {
        self.g.edge_count()
    }
}

impl VisualSink for Graph {
    fn set_node_visual(&mut self, id: NodeId, color: NodeColor, component: Option<usize>) -> bool {
        let Some(node) = self.index.get(&id).and_then(|&idx| self.g.node_weight_mut(idx)) else {
            warn!(%id, "visual update for unknown node dropped");
            return false;
        };

        node.set_color(color);
        if component.is_some() {
            node.set_component(component);
        }
        true
    }

    fn set_edge_visual(&mut self, id: EdgeId, color: EdgeColor, highlighted: Option<bool>) -> bool {
        let Some(edge) = self
            .edge_index(id)
            .and_then(|idx| self.g.edge_weight_mut(idx))
        else {
            warn!(%id, "visual update for unknown edge dropped");
            return false;
        };

        edge.set_color(color);
        if let Some(h) = highlighted {
            edge.set_highlighted(h);
        }
        true
    }

    fn reset_visuals(&mut self) {
        for node in self.g.node_weights_mut() {
            node.set_color(self.node_default);
            node.set_component(None);
        }
        for edge in self.g.edge_weights_mut() {
            edge.set_color(self.edge_default);
            edge.set_highlighted(false);
        }
    }
}
