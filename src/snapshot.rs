use std::collections::BTreeMap;

use crate::NodeId;

/// Read-only topology access used by the algorithm steps.
///
/// Implementations must enumerate in a stable order: [`GraphAccess::node_ids`] and
/// [`GraphAccess::neighbors`] return ids ascending and without duplicates.
pub trait GraphAccess {
    fn contains_node(&self, id: NodeId) -> bool;

    fn node_ids(&self) -> Vec<NodeId>;

    /// Nodes sharing an edge with `id`. Empty for unknown ids.
    fn neighbors(&self, id: NodeId) -> Vec<NodeId>;

    fn edge_count(&self) -> usize;
}

/// Topology frozen at the moment a run starts.
///
/// The runner steps against a snapshot rather than the live graph, so nodes or edges edited
/// away mid-run never leave the frontier pointing at ids that no longer resolve.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    adjacency: BTreeMap<NodeId, Vec<NodeId>>,
    edge_count: usize,
}

impl Snapshot {
    pub fn capture(g: &impl GraphAccess) -> Self {
        let adjacency = g
            .node_ids()
            .into_iter()
            .map(|id| (id, g.neighbors(id)))
            .collect();

        Self {
            adjacency,
            edge_count: g.edge_count(),
        }
    }

    /// Builds a snapshot straight from an undirected edge list. Endpoints are added as nodes.
    pub fn from_edges(nodes: &[u64], edges: &[(u64, u64)]) -> Self {
        let mut adjacency: BTreeMap<NodeId, Vec<NodeId>> =
            nodes.iter().map(|&n| (NodeId(n), Vec::new())).collect();

        let mut edge_count = 0;
        for &(a, b) in edges {
            let (a, b) = (NodeId(a), NodeId(b));
            adjacency.entry(b).or_default();
            let from_a = adjacency.entry(a).or_default();
            if a == b {
                continue;
            }
            if from_a.contains(&b) {
                continue;
            }
            from_a.push(b);
            adjacency.entry(b).or_default().push(a);
            edge_count += 1;
        }

        for neighbors in adjacency.values_mut() {
            neighbors.sort_unstable();
        }

        Self {
            adjacency,
            edge_count,
        }
    }

    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }
}

impl GraphAccess for Snapshot {
    fn contains_node(&self, id: NodeId) -> bool {
        self.adjacency.contains_key(&id)
    }

    fn node_ids(&self) -> Vec<NodeId> {
        self.adjacency.keys().copied().collect()
    }

    fn neighbors(&self, id: NodeId) -> Vec<NodeId> {
        self.adjacency.get(&id).cloned().unwrap_or_default()
    }

    fn edge_count(&self) -> usize {
        self.edge_count
    }
}
