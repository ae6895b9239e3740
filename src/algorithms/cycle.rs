use std::collections::{HashMap, HashSet};

use tracing::warn;

use super::{Outcome, Step};
use crate::{EdgeColor, EdgeId, GraphAccess, Mutation, NodeColor, NodeId};

/// Cycle detection by iterative DFS over everything reachable from the start node.
///
/// Each step looks at the stack top `u` and scans its neighbors for the first one that is
/// either unvisited (becomes a child, scanning resumes on a later visit of `u`) or visited and
/// joined to `u` by a non-tree edge (a back-edge, i.e. a cycle). A node with neither is fully
/// explored and popped. The run ends on the first cycle.
#[derive(Debug, Clone)]
pub struct CycleDetection {
    visited: HashSet<NodeId>,
    parent: HashMap<NodeId, NodeId>,
    stack: Vec<NodeId>,

    /// Edges this run highlighted, in highlight order, without duplicates.
    highlighted: Vec<EdgeId>,
    cleaned: bool,

    node_color: NodeColor,
    edge_color: EdgeColor,
    edge_default: EdgeColor,
}

impl CycleDetection {
    pub fn new(
        start: NodeId,
        node_color: NodeColor,
        edge_color: EdgeColor,
        edge_default: EdgeColor,
    ) -> Self {
        Self {
            visited: HashSet::new(),
            parent: HashMap::new(),
            stack: vec![start],
            highlighted: Vec::new(),
            cleaned: false,
            node_color,
            edge_color,
            edge_default,
        }
    }

    pub fn step<G: GraphAccess>(&mut self, g: &G) -> Step {
        let Some(&u) = self.stack.last() else {
            return Step::done(
                Vec::new(),
                Outcome::Cycle {
                    found: false,
                    cycle_edge_ids: Vec::new(),
                },
            );
        };

        let mut mutations = Vec::new();
        if self.visited.insert(u) {
            mutations.push(Mutation::node(u, self.node_color));
        }

        let parent_u = self.parent.get(&u).copied();
        for v in g.neighbors(u) {
            if !self.visited.contains(&v) {
                self.parent.insert(v, u);
                self.stack.push(v);
                return Step::running(mutations);
            }

            let tree_edge = parent_u == Some(v) || self.parent.get(&v) == Some(&u);
            if !tree_edge {
                self.trace_cycle(u, v, g.edge_count(), &mut mutations);
                return Step::done(
                    mutations,
                    Outcome::Cycle {
                        found: true,
                        cycle_edge_ids: self.highlighted.clone(),
                    },
                );
            }
        }

        self.stack.pop();
        Step::running(mutations)
    }

    /// Highlights the back-edge `u-v` and the tree path from `u` up to the ancestor `v`.
    ///
    /// The walk never takes more edges than the graph has; a longer parent chain is malformed
    /// and the walk stops with whatever was highlighted so far.
    fn trace_cycle(&mut self, u: NodeId, v: NodeId, edge_count: usize, out: &mut Vec<Mutation>) {
        self.highlight(EdgeId::new(u, v), out);

        let mut curr = u;
        let mut walked = 0;
        while curr != v {
            let Some(&p) = self.parent.get(&curr) else {
                warn!(%u, %v, %curr, "parent chain ended before reaching the cycle ancestor");
                break;
            };
            if walked >= edge_count {
                warn!(%u, %v, walked, "parent chain longer than the graph, stopping");
                break;
            }

            self.highlight(EdgeId::new(curr, p), out);
            walked += 1;
            curr = p;
        }
    }

    fn highlight(&mut self, id: EdgeId, out: &mut Vec<Mutation>) {
        if self.highlighted.contains(&id) {
            return;
        }
        self.highlighted.push(id);
        out.push(Mutation::highlight_edge(id, self.edge_color));
    }

    /// Reverts every edge this run highlighted. Only the first call produces mutations.
    pub fn cleanup(&mut self) -> Vec<Mutation> {
        if self.cleaned {
            return Vec::new();
        }
        self.cleaned = true;

        self.highlighted
            .iter()
            .map(|&id| Mutation::revert_edge(id, self.edge_default))
            .collect()
    }

    pub fn highlighted(&self) -> &[EdgeId] {
        &self.highlighted
    }
}
