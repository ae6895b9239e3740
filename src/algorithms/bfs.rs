use std::collections::{HashSet, VecDeque};

use super::{Outcome, Step};
use crate::{GraphAccess, Mutation, NodeColor, NodeId};

/// Breadth-first traversal. Nodes are painted when discovered, so the paint order follows
/// non-decreasing distance from the start node.
#[derive(Debug, Clone)]
pub struct Bfs {
    visited: HashSet<NodeId>,
    queue: VecDeque<NodeId>,
    color: NodeColor,
}

impl Bfs {
    /// The start node is discovered immediately; its mutation is returned with the state.
    pub fn new(start: NodeId, color: NodeColor) -> (Self, Vec<Mutation>) {
        let state = Self {
            visited: HashSet::from([start]),
            queue: VecDeque::from([start]),
            color,
        };

        (state, vec![Mutation::node(start, color)])
    }

    pub fn step<G: GraphAccess>(&mut self, g: &G) -> Step {
        let Some(current) = self.queue.pop_front() else {
            return Step::done(Vec::new(), Outcome::Traversal);
        };

        let mut mutations = Vec::new();
        for n in g.neighbors(current) {
            if self.visited.insert(n) {
                self.queue.push_back(n);
                mutations.push(Mutation::node(n, self.color));
            }
        }

        Step::running(mutations)
    }

    pub fn visited(&self) -> &HashSet<NodeId> {
        &self.visited
    }
}
