use std::collections::HashSet;

use super::{Outcome, Step};
use crate::{GraphAccess, Mutation, NodeColor, NodeId};

/// Iterative depth-first traversal.
///
/// A node may sit on the stack several times. It is marked and painted only when popped while
/// still unvisited; stale copies are dropped. Neighbors are pushed in reverse so the smallest
/// id is explored first, like the recursive version would.
#[derive(Debug, Clone)]
pub struct Dfs {
    visited: HashSet<NodeId>,
    stack: Vec<NodeId>,
    color: NodeColor,
}

impl Dfs {
    pub fn new(start: NodeId, color: NodeColor) -> Self {
        Self {
            visited: HashSet::new(),
            stack: vec![start],
            color,
        }
    }

    pub fn step<G: GraphAccess>(&mut self, g: &G) -> Step {
        // stale entries do not cost a step
        let current = loop {
            match self.stack.pop() {
                None => return Step::done(Vec::new(), Outcome::Traversal),
                Some(id) if self.visited.insert(id) => break id,
                Some(_) => {}
            }
        };

        for n in g.neighbors(current).into_iter().rev() {
            if !self.visited.contains(&n) {
                self.stack.push(n);
            }
        }

        Step::running(vec![Mutation::node(current, self.color)])
    }

    pub fn visited(&self) -> &HashSet<NodeId> {
        &self.visited
    }
}
