use std::collections::{HashSet, VecDeque};

use super::{Outcome, Step};
use crate::{GraphAccess, Mutation, NodeColor, NodeId, SettingsStyle};

/// Component currently being flooded by the inner BFS.
#[derive(Debug, Clone, Copy)]
struct Current {
    component: usize,
    color: NodeColor,
}

/// Connected components labeling.
///
/// An outer cursor walks the node listing. Each unvisited node it lands on opens a new
/// component and an inner BFS floods everything reachable from it with the component number
/// and color. One step either expands one inner frontier node or opens the next component.
#[derive(Debug, Clone)]
pub struct Components {
    ids: Vec<NodeId>,
    cursor: usize,

    visited: HashSet<NodeId>,
    queue: VecDeque<NodeId>,
    current: Option<Current>,

    count: usize,
    palette_index: usize,
    style: SettingsStyle,
}

impl Components {
    pub fn new<G: GraphAccess>(g: &G, style: &SettingsStyle) -> Self {
        Self {
            ids: g.node_ids(),
            cursor: 0,
            visited: HashSet::new(),
            queue: VecDeque::new(),
            current: None,
            count: 0,
            palette_index: 0,
            style: style.clone(),
        }
    }

    pub fn step<G: GraphAccess>(&mut self, g: &G) -> Step {
        if let (Some(node), Some(current)) = (self.queue.pop_front(), self.current) {
            let mut mutations = Vec::new();
            for n in g.neighbors(node) {
                if self.visited.insert(n) {
                    self.queue.push_back(n);
                    mutations.push(Mutation::node_in_component(
                        n,
                        current.color,
                        current.component,
                    ));
                }
            }

            return Step::running(mutations);
        }

        while let Some(&id) = self.ids.get(self.cursor) {
            self.cursor += 1;
            if !self.visited.insert(id) {
                continue;
            }

            self.count += 1;
            let current = Current {
                component: self.count,
                color: self.style.component_color(self.palette_index),
            };
            self.palette_index += 1;
            self.current = Some(current);
            self.queue.push_back(id);

            return Step::running(vec![Mutation::node_in_component(
                id,
                current.color,
                current.component,
            )]);
        }

        self.current = None;
        Step::done(
            Vec::new(),
            Outcome::Components {
                component_count: self.count,
            },
        )
    }

    pub fn count(&self) -> usize {
        self.count
    }
}
