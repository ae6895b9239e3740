//! Stepwise graph algorithms.
//!
//! Every algorithm is an explicit state value advanced one step at a time by
//! [`RunState::step`]. A step reads the topology, updates the state and returns the visual
//! mutations it produced, in discovery order. Nothing here knows about timing; pacing is the
//! job of [`crate::Engine`].

mod bfs;
mod components;
mod cycle;
mod dfs;

use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};

pub use self::bfs::Bfs;
pub use self::components::Components;
pub use self::cycle::CycleDetection;
pub use self::dfs::Dfs;

use crate::{EdgeId, GraphAccess, Mutation, NodeId, RunError, SettingsStyle};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AlgorithmKind {
    Bfs,
    Dfs,
    ConnectedComponents,
    CycleDetection,
}

impl AlgorithmKind {
    pub const ALL: [AlgorithmKind; 4] = [
        Self::Bfs,
        Self::Dfs,
        Self::ConnectedComponents,
        Self::CycleDetection,
    ];

    /// Connected components walks the whole graph; everything else starts from a node.
    pub fn requires_start_node(self) -> bool {
        !matches!(self, Self::ConnectedComponents)
    }
}

impl Display for AlgorithmKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Bfs => "BFS",
            Self::Dfs => "DFS",
            Self::ConnectedComponents => "Connected components",
            Self::CycleDetection => "Cycle detection",
        };
        f.write_str(name)
    }
}

/// Result payload of a finished run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// BFS and DFS carry no payload.
    Traversal,
    #[serde(rename_all = "camelCase")]
    Components { component_count: usize },
    #[serde(rename_all = "camelCase")]
    Cycle {
        found: bool,
        cycle_edge_ids: Vec<EdgeId>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    Running,
    Done(Outcome),
}

/// What a single step produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub mutations: Vec<Mutation>,
    pub status: Status,
}

impl Step {
    fn running(mutations: Vec<Mutation>) -> Self {
        Self {
            mutations,
            status: Status::Running,
        }
    }

    fn done(mutations: Vec<Mutation>, outcome: Outcome) -> Self {
        Self {
            mutations,
            status: Status::Done(outcome),
        }
    }

    pub fn is_done(&self) -> bool {
        matches!(self.status, Status::Done(_))
    }
}

/// Per-run algorithm state, one variant per [`AlgorithmKind`].
#[derive(Debug, Clone)]
pub enum RunState {
    Bfs(Bfs),
    Dfs(Dfs),
    Components(Components),
    Cycle(CycleDetection),
}

impl RunState {
    /// Validates the invocation and builds the initial state together with the mutations that
    /// have to be shown before the first step.
    ///
    /// # Errors
    ///
    /// [`RunError`] when `kind` needs a start node and `start` is missing or not in `g`.
    pub fn start<G: GraphAccess>(
        kind: AlgorithmKind,
        g: &G,
        start: Option<NodeId>,
        style: &SettingsStyle,
    ) -> Result<(Self, Vec<Mutation>), RunError> {
        let res = match kind {
            AlgorithmKind::Bfs => {
                let (s, m) = Bfs::new(require_start(kind, g, start)?, style.bfs_visited);
                (Self::Bfs(s), m)
            }
            AlgorithmKind::Dfs => (
                Self::Dfs(Dfs::new(require_start(kind, g, start)?, style.dfs_visited)),
                Vec::new(),
            ),
            AlgorithmKind::ConnectedComponents => {
                (Self::Components(Components::new(g, style)), Vec::new())
            }
            AlgorithmKind::CycleDetection => (
                Self::Cycle(CycleDetection::new(
                    require_start(kind, g, start)?,
                    style.cycle_visited,
                    style.cycle_edge,
                    style.edge_default,
                )),
                Vec::new(),
            ),
        };

        Ok(res)
    }

    pub fn kind(&self) -> AlgorithmKind {
        match self {
            Self::Bfs(_) => AlgorithmKind::Bfs,
            Self::Dfs(_) => AlgorithmKind::Dfs,
            Self::Components(_) => AlgorithmKind::ConnectedComponents,
            Self::Cycle(_) => AlgorithmKind::CycleDetection,
        }
    }

    pub fn step<G: GraphAccess>(&mut self, g: &G) -> Step {
        match self {
            Self::Bfs(s) => s.step(g),
            Self::Dfs(s) => s.step(g),
            Self::Components(s) => s.step(g),
            Self::Cycle(s) => s.step(g),
        }
    }

    /// Mutations undoing run-scoped highlights. Yields them once; later calls return nothing.
    pub fn cleanup(&mut self) -> Vec<Mutation> {
        match self {
            Self::Cycle(s) => s.cleanup(),
            Self::Bfs(_) | Self::Dfs(_) | Self::Components(_) => Vec::new(),
        }
    }
}

fn require_start<G: GraphAccess>(
    kind: AlgorithmKind,
    g: &G,
    start: Option<NodeId>,
) -> Result<NodeId, RunError> {
    let id = start.ok_or(RunError::MissingStart(kind))?;
    if !g.contains_node(id) {
        return Err(RunError::StartNotFound { kind, id });
    }

    Ok(id)
}

/// Everything a run emitted, start to finish.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trace {
    pub mutations: Vec<Mutation>,
    pub outcome: Outcome,
    pub steps: usize,
}

impl Trace {
    /// Node ids in the order their first visual mutation was emitted.
    pub fn visit_order(&self) -> Vec<NodeId> {
        let mut seen = std::collections::HashSet::new();
        self.mutations
            .iter()
            .filter_map(Mutation::node_id)
            .filter(|id| seen.insert(*id))
            .collect()
    }
}

/// Runs an algorithm without any pacing, cleanup included.
///
/// # Errors
///
/// Same as [`RunState::start`].
pub fn run_to_completion<G: GraphAccess>(
    kind: AlgorithmKind,
    g: &G,
    start: Option<NodeId>,
    style: &SettingsStyle,
) -> Result<Trace, RunError> {
    let (mut state, mut mutations) = RunState::start(kind, g, start, style)?;

    let mut steps = 0;
    let outcome = loop {
        let step = state.step(g);
        steps += 1;
        mutations.extend(step.mutations);
        if let Status::Done(outcome) = step.status {
            break outcome;
        }
    };
    mutations.extend(state.cleanup());

    Ok(Trace {
        mutations,
        outcome,
        steps,
    })
}
