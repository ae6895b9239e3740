//! Stepwise, paced graph algorithms with live visual feedback.
//!
//! Algorithms ([`AlgorithmKind`]) read topology through [`GraphAccess`] and report progress as
//! [`Mutation`]s applied to a [`VisualSink`]. The [`Engine`] runs one algorithm at a time,
//! one step per elapsed interval, and [`Controller`] adds node selection on top of it.

mod algorithms;
mod controller;
mod elements;
mod engine;
mod errors;
mod graph;
mod helpers;
mod settings;
mod sink;
mod snapshot;
mod status;

pub mod events;

pub use self::algorithms::{
    run_to_completion, AlgorithmKind, Bfs, Components, CycleDetection, Dfs, Outcome, RunState,
    Status, Step, Trace,
};
pub use self::controller::Controller;
pub use self::elements::{color, Edge, EdgeColor, EdgeId, Node, NodeColor, NodeId};
pub use self::engine::{
    Completion, Engine, OnComplete, OnVisualUpdate, RunHandle, RunRequest, Tick,
};
pub use self::errors::{EditError, EngineError, ParseEdgeIdError, RunError};
pub use self::graph::Graph;
pub use self::helpers::{generate_random_graph, generate_random_graph_with};
pub use self::settings::{SettingsEngine, SettingsStyle, DEFAULT_STEP_INTERVAL};
pub use self::sink::{Mutation, VisualSink};
pub use self::snapshot::{GraphAccess, Snapshot};
pub use self::status::{describe, StatusKind, StatusMsg};
