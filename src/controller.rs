use instant::Instant;
use tracing::debug;

use crate::status::{describe, StatusMsg};
use crate::{
    AlgorithmKind, EdgeId, EditError, Engine, EngineError, Graph, Node, NodeId, Outcome,
    RunError, RunHandle, RunRequest, Tick, VisualSink,
};

/// Click driven front of the engine: owns the graph, tracks which node algorithms start from
/// and which nodes are picked to be connected, and keeps the last status message.
pub struct Controller {
    graph: Graph,
    engine: Engine,

    start_node: Option<NodeId>,
    /// Nodes picked for the next edge. Never holds more than one node between calls.
    edge_selection: Vec<NodeId>,
    message: Option<StatusMsg>,
}

impl Default for Controller {
    fn default() -> Self {
        let engine = Engine::default();
        let graph = Graph::sample().with_style(engine.style());
        Self::new(graph, engine)
    }
}

impl Controller {
    pub fn new(graph: Graph, engine: Engine) -> Self {
        Self {
            graph,
            engine,
            start_node: None,
            edge_selection: Vec::new(),
            message: None,
        }
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// Edits are allowed during a run, the run keeps working on the topology it started with.
    pub fn graph_mut(&mut self) -> &mut Graph {
        &mut self.graph
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    pub fn start_node(&self) -> Option<NodeId> {
        self.start_node
    }

    pub fn edge_selection(&self) -> &[NodeId] {
        &self.edge_selection
    }

    pub fn message(&self) -> Option<&StatusMsg> {
        self.message.as_ref()
    }

    pub fn is_running(&self) -> bool {
        self.engine.is_running()
    }

    /// Handles a click on a node.
    ///
    /// Clicking toggles the node in the edge selection. A second selected node closes the pair
    /// into an edge and becomes the start node. A single selected node is the start node;
    /// deselecting it clears the start node. Ignored while a run is active.
    ///
    /// Returns the created edge, if any.
    ///
    /// # Errors
    ///
    /// [`EditError`] if the selected pair could not be connected. The selection is cleared
    /// anyway and the error is also kept as the status message.
    pub fn click_node(&mut self, id: NodeId) -> Result<Option<EdgeId>, EditError> {
        if self.engine.is_running() {
            debug!(%id, "click ignored while a run is active");
            return Ok(None);
        }
        if self.graph.node(id).is_none() {
            debug!(%id, "click on unknown node ignored");
            return Ok(None);
        }

        self.message = None;
        if let Some(pos) = self.edge_selection.iter().position(|&n| n == id) {
            self.edge_selection.remove(pos);
        } else {
            self.edge_selection.push(id);
        }

        let res = match self.edge_selection.as_slice() {
            &[from, to] => {
                self.edge_selection.clear();
                self.start_node = Some(id);
                self.graph.add_edge(from, to).map(Some)
            }
            &[only] => {
                self.start_node = Some(only);
                Ok(None)
            }
            _ => {
                self.start_node = None;
                Ok(None)
            }
        };

        self.paint_selection();
        if let Err(err) = &res {
            self.message = Some(StatusMsg::error(err.to_string()));
        }
        res
    }

    /// Drops the edge selection, keeping the start node.
    pub fn clear_edge_selection(&mut self) {
        self.edge_selection.clear();
        self.paint_selection();
    }

    /// Starts `kind` from the current start node.
    ///
    /// # Errors
    ///
    /// Whatever [`Engine::run`] returns, plus [`RunError::MissingStart`] when `kind` needs a
    /// start node and none is selected. Invalid invocations also set the status message.
    pub fn run(&mut self, kind: AlgorithmKind, now: Instant) -> Result<RunHandle, EngineError> {
        if self.engine.is_running() {
            return self.engine.run(RunRequest::new(kind), &mut self.graph, now);
        }

        let start = if kind.requires_start_node() {
            let Some(start) = self.start_node else {
                self.message = Some(StatusMsg::missing_start());
                return Err(RunError::MissingStart(kind).into());
            };
            Some(start)
        } else {
            None
        };

        self.message = None;
        self.edge_selection.clear();

        let req = RunRequest::new(kind)
            .with_start_opt(start)
            .with_start_marker(self.engine.style().running_start);
        let res = self.engine.run(req, &mut self.graph, now);
        if let Err(EngineError::Invalid(err)) = &res {
            self.message = Some(StatusMsg::error(err.to_string()));
        }
        res
    }

    /// Drives the engine. On completion the result is formatted into the status message, a
    /// found cycle stays painted and the start node gets its selection color back.
    pub fn tick(&mut self, now: Instant) -> Tick {
        let tick = self.engine.tick(&mut self.graph, now);
        let Tick::Completed(c) = &tick else {
            return tick;
        };

        self.message = Some(describe(c));
        if let Ok(Outcome::Cycle { cycle_edge_ids, .. }) = &c.result {
            let color = self.engine.style().cycle_edge;
            for &id in cycle_edge_ids {
                self.graph.set_edge_visual(id, color, Some(false));
            }
        }
        if c.kind.requires_start_node() {
            self.mark_start();
        }

        tick
    }

    /// Cancels the active run, if any, and restores the default look with the start node
    /// still marked. Returns whether a run was cancelled.
    pub fn stop(&mut self) -> bool {
        let cancelled = self
            .engine
            .active_handle()
            .is_some_and(|h| self.engine.cancel(h, &mut self.graph));

        self.graph.reset_visuals();
        self.edge_selection.clear();
        self.mark_start();
        self.message = Some(StatusMsg::stopped());

        cancelled
    }

    /// Stops any run and forgets every selection and message.
    pub fn reset(&mut self) {
        if let Some(h) = self.engine.active_handle() {
            self.engine.cancel(h, &mut self.graph);
        }
        self.graph.reset_visuals();
        self.start_node = None;
        self.edge_selection.clear();
        self.message = None;
    }

    /// Stops any run and empties the graph. Selections and the message go with it, so a later
    /// node reusing an old id starts unselected.
    pub fn clear_graph(&mut self) {
        self.reset();
        self.graph.clear();
    }

    /// Removes the node with the largest id, dropping it from the selections.
    pub fn remove_last_node(&mut self) -> Option<Node> {
        let removed = self.graph.remove_last_node()?;
        self.edge_selection.retain(|&n| n != removed.id());
        if self.start_node == Some(removed.id()) {
            self.start_node = None;
        }
        Some(removed)
    }

    fn mark_start(&mut self) {
        if let Some(id) = self.start_node {
            let color = self.engine.style().selected_for_algorithm;
            self.graph.set_node_visual(id, color, None);
        }
    }

    fn paint_selection(&mut self) {
        let style = self.engine.style();
        let ids: Vec<_> = self.graph.nodes_iter().map(Node::id).collect();
        for id in ids {
            let color = if self.edge_selection.contains(&id) {
                style.selected_for_edge
            } else if self.start_node == Some(id) {
                style.selected_for_algorithm
            } else {
                style.node_default
            };
            self.graph.set_node_visual(id, color, None);
        }
    }
}
