use std::fmt::{self, Display};

#[cfg(feature = "events")]
use crossbeam::channel::Sender;
use instant::Instant;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::algorithms::{RunState, Status};
use crate::events::{
    Event, PayloadEdge, PayloadNodeVisited, PayloadRunCancelled, PayloadRunCompleted,
    PayloadRunRejected, PayloadRunStarted,
};
use crate::{
    AlgorithmKind, EngineError, GraphAccess, Mutation, NodeColor, NodeId, Outcome, RunError,
    SettingsEngine, SettingsStyle, Snapshot, VisualSink,
};

pub type OnComplete = Box<dyn FnOnce(&Completion)>;
pub type OnVisualUpdate = Box<dyn FnMut(&Mutation)>;

/// Token of a started run. Required to cancel it; stale tokens are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RunHandle(u64);

impl RunHandle {
    pub fn id(self) -> u64 {
        self.0
    }
}

impl Display for RunHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Final report of a run, handed to the completion callback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    /// `None` if the run was refused before it started.
    pub handle: Option<RunHandle>,
    pub kind: AlgorithmKind,
    pub result: Result<Outcome, RunError>,
}

/// Parameters of one [`Engine::run`] call.
pub struct RunRequest {
    kind: AlgorithmKind,
    start: Option<NodeId>,
    start_marker: Option<NodeColor>,
    on_complete: Option<OnComplete>,
    on_visual_update: Option<OnVisualUpdate>,
}

impl RunRequest {
    pub fn new(kind: AlgorithmKind) -> Self {
        Self {
            kind,
            start: None,
            start_marker: None,
            on_complete: None,
            on_visual_update: None,
        }
    }

    pub fn with_start(mut self, start: NodeId) -> Self {
        self.start = Some(start);
        self
    }

    pub fn with_start_opt(mut self, start: Option<NodeId>) -> Self {
        self.start = start;
        self
    }

    /// Paints the start node right after the reset, before the algorithm's own mutations.
    pub fn with_start_marker(mut self, color: NodeColor) -> Self {
        self.start_marker = Some(color);
        self
    }

    pub fn on_complete(mut self, f: impl FnOnce(&Completion) + 'static) -> Self {
        self.on_complete = Some(Box::new(f));
        self
    }

    /// Called for every mutation after it reached the sink.
    pub fn on_visual_update(mut self, f: impl FnMut(&Mutation) + 'static) -> Self {
        self.on_visual_update = Some(Box::new(f));
        self
    }
}

/// What a call to [`Engine::tick`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Tick {
    /// No active run.
    Idle,
    /// Active run, step not due yet.
    Waiting,
    Stepped,
    Completed(Completion),
}

struct ActiveRun {
    handle: RunHandle,
    state: RunState,
    snapshot: Snapshot,
    next_due: Instant,
    steps: u64,
    on_complete: Option<OnComplete>,
    on_visual_update: Option<OnVisualUpdate>,
}

#[derive(Default)]
struct Publisher {
    #[cfg(feature = "events")]
    sender: Option<Sender<Event>>,
}

impl Publisher {
    #[cfg(feature = "events")]
    fn publish(&self, event: impl FnOnce() -> Event) {
        if let Some(sender) = &self.sender {
            if sender.send(event()).is_err() {
                debug!("event receiver is gone");
            }
        }
    }

    #[cfg(not(feature = "events"))]
    #[allow(clippy::unused_self)]
    fn publish(&self, event: impl FnOnce() -> Event) {
        let _ = event;
    }

    fn publish_mutation(&self, run: RunHandle, m: &Mutation) {
        self.publish(|| match *m {
            Mutation::Node { id, component, .. } => Event::NodeVisited(PayloadNodeVisited {
                run: run.id(),
                id,
                component,
            }),
            Mutation::Edge {
                id,
                highlighted: Some(false),
                ..
            } => Event::EdgeReverted(PayloadEdge { run: run.id(), id }),
            Mutation::Edge { id, .. } => Event::EdgeHighlighted(PayloadEdge { run: run.id(), id }),
        });
    }
}

fn completion_event(c: &Completion) -> Event {
    let (outcome, error) = match &c.result {
        Ok(o) => (Some(o.clone()), None),
        Err(e) => (None, Some(e.to_string())),
    };

    Event::RunCompleted(PayloadRunCompleted {
        run: c.handle.map(RunHandle::id),
        kind: c.kind,
        outcome,
        error,
    })
}

/// Applies mutations in order, then tells the observers.
fn deliver<S: VisualSink>(
    g: &mut S,
    run: &mut ActiveRun,
    events: &Publisher,
    mutations: &[Mutation],
) {
    for m in mutations {
        g.apply(m);
        if let Some(cb) = run.on_visual_update.as_mut() {
            cb(m);
        }
        events.publish_mutation(run.handle, m);
    }
}

/// Paced, cancellable driver for one algorithm run at a time.
///
/// The engine owns no timer. The host calls [`Engine::tick`] from its frame loop (or any other
/// periodic callback) and the engine fires at most one step per call once
/// [`SettingsEngine::step_interval`] has elapsed.
pub struct Engine {
    settings: SettingsEngine,
    style: SettingsStyle,
    active: Option<ActiveRun>,
    last_run: u64,
    events: Publisher,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(SettingsEngine::default())
    }
}

impl Engine {
    pub fn new(settings: SettingsEngine) -> Self {
        Self {
            settings,
            style: SettingsStyle::default(),
            active: None,
            last_run: 0,
            events: Publisher::default(),
        }
    }

    pub fn with_style(mut self, style: SettingsStyle) -> Self {
        self.style = style;
        self
    }

    /// Publishes run lifecycle and visual events to the given channel.
    #[cfg(feature = "events")]
    pub fn with_event_sink(mut self, sender: Sender<Event>) -> Self {
        self.events.sender = Some(sender);
        self
    }

    pub fn settings(&self) -> &SettingsEngine {
        &self.settings
    }

    /// Takes effect from the next scheduled step on.
    pub fn set_settings(&mut self, settings: SettingsEngine) {
        self.settings = settings;
    }

    pub fn style(&self) -> &SettingsStyle {
        &self.style
    }

    pub fn is_running(&self) -> bool {
        self.active.is_some()
    }

    pub fn active_handle(&self) -> Option<RunHandle> {
        self.active.as_ref().map(|r| r.handle)
    }

    pub fn active_kind(&self) -> Option<AlgorithmKind> {
        self.active.as_ref().map(|r| r.state.kind())
    }

    /// Starts a run. The topology of `g` is frozen for the whole run; later edits to `g` are
    /// not seen by the algorithm, and mutations for elements removed meanwhile are dropped by
    /// the sink.
    ///
    /// On success every node and edge is reset to its default look, the initial mutations are
    /// applied and the first step is scheduled one interval from `now`.
    ///
    /// # Errors
    ///
    /// - [`EngineError::Busy`] if a run is active. Nothing changes and no callback fires.
    /// - [`EngineError::Invalid`] if the start node is missing or unknown. The completion
    ///   callback has already been called with the same error; no visual state was touched.
    pub fn run<G>(
        &mut self,
        req: RunRequest,
        g: &mut G,
        now: Instant,
    ) -> Result<RunHandle, EngineError>
    where
        G: GraphAccess + VisualSink,
    {
        let RunRequest {
            kind,
            start,
            start_marker,
            on_complete,
            on_visual_update,
        } = req;

        if let Some(active) = &self.active {
            warn!(%kind, active = %active.handle, "run rejected, another run is active");
            self.events.publish(|| {
                Event::RunRejected(PayloadRunRejected {
                    kind,
                    active: active.handle.id(),
                })
            });
            return Err(EngineError::Busy {
                active: active.handle,
            });
        }

        let snapshot = Snapshot::capture(&*g);
        let (state, initial) = match RunState::start(kind, &snapshot, start, &self.style) {
            Ok(v) => v,
            Err(err) => {
                warn!(%kind, %err, "run not started");
                let completion = Completion {
                    handle: None,
                    kind,
                    result: Err(err.clone()),
                };
                self.events.publish(|| completion_event(&completion));
                if let Some(cb) = on_complete {
                    cb(&completion);
                }
                return Err(err.into());
            }
        };

        self.last_run += 1;
        let handle = RunHandle(self.last_run);
        debug!(run = %handle, %kind, ?start, "run started");

        g.reset_visuals();
        if let (Some(id), Some(color), true) = (start, start_marker, kind.requires_start_node()) {
            g.set_node_visual(id, color, None);
        }
        self.events.publish(|| {
            Event::RunStarted(PayloadRunStarted {
                run: handle.id(),
                kind,
                start,
            })
        });

        let mut run = ActiveRun {
            handle,
            state,
            snapshot,
            next_due: now + self.settings.step_interval,
            steps: 0,
            on_complete,
            on_visual_update,
        };
        deliver(g, &mut run, &self.events, &initial);
        self.active = Some(run);

        Ok(handle)
    }

    /// Fires the next step if it is due.
    pub fn tick<G: VisualSink>(&mut self, g: &mut G, now: Instant) -> Tick {
        let Some(run) = self.active.as_mut() else {
            return Tick::Idle;
        };
        if now < run.next_due {
            return Tick::Waiting;
        }

        run.next_due = now + self.settings.step_interval;
        run.steps += 1;
        let step = run.state.step(&run.snapshot);
        deliver(g, run, &self.events, &step.mutations);

        let Status::Done(outcome) = step.status else {
            return Tick::Stepped;
        };
        match self.active.take() {
            Some(run) => Tick::Completed(self.finish(g, run, outcome)),
            None => Tick::Idle,
        }
    }

    fn finish<G: VisualSink>(&self, g: &mut G, mut run: ActiveRun, outcome: Outcome) -> Completion {
        let cleanup = run.state.cleanup();
        deliver(g, &mut run, &self.events, &cleanup);

        let completion = Completion {
            handle: Some(run.handle),
            kind: run.state.kind(),
            result: Ok(outcome),
        };
        debug!(run = %run.handle, steps = run.steps, "run completed");
        self.events.publish(|| completion_event(&completion));
        if let Some(cb) = run.on_complete.take() {
            cb(&completion);
        }

        completion
    }

    /// Stops the run identified by `handle`. No step fires afterwards. Run-scoped highlights
    /// are reverted; everything else keeps the look it had. The completion callback is not
    /// called.
    ///
    /// Returns `false`, doing nothing, when `handle` is not the active run.
    pub fn cancel<G: VisualSink>(&mut self, handle: RunHandle, g: &mut G) -> bool {
        let mut run = match self.active.take() {
            Some(run) if run.handle == handle => run,
            other => {
                self.active = other;
                debug!(run = %handle, "cancel ignored, run is not active");
                return false;
            }
        };

        let cleanup = run.state.cleanup();
        deliver(g, &mut run, &self.events, &cleanup);
        debug!(run = %handle, steps = run.steps, "run cancelled");
        self.events.publish(|| {
            Event::RunCancelled(PayloadRunCancelled {
                run: handle.id(),
                steps: run.steps,
            })
        });

        true
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc, time::Duration};

    use super::*;
    use crate::{EdgeId, Graph};

    const INTERVAL: Duration = Duration::from_millis(100);

    fn engine() -> Engine {
        Engine::new(SettingsEngine::default().with_step_interval(INTERVAL))
    }

    /// Ticks until the run completes, one interval apart.
    fn finish(e: &mut Engine, g: &mut Graph, mut now: Instant) -> Completion {
        for _ in 0..1000 {
            now += INTERVAL;
            if let Tick::Completed(c) = e.tick(g, now) {
                return c;
            }
        }
        panic!("run did not complete");
    }

    #[test]
    fn test_second_run_is_rejected_without_side_effects() {
        let mut g = Graph::sample();
        let mut e = engine();
        let now = Instant::now();

        let h = e
            .run(RunRequest::new(AlgorithmKind::Bfs).with_start(NodeId(1)), &mut g, now)
            .unwrap();

        let called = Rc::new(RefCell::new(false));
        let flag = called.clone();
        let err = e
            .run(
                RunRequest::new(AlgorithmKind::Dfs)
                    .with_start(NodeId(2))
                    .on_complete(move |_| *flag.borrow_mut() = true),
                &mut g,
                now,
            )
            .unwrap_err();

        assert_eq!(err, EngineError::Busy { active: h });
        assert!(!*called.borrow());
        assert_eq!(e.active_handle(), Some(h));
        assert_eq!(e.active_kind(), Some(AlgorithmKind::Bfs));
    }

    #[test]
    fn test_invalid_start_reports_through_callback() {
        let mut g = Graph::sample();
        let marked = NodeColor::solid(egui::Color32::GOLD);
        g.set_node_visual(NodeId(1), marked, None);

        let got = Rc::new(RefCell::new(None));
        let sink = got.clone();
        let err = engine()
            .run(
                RunRequest::new(AlgorithmKind::CycleDetection)
                    .with_start(NodeId(42))
                    .on_complete(move |c| *sink.borrow_mut() = Some(c.clone())),
                &mut g,
                Instant::now(),
            )
            .unwrap_err();

        let expected = RunError::StartNotFound {
            kind: AlgorithmKind::CycleDetection,
            id: NodeId(42),
        };
        assert_eq!(err, EngineError::Invalid(expected.clone()));

        let completion = got.borrow_mut().take().unwrap();
        assert_eq!(completion.handle, None);
        assert_eq!(completion.result, Err(expected));

        // no reset happened
        assert_eq!(g.node(NodeId(1)).unwrap().color(), marked);
    }

    #[test]
    fn test_steps_are_paced() {
        let mut g = Graph::sample();
        let mut e = engine();
        let now = Instant::now();

        e.run(RunRequest::new(AlgorithmKind::Dfs).with_start(NodeId(1)), &mut g, now)
            .unwrap();
        // dfs paints on pop, nothing before the first step
        assert_eq!(g.node(NodeId(1)).unwrap().color(), NodeColor::default());

        assert_eq!(e.tick(&mut g, now), Tick::Waiting);
        assert_eq!(e.tick(&mut g, now + INTERVAL / 2), Tick::Waiting);
        assert_eq!(e.tick(&mut g, now + INTERVAL), Tick::Stepped);
        assert_eq!(
            g.node(NodeId(1)).unwrap().color(),
            e.style().dfs_visited
        );
        // next one is an interval after the step that just fired
        assert_eq!(e.tick(&mut g, now + INTERVAL + INTERVAL / 2), Tick::Waiting);
    }

    #[test]
    fn test_run_resets_visuals_first() {
        let mut g = Graph::sample();
        let id = EdgeId::new(NodeId(1), NodeId(2));
        g.set_node_visual(NodeId(4), NodeColor::solid(egui::Color32::GOLD), Some(7));
        g.set_edge_visual(id, crate::EdgeColor::solid(egui::Color32::GOLD), Some(true));

        engine()
            .run(RunRequest::new(AlgorithmKind::Bfs).with_start(NodeId(1)), &mut g, Instant::now())
            .unwrap();

        assert_eq!(g.node(NodeId(4)).unwrap().color(), NodeColor::default());
        assert_eq!(g.node(NodeId(4)).unwrap().component(), None);
        assert!(!g.edge(id).unwrap().highlighted());
    }

    #[test]
    fn test_start_marker_is_overridden_by_bfs() {
        let mut g = Graph::sample();
        let mut e = engine();
        let style = e.style().clone();
        e.run(
            RunRequest::new(AlgorithmKind::Bfs)
                .with_start(NodeId(1))
                .with_start_marker(style.running_start),
            &mut g,
            Instant::now(),
        )
        .unwrap();
        assert_eq!(g.node(NodeId(1)).unwrap().color(), style.bfs_visited);

        let mut g = Graph::sample();
        let mut e = engine();
        e.run(
            RunRequest::new(AlgorithmKind::Dfs)
                .with_start(NodeId(1))
                .with_start_marker(style.running_start),
            &mut g,
            Instant::now(),
        )
        .unwrap();
        assert_eq!(g.node(NodeId(1)).unwrap().color(), style.running_start);
    }

    #[test]
    fn test_completion_callback_and_release() {
        let mut g = Graph::sample();
        let mut e = engine();
        let now = Instant::now();

        let got = Rc::new(RefCell::new(None));
        let sink = got.clone();
        let h = e
            .run(
                RunRequest::new(AlgorithmKind::ConnectedComponents)
                    .on_complete(move |c| *sink.borrow_mut() = Some(c.clone())),
                &mut g,
                now,
            )
            .unwrap();

        let completion = finish(&mut e, &mut g, now);
        assert_eq!(completion.handle, Some(h));
        assert_eq!(
            completion.result,
            Ok(Outcome::Components { component_count: 1 })
        );
        assert_eq!(got.borrow().as_ref(), Some(&completion));
        assert!(!e.is_running());
        assert!(g.nodes_iter().all(|n| n.component() == Some(1)));

        // slot is free again
        assert!(e
            .run(RunRequest::new(AlgorithmKind::Bfs).with_start(NodeId(2)), &mut g, now)
            .is_ok());
    }

    #[test]
    fn test_cancel_stops_stepping() {
        let mut g = Graph::sample();
        let mut e = engine();
        let now = Instant::now();

        let h = e
            .run(RunRequest::new(AlgorithmKind::Dfs).with_start(NodeId(1)), &mut g, now)
            .unwrap();
        assert_eq!(e.tick(&mut g, now + INTERVAL), Tick::Stepped);

        assert!(e.cancel(h, &mut g));
        assert!(!e.is_running());
        // a tick that was already due is a no-op now
        assert_eq!(e.tick(&mut g, now + INTERVAL * 5), Tick::Idle);
        // state at cancel time is kept
        assert_eq!(g.node(NodeId(1)).unwrap().color(), e.style().dfs_visited);
        assert_eq!(g.node(NodeId(2)).unwrap().color(), NodeColor::default());

        assert!(!e.cancel(h, &mut g));
    }

    #[test]
    fn test_cancel_with_stale_handle() {
        let mut g = Graph::sample();
        let mut e = engine();
        let now = Instant::now();

        let first = e
            .run(RunRequest::new(AlgorithmKind::Bfs).with_start(NodeId(1)), &mut g, now)
            .unwrap();
        finish(&mut e, &mut g, now);
        // cancel after completion does nothing
        assert!(!e.cancel(first, &mut g));

        let second = e
            .run(RunRequest::new(AlgorithmKind::Bfs).with_start(NodeId(1)), &mut g, now)
            .unwrap();
        assert_ne!(first, second);
        assert!(!e.cancel(first, &mut g));
        assert_eq!(e.active_handle(), Some(second));
    }

    #[test]
    fn test_cycle_highlights_are_reverted_once() {
        let mut g = Graph::sample();
        g.add_edge(NodeId(3), NodeId(4)).unwrap();
        let mut e = engine();
        let now = Instant::now();

        let seen = Rc::new(RefCell::new(Vec::new()));
        let log = seen.clone();
        e.run(
            RunRequest::new(AlgorithmKind::CycleDetection)
                .with_start(NodeId(1))
                .on_visual_update(move |m| log.borrow_mut().push(m.clone())),
            &mut g,
            now,
        )
        .unwrap();

        let completion = finish(&mut e, &mut g, now);
        let Ok(Outcome::Cycle {
            found,
            cycle_edge_ids,
        }) = &completion.result
        else {
            panic!("unexpected result {completion:?}");
        };
        assert!(*found);
        assert_eq!(cycle_edge_ids.len(), 4);

        assert!(g.edges_iter().all(|edge| !edge.highlighted()));
        assert!(g.edges_iter().all(|edge| edge.color() == e.style().edge_default));

        let seen = seen.borrow();
        for id in cycle_edge_ids {
            let on = seen
                .iter()
                .filter(|m| {
                    matches!(m, Mutation::Edge { id: x, highlighted: Some(true), .. } if x == id)
                })
                .count();
            let off = seen
                .iter()
                .filter(|m| {
                    matches!(m, Mutation::Edge { id: x, highlighted: Some(false), .. } if x == id)
                })
                .count();
            assert_eq!((on, off), (1, 1), "edge {id}");
        }
    }

    #[test]
    fn test_edits_during_run_do_not_reach_the_algorithm() {
        let mut g = Graph::sample();
        let mut e = engine();
        let now = Instant::now();

        e.run(RunRequest::new(AlgorithmKind::Bfs).with_start(NodeId(1)), &mut g, now)
            .unwrap();
        let added = g.add_node();
        g.add_edge(NodeId(3), added).unwrap();
        g.remove_node(NodeId(4));

        let completion = finish(&mut e, &mut g, now);
        assert_eq!(completion.result, Ok(Outcome::Traversal));
        // node added after the start is not part of the run
        assert_eq!(g.node(added).unwrap().color(), NodeColor::default());
        assert_eq!(g.node(NodeId(3)).unwrap().color(), e.style().bfs_visited);
    }
}
