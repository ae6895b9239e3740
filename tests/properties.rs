use std::collections::{BTreeSet, HashMap, VecDeque};

use egui_graphs_algo::{
    generate_random_graph_with, run_to_completion, AlgorithmKind, EdgeId, Graph, GraphAccess,
    Mutation, NodeId, Outcome, SettingsStyle,
};
use rand::{rngs::StdRng, SeedableRng};

const SEEDS: u64 = 40;

fn graphs() -> impl Iterator<Item = Graph> {
    (0..SEEDS).map(|seed| {
        let mut rng = StdRng::seed_from_u64(seed);
        let nodes = 1 + (seed as usize % 25);
        let edges = (seed as usize * 7) % 40;
        generate_random_graph_with(&mut rng, nodes, edges)
    })
}

fn distances(g: &Graph, start: NodeId) -> HashMap<NodeId, usize> {
    let mut dist = HashMap::from([(start, 0)]);
    let mut queue = VecDeque::from([start]);
    while let Some(u) = queue.pop_front() {
        let d = dist[&u];
        for v in g.neighbors(u) {
            if !dist.contains_key(&v) {
                dist.insert(v, d + 1);
                queue.push_back(v);
            }
        }
    }
    dist
}

fn node_hits(mutations: &[Mutation]) -> HashMap<NodeId, usize> {
    let mut hits = HashMap::new();
    for id in mutations.iter().filter_map(Mutation::node_id) {
        *hits.entry(id).or_insert(0) += 1;
    }
    hits
}

#[test]
fn bfs_visits_by_distance() {
    let style = SettingsStyle::default();
    for g in graphs() {
        let start = NodeId(1);
        let dist = distances(&g, start);
        let trace = run_to_completion(AlgorithmKind::Bfs, &g, Some(start), &style).unwrap();

        let order = trace.visit_order();
        assert_eq!(order.len(), dist.len());
        assert_eq!(order[0], start);
        for pair in order.windows(2) {
            assert!(dist[&pair[0]] <= dist[&pair[1]], "{order:?}");
        }
        assert!(node_hits(&trace.mutations).values().all(|&n| n == 1));
        assert_eq!(trace.outcome, Outcome::Traversal);
    }
}

#[test]
fn dfs_visits_each_reachable_node_once() {
    let style = SettingsStyle::default();
    for g in graphs() {
        let start = NodeId(g.node_count() as u64);
        let dist = distances(&g, start);
        let trace = run_to_completion(AlgorithmKind::Dfs, &g, Some(start), &style).unwrap();

        let hits = node_hits(&trace.mutations);
        assert_eq!(hits.len(), dist.len());
        assert!(hits.values().all(|&n| n == 1));
        assert!(hits.keys().all(|id| dist.contains_key(id)));
        assert_eq!(trace.visit_order()[0], start);
    }
}

#[test]
fn components_partition_by_reachability() {
    let style = SettingsStyle::default();
    for g in graphs() {
        let trace =
            run_to_completion(AlgorithmKind::ConnectedComponents, &g, None, &style).unwrap();

        let mut tags = HashMap::new();
        for m in &trace.mutations {
            if let Mutation::Node {
                id,
                component: Some(c),
                ..
            } = *m
            {
                assert!(tags.insert(id, c).is_none(), "{id} tagged twice");
            }
        }
        assert_eq!(tags.len(), g.node_count());

        for a in g.node_ids() {
            let reach = distances(&g, a);
            for b in g.node_ids() {
                assert_eq!(tags[&a] == tags[&b], reach.contains_key(&b), "{a} vs {b}");
            }
        }

        let count = tags.values().collect::<BTreeSet<_>>().len();
        assert_eq!(
            trace.outcome,
            Outcome::Components {
                component_count: count
            }
        );
    }
}

#[test]
fn cycle_detection_is_sound() {
    let style = SettingsStyle::default();
    for g in graphs() {
        let start = NodeId(1);
        let reach = distances(&g, start);
        // a connected part is acyclic iff it has exactly one edge fewer than nodes
        let reach_edges = g
            .edges_iter()
            .filter(|e| reach.contains_key(&e.from()))
            .count();
        let has_cycle = reach_edges >= reach.len();

        let trace =
            run_to_completion(AlgorithmKind::CycleDetection, &g, Some(start), &style).unwrap();
        let Outcome::Cycle {
            found,
            cycle_edge_ids,
        } = &trace.outcome
        else {
            panic!("unexpected outcome {:?}", trace.outcome);
        };

        assert_eq!(*found, has_cycle);
        if !found {
            assert!(cycle_edge_ids.is_empty());
            continue;
        }

        // closed walk: every endpoint is touched exactly twice
        let mut degree: HashMap<NodeId, usize> = HashMap::new();
        for id in cycle_edge_ids {
            assert!(g.edge(*id).is_some(), "{id} not in graph");
            let (a, b) = id.endpoints();
            *degree.entry(a).or_insert(0) += 1;
            *degree.entry(b).or_insert(0) += 1;
        }
        assert!(degree.values().all(|&d| d == 2), "{cycle_edge_ids:?}");
        assert_eq!(degree.len(), cycle_edge_ids.len());

        // every highlight is reverted exactly once
        for id in cycle_edge_ids {
            let reverts = trace
                .mutations
                .iter()
                .filter(|m| {
                    matches!(m, Mutation::Edge { id: x, highlighted: Some(false), .. } if x == id)
                })
                .count();
            assert_eq!(reverts, 1);
        }
    }
}

#[test]
fn sample_graph() {
    let style = SettingsStyle::default();
    let mut g = Graph::sample();

    let bfs = run_to_completion(AlgorithmKind::Bfs, &g, Some(NodeId(1)), &style).unwrap();
    assert_eq!(
        bfs.visit_order(),
        vec![NodeId(1), NodeId(2), NodeId(3), NodeId(4)]
    );

    let cc = run_to_completion(AlgorithmKind::ConnectedComponents, &g, None, &style).unwrap();
    assert_eq!(cc.outcome, Outcome::Components { component_count: 1 });

    let cycle = run_to_completion(AlgorithmKind::CycleDetection, &g, Some(NodeId(1)), &style)
        .unwrap();
    assert_eq!(
        cycle.outcome,
        Outcome::Cycle {
            found: false,
            cycle_edge_ids: Vec::new()
        }
    );

    g.add_edge(NodeId(3), NodeId(4)).unwrap();
    let cycle = run_to_completion(AlgorithmKind::CycleDetection, &g, Some(NodeId(1)), &style)
        .unwrap();
    let Outcome::Cycle {
        found: true,
        cycle_edge_ids,
    } = cycle.outcome
    else {
        panic!("cycle expected");
    };
    let ids: BTreeSet<String> = cycle_edge_ids.iter().map(EdgeId::to_string).collect();
    assert_eq!(
        ids,
        ["1-2", "1-3", "2-4", "3-4"].map(String::from).into()
    );
}
