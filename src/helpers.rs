use rand::Rng;

use crate::{Graph, NodeId};

/// Random graph with `nodes` nodes (ids `1..=nodes`) and up to `edges` distinct edges.
///
/// Fewer edges are produced when the graph cannot hold that many or random picks keep hitting
/// self loops and existing edges.
pub fn generate_random_graph(nodes: usize, edges: usize) -> Graph {
    generate_random_graph_with(&mut rand::rng(), nodes, edges)
}

/// Same as [`generate_random_graph`] with a caller supplied rng, e.g. a seeded one.
pub fn generate_random_graph_with<R: Rng + ?Sized>(
    rng: &mut R,
    nodes: usize,
    edges: usize,
) -> Graph {
    let mut g = Graph::new();
    for _ in 0..nodes {
        g.add_node();
    }
    if nodes < 2 {
        return g;
    }

    let max_edges = nodes * (nodes - 1) / 2;
    let target = edges.min(max_edges);
    let mut added = 0;
    let mut attempts = 0;
    while added < target && attempts < target * 10 {
        attempts += 1;
        let a = NodeId(rng.random_range(1..=nodes as u64));
        let b = NodeId(rng.random_range(1..=nodes as u64));
        if g.add_edge(a, b).is_ok() {
            added += 1;
        }
    }

    g
}
