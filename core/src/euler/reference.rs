//! Reference decision procedures for Eulerian trails.
//!
//! Deliberately independent of the trail construction: existence is decided
//! from degree counts plus connectivity of the undirected shadow graph,
//! computed with [`BreadthFirstPaths`]. Slower, allocation-heavy, and meant
//! for tests and debug assertions only.

use std::collections::HashMap;

use crate::graph::{Adjacency, Digraph, Graph, Vertex};
use crate::traversal::BreadthFirstPaths;

/// E > 0, every vertex balanced, and the non-isolated vertices weakly connected.
pub fn has_eulerian_cycle(digraph: &Digraph) -> bool {
    if digraph.edge_count() == 0 {
        return false;
    }
    let balanced = (0..digraph.vertex_count())
        .all(|v| digraph.neighbors(v).len() == digraph.indegree_unchecked(v));
    balanced && shadow_connected(digraph)
}

/// Total surplus of outgoing over incoming edges is at most one, and the
/// non-isolated vertices are weakly connected. Edgeless digraphs with at
/// least one vertex qualify.
pub fn has_eulerian_path(digraph: &Digraph) -> bool {
    if digraph.vertex_count() == 0 {
        return false;
    }
    if digraph.edge_count() == 0 {
        return true;
    }
    let surplus: usize = (0..digraph.vertex_count())
        .map(|v| {
            digraph
                .neighbors(v)
                .len()
                .saturating_sub(digraph.indegree_unchecked(v))
        })
        .sum();
    surplus <= 1 && shadow_connected(digraph)
}

/// `trail` has E+1 vertices and its consecutive pairs are exactly the edge
/// multiset of `digraph`.
pub fn is_eulerian_trail(digraph: &Digraph, trail: &[Vertex]) -> bool {
    if trail.len() != digraph.edge_count() + 1 {
        return false;
    }

    let mut remaining: HashMap<(Vertex, Vertex), usize> = HashMap::new();
    for edge in digraph.edges() {
        *remaining.entry(edge).or_insert(0) += 1;
    }
    for pair in trail.windows(2) {
        match remaining.get_mut(&(pair[0], pair[1])) {
            Some(count) if *count > 0 => *count -= 1,
            _ => return false,
        }
    }
    remaining.values().all(|&c| c == 0)
}

/// Connectivity of the direction-erased graph, restricted to vertices that
/// touch at least one edge.
fn shadow_connected(digraph: &Digraph) -> bool {
    let Ok(shadow) = Graph::from_edges(digraph.vertex_count(), digraph.edges()) else {
        return false;
    };

    let Some(start) = (0..shadow.vertex_count()).find(|&v| !shadow.neighbors(v).is_empty())
    else {
        return true;
    };
    let Ok(bfs) = BreadthFirstPaths::new(&shadow, start) else {
        return false;
    };

    (0..shadow.vertex_count()).all(|v| shadow.neighbors(v).is_empty() || bfs.has_path_to(v))
}
