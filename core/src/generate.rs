//! Random graphs with exact structural guarantees.
//!
//! Every generator takes the random source from the caller, so a seeded
//! `StdRng` reproduces the same graph. The guarantees hold for every draw,
//! not just with high probability; tests assert on them directly.

use std::collections::HashSet;

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::trace;

use crate::error::{GraphError, Result};
use crate::graph::{Digraph, Graph, Vertex};

/// Undirected graph with `e` distinct edges, no self-loops, no parallel edges.
pub fn simple<R: Rng + ?Sized>(v: usize, e: usize, rng: &mut R) -> Result<Graph> {
    let max = v.saturating_mul(v.saturating_sub(1)) / 2;
    if e > max {
        return Err(GraphError::TooManyEdges { requested: e, max });
    }
    trace!(vertices = v, edges = e, "generating simple graph");

    let mut graph = Graph::with_capacity(v, e);
    let mut seen: HashSet<(Vertex, Vertex)> = HashSet::with_capacity(e);
    while graph.edge_count() < e {
        let a = rng.gen_range(0..v);
        let b = rng.gen_range(0..v);
        if a != b && seen.insert((a.min(b), a.max(b))) {
            graph.add_edge(a, b)?;
        }
    }
    Ok(graph)
}

/// Digraph with `e` distinct edges and no self-loops.
pub fn simple_digraph<R: Rng + ?Sized>(v: usize, e: usize, rng: &mut R) -> Result<Digraph> {
    let max = v.saturating_mul(v.saturating_sub(1));
    if e > max {
        return Err(GraphError::TooManyEdges { requested: e, max });
    }
    trace!(vertices = v, edges = e, "generating simple digraph");

    let mut digraph = Digraph::with_capacity(v, e);
    let mut seen: HashSet<(Vertex, Vertex)> = HashSet::with_capacity(e);
    while digraph.edge_count() < e {
        let a = rng.gen_range(0..v);
        let b = rng.gen_range(0..v);
        if a != b && seen.insert((a, b)) {
            digraph.add_edge(a, b)?;
        }
    }
    Ok(digraph)
}

/// Simple bipartite graph: vertices `0..v1` on one side, `v1..v1 + v2` on
/// the other, every edge crossing.
pub fn bipartite<R: Rng + ?Sized>(v1: usize, v2: usize, e: usize, rng: &mut R) -> Result<Graph> {
    let max = v1.saturating_mul(v2);
    if e > max {
        return Err(GraphError::TooManyEdges { requested: e, max });
    }
    trace!(left = v1, right = v2, edges = e, "generating bipartite graph");

    let mut graph = Graph::with_capacity(v1 + v2, e);
    let mut seen: HashSet<(Vertex, Vertex)> = HashSet::with_capacity(e);
    while graph.edge_count() < e {
        let a = rng.gen_range(0..v1);
        let b = v1 + rng.gen_range(0..v2);
        if seen.insert((a, b)) {
            graph.add_edge(a, b)?;
        }
    }
    Ok(graph)
}

/// Digraph consisting of one closed random walk of `e` edges.
///
/// Every vertex on the walk is entered as often as it is left, and the walk
/// itself connects them, so an Eulerian cycle always exists.
pub fn eulerian_cycle<R: Rng + ?Sized>(v: usize, e: usize, rng: &mut R) -> Result<Digraph> {
    if v == 0 {
        return Err(GraphError::InvalidParameter("eulerian cycle needs at least one vertex"));
    }
    if e == 0 {
        return Err(GraphError::InvalidParameter("eulerian cycle needs at least one edge"));
    }
    trace!(vertices = v, edges = e, "generating eulerian cycle");

    let walk: Vec<Vertex> = (0..e).map(|_| rng.gen_range(0..v)).collect();
    let mut digraph = Digraph::with_capacity(v, e);
    for i in 0..e {
        digraph.add_edge(walk[i], walk[(i + 1) % e])?;
    }
    Ok(digraph)
}

/// Digraph consisting of one open random walk of `e` edges whose end differs
/// from its start.
///
/// Exactly two vertices are unbalanced: the start leaves once more than it is
/// entered and the end the reverse.
pub fn eulerian_path<R: Rng + ?Sized>(v: usize, e: usize, rng: &mut R) -> Result<Digraph> {
    if v < 2 {
        return Err(GraphError::InvalidParameter("eulerian path needs at least two vertices"));
    }
    if e == 0 {
        return Err(GraphError::InvalidParameter("eulerian path needs at least one edge"));
    }
    trace!(vertices = v, edges = e, "generating eulerian path");

    let mut walk: Vec<Vertex> = (0..e).map(|_| rng.gen_range(0..v)).collect();
    // Draw the end from the v - 1 vertices other than the start.
    let mut end = rng.gen_range(0..v - 1);
    if end >= walk[0] {
        end += 1;
    }
    walk.push(end);

    let mut digraph = Digraph::with_capacity(v, e);
    for pair in walk.windows(2) {
        digraph.add_edge(pair[0], pair[1])?;
    }
    Ok(digraph)
}

/// Path through all `v` vertices in random order.
pub fn path<R: Rng + ?Sized>(v: usize, rng: &mut R) -> Result<Graph> {
    let order = shuffled(v, rng);
    let mut graph = Graph::with_capacity(v, v.saturating_sub(1));
    for pair in order.windows(2) {
        graph.add_edge(pair[0], pair[1])?;
    }
    Ok(graph)
}

/// Cycle through all `v` vertices in random order. One vertex gives a self-loop.
pub fn cycle<R: Rng + ?Sized>(v: usize, rng: &mut R) -> Result<Graph> {
    if v == 0 {
        return Err(GraphError::InvalidParameter("cycle needs at least one vertex"));
    }
    let order = shuffled(v, rng);
    let mut graph = Graph::with_capacity(v, v);
    for i in 0..v {
        graph.add_edge(order[i], order[(i + 1) % v])?;
    }
    Ok(graph)
}

/// Directed cycle through all `v` vertices in random order.
pub fn directed_cycle<R: Rng + ?Sized>(v: usize, rng: &mut R) -> Result<Digraph> {
    if v == 0 {
        return Err(GraphError::InvalidParameter("cycle needs at least one vertex"));
    }
    let order = shuffled(v, rng);
    let mut digraph = Digraph::with_capacity(v, v);
    for i in 0..v {
        digraph.add_edge(order[i], order[(i + 1) % v])?;
    }
    Ok(digraph)
}

/// Complete graph: every pair of distinct vertices joined once.
pub fn complete(v: usize) -> Result<Graph> {
    let mut graph = Graph::with_capacity(v, v.saturating_mul(v.saturating_sub(1)) / 2);
    for a in 0..v {
        for b in (a + 1)..v {
            graph.add_edge(a, b)?;
        }
    }
    Ok(graph)
}

fn shuffled<R: Rng + ?Sized>(v: usize, rng: &mut R) -> Vec<Vertex> {
    let mut order: Vec<Vertex> = (0..v).collect();
    order.shuffle(rng);
    order
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::euler::reference;
    use crate::graph::Adjacency;

    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn assert_simple(g: &Graph) {
        let mut seen = HashSet::new();
        for (a, b) in g.edges() {
            assert_ne!(a, b, "self-loop {}-{}", a, b);
            assert!(seen.insert((a, b)), "parallel edge {}-{}", a, b);
        }
    }

    fn unbalanced(d: &Digraph) -> Vec<(Vertex, isize)> {
        (0..d.vertex_count())
            .map(|v| {
                let gap = d.outdegree(v).unwrap() as isize - d.indegree(v).unwrap() as isize;
                (v, gap)
            })
            .filter(|&(_, gap)| gap != 0)
            .collect()
    }

    #[test]
    fn test_simple_exact() {
        let mut rng = StdRng::seed_from_u64(1);
        let g = simple(20, 60, &mut rng).unwrap();
        assert_eq!(g.vertex_count(), 20);
        assert_eq!(g.edge_count(), 60);
        assert_simple(&g);
    }

    #[test]
    fn test_simple_full() {
        let mut rng = StdRng::seed_from_u64(2);
        let g = simple(6, 15, &mut rng).unwrap();
        assert_simple(&g);
        assert!((0..6).all(|v| g.degree(v).unwrap() == 5));
    }

    #[test]
    fn test_simple_too_many_edges() {
        let mut rng = StdRng::seed_from_u64(3);
        assert_eq!(
            simple(5, 11, &mut rng).unwrap_err(),
            GraphError::TooManyEdges {
                requested: 11,
                max: 10
            }
        );
        assert!(simple(1, 1, &mut rng).is_err());
        assert_eq!(simple(0, 0, &mut rng).unwrap().vertex_count(), 0);
        assert!(simple_digraph(3, 7, &mut rng).is_err());
    }

    #[test]
    fn test_simple_digraph() {
        let mut rng = StdRng::seed_from_u64(4);
        let d = simple_digraph(10, 90, &mut rng).unwrap();
        assert_eq!(d.edge_count(), 90);
        assert!((0..10).all(|v| d.outdegree(v).unwrap() == 9 && d.indegree(v).unwrap() == 9));
    }

    #[test]
    fn test_bipartite_edges_cross() {
        let mut rng = StdRng::seed_from_u64(5);
        let g = bipartite(4, 7, 20, &mut rng).unwrap();
        assert_eq!(g.vertex_count(), 11);
        assert_eq!(g.edge_count(), 20);
        assert_simple(&g);
        for (a, b) in g.edges() {
            assert!(a < 4 && b >= 4);
        }
        assert!(bipartite(2, 2, 5, &mut rng).is_err());
    }

    #[test]
    fn test_eulerian_cycle_balanced_and_connected() {
        let mut rng = StdRng::seed_from_u64(6);
        let d = eulerian_cycle(30, 100, &mut rng).unwrap();
        assert_eq!(d.edge_count(), 100);
        assert!(unbalanced(&d).is_empty());
        assert!(reference::has_eulerian_cycle(&d));
    }

    #[test]
    fn test_eulerian_cycle_parameters() {
        let mut rng = StdRng::seed_from_u64(7);
        assert!(matches!(
            eulerian_cycle(0, 3, &mut rng),
            Err(GraphError::InvalidParameter(_))
        ));
        assert!(eulerian_cycle(3, 0, &mut rng).is_err());
        assert!(eulerian_path(1, 3, &mut rng).is_err());
        assert!(eulerian_path(3, 0, &mut rng).is_err());
    }

    #[test]
    fn test_eulerian_path_two_endpoints() {
        let mut rng = StdRng::seed_from_u64(8);
        let d = eulerian_path(2, 1, &mut rng).unwrap();
        assert_eq!(unbalanced(&d).len(), 2);

        let d = eulerian_path(15, 80, &mut rng).unwrap();
        let gaps = unbalanced(&d);
        assert_eq!(gaps.len(), 2);
        assert!(gaps.iter().any(|&(_, g)| g == 1));
        assert!(gaps.iter().any(|&(_, g)| g == -1));
        assert!(reference::has_eulerian_path(&d));
        assert!(!reference::has_eulerian_cycle(&d));
    }

    #[test]
    fn test_path_and_cycle_shapes() {
        let mut rng = StdRng::seed_from_u64(9);
        let p = path(8, &mut rng).unwrap();
        assert_eq!(p.edge_count(), 7);
        let ends = (0..8).filter(|&v| p.degree(v).unwrap() == 1).count();
        assert_eq!(ends, 2);

        let c = cycle(8, &mut rng).unwrap();
        assert_eq!(c.edge_count(), 8);
        assert!((0..8).all(|v| c.degree(v).unwrap() == 2));
        assert_eq!(cycle(1, &mut rng).unwrap().adj(0).unwrap(), &[0, 0]);
        assert!(cycle(0, &mut rng).is_err());
        assert_eq!(path(0, &mut rng).unwrap().edge_count(), 0);
    }

    #[test]
    fn test_directed_cycle() {
        let mut rng = StdRng::seed_from_u64(10);
        let d = directed_cycle(12, &mut rng).unwrap();
        assert_eq!(d.edge_count(), 12);
        assert!((0..12).all(|v| d.neighbors(v).len() == 1));
        assert!(reference::has_eulerian_cycle(&d));
    }

    #[test]
    fn test_complete() {
        let g = complete(5).unwrap();
        assert_eq!(g.edge_count(), 10);
        assert_simple(&g);
        assert_eq!(complete(0).unwrap().edge_count(), 0);
    }

    #[test]
    fn test_same_seed_same_graph() {
        let a = eulerian_cycle(50, 200, &mut StdRng::seed_from_u64(99)).unwrap();
        let b = eulerian_cycle(50, 200, &mut StdRng::seed_from_u64(99)).unwrap();
        assert_eq!(a, b);
        let a = simple(40, 100, &mut StdRng::seed_from_u64(5)).unwrap();
        let b = simple(40, 100, &mut StdRng::seed_from_u64(5)).unwrap();
        assert_eq!(a, b);
    }

    proptest! {
        #[test]
        fn prop_eulerian_generators_exact(v in 2usize..40, e in 1usize..120, seed in any::<u64>()) {
            let mut rng = StdRng::seed_from_u64(seed);

            let d = eulerian_cycle(v, e, &mut rng).unwrap();
            prop_assert_eq!(d.edge_count(), e);
            prop_assert!(unbalanced(&d).is_empty());
            prop_assert!(reference::has_eulerian_cycle(&d));

            let d = eulerian_path(v, e, &mut rng).unwrap();
            prop_assert_eq!(d.edge_count(), e);
            let mut gaps: Vec<isize> = unbalanced(&d).into_iter().map(|(_, g)| g).collect();
            gaps.sort_unstable();
            prop_assert_eq!(gaps, vec![-1, 1]);
            prop_assert!(reference::has_eulerian_path(&d));
        }

        #[test]
        fn prop_simple_exact(v in 0usize..30, fill in 0.0f64..=1.0, seed in any::<u64>()) {
            let max = v * v.saturating_sub(1) / 2;
            let e = (max as f64 * fill) as usize;
            let g = simple(v, e, &mut StdRng::seed_from_u64(seed)).unwrap();
            prop_assert_eq!(g.edge_count(), e);
            let mut seen = HashSet::new();
            for (a, b) in g.edges() {
                prop_assert!(a != b);
                prop_assert!(seen.insert((a, b)));
            }
        }
    }
}
