//! Eulerian trails in directed multigraphs.
//!
//! Both analyzers grow a trail greedily with an explicit stack and one
//! adjacency cursor per vertex (Hierholzer's algorithm without recursion):
//! O(V + E) time, O(V) space beyond the output, and the digraph is only read.
//! Degree balance is checked up front; connectivity falls out of the length
//! of the drained trail, which must use all E edges.
//!
//! [`reference`] holds an independent, slower decision procedure. Debug
//! builds cross-check every result against it.

use tracing::debug;

use crate::graph::{Adjacency, Digraph, Vertex};

pub mod reference;

/// Eulerian cycle of a digraph, if one exists.
#[derive(Debug, Clone)]
pub struct DirectedEulerianCycle {
    cycle: Option<Vec<Vertex>>,
}

impl DirectedEulerianCycle {
    pub fn new(digraph: &Digraph) -> Self {
        let cycle = find_cycle(digraph);

        debug_assert_eq!(
            cycle.is_some(),
            reference::has_eulerian_cycle(digraph),
            "eulerian cycle construction disagrees with reference check"
        );
        debug_assert!(
            cycle.as_deref().map_or(true, |c| c.first() == c.last()
                && reference::is_eulerian_trail(digraph, c)),
            "eulerian cycle does not cover the edge multiset"
        );

        Self { cycle }
    }

    pub fn has_eulerian_cycle(&self) -> bool {
        self.cycle.is_some()
    }

    /// The cycle as E+1 vertices, first equal to last.
    pub fn cycle(&self) -> Option<&[Vertex]> {
        self.cycle.as_deref()
    }
}

/// Eulerian path of a digraph, if one exists.
///
/// A path exists when at most one vertex has one more outgoing than incoming
/// edge, at most one has one fewer, the rest are balanced, and all edges lie
/// in one weakly connected piece. A balanced digraph's Eulerian cycle counts
/// as a path. A digraph with vertices but no edges has the one-vertex path
/// `[0]`.
#[derive(Debug, Clone)]
pub struct DirectedEulerianPath {
    path: Option<Vec<Vertex>>,
}

impl DirectedEulerianPath {
    pub fn new(digraph: &Digraph) -> Self {
        let path = find_path(digraph);

        debug_assert_eq!(
            path.is_some(),
            reference::has_eulerian_path(digraph),
            "eulerian path construction disagrees with reference check"
        );
        debug_assert!(
            path.as_deref()
                .map_or(true, |p| reference::is_eulerian_trail(digraph, p)),
            "eulerian path does not cover the edge multiset"
        );

        Self { path }
    }

    pub fn has_eulerian_path(&self) -> bool {
        self.path.is_some()
    }

    /// The path as E+1 vertices.
    pub fn path(&self) -> Option<&[Vertex]> {
        self.path.as_deref()
    }
}

fn find_cycle(digraph: &Digraph) -> Option<Vec<Vertex>> {
    if digraph.edge_count() == 0 {
        debug!("no edges, no eulerian cycle");
        return None;
    }

    for v in 0..digraph.vertex_count() {
        let outdegree = digraph.neighbors(v).len();
        let indegree = digraph.indegree_unchecked(v);
        if outdegree != indegree {
            debug!(vertex = v, outdegree, indegree, "unbalanced vertex, no eulerian cycle");
            return None;
        }
    }

    let start = first_with_outgoing(digraph)?;
    let trail = drain_trail(digraph, start);

    if trail.len() != digraph.edge_count() + 1 {
        debug!(
            covered = trail.len().saturating_sub(1),
            edges = digraph.edge_count(),
            "edges split across components, no eulerian cycle"
        );
        return None;
    }
    Some(trail)
}

fn find_path(digraph: &Digraph) -> Option<Vec<Vertex>> {
    if digraph.vertex_count() == 0 {
        return None;
    }

    let mut surplus: Option<Vertex> = None;
    let mut deficit: Option<Vertex> = None;
    for v in 0..digraph.vertex_count() {
        let outdegree = digraph.neighbors(v).len();
        let indegree = digraph.indegree_unchecked(v);
        let slot = if outdegree == indegree + 1 {
            &mut surplus
        } else if indegree == outdegree + 1 {
            &mut deficit
        } else if outdegree == indegree {
            continue;
        } else {
            debug!(vertex = v, outdegree, indegree, "degree gap above one, no eulerian path");
            return None;
        };
        if slot.replace(v).is_some() {
            debug!(vertex = v, "second unbalanced endpoint, no eulerian path");
            return None;
        }
    }

    if digraph.edge_count() == 0 {
        return Some(vec![0]);
    }

    let start = match surplus {
        Some(s) => s,
        None => first_with_outgoing(digraph)?,
    };
    let trail = drain_trail(digraph, start);

    if trail.len() != digraph.edge_count() + 1 {
        debug!(
            covered = trail.len().saturating_sub(1),
            edges = digraph.edge_count(),
            "edges split across components, no eulerian path"
        );
        return None;
    }
    Some(trail)
}

fn first_with_outgoing(digraph: &Digraph) -> Option<Vertex> {
    (0..digraph.vertex_count()).find(|&v| !digraph.neighbors(v).is_empty())
}

/// Walk unused edges from `start` until stuck, backing up along the stack and
/// emitting vertices as their edges run out. Returns the trail in walk order.
fn drain_trail(digraph: &Digraph, start: Vertex) -> Vec<Vertex> {
    // cursor[v] = index of the next unused edge in v's adjacency list
    let mut cursor = vec![0usize; digraph.vertex_count()];
    let mut stack: Vec<Vertex> = vec![start];
    let mut trail: Vec<Vertex> = Vec::with_capacity(digraph.edge_count() + 1);

    while let Some(mut v) = stack.pop() {
        loop {
            let heads = digraph.neighbors(v);
            let next = cursor[v];
            if next == heads.len() {
                break;
            }
            cursor[v] = next + 1;
            stack.push(v);
            v = heads[next];
        }
        trail.push(v);
    }

    trail.reverse();
    trail
}
