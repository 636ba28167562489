use std::collections::VecDeque;

use crate::error::{GraphError, Result};
use crate::graph::{Adjacency, Vertex};

/// Shortest hop-count paths from one or more sources.
///
/// Works over anything implementing [`Adjacency`], so the same engine walks
/// undirected graphs and digraphs (following edge direction for the latter).
/// Everything is computed in the constructor; the result is read-only.
///
/// Stores parent pointers instead of whole paths. Paths are reconstructed on
/// demand by walking the pointers back to a source.
#[derive(Debug, Clone)]
pub struct BreadthFirstPaths {
    marked: Vec<bool>,
    edge_to: Vec<Vertex>,
    dist_to: Vec<Option<usize>>,
}

impl BreadthFirstPaths {
    /// BFS from a single source.
    pub fn new<G: Adjacency + ?Sized>(graph: &G, source: Vertex) -> Result<Self> {
        Self::from_sources(graph, [source])
    }

    /// BFS seeded with every source at distance 0 simultaneously.
    ///
    /// When two sources are equally near a vertex, the one whose wave
    /// discovers it first wins; nothing further is promised.
    pub fn from_sources<G, I>(graph: &G, sources: I) -> Result<Self>
    where
        G: Adjacency + ?Sized,
        I: IntoIterator<Item = Vertex>,
    {
        let n = graph.vertex_count();
        let mut marked = vec![false; n];
        let mut edge_to: Vec<Vertex> = (0..n).collect();
        let mut dist_to: Vec<Option<usize>> = vec![None; n];
        let mut queue: VecDeque<Vertex> = VecDeque::new();

        for s in sources {
            if s >= n {
                return Err(GraphError::VertexOutOfRange {
                    vertex: s,
                    vertex_count: n,
                });
            }
            if !marked[s] {
                marked[s] = true;
                dist_to[s] = Some(0);
                queue.push_back(s);
            }
        }

        if queue.is_empty() {
            return Err(GraphError::EmptySourceSet);
        }

        while let Some(v) = queue.pop_front() {
            let next = dist_to[v].map(|d| d + 1);
            for &w in graph.neighbors(v) {
                if !marked[w] {
                    marked[w] = true;
                    edge_to[w] = v;
                    dist_to[w] = next;
                    queue.push_back(w);
                }
            }
        }

        let paths = Self {
            marked,
            edge_to,
            dist_to,
        };
        debug_assert!(paths.check(graph), "BFS optimality conditions violated");
        Ok(paths)
    }

    /// Whether some source reaches `v`. Out-of-range vertices are unreachable.
    pub fn has_path_to(&self, v: Vertex) -> bool {
        self.marked.get(v).copied().unwrap_or(false)
    }

    /// Hop count from the nearest source, `None` if unreachable.
    pub fn dist_to(&self, v: Vertex) -> Option<usize> {
        self.dist_to.get(v).copied().flatten()
    }

    /// One shortest path, listed from its source to `v`.
    pub fn path_to(&self, v: Vertex) -> Option<Vec<Vertex>> {
        let dist = self.dist_to(v)?;
        let mut path = Vec::with_capacity(dist + 1);
        let mut current = v;

        // Sources are the only vertices at distance 0.
        while self.dist_to[current] != Some(0) {
            path.push(current);
            current = self.edge_to[current];
        }
        path.push(current);

        path.reverse();
        Some(path)
    }

    /// Number of vertices reached, sources included.
    pub fn reached(&self) -> usize {
        self.marked.iter().filter(|&&m| m).count()
    }

    /// Largest finite distance, i.e. the depth of the BFS forest.
    pub fn max_depth(&self) -> Option<usize> {
        self.dist_to.iter().flatten().copied().max()
    }

    /// Shortest-path optimality conditions: every edge out of a reached
    /// vertex leads to a reached vertex at most one level deeper, and every
    /// parent pointer is a real edge one level up. Linear in V + E.
    fn check<G: Adjacency + ?Sized>(&self, graph: &G) -> bool {
        let n = graph.vertex_count();
        let mut parent_ok = vec![false; n];
        for v in 0..n {
            let Some(dv) = self.dist_to[v] else {
                continue;
            };
            for &w in graph.neighbors(v) {
                match self.dist_to[w] {
                    Some(dw) if dw <= dv + 1 => {
                        if self.edge_to[w] == v && dw == dv + 1 {
                            parent_ok[w] = true;
                        }
                    }
                    _ => return false,
                }
            }
        }
        (0..n).all(|v| match self.dist_to[v] {
            Some(0) | None => true,
            Some(_) => parent_ok[v],
        })
    }
}
