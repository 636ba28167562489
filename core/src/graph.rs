use std::fmt;

use crate::error::{GraphError, Result};

/// Dense vertex identifier: vertices of a graph with `V` vertices are `0..V`.
pub type Vertex = usize;

/// Read side of a graph, the part traversal needs.
///
/// `neighbors` does not validate its argument and panics on an index outside
/// `0..vertex_count()`. Callers validate once at their entry point.
pub trait Adjacency {
    fn vertex_count(&self) -> usize;

    fn neighbors(&self, v: Vertex) -> &[Vertex];
}

/// Build side of a graph, so loaders can produce either [`Graph`] or [`Digraph`].
pub trait EdgeSink: Sized {
    fn with_vertices(vertex_count: usize) -> Self;

    fn add_edge(&mut self, v: Vertex, w: Vertex) -> Result<()>;
}

fn check_vertex(v: Vertex, vertex_count: usize) -> Result<()> {
    if v < vertex_count {
        Ok(())
    } else {
        Err(GraphError::VertexOutOfRange {
            vertex: v,
            vertex_count,
        })
    }
}

/// Undirected multigraph over dense vertex ids.
///
/// Adjacency lists keep insertion order (oldest edge first) and keep
/// duplicates: a parallel edge appears once per copy, and a self-loop on `v`
/// appears twice in `v`'s own list, so it counts 2 toward `degree(v)`.
/// Append-only: edges and vertices are never removed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Graph {
    adj: Vec<Vec<Vertex>>,
    edge_count: usize,
}

impl Graph {
    pub fn new(vertex_count: usize) -> Self {
        Self {
            adj: vec![Vec::new(); vertex_count],
            edge_count: 0,
        }
    }

    /// Pre-allocate adjacency lists for a known edge count.
    pub fn with_capacity(vertex_count: usize, edge_count: usize) -> Self {
        let per_vertex = if vertex_count == 0 {
            0
        } else {
            2 * edge_count / vertex_count
        };
        Self {
            adj: (0..vertex_count)
                .map(|_| Vec::with_capacity(per_vertex))
                .collect(),
            edge_count: 0,
        }
    }

    /// Build from an edge list, failing on the first out-of-range endpoint.
    pub fn from_edges<I>(vertex_count: usize, edges: I) -> Result<Self>
    where
        I: IntoIterator<Item = (Vertex, Vertex)>,
    {
        let mut graph = Self::new(vertex_count);
        for (v, w) in edges {
            graph.add_edge(v, w)?;
        }
        Ok(graph)
    }

    pub fn vertex_count(&self) -> usize {
        self.adj.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Add the undirected edge v-w. Parallel edges and self-loops are allowed.
    pub fn add_edge(&mut self, v: Vertex, w: Vertex) -> Result<()> {
        check_vertex(v, self.adj.len())?;
        check_vertex(w, self.adj.len())?;
        self.adj[v].push(w);
        self.adj[w].push(v);
        self.edge_count += 1;
        Ok(())
    }

    /// Neighbors of `v`, oldest edge first.
    pub fn adj(&self, v: Vertex) -> Result<&[Vertex]> {
        check_vertex(v, self.adj.len())?;
        Ok(&self.adj[v])
    }

    pub fn degree(&self, v: Vertex) -> Result<usize> {
        check_vertex(v, self.adj.len())?;
        Ok(self.adj[v].len())
    }

    /// Every edge exactly once as `(v, w)` with `v <= w`, grouped by `v`.
    pub fn edges(&self) -> impl Iterator<Item = (Vertex, Vertex)> + '_ {
        self.adj.iter().enumerate().flat_map(|(v, neighbors)| {
            // A self-loop sits twice in its own list; report every other copy.
            let mut loop_seen = false;
            neighbors.iter().filter_map(move |&w| {
                if w > v {
                    Some((v, w))
                } else if w == v {
                    loop_seen = !loop_seen;
                    loop_seen.then_some((v, v))
                } else {
                    None
                }
            })
        })
    }

    /// Approximate memory usage in bytes.
    pub fn memory_usage(&self) -> usize {
        use std::mem::size_of;

        let lists = self.adj.len() * size_of::<Vec<Vertex>>();
        let entries: usize = self.adj.iter().map(|l| l.capacity() * size_of::<Vertex>()).sum();
        lists + entries
    }
}

impl Adjacency for Graph {
    fn vertex_count(&self) -> usize {
        self.adj.len()
    }

    fn neighbors(&self, v: Vertex) -> &[Vertex] {
        &self.adj[v]
    }
}

impl EdgeSink for Graph {
    fn with_vertices(vertex_count: usize) -> Self {
        Self::new(vertex_count)
    }

    fn add_edge(&mut self, v: Vertex, w: Vertex) -> Result<()> {
        Graph::add_edge(self, v, w)
    }
}

/// Directed multigraph over dense vertex ids.
///
/// Edge v->w is stored once, in `v`'s list. Lists keep insertion order and
/// duplicates. Out-degree is the list length; in-degree is cached per vertex.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Digraph {
    adj: Vec<Vec<Vertex>>,
    indegree: Vec<usize>,
    edge_count: usize,
}

impl Digraph {
    pub fn new(vertex_count: usize) -> Self {
        Self {
            adj: vec![Vec::new(); vertex_count],
            indegree: vec![0; vertex_count],
            edge_count: 0,
        }
    }

    pub fn with_capacity(vertex_count: usize, edge_count: usize) -> Self {
        let per_vertex = if vertex_count == 0 {
            0
        } else {
            edge_count / vertex_count
        };
        Self {
            adj: (0..vertex_count)
                .map(|_| Vec::with_capacity(per_vertex))
                .collect(),
            indegree: vec![0; vertex_count],
            edge_count: 0,
        }
    }

    pub fn from_edges<I>(vertex_count: usize, edges: I) -> Result<Self>
    where
        I: IntoIterator<Item = (Vertex, Vertex)>,
    {
        let mut digraph = Self::new(vertex_count);
        for (v, w) in edges {
            digraph.add_edge(v, w)?;
        }
        Ok(digraph)
    }

    pub fn vertex_count(&self) -> usize {
        self.adj.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Add the directed edge v->w.
    pub fn add_edge(&mut self, v: Vertex, w: Vertex) -> Result<()> {
        check_vertex(v, self.adj.len())?;
        check_vertex(w, self.adj.len())?;
        self.adj[v].push(w);
        self.indegree[w] += 1;
        self.edge_count += 1;
        Ok(())
    }

    /// Heads of the edges leaving `v`, oldest edge first.
    pub fn adj(&self, v: Vertex) -> Result<&[Vertex]> {
        check_vertex(v, self.adj.len())?;
        Ok(&self.adj[v])
    }

    pub fn outdegree(&self, v: Vertex) -> Result<usize> {
        check_vertex(v, self.adj.len())?;
        Ok(self.adj[v].len())
    }

    pub fn indegree(&self, v: Vertex) -> Result<usize> {
        check_vertex(v, self.adj.len())?;
        Ok(self.indegree[v])
    }

    /// Every edge as `(tail, head)`, grouped by tail in vertex order.
    pub fn edges(&self) -> impl Iterator<Item = (Vertex, Vertex)> + '_ {
        self.adj
            .iter()
            .enumerate()
            .flat_map(|(v, heads)| heads.iter().map(move |&w| (v, w)))
    }

    /// The same digraph with every edge pointing the other way.
    pub fn reverse(&self) -> Digraph {
        let mut reversed = Digraph::with_capacity(self.vertex_count(), self.edge_count);
        for (v, w) in self.edges() {
            reversed.adj[w].push(v);
            reversed.indegree[v] += 1;
            reversed.edge_count += 1;
        }
        reversed
    }

    /// Approximate memory usage in bytes.
    pub fn memory_usage(&self) -> usize {
        use std::mem::size_of;

        let lists = self.adj.len() * (size_of::<Vec<Vertex>>() + size_of::<usize>());
        let entries: usize = self.adj.iter().map(|l| l.capacity() * size_of::<Vertex>()).sum();
        lists + entries
    }

    pub(crate) fn indegree_unchecked(&self, v: Vertex) -> usize {
        self.indegree[v]
    }
}

impl Adjacency for Digraph {
    fn vertex_count(&self) -> usize {
        self.adj.len()
    }

    fn neighbors(&self, v: Vertex) -> &[Vertex] {
        &self.adj[v]
    }
}

impl EdgeSink for Digraph {
    fn with_vertices(vertex_count: usize) -> Self {
        Self::new(vertex_count)
    }

    fn add_edge(&mut self, v: Vertex, w: Vertex) -> Result<()> {
        Digraph::add_edge(self, v, w)
    }
}

fn write_adjacency(f: &mut fmt::Formatter<'_>, adj: &[Vec<Vertex>], edge_count: usize) -> fmt::Result {
    writeln!(f, "{} vertices, {} edges", adj.len(), edge_count)?;
    for (v, neighbors) in adj.iter().enumerate() {
        write!(f, "{}:", v)?;
        for w in neighbors {
            write!(f, " {}", w)?;
        }
        writeln!(f)?;
    }
    Ok(())
}

impl fmt::Display for Graph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_adjacency(f, &self.adj, self.edge_count)
    }
}

impl fmt::Display for Digraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_adjacency(f, &self.adj, self.edge_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_edge_out_of_range() {
        let mut g = Graph::new(3);
        assert_eq!(
            g.add_edge(0, 3),
            Err(GraphError::VertexOutOfRange {
                vertex: 3,
                vertex_count: 3
            })
        );
        assert_eq!(g.edge_count(), 0);
        assert!(g.adj(0).unwrap().is_empty());

        let mut d = Digraph::new(2);
        assert!(d.add_edge(5, 0).is_err());
        assert!(d.outdegree(2).is_err());
        assert!(d.indegree(2).is_err());
    }

    #[test]
    fn test_empty_graph() {
        let g = Graph::new(0);
        assert_eq!(g.vertex_count(), 0);
        assert!(g.adj(0).is_err());
        assert_eq!(g.edges().count(), 0);
    }

    #[test]
    fn test_self_loop_counts_twice() {
        let mut g = Graph::new(2);
        g.add_edge(1, 1).unwrap();
        assert_eq!(g.degree(1).unwrap(), 2);
        assert_eq!(g.adj(1).unwrap(), &[1, 1]);
        assert_eq!(g.edges().collect::<Vec<_>>(), vec![(1, 1)]);
    }

    #[test]
    fn test_edges_streams_loops_once_each() {
        let g = Graph::from_edges(3, vec![(1, 1), (2, 0), (1, 1), (1, 2)]).unwrap();
        assert_eq!(
            g.edges().collect::<Vec<_>>(),
            vec![(0, 2), (1, 1), (1, 1), (1, 2)]
        );
    }

    #[test]
    fn test_parallel_edges_kept() {
        let g = Graph::from_edges(2, vec![(0, 1), (1, 0), (0, 1)]).unwrap();
        assert_eq!(g.edge_count(), 3);
        assert_eq!(g.degree(0).unwrap(), 3);
        assert_eq!(g.edges().collect::<Vec<_>>(), vec![(0, 1), (0, 1), (0, 1)]);
    }

    #[test]
    fn test_adj_insertion_order() {
        let g = Graph::from_edges(4, vec![(0, 3), (0, 1), (2, 0)]).unwrap();
        assert_eq!(g.adj(0).unwrap(), &[3, 1, 2]);
    }

    #[test]
    fn test_degree_sum_is_twice_edges() {
        let g = Graph::from_edges(
            5,
            vec![(0, 1), (1, 3), (3, 2), (2, 1), (2, 4), (4, 4)],
        )
        .unwrap();
        let total: usize = (0..5).map(|v| g.degree(v).unwrap()).sum();
        assert_eq!(total, 2 * g.edge_count());
        assert_eq!(g.edges().count(), g.edge_count());
    }

    #[test]
    fn test_digraph_degrees() {
        let d = Digraph::from_edges(3, vec![(0, 1), (0, 2), (2, 0), (1, 1)]).unwrap();
        assert_eq!(d.outdegree(0).unwrap(), 2);
        assert_eq!(d.indegree(0).unwrap(), 1);
        assert_eq!(d.outdegree(1).unwrap(), 1);
        assert_eq!(d.indegree(1).unwrap(), 2);
        let out: usize = (0..3).map(|v| d.outdegree(v).unwrap()).sum();
        let inc: usize = (0..3).map(|v| d.indegree(v).unwrap()).sum();
        assert_eq!(out, d.edge_count());
        assert_eq!(inc, d.edge_count());
    }

    #[test]
    fn test_reverse() {
        let d = Digraph::from_edges(3, vec![(0, 1), (0, 2), (1, 2)]).unwrap();
        let r = d.reverse();
        assert_eq!(r.edge_count(), 3);
        for v in 0..3 {
            assert_eq!(r.outdegree(v).unwrap(), d.indegree(v).unwrap());
            assert_eq!(r.indegree(v).unwrap(), d.outdegree(v).unwrap());
        }
        assert_eq!(r.adj(2).unwrap(), &[0, 1]);
        assert_eq!(r.reverse(), d);
    }

    #[test]
    fn test_display() {
        let d = Digraph::from_edges(3, vec![(0, 1), (0, 2), (2, 0)]).unwrap();
        assert_eq!(d.to_string(), "3 vertices, 3 edges\n0: 1 2\n1:\n2: 0\n");
    }

    #[test]
    fn test_memory_usage_nonzero() {
        let g = Graph::from_edges(3, vec![(0, 1), (1, 2)]).unwrap();
        assert!(g.memory_usage() > 0);
        let d = Digraph::with_capacity(10, 100);
        assert!(d.memory_usage() > 0);
    }

    #[test]
    fn test_edge_sink_builds_both_kinds() {
        fn build<G: EdgeSink>() -> G {
            let mut g = G::with_vertices(2);
            EdgeSink::add_edge(&mut g, 0, 1).unwrap();
            g
        }
        let g: Graph = build();
        let d: Digraph = build();
        assert_eq!(g.neighbors(1), &[0]);
        assert!(d.neighbors(1).is_empty());
    }
}
