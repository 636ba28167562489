use std::collections::HashMap;

use tracing::debug;

use crate::error::{GraphError, Result};
use crate::graph::{Digraph, EdgeSink, Graph, Vertex};

/// A graph whose vertices carry string names.
///
/// Built from delimited records: the first token of each record names a
/// vertex, every further token names a neighbor, and one edge is added from
/// the first to each of the others. Names get dense ids in the order they are
/// first seen across all records. Empty records are skipped; empty tokens
/// between adjacent delimiters are ordinary names.
///
/// Reading the records is left to the caller: pass anything that yields
/// lines, e.g. `BufRead::lines()` after error handling.
#[derive(Debug, Clone)]
pub struct SymbolGraph<G> {
    index: HashMap<String, Vertex>,
    names: Vec<String>,
    graph: G,
}

pub type SymbolUndirected = SymbolGraph<Graph>;
pub type SymbolDigraph = SymbolGraph<Digraph>;

impl<G: EdgeSink> SymbolGraph<G> {
    pub fn new<I, S>(lines: I, delimiter: &str) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        if delimiter.is_empty() {
            return Err(GraphError::InvalidParameter("delimiter must not be empty"));
        }

        let records: Vec<S> = lines
            .into_iter()
            .filter(|line| !line.as_ref().is_empty())
            .collect();

        // First pass: assign ids.
        let mut index: HashMap<String, Vertex> = HashMap::new();
        let mut names: Vec<String> = Vec::new();
        for record in &records {
            for name in record.as_ref().split(delimiter) {
                if !index.contains_key(name) {
                    index.insert(name.to_string(), names.len());
                    names.push(name.to_string());
                }
            }
        }

        // Second pass: connect each record's head to the rest of it.
        let mut graph = G::with_vertices(names.len());
        let mut edges = 0usize;
        for record in &records {
            let mut tokens = record.as_ref().split(delimiter);
            let Some(head) = tokens.next() else {
                continue;
            };
            let v = index[head];
            for name in tokens {
                graph.add_edge(v, index[name])?;
                edges += 1;
            }
        }

        debug!(records = records.len(), names = names.len(), edges, "symbol graph built");

        Ok(Self {
            index,
            names,
            graph,
        })
    }
}

impl<G> SymbolGraph<G> {
    /// Id of `name`, or `None` if it never appeared.
    pub fn index(&self, name: &str) -> Option<Vertex> {
        self.index.get(name).copied()
    }

    /// Name of vertex `id`, or `None` outside `0..len()`.
    pub fn name(&self, id: Vertex) -> Option<&str> {
        self.names.get(id).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Names in id order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn graph(&self) -> &G {
        &self.graph
    }

    pub fn into_graph(self) -> G {
        self.graph
    }
}
