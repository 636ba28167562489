use thiserror::Error;

use crate::graph::Vertex;

/// Failures raised by graph construction and the generators.
///
/// "Nothing found" outcomes (unreachable vertex, unknown name, no Eulerian
/// trail) are not errors; those are reported as `Option`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    /// A vertex index outside `[0, V)` was passed to a storage operation.
    #[error("vertex {vertex} out of range for a graph with {vertex_count} vertices")]
    VertexOutOfRange { vertex: Vertex, vertex_count: usize },

    /// A traversal was asked to start from no vertices at all.
    #[error("traversal needs at least one source vertex")]
    EmptySourceSet,

    /// A generator was asked for more edges than the requested shape can hold.
    #[error("too many edges: requested {requested}, at most {max} fit")]
    TooManyEdges { requested: usize, max: usize },

    /// A generator precondition on its size parameters was not met.
    #[error("invalid parameter: {0}")]
    InvalidParameter(&'static str),
}

pub type Result<T> = std::result::Result<T, GraphError>;
