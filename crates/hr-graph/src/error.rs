//! Graph-subsystem error type.

use thiserror::Error;

use hr_core::{EdgeId, VertexId};

/// Errors produced by `hr-graph`.
#[derive(Debug, Error)]
pub enum GraphError {
    #[error("vertex {0} not found in graph")]
    VertexNotFound(VertexId),

    #[error("route edge {edge} references missing vertex {vertex}")]
    DanglingEdge { edge: EdgeId, vertex: VertexId },

    #[error("restriction group references unknown edge {0}")]
    UnknownEdge(EdgeId),
}

pub type GraphResult<T> = Result<T, GraphError>;
