//! Outcomes and errors shared by the spanning tree algorithms.
use crate::graph::{VertexId, Weight};
use crate::heap::HeapError;
use thiserror::Error;

/// Result of a spanning tree run that completed.
///
/// A disconnected graph is an expected terminal state rather than an error:
/// the algorithm still hands back what it built (a spanning forest for
/// Kruskal, the tree of the start vertex's component for Prim), but tagged so
/// callers cannot mistake it for a spanning tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MstOutcome<T> {
    /// The graph is connected and the value spans every vertex.
    Connected(T),
    /// The graph is disconnected; the value only spans part of it.
    Disconnected(T),
}

impl<T> MstOutcome<T> {
    /// Whether the run produced a spanning tree.
    pub fn is_connected(&self) -> bool {
        matches!(self, MstOutcome::Connected(_))
    }

    /// The value, whichever state it came in.
    pub fn into_inner(self) -> T {
        match self {
            MstOutcome::Connected(value) | MstOutcome::Disconnected(value) => value,
        }
    }

    /// Borrows the value, whichever state it came in.
    pub fn as_inner(&self) -> &T {
        match self {
            MstOutcome::Connected(value) | MstOutcome::Disconnected(value) => value,
        }
    }

    /// The spanning tree, or `None` for a disconnected graph.
    pub fn tree(self) -> Option<T> {
        match self {
            MstOutcome::Connected(value) => Some(value),
            MstOutcome::Disconnected(_) => None,
        }
    }
}

/// Error that aborts a spanning tree run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MstError {
    /// The priority queue rejected an operation, which means it was sized or
    /// driven incorrectly.
    #[error("priority queue failure: {0}")]
    Heap(#[from] HeapError),
    /// The requested start vertex is not in the graph.
    #[error("start vertex {vertex} is outside 1..={vertex_count}")]
    StartVertexOutOfRange {
        /// The requested start vertex.
        vertex: VertexId,
        /// Number of vertices of the graph.
        vertex_count: usize,
    },
    /// The total weight of the tree does not fit in a [Weight].
    #[error("total weight overflows: {total} + {weight}")]
    WeightOverflow {
        /// The running total before the failing addition.
        total: Weight,
        /// The weight of the edge being added.
        weight: Weight,
    },
}
