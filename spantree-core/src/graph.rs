//! Undirected weighted graphs, plus [GraphBuilder] to construct them.
use std::fmt;
use thiserror::Error;

/// Integer weight of an [Edge], and of spanning trees built from edges.
pub type Weight = i64;

/// Identifier of a vertex in a [Graph].
///
/// Vertex identifiers are 1-based: a graph with `n` vertices uses the
/// identifiers `1..=n`. The identifier carries no display encoding; rendering
/// it (e.g. as a letter) is up to the caller.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VertexId(usize);

impl VertexId {
    /// Wraps a 1-based vertex identifier. Range checking against a particular
    /// graph happens in [GraphBuilder::add_edge].
    pub const fn new(id: usize) -> Self {
        Self(id)
    }

    /// The 1-based identifier.
    pub const fn get(self) -> usize {
        self.0
    }

    /// 0-based position of the vertex, for indexing per-vertex arrays.
    ///
    /// # Panics
    ///
    /// If the identifier is 0, which no graph ever contains.
    pub(crate) fn index(self) -> usize {
        self.0 - 1
    }

    pub(crate) fn from_index(index: usize) -> Self {
        Self(index + 1)
    }
}

impl From<usize> for VertexId {
    fn from(id: usize) -> Self {
        Self::new(id)
    }
}

impl fmt::Debug for VertexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}

impl fmt::Display for VertexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A weighted connection between two vertices. Immutable once created.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Edge {
    origin: VertexId,
    dest: VertexId,
    weight: Weight,
}

impl Edge {
    /// Creates an edge. Nothing is validated until the edge is added to a
    /// [GraphBuilder].
    pub fn new(origin: impl Into<VertexId>, dest: impl Into<VertexId>, weight: Weight) -> Self {
        Self {
            origin: origin.into(),
            dest: dest.into(),
            weight,
        }
    }

    /// The vertex the edge was declared from.
    pub fn origin(&self) -> VertexId {
        self.origin
    }

    /// The vertex the edge was declared to.
    pub fn dest(&self) -> VertexId {
        self.dest
    }

    /// The weight of the edge.
    pub fn weight(&self) -> Weight {
        self.weight
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}--{}--{}", self.origin, self.weight, self.dest)
    }
}

/// An entry in a vertex's adjacency list: the vertex at the other end of an
/// edge, and the weight of that edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Neighbor {
    /// The adjacent vertex.
    pub vertex: VertexId,
    /// Weight of the connecting edge.
    pub weight: Weight,
}

/// An undirected weighted graph over the vertices `1..=vertex_count`.
///
/// The graph keeps both representations the spanning tree algorithms want:
/// the flat edge list in declaration order, and per-vertex adjacency lists in
/// which every edge appears once for each endpoint. Parallel edges are kept
/// as given.
///
/// This type is immutable. The [`GraphBuilder`] can be used to construct new
/// instances, and guarantees every edge has endpoints in range and is not a
/// self-loop.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Graph {
    edges: Vec<Edge>,
    adjacency: Vec<Vec<Neighbor>>,
}

impl Graph {
    /// Number of vertices `V`.
    pub fn vertex_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Number of edges `E`, counting parallel edges separately.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Iterator over the vertex identifiers `1..=V`.
    pub fn vertices(&self) -> impl Iterator<Item = VertexId> {
        (1..=self.vertex_count()).map(VertexId::new)
    }

    /// The edges in the order they were added.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Iterator over the neighbours of a vertex, in the order the connecting
    /// edges were added. An empty iterator is returned when there is no
    /// vertex with the given identifier.
    pub fn neighbors(&self, vertex: VertexId) -> impl Iterator<Item = &Neighbor> + '_ {
        vertex
            .get()
            .checked_sub(1)
            .and_then(|index| self.adjacency.get(index))
            .into_iter()
            .flatten()
    }

    /// Whether `vertex` is one of this graph's vertices.
    pub fn contains(&self, vertex: VertexId) -> bool {
        (1..=self.vertex_count()).contains(&vertex.get())
    }
}

/// Graph builder to construct [`Graph`] instances.
#[derive(Debug)]
pub struct GraphBuilder {
    graph: Graph,
}

impl GraphBuilder {
    /// Creates a builder for a graph with `vertex_count` vertices and no edges.
    pub fn new(vertex_count: usize) -> Self {
        Self::with_capacity(vertex_count, 0)
    }

    /// Like [GraphBuilder::new], reserving room for `edge_count` edges.
    pub fn with_capacity(vertex_count: usize, edge_count: usize) -> Self {
        GraphBuilder {
            graph: Graph {
                edges: Vec::with_capacity(edge_count),
                adjacency: vec![Vec::new(); vertex_count],
            },
        }
    }

    /// Add a new undirected edge to the graph.
    ///
    /// # Errors
    ///
    /// * Either endpoint lies outside `1..=V`.
    /// * Both endpoints are the same vertex.
    pub fn add_edge(&mut self, edge: Edge) -> Result<(), GraphBuilderError> {
        for vertex in [edge.origin, edge.dest] {
            if !self.graph.contains(vertex) {
                return Err(GraphBuilderError::VertexOutOfRange {
                    edge,
                    vertex,
                    vertex_count: self.graph.vertex_count(),
                });
            }
        }
        if edge.origin == edge.dest {
            return Err(GraphBuilderError::SelfLoop(edge));
        }

        self.graph.adjacency[edge.origin.index()].push(Neighbor {
            vertex: edge.dest,
            weight: edge.weight,
        });
        self.graph.adjacency[edge.dest.index()].push(Neighbor {
            vertex: edge.origin,
            weight: edge.weight,
        });
        self.graph.edges.push(edge);

        Ok(())
    }

    /// Adds every edge of `edges`, stopping at the first invalid one.
    pub fn add_edges(
        &mut self,
        edges: impl IntoIterator<Item = Edge>,
    ) -> Result<(), GraphBuilderError> {
        edges.into_iter().try_for_each(|edge| self.add_edge(edge))
    }

    /// Construct the finished graph.
    pub fn build(self) -> Graph {
        self.graph
    }
}

/// Error in building a graph with a [GraphBuilder]. Every variant describes an
/// invalid edge.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphBuilderError {
    /// An endpoint of the edge is not one of the graph's vertices.
    #[error("edge {edge} references vertex {vertex}, outside 1..={vertex_count}")]
    VertexOutOfRange {
        /// The rejected edge.
        edge: Edge,
        /// The offending endpoint.
        vertex: VertexId,
        /// Number of vertices of the graph being built.
        vertex_count: usize,
    },
    /// The edge connects a vertex to itself.
    #[error("edge {0} is a self-loop")]
    SelfLoop(Edge),
}

impl GraphBuilderError {
    /// The edge that was rejected.
    pub fn edge(&self) -> Edge {
        match self {
            GraphBuilderError::VertexOutOfRange { edge, .. } => *edge,
            GraphBuilderError::SelfLoop(edge) => *edge,
        }
    }
}
