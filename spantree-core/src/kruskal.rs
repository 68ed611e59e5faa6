//! Kruskal's minimum spanning tree algorithm: take edges cheapest first and
//! keep those that join two different trees of a [DisjointSet].
use std::cell::Cell;

use tracing::{debug, instrument, trace, warn};

use crate::graph::{Edge, Graph, VertexId, Weight};
use crate::heap::{HeapError, IndexedMinHeap};
use crate::mst::{MstError, MstOutcome};
use crate::union_find::{DisjointSet, Union};

/// Edges accepted by [kruskal], with the partition they induce.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SpanningForest {
    edges: Vec<Edge>,
    total_weight: Weight,
    components: Vec<Vec<VertexId>>,
    partition: DisjointSet,
}

impl SpanningForest {
    /// Accepted edges, in acceptance order. A spanning tree has `V - 1`.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Sum of the weights of the accepted edges.
    pub fn total_weight(&self) -> Weight {
        self.total_weight
    }

    /// Vertex sets of the trees of the forest, each sorted, ordered by their
    /// smallest vertex. A spanning tree has exactly one.
    pub fn components(&self) -> &[Vec<VertexId>] {
        &self.components
    }

    /// The disjoint-set forest left behind by the unions, parent links intact.
    pub fn partition(&self) -> &DisjointSet {
        &self.partition
    }
}

fn edge_heap<'a>(
    graph: &Graph,
    weights: &'a [Cell<Weight>],
) -> Result<IndexedMinHeap<'a, Weight>, HeapError> {
    let mut heap = IndexedMinHeap::new(graph.edge_count(), weights);
    for index in 0..graph.edge_count() {
        heap.insert(index)?;
    }
    Ok(heap)
}

fn edge_weights(graph: &Graph) -> Vec<Cell<Weight>> {
    graph
        .edges()
        .iter()
        .map(|edge| Cell::new(edge.weight()))
        .collect()
}

/// The edge heap [kruskal] starts from, split by tree level, root first.
pub fn edge_heap_levels(graph: &Graph) -> Result<Vec<Vec<Edge>>, MstError> {
    let weights = edge_weights(graph);
    let heap = edge_heap(graph, &weights)?;
    Ok(heap
        .levels()
        .into_iter()
        .map(|level| level.into_iter().map(|index| graph.edges()[index]).collect())
        .collect())
}

/// Computes a minimum spanning tree of `graph` with Kruskal's algorithm.
///
/// Every edge goes into an [IndexedMinHeap] keyed by weight; the cheapest is
/// removed repeatedly and accepted when its endpoints have different roots
/// in the [DisjointSet], which are then merged. The loop stops once `V - 1`
/// edges are accepted, or when the heap runs dry, in which case the graph is
/// disconnected and the accepted edges form a spanning forest.
///
/// Of several parallel edges at most one, the cheapest, is ever accepted.
/// Equal weights are taken in a fixed order, so repeated runs on the same
/// graph accept the same edges.
///
/// # Errors
/// [MstError::WeightOverflow] if the accepted weights do not sum to a
/// [Weight].
///
/// # Complexity
/// `O(E log E)` for the heap plus one find per removed edge. Finds are not
/// compressed and may cost `O(V)` each on degenerate union orders.
#[instrument(skip(graph), fields(vertices = graph.vertex_count(), edges = graph.edge_count()))]
pub fn kruskal(graph: &Graph) -> Result<MstOutcome<SpanningForest>, MstError> {
    let weights = edge_weights(graph);
    let mut heap = edge_heap(graph, &weights)?;
    trace!(levels = ?heap.levels(), "edge heap built");

    let target = graph.vertex_count().saturating_sub(1);
    let mut partition = DisjointSet::new(graph.vertex_count());
    let mut edges = Vec::with_capacity(target);
    let mut total_weight: Weight = 0;

    while edges.len() < target {
        let edge = match heap.remove_min() {
            Ok(index) => graph.edges()[index],
            Err(HeapError::EmptyHeap) => break,
            Err(error) => return Err(error.into()),
        };

        if partition.find(edge.origin()) == partition.find(edge.dest()) {
            debug!(%edge, "edge rejected, endpoints already connected");
            continue;
        }

        let merged = partition.union(edge.origin(), edge.dest());
        debug_assert!(matches!(merged, Union::Merged { .. }));
        total_weight = total_weight
            .checked_add(edge.weight())
            .ok_or(MstError::WeightOverflow {
                total: total_weight,
                weight: edge.weight(),
            })?;
        debug!(%edge, total_weight, "edge accepted");
        edges.push(edge);
    }

    let connected = edges.len() == target;
    let forest = SpanningForest {
        edges,
        total_weight,
        components: partition.sets(),
        partition,
    };

    if connected {
        Ok(MstOutcome::Connected(forest))
    } else {
        warn!(
            components = forest.components.len(),
            accepted = forest.edges.len(),
            "graph is disconnected, returning a spanning forest"
        );
        Ok(MstOutcome::Disconnected(forest))
    }
}
