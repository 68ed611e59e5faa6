//! Prim's minimum spanning tree algorithm: grow a tree from a start vertex,
//! always attaching the outside vertex with the cheapest connecting edge.
use std::cell::Cell;

use tracing::{debug, instrument, warn};

use crate::graph::{Edge, Graph, VertexId, Weight};
use crate::heap::{HeapError, IndexedMinHeap};
use crate::mst::{MstError, MstOutcome};

/// Tentative weight of the cheapest edge joining a vertex to the growing
/// tree. Orders every finite weight before [Distance::Infinite].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Distance {
    /// Reachable through an edge of this weight.
    Finite(Weight),
    /// No edge to the tree seen yet.
    Infinite,
}

/// Tree grown by [prim], as a parent array rooted at the start vertex.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PrimTree {
    start: VertexId,
    parents: Vec<Option<VertexId>>,
    distances: Vec<Distance>,
    total_weight: Weight,
    unreached: Vec<VertexId>,
}

impl PrimTree {
    /// The root of the tree.
    pub fn start(&self) -> VertexId {
        self.start
    }

    /// The vertex `vertex` attaches to. `None` for the root, for unreached
    /// vertices and for identifiers outside the graph.
    pub fn parent(&self, vertex: VertexId) -> Option<VertexId> {
        let index = vertex.get().checked_sub(1)?;
        self.parents.get(index).copied().flatten()
    }

    /// Every vertex `1..=V` with its parent.
    pub fn parents(&self) -> impl Iterator<Item = (VertexId, Option<VertexId>)> + '_ {
        self.parents
            .iter()
            .enumerate()
            .map(|(index, parent)| (VertexId::from_index(index), *parent))
    }

    /// Weight of the edge by which `vertex` was attached; `Finite(0)` for the
    /// root and [Distance::Infinite] for unreached vertices.
    pub fn distance(&self, vertex: VertexId) -> Distance {
        vertex
            .get()
            .checked_sub(1)
            .and_then(|index| self.distances.get(index))
            .copied()
            .unwrap_or(Distance::Infinite)
    }

    /// The tree edges `parent(v) -- v`, in vertex order.
    pub fn edges(&self) -> Vec<Edge> {
        self.parents()
            .filter_map(|(vertex, parent)| match (parent, self.distance(vertex)) {
                (Some(parent), Distance::Finite(weight)) => Some(Edge::new(parent, vertex, weight)),
                _ => None,
            })
            .collect()
    }

    /// Sum of the weights by which the non-root vertices were attached.
    pub fn total_weight(&self) -> Weight {
        self.total_weight
    }

    /// Vertices with no path from the start vertex, in ascending order.
    pub fn unreached(&self) -> &[VertexId] {
        &self.unreached
    }
}

/// Computes a minimum spanning tree of `graph` with Prim's algorithm, rooted
/// at `start`.
///
/// Every vertex carries a [Distance], the weight of its cheapest known edge
/// into the tree. Vertices are kept in an [IndexedMinHeap] keyed by those
/// distances: the closest one is removed and settled, and each unsettled
/// neighbour whose connecting edge beats its current distance gets the new
/// distance and parent, then is inserted or has its key decreased in place.
/// A settled vertex is never relaxed again. The total weight is accumulated
/// as vertices are settled.
///
/// Vertices not connected to `start` keep an infinite distance and are
/// listed in [PrimTree::unreached] of a [MstOutcome::Disconnected] result.
///
/// # Errors
/// [MstError::StartVertexOutOfRange] if `start` is not a vertex of `graph`,
/// [MstError::WeightOverflow] if the tree weight does not fit in a [Weight].
///
/// # Complexity
/// `O(E log V)`.
#[instrument(skip(graph), fields(vertices = graph.vertex_count(), edges = graph.edge_count()))]
pub fn prim(graph: &Graph, start: VertexId) -> Result<MstOutcome<PrimTree>, MstError> {
    if !graph.contains(start) {
        return Err(MstError::StartVertexOutOfRange {
            vertex: start,
            vertex_count: graph.vertex_count(),
        });
    }

    let vertex_count = graph.vertex_count();
    let mut distances = vec![Distance::Infinite; vertex_count];
    let mut parents: Vec<Option<VertexId>> = vec![None; vertex_count];
    let mut settled = vec![false; vertex_count];
    let mut total_weight: Weight = 0;
    distances[start.index()] = Distance::Finite(0);

    {
        let keys = Cell::from_mut(distances.as_mut_slice()).as_slice_of_cells();
        let mut heap = IndexedMinHeap::new(vertex_count, keys);
        heap.insert(start.index())?;

        loop {
            let current = match heap.remove_min() {
                Ok(index) => index,
                Err(HeapError::EmptyHeap) => break,
                Err(error) => return Err(error.into()),
            };
            settled[current] = true;
            let vertex = VertexId::from_index(current);

            if let (Some(parent), Distance::Finite(weight)) = (parents[current], keys[current].get())
            {
                total_weight = total_weight
                    .checked_add(weight)
                    .ok_or(MstError::WeightOverflow {
                        total: total_weight,
                        weight,
                    })?;
                debug!(%vertex, %parent, weight, "vertex settled");
            }

            for neighbor in graph.neighbors(vertex) {
                let next = neighbor.vertex.index();
                let candidate = Distance::Finite(neighbor.weight);
                if settled[next] || candidate >= keys[next].get() {
                    continue;
                }

                keys[next].set(candidate);
                parents[next] = Some(vertex);
                if heap.contains(next) {
                    heap.decrease_key(next)?;
                } else {
                    heap.insert(next)?;
                }
            }
        }
    }

    let unreached: Vec<VertexId> = settled
        .iter()
        .enumerate()
        .filter(|(_, settled)| !**settled)
        .map(|(index, _)| VertexId::from_index(index))
        .collect();

    let tree = PrimTree {
        start,
        parents,
        distances,
        total_weight,
        unreached,
    };

    if tree.unreached.is_empty() {
        Ok(MstOutcome::Connected(tree))
    } else {
        warn!(
            unreached = tree.unreached.len(),
            "graph is disconnected, some vertices were never reached"
        );
        Ok(MstOutcome::Disconnected(tree))
    }
}

#[cfg(test)]
mod tests {
    use super::{prim, Distance, PrimTree};
    use crate::graph::{Edge, Graph, GraphBuilder, GraphBuilderError, VertexId};
    use crate::mst::{MstError, MstOutcome};
    use rstest::{fixture, rstest};
    use std::error::Error;

    fn graph(vertex_count: usize, edges: &[(usize, usize, i64)]) -> Result<Graph, GraphBuilderError> {
        let mut builder = GraphBuilder::with_capacity(vertex_count, edges.len());
        builder.add_edges(edges.iter().map(|&(u, v, w)| Edge::new(u, v, w)))?;
        Ok(builder.build())
    }

    #[fixture]
    fn five_vertices() -> Graph {
        graph(
            5,
            &[(1, 2, 2), (1, 3, 3), (2, 3, 1), (2, 4, 4), (3, 4, 5), (4, 5, 6)],
        )
        .unwrap()
    }

    fn assert_rooted_tree(tree: &PrimTree, vertex_count: usize) {
        let mut non_root = 0;
        for (vertex, parent) in tree.parents() {
            if parent.is_some() {
                non_root += 1;
            }
            let mut current = vertex;
            let mut steps = 0;
            while let Some(parent) = tree.parent(current) {
                current = parent;
                steps += 1;
                assert!(steps < vertex_count, "parent pointers loop");
            }
            assert_eq!(current, tree.start());
        }
        assert_eq!(non_root, vertex_count - 1);
    }

    #[rstest]
    #[case(1)]
    #[case(2)]
    #[case(3)]
    #[case(4)]
    #[case(5)]
    fn test_concrete_tree_from_any_start(
        five_vertices: Graph,
        #[case] start: usize,
    ) -> Result<(), Box<dyn Error>> {
        let tree = prim(&five_vertices, VertexId::new(start))?
            .tree()
            .ok_or("expected a spanning tree")?;

        assert_eq!(tree.total_weight(), 13);
        assert_eq!(tree.start(), VertexId::new(start));
        assert_eq!(tree.parent(VertexId::new(start)), None);
        assert_eq!(tree.distance(VertexId::new(start)), Distance::Finite(0));
        assert_rooted_tree(&tree, 5);

        let mut weights: Vec<i64> = tree.edges().iter().map(|e| e.weight()).collect();
        weights.sort();
        assert_eq!(weights, vec![1, 2, 4, 6]);
        Ok(())
    }

    #[rstest]
    fn test_parent_array(five_vertices: Graph) -> Result<(), Box<dyn Error>> {
        let tree = prim(&five_vertices, VertexId::new(1))?.into_inner();
        let parents: Vec<Option<usize>> = tree
            .parents()
            .map(|(_, parent)| parent.map(VertexId::get))
            .collect();

        assert_eq!(parents, vec![None, Some(1), Some(2), Some(2), Some(4)]);
        Ok(())
    }

    #[test]
    fn test_distance_updated_before_settling_is_counted_once() -> Result<(), Box<dyn Error>> {
        // Vertex 2 is first seen at distance 10, then improved to 2 via 3.
        let g = graph(3, &[(1, 2, 10), (1, 3, 1), (3, 2, 2)])?;
        let tree = prim(&g, VertexId::new(1))?.into_inner();

        assert_eq!(tree.total_weight(), 3);
        assert_eq!(tree.parent(VertexId::new(2)), Some(VertexId::new(3)));
        assert_eq!(tree.distance(VertexId::new(2)), Distance::Finite(2));
        Ok(())
    }

    #[test]
    fn test_settled_vertices_are_not_relaxed() -> Result<(), Box<dyn Error>> {
        let g = graph(3, &[(1, 2, 5), (2, 3, -10), (1, 3, 1)])?;
        let tree = prim(&g, VertexId::new(1))?
            .tree()
            .ok_or("expected a spanning tree")?;

        assert_eq!(tree.total_weight(), -9);
        assert_eq!(tree.parent(VertexId::new(3)), Some(VertexId::new(1)));
        assert_eq!(tree.parent(VertexId::new(2)), Some(VertexId::new(3)));
        Ok(())
    }

    #[test_env_log::test]
    fn test_disconnected_graph_reports_unreached() -> Result<(), Box<dyn Error>> {
        let g = graph(5, &[(1, 2, 7), (3, 4, 1), (4, 5, 2), (3, 5, 9)])?;

        let outcome = prim(&g, VertexId::new(1))?;
        let MstOutcome::Disconnected(tree) = outcome else {
            panic!("expected a partial tree");
        };
        assert_eq!(tree.total_weight(), 7);
        assert_eq!(
            tree.unreached(),
            &[VertexId::new(3), VertexId::new(4), VertexId::new(5)]
        );
        assert_eq!(tree.distance(VertexId::new(4)), Distance::Infinite);
        assert_eq!(tree.parent(VertexId::new(4)), None);

        let from_other_side = prim(&g, VertexId::new(4))?.into_inner();
        assert_eq!(from_other_side.total_weight(), 3);
        assert_eq!(from_other_side.unreached(), &[VertexId::new(1), VertexId::new(2)]);
        Ok(())
    }

    #[rstest]
    #[case(0)]
    #[case(6)]
    fn test_start_out_of_range(five_vertices: Graph, #[case] start: usize) {
        assert_eq!(
            prim(&five_vertices, VertexId::new(start)),
            Err(MstError::StartVertexOutOfRange {
                vertex: VertexId::new(start),
                vertex_count: 5
            })
        );
    }

    #[test]
    fn test_parallel_edges_and_single_vertex() -> Result<(), Box<dyn Error>> {
        let g = graph(2, &[(1, 2, 5), (2, 1, 3), (1, 2, 4)])?;
        let tree = prim(&g, VertexId::new(2))?.into_inner();
        assert_eq!(tree.total_weight(), 3);
        assert_eq!(tree.edges(), vec![Edge::new(2, 1, 3)]);

        let lone = prim(&graph(1, &[])?, VertexId::new(1))?;
        assert!(lone.is_connected());
        assert_eq!(lone.into_inner().total_weight(), 0);
        Ok(())
    }

    #[test]
    fn test_total_weight_overflow_is_an_error() -> Result<(), Box<dyn Error>> {
        let g = graph(3, &[(1, 2, i64::MAX), (2, 3, 1)])?;

        assert_eq!(
            prim(&g, VertexId::new(1)),
            Err(MstError::WeightOverflow {
                total: i64::MAX,
                weight: 1
            })
        );
        Ok(())
    }

    #[test]
    fn test_distance_order() {
        assert!(Distance::Finite(i64::MAX) < Distance::Infinite);
        assert!(Distance::Finite(-3) < Distance::Finite(2));
    }
}
