//! Minimum spanning trees of undirected weighted [Graph]s, by [kruskal] and
//! by [prim], together with the two data structures they are built on: the
//! [IndexedMinHeap] with in-place decrease-key, and the [DisjointSet] forest.
//!
//! [Graph]: graph::Graph
//! [kruskal]: kruskal::kruskal
//! [prim]: prim::prim
//! [IndexedMinHeap]: heap::IndexedMinHeap
//! [DisjointSet]: union_find::DisjointSet
pub mod graph;
pub mod heap;
pub mod kruskal;
pub mod mst;
pub mod prim;
pub mod text;
pub mod union_find;
