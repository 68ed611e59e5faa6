//! Text rendering of graphs and spanning tree results.
use std::io::{self, Write};

use clap::ValueEnum;
use serde::Deserialize;
use spantree_core::graph::{Edge, Graph, VertexId};
use spantree_core::kruskal::SpanningForest;
use spantree_core::union_find::DisjointSet;
use spantree_core::mst::MstOutcome;
use spantree_core::prim::PrimTree;

/// How vertices are written out.
#[derive(Deserialize, ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Labels {
    /// `1`, `2`, `3`, ...
    #[default]
    Numeric,
    /// `A`, `B`, `C`, ... up to `Z`, numbers after that.
    Letters,
}

impl Labels {
    /// Label of a single vertex.
    pub fn vertex(self, vertex: VertexId) -> String {
        match (self, u8::try_from(vertex.get())) {
            (Labels::Letters, Ok(n @ 1..=26)) => char::from(b'A' + n - 1).to_string(),
            _ => vertex.to_string(),
        }
    }

    fn edge(self, edge: &Edge) -> String {
        format!(
            "Edge {}--{}--{}",
            self.vertex(edge.origin()),
            edge.weight(),
            self.vertex(edge.dest())
        )
    }

    fn set(self, set: &[VertexId]) -> String {
        let members: String = set.iter().map(|v| format!("{} ", self.vertex(*v))).collect();
        format!("Set{{{members}}}")
    }
}

/// Writes one adjacency list per vertex.
pub fn write_adjacency(out: &mut impl Write, graph: &Graph, labels: Labels) -> io::Result<()> {
    for vertex in graph.vertices() {
        write!(out, "adj[{}] ->", labels.vertex(vertex))?;
        for neighbor in graph.neighbors(vertex) {
            write!(
                out,
                " |{} | {}| ->",
                labels.vertex(neighbor.vertex),
                neighbor.weight
            )?;
        }
        writeln!(out)?;
    }
    Ok(())
}

/// Writes the edges accepted by Kruskal's algorithm and their total weight.
/// The partition into sets is written when asked for, and always for a
/// disconnected graph.
pub fn write_kruskal(
    out: &mut impl Write,
    outcome: &MstOutcome<SpanningForest>,
    labels: Labels,
    show_sets: bool,
) -> io::Result<()> {
    let forest = outcome.as_inner();
    if outcome.is_connected() {
        writeln!(out, "Minimum spanning tree built from the following edges:")?;
    } else {
        writeln!(
            out,
            "Graph is disconnected; spanning forest of {} trees built from the following edges:",
            forest.components().len()
        )?;
    }
    for edge in forest.edges() {
        writeln!(out, "{}", labels.edge(edge))?;
    }
    writeln!(out, "Total weight: {}", forest.total_weight())?;

    if show_sets || !outcome.is_connected() {
        let sets: Vec<String> = forest.components().iter().map(|s| labels.set(s)).collect();
        writeln!(out, "{}", sets.join("  "))?;
    }
    Ok(())
}

/// Writes the edge heap one tree level per line, as edge weights.
pub fn write_edge_heap(out: &mut impl Write, levels: &[Vec<Edge>]) -> io::Result<()> {
    writeln!(out, "Edge heap, one level per line:")?;
    for level in levels {
        let weights: Vec<String> = level.iter().map(|edge| edge.weight().to_string()).collect();
        writeln!(out, "{}", weights.join(" "))?;
    }
    Ok(())
}

/// Writes the parent link of every vertex of a disjoint-set forest.
pub fn write_trees(out: &mut impl Write, partition: &DisjointSet, labels: Labels) -> io::Result<()> {
    let links: Vec<String> = (1..=partition.len())
        .map(VertexId::new)
        .map(|v| format!("{}->{}", labels.vertex(v), labels.vertex(partition.parent(v))))
        .collect();
    writeln!(out, "{}", links.join("  "))
}

/// Writes the parent array grown by Prim's algorithm, its total weight, and
/// any vertices it never reached.
pub fn write_prim(
    out: &mut impl Write,
    outcome: &MstOutcome<PrimTree>,
    labels: Labels,
) -> io::Result<()> {
    let tree = outcome.as_inner();
    writeln!(
        out,
        "Minimum spanning tree parent array, rooted at {}:",
        labels.vertex(tree.start())
    )?;
    for (vertex, parent) in tree.parents() {
        let parent = parent.map_or_else(|| "-".to_string(), |p| labels.vertex(p));
        writeln!(out, "{} -> {}", labels.vertex(vertex), parent)?;
    }
    writeln!(out, "Total weight: {}", tree.total_weight())?;

    if !outcome.is_connected() {
        let unreached: Vec<String> = tree.unreached().iter().map(|v| labels.vertex(*v)).collect();
        writeln!(
            out,
            "Graph is disconnected; unreached vertices: {}",
            unreached.join(" ")
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{
        write_adjacency, write_edge_heap, write_kruskal, write_prim, write_trees, Labels,
    };
    use rstest::{fixture, rstest};
    use spantree_core::graph::{Graph, VertexId};
    use spantree_core::kruskal::{edge_heap_levels, kruskal};
    use spantree_core::prim::prim;
    use std::error::Error;

    #[fixture]
    fn five_vertices() -> Graph {
        "5 6\n1 2 2\n1 3 3\n2 3 1\n2 4 4\n3 4 5\n4 5 6\n"
            .parse()
            .unwrap()
    }

    #[rstest]
    #[case(Labels::Numeric, 1, "1")]
    #[case(Labels::Letters, 1, "A")]
    #[case(Labels::Letters, 26, "Z")]
    #[case(Labels::Letters, 27, "27")]
    fn test_vertex_labels(#[case] labels: Labels, #[case] id: usize, #[case] expected: &str) {
        assert_eq!(labels.vertex(VertexId::new(id)), expected);
    }

    #[rstest]
    fn test_adjacency(five_vertices: Graph) -> Result<(), Box<dyn Error>> {
        let mut out = Vec::new();
        write_adjacency(&mut out, &five_vertices, Labels::Letters)?;

        let text = String::from_utf8(out)?;
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0], "adj[A] -> |B | 2| -> |C | 3| ->");
        assert_eq!(lines[4], "adj[E] -> |D | 6| ->");
        Ok(())
    }

    #[rstest]
    fn test_kruskal_output(five_vertices: Graph) -> Result<(), Box<dyn Error>> {
        let mut out = Vec::new();
        write_kruskal(&mut out, &kruskal(&five_vertices)?, Labels::Letters, true)?;

        assert_eq!(
            String::from_utf8(out)?,
            "Minimum spanning tree built from the following edges:\n\
             Edge B--1--C\n\
             Edge A--2--B\n\
             Edge B--4--D\n\
             Edge D--6--E\n\
             Total weight: 13\n\
             Set{A B C D E }\n"
        );
        Ok(())
    }

    #[test]
    fn test_disconnected_output() -> Result<(), Box<dyn Error>> {
        let graph: Graph = "4 2\n1 2 5\n3 4 1\n".parse()?;

        let mut out = Vec::new();
        write_kruskal(&mut out, &kruskal(&graph)?, Labels::Numeric, false)?;
        let text = String::from_utf8(out)?;
        assert!(text.starts_with("Graph is disconnected; spanning forest of 2 trees"));
        assert!(text.ends_with("Set{1 2 }  Set{3 4 }\n"));

        let mut out = Vec::new();
        write_prim(&mut out, &prim(&graph, VertexId::new(1))?, Labels::Numeric)?;
        let text = String::from_utf8(out)?;
        assert!(text.contains("3 -> -\n"));
        assert!(text.ends_with("Graph is disconnected; unreached vertices: 3 4\n"));
        Ok(())
    }

    #[rstest]
    fn test_prim_output(five_vertices: Graph) -> Result<(), Box<dyn Error>> {
        let mut out = Vec::new();
        write_prim(&mut out, &prim(&five_vertices, VertexId::new(2))?, Labels::Letters)?;

        assert_eq!(
            String::from_utf8(out)?,
            "Minimum spanning tree parent array, rooted at B:\n\
             A -> B\n\
             B -> -\n\
             C -> B\n\
             D -> B\n\
             E -> D\n\
             Total weight: 13\n"
        );
        Ok(())
    }

    #[rstest]
    fn test_trees_output(five_vertices: Graph) -> Result<(), Box<dyn Error>> {
        let forest = kruskal(&five_vertices)?.into_inner();
        let mut out = Vec::new();
        write_trees(&mut out, forest.partition(), Labels::Letters)?;

        assert_eq!(String::from_utf8(out)?, "A->C  B->C  C->D  D->E  E->E\n");
        Ok(())
    }

    #[rstest]
    fn test_edge_heap_output(five_vertices: Graph) -> Result<(), Box<dyn Error>> {
        let mut out = Vec::new();
        write_edge_heap(&mut out, &edge_heap_levels(&five_vertices)?)?;

        let text = String::from_utf8(out)?;
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Edge heap, one level per line:");
        assert_eq!(lines[1], "1");
        assert_eq!(lines.len(), 4);
        Ok(())
    }
}
