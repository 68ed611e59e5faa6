//! Disjoint-set forest over the vertices of a graph.
use crate::graph::VertexId;

/// [Disjoint-set data structure] over the vertices `1..=n`, as a plain forest
/// of parent pointers.
///
/// Neither path compression nor union by rank/size is performed, so the
/// forest keeps exactly the shape the sequence of unions gave it. A find costs
/// the depth of the vertex in its tree, which is `O(n)` in the worst case: the
/// unions `(1, 2), (2, 3), ..., (n - 1, n)` build a single chain. [find] walks
/// the chain iteratively, so deep trees cost time but never stack.
///
/// [Disjoint-set data structure]: https://en.wikipedia.org/wiki/Disjoint-set_data_structure
/// [find]: DisjointSet::find
#[derive(Clone, PartialEq, Eq)]
pub struct DisjointSet {
    parents: Vec<usize>,
}

impl std::fmt::Debug for DisjointSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let links = self
            .parents
            .iter()
            .enumerate()
            .map(|(index, parent)| (VertexId::from_index(index), VertexId::from_index(*parent)));
        f.debug_map().entries(links).finish()
    }
}

impl DisjointSet {
    /// Creates `n` singleton sets, one for each vertex `1..=n`.
    pub fn new(n: usize) -> Self {
        DisjointSet {
            parents: (0..n).collect(),
        }
    }

    /// Number of vertices in the forest.
    pub fn len(&self) -> usize {
        self.parents.len()
    }

    /// Whether the forest has no vertices.
    pub fn is_empty(&self) -> bool {
        self.parents.is_empty()
    }

    /// The root of the tree containing `vertex`.
    ///
    /// # Panics
    ///
    /// If `vertex` is not in `1..=n`.
    pub fn find(&self, vertex: VertexId) -> VertexId {
        let mut index = vertex.index();
        while self.parents[index] != index {
            index = self.parents[index];
        }

        VertexId::from_index(index)
    }

    /// The vertex `vertex` points to; roots point to themselves.
    pub fn parent(&self, vertex: VertexId) -> VertexId {
        VertexId::from_index(self.parents[vertex.index()])
    }

    /// Whether `a` and `b` are in the same set.
    pub fn same_set(&self, a: VertexId, b: VertexId) -> bool {
        self.find(a) == self.find(b)
    }

    /// Merges the sets containing `a` and `b` by making the root of `a` point
    /// to the root of `b`.
    ///
    /// Two vertices that already share a root are left alone, so the forest
    /// never gains a cycle.
    pub fn union(&mut self, a: VertexId, b: VertexId) -> Union {
        let a = self.find(a);
        let b = self.find(b);

        if a == b {
            return Union::Same;
        }

        self.parents[a.index()] = b.index();
        Union::Merged { root: b, child: a }
    }

    /// Iterator over those vertices `v` for which `find(v) = v`.
    pub fn roots(&self) -> impl Iterator<Item = VertexId> + '_ {
        self.parents
            .iter()
            .enumerate()
            .filter(|(index, parent)| index == *parent)
            .map(|(index, _)| VertexId::from_index(index))
    }

    /// The sets of the partition, each in ascending vertex order, ordered by
    /// their smallest vertex.
    pub fn sets(&self) -> Vec<Vec<VertexId>> {
        let mut slot_of_root = vec![None; self.len()];
        let mut sets: Vec<Vec<VertexId>> = Vec::new();

        for index in 0..self.len() {
            let vertex = VertexId::from_index(index);
            let root = self.find(vertex).index();
            let slot = *slot_of_root[root].get_or_insert_with(|| {
                sets.push(Vec::new());
                sets.len() - 1
            });
            sets[slot].push(vertex);
        }

        sets
    }
}

/// Outcome of [DisjointSet::union].
#[must_use]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Union {
    /// Both vertices were in the same set already.
    Same,
    /// Two sets were merged.
    Merged {
        /// Root of the merged set.
        root: VertexId,
        /// Former root that now points to `root`.
        child: VertexId,
    },
}

#[cfg(test)]
mod tests {
    use super::{DisjointSet, Union};
    use crate::graph::VertexId;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use rstest::rstest;

    fn v(id: usize) -> VertexId {
        VertexId::new(id)
    }

    #[test]
    fn test_singletons() {
        let set = DisjointSet::new(4);
        assert_eq!(set.len(), 4);
        for id in 1..=4 {
            assert_eq!(set.find(v(id)), v(id));
        }
        assert_eq!(set.roots().count(), 4);
    }

    #[test]
    fn test_union_points_root_of_first_at_root_of_second() {
        let mut set = DisjointSet::new(4);

        assert_eq!(
            set.union(v(1), v(2)),
            Union::Merged {
                root: v(2),
                child: v(1)
            }
        );
        assert_eq!(
            set.union(v(3), v(1)),
            Union::Merged {
                root: v(2),
                child: v(3)
            }
        );
        assert_eq!(set.parent(v(1)), v(2));
        assert_eq!(set.parent(v(3)), v(2));
        assert_eq!(set.find(v(3)), v(2));
        assert_eq!(set.find(v(4)), v(4));
    }

    #[test]
    fn test_union_within_a_set_is_a_no_op() {
        let mut set = DisjointSet::new(3);
        assert_ne!(set.union(v(1), v(2)), Union::Same);
        let before = set.clone();

        assert_eq!(set.union(v(2), v(1)), Union::Same);
        assert_eq!(set, before);
    }

    #[test]
    fn test_chain_is_not_compressed() {
        let n = 10_000;
        let mut set = DisjointSet::new(n);
        for id in 1..n {
            assert_ne!(set.union(v(id), v(id + 1)), Union::Same);
        }

        assert_eq!(set.find(v(1)), v(n));
        // Finding never rewrites parent pointers.
        for id in 1..n {
            assert_eq!(set.parent(v(id)), v(id + 1));
        }
    }

    #[rstest]
    #[case(&[], vec![vec![1], vec![2], vec![3], vec![4], vec![5]])]
    #[case(&[(1, 3), (5, 2)], vec![vec![1, 3], vec![2, 5], vec![4]])]
    #[case(&[(4, 5), (1, 2), (2, 5), (3, 4)], vec![vec![1, 2, 3, 4, 5]])]
    fn test_sets(#[case] unions: &[(usize, usize)], #[case] expected: Vec<Vec<usize>>) {
        let mut set = DisjointSet::new(5);
        for &(a, b) in unions {
            assert_ne!(set.union(v(a), v(b)), Union::Same);
        }

        let sets: Vec<Vec<usize>> = set
            .sets()
            .into_iter()
            .map(|s| s.into_iter().map(VertexId::get).collect())
            .collect();
        assert_eq!(sets, expected);
        assert_eq!(set.roots().count(), expected.len());
    }

    #[test]
    fn test_find_agrees_with_transitive_unions() {
        let n = 40;
        let mut rng = StdRng::seed_from_u64(3);
        let mut set = DisjointSet::new(n);
        // Naive labelling: relabel a whole class on every merge.
        let mut label: Vec<usize> = (0..n).collect();

        for _ in 0..30 {
            let a = rng.gen_range(1..=n);
            let b = rng.gen_range(1..=n);
            let (from, to) = (label[a - 1], label[b - 1]);
            assert_eq!(set.union(v(a), v(b)) == Union::Same, from == to);
            for l in label.iter_mut().filter(|l| **l == from) {
                *l = to;
            }
        }

        for a in 1..=n {
            for b in 1..=n {
                assert_eq!(set.same_set(v(a), v(b)), label[a - 1] == label[b - 1]);
            }
        }
    }
}
