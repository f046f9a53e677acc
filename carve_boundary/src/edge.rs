// Copyright 2025 the Carve Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Canonical edges and per-edge occurrence counts.
//!
//! An edge used by exactly one triangle of a set is a boundary edge of that set; an
//! edge shared by two triangles is interior.

use alloc::collections::{BTreeMap, BTreeSet};
use alloc::vec::Vec;

use carve_mesh::{Element, NodeId};

/// An undirected edge, stored with the smaller node id first.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Edge {
    a: NodeId,
    b: NodeId,
}

impl Edge {
    /// The edge between `x` and `y`, in either order.
    pub fn new(x: NodeId, y: NodeId) -> Self {
        if x <= y {
            Self { a: x, b: y }
        } else {
            Self { a: y, b: x }
        }
    }

    /// Smaller endpoint.
    pub const fn first(self) -> NodeId {
        self.a
    }

    /// Larger endpoint.
    pub const fn second(self) -> NodeId {
        self.b
    }

    /// The endpoint opposite `node`, if `node` is an endpoint.
    pub fn other(self, node: NodeId) -> Option<NodeId> {
        if node == self.a {
            Some(self.b)
        } else if node == self.b {
            Some(self.a)
        } else {
            None
        }
    }
}

/// How many triangles of a set use each edge.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EdgeCounts {
    counts: BTreeMap<Edge, u32>,
}

impl EdgeCounts {
    /// Count the three edges of every element.
    pub fn from_elements<'a, I>(elements: I) -> Self
    where
        I: IntoIterator<Item = &'a Element>,
    {
        let mut counts = BTreeMap::new();
        for element in elements {
            for (x, y) in element.edges() {
                *counts.entry(Edge::new(x, y)).or_insert(0) += 1;
            }
        }
        Self { counts }
    }

    /// Number of distinct edges.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Whether no edges were counted.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Occurrences of `edge`; zero if unseen.
    pub fn count(&self, edge: Edge) -> u32 {
        self.counts.get(&edge).copied().unwrap_or(0)
    }

    /// Edges used exactly once, in edge order.
    pub fn boundary_edges(&self) -> impl Iterator<Item = Edge> + '_ {
        self.counts
            .iter()
            .filter(|&(_, &n)| n == 1)
            .map(|(&e, _)| e)
    }

    /// Edges used more than once, in edge order.
    pub fn interior_edges(&self) -> impl Iterator<Item = Edge> + '_ {
        self.counts
            .iter()
            .filter(|&(_, &n)| n > 1)
            .map(|(&e, _)| e)
    }

    /// Endpoints of all boundary edges.
    pub fn boundary_nodes(&self) -> BTreeSet<NodeId> {
        self.boundary_edges()
            .flat_map(|e| [e.first(), e.second()])
            .collect()
    }

    /// For each boundary node, the nodes it shares a boundary edge with.
    pub fn adjacency(&self) -> BTreeMap<NodeId, Vec<NodeId>> {
        let mut adjacency: BTreeMap<NodeId, Vec<NodeId>> = BTreeMap::new();
        for edge in self.boundary_edges() {
            adjacency.entry(edge.first()).or_default().push(edge.second());
            adjacency.entry(edge.second()).or_default().push(edge.first());
        }
        adjacency
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_mesh::grid;
    use carve_mesh::Mesh;

    #[test]
    fn edges_are_canonical() {
        let e = Edge::new(NodeId(7), NodeId(3));
        assert_eq!(e, Edge::new(NodeId(3), NodeId(7)));
        assert_eq!((e.first(), e.second()), (NodeId(3), NodeId(7)));
        assert_eq!(e.other(NodeId(3)), Some(NodeId(7)));
        assert_eq!(e.other(NodeId(4)), None);
    }

    #[test]
    fn single_triangle_is_all_boundary() {
        let mesh =
            Mesh::from_parts(&[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]], &[[1, 2, 3]])
                .unwrap();
        let counts = EdgeCounts::from_elements(mesh.elements());
        assert_eq!(counts.boundary_edges().count(), 3);
        assert_eq!(counts.interior_edges().count(), 0);
        let nodes: Vec<u32> = counts.boundary_nodes().into_iter().map(|n| n.get()).collect();
        assert_eq!(nodes, [1, 2, 3]);
    }

    #[test]
    fn two_by_two_grid_counts() {
        let mesh = grid(2);
        let counts = EdgeCounts::from_elements(mesh.elements());
        // 12 grid lines plus 4 diagonals.
        assert_eq!(counts.len(), 16);
        assert_eq!(counts.boundary_edges().count(), 8);
        assert_eq!(counts.interior_edges().count(), 8);
        assert!(counts.interior_edges().all(|e| counts.count(e) == 2));
        assert_eq!(counts.count(Edge::new(NodeId(1), NodeId(9))), 0);

        let boundary = counts.boundary_nodes();
        assert_eq!(boundary.len(), 8);
        assert!(!boundary.contains(&NodeId(5)));

        let adjacency = counts.adjacency();
        assert!(adjacency.values().all(|n| n.len() == 2));
        assert_eq!(adjacency[&NodeId(1)], [NodeId(2), NodeId(4)]);
    }
}
