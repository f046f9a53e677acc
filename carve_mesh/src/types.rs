// Copyright 2025 the Carve Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the mesh model: identifiers, nodes, and triangular elements.

use kurbo::Point;

/// Identifier of a mesh node.
///
/// Node identifiers are 1-based, matching the numbering used by mesh files, so the
/// node with id `n` lives at slot `n - 1` of [`Mesh::nodes`](crate::Mesh::nodes).
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub u32);

impl NodeId {
    /// Create an identifier from a zero-based slot index.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "Meshes are limited to u32 node counts; larger slots are rejected at load."
    )]
    pub const fn from_index(idx: usize) -> Self {
        Self(idx as u32 + 1)
    }

    /// Zero-based slot of this node in the owning mesh.
    pub const fn index(self) -> usize {
        (self.0 as usize).wrapping_sub(1)
    }

    /// The raw 1-based id.
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl core::fmt::Display for NodeId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "node {}", self.0)
    }
}

/// Identifier of a triangular element. 1-based like [`NodeId`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ElementId(pub u32);

impl ElementId {
    /// Create an identifier from a zero-based slot index.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "Meshes are limited to u32 element counts; larger slots are rejected at load."
    )]
    pub const fn from_index(idx: usize) -> Self {
        Self(idx as u32 + 1)
    }

    /// Zero-based slot of this element in the owning mesh.
    pub const fn index(self) -> usize {
        (self.0 as usize).wrapping_sub(1)
    }

    /// The raw 1-based id.
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl core::fmt::Display for ElementId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "element {}", self.0)
    }
}

/// Which of a node's two positions a consumer works in.
///
/// World coordinates are the mesh's own (x, y). Normalized coordinates map the mesh
/// extents onto the `[-1, 1]` view square and are what on-screen picking compares against.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum CoordinateSpace {
    /// Coordinates as stored in the mesh.
    #[default]
    World,
    /// Coordinates mapped through the mesh [`Normalization`](crate::Normalization).
    Normalized,
}

/// A mesh node.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Node {
    /// Stable 1-based identifier.
    pub id: NodeId,
    /// Planar position in world coordinates.
    pub position: Point,
    /// Elevation (bathymetric depth in ocean meshes). Carried along, never used for geometry.
    pub z: f64,
    /// Position mapped into the normalized view square.
    pub normalized: Point,
}

impl Node {
    /// Position of this node in the requested coordinate space.
    #[inline]
    pub fn position_in(&self, space: CoordinateSpace) -> Point {
        match space {
            CoordinateSpace::World => self.position,
            CoordinateSpace::Normalized => self.normalized,
        }
    }
}

/// A triangular element referencing three nodes by id.
///
/// Node order is preserved from the source mesh and may be clockwise or counter-clockwise.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Element {
    /// Stable 1-based identifier.
    pub id: ElementId,
    /// The three corner nodes.
    pub nodes: [NodeId; 3],
}

impl Element {
    /// First corner.
    pub const fn n1(&self) -> NodeId {
        self.nodes[0]
    }

    /// Second corner.
    pub const fn n2(&self) -> NodeId {
        self.nodes[1]
    }

    /// Third corner.
    pub const fn n3(&self) -> NodeId {
        self.nodes[2]
    }

    /// The three edges as directed node pairs, in winding order.
    pub const fn edges(&self) -> [(NodeId, NodeId); 3] {
        let [a, b, c] = self.nodes;
        [(a, b), (b, c), (c, a)]
    }

    /// Whether `node` is one of this element's corners.
    pub fn has_node(&self, node: NodeId) -> bool {
        self.nodes.contains(&node)
    }
}
