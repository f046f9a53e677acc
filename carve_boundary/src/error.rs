// Copyright 2025 the Carve Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Reasons an element set has no usable boundary.

use carve_mesh::{ElementId, MeshError, NodeId};
use thiserror::Error;

/// A selection that cannot be turned into closed boundary loops.
///
/// Every variant is a recoverable condition the caller can report, typically as
/// "the selection does not form a closed boundary". No partial output accompanies it.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum BoundaryError {
    /// Fewer than three distinct elements were given.
    #[error("a boundary needs at least 3 elements, got {found}")]
    TooFewElements {
        /// Distinct elements supplied.
        found: usize,
    },

    /// An element id is not part of the mesh.
    #[error("{element} is not part of the mesh")]
    UnknownElement {
        /// The missing id.
        element: ElementId,
    },

    /// A node touches more than two boundary edges, so the boundary pinches there.
    #[error("{node} has {neighbours} boundary neighbours; the selection touches itself")]
    NonManifoldNode {
        /// The pinch node.
        node: NodeId,
        /// Number of boundary neighbours (more than two).
        neighbours: usize,
    },

    /// The elements fall into more than one edge-connected piece.
    #[error("the selection splits into {components} disconnected pieces")]
    Disconnected {
        /// Number of pieces.
        components: usize,
    },

    /// Walking the boundary stopped at a node without a way on.
    #[error("the boundary does not close at {node}")]
    OpenBoundary {
        /// Where the walk stopped.
        node: NodeId,
    },

    /// Assembling a standalone mesh from a carved subdomain failed.
    #[error(transparent)]
    Mesh(#[from] MeshError),
}
