// Copyright 2025 the Carve Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors raised while assembling a [`Mesh`](crate::Mesh).

use thiserror::Error;

use crate::types::{ElementId, NodeId};

/// Reasons a set of positions and triangles does not form a valid mesh.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum MeshError {
    /// An element names a node id outside `1..=num_nodes`.
    #[error("{element} references {node}, but the mesh has {num_nodes} nodes")]
    UnknownNode {
        /// The offending element.
        element: ElementId,
        /// The missing node id.
        node: NodeId,
        /// Number of nodes in the mesh.
        num_nodes: usize,
    },

    /// An element uses the same node for more than one corner.
    #[error("{element} repeats {node}; elements must have three distinct corners")]
    RepeatedNode {
        /// The offending element.
        element: ElementId,
        /// The repeated node.
        node: NodeId,
    },

    /// A node coordinate is NaN or infinite.
    #[error("{node} has a non-finite coordinate")]
    NonFinite {
        /// The offending node.
        node: NodeId,
    },

    /// More nodes or elements than fit in a 32-bit id.
    #[error("mesh has {count} entries; ids are limited to 32 bits")]
    TooLarge {
        /// Number of entries supplied.
        count: usize,
    },
}
