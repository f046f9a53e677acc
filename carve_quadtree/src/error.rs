// Copyright 2025 the Carve Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors raised while building a [`Quadtree`](crate::Quadtree).

use carve_mesh::NodeId;
use kurbo::Rect;
use thiserror::Error;

/// Reasons a quadtree cannot be built.
///
/// Build never returns a partially populated tree; any of these aborts construction.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum BuildError {
    /// `bin_size` was zero, so no leaf could ever hold a node.
    #[error("bin size must be at least 1")]
    ZeroBinSize,

    /// Root bounds are non-finite or have no area.
    #[error("root bounds {bounds:?} are degenerate")]
    DegenerateBounds {
        /// The rejected bounds.
        bounds: Rect,
    },

    /// Explicit root bounds do not cover every node.
    #[error("{node} lies outside the root bounds")]
    NodeOutsideBounds {
        /// The first node found outside.
        node: NodeId,
    },
}
