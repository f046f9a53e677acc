// Copyright 2025 the Carve Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Build-time configuration.

use carve_mesh::CoordinateSpace;
use kurbo::Rect;

/// Default leaf capacity before a split.
pub const DEFAULT_BIN_SIZE: usize = 100;

/// Default split depth cap. Coincident nodes stop splitting here instead of recursing forever.
pub const DEFAULT_MAX_DEPTH: u32 = 24;

/// What the tree stores in its leaves.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum IndexMode {
    /// Only nodes. Element queries return nothing.
    NodesOnly,
    /// Nodes, plus every element registered in each leaf its bounding box touches.
    #[default]
    NodesAndElements,
}

/// How [`find_nearest_node`](crate::Quadtree::find_nearest_node) searches.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum NearestMode {
    /// Scan only the leaf containing the query point.
    ///
    /// Fast and good enough for clicking, but the true nearest node may sit in a
    /// neighbouring leaf, and an empty leaf yields nothing.
    #[default]
    Local,
    /// Best-first search across cells, pruned by the distance to each cell.
    Exact,
}

/// Options for [`Quadtree::build`](crate::Quadtree::build).
///
/// ```
/// use carve_quadtree::{IndexMode, QuadtreeConfig};
///
/// let config = QuadtreeConfig::default()
///     .with_bin_size(16)
///     .with_mode(IndexMode::NodesOnly);
/// assert_eq!(config.bin_size, 16);
/// ```
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct QuadtreeConfig {
    /// Maximum number of nodes a leaf holds before it splits. Must be at least 1.
    pub bin_size: usize,
    /// Leaves at this depth never split.
    pub max_depth: u32,
    /// Whether elements are indexed too.
    pub mode: IndexMode,
    /// Root bounds. `None` uses the mesh extents in [`space`](Self::space).
    pub bounds: Option<Rect>,
    /// Which node positions are indexed.
    pub space: CoordinateSpace,
    /// Nearest-node strategy.
    pub nearest: NearestMode,
}

impl Default for QuadtreeConfig {
    fn default() -> Self {
        Self {
            bin_size: DEFAULT_BIN_SIZE,
            max_depth: DEFAULT_MAX_DEPTH,
            mode: IndexMode::default(),
            bounds: None,
            space: CoordinateSpace::default(),
            nearest: NearestMode::default(),
        }
    }
}

impl QuadtreeConfig {
    /// Set the leaf capacity.
    #[must_use]
    pub fn with_bin_size(mut self, bin_size: usize) -> Self {
        self.bin_size = bin_size;
        self
    }

    /// Set the split depth cap.
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: u32) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Set the index mode.
    #[must_use]
    pub fn with_mode(mut self, mode: IndexMode) -> Self {
        self.mode = mode;
        self
    }

    /// Use explicit root bounds.
    #[must_use]
    pub fn with_bounds(mut self, bounds: Rect) -> Self {
        self.bounds = Some(bounds);
        self
    }

    /// Index positions in the given space.
    #[must_use]
    pub fn with_space(mut self, space: CoordinateSpace) -> Self {
        self.space = space;
        self
    }

    /// Set the nearest-node strategy.
    #[must_use]
    pub fn with_nearest(mut self, nearest: NearestMode) -> Self {
        self.nearest = nearest;
        self
    }
}
