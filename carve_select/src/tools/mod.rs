// Copyright 2025 the Carve Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Search tools: small state machines that turn pointer events into one quadtree query.
//!
//! ## Protocol
//!
//! Every tool starts [`Idle`](ToolPhase::Idle). A [`Press`](ToolEvent::Press) makes it
//! [`Active`](ToolPhase::Active); the tool then consumes moves (and, for the polygon tool,
//! further presses) until it reports [`Finished`](ToolPhase::Finished). A finished tool
//! holds a complete query shape; [`SearchTool::search`] runs it and [`SearchTool::reset`]
//! returns the tool to `Idle`. A press on a finished tool starts a new interaction.
//!
//! Points are in the coordinate space the quadtree was built in.

use alloc::collections::BTreeSet;

use carve_mesh::ElementId;
use carve_quadtree::Quadtree;
use kurbo::Point;

pub mod circle;
pub mod click;
pub mod polygon;
pub mod rectangle;

pub use circle::{CircleSearch, CircleStats};
pub use click::ClickSearch;
pub use polygon::PolygonSearch;
pub use rectangle::{RectangleSearch, RectangleStats};

/// A pointer event delivered to a tool.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum ToolEvent {
    /// Button pressed at a point.
    Press(Point),
    /// Pointer moved to a point.
    Move(Point),
    /// Button released at a point.
    Release(Point),
}

/// Where a tool is in its interaction.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum ToolPhase {
    /// Waiting for a press.
    #[default]
    Idle,
    /// Collecting input.
    Active,
    /// The query shape is complete.
    Finished,
}

/// A stateful wrapper turning interaction events into a single quadtree query.
pub trait SearchTool {
    /// Feed one event and return the phase afterwards.
    fn handle(&mut self, event: ToolEvent) -> ToolPhase;

    /// Current phase.
    fn phase(&self) -> ToolPhase;

    /// Run the query described by the current shape.
    ///
    /// Tools that have not collected a usable shape return an empty set.
    fn search(&self, tree: &Quadtree<'_>) -> BTreeSet<ElementId>;

    /// Forget the current shape and return to [`ToolPhase::Idle`].
    fn reset(&mut self);
}

#[cfg(test)]
pub(crate) mod test_mesh {
    use alloc::vec::Vec;
    use carve_mesh::Mesh;

    /// An `n` by `n` grid of unit squares, two triangles each.
    ///
    /// Square `(i, j)` holds elements `2k + 1` (below the diagonal) and `2k + 2` (above),
    /// with `k = j * n + i`.
    pub(crate) fn grid(n: u32) -> Mesh {
        let mut positions = Vec::new();
        for j in 0..=n {
            for i in 0..=n {
                positions.push([f64::from(i), f64::from(j), 0.0]);
            }
        }
        let id = |i: u32, j: u32| j * (n + 1) + i + 1;
        let mut triangles = Vec::new();
        for j in 0..n {
            for i in 0..n {
                let (a, b, c, d) = (id(i, j), id(i + 1, j), id(i + 1, j + 1), id(i, j + 1));
                triangles.push([a, b, c]);
                triangles.push([a, c, d]);
            }
        }
        Mesh::from_parts(&positions, &triangles).unwrap()
    }
}
