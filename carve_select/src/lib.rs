// Copyright 2025 the Carve Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Carve Select: interactive element selection on top of a [`carve_quadtree::Quadtree`].
//!
//! - [`tools`]: click, circle, rectangle, and polygon search tools. Each is a small state
//!   machine fed with [`ToolEvent`]s that produces one quadtree query when it finishes.
//! - [`Selection`]: the sorted set of selected element ids.
//! - [`SelectionHistory`]: undo and redo over selections, reporting
//!   [`HistoryEvent`] transitions so a caller can enable or disable its controls.
//! - [`SelectionSession`]: ties one active tool, a [`SelectionMode`], and the history
//!   together.
//!
//! The crate holds no rendering state. Tools expose the live shape (circle center and
//! radius, dragged rectangle, pending polygon ring) so the caller can draw feedback.
//!
//! # Example
//!
//! ```rust
//! use carve_mesh::Mesh;
//! use carve_quadtree::{Quadtree, QuadtreeConfig};
//! use carve_select::{SelectionMode, SelectionSession, ToolEvent, ToolKind};
//! use kurbo::Point;
//!
//! let mesh = Mesh::from_parts(
//!     &[[0.0, 0.0, 0.0], [4.0, 0.0, 0.0], [4.0, 4.0, 0.0], [0.0, 4.0, 0.0]],
//!     &[[1, 2, 3], [1, 3, 4]],
//! )
//! .unwrap();
//! let tree = Quadtree::build(&mesh, &QuadtreeConfig::default()).unwrap();
//! let mut session = SelectionSession::new(&tree);
//!
//! // Drag a rectangle around node 3: both triangles use it.
//! session.use_tool(ToolKind::Rectangle);
//! session.handle(ToolEvent::Press(Point::new(3.0, 3.0)));
//! session.handle(ToolEvent::Release(Point::new(5.0, 5.0)));
//! assert_eq!(session.selection().len(), 2);
//!
//! // Click-deselect the lower triangle, then take it back.
//! session.set_mode(SelectionMode::Deselect);
//! session.use_tool(ToolKind::Click);
//! session.handle(ToolEvent::Press(Point::new(3.0, 1.0)));
//! session.handle(ToolEvent::Release(Point::new(3.0, 1.0)));
//! assert_eq!(session.selection().len(), 1);
//! session.undo();
//! assert_eq!(session.selection().len(), 2);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod history;
pub mod selection;
pub mod session;
pub mod tools;

pub use history::{HistoryEvent, SelectionHistory};
pub use selection::Selection;
pub use session::{SelectionMode, SelectionSession, ToolKind};
pub use tools::{
    CircleSearch, CircleStats, ClickSearch, PolygonSearch, RectangleSearch, RectangleStats,
    SearchTool, ToolEvent, ToolPhase,
};
