// Copyright 2025 the Carve Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Carve Boundary: boundary loops of triangle selections and subdomain carving.
//!
//! - [`EdgeCounts`]: how many triangles of a set use each [`Edge`]. Edges used once form
//!   the boundary.
//! - [`BoundaryFinder`]: walks boundary edges into ordered [`BoundaryLoops`] (outer loop
//!   counter-clockwise, holes clockwise) and classifies a whole mesh into outer and inner
//!   [`Boundaries`].
//! - [`Subdomain`]: a validated selection with renumbered nodes and elements, per-node
//!   [`BoundaryFlags`], and the open boundary created by the cut.
//!
//! Invalid selections are reported as [`BoundaryError`]s and never produce partial loops.
//!
//! # Example
//!
//! ```rust
//! use carve_boundary::{BoundaryFinder, BoundaryFlags, Subdomain};
//! use carve_mesh::{ElementId, Mesh, NodeId};
//!
//! // Two unit squares side by side, two triangles each.
//! let mesh = Mesh::from_parts(
//!     &[
//!         [0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [2.0, 0.0, 0.0],
//!         [0.0, 1.0, 0.0], [1.0, 1.0, 0.0], [2.0, 1.0, 0.0],
//!     ],
//!     &[[1, 2, 5], [1, 5, 4], [2, 3, 6], [2, 6, 5]],
//! )
//! .unwrap();
//!
//! let finder = BoundaryFinder::new();
//! let domain = finder.find_all_boundaries(&mesh).unwrap();
//! assert_eq!(domain.outer.len(), 6);
//!
//! // Three triangles: the left square and the upper half of the right one.
//! let selection = [ElementId(1), ElementId(2), ElementId(4)];
//! let outer = finder.find_boundaries(&mesh, selection).unwrap();
//! assert_eq!(outer, [NodeId(1), NodeId(2), NodeId(6), NodeId(5), NodeId(4)]);
//!
//! // The diagonal from node 2 to node 6 is new boundary.
//! let sub = Subdomain::carve(&mesh, selection, &domain).unwrap();
//! assert_eq!(sub.open_boundary_nodes(), [NodeId(2), NodeId(6)]);
//! assert!(sub.flags(NodeId(6)).contains(BoundaryFlags::CUT | BoundaryFlags::DOMAIN_OUTER));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod edge;
mod error;
mod finder;
mod subdomain;

pub use edge::{Edge, EdgeCounts};
pub use error::BoundaryError;
pub use finder::{Boundaries, BoundaryFinder, BoundaryLoops, MIN_ELEMENTS};
pub use subdomain::{BoundaryFlags, Subdomain};
