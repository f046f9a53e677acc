// Copyright 2025 the Carve Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Carve Quadtree: a build-once region quadtree over the nodes and triangles of a mesh.
//!
//! The tree answers the questions an interactive mesh editor asks on every click or drag:
//!
//! - Which node is nearest to this point? ([`Quadtree::find_nearest_node`])
//! - Which triangle is under this point? ([`Quadtree::find_element_at`])
//! - Which nodes or triangles fall inside this circle, rectangle, or polygon?
//!   ([`Quadtree::find_nodes_in`], [`Quadtree::find_elements_in`] and their shorthands)
//! - How do the elements group by cell at a given depth?
//!   ([`Quadtree::elements_through_depth`])
//!
//! Cells live in a flat arena. A leaf splits into four quadrants once it holds more than
//! [`QuadtreeConfig::bin_size`] nodes, unless it has reached
//! [`QuadtreeConfig::max_depth`] or is too small to halve; coincident nodes therefore
//! overflow a capped leaf instead of recursing forever. Range queries prune cells that lie
//! outside the query [`Region`], accept cells that lie fully inside it, and run exact
//! point tests only in cells that straddle its edge.
//!
//! Conditions that simply produce nothing (a point outside the root, a negative radius, a
//! polygon with two vertices) are empty results, not errors. Only construction can fail,
//! with a [`BuildError`].
//!
//! # Example
//!
//! ```rust
//! use carve_mesh::Mesh;
//! use carve_quadtree::{Quadtree, QuadtreeConfig};
//! use kurbo::{Point, Rect};
//!
//! // Two triangles forming a square.
//! let mesh = Mesh::from_parts(
//!     &[[0.0, 0.0, 0.0], [4.0, 0.0, 0.0], [4.0, 4.0, 0.0], [0.0, 4.0, 0.0]],
//!     &[[1, 2, 3], [1, 3, 4]],
//! )
//! .unwrap();
//! let tree = Quadtree::build(&mesh, &QuadtreeConfig::default()).unwrap();
//!
//! assert_eq!(tree.find_nearest_node(Point::new(3.5, 0.2)).unwrap().id.get(), 2);
//! assert_eq!(tree.find_element_at(Point::new(1.0, 3.0)).unwrap().id.get(), 2);
//!
//! let picked = tree.find_elements_in_rectangle(Rect::new(3.0, 3.0, 5.0, 5.0));
//! assert_eq!(picked.len(), 2);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod config;
mod error;
pub mod geom;
pub mod region;
mod tree;

pub use config::{DEFAULT_BIN_SIZE, DEFAULT_MAX_DEPTH, IndexMode, NearestMode, QuadtreeConfig};
pub use error::BuildError;
pub use region::{CircleRegion, Containment, Polygon, RectRegion, Region};
pub use tree::{LeafView, Quadtree, QuadtreeStats};
