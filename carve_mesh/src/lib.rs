// Copyright 2025 the Carve Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Carve Mesh: the immutable triangular mesh shared by the Carve crates.
//!
//! A [`Mesh`] owns an ordered list of [`Node`]s (1-based [`NodeId`], node `n` at slot `n - 1`)
//! and an ordered list of triangular [`Element`]s that reference nodes by id.
//! The mesh is validated once at construction and never changes afterwards, so spatial
//! indexes and selections can hold plain ids or shared borrows into it.
//!
//! Each node carries its world position and a normalized position inside the `[-1, 1]`
//! view square (see [`Normalization`]); consumers choose one with [`CoordinateSpace`].
//!
//! # Example
//!
//! ```rust
//! use carve_mesh::{CoordinateSpace, Mesh, NodeId};
//!
//! let mesh = Mesh::from_parts(
//!     &[[0.0, 0.0, -2.0], [10.0, 0.0, -3.0], [0.0, 10.0, -1.5]],
//!     &[[1, 2, 3]],
//! )
//! .unwrap();
//!
//! assert_eq!(mesh.num_elements(), 1);
//! let n2 = mesh.node(NodeId(2)).unwrap();
//! assert_eq!(n2.position_in(CoordinateSpace::Normalized).x, 1.0);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod error;
pub mod mesh;
pub mod types;

pub use error::MeshError;
pub use mesh::{Mesh, Normalization};
pub use types::{CoordinateSpace, Element, ElementId, Node, NodeId};
