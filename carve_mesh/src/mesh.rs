// Copyright 2025 the Carve Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The immutable mesh container and its view normalization.

use alloc::vec::Vec;
use kurbo::{Point, Rect, Vec2};

use crate::error::MeshError;
use crate::types::{CoordinateSpace, Element, ElementId, Node, NodeId};

/// Maps world coordinates onto the `[-1, 1]` view square and back.
///
/// The larger of the mesh's width and height spans the full square; the other axis is
/// centered, so aspect ratio is preserved.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Normalization {
    /// World-space center of the mesh extents.
    pub center: Point,
    /// Half of the larger extent. Never zero.
    pub half_extent: f64,
}

impl Normalization {
    /// Identity mapping.
    pub const IDENTITY: Self = Self {
        center: Point::ORIGIN,
        half_extent: 1.0,
    };

    /// Build the mapping for the given world extents.
    pub fn for_extents(extents: Rect) -> Self {
        let half_extent = 0.5 * extents.width().max(extents.height());
        if half_extent > 0.0 && half_extent.is_finite() {
            Self {
                center: extents.center(),
                half_extent,
            }
        } else {
            Self {
                center: extents.center(),
                half_extent: 1.0,
            }
        }
    }

    /// World → normalized.
    #[inline]
    pub fn normalize(&self, p: Point) -> Point {
        let v = (p - self.center) / self.half_extent;
        v.to_point()
    }

    /// Normalized → world.
    #[inline]
    pub fn denormalize(&self, p: Point) -> Point {
        self.center + p.to_vec2() * self.half_extent
    }

    /// Scale a normalized-space length (for example a pick radius) to world units.
    #[inline]
    pub fn denormalize_length(&self, len: f64) -> f64 {
        len * self.half_extent
    }
}

/// An immutable triangular mesh.
///
/// Nodes and elements are stored in id order, so lookups by id are slot accesses.
/// Every element is validated to reference three distinct, existing nodes.
#[derive(Clone, Debug)]
pub struct Mesh {
    nodes: Vec<Node>,
    elements: Vec<Element>,
    extents: Rect,
    elevation: (f64, f64),
    normalization: Normalization,
}

impl Default for Mesh {
    fn default() -> Self {
        Self {
            nodes: Vec::new(),
            elements: Vec::new(),
            extents: Rect::ZERO,
            elevation: (0.0, 0.0),
            normalization: Normalization::IDENTITY,
        }
    }
}

impl Mesh {
    /// Assemble a mesh from node positions `[x, y, z]` and triangles given as 1-based node ids.
    ///
    /// Node `i` of `positions` gets id `i + 1`; likewise for elements.
    ///
    /// # Errors
    ///
    /// Returns a [`MeshError`] when a coordinate is not finite, when a triangle names a
    /// missing node or repeats a corner, or when the counts do not fit in 32-bit ids.
    pub fn from_parts(positions: &[[f64; 3]], triangles: &[[u32; 3]]) -> Result<Self, MeshError> {
        for count in [positions.len(), triangles.len()] {
            if count >= u32::MAX as usize {
                return Err(MeshError::TooLarge { count });
            }
        }

        let mut extents: Option<Rect> = None;
        let mut elevation: Option<(f64, f64)> = None;
        for (i, &[x, y, z]) in positions.iter().enumerate() {
            if !(x.is_finite() && y.is_finite() && z.is_finite()) {
                return Err(MeshError::NonFinite {
                    node: NodeId::from_index(i),
                });
            }
            let p = Point::new(x, y);
            extents = Some(match extents {
                Some(r) => r.union_pt(p),
                None => Rect::from_points(p, p),
            });
            elevation = Some(match elevation {
                Some((lo, hi)) => (lo.min(z), hi.max(z)),
                None => (z, z),
            });
        }
        let extents = extents.unwrap_or(Rect::ZERO);
        let normalization = Normalization::for_extents(extents);

        let nodes = positions
            .iter()
            .enumerate()
            .map(|(i, &[x, y, z])| {
                let position = Point::new(x, y);
                Node {
                    id: NodeId::from_index(i),
                    position,
                    z,
                    normalized: normalization.normalize(position),
                }
            })
            .collect::<Vec<_>>();

        let mut elements = Vec::with_capacity(triangles.len());
        for (i, tri) in triangles.iter().enumerate() {
            let id = ElementId::from_index(i);
            let corners = tri.map(NodeId);
            for (k, &node) in corners.iter().enumerate() {
                if node.get() == 0 || node.index() >= nodes.len() {
                    return Err(MeshError::UnknownNode {
                        element: id,
                        node,
                        num_nodes: nodes.len(),
                    });
                }
                if corners[..k].contains(&node) {
                    return Err(MeshError::RepeatedNode { element: id, node });
                }
            }
            elements.push(Element {
                id,
                nodes: corners,
            });
        }

        Ok(Self {
            nodes,
            elements,
            extents,
            elevation: elevation.unwrap_or((0.0, 0.0)),
            normalization,
        })
    }

    /// All nodes in id order.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// All elements in id order.
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    /// Number of nodes.
    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    /// Number of elements.
    pub fn num_elements(&self) -> usize {
        self.elements.len()
    }

    /// Whether the mesh has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Look up a node by id.
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    /// Look up an element by id.
    pub fn element(&self, id: ElementId) -> Option<&Element> {
        self.elements.get(id.index())
    }

    /// Bounding extents of all node positions in world coordinates.
    ///
    /// [`Rect::ZERO`] for an empty mesh.
    pub fn extents(&self) -> Rect {
        self.extents
    }

    /// Extents in the requested space.
    pub fn extents_in(&self, space: CoordinateSpace) -> Rect {
        match space {
            CoordinateSpace::World => self.extents,
            CoordinateSpace::Normalized => Rect::from_points(
                self.normalization.normalize(Point::new(self.extents.x0, self.extents.y0)),
                self.normalization.normalize(Point::new(self.extents.x1, self.extents.y1)),
            ),
        }
    }

    /// Minimum and maximum elevation.
    pub fn elevation_range(&self) -> (f64, f64) {
        self.elevation
    }

    /// The world ↔ view mapping used to fill [`Node::normalized`].
    pub fn normalization(&self) -> Normalization {
        self.normalization
    }

    /// Corner positions of an element in the requested space.
    ///
    /// `None` if the element references a node this mesh does not have, which only happens
    /// for elements built by hand rather than taken from [`elements`](Self::elements).
    pub fn triangle(&self, element: &Element, space: CoordinateSpace) -> Option<[Point; 3]> {
        let [a, b, c] = element.nodes;
        Some([
            self.node(a)?.position_in(space),
            self.node(b)?.position_in(space),
            self.node(c)?.position_in(space),
        ])
    }

    /// Axis-aligned bounds of an element in the requested space.
    pub fn element_bounds(&self, element: &Element, space: CoordinateSpace) -> Option<Rect> {
        let [a, b, c] = self.triangle(element, space)?;
        Some(Rect::from_points(a, b).union_pt(c))
    }

    /// Centroid of an element in the requested space.
    pub fn centroid(&self, element: &Element, space: CoordinateSpace) -> Option<Point> {
        let [a, b, c] = self.triangle(element, space)?;
        let sum: Vec2 = a.to_vec2() + b.to_vec2() + c.to_vec2();
        Some((sum / 3.0).to_point())
    }

    /// Twice the signed area of an element in world space; positive for counter-clockwise.
    pub fn signed_area2(&self, element: &Element) -> Option<f64> {
        let [a, b, c] = self.triangle(element, CoordinateSpace::World)?;
        Some((b - a).cross(c - a))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use approx::assert_relative_eq;

    fn unit_square() -> Mesh {
        Mesh::from_parts(
            &[
                [0.0, 0.0, -1.0],
                [2.0, 0.0, -2.0],
                [2.0, 1.0, -3.0],
                [0.0, 1.0, -4.0],
            ],
            &[[1, 2, 3], [1, 3, 4]],
        )
        .unwrap()
    }

    #[test]
    fn ids_follow_input_order() {
        let mesh = unit_square();
        assert_eq!(mesh.num_nodes(), 4);
        assert_eq!(mesh.num_elements(), 2);
        for (i, n) in mesh.nodes().iter().enumerate() {
            assert_eq!(n.id.index(), i);
        }
        let e = mesh.element(ElementId(2)).unwrap();
        assert_eq!(e.nodes, [NodeId(1), NodeId(3), NodeId(4)]);
        assert!(mesh.node(NodeId(0)).is_none());
        assert!(mesh.node(NodeId(5)).is_none());
    }

    #[test]
    fn extents_and_elevation() {
        let mesh = unit_square();
        assert_eq!(mesh.extents(), Rect::new(0.0, 0.0, 2.0, 1.0));
        assert_eq!(mesh.elevation_range(), (-4.0, -1.0));
    }

    #[test]
    fn normalization_preserves_aspect() {
        let mesh = unit_square();
        let norm = mesh.normalization();
        assert_relative_eq!(norm.half_extent, 1.0);
        let p = mesh.node(NodeId(3)).unwrap().normalized;
        assert_relative_eq!(p.x, 1.0);
        assert_relative_eq!(p.y, 0.5);
        let back = norm.denormalize(p);
        assert_relative_eq!(back.x, 2.0);
        assert_relative_eq!(back.y, 1.0);
        // Half the view square is one world unit on this mesh.
        assert_relative_eq!(norm.denormalize_length(0.5), 0.5);
        let r = mesh.extents_in(CoordinateSpace::Normalized);
        assert_relative_eq!(r.x0, -1.0);
        assert_relative_eq!(r.y1, 0.5);
    }

    #[test]
    fn degenerate_extents_do_not_divide_by_zero() {
        let mesh = Mesh::from_parts(&[[3.0, 3.0, 0.0]], &[]).unwrap();
        assert_eq!(mesh.normalization().half_extent, 1.0);
        assert_eq!(mesh.nodes()[0].normalized, Point::ORIGIN);
    }

    #[test]
    fn empty_mesh() {
        let mesh = Mesh::from_parts(&[], &[]).unwrap();
        assert!(mesh.is_empty());
        assert_eq!(mesh.extents(), Rect::ZERO);
    }

    #[test]
    fn rejects_unknown_and_repeated_nodes() {
        let pts = vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]];
        assert_eq!(
            Mesh::from_parts(&pts, &[[1, 2, 4]]).unwrap_err(),
            MeshError::UnknownNode {
                element: ElementId(1),
                node: NodeId(4),
                num_nodes: 3
            }
        );
        assert!(matches!(
            Mesh::from_parts(&pts, &[[0, 1, 2]]),
            Err(MeshError::UnknownNode { node: NodeId(0), .. })
        ));
        assert_eq!(
            Mesh::from_parts(&pts, &[[1, 2, 1]]).unwrap_err(),
            MeshError::RepeatedNode {
                element: ElementId(1),
                node: NodeId(1)
            }
        );
    }

    #[test]
    fn rejects_non_finite() {
        let err = Mesh::from_parts(&[[0.0, f64::NAN, 0.0]], &[]).unwrap_err();
        assert_eq!(err, MeshError::NonFinite { node: NodeId(1) });
    }

    #[test]
    fn element_geometry() {
        let mesh = unit_square();
        let e = *mesh.element(ElementId(1)).unwrap();
        assert_eq!(e.n1(), NodeId(1));
        assert_eq!((e.n2(), e.n3()), (NodeId(2), NodeId(3)));
        assert_eq!(
            mesh.element_bounds(&e, CoordinateSpace::World),
            Some(Rect::new(0.0, 0.0, 2.0, 1.0))
        );
        let c = mesh.centroid(&e, CoordinateSpace::World).unwrap();
        assert_relative_eq!(c.x, 4.0 / 3.0);
        assert_relative_eq!(c.y, 1.0 / 3.0);
        assert!(mesh.signed_area2(&e).unwrap() > 0.0);
        let [_, _, top] = mesh.triangle(&e, CoordinateSpace::Normalized).unwrap();
        assert_eq!(top, mesh.node(e.n3()).unwrap().normalized);
    }

    #[test]
    fn foreign_element_has_no_geometry() {
        let mesh = unit_square();
        let stray = Element {
            id: ElementId(3),
            nodes: [NodeId(1), NodeId(2), NodeId(9)],
        };
        assert_eq!(mesh.triangle(&stray, CoordinateSpace::World), None);
        assert_eq!(mesh.element_bounds(&stray, CoordinateSpace::World), None);
        assert_eq!(mesh.centroid(&stray, CoordinateSpace::World), None);
        assert_eq!(mesh.signed_area2(&stray), None);
    }
}
