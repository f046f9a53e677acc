// Copyright 2025 the Carve Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Carving a selection out of a mesh as a standalone subdomain.

use alloc::collections::{BTreeMap, BTreeSet};
use alloc::vec::Vec;

use carve_mesh::{ElementId, Mesh, NodeId};
use tracing::debug;

use crate::edge::Edge;
use crate::error::BoundaryError;
use crate::finder::{Boundaries, BoundaryFinder, BoundaryLoops};

bitflags::bitflags! {
    /// What a subdomain boundary node lies on.
    ///
    /// A node can carry several flags: a corner where the cut meets the domain perimeter
    /// is both [`CUT`](Self::CUT) and [`DOMAIN_OUTER`](Self::DOMAIN_OUTER).
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct BoundaryFlags: u8 {
        /// On the outer perimeter of the whole mesh.
        const DOMAIN_OUTER = 0b0000_0001;
        /// On a hole of the whole mesh.
        const DOMAIN_INNER = 0b0000_0010;
        /// On an edge the selection shares with unselected elements.
        const CUT          = 0b0000_0100;
    }
}

/// A selected region of a mesh, renumbered for use on its own.
///
/// New node ids follow ascending old ids, and new element ids follow ascending old
/// element ids, both starting at 1.
#[derive(Clone)]
pub struct Subdomain<'m> {
    mesh: &'m Mesh,
    nodes: Vec<NodeId>,
    elements: Vec<ElementId>,
    node_map: BTreeMap<NodeId, NodeId>,
    element_map: BTreeMap<ElementId, ElementId>,
    loops: BoundaryLoops,
    cut: BTreeSet<Edge>,
    flags: BTreeMap<NodeId, BoundaryFlags>,
}

impl core::fmt::Debug for Subdomain<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Subdomain")
            .field("nodes", &self.nodes.len())
            .field("elements", &self.elements.len())
            .field("outer", &self.loops.outer.len())
            .field("holes", &self.loops.inner.len())
            .finish_non_exhaustive()
    }
}

impl<'m> Subdomain<'m> {
    /// Validate `selection` and carve it out of `mesh`.
    ///
    /// `domain` is the whole-mesh classification from
    /// [`BoundaryFinder::find_all_boundaries`]; it decides which loop nodes are new
    /// (cut) and which were already on the mesh boundary.
    ///
    /// # Errors
    ///
    /// Any error of [`BoundaryFinder::trace`]: the selection must hold at least three
    /// elements forming one piece with a closed, non-pinching boundary.
    pub fn carve<I>(mesh: &'m Mesh, selection: I, domain: &Boundaries) -> Result<Self, BoundaryError>
    where
        I: IntoIterator<Item = ElementId>,
    {
        let elements: Vec<ElementId> = selection
            .into_iter()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let loops = BoundaryFinder::new().trace(mesh, elements.iter().copied())?;

        // `trace` has resolved every id.
        let nodes: Vec<NodeId> = elements
            .iter()
            .filter_map(|&id| mesh.element(id))
            .flat_map(|e| e.nodes)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let node_map = nodes
            .iter()
            .enumerate()
            .map(|(i, &old)| (old, NodeId::from_index(i)))
            .collect();
        let element_map = elements
            .iter()
            .enumerate()
            .map(|(i, &old)| (old, ElementId::from_index(i)))
            .collect();

        let mut flags: BTreeMap<NodeId, BoundaryFlags> = BTreeMap::new();
        for node in loops.nodes() {
            let mut f = BoundaryFlags::empty();
            f.set(BoundaryFlags::DOMAIN_OUTER, domain.outer.contains(&node));
            f.set(BoundaryFlags::DOMAIN_INNER, domain.inner.contains(&node));
            flags.insert(node, f);
        }
        let cut: BTreeSet<Edge> = loops
            .edges()
            .filter(|&e| !domain.is_domain_edge(e))
            .collect();
        for edge in &cut {
            for node in [edge.first(), edge.second()] {
                *flags.entry(node).or_insert(BoundaryFlags::empty()) |= BoundaryFlags::CUT;
            }
        }

        let carved = Self {
            mesh,
            nodes,
            elements,
            node_map,
            element_map,
            loops,
            cut,
            flags,
        };
        debug!(
            nodes = carved.nodes.len(),
            elements = carved.elements.len(),
            cut_edges = carved.cut.len(),
            "carved subdomain"
        );
        Ok(carved)
    }

    /// The mesh this was carved from.
    pub fn mesh(&self) -> &'m Mesh {
        self.mesh
    }

    /// Old ids of the subdomain's nodes, ascending.
    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }

    /// Old ids of the subdomain's elements, ascending.
    pub fn elements(&self) -> &[ElementId] {
        &self.elements
    }

    /// Boundary loops, in old node ids.
    pub fn loops(&self) -> &BoundaryLoops {
        &self.loops
    }

    /// The new id of an old node, if it belongs to the subdomain.
    pub fn new_node_id(&self, old: NodeId) -> Option<NodeId> {
        self.node_map.get(&old).copied()
    }

    /// The new id of an old element, if it belongs to the subdomain.
    pub fn new_element_id(&self, old: ElementId) -> Option<ElementId> {
        self.element_map.get(&old).copied()
    }

    /// Flags of an old node; empty for nodes off the subdomain boundary.
    pub fn flags(&self, old: NodeId) -> BoundaryFlags {
        self.flags.get(&old).copied().unwrap_or(BoundaryFlags::empty())
    }

    /// Outer-loop nodes that lie on the cut, in loop order.
    ///
    /// These are where the subdomain needs new boundary conditions.
    pub fn open_boundary_nodes(&self) -> Vec<NodeId> {
        self.loops
            .outer
            .iter()
            .copied()
            .filter(|&n| self.flags(n).contains(BoundaryFlags::CUT))
            .collect()
    }

    /// Whether an edge of the subdomain boundary was created by the cut.
    pub fn is_cut_edge(&self, edge: Edge) -> bool {
        self.cut.contains(&edge)
    }

    /// Build a standalone mesh with renumbered nodes and elements.
    ///
    /// # Errors
    ///
    /// [`BoundaryError::Mesh`] if the renumbered parts are rejected, which only happens
    /// when the source mesh could not have been built either.
    pub fn to_mesh(&self) -> Result<Mesh, BoundaryError> {
        let positions: Vec<[f64; 3]> = self
            .nodes
            .iter()
            .filter_map(|&id| self.mesh.node(id))
            .map(|n| [n.position.x, n.position.y, n.z])
            .collect();
        let triangles: Vec<[u32; 3]> = self
            .elements
            .iter()
            .filter_map(|&id| self.mesh.element(id))
            .map(|e| e.nodes.map(|n| self.new_node_id(n).map_or(0, NodeId::get)))
            .collect();
        Ok(Mesh::from_parts(&positions, &triangles)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_mesh::grid;
    use kurbo::Rect;

    fn raw(nodes: &[NodeId]) -> Vec<u32> {
        nodes.iter().map(|n| n.get()).collect()
    }

    /// The left two columns of a 3 by 3 grid.
    fn left_columns() -> Vec<ElementId> {
        [1, 2, 3, 4, 7, 8, 9, 10, 13, 14, 15, 16]
            .into_iter()
            .map(ElementId)
            .collect()
    }

    #[test]
    fn carve_left_columns() {
        let mesh = grid(3);
        let domain = BoundaryFinder::new().find_all_boundaries(&mesh).unwrap();
        let sub = Subdomain::carve(&mesh, left_columns(), &domain).unwrap();

        assert_eq!(raw(&sub.loops().outer), [1, 2, 3, 7, 11, 15, 14, 13, 9, 5]);
        assert!(sub.loops().inner.is_empty());
        assert_eq!(raw(&sub.open_boundary_nodes()), [3, 7, 11, 15]);

        assert_eq!(
            sub.flags(NodeId(3)),
            BoundaryFlags::CUT | BoundaryFlags::DOMAIN_OUTER
        );
        assert_eq!(sub.flags(NodeId(7)), BoundaryFlags::CUT);
        assert_eq!(sub.flags(NodeId(1)), BoundaryFlags::DOMAIN_OUTER);
        assert_eq!(sub.flags(NodeId(6)), BoundaryFlags::empty());
        assert!(sub.is_cut_edge(Edge::new(NodeId(7), NodeId(11))));
        assert!(!sub.is_cut_edge(Edge::new(NodeId(1), NodeId(2))));

        assert_eq!(sub.nodes().len(), 12);
        assert_eq!(sub.new_node_id(NodeId(1)), Some(NodeId(1)));
        assert_eq!(sub.new_node_id(NodeId(5)), Some(NodeId(4)));
        assert_eq!(sub.new_node_id(NodeId(15)), Some(NodeId(12)));
        assert_eq!(sub.new_node_id(NodeId(4)), None);
        assert_eq!(sub.new_element_id(ElementId(7)), Some(ElementId(5)));
        assert_eq!(sub.new_element_id(ElementId(5)), None);
    }

    #[test]
    fn carved_mesh_is_standalone() {
        let mesh = grid(3);
        let domain = BoundaryFinder::new().find_all_boundaries(&mesh).unwrap();
        let carved = Subdomain::carve(&mesh, left_columns(), &domain)
            .unwrap()
            .to_mesh()
            .unwrap();
        assert_eq!(carved.num_nodes(), 12);
        assert_eq!(carved.num_elements(), 12);
        assert_eq!(carved.extents(), Rect::new(0.0, 0.0, 2.0, 3.0));

        // The carved mesh has no cut of its own: its whole perimeter is domain boundary.
        let own = BoundaryFinder::new().find_all_boundaries(&carved).unwrap();
        assert_eq!(own.outer.len(), 10);
        // Old element 9 spans old nodes 6, 7, 11; renumbered to 5, 6, 9.
        let e = carved.element(ElementId(7)).unwrap();
        assert_eq!(raw(&e.nodes), [5, 6, 9]);
    }

    #[test]
    fn hole_nodes_are_cut() {
        let mesh = grid(3);
        let domain = BoundaryFinder::new().find_all_boundaries(&mesh).unwrap();
        let ring = mesh.elements().iter().map(|e| e.id).filter(|e| !matches!(e.get(), 9 | 10));
        let sub = Subdomain::carve(&mesh, ring, &domain).unwrap();
        assert_eq!(raw(&sub.loops().inner[0]), [6, 10, 11, 7]);
        assert_eq!(sub.flags(NodeId(6)), BoundaryFlags::CUT);
        // The outer loop follows the domain perimeter throughout.
        assert!(sub.open_boundary_nodes().is_empty());
    }

    #[test]
    fn invalid_selection_is_rejected() {
        let mesh = grid(3);
        let domain = BoundaryFinder::new().find_all_boundaries(&mesh).unwrap();
        assert_eq!(
            Subdomain::carve(&mesh, [ElementId(1), ElementId(2)], &domain).unwrap_err(),
            BoundaryError::TooFewElements { found: 2 }
        );
        assert_eq!(
            Subdomain::carve(
                &mesh,
                [ElementId(1), ElementId(2), ElementId(17), ElementId(18)],
                &domain
            )
            .unwrap_err(),
            BoundaryError::Disconnected { components: 2 }
        );
    }
}
