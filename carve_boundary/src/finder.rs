// Copyright 2025 the Carve Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Boundary loops of element sets.

use alloc::collections::{BTreeMap, BTreeSet};
use alloc::vec;
use alloc::vec::Vec;

use carve_mesh::{Element, ElementId, Mesh, NodeId};
use tracing::{debug, warn};

use crate::edge::{Edge, EdgeCounts};
use crate::error::BoundaryError;

/// Minimum number of elements a selection needs before its boundary is traced.
pub const MIN_ELEMENTS: usize = 3;

/// Ordered boundary loops of one element set.
///
/// The outer loop runs counter-clockwise and every inner loop (hole) clockwise, so the
/// selected area is always on the left. Each loop starts at its smallest node id and
/// does not repeat that node at the end.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BoundaryLoops {
    /// The enclosing loop.
    pub outer: Vec<NodeId>,
    /// Holes, ordered by their first node.
    pub inner: Vec<Vec<NodeId>>,
}

impl BoundaryLoops {
    /// Every node on any loop.
    pub fn nodes(&self) -> BTreeSet<NodeId> {
        self.outer
            .iter()
            .chain(self.inner.iter().flatten())
            .copied()
            .collect()
    }

    /// Consecutive node pairs of every loop, closing each loop.
    pub fn edges(&self) -> impl Iterator<Item = Edge> + '_ {
        core::iter::once(&self.outer)
            .chain(self.inner.iter())
            .flat_map(|ring| {
                let n = ring.len();
                (0..n).map(move |i| Edge::new(ring[i], ring[(i + 1) % n]))
            })
    }
}

/// Whole-domain boundary classification.
///
/// Computed once per mesh; carving a subdomain compares its loops against it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Boundaries {
    /// Nodes on the domain's outer perimeter.
    pub outer: BTreeSet<NodeId>,
    /// Nodes on interior holes (islands). Disjoint from `outer`.
    pub inner: BTreeSet<NodeId>,
    /// The loops themselves.
    pub loops: BoundaryLoops,
    edges: BTreeSet<Edge>,
}

impl Boundaries {
    /// Whether `edge` lies on the domain boundary (outer or inner).
    pub fn is_domain_edge(&self, edge: Edge) -> bool {
        self.edges.contains(&edge)
    }
}

/// Extracts boundary loops from element sets.
///
/// Holds no state: every call rebuilds its edge map and adjacency from its input, so one
/// finder can serve any number of meshes and selections.
#[derive(Copy, Clone, Debug, Default)]
pub struct BoundaryFinder;

impl BoundaryFinder {
    /// Create a finder.
    pub const fn new() -> Self {
        Self
    }

    /// The ordered outer loop of a selection.
    ///
    /// # Errors
    ///
    /// See [`trace`](Self::trace).
    pub fn find_boundaries<I>(&self, mesh: &Mesh, selection: I) -> Result<Vec<NodeId>, BoundaryError>
    where
        I: IntoIterator<Item = ElementId>,
    {
        self.trace(mesh, selection).map(|loops| loops.outer)
    }

    /// The ordered hole loops of a selection. Empty if the selection has no holes.
    ///
    /// # Errors
    ///
    /// See [`trace`](Self::trace).
    pub fn find_inner_boundaries<I>(
        &self,
        mesh: &Mesh,
        selection: I,
    ) -> Result<Vec<Vec<NodeId>>, BoundaryError>
    where
        I: IntoIterator<Item = ElementId>,
    {
        self.trace(mesh, selection).map(|loops| loops.inner)
    }

    /// Outer and inner loops of a selection.
    ///
    /// Duplicate ids are ignored. The outer loop is the one enclosing the largest area.
    ///
    /// # Errors
    ///
    /// - [`BoundaryError::TooFewElements`] for fewer than [`MIN_ELEMENTS`] distinct ids.
    /// - [`BoundaryError::UnknownElement`] for an id outside the mesh.
    /// - [`BoundaryError::Disconnected`] when the elements do not form one edge-connected
    ///   piece.
    /// - [`BoundaryError::NonManifoldNode`] when the boundary pinches at a node.
    pub fn trace<I>(&self, mesh: &Mesh, selection: I) -> Result<BoundaryLoops, BoundaryError>
    where
        I: IntoIterator<Item = ElementId>,
    {
        let ids: BTreeSet<ElementId> = selection.into_iter().collect();
        let result = Self::trace_ids(mesh, &ids);
        match &result {
            Ok(loops) => debug!(
                elements = ids.len(),
                outer = loops.outer.len(),
                holes = loops.inner.len(),
                "traced selection boundary"
            ),
            Err(err) => warn!(elements = ids.len(), %err, "selection rejected"),
        }
        result
    }

    fn trace_ids(mesh: &Mesh, ids: &BTreeSet<ElementId>) -> Result<BoundaryLoops, BoundaryError> {
        if ids.len() < MIN_ELEMENTS {
            return Err(BoundaryError::TooFewElements { found: ids.len() });
        }
        let elements = ids
            .iter()
            .map(|&id| {
                mesh.element(id)
                    .ok_or(BoundaryError::UnknownElement { element: id })
            })
            .collect::<Result<Vec<_>, _>>()?;
        let components = count_components(&elements);
        if components > 1 {
            return Err(BoundaryError::Disconnected { components });
        }
        let counts = EdgeCounts::from_elements(elements.iter().copied());
        let rings = walk_loops(&counts.adjacency())?;
        Ok(orient_loops(mesh, rings))
    }

    /// Outer perimeter and hole nodes of the whole mesh.
    ///
    /// Unlike [`trace`](Self::trace) this accepts any non-empty mesh, including a single
    /// triangle, and does not require the mesh to be connected: loops other than the one
    /// enclosing the largest area are reported as inner.
    ///
    /// # Errors
    ///
    /// [`BoundaryError::TooFewElements`] for a mesh without elements, and
    /// [`BoundaryError::NonManifoldNode`] when the mesh boundary pinches.
    pub fn find_all_boundaries(&self, mesh: &Mesh) -> Result<Boundaries, BoundaryError> {
        if mesh.num_elements() == 0 {
            return Err(BoundaryError::TooFewElements { found: 0 });
        }
        let counts = EdgeCounts::from_elements(mesh.elements());
        let rings = walk_loops(&counts.adjacency())?;
        let loops = orient_loops(mesh, rings);
        let outer: BTreeSet<NodeId> = loops.outer.iter().copied().collect();
        let inner: BTreeSet<NodeId> = loops.inner.iter().flatten().copied().collect();
        debug!(
            outer = outer.len(),
            inner = inner.len(),
            holes = loops.inner.len(),
            "classified domain boundary"
        );
        Ok(Boundaries {
            outer,
            inner,
            edges: counts.boundary_edges().collect(),
            loops,
        })
    }
}

fn find_root(parent: &mut [usize], mut i: usize) -> usize {
    while parent[i] != i {
        parent[i] = parent[parent[i]];
        i = parent[i];
    }
    i
}

/// Number of edge-connected pieces, by union-find over shared edges.
fn count_components(elements: &[&Element]) -> usize {
    let mut parent: Vec<usize> = (0..elements.len()).collect();
    let mut first_user: BTreeMap<Edge, usize> = BTreeMap::new();
    for (i, element) in elements.iter().enumerate() {
        for (x, y) in element.edges() {
            let j = *first_user.entry(Edge::new(x, y)).or_insert(i);
            let (ri, rj) = (find_root(&mut parent, i), find_root(&mut parent, j));
            if ri != rj {
                parent[ri] = rj;
            }
        }
    }
    (0..elements.len())
        .filter(|&i| find_root(&mut parent, i) == i)
        .count()
}

/// Split the boundary graph into closed node rings.
fn walk_loops(adjacency: &BTreeMap<NodeId, Vec<NodeId>>) -> Result<Vec<Vec<NodeId>>, BoundaryError> {
    for (&node, neighbours) in adjacency {
        match neighbours.len() {
            2 => {}
            n if n > 2 => {
                return Err(BoundaryError::NonManifoldNode {
                    node,
                    neighbours: n,
                });
            }
            _ => return Err(BoundaryError::OpenBoundary { node }),
        }
    }

    let mut visited = BTreeSet::new();
    let mut rings = Vec::new();
    for (&start, neighbours) in adjacency {
        if !visited.insert(start) {
            continue;
        }
        let mut ring = vec![start];
        let (mut prev, mut cur) = (start, neighbours[0]);
        while cur != start {
            if !visited.insert(cur) {
                return Err(BoundaryError::OpenBoundary { node: cur });
            }
            ring.push(cur);
            let next = adjacency
                .get(&cur)
                .ok_or(BoundaryError::OpenBoundary { node: cur })?;
            let step = if next[0] == prev { next[1] } else { next[0] };
            (prev, cur) = (cur, step);
        }
        rings.push(ring);
    }
    Ok(rings)
}

/// Twice the signed area enclosed by a ring, positive when counter-clockwise.
fn ring_area2(mesh: &Mesh, ring: &[NodeId]) -> f64 {
    let pts: Vec<_> = ring
        .iter()
        .filter_map(|&id| mesh.node(id))
        .map(|n| n.position.to_vec2())
        .collect();
    let n = pts.len();
    (0..n).map(|i| pts[i].cross(pts[(i + 1) % n])).sum()
}

fn normalize_ring(mut ring: Vec<NodeId>, area2: f64, counter_clockwise: bool) -> Vec<NodeId> {
    if (area2 > 0.0) != counter_clockwise {
        ring.reverse();
    }
    if let Some(start) = ring
        .iter()
        .enumerate()
        .min_by_key(|&(_, id)| *id)
        .map(|(i, _)| i)
    {
        ring.rotate_left(start);
    }
    ring
}

/// Pick the outer ring by enclosed area and orient every ring.
fn orient_loops(mesh: &Mesh, rings: Vec<Vec<NodeId>>) -> BoundaryLoops {
    let mut measured: Vec<(f64, Vec<NodeId>)> =
        rings.into_iter().map(|r| (ring_area2(mesh, &r), r)).collect();
    let outer_at = measured
        .iter()
        .enumerate()
        .max_by(|(_, a), (_, b)| {
            let (a, b) = (a.0 * a.0, b.0 * b.0);
            a.total_cmp(&b)
        })
        .map(|(i, _)| i);
    let Some(outer_at) = outer_at else {
        return BoundaryLoops::default();
    };
    let (area2, ring) = measured.swap_remove(outer_at);
    let outer = normalize_ring(ring, area2, true);
    let mut inner: Vec<Vec<NodeId>> = measured
        .into_iter()
        .map(|(area2, ring)| normalize_ring(ring, area2, false))
        .collect();
    inner.sort();
    BoundaryLoops { outer, inner }
}
