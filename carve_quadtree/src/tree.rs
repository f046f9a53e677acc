// Copyright 2025 the Carve Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The build-once quadtree.

use alloc::collections::BTreeSet;
use alloc::vec;
use alloc::vec::Vec;
use core::fmt::Debug;

use carve_mesh::{Element, ElementId, Mesh, Node, NodeId};
use kurbo::{Point, Rect};
use tracing::{debug, trace, warn};

use crate::config::{IndexMode, NearestMode, QuadtreeConfig};
use crate::error::BuildError;
use crate::geom::{distance2, distance2_to_rect, point_in_triangle, rect_contains, rects_overlap};
use crate::region::{CircleRegion, Containment, Polygon, RectRegion, Region};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
struct CellIdx(usize);

impl CellIdx {
    const fn new(i: usize) -> Self {
        Self(i)
    }

    const fn get(self) -> usize {
        self.0
    }
}

const ROOT: CellIdx = CellIdx::new(0);

/// Child slot of a split cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Quadrant {
    BottomLeft,
    BottomRight,
    TopLeft,
    TopRight,
}

impl Quadrant {
    const ALL: [Self; 4] = [
        Self::BottomLeft,
        Self::BottomRight,
        Self::TopLeft,
        Self::TopRight,
    ];

    /// Points on a midline go right or up, so every point lands in exactly one child.
    fn of(bounds: &Rect, p: Point) -> Self {
        let mid = bounds.center();
        match (p.x < mid.x, p.y < mid.y) {
            (true, true) => Self::BottomLeft,
            (false, true) => Self::BottomRight,
            (true, false) => Self::TopLeft,
            (false, false) => Self::TopRight,
        }
    }

    const fn index(self) -> usize {
        self as usize
    }

    fn bounds(self, r: &Rect) -> Rect {
        let m = r.center();
        match self {
            Self::BottomLeft => Rect::new(r.x0, r.y0, m.x, m.y),
            Self::BottomRight => Rect::new(m.x, r.y0, r.x1, m.y),
            Self::TopLeft => Rect::new(r.x0, m.y, m.x, r.y1),
            Self::TopRight => Rect::new(m.x, m.y, r.x1, r.y1),
        }
    }
}

enum Kind {
    Leaf {
        nodes: Vec<NodeId>,
        elements: Vec<ElementId>,
    },
    Branch {
        children: [CellIdx; 4],
    },
}

struct Cell {
    bounds: Rect,
    depth: u32,
    kind: Kind,
}

impl Cell {
    fn leaf(bounds: Rect, depth: u32) -> Self {
        Self {
            bounds,
            depth,
            kind: Kind::Leaf {
                nodes: Vec::new(),
                elements: Vec::new(),
            },
        }
    }
}

/// A borrowed view of one leaf cell.
#[derive(Copy, Clone, Debug)]
pub struct LeafView<'a> {
    /// Closed bounds of the cell.
    pub bounds: Rect,
    /// Depth below the root (the root is depth 0).
    pub depth: u32,
    /// Nodes stored in this leaf.
    pub nodes: &'a [NodeId],
    /// Elements whose bounding box touches this leaf, in id order.
    pub elements: &'a [ElementId],
}

/// Shape summary of a built tree.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct QuadtreeStats {
    /// All cells, branches included.
    pub cells: usize,
    /// Leaf cells.
    pub leaves: usize,
    /// Deepest leaf.
    pub depth: u32,
    /// Node entries across leaves. Equals the mesh node count.
    pub nodes: usize,
    /// Element entries across leaves. An element touching several leaves counts once per leaf.
    pub element_refs: usize,
    /// Leaves holding more than `bin_size` nodes because they hit the depth cap.
    pub overfull_leaves: usize,
}

/// A region quadtree over the nodes (and optionally the elements) of a [`Mesh`].
///
/// Built once from a borrowed mesh and never modified. Each node lives in exactly one
/// leaf. In [`IndexMode::NodesAndElements`] every element is also registered in each
/// leaf its bounding box touches, so element lookups only need to visit nearby leaves.
pub struct Quadtree<'m> {
    mesh: &'m Mesh,
    config: QuadtreeConfig,
    arena: Vec<Cell>,
}

impl Debug for Quadtree<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let stats = self.stats();
        f.debug_struct("Quadtree")
            .field("bounds", &self.bounds())
            .field("config", &self.config)
            .field("cells", &stats.cells)
            .field("leaves", &stats.leaves)
            .field("depth", &stats.depth)
            .finish_non_exhaustive()
    }
}

fn usable_bounds(b: &Rect) -> bool {
    b.x0 < b.x1 && b.y0 < b.y1 && b.width().is_finite() && b.height().is_finite()
}

impl<'m> Quadtree<'m> {
    /// Index `mesh` according to `config`.
    ///
    /// # Errors
    ///
    /// See [`BuildError`]. A mesh whose extents have no area (a single node, or nodes on
    /// one line) needs explicit [`bounds`](QuadtreeConfig::bounds).
    pub fn build(mesh: &'m Mesh, config: &QuadtreeConfig) -> Result<Self, BuildError> {
        if config.bin_size == 0 {
            return Err(BuildError::ZeroBinSize);
        }
        let bounds = config
            .bounds
            .unwrap_or_else(|| mesh.extents_in(config.space));
        if !usable_bounds(&bounds) {
            return Err(BuildError::DegenerateBounds { bounds });
        }
        if config.bounds.is_some()
            && let Some(outside) = mesh
                .nodes()
                .iter()
                .find(|n| !rect_contains(&bounds, n.position_in(config.space)))
        {
            return Err(BuildError::NodeOutsideBounds { node: outside.id });
        }

        let mut tree = Self {
            mesh,
            config: *config,
            arena: vec![Cell::leaf(bounds, 0)],
        };
        for node in mesh.nodes() {
            tree.insert_node(node.id, node.position_in(config.space));
        }
        if config.mode == IndexMode::NodesAndElements {
            let mut stack = Vec::new();
            for element in mesh.elements() {
                tree.insert_element(element, &mut stack);
            }
        }

        let stats = tree.stats();
        debug!(
            cells = stats.cells,
            leaves = stats.leaves,
            depth = stats.depth,
            nodes = stats.nodes,
            element_refs = stats.element_refs,
            "built quadtree"
        );
        Ok(tree)
    }

    /// The indexed mesh.
    pub fn mesh(&self) -> &'m Mesh {
        self.mesh
    }

    /// The configuration the tree was built with.
    pub fn config(&self) -> &QuadtreeConfig {
        &self.config
    }

    /// Root bounds.
    pub fn bounds(&self) -> Rect {
        self.arena[ROOT.get()].bounds
    }

    fn position(&self, id: NodeId) -> Point {
        self.mesh.nodes()[id.index()].position_in(self.config.space)
    }

    fn can_split(&self, at: CellIdx) -> bool {
        let cell = &self.arena[at.get()];
        let b = &cell.bounds;
        let mid = b.center();
        cell.depth < self.config.max_depth
            && b.x0 < mid.x
            && mid.x < b.x1
            && b.y0 < mid.y
            && mid.y < b.y1
    }

    fn insert_node(&mut self, id: NodeId, p: Point) {
        let bin_size = self.config.bin_size;
        let mut at = ROOT;
        loop {
            let cell = &self.arena[at.get()];
            let len = match &cell.kind {
                Kind::Branch { children } => {
                    at = children[Quadrant::of(&cell.bounds, p).index()];
                    continue;
                }
                Kind::Leaf { nodes, .. } => nodes.len(),
            };
            if len >= bin_size && self.can_split(at) {
                self.split(at);
                continue;
            }
            let cell = &mut self.arena[at.get()];
            if len == bin_size {
                warn!(
                    depth = cell.depth,
                    bin_size, "leaf cannot split further; allowing it to overflow"
                );
            }
            if let Kind::Leaf { nodes, .. } = &mut cell.kind {
                nodes.push(id);
            }
            return;
        }
    }

    fn split(&mut self, at: CellIdx) {
        let bounds = self.arena[at.get()].bounds;
        let depth = self.arena[at.get()].depth + 1;
        let first = self.arena.len();
        for q in Quadrant::ALL {
            self.arena.push(Cell::leaf(q.bounds(&bounds), depth));
        }
        let children = Quadrant::ALL.map(|q| CellIdx::new(first + q.index()));
        let old = core::mem::replace(&mut self.arena[at.get()].kind, Kind::Branch { children });
        if let Kind::Leaf { nodes, .. } = old {
            for id in nodes {
                let q = Quadrant::of(&bounds, self.position(id));
                if let Kind::Leaf { nodes, .. } = &mut self.arena[children[q.index()].get()].kind {
                    nodes.push(id);
                }
            }
        }
    }

    fn insert_element(&mut self, element: &Element, stack: &mut Vec<CellIdx>) {
        let Some(bbox) = self.mesh.element_bounds(element, self.config.space) else {
            return;
        };
        stack.clear();
        stack.push(ROOT);
        while let Some(at) = stack.pop() {
            let cell = &mut self.arena[at.get()];
            if !rects_overlap(&cell.bounds, &bbox) {
                continue;
            }
            match &mut cell.kind {
                Kind::Leaf { elements, .. } => elements.push(element.id),
                Kind::Branch { children } => stack.extend(children.iter().copied()),
            }
        }
    }

    fn leaf_index(&self, p: Point) -> Option<CellIdx> {
        if !rect_contains(&self.bounds(), p) {
            return None;
        }
        let mut at = ROOT;
        while let Kind::Branch { children } = &self.arena[at.get()].kind {
            at = children[Quadrant::of(&self.arena[at.get()].bounds, p).index()];
        }
        Some(at)
    }

    fn view(&self, at: CellIdx) -> Option<LeafView<'_>> {
        let cell = &self.arena[at.get()];
        match &cell.kind {
            Kind::Leaf { nodes, elements } => Some(LeafView {
                bounds: cell.bounds,
                depth: cell.depth,
                nodes,
                elements,
            }),
            Kind::Branch { .. } => None,
        }
    }

    /// The leaf whose cell contains `point`, or `None` outside the root bounds.
    pub fn leaf_of(&self, point: Point) -> Option<LeafView<'_>> {
        self.view(self.leaf_index(point)?)
    }

    /// Iterate all leaves in arena order.
    pub fn leaves(&self) -> impl Iterator<Item = LeafView<'_>> + '_ {
        (0..self.arena.len()).filter_map(|i| self.view(CellIdx::new(i)))
    }

    /// Best `(distance², id)` among `ids`, seeded with `best`. Ties go to the smaller id.
    fn closest(
        &self,
        p: Point,
        ids: &[NodeId],
        best: Option<(f64, NodeId)>,
    ) -> Option<(f64, NodeId)> {
        ids.iter().fold(best, |best, &id| {
            let d = distance2(p, self.position(id));
            match best {
                Some((bd, bid)) if bd < d || (bd == d && bid < id) => Some((bd, bid)),
                _ => Some((d, id)),
            }
        })
    }

    fn nearest_local(&self, p: Point) -> Option<NodeId> {
        let leaf = self.view(self.leaf_index(p)?)?;
        self.closest(p, leaf.nodes, None).map(|(_, id)| id)
    }

    fn nearest_exact(&self, p: Point) -> Option<NodeId> {
        if !rect_contains(&self.bounds(), p) {
            return None;
        }
        let mut best = None;
        let mut stack = vec![ROOT];
        while let Some(at) = stack.pop() {
            let cell = &self.arena[at.get()];
            if let Some((bd, _)) = best
                && distance2_to_rect(p, &cell.bounds) > bd
            {
                continue;
            }
            match &cell.kind {
                Kind::Leaf { nodes, .. } => best = self.closest(p, nodes, best),
                Kind::Branch { children } => {
                    let mut order = *children;
                    // Farthest first, so the nearest child is popped next.
                    order.sort_unstable_by(|a, b| {
                        let da = distance2_to_rect(p, &self.arena[a.get()].bounds);
                        let db = distance2_to_rect(p, &self.arena[b.get()].bounds);
                        db.total_cmp(&da)
                    });
                    stack.extend(order);
                }
            }
        }
        best.map(|(_, id)| id)
    }

    /// The node nearest to `point`, using the configured [`NearestMode`].
    ///
    /// Returns `None` when `point` is outside the root bounds, when the tree is empty, or
    /// (in [`NearestMode::Local`]) when the leaf under `point` holds no nodes.
    pub fn find_nearest_node(&self, point: Point) -> Option<&'m Node> {
        let found = match self.config.nearest {
            NearestMode::Local => self.nearest_local(point),
            NearestMode::Exact => self.nearest_exact(point),
        };
        trace!(x = point.x, y = point.y, found = ?found, "nearest node query");
        let mesh = self.mesh;
        found.and_then(|id| mesh.node(id))
    }

    /// The element strictly containing `point`.
    ///
    /// A point on an edge shared by two elements selects neither. Always `None` for a
    /// [`IndexMode::NodesOnly`] tree.
    pub fn find_element_at(&self, point: Point) -> Option<&'m Element> {
        let leaf = self.leaf_of(point)?;
        let mesh = self.mesh;
        let found = leaf
            .elements
            .iter()
            .filter_map(|&id| mesh.element(id))
            .find(|e| {
                mesh.triangle(e, self.config.space)
                    .is_some_and(|tri| point_in_triangle(point, tri))
            });
        trace!(x = point.x, y = point.y, found = ?found.map(|e| e.id), "element pick");
        found
    }

    /// Leaves that intersect `region`, each tagged with how its cell relates to it.
    fn leaves_in<R: Region + ?Sized>(&self, region: &R) -> Vec<(CellIdx, Containment)> {
        let mut out = Vec::new();
        let mut stack = vec![(ROOT, Containment::Partial)];
        while let Some((at, parent)) = stack.pop() {
            let cell = &self.arena[at.get()];
            let here = match parent {
                Containment::Inside => Containment::Inside,
                _ => region.classify(&cell.bounds),
            };
            match (here, &cell.kind) {
                (Containment::Outside, _) => {}
                (_, Kind::Leaf { .. }) => out.push((at, here)),
                (_, Kind::Branch { children }) => {
                    stack.extend(children.iter().map(|&child| (child, here)));
                }
            }
        }
        out
    }

    /// Every node inside `region` (closed test).
    pub fn find_nodes_in<R: Region + ?Sized>(&self, region: &R) -> BTreeSet<NodeId> {
        let mut found = BTreeSet::new();
        if region.is_empty() {
            return found;
        }
        for (at, containment) in self.leaves_in(region) {
            let Kind::Leaf { nodes, .. } = &self.arena[at.get()].kind else {
                continue;
            };
            if containment == Containment::Inside {
                found.extend(nodes.iter().copied());
            } else {
                found.extend(
                    nodes
                        .iter()
                        .copied()
                        .filter(|&id| region.contains(self.position(id))),
                );
            }
        }
        trace!(found = found.len(), "node range query");
        found
    }

    /// Elements matched by `region`.
    ///
    /// Leaves fully inside the region contribute every element registered in them. In
    /// leaves crossing the region's edge an element matches when any of its corner nodes
    /// lies in the region.
    pub fn find_elements_in<R: Region + ?Sized>(&self, region: &R) -> BTreeSet<ElementId> {
        let mut found = BTreeSet::new();
        if region.is_empty() || self.config.mode == IndexMode::NodesOnly {
            return found;
        }
        for (at, containment) in self.leaves_in(region) {
            let Kind::Leaf { elements, .. } = &self.arena[at.get()].kind else {
                continue;
            };
            if containment == Containment::Inside {
                found.extend(elements.iter().copied());
                continue;
            }
            for &id in elements {
                if found.contains(&id) {
                    continue;
                }
                let hit = self.mesh.element(id).is_some_and(|e| {
                    e.nodes
                        .iter()
                        .any(|&n| region.contains(self.position(n)))
                });
                if hit {
                    found.insert(id);
                }
            }
        }
        trace!(found = found.len(), "element range query");
        found
    }

    /// Nodes within `radius` of `center`. Empty for a non-positive radius.
    pub fn find_nodes_in_circle(&self, center: Point, radius: f64) -> BTreeSet<NodeId> {
        self.find_nodes_in(&CircleRegion::new(center, radius))
    }

    /// Elements with a corner within `radius` of `center`.
    pub fn find_elements_in_circle(&self, center: Point, radius: f64) -> BTreeSet<ElementId> {
        self.find_elements_in(&CircleRegion::new(center, radius))
    }

    /// Elements with a corner inside `rect`. Empty for an inverted or zero-area rectangle.
    pub fn find_elements_in_rectangle(&self, rect: Rect) -> BTreeSet<ElementId> {
        self.find_elements_in(&RectRegion(rect))
    }

    /// Elements with a corner inside `polygon`.
    pub fn find_elements_in_polygon(&self, polygon: &Polygon) -> BTreeSet<ElementId> {
        self.find_elements_in(polygon)
    }

    /// Group elements by the cells at `depth`.
    ///
    /// Produces one group per cell at exactly `depth`, or per leaf that ends above it,
    /// holding the sorted, deduplicated elements registered anywhere beneath that cell.
    /// Groups come out in bottom-left, bottom-right, top-left, top-right order at each
    /// level. With `within`, only cells touching that rectangle are visited. Empty groups
    /// are skipped.
    pub fn elements_through_depth(&self, depth: u32, within: Option<Rect>) -> Vec<Vec<ElementId>> {
        let mut groups = Vec::new();
        if self.config.mode == IndexMode::NodesOnly {
            return groups;
        }
        let mut stack = vec![ROOT];
        while let Some(at) = stack.pop() {
            let cell = &self.arena[at.get()];
            if let Some(r) = &within
                && !rects_overlap(&cell.bounds, r)
            {
                continue;
            }
            match &cell.kind {
                Kind::Branch { children } if cell.depth < depth => {
                    stack.extend(children.iter().rev().copied());
                }
                _ => {
                    let group = self.elements_under(at);
                    if !group.is_empty() {
                        groups.push(group);
                    }
                }
            }
        }
        groups
    }

    fn elements_under(&self, at: CellIdx) -> Vec<ElementId> {
        let mut set = BTreeSet::new();
        let mut stack = vec![at];
        while let Some(i) = stack.pop() {
            match &self.arena[i.get()].kind {
                Kind::Leaf { elements, .. } => set.extend(elements.iter().copied()),
                Kind::Branch { children } => stack.extend(children.iter().copied()),
            }
        }
        set.into_iter().collect()
    }

    /// Shape summary.
    pub fn stats(&self) -> QuadtreeStats {
        let bin_size = self.config.bin_size;
        let mut stats = QuadtreeStats {
            cells: self.arena.len(),
            ..QuadtreeStats::default()
        };
        for leaf in self.leaves() {
            stats.leaves += 1;
            stats.depth = stats.depth.max(leaf.depth);
            stats.nodes += leaf.nodes.len();
            stats.element_refs += leaf.elements.len();
            if leaf.nodes.len() > bin_size {
                stats.overfull_leaves += 1;
            }
        }
        stats
    }

    /// Bounds of every cell, branches included, for callers that want to draw the tree.
    pub fn cell_outlines(&self) -> Vec<Rect> {
        self.arena.iter().map(|c| c.bounds).collect()
    }
}
