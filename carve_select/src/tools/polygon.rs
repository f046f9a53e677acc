// Copyright 2025 the Carve Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Click-by-click polygon selection.

use alloc::collections::BTreeSet;
use alloc::vec::Vec;

use carve_mesh::ElementId;
use carve_quadtree::{Polygon, Quadtree, Region};
use kurbo::Point;

use super::{SearchTool, ToolEvent, ToolPhase};

/// Selects elements with a corner inside a polygon built from successive presses.
///
/// Each press appends a vertex. The ring closes when [`close`](Self::close) is called, or
/// when a press lands within the snap distance of the first vertex once three vertices
/// exist. Moves only track the cursor so a caller can draw the pending edge.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PolygonSearch {
    vertices: Vec<Point>,
    cursor: Option<Point>,
    snap_distance: f64,
    phase: ToolPhase,
}

impl PolygonSearch {
    /// Create an idle tool that closes only on an exact press on the first vertex.
    pub fn new() -> Self {
        Self::default()
    }

    /// Close the ring when a press is within `distance` of the first vertex.
    #[must_use]
    pub fn with_snap_distance(mut self, distance: f64) -> Self {
        self.snap_distance = distance;
        self
    }

    /// Snap distance in use.
    pub fn snap_distance(&self) -> f64 {
        self.snap_distance
    }

    /// Vertices collected so far.
    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }

    /// Last pointer position seen while active.
    pub fn cursor(&self) -> Option<Point> {
        self.cursor
    }

    /// The ring as a query polygon.
    pub fn polygon(&self) -> Polygon {
        Polygon::new(self.vertices.clone())
    }

    /// Finish the ring. Does nothing while idle.
    pub fn close(&mut self) -> ToolPhase {
        if self.phase == ToolPhase::Active {
            self.phase = ToolPhase::Finished;
        }
        self.phase
    }

    fn snaps_closed(&self, p: Point) -> bool {
        self.vertices.len() >= 3
            && self
                .vertices
                .first()
                .is_some_and(|&first| first.distance(p) <= self.snap_distance)
    }
}

impl SearchTool for PolygonSearch {
    fn handle(&mut self, event: ToolEvent) -> ToolPhase {
        match (self.phase, event) {
            (ToolPhase::Idle | ToolPhase::Finished, ToolEvent::Press(p)) => {
                self.vertices.clear();
                self.vertices.push(p);
                self.cursor = Some(p);
                self.phase = ToolPhase::Active;
            }
            (ToolPhase::Active, ToolEvent::Press(p)) => {
                if self.snaps_closed(p) {
                    self.phase = ToolPhase::Finished;
                } else {
                    self.vertices.push(p);
                }
                self.cursor = Some(p);
            }
            (ToolPhase::Active, ToolEvent::Move(p) | ToolEvent::Release(p)) => {
                self.cursor = Some(p);
            }
            _ => {}
        }
        self.phase
    }

    fn phase(&self) -> ToolPhase {
        self.phase
    }

    fn search(&self, tree: &Quadtree<'_>) -> BTreeSet<ElementId> {
        let polygon = self.polygon();
        if polygon.is_empty() {
            return BTreeSet::new();
        }
        tree.find_elements_in_polygon(&polygon)
    }

    fn reset(&mut self) {
        self.vertices.clear();
        self.cursor = None;
        self.phase = ToolPhase::Idle;
    }
}
