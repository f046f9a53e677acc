// Copyright 2025 the Carve Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Press-and-drag circle selection.

use alloc::collections::BTreeSet;

use carve_mesh::ElementId;
use carve_quadtree::Quadtree;
use kurbo::Point;

use super::{SearchTool, ToolEvent, ToolPhase};

/// Live circle parameters, for drawing the rubber band and a status read-out.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct CircleStats {
    /// Center x.
    pub x: f64,
    /// Center y.
    pub y: f64,
    /// Current radius.
    pub radius: f64,
}

/// Selects elements with a corner inside a circle.
///
/// Press sets the center, moving sets a point on the rim, and release finishes.
/// A press released without moving has zero radius and selects nothing.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CircleSearch {
    center: Point,
    rim: Point,
    phase: ToolPhase,
}

impl CircleSearch {
    /// Create an idle tool.
    pub fn new() -> Self {
        Self::default()
    }

    /// Circle center.
    pub fn center(&self) -> Point {
        self.center
    }

    /// Distance from the center to the rim point.
    pub fn radius(&self) -> f64 {
        self.center.distance(self.rim)
    }

    /// Current center and radius.
    pub fn stats(&self) -> CircleStats {
        CircleStats {
            x: self.center.x,
            y: self.center.y,
            radius: self.radius(),
        }
    }
}

impl SearchTool for CircleSearch {
    fn handle(&mut self, event: ToolEvent) -> ToolPhase {
        match (self.phase, event) {
            (ToolPhase::Idle | ToolPhase::Finished, ToolEvent::Press(p)) => {
                self.center = p;
                self.rim = p;
                self.phase = ToolPhase::Active;
            }
            (ToolPhase::Active, ToolEvent::Move(p)) => self.rim = p,
            (ToolPhase::Active, ToolEvent::Release(p)) => {
                self.rim = p;
                self.phase = ToolPhase::Finished;
            }
            _ => {}
        }
        self.phase
    }

    fn phase(&self) -> ToolPhase {
        self.phase
    }

    fn search(&self, tree: &Quadtree<'_>) -> BTreeSet<ElementId> {
        if self.phase == ToolPhase::Idle {
            return BTreeSet::new();
        }
        tree.find_elements_in_circle(self.center, self.radius())
    }

    fn reset(&mut self) {
        *self = Self::default();
    }
}
