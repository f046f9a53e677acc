// Copyright 2025 the Carve Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Press-and-drag rectangle selection.

use alloc::collections::BTreeSet;

use carve_mesh::ElementId;
use carve_quadtree::Quadtree;
use kurbo::{Point, Rect};

use super::{SearchTool, ToolEvent, ToolPhase};

/// Live rectangle size.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct RectangleStats {
    /// Width of the dragged rectangle.
    pub width: f64,
    /// Height of the dragged rectangle.
    pub height: f64,
}

/// Selects elements with a corner inside an axis-aligned rectangle.
///
/// Press anchors one corner; the opposite corner follows the pointer until release.
/// Dragging in any direction works.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RectangleSearch {
    anchor: Point,
    corner: Point,
    phase: ToolPhase,
}

impl RectangleSearch {
    /// Create an idle tool.
    pub fn new() -> Self {
        Self::default()
    }

    /// The dragged rectangle, with positive width and height.
    pub fn rect(&self) -> Rect {
        Rect::from_points(self.anchor, self.corner)
    }

    /// Width and height of [`rect`](Self::rect).
    pub fn stats(&self) -> RectangleStats {
        let r = self.rect();
        RectangleStats {
            width: r.width(),
            height: r.height(),
        }
    }
}

impl SearchTool for RectangleSearch {
    fn handle(&mut self, event: ToolEvent) -> ToolPhase {
        match (self.phase, event) {
            (ToolPhase::Idle | ToolPhase::Finished, ToolEvent::Press(p)) => {
                self.anchor = p;
                self.corner = p;
                self.phase = ToolPhase::Active;
            }
            (ToolPhase::Active, ToolEvent::Move(p)) => self.corner = p,
            (ToolPhase::Active, ToolEvent::Release(p)) => {
                self.corner = p;
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
        tree.find_elements_in_rectangle(self.rect())
    }

    fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::test_mesh::grid;
    use carve_quadtree::QuadtreeConfig;

    #[test]
    fn drag_up_and_left_normalizes() {
        let mut tool = RectangleSearch::new();
        tool.handle(ToolEvent::Press(Point::new(3.0, 4.0)));
        tool.handle(ToolEvent::Move(Point::new(1.0, 1.0)));
        assert_eq!(tool.rect(), Rect::new(1.0, 1.0, 3.0, 4.0));
        assert_eq!(
            tool.stats(),
            RectangleStats {
                width: 2.0,
                height: 3.0
            }
        );
    }

    #[test]
    fn finished_rectangle_searches_tree() {
        let mesh = grid(4);
        let tree = Quadtree::build(&mesh, &QuadtreeConfig::default()).unwrap();
        let mut tool = RectangleSearch::new();
        tool.handle(ToolEvent::Press(Point::new(1.5, 1.5)));
        tool.handle(ToolEvent::Move(Point::new(0.9, 0.9)));
        tool.handle(ToolEvent::Release(Point::new(0.5, 0.5)));
        let found: alloc::vec::Vec<u32> = tool.search(&tree).into_iter().map(|e| e.get()).collect();
        assert_eq!(found, [1, 2, 4, 9, 11, 12]);
    }

    #[test]
    fn zero_area_drag_selects_nothing() {
        let mesh = grid(2);
        let tree = Quadtree::build(&mesh, &QuadtreeConfig::default()).unwrap();
        let mut tool = RectangleSearch::new();
        tool.handle(ToolEvent::Press(Point::new(0.0, 1.0)));
        tool.handle(ToolEvent::Release(Point::new(2.0, 1.0)));
        assert!(tool.search(&tree).is_empty());
    }
}
