// Copyright 2025 the Carve Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Single-click picking.

use alloc::collections::BTreeSet;

use carve_mesh::{Element, ElementId, Node};
use carve_quadtree::Quadtree;
use kurbo::Point;

use super::{SearchTool, ToolEvent, ToolPhase};

/// Picks the node nearest to, or the element under, the last click.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ClickSearch {
    point: Option<Point>,
    phase: ToolPhase,
}

impl ClickSearch {
    /// Create an idle tool.
    pub fn new() -> Self {
        Self::default()
    }

    /// The last pressed point.
    pub fn point(&self) -> Option<Point> {
        self.point
    }

    /// Nearest node to the last click.
    pub fn find_node<'m>(&self, tree: &Quadtree<'m>) -> Option<&'m Node> {
        tree.find_nearest_node(self.point?)
    }

    /// Element strictly containing the last click.
    pub fn find_element<'m>(&self, tree: &Quadtree<'m>) -> Option<&'m Element> {
        tree.find_element_at(self.point?)
    }
}

impl SearchTool for ClickSearch {
    fn handle(&mut self, event: ToolEvent) -> ToolPhase {
        match (self.phase, event) {
            (ToolPhase::Idle | ToolPhase::Finished, ToolEvent::Press(p)) => {
                self.point = Some(p);
                self.phase = ToolPhase::Active;
            }
            (ToolPhase::Active, ToolEvent::Release(_)) => self.phase = ToolPhase::Finished,
            _ => {}
        }
        self.phase
    }

    fn phase(&self) -> ToolPhase {
        self.phase
    }

    fn search(&self, tree: &Quadtree<'_>) -> BTreeSet<ElementId> {
        self.find_element(tree).map(|e| e.id).into_iter().collect()
    }

    fn reset(&mut self) {
        *self = Self::default();
    }
}
