// Copyright 2025 the Carve Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A selection session: one active tool, a select/deselect mode, and the history.

use alloc::vec::Vec;

use carve_quadtree::Quadtree;
use tracing::debug;

use crate::history::{HistoryEvent, SelectionHistory};
use crate::selection::Selection;
use crate::tools::{
    CircleSearch, ClickSearch, PolygonSearch, RectangleSearch, SearchTool, ToolEvent, ToolPhase,
};

/// Which search tool receives pointer events.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum ToolKind {
    /// [`ClickSearch`].
    Click,
    /// [`CircleSearch`].
    #[default]
    Circle,
    /// [`RectangleSearch`].
    Rectangle,
    /// [`PolygonSearch`].
    Polygon,
}

/// Whether a finished search adds to or removes from the selection.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum SelectionMode {
    /// Union the found elements into the selection.
    #[default]
    Select,
    /// Subtract the found elements from the selection.
    Deselect,
}

/// Routes pointer events to the active tool and commits finished searches.
///
/// ```
/// use carve_mesh::Mesh;
/// use carve_quadtree::{Quadtree, QuadtreeConfig};
/// use carve_select::{SelectionSession, ToolEvent, ToolKind};
/// use kurbo::Point;
///
/// let mesh = Mesh::from_parts(
///     &[[0.0, 0.0, 0.0], [4.0, 0.0, 0.0], [4.0, 4.0, 0.0], [0.0, 4.0, 0.0]],
///     &[[1, 2, 3], [1, 3, 4]],
/// )
/// .unwrap();
/// let tree = Quadtree::build(&mesh, &QuadtreeConfig::default()).unwrap();
///
/// let mut session = SelectionSession::new(&tree);
/// session.use_tool(ToolKind::Click);
/// session.handle(ToolEvent::Press(Point::new(3.0, 1.0)));
/// session.handle(ToolEvent::Release(Point::new(3.0, 1.0)));
/// assert_eq!(session.selection().len(), 1);
/// ```
#[derive(Debug)]
pub struct SelectionSession<'t, 'm> {
    tree: &'t Quadtree<'m>,
    active: ToolKind,
    mode: SelectionMode,
    click: ClickSearch,
    circle: CircleSearch,
    rectangle: RectangleSearch,
    polygon: PolygonSearch,
    history: SelectionHistory,
}

impl<'t, 'm> SelectionSession<'t, 'm> {
    /// Start a session on `tree` with the circle tool in select mode.
    pub fn new(tree: &'t Quadtree<'m>) -> Self {
        Self {
            tree,
            active: ToolKind::default(),
            mode: SelectionMode::default(),
            click: ClickSearch::new(),
            circle: CircleSearch::new(),
            rectangle: RectangleSearch::new(),
            polygon: PolygonSearch::new(),
            history: SelectionHistory::new(),
        }
    }

    /// Set the polygon tool's snap distance.
    #[must_use]
    pub fn with_snap_distance(mut self, distance: f64) -> Self {
        self.polygon = PolygonSearch::new().with_snap_distance(distance);
        self
    }

    /// The indexed tree.
    pub fn tree(&self) -> &'t Quadtree<'m> {
        self.tree
    }

    /// Active tool.
    pub fn tool(&self) -> ToolKind {
        self.active
    }

    /// Current mode.
    pub fn mode(&self) -> SelectionMode {
        self.mode
    }

    /// Switch tools. Any half-finished interaction of the old tool is discarded.
    pub fn use_tool(&mut self, kind: ToolKind) {
        self.tool_mut().reset();
        self.active = kind;
    }

    /// Switch between selecting and deselecting.
    pub fn set_mode(&mut self, mode: SelectionMode) {
        self.mode = mode;
    }

    /// The current selection.
    pub fn selection(&self) -> &Selection {
        self.history.current()
    }

    /// The undo/redo history.
    pub fn history(&self) -> &SelectionHistory {
        &self.history
    }

    /// The click tool, for reading its last point.
    pub fn click_tool(&self) -> &ClickSearch {
        &self.click
    }

    /// The circle tool, for drawing its rubber band.
    pub fn circle_tool(&self) -> &CircleSearch {
        &self.circle
    }

    /// The rectangle tool, for drawing its rubber band.
    pub fn rectangle_tool(&self) -> &RectangleSearch {
        &self.rectangle
    }

    /// The polygon tool, for drawing its pending ring.
    pub fn polygon_tool(&self) -> &PolygonSearch {
        &self.polygon
    }

    fn tool_mut(&mut self) -> &mut dyn SearchTool {
        match self.active {
            ToolKind::Click => &mut self.click,
            ToolKind::Circle => &mut self.circle,
            ToolKind::Rectangle => &mut self.rectangle,
            ToolKind::Polygon => &mut self.polygon,
        }
    }

    /// Forward a pointer event to the active tool.
    ///
    /// When the tool finishes, its query runs and the result is committed according to
    /// the mode. Returns the history transitions that caused.
    pub fn handle(&mut self, event: ToolEvent) -> Vec<HistoryEvent> {
        match self.tool_mut().handle(event) {
            ToolPhase::Finished => self.commit(),
            ToolPhase::Idle | ToolPhase::Active => Vec::new(),
        }
    }

    /// Close the polygon ring and commit it. Does nothing unless the polygon tool is
    /// active and has started.
    pub fn close_polygon(&mut self) -> Vec<HistoryEvent> {
        if self.active == ToolKind::Polygon && self.polygon.close() == ToolPhase::Finished {
            self.commit()
        } else {
            Vec::new()
        }
    }

    fn commit(&mut self) -> Vec<HistoryEvent> {
        let tree = self.tree;
        let tool = self.tool_mut();
        let found = tool.search(tree);
        tool.reset();
        let before = self.history.current().len();
        let events = match self.mode {
            SelectionMode::Select => self.history.select(&found),
            SelectionMode::Deselect => self.history.deselect(&found),
        };
        debug!(
            tool = ?self.active,
            mode = ?self.mode,
            found = found.len(),
            before,
            after = self.history.current().len(),
            "search committed"
        );
        events
    }

    /// Undo the last effective edit.
    pub fn undo(&mut self) -> Vec<HistoryEvent> {
        self.history.undo()
    }

    /// Redo the last undone edit.
    pub fn redo(&mut self) -> Vec<HistoryEvent> {
        self.history.redo()
    }

    /// Clear the selection and history.
    pub fn clear(&mut self) -> Vec<HistoryEvent> {
        self.history.clear()
    }
}
