// Copyright 2025 the Carve Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Query regions: the shapes a range search can be run against.
//!
//! A [`Region`] answers two questions. [`Region::classify`] tells the traversal whether a
//! quadtree cell lies fully inside, fully outside, or across the region's edge, so whole
//! subtrees can be accepted or pruned without per-item tests. [`Region::contains`] is the
//! exact test applied to items of cells that straddle the edge.

use alloc::vec::Vec;
use kurbo::{Point, Rect};

use crate::geom::{
    corners, distance2, distance2_to_rect, point_in_polygon, rect_contains, rect_within,
    rects_overlap, segment_touches_rect,
};

/// How a cell relates to a region.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Containment {
    /// No point of the cell is in the region.
    Outside,
    /// The cell crosses the region's edge; items need an exact test.
    Partial,
    /// Every point of the cell is in the region.
    Inside,
}

/// A closed planar region usable for range queries.
pub trait Region {
    /// Whether the region is empty (zero or negative size, too few vertices).
    /// Empty regions match nothing.
    fn is_empty(&self) -> bool;

    /// Axis-aligned bounds of the region.
    fn bounding_box(&self) -> Rect;

    /// Exact point test.
    fn contains(&self, p: Point) -> bool;

    /// Classify a cell. Must never report `Inside` or `Outside` wrongly; `Partial` is
    /// always a safe answer.
    fn classify(&self, cell: &Rect) -> Containment;
}

/// A disc given by center and radius.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CircleRegion {
    /// Center of the disc.
    pub center: Point,
    /// Radius of the disc.
    pub radius: f64,
}

impl CircleRegion {
    /// Create a disc.
    pub const fn new(center: Point, radius: f64) -> Self {
        Self { center, radius }
    }
}

impl Region for CircleRegion {
    fn is_empty(&self) -> bool {
        !(self.radius > 0.0 && self.radius.is_finite())
    }

    fn bounding_box(&self) -> Rect {
        let Point { x, y } = self.center;
        let r = self.radius;
        Rect::new(x - r, y - r, x + r, y + r)
    }

    fn contains(&self, p: Point) -> bool {
        distance2(p, self.center) <= self.radius * self.radius
    }

    fn classify(&self, cell: &Rect) -> Containment {
        // The bounding square rejects most cells without any multiplication.
        if !rects_overlap(cell, &self.bounding_box()) {
            return Containment::Outside;
        }
        let r2 = self.radius * self.radius;
        if distance2_to_rect(self.center, cell) > r2 {
            return Containment::Outside;
        }
        if corners(cell)
            .iter()
            .all(|&c| distance2(c, self.center) <= r2)
        {
            Containment::Inside
        } else {
            Containment::Partial
        }
    }
}

/// An axis-aligned rectangle.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RectRegion(pub Rect);

impl RectRegion {
    /// Build from the left, right, bottom, and top edges.
    pub const fn from_edges(left: f64, right: f64, bottom: f64, top: f64) -> Self {
        Self(Rect::new(left, bottom, right, top))
    }
}

impl Region for RectRegion {
    fn is_empty(&self) -> bool {
        let r = &self.0;
        !(r.x0 < r.x1 && r.y0 < r.y1)
    }

    fn bounding_box(&self) -> Rect {
        self.0
    }

    fn contains(&self, p: Point) -> bool {
        rect_contains(&self.0, p)
    }

    fn classify(&self, cell: &Rect) -> Containment {
        if rect_within(cell, &self.0) {
            Containment::Inside
        } else if rects_overlap(cell, &self.0) {
            Containment::Partial
        } else {
            Containment::Outside
        }
    }
}

/// A simple polygon given as an implicitly closed vertex ring.
///
/// Typically accumulated from successive clicks. A trailing vertex equal to the first is
/// dropped, so both open and explicitly closed rings are accepted.
#[derive(Clone, Debug, PartialEq)]
pub struct Polygon {
    ring: Vec<Point>,
    bbox: Rect,
}

impl Polygon {
    /// Create a polygon from its vertices.
    pub fn new(mut ring: Vec<Point>) -> Self {
        if ring.len() > 1 && ring.first() == ring.last() {
            ring.pop();
        }
        let bbox = ring
            .iter()
            .skip(1)
            .fold(ring.first().map(|&p| Rect::from_points(p, p)), |acc, &p| {
                acc.map(|r| r.union_pt(p))
            })
            .unwrap_or(Rect::ZERO);
        Self { ring, bbox }
    }

    /// The vertex ring.
    pub fn vertices(&self) -> &[Point] {
        &self.ring
    }

    fn edges(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        let n = self.ring.len();
        (0..n).map(move |i| (self.ring[i], self.ring[(i + 1) % n]))
    }
}

impl FromIterator<Point> for Polygon {
    fn from_iter<I: IntoIterator<Item = Point>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl Region for Polygon {
    fn is_empty(&self) -> bool {
        self.ring.len() < 3
    }

    fn bounding_box(&self) -> Rect {
        self.bbox
    }

    fn contains(&self, p: Point) -> bool {
        rect_contains(&self.bbox, p) && point_in_polygon(p, &self.ring)
    }

    fn classify(&self, cell: &Rect) -> Containment {
        if !rects_overlap(cell, &self.bbox) {
            return Containment::Outside;
        }
        let crosses = self.edges().any(|(a, b)| segment_touches_rect(a, b, cell));
        if crosses {
            return Containment::Partial;
        }
        // No edge touches the cell, so the cell is wholly on one side of the boundary.
        if point_in_polygon(cell.center(), &self.ring) {
            Containment::Inside
        } else {
            Containment::Outside
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn circle_classification() {
        let c = CircleRegion::new(Point::new(0.0, 0.0), 2.0);
        assert_eq!(
            c.classify(&Rect::new(-1.0, -1.0, 1.0, 1.0)),
            Containment::Inside
        );
        assert_eq!(
            c.classify(&Rect::new(1.0, 1.0, 3.0, 3.0)),
            Containment::Partial
        );
        assert_eq!(
            c.classify(&Rect::new(5.0, 5.0, 6.0, 6.0)),
            Containment::Outside
        );
        // Inside the bounding square but outside the disc.
        assert_eq!(
            c.classify(&Rect::new(1.6, 1.6, 2.0, 2.0)),
            Containment::Outside
        );
    }

    #[test]
    fn circle_emptiness() {
        assert!(CircleRegion::new(Point::ORIGIN, 0.0).is_empty());
        assert!(CircleRegion::new(Point::ORIGIN, -1.0).is_empty());
        assert!(CircleRegion::new(Point::ORIGIN, f64::NAN).is_empty());
        assert!(!CircleRegion::new(Point::ORIGIN, 0.5).is_empty());
    }

    #[test]
    fn rect_classification_and_emptiness() {
        let r = RectRegion::from_edges(0.0, 10.0, 0.0, 5.0);
        assert_eq!(r.0, Rect::new(0.0, 0.0, 10.0, 5.0));
        assert_eq!(
            r.classify(&Rect::new(1.0, 1.0, 2.0, 2.0)),
            Containment::Inside
        );
        assert_eq!(
            r.classify(&Rect::new(9.0, 4.0, 11.0, 6.0)),
            Containment::Partial
        );
        assert_eq!(
            r.classify(&Rect::new(11.0, 0.0, 12.0, 1.0)),
            Containment::Outside
        );
        assert!(r.contains(Point::new(10.0, 5.0)));
        assert!(RectRegion::from_edges(3.0, 1.0, 0.0, 1.0).is_empty());
        assert!(RectRegion::from_edges(0.0, 1.0, 2.0, 2.0).is_empty());
    }

    #[test]
    fn polygon_drops_closing_vertex() {
        let p = Polygon::new(vec![
            Point::new(0.0, 0.0),
            Point::new(4.0, 0.0),
            Point::new(0.0, 4.0),
            Point::new(0.0, 0.0),
        ]);
        assert_eq!(p.vertices().len(), 3);
        assert_eq!(p.bounding_box(), Rect::new(0.0, 0.0, 4.0, 4.0));
        assert!(p.contains(Point::new(1.0, 1.0)));
        assert!(!p.contains(Point::new(3.0, 3.0)));
    }

    #[test]
    fn polygon_classification() {
        let p: Polygon = [
            Point::new(0.0, 0.0),
            Point::new(8.0, 0.0),
            Point::new(8.0, 8.0),
            Point::new(0.0, 8.0),
        ]
        .into_iter()
        .collect();
        assert_eq!(
            p.classify(&Rect::new(2.0, 2.0, 3.0, 3.0)),
            Containment::Inside
        );
        assert_eq!(
            p.classify(&Rect::new(7.0, 7.0, 9.0, 9.0)),
            Containment::Partial
        );
        assert_eq!(
            p.classify(&Rect::new(10.0, 10.0, 11.0, 11.0)),
            Containment::Outside
        );
    }

    #[test]
    fn polygon_notch_inside_cell_is_partial() {
        // A square with a notch cut from the bottom edge whose tip sits inside the cell.
        let p = Polygon::new(vec![
            Point::new(0.0, 0.0),
            Point::new(4.5, 0.0),
            Point::new(5.0, 5.0),
            Point::new(5.5, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 10.0),
            Point::new(0.0, 10.0),
        ]);
        assert_eq!(
            p.classify(&Rect::new(4.0, 4.0, 6.0, 6.0)),
            Containment::Partial
        );
    }

    #[test]
    fn polygon_concave_pocket_is_outside() {
        // A U shape; the cell sits in the pocket without touching any edge.
        let p = Polygon::new(vec![
            Point::new(0.0, 0.0),
            Point::new(9.0, 0.0),
            Point::new(9.0, 9.0),
            Point::new(6.0, 9.0),
            Point::new(6.0, 3.0),
            Point::new(3.0, 3.0),
            Point::new(3.0, 9.0),
            Point::new(0.0, 9.0),
        ]);
        assert_eq!(
            p.classify(&Rect::new(4.0, 5.0, 5.0, 6.0)),
            Containment::Outside
        );
        assert!(!p.is_empty());
        assert!(Polygon::new(vec![Point::ORIGIN, Point::new(1.0, 0.0)]).is_empty());
    }
}
