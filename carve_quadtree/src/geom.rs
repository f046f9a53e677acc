// Copyright 2025 the Carve Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Planar predicates shared by the quadtree and the search tools.
//!
//! Rectangles here are closed: a point on the edge of a [`Rect`] is inside it.
//! Kurbo's own [`Rect::contains`] is half-open, which is the wrong policy for cell bounds.

use kurbo::{Point, Rect};

/// Closed containment of a point in a rectangle.
#[inline]
pub fn rect_contains(r: &Rect, p: Point) -> bool {
    r.x0 <= p.x && p.x <= r.x1 && r.y0 <= p.y && p.y <= r.y1
}

/// Whether two closed rectangles share at least one point.
#[inline]
pub fn rects_overlap(a: &Rect, b: &Rect) -> bool {
    a.x0 <= b.x1 && b.x0 <= a.x1 && a.y0 <= b.y1 && b.y0 <= a.y1
}

/// Whether `inner` lies entirely within `outer`.
#[inline]
pub fn rect_within(inner: &Rect, outer: &Rect) -> bool {
    outer.x0 <= inner.x0 && inner.x1 <= outer.x1 && outer.y0 <= inner.y0 && inner.y1 <= outer.y1
}

/// The four corners, counter-clockwise from `(x0, y0)`.
#[inline]
pub fn corners(r: &Rect) -> [Point; 4] {
    [
        Point::new(r.x0, r.y0),
        Point::new(r.x1, r.y0),
        Point::new(r.x1, r.y1),
        Point::new(r.x0, r.y1),
    ]
}

/// Squared distance from a point to the nearest point of a closed rectangle. Zero inside.
#[inline]
pub fn distance2_to_rect(p: Point, r: &Rect) -> f64 {
    let dx = (r.x0 - p.x).max(0.0).max(p.x - r.x1);
    let dy = (r.y0 - p.y).max(0.0).max(p.y - r.y1);
    dx * dx + dy * dy
}

/// Squared euclidean distance.
#[inline]
pub fn distance2(a: Point, b: Point) -> f64 {
    (a - b).hypot2()
}

/// Barycentric weights `(a, b, c)` of `q` with respect to triangle `(p1, p2, p3)`.
///
/// `c = 1 - a - b`. Returns `None` for a degenerate (zero-area) triangle.
pub fn barycentric(q: Point, [p1, p2, p3]: [Point; 3]) -> Option<(f64, f64, f64)> {
    let denominator = (p2.y - p3.y) * (p1.x - p3.x) + (p3.x - p2.x) * (p1.y - p3.y);
    if denominator == 0.0 {
        return None;
    }
    let a = ((p2.y - p3.y) * (q.x - p3.x) + (p3.x - p2.x) * (q.y - p3.y)) / denominator;
    let b = ((p3.y - p1.y) * (q.x - p3.x) + (p1.x - p3.x) * (q.y - p3.y)) / denominator;
    Some((a, b, 1.0 - a - b))
}

/// Strict point-in-triangle test.
///
/// A point exactly on an edge or vertex is outside, so a click on a shared edge never
/// selects both neighbours.
pub fn point_in_triangle(q: Point, tri: [Point; 3]) -> bool {
    barycentric(q, tri).is_some_and(|(a, b, c)| a > 0.0 && b > 0.0 && c > 0.0)
}

/// Closed point-in-polygon test over an implicitly closed vertex ring.
///
/// Points on the ring itself are inside; everything else is decided by the even-odd rule.
pub fn point_in_polygon(q: Point, ring: &[Point]) -> bool {
    let n = ring.len();
    if n < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let (a, b) = (ring[i], ring[j]);
        if orient(a, b, q) == 0.0 && on_segment(a, b, q) {
            return true;
        }
        if (a.y > q.y) != (b.y > q.y) {
            let x = a.x + (q.y - a.y) * (b.x - a.x) / (b.y - a.y);
            if q.x < x {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

/// Sign of the turn `a → b → c`: positive for counter-clockwise.
#[inline]
fn orient(a: Point, b: Point, c: Point) -> f64 {
    (b - a).cross(c - a)
}

#[inline]
fn on_segment(a: Point, b: Point, p: Point) -> bool {
    a.x.min(b.x) <= p.x && p.x <= a.x.max(b.x) && a.y.min(b.y) <= p.y && p.y <= a.y.max(b.y)
}

/// Whether closed segments `p1p2` and `q1q2` share a point.
pub fn segments_intersect(p1: Point, p2: Point, q1: Point, q2: Point) -> bool {
    let d1 = orient(q1, q2, p1);
    let d2 = orient(q1, q2, p2);
    let d3 = orient(p1, p2, q1);
    let d4 = orient(p1, p2, q2);
    if ((d1 > 0.0 && d2 < 0.0) || (d1 < 0.0 && d2 > 0.0))
        && ((d3 > 0.0 && d4 < 0.0) || (d3 < 0.0 && d4 > 0.0))
    {
        return true;
    }
    (d1 == 0.0 && on_segment(q1, q2, p1))
        || (d2 == 0.0 && on_segment(q1, q2, p2))
        || (d3 == 0.0 && on_segment(p1, p2, q1))
        || (d4 == 0.0 && on_segment(p1, p2, q2))
}

/// Whether a closed segment touches a closed rectangle.
pub fn segment_touches_rect(a: Point, b: Point, r: &Rect) -> bool {
    if rect_contains(r, a) || rect_contains(r, b) {
        return true;
    }
    let [c0, c1, c2, c3] = corners(r);
    segments_intersect(a, b, c0, c1)
        || segments_intersect(a, b, c1, c2)
        || segments_intersect(a, b, c2, c3)
        || segments_intersect(a, b, c3, c0)
}
