// Copyright 2025 the Carve Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Circle and rectangle selection with undo.
//!
//! Drive a selection session with synthetic pointer events, switch to deselect mode, and
//! walk the history back and forth.
//!
//! Run:
//! - `RUST_LOG=carve_select=debug cargo run -p carve_demos --example circle_selection`

use carve_mesh::Mesh;
use carve_quadtree::{Quadtree, QuadtreeConfig};
use carve_select::{SelectionMode, SelectionSession, ToolEvent, ToolKind};
use kurbo::Point;
use tracing_subscriber::EnvFilter;

fn grid(n: u32) -> Mesh {
    let mut positions = Vec::new();
    for j in 0..=n {
        for i in 0..=n {
            positions.push([f64::from(i), f64::from(j), 0.0]);
        }
    }
    let id = |i: u32, j: u32| j * (n + 1) + i + 1;
    let mut triangles = Vec::new();
    for j in 0..n {
        for i in 0..n {
            let (a, b, c, d) = (id(i, j), id(i + 1, j), id(i + 1, j + 1), id(i, j + 1));
            triangles.push([a, b, c]);
            triangles.push([a, c, d]);
        }
    }
    Mesh::from_parts(&positions, &triangles).unwrap()
}

fn drag(session: &mut SelectionSession<'_, '_>, from: Point, to: Point) {
    session.handle(ToolEvent::Press(from));
    session.handle(ToolEvent::Move(to));
    for event in session.handle(ToolEvent::Release(to)) {
        println!("  history: {event:?}");
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mesh = grid(8);
    let tree = Quadtree::build(&mesh, &QuadtreeConfig::default().with_bin_size(8)).unwrap();
    let mut session = SelectionSession::new(&tree);

    println!("circle around (4, 4), radius 2");
    session.handle(ToolEvent::Press(Point::new(4.0, 4.0)));
    session.handle(ToolEvent::Move(Point::new(6.0, 4.0)));
    println!("  rubber band: {:?}", session.circle_tool().stats());
    for event in session.handle(ToolEvent::Release(Point::new(6.0, 4.0))) {
        println!("  history: {event:?}");
    }
    println!("  selected {} elements", session.selection().len());
    let circled = session.selection().len();

    println!("deselect a rectangle through the middle");
    session.set_mode(SelectionMode::Deselect);
    session.use_tool(ToolKind::Rectangle);
    drag(&mut session, Point::new(3.5, 3.5), Point::new(4.5, 4.5));
    println!("  selected {} elements", session.selection().len());
    assert!(session.selection().len() < circled, "deselect removes elements");

    println!("undo");
    for event in session.undo() {
        println!("  history: {event:?}");
    }
    assert_eq!(session.selection().len(), circled);

    println!("redo");
    session.redo();
    println!("  selected {} elements", session.selection().len());
}
