// Copyright 2025 the Carve Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Carving a subdomain.
//!
//! Select the left half of a grid with a polygon, trace its boundary, and renumber it into
//! a standalone mesh. A selection in two pieces is rejected with a reason.
//!
//! Run:
//! - `RUST_LOG=debug cargo run -p carve_demos --example carve_subdomain`

use carve_boundary::{BoundaryFinder, BoundaryFlags, Subdomain};
use carve_mesh::{ElementId, Mesh};
use carve_quadtree::{Quadtree, QuadtreeConfig};
use carve_select::{SelectionSession, ToolEvent, ToolKind};
use kurbo::Point;
use tracing_subscriber::EnvFilter;

fn grid(n: u32) -> Mesh {
    let mut positions = Vec::new();
    for j in 0..=n {
        for i in 0..=n {
            positions.push([f64::from(i), f64::from(j), -f64::from(i + j)]);
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

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mesh = grid(6);
    let tree = Quadtree::build(&mesh, &QuadtreeConfig::default().with_bin_size(4)).unwrap();
    let finder = BoundaryFinder::new();
    let domain = finder.find_all_boundaries(&mesh).unwrap();
    println!(
        "domain: {} outer nodes, {} inner nodes",
        domain.outer.len(),
        domain.inner.len()
    );

    // Nodes with x <= 2 lie inside this polygon. Every square touching one of them is
    // selected, which is the left three columns.
    let mut session = SelectionSession::new(&tree);
    session.use_tool(ToolKind::Polygon);
    for (x, y) in [(-0.5, -0.5), (2.5, -0.5), (2.5, 6.5), (-0.5, 6.5)] {
        session.handle(ToolEvent::Press(Point::new(x, y)));
    }
    session.close_polygon();
    let selection = session.selection().as_set();
    println!("polygon selected {} elements", selection.len());
    assert_eq!(selection.len(), 36, "three columns of six squares");

    let sub = Subdomain::carve(&mesh, selection.iter().copied(), &domain).unwrap();
    println!("outer loop: {:?}", sub.loops().outer);
    println!("open boundary: {:?}", sub.open_boundary_nodes());
    for node in sub.open_boundary_nodes() {
        let corner = sub.flags(node).contains(BoundaryFlags::DOMAIN_OUTER);
        println!(
            "  {node} -> {:?}{}",
            sub.new_node_id(node),
            if corner { " (domain corner)" } else { "" }
        );
    }
    let carved = sub.to_mesh().unwrap();
    println!(
        "carved mesh: {} nodes, {} elements, extents {:?}",
        carved.num_nodes(),
        carved.num_elements(),
        carved.extents()
    );

    // Two squares touching only at a corner do not form one piece.
    let touching = [1, 2, 15, 16].map(ElementId);
    match finder.trace(&mesh, touching) {
        Ok(loops) => println!("unexpected loops: {loops:?}"),
        Err(err) => println!("selection rejected: {err}"),
    }
}
