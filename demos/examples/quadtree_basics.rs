// Copyright 2025 the Carve Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Quadtree basics.
//!
//! Index a small fan mesh, pick the nearest node and the element under a point, and print
//! the tree's cells.
//!
//! Run:
//! - `RUST_LOG=debug cargo run -p carve_demos --example quadtree_basics`

use carve_mesh::{CoordinateSpace, Mesh};
use carve_quadtree::{NearestMode, Quadtree, QuadtreeConfig};
use kurbo::Point;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // A hexagon split into six triangles around a center node.
    let mut positions = vec![[0.0, 0.0, -1.0]];
    for k in 0..6u32 {
        let angle = f64::from(k) * core::f64::consts::FRAC_PI_3;
        positions.push([10.0 * angle.cos(), 10.0 * angle.sin(), -2.0]);
    }
    let triangles: Vec<[u32; 3]> = (0..6).map(|k| [1, k + 2, (k + 1) % 6 + 2]).collect();
    let mesh = Mesh::from_parts(&positions, &triangles).unwrap();

    // A tiny bin size forces a few splits on seven nodes.
    let tree = Quadtree::build(&mesh, &QuadtreeConfig::default().with_bin_size(2)).unwrap();
    println!("stats: {:?}", tree.stats());
    for rect in tree.cell_outlines() {
        println!("cell: {rect:?}");
    }

    let probe = Point::new(7.0, 1.0);
    let nearest = tree.find_nearest_node(probe);
    println!("local nearest to {probe:?}: {:?}", nearest.map(|n| n.id));
    let exact = Quadtree::build(
        &mesh,
        &QuadtreeConfig::default()
            .with_bin_size(2)
            .with_nearest(NearestMode::Exact),
    )
    .unwrap();
    let nearest = exact.find_nearest_node(probe).unwrap();
    println!("exact nearest to {probe:?}: {}", nearest.id);
    assert_eq!(nearest.id.get(), 2, "(10, 0) is the closest node");

    let picked = tree.find_element_at(Point::new(5.0, 2.0)).unwrap();
    println!(
        "element under (5, 2): {} with corners {}, {}, {}",
        picked.id,
        picked.n1(),
        picked.n2(),
        picked.n3()
    );
    assert_eq!(picked.id.get(), 1, "the first fan triangle spans 0 to 60 degrees");

    // The same mesh indexed in the [-1, 1] view square.
    let view = Quadtree::build(
        &mesh,
        &QuadtreeConfig::default().with_space(CoordinateSpace::Normalized),
    )
    .unwrap();
    println!("normalized bounds: {:?}", view.bounds());

    // A pick radius of 0.2 view units, back in world units for the world-space tree.
    let radius = mesh.normalization().denormalize_length(0.2);
    let hits = tree.find_nodes_in_circle(Point::new(10.0, 0.0), radius);
    println!("nodes within {radius} of (10, 0): {hits:?}");
}
