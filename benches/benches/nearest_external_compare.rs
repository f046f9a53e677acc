// Copyright 2025 the Carve Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

#![cfg(feature = "compare_rstar")]

use carve_mesh::Mesh;
use carve_quadtree::{IndexMode, NearestMode, Quadtree, QuadtreeConfig};
use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::Point;

use rstar::RTree;

#[derive(Clone)]
struct Rng(u64);

impl Rng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }
    fn next_f64(&mut self) -> f64 {
        let v = self.next_u64() >> 11;
        (v as f64) / ((1u64 << 53) as f64)
    }
}

/// Scattered nodes with no elements; only the node index is compared.
fn gen_scattered(count: usize, extent: f64, seed: u64) -> Mesh {
    let mut rng = Rng::new(seed);
    let positions: Vec<[f64; 3]> = (0..count)
        .map(|_| [rng.next_f64() * extent, rng.next_f64() * extent, 0.0])
        .collect();
    Mesh::from_parts(&positions, &[]).unwrap()
}

fn bench_nearest_external_compare(c: &mut Criterion) {
    let mut group = c.benchmark_group("nearest_external_compare");
    let extent = 10_000.0;
    for &count in &[10_000usize, 100_000] {
        let mesh = gen_scattered(count, extent, 0xc0ffee);
        let points: Vec<[f64; 2]> = mesh
            .nodes()
            .iter()
            .map(|n| [n.position.x, n.position.y])
            .collect();
        let mut rng = Rng::new(7);
        let probes: Vec<Point> = (0..1024)
            .map(|_| Point::new(rng.next_f64() * extent, rng.next_f64() * extent))
            .collect();
        let config = QuadtreeConfig::default()
            .with_mode(IndexMode::NodesOnly)
            .with_nearest(NearestMode::Exact);

        group.throughput(Throughput::Elements(count as u64));
        group.bench_function(format!("carve_build_n{count}"), |b| {
            b.iter(|| black_box(Quadtree::build(&mesh, &config).unwrap().stats()));
        });
        group.bench_function(format!("rstar_build_n{count}"), |b| {
            b.iter_batched(
                || points.clone(),
                |pts| black_box(RTree::bulk_load(pts).size()),
                BatchSize::LargeInput,
            );
        });

        group.throughput(Throughput::Elements(probes.len() as u64));
        let tree = Quadtree::build(&mesh, &config).unwrap();
        group.bench_function(format!("carve_nearest_n{count}"), |b| {
            b.iter(|| {
                let hits = probes
                    .iter()
                    .filter_map(|&p| tree.find_nearest_node(p))
                    .count();
                black_box(hits);
            });
        });
        let rtree = RTree::bulk_load(points.clone());
        group.bench_function(format!("rstar_nearest_n{count}"), |b| {
            b.iter(|| {
                let hits = probes
                    .iter()
                    .filter_map(|p| rtree.nearest_neighbor(&[p.x, p.y]))
                    .count();
                black_box(hits);
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_nearest_external_compare);
criterion_main!(benches);
