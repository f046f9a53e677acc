// Copyright 2025 the Carve Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use carve_boundary::BoundaryFinder;
use carve_mesh::{ElementId, Mesh};
use carve_quadtree::{NearestMode, Polygon, Quadtree, QuadtreeConfig};
use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::{Point, Rect};

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

/// An `n` by `n` grid of squares with jittered interior nodes, two triangles per square.
fn gen_jittered_grid(n: u32, cell: f64, seed: u64) -> Mesh {
    let mut rng = Rng::new(seed);
    let mut positions = Vec::with_capacity(((n + 1) * (n + 1)) as usize);
    for j in 0..=n {
        for i in 0..=n {
            let interior = i > 0 && i < n && j > 0 && j < n;
            let (dx, dy) = if interior {
                ((rng.next_f64() - 0.5) * 0.4 * cell, (rng.next_f64() - 0.5) * 0.4 * cell)
            } else {
                (0.0, 0.0)
            };
            positions.push([f64::from(i) * cell + dx, f64::from(j) * cell + dy, 0.0]);
        }
    }
    let id = |i: u32, j: u32| j * (n + 1) + i + 1;
    let mut triangles = Vec::with_capacity((2 * n * n) as usize);
    for j in 0..n {
        for i in 0..n {
            let (a, b, c, d) = (id(i, j), id(i + 1, j), id(i + 1, j + 1), id(i, j + 1));
            triangles.push([a, b, c]);
            triangles.push([a, c, d]);
        }
    }
    Mesh::from_parts(&positions, &triangles).unwrap()
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("quadtree_build");
    for &n in &[64u32, 256] {
        let mesh = gen_jittered_grid(n, 10.0, 0x5eed);
        group.throughput(Throughput::Elements(mesh.num_elements() as u64));
        for &bin in &[16usize, 100] {
            group.bench_function(format!("elements_n{n}_bin{bin}"), |b| {
                let config = QuadtreeConfig::default().with_bin_size(bin);
                b.iter(|| {
                    let tree = Quadtree::build(&mesh, &config).unwrap();
                    black_box(tree.stats());
                });
            });
        }
        group.bench_function(format!("nodes_only_n{n}"), |b| {
            let config = QuadtreeConfig::default().with_mode(carve_quadtree::IndexMode::NodesOnly);
            b.iter(|| black_box(Quadtree::build(&mesh, &config).unwrap().stats()));
        });
    }
    group.finish();
}

fn bench_nearest(c: &mut Criterion) {
    let mut group = c.benchmark_group("quadtree_nearest");
    let n = 256;
    let extent = f64::from(n) * 10.0;
    let mesh = gen_jittered_grid(n, 10.0, 0x5eed);
    let mut rng = Rng::new(42);
    let probes: Vec<Point> = (0..1024)
        .map(|_| Point::new(rng.next_f64() * extent, rng.next_f64() * extent))
        .collect();
    group.throughput(Throughput::Elements(probes.len() as u64));
    for (label, mode) in [("local", NearestMode::Local), ("exact", NearestMode::Exact)] {
        let tree = Quadtree::build(&mesh, &QuadtreeConfig::default().with_nearest(mode)).unwrap();
        group.bench_function(label, |b| {
            b.iter(|| {
                let found = probes
                    .iter()
                    .filter_map(|&p| tree.find_nearest_node(p))
                    .count();
                black_box(found);
            });
        });
    }
    group.finish();
}

fn bench_regions(c: &mut Criterion) {
    let mut group = c.benchmark_group("quadtree_regions");
    let mesh = gen_jittered_grid(256, 10.0, 0x5eed);
    let tree = Quadtree::build(&mesh, &QuadtreeConfig::default()).unwrap();
    for &radius in &[25.0f64, 250.0] {
        group.bench_function(format!("circle_r{radius}"), |b| {
            b.iter(|| black_box(tree.find_elements_in_circle(Point::new(1280.0, 1280.0), radius).len()));
        });
    }
    group.bench_function("rectangle", |b| {
        let rect = Rect::new(500.0, 500.0, 900.0, 800.0);
        b.iter(|| black_box(tree.find_elements_in_rectangle(rect).len()));
    });
    group.bench_function("polygon", |b| {
        let polygon: Polygon = [(500.0, 500.0), (1500.0, 600.0), (1200.0, 1400.0), (600.0, 1100.0)]
            .into_iter()
            .map(Point::from)
            .collect();
        b.iter(|| black_box(tree.find_elements_in_polygon(&polygon).len()));
    });
    group.finish();
}

fn bench_boundary(c: &mut Criterion) {
    let mut group = c.benchmark_group("boundary");
    let mesh = gen_jittered_grid(128, 10.0, 0x5eed);
    let tree = Quadtree::build(&mesh, &QuadtreeConfig::default()).unwrap();
    let selection: Vec<ElementId> = tree
        .find_elements_in_rectangle(Rect::new(100.0, 100.0, 700.0, 500.0))
        .into_iter()
        .collect();
    group.throughput(Throughput::Elements(selection.len() as u64));
    group.bench_function("trace_selection", |b| {
        b.iter_batched(
            || selection.clone(),
            |sel| black_box(BoundaryFinder::new().trace(&mesh, sel).map(|l| l.outer.len())),
            BatchSize::SmallInput,
        );
    });
    group.bench_function("find_all_boundaries", |b| {
        b.iter(|| black_box(BoundaryFinder::new().find_all_boundaries(&mesh).map(|d| d.outer.len())));
    });
    group.finish();
}

criterion_group!(benches, bench_build, bench_nearest, bench_regions, bench_boundary);
criterion_main!(benches);
