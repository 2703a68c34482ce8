// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

#![cfg(feature = "compare_rstar")]

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use understory_quadtree::{Aabb, Point, QuadTree};

use rstar::primitives::GeomWithData;
use rstar::{AABB, RTree};

fn gen_grid_points(n: usize, step: f64) -> Vec<Point<u32>> {
    let mut out = Vec::with_capacity(n * n);
    for j in 0..n {
        for i in 0..n {
            let x = -80.0 + i as f64 * step;
            let y = -80.0 + j as f64 * step;
            out.push(Point::new(x, y, (j * n + i) as u32));
        }
    }
    out
}

fn to_rstar_points(v: &[Point<u32>]) -> Vec<GeomWithData<[f64; 2], u32>> {
    v.iter()
        .map(|p| GeomWithData::new([p.x(), p.y()], *p.data()))
        .collect()
}

fn bench_rstar_compare(c: &mut Criterion) {
    let mut group = c.benchmark_group("rstar_compare");
    let world = Aabb::around(&Point::new(0.0, 0.0, ()), 10_000_000.0);
    let query = Aabb::around(&Point::new(10.0, 45.0, ()), 500_000.0);
    for &n in &[128usize, 256] {
        let points = gen_grid_points(n, 160.0 / n as f64);
        group.throughput(Throughput::Elements((n * n) as u64));

        group.bench_function(format!("understory_build_query_n{}", n), |b| {
            b.iter_batched(
                || QuadTree::new(world, 0),
                |mut tree| {
                    for p in points.iter().copied() {
                        tree.insert(p);
                    }
                    let hits: usize = tree.search(query).count();
                    black_box(hits);
                },
                BatchSize::SmallInput,
            );
        });

        group.bench_function(format!("rstar_build_query_bulk_n{}", n), |b| {
            b.iter_batched(
                || to_rstar_points(&points),
                |geoms| {
                    let tree = RTree::bulk_load(geoms);
                    let r = query.rect();
                    // rstar's envelope is closed while `Aabb::contains` excludes the max
                    // edges, so grid points lying exactly on those edges are counted here
                    // but not by `search`. Hit counts may differ by an edge row.
                    let envelope = AABB::from_corners([r.x0, r.y0], [r.x1, r.y1]);
                    let hits: usize = tree.locate_in_envelope(&envelope).count();
                    black_box(hits);
                },
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

criterion_group!(benches, bench_rstar_compare);
criterion_main!(benches);
