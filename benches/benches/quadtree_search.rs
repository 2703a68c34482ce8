// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use understory_quadtree::{Aabb, Point, QuadTree, QuadTreeConfig};

const AIRPORTS: [(&str, f64, f64); 7] = [
    ("BOM", 72.8687391, 19.0901765),
    ("CDG", 2.5479245, 49.0096906),
    ("DXB", 55.3656728, 25.2531745),
    ("GIG", -43.1648755, -22.9111438),
    ("JFK", -73.77813909999999, 40.6413111),
    ("LCY", 0.049518, 51.5048437),
    ("MAN", -2.27495, 53.3536987),
];

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

fn world() -> Aabb {
    Aabb::around(&Point::new(0.0, 0.0, ()), 10_000_000.0)
}

fn gen_random_points(count: usize, seed: u64) -> Vec<Point<u32>> {
    let mut rng = Rng::new(seed);
    (0..count)
        .map(|i| {
            let lon = rng.next_f64() * 170.0 - 85.0;
            let lat = rng.next_f64() * 170.0 - 85.0;
            Point::new(lon, lat, i as u32)
        })
        .collect()
}

fn bench_airports(c: &mut Criterion) {
    let mut tree = QuadTree::new(world(), 0);
    for (code, x, y) in AIRPORTS {
        tree.insert(Point::new(x, y, code));
    }
    let midlands = Point::new(-0.7470703125, 52.45600939264076, ());
    let range = Aabb::around(&midlands, 182_107.0);

    c.bench_function("airports_search_midlands", |b| {
        b.iter(|| {
            let hits = tree.search(black_box(range)).count();
            black_box(hits);
        });
    });
}

fn bench_random_points(c: &mut Criterion) {
    let mut group = c.benchmark_group("random_points");
    for &n in &[1_000usize, 10_000, 100_000] {
        let points = gen_random_points(n, 0x5EED_0000 + n as u64);
        group.throughput(Throughput::Elements(n as u64));

        let mut rng = Rng::new(42);
        let queries: Vec<Aabb> = (0..64)
            .map(|_| {
                let center = Point::new(
                    rng.next_f64() * 160.0 - 80.0,
                    rng.next_f64() * 140.0 - 70.0,
                    (),
                );
                Aabb::around(&center, 250_000.0)
            })
            .collect();

        group.bench_function(format!("linear_scan_250km_n{}", n), |b| {
            b.iter(|| {
                let mut hits = 0_usize;
                for q in &queries {
                    hits += points.iter().filter(|p| q.contains(*p)).count();
                }
                black_box(hits);
            });
        });

        for capacity in [4usize, 16] {
            let config = QuadTreeConfig::default().with_capacity(capacity);

            group.bench_function(format!("insert_n{}_cap{}", n, capacity), |b| {
                b.iter_batched(
                    || QuadTree::with_config(world(), 0, config),
                    |mut tree| {
                        for p in points.iter().copied() {
                            tree.insert(p);
                        }
                        black_box(tree.len());
                    },
                    BatchSize::SmallInput,
                );
            });

            let mut tree = QuadTree::with_config(world(), 0, config);
            for p in points.iter().copied() {
                tree.insert(p);
            }

            group.bench_function(format!("search_250km_n{}_cap{}", n, capacity), |b| {
                b.iter(|| {
                    let mut hits = 0_usize;
                    for q in &queries {
                        hits += tree.search(*q).count();
                    }
                    black_box(hits);
                });
            });
        }
    }
    group.finish();
}

fn bench_churn(c: &mut Criterion) {
    let points = gen_random_points(10_000, 7);
    let mut rng = Rng::new(99);
    let moved: Vec<Point<u32>> = points
        .iter()
        .map(|p| {
            let dx = rng.next_f64() - 0.5;
            let dy = rng.next_f64() - 0.5;
            Point::new(p.x() + dx, p.y() + dy, *p.data())
        })
        .collect();

    c.bench_function("update_10k_small_moves", |b| {
        b.iter_batched(
            || {
                let mut tree = QuadTree::new(world(), 0);
                for p in points.iter().copied() {
                    tree.insert(p);
                }
                tree
            },
            |mut tree| {
                for (old, new) in points.iter().zip(moved.iter().copied()) {
                    tree.update(old, new);
                }
                black_box(tree.len());
            },
            BatchSize::LargeInput,
        );
    });
}

criterion_group!(benches, bench_airports, bench_random_points, bench_churn);
criterion_main!(benches);
