// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Moving vehicles: insert a fleet, move every vehicle a few times, and count how many are
//! inside a fixed depot area after each round.
//!
//! Splits are never undone, so the node count only grows while the point count stays fixed.

use tracing::info;
use tracing_subscriber::EnvFilter;
use understory_quadtree::{Aabb, Point, QuadTree, QuadTreeConfig};

struct Rng(u64);

impl Rng {
    fn next_f64(&mut self) -> f64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        ((x >> 11) as f64) / ((1u64 << 53) as f64)
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // A city-sized region around Manchester.
    let center = Point::new(-2.2426, 53.4808, ());
    let region = Aabb::around(&center, 30_000.0);
    let half = region.half_extent();
    let config = QuadTreeConfig::default().with_capacity(8);
    let mut tree = QuadTree::with_config(region, 0, config);

    let mut rng = Rng(0xC0FF_EE00_D15E_A5E5);
    let mut fleet: Vec<Point<u32>> = (0..2_000)
        .map(|id| {
            let x = center.x() + (rng.next_f64() - 0.5) * half.x;
            let y = center.y() + (rng.next_f64() - 0.5) * half.y;
            Point::new(x, y, id)
        })
        .collect();
    for v in fleet.iter().copied() {
        tree.insert(v);
    }

    let depot = Aabb::around(&center, 2_000.0);
    for round in 0..5 {
        let mut moved = 0;
        for v in &mut fleet {
            let step = v.half_extent_for_radius(500.0);
            let next = Point::new(
                v.x() + (rng.next_f64() - 0.5) * step.x,
                v.y() + (rng.next_f64() - 0.5) * step.y,
                *v.data(),
            );
            if tree.update(v, next) {
                *v = next;
                moved += 1;
            }
        }
        info!(
            round,
            moved,
            in_depot = tree.search(depot).count(),
            nodes = tree.node_count(),
            depth = tree.depth(),
            "round complete"
        );
    }
}
