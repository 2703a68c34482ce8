// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Airport lookup: index a handful of airports, search around a point, then remove and
//! replace one of them.
//!
//! Run with `RUST_LOG=trace` to see the tree subdivide.

use tracing::info;
use tracing_subscriber::EnvFilter;
use understory_quadtree::{Aabb, Point, QuadTree};

const AIRPORTS: [(&str, f64, f64); 7] = [
    ("BOM", 72.8687391, 19.0901765),
    ("CDG", 2.5479245, 49.0096906),
    ("DXB", 55.3656728, 25.2531745),
    ("GIG", -43.1648755, -22.9111438),
    ("JFK", -73.77813909999999, 40.6413111),
    ("LCY", 0.049518, 51.5048437),
    ("MAN", -2.27495, 53.3536987),
];

fn nearby(tree: &QuadTree<&'static str>, center: &Point, meters: f64) -> Vec<&'static str> {
    let mut codes: Vec<_> = tree
        .search(Aabb::around(center, meters))
        .map(|p| *p.data())
        .collect();
    codes.sort_unstable();
    codes
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let world = Aabb::around(&Point::new(0.0, 0.0, ()), 10_000_000.0);
    let mut tree = QuadTree::new(world, 0);
    for (code, lon, lat) in AIRPORTS {
        tree.insert(Point::new(lon, lat, code));
    }
    info!(points = tree.len(), nodes = tree.node_count(), depth = tree.depth(), "indexed airports");

    let midlands = Point::new(-0.7470703125, 52.45600939264076, ());
    let half = midlands.half_extent_for_radius(182_107.0);
    info!(
        half_width = half.x,
        half_height = half.y,
        "182 km around the Midlands in degrees"
    );
    info!("nearby: {:?}", nearby(&tree, &midlands, 182_107.0));

    let lcy = Point::new(0.049518, 51.5048437, "LCY");
    let removed = tree.remove(&lcy);
    info!(
        removed,
        "after closing LCY: {:?}",
        nearby(&tree, &midlands, 182_107.0)
    );

    let reinserted = tree.insert(lcy);
    let lhr = Point::new(-0.45409262180328364, 51.472198132255066, "LHR");
    let updated = tree.update(&lcy, lhr);
    info!(
        reinserted,
        updated,
        "after replacing LCY with LHR: {:?}",
        nearby(&tree, &midlands, 182_107.0)
    );

    println!("{:#?}", tree);
}
