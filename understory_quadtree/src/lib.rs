// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_quadtree --heading-base-level=0

//! Understory Quadtree: a region quadtree over longitude/latitude points.
//!
//! Understory Quadtree indexes tagged points (an airport code, a sensor id, any payload) by
//! position and answers "what is near here" with a rectangular range search.
//!
//! - Insert, remove, and move points carrying arbitrary payloads.
//! - Search by axis-aligned box, pruning every subtree the box does not touch.
//! - Turn a search radius in meters into a box in degrees with [`Aabb::around`].
//!
//! # Example
//!
//! ```rust
//! use understory_quadtree::{Aabb, Point, QuadTree};
//!
//! // A world-sized root: about 10,000 km either way from (0, 0).
//! let origin = Point::new(0.0, 0.0, ());
//! let world = Aabb::around(&origin, 10_000_000.0);
//! let mut tree = QuadTree::new(world, 0);
//!
//! assert!(tree.insert(Point::new(0.049518, 51.5048437, "LCY")));
//! assert!(tree.insert(Point::new(-2.27495, 53.3536987, "MAN")));
//! assert!(tree.insert(Point::new(2.5479245, 49.0096906, "CDG")));
//!
//! // Everything within roughly 182 km of the English Midlands.
//! let midlands = Point::new(-0.7470703125, 52.45600939264076, ());
//! let mut hits: Vec<_> = tree
//!     .search(Aabb::around(&midlands, 182_107.0))
//!     .map(|p| *p.data())
//!     .collect();
//! hits.sort_unstable();
//! assert_eq!(hits, ["LCY", "MAN"]);
//!
//! // Swap City for Heathrow.
//! let lcy = Point::new(0.049518, 51.5048437, "LCY");
//! assert!(tree.update(&lcy, Point::new(-0.454, 51.472, "LHR")));
//! assert_eq!(tree.search_radius(&midlands, 182_107.0).count(), 2);
//! ```
//!
//! ## Geometry
//!
//! `x` is longitude and `y` latitude, in degrees. Boxes contain their minimum edges and
//! exclude their maximum edges, so the four quadrants of a node claim each point exactly once.
//! Coordinates are not validated; any planar space works if boxes are built in the same space.
//!
//! Radius conversion treats the Earth as a sphere and widens the longitude span by
//! `1 / cos(latitude)`. The resulting box covers the circle and its corners, so results are a
//! superset of an exact great-circle query. See [`geo`].
//!
//! ## Structure
//!
//! Leaves hold up to [`QuadTreeConfig::capacity`] points and split into four quadrants on
//! overflow, down to [`QuadTreeConfig::max_depth`]. Splits are never undone. Nodes live in an
//! arena addressed by [`NodeId`] and can be inspected with [`QuadTree::node`].
//!
//! Diagnostics (subdivisions, depth-limit overflows) are emitted through `tracing`; install a
//! subscriber to see them.
//!
//! The tree has no interior locking. Wrap it in your own lock, or clone it for snapshots, if it
//! is shared between threads.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod config;
pub mod geo;
pub mod tree;
pub mod types;

pub use config::QuadTreeConfig;
pub use tree::{NodeId, NodeRef, QuadTree};
pub use types::{Aabb, Point};
