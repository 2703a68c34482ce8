// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core tree implementation: node arena, subdivision, queries, and removal.

use alloc::vec;
use alloc::vec::Vec;
use core::fmt::Debug;

use tracing::{debug, trace};

use crate::config::QuadTreeConfig;
use crate::types::{Aabb, Point};

/// Handle to a node of a [`QuadTree`].
///
/// Nodes are never freed individually, so a `NodeId` stays valid until
/// [`QuadTree::clear`] is called.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(u32);

impl NodeId {
    #[allow(
        clippy::cast_possible_truncation,
        reason = "Node ids are intentionally 32-bit; arenas never grow that large."
    )]
    const fn new(idx: usize) -> Self {
        Self(idx as u32)
    }

    const fn idx(self) -> usize {
        self.0 as usize
    }
}

const ROOT: NodeId = NodeId(0);

#[derive(Clone, Debug)]
struct Node<D> {
    boundary: Aabb,
    level: u32,
    parent: Option<NodeId>,
    points: Vec<Point<D>>,
    children: Option<[NodeId; 4]>,
}

impl<D> Node<D> {
    fn leaf(boundary: Aabb, level: u32, parent: Option<NodeId>) -> Self {
        Self {
            boundary,
            level,
            parent,
            points: Vec::new(),
            children: None,
        }
    }
}

/// Region quadtree over longitude/latitude points.
///
/// Every node covers a fixed [`Aabb`]. A leaf holds up to
/// [`capacity`](QuadTreeConfig::capacity) points; the insertion that would overflow it splits
/// the leaf into four quadrants (NW, NE, SW, SE) and moves its points down. Splits are never
/// undone: removing points leaves internal nodes in place, however sparse.
///
/// Nodes are stored in an arena and linked by [`NodeId`]; each node keeps a non-owning link
/// to its parent.
#[derive(Clone)]
pub struct QuadTree<D> {
    nodes: Vec<Node<D>>,
    config: QuadTreeConfig,
    len: usize,
}

impl<D> Debug for QuadTree<D> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let leaves = self.nodes.iter().filter(|n| n.children.is_none()).count();
        f.debug_struct("QuadTree")
            .field("boundary", &self.nodes[ROOT.idx()].boundary)
            .field("config", &self.config)
            .field("points", &self.len)
            .field("nodes", &self.nodes.len())
            .field("leaves", &leaves)
            .finish_non_exhaustive()
    }
}

impl<D> QuadTree<D> {
    /// Create an empty tree over `boundary` with the default configuration.
    ///
    /// `level` is the depth label given to the root; children are labelled one deeper than
    /// their parent.
    pub fn new(boundary: Aabb, level: u32) -> Self {
        Self::with_config(boundary, level, QuadTreeConfig::default())
    }

    /// Create an empty tree over `boundary` with an explicit configuration.
    pub fn with_config(boundary: Aabb, level: u32, config: QuadTreeConfig) -> Self {
        Self {
            nodes: vec![Node::leaf(boundary, level, None)],
            config,
            len: 0,
        }
    }

    /// The configuration this tree was built with.
    pub fn config(&self) -> QuadTreeConfig {
        self.config
    }

    /// The region covered by the root.
    pub fn boundary(&self) -> &Aabb {
        &self.nodes[ROOT.idx()].boundary
    }

    /// Number of stored points.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the tree stores no points.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of nodes, leaves and internal nodes alike.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of levels below the root. A tree that never subdivided has depth 0.
    pub fn depth(&self) -> u32 {
        let root_level = self.nodes[ROOT.idx()].level;
        self.nodes
            .iter()
            .map(|n| n.level - root_level)
            .max()
            .unwrap_or(0)
    }

    /// Remove every point and node, leaving a single empty root leaf with the same boundary.
    pub fn clear(&mut self) {
        let root = &self.nodes[ROOT.idx()];
        let root = Node::leaf(root.boundary, root.level, None);
        self.nodes.clear();
        self.nodes.push(root);
        self.len = 0;
    }

    /// Insert a point.
    ///
    /// Returns `false`, dropping the point, if the root boundary does not contain it.
    pub fn insert(&mut self, point: Point<D>) -> bool {
        self.insert_from(ROOT, point)
    }

    /// Points inside `range`, in no particular order.
    ///
    /// Subtrees whose boundary does not intersect `range` are skipped entirely.
    pub fn search(&self, range: Aabb) -> impl Iterator<Item = &Point<D>> + '_ {
        let mut out = Vec::new();
        let mut stack = vec![ROOT];
        while let Some(id) = stack.pop() {
            let node = self.node_at(id);
            if !node.boundary.intersects(&range) {
                continue;
            }
            match node.children {
                Some(children) => stack.extend(children),
                None => out.extend(node.points.iter().filter(|p| range.contains(*p))),
            }
        }
        out.into_iter()
    }

    /// Points inside the box bounding a circle of `meters` radius around `center`.
    ///
    /// Points near the corners of the box are included even though they lie outside the
    /// circle.
    pub fn search_radius<'a, C>(
        &'a self,
        center: &Point<C>,
        meters: f64,
    ) -> impl Iterator<Item = &'a Point<D>> + use<'a, D, C> {
        self.search(Aabb::around(center, meters))
    }

    /// Every stored point, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &Point<D>> + '_ {
        self.nodes.iter().flat_map(|n| n.points.iter())
    }

    /// The root node.
    pub fn root(&self) -> NodeRef<'_, D> {
        NodeRef {
            id: ROOT,
            node: self.node_at(ROOT),
        }
    }

    /// Look up a node by id. Returns `None` for ids that do not belong to this tree.
    pub fn node(&self, id: NodeId) -> Option<NodeRef<'_, D>> {
        self.nodes.get(id.idx()).map(|node| NodeRef { id, node })
    }

    /// The leaf whose boundary contains `(x, y)`, or `None` if the root does not contain it.
    pub fn leaf_containing(&self, x: f64, y: f64) -> Option<NodeId> {
        if !self.node_at(ROOT).boundary.contains_xy(x, y) {
            return None;
        }
        let mut id = ROOT;
        while let Some(children) = self.node_at(id).children {
            id = children[self.node_at(id).boundary.quadrant_of(x, y)];
        }
        Some(id)
    }

    fn node_at(&self, id: NodeId) -> &Node<D> {
        &self.nodes[id.idx()]
    }

    fn node_mut(&mut self, id: NodeId) -> &mut Node<D> {
        &mut self.nodes[id.idx()]
    }

    fn can_subdivide(&self, id: NodeId) -> bool {
        let node = self.node_at(id);
        let depth = node.level - self.node_at(ROOT).level;
        // Children are labelled one level deeper, so the label itself must not overflow.
        depth < self.config.max_depth()
            && node.level.checked_add(1).is_some()
            && node.boundary.is_divisible()
    }

    /// Insert into the subtree rooted at `start`.
    fn insert_from(&mut self, start: NodeId, point: Point<D>) -> bool {
        if !self.node_at(start).boundary.contains(&point) {
            return false;
        }
        let mut id = start;
        loop {
            let node = self.node_at(id);
            if let Some(children) = node.children {
                id = children[node.boundary.quadrant_of(point.x(), point.y())];
                continue;
            }
            let held = node.points.len();
            if held >= self.config.capacity() && self.can_subdivide(id) {
                self.subdivide(id);
                continue;
            }
            if held >= self.config.capacity() {
                debug!(
                    node = id.0,
                    level = node.level,
                    held,
                    "leaf at depth limit accepting point past capacity"
                );
            }
            self.node_mut(id).points.push(point);
            self.len += 1;
            return true;
        }
    }

    /// Turn leaf `id` into an internal node, moving its points into four new children.
    fn subdivide(&mut self, id: NodeId) {
        let (quadrants, level, points) = {
            let node = self.node_mut(id);
            debug_assert!(node.children.is_none(), "only leaves subdivide");
            (
                node.boundary.quadrants(),
                node.level + 1,
                core::mem::take(&mut node.points),
            )
        };
        let first = self.nodes.len();
        let children = [
            NodeId::new(first),
            NodeId::new(first + 1),
            NodeId::new(first + 2),
            NodeId::new(first + 3),
        ];
        self.nodes.extend(
            quadrants
                .into_iter()
                .map(|boundary| Node::leaf(boundary, level, Some(id))),
        );
        trace!(node = id.0, level, moved = points.len(), "subdividing leaf");

        let boundary = self.node_at(id).boundary;
        for p in points {
            let child = children[boundary.quadrant_of(p.x(), p.y())];
            self.node_mut(child).points.push(p);
        }
        self.node_mut(id).children = Some(children);
    }
}

impl<D: PartialEq> QuadTree<D> {
    /// Remove the first stored point equal to `point` (coordinates and payload).
    ///
    /// Returns `false` if no such point is stored. Emptied nodes are not merged.
    pub fn remove(&mut self, point: &Point<D>) -> bool {
        let Some((leaf, slot)) = self.locate(point) else {
            return false;
        };
        self.node_mut(leaf).points.remove(slot);
        self.len -= 1;
        true
    }

    /// Replace `previous` with `replacement`, which may live in a different part of the tree.
    ///
    /// Behaves like [`remove`](Self::remove) followed by [`insert`](Self::insert) and returns
    /// `true` only if both succeed. If `previous` is not stored, or the root boundary does not
    /// contain `replacement`, nothing changes and the result is `false`.
    pub fn update(&mut self, previous: &Point<D>, replacement: Point<D>) -> bool {
        if !self.node_at(ROOT).boundary.contains(&replacement) {
            return false;
        }
        let Some((leaf, slot)) = self.locate(previous) else {
            return false;
        };
        if self.node_at(leaf).boundary.contains(&replacement) {
            self.node_mut(leaf).points[slot] = replacement;
            return true;
        }
        self.node_mut(leaf).points.remove(slot);
        self.len -= 1;

        // Climb to the nearest ancestor covering the new position and insert below it.
        let mut ancestor = leaf;
        while !self.node_at(ancestor).boundary.contains(&replacement) {
            match self.node_at(ancestor).parent {
                Some(parent) => ancestor = parent,
                // The root contains the replacement, so the climb ends before running out.
                None => return false,
            }
        }
        trace!(
            from = leaf.0,
            via = ancestor.0,
            "relocating updated point through ancestor"
        );
        self.insert_from(ancestor, replacement)
    }

    /// Find the leaf and bucket slot holding `point`.
    fn locate(&self, point: &Point<D>) -> Option<(NodeId, usize)> {
        let leaf = self.leaf_containing(point.x(), point.y())?;
        let slot = self.node_at(leaf).points.iter().position(|p| p == point)?;
        Some((leaf, slot))
    }
}

/// Read-only view of one node of a [`QuadTree`].
pub struct NodeRef<'a, D> {
    id: NodeId,
    node: &'a Node<D>,
}

impl<D> Clone for NodeRef<'_, D> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<D> Copy for NodeRef<'_, D> {}

impl<D> Debug for NodeRef<'_, D> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("NodeRef")
            .field("id", &self.id)
            .field("level", &self.node.level)
            .field("boundary", &self.node.boundary)
            .field("points", &self.node.points.len())
            .field("leaf", &self.is_leaf())
            .finish_non_exhaustive()
    }
}

impl<'a, D> NodeRef<'a, D> {
    /// Handle of this node.
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Region covered by this node.
    pub fn boundary(&self) -> &'a Aabb {
        &self.node.boundary
    }

    /// Depth label: the root's level plus the number of splits above this node.
    pub fn level(&self) -> u32 {
        self.node.level
    }

    /// The node this one was split from; `None` for the root.
    pub fn parent(&self) -> Option<NodeId> {
        self.node.parent
    }

    /// The four quadrants in NW, NE, SW, SE order; `None` for a leaf.
    pub fn children(&self) -> Option<[NodeId; 4]> {
        self.node.children
    }

    /// Whether this node holds points directly.
    pub fn is_leaf(&self) -> bool {
        self.node.children.is_none()
    }

    /// Points held directly by this node. Always empty for internal nodes.
    pub fn points(&self) -> &'a [Point<D>] {
        &self.node.points
    }
}
