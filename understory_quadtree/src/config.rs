// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-tree tuning knobs.

/// Configuration for a [`QuadTree`](crate::QuadTree).
///
/// ```
/// use understory_quadtree::QuadTreeConfig;
///
/// let config = QuadTreeConfig::default().with_capacity(8).with_max_depth(12);
/// assert_eq!(config.capacity(), 8);
/// assert_eq!(config.max_depth(), 12);
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct QuadTreeConfig {
    capacity: usize,
    max_depth: u32,
}

impl QuadTreeConfig {
    /// Default bucket capacity.
    pub const DEFAULT_CAPACITY: usize = 4;

    /// Default number of subdivisions allowed below the root.
    pub const DEFAULT_MAX_DEPTH: u32 = 24;

    /// Configuration with the default capacity and depth limit.
    pub const fn new() -> Self {
        Self {
            capacity: Self::DEFAULT_CAPACITY,
            max_depth: Self::DEFAULT_MAX_DEPTH,
        }
    }

    /// Set how many points a leaf holds before it subdivides. Zero is treated as one.
    #[must_use]
    pub const fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = if capacity == 0 { 1 } else { capacity };
        self
    }

    /// Set how many levels below the root may be created.
    ///
    /// A leaf at the limit keeps accepting points past its capacity instead of subdividing.
    /// This is what stops more than `capacity` points at identical coordinates from
    /// splitting forever.
    #[must_use]
    pub const fn with_max_depth(mut self, max_depth: u32) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Points a leaf holds before it subdivides.
    #[inline]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Levels that may be created below the root.
    #[inline]
    pub const fn max_depth(&self) -> u32 {
        self.max_depth
    }
}

impl Default for QuadTreeConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let c = QuadTreeConfig::default();
        assert_eq!(c.capacity(), 4);
        assert_eq!(c.max_depth(), 24);
        assert_eq!(c, QuadTreeConfig::new());
    }

    #[test]
    fn zero_capacity_is_raised() {
        assert_eq!(QuadTreeConfig::new().with_capacity(0).capacity(), 1);
    }
}
