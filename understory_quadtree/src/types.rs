// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Primitive types: tagged points and axis-aligned boxes in degree space.

use kurbo::{Rect, Vec2};

use crate::geo;

/// A coordinate pair carrying an opaque payload.
///
/// `x` is the longitude and `y` the latitude, both in degrees. Coordinates are not validated,
/// so any planar space works as long as boxes are built in the same space.
///
/// Two points are equal when their coordinates and payloads are equal; this is the identity
/// used by [`QuadTree::remove`](crate::QuadTree::remove) and
/// [`QuadTree::update`](crate::QuadTree::update).
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Point<D = ()> {
    x: f64,
    y: f64,
    data: D,
}

impl<D> Point<D> {
    /// Create a point at longitude `x`, latitude `y`.
    pub const fn new(x: f64, y: f64, data: D) -> Self {
        Self { x, y, data }
    }

    /// Longitude (degrees).
    #[inline]
    pub const fn x(&self) -> f64 {
        self.x
    }

    /// Latitude (degrees).
    #[inline]
    pub const fn y(&self) -> f64 {
        self.y
    }

    /// The payload.
    #[inline]
    pub const fn data(&self) -> &D {
        &self.data
    }

    /// Consume the point, returning its payload.
    pub fn into_data(self) -> D {
        self.data
    }

    /// The coordinates as a Kurbo point.
    #[inline]
    pub const fn position(&self) -> kurbo::Point {
        kurbo::Point::new(self.x, self.y)
    }

    /// Half-extents, in degrees, of a box centered here that bounds a circle of `meters` radius.
    ///
    /// The returned `x` is the longitude half-width and `y` the latitude half-height.
    /// See [`geo`](crate::geo) for the approximation used.
    pub fn half_extent_for_radius(&self, meters: f64) -> Vec2 {
        geo::half_extent(self.y, meters)
    }
}

/// Axis-aligned bounding box in degree space.
///
/// Containment is half-open: a box covers `[min, max)` on both axes, so the four
/// [quadrants](Self::quadrants) of a box claim every point of it exactly once.
/// Intersection is closed, since it is only used to prune subtrees.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Aabb {
    rect: Rect,
}

impl Aabb {
    /// Create a box from its center and non-negative half-extents.
    pub fn new(center: kurbo::Point, half: Vec2) -> Self {
        Self {
            rect: Rect::new(
                center.x - half.x,
                center.y - half.y,
                center.x + half.x,
                center.y + half.y,
            ),
        }
    }

    /// Create the box bounding a circle of `meters` radius around `center`.
    pub fn around<D>(center: &Point<D>, meters: f64) -> Self {
        Self::new(center.position(), center.half_extent_for_radius(meters))
    }

    /// Wrap a Kurbo rectangle. The rectangle is expected to be non-inverted.
    pub const fn from_rect(rect: Rect) -> Self {
        Self { rect }
    }

    /// The box as a Kurbo rectangle.
    #[inline]
    pub const fn rect(&self) -> Rect {
        self.rect
    }

    /// Center of the box.
    #[inline]
    pub fn center(&self) -> kurbo::Point {
        self.rect.center()
    }

    /// Half-width (`x`) and half-height (`y`).
    #[inline]
    pub fn half_extent(&self) -> Vec2 {
        Vec2::new(self.rect.width() * 0.5, self.rect.height() * 0.5)
    }

    /// Whether `(x, y)` lies in `[min_x, max_x) × [min_y, max_y)`.
    #[inline]
    pub fn contains_xy(&self, x: f64, y: f64) -> bool {
        // Kurbo's containment test is half-open on both axes.
        self.rect.contains(kurbo::Point::new(x, y))
    }

    /// Whether the point lies inside this box; the payload is ignored.
    #[inline]
    pub fn contains<D>(&self, point: &Point<D>) -> bool {
        self.contains_xy(point.x, point.y)
    }

    /// Whether the two boxes overlap on both axes. Touching edges count as overlap.
    #[inline]
    pub fn intersects(&self, other: &Self) -> bool {
        let (a, b) = (self.rect, other.rect);
        a.x0 <= b.x1 && b.x0 <= a.x1 && a.y0 <= b.y1 && b.y0 <= a.y1
    }

    /// The four equal quarters of this box, in NW, NE, SW, SE order.
    ///
    /// North is toward larger `y`. Siblings share their inner edges exactly (the split lines
    /// run through [`center`](Self::center)), so there is no gap or overlap between them.
    pub fn quadrants(&self) -> [Self; 4] {
        let Rect { x0, y0, x1, y1 } = self.rect;
        let c = self.center();
        [
            Self::from_rect(Rect::new(x0, c.y, c.x, y1)),
            Self::from_rect(Rect::new(c.x, c.y, x1, y1)),
            Self::from_rect(Rect::new(x0, y0, c.x, c.y)),
            Self::from_rect(Rect::new(c.x, y0, x1, c.y)),
        ]
    }

    /// Index into [`quadrants`](Self::quadrants) of the quarter claiming `(x, y)`.
    ///
    /// Only meaningful for coordinates this box contains.
    #[inline]
    pub(crate) fn quadrant_of(&self, x: f64, y: f64) -> usize {
        let c = self.center();
        let east = usize::from(x >= c.x);
        let south = usize::from(y < c.y);
        south * 2 + east
    }

    /// Whether the box can be split into four finite quarters.
    pub(crate) fn is_divisible(&self) -> bool {
        let c = self.center();
        c.x.is_finite() && c.y.is_finite()
    }
}
