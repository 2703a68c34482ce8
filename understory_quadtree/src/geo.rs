// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Meters to degrees conversion on a spherical Earth.
//!
//! This is a planar approximation: a radius is turned into a latitude half-height that is the
//! same everywhere, and a longitude half-width scaled by `1 / cos(latitude)` to account for
//! meridians converging toward the poles. Boxes built from these extents bound the circle of
//! that radius but also cover its corners, so callers that need exact great-circle results
//! must filter the hits themselves.

use core::f64::consts::PI;

use kurbo::Vec2;

/// Mean Earth radius in meters.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Length of one degree of latitude in meters.
pub const METERS_PER_DEGREE_LATITUDE: f64 = EARTH_RADIUS_M * PI / 180.0;

/// Degrees of latitude spanned by `meters` along a meridian.
#[inline]
pub fn latitude_degrees(meters: f64) -> f64 {
    meters / METERS_PER_DEGREE_LATITUDE
}

/// Degrees of longitude spanned by `meters` along the parallel at `latitude` (degrees).
///
/// At the poles (`latitude` of exactly ±90) the parallel has no length, so any positive
/// radius spans every longitude and the result is `f64::INFINITY`.
#[inline]
pub fn longitude_degrees(meters: f64, latitude: f64) -> f64 {
    let degrees = latitude_degrees(meters);
    if latitude == 90.0 || latitude == -90.0 {
        // cos(90 deg) rounds to about 6e-17 rather than zero.
        return if degrees > 0.0 { f64::INFINITY } else { 0.0 };
    }
    // Kurbo routes trig through std or libm, so this also works in no_std builds.
    let cos = Vec2::from_angle(latitude.to_radians()).x;
    let cos = if cos < 0.0 { -cos } else { cos };
    degrees / cos
}

/// Longitude half-width (`x`) and latitude half-height (`y`), in degrees, of a box that bounds
/// a circle of radius `meters` centered at `latitude`.
#[inline]
pub fn half_extent(latitude: f64, meters: f64) -> Vec2 {
    Vec2::new(
        longitude_degrees(meters, latitude),
        latitude_degrees(meters),
    )
}
