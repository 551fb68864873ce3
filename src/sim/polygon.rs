//! Rotating convex container
//!
//! A polygon is defined by:
//! - base vertices: the unrotated outline, fixed for the polygon's lifetime
//! - rotation: accumulated angle (radians) about the origin
//!
//! Rotated vertices are always recomputed from the base outline so repeated
//! rotation never accumulates drift.

use std::f64::consts::{FRAC_PI_2, TAU};

use glam::DVec2;
use serde::Serialize;

use super::geometry::{centroid, point_in_convex_polygon, rotate_point, signed_area};
use crate::consts::DEGENERATE_TOLERANCE;
use crate::error::{ConfigError, GeometryError, Result};
use crate::{normalize_angle, polar_to_cartesian};

/// A convex polygon spinning about the origin
#[derive(Debug, Clone, Serialize)]
pub struct Polygon {
    /// Unrotated outline, in edge order
    base: Vec<DVec2>,
    /// Accumulated rotation (radians, unbounded)
    rotation: f64,
}

impl Polygon {
    /// Build a polygon from its base outline, rejecting degenerate or
    /// non-convex shapes.
    pub fn new(vertices: Vec<DVec2>) -> Result<Self> {
        validate_outline(&vertices)?;
        Ok(Self {
            base: vertices,
            rotation: 0.0,
        })
    }

    /// Regular N-gon with its first vertex pointing up, counter-clockwise
    pub fn regular(sides: usize, circumradius: f64) -> Result<Self> {
        if sides < 3 {
            return Err(ConfigError::TooFewSides(sides).into());
        }
        if circumradius.is_nan() || circumradius <= 0.0 {
            return Err(ConfigError::NonPositiveSize(circumradius).into());
        }
        let step = TAU / sides as f64;
        let vertices = (0..sides)
            .map(|i| polar_to_cartesian(circumradius, FRAC_PI_2 + step * i as f64))
            .collect();
        Self::new(vertices)
    }

    /// Isosceles triangle filling a `size` x `size` box centred on the origin
    pub fn triangle(size: f64) -> Result<Self> {
        if size.is_nan() || size <= 0.0 {
            return Err(ConfigError::NonPositiveSize(size).into());
        }
        let half = size / 2.0;
        Self::new(vec![
            DVec2::new(0.0, half),
            DVec2::new(-half, -half),
            DVec2::new(half, -half),
        ])
    }

    /// Unrotated outline
    pub fn base_vertices(&self) -> &[DVec2] {
        &self.base
    }

    /// Number of vertices (and edges)
    #[inline]
    pub fn len(&self) -> usize {
        self.base.len()
    }

    /// Always false; a valid polygon has at least three vertices
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.base.is_empty()
    }

    /// Accumulated rotation angle (may exceed 2π)
    #[inline]
    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    /// Rotation reduced into [0, 2π)
    #[inline]
    pub fn normalized_rotation(&self) -> f64 {
        normalize_angle(self.rotation)
    }

    /// Advance the rotation by one step's worth of angular velocity
    #[inline]
    pub fn advance_rotation(&mut self, angular_velocity: f64) {
        self.rotation += angular_velocity;
    }

    /// Base outline rotated by the current angle
    pub fn rotated_vertices(&self) -> Vec<DVec2> {
        let (sin, cos) = self.rotation.sin_cos();
        self.base
            .iter()
            .map(|v| DVec2::new(v.x * cos - v.y * sin, v.x * sin + v.y * cos))
            .collect()
    }

    /// Centre of the rotated outline (vertex average)
    pub fn center(&self) -> DVec2 {
        rotate_point(centroid(&self.base), self.rotation)
    }

    /// Whether a point lies inside the rotated polygon (boundary included)
    pub fn contains_point(&self, point: DVec2) -> bool {
        point_in_convex_polygon(point, &self.rotated_vertices())
    }
}

/// Check that an outline is a usable convex container
fn validate_outline(vertices: &[DVec2]) -> std::result::Result<(), GeometryError> {
    let n = vertices.len();
    if n < 3 {
        return Err(GeometryError::TooFewVertices { count: n });
    }
    if let Some(index) = vertices.iter().position(|v| !v.is_finite()) {
        return Err(GeometryError::NonFiniteVertex { index });
    }
    for i in 0..n {
        let length = (vertices[(i + 1) % n] - vertices[i]).length();
        if length < DEGENERATE_TOLERANCE {
            return Err(GeometryError::ZeroLengthEdge { index: i, length });
        }
    }

    let area = signed_area(vertices);
    if area.abs() < DEGENERATE_TOLERANCE {
        return Err(GeometryError::ZeroArea { area });
    }

    // Every turn must go the same way as the overall winding.
    // Collinear vertices (straight angles) are allowed.
    let winding = area.signum();
    for i in 0..n {
        let prev = vertices[(i + n - 1) % n];
        let curr = vertices[i];
        let next = vertices[(i + 1) % n];
        let turn = (curr - prev).perp_dot(next - curr);
        let scale = (curr - prev).length() * (next - curr).length();
        if winding * turn < -DEGENERATE_TOLERANCE * scale {
            return Err(GeometryError::NonConvex { index: i });
        }
    }

    Ok(())
}
