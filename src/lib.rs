//! Roto Bounce - a ball bouncing inside a rotating convex polygon
//!
//! Core modules:
//! - `sim`: Deterministic simulation (geometry, collisions, stepping)
//! - `settings`: Data-driven run configuration
//! - `recording`: Per-step frame capture for external renderers
//! - `error`: Construction-time error types

pub mod error;
pub mod recording;
pub mod settings;
pub mod sim;

pub use error::{ConfigError, GeometryError, Result, SimError};
pub use recording::{Frame, Recording};
pub use settings::{RandomLaunch, ShapePreset, SimConfig};
pub use sim::{Simulation, SnapshotView, StepReport, tick};

use glam::DVec2;

/// Simulation configuration constants (the reference scenario)
pub mod consts {
    /// Ball collision radius
    pub const BALL_RADIUS: f64 = 0.3;
    /// Reference triangle size (width and height of its bounding box)
    pub const TRIANGLE_SIZE: f64 = 6.0;
    /// Initial ball velocity, units per step
    pub const BALL_START_VELOCITY: (f64, f64) = (0.15, 0.2);
    /// Container rotation, radians per step
    pub const ANGULAR_VELOCITY: f64 = 0.01;
    /// Number of recent ball positions kept in the trail
    pub const TRAIL_CAPACITY: usize = 1000;

    /// Steps per second for the headless runner
    pub const FPS: u32 = 60;
    /// Default run length in seconds
    pub const DURATION_SECS: f64 = 10.0;

    /// Repositioning overshoot after an edge collision (1% past the radius)
    pub const ANTI_STICK_MARGIN: f64 = 1.01;
    /// Tolerance for inside/outside tests at polygon edges
    pub const CONTAINMENT_EPSILON: f64 = 1e-9;
    /// Edges shorter than this, or polygons with less area, are degenerate
    pub const DEGENERATE_TOLERANCE: f64 = 1e-9;
}

/// Normalized angle to [0, 2π)
#[inline]
pub fn normalize_angle(angle: f64) -> f64 {
    use std::f64::consts::TAU;
    let wrapped = angle.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs
    if wrapped >= TAU { 0.0 } else { wrapped }
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f64, theta: f64) -> DVec2 {
    DVec2::new(r * theta.cos(), r * theta.sin())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{PI, TAU};

    #[test]
    fn test_normalize_angle() {
        assert!((normalize_angle(TAU + 0.5) - 0.5).abs() < 1e-12);
        assert!((normalize_angle(-PI / 2.0) - 1.5 * PI).abs() < 1e-12);
        assert_eq!(normalize_angle(0.0), 0.0);
        assert!(normalize_angle(-1e-300) < TAU);
    }

    #[test]
    fn test_polar_to_cartesian() {
        let p = polar_to_cartesian(2.0, PI / 2.0);
        assert!(p.x.abs() < 1e-12);
        assert!((p.y - 2.0).abs() < 1e-12);
    }
}
