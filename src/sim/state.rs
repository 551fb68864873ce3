//! Simulation state
//!
//! Everything a run owns lives here: the container, the ball, the trail and
//! diagnostic counters. There is no global state; independent simulations can
//! coexist.

use std::collections::VecDeque;

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::polygon::Polygon;
use crate::error::{ConfigError, Result};

/// The ball
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub pos: DVec2,
    pub vel: DVec2,
    pub radius: f64,
}

impl Ball {
    pub fn new(pos: DVec2, vel: DVec2, radius: f64) -> Self {
        Self { pos, vel, radius }
    }

    /// Current speed (units per step)
    #[inline]
    pub fn speed(&self) -> f64 {
        self.vel.length()
    }
}

/// Bounded history of recent ball positions, oldest first
#[derive(Debug, Clone, Serialize)]
pub struct Trail {
    points: VecDeque<DVec2>,
    capacity: usize,
}

impl Trail {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            points: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append a position, evicting the oldest ones beyond capacity
    pub fn record(&mut self, pos: DVec2) {
        self.points.push_back(pos);
        while self.points.len() > self.capacity {
            self.points.pop_front();
        }
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Positions in chronological order
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &DVec2> + ExactSizeIterator {
        self.points.iter()
    }

    /// Most recent position
    pub fn latest(&self) -> Option<DVec2> {
        self.points.back().copied()
    }
}

/// Diagnostic counters, never read by the physics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimStats {
    /// Steps taken since construction or reset
    pub steps: u64,
    /// Edge collisions resolved
    pub collisions: u64,
    /// Containment fallbacks (ball escaped and was recentred)
    pub recentres: u64,
}

/// A complete, self-contained simulation run
#[derive(Debug, Clone, Serialize)]
pub struct Simulation {
    pub(crate) polygon: Polygon,
    pub(crate) ball: Ball,
    /// Container rotation per step (radians)
    pub(crate) angular_velocity: f64,
    pub(crate) trail: Trail,
    pub(crate) stats: SimStats,
    /// Rotated outline as of the last step
    pub(crate) vertices: Vec<DVec2>,
}

/// Read-only view of the state after a step, for renderers
#[derive(Debug, Clone, Copy, Serialize)]
pub struct SnapshotView<'a> {
    pub ball_position: DVec2,
    pub ball_velocity: DVec2,
    pub rotated_vertices: &'a [DVec2],
    pub trail: &'a Trail,
}

impl Simulation {
    /// Create a simulation.
    ///
    /// The ball starts at `center_position` with `initial_velocity` inside a
    /// container built from `polygon_vertices` that turns by
    /// `angular_velocity` radians per step.
    pub fn new(
        center_position: DVec2,
        initial_velocity: DVec2,
        polygon_vertices: Vec<DVec2>,
        angular_velocity: f64,
        ball_radius: f64,
        trail_capacity: usize,
    ) -> Result<Self> {
        let polygon = Polygon::new(polygon_vertices)?;
        Self::with_polygon(
            polygon,
            center_position,
            initial_velocity,
            angular_velocity,
            ball_radius,
            trail_capacity,
        )
    }

    /// Create a simulation around an already-built container
    pub fn with_polygon(
        polygon: Polygon,
        center_position: DVec2,
        initial_velocity: DVec2,
        angular_velocity: f64,
        ball_radius: f64,
        trail_capacity: usize,
    ) -> Result<Self> {
        if ball_radius.is_nan() || ball_radius <= 0.0 || ball_radius.is_infinite() {
            return Err(ConfigError::NonPositiveRadius(ball_radius).into());
        }
        if trail_capacity == 0 {
            return Err(ConfigError::ZeroTrailCapacity.into());
        }
        if !center_position.is_finite() {
            return Err(ConfigError::NonFinite("ball position").into());
        }
        if !initial_velocity.is_finite() {
            return Err(ConfigError::NonFinite("ball velocity").into());
        }
        if !angular_velocity.is_finite() {
            return Err(ConfigError::NonFinite("angular velocity").into());
        }

        let vertices = polygon.rotated_vertices();
        Ok(Self {
            polygon,
            ball: Ball::new(center_position, initial_velocity, ball_radius),
            angular_velocity,
            trail: Trail::with_capacity(trail_capacity),
            stats: SimStats::default(),
            vertices,
        })
    }

    /// Re-initialize in place. On error the current state is kept.
    pub fn reset(
        &mut self,
        center_position: DVec2,
        initial_velocity: DVec2,
        polygon_vertices: Vec<DVec2>,
        angular_velocity: f64,
        ball_radius: f64,
        trail_capacity: usize,
    ) -> Result<()> {
        *self = Self::new(
            center_position,
            initial_velocity,
            polygon_vertices,
            angular_velocity,
            ball_radius,
            trail_capacity,
        )?;
        log::debug!("Simulation reset");
        Ok(())
    }

    /// Advance one step and return the resulting state
    pub fn step(&mut self) -> SnapshotView<'_> {
        super::tick::tick(self);
        self.snapshot()
    }

    /// Current state without stepping
    pub fn snapshot(&self) -> SnapshotView<'_> {
        SnapshotView {
            ball_position: self.ball.pos,
            ball_velocity: self.ball.vel,
            rotated_vertices: &self.vertices,
            trail: &self.trail,
        }
    }

    pub fn ball(&self) -> &Ball {
        &self.ball
    }

    pub fn polygon(&self) -> &Polygon {
        &self.polygon
    }

    pub fn trail(&self) -> &Trail {
        &self.trail
    }

    pub fn stats(&self) -> SimStats {
        self.stats
    }

    pub fn angular_velocity(&self) -> f64 {
        self.angular_velocity
    }

    /// Rotated outline as of the last step
    pub fn rotated_vertices(&self) -> &[DVec2] {
        &self.vertices
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SimError;

    fn triangle() -> Vec<DVec2> {
        vec![
            DVec2::new(0.0, 3.0),
            DVec2::new(-2.6, -1.5),
            DVec2::new(2.6, -1.5),
        ]
    }

    #[test]
    fn test_trail_evicts_oldest() {
        let mut trail = Trail::with_capacity(3);
        for i in 0..5 {
            trail.record(DVec2::new(i as f64, 0.0));
        }
        assert_eq!(trail.len(), 3);
        let xs: Vec<f64> = trail.iter().map(|p| p.x).collect();
        assert_eq!(xs, vec![2.0, 3.0, 4.0]);
        assert_eq!(trail.latest(), Some(DVec2::new(4.0, 0.0)));

        trail.clear();
        assert!(trail.is_empty());
        assert_eq!(trail.capacity(), 3);
    }

    #[test]
    fn test_new_initial_state() {
        let sim = Simulation::new(DVec2::ZERO, DVec2::new(0.15, 0.2), triangle(), 0.01, 0.3, 10)
            .unwrap();
        assert_eq!(sim.ball().pos, DVec2::ZERO);
        assert!((sim.ball().speed() - 0.25).abs() < 1e-12);
        assert!(sim.trail().is_empty());
        assert_eq!(sim.stats(), SimStats::default());
        assert_eq!(sim.rotated_vertices(), triangle().as_slice());
        assert_eq!(sim.polygon().rotation(), 0.0);
    }

    #[test]
    fn test_rejects_bad_radius() {
        for radius in [0.0, -0.3, f64::NAN, f64::INFINITY] {
            let result = Simulation::new(DVec2::ZERO, DVec2::ZERO, triangle(), 0.0, radius, 10);
            assert!(matches!(
                result,
                Err(SimError::InvalidConfiguration(ConfigError::NonPositiveRadius(_)))
            ));
        }
    }

    #[test]
    fn test_rejects_zero_trail_capacity() {
        let result = Simulation::new(DVec2::ZERO, DVec2::ZERO, triangle(), 0.0, 0.3, 0);
        assert!(matches!(
            result,
            Err(SimError::InvalidConfiguration(ConfigError::ZeroTrailCapacity))
        ));
    }

    #[test]
    fn test_rejects_non_finite_motion() {
        let result = Simulation::new(DVec2::ZERO, DVec2::new(f64::NAN, 0.0), triangle(), 0.0, 0.3, 10);
        assert!(matches!(
            result,
            Err(SimError::InvalidConfiguration(ConfigError::NonFinite("ball velocity")))
        ));
        let result = Simulation::new(DVec2::ZERO, DVec2::ZERO, triangle(), f64::INFINITY, 0.3, 10);
        assert!(matches!(
            result,
            Err(SimError::InvalidConfiguration(ConfigError::NonFinite("angular velocity")))
        ));
    }

    #[test]
    fn test_rejects_degenerate_polygon() {
        let result = Simulation::new(
            DVec2::ZERO,
            DVec2::ZERO,
            vec![DVec2::ZERO, DVec2::X, DVec2::new(2.0, 0.0)],
            0.0,
            0.3,
            10,
        );
        assert!(matches!(result, Err(SimError::DegenerateGeometry(_))));
    }

    #[test]
    fn test_reset_replaces_state() {
        let mut sim = Simulation::new(DVec2::ZERO, DVec2::new(0.15, 0.2), triangle(), 0.01, 0.3, 10)
            .unwrap();
        for _ in 0..5 {
            sim.step();
        }
        sim.reset(DVec2::new(0.1, 0.0), DVec2::ZERO, triangle(), 0.02, 0.2, 4)
            .unwrap();
        assert_eq!(sim.ball().pos, DVec2::new(0.1, 0.0));
        assert_eq!(sim.ball().radius, 0.2);
        assert_eq!(sim.stats().steps, 0);
        assert!(sim.trail().is_empty());
        assert_eq!(sim.trail().capacity(), 4);
        assert_eq!(sim.polygon().rotation(), 0.0);
        assert_eq!(sim.angular_velocity(), 0.02);
    }

    #[test]
    fn test_failed_reset_keeps_state() {
        let mut sim = Simulation::new(DVec2::ZERO, DVec2::new(0.15, 0.2), triangle(), 0.01, 0.3, 10)
            .unwrap();
        sim.step();
        let before = sim.ball().pos;
        assert!(sim.reset(DVec2::ZERO, DVec2::ZERO, triangle(), 0.0, -1.0, 10).is_err());
        assert_eq!(sim.ball().pos, before);
        assert_eq!(sim.stats().steps, 1);
    }

    #[test]
    fn test_snapshot_serializes() {
        let mut sim = Simulation::new(DVec2::ZERO, DVec2::new(0.15, 0.2), triangle(), 0.01, 0.3, 10)
            .unwrap();
        let view = sim.step();
        let json = serde_json::to_value(view).unwrap();
        assert_eq!(json["rotated_vertices"].as_array().unwrap().len(), 3);
        assert_eq!(json["trail"]["points"].as_array().unwrap().len(), 1);
    }
}
