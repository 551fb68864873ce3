//! Run configuration
//!
//! Everything a caller needs to set up a simulation, loadable from JSON.
//! Missing fields fall back to the reference scenario: a ball launched from
//! the origin inside a slowly turning triangle.

use std::path::Path;

use glam::DVec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::Result;
use crate::polar_to_cartesian;
use crate::sim::{Polygon, Simulation};

/// Container shape
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ShapePreset {
    /// Isosceles triangle filling a `size` x `size` box
    #[default]
    Triangle,
    /// Regular polygon with circumradius `size / 2`
    Regular { sides: usize },
    /// Explicit outline; `size` is ignored
    Custom { vertices: Vec<DVec2> },
}

impl ShapePreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            ShapePreset::Triangle => "triangle",
            ShapePreset::Regular { .. } => "regular",
            ShapePreset::Custom { .. } => "custom",
        }
    }

    /// Build the container polygon
    pub fn build(&self, size: f64) -> Result<Polygon> {
        match self {
            ShapePreset::Triangle => Polygon::triangle(size),
            ShapePreset::Regular { sides } => Polygon::regular(*sides, size / 2.0),
            ShapePreset::Custom { vertices } => Polygon::new(vertices.clone()),
        }
    }
}

/// Launch the ball in a seeded random direction
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RandomLaunch {
    pub seed: u64,
    /// Units per step
    pub speed: f64,
}

impl RandomLaunch {
    pub fn velocity(&self) -> DVec2 {
        let mut rng = Pcg32::seed_from_u64(self.seed);
        let heading = rng.random_range(0.0..std::f64::consts::TAU);
        polar_to_cartesian(self.speed, heading)
    }
}

/// Simulation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    // === Container ===
    pub shape: ShapePreset,
    /// Shape scale (see [`ShapePreset`])
    pub size: f64,
    /// Rotation per step (radians)
    pub angular_velocity: f64,

    // === Ball ===
    pub ball_radius: f64,
    pub ball_position: DVec2,
    /// Units per step; ignored when `random_launch` is set
    pub ball_velocity: DVec2,
    pub random_launch: Option<RandomLaunch>,

    // === Output ===
    /// Trail length in positions
    pub trail_capacity: usize,
    /// Steps per second of simulated time
    pub fps: u32,
    /// Run length in seconds
    pub duration_secs: f64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            shape: ShapePreset::Triangle,
            size: TRIANGLE_SIZE,
            angular_velocity: ANGULAR_VELOCITY,

            ball_radius: BALL_RADIUS,
            ball_position: DVec2::ZERO,
            ball_velocity: DVec2::new(BALL_START_VELOCITY.0, BALL_START_VELOCITY.1),
            random_launch: None,

            trail_capacity: TRAIL_CAPACITY,
            fps: FPS,
            duration_secs: DURATION_SECS,
        }
    }
}

impl SimConfig {
    /// Parse settings from a JSON document
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(config)
    }

    /// Pretty-printed JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Effective starting velocity
    pub fn initial_velocity(&self) -> DVec2 {
        match &self.random_launch {
            Some(launch) => launch.velocity(),
            None => self.ball_velocity,
        }
    }

    /// Number of steps covering `duration_secs` at `fps`
    pub fn total_steps(&self) -> u64 {
        let steps = f64::from(self.fps) * self.duration_secs;
        if steps.is_finite() && steps > 0.0 {
            steps.round() as u64
        } else {
            0
        }
    }

    /// Create a simulation from these settings
    pub fn build(&self) -> Result<Simulation> {
        let polygon = self.shape.build(self.size)?;
        Simulation::with_polygon(
            polygon,
            self.ball_position,
            self.initial_velocity(),
            self.angular_velocity,
            self.ball_radius,
            self.trail_capacity,
        )
    }
}
