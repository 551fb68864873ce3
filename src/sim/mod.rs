//! Deterministic simulation module
//!
//! All physics lives here. This module must be pure and deterministic:
//! - One fixed step per call, no wall-clock time
//! - Stable iteration order (edges in vertex order)
//! - No rendering, file or platform dependencies

pub mod collision;
pub mod geometry;
pub mod polygon;
pub mod state;
pub mod tick;

pub use collision::{EdgeContact, EdgeHit, ball_edge_collision, contain_ball, resolve_edge_collision};
pub use geometry::{
    closest_point_on_segment, distance_to_segment, point_in_convex_polygon, point_in_triangle,
    project_onto_edge, reflect,
};
pub use polygon::Polygon;
pub use state::{Ball, SimStats, Simulation, SnapshotView, Trail};
pub use tick::{StepReport, tick};
