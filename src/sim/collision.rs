//! Collision detection and response against the container's edges
//!
//! Each edge is a straight segment of the rotated outline. The ball collides
//! with an edge when the perpendicular foot of its centre lies on the segment
//! and the centre is closer than the ball radius. Corners get no special
//! treatment: a ball whose foot misses both neighbouring edges is left to the
//! containment fallback.

use glam::DVec2;

use super::geometry::{centroid, point_in_convex_polygon, project_onto_edge, reflect};
use super::state::Ball;
use crate::consts::ANTI_STICK_MARGIN;

/// Contact between the ball and one edge
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeHit {
    /// Foot of the ball centre on the edge
    pub point: DVec2,
    /// Unit normal pointing toward the ball centre's side of the edge
    pub normal: DVec2,
    /// Distance from the ball centre to `point`
    pub distance: f64,
}

/// An edge collision that was resolved during a step
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeContact {
    /// Index of the edge's first vertex
    pub edge: usize,
    pub hit: EdgeHit,
    /// Velocity before reflection
    pub velocity_in: DVec2,
    /// Velocity after reflection
    pub velocity_out: DVec2,
}

/// Check a ball against a single edge `a -> b`.
///
/// `interior` yields any point inside the polygon. It is only evaluated when
/// the ball centre sits exactly on the edge line.
pub fn ball_edge_collision(
    ball_pos: DVec2,
    ball_radius: f64,
    a: DVec2,
    b: DVec2,
    interior: impl FnOnce() -> DVec2,
) -> Option<EdgeHit> {
    let (foot, _) = project_onto_edge(ball_pos, a, b)?;
    let distance = (ball_pos - foot).length();
    if distance >= ball_radius {
        return None;
    }

    let direction = (b - a).normalize();
    let mut normal = direction.perp();
    let to_ball = ball_pos - a;
    let side = normal.dot(to_ball);
    if side < 0.0 {
        normal = -normal;
    } else if side == 0.0 && normal.dot(interior() - a) < 0.0 {
        // Centre on the line: push back toward the interior
        normal = -normal;
    }

    Some(EdgeHit {
        point: foot,
        normal,
        distance,
    })
}

/// Resolve the first edge (in vertex order) the ball overlaps.
///
/// Reflects the velocity about the edge normal and moves the ball just past
/// one radius from the edge. At most one edge is resolved per call.
pub fn resolve_edge_collision(ball: &mut Ball, vertices: &[DVec2]) -> Option<EdgeContact> {
    let n = vertices.len();
    let interior = || centroid(vertices);

    let (edge, hit) = (0..n).find_map(|i| {
        ball_edge_collision(ball.pos, ball.radius, vertices[i], vertices[(i + 1) % n], interior)
            .map(|hit| (i, hit))
    })?;

    let velocity_in = ball.vel;
    ball.vel = reflect(ball.vel, hit.normal);
    ball.pos = hit.point + hit.normal * ball.radius * ANTI_STICK_MARGIN;

    Some(EdgeContact {
        edge,
        hit,
        velocity_in,
        velocity_out: ball.vel,
    })
}

/// Containment fallback: if the ball centre escaped the polygon, put it back
/// at the polygon's centre. Velocity is left alone.
///
/// Returns true if the ball was moved.
pub fn contain_ball(ball: &mut Ball, vertices: &[DVec2]) -> bool {
    if point_in_convex_polygon(ball.pos, vertices) {
        return false;
    }
    ball.pos = centroid(vertices);
    true
}
