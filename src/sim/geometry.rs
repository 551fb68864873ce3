//! Geometry kernel
//!
//! Pure functions over points and vertex lists. Polygons are given as an
//! ordered slice of vertices where vertex `i` connects to `(i + 1) % n`.
//! Either winding is accepted.

use glam::DVec2;

use crate::consts::CONTAINMENT_EPSILON;

/// Signed area of a polygon (shoelace formula).
///
/// Positive for counter-clockwise, negative for clockwise.
pub fn signed_area(vertices: &[DVec2]) -> f64 {
    let n = vertices.len();
    if n < 3 {
        return 0.0;
    }
    let mut sum = 0.0;
    for i in 0..n {
        let a = vertices[i];
        let b = vertices[(i + 1) % n];
        sum += a.perp_dot(b);
    }
    sum * 0.5
}

/// Vertex average. For a convex polygon this always lies inside it.
pub fn centroid(vertices: &[DVec2]) -> DVec2 {
    if vertices.is_empty() {
        return DVec2::ZERO;
    }
    vertices.iter().copied().sum::<DVec2>() / vertices.len() as f64
}

/// Rotate a point about the origin by `theta` radians
#[inline]
pub fn rotate_point(p: DVec2, theta: f64) -> DVec2 {
    let (sin, cos) = theta.sin_cos();
    DVec2::new(p.x * cos - p.y * sin, p.x * sin + p.y * cos)
}

/// Reflect velocity off a surface with given unit normal
#[inline]
pub fn reflect(vel: DVec2, normal: DVec2) -> DVec2 {
    vel - 2.0 * vel.dot(normal) * normal
}

/// Barycentric inside test for a triangle. Boundary counts as inside.
pub fn point_in_triangle(p: DVec2, a: DVec2, b: DVec2, c: DVec2) -> bool {
    // Twice the signed area of the full triangle
    let det = (b - a).perp_dot(c - a);
    if det.abs() < f64::EPSILON {
        return false;
    }

    // Each weight is the signed sub-triangle area opposite its vertex
    let w_a = (c - b).perp_dot(p - b) / det;
    let w_b = (a - c).perp_dot(p - c) / det;
    let w_c = 1.0 - w_a - w_b;

    let in_range = |w: f64| (-CONTAINMENT_EPSILON..=1.0 + CONTAINMENT_EPSILON).contains(&w);
    in_range(w_a) && in_range(w_b) && in_range(w_c)
}

/// Inside test for a convex polygon. Boundary counts as inside.
///
/// Triangles use barycentric weights; larger polygons use a half-plane test
/// against every edge, where the inward side is picked from the winding.
pub fn point_in_convex_polygon(p: DVec2, vertices: &[DVec2]) -> bool {
    match vertices {
        [a, b, c] => point_in_triangle(p, *a, *b, *c),
        _ if vertices.len() < 3 => false,
        _ => {
            let winding = signed_area(vertices).signum();
            let n = vertices.len();
            (0..n).all(|i| {
                let a = vertices[i];
                let b = vertices[(i + 1) % n];
                let edge = b - a;
                let len = edge.length();
                if len == 0.0 {
                    return true;
                }
                // Signed distance to the edge line, positive on the inward side
                let inward = winding * edge.perp_dot(p - a) / len;
                inward >= -CONTAINMENT_EPSILON
            })
        }
    }
}

/// Project `p` onto the line through `a` and `b`.
///
/// Returns the foot point and the line parameter `t` (0 at `a`, 1 at `b`),
/// or `None` when the foot falls outside the segment. A zero-length segment
/// never projects.
pub fn project_onto_edge(p: DVec2, a: DVec2, b: DVec2) -> Option<(DVec2, f64)> {
    let edge = b - a;
    let len_sq = edge.length_squared();
    if len_sq == 0.0 {
        return None;
    }
    let t = (p - a).dot(edge) / len_sq;
    if !(0.0..=1.0).contains(&t) {
        return None;
    }
    Some((a + edge * t, t))
}

/// Closest point on segment `a..b` to `p`, with its clamped parameter
pub fn closest_point_on_segment(p: DVec2, a: DVec2, b: DVec2) -> (DVec2, f64) {
    let edge = b - a;
    let len_sq = edge.length_squared();
    if len_sq == 0.0 {
        return (a, 0.0);
    }
    let t = ((p - a).dot(edge) / len_sq).clamp(0.0, 1.0);
    (a + edge * t, t)
}

/// Euclidean distance from `p` to segment `a..b`
#[inline]
pub fn distance_to_segment(p: DVec2, a: DVec2, b: DVec2) -> f64 {
    let (foot, _) = closest_point_on_segment(p, a, b);
    (p - foot).length()
}
