//! Fixed step simulation tick
//!
//! One call advances the container rotation, integrates the ball, resolves at
//! most one edge collision and records the trail.

use super::collision::{EdgeContact, contain_ball, resolve_edge_collision};
use super::state::Simulation;

/// What happened during a single step
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StepReport {
    /// Edge collision resolved this step, if any
    pub contact: Option<EdgeContact>,
    /// The ball had escaped and was moved back to the polygon's centre
    pub recentred: bool,
}

impl StepReport {
    #[inline]
    pub fn collided(&self) -> bool {
        self.contact.is_some()
    }
}

/// Advance the simulation by one step
pub fn tick(sim: &mut Simulation) -> StepReport {
    sim.polygon.advance_rotation(sim.angular_velocity);
    sim.vertices = sim.polygon.rotated_vertices();

    // Explicit Euler, one unit of time per step
    sim.ball.pos += sim.ball.vel;

    let mut report = StepReport::default();
    match resolve_edge_collision(&mut sim.ball, &sim.vertices) {
        Some(contact) => {
            log::debug!(
                "Step {}: edge {} hit at distance {:.4}, velocity {:?} -> {:?}",
                sim.stats.steps,
                contact.edge,
                contact.hit.distance,
                contact.velocity_in,
                contact.velocity_out
            );
            sim.stats.collisions += 1;
            report.contact = Some(contact);
        }
        None => {
            let escaped_at = sim.ball.pos;
            if contain_ball(&mut sim.ball, &sim.vertices) {
                log::warn!(
                    "Step {}: ball escaped the container at {:?}, recentred to {:?}",
                    sim.stats.steps,
                    escaped_at,
                    sim.ball.pos
                );
                sim.stats.recentres += 1;
                report.recentred = true;
            }
        }
    }

    sim.trail.record(sim.ball.pos);
    sim.stats.steps += 1;
    report
}
