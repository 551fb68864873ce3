//! Frame recording
//!
//! Captures what a renderer needs from each step and writes it out as JSON
//! lines (one frame object per line), so drawing and image export can happen
//! in a separate tool.

use std::io::Write;

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::sim::{Simulation, StepReport};

/// One recorded step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    /// 1-based step number
    pub step: u64,
    pub ball_position: DVec2,
    pub ball_velocity: DVec2,
    /// Accumulated container rotation (radians)
    pub rotation: f64,
    pub vertices: Vec<DVec2>,
    /// Edge index hit this step, if any
    pub edge: Option<usize>,
    #[serde(default)]
    pub recentred: bool,
}

/// Sequence of frames from one run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recording {
    pub frames: Vec<Frame>,
    /// Keep only every n-th step (1 keeps all)
    #[serde(default = "default_stride")]
    pub stride: u64,
}

fn default_stride() -> u64 {
    1
}

impl Default for Recording {
    fn default() -> Self {
        Self::new()
    }
}

impl Recording {
    /// Record every step
    pub fn new() -> Self {
        Self::with_stride(1)
    }

    /// Record every `stride`-th step
    pub fn with_stride(stride: u64) -> Self {
        Self {
            frames: Vec::new(),
            stride: stride.max(1),
        }
    }

    /// Capture the simulation's state right after a step
    pub fn record(&mut self, sim: &Simulation, report: &StepReport) {
        let step = sim.stats().steps;
        if step % self.stride.max(1) != 0 {
            return;
        }
        let ball = sim.ball();
        self.frames.push(Frame {
            step,
            ball_position: ball.pos,
            ball_velocity: ball.vel,
            rotation: sim.polygon().rotation(),
            vertices: sim.rotated_vertices().to_vec(),
            edge: report.contact.map(|c| c.edge),
            recentred: report.recentred,
        });
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Ball positions in chronological order
    pub fn path(&self) -> impl Iterator<Item = DVec2> + '_ {
        self.frames.iter().map(|f| f.ball_position)
    }

    /// Write one JSON object per frame
    pub fn write_json_lines<W: Write>(&self, mut writer: W) -> Result<()> {
        for frame in &self.frames {
            serde_json::to_writer(&mut writer, frame)?;
            writer.write_all(b"\n")?;
        }
        writer.flush()?;
        log::info!("Wrote {} frames", self.frames.len());
        Ok(())
    }

    /// Parse frames written by [`Recording::write_json_lines`]
    pub fn read_json_lines(input: &str) -> Result<Self> {
        let frames = input
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(serde_json::from_str::<Frame>)
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(Self { frames, stride: 1 })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::tick;

    fn sim() -> Simulation {
        Simulation::new(
            DVec2::ZERO,
            DVec2::new(0.15, 0.2),
            vec![
                DVec2::new(0.0, 3.0),
                DVec2::new(-2.6, -1.5),
                DVec2::new(2.6, -1.5),
            ],
            0.01,
            0.3,
            100,
        )
        .unwrap()
    }

    #[test]
    fn test_records_each_step() {
        let mut sim = sim();
        let mut recording = Recording::new();
        for _ in 0..10 {
            let report = tick(&mut sim);
            recording.record(&sim, &report);
        }
        assert_eq!(recording.len(), 10);
        assert_eq!(recording.frames[0].step, 1);
        assert_eq!(recording.frames[9].step, 10);

        // The first contact is on the right edge at step 6
        let hits: Vec<(u64, usize)> = recording
            .frames
            .iter()
            .filter_map(|f| f.edge.map(|e| (f.step, e)))
            .collect();
        assert_eq!(hits.first(), Some(&(6, 2)));

        let path: Vec<DVec2> = recording.path().collect();
        let trail: Vec<DVec2> = sim.trail().iter().copied().collect();
        assert_eq!(path, trail);
    }

    #[test]
    fn test_stride_skips_steps() {
        let mut sim = sim();
        let mut recording = Recording::with_stride(4);
        for _ in 0..10 {
            let report = tick(&mut sim);
            recording.record(&sim, &report);
        }
        let steps: Vec<u64> = recording.frames.iter().map(|f| f.step).collect();
        assert_eq!(steps, vec![4, 8]);
        assert_eq!(Recording::with_stride(0).stride, 1);
    }

    #[test]
    fn test_json_lines_roundtrip() {
        let mut sim = sim();
        let mut recording = Recording::new();
        for _ in 0..5 {
            let report = tick(&mut sim);
            recording.record(&sim, &report);
        }

        let mut buf = Vec::new();
        recording.write_json_lines(&mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text.lines().count(), 5);

        let parsed = Recording::read_json_lines(&text).unwrap();
        assert_eq!(parsed.frames, recording.frames);
        assert!(Recording::read_json_lines("{ broken").is_err());
    }

    #[test]
    fn test_json_lines_keep_exact_floats() {
        let frame = Frame {
            step: 1,
            ball_position: DVec2::new(0.44999999999999996, 0.6000000000000001),
            ball_velocity: DVec2::new(0.1 + 0.2, -1e-300),
            rotation: std::f64::consts::PI,
            vertices: vec![DVec2::new(2.598076211353316, -1.4999999999999998)],
            edge: None,
            recentred: false,
        };
        let recording = Recording {
            frames: vec![frame],
            stride: 1,
        };

        let mut buf = Vec::new();
        recording.write_json_lines(&mut buf).unwrap();
        let parsed = Recording::read_json_lines(&String::from_utf8(buf).unwrap()).unwrap();
        let (a, b) = (&parsed.frames[0], &recording.frames[0]);
        assert_eq!(a.ball_position.x.to_bits(), b.ball_position.x.to_bits());
        assert_eq!(a.ball_velocity.x.to_bits(), b.ball_velocity.x.to_bits());
        assert_eq!(a.ball_velocity.y.to_bits(), b.ball_velocity.y.to_bits());
        assert_eq!(a.vertices[0].y.to_bits(), b.vertices[0].y.to_bits());
        assert_eq!(parsed.frames, recording.frames);
    }
}
