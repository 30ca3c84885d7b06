//! Mock robot simulation for hardware-free testing.
//!
//! Simulates the servo-mounted PING/IR head and the differential-drive
//! chassis against a world of cylindrical pillars. Deterministic when
//! seeded, so pipeline and navigation tests can assert exact behavior.

mod noise;
mod robot;
mod world;

pub use noise::NoiseGenerator;
pub use robot::{SimConfig, SimRobot};
pub use world::{Pillar, SimWorld};

use crate::hal::Diagnostics;

/// Diagnostics sink that records every line, for test assertions.
#[derive(Debug, Default)]
pub struct BufferDiagnostics {
    pub lines: Vec<String>,
}

impl Diagnostics for BufferDiagnostics {
    fn send_line(&mut self, line: &str) {
        self.lines.push(line.to_string());
    }
}
