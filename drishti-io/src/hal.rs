//! Collaborator traits for the navigation core.
//!
//! Register-level drivers (servo PWM, timers, ADC, UART) live behind these
//! traits; the navigation core never sees them. The mock robot in
//! [`crate::mock`] implements all three for hardware-free testing.

use crate::error::Result;
use crate::types::{ChassisDelta, HeadSample, HEAD_MAX_DEG, HEAD_MIN_DEG};

/// Servo-mounted ranging head: PING ultrasonic + IR intensity.
pub trait SensorHead {
    /// Point the head at `angle_deg` and take one reading.
    ///
    /// Blocks until the servo settles and the echo measurement completes.
    /// Angles outside the servo travel range are rejected.
    fn sample(&mut self, angle_deg: f32) -> Result<HeadSample>;
}

/// Differential-drive chassis with bump sensors.
pub trait Chassis {
    /// Command wheel speeds (mm/s, signed; equal = straight, opposite = spin).
    fn set_wheels(&mut self, left: i16, right: i16) -> Result<()>;

    /// Poll the chassis, returning deltas accumulated since the last poll.
    ///
    /// Blocks for one sensor frame. Callers integrate the returned deltas
    /// themselves; no pose is persisted across maneuvers.
    fn update(&mut self) -> Result<ChassisDelta>;

    /// Stop both wheels.
    fn stop(&mut self) -> Result<()> {
        self.set_wheels(0, 0)
    }
}

/// One-way diagnostic text channel.
///
/// Delivery is best-effort: the physical UART drops or corrupts on overrun,
/// so callers must not depend on any line arriving.
pub trait Diagnostics {
    fn send_line(&mut self, line: &str);
}

/// Diagnostics sink that routes lines to `tracing` at INFO level.
#[derive(Debug, Default)]
pub struct LogDiagnostics;

impl Diagnostics for LogDiagnostics {
    fn send_line(&mut self, line: &str) {
        tracing::info!(target: "diagnostics", "{line}");
    }
}

/// Validate a servo angle against the head travel range.
pub fn check_head_angle(angle_deg: f32) -> Result<()> {
    if !(HEAD_MIN_DEG..=HEAD_MAX_DEG).contains(&angle_deg) || !angle_deg.is_finite() {
        return Err(crate::Error::InvalidParameter(format!(
            "head angle {angle_deg} outside [{HEAD_MIN_DEG}, {HEAD_MAX_DEG}]"
        )));
    }
    Ok(())
}
