//! DrishtiIO - Hardware abstraction library for the scan-and-seek robot
//!
//! This library provides the collaborator interfaces the navigation core
//! consumes (sensor head, chassis, diagnostics channel) and a mock robot
//! for hardware-free testing.
//!
//! The real platform drives a servo-mounted PING/IR sensor head and a
//! differential-drive chassis with bump sensors. Nothing in this crate
//! touches registers; drivers live behind the [`hal`] traits.

pub mod capture;
pub mod error;
pub mod hal;
pub mod mock;
pub mod types;

// Re-export commonly used types
pub use error::{Error, Result};
pub use hal::{Chassis, Diagnostics, LogDiagnostics, SensorHead};
pub use types::{ChassisDelta, HeadSample};
