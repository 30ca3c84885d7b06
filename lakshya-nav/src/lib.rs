//! LakshyaNav - Scan-and-seek navigation controller
//!
//! Sweeps a servo-mounted PING/IR sensor head across the front half-plane,
//! filters the raster, detects discrete objects by edge detection, picks the
//! narrowest one, and drives the chassis to it while recovering from bump
//! collisions with a fixed go-around maneuver.
//!
//! # Pipeline
//!
//! ```text
//! Sampler -> Filter -> DiffSet -> EdgeDetector -> ObjectSelector -> Navigator
//! ```
//!
//! Each stage completes fully before the next starts; a scan cycle owns its
//! data and nothing is shared between cycles. The [`mission`] module wires
//! the stages together and implements the rescan policy (one retry on an
//! empty scan, one rescan after an obstacle go-around).
//!
//! Hardware access goes exclusively through the `drishti-io` traits;
//! register-level drivers are out of scope here.

pub mod config;
pub mod detect;
pub mod error;
pub mod mission;
pub mod nav;
pub mod scan;

pub use config::LakshyaConfig;
pub use error::{LakshyaError, Result};
pub use mission::{Mission, MissionOutcome};
