//! Object detection: classify threshold regions of the filtered raster
//! into discrete object candidates.
//!
//! Two interchangeable policies:
//! - [`DetectionPolicy::DistanceEdge`]: edges of the PING first-difference
//!   signal (sudden drop opens an object, sudden rise closes it).
//! - [`DetectionPolicy::IrIntensity`]: absolute IR intensity crossing a
//!   threshold (bright region = object).
//!
//! Both share the close logic: minimum angular width gate, nearest filtered
//! PING distance across the span, chord-width computation, and a bounded
//! candidate list.

mod edge;
mod intensity;
mod select;

pub use edge::detect_distance_edges;
pub use intensity::detect_ir_objects;
pub use select::{select_target, NavigationTarget};

use serde::Deserialize;

use crate::scan::{DiffSet, FilteredSet};

/// Which signal drives edge detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DetectionPolicy {
    /// Threshold on the PING distance first-difference.
    DistanceEdge,
    /// Threshold on the absolute filtered IR intensity.
    IrIntensity,
}

/// Detection thresholds and limits.
#[derive(Debug, Clone)]
pub struct DetectorConfig {
    /// Distance-difference magnitude that counts as an edge (centimeters).
    pub edge_threshold_cm: f32,
    /// IR intensity above which a sample is on an object (ADC counts).
    pub ir_object_threshold: u16,
    /// Angular spans narrower than this are discarded as noise (degrees).
    pub min_object_width_deg: f32,
    /// Candidate list capacity; further detections are dropped.
    pub max_objects: usize,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            edge_threshold_cm: 40.0,
            ir_object_threshold: 950,
            min_object_width_deg: 6.0,
            max_objects: 10,
        }
    }
}

/// One detected object from a scan cycle.
///
/// Invariants: `end_angle >= start_angle` and
/// `radial_width_deg >= min_object_width_deg` of the emitting config.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObjectCandidate {
    pub start_angle: f32,
    pub end_angle: f32,
    pub center_angle: f32,
    /// Angular span (degrees).
    pub radial_width_deg: f32,
    /// Nearest filtered PING distance across the span (centimeters).
    pub distance_cm: f32,
    /// Chord width at that distance (centimeters).
    pub linear_width_cm: f32,
}

/// Chord length subtended by `radial_width_deg` at `distance_cm`:
/// `2 * d * sin(width/2)`. Treats the object as an arc segment viewed
/// from the sensor.
pub fn linear_width_cm(radial_width_deg: f32, distance_cm: f32) -> f32 {
    let half = radial_width_deg.to_radians() / 2.0;
    2.0 * distance_cm * half.sin()
}

/// Run the configured detection policy over one scan cycle.
pub fn detect(
    policy: DetectionPolicy,
    filtered: &FilteredSet,
    diff: &DiffSet,
    config: &DetectorConfig,
) -> Vec<ObjectCandidate> {
    match policy {
        DetectionPolicy::DistanceEdge => detect_distance_edges(filtered, diff, config),
        DetectionPolicy::IrIntensity => detect_ir_objects(filtered, config),
    }
}

/// Sweep classification state while walking the raster.
#[derive(Debug, Clone, Copy)]
pub(crate) enum SweepPhase {
    Clear,
    OnObject { start: usize },
}

/// Close a candidate spanning `[start, end]` and push it if it survives the
/// width gate and the list has room.
pub(crate) fn close_candidate(
    filtered: &FilteredSet,
    start: usize,
    end: usize,
    config: &DetectorConfig,
    out: &mut Vec<ObjectCandidate>,
) {
    debug_assert!(end >= start);
    let start_angle = filtered.angles[start];
    let end_angle = filtered.angles[end];
    let radial_width_deg = end_angle - start_angle;

    if radial_width_deg < config.min_object_width_deg {
        tracing::debug!(start_angle, end_angle, "span below minimum width, skipping");
        return;
    }

    // Nearest valid reading across the span; non-positive readings are
    // sensor dropouts, not surfaces.
    let mut distance_cm = f32::INFINITY;
    for &d in &filtered.ping_cm[start..=end] {
        if d > 0.0 && d < distance_cm {
            distance_cm = d;
        }
    }
    if !distance_cm.is_finite() {
        tracing::debug!(start_angle, end_angle, "no valid distance in span, skipping");
        return;
    }

    if out.len() >= config.max_objects {
        // Bounded memory wins over unbounded objects; dropped, not errored.
        tracing::debug!(start_angle, end_angle, "candidate list full, dropping");
        return;
    }

    out.push(ObjectCandidate {
        start_angle,
        end_angle,
        center_angle: (start_angle + end_angle) / 2.0,
        radial_width_deg,
        distance_cm,
        linear_width_cm: linear_width_cm(radial_width_deg, distance_cm),
    });
}
