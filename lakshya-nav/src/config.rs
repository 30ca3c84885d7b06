//! TOML configuration with per-field defaults.
//!
//! Every field is optional; an empty file (or no file at all) yields the
//! stock tuning for the lab chassis.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::detect::{DetectionPolicy, DetectorConfig};
use crate::error::{LakshyaError, Result};
use crate::nav::{MotionConfig, NavigatorConfig};
use crate::scan::ScanRange;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LakshyaConfig {
    #[serde(default)]
    pub scan: ScanSection,
    #[serde(default)]
    pub detection: DetectionSection,
    #[serde(default)]
    pub navigation: NavigationSection,
}

impl LakshyaConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .map_err(|e| LakshyaError::Config(format!("{}: {e}", path.display())))?;
        Ok(toml::from_str(&text)?)
    }
}

fn default_min_angle() -> f32 {
    0.0
}
fn default_max_angle() -> f32 {
    180.0
}
fn default_step() -> f32 {
    2.0
}

/// `[scan]` section: servo sweep range.
#[derive(Debug, Clone, Deserialize)]
pub struct ScanSection {
    #[serde(default = "default_min_angle")]
    pub min_angle_deg: f32,
    #[serde(default = "default_max_angle")]
    pub max_angle_deg: f32,
    #[serde(default = "default_step")]
    pub step_deg: f32,
}

impl Default for ScanSection {
    fn default() -> Self {
        Self {
            min_angle_deg: default_min_angle(),
            max_angle_deg: default_max_angle(),
            step_deg: default_step(),
        }
    }
}

impl ScanSection {
    pub fn range(&self) -> Result<ScanRange> {
        ScanRange::new(self.min_angle_deg, self.max_angle_deg, self.step_deg)
    }
}

fn default_policy() -> DetectionPolicy {
    DetectionPolicy::DistanceEdge
}
fn default_edge_threshold() -> f32 {
    40.0
}
fn default_ir_threshold() -> u16 {
    950
}
fn default_min_width() -> f32 {
    6.0
}
fn default_max_objects() -> usize {
    10
}

/// `[detection]` section: policy choice and thresholds.
#[derive(Debug, Clone, Deserialize)]
pub struct DetectionSection {
    #[serde(default = "default_policy")]
    pub policy: DetectionPolicy,
    #[serde(default = "default_edge_threshold")]
    pub edge_threshold_cm: f32,
    #[serde(default = "default_ir_threshold")]
    pub ir_object_threshold: u16,
    #[serde(default = "default_min_width")]
    pub min_object_width_deg: f32,
    #[serde(default = "default_max_objects")]
    pub max_objects: usize,
}

impl Default for DetectionSection {
    fn default() -> Self {
        Self {
            policy: default_policy(),
            edge_threshold_cm: default_edge_threshold(),
            ir_object_threshold: default_ir_threshold(),
            min_object_width_deg: default_min_width(),
            max_objects: default_max_objects(),
        }
    }
}

impl DetectionSection {
    pub fn detector(&self) -> DetectorConfig {
        DetectorConfig {
            edge_threshold_cm: self.edge_threshold_cm,
            ir_object_threshold: self.ir_object_threshold,
            min_object_width_deg: self.min_object_width_deg,
            max_objects: self.max_objects,
        }
    }
}

fn default_stop_margin() -> f32 {
    10.0
}
fn default_max_leg() -> f32 {
    100.0
}
fn default_min_turn() -> f32 {
    2.0
}
fn default_backup() -> f32 {
    150.0
}
fn default_detour_side() -> f32 {
    700.0
}
fn default_detour_ahead() -> f32 {
    1200.0
}
fn default_nudge() -> f32 {
    100.0
}
fn default_retry_nudge() -> f32 {
    150.0
}
fn default_drive_speed() -> i16 {
    100
}
fn default_detour_speed() -> i16 {
    200
}
fn default_turn_speed() -> i16 {
    100
}
fn default_forward_scale() -> f32 {
    0.95
}
fn default_turn_calibration() -> f32 {
    17.0
}

/// `[navigation]` section: approach and go-around tuning.
#[derive(Debug, Clone, Deserialize)]
pub struct NavigationSection {
    #[serde(default = "default_stop_margin")]
    pub stop_margin_cm: f32,
    #[serde(default = "default_max_leg")]
    pub max_leg_cm: f32,
    #[serde(default = "default_min_turn")]
    pub min_turn_deg: f32,
    #[serde(default = "default_backup")]
    pub backup_mm: f32,
    #[serde(default = "default_detour_side")]
    pub detour_side_mm: f32,
    #[serde(default = "default_detour_ahead")]
    pub detour_ahead_mm: f32,
    /// Blind advance when a scan finds nothing (mm).
    #[serde(default = "default_nudge")]
    pub nudge_mm: f32,
    /// Advance clear of the obstacle when a post-go-around rescan finds
    /// nothing (mm).
    #[serde(default = "default_retry_nudge")]
    pub retry_nudge_mm: f32,
    #[serde(default = "default_drive_speed")]
    pub drive_speed: i16,
    #[serde(default = "default_detour_speed")]
    pub detour_speed: i16,
    #[serde(default = "default_turn_speed")]
    pub turn_speed: i16,
    #[serde(default = "default_forward_scale")]
    pub forward_scale: f32,
    #[serde(default = "default_turn_calibration")]
    pub turn_calibration_deg: f32,
}

impl Default for NavigationSection {
    fn default() -> Self {
        Self {
            stop_margin_cm: default_stop_margin(),
            max_leg_cm: default_max_leg(),
            min_turn_deg: default_min_turn(),
            backup_mm: default_backup(),
            detour_side_mm: default_detour_side(),
            detour_ahead_mm: default_detour_ahead(),
            nudge_mm: default_nudge(),
            retry_nudge_mm: default_retry_nudge(),
            drive_speed: default_drive_speed(),
            detour_speed: default_detour_speed(),
            turn_speed: default_turn_speed(),
            forward_scale: default_forward_scale(),
            turn_calibration_deg: default_turn_calibration(),
        }
    }
}

impl NavigationSection {
    pub fn navigator(&self) -> NavigatorConfig {
        NavigatorConfig {
            stop_margin_cm: self.stop_margin_cm,
            max_leg_cm: self.max_leg_cm,
            min_turn_deg: self.min_turn_deg,
            backup_mm: self.backup_mm,
            detour_side_mm: self.detour_side_mm,
            detour_ahead_mm: self.detour_ahead_mm,
            motion: MotionConfig {
                drive_speed: self.drive_speed,
                detour_speed: self.detour_speed,
                turn_speed: self.turn_speed,
                forward_scale: self.forward_scale,
                turn_calibration_deg: self.turn_calibration_deg,
            },
        }
    }
}
