//! Mission orchestration: runs scan cycles and approach legs until the
//! narrowest object is reached or nothing is left to find.
//!
//! Rescan policy:
//! - An empty first scan earns one blind nudge forward and a second scan.
//! - A capped approach leg (target beyond the leg limit) is followed by a
//!   fresh scan; odometry drift makes the old bearing worthless.
//! - A bump go-around earns one rescan. A second bump aborts the mission;
//!   the arena is more crowded than this controller can handle. An empty
//!   post-obstacle rescan ends the mission after a short advance to get
//!   clear of the obstacle.

use drishti_io::{Chassis, Diagnostics, SensorHead};

use crate::config::LakshyaConfig;
use crate::detect::{detect, select_target, NavigationTarget, ObjectCandidate};
use crate::error::Result;
use crate::nav::{NavOutcome, Navigator};
use crate::scan::{DiffSet, FilteredSet, Sampler};

/// How a mission ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissionOutcome {
    /// Stopped at the standoff distance from the selected object.
    TargetReached,
    /// No object survived detection, or obstacles exhausted the rescan
    /// budget.
    NothingFound,
}

/// Owns the hardware handles and drives the full pipeline.
pub struct Mission<H, C, D> {
    head: H,
    chassis: C,
    diag: D,
    config: LakshyaConfig,
}

impl<H, C, D> Mission<H, C, D>
where
    H: SensorHead,
    C: Chassis,
    D: Diagnostics,
{
    pub fn new(head: H, chassis: C, diag: D, config: LakshyaConfig) -> Self {
        Self {
            head,
            chassis,
            diag,
            config,
        }
    }

    /// Release the hardware handles, e.g. to inspect a mock after a run.
    pub fn into_parts(self) -> (H, C, D) {
        (self.head, self.chassis, self.diag)
    }

    /// Run the mission to completion.
    pub fn run(&mut self) -> Result<MissionOutcome> {
        self.diag.send_line("Seeking the narrowest object");

        let mut target = self.scan_for_target()?;
        if target.is_none() {
            self.diag.send_line("Nothing found, advancing for a second look");
            let nudge = self.config.navigation.nudge_mm;
            self.navigator().nudge_forward(nudge)?;
            target = self.scan_for_target()?;
        }
        let Some(mut target) = target else {
            self.diag.send_line("Nothing found, giving up");
            return Ok(MissionOutcome::NothingFound);
        };

        let mut bump_rescans = 0usize;
        let mut after_bump = false;
        loop {
            self.report_target(&target);
            let margin = self.config.navigation.stop_margin_cm;
            let capped = target.distance_cm - margin > self.config.navigation.max_leg_cm;

            match self.navigator().go_to(&target)? {
                NavOutcome::Reached if !capped => {
                    self.diag.send_line("Navigation complete");
                    return Ok(MissionOutcome::TargetReached);
                }
                NavOutcome::Reached => {
                    after_bump = false;
                    self.diag.send_line("Leg complete, rescanning");
                }
                NavOutcome::RescanNeeded => {
                    if bump_rescans >= 1 {
                        tracing::warn!("second obstacle collision, aborting mission");
                        self.diag.send_line("Obstacle persists, giving up");
                        return Ok(MissionOutcome::NothingFound);
                    }
                    bump_rescans += 1;
                    after_bump = true;
                    self.diag.send_line("Rescanning after go-around");
                }
            }

            match self.scan_for_target()? {
                Some(next) => target = next,
                None if after_bump => {
                    self.diag
                        .send_line("Target lost, advancing clear of the obstacle");
                    let nudge = self.config.navigation.retry_nudge_mm;
                    self.navigator().nudge_forward(nudge)?;
                    return Ok(MissionOutcome::NothingFound);
                }
                None => {
                    self.diag.send_line("Target lost, giving up");
                    return Ok(MissionOutcome::NothingFound);
                }
            }
        }
    }

    /// One full scan cycle: sweep, filter, difference, detect, select.
    fn scan_for_target(&mut self) -> Result<Option<NavigationTarget>> {
        let sampler = Sampler::new(self.config.scan.range()?);
        let samples = sampler.run(&mut self.head, &mut self.diag)?;
        let filtered = FilteredSet::from_samples(&samples);
        let diff = DiffSet::from_filtered(&filtered);
        let objects = detect(
            self.config.detection.policy,
            &filtered,
            &diff,
            &self.config.detection.detector(),
        );
        self.report_objects(&objects);
        Ok(select_target(&objects))
    }

    fn report_objects(&mut self, objects: &[ObjectCandidate]) {
        self.diag
            .send_line(&format!("Objects found: {}", objects.len()));
        for (i, obj) in objects.iter().enumerate() {
            self.diag.send_line(&format!(
                "{:2}: center {:5.1} deg  dist {:5.1} cm  width {:5.1} cm",
                i + 1,
                obj.center_angle,
                obj.distance_cm,
                obj.linear_width_cm
            ));
        }
    }

    fn report_target(&mut self, target: &NavigationTarget) {
        self.diag.send_line(&format!(
            "Target: center {:.1} deg, distance {:.1} cm",
            target.center_angle_deg, target.distance_cm
        ));
    }

    fn navigator(&mut self) -> Navigator<'_, C, D> {
        Navigator::new(
            &mut self.chassis,
            &mut self.diag,
            self.config.navigation.navigator(),
        )
    }
}
