//! Approach state machine: align with a target, drive at it, and work
//! around anything bumped into on the way.

use drishti_io::{Chassis, Diagnostics};

use crate::detect::NavigationTarget;
use crate::error::Result;

use super::motion::{ApproachEvent, Motion, MotionConfig, TurnDirection};

/// Navigator phase, visible for diagnostics and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavState {
    /// Rotating the chassis toward the target heading.
    Aligning,
    /// Driving the approach leg with bumpers armed.
    Approaching,
    /// Stopped at the target standoff.
    Reached,
    /// Left bumper fired; detouring around to the right.
    ObstacleLeft,
    /// Right bumper fired; detouring around to the left.
    ObstacleRight,
}

/// Final result of one [`Navigator::go_to`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavOutcome {
    /// Arrived at the standoff distance.
    Reached,
    /// An obstacle forced a go-around; the target bearing is stale and the
    /// caller must rescan before approaching again.
    RescanNeeded,
}

/// A planned point turn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Turn {
    pub direction: TurnDirection,
    pub degrees: f32,
}

/// Chassis rotation needed to face a head-frame bearing.
///
/// The head reports 90° as straight ahead, so a target left of center
/// (above 90°) needs a counter-clockwise turn and one right of center a
/// clockwise turn. Offsets under `min_turn_deg` are within mechanical slop
/// and not worth commanding.
pub fn alignment_turn(center_angle_deg: f32, min_turn_deg: f32) -> Option<Turn> {
    let offset = 90.0 - center_angle_deg;
    if offset.abs() < min_turn_deg {
        return None;
    }
    if offset > 0.0 {
        Some(Turn {
            direction: TurnDirection::Clockwise,
            degrees: offset,
        })
    } else {
        Some(Turn {
            direction: TurnDirection::CounterClockwise,
            degrees: -offset,
        })
    }
}

/// Tuning for the approach and go-around maneuvers.
#[derive(Debug, Clone)]
pub struct NavigatorConfig {
    /// Standoff distance kept between the chassis and the target (cm).
    pub stop_margin_cm: f32,
    /// Longest single approach leg (cm); farther targets need a rescan
    /// between legs anyway.
    pub max_leg_cm: f32,
    /// Alignment turns below this are skipped (degrees).
    pub min_turn_deg: f32,
    /// Reverse distance after a bump (mm).
    pub backup_mm: f32,
    /// Sideways clearance leg of the go-around box (mm).
    pub detour_side_mm: f32,
    /// Forward leg driven past the obstacle (mm).
    pub detour_ahead_mm: f32,
    pub motion: MotionConfig,
}

impl Default for NavigatorConfig {
    fn default() -> Self {
        Self {
            stop_margin_cm: 10.0,
            max_leg_cm: 100.0,
            min_turn_deg: 2.0,
            backup_mm: 150.0,
            detour_side_mm: 700.0,
            detour_ahead_mm: 1200.0,
            motion: MotionConfig::default(),
        }
    }
}

/// Drives the chassis toward one selected target.
pub struct Navigator<'a, C: Chassis, D: Diagnostics> {
    chassis: &'a mut C,
    diag: &'a mut D,
    config: NavigatorConfig,
    state: NavState,
}

impl<'a, C: Chassis, D: Diagnostics> Navigator<'a, C, D> {
    pub fn new(chassis: &'a mut C, diag: &'a mut D, config: NavigatorConfig) -> Self {
        Self {
            chassis,
            diag,
            config,
            state: NavState::Aligning,
        }
    }

    pub fn state(&self) -> NavState {
        self.state
    }

    /// Turn toward `target` and drive the approach leg.
    ///
    /// Returns [`NavOutcome::Reached`] when the chassis stops at the
    /// standoff distance, or [`NavOutcome::RescanNeeded`] after a bump
    /// forced a go-around maneuver.
    pub fn go_to(&mut self, target: &NavigationTarget) -> Result<NavOutcome> {
        self.state = NavState::Aligning;
        match alignment_turn(target.center_angle_deg, self.config.min_turn_deg) {
            Some(turn) => {
                let dir = match turn.direction {
                    TurnDirection::Clockwise => "right",
                    TurnDirection::CounterClockwise => "left",
                };
                self.diag
                    .send_line(&format!("Turning {} {:.1} degrees", dir, turn.degrees));
                let speed = self.config.motion.turn_speed;
                self.motion().turn(turn.direction, turn.degrees, speed)?;
            }
            None => self.diag.send_line("Already facing target"),
        }

        let leg_cm = target.distance_cm - self.config.stop_margin_cm;
        if leg_cm <= 0.0 {
            self.diag.send_line("Already at target standoff");
            self.state = NavState::Reached;
            return Ok(NavOutcome::Reached);
        }
        let leg_cm = leg_cm.min(self.config.max_leg_cm);

        self.diag
            .send_line(&format!("Approaching: {leg_cm:.1} cm"));
        self.state = NavState::Approaching;
        let speed = self.config.motion.drive_speed;
        let event = self.motion().forward_watching(leg_cm * 10.0, speed)?;

        match event {
            ApproachEvent::Completed => {
                self.diag.send_line("Reached target");
                self.state = NavState::Reached;
                Ok(NavOutcome::Reached)
            }
            ApproachEvent::BumpLeft => {
                self.diag.send_line("Left bump, detouring right");
                self.state = NavState::ObstacleLeft;
                self.go_around(TurnDirection::Clockwise)?;
                self.diag.send_line("Obstacle cleared, rescan needed");
                Ok(NavOutcome::RescanNeeded)
            }
            ApproachEvent::BumpRight => {
                self.diag.send_line("Right bump, detouring left");
                self.state = NavState::ObstacleRight;
                self.go_around(TurnDirection::CounterClockwise)?;
                self.diag.send_line("Obstacle cleared, rescan needed");
                Ok(NavOutcome::RescanNeeded)
            }
        }
    }

    /// Drive forward without a target, used when a scan comes up empty.
    pub fn nudge_forward(&mut self, distance_mm: f32) -> Result<()> {
        let speed = self.config.motion.drive_speed;
        self.motion().forward(distance_mm, speed)
    }

    /// Box maneuver around a bumped obstacle: back off, step aside toward
    /// `away`, drive past, then step back onto the original track. Ends on
    /// the original heading, laterally offset by zero, one detour-ahead leg
    /// farther along.
    fn go_around(&mut self, away: TurnDirection) -> Result<()> {
        let back = match away {
            TurnDirection::Clockwise => TurnDirection::CounterClockwise,
            TurnDirection::CounterClockwise => TurnDirection::Clockwise,
        };
        let NavigatorConfig {
            backup_mm,
            detour_side_mm,
            detour_ahead_mm,
            ..
        } = self.config;
        let drive = self.config.motion.drive_speed;
        let detour = self.config.motion.detour_speed;
        let turn = self.config.motion.turn_speed;

        let mut motion = Motion::new(&mut *self.chassis, self.config.motion.clone());
        motion.backward(backup_mm, drive)?;
        motion.turn(away, 90.0, turn)?;
        motion.forward(detour_side_mm, detour)?;
        motion.turn(back, 90.0, turn)?;
        motion.forward(detour_ahead_mm, detour)?;
        motion.turn(back, 90.0, turn)?;
        motion.forward(detour_side_mm, detour)?;
        motion.turn(away, 90.0, turn)?;
        Ok(())
    }

    fn motion(&mut self) -> Motion<'_, C> {
        Motion::new(&mut *self.chassis, self.config.motion.clone())
    }
}
