//! Blocking motion primitives.
//!
//! Every primitive busy-polls `Chassis::update`, integrating the reported
//! deltas until the commanded amount is reached, then stops the wheels.
//! There is no timeout and no cancellation: a chassis that stops reporting
//! progress blocks the caller indefinitely. That is the contract of the
//! physical platform, not a bug to patch here.

use drishti_io::Chassis;

use crate::error::Result;

/// Wheel speeds and mechanical calibration for the motion primitives.
#[derive(Debug, Clone)]
pub struct MotionConfig {
    /// Normal drive speed (mm/s).
    pub drive_speed: i16,
    /// Faster speed for go-around detour legs (mm/s).
    pub detour_speed: i16,
    /// Wheel speed during point turns (mm/s).
    pub turn_speed: i16,
    /// Forward distance scale; compensates consistent overshoot.
    pub forward_scale: f32,
    /// Degrees subtracted from every commanded turn to compensate
    /// mechanical slip. Empirical, per chassis; zero for an ideal robot.
    pub turn_calibration_deg: f32,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            drive_speed: 100,
            detour_speed: 200,
            turn_speed: 100,
            forward_scale: 0.95,
            turn_calibration_deg: 17.0,
        }
    }
}

/// Point-turn direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnDirection {
    /// Heading decreases (turn right).
    Clockwise,
    /// Heading increases (turn left).
    CounterClockwise,
}

/// How a watched approach leg ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApproachEvent {
    /// Commanded distance covered without contact.
    Completed,
    /// Left bump sensor fired mid-leg.
    BumpLeft,
    /// Right bump sensor fired mid-leg.
    BumpRight,
}

/// Motion primitive executor bound to one chassis.
pub struct Motion<'a, C: Chassis> {
    chassis: &'a mut C,
    config: MotionConfig,
}

impl<'a, C: Chassis> Motion<'a, C> {
    pub fn new(chassis: &'a mut C, config: MotionConfig) -> Self {
        Self { chassis, config }
    }

    /// Drive forward `distance_mm` (scaled), ignoring bumpers.
    pub fn forward(&mut self, distance_mm: f32, speed: i16) -> Result<()> {
        let target = distance_mm * self.config.forward_scale;
        self.chassis.set_wheels(speed, speed)?;
        let mut travelled = 0.0;
        while travelled < target {
            travelled += self.chassis.update()?.distance_mm;
        }
        self.chassis.stop()?;
        Ok(())
    }

    /// Drive backward `distance_mm`.
    pub fn backward(&mut self, distance_mm: f32, speed: i16) -> Result<()> {
        self.chassis.set_wheels(-speed, -speed)?;
        let mut travelled = 0.0;
        while travelled > -distance_mm {
            travelled += self.chassis.update()?.distance_mm;
        }
        self.chassis.stop()?;
        Ok(())
    }

    /// Point-turn by `degrees` in `direction`, minus the calibration offset.
    pub fn turn(&mut self, direction: TurnDirection, degrees: f32, speed: i16) -> Result<()> {
        let commanded = degrees - self.config.turn_calibration_deg;
        if commanded <= 0.0 {
            // Slip compensation swallowed the whole turn
            tracing::debug!(degrees, commanded, "turn smaller than calibration, skipping");
            return Ok(());
        }

        let mut turned = 0.0;
        match direction {
            TurnDirection::Clockwise => {
                self.chassis.set_wheels(speed, -speed)?;
                while turned > -commanded {
                    turned += self.chassis.update()?.angle_deg;
                }
            }
            TurnDirection::CounterClockwise => {
                self.chassis.set_wheels(-speed, speed)?;
                while turned < commanded {
                    turned += self.chassis.update()?.angle_deg;
                }
            }
        }
        self.chassis.stop()?;
        Ok(())
    }

    /// Drive forward `distance_mm` (unscaled) watching the bumpers.
    ///
    /// Stops the wheels and returns as soon as either bumper fires.
    pub fn forward_watching(&mut self, distance_mm: f32, speed: i16) -> Result<ApproachEvent> {
        self.chassis.set_wheels(speed, speed)?;
        let mut travelled = 0.0;
        while travelled < distance_mm {
            let delta = self.chassis.update()?;
            travelled += delta.distance_mm;
            if delta.bump_left {
                self.chassis.stop()?;
                return Ok(ApproachEvent::BumpLeft);
            }
            if delta.bump_right {
                self.chassis.stop()?;
                return Ok(ApproachEvent::BumpRight);
            }
        }
        self.chassis.stop()?;
        Ok(ApproachEvent::Completed)
    }
}

// Known liveness gap, deliberately untested: a chassis that stops reporting
// progress stalls every primitive forever. There is no timeout to exercise,
// and a test would simply hang.
#[cfg(test)]
mod tests {
    use super::*;
    use crate::nav::testutil::FakeChassis;

    fn config_no_cal() -> MotionConfig {
        MotionConfig {
            forward_scale: 1.0,
            turn_calibration_deg: 0.0,
            ..MotionConfig::default()
        }
    }

    #[test]
    fn test_forward_integrates_to_target() {
        let mut chassis = FakeChassis::new(10.0, 1.0);
        let mut motion = Motion::new(&mut chassis, config_no_cal());
        motion.forward(200.0, 100).unwrap();
        assert!((chassis.forward_total - 200.0).abs() < 10.1);
        assert_eq!(chassis.commands.last(), Some(&(0, 0)));
    }

    #[test]
    fn test_forward_scale_shortens_leg() {
        let mut chassis = FakeChassis::new(10.0, 1.0);
        let config = MotionConfig {
            forward_scale: 0.95,
            ..config_no_cal()
        };
        let mut motion = Motion::new(&mut chassis, config);
        motion.forward(1000.0, 100).unwrap();
        assert!((chassis.forward_total - 950.0).abs() < 10.1);
    }

    #[test]
    fn test_turn_applies_calibration_offset() {
        let mut chassis = FakeChassis::new(10.0, 1.0);
        let config = MotionConfig {
            turn_calibration_deg: 17.0,
            ..MotionConfig::default()
        };
        let mut motion = Motion::new(&mut chassis, config);
        motion.turn(TurnDirection::Clockwise, 30.0, 100).unwrap();
        // Commanded 30 - 17 = 13 degrees clockwise (negative heading)
        assert!((chassis.turned_total + 13.0).abs() < 1.1);
    }

    #[test]
    fn test_turn_swallowed_by_calibration_is_skipped() {
        let mut chassis = FakeChassis::new(10.0, 1.0);
        let config = MotionConfig {
            turn_calibration_deg: 17.0,
            ..MotionConfig::default()
        };
        let mut motion = Motion::new(&mut chassis, config);
        motion.turn(TurnDirection::CounterClockwise, 10.0, 100).unwrap();
        assert_eq!(chassis.turned_total, 0.0);
        assert!(chassis.commands.is_empty());
    }

    #[test]
    fn test_backward_is_unscaled() {
        let mut chassis = FakeChassis::new(10.0, 1.0);
        let mut motion = Motion::new(&mut chassis, config_no_cal());
        motion.backward(150.0, 100).unwrap();
        assert!((chassis.forward_total + 150.0).abs() < 10.1);
    }

    #[test]
    fn test_watching_leg_reports_bump() {
        let mut chassis = FakeChassis::new(10.0, 1.0);
        chassis.bump_left_after_mm = Some(50.0);
        let mut motion = Motion::new(&mut chassis, config_no_cal());
        let event = motion.forward_watching(500.0, 100).unwrap();
        assert_eq!(event, ApproachEvent::BumpLeft);
        assert!(chassis.forward_total < 100.0);
        assert_eq!(chassis.commands.last(), Some(&(0, 0)));
    }
}
