//! Shared chassis fake for motion, navigator and mission tests.

use drishti_io::types::ChassisDelta;
use drishti_io::Chassis;

/// Scripted chassis: fixed distance/angle per update, with an optional bump
/// scheduled at a forward odometer reading. Reversing releases a pressed
/// bumper, like backing off a physical obstacle.
pub struct FakeChassis {
    left: i16,
    right: i16,
    tick_mm: f32,
    tick_deg: f32,
    pub bump_left_after_mm: Option<f32>,
    pub bump_right_after_mm: Option<f32>,
    pressed_left: bool,
    pressed_right: bool,
    pub forward_total: f32,
    pub turned_total: f32,
    pub commands: Vec<(i16, i16)>,
}

impl FakeChassis {
    pub fn new(tick_mm: f32, tick_deg: f32) -> Self {
        Self {
            left: 0,
            right: 0,
            tick_mm,
            tick_deg,
            bump_left_after_mm: None,
            bump_right_after_mm: None,
            pressed_left: false,
            pressed_right: false,
            forward_total: 0.0,
            turned_total: 0.0,
            commands: Vec::new(),
        }
    }

    fn forward_step(&mut self) -> ChassisDelta {
        if self.pressed_left || self.pressed_right {
            // Pinned against the obstacle: no progress
            return ChassisDelta {
                bump_left: self.pressed_left,
                bump_right: self.pressed_right,
                ..ChassisDelta::default()
            };
        }
        self.forward_total += self.tick_mm;
        if let Some(at) = self.bump_left_after_mm {
            if self.forward_total >= at {
                self.bump_left_after_mm = None;
                self.pressed_left = true;
            }
        }
        if let Some(at) = self.bump_right_after_mm {
            if self.forward_total >= at {
                self.bump_right_after_mm = None;
                self.pressed_right = true;
            }
        }
        ChassisDelta {
            distance_mm: self.tick_mm,
            bump_left: self.pressed_left,
            bump_right: self.pressed_right,
            ..ChassisDelta::default()
        }
    }
}

impl Chassis for FakeChassis {
    fn set_wheels(&mut self, left: i16, right: i16) -> drishti_io::Result<()> {
        self.commands.push((left, right));
        self.left = left;
        self.right = right;
        Ok(())
    }

    fn update(&mut self) -> drishti_io::Result<ChassisDelta> {
        if self.left == self.right && self.left != 0 {
            if self.left > 0 {
                Ok(self.forward_step())
            } else {
                self.pressed_left = false;
                self.pressed_right = false;
                self.forward_total -= self.tick_mm;
                Ok(ChassisDelta {
                    distance_mm: -self.tick_mm,
                    ..ChassisDelta::default()
                })
            }
        } else if self.left == -self.right && self.left != 0 {
            // right > left spins counter-clockwise
            let sign = if self.right > self.left { 1.0 } else { -1.0 };
            self.turned_total += sign * self.tick_deg;
            Ok(ChassisDelta {
                angle_deg: sign * self.tick_deg,
                ..ChassisDelta::default()
            })
        } else {
            Ok(ChassisDelta::default())
        }
    }
}
