//! Core sensor and actuator types shared across the workspace.

/// One reading from the servo-mounted sensor head.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeadSample {
    /// Ultrasonic time-of-flight distance (centimeters).
    pub ping_cm: f32,
    /// Raw IR intensity (ADC counts, higher = closer/brighter).
    pub ir_raw: u16,
}

/// Incremental chassis feedback since the previous [`Chassis::update`] call.
///
/// [`Chassis::update`]: crate::hal::Chassis::update
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ChassisDelta {
    /// Distance traveled since last update (millimeters, signed).
    pub distance_mm: f32,
    /// Heading change since last update (degrees, CCW positive).
    pub angle_deg: f32,
    /// Left bump sensor currently pressed.
    pub bump_left: bool,
    /// Right bump sensor currently pressed.
    pub bump_right: bool,
}

impl ChassisDelta {
    /// True when either bump sensor is pressed.
    pub fn bumped(&self) -> bool {
        self.bump_left || self.bump_right
    }
}

/// Servo travel limits for the sensor head (degrees).
///
/// 0° points right of the chassis, 90° straight ahead, 180° left.
pub const HEAD_MIN_DEG: f32 = 0.0;
pub const HEAD_MAX_DEG: f32 = 180.0;
