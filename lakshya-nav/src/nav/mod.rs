//! Chassis navigation: blocking motion primitives and the approach
//! state machine with obstacle go-around.

mod motion;
mod navigator;
#[cfg(test)]
pub(crate) mod testutil;

pub use motion::{ApproachEvent, Motion, MotionConfig, TurnDirection};
pub use navigator::{alignment_turn, NavOutcome, NavState, Navigator, NavigatorConfig, Turn};
