//! Target selection: narrowest object wins.

use super::ObjectCandidate;

/// Where the navigator should go: one candidate reduced to heading and range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NavigationTarget {
    /// Servo-frame heading of the object center (degrees, 90 = straight ahead).
    pub center_angle_deg: f32,
    /// Nearest measured distance to the object (centimeters).
    pub distance_cm: f32,
}

/// Pick the candidate with minimum linear (chord) width.
///
/// Strict `<` keeps the first-encountered minimum, so ties resolve to the
/// earliest detection (candidates arrive in angle order). Returns `None` on
/// an empty list; the fallback (advance and rescan) is the caller's job.
pub fn select_target(candidates: &[ObjectCandidate]) -> Option<NavigationTarget> {
    let mut best: Option<&ObjectCandidate> = None;
    for candidate in candidates {
        match best {
            Some(b) if candidate.linear_width_cm < b.linear_width_cm => best = Some(candidate),
            None => best = Some(candidate),
            _ => {}
        }
    }
    best.map(|c| NavigationTarget {
        center_angle_deg: c.center_angle,
        distance_cm: c.distance_cm,
    })
}
