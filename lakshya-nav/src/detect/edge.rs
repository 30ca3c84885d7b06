//! Distance-edge detection policy.
//!
//! Walks the PING first-difference signal: a drop steeper than the edge
//! threshold opens a candidate, a rise steeper than the threshold closes it
//! at the previous sample (the last one still on the object).

use crate::scan::{DiffSet, FilteredSet};

use super::{close_candidate, DetectorConfig, ObjectCandidate, SweepPhase};

/// Detect objects from distance-difference edges.
pub fn detect_distance_edges(
    filtered: &FilteredSet,
    diff: &DiffSet,
    config: &DetectorConfig,
) -> Vec<ObjectCandidate> {
    let n = filtered.len();
    let mut out = Vec::new();
    let mut phase = SweepPhase::Clear;

    for i in 1..n {
        match phase {
            SweepPhase::Clear => {
                // Leading edge: sudden drop in distance
                if diff.ping_cm[i] < -config.edge_threshold_cm {
                    phase = SweepPhase::OnObject { start: i };
                    tracing::debug!(angle = filtered.angles[i], "leading edge");
                }
            }
            SweepPhase::OnObject { start } => {
                // Trailing edge: sudden rise back to background
                if diff.ping_cm[i] > config.edge_threshold_cm {
                    tracing::debug!(angle = filtered.angles[i - 1], "trailing edge");
                    close_candidate(filtered, start, i - 1, config, &mut out);
                    phase = SweepPhase::Clear;
                }
            }
        }
    }

    // Scan ended while still on an object: force-close at the last sample.
    // The forced candidate still has to pass the width gate.
    if let SweepPhase::OnObject { start } = phase {
        tracing::debug!("scan ended on object, force-closing");
        close_candidate(filtered, start, n - 1, config, &mut out);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scan::DiffSet;

    fn raster(angles: Vec<f32>, ping_cm: Vec<f32>) -> (FilteredSet, DiffSet) {
        let n = angles.len();
        let filtered = FilteredSet {
            angles,
            ping_cm,
            ir_raw: vec![0; n],
        };
        let diff = DiffSet::from_filtered(&filtered);
        (filtered, diff)
    }

    fn config(threshold: f32) -> DetectorConfig {
        DetectorConfig {
            edge_threshold_cm: threshold,
            min_object_width_deg: 6.0,
            max_objects: 10,
            ..DetectorConfig::default()
        }
    }

    #[test]
    fn test_single_object_reference_raster() {
        // Raw distances 50,50,50,10,10,10,50,50,50 at angles 0,20,...,160:
        // exactly one object spanning the 10-valued steps.
        let angles: Vec<f32> = (0..9).map(|i| i as f32 * 20.0).collect();
        let ping = vec![50.0, 50.0, 50.0, 10.0, 10.0, 10.0, 50.0, 50.0, 50.0];
        let (filtered, diff) = raster(angles, ping);

        let objects = detect_distance_edges(&filtered, &diff, &config(30.0));

        assert_eq!(objects.len(), 1);
        let obj = &objects[0];
        assert_eq!(obj.start_angle, 60.0);
        assert_eq!(obj.end_angle, 100.0);
        assert_eq!(obj.center_angle, 80.0);
        assert_eq!(obj.radial_width_deg, 40.0);
        assert_eq!(obj.distance_cm, 10.0);
    }

    #[test]
    fn test_narrow_span_discarded_as_noise() {
        // One-step dip: radial width 0 < minimum 6
        let angles: Vec<f32> = (0..5).map(|i| i as f32 * 2.0).collect();
        let ping = vec![50.0, 50.0, 5.0, 50.0, 50.0];
        let (filtered, diff) = raster(angles, ping);

        let objects = detect_distance_edges(&filtered, &diff, &config(30.0));
        assert!(objects.is_empty());
    }

    #[test]
    fn test_force_close_at_end_of_scan() {
        // Distance drops and never recovers before the sweep ends
        let angles: Vec<f32> = (0..6).map(|i| i as f32 * 10.0).collect();
        let ping = vec![80.0, 80.0, 80.0, 20.0, 20.0, 20.0];
        let (filtered, diff) = raster(angles, ping);

        let objects = detect_distance_edges(&filtered, &diff, &config(30.0));
        assert_eq!(objects.len(), 1);
        assert_eq!(objects[0].start_angle, 30.0);
        assert_eq!(objects[0].end_angle, 50.0);
        assert_eq!(objects[0].distance_cm, 20.0);
    }

    #[test]
    fn test_no_candidate_below_minimum_width_ever() {
        // Several spans of varying widths; none below the gate may come out
        let angles: Vec<f32> = (0..40).map(|i| i as f32 * 2.0).collect();
        let mut ping = vec![100.0f32; 40];
        ping[3] = 10.0; // 0 deg span
        for p in ping.iter_mut().take(12).skip(8) {
            *p = 10.0; // 6 deg span, exactly at the gate
        }
        for p in ping.iter_mut().take(32).skip(20) {
            *p = 10.0; // 22 deg span
        }
        let (filtered, diff) = raster(angles, ping);

        let cfg = config(30.0);
        let objects = detect_distance_edges(&filtered, &diff, &cfg);
        assert_eq!(objects.len(), 2);
        for obj in &objects {
            assert!(obj.radial_width_deg >= cfg.min_object_width_deg);
            assert!(obj.end_angle >= obj.start_angle);
        }
    }

    #[test]
    fn test_capacity_drops_extra_candidates() {
        // Three wide dips, capacity two
        let angles: Vec<f32> = (0..36).map(|i| i as f32 * 5.0).collect();
        let mut ping = vec![200.0f32; 36];
        for span in [(4usize, 7usize), (14, 17), (24, 27)] {
            for p in ping.iter_mut().take(span.1 + 1).skip(span.0) {
                *p = 30.0;
            }
        }
        let (filtered, diff) = raster(angles, ping);

        let mut cfg = config(60.0);
        cfg.max_objects = 2;
        let objects = detect_distance_edges(&filtered, &diff, &cfg);
        assert_eq!(objects.len(), 2);
        // First two in angle order survive
        assert_eq!(objects[0].start_angle, 20.0);
        assert_eq!(objects[1].start_angle, 70.0);
    }

    #[test]
    fn test_dropout_only_span_is_skipped() {
        // A span whose every reading is zero has no usable distance
        let angles: Vec<f32> = (0..9).map(|i| i as f32 * 20.0).collect();
        let ping = vec![50.0, 50.0, 50.0, 0.0, 0.0, 0.0, 50.0, 50.0, 50.0];
        let (filtered, diff) = raster(angles, ping);

        let objects = detect_distance_edges(&filtered, &diff, &config(30.0));
        assert!(objects.is_empty());
    }
}
