//! IR-intensity detection policy.
//!
//! Classifies on the absolute filtered IR value instead of a difference
//! signal: intensity above the object threshold opens a candidate, dropping
//! back below it closes the candidate at the previous sample. Distance still
//! comes from the PING channel.

use crate::scan::FilteredSet;

use super::{close_candidate, DetectorConfig, ObjectCandidate, SweepPhase};

/// Detect objects from absolute IR intensity.
pub fn detect_ir_objects(filtered: &FilteredSet, config: &DetectorConfig) -> Vec<ObjectCandidate> {
    let n = filtered.len();
    if n < 2 {
        return Vec::new();
    }

    let mut out = Vec::new();
    let mut phase = SweepPhase::Clear;

    // Interior samples only; the unfiltered boundary samples are too noisy
    // to open or close an object on.
    for i in 1..n - 1 {
        let ir = filtered.ir_raw[i];
        match phase {
            SweepPhase::Clear => {
                if ir > config.ir_object_threshold {
                    phase = SweepPhase::OnObject { start: i };
                    tracing::debug!(angle = filtered.angles[i], ir, "leading edge");
                }
            }
            SweepPhase::OnObject { start } => {
                if ir < config.ir_object_threshold {
                    tracing::debug!(angle = filtered.angles[i - 1], "trailing edge");
                    close_candidate(filtered, start, i - 1, config, &mut out);
                    phase = SweepPhase::Clear;
                }
            }
        }
    }

    if let SweepPhase::OnObject { start } = phase {
        tracing::debug!("scan ended on object, force-closing");
        close_candidate(filtered, start, n - 1, config, &mut out);
    }

    out
}
