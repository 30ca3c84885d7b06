//! Servo sweep: one reading per angle step.

use drishti_io::{Diagnostics, SensorHead};

use crate::error::{LakshyaError, Result};
use crate::scan::SampleSet;

/// Angular range of one sweep.
#[derive(Debug, Clone, Copy)]
pub struct ScanRange {
    pub min_deg: f32,
    pub max_deg: f32,
    pub step_deg: f32,
}

impl Default for ScanRange {
    fn default() -> Self {
        Self {
            min_deg: 0.0,
            max_deg: 180.0,
            step_deg: 2.0,
        }
    }
}

impl ScanRange {
    pub fn new(min_deg: f32, max_deg: f32, step_deg: f32) -> Result<Self> {
        let range = Self {
            min_deg,
            max_deg,
            step_deg,
        };
        range.validate()?;
        Ok(range)
    }

    fn validate(&self) -> Result<()> {
        if !(self.step_deg > 0.0) {
            return Err(LakshyaError::Scan(format!(
                "scan step must be positive, got {}",
                self.step_deg
            )));
        }
        if self.max_deg < self.min_deg {
            return Err(LakshyaError::Scan(format!(
                "scan range reversed: {}..{}",
                self.min_deg, self.max_deg
            )));
        }
        Ok(())
    }

    /// Number of steps: `(max - min) / step + 1`, both ends inclusive when
    /// the range divides evenly.
    pub fn num_points(&self) -> usize {
        ((self.max_deg - self.min_deg) / self.step_deg).floor() as usize + 1
    }

    /// Angle for step index `i`.
    pub fn angle_at(&self, i: usize) -> f32 {
        self.min_deg + i as f32 * self.step_deg
    }
}

/// Sweeps the sensor head across a [`ScanRange`], recording one PING/IR
/// reading per step and writing a progress line per sample to diagnostics.
///
/// No retries: a single bad reading is left for the median filter.
#[derive(Debug, Clone, Default)]
pub struct Sampler {
    range: ScanRange,
}

impl Sampler {
    pub fn new(range: ScanRange) -> Self {
        Self { range }
    }

    pub fn range(&self) -> &ScanRange {
        &self.range
    }

    /// Perform one full sweep.
    pub fn run<H, D>(&self, head: &mut H, diag: &mut D) -> Result<SampleSet>
    where
        H: SensorHead,
        D: Diagnostics,
    {
        self.range.validate()?;
        let n = self.range.num_points();

        let mut angles = Vec::with_capacity(n);
        let mut ping_cm = Vec::with_capacity(n);
        let mut ir_raw = Vec::with_capacity(n);

        diag.send_line("Angle   PING (cm)   IR");
        diag.send_line("----------------------");

        for i in 0..n {
            let angle = self.range.angle_at(i);
            let sample = head.sample(angle)?;

            diag.send_line(&format!(
                "{:5.1}   {:9.1}   {:4}",
                angle, sample.ping_cm, sample.ir_raw
            ));

            angles.push(angle);
            ping_cm.push(sample.ping_cm);
            ir_raw.push(sample.ir_raw);
        }

        tracing::debug!(points = n, "sweep complete");

        Ok(SampleSet {
            angles,
            ping_cm,
            ir_raw,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use drishti_io::mock::BufferDiagnostics;
    use drishti_io::HeadSample;

    /// Head that returns a fixed distance and records commanded angles.
    struct FixedHead {
        angles_seen: Vec<f32>,
        ping_cm: f32,
    }

    impl SensorHead for FixedHead {
        fn sample(&mut self, angle_deg: f32) -> drishti_io::Result<HeadSample> {
            self.angles_seen.push(angle_deg);
            Ok(HeadSample {
                ping_cm: self.ping_cm,
                ir_raw: 200,
            })
        }
    }

    #[test]
    fn test_num_points() {
        assert_eq!(ScanRange::new(0.0, 180.0, 2.0).unwrap().num_points(), 91);
        assert_eq!(ScanRange::new(0.0, 160.0, 20.0).unwrap().num_points(), 9);
        assert_eq!(ScanRange::new(90.0, 90.0, 5.0).unwrap().num_points(), 1);
    }

    #[test]
    fn test_invalid_ranges_rejected() {
        assert!(ScanRange::new(0.0, 180.0, 0.0).is_err());
        assert!(ScanRange::new(0.0, 180.0, -2.0).is_err());
        assert!(ScanRange::new(100.0, 50.0, 2.0).is_err());
    }

    #[test]
    fn test_sweep_visits_every_angle_in_order() {
        let mut head = FixedHead {
            angles_seen: Vec::new(),
            ping_cm: 120.0,
        };
        let mut diag = BufferDiagnostics::default();
        let sampler = Sampler::new(ScanRange::new(0.0, 160.0, 20.0).unwrap());

        let samples = sampler.run(&mut head, &mut diag).unwrap();

        let expected: Vec<f32> = (0..9).map(|i| i as f32 * 20.0).collect();
        assert_eq!(head.angles_seen, expected);
        assert_eq!(samples.angles, expected);
        assert_eq!(samples.len(), 9);
        assert!(samples.ping_cm.iter().all(|&d| d == 120.0));
        // Two header lines plus one progress line per sample
        assert_eq!(diag.lines.len(), 2 + 9);
    }
}
