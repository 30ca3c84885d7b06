//! Scan pipeline data: raw raster, filtered raster, first differences.
//!
//! A scan cycle produces a [`SampleSet`], derives a [`FilteredSet`] from it,
//! and derives a [`DiffSet`] from that. Each set is created fresh per cycle
//! and owned by the pipeline; nothing here is mutated after creation.

mod filter;
mod sampler;

pub use filter::{median3, median_filter3};
pub use sampler::{Sampler, ScanRange};

/// Raw angle/distance/IR raster from one servo sweep.
#[derive(Debug, Clone)]
pub struct SampleSet {
    /// Servo angle per step (degrees).
    pub angles: Vec<f32>,
    /// Raw PING distance per step (centimeters).
    pub ping_cm: Vec<f32>,
    /// Raw IR intensity per step (ADC counts).
    pub ir_raw: Vec<u16>,
}

impl SampleSet {
    pub fn len(&self) -> usize {
        self.angles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.angles.is_empty()
    }
}

/// Median-filtered raster; same shape as the [`SampleSet`] it derives from.
#[derive(Debug, Clone)]
pub struct FilteredSet {
    pub angles: Vec<f32>,
    pub ping_cm: Vec<f32>,
    pub ir_raw: Vec<u16>,
}

impl FilteredSet {
    /// Apply the 3-point median filter to both channels of a raw raster.
    pub fn from_samples(samples: &SampleSet) -> Self {
        Self {
            angles: samples.angles.clone(),
            ping_cm: median_filter3(&samples.ping_cm),
            ir_raw: median_filter3(&samples.ir_raw),
        }
    }

    pub fn len(&self) -> usize {
        self.angles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.angles.is_empty()
    }
}

/// Per-step first differences of the filtered raster (high-pass signal).
///
/// `diff[0] = 0`; `diff[i] = filtered[i] - filtered[i-1]`.
#[derive(Debug, Clone)]
pub struct DiffSet {
    pub ping_cm: Vec<f32>,
    pub ir: Vec<i32>,
}

impl DiffSet {
    pub fn from_filtered(filtered: &FilteredSet) -> Self {
        let n = filtered.len();
        let mut ping_cm = vec![0.0f32; n];
        let mut ir = vec![0i32; n];
        for i in 1..n {
            ping_cm[i] = filtered.ping_cm[i] - filtered.ping_cm[i - 1];
            ir[i] = i32::from(filtered.ir_raw[i]) - i32::from(filtered.ir_raw[i - 1]);
        }
        Self { ping_cm, ir }
    }
}
