//! Organ — FM synthesis with a sharpening power stage.
//!
//! Each tone is a sine carrier whose phase is modulated by a slightly
//! detuned sine, raised to an odd power to add harmonics.

use serde::{Deserialize, Serialize};

use super::oscillator::{angular_step, offset_to_freq};

/// FM voice parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrganParams {
    /// Modulator frequency as a multiple of the carrier.
    pub modulation_ratio: f64,
    /// Modulation depth, in samples of phase offset.
    pub modulation_index: f64,
    /// Odd exponent applied to the carrier output.
    pub shape_power: i32,
}

impl Default for OrganParams {
    fn default() -> Self {
        Self {
            modulation_ratio: 1.01,
            modulation_index: 40.0,
            shape_power: 5,
        }
    }
}

/// One FM sample at index `i` for carrier step `w0`.
pub fn fm_sample(i: usize, w0: f64, params: &OrganParams) -> f64 {
    let t = i as f64;
    let w1 = w0 * params.modulation_ratio;
    let modulator = (t * w1).sin();
    (w0 * (t + params.modulation_index * modulator))
        .sin()
        .powi(params.shape_power)
}

/// Add every tone of the chord into `out`, each scaled by `1 / tones`.
pub fn render(offsets: &[i32], sample_rate: u32, params: &OrganParams, out: &mut [f64]) {
    if offsets.is_empty() {
        return;
    }
    let tones = offsets.len() as f64;

    for &offset in offsets {
        let w0 = angular_step(offset_to_freq(offset), sample_rate);
        for (i, sample) in out.iter_mut().enumerate() {
            *sample += fm_sample(i, w0, params) / tones;
        }
    }
}
