//! Fractional envelope — shapes a chord's samples in place.
//!
//! The chord's frames are split into attack, decay, sustain and release
//! segments of `floor(fraction × frames)` each, laid end to end. Frames left
//! over by the rounding stay unscaled.

use std::ops::Range;

use crate::event::{Envelope, EnvelopeLevels};

/// The four segment spans of one chord, relative to the chord start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvelopeSegments {
    pub attack: Range<usize>,
    pub decay: Range<usize>,
    pub sustain: Range<usize>,
    pub release: Range<usize>,
}

impl EnvelopeSegments {
    /// Partition `frames` according to `envelope`.
    pub fn new(envelope: &Envelope, frames: usize) -> Self {
        let mut start = 0;
        let [attack, decay, sustain, release] = envelope.fractions().map(|fraction| {
            let len = (fraction * frames as f64).floor().max(0.0) as usize;
            let end = (start + len).min(frames);
            let span = start..end;
            start = end;
            span
        });
        Self {
            attack,
            decay,
            sustain,
            release,
        }
    }
}

/// Point `k` of `len` evenly spaced values from `from` to `to`, endpoints included.
fn ramp(from: f64, to: f64, k: usize, len: usize) -> f64 {
    if len <= 1 {
        from
    } else {
        from + (to - from) * k as f64 / (len - 1) as f64
    }
}

fn scale_ramp(samples: &mut [f64], from: f64, to: f64) {
    let len = samples.len();
    for (k, sample) in samples.iter_mut().enumerate() {
        *sample *= ramp(from, to, k, len);
    }
}

/// Multiply `samples` by the envelope curve.
///
/// Attack ramps 0 → peak, decay ramps peak → sustain, sustain holds, release
/// ramps sustain → 0.
pub fn apply(envelope: &Envelope, levels: &EnvelopeLevels, samples: &mut [f64]) {
    let segments = EnvelopeSegments::new(envelope, samples.len());

    scale_ramp(&mut samples[segments.attack.clone()], 0.0, levels.peak);
    scale_ramp(&mut samples[segments.decay.clone()], levels.peak, levels.sustain);
    for sample in &mut samples[segments.sustain.clone()] {
        *sample *= levels.sustain;
    }
    scale_ramp(&mut samples[segments.release], levels.sustain, 0.0);
}
