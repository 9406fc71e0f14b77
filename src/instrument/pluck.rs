//! Guitar — Karplus-Strong plucked string with a strum.
//!
//! Each tone seeds a one-period excitation of noise blended with a sine
//! cycle, then runs it through an averaging feedback delay line. Higher
//! tones start later so a chord sounds strummed.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::event::PitchSet;

use super::oscillator::offset_to_freq;

/// Plucked-string parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PluckParams {
    /// Share of white noise in the excitation; the rest is one sine cycle.
    pub noise_amount: f64,
    /// Delay between successive tones of a chord, in frames.
    pub strum_delay_frames: usize,
}

impl Default for PluckParams {
    fn default() -> Self {
        Self {
            noise_amount: 0.8,
            strum_delay_frames: 800,
        }
    }
}

/// Delay-line length for a frequency: one period, at least one sample.
pub fn period_frames(freq: f64, sample_rate: u32) -> usize {
    ((sample_rate as f64 / freq).round() as usize).max(1)
}

/// The first `len` samples of one excitation period:
/// `noise·n + sin(2π·phase)·(1 - n)`, phase running 0 → 1 over `period`.
fn excitation<R: Rng>(period: usize, len: usize, noise_amount: f64, rng: &mut R) -> Vec<f64> {
    let last = (period.max(2) - 1) as f64;
    (0..len.min(period))
        .map(|k| {
            let noise: f64 = rng.gen_range(-1.0..1.0);
            let phase = k as f64 / last;
            noise * noise_amount + (2.0 * std::f64::consts::PI * phase).sin() * (1.0 - noise_amount)
        })
        .collect()
}

/// Run the feedback loop for `frames` output samples with a delay line of
/// `period` samples.
///
/// Output sample `k` is `y[k + period]` of the recurrence
/// `y[i + period] = seed[i] + (y[i] + y[i + 1]) / 2`, where `y[i] = seed[i]`
/// for `i < period` and the seed reads as zero past its end. Only
/// `seed[..=frames]` is ever read, so the seed may be shorter than a period.
pub fn pluck(seed: &[f64], period: usize, frames: usize) -> Vec<f64> {
    let period = period.max(1);
    let mut out: Vec<f64> = Vec::with_capacity(frames);

    for idx in 0..frames {
        let input = seed.get(idx).copied().unwrap_or(0.0);
        let here = delayed(seed, &out, period, idx);
        let after = delayed(seed, &out, period, idx + 1);
        out.push(input + 0.5 * (here + after));
    }
    out
}

/// `y[i]`: the seed for the first period, earlier output after that.
/// A sample not produced yet reads as zero.
fn delayed(seed: &[f64], out: &[f64], period: usize, i: usize) -> f64 {
    if i < period {
        seed.get(i).copied().unwrap_or(0.0)
    } else {
        out.get(i - period).copied().unwrap_or(0.0)
    }
}

/// Add a strummed chord into `out`, each tone scaled by `1 / tones`.
pub fn render<R: Rng>(
    offsets: &[i32],
    sample_rate: u32,
    params: &PluckParams,
    rng: &mut R,
    out: &mut [f64],
) {
    if offsets.is_empty() {
        return;
    }
    let tones = offsets.len() as f64;
    let frames = out.len();

    let strum_order = PitchSet::new(offsets.to_vec()).ascending();
    for (ti, offset) in strum_order.into_iter().enumerate() {
        let delay = ti * params.strum_delay_frames;
        if delay >= frames {
            log::warn!(
                "strum delay {delay} exceeds chord length {frames}, dropping tone {offset}"
            );
            continue;
        }

        let length = frames - delay;
        let period = period_frames(offset_to_freq(offset), sample_rate);
        let seed = excitation(period, length + 1, params.noise_amount, rng);
        let tone = pluck(&seed, period, length);
        for (sample, value) in out[delay..].iter_mut().zip(tone) {
            *sample += value / tones;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn rng(seed: u64) -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(seed)
    }

    fn rms(samples: &[f64]) -> f64 {
        (samples.iter().map(|s| s * s).sum::<f64>() / samples.len() as f64).sqrt()
    }

    #[test]
    fn period_of_a440() {
        assert_eq!(period_frames(440.0, 44100), 100);
    }

    #[test]
    fn period_rounds() {
        // 44100 / 261.6256 = 168.56
        assert_eq!(period_frames(261.6256, 44100), 169);
    }

    #[test]
    fn feedback_loop_recurrence() {
        let seed = [1.0, 0.0];
        let y = pluck(&seed, 2, 4);
        assert_eq!(y, vec![1.5, 0.75, 1.125, 0.9375]);
    }

    #[test]
    fn pluck_output_length() {
        let y = pluck(&[0.5; 10], 10, 1000);
        assert_eq!(y.len(), 1000);
    }

    #[test]
    fn truncated_seed_matches_full_period() {
        let full: Vec<f64> = (0..50).map(|k| (k as f64 * 0.37).sin()).collect();
        let short = &full[..11];
        assert_eq!(pluck(short, 50, 10), pluck(&full, 50, 10));
    }

    #[test]
    fn excitation_is_capped_at_requested_length() {
        assert_eq!(excitation(1_000_000, 17, 0.8, &mut rng(1)).len(), 17);
        assert_eq!(excitation(5, 17, 0.8, &mut rng(1)).len(), 5);
    }

    #[test]
    fn very_low_note_renders_quickly() {
        // About 2e-10 Hz, so the period dwarfs the chord.
        let mut out = vec![0.0; 5512];
        render(&[-12 * 40], 44100, &PluckParams::default(), &mut rng(4), &mut out);
        assert!(out.iter().all(|s| s.is_finite()));
        assert!(out.iter().any(|&s| s != 0.0));
    }

    #[test]
    fn renders_sound() {
        let mut out = vec![0.0; 22050];
        render(&[12], 44100, &PluckParams::default(), &mut rng(42), &mut out);
        assert!(out.iter().any(|s| s.abs() > 0.01));
    }

    #[test]
    fn deterministic_with_seed() {
        let mut a = vec![0.0; 5000];
        let mut b = vec![0.0; 5000];
        render(&[12], 44100, &PluckParams::default(), &mut rng(7), &mut a);
        render(&[12], 44100, &PluckParams::default(), &mut rng(7), &mut b);
        assert_eq!(a, b);
    }

    #[test]
    fn different_seeds_differ() {
        let mut a = vec![0.0; 5000];
        let mut b = vec![0.0; 5000];
        render(&[12], 44100, &PluckParams::default(), &mut rng(1), &mut a);
        render(&[12], 44100, &PluckParams::default(), &mut rng(2), &mut b);
        assert_ne!(a, b);
    }

    #[test]
    fn natural_decay() {
        let mut out = vec![0.0; 88200];
        render(&[24], 44100, &PluckParams::default(), &mut rng(42), &mut out);
        let q = out.len() / 4;
        let first = rms(&out[..q]);
        let last = rms(&out[3 * q..]);
        assert!(
            first > last * 1.5,
            "pluck should decay: first_rms={first}, last_rms={last}"
        );
    }

    #[test]
    fn strum_delays_higher_tones() {
        let params = PluckParams::default();
        let mut out = vec![0.0; 5000];
        render(&[19, 12], 44100, &params, &mut rng(3), &mut out);

        let mut low_only = vec![0.0; 5000];
        let mut r = rng(3);
        let period = period_frames(offset_to_freq(12), 44100);
        let seed = excitation(period, 5001, params.noise_amount, &mut r);
        for (s, v) in low_only.iter_mut().zip(pluck(&seed, period, 5000)) {
            *s = v / 2.0;
        }
        // Before the strum delay only the lowest tone sounds.
        for i in 0..params.strum_delay_frames {
            assert!((out[i] - low_only[i]).abs() < 1e-12, "frame {i}");
        }
        assert!((800..5000).any(|i| (out[i] - low_only[i]).abs() > 1e-6));
    }

    #[test]
    fn tones_past_chord_end_are_dropped() {
        let mut out = vec![0.0; 500];
        render(&[12, 16, 19], 44100, &PluckParams::default(), &mut rng(5), &mut out);
        // Only the first tone fits; it is still divided by the full tone count.
        let mut single = vec![0.0; 500];
        let mut r = rng(5);
        let period = period_frames(offset_to_freq(12), 44100);
        let seed = excitation(period, 501, 0.8, &mut r);
        for (s, v) in single.iter_mut().zip(pluck(&seed, period, 500)) {
            *s = v / 3.0;
        }
        for i in 0..500 {
            assert!((out[i] - single[i]).abs() < 1e-12);
        }
    }

    #[test]
    fn empty_chord_is_silent() {
        let mut out = vec![0.0; 100];
        render(&[], 44100, &PluckParams::default(), &mut rng(1), &mut out);
        assert!(out.iter().all(|&s| s == 0.0));
    }
}
