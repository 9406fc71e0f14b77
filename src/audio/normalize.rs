//! Peak normalization and global volume.

use serde::{Deserialize, Serialize};

/// How the mixed song is scaled to full range.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Normalization {
    /// Divide by the peak sample's signed value. A negative peak flips the
    /// polarity of the whole song.
    #[default]
    Signed,
    /// Divide by the peak's magnitude, keeping polarity.
    Absolute,
}

/// The sample with the largest magnitude (first one on ties), or `None` if empty.
pub fn peak(samples: &[f64]) -> Option<f64> {
    samples
        .iter()
        .copied()
        .fold(None, |best: Option<f64>, s| match best {
            Some(b) if b.abs() >= s.abs() => Some(b),
            _ => Some(s),
        })
}

/// Scale `samples` so the peak lands on ±1.
///
/// Returns the peak used, or `None` when the song is silent and left as is.
pub fn normalize(samples: &mut [f64], mode: Normalization) -> Option<f64> {
    let peak = peak(samples).filter(|p| *p != 0.0)?;
    let divisor = match mode {
        Normalization::Signed => peak,
        Normalization::Absolute => peak.abs(),
    };
    for sample in samples.iter_mut() {
        *sample /= divisor;
    }
    Some(peak)
}

/// Multiply every sample by `percent / 100`.
pub fn apply_global_volume(samples: &mut [f64], percent: u32) {
    let gain = percent as f64 / 100.0;
    for sample in samples.iter_mut() {
        *sample *= gain;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    fn max_abs(samples: &[f64]) -> f64 {
        samples.iter().fold(0.0, |m, s| m.max(s.abs()))
    }

    #[test]
    fn peak_picks_largest_magnitude() {
        assert_eq!(peak(&[0.1, -0.8, 0.5]), Some(-0.8));
        assert_eq!(peak(&[0.1, 0.8, -0.5]), Some(0.8));
        assert_eq!(peak(&[]), None);
    }

    #[test]
    fn peak_ties_keep_first() {
        assert_eq!(peak(&[0.5, -0.5]), Some(0.5));
        assert_eq!(peak(&[-0.5, 0.5]), Some(-0.5));
    }

    #[test]
    fn positive_peak_scales_to_one() {
        let mut samples = vec![0.25, -0.1, 0.5];
        assert_eq!(normalize(&mut samples, Normalization::Signed), Some(0.5));
        assert_approx_eq!(samples[2], 1.0);
        assert_approx_eq!(samples[0], 0.5);
        assert_approx_eq!(max_abs(&samples), 1.0);
    }

    #[test]
    fn negative_peak_inverts_polarity() {
        let mut samples = vec![0.25, -0.5, 0.1];
        normalize(&mut samples, Normalization::Signed);
        assert_approx_eq!(samples[1], 1.0);
        assert_approx_eq!(samples[0], -0.5);
        assert_approx_eq!(max_abs(&samples), 1.0);
    }

    #[test]
    fn absolute_mode_keeps_polarity() {
        let mut samples = vec![0.25, -0.5, 0.1];
        normalize(&mut samples, Normalization::Absolute);
        assert_approx_eq!(samples[1], -1.0);
        assert_approx_eq!(samples[0], 0.5);
    }

    #[test]
    fn silence_is_left_alone() {
        let mut samples = vec![0.0; 16];
        assert_eq!(normalize(&mut samples, Normalization::Signed), None);
        assert!(samples.iter().all(|&s| s == 0.0));
    }

    #[test]
    fn empty_is_left_alone() {
        let mut samples: Vec<f64> = Vec::new();
        assert_eq!(normalize(&mut samples, Normalization::Signed), None);
    }

    #[test]
    fn global_volume_scales() {
        let mut samples = vec![1.0, -1.0];
        apply_global_volume(&mut samples, 40);
        assert_approx_eq!(samples[0], 0.4);
        assert_approx_eq!(samples[1], -0.4);
    }

    #[test]
    fn yaml_names() {
        let mode: Normalization = serde_yaml::from_str("absolute").unwrap();
        assert_eq!(mode, Normalization::Absolute);
        let mode: Normalization = serde_yaml::from_str("signed").unwrap();
        assert_eq!(mode, Normalization::Signed);
    }
}
