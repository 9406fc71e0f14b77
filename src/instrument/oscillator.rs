//! Pitch helpers shared by the synthesizers.

use std::f64::consts::PI;

/// Concert A, in Hz.
pub const CONCERT_A: f64 = 440.0;

/// Convert a semitone offset to frequency in Hz.
///
/// Offsets count up from the lowercase `a` of the lower symbol band, which
/// sits an octave below concert A: offset 0 is 220 Hz, offset 12 (`A`) is 440 Hz.
pub fn offset_to_freq(offset: i32) -> f64 {
    CONCERT_A * 2.0f64.powf(offset as f64 / 12.0) / 2.0
}

/// Radians per sample for a frequency at the given sample rate.
pub fn angular_step(freq: f64, sample_rate: u32) -> f64 {
    2.0 * PI * freq / sample_rate as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uppercase_a_is_440() {
        assert!((offset_to_freq(12) - 440.0).abs() < 1e-9);
    }

    #[test]
    fn lowercase_a_is_220() {
        assert!((offset_to_freq(0) - 220.0).abs() < 1e-9);
    }

    #[test]
    fn octave_doubles_freq() {
        let f1 = offset_to_freq(3);
        let f2 = offset_to_freq(15);
        assert!((f2 / f1 - 2.0).abs() < 1e-12);
    }

    #[test]
    fn negative_offsets_go_lower() {
        assert!((offset_to_freq(-12) - 110.0).abs() < 1e-9);
    }

    #[test]
    fn angular_step_full_cycle() {
        // One cycle per second at 1 Hz.
        let w = angular_step(1.0, 44100);
        assert!((w * 44100.0 - 2.0 * PI).abs() < 1e-9);
    }
}
