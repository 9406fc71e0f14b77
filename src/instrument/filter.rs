//! Low-pass smoothing — cascaded two-point moving average.

/// Run `passes` rounds of `y[i] = (x[i] + x[i-1]) / 2` over `samples`, with
/// `x[-1] = 0`. Each round reads the previous round's output.
pub fn low_pass(samples: &mut [f64], passes: u32) {
    for _ in 0..passes {
        let mut previous = 0.0;
        for sample in samples.iter_mut() {
            let current = *sample;
            *sample = (current + previous) / 2.0;
            previous = current;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_passes_is_identity() {
        let mut samples = vec![1.0, -2.0, 3.0];
        low_pass(&mut samples, 0);
        assert_eq!(samples, vec![1.0, -2.0, 3.0]);
    }

    #[test]
    fn one_pass_averages_with_unfiltered_neighbour() {
        let mut samples = vec![2.0, 4.0, 8.0];
        low_pass(&mut samples, 1);
        assert_eq!(samples, vec![1.0, 3.0, 6.0]);
    }

    #[test]
    fn two_passes_cascade() {
        let mut samples = vec![2.0, 4.0, 8.0];
        low_pass(&mut samples, 2);
        assert_eq!(samples, vec![0.5, 2.0, 4.5]);
    }

    #[test]
    fn alternating_signal_is_attenuated() {
        let mut samples: Vec<f64> = (0..100).map(|i| if i % 2 == 0 { 1.0 } else { -1.0 }).collect();
        low_pass(&mut samples, 1);
        assert!(samples[1..].iter().all(|s| s.abs() < 1e-12));
    }

    #[test]
    fn dc_passes_after_first_sample() {
        let mut samples = vec![1.0; 10];
        low_pass(&mut samples, 1);
        assert_eq!(samples[0], 0.5);
        assert!(samples[1..].iter().all(|&s| s == 1.0));
    }

    #[test]
    fn empty_is_noop() {
        let mut samples: Vec<f64> = Vec::new();
        low_pass(&mut samples, 3);
        assert!(samples.is_empty());
    }
}
