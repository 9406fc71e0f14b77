//! Additive track mixer.

/// Sums track buffers into one song buffer.
///
/// Every track is divided by the total track count before it is added, and
/// shorter buffers are treated as zero-padded to the longest one.
#[derive(Debug, Clone)]
pub struct Mixer {
    buffer: Vec<f64>,
    track_count: usize,
}

impl Mixer {
    /// A mixer expecting `track_count` tracks.
    pub fn new(track_count: usize) -> Self {
        Self {
            buffer: Vec::new(),
            track_count: track_count.max(1),
        }
    }

    /// Accumulate one track.
    pub fn add_track(&mut self, samples: &[f64]) {
        if samples.len() > self.buffer.len() {
            self.buffer.resize(samples.len(), 0.0);
        }
        let scale = self.track_count as f64;
        for (mixed, &sample) in self.buffer.iter_mut().zip(samples) {
            *mixed += sample / scale;
        }
    }

    /// Take the mixed buffer.
    pub fn finish(self) -> Vec<f64> {
        self.buffer
    }
}
