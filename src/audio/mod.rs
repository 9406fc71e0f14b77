//! Audio rendering — tracks → mixed, normalized mono buffer → WAV.
//!
//! Rendering is a single sequential pass over the song. Each track is
//! rendered into its own buffer, accumulated by the [`Mixer`], then the whole
//! song is normalized and scaled by the global volume.

pub mod mixer;
pub mod normalize;
pub mod track;
pub mod wav;

pub use mixer::Mixer;
pub use normalize::Normalization;
pub use wav::SampleFormat;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::event::Song;
use crate::instrument::SynthParams;

/// Default output sample rate.
pub const SAMPLE_RATE: u32 = 44100;

/// Timing information shared by every chord of a render.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext {
    pub sample_rate: u32,
    pub bpm: f64,
}

impl RenderContext {
    /// Frames in one whole note: four beats.
    pub fn whole_note_frames(&self) -> f64 {
        self.sample_rate as f64 * 60.0 / self.bpm * 4.0
    }
}

/// A finished mono render.
#[derive(Debug, Clone, PartialEq)]
pub struct Rendered {
    pub sample_rate: u32,
    pub samples: Vec<f64>,
}

impl Rendered {
    pub fn duration_secs(&self) -> f64 {
        self.samples.len() as f64 / self.sample_rate as f64
    }
}

/// Song renderer.
#[derive(Debug, Clone)]
pub struct Renderer {
    sample_rate: u32,
    synth: SynthParams,
    normalization: Normalization,
    seed: Option<u64>,
}

impl Renderer {
    pub fn new(sample_rate: u32, synth: SynthParams) -> Self {
        Self {
            sample_rate,
            synth,
            normalization: Normalization::default(),
            seed: None,
        }
    }

    /// Fix the noise seed so guitar renders are reproducible.
    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_normalization(mut self, normalization: Normalization) -> Self {
        self.normalization = normalization;
        self
    }

    /// Render a whole song.
    ///
    /// A song without chord events renders as silence (possibly of non-zero
    /// length if it holds rests).
    pub fn render(&self, song: &Song) -> Rendered {
        let ctx = RenderContext {
            sample_rate: self.sample_rate,
            bpm: song.tempo_bpm as f64,
        };
        let mut rng = match self.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::seed_from_u64(rand::random()),
        };

        let mut mixer = Mixer::new(song.tracks.len());
        for track in &song.tracks {
            let samples = track::render_track(track, &ctx, &self.synth, &mut rng);
            mixer.add_track(&samples);
        }
        let mut samples = mixer.finish();

        match normalize::normalize(&mut samples, self.normalization) {
            Some(peak) => log::debug!("normalized by peak {peak:.6}"),
            None => log::info!("song is silent, skipping normalization"),
        }
        normalize::apply_global_volume(&mut samples, song.global_volume_percent);

        let rendered = Rendered {
            sample_rate: self.sample_rate,
            samples,
        };
        log::info!(
            "rendered {} tracks at {} BPM: {:.2}s",
            song.tracks.len(),
            song.tempo_bpm,
            rendered.duration_secs()
        );
        rendered
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new(SAMPLE_RATE, SynthParams::default())
    }
}
