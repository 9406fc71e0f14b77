//! Instruments — per-chord synthesis, filtering and enveloping.
//!
//! Dispatch is a plain match on the closed [`Instrument`] enum. A chord is
//! rendered into a zeroed span of its track buffer: the instrument adds its
//! tones, then the span is smoothed and shaped in place.

pub mod envelope;
pub mod filter;
pub mod organ;
pub mod oscillator;
pub mod pluck;

pub use envelope::EnvelopeSegments;
pub use organ::OrganParams;
pub use pluck::PluckParams;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::event::{ChordEvent, Instrument};

/// Voice settings for every instrument.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SynthParams {
    pub organ: OrganParams,
    pub guitar: PluckParams,
}

/// Add the chord's raw instrument output into `out`.
pub fn synthesize<R: Rng>(
    event: &ChordEvent,
    sample_rate: u32,
    params: &SynthParams,
    rng: &mut R,
    out: &mut [f64],
) {
    let offsets = event.pitches.offsets();
    match event.instrument {
        Instrument::Organ => organ::render(offsets, sample_rate, &params.organ, out),
        Instrument::Guitar => pluck::render(offsets, sample_rate, &params.guitar, rng, out),
        Instrument::Rest => {}
    }
}

/// Render one chord into its span: synthesize, low-pass, then envelope.
///
/// Silent events leave the span untouched.
pub fn render_chord<R: Rng>(
    event: &ChordEvent,
    sample_rate: u32,
    params: &SynthParams,
    rng: &mut R,
    out: &mut [f64],
) {
    if !event.is_audible() {
        return;
    }
    synthesize(event, sample_rate, params, rng, out);
    filter::low_pass(out, event.low_pass_passes);
    envelope::apply(&event.envelope, &event.levels, out);
}
