//! Track rendering — chord events laid end to end in one sample buffer.
//!
//! Chord boundaries come from a running frame counter kept in floating point,
//! so rounding never accumulates: chord `k` spans
//! `floor(c_k) .. floor(c_k + duration_k × whole_note_frames)`.

use std::ops::Range;

use rand::Rng;

use crate::event::Track;
use crate::instrument::{render_chord, SynthParams};

use super::RenderContext;

/// Frame span of every event in `track`, in order.
pub fn chord_spans(track: &Track, whole_note_frames: f64) -> Vec<Range<usize>> {
    let mut counter = 0.0_f64;
    track
        .events
        .iter()
        .map(|event| {
            let first = counter.floor() as usize;
            counter += event.duration * whole_note_frames;
            let last = counter.floor() as usize;
            first..last
        })
        .collect()
}

/// Render all chords of `track` into a fresh buffer.
///
/// The buffer is exactly as long as the end of the last chord span.
pub fn render_track<R: Rng>(
    track: &Track,
    ctx: &RenderContext,
    params: &SynthParams,
    rng: &mut R,
) -> Vec<f64> {
    let spans = chord_spans(track, ctx.whole_note_frames());
    let total = spans.last().map_or(0, |span| span.end);
    let mut samples = vec![0.0; total];

    for (event, span) in track.events.iter().zip(spans) {
        render_chord(event, ctx.sample_rate, params, rng, &mut samples[span]);
    }

    log::debug!(
        "track line {}: {} events, {} frames",
        track.line,
        track.events.len(),
        total
    );
    samples
}
