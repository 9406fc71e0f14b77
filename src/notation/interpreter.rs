//! Track interpreter — walks one line's tokens and emits chord events.
//!
//! Directives change the interpreter state; chord tokens read it. Tempo and
//! global volume live in [`SongState`] and are shared by every track, last
//! write wins. Instrument, octave, volume and note length live in
//! [`TrackState`].

use serde::{Deserialize, Serialize};

use crate::event::{ChordEvent, Instrument, PitchSet, Track, OCTAVE};

use super::error::{ErrorKind, NotationError};
use super::token::{Directive, OctaveChange, Token, TokenKind};

/// Octave number that maps to offset 0.
pub const REFERENCE_OCTAVE: i32 = 4;

/// Song-wide settings written by any track.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SongState {
    pub tempo_bpm: u32,
    pub global_volume_percent: u32,
}

impl Default for SongState {
    fn default() -> Self {
        Self {
            tempo_bpm: 120,
            global_volume_percent: 100,
        }
    }
}

/// Per-track defaults applied to new chords.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackState {
    pub instrument: Instrument,
    pub octave_offset: i32,
    pub volume_percent: u32,
    /// Current note length as a fraction of a whole note.
    pub duration: f64,
}

impl Default for TrackState {
    fn default() -> Self {
        Self {
            instrument: Instrument::Organ,
            octave_offset: 0,
            volume_percent: 100,
            duration: 0.25,
        }
    }
}

/// Whether per-track state starts fresh on each line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrackStateMode {
    /// Every track starts from [`TrackState::default`].
    #[default]
    Reset,
    /// Each track inherits whatever the previous line left behind.
    Carry,
}

/// Interprets the tokens of one notation line.
pub struct TrackInterpreter<'a> {
    source_name: &'a str,
    line: usize,
    song: &'a mut SongState,
    state: &'a mut TrackState,
}

impl<'a> TrackInterpreter<'a> {
    pub fn new(
        source_name: &'a str,
        line: usize,
        song: &'a mut SongState,
        state: &'a mut TrackState,
    ) -> Self {
        Self {
            source_name,
            line,
            song,
            state,
        }
    }

    /// Walk `tokens` in order and build the track.
    pub fn interpret(&mut self, tokens: &[Token]) -> Result<Track, NotationError> {
        let mut track = Track::new(self.line);

        for (index, token) in tokens.iter().enumerate() {
            match &token.kind {
                TokenKind::Chord(pitches) => {
                    let pitches = OCTAVE
                        .checked_mul(self.state.octave_offset)
                        .and_then(|shift| pitches.transposed(shift))
                        .filter(PitchSet::in_range)
                        .ok_or_else(|| self.error(ErrorKind::PitchOutOfRange, index, token))?;
                    let event = ChordEvent::new(
                        pitches,
                        self.state.instrument,
                        self.state.duration,
                        self.state.volume_percent as f64 / 100.0,
                    );
                    track.events.push(event);
                }
                TokenKind::Directive(directive) => {
                    self.apply(*directive, &mut track)
                        .map_err(|kind| self.error(kind, index, token))?;
                    log::trace!(
                        "line {}: {} directive '{}' -> {:?}",
                        self.line,
                        directive.name(),
                        token.text,
                        self.state
                    );
                }
                TokenKind::Unresolved => {
                    return Err(self.error(ErrorKind::UnresolvedToken, index, token));
                }
            }
        }

        Ok(track)
    }

    fn apply(&mut self, directive: Directive, track: &mut Track) -> Result<(), ErrorKind> {
        match directive {
            Directive::Duration {
                denominator,
                dotted,
            } => {
                self.state.duration = note_length(denominator, dotted)?;
            }
            Directive::Instrument(index) => {
                self.state.instrument = Instrument::from_index(index)
                    .ok_or(ErrorKind::UnknownInstrumentIndex(index))?;
            }
            Directive::Inversion(count) => {
                let last = track
                    .events
                    .last_mut()
                    .filter(|e| !e.pitches.is_empty())
                    .ok_or(ErrorKind::InvalidInversionTarget)?;
                last.pitches = last
                    .pitches
                    .inverted(count.saturating_sub(1))
                    .filter(PitchSet::in_range)
                    .ok_or(ErrorKind::PitchOutOfRange)?;
            }
            Directive::Rest => {
                track.events.push(ChordEvent::rest(self.state.duration));
            }
            Directive::Octave(OctaveChange::Relative(delta)) => {
                self.state.octave_offset = self
                    .state
                    .octave_offset
                    .checked_add(delta)
                    .ok_or(ErrorKind::PitchOutOfRange)?;
            }
            Directive::Octave(OctaveChange::Absolute(octave)) => {
                self.state.octave_offset = octave
                    .checked_sub(REFERENCE_OCTAVE)
                    .ok_or(ErrorKind::PitchOutOfRange)?;
            }
            Directive::Tempo(bpm) => {
                if bpm == 0 {
                    return Err(ErrorKind::InvalidTempo);
                }
                self.song.tempo_bpm = bpm;
            }
            Directive::Volume(percent) => {
                self.state.volume_percent = clamp_percent(percent, "volume");
            }
            Directive::GlobalVolume(percent) => {
                self.song.global_volume_percent = clamp_percent(percent, "global volume");
            }
        }
        Ok(())
    }

    fn error(&self, kind: ErrorKind, index: usize, token: &Token) -> NotationError {
        NotationError::new(kind, self.source_name, self.line, index, token.text.clone())
    }
}

/// Fraction of a whole note for a length directive: `1/denominator`, ×1.5 if dotted.
pub fn note_length(denominator: u32, dotted: bool) -> Result<f64, ErrorKind> {
    if denominator == 0 {
        return Err(ErrorKind::InvalidDuration);
    }
    let base = 1.0 / denominator as f64;
    Ok(if dotted { base * 1.5 } else { base })
}

fn clamp_percent(percent: u32, what: &str) -> u32 {
    if percent > 100 {
        log::warn!("{what} {percent} out of range, clamping to 100");
        100
    } else {
        percent
    }
}
