//! Event data model — the chord events a notation line turns into.
//!
//! A [`ChordEvent`] is the atomic unit of music: a set of pitches played by one
//! instrument for a fraction of a whole note, with its own envelope shape.

use std::fmt;

/// Semitones in one octave.
pub const OCTAVE: i32 = 12;

/// Largest distance, in semitones, a pitch may sit from the reference.
///
/// 64 octaves either side keeps every frequency finite and non-zero.
pub const PITCH_LIMIT: i32 = 64 * OCTAVE;

/// An ordered set of signed semitone offsets from the reference pitch.
///
/// Holds a single note or a chord. Duplicates are allowed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PitchSet(Vec<i32>);

impl PitchSet {
    pub fn new(offsets: Vec<i32>) -> Self {
        Self(offsets)
    }

    /// A pitch set holding one note.
    pub fn single(offset: i32) -> Self {
        Self(vec![offset])
    }

    /// The raw offsets, in their stored order.
    pub fn offsets(&self) -> &[i32] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Every offset moved by `semitones`, or `None` on `i32` overflow.
    pub fn transposed(&self, semitones: i32) -> Option<Self> {
        self.0
            .iter()
            .map(|o| o.checked_add(semitones))
            .collect::<Option<Vec<_>>>()
            .map(Self)
    }

    /// Offsets in ascending order (the order a strum plays them).
    pub fn ascending(&self) -> Vec<i32> {
        let mut sorted = self.0.clone();
        sorted.sort_unstable();
        sorted
    }

    /// Whether every offset lies within `±PITCH_LIMIT`.
    pub fn in_range(&self) -> bool {
        self.0.iter().all(|o| o.abs() <= PITCH_LIMIT)
    }

    /// Apply `times` inversions, or `None` on `i32` overflow.
    ///
    /// One inversion moves the first offset to the end, raised an octave:
    /// `[o0, o1, .., on]` becomes `[o1, .., on, o0 + 12]`. Every `len`
    /// inversions lift the whole set by one octave, so only the remainder is
    /// rotated.
    pub fn inverted(&self, times: usize) -> Option<Self> {
        let len = self.0.len();
        if len == 0 {
            return Some(self.clone());
        }
        let octaves = i32::try_from(times / len).ok()?;
        let rotate = times % len;

        let mut offsets = self.transposed(octaves.checked_mul(OCTAVE)?)?.0;
        for offset in &mut offsets[..rotate] {
            *offset = offset.checked_add(OCTAVE)?;
        }
        offsets.rotate_left(rotate);
        Some(Self(offsets))
    }
}

impl From<Vec<i32>> for PitchSet {
    fn from(offsets: Vec<i32>) -> Self {
        Self(offsets)
    }
}

/// The closed set of instruments a chord can be played on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Instrument {
    /// Karplus-Strong plucked string.
    Guitar,
    /// FM-synthesized organ.
    Organ,
    /// Silence.
    Rest,
}

impl Instrument {
    /// Map an `i<k>` directive index to an instrument (0 guitar, 1 organ, 2 rest).
    pub fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Instrument::Guitar),
            1 => Some(Instrument::Organ),
            2 => Some(Instrument::Rest),
            _ => None,
        }
    }

    /// The envelope split this instrument's chords are shaped with.
    pub fn envelope(self) -> Envelope {
        match self {
            Instrument::Organ => Envelope::ORGAN,
            Instrument::Guitar | Instrument::Rest => Envelope::FLAT,
        }
    }

    /// How many smoothing passes run over this instrument's chords.
    pub fn low_pass_passes(self) -> u32 {
        match self {
            Instrument::Organ | Instrument::Guitar => 1,
            Instrument::Rest => 0,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Instrument::Guitar => "guitar",
            Instrument::Organ => "organ",
            Instrument::Rest => "rest",
        }
    }
}

impl fmt::Display for Instrument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Fractions of a chord's length spent in each envelope segment.
///
/// Each fraction is in `[0, 1]` and together they sum to at most 1.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Envelope {
    pub attack: f64,
    pub decay: f64,
    pub sustain: f64,
    pub release: f64,
}

impl Envelope {
    /// Default split: short attack and decay, long sustain, short release.
    pub const ORGAN: Envelope = Envelope {
        attack: 0.1,
        decay: 0.1,
        sustain: 0.6,
        release: 0.2,
    };

    /// Full-length sustain, no ramps.
    pub const FLAT: Envelope = Envelope {
        attack: 0.0,
        decay: 0.0,
        sustain: 1.0,
        release: 0.0,
    };

    /// The four fractions in segment order.
    pub fn fractions(&self) -> [f64; 4] {
        [self.attack, self.decay, self.sustain, self.release]
    }
}

/// Envelope amplitudes: the attack peak and the sustain plateau.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnvelopeLevels {
    pub peak: f64,
    pub sustain: f64,
}

impl EnvelopeLevels {
    /// Peak 1.0 and sustain 0.75, both scaled by `volume`.
    pub fn for_volume(volume: f64) -> Self {
        Self {
            peak: volume,
            sustain: 0.75 * volume,
        }
    }
}

/// A set of pitches played together for one duration.
#[derive(Debug, Clone, PartialEq)]
pub struct ChordEvent {
    pub pitches: PitchSet,
    pub instrument: Instrument,
    /// Fraction of a whole note (0.25 = quarter).
    pub duration: f64,
    /// Volume in `[0, 1]`.
    pub volume: f64,
    pub envelope: Envelope,
    pub levels: EnvelopeLevels,
    pub low_pass_passes: u32,
}

impl ChordEvent {
    /// A chord with the instrument's default envelope and filtering.
    pub fn new(pitches: PitchSet, instrument: Instrument, duration: f64, volume: f64) -> Self {
        Self {
            pitches,
            instrument,
            duration,
            volume,
            envelope: instrument.envelope(),
            levels: EnvelopeLevels::for_volume(volume),
            low_pass_passes: instrument.low_pass_passes(),
        }
    }

    /// A silent event lasting `duration`.
    pub fn rest(duration: f64) -> Self {
        Self::new(PitchSet::default(), Instrument::Rest, duration, 0.0)
    }

    /// Whether this event can make any sound.
    pub fn is_audible(&self) -> bool {
        self.instrument != Instrument::Rest && !self.pitches.is_empty()
    }
}

/// The chord events produced by one notation line.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Track {
    /// 1-based line number in the source.
    pub line: usize,
    pub events: Vec<ChordEvent>,
}

impl Track {
    pub fn new(line: usize) -> Self {
        Self {
            line,
            events: Vec::new(),
        }
    }
}

/// A whole interpreted score.
#[derive(Debug, Clone, PartialEq)]
pub struct Song {
    pub tracks: Vec<Track>,
    /// Tempo as of the last line processed.
    pub tempo_bpm: u32,
    /// Global volume as of the last line processed, `[0, 100]`.
    pub global_volume_percent: u32,
}

impl Song {
    /// Total number of chord events across all tracks.
    pub fn event_count(&self) -> usize {
        self.tracks.iter().map(|t| t.events.len()).sum()
    }

    /// Whether no track produced any chord event.
    pub fn is_empty(&self) -> bool {
        self.event_count() == 0
    }
}
