//! Song data model — chord events grouped into tracks, tracks into a song.
//!
//! The notation interpreter produces these values; the audio renderer only
//! reads them.

pub mod types;

pub use types::{
    ChordEvent, Envelope, EnvelopeLevels, Instrument, PitchSet, Song, Track, OCTAVE,
    PITCH_LIMIT,
};
