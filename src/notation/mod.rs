//! Notation interpreter — score text → tokens → chord events per track.
//!
//! Each non-comment line of a score is one track. Lines starting with `//`
//! and blank lines are skipped.

pub mod dictionary;
pub mod error;
pub mod interpreter;
pub mod lexer;
pub mod token;

pub use dictionary::IntervalDictionary;
pub use error::{ErrorKind, NotationError};
pub use interpreter::{SongState, TrackInterpreter, TrackState, TrackStateMode};

use crate::event::Song;

use lexer::Lexer;

/// Marker that turns a whole line into a comment.
pub const COMMENT_PREFIX: &str = "//";

/// Interpretation switches.
#[derive(Debug, Clone, Copy, Default)]
pub struct NotationOptions {
    pub track_state: TrackStateMode,
}

/// The notation front end.
pub struct Notation;

impl Notation {
    /// Interpret every line of `text` into a [`Song`].
    ///
    /// `source_name` is only used in error messages.
    pub fn parse(
        source_name: &str,
        text: &str,
        options: &NotationOptions,
    ) -> Result<Song, NotationError> {
        let mut song_state = SongState::default();
        let mut track_state = TrackState::default();
        let mut tracks = Vec::new();

        for (idx, line) in text.lines().enumerate() {
            if line.starts_with(COMMENT_PREFIX) || line.trim().is_empty() {
                continue;
            }
            if options.track_state == TrackStateMode::Reset {
                track_state = TrackState::default();
            }

            let line_no = idx + 1;
            let tokens = Lexer::new(line).tokenize();
            let track = TrackInterpreter::new(
                source_name,
                line_no,
                &mut song_state,
                &mut track_state,
            )
            .interpret(&tokens)?;
            log::debug!(
                "line {line_no}: {} tokens, {} events",
                tokens.len(),
                track.events.len()
            );
            tracks.push(track);
        }

        Ok(Song {
            tracks,
            tempo_bpm: song_state.tempo_bpm,
            global_volume_percent: song_state.global_volume_percent,
        })
    }
}
