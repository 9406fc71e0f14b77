//! Error types for notation interpretation.

use std::fmt;

use crate::event::PITCH_LIMIT;

/// An error that aborts interpretation of a score.
#[derive(Debug, Clone, PartialEq)]
pub struct NotationError {
    pub kind: ErrorKind,
    /// Name of the score the line came from (usually its path).
    pub source_name: String,
    /// 1-based line number.
    pub line: usize,
    /// 0-based instruction index within the line.
    pub index: usize,
    /// The offending instruction text.
    pub instruction: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ErrorKind {
    /// Text that matches no directive or chord symbol.
    UnresolvedToken,
    /// `i<k>` with an index outside {0, 1, 2}.
    UnknownInstrumentIndex(usize),
    /// `n<k>` with no earlier chord on the line to invert.
    InvalidInversionTarget,
    /// `t0`.
    InvalidTempo,
    /// A note length with denominator 0.
    InvalidDuration,
    /// An octave shift or inversion that moves a pitch past `±PITCH_LIMIT`.
    PitchOutOfRange,
}

impl NotationError {
    pub fn new(
        kind: ErrorKind,
        source_name: impl Into<String>,
        line: usize,
        index: usize,
        instruction: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            source_name: source_name.into(),
            line,
            index,
            instruction: instruction.into(),
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::UnresolvedToken => write!(f, "unrecognized instruction"),
            ErrorKind::UnknownInstrumentIndex(i) => {
                write!(f, "unknown instrument index {i} (expected 0, 1 or 2)")
            }
            ErrorKind::InvalidInversionTarget => write!(f, "no previous chord to invert"),
            ErrorKind::InvalidTempo => write!(f, "tempo must be greater than zero"),
            ErrorKind::InvalidDuration => write!(f, "note length must be greater than zero"),
            ErrorKind::PitchOutOfRange => write!(
                f,
                "pitch out of range (at most {PITCH_LIMIT} semitones from the reference)"
            ),
        }
    }
}

impl fmt::Display for NotationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "parse error on '{}' (instruction #{}, line {}) in {}: {}",
            self.instruction, self.index, self.line, self.source_name, self.kind
        )
    }
}

impl std::error::Error for NotationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_instruction_position_and_source() {
        let err = NotationError::new(ErrorKind::UnresolvedToken, "song.mus", 3, 5, "xyz");
        let msg = err.to_string();
        assert!(msg.contains("'xyz'"));
        assert!(msg.contains("#5"));
        assert!(msg.contains("line 3"));
        assert!(msg.contains("song.mus"));
    }

    #[test]
    fn display_instrument_index() {
        let err = NotationError::new(ErrorKind::UnknownInstrumentIndex(7), "s", 1, 0, "i7");
        assert!(err.to_string().contains("unknown instrument index 7"));
    }

    #[test]
    fn display_pitch_range() {
        let err = NotationError::new(ErrorKind::PitchOutOfRange, "s", 2, 1, "c");
        assert!(err.to_string().contains("pitch out of range"));
        assert!(err.to_string().contains("768"));
    }
}
