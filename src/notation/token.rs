//! Token types for the notation lexer.

use crate::event::PitchSet;

/// A token produced by the lexer.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    /// The source text this token was cut from (after flat rewriting).
    pub text: String,
    /// 1-based column of the first character.
    pub col: usize,
}

/// The kind of token.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    /// A chord or single note from the interval dictionary.
    Chord(PitchSet),
    /// A state-changing instruction.
    Directive(Directive),
    /// Text that matches no grammar rule. The interpreter rejects it.
    Unresolved,
}

/// A parsed directive payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Directive {
    /// `i<k>`: select instrument by index.
    Instrument(usize),
    /// `l<n>`: global volume percent.
    GlobalVolume(u32),
    /// `r`: insert a rest.
    Rest,
    /// `o<n>`, `o+<n>`, `o-<n>`: set or shift the octave.
    Octave(OctaveChange),
    /// `t<n>`: tempo in BPM.
    Tempo(u32),
    /// `v<n>`: per-note volume percent.
    Volume(u32),
    /// `n<k>`: invert the previous chord `k - 1` times.
    Inversion(usize),
    /// `<n>` or `<n>.`: note length as a whole-note denominator.
    Duration { denominator: u32, dotted: bool },
}

/// How an octave directive changes the current octave.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OctaveChange {
    /// Explicitly signed: add to the current offset.
    Relative(i32),
    /// Unsigned: octave number, 4 being the reference.
    Absolute(i32),
}

impl Directive {
    /// Short name used in logs and errors.
    pub fn name(&self) -> &'static str {
        match self {
            Directive::Instrument(_) => "instrument",
            Directive::GlobalVolume(_) => "global volume",
            Directive::Rest => "rest",
            Directive::Octave(_) => "octave",
            Directive::Tempo(_) => "tempo",
            Directive::Volume(_) => "volume",
            Directive::Inversion(_) => "inversion",
            Directive::Duration { .. } => "duration",
        }
    }
}
