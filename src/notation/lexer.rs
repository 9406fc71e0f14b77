//! Lexer for notation lines.
//!
//! Splits one line into [`Token`]s in a single left-to-right pass. At each
//! position the directive grammar is tried first, then the longest chord
//! symbol from the [`IntervalDictionary`], then a note length. Digits that
//! belong to a chord symbol (the `7` in `CM7`) are consumed with the chord and
//! never read as a length.

use super::dictionary::{rewrite_flats, IntervalDictionary};
use super::token::{Directive, OctaveChange, Token, TokenKind};

pub struct Lexer {
    source: String,
    pos: usize,
    dictionary: &'static IntervalDictionary,
}

impl Lexer {
    /// Prepare a line for lexing. Flat spellings are rewritten up front.
    pub fn new(line: &str) -> Self {
        Self {
            source: rewrite_flats(line),
            pos: 0,
            dictionary: IntervalDictionary::global(),
        }
    }

    /// Lex the whole line.
    ///
    /// Never fails: text that matches nothing becomes a
    /// [`TokenKind::Unresolved`] token so the interpreter can report it with
    /// its position.
    pub fn tokenize(&mut self) -> Vec<Token> {
        let mut tokens = Vec::new();

        loop {
            self.skip_separators();
            if self.is_at_end() {
                break;
            }

            let start = self.pos;
            let kind = match self.scan_at(start) {
                Some((len, kind)) => {
                    self.pos += len;
                    kind
                }
                None => {
                    self.skip_unresolved();
                    TokenKind::Unresolved
                }
            };

            let token = Token {
                kind,
                text: self.source[start..self.pos].to_string(),
                col: start + 1,
            };
            log::trace!("token {:?} at col {}", token.text, token.col);
            tokens.push(token);
        }

        tokens
    }

    fn rest(&self, at: usize) -> &str {
        &self.source[at..]
    }

    fn peek(&self) -> Option<char> {
        self.rest(self.pos).chars().next()
    }

    fn is_at_end(&self) -> bool {
        self.pos >= self.source.len()
    }

    fn skip_separators(&mut self) {
        while let Some(ch) = self.peek() {
            if is_separator(ch) {
                self.pos += ch.len_utf8();
            } else {
                break;
            }
        }
    }

    /// Consume a run of characters that start no token, up to the next
    /// separator or recognisable token. Digits stay attached to the run.
    fn skip_unresolved(&mut self) {
        while let Some(ch) = self.peek() {
            self.pos += ch.len_utf8();
            match self.peek() {
                None => break,
                Some(next) if is_separator(next) => break,
                Some(next) if !next.is_ascii_digit() && self.scan_at(self.pos).is_some() => break,
                Some(_) => {}
            }
        }
    }

    /// Try every rule at byte offset `at`, returning the matched length.
    fn scan_at(&self, at: usize) -> Option<(usize, TokenKind)> {
        let text = self.rest(at);
        if let Some((len, directive)) = scan_directive(text) {
            return Some((len, TokenKind::Directive(directive)));
        }
        if let Some((len, pitches)) = self.dictionary.longest_prefix(text) {
            return Some((len, TokenKind::Chord(pitches.clone())));
        }
        scan_duration(text).map(|(len, directive)| (len, TokenKind::Directive(directive)))
    }
}

/// Comma, space and newline separate tokens; any other whitespace is text.
fn is_separator(ch: char) -> bool {
    matches!(ch, ',' | ' ' | '\n')
}

/// Length of the leading ASCII digit run.
fn digit_run(text: &str) -> usize {
    text.bytes().take_while(u8::is_ascii_digit).count()
}

/// A letter followed by at least one digit, e.g. `t120`.
fn prefixed_number(text: &str) -> Option<(usize, u32)> {
    let digits = digit_run(&text[1..]);
    if digits == 0 {
        return None;
    }
    let value = text[1..1 + digits].parse().ok()?;
    Some((1 + digits, value))
}

fn scan_directive(text: &str) -> Option<(usize, Directive)> {
    let first = text.chars().next()?;
    match first {
        'r' => Some((1, Directive::Rest)),
        'i' => prefixed_number(text).map(|(len, n)| (len, Directive::Instrument(n as usize))),
        'l' => prefixed_number(text).map(|(len, n)| (len, Directive::GlobalVolume(n))),
        't' => prefixed_number(text).map(|(len, n)| (len, Directive::Tempo(n))),
        'v' => prefixed_number(text).map(|(len, n)| (len, Directive::Volume(n))),
        'n' => prefixed_number(text).map(|(len, n)| (len, Directive::Inversion(n as usize))),
        'o' => scan_octave(text),
        _ => None,
    }
}

fn scan_octave(text: &str) -> Option<(usize, Directive)> {
    let sign = match text[1..].chars().next()? {
        '+' => Some(1),
        '-' => Some(-1),
        _ => None,
    };
    let digits_at = if sign.is_some() { 2 } else { 1 };
    let digits = digit_run(&text[digits_at..]);
    if digits == 0 {
        return None;
    }
    let value: i32 = text[digits_at..digits_at + digits].parse().ok()?;
    let change = match sign {
        Some(s) => OctaveChange::Relative(s * value),
        None => OctaveChange::Absolute(value),
    };
    Some((digits_at + digits, Directive::Octave(change)))
}

fn scan_duration(text: &str) -> Option<(usize, Directive)> {
    let digits = digit_run(text);
    if digits == 0 {
        return None;
    }
    let denominator = text[..digits].parse().ok()?;
    let dotted = text[digits..].starts_with('.');
    let len = if dotted { digits + 1 } else { digits };
    Some((len, Directive::Duration { denominator, dotted }))
}
