//! Interval dictionary — chord and note symbols mapped to pitch sets.
//!
//! Every symbol is a root name (`a`..`g#` for the lower band, `A`..`G#` for the
//! upper band) optionally followed by one of the interval patterns below. The
//! table is built once and shared.

use std::collections::HashMap;
use std::sync::OnceLock;

use crate::event::PitchSet;

/// Named interval patterns, as offsets from the root.
const PATTERNS: [(&str, &[i32]); 17] = [
    ("-5", &[0, 7]),
    ("-#5", &[0, 8]),
    ("-4", &[0, 5]),
    ("-#4", &[0, 6]),
    ("M3", &[0, 4]),
    ("m3", &[0, 3]),
    ("M2", &[0, 2]),
    ("m2", &[0, 1]),
    ("M", &[0, 4, 7]),
    ("m", &[0, 3, 7]),
    ("M7", &[0, 4, 7, 11]),
    ("7", &[0, 4, 7, 10]),
    ("-7", &[0, 10]),
    ("M6", &[0, 4, 7, 9]),
    ("-6", &[0, 9]),
    ("m7", &[0, 3, 7, 10]),
    ("m6", &[0, 3, 7, 9]),
];

/// Root names in semitone order starting at A.
const ROOTS: [&str; 12] = [
    "A", "A#", "B", "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#",
];

/// Flat spellings and the sharp symbol each one is rewritten to, applied in order.
///
/// Lowercase `a@` wraps around to the upper band's `G#`.
pub const FLAT_REWRITES: [(&str, &str); 14] = [
    ("a@", "G#"),
    ("b@", "a#"),
    ("c@", "b"),
    ("d@", "c#"),
    ("e@", "d#"),
    ("f@", "e"),
    ("g@", "f#"),
    ("A@", "g#"),
    ("B@", "A#"),
    ("C@", "B"),
    ("D@", "C#"),
    ("E@", "D#"),
    ("F@", "E"),
    ("G@", "F#"),
];

/// Lookup table from symbol to absolute pitch offsets.
#[derive(Debug)]
pub struct IntervalDictionary {
    entries: HashMap<String, PitchSet>,
    /// Byte length of the longest symbol.
    max_len: usize,
}

impl IntervalDictionary {
    /// Build the full table: 24 roots, each alone and with every pattern.
    pub fn new() -> Self {
        let lower = ROOTS.iter().map(|r| r.to_lowercase());
        let upper = ROOTS.iter().map(|r| r.to_string());
        let roots: Vec<(String, i32)> = lower.chain(upper).zip(0..).collect();

        let mut entries = HashMap::new();
        for (root, base) in &roots {
            for (suffix, pattern) in PATTERNS {
                let offsets = pattern.iter().map(|o| o + base).collect();
                entries.insert(format!("{root}{suffix}"), PitchSet::new(offsets));
            }
        }
        for (root, base) in &roots {
            entries.insert(root.clone(), PitchSet::single(*base));
        }

        let max_len = entries.keys().map(String::len).max().unwrap_or(0);

        Self { entries, max_len }
    }

    /// The shared table, built on first use.
    pub fn global() -> &'static IntervalDictionary {
        static DICTIONARY: OnceLock<IntervalDictionary> = OnceLock::new();
        DICTIONARY.get_or_init(IntervalDictionary::new)
    }

    /// Exact-match lookup.
    pub fn lookup(&self, symbol: &str) -> Option<&PitchSet> {
        self.entries.get(symbol)
    }

    /// The longest symbol that `text` starts with, with its length in bytes.
    pub fn longest_prefix(&self, text: &str) -> Option<(usize, &PitchSet)> {
        let limit = self.max_len.min(text.len());
        (1..=limit).rev().find_map(|len| {
            let candidate = text.get(..len)?;
            self.lookup(candidate).map(|pitches| (len, pitches))
        })
    }
}

impl Default for IntervalDictionary {
    fn default() -> Self {
        Self::new()
    }
}

/// Rewrite every flat spelling (`x@`) to its sharp-named symbol.
pub fn rewrite_flats(text: &str) -> String {
    FLAT_REWRITES
        .iter()
        .fold(text.to_string(), |acc, (flat, sharp)| acc.replace(flat, sharp))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dict() -> &'static IntervalDictionary {
        IntervalDictionary::global()
    }

    #[test]
    fn table_size() {
        // 24 roots × (17 patterns + bare note)
        assert_eq!(dict().entries.len(), 24 * 18);
        // `G#-#5` is the longest symbol.
        assert_eq!(dict().max_len, 5);
    }

    #[test]
    fn lowercase_band_starts_at_zero() {
        assert_eq!(dict().lookup("a").unwrap().offsets(), &[0]);
        assert_eq!(dict().lookup("g#").unwrap().offsets(), &[11]);
    }

    #[test]
    fn uppercase_is_an_octave_above_lowercase() {
        for root in ROOTS {
            let low = dict().lookup(&root.to_lowercase()).unwrap().offsets()[0];
            let high = dict().lookup(root).unwrap().offsets()[0];
            assert_eq!(high - low, 12, "root {root}");
        }
    }

    #[test]
    fn major_triad() {
        assert_eq!(dict().lookup("CM").unwrap().offsets(), &[15, 19, 22]);
    }

    #[test]
    fn dominant_seventh() {
        assert_eq!(dict().lookup("c7").unwrap().offsets(), &[3, 7, 10, 13]);
    }

    #[test]
    fn minor_seventh_sharp_root() {
        assert_eq!(dict().lookup("g#m7").unwrap().offsets(), &[11, 14, 18, 21]);
    }

    #[test]
    fn unknown_symbol() {
        assert!(dict().lookup("H").is_none());
        assert!(dict().lookup("").is_none());
    }

    #[test]
    fn every_symbol_matches_in_full() {
        for (symbol, pitches) in &dict().entries {
            let text = format!("{symbol} c");
            let (len, found) = dict().longest_prefix(&text).unwrap();
            assert_eq!(len, symbol.len(), "{symbol}");
            assert_eq!(found, pitches, "{symbol}");
        }
    }

    #[test]
    fn longest_prefix_prefers_chord_over_note() {
        let (len, pitches) = dict().longest_prefix("CM7 rest").unwrap();
        assert_eq!(len, 3);
        assert_eq!(pitches.offsets(), &[15, 19, 22, 26]);
    }

    #[test]
    fn longest_prefix_falls_back_to_note() {
        let (len, pitches) = dict().longest_prefix("cc").unwrap();
        assert_eq!(len, 1);
        assert_eq!(pitches.offsets(), &[3]);
    }

    #[test]
    fn longest_prefix_none_for_directive() {
        assert!(dict().longest_prefix("t120").is_none());
        assert!(dict().longest_prefix("").is_none());
    }

    #[test]
    fn longest_prefix_ignores_non_ascii_boundaries() {
        assert!(dict().longest_prefix("é").is_none());
        assert_eq!(dict().longest_prefix("cé").unwrap().0, 1);
    }

    #[test]
    fn flats_rewrite_to_sharps() {
        assert_eq!(rewrite_flats("b@"), "a#");
        assert_eq!(rewrite_flats("E@m"), "D#m");
        assert_eq!(rewrite_flats("a@ A@"), "G# g#");
    }

    #[test]
    fn flat_rewrite_leaves_plain_text() {
        assert_eq!(rewrite_flats("4ccc c"), "4ccc c");
    }

    #[test]
    fn every_flat_target_is_a_symbol() {
        for (_, sharp) in FLAT_REWRITES {
            assert!(dict().lookup(sharp).is_some(), "{sharp}");
        }
    }
}
