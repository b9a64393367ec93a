use serde::{Deserialize, Serialize};

use crate::error::TransposeError;

/// Chromatic scale spelled with sharps, index 0 = C.
pub const SHARP_SPELLINGS: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

/// Chromatic scale spelled with flats. Naturals are shared with the
/// sharp table; only the 5 accidental entries differ.
pub const FLAT_SPELLINGS: [&str; 12] = [
    "C", "Db", "D", "Eb", "E", "F", "Gb", "G", "Ab", "A", "Bb", "B",
];

/// Sharp/flat spelling pairs for the 5 accidental pitch classes.
/// Display-only: semitone arithmetic always goes through the index tables.
pub const ENHARMONIC_PAIRS: [(&str, &str); 5] = [
    ("C#", "Db"),
    ("D#", "Eb"),
    ("F#", "Gb"),
    ("G#", "Ab"),
    ("A#", "Bb"),
];

/// The 12 selectable keys as the UI presents them: compound
/// "sharp/flat" labels for accidentals, bare names for naturals.
/// Every entry resolves through `resolve_index` (compound forms
/// reduce at the first `/`).
pub const KEY_LABELS: [&str; 12] = [
    "C", "C#/Db", "D", "D#/Eb", "E", "F", "F#/Gb", "G", "G#/Ab", "A", "A#/Bb", "B",
];

// ── Accidental preference ───────────────────────────────────

/// Which spelling table to use for output notes. Controls display
/// only, never the arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Accidental {
    Sharp,
    Flat,
}

impl Accidental {
    /// Map the preference string from the UI boundary: "flat" selects
    /// flats, anything else falls back to sharps.
    pub fn from_name(name: &str) -> Self {
        if name.trim().eq_ignore_ascii_case("flat") {
            Accidental::Flat
        } else {
            Accidental::Sharp
        }
    }
}

impl Default for Accidental {
    fn default() -> Self {
        Accidental::Sharp
    }
}

// ── Resolver ────────────────────────────────────────────────

/// Normalize a note spelling: trim whitespace, upper-case the leading
/// letter, and map the Unicode accidental glyphs to ASCII. Only the
/// first character is upper-cased so flat spellings keep their
/// lowercase `b` (`db` → `Db`, not `DB`).
pub fn normalize(note: &str) -> String {
    let trimmed = note.trim();
    let mut out = String::with_capacity(trimmed.len());
    for (i, ch) in trimmed.chars().enumerate() {
        match ch {
            '♭' => out.push('b'),
            '♯' => out.push('#'),
            c if i == 0 => out.push(c.to_ascii_uppercase()),
            c => out.push(c),
        }
    }
    out
}

/// Resolve a note spelling to its pitch-class index (0 = C), looking
/// the normalized form up in the sharp table first, then the flat
/// table. Compound display forms ("C#/Db") reduce to their first
/// segment before lookup. `None` when the spelling matches neither
/// table.
pub fn resolve_index(note: &str) -> Option<usize> {
    let normalized = normalize(note);
    let primary = normalized.split('/').next().unwrap_or("");
    SHARP_SPELLINGS
        .iter()
        .position(|&n| n == primary)
        .or_else(|| FLAT_SPELLINGS.iter().position(|&n| n == primary))
}

/// Semitones from `from_key` up to `to_key`, always in `0..12`.
/// Transposing "down" is expressed as the complementary upward
/// rotation (C→B is +11, never −1).
pub fn semitone_distance(from_key: &str, to_key: &str) -> Result<usize, TransposeError> {
    let from = resolve_index(from_key).ok_or_else(|| TransposeError::InvalidKey {
        key: from_key.trim().to_string(),
    })?;
    let to = resolve_index(to_key).ok_or_else(|| TransposeError::InvalidKey {
        key: to_key.trim().to_string(),
    })?;
    Ok((12 + to - from) % 12)
}

/// Spell a pitch-class index under the requested accidental
/// preference. Naturals come out identical either way.
pub fn spell(index: usize, accidentals: Accidental) -> &'static str {
    match accidentals {
        Accidental::Sharp => SHARP_SPELLINGS[index % 12],
        Accidental::Flat => FLAT_SPELLINGS[index % 12],
    }
}

/// The enharmonic partner of an accidental spelling (`C#` ↔ `Db`).
/// Naturals and unrecognized spellings have none.
pub fn enharmonic(note: &str) -> Option<&'static str> {
    let normalized = normalize(note);
    for (sharp, flat) in ENHARMONIC_PAIRS {
        if normalized == sharp {
            return Some(flat);
        }
        if normalized == flat {
            return Some(sharp);
        }
    }
    None
}
