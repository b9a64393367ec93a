use std::collections::BTreeSet;

use crate::error::TransposeError;
use crate::pitch::{self, Accidental};
use crate::scanner::{Scanner, is_candidate_line};
use crate::token::{ChordToken, Segment};

/// Rewrite every chord token in `input` from `from_key` to `to_key`,
/// spelling output notes per `accidentals`. Line structure is preserved
/// exactly: same line count, non-chord lines byte-identical.
///
/// Fails only when a *key* does not resolve. Odd fragments inside the
/// text never abort the request (see `transpose_note`).
pub fn transpose(
    input: &str,
    from_key: &str,
    to_key: &str,
    accidentals: Accidental,
) -> Result<String, TransposeError> {
    let semitones = pitch::semitone_distance(from_key, to_key)?;
    let lines: Vec<String> = input
        .split('\n')
        .map(|line| {
            if is_candidate_line(line) {
                transpose_line(line, semitones, accidentals)
            } else {
                line.to_string()
            }
        })
        .collect();
    Ok(lines.join("\n"))
}

fn transpose_line(line: &str, semitones: usize, accidentals: Accidental) -> String {
    let mut out = String::with_capacity(line.len());
    for segment in Scanner::new(line).segments() {
        match segment {
            Segment::Text(text) => out.push_str(&text),
            Segment::Chord(chord) => {
                out.push_str(&transpose_chord(&chord, semitones, accidentals).to_string());
            }
        }
    }
    out
}

/// Transpose a chord's root and bass independently; the suffix passes
/// through untouched.
pub fn transpose_chord(chord: &ChordToken, semitones: usize, accidentals: Accidental) -> ChordToken {
    ChordToken {
        root: transpose_note(&chord.root, semitones, accidentals),
        suffix: chord.suffix.clone(),
        bass: chord
            .bass
            .as_deref()
            .map(|bass| transpose_note(bass, semitones, accidentals)),
    }
}

/// Fail-soft: a spelling the resolver cannot place is returned
/// unchanged so one malformed fragment never blocks the rest of the
/// document.
fn transpose_note(note: &str, semitones: usize, accidentals: Accidental) -> String {
    match pitch::resolve_index(note) {
        Some(index) => pitch::spell((index + semitones) % 12, accidentals).to_string(),
        None => note.to_string(),
    }
}

/// All unique chord tokens in the text, rendered back to their source
/// form, deduplicated and in lexicographic order.
pub fn extract_chords(input: &str) -> Vec<String> {
    let mut unique = BTreeSet::new();
    for line in input.split('\n') {
        if !is_candidate_line(line) {
            continue;
        }
        for segment in Scanner::new(line).segments() {
            if let Segment::Chord(chord) = segment {
                unique.insert(chord.to_string());
            }
        }
    }
    unique.into_iter().collect()
}

/// Heuristic key guess: the root of the first chord token in document
/// order, "C" when the text contains none. Not a harmonic analysis.
pub fn detect_key(input: &str) -> String {
    for line in input.split('\n') {
        if !is_candidate_line(line) {
            continue;
        }
        for segment in Scanner::new(line).segments() {
            if let Segment::Chord(chord) = segment {
                return chord.root;
            }
        }
    }
    "C".to_string()
}

/// True iff at least one substring of the text matches the chord
/// grammar.
pub fn validate_chords(input: &str) -> bool {
    input.split('\n').any(|line| {
        is_candidate_line(line)
            && Scanner::new(line)
                .segments()
                .iter()
                .any(|segment| matches!(segment, Segment::Chord(_)))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sharp(input: &str, from: &str, to: &str) -> String {
        transpose(input, from, to, Accidental::Sharp).unwrap()
    }

    fn flat(input: &str, from: &str, to: &str) -> String {
        transpose(input, from, to, Accidental::Flat).unwrap()
    }

    #[test]
    fn whole_step_up() {
        assert_eq!(sharp("C | Am | F | G", "C", "D"), "D | Bm | G | A");
    }

    #[test]
    fn naturals_unaffected_by_preference() {
        assert_eq!(flat("C | Am | F | G", "C", "D"), "D | Bm | G | A");
    }

    #[test]
    fn slash_bass_transposes_independently() {
        assert_eq!(sharp("Am7/C", "A", "C"), "Cm7/D#");
        assert_eq!(flat("Am7/C", "A", "C"), "Cm7/Eb");
    }

    #[test]
    fn accidental_preference_selects_table() {
        assert_eq!(sharp("C", "C", "C#"), "C#");
        assert_eq!(flat("C", "C", "C#"), "Db");
        assert_eq!(flat("C", "C", "Db"), "Db");
    }

    #[test]
    fn non_candidate_lines_pass_through() {
        assert_eq!(sharp("Hello World", "C", "G"), "Hello World");
    }

    #[test]
    fn prose_with_root_letters_is_rewritten() {
        // Accepted false positive of the candidate heuristic: "Am" in
        // prose is indistinguishable from the chord.
        let out = sharp("Am I going", "A", "B");
        assert!(out.starts_with("Bm"), "got {out}");
    }

    #[test]
    fn invalid_key_aborts() {
        let err = transpose("C G", "X", "C", Accidental::Sharp).unwrap_err();
        assert_eq!(err, TransposeError::InvalidKey { key: "X".into() });
        assert!(transpose("C G", "C", "H#", Accidental::Sharp).is_err());
    }

    #[test]
    fn compound_keys_accepted() {
        assert_eq!(sharp("C", "C", "C#/Db"), "C#");
    }

    #[test]
    fn identity_for_every_key() {
        // Shift 0 still respells accidentals through the preference
        // table, so byte-identity needs the input spelled to match.
        let sharp_text = "C#m7/G# | A# | lyrics line\n\nF G Am";
        let flat_text = "Dbm7/Ab | Bb | lyrics line\n\nF G Am";
        for label in crate::pitch::KEY_LABELS {
            assert_eq!(sharp(sharp_text, label, label), sharp_text, "key {label}");
            assert_eq!(flat(flat_text, label, label), flat_text, "key {label}");
        }
    }

    #[test]
    fn round_trip_restores_input() {
        let text = "C | Am | F | G\nEm7 A7 Dm7 G7";
        let up = sharp(text, "C", "E");
        assert_eq!(sharp(&up, "E", "C"), text);
    }

    #[test]
    fn composition_equals_direct() {
        let text = "C F G Am Em/B";
        let via = sharp(&sharp(text, "C", "D"), "D", "F#");
        assert_eq!(via, sharp(text, "C", "F#"));
    }

    #[test]
    fn line_structure_preserved() {
        let text = "C  G\n\n  la la la\n\tAm   F  \n";
        let out = sharp(text, "C", "D");
        assert_eq!(out.split('\n').count(), text.split('\n').count());
        assert_eq!(out, "D  A\n\n  la la la\n\tBm   G  \n");
    }

    #[test]
    fn enharmonic_outputs_agree_on_pitch() {
        let text = "C C# D D# E F F# G G# A A# B";
        let with_sharps = sharp(text, "C", "Db");
        let with_flats = flat(text, "C", "Db");
        let indices = |s: &str| -> Vec<Option<usize>> {
            s.split_whitespace().map(crate::pitch::resolve_index).collect()
        };
        assert_eq!(indices(&with_sharps), indices(&with_flats));
        assert_ne!(with_sharps, with_flats);
    }

    #[test]
    fn downward_key_change_is_large_upward_shift() {
        // C→B is +11, never −1.
        assert_eq!(sharp("C D E", "C", "B"), "B C# D#");
    }

    #[test]
    fn unresolvable_fragment_left_in_place() {
        let odd = ChordToken {
            root: "Hx".into(),
            suffix: "7".into(),
            bass: None,
        };
        let out = transpose_chord(&odd, 2, Accidental::Sharp);
        assert_eq!(out.to_string(), "Hx7");
    }

    #[test]
    fn extract_is_sorted_and_unique() {
        assert_eq!(
            extract_chords("G C G\nAm C"),
            vec!["Am", "C", "G"]
        );
        assert_eq!(extract_chords("la la la"), Vec::<String>::new());
    }

    #[test]
    fn extract_keeps_full_token_text() {
        assert_eq!(
            extract_chords("Am7/C Bbsus4"),
            vec!["Am7/C", "Bbsus4"]
        );
    }

    #[test]
    fn detect_key_first_in_document_order() {
        assert_eq!(detect_key("F | Dm | Bb | C"), "F");
        assert_eq!(detect_key("intro...\nBb F Gm"), "Bb");
    }

    #[test]
    fn detect_key_defaults_to_c() {
        assert_eq!(detect_key(""), "C");
        assert_eq!(detect_key("no roots here"), "C");
    }

    #[test]
    fn validate_finds_any_token() {
        assert!(validate_chords("Am F C G"));
        assert!(validate_chords("just one C inside"));
        assert!(!validate_chords("hello world"));
        assert!(!validate_chords(""));
    }

    #[test]
    fn extraction_survives_json_round_trip() {
        let chords = extract_chords("C G Am F");
        let json = serde_json::to_string(&chords).unwrap();
        let back: Vec<String> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, chords);
    }
}
