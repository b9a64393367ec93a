use crate::token::{ChordToken, Segment};

/// A line is scanned for chords iff it contains at least one uppercase
/// root letter. Deliberately crude: prose containing a bare "A" or "G"
/// qualifies too, and any chord-looking fragment in it will be
/// rewritten. That false-positive behavior is part of the contract.
pub fn is_candidate_line(line: &str) -> bool {
    line.chars().any(is_root_letter)
}

fn is_root_letter(ch: char) -> bool {
    matches!(ch, 'A'..='G')
}

/// A suffix is the greedy run after the root: everything that is not a
/// root letter, an accidental character, a slash, or whitespace.
fn is_suffix_char(ch: char) -> bool {
    !is_root_letter(ch) && ch != '#' && ch != 'b' && ch != '/' && !ch.is_whitespace()
}

/// Single-pass character scanner splitting one line into chord tokens
/// and verbatim text runs. No word-boundary requirement: a token starts
/// wherever a root letter appears.
pub struct Scanner {
    chars: Vec<char>,
    pos: usize,
}

impl Scanner {
    pub fn new(line: &str) -> Self {
        Scanner {
            chars: line.chars().collect(),
            pos: 0,
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).copied()
    }

    fn advance(&mut self) -> Option<char> {
        let ch = self.chars.get(self.pos).copied();
        if ch.is_some() {
            self.pos += 1;
        }
        ch
    }

    /// Consume the whole line and return its segments in order.
    pub fn segments(mut self) -> Vec<Segment> {
        let mut segments = Vec::new();
        let mut text = String::new();
        while let Some(ch) = self.peek() {
            if is_root_letter(ch) {
                if !text.is_empty() {
                    segments.push(Segment::Text(std::mem::take(&mut text)));
                }
                segments.push(Segment::Chord(self.scan_chord()));
            } else {
                text.push(ch);
                self.advance();
            }
        }
        if !text.is_empty() {
            segments.push(Segment::Text(text));
        }
        segments
    }

    /// Scan `Root Suffix? ("/" Bass)?` starting at a root letter.
    fn scan_chord(&mut self) -> ChordToken {
        let root = self.scan_note();
        let mut suffix = String::new();
        while let Some(ch) = self.peek() {
            if is_suffix_char(ch) {
                suffix.push(ch);
                self.advance();
            } else {
                break;
            }
        }
        // A slash introduces a bass note only when a root letter
        // follows immediately; otherwise it stays verbatim text.
        let bass = if self.peek() == Some('/') && self.peek_at(1).is_some_and(is_root_letter) {
            self.advance();
            Some(self.scan_note())
        } else {
            None
        };
        ChordToken { root, suffix, bass }
    }

    /// `[A-G][#b]?` — caller guarantees the current char is a root letter.
    fn scan_note(&mut self) -> String {
        let mut note = String::new();
        if let Some(ch) = self.advance() {
            note.push(ch);
        }
        if matches!(self.peek(), Some('#') | Some('b')) {
            note.push(self.advance().unwrap());
        }
        note
    }
}
