use std::fmt;

use serde::{Deserialize, Serialize};

/// A chord symbol as matched in text: a root spelling, an opaque
/// quality suffix (possibly empty, passed through unmodified), and an
/// optional slash-bass spelling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChordToken {
    pub root: String,
    pub suffix: String,
    pub bass: Option<String>,
}

impl fmt::Display for ChordToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.root, self.suffix)?;
        if let Some(bass) = &self.bass {
            write!(f, "/{bass}")?;
        }
        Ok(())
    }
}

/// One piece of a scanned line: either a recognized chord token or a
/// verbatim run of text between tokens. Concatenating the segments in
/// order reproduces the line byte-for-byte.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Chord(ChordToken),
    Text(String),
}
