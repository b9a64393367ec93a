use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransposeError {
    /// The source or target key of a transposition request does not
    /// resolve to a pitch class. Aborts the whole request; unresolvable
    /// notes *inside* the text are handled fail-soft instead (left
    /// unchanged in place).
    InvalidKey { key: String },
}

impl fmt::Display for TransposeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransposeError::InvalidKey { key } => write!(f, "Invalid key: '{key}'"),
        }
    }
}

impl std::error::Error for TransposeError {}
