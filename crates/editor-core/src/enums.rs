/// Which backing buffer a piece refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BufferKind {
    Original,
    Add,
}

/// The kind of the most recent edit.
///
/// Only consulted to decide whether a typed character extends the
/// previous add piece.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EditAction {
    #[default]
    Idle,
    Insert,
    Delete,
}

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum MathError {
    /// Represents the `None` case from checked math
    #[error("arithmetic overflow")]
    Overflow,
    #[error("index {index} out of bounds (len={len})")]
    OutOfBounds { index: usize, len: usize },
}
