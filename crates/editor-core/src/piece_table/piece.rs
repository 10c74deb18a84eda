#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Piece {
    pub buf_kind: crate::enums::BufferKind,
    pub range: std::ops::Range<usize>,
}

impl Piece {
    #[must_use]
    pub fn new(buf_kind: crate::enums::BufferKind, offset: usize, len: usize) -> Self {
        Self {
            buf_kind,
            range: offset..offset + len,
        }
    }

    /// A one-byte piece over the add buffer at `offset`.
    #[must_use]
    pub fn added(offset: usize) -> Self {
        Self::new(crate::enums::BufferKind::Add, offset, 1)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.range.end - self.range.start
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.range.start == self.range.end
    }
}
