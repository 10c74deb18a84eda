/// Longest line the index can store, in bytes.
pub const MAX_LINE_LEN: usize = u16::MAX as usize;

const LINE_INDEX_INIT_CAP: usize = 8;

/// Cached per-line byte lengths, newline excluded.
///
/// The lengths are exactly what splitting the document on `\n` yields: a
/// document ending in a newline has a trailing empty line, and the empty
/// document has a single empty line. So `sum + (line_count - 1)` is always
/// the document length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineIndex {
    lengths: Vec<u16>,
}

impl Default for LineIndex {
    fn default() -> Self {
        Self { lengths: vec![0] }
    }
}

/*

====================================
============ BUILDING ==============
====================================

*/

impl LineIndex {
    /// Scans every byte of every piece and records each line's length.
    ///
    /// # Errors
    ///
    /// Returns [`crate::errors::TextBufferError::LineTooLong`] when a line
    /// exceeds [`MAX_LINE_LEN`].
    pub fn build(
        table: &crate::piece_table::table::PieceTable,
    ) -> crate::errors::TextBufferResult<Self> {
        let mut lengths = Vec::with_capacity(LINE_INDEX_INIT_CAP);
        let mut current = 0usize;

        for chunk in table.iter_bytes() {
            let mut line_start = 0usize;

            for newline in memchr::memchr_iter(b'\n', chunk) {
                current += newline - line_start;
                lengths.push(Self::checked_len(lengths.len(), current)?);
                current = 0;
                line_start = newline + 1;
            }

            current += chunk.len() - line_start;
        }

        lengths.push(Self::checked_len(lengths.len(), current)?);

        Ok(Self { lengths })
    }

    fn checked_len(line: usize, len: usize) -> crate::errors::TextBufferResult<u16> {
        u16::try_from(len).map_err(|_| crate::errors::TextBufferError::LineTooLong { line, len })
    }
}

/*

====================================
============= QUERIES ==============
====================================

*/

impl LineIndex {
    #[inline]
    pub fn line_count(&self) -> usize {
        self.lengths.len()
    }

    #[inline]
    pub fn line_len(&self, row: usize) -> Option<usize> {
        self.lengths.get(row).map(|&len| usize::from(len))
    }

    #[inline]
    pub fn lengths(&self) -> &[u16] {
        &self.lengths
    }

    /// Document length implied by the index.
    pub fn doc_len(&self) -> usize {
        let text: usize = self.lengths.iter().map(|&len| usize::from(len)).sum();

        text + self.lengths.len() - 1
    }

    /// Position right after the last byte of the document.
    pub fn end_position(&self) -> crate::cursor::Position {
        let row = self.lengths.len() - 1;

        crate::cursor::Position::new(row, usize::from(self.lengths[row]))
    }

    /// Linear offset of the first byte of `row`.
    pub fn line_start(&self, row: usize) -> Option<usize> {
        if row >= self.lengths.len() {
            return None;
        }

        Some(
            self.lengths[..row]
                .iter()
                .map(|&len| usize::from(len) + 1)
                .sum(),
        )
    }

    /// Converts a (row, col) position into a 0-based linear offset.
    pub fn offset_of(
        &self,
        pos: crate::cursor::Position,
    ) -> Result<usize, crate::enums::MathError> {
        let line_len = self
            .line_len(pos.row)
            .ok_or(crate::enums::MathError::OutOfBounds {
                index: pos.row,
                len: self.line_count(),
            })?;

        if pos.col > line_len {
            return Err(crate::enums::MathError::OutOfBounds {
                index: pos.col,
                len: line_len,
            });
        }

        let line_start = self
            .line_start(pos.row)
            .ok_or(crate::enums::MathError::Overflow)?;

        Ok(line_start + pos.col)
    }

    /// Converts a 0-based linear offset into a (row, col) position.
    pub fn position_of(
        &self,
        offset: usize,
    ) -> Result<crate::cursor::Position, crate::enums::MathError> {
        let mut remaining = offset;

        for (row, &len) in self.lengths.iter().enumerate() {
            let len = usize::from(len);

            if remaining <= len {
                return Ok(crate::cursor::Position::new(row, remaining));
            }

            remaining -= len + 1;
        }

        Err(crate::enums::MathError::OutOfBounds {
            index: offset,
            len: self.doc_len(),
        })
    }
}

/*

====================================
======= INCREMENTAL UPDATES ========
====================================

*/

impl LineIndex {
    /// Records one non-newline byte inserted into `row`.
    pub fn grow_line(&mut self, row: usize) -> crate::errors::TextBufferResult<()> {
        let line_count = self.line_count();
        let len = self
            .lengths
            .get_mut(row)
            .ok_or(crate::enums::MathError::OutOfBounds {
                index: row,
                len: line_count,
            })?;

        *len = Self::checked_len(row, usize::from(*len) + 1)?;

        Ok(())
    }

    /// Records one non-newline byte removed from `row`.
    pub fn shrink_line(&mut self, row: usize) -> Result<(), crate::enums::MathError> {
        let line_count = self.line_count();
        let len = self
            .lengths
            .get_mut(row)
            .ok_or(crate::enums::MathError::OutOfBounds {
                index: row,
                len: line_count,
            })?;

        *len = len.checked_sub(1).ok_or(crate::enums::MathError::Overflow)?;

        Ok(())
    }
}
