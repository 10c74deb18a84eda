use std::ops::SubAssign;

#[derive(Debug)]
pub struct PieceTable {
    /// Original unchanged file contents (shared, zero-copy).
    original: io::original::OriginalBuffer,
    /// Append-only buffer storing every typed byte.
    buf: Vec<u8>,
    /// Ordered list of pieces describing the visible document.
    pieces: Vec<crate::piece_table::piece::Piece>,
}

/// Where a linear document offset lands in the piece list.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PiecePosition {
    /// The byte at the offset is `offset` bytes into piece `idx`.
    /// `offset` is always smaller than the piece's length.
    Within { idx: usize, offset: usize },
    /// The offset equals the document length: right after the last piece.
    End,
}

/*

====================================
========= CREATION METHOD ==========
====================================

*/

impl PieceTable {
    pub fn new(original: io::original::OriginalBuffer) -> Self {
        let mut pieces = Vec::with_capacity(crate::piece_table::PIECE_TABLE_INIT_CAP);

        if !original.is_empty() {
            pieces.push(crate::piece_table::piece::Piece::new(
                crate::enums::BufferKind::Original,
                0,
                original.len(),
            ));
        }

        Self {
            original,
            buf: Vec::with_capacity(crate::piece_table::ADD_BUF_INIT_CAP),
            pieces,
        }
    }
}

/*

====================================
========= INLINE METHODS  ==========
====================================

*/

impl PieceTable {
    /// Total document length in bytes
    #[inline]
    pub fn len(&self) -> usize {
        self.pieces.iter().map(crate::piece_table::piece::Piece::len).sum()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }

    #[inline]
    pub fn piece_count(&self) -> usize {
        self.pieces.len()
    }

    #[inline]
    pub fn pieces(&self) -> &[crate::piece_table::piece::Piece] {
        &self.pieces
    }

    #[inline]
    pub fn add_buffer(&self) -> &[u8] {
        &self.buf
    }

    /// The bytes a piece refers to.
    #[inline]
    pub fn slice_of(&self, piece: &crate::piece_table::piece::Piece) -> &[u8] {
        let backing = match piece.buf_kind {
            crate::enums::BufferKind::Original => self.original.as_slice(),
            crate::enums::BufferKind::Add => &self.buf,
        };

        backing.get(piece.range.clone()).unwrap_or_default()
    }

    fn piece_at(&self, idx: usize) -> Result<&crate::piece_table::piece::Piece, crate::enums::MathError> {
        self.pieces.get(idx).ok_or(crate::enums::MathError::OutOfBounds {
            index: idx,
            len: self.pieces.len(),
        })
    }
}

/*

====================================
========= PIECE LOOKUP =============
====================================

*/

impl PieceTable {
    /// Maps a 0-based linear offset to the piece holding that byte.
    ///
    /// Linear scan over the pieces. `pos == len()` is reported as
    /// [`PiecePosition::End`].
    pub fn find_piece_at(&self, pos: usize) -> Result<PiecePosition, crate::enums::MathError> {
        let mut remaining = pos;

        for (idx, piece) in self.pieces.iter().enumerate() {
            let piece_len = piece.len();

            if remaining < piece_len {
                return Ok(PiecePosition::Within {
                    idx,
                    offset: remaining,
                });
            }

            remaining.sub_assign(piece_len);
        }

        if remaining == 0 {
            return Ok(PiecePosition::End);
        }

        Err(crate::enums::MathError::OutOfBounds {
            index: pos,
            len: self.len(),
        })
    }
}

/*

=====================================
======== STRUCTURAL EDITING =========
=====================================

*/

impl PieceTable {
    /// Appends one byte to the add buffer and returns its offset there.
    pub fn append(&mut self, byte: u8) -> usize {
        self.buf.push(byte);

        self.buf.len() - 1
    }

    /// Replaces piece `idx` by two contiguous pieces of lengths `offset`
    /// and `len - offset`.
    ///
    /// `offset` must fall strictly inside the piece; a split that would
    /// leave an empty half is rejected.
    pub fn split_piece(&mut self, idx: usize, offset: usize) -> Result<(), crate::enums::MathError> {
        let piece = self.piece_at(idx)?.clone();

        if offset == 0 || offset >= piece.len() {
            return Err(crate::enums::MathError::OutOfBounds {
                index: offset,
                len: piece.len(),
            });
        }

        let mid = piece.range.start + offset;

        self.pieces.splice(
            idx..=idx,
            [
                crate::piece_table::piece::Piece {
                    buf_kind: piece.buf_kind,
                    range: piece.range.start..mid,
                },
                crate::piece_table::piece::Piece {
                    buf_kind: piece.buf_kind,
                    range: mid..piece.range.end,
                },
            ],
        );

        Ok(())
    }

    pub fn insert_piece_after(
        &mut self,
        idx: usize,
        piece: crate::piece_table::piece::Piece,
    ) -> Result<(), crate::enums::MathError> {
        self.piece_at(idx)?;
        debug_assert!(!piece.is_empty(), "empty pieces must never enter the table");

        self.pieces.insert(idx + 1, piece);

        Ok(())
    }

    pub fn insert_piece_front(&mut self, piece: crate::piece_table::piece::Piece) {
        debug_assert!(!piece.is_empty(), "empty pieces must never enter the table");

        self.pieces.insert(0, piece);
    }

    pub fn push_piece(&mut self, piece: crate::piece_table::piece::Piece) {
        debug_assert!(!piece.is_empty(), "empty pieces must never enter the table");

        self.pieces.push(piece);
    }

    /// Grows add piece `idx` by one byte when the byte at `add_offset` in
    /// the add buffer directly continues it. Returns whether it did.
    pub fn try_extend(&mut self, idx: usize, add_offset: usize) -> bool {
        if let Some(prev) = self.pieces.get_mut(idx)
            && prev.buf_kind == crate::enums::BufferKind::Add
            && prev.range.end == add_offset
        {
            prev.range.end += 1;

            return true;
        }

        false
    }

    /// Drops one byte from the start or the end of piece `idx`, removing the
    /// piece once it is empty. Returns the dropped byte.
    pub fn shrink_or_remove(
        &mut self,
        idx: usize,
        from_end: bool,
    ) -> Result<u8, crate::enums::MathError> {
        let piece = self.piece_at(idx)?.clone();
        let at = if from_end { piece.len().saturating_sub(1) } else { 0 };
        let removed = self
            .byte_at(&piece, at)
            .ok_or(crate::enums::MathError::OutOfBounds {
                index: at,
                len: piece.len(),
            })?;

        if piece.len() == 1 {
            self.pieces.remove(idx);
        } else if from_end {
            self.pieces[idx].range.end -= 1;
        } else {
            self.pieces[idx].range.start += 1;
        }

        Ok(removed)
    }
}

/*

====================================
============ READ PATH =============
====================================

*/

impl PieceTable {
    pub fn get_bytes_at(
        &self,
        mut pos: usize,
        mut len: usize,
    ) -> Result<Vec<u8>, crate::enums::MathError> {
        let total = self.len();
        let end = pos.checked_add(len).ok_or(crate::enums::MathError::Overflow)?;

        if end > total {
            return Err(crate::enums::MathError::OutOfBounds { index: end, len: total });
        }

        let mut res = Vec::with_capacity(len);

        for piece in &self.pieces {
            if len == 0 {
                break;
            }

            let piece_len = piece.len();

            if pos >= piece_len {
                pos.sub_assign(piece_len);

                continue;
            }

            let take = (piece_len - pos).min(len);

            res.extend_from_slice(&self.slice_of(piece)[pos..pos + take]);
            len.sub_assign(take);
            pos = 0;
        }

        Ok(res)
    }

    /// Byte `i` of `piece`, counted from the piece's start.
    #[inline]
    pub fn byte_at(&self, piece: &crate::piece_table::piece::Piece, i: usize) -> Option<u8> {
        self.slice_of(piece).get(i).copied()
    }

    /// Returns an iterator that yields sequential zero-copy byte slices,
    /// one per piece, representing the fully evaluated document.
    pub fn iter_bytes(&self) -> impl Iterator<Item = &[u8]> + '_ {
        self.pieces.iter().map(move |piece| self.slice_of(piece))
    }

    /// One line per piece with its buffer, range and bytes, for trace logs.
    pub fn dump(&self) -> String {
        self.pieces
            .iter()
            .enumerate()
            .map(|(idx, piece)| {
                format!(
                    "{idx}: {:?} {:?} {:?}",
                    piece.buf_kind,
                    piece.range,
                    String::from_utf8_lossy(self.slice_of(piece))
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.len());

        for chunk in self.iter_bytes() {
            bytes.extend_from_slice(chunk);
        }

        bytes
    }
}

#[cfg(test)]
mod piece_table_tests {
    use super::{PiecePosition, PieceTable};
    use crate::enums::{BufferKind, MathError};
    use crate::piece_table::piece::Piece;
    use std::io::Write;

    fn pt_from_str(s: &str) -> PieceTable {
        PieceTable::new(io::original::OriginalBuffer::from_bytes(s.as_bytes().to_vec()))
    }

    #[test]
    fn new_len_matches_original() {
        let pt = pt_from_str("hello");

        assert_eq!(pt.len(), 5);
        assert_eq!(pt.piece_count(), 1);
        assert_eq!(pt.pieces()[0], Piece::new(BufferKind::Original, 0, 5));
    }

    #[test]
    fn new_from_empty_file_has_no_pieces() {
        let pt = pt_from_str("");

        assert!(pt.is_empty());
        assert_eq!(pt.len(), 0);
        assert!(pt.add_buffer().is_empty());
    }

    #[test]
    fn new_from_mapped_file() {
        let mut temp_file = tempfile::NamedTempFile::new().expect("could not create temp file");

        write!(temp_file, "mapped\ntext").expect("could not write");
        temp_file.as_file().sync_all().unwrap();

        let original = io::original::OriginalBuffer::load(temp_file.path()).unwrap();
        let pt = PieceTable::new(original);

        assert_eq!(pt.to_bytes(), b"mapped\ntext");
    }

    #[test]
    fn find_piece_at_walks_boundaries() {
        let mut pt = pt_from_str("abcd");

        pt.split_piece(0, 2).unwrap();

        assert_eq!(pt.find_piece_at(0), Ok(PiecePosition::Within { idx: 0, offset: 0 }));
        assert_eq!(pt.find_piece_at(1), Ok(PiecePosition::Within { idx: 0, offset: 1 }));
        // A boundary resolves to the start of the following piece.
        assert_eq!(pt.find_piece_at(2), Ok(PiecePosition::Within { idx: 1, offset: 0 }));
        assert_eq!(pt.find_piece_at(3), Ok(PiecePosition::Within { idx: 1, offset: 1 }));
        assert_eq!(pt.find_piece_at(4), Ok(PiecePosition::End));
        assert_eq!(
            pt.find_piece_at(5),
            Err(MathError::OutOfBounds { index: 5, len: 4 })
        );
    }

    #[test]
    fn find_piece_at_on_empty_table() {
        let pt = pt_from_str("");

        assert_eq!(pt.find_piece_at(0), Ok(PiecePosition::End));
        assert!(pt.find_piece_at(1).is_err());
    }

    #[test]
    fn split_piece_keeps_content_and_source() {
        let mut pt = pt_from_str("hello");

        pt.split_piece(0, 2).unwrap();

        assert_eq!(
            pt.pieces(),
            &[
                Piece::new(BufferKind::Original, 0, 2),
                Piece::new(BufferKind::Original, 2, 3),
            ]
        );
        assert_eq!(pt.to_bytes(), b"hello");
    }

    #[test]
    fn split_piece_rejects_empty_halves() {
        let mut pt = pt_from_str("hello");

        assert!(pt.split_piece(0, 0).is_err());
        assert!(pt.split_piece(0, 5).is_err());
        assert!(pt.split_piece(1, 1).is_err());
        assert_eq!(pt.piece_count(), 1);
    }

    #[test]
    fn insert_piece_front_and_after() {
        let mut pt = pt_from_str("bd");

        let a = pt.append(b'a');
        pt.insert_piece_front(Piece::added(a));

        pt.split_piece(1, 1).unwrap();

        let c = pt.append(b'c');
        pt.insert_piece_after(1, Piece::added(c)).unwrap();

        let e = pt.append(b'e');
        pt.push_piece(Piece::added(e));

        assert_eq!(pt.to_bytes(), b"abcde");
        assert_eq!(pt.add_buffer(), b"ace");
        assert!(pt.insert_piece_after(10, Piece::added(0)).is_err());
    }

    #[test]
    fn try_extend_only_contiguous_add_pieces() {
        let mut pt = pt_from_str("xy");

        let first = pt.append(b'1');
        pt.push_piece(Piece::added(first));

        let second = pt.append(b'2');
        assert!(pt.try_extend(1, second), "contiguous add piece must grow");
        assert_eq!(pt.pieces()[1], Piece::new(BufferKind::Add, 0, 2));

        let third = pt.append(b'3');
        assert!(!pt.try_extend(0, third), "original pieces never grow");
        assert!(!pt.try_extend(1, third + 1), "gaps in the add buffer must not be bridged");
        assert!(!pt.try_extend(7, third));
        assert_eq!(pt.to_bytes(), b"xy12");
    }

    #[test]
    fn shrink_or_remove_both_ends() {
        let mut pt = pt_from_str("abc");

        assert_eq!(pt.shrink_or_remove(0, true), Ok(b'c'));
        assert_eq!(pt.to_bytes(), b"ab");
        assert_eq!(pt.shrink_or_remove(0, false), Ok(b'a'));
        assert_eq!(pt.to_bytes(), b"b");
        assert_eq!(pt.pieces()[0].range, 1..2);

        assert_eq!(pt.shrink_or_remove(0, true), Ok(b'b'));
        assert!(pt.is_empty(), "a piece shrunk to zero must be removed");
        assert!(pt.shrink_or_remove(0, true).is_err());
    }

    #[test]
    fn get_bytes_at_across_pieces() {
        let mut pt = pt_from_str("Hello world");

        pt.split_piece(0, 6).unwrap();

        for (i, &b) in b"big ".iter().enumerate() {
            let offset = pt.append(b);

            if i == 0 {
                pt.insert_piece_after(0, Piece::added(offset)).unwrap();
            } else {
                assert!(pt.try_extend(1, offset));
            }
        }

        assert_eq!(pt.to_bytes(), b"Hello big world");
        assert_eq!(pt.get_bytes_at(4, 6).unwrap(), b"o big ");
        assert_eq!(pt.get_bytes_at(15, 0).unwrap(), b"");
        assert!(pt.get_bytes_at(10, 6).is_err());
    }

    #[test]
    fn iter_bytes_one_slice_per_piece() {
        let mut pt = pt_from_str("ab");

        pt.split_piece(0, 1).unwrap();

        let chunks: Vec<&[u8]> = pt.iter_bytes().collect();

        assert_eq!(chunks, vec![&b"a"[..], &b"b"[..]]);
        assert_eq!(pt.byte_at(&pt.pieces()[1], 0), Some(b'b'));
        assert_eq!(pt.byte_at(&pt.pieces()[1], 1), None);
    }

    #[test]
    fn dump_lists_every_piece() {
        let mut pt = pt_from_str("ab");

        pt.split_piece(0, 1).unwrap();

        let nl = pt.append(b'\n');
        pt.insert_piece_after(0, Piece::added(nl)).unwrap();

        assert_eq!(
            pt.dump(),
            "0: Original 0..1 \"a\"\n1: Add 0..1 \"\\n\"\n2: Original 1..2 \"b\""
        );
        assert_eq!(pt_from_str("").dump(), "");
    }

    #[test]
    fn iter_bytes_empty_document() {
        let pt = pt_from_str("");

        let bytes = pt.iter_bytes().flatten().copied().collect::<Vec<u8>>();

        assert!(
            bytes.is_empty(),
            "Iterating an empty document should yield 0 bytes"
        );
    }
}
