/// # The Core Philosophies of This API
///
/// - Coordinate-Based: callers think in (row, col). The `TextBuffer` resolves
///   those through the line index into linear offsets for the piece table.
/// - Immutability for Reads: queries (`line_bytes`, `to_bytes`) take `&self`.
/// - Ownership of State: the buffer owns the piece table, the line index,
///   the cursor and the last-edit record, so they never drift out of sync.
#[derive(Debug)]
pub struct TextBuffer {
    piece_table: crate::piece_table::table::PieceTable,
    line_index: crate::line_index::LineIndex,
    cursor: crate::cursor::Position,
    last_edit: crate::cursor::LastEdit,

    /// Tracks if the buffer has unsaved changes.
    is_dirty: bool,

    /// The file path, if this buffer is tied to a file on disk.
    filepath: Option<std::path::PathBuf>,
}

/*

==================================
===== CREATION, OPEN, & SAVE =====
==================================

*/

impl TextBuffer {
    fn from_original(
        original: io::original::OriginalBuffer,
        filepath: Option<std::path::PathBuf>,
    ) -> crate::errors::TextBufferResult<Self> {
        let piece_table = crate::piece_table::table::PieceTable::new(original);
        let line_index = crate::line_index::LineIndex::build(&piece_table)?;

        Ok(Self {
            piece_table,
            line_index,
            cursor: crate::cursor::Position::default(),
            last_edit: crate::cursor::LastEdit::default(),
            is_dirty: false,
            filepath,
        })
    }

    /// Creates a new, empty scratch buffer with no file behind it.
    #[must_use]
    pub fn new() -> Self {
        Self {
            piece_table: crate::piece_table::table::PieceTable::new(
                io::original::OriginalBuffer::default(),
            ),
            line_index: crate::line_index::LineIndex::default(),
            cursor: crate::cursor::Position::default(),
            last_edit: crate::cursor::LastEdit::default(),
            is_dirty: false,
            filepath: None,
        }
    }

    /// Creates a scratch buffer whose original buffer holds `text`.
    ///
    /// # Errors
    ///
    /// Returns an error if a line of `text` is longer than the line index allows.
    pub fn new_with_text(text: &str) -> crate::errors::TextBufferResult<Self> {
        Self::from_original(
            io::original::OriginalBuffer::from_bytes(text.as_bytes().to_vec()),
            None,
        )
    }

    /// Loads a file as the original buffer and builds the initial line index.
    ///
    /// # Errors
    ///
    /// Returns an error if the path is not a readable regular file, or if one
    /// of its lines is longer than the line index allows.
    pub fn open<P: AsRef<std::path::Path>>(path: P) -> crate::errors::TextBufferResult<Self> {
        let path_buf = path.as_ref().to_path_buf();
        let original = io::original::OriginalBuffer::load(&path_buf)?;
        let text_buffer = Self::from_original(original, Some(path_buf))?;

        tracing::info!(
            lines = text_buffer.line_count(),
            bytes = text_buffer.byte_length(),
            "opened buffer"
        );

        Ok(text_buffer)
    }

    /// Writes the evaluated document to its file.
    ///
    /// Saving only reads the table: pieces, add buffer and cursor are left
    /// exactly as they were.
    ///
    /// # Errors
    ///
    /// Returns [`crate::errors::TextBufferError::NoFilePath`] for scratch
    /// buffers, or the I/O failure of the atomic write.
    pub fn save(&mut self) -> crate::errors::TextBufferResult<usize> {
        let filepath = self
            .filepath
            .as_deref()
            .ok_or(crate::errors::TextBufferError::NoFilePath)?;
        let written = io::save::write_atomic(filepath, self.piece_table.iter_bytes())?;

        self.is_dirty = false;

        Ok(written)
    }

    /// Saves the buffer to a new file path, which becomes its path.
    ///
    /// # Errors
    ///
    /// Returns an error if the new destination cannot be written.
    pub fn save_as<P: AsRef<std::path::Path>>(
        &mut self,
        path: P,
    ) -> crate::errors::TextBufferResult<usize> {
        self.filepath = Some(path.as_ref().to_path_buf());

        self.save()
    }
}

impl Default for TextBuffer {
    fn default() -> Self {
        Self::new()
    }
}

/*

==========================
===== INLINE METHODS =====
==========================

*/

impl TextBuffer {
    /// Returns the total number of lines in the buffer.
    #[inline]
    pub fn line_count(&self) -> usize {
        self.line_index.line_count()
    }

    /// Returns the total byte size of the document.
    #[inline]
    pub fn byte_length(&self) -> usize {
        self.piece_table.len()
    }

    #[inline]
    pub fn is_dirty(&self) -> bool {
        self.is_dirty
    }

    #[inline]
    pub fn path(&self) -> Option<&std::path::Path> {
        self.filepath.as_deref()
    }

    #[inline]
    pub fn cursor(&self) -> crate::cursor::Position {
        self.cursor
    }

    #[inline]
    pub fn last_edit(&self) -> crate::cursor::LastEdit {
        self.last_edit
    }

    #[inline]
    pub fn piece_table(&self) -> &crate::piece_table::table::PieceTable {
        &self.piece_table
    }

    #[inline]
    pub fn line_index(&self) -> &crate::line_index::LineIndex {
        &self.line_index
    }
}

/*

===========================
========= GETTERS =========
===========================

*/

impl TextBuffer {
    /// Fetches the bytes of a single line, without its newline.
    pub fn line_bytes(&self, row: usize) -> Option<Vec<u8>> {
        let start = self.line_index.line_start(row)?;
        let len = self.line_index.line_len(row)?;

        self.piece_table.get_bytes_at(start, len).ok()
    }

    /// The full document, materialised from the pieces.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.piece_table.to_bytes()
    }
}

/*

========================================
========= CURSOR & MOVEMENT ============
========================================

*/

impl TextBuffer {
    /// Places the cursor, which must lie inside the document.
    pub fn set_cursor(
        &mut self,
        pos: crate::cursor::Position,
    ) -> Result<(), crate::enums::MathError> {
        self.line_index.offset_of(pos)?;
        self.cursor = pos;

        Ok(())
    }

    pub fn move_cursor(&mut self, motion: crate::cursor::Motion) {
        self.cursor = self.cursor.moved(motion, &self.line_index);
    }

    /// Marks the current cursor as the last edit position, keeping the
    /// action. Leaving insert mode does this so that typing resumes into
    /// the same piece.
    pub fn stamp_last_edit(&mut self) {
        self.last_edit.position = self.cursor;
    }
}

/*

========================================
========= INSERTION & DELETION =========
========================================

*/

impl TextBuffer {
    /// Inserts one byte at the cursor and advances it.
    ///
    /// The byte is always appended to the add buffer first. Consecutive
    /// characters typed at the position the previous insert left the cursor
    /// at extend that insert's piece instead of adding new ones.
    pub fn insert_char(&mut self, ch: u8) -> crate::errors::TextBufferResult<()> {
        let cursor = self.cursor;

        if ch != b'\n'
            && let Some(len) = self.line_index.line_len(cursor.row)
            && len >= crate::line_index::MAX_LINE_LEN
        {
            return Err(crate::errors::TextBufferError::LineTooLong {
                line: cursor.row,
                len: len + 1,
            });
        }

        let add_offset = self.piece_table.append(ch);
        let at_doc_end = cursor == self.line_index.end_position();
        let last_was_insert = self.last_edit.action == crate::enums::EditAction::Insert;

        if self.piece_table.is_empty() || (at_doc_end && !last_was_insert) {
            self.piece_table
                .push_piece(crate::piece_table::piece::Piece::added(add_offset));
        } else if cursor.is_origin() {
            self.piece_table
                .insert_piece_front(crate::piece_table::piece::Piece::added(add_offset));
        } else {
            let offset = self.line_index.offset_of(cursor)?;

            match self.piece_table.find_piece_at(offset)? {
                crate::piece_table::table::PiecePosition::End => {
                    let last = self.piece_table.piece_count() - 1;

                    self.insert_at_boundary(last, add_offset)?;
                }
                crate::piece_table::table::PiecePosition::Within { idx, offset: 0 } => {
                    let prev = idx.checked_sub(1).ok_or(crate::enums::MathError::Overflow)?;

                    self.insert_at_boundary(prev, add_offset)?;
                }
                crate::piece_table::table::PiecePosition::Within { idx, offset } => {
                    self.piece_table.split_piece(idx, offset)?;
                    self.piece_table.insert_piece_after(
                        idx,
                        crate::piece_table::piece::Piece::added(add_offset),
                    )?;
                }
            }
        }

        if ch == b'\n' {
            self.cursor = crate::cursor::Position::new(cursor.row + 1, 0);
            self.line_index = crate::line_index::LineIndex::build(&self.piece_table)?;
        } else {
            self.line_index.grow_line(cursor.row)?;
            self.cursor = crate::cursor::Position::new(cursor.row, cursor.col + 1);
        }

        self.last_edit = crate::cursor::LastEdit {
            action: crate::enums::EditAction::Insert,
            position: self.cursor,
        };
        self.is_dirty = true;

        tracing::debug!(
            byte = ch,
            row = self.cursor.row,
            col = self.cursor.col,
            pieces = self.piece_table.piece_count(),
            "inserted"
        );
        self.trace_state();

        Ok(())
    }

    /// Puts the freshly appended byte right after piece `prev`, growing
    /// that piece when the insert continues the previous one.
    fn insert_at_boundary(
        &mut self,
        prev: usize,
        add_offset: usize,
    ) -> Result<(), crate::enums::MathError> {
        let continues_last_insert = self.cursor == self.last_edit.position
            && self.last_edit.action == crate::enums::EditAction::Insert;

        if continues_last_insert && self.piece_table.try_extend(prev, add_offset) {
            return Ok(());
        }

        self.piece_table
            .insert_piece_after(prev, crate::piece_table::piece::Piece::added(add_offset))
    }

    /// Simulates the Backspace key: deletes the byte before the cursor.
    ///
    /// Does nothing at the start of the document. Deleting a newline joins
    /// the line with the previous one and moves the cursor to the join.
    pub fn delete_char(&mut self) -> crate::errors::TextBufferResult<()> {
        let cursor = self.cursor;

        if cursor.is_origin() || self.piece_table.is_empty() {
            return Ok(());
        }

        // At column 0 the byte before the cursor is the newline joining two lines.
        if cursor.col == 0 {
            let upper = self.line_index.line_len(cursor.row - 1).unwrap_or(0);
            let joined = upper + self.line_index.line_len(cursor.row).unwrap_or(0);

            if joined > crate::line_index::MAX_LINE_LEN {
                return Err(crate::errors::TextBufferError::LineTooLong {
                    line: cursor.row - 1,
                    len: joined,
                });
            }
        }

        let offset = self.line_index.offset_of(cursor)?;
        let removed = if offset == self.piece_table.len() {
            let last = self.piece_table.piece_count() - 1;

            self.piece_table.shrink_or_remove(last, true)?
        } else {
            self.delete_before(offset)?
        };

        if removed == b'\n' {
            self.line_index = crate::line_index::LineIndex::build(&self.piece_table)?;
            // The join point sits where the newline was.
            self.cursor = self.line_index.position_of(offset - 1)?;
        } else {
            self.line_index.shrink_line(cursor.row)?;
            self.cursor = crate::cursor::Position::new(cursor.row, cursor.col.saturating_sub(1));
        }

        self.last_edit = crate::cursor::LastEdit {
            action: crate::enums::EditAction::Delete,
            position: self.cursor,
        };
        self.is_dirty = true;

        tracing::debug!(
            byte = removed,
            row = self.cursor.row,
            col = self.cursor.col,
            pieces = self.piece_table.piece_count(),
            "deleted"
        );
        self.trace_state();

        Ok(())
    }

    fn trace_state(&self) {
        tracing::trace!(
            lines = ?self.line_index.lengths(),
            add_len = self.piece_table.add_buffer().len(),
            "pieces:\n{}",
            self.piece_table.dump()
        );
    }

    /// Removes the byte at `offset - 1` and returns it.
    fn delete_before(&mut self, offset: usize) -> Result<u8, crate::enums::MathError> {
        let target = offset
            .checked_sub(1)
            .ok_or(crate::enums::MathError::Overflow)?;

        match self.piece_table.find_piece_at(target)? {
            crate::piece_table::table::PiecePosition::Within { idx, offset }
                if offset + 1 == self.piece_table.pieces()[idx].len() =>
            {
                self.piece_table.shrink_or_remove(idx, true)
            }
            crate::piece_table::table::PiecePosition::Within { idx, offset: 0 } => {
                self.piece_table.shrink_or_remove(idx, false)
            }
            crate::piece_table::table::PiecePosition::Within { idx, offset } => {
                // Left half keeps the piece, right half starts at the victim.
                self.piece_table.split_piece(idx, offset)?;
                self.piece_table.shrink_or_remove(idx + 1, false)
            }
            crate::piece_table::table::PiecePosition::End => {
                Err(crate::enums::MathError::OutOfBounds {
                    index: target,
                    len: self.piece_table.len(),
                })
            }
        }
    }
}

impl std::fmt::Display for TextBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for chunk in self.piece_table.iter_bytes() {
            write!(f, "{}", String::from_utf8_lossy(chunk))?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod text_buffer_creation_save_tests {
    use crate::text::TextBuffer;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_textbuffer_new() {
        let buffer = TextBuffer::new();

        assert!(buffer.filepath.is_none());
        assert!(!buffer.is_dirty);
        assert_eq!(buffer.to_bytes(), b"");
        assert_eq!(buffer.line_count(), 1);
    }

    #[test]
    fn test_textbuffer_open() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(b"Hello\nfrom disk").unwrap();
        temp_file.as_file().sync_all().unwrap();
        let path = temp_file.path().to_path_buf();

        let buffer = TextBuffer::open(&path).expect("Failed to open TextBuffer");

        assert_eq!(buffer.filepath, Some(path));
        assert!(!buffer.is_dirty);
        assert_eq!(buffer.to_bytes(), b"Hello\nfrom disk");
        assert_eq!(buffer.line_index().lengths(), &[5, 9]);
    }

    #[test]
    fn test_textbuffer_open_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let result = TextBuffer::open(dir.path().join("missing.txt"));

        assert!(matches!(
            result,
            Err(crate::errors::TextBufferError::File(
                io::errors::FileError::NotFound(_)
            ))
        ));
    }

    #[test]
    fn test_textbuffer_save_without_filepath_fails() {
        let mut buffer = TextBuffer::new();

        assert!(matches!(
            buffer.save(),
            Err(crate::errors::TextBufferError::NoFilePath)
        ));
    }

    #[test]
    fn test_textbuffer_save_success_keeps_table() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(b"Original text").unwrap();
        temp_file.as_file().sync_all().unwrap();
        let path = temp_file.path().to_path_buf();

        let mut buffer = TextBuffer::open(&path).unwrap();
        buffer
            .set_cursor(crate::cursor::Position::new(0, 13))
            .unwrap();

        for &b in b" plus edits" {
            buffer.insert_char(b).unwrap();
        }

        let pieces_before = buffer.piece_table().pieces().to_vec();

        assert!(buffer.is_dirty());
        assert_eq!(buffer.save().unwrap(), 24);
        assert!(!buffer.is_dirty());
        assert_eq!(std::fs::read(&path).unwrap(), b"Original text plus edits");
        assert_eq!(
            buffer.piece_table().pieces(),
            pieces_before.as_slice(),
            "Saving must not reset the piece table"
        );

        // The mapped original still reads the bytes loaded at session start.
        assert_eq!(buffer.to_bytes(), b"Original text plus edits");
    }

    #[test]
    fn test_textbuffer_save_emptied_document_truncates() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(b"ab").unwrap();
        temp_file.as_file().sync_all().unwrap();
        let path = temp_file.path().to_path_buf();

        let mut buffer = TextBuffer::open(&path).unwrap();
        buffer.set_cursor(crate::cursor::Position::new(0, 2)).unwrap();
        buffer.delete_char().unwrap();
        buffer.delete_char().unwrap();

        assert_eq!(buffer.save().unwrap(), 0);
        assert!(std::fs::read(&path).unwrap().is_empty());
    }

    #[test]
    fn test_textbuffer_save_as() {
        let mut buffer = TextBuffer::new_with_text("scratch").unwrap();
        let target_dir = tempfile::tempdir().unwrap();
        let target_path = target_dir.path().join("my_new_file.txt");

        buffer
            .save_as(&target_path)
            .expect("save_as should succeed");

        assert_eq!(buffer.path(), Some(target_path.as_path()));
        assert_eq!(std::fs::read(&target_path).unwrap(), b"scratch");
    }
}
