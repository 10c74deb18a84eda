/// On-screen cursor cell, relative to the top-left of the text area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WinPosition {
    pub win_row: usize,
    pub win_col: usize,
}

/// The visible window onto the document.
///
/// Lines longer than the text width wrap onto extra screen rows. The view
/// always starts at the top of a logical line, so scrolling moves by whole
/// lines no matter how many rows they wrap to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Viewport {
    pub rows: usize,
    pub cols: usize,
    pub gutter_width: usize,
    pub first_visible_line: usize,
}

impl Viewport {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            gutter_width: crate::GUTTER_WIDTH,
            first_visible_line: 0,
        }
    }

    /// Adopts a new terminal size. The next [`Viewport::follow`] brings the
    /// cursor back into view.
    pub fn resize(&mut self, rows: usize, cols: usize) {
        self.rows = rows;
        self.cols = cols;
    }

    /// Columns available for text, right of the gutter.
    #[inline]
    pub fn text_width(&self) -> usize {
        self.cols.saturating_sub(self.gutter_width).max(1)
    }

    /// Rows available for text, above the status line.
    #[inline]
    pub fn text_rows(&self) -> usize {
        self.rows.saturating_sub(crate::STATUS_ROWS).max(1)
    }

    /// Screen rows taken by a line of `len` bytes.
    #[inline]
    pub fn wrapped_rows(&self, len: usize) -> usize {
        len / self.text_width() + 1
    }

    /// Where `cursor` appears on screen with the current first visible line.
    pub fn win_position(
        &self,
        lines: &editor_core::line_index::LineIndex,
        cursor: editor_core::cursor::Position,
    ) -> WinPosition {
        let width = self.text_width();
        let rows_above: usize = (self.first_visible_line..cursor.row)
            .map(|row| self.wrapped_rows(lines.line_len(row).unwrap_or(0)))
            .sum();

        WinPosition {
            win_row: rows_above + cursor.col / width,
            win_col: cursor.col % width,
        }
    }

    /// Scrolls so the cursor sits within [`crate::SCROLL_BAND`] rows of the
    /// middle of the text area, then returns its screen cell.
    ///
    /// The view never starts inside a line. When the cursor's own line wraps
    /// to more rows than the text area holds, the returned `win_row` can lie
    /// below the last text row and the caller has to clamp it.
    pub fn follow(
        &mut self,
        lines: &editor_core::line_index::LineIndex,
        cursor: editor_core::cursor::Position,
    ) -> WinPosition {
        let last_line = lines.line_count().saturating_sub(1);

        if cursor.row < self.first_visible_line {
            self.first_visible_line = cursor.row;
        }
        self.first_visible_line = self.first_visible_line.min(last_line);

        let mid = self.text_rows() / 2;
        let lower = (mid + crate::SCROLL_BAND).min(self.text_rows() - 1);
        let upper = mid.saturating_sub(crate::SCROLL_BAND);
        let mut win = self.win_position(lines, cursor);

        while win.win_row > lower && self.first_visible_line < cursor.row {
            let top_rows = self.wrapped_rows(lines.line_len(self.first_visible_line).unwrap_or(0));

            self.first_visible_line += 1;
            win.win_row -= top_rows;
        }

        while win.win_row < upper && self.first_visible_line > 0 {
            let above = self.first_visible_line - 1;
            let above_rows = self.wrapped_rows(lines.line_len(above).unwrap_or(0));

            // A tall line above must not push the cursor out the bottom.
            if win.win_row + above_rows > lower {
                break;
            }

            self.first_visible_line = above;
            win.win_row += above_rows;
        }

        win
    }
}
