/// Represents a specific location in the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Position {
    pub row: usize,
    /// The byte offset within the line.
    pub col: usize,
}

impl Position {
    #[must_use]
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// True at the absolute start of the document.
    #[inline]
    #[must_use]
    pub fn is_origin(&self) -> bool {
        self.row == 0 && self.col == 0
    }

    /// Applies one vi-style movement, clamping to the document's lines.
    #[must_use]
    pub fn moved(self, motion: Motion, lines: &crate::line_index::LineIndex) -> Self {
        let line_count = lines.line_count();
        let clamp = |row: usize, col: usize| Self::new(row, col.min(lines.line_len(row).unwrap_or(0)));

        match motion {
            Motion::Left => Self::new(self.row, self.col.saturating_sub(1)),
            Motion::Right => {
                if self.col < lines.line_len(self.row).unwrap_or(0) {
                    Self::new(self.row, self.col + 1)
                } else {
                    self
                }
            }
            Motion::Down if self.row + 1 < line_count => clamp(self.row + 1, self.col),
            Motion::Up if self.row > 0 => clamp(self.row - 1, self.col),
            Motion::Down | Motion::Up => self,
        }
    }
}

/// The four movement keys of normal mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Motion {
    Left,
    Down,
    Up,
    Right,
}

impl Motion {
    #[must_use]
    pub fn from_key(key: u8) -> Option<Self> {
        match key {
            b'h' => Some(Motion::Left),
            b'j' => Some(Motion::Down),
            b'k' => Some(Motion::Up),
            b'l' => Some(Motion::Right),
            _ => None,
        }
    }
}

/// The most recent edit and where the cursor ended up after it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LastEdit {
    pub action: crate::enums::EditAction,
    pub position: Position,
}
