/// One open file plus the modal state used to edit it.
#[derive(Debug, Default)]
pub struct Document {
    pub text_buffer: editor_core::text::TextBuffer,
    mode: crate::input::Mode,
}

impl Document {
    pub fn new(text_buffer: editor_core::text::TextBuffer) -> Self {
        Self {
            text_buffer,
            mode: crate::input::Mode::Normal,
        }
    }

    /// Opens `path` as the document's original buffer.
    pub fn open(
        path: impl AsRef<std::path::Path>,
    ) -> editor_core::errors::TextBufferResult<Self> {
        Ok(Self::new(editor_core::text::TextBuffer::open(path)?))
    }

    #[inline]
    pub fn mode(&self) -> crate::input::Mode {
        self.mode
    }

    #[inline]
    pub fn cursor(&self) -> editor_core::cursor::Position {
        self.text_buffer.cursor()
    }
}

impl Document {
    /// Applies one key press according to the current mode.
    ///
    /// # Errors
    ///
    /// Propagates failures of the edit or save the key triggered. The
    /// document is left as it was before the failing key.
    pub fn handle_key(
        &mut self,
        key: crate::input::Key,
    ) -> editor_core::errors::TextBufferResult<crate::input::Flow> {
        if key == crate::input::Key::Save {
            self.text_buffer.save()?;

            return Ok(crate::input::Flow::Continue);
        }

        match self.mode {
            crate::input::Mode::Normal => Ok(self.handle_normal(key)),
            crate::input::Mode::Insert => {
                self.handle_insert(key)?;

                Ok(crate::input::Flow::Continue)
            }
        }
    }

    fn handle_normal(&mut self, key: crate::input::Key) -> crate::input::Flow {
        let crate::input::Key::Char(byte) = key else {
            return crate::input::Flow::Continue;
        };

        match byte {
            b'q' => {
                if self.text_buffer.is_dirty() {
                    tracing::warn!("quitting with unsaved changes");
                }

                return crate::input::Flow::Quit;
            }
            b'i' => self.mode = crate::input::Mode::Insert,
            _ => {
                if let Some(motion) = editor_core::cursor::Motion::from_key(byte) {
                    self.text_buffer.move_cursor(motion);
                }
            }
        }

        crate::input::Flow::Continue
    }

    fn handle_insert(
        &mut self,
        key: crate::input::Key,
    ) -> editor_core::errors::TextBufferResult<()> {
        match key {
            crate::input::Key::Esc => {
                self.text_buffer.stamp_last_edit();
                self.mode = crate::input::Mode::Normal;
            }
            crate::input::Key::Backspace => self.text_buffer.delete_char()?,
            crate::input::Key::Enter => self.text_buffer.insert_char(b'\n')?,
            crate::input::Key::Char(byte) if crate::input::is_insertable(byte) => {
                self.text_buffer.insert_char(byte)?;
            }
            crate::input::Key::Char(_) | crate::input::Key::Save => {}
        }

        Ok(())
    }
}
