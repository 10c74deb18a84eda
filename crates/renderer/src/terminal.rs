use crossterm::tty::IsTty;
use std::io::Write;

/// Raw-mode, alternate-screen ownership of the terminal.
///
/// Dropping the session restores the terminal, on normal exit, on error
/// returns, and while unwinding from a panic.
pub struct TerminalSession {
    out: std::io::Stdout,
}

impl TerminalSession {
    /// Takes over the terminal.
    ///
    /// # Errors
    ///
    /// Fails when stdout is not a terminal or raw mode cannot be enabled.
    pub fn acquire() -> std::io::Result<Self> {
        let mut out = std::io::stdout();

        if !out.is_tty() {
            return Err(std::io::Error::other("stdout is not a terminal"));
        }

        crossterm::terminal::enable_raw_mode()?;

        // From here on the guard exists, so a failure below still restores.
        let mut session = Self { out };

        crossterm::execute!(
            session.out,
            crossterm::terminal::EnterAlternateScreen,
            crossterm::terminal::Clear(crossterm::terminal::ClearType::All)
        )?;

        tracing::info!("terminal session started");

        Ok(session)
    }

    /// Current size as (rows, cols).
    pub fn size(&self) -> std::io::Result<(usize, usize)> {
        let (cols, rows) = crossterm::terminal::size()?;

        Ok((usize::from(rows), usize::from(cols)))
    }

    /// Draws every row of `frame`, then places the cursor.
    pub fn paint(&mut self, frame: &crate::frame::Frame) -> std::io::Result<()> {
        crossterm::queue!(self.out, crossterm::cursor::Hide)?;

        for (row, text) in frame.rows.iter().enumerate() {
            crossterm::queue!(
                self.out,
                crossterm::cursor::MoveTo(0, u16::try_from(row).unwrap_or(u16::MAX)),
                crossterm::terminal::Clear(crossterm::terminal::ClearType::CurrentLine),
                crossterm::style::Print(text)
            )?;
        }

        let (col, row) = frame.cursor;

        crossterm::queue!(
            self.out,
            crossterm::cursor::MoveTo(col, row),
            crossterm::cursor::Show
        )?;

        self.out.flush()
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let restored = crossterm::execute!(
            self.out,
            crossterm::cursor::Show,
            crossterm::terminal::LeaveAlternateScreen
        )
        .and_then(|()| crossterm::terminal::disable_raw_mode());

        if let Err(err) = restored {
            tracing::error!(%err, "failed to restore terminal");
        } else {
            tracing::info!("terminal session ended");
        }
    }
}
