use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Decodes a terminal key event into an editor key.
///
/// Non-ASCII characters, key releases and keys the editor has no use for
/// map to `None`.
pub fn translate(event: KeyEvent) -> Option<editor_state::input::Key> {
    if event.kind == KeyEventKind::Release {
        return None;
    }

    let ctrl = event.modifiers.contains(KeyModifiers::CONTROL);

    match event.code {
        KeyCode::Char('s') if ctrl => Some(editor_state::input::Key::Save),
        KeyCode::Char(_) if ctrl => None,
        KeyCode::Char(c) => u8::try_from(c)
            .ok()
            .filter(u8::is_ascii)
            .map(editor_state::input::Key::Char),
        KeyCode::Tab => Some(editor_state::input::Key::Char(b'\t')),
        KeyCode::Enter => Some(editor_state::input::Key::Enter),
        KeyCode::Backspace => Some(editor_state::input::Key::Backspace),
        KeyCode::Esc => Some(editor_state::input::Key::Esc),
        _ => None,
    }
}
