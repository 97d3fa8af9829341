use crate::app::App;
use crate::state::navigation::NavInput;
use crossterm::event::KeyCode::Char;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tui::layout::Size;

pub fn nav_input(key_event: KeyEvent) -> NavInput {
    match (key_event.code, key_event.modifiers) {
        (Char('c'), KeyModifiers::CONTROL) | (Char('q' | 'Q'), _) => NavInput::Quit,
        (KeyCode::Left, _) => NavInput::PrevPage,
        (KeyCode::Right, _) => NavInput::NextPage,
        (Char('n' | 'N'), _) => NavInput::NextBracket,
        (Char('p' | 'P'), _) => NavInput::PrevBracket,
        (KeyCode::Enter, _) => NavInput::Confirm,
        _ => NavInput::Redraw,
    }
}

/// Returns `false` once the user asked to quit.
pub fn handle_key_bindings(key_event: KeyEvent, app: &mut App, terminal_size: Size) -> bool {
    app.dismiss_warning();
    app.navigate(nav_input(key_event), terminal_size)
}
