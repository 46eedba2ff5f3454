//! Keyboard event handling.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::App;
use crate::scroll::PointerEvent;

use super::Action;

/// Handle keyboard events and return the appropriate action.
pub fn handle_key_event(app: &App, key: KeyEvent, now_ms: u64) -> Action {
    let dragging = app.reducer.is_dragging();

    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Action::Quit,

        // Esc aborts a running drag first; a second Esc quits
        KeyCode::Esc if dragging => Action::Pointer {
            event: PointerEvent::cancel(app.last_pointer_x, now_ms),
            cell: app.last_pointer_cell,
        },
        KeyCode::Esc | KeyCode::Char('q') => Action::Quit,

        _ => Action::None,
    }
}
