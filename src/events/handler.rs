//! Central event handler that coordinates keyboard, mouse, and focus events.

use crossterm::event::{Event, KeyEventKind};

use crate::app::App;
use crate::scroll::PointerEvent;

use super::Action;
use super::keyboard::handle_key_event;
use super::mouse::handle_mouse_event;

/// Central event handler for the application.
pub struct EventHandler;

impl EventHandler {
    /// Handle a crossterm event and return an action.
    ///
    /// `now_ms` stamps pointer callbacks; terminals don't report event times.
    pub fn handle_event(app: &App, event: &Event, now_ms: u64) -> Action {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                handle_key_event(app, *key, now_ms)
            }
            Event::Mouse(mouse) => handle_mouse_event(app, *mouse, now_ms),
            // Losing focus mid-drag means the release will never arrive
            Event::FocusLost if app.reducer.is_dragging() => Action::Pointer {
                event: PointerEvent::cancel(app.last_pointer_x, now_ms),
                cell: app.last_pointer_cell,
            },
            _ => Action::None,
        }
    }
}
