//! Mouse event handling.
//!
//! Left-button presses, drags and releases become pointer callbacks for the
//! scroll reducer. Only presses inside the grid start a gesture; once one is
//! running, drags that leave the grid are reported as `Outside`.

use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};

use crate::app::App;
use crate::scroll::PointerEvent;

use super::{Action, CellPosition};

/// Handle mouse events and return the appropriate action.
pub fn handle_mouse_event(app: &App, mouse: MouseEvent, now_ms: u64) -> Action {
    let cell = CellPosition {
        column: mouse.column,
        row: mouse.row,
    };
    let x = app.column_to_px(mouse.column);
    let dragging = app.reducer.is_dragging();
    let inside = app.grid_contains(cell);

    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) if dragging => Action::RestartDrag {
            event: PointerEvent::start(x, now_ms),
            cell,
        },
        MouseEventKind::Down(MouseButton::Left) if inside => Action::Pointer {
            event: PointerEvent::start(x, now_ms),
            cell,
        },
        MouseEventKind::Drag(MouseButton::Left) if dragging => {
            let event = if inside {
                PointerEvent::moved(x, now_ms)
            } else {
                PointerEvent::outside(x, now_ms)
            };
            Action::Pointer { event, cell }
        }
        MouseEventKind::Up(MouseButton::Left) if dragging => Action::Pointer {
            event: PointerEvent::up(x, now_ms),
            cell,
        },
        // Wheel and trackball-style input is not part of the gesture model
        _ => Action::None,
    }
}
