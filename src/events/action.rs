//! Action enum for decoupling input handling from state changes.
//!
//! Actions represent user intents that can be logged, replayed, or customized.

use crate::scroll::PointerEvent;

/// Terminal cell a pointer action happened in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellPosition {
    pub column: u16,
    pub row: u16,
}

/// Actions that can be dispatched from event handlers.
///
/// These represent user intents and are processed by the App to update state.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Nothing to do
    None,
    /// Quit the application
    Quit,

    // === Gestures ===
    /// Feed one pointer callback to the scroll reducer
    Pointer {
        event: PointerEvent,
        cell: CellPosition,
    },
    /// Press arrived while a drag was still open (its release was lost);
    /// cancel the stale drag, then start a new one
    RestartDrag {
        event: PointerEvent,
        cell: CellPosition,
    },
}
