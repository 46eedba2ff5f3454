//! Event handling module for keyboard, mouse, and focus events.
//!
//! Terminal events are translated into Actions; the App applies them.

mod action;
mod handler;
mod keyboard;
mod mouse;

pub use action::{Action, CellPosition};
pub use handler::EventHandler;
