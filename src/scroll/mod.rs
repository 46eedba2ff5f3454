//! Horizontal drag and fling tracking for the icon grid.

mod pointer;
mod reducer;
mod state;
mod velocity;

pub use pointer::{PointerEvent, PointerKind};
pub use reducer::{DEFAULT_MAX_FLING_VELOCITY, GesturePhase, ScrollGestureReducer};
pub use state::{FlingPlan, ScrollState, SharedScrollState};
