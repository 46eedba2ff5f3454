//! Pointer samples fed to the gesture reducer.

use std::fmt;

/// Kind of a pointer callback within one touch interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerKind {
    /// Pointer went down; begins a gesture
    Start,
    /// Pointer moved while down
    Move,
    /// Pointer moved while down, outside the tracked bounds
    Outside,
    /// Pointer lifted
    Up,
    /// Gesture aborted by the dispatcher
    Cancel,
}

impl PointerKind {
    /// Whether this kind ends a gesture.
    pub fn is_release(self) -> bool {
        matches!(self, PointerKind::Up | PointerKind::Cancel)
    }
}

impl fmt::Display for PointerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PointerKind::Start => "start",
            PointerKind::Move => "move",
            PointerKind::Outside => "outside",
            PointerKind::Up => "up",
            PointerKind::Cancel => "cancel",
        };
        f.write_str(name)
    }
}

/// A single pointer sample.
///
/// The horizontal position is kept in whole pixels; fractional input is
/// truncated on construction so drag deltas accumulate without rounding drift.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerEvent {
    pub kind: PointerKind,
    /// Horizontal position in pixels
    pub x: i32,
    /// Event time on the monotonic clock, milliseconds
    pub time_ms: u64,
}

impl PointerEvent {
    pub fn new(kind: PointerKind, x: f32, time_ms: u64) -> Self {
        Self {
            kind,
            x: x as i32,
            time_ms,
        }
    }

    pub fn start(x: f32, time_ms: u64) -> Self {
        Self::new(PointerKind::Start, x, time_ms)
    }

    pub fn moved(x: f32, time_ms: u64) -> Self {
        Self::new(PointerKind::Move, x, time_ms)
    }

    pub fn outside(x: f32, time_ms: u64) -> Self {
        Self::new(PointerKind::Outside, x, time_ms)
    }

    pub fn up(x: f32, time_ms: u64) -> Self {
        Self::new(PointerKind::Up, x, time_ms)
    }

    pub fn cancel(x: f32, time_ms: u64) -> Self {
        Self::new(PointerKind::Cancel, x, time_ms)
    }
}
