//! The scroll record shared between the gesture reducer and the renderer.
//!
//! Reads and writes go through a single lock so the renderer, which runs on
//! its own task, always sees a whole record. Each field has one writer:
//!
//! | Field | Writer |
//! |---|---|
//! | `icon_count` | icon catalog |
//! | `scroll_x` | reducer while dragging, renderer while a fling runs |
//! | `current_scroll_x` | reducer |
//! | `fling_time_ms`, `fling_velocity_x` | reducer, at release |
//! | `adjusted_deceleration` | renderer (reducer resets it on start) |
//! | `fling_duration`, `fling_end_pos` | renderer |

use std::sync::Arc;

use parking_lot::RwLock;
use serde::Serialize;

/// Snapshot of the scroll record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrollState {
    pub icon_count: usize,
    pub scroll_x: i32,
    pub current_scroll_x: i32,
    pub fling_time_ms: u64,
    pub fling_velocity_x: i32,
    pub adjusted_deceleration: i32,
    pub fling_duration: i32,
    pub fling_end_pos: i32,
}

impl ScrollState {
    /// Whether a released fling is waiting to be integrated.
    pub fn has_fling(&self) -> bool {
        self.fling_velocity_x != 0
    }
}

/// Fling parameters computed by the renderer for one release.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlingPlan {
    pub adjusted_deceleration: i32,
    pub duration_ms: i32,
    pub end_pos: i32,
}

/// Handle to the lock-guarded scroll record.
///
/// Cloning yields another handle to the same record.
#[derive(Debug, Clone, Default)]
pub struct SharedScrollState {
    inner: Arc<RwLock<ScrollState>>,
}

impl SharedScrollState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_state(state: ScrollState) -> Self {
        Self {
            inner: Arc::new(RwLock::new(state)),
        }
    }

    /// Consistent copy of the whole record.
    pub fn snapshot(&self) -> ScrollState {
        *self.inner.read()
    }

    /// Read-modify-write under the write lock.
    pub(crate) fn update<R>(&self, f: impl FnOnce(&mut ScrollState) -> R) -> R {
        let mut guard = self.inner.write();
        f(&mut guard)
    }

    pub fn set_icon_count(&self, count: usize) {
        self.inner.write().icon_count = count;
    }

    /// Store the renderer's plan for the fling released at `fling_time_ms`.
    ///
    /// Returns `false` without writing if that fling is no longer current,
    /// i.e. a new gesture started or another release replaced it.
    pub fn publish_fling_plan(&self, fling_time_ms: u64, plan: FlingPlan) -> bool {
        let mut state = self.inner.write();
        if state.fling_time_ms != fling_time_ms || !state.has_fling() {
            return false;
        }
        state.adjusted_deceleration = plan.adjusted_deceleration;
        state.fling_duration = plan.duration_ms;
        state.fling_end_pos = plan.end_pos;
        true
    }

    /// Move `scroll_x` along the fling released at `fling_time_ms`.
    ///
    /// Same staleness rule as [`publish_fling_plan`](Self::publish_fling_plan):
    /// once a new gesture has started the drag owns `scroll_x` again.
    pub fn advance_fling(&self, fling_time_ms: u64, position: i32) -> bool {
        let mut state = self.inner.write();
        if state.fling_time_ms != fling_time_ms || !state.has_fling() {
            return false;
        }
        state.scroll_x = position;
        true
    }
}
