//! Touch-to-scroll reducer.
//!
//! Turns the pointer callbacks of one touch interaction into writes on the
//! shared scroll record: a live `scroll_x` while the finger is down, and a
//! fling velocity plus start time when it lifts. Integrating the fling is the
//! renderer's job.

use std::sync::Arc;

use crate::clock::Clock;
use crate::error::{GestureError, GestureResult};
use crate::log;

use super::pointer::{PointerEvent, PointerKind};
use super::state::{ScrollState, SharedScrollState};
use super::velocity::{UNITS_PER_SECOND_MS, VelocityTracker};

/// Anchor value while no pointer is down.
const NO_ANCHOR: i32 = -10_000;

/// Default ceiling for fling velocity, pixels per second.
pub const DEFAULT_MAX_FLING_VELOCITY: u32 = 8000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GesturePhase {
    Idle,
    Dragging,
}

/// Reducer for horizontal drag and fling gestures.
///
/// Callbacks must be delivered one at a time; `&mut self` enforces that for
/// a single owner.
pub struct ScrollGestureReducer {
    state: SharedScrollState,
    clock: Arc<dyn Clock>,
    max_fling_velocity: u32,
    /// Pointer x of the last accepted event
    last_motion_x: i32,
    /// Running scroll base, advanced by each move
    last_scroll_x: i32,
    /// Present exactly while dragging
    tracker: Option<VelocityTracker>,
}

impl ScrollGestureReducer {
    pub fn new(state: SharedScrollState, clock: Arc<dyn Clock>, max_fling_velocity: u32) -> Self {
        Self {
            state,
            clock,
            max_fling_velocity,
            last_motion_x: NO_ANCHOR,
            last_scroll_x: 0,
            tracker: None,
        }
    }

    pub fn phase(&self) -> GesturePhase {
        if self.tracker.is_some() {
            GesturePhase::Dragging
        } else {
            GesturePhase::Idle
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.phase() == GesturePhase::Dragging
    }

    pub fn max_fling_velocity(&self) -> u32 {
        self.max_fling_velocity
    }

    /// Apply one pointer callback and return the record as persisted.
    ///
    /// Out-of-order callbacks are rejected with the record left as it was.
    pub fn handle(&mut self, event: PointerEvent) -> GestureResult<ScrollState> {
        match event.kind {
            PointerKind::Start => self.start(event),
            PointerKind::Move | PointerKind::Outside => self.drag(event),
            PointerKind::Up | PointerKind::Cancel => self.release(event),
        }
    }

    fn start(&mut self, event: PointerEvent) -> GestureResult<ScrollState> {
        if self.tracker.is_some() {
            return Err(GestureError::AlreadyDragging { kind: event.kind });
        }

        let persisted = self.state.update(|s| {
            s.current_scroll_x = s.scroll_x;
            s.fling_velocity_x = 0;
            s.adjusted_deceleration = 0;
            *s
        });
        self.last_motion_x = event.x;
        self.last_scroll_x = persisted.scroll_x;

        let mut tracker = VelocityTracker::new();
        tracker.add_sample(event.x as f32, event.time_ms);
        self.tracker = Some(tracker);

        log::log_event(&format!(
            "drag start x={} scroll_x={}",
            event.x, persisted.scroll_x
        ));
        Ok(persisted)
    }

    fn drag(&mut self, event: PointerEvent) -> GestureResult<ScrollState> {
        let Some(tracker) = self.tracker.as_mut() else {
            return Err(GestureError::NotDragging { kind: event.kind });
        };

        let delta = event.x.saturating_sub(self.last_motion_x);
        tracker.add_sample(event.x as f32, event.time_ms);

        let previous = self.last_scroll_x;
        self.last_scroll_x = previous.saturating_add(delta);
        let scroll_x = self.last_scroll_x;
        let persisted = self.state.update(|s| {
            s.current_scroll_x = previous;
            s.scroll_x = scroll_x;
            *s
        });
        self.last_motion_x = event.x;

        Ok(persisted)
    }

    fn release(&mut self, event: PointerEvent) -> GestureResult<ScrollState> {
        let Some(tracker) = self.tracker.take() else {
            return Err(GestureError::NotDragging { kind: event.kind });
        };

        let velocity =
            tracker.velocity(UNITS_PER_SECOND_MS, self.max_fling_velocity as f32) as i32;
        let now = self.clock.now_ms();
        let persisted = self.state.update(|s| {
            s.fling_time_ms = now;
            s.fling_velocity_x = velocity;
            *s
        });
        self.last_motion_x = NO_ANCHOR;

        log::log_event(&format!(
            "drag {} scroll_x={} velocity={}px/s from {} samples",
            event.kind,
            persisted.scroll_x,
            velocity,
            tracker.len()
        ));
        Ok(persisted)
    }
}
