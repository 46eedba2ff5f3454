//! Renderer-side fling integration.
//!
//! Runs on its own task at frame cadence. Each frame it reads the scroll
//! record, plans any newly released fling with a constant deceleration,
//! moves `scroll_x` along that fling and publishes the offset to draw.
//! The gesture reducer never sees any of this; it only reads `scroll_x`
//! again when the next drag starts.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;

use crate::clock::Clock;
use crate::layout::GridGeometry;
use crate::log;
use crate::scroll::{FlingPlan, ScrollState, SharedScrollState};

/// Identifies one release: its time and velocity as written by the reducer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct FlingKey {
    time_ms: u64,
    velocity: i32,
}

impl FlingKey {
    fn of(state: &ScrollState) -> Self {
        Self {
            time_ms: state.fling_time_ms,
            velocity: state.fling_velocity_x,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct ActiveFling {
    key: FlingKey,
    origin: i32,
    velocity: f32,
    /// Signed, opposing the velocity
    deceleration: f32,
    plan: FlingPlan,
}

impl ActiveFling {
    fn position_at(&self, elapsed_ms: u64) -> i32 {
        if elapsed_ms >= self.plan.duration_ms.max(0) as u64 {
            return self.plan.end_pos;
        }
        let t = elapsed_ms as f32 / 1000.0;
        let travelled = self.velocity * t + 0.5 * self.deceleration * t * t;
        self.origin + travelled.round() as i32
    }
}

/// Plan a fling from `origin` with `velocity` px/s under constant
/// `deceleration` px/s², stopping early at the edge of the scroll range.
pub fn plan_fling(
    origin: i32,
    velocity: i32,
    deceleration: f32,
    geometry: &GridGeometry,
    icon_count: usize,
) -> FlingPlan {
    let speed = velocity.unsigned_abs() as f32;
    let signed_deceleration = -(velocity.signum() as f32) * deceleration;

    let full_distance = speed * speed / (2.0 * deceleration);
    let unclamped_end = origin as f32 + velocity.signum() as f32 * full_distance;
    let end_pos = geometry.clamp_scroll(icon_count, unclamped_end.round() as i32);

    // Time to cover |end - origin| while slowing down from `speed`.
    let distance = (end_pos - origin).unsigned_abs() as f32;
    let distance = distance.min(full_distance);
    let discriminant = (speed * speed - 2.0 * deceleration * distance).max(0.0);
    let seconds = (speed - discriminant.sqrt()) / deceleration;

    FlingPlan {
        adjusted_deceleration: signed_deceleration.round() as i32,
        duration_ms: (seconds * 1000.0).round() as i32,
        end_pos,
    }
}

pub struct FlingAnimator {
    state: SharedScrollState,
    clock: Arc<dyn Clock>,
    deceleration: f32,
    geometry: watch::Receiver<GridGeometry>,
    offset: watch::Sender<i32>,
    active: Option<ActiveFling>,
    finished: Option<FlingKey>,
}

impl FlingAnimator {
    pub fn new(
        state: SharedScrollState,
        clock: Arc<dyn Clock>,
        deceleration: f32,
        geometry: watch::Receiver<GridGeometry>,
        offset: watch::Sender<i32>,
    ) -> Self {
        Self {
            state,
            clock,
            deceleration,
            geometry,
            offset,
            active: None,
            finished: None,
        }
    }

    /// Tick every `frame` until nobody is listening for offsets.
    pub async fn run(mut self, frame: Duration) {
        let mut interval = tokio::time::interval(frame);
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        while !self.offset.is_closed() {
            interval.tick().await;
            let position = self.tick();
            self.offset.send_if_modified(|current| {
                if *current == position {
                    false
                } else {
                    *current = position;
                    true
                }
            });
        }
        log::log("fling animator stopped");
    }

    /// Advance one frame and return the offset to draw.
    pub fn tick(&mut self) -> i32 {
        let snapshot = self.state.snapshot();
        let geometry = *self.geometry.borrow();
        let resting = geometry.clamp_scroll(snapshot.icon_count, snapshot.scroll_x);

        if !snapshot.has_fling() {
            self.active = None;
            return resting;
        }

        let key = FlingKey::of(&snapshot);
        if self.finished == Some(key) {
            return resting;
        }

        let current = self.active.filter(|fling| fling.key == key);
        let fling = match current.or_else(|| self.start_fling(key, &snapshot, &geometry)) {
            Some(fling) => fling,
            None => return resting,
        };

        let elapsed = self.clock.now_ms().saturating_sub(key.time_ms);
        let position = geometry.clamp_scroll(snapshot.icon_count, fling.position_at(elapsed));

        if !self.state.advance_fling(key.time_ms, position) {
            // A new drag took over between the snapshot and now.
            self.active = None;
            let state = self.state.snapshot();
            return geometry.clamp_scroll(state.icon_count, state.scroll_x);
        }

        if elapsed >= fling.plan.duration_ms.max(0) as u64 {
            self.finished = Some(key);
            self.active = None;
            log::log_state("fling settled", &self.state.snapshot());
        } else {
            self.active = Some(fling);
        }
        position
    }

    fn start_fling(
        &mut self,
        key: FlingKey,
        snapshot: &ScrollState,
        geometry: &GridGeometry,
    ) -> Option<ActiveFling> {
        let origin = geometry.clamp_scroll(snapshot.icon_count, snapshot.scroll_x);
        let plan = plan_fling(
            origin,
            key.velocity,
            self.deceleration,
            geometry,
            snapshot.icon_count,
        );
        if !self.state.publish_fling_plan(key.time_ms, plan) {
            return None;
        }

        log::log_event(&format!(
            "fling from {} at {}px/s -> {} in {}ms",
            origin, key.velocity, plan.end_pos, plan.duration_ms
        ));
        let fling = ActiveFling {
            key,
            origin,
            velocity: key.velocity as f32,
            deceleration: plan.adjusted_deceleration as f32,
            plan,
        };
        self.active = Some(fling);
        Some(fling)
    }
}
