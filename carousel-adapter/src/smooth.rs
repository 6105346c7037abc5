use carousel::{Gallery, ViewRecycler};

use crate::{Easing, Tween};

/// Seeking runs slower than the settle tween's linear speed so the target can be caught as
/// soon as it is attached.
const SEEK_SLOWDOWN: f32 = 1.2;

/// Share of a linear scroll's duration a decelerating curve needs to cover the same distance
/// at the same initial speed.
const DECELERATION_TIME_RATIO: f32 = 0.3356;

/// Timing for smooth scrolls driven by [`SmoothScroller`].
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SmoothScrollConfig {
    /// Linear scroll speed, in milliseconds per pixel.
    pub ms_per_px: f32,
    pub easing: Easing,
    /// Assumed frame interval while seeking a target that is not attached yet.
    pub seek_frame_ms: u64,
}

impl Default for SmoothScrollConfig {
    fn default() -> Self {
        Self {
            ms_per_px: 25.0 / 160.0,
            easing: Easing::Decelerate,
            seek_frame_ms: 16,
        }
    }
}

impl SmoothScrollConfig {
    pub fn with_ms_per_px(mut self, ms_per_px: f32) -> Self {
        self.ms_per_px = ms_per_px;
        self
    }

    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    pub fn with_seek_frame_ms(mut self, seek_frame_ms: u64) -> Self {
        self.seek_frame_ms = seek_frame_ms;
        self
    }

    /// Time to cover `distance` pixels at the linear speed, rounded up.
    pub fn linear_duration_ms(&self, distance: i32) -> u64 {
        ceil_ms(distance.unsigned_abs() as f32 * self.ms_per_px)
    }

    /// Duration of the decelerating settle over `distance` pixels.
    pub fn settle_duration_ms(&self, distance: i32) -> u64 {
        let linear = self.linear_duration_ms(distance);
        ceil_ms(linear as f32 / DECELERATION_TIME_RATIO)
    }

    /// Pixels covered per tick while seeking.
    pub fn seek_step_px(&self) -> i32 {
        let per_frame = self.seek_frame_ms as f32 / (self.ms_per_px * SEEK_SLOWDOWN);
        if per_frame.is_finite() {
            (per_frame as i32).max(1)
        } else {
            i32::MAX
        }
    }
}

fn ceil_ms(v: f32) -> u64 {
    if v.is_nan() || v <= 0.0 {
        return 0;
    }
    let truncated = v as u64;
    if (truncated as f32) < v {
        truncated + 1
    } else {
        truncated
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Phase {
    Seeking,
    Settling { tween: Tween, applied: i32 },
    Finished,
}

/// Scrolls a gallery until a target index sits at the container center.
///
/// While the target is not attached the scroller seeks toward it in fixed steps. Once it is
/// attached the remaining distance to the center is covered by a tween. The scroll stops early
/// when the engine refuses to move (a boundary was reached).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SmoothScroller {
    target: usize,
    config: SmoothScrollConfig,
    phase: Phase,
}

impl SmoothScroller {
    pub fn new(target: usize, config: SmoothScrollConfig) -> Self {
        Self {
            target,
            config,
            phase: Phase::Seeking,
        }
    }

    pub fn target(&self) -> usize {
        self.target
    }

    pub fn is_finished(&self) -> bool {
        self.phase == Phase::Finished
    }

    /// The settle tween, once the target was found.
    pub fn tween(&self) -> Option<Tween> {
        match self.phase {
            Phase::Settling { tween, .. } => Some(tween),
            _ => None,
        }
    }

    /// Advances the scroll to `now_ms`.
    ///
    /// Returns the delta the engine consumed on this tick, or `None` once the scroll is over.
    pub fn tick<H: ViewRecycler>(
        &mut self,
        gallery: &mut Gallery<H>,
        host: &mut H,
        now_ms: u64,
    ) -> Option<i32> {
        if self.phase == Phase::Seeking {
            let Some(view) = gallery.find_view_for_index(host, self.target) else {
                return self.seek(gallery, host);
            };
            let distance = gallery.distance_to_center(host, &view);
            if distance == 0 {
                self.phase = Phase::Finished;
                return None;
            }
            let duration_ms = self.config.settle_duration_ms(distance);
            ctrace!(index = self.target, distance, duration_ms, "settle toward target");
            self.phase = Phase::Settling {
                tween: Tween::new(distance, now_ms, duration_ms, self.config.easing),
                applied: 0,
            };
        }

        let Phase::Settling { tween, applied } = &mut self.phase else {
            return None;
        };
        let done = tween.is_done(now_ms);
        let step = tween.sample(now_ms) - *applied;
        let mut consumed = 0;
        if step != 0 {
            consumed = gallery.scroll_by(host, step);
            *applied += consumed;
        }
        if done || (step != 0 && consumed != step) {
            self.phase = Phase::Finished;
            if consumed == 0 {
                return None;
            }
        }
        Some(consumed)
    }

    fn seek<H: ViewRecycler>(&mut self, gallery: &mut Gallery<H>, host: &mut H) -> Option<i32> {
        let direction = gallery.scroll_direction_for(host, self.target);
        let step = self.config.seek_step_px().saturating_mul(direction.signum());
        let consumed = gallery.scroll_by(host, step);
        if consumed == 0 {
            cdebug!(index = self.target, "seek stopped at a boundary");
            self.phase = Phase::Finished;
            return None;
        }
        Some(consumed)
    }
}
