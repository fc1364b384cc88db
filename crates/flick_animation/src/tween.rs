//! Tween sequencing
//!
//! A [`TweenSequencer`] owns a FIFO queue of [`AnimationStep`]s for one
//! object. Each step tweens the properties it names from whatever value they
//! hold when the step starts; properties it leaves unset keep their value.
//! Time is carried across step boundaries, so a tick that finishes one step
//! spends its overshoot on the next.

use crate::easing::Easing;
use crate::transform::{TransformValues, TweenProperty};
use flick_core::CallbackSlot;

/// Target values for one animation step
///
/// Only properties set to `Some` are tweened by the step.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TweenTargets {
    /// Translation X in pixels
    pub x: Option<f32>,
    /// Translation Y in pixels
    pub y: Option<f32>,
    /// Opacity (0.0 to 1.0)
    pub alpha: Option<f32>,
    /// Scale X factor
    pub scale_x: Option<f32>,
    /// Scale Y factor
    pub scale_y: Option<f32>,
    /// Rotation in degrees
    pub rotation: Option<f32>,
}

impl TweenTargets {
    /// Create targets with position set
    pub fn position(x: f32, y: f32) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            ..Default::default()
        }
    }

    /// Create targets with only opacity set
    pub fn alpha(value: f32) -> Self {
        Self {
            alpha: Some(value),
            ..Default::default()
        }
    }

    /// Create targets with scale set
    pub fn scale(x: f32, y: f32) -> Self {
        Self {
            scale_x: Some(x),
            scale_y: Some(y),
            ..Default::default()
        }
    }

    /// Create targets with rotation set
    pub fn rotation(degrees: f32) -> Self {
        Self {
            rotation: Some(degrees),
            ..Default::default()
        }
    }

    /// Builder: set x
    pub fn with_x(mut self, x: f32) -> Self {
        self.x = Some(x);
        self
    }

    /// Builder: set y
    pub fn with_y(mut self, y: f32) -> Self {
        self.y = Some(y);
        self
    }

    /// Builder: set opacity
    pub fn with_alpha(mut self, value: f32) -> Self {
        self.alpha = Some(value);
        self
    }

    /// Builder: set scale x and y
    pub fn with_scale(mut self, x: f32, y: f32) -> Self {
        self.scale_x = Some(x);
        self.scale_y = Some(y);
        self
    }

    /// Builder: set rotation
    pub fn with_rotation(mut self, degrees: f32) -> Self {
        self.rotation = Some(degrees);
        self
    }

    pub fn get(&self, property: TweenProperty) -> Option<f32> {
        match property {
            TweenProperty::X => self.x,
            TweenProperty::Y => self.y,
            TweenProperty::Alpha => self.alpha,
            TweenProperty::ScaleX => self.scale_x,
            TweenProperty::ScaleY => self.scale_y,
            TweenProperty::Rotation => self.rotation,
        }
    }

    /// True when no property is targeted (a wait or callback step)
    pub fn is_empty(&self) -> bool {
        TweenProperty::ALL.iter().all(|p| self.get(*p).is_none())
    }

    /// Interpolate from `start` towards these targets by eased progress `t`
    pub fn resolve(&self, start: &TransformValues, t: f32) -> TransformValues {
        let mut out = *start;
        for property in TweenProperty::ALL {
            if let Some(target) = self.get(property) {
                let from = start.get(property);
                // Land on the target exactly once the step completes
                let value = if t == 1.0 { target } else { from + (target - from) * t };
                out.set(property, value);
            }
        }
        out
    }
}

/// One queued change to a set of properties over a duration
#[derive(Debug, Default)]
pub struct AnimationStep {
    duration_ms: u32,
    targets: TweenTargets,
    easing: Easing,
    on_complete: CallbackSlot,
}

impl AnimationStep {
    /// Tween towards `targets` over `duration_ms`. Zero jumps immediately.
    pub fn to(duration_ms: u32, targets: TweenTargets) -> Self {
        Self {
            duration_ms,
            targets,
            easing: Easing::Linear,
            on_complete: CallbackSlot::new(),
        }
    }

    /// Hold all values for `duration_ms`
    pub fn wait(duration_ms: u32) -> Self {
        Self::to(duration_ms, TweenTargets::default())
    }

    /// Zero-length step that only runs `f`
    pub fn call<F: FnMut() + Send + 'static>(f: F) -> Self {
        Self::wait(0).on_complete(f)
    }

    /// Builder: set the easing curve shared by every property of the step
    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Builder: run `f` when the step's time is fully consumed
    pub fn on_complete<F: FnMut() + Send + 'static>(mut self, f: F) -> Self {
        self.on_complete.set(f);
        self
    }

    pub fn duration_ms(&self) -> u32 {
        self.duration_ms
    }

    pub fn targets(&self) -> &TweenTargets {
        &self.targets
    }

    pub fn easing(&self) -> Easing {
        self.easing
    }

    pub fn has_callback(&self) -> bool {
        self.on_complete.is_set()
    }

    /// Linear progress after `elapsed_ms` in this step (0.0 to 1.0)
    pub fn progress(&self, elapsed_ms: f32) -> f32 {
        if self.duration_ms == 0 {
            return 1.0;
        }
        (elapsed_ms / self.duration_ms as f32).clamp(0.0, 1.0)
    }
}

/// Loop passes run step by step within one tick before the remaining
/// whole cycles are skipped
const MAX_WRAPS_PER_TICK: u32 = 64;

/// Ordered per-object step queue with loop support
#[derive(Debug)]
pub struct TweenSequencer {
    queue: Vec<AnimationStep>,
    /// Index of the active step; `queue.len()` when drained
    cursor: usize,
    initial: TransformValues,
    start_values: TransformValues,
    current: TransformValues,
    elapsed_in_step: f32,
    looping: bool,
    loop_count: u32,
}

impl Default for TweenSequencer {
    fn default() -> Self {
        Self::new(TransformValues::default())
    }
}

impl TweenSequencer {
    pub fn new(initial: TransformValues) -> Self {
        Self {
            queue: Vec::new(),
            cursor: 0,
            initial,
            start_values: initial,
            current: initial,
            elapsed_in_step: 0.0,
            looping: false,
            loop_count: 0,
        }
    }

    /// Replace the construction-time values and rewind to them
    pub fn set_initial(&mut self, values: TransformValues) {
        self.initial = values;
        self.reset();
    }

    /// Builder: restart from the first step when the queue is exhausted
    pub fn looping(mut self, looping: bool) -> Self {
        self.looping = looping;
        self
    }

    pub fn set_loop(&mut self, looping: bool) {
        self.looping = looping;
    }

    pub fn is_looping(&self) -> bool {
        self.looping
    }

    /// Append a step. The active step, if any, is not disturbed.
    pub fn enqueue(&mut self, step: AnimationStep) {
        self.queue.push(step);
    }

    /// Builder form of [`enqueue`](Self::enqueue)
    pub fn then(mut self, step: AnimationStep) -> Self {
        self.enqueue(step);
        self
    }

    pub fn extend(&mut self, steps: impl IntoIterator<Item = AnimationStep>) {
        self.queue.extend(steps);
    }

    /// Advance by `dt_ms` of wall time and return the resolved values
    pub fn advance(&mut self, dt_ms: f32) -> TransformValues {
        self.run(dt_ms, true);
        self.current
    }

    /// The most recently resolved values, without advancing time
    pub fn current_values(&self) -> TransformValues {
        self.current
    }

    /// Rewind to the construction-time values and replay `total_ms` without
    /// firing step callbacks.
    pub fn seek(&mut self, total_ms: f32) -> TransformValues {
        self.reset();
        self.run(total_ms, false);
        self.current
    }

    /// Rewind to the first step and the construction-time values
    pub fn reset(&mut self) {
        self.cursor = 0;
        self.start_values = self.initial;
        self.current = self.initial;
        self.elapsed_in_step = 0.0;
        self.loop_count = 0;
    }

    /// Drop every queued step, holding the current values
    pub fn clear(&mut self) {
        self.queue.clear();
        self.cursor = 0;
        self.start_values = self.current;
        self.elapsed_in_step = 0.0;
    }

    /// True when there is no step left to run
    pub fn is_finished(&self) -> bool {
        self.cursor >= self.queue.len()
    }

    /// Index of the step currently executing
    pub fn active_index(&self) -> Option<usize> {
        (!self.is_finished()).then_some(self.cursor)
    }

    /// Time spent in the active step (milliseconds)
    pub fn elapsed_in_step(&self) -> f32 {
        self.elapsed_in_step
    }

    /// Number of completed passes over the queue while looping
    pub fn loop_count(&self) -> u32 {
        self.loop_count
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Sum of all step durations (milliseconds)
    pub fn total_duration_ms(&self) -> u64 {
        self.queue.iter().map(|s| s.duration_ms as u64).sum()
    }

    fn run(&mut self, dt_ms: f32, fire_callbacks: bool) {
        if self.is_finished() {
            return;
        }

        if !dt_ms.is_finite() {
            tracing::debug!(dt_ms, "ignoring non-finite tween delta");
            return;
        }
        self.elapsed_in_step += dt_ms.max(0.0);

        let mut wraps = 0u32;
        let mut collapsed = false;

        while let Some(step) = self.queue.get_mut(self.cursor) {
            let progress = step.progress(self.elapsed_in_step);
            let eased = if progress < 1.0 {
                step.easing.apply(progress)
            } else {
                1.0
            };
            self.current = step.targets.resolve(&self.start_values, eased);

            if progress < 1.0 {
                return;
            }

            if fire_callbacks {
                step.on_complete.fire();
            }
            tracing::trace!(index = self.cursor, "tween step complete");

            self.elapsed_in_step = (self.elapsed_in_step - step.duration_ms as f32).max(0.0);
            self.start_values = self.current;
            self.cursor += 1;

            if self.cursor < self.queue.len() {
                continue;
            }

            if !self.looping {
                self.elapsed_in_step = 0.0;
                tracing::debug!(steps = self.queue.len(), "tween queue drained");
                return;
            }

            self.cursor = 0;
            self.loop_count = self.loop_count.saturating_add(1);
            tracing::trace!(loop_count = self.loop_count, "tween loop wrap");

            // A queue with no duration would wrap forever; run it once per tick.
            let total = self.total_duration_ms();
            if total == 0 {
                self.elapsed_in_step = 0.0;
                return;
            }

            wraps += 1;
            if wraps < MAX_WRAPS_PER_TICK {
                continue;
            }
            if collapsed {
                // f32 rounding left more than a cycle; drop the remainder.
                self.elapsed_in_step = 0.0;
                return;
            }

            // Skip whole cycles arithmetically. Their callbacks do not fire.
            let elapsed = self.elapsed_in_step as f64;
            let cycles = (elapsed / total as f64).floor();
            self.elapsed_in_step = (elapsed % total as f64) as f32;
            self.loop_count = self.loop_count.saturating_add(cycles as u32);
            collapsed = true;
            tracing::debug!(cycles, "tween skipped whole loop cycles");
        }
    }
}
