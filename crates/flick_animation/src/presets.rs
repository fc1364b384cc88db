//! Animation presets for common entry/exit animations
//!
//! Each preset is a list of [`AnimationStep`]s to append to a tween queue.
//! Steps target absolute values, so presets that start from a known state
//! (fade in, scale in) begin with a zero-length jump to that state.

use crate::easing::Easing;
use crate::tween::{AnimationStep, TweenTargets};

/// Pre-built step sequences for common patterns
pub struct AnimationPreset;

fn split(duration_ms: u32, fraction: f32) -> (u32, u32) {
    let first = (duration_ms as f32 * fraction).round() as u32;
    (first, duration_ms - first)
}

impl AnimationPreset {
    // ========================================================================
    // Fade animations
    // ========================================================================

    /// Fade in from transparent to opaque
    pub fn fade_in(duration_ms: u32) -> Vec<AnimationStep> {
        vec![
            AnimationStep::to(0, TweenTargets::alpha(0.0)),
            AnimationStep::to(duration_ms, TweenTargets::alpha(1.0)).with_easing(Easing::EaseOut),
        ]
    }

    /// Fade out from the current opacity to transparent
    pub fn fade_out(duration_ms: u32) -> Vec<AnimationStep> {
        vec![AnimationStep::to(duration_ms, TweenTargets::alpha(0.0)).with_easing(Easing::EaseIn)]
    }

    // ========================================================================
    // Scale animations
    // ========================================================================

    /// Scale in from nothing with fade
    pub fn scale_in(duration_ms: u32) -> Vec<AnimationStep> {
        vec![
            AnimationStep::to(0, TweenTargets::scale(0.0, 0.0).with_alpha(0.0)),
            AnimationStep::to(duration_ms, TweenTargets::scale(1.0, 1.0).with_alpha(1.0))
                .with_easing(Easing::EaseOutCubic),
        ]
    }

    /// Scale out to nothing with fade
    pub fn scale_out(duration_ms: u32) -> Vec<AnimationStep> {
        vec![
            AnimationStep::to(duration_ms, TweenTargets::scale(0.0, 0.0).with_alpha(0.0))
                .with_easing(Easing::EaseInCubic),
        ]
    }

    /// Pop in with slight overshoot
    pub fn pop_in(duration_ms: u32) -> Vec<AnimationStep> {
        let (grow, settle) = split(duration_ms, 0.7);
        vec![
            AnimationStep::to(0, TweenTargets::scale(0.0, 0.0).with_alpha(0.0)),
            AnimationStep::to(grow, TweenTargets::scale(1.1, 1.1).with_alpha(1.0))
                .with_easing(Easing::EaseOutCubic),
            AnimationStep::to(settle, TweenTargets::scale(1.0, 1.0))
                .with_easing(Easing::EaseInOut),
        ]
    }

    /// Gentle scale pulse, returning to identity scale
    pub fn pulse(duration_ms: u32) -> Vec<AnimationStep> {
        let (up, down) = split(duration_ms, 0.5);
        vec![
            AnimationStep::to(up, TweenTargets::scale(1.05, 1.05))
                .with_easing(Easing::EaseInOutSine),
            AnimationStep::to(down, TweenTargets::scale(1.0, 1.0))
                .with_easing(Easing::EaseInOutSine),
        ]
    }

    /// One full turn clockwise, starting from 0°
    pub fn spin(duration_ms: u32) -> Vec<AnimationStep> {
        vec![
            AnimationStep::to(0, TweenTargets::rotation(0.0)),
            AnimationStep::to(duration_ms, TweenTargets::rotation(360.0)),
        ]
    }

    // ========================================================================
    // Motion animations
    // ========================================================================

    /// Slide from `from` to `to` while fading in
    pub fn slide_in(duration_ms: u32, from: (f32, f32), to: (f32, f32)) -> Vec<AnimationStep> {
        vec![
            AnimationStep::to(0, TweenTargets::position(from.0, from.1).with_alpha(0.0)),
            AnimationStep::to(duration_ms, TweenTargets::position(to.0, to.1).with_alpha(1.0))
                .with_easing(Easing::EaseOutCubic),
        ]
    }

    /// Horizontal shake around `base_x` with decaying amplitude
    pub fn shake(duration_ms: u32, base_x: f32, intensity: f32) -> Vec<AnimationStep> {
        const OFFSETS: [f32; 6] = [-1.0, 1.0, -0.8, 0.6, -0.3, 0.0];
        let segment = duration_ms / OFFSETS.len() as u32;
        let last = duration_ms - segment * (OFFSETS.len() as u32 - 1);

        OFFSETS
            .iter()
            .enumerate()
            .map(|(i, offset)| {
                let d = if i == OFFSETS.len() - 1 { last } else { segment };
                AnimationStep::to(d, TweenTargets::default().with_x(base_x + offset * intensity))
                    .with_easing(Easing::EaseInOut)
            })
            .collect()
    }

    /// Drop from `from_y` onto `floor_y`, bouncing to rest
    pub fn drop_bounce(duration_ms: u32, from_y: f32, floor_y: f32) -> Vec<AnimationStep> {
        vec![
            AnimationStep::to(0, TweenTargets::default().with_y(from_y)),
            AnimationStep::to(duration_ms, TweenTargets::default().with_y(floor_y))
                .with_easing(Easing::EaseOutBounce),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transform::TransformValues;
    use crate::tween::TweenSequencer;

    fn run(steps: Vec<AnimationStep>, start: TransformValues) -> TweenSequencer {
        let mut seq = TweenSequencer::new(start);
        seq.extend(steps);
        seq
    }

    fn total(steps: &[AnimationStep]) -> u32 {
        steps.iter().map(|s| s.duration_ms()).sum()
    }

    #[test]
    fn test_fade_in_starts_transparent() {
        let mut seq = run(AnimationPreset::fade_in(200), TransformValues::default());

        assert_eq!(seq.advance(0.0).alpha, 0.0);
        assert_eq!(seq.advance(200.0).alpha, 1.0);
        assert!(seq.is_finished());
    }

    #[test]
    fn test_pop_in_overshoots_then_settles() {
        let mut seq = run(AnimationPreset::pop_in(100), TransformValues::default());

        assert!((seq.advance(70.0).scale_x - 1.1).abs() < 1e-4);
        assert_eq!(seq.advance(30.0).scale_x, 1.0);
    }

    #[test]
    fn test_shake_returns_to_base() {
        let steps = AnimationPreset::shake(100, 50.0, 8.0);
        assert_eq!(total(&steps), 100);

        let mut seq = run(steps, TransformValues::at(50.0, 0.0));
        let mut max_offset: f32 = 0.0;
        for _ in 0..20 {
            let v = seq.advance(5.0);
            max_offset = max_offset.max((v.x - 50.0).abs());
        }
        assert!(seq.is_finished());
        assert_eq!(seq.current_values().x, 50.0);
        assert!(max_offset > 7.0 && max_offset <= 8.0);
    }

    #[test]
    fn test_drop_bounce_lands_on_floor() {
        let mut seq = run(
            AnimationPreset::drop_bounce(500, -40.0, 120.0),
            TransformValues::default(),
        );
        assert_eq!(seq.advance(0.0).y, -40.0);
        assert_eq!(seq.advance(500.0).y, 120.0);
    }

    #[test]
    fn test_durations_are_preserved() {
        assert_eq!(total(&AnimationPreset::pop_in(333)), 333);
        assert_eq!(total(&AnimationPreset::pulse(101)), 101);
        assert_eq!(total(&AnimationPreset::shake(7, 0.0, 1.0)), 7);
        assert_eq!(total(&AnimationPreset::slide_in(250, (0.0, 0.0), (1.0, 1.0))), 250);
    }
}
