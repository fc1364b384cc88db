//! Per-object transform state
//!
//! `TransformValues` is the resolved visual state of an object for one frame.
//! `TransformState` pairs it with the registration points that act as pivots
//! for scale and rotation when the draw call is issued.

use flick_core::{Point, Vec2};
use flick_paint::{Paint, Transform2D};
use serde::{Deserialize, Serialize};

/// A numeric property that tweens can drive
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TweenProperty {
    X,
    Y,
    Alpha,
    ScaleX,
    ScaleY,
    Rotation,
}

impl TweenProperty {
    pub const ALL: [TweenProperty; 6] = [
        TweenProperty::X,
        TweenProperty::Y,
        TweenProperty::Alpha,
        TweenProperty::ScaleX,
        TweenProperty::ScaleY,
        TweenProperty::Rotation,
    ];
}

/// Resolved transform of a display object
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransformValues {
    /// Horizontal position in pixels
    pub x: f32,
    /// Vertical position in pixels
    pub y: f32,
    /// Opacity (0.0 to 1.0)
    pub alpha: f32,
    /// Horizontal scale factor
    pub scale_x: f32,
    /// Vertical scale factor
    pub scale_y: f32,
    /// Rotation in degrees
    pub rotation: f32,
}

impl Default for TransformValues {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            alpha: 1.0,
            scale_x: 1.0,
            scale_y: 1.0,
            rotation: 0.0,
        }
    }
}

impl TransformValues {
    /// Values at a position with identity scale, full opacity and no rotation
    pub fn at(x: f32, y: f32) -> Self {
        Self {
            x,
            y,
            ..Default::default()
        }
    }

    pub fn get(&self, property: TweenProperty) -> f32 {
        match property {
            TweenProperty::X => self.x,
            TweenProperty::Y => self.y,
            TweenProperty::Alpha => self.alpha,
            TweenProperty::ScaleX => self.scale_x,
            TweenProperty::ScaleY => self.scale_y,
            TweenProperty::Rotation => self.rotation,
        }
    }

    pub fn set(&mut self, property: TweenProperty, value: f32) {
        match property {
            TweenProperty::X => self.x = value,
            TweenProperty::Y => self.y = value,
            TweenProperty::Alpha => self.alpha = value,
            TweenProperty::ScaleX => self.scale_x = value,
            TweenProperty::ScaleY => self.scale_y = value,
            TweenProperty::Rotation => self.rotation = value,
        }
    }

    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// Transform values plus scale/rotation registration points
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TransformState {
    pub values: TransformValues,
    /// Scale pivot, relative to the object's position
    pub scale_registration: Vec2,
    /// Rotation pivot, relative to the object's position
    pub rotate_registration: Vec2,
}

impl TransformState {
    pub fn new(values: TransformValues) -> Self {
        Self {
            values,
            ..Default::default()
        }
    }

    /// Paint attributes for drawing with `values` resolved this frame.
    ///
    /// Scale is applied around the scale pivot, after rotating around the
    /// rotation pivot.
    pub fn paint_for(&self, values: &TransformValues) -> Paint {
        let origin = values.position();
        let mut transform = Transform2D::identity();
        if values.scale_x != 1.0 || values.scale_y != 1.0 {
            transform = transform.concat(&Transform2D::scale_about(
                values.scale_x,
                values.scale_y,
                origin.offset(self.scale_registration),
            ));
        }
        if values.rotation != 0.0 {
            transform = transform.concat(&Transform2D::rotate_about(
                values.rotation,
                origin.offset(self.rotate_registration),
            ));
        }
        Paint::new(values.alpha.clamp(0.0, 1.0), transform)
    }

    /// Paint attributes for the stored values
    pub fn paint(&self) -> Paint {
        self.paint_for(&self.values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_set_roundtrip_all_properties() {
        let mut values = TransformValues::default();
        for (i, prop) in TweenProperty::ALL.iter().enumerate() {
            values.set(*prop, i as f32 * 10.0);
        }
        assert_eq!(values.x, 0.0);
        assert_eq!(values.alpha, 20.0);
        assert_eq!(values.rotation, 50.0);
        assert_eq!(values.get(TweenProperty::ScaleY), 40.0);
    }

    #[test]
    fn test_identity_paint_for_default_values() {
        let state = TransformState::new(TransformValues::at(10.0, 20.0));
        let paint = state.paint();
        assert!(paint.transform.is_identity());
        assert_eq!(paint.alpha, 1.0);
    }

    #[test]
    fn test_scale_pivots_on_registration_point() {
        let mut state = TransformState::new(TransformValues {
            scale_x: 2.0,
            scale_y: 2.0,
            ..TransformValues::at(100.0, 100.0)
        });
        state.scale_registration = Vec2::new(50.0, 50.0);

        let paint = state.paint();
        // The pivot (object position + registration) stays put
        let pivot = paint.transform.apply(Point::new(150.0, 150.0));
        assert!((pivot.x - 150.0).abs() < 1e-4);
        assert!((pivot.y - 150.0).abs() < 1e-4);
        // The object's top-left moves away from the pivot
        let corner = paint.transform.apply(Point::new(100.0, 100.0));
        assert!((corner.x - 50.0).abs() < 1e-4);
    }

    #[test]
    fn test_alpha_is_clamped_for_paint() {
        let state = TransformState::new(TransformValues {
            alpha: 1.4,
            ..Default::default()
        });
        assert_eq!(state.paint().alpha, 1.0);
    }
}
