//! Flick Animation System
//!
//! Frame-by-frame transform state for 2D display objects, decoupled from how
//! they are painted.
//!
//! # Features
//!
//! - **Tweens**: FIFO step queues with easing, callbacks and looping
//! - **Parabolic Motion**: Euler-integrated projectiles bouncing off surface edges
//! - **Sprite Sheets**: Frame sequencing on a frame-rate divisor, pausable from any thread
//! - **Display Objects**: Bitmap and sprite variants composed from the engines above
//! - **Scheduler**: Ticks and draws every object once per frame
//!
//! ```
//! use flick_animation::{AnimationScheduler, Easing, TweenBitmap, TweenBuilder};
//! use flick_core::Size;
//! use flick_paint::{ImageHandle, PaintContext};
//!
//! let mut scheduler = AnimationScheduler::new();
//! scheduler.add(
//!     TweenBitmap::new(ImageHandle::new("logo.png", 64, 64))
//!         .transform(0.0, 0.0)
//!         .to(500, 200.0, 100.0, Easing::EaseOutCubic)
//!         .alpha(250, 0.0, Easing::Linear),
//! );
//!
//! let mut surface = PaintContext::new(Size::new(320.0, 240.0));
//! scheduler.frame(16.0, &mut surface);
//! assert_eq!(surface.commands().len(), 1);
//! ```

pub mod config;
pub mod easing;
pub mod motion;
pub mod objects;
pub mod presets;
pub mod scheduler;
pub mod sprite;
pub mod transform;
pub mod tween;

pub use config::{ObjectConfig, RegistrationConfig, SceneConfig};
pub use easing::Easing;
pub use motion::{Edge, EdgeHits, ParabolicMotion};
pub use objects::{
    DisplayObject, MotionBuilder, ObjectSnapshot, ParabolicMotionBitmap,
    ParabolicMotionSpriteSheet, TweenBitmap, TweenBuilder, TweenSpriteSheet,
};
pub use presets::AnimationPreset;
pub use scheduler::{AnimationScheduler, ObjectId};
pub use sprite::{SpriteFrameSequencer, SpritePause, SpritePauseHandle, SpriteSheet};
pub use transform::{TransformState, TransformValues, TweenProperty};
pub use tween::{AnimationStep, TweenSequencer, TweenTargets};
