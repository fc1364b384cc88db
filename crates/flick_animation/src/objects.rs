//! Animated display objects
//!
//! Each variant is a composition of independent engine states:
//!
//! | variant | transform | tween | motion | sprite |
//! |---|---|---|---|---|
//! | [`TweenBitmap`] | x | x | | |
//! | [`TweenSpriteSheet`] | x | x | | x |
//! | [`ParabolicMotionBitmap`] | | | x | |
//! | [`ParabolicMotionSpriteSheet`] | | | x | x |
//!
//! [`DisplayObject`] is the tagged union the scheduler stores. A frame is
//! always `update` followed by `draw`, so a draw observes the state produced
//! by the same frame's tick.

use crate::easing::Easing;
use crate::motion::{Edge, ParabolicMotion};
use crate::sprite::{SpriteFrameSequencer, SpritePause, SpritePauseHandle, SpriteSheet};
use crate::transform::{TransformState, TransformValues};
use crate::tween::{AnimationStep, TweenSequencer, TweenTargets};
use flick_core::{Point, Rect, Result, Size, Vec2};
use flick_paint::{ImageHandle, Paint, RenderSurface};
use serde::Serialize;

/// Chained tween configuration shared by tween-driven objects
///
/// Every method appends to or adjusts the object's tween queue and returns
/// the object, so a whole animation reads as one expression.
pub trait TweenBuilder: Sized {
    #[doc(hidden)]
    fn tween_parts(&mut self) -> (&mut TransformState, &mut TweenSequencer);

    /// Place the object at `(x, y)` with identity scale and full opacity
    fn transform(self, x: f32, y: f32) -> Self {
        self.transform_all(TransformValues::at(x, y))
    }

    /// Set every construction-time transform value
    fn transform_all(mut self, values: TransformValues) -> Self {
        let (state, tween) = self.tween_parts();
        state.values = values;
        tween.set_initial(values);
        self
    }

    /// Queue a step towards `targets`
    fn tween(mut self, duration_ms: u32, targets: TweenTargets, easing: Easing) -> Self {
        self.tween_parts()
            .1
            .enqueue(AnimationStep::to(duration_ms, targets).with_easing(easing));
        self
    }

    /// Queue a prepared step (e.g. one carrying a completion callback)
    fn step(mut self, step: AnimationStep) -> Self {
        self.tween_parts().1.enqueue(step);
        self
    }

    fn to(self, duration_ms: u32, x: f32, y: f32, easing: Easing) -> Self {
        self.tween(duration_ms, TweenTargets::position(x, y), easing)
    }

    fn to_x(self, duration_ms: u32, x: f32, easing: Easing) -> Self {
        self.tween(
            duration_ms,
            TweenTargets::default().with_x(x),
            easing,
        )
    }

    fn to_y(self, duration_ms: u32, y: f32, easing: Easing) -> Self {
        self.tween(
            duration_ms,
            TweenTargets::default().with_y(y),
            easing,
        )
    }

    fn alpha(self, duration_ms: u32, alpha: f32, easing: Easing) -> Self {
        self.tween(duration_ms, TweenTargets::alpha(alpha), easing)
    }

    fn scale(self, duration_ms: u32, scale_x: f32, scale_y: f32, easing: Easing) -> Self {
        self.tween(duration_ms, TweenTargets::scale(scale_x, scale_y), easing)
    }

    /// Rotate to `degrees`
    fn rotation(self, duration_ms: u32, degrees: f32, easing: Easing) -> Self {
        self.tween(duration_ms, TweenTargets::rotation(degrees), easing)
    }

    fn wait_time(mut self, duration_ms: u32) -> Self {
        self.tween_parts().1.enqueue(AnimationStep::wait(duration_ms));
        self
    }

    /// Queue a zero-length step that runs `f`
    fn call<F: FnMut() + Send + 'static>(mut self, f: F) -> Self {
        self.tween_parts().1.enqueue(AnimationStep::call(f));
        self
    }

    fn looping(mut self, looping: bool) -> Self {
        self.tween_parts().1.set_loop(looping);
        self
    }

    /// Scale pivot, relative to the object's position
    fn scale_registration(mut self, x: f32, y: f32) -> Self {
        self.tween_parts().0.scale_registration = Vec2::new(x, y);
        self
    }

    /// Rotation pivot, relative to the object's position
    fn rotate_registration(mut self, x: f32, y: f32) -> Self {
        self.tween_parts().0.rotate_registration = Vec2::new(x, y);
        self
    }
}

/// Chained projectile configuration shared by motion-driven objects
pub trait MotionBuilder: Sized {
    #[doc(hidden)]
    fn motion_mut(&mut self) -> &mut ParabolicMotion;

    /// Start position
    fn transform(mut self, x: f32, y: f32) -> Self {
        self.motion_mut().set_position(x, y);
        self
    }

    fn initial_velocity_x(mut self, vx: f32) -> Self {
        let m = self.motion_mut();
        let vy = m.initial_velocity().y;
        m.set_initial_velocity(Vec2::new(vx, vy));
        self
    }

    fn initial_velocity_y(mut self, vy: f32) -> Self {
        let m = self.motion_mut();
        let vx = m.initial_velocity().x;
        m.set_initial_velocity(Vec2::new(vx, vy));
        self
    }

    fn acceleration_x(mut self, ax: f32) -> Self {
        let m = self.motion_mut();
        let ay = m.acceleration().y;
        m.set_acceleration(Vec2::new(ax, ay));
        self
    }

    fn acceleration_y(mut self, ay: f32) -> Self {
        let m = self.motion_mut();
        let ax = m.acceleration().x;
        m.set_acceleration(Vec2::new(ax, ay));
        self
    }

    fn coefficient_restitution_x(mut self, e: f32) -> Self {
        let m = self.motion_mut();
        let ey = m.restitution().y;
        m.set_restitution(Vec2::new(e, ey));
        self
    }

    fn coefficient_restitution_y(mut self, e: f32) -> Self {
        let m = self.motion_mut();
        let ex = m.restitution().x;
        m.set_restitution(Vec2::new(ex, e));
        self
    }

    fn coefficient_bottom(mut self, enabled: bool) -> Self {
        self.motion_mut().set_edge(Edge::Bottom, enabled);
        self
    }

    fn coefficient_left(mut self, enabled: bool) -> Self {
        self.motion_mut().set_edge(Edge::Left, enabled);
        self
    }

    fn coefficient_right(mut self, enabled: bool) -> Self {
        self.motion_mut().set_edge(Edge::Right, enabled);
        self
    }

    fn bottom_hit_callback<F: FnMut() + Send + 'static>(mut self, f: F) -> Self {
        self.motion_mut().set_hit_callback(Edge::Bottom, f);
        self
    }

    fn left_hit_callback<F: FnMut() + Send + 'static>(mut self, f: F) -> Self {
        self.motion_mut().set_hit_callback(Edge::Left, f);
        self
    }

    fn right_hit_callback<F: FnMut() + Send + 'static>(mut self, f: F) -> Self {
        self.motion_mut().set_hit_callback(Edge::Right, f);
        self
    }
}

fn draw_image(
    surface: &mut dyn RenderSurface,
    image: Option<&ImageHandle>,
    src: Option<Rect>,
    dest: Rect,
    paint: &Paint,
) {
    match image {
        Some(image) => surface.draw_image(image, src, dest, paint),
        None => tracing::debug!(x = dest.x(), y = dest.y(), "no backing image, skipping draw"),
    }
}

// =============================================================================
// Tween variants
// =============================================================================

/// A whole image driven by a tween queue
#[derive(Debug)]
pub struct TweenBitmap {
    image: Option<ImageHandle>,
    state: TransformState,
    tween: TweenSequencer,
    display_size: Option<Size>,
}

impl TweenBitmap {
    pub fn new(image: impl Into<Option<ImageHandle>>) -> Self {
        Self {
            image: image.into(),
            state: TransformState::default(),
            tween: TweenSequencer::default(),
            display_size: None,
        }
    }

    /// Draw the image into a `width × height` rectangle instead of its
    /// natural size
    pub fn display_size(mut self, width: f32, height: f32) -> Self {
        self.display_size = Some(Size::new(width, height));
        self
    }

    pub fn set_image(&mut self, image: Option<ImageHandle>) {
        self.image = image;
    }

    pub fn update(&mut self, dt_ms: f32) {
        self.state.values = self.tween.advance(dt_ms);
    }

    pub fn draw(&self, surface: &mut dyn RenderSurface) {
        let size = self
            .display_size
            .or_else(|| self.image.as_ref().map(ImageHandle::size))
            .unwrap_or(Size::ZERO);
        let dest = Rect::from_origin_size(self.state.values.position(), size);
        draw_image(surface, self.image.as_ref(), None, dest, &self.state.paint());
    }

    pub fn values(&self) -> TransformValues {
        self.state.values
    }

    pub fn tween_sequencer(&self) -> &TweenSequencer {
        &self.tween
    }

    pub fn tween_sequencer_mut(&mut self) -> &mut TweenSequencer {
        &mut self.tween
    }
}

impl TweenBuilder for TweenBitmap {
    fn tween_parts(&mut self) -> (&mut TransformState, &mut TweenSequencer) {
        (&mut self.state, &mut self.tween)
    }
}

/// Sprite-sheet frames whose transform is driven by a tween queue
#[derive(Debug)]
pub struct TweenSpriteSheet {
    image: Option<ImageHandle>,
    state: TransformState,
    tween: TweenSequencer,
    sprite: SpriteFrameSequencer,
    display_frame_size: Option<Size>,
}

impl TweenSpriteSheet {
    pub fn new(image: impl Into<Option<ImageHandle>>, sheet: SpriteSheet) -> Self {
        Self {
            image: image.into(),
            state: TransformState::default(),
            tween: TweenSequencer::default(),
            sprite: SpriteFrameSequencer::new(sheet),
            display_frame_size: None,
        }
    }

    /// Advance one sprite frame every `divisor` ticks
    pub fn frequency(self, divisor: u32) -> Result<Self> {
        self.sprite.set_frequency(divisor)?;
        Ok(self)
    }

    pub fn start_frame(self, frame: u32) -> Result<Self> {
        self.sprite.set_frame(frame)?;
        Ok(self)
    }

    /// Loop the sprite frames (independent of tween looping)
    pub fn sprite_looping(self, looping: bool) -> Self {
        self.sprite.set_loop(looping);
        self
    }

    pub fn on_sprite_finish<F: FnMut() + Send + 'static>(mut self, f: F) -> Self {
        self.sprite.set_on_finish(f);
        self
    }

    /// Draw each frame into a `width × height` rectangle
    pub fn display_frame_size(mut self, width: f32, height: f32) -> Self {
        self.display_frame_size = Some(Size::new(width, height));
        self
    }

    pub fn update(&mut self, dt_ms: f32) {
        self.state.values = self.tween.advance(dt_ms);
        self.sprite.tick();
    }

    pub fn draw(&self, surface: &mut dyn RenderSurface) {
        let size = self
            .display_frame_size
            .unwrap_or_else(|| self.sprite.sheet().frame_size());
        let dest = Rect::from_origin_size(self.state.values.position(), size);
        draw_image(
            surface,
            self.image.as_ref(),
            Some(self.sprite.frame_source_rect()),
            dest,
            &self.state.paint(),
        );
    }

    pub fn values(&self) -> TransformValues {
        self.state.values
    }

    pub fn sprite(&self) -> &SpriteFrameSequencer {
        &self.sprite
    }

    pub fn tween_sequencer(&self) -> &TweenSequencer {
        &self.tween
    }

    pub fn pause_handle(&self) -> SpritePauseHandle {
        self.sprite.pause_handle()
    }
}

impl TweenBuilder for TweenSpriteSheet {
    fn tween_parts(&mut self) -> (&mut TransformState, &mut TweenSequencer) {
        (&mut self.state, &mut self.tween)
    }
}

impl SpritePause for TweenSpriteSheet {
    fn sprite_pause(&mut self, pause: bool) {
        self.sprite.set_paused(pause);
    }

    fn is_sprite_paused(&self) -> bool {
        self.sprite.is_paused()
    }
}

// =============================================================================
// Parabolic variants
// =============================================================================

/// A whole image thrown as a projectile
#[derive(Debug)]
pub struct ParabolicMotionBitmap {
    image: Option<ImageHandle>,
    motion: ParabolicMotion,
    display_size: Option<Size>,
}

impl ParabolicMotionBitmap {
    /// The image's natural size is the collision footprint
    pub fn new(image: impl Into<Option<ImageHandle>>) -> Self {
        let image = image.into();
        let footprint = image.as_ref().map(ImageHandle::size).unwrap_or(Size::ZERO);
        Self {
            image,
            motion: ParabolicMotion::new(footprint),
            display_size: None,
        }
    }

    /// Draw (and collide) at `width × height`
    pub fn display_size(mut self, width: f32, height: f32) -> Self {
        let size = Size::new(width, height);
        self.display_size = Some(size);
        self.motion.set_footprint(size);
        self
    }

    pub fn update(&mut self, surface: Size) {
        self.motion.tick(surface);
    }

    pub fn draw(&self, surface: &mut dyn RenderSurface) {
        let dest = Rect::from_origin_size(
            self.motion.current_position(),
            self.motion.footprint_size(),
        );
        draw_image(surface, self.image.as_ref(), None, dest, &Paint::default());
    }

    pub fn motion(&self) -> &ParabolicMotion {
        &self.motion
    }
}

impl MotionBuilder for ParabolicMotionBitmap {
    fn motion_mut(&mut self) -> &mut ParabolicMotion {
        &mut self.motion
    }
}

/// Sprite-sheet frames thrown as a projectile
#[derive(Debug)]
pub struct ParabolicMotionSpriteSheet {
    image: Option<ImageHandle>,
    motion: ParabolicMotion,
    sprite: SpriteFrameSequencer,
}

impl ParabolicMotionSpriteSheet {
    /// One frame's size is the collision footprint
    pub fn new(image: impl Into<Option<ImageHandle>>, sheet: SpriteSheet) -> Self {
        Self {
            image: image.into(),
            motion: ParabolicMotion::new(sheet.frame_size()),
            sprite: SpriteFrameSequencer::new(sheet),
        }
    }

    /// Advance one sprite frame every `divisor` motion ticks
    pub fn frequency(self, divisor: u32) -> Result<Self> {
        self.sprite.set_frequency(divisor)?;
        Ok(self)
    }

    pub fn start_frame(self, frame: u32) -> Result<Self> {
        self.sprite.set_frame(frame)?;
        Ok(self)
    }

    pub fn sprite_looping(self, looping: bool) -> Self {
        self.sprite.set_loop(looping);
        self
    }

    pub fn on_sprite_finish<F: FnMut() + Send + 'static>(mut self, f: F) -> Self {
        self.sprite.set_on_finish(f);
        self
    }

    /// Draw (and collide) each frame at `width × height`
    pub fn display_frame_size(mut self, width: f32, height: f32) -> Self {
        self.motion.set_footprint(Size::new(width, height));
        self
    }

    pub fn update(&mut self, surface: Size) {
        self.motion.tick(surface);
        self.sprite.tick();
    }

    pub fn draw(&self, surface: &mut dyn RenderSurface) {
        let dest = Rect::from_origin_size(
            self.motion.current_position(),
            self.motion.footprint_size(),
        );
        draw_image(
            surface,
            self.image.as_ref(),
            Some(self.sprite.frame_source_rect()),
            dest,
            &Paint::default(),
        );
    }

    pub fn motion(&self) -> &ParabolicMotion {
        &self.motion
    }

    pub fn sprite(&self) -> &SpriteFrameSequencer {
        &self.sprite
    }

    pub fn pause_handle(&self) -> SpritePauseHandle {
        self.sprite.pause_handle()
    }
}

impl MotionBuilder for ParabolicMotionSpriteSheet {
    fn motion_mut(&mut self) -> &mut ParabolicMotion {
        &mut self.motion
    }
}

impl SpritePause for ParabolicMotionSpriteSheet {
    fn sprite_pause(&mut self, pause: bool) {
        self.sprite.set_paused(pause);
    }

    fn is_sprite_paused(&self) -> bool {
        self.sprite.is_paused()
    }
}

// =============================================================================
// DisplayObject
// =============================================================================

/// Any animated object the scheduler can drive
#[derive(Debug)]
pub enum DisplayObject {
    TweenBitmap(TweenBitmap),
    TweenSprite(TweenSpriteSheet),
    ParabolicBitmap(ParabolicMotionBitmap),
    ParabolicSprite(ParabolicMotionSpriteSheet),
}

/// Serializable per-frame view of an object, for traces and debugging
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ObjectSnapshot {
    pub kind: &'static str,
    pub x: f32,
    pub y: f32,
    pub alpha: f32,
    pub scale_x: f32,
    pub scale_y: f32,
    pub rotation: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frame: Option<u32>,
}

impl DisplayObject {
    pub fn kind(&self) -> &'static str {
        match self {
            DisplayObject::TweenBitmap(_) => "tween_bitmap",
            DisplayObject::TweenSprite(_) => "tween_sprite",
            DisplayObject::ParabolicBitmap(_) => "parabolic_bitmap",
            DisplayObject::ParabolicSprite(_) => "parabolic_sprite",
        }
    }

    /// Advance every engine of the object by one frame
    ///
    /// Tweens consume `dt_ms`; motion and sprite engines count one tick.
    pub fn update(&mut self, dt_ms: f32, surface: Size) {
        match self {
            DisplayObject::TweenBitmap(o) => o.update(dt_ms),
            DisplayObject::TweenSprite(o) => o.update(dt_ms),
            DisplayObject::ParabolicBitmap(o) => o.update(surface),
            DisplayObject::ParabolicSprite(o) => o.update(surface),
        }
    }

    /// Issue this frame's draw call
    pub fn draw(&self, surface: &mut dyn RenderSurface) {
        match self {
            DisplayObject::TweenBitmap(o) => o.draw(surface),
            DisplayObject::TweenSprite(o) => o.draw(surface),
            DisplayObject::ParabolicBitmap(o) => o.draw(surface),
            DisplayObject::ParabolicSprite(o) => o.draw(surface),
        }
    }

    /// Update against the surface's live extent, then draw onto it
    pub fn tick_and_draw(&mut self, dt_ms: f32, surface: &mut dyn RenderSurface) {
        let size = surface.size();
        self.update(dt_ms, size);
        self.draw(surface);
    }

    /// Current top-left position
    pub fn position(&self) -> Point {
        match self {
            DisplayObject::TweenBitmap(o) => o.values().position(),
            DisplayObject::TweenSprite(o) => o.values().position(),
            DisplayObject::ParabolicBitmap(o) => o.motion().current_position(),
            DisplayObject::ParabolicSprite(o) => o.motion().current_position(),
        }
    }

    /// Current sprite frame, for sprite-bearing variants
    pub fn frame_index(&self) -> Option<u32> {
        match self {
            DisplayObject::TweenSprite(o) => Some(o.sprite().frame_index()),
            DisplayObject::ParabolicSprite(o) => Some(o.sprite().frame_index()),
            _ => None,
        }
    }

    /// Projectile state, for motion-driven variants
    pub fn motion_mut(&mut self) -> Option<&mut ParabolicMotion> {
        match self {
            DisplayObject::ParabolicBitmap(o) => Some(&mut o.motion),
            DisplayObject::ParabolicSprite(o) => Some(&mut o.motion),
            _ => None,
        }
    }

    /// Pause control, for sprite-bearing variants
    pub fn as_sprite_pause(&mut self) -> Option<&mut dyn SpritePause> {
        match self {
            DisplayObject::TweenSprite(o) => Some(o as &mut dyn SpritePause),
            DisplayObject::ParabolicSprite(o) => Some(o as &mut dyn SpritePause),
            _ => None,
        }
    }

    pub fn snapshot(&self) -> ObjectSnapshot {
        let values = match self {
            DisplayObject::TweenBitmap(o) => o.values(),
            DisplayObject::TweenSprite(o) => o.values(),
            DisplayObject::ParabolicBitmap(_) | DisplayObject::ParabolicSprite(_) => {
                let p = self.position();
                TransformValues::at(p.x, p.y)
            }
        };
        ObjectSnapshot {
            kind: self.kind(),
            x: values.x,
            y: values.y,
            alpha: values.alpha,
            scale_x: values.scale_x,
            scale_y: values.scale_y,
            rotation: values.rotation,
            frame: self.frame_index(),
        }
    }
}

impl From<TweenBitmap> for DisplayObject {
    fn from(o: TweenBitmap) -> Self {
        DisplayObject::TweenBitmap(o)
    }
}

impl From<TweenSpriteSheet> for DisplayObject {
    fn from(o: TweenSpriteSheet) -> Self {
        DisplayObject::TweenSprite(o)
    }
}

impl From<ParabolicMotionBitmap> for DisplayObject {
    fn from(o: ParabolicMotionBitmap) -> Self {
        DisplayObject::ParabolicBitmap(o)
    }
}

impl From<ParabolicMotionSpriteSheet> for DisplayObject {
    fn from(o: ParabolicMotionSpriteSheet) -> Self {
        DisplayObject::ParabolicSprite(o)
    }
}
