//! Animation scheduler
//!
//! Owns every display object and drives one tick-then-draw pass per frame,
//! in insertion (draw) order.

use crate::objects::DisplayObject;
use flick_paint::RenderSurface;
use slotmap::{new_key_type, SlotMap};
use std::time::Instant;

new_key_type! {
    pub struct ObjectId;
}

/// The animation scheduler that ticks and draws all display objects
#[derive(Debug)]
pub struct AnimationScheduler {
    objects: SlotMap<ObjectId, DisplayObject>,
    /// Draw order, back to front
    order: Vec<ObjectId>,
    last_frame: Option<Instant>,
    frame_count: u64,
}

impl AnimationScheduler {
    pub fn new() -> Self {
        Self {
            objects: SlotMap::with_key(),
            order: Vec::new(),
            last_frame: None,
            frame_count: 0,
        }
    }

    /// Add an object on top of everything already scheduled
    pub fn add(&mut self, object: impl Into<DisplayObject>) -> ObjectId {
        let object = object.into();
        let kind = object.kind();
        let id = self.objects.insert(object);
        self.order.push(id);
        tracing::debug!(?id, kind, "display object added");
        id
    }

    pub fn get(&self, id: ObjectId) -> Option<&DisplayObject> {
        self.objects.get(id)
    }

    pub fn get_mut(&mut self, id: ObjectId) -> Option<&mut DisplayObject> {
        self.objects.get_mut(id)
    }

    pub fn remove(&mut self, id: ObjectId) -> Option<DisplayObject> {
        let removed = self.objects.remove(id)?;
        self.order.retain(|o| *o != id);
        tracing::debug!(?id, kind = removed.kind(), "display object removed");
        Some(removed)
    }

    pub fn clear(&mut self) {
        self.objects.clear();
        self.order.clear();
    }

    /// Run one frame: update then draw each object, back to front
    pub fn frame(&mut self, dt_ms: f32, surface: &mut dyn RenderSurface) {
        for id in &self.order {
            if let Some(object) = self.objects.get_mut(*id) {
                object.tick_and_draw(dt_ms, surface);
            }
        }
        self.frame_count += 1;
    }

    /// Run one frame with `dt` measured from the previous `tick_now` call.
    /// The first call uses a zero delta.
    pub fn tick_now(&mut self, surface: &mut dyn RenderSurface) {
        let now = Instant::now();
        let dt_ms = self
            .last_frame
            .map(|last| (now - last).as_secs_f32() * 1000.0)
            .unwrap_or(0.0);
        self.last_frame = Some(now);
        self.frame(dt_ms, surface);
    }

    /// Iterate objects in draw order
    pub fn iter(&self) -> impl Iterator<Item = (ObjectId, &DisplayObject)> {
        self.order
            .iter()
            .filter_map(|id| self.objects.get(*id).map(|o| (*id, o)))
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Frames run since construction
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }
}

impl Default for AnimationScheduler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::easing::Easing;
    use crate::objects::{ParabolicMotionBitmap, TweenBitmap, TweenBuilder};
    use flick_core::{Point, Size};
    use flick_paint::{ImageHandle, PaintCommand, PaintContext};

    fn keys(ctx: &PaintContext) -> Vec<String> {
        ctx.commands()
            .iter()
            .map(|c| match c {
                PaintCommand::DrawImage { image, .. } => image.key().to_string(),
            })
            .collect()
    }

    #[test]
    fn test_draws_in_insertion_order() {
        let mut scheduler = AnimationScheduler::new();
        scheduler.add(TweenBitmap::new(ImageHandle::new("back", 4, 4)));
        scheduler.add(ParabolicMotionBitmap::new(ImageHandle::new("front", 4, 4)));
        let mut ctx = PaintContext::new(Size::new(100.0, 100.0));

        scheduler.frame(16.0, &mut ctx);

        assert_eq!(keys(&ctx), vec!["back", "front"]);
        assert_eq!(scheduler.frame_count(), 1);
    }

    #[test]
    fn test_remove_drops_from_draw_order() {
        let mut scheduler = AnimationScheduler::new();
        let a = scheduler.add(TweenBitmap::new(ImageHandle::new("a", 1, 1)));
        scheduler.add(TweenBitmap::new(ImageHandle::new("b", 1, 1)));

        assert!(scheduler.remove(a).is_some());
        assert!(scheduler.remove(a).is_none());
        assert_eq!(scheduler.len(), 1);

        let mut ctx = PaintContext::new(Size::new(10.0, 10.0));
        scheduler.frame(16.0, &mut ctx);
        assert_eq!(keys(&ctx), vec!["b"]);
    }

    #[test]
    fn test_frame_advances_objects() {
        let mut scheduler = AnimationScheduler::new();
        let id = scheduler.add(
            TweenBitmap::new(None)
                .transform(0.0, 0.0)
                .to_x(100, 100.0, Easing::Linear),
        );
        let mut ctx = PaintContext::new(Size::new(10.0, 10.0));

        scheduler.frame(25.0, &mut ctx);
        scheduler.frame(25.0, &mut ctx);

        let obj = scheduler.get(id).unwrap();
        assert_eq!(obj.position(), Point::new(50.0, 0.0));
    }

    #[test]
    fn test_tick_now_first_frame_has_zero_delta() {
        let mut scheduler = AnimationScheduler::new();
        let id = scheduler.add(
            TweenBitmap::new(None)
                .transform(0.0, 0.0)
                .to_x(1_000_000, 100.0, Easing::Linear),
        );
        let mut ctx = PaintContext::new(Size::new(10.0, 10.0));

        scheduler.tick_now(&mut ctx);

        assert_eq!(scheduler.get(id).unwrap().position().x, 0.0);
    }
}
