//! Full frame loops through the scheduler, checked against recorded draws

use flick_animation::{
    AnimationPreset, AnimationScheduler, DisplayObject, Easing, MotionBuilder,
    ParabolicMotionBitmap, SceneConfig, SpriteSheet, TweenBitmap, TweenBuilder, TweenSpriteSheet,
};
use flick_core::{Rect, Size};
use flick_paint::{ImageHandle, Paint, PaintCommand, PaintContext};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::thread;

fn draws(ctx: &mut PaintContext) -> Vec<(Option<Rect>, Rect, Paint)> {
    ctx.take_commands()
        .into_iter()
        .map(|c| match c {
            PaintCommand::DrawImage {
                src, dest, paint, ..
            } => (src, dest, paint),
        })
        .collect()
}

#[test]
fn bouncing_ball_never_drawn_below_floor() {
    let bounces = Arc::new(AtomicU32::new(0));
    let b = bounces.clone();

    let mut scheduler = AnimationScheduler::new();
    scheduler.add(
        ParabolicMotionBitmap::new(ImageHandle::new("ball", 16, 16))
            .transform(40.0, 0.0)
            .initial_velocity_x(3.0)
            .coefficient_restitution_y(0.7)
            .bottom_hit_callback(move || {
                b.fetch_add(1, Ordering::SeqCst);
            }),
    );
    let mut ctx = PaintContext::new(Size::new(200.0, 120.0));

    for _ in 0..300 {
        scheduler.frame(16.0, &mut ctx);
        for (_, dest, _) in draws(&mut ctx) {
            assert!(dest.bottom() <= 120.0);
            assert!(dest.x() >= 0.0);
            assert!(dest.right() <= 200.0);
        }
    }

    assert!(bounces.load(Ordering::SeqCst) > 1);
}

#[test]
fn surface_resize_is_honored_next_frame() {
    let mut scheduler = AnimationScheduler::new();
    scheduler.add(
        ParabolicMotionBitmap::new(ImageHandle::new("ball", 10, 10))
            .transform(0.0, 0.0)
            .acceleration_y(5.0),
    );
    let mut ctx = PaintContext::new(Size::new(100.0, 400.0));

    for _ in 0..8 {
        scheduler.frame(16.0, &mut ctx);
    }
    ctx.clear();

    ctx.set_size(Size::new(100.0, 50.0));
    scheduler.frame(16.0, &mut ctx);

    let (_, dest, _) = draws(&mut ctx)[0];
    assert_eq!(dest.bottom(), 50.0);
}

#[test]
fn tween_and_sprite_advance_together() {
    let sheet = SpriteSheet::new(8.0, 8.0, 3, 3).unwrap();
    let mut scheduler = AnimationScheduler::new();
    let id = scheduler.add(
        TweenSpriteSheet::new(ImageHandle::new("walk", 24, 8), sheet)
            .transform(0.0, 0.0)
            .to_x(160, 80.0, Easing::Linear)
            .looping(false),
    );
    let mut ctx = PaintContext::new(Size::new(100.0, 100.0));

    let mut sources = Vec::new();
    let mut xs = Vec::new();
    for _ in 0..10 {
        scheduler.frame(16.0, &mut ctx);
        let (src, dest, _) = draws(&mut ctx)[0];
        sources.push(src.map(|r| r.x()));
        xs.push(dest.x());
    }

    // Frames cycle 1, 2, 0, ... on a divisor of one
    assert_eq!(sources[0], Some(8.0));
    assert_eq!(sources[1], Some(16.0));
    assert_eq!(sources[2], Some(0.0));
    assert!(xs.windows(2).all(|w| w[0] < w[1]));
    assert_eq!(xs[9], 80.0);
    assert_eq!(scheduler.get(id).unwrap().frame_index(), Some(1));
}

#[test]
fn presets_drive_paint_alpha() {
    let mut scheduler = AnimationScheduler::new();
    let mut obj = TweenBitmap::new(ImageHandle::new("logo", 4, 4)).transform(10.0, 10.0);
    for step in AnimationPreset::fade_in(100) {
        obj = obj.step(step);
    }
    scheduler.add(obj);
    let mut ctx = PaintContext::new(Size::new(50.0, 50.0));

    scheduler.frame(0.0, &mut ctx);
    let (_, _, first) = draws(&mut ctx)[0];
    assert_eq!(first.alpha_u8(), 0);

    scheduler.frame(100.0, &mut ctx);
    let (_, _, last) = draws(&mut ctx)[0];
    assert_eq!(last.alpha_u8(), 255);
}

#[test]
fn sprite_paused_from_another_thread() {
    let sheet = SpriteSheet::new(8.0, 8.0, 4, 4).unwrap();
    let obj = TweenSpriteSheet::new(None, sheet);
    let handle = obj.pause_handle();

    let mut scheduler = AnimationScheduler::new();
    let id = scheduler.add(obj);
    let mut ctx = PaintContext::new(Size::new(10.0, 10.0));

    scheduler.frame(16.0, &mut ctx);
    let pauser = handle.clone();
    thread::spawn(move || pauser.set_paused(true))
        .join()
        .unwrap();

    for _ in 0..5 {
        scheduler.frame(16.0, &mut ctx);
    }
    assert_eq!(handle.frame_index(), 1);
    assert_eq!(scheduler.get(id).unwrap().frame_index(), Some(1));
    assert!(ctx.commands().is_empty());
}

#[test]
fn scene_file_runs_headless() {
    let scene: SceneConfig = toml::from_str(
        r#"
        frames = 20

        [[images]]
        key = "coin"
        width = 12
        height = 12

        [[objects]]
        kind = "parabolic_sprite"
        image = "coin"
        sheet = { frame_width = 6.0, frame_height = 6.0, frame_num = 2, frame_num_per_line = 2, frequency = 4 }
        motion = { x = 10.0, y = 10.0, velocity_x = 2.0 }

        [[objects]]
        kind = "tween_bitmap"
        image = "coin"
        steps = [{ duration_ms = 160, y = 100.0, easing = "ease_in_out_quad" }]
        "#,
    )
    .unwrap();

    let mut scheduler = AnimationScheduler::new();
    for object in scene.build_objects().unwrap() {
        scheduler.add(object);
    }
    let mut ctx = PaintContext::new(scene.surface.size());

    for _ in 0..scene.frames {
        scheduler.frame(scene.frame_ms, &mut ctx);
    }

    assert_eq!(ctx.commands().len(), 40);
    let snapshots: Vec<_> = scheduler.iter().map(|(_, o)| o.snapshot()).collect();
    assert_eq!(snapshots[0].kind, "parabolic_sprite");
    assert_eq!(snapshots[1].y, 100.0);
    assert!(matches!(
        scheduler.iter().next().map(|(_, o)| o),
        Some(DisplayObject::ParabolicSprite(_))
    ));
}
