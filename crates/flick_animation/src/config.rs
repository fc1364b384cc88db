//! Scene configuration
//!
//! Serde model of a scene file: the surface, the images it references and
//! the animated objects to build. Objects are built through the same
//! constructors and builders as in code, so the same validation applies.

use crate::easing::Easing;
use crate::objects::{
    DisplayObject, MotionBuilder, ParabolicMotionBitmap, ParabolicMotionSpriteSheet, TweenBitmap,
    TweenBuilder, TweenSpriteSheet,
};
use crate::sprite::SpriteSheet;
use crate::transform::TransformValues;
use crate::tween::{AnimationStep, TweenTargets};
use flick_core::{Result, Size};
use flick_paint::ImageHandle;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A complete scene (scene.toml)
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SceneConfig {
    #[serde(default)]
    pub surface: SurfaceConfig,
    /// Frames to run
    #[serde(default = "default_frames")]
    pub frames: u32,
    /// Wall time per frame (milliseconds)
    #[serde(default = "default_frame_ms")]
    pub frame_ms: f32,
    #[serde(default)]
    pub images: Vec<ImageConfig>,
    #[serde(default)]
    pub objects: Vec<ObjectConfig>,
}

fn default_frames() -> u32 {
    60
}

fn default_frame_ms() -> f32 {
    16.0
}

fn default_true() -> bool {
    true
}

fn default_one() -> u32 {
    1
}

/// Render surface extent
#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
pub struct SurfaceConfig {
    pub width: f32,
    pub height: f32,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            width: 480.0,
            height: 320.0,
        }
    }
}

impl SurfaceConfig {
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

/// An image the host has loaded, referenced by key
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ImageConfig {
    pub key: String,
    pub width: u32,
    pub height: u32,
}

/// Sprite sheet layout and playback
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SheetConfig {
    pub frame_width: f32,
    pub frame_height: f32,
    pub frame_num: u32,
    pub frame_num_per_line: u32,
    /// Ticks per frame advance
    #[serde(default = "default_one")]
    pub frequency: u32,
    #[serde(default)]
    pub start_frame: u32,
    #[serde(default = "default_true")]
    pub looping: bool,
}

impl SheetConfig {
    pub fn sheet(&self) -> Result<SpriteSheet> {
        SpriteSheet::new(
            self.frame_width,
            self.frame_height,
            self.frame_num,
            self.frame_num_per_line,
        )
    }
}

/// One tween step. Unset properties are left untouched; a step with no
/// targets is a wait.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct StepConfig {
    #[serde(default)]
    pub duration_ms: u32,
    #[serde(default)]
    pub easing: Easing,
    pub x: Option<f32>,
    pub y: Option<f32>,
    pub alpha: Option<f32>,
    pub scale_x: Option<f32>,
    pub scale_y: Option<f32>,
    pub rotation: Option<f32>,
}

impl StepConfig {
    pub fn to_step(&self) -> AnimationStep {
        let targets = TweenTargets {
            x: self.x,
            y: self.y,
            alpha: self.alpha,
            scale_x: self.scale_x,
            scale_y: self.scale_y,
            rotation: self.rotation,
        };
        AnimationStep::to(self.duration_ms, targets).with_easing(self.easing)
    }
}

/// Projectile start state and physics
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct MotionConfig {
    pub x: f32,
    pub y: f32,
    pub velocity_x: f32,
    pub velocity_y: f32,
    pub acceleration_x: f32,
    pub acceleration_y: f32,
    pub restitution_x: f32,
    pub restitution_y: f32,
    pub bottom: bool,
    pub left: bool,
    pub right: bool,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            velocity_x: 0.0,
            velocity_y: 0.0,
            acceleration_x: 0.0,
            acceleration_y: 0.98,
            restitution_x: 0.8,
            restitution_y: 0.8,
            bottom: true,
            left: true,
            right: true,
        }
    }
}

impl MotionConfig {
    fn apply<T: MotionBuilder>(&self, object: T) -> T {
        object
            .transform(self.x, self.y)
            .initial_velocity_x(self.velocity_x)
            .initial_velocity_y(self.velocity_y)
            .acceleration_x(self.acceleration_x)
            .acceleration_y(self.acceleration_y)
            .coefficient_restitution_x(self.restitution_x)
            .coefficient_restitution_y(self.restitution_y)
            .coefficient_bottom(self.bottom)
            .coefficient_left(self.left)
            .coefficient_right(self.right)
    }
}

/// Scale and rotation pivots of a tweened object, relative to its position
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct RegistrationConfig {
    pub scale: Option<[f32; 2]>,
    pub rotate: Option<[f32; 2]>,
}

/// One animated object, tagged by `kind`
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ObjectConfig {
    TweenBitmap {
        image: Option<String>,
        #[serde(default)]
        transform: TransformValues,
        #[serde(default)]
        looping: bool,
        #[serde(default)]
        steps: Vec<StepConfig>,
        display_size: Option<[f32; 2]>,
        #[serde(default)]
        registration: RegistrationConfig,
    },
    TweenSprite {
        image: Option<String>,
        sheet: SheetConfig,
        #[serde(default)]
        transform: TransformValues,
        #[serde(default)]
        looping: bool,
        #[serde(default)]
        steps: Vec<StepConfig>,
        display_frame_size: Option<[f32; 2]>,
        #[serde(default)]
        registration: RegistrationConfig,
    },
    ParabolicBitmap {
        image: Option<String>,
        #[serde(default)]
        motion: MotionConfig,
        display_size: Option<[f32; 2]>,
    },
    ParabolicSprite {
        image: Option<String>,
        sheet: SheetConfig,
        #[serde(default)]
        motion: MotionConfig,
        display_frame_size: Option<[f32; 2]>,
    },
}

fn resolve_image<F>(key: &Option<String>, lookup: &F) -> Option<ImageHandle>
where
    F: Fn(&str) -> Option<ImageHandle>,
{
    let key = key.as_deref()?;
    let image = lookup(key);
    if image.is_none() {
        tracing::warn!(key, "scene references an unknown image");
    }
    image
}

fn with_steps<T: TweenBuilder>(
    mut object: T,
    transform: TransformValues,
    looping: bool,
    registration: RegistrationConfig,
    steps: &[StepConfig],
) -> T {
    if let Some([x, y]) = registration.scale {
        object = object.scale_registration(x, y);
    }
    if let Some([x, y]) = registration.rotate {
        object = object.rotate_registration(x, y);
    }
    steps
        .iter()
        .fold(object.transform_all(transform).looping(looping), |o, s| {
            o.step(s.to_step())
        })
}

impl ObjectConfig {
    /// Build the display object, resolving image keys through `images`.
    ///
    /// An unknown key builds an object without an image (its draws are
    /// skipped). Invalid sprite configuration is an error.
    pub fn build<F>(&self, images: F) -> Result<DisplayObject>
    where
        F: Fn(&str) -> Option<ImageHandle>,
    {
        let object = match self {
            ObjectConfig::TweenBitmap {
                image,
                transform,
                looping,
                steps,
                display_size,
                registration,
            } => {
                let mut o = TweenBitmap::new(resolve_image(image, &images));
                if let Some([w, h]) = *display_size {
                    o = o.display_size(w, h);
                }
                with_steps(o, *transform, *looping, *registration, steps).into()
            }
            ObjectConfig::TweenSprite {
                image,
                sheet,
                transform,
                looping,
                steps,
                display_frame_size,
                registration,
            } => {
                let mut o = TweenSpriteSheet::new(resolve_image(image, &images), sheet.sheet()?)
                    .frequency(sheet.frequency)?
                    .start_frame(sheet.start_frame)?
                    .sprite_looping(sheet.looping);
                if let Some([w, h]) = *display_frame_size {
                    o = o.display_frame_size(w, h);
                }
                with_steps(o, *transform, *looping, *registration, steps).into()
            }
            ObjectConfig::ParabolicBitmap {
                image,
                motion,
                display_size,
            } => {
                let mut o = ParabolicMotionBitmap::new(resolve_image(image, &images));
                if let Some([w, h]) = *display_size {
                    o = o.display_size(w, h);
                }
                motion.apply(o).into()
            }
            ObjectConfig::ParabolicSprite {
                image,
                sheet,
                motion,
                display_frame_size,
            } => {
                let mut o =
                    ParabolicMotionSpriteSheet::new(resolve_image(image, &images), sheet.sheet()?)
                        .frequency(sheet.frequency)?
                        .start_frame(sheet.start_frame)?
                        .sprite_looping(sheet.looping);
                if let Some([w, h]) = *display_frame_size {
                    o = o.display_frame_size(w, h);
                }
                motion.apply(o).into()
            }
        };
        Ok(object)
    }
}

impl SceneConfig {
    /// Image handles keyed by name
    pub fn image_table(&self) -> HashMap<String, ImageHandle> {
        self.images
            .iter()
            .map(|i| (i.key.clone(), ImageHandle::new(i.key.as_str(), i.width, i.height)))
            .collect()
    }

    /// Build every object, in draw order
    pub fn build_objects(&self) -> Result<Vec<DisplayObject>> {
        let table = self.image_table();
        self.objects
            .iter()
            .map(|o| o.build(|key| table.get(key).cloned()))
            .collect()
    }
}
