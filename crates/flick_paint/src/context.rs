//! Render surface seam and the recording paint context

use crate::image::ImageHandle;
use crate::transform::Transform2D;
use flick_core::{Rect, Size};

/// Paint attributes applied to a single image draw
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Paint {
    /// Opacity (0.0 to 1.0)
    pub alpha: f32,
    /// Transform applied around the destination (scale/rotation pivots baked in)
    pub transform: Transform2D,
}

impl Default for Paint {
    fn default() -> Self {
        Self {
            alpha: 1.0,
            transform: Transform2D::identity(),
        }
    }
}

impl Paint {
    pub fn new(alpha: f32, transform: Transform2D) -> Self {
        Self { alpha, transform }
    }

    /// Opacity as an 8-bit channel value (0 to 255)
    pub fn alpha_u8(&self) -> u8 {
        (self.alpha.clamp(0.0, 1.0) * 255.0).round() as u8
    }
}

/// The drawing surface an animated object paints itself onto
///
/// Hosts implement this over their real canvas. `size` is read every frame,
/// so surfaces that resize are honored live.
pub trait RenderSurface {
    /// Current drawable extent in surface units
    fn size(&self) -> Size;

    /// Blit `src` (or the whole image when `None`) of `image` into `dest`
    fn draw_image(&mut self, image: &ImageHandle, src: Option<Rect>, dest: Rect, paint: &Paint);
}

/// A paint command for the renderer
#[derive(Clone, Debug, PartialEq)]
pub enum PaintCommand {
    DrawImage {
        image: ImageHandle,
        src: Option<Rect>,
        dest: Rect,
        paint: Paint,
    },
}

/// A surface that records draw calls instead of rasterizing them
///
/// Used for headless runs and tests. Commands accumulate until taken.
#[derive(Debug, Default)]
pub struct PaintContext {
    size: Size,
    commands: Vec<PaintCommand>,
}

impl PaintContext {
    pub fn new(size: Size) -> Self {
        Self {
            size,
            commands: Vec::new(),
        }
    }

    /// Change the surface extent (e.g. a window resize)
    pub fn set_size(&mut self, size: Size) {
        self.size = size;
    }

    /// Get all recorded commands
    pub fn commands(&self) -> &[PaintCommand] {
        &self.commands
    }

    /// Take ownership of recorded commands
    pub fn take_commands(&mut self) -> Vec<PaintCommand> {
        std::mem::take(&mut self.commands)
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }
}

impl RenderSurface for PaintContext {
    fn size(&self) -> Size {
        self.size
    }

    fn draw_image(&mut self, image: &ImageHandle, src: Option<Rect>, dest: Rect, paint: &Paint) {
        tracing::trace!(
            image = image.key(),
            x = dest.x(),
            y = dest.y(),
            alpha = paint.alpha,
            "draw_image"
        );
        self.commands.push(PaintCommand::DrawImage {
            image: image.clone(),
            src,
            dest,
            paint: *paint,
        });
    }
}
