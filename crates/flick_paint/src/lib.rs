//! Flick Paint
//!
//! The boundary between the animation core and whatever actually puts pixels
//! on screen.
//!
//! # Features
//!
//! - `RenderSurface` trait: surface extent plus a single image-blit call
//! - `Paint` attributes: opacity and an affine transform per draw
//! - `PaintContext`: a recording surface for headless runs and tests

pub mod context;
pub mod image;
pub mod transform;

pub use context::{Paint, PaintCommand, PaintContext, RenderSurface};
pub use image::ImageHandle;
pub use transform::Transform2D;
