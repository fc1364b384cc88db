//! Opaque image handles
//!
//! Decoding and texture upload belong to the host. The animation core only
//! needs a stable key to hand back to the surface and the pixel dimensions
//! of the decoded image.

use flick_core::{Rect, Size};
use std::sync::Arc;

/// A decoded image owned by the host renderer
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ImageHandle {
    key: Arc<str>,
    width: u32,
    height: u32,
}

impl ImageHandle {
    pub fn new(key: impl Into<Arc<str>>, width: u32, height: u32) -> Self {
        Self {
            key: key.into(),
            width,
            height,
        }
    }

    /// Host-side identifier of the image
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Pixel size of the image
    pub fn size(&self) -> Size {
        Size::new(self.width as f32, self.height as f32)
    }

    /// The whole image as a source rectangle
    pub fn bounds(&self) -> Rect {
        self.size().to_rect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_bounds() {
        let image = ImageHandle::new("coin.png", 64, 32);
        assert_eq!(image.key(), "coin.png");
        assert_eq!(image.bounds(), Rect::new(0.0, 0.0, 64.0, 32.0));
    }
}
