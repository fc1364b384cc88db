//! Flick Core
//!
//! Foundational types shared by the Flick animation crates:
//!
//! - **Geometry**: points, sizes, rectangles and vectors in surface space
//! - **Errors**: construction-time validation failures
//! - **Callbacks**: single-slot observers fired from animation ticks
//!
//! # Example
//!
//! ```rust
//! use flick_core::{CallbackSlot, Rect, Size};
//!
//! let surface = Size::new(320.0, 240.0);
//! let bounds: Rect = surface.into();
//! assert_eq!(bounds.bottom(), 240.0);
//!
//! let mut on_hit = CallbackSlot::with(|| {});
//! assert!(on_hit.fire());
//! ```

pub mod callback;
pub mod error;
pub mod geometry;

pub use callback::{AnimCallback, CallbackSlot};
pub use error::{AnimationError, Result};
pub use geometry::{Point, Rect, Size, Vec2};
