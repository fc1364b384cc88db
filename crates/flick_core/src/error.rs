//! Configuration error types
//!
//! Only construction-time validation can fail. Ticking and drawing degrade
//! gracefully instead of returning errors.

use thiserror::Error;

/// Errors raised while configuring an animated object
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnimationError {
    /// A sprite sheet must contain at least one frame
    #[error("Sprite sheet has no frames")]
    ZeroFrameCount,

    /// A sprite sheet row must hold at least one frame
    #[error("Sprite sheet must have at least one frame per line")]
    ZeroFramesPerLine,

    /// Frame dimensions must be positive
    #[error("Invalid frame size: {width}x{height}")]
    InvalidFrameSize { width: f32, height: f32 },

    /// Requested frame index does not exist on the sheet
    #[error("Frame {frame} out of range (sheet has {frame_num} frames)")]
    FrameOutOfRange { frame: u32, frame_num: u32 },

    /// Frame-rate divisor must be at least one tick per frame
    #[error("Frame rate divisor must be greater than zero")]
    ZeroFrameRate,
}

/// Result type for animation configuration
pub type Result<T> = std::result::Result<T, AnimationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = AnimationError::FrameOutOfRange {
            frame: 9,
            frame_num: 4,
        };
        assert_eq!(
            err.to_string(),
            "Frame 9 out of range (sheet has 4 frames)"
        );
        assert_eq!(
            AnimationError::ZeroFrameRate.to_string(),
            "Frame rate divisor must be greater than zero"
        );
    }
}
