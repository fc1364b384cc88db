//! Sprite-sheet frame sequencing
//!
//! A [`SpriteSheet`] describes the grid layout of frames in an image. A
//! [`SpriteFrameSequencer`] steps through those frames once every
//! `frame_rate_divisor` ticks.
//!
//! Frame advancement is the one piece of animation state hosts may touch from
//! another thread (pausing from a UI thread while the render loop ticks), so
//! the frame state sits behind a mutex and is shared with
//! [`SpritePauseHandle`].

use flick_core::{AnimationError, CallbackSlot, Rect, Result, Size};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Grid geometry of a sprite sheet, fixed at construction
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpriteSheet {
    frame_width: f32,
    frame_height: f32,
    frame_num: u32,
    frame_num_per_line: u32,
}

impl SpriteSheet {
    /// Frames are laid out row-major, `frame_num_per_line` per row.
    pub fn new(
        frame_width: f32,
        frame_height: f32,
        frame_num: u32,
        frame_num_per_line: u32,
    ) -> Result<Self> {
        if frame_num == 0 {
            return Err(AnimationError::ZeroFrameCount);
        }
        if frame_num_per_line == 0 {
            return Err(AnimationError::ZeroFramesPerLine);
        }
        let valid = |v: f32| v.is_finite() && v > 0.0;
        if !valid(frame_width) || !valid(frame_height) {
            return Err(AnimationError::InvalidFrameSize {
                width: frame_width,
                height: frame_height,
            });
        }
        Ok(Self {
            frame_width,
            frame_height,
            frame_num,
            frame_num_per_line,
        })
    }

    pub fn frame_width(&self) -> f32 {
        self.frame_width
    }

    pub fn frame_height(&self) -> f32 {
        self.frame_height
    }

    pub fn frame_size(&self) -> Size {
        Size::new(self.frame_width, self.frame_height)
    }

    pub fn frame_num(&self) -> u32 {
        self.frame_num
    }

    pub fn frame_num_per_line(&self) -> u32 {
        self.frame_num_per_line
    }

    /// Source rectangle of `frame` on the sheet
    pub fn frame_rect(&self, frame: u32) -> Rect {
        let row = frame / self.frame_num_per_line;
        let col = frame % self.frame_num_per_line;
        Rect::new(
            col as f32 * self.frame_width,
            row as f32 * self.frame_height,
            self.frame_width,
            self.frame_height,
        )
    }
}

#[derive(Debug)]
struct SpriteFrameState {
    frame_index: u32,
    tick_counter: u32,
    frame_rate_divisor: u32,
    looping: bool,
    paused: bool,
    finished: bool,
}

fn lock(state: &Mutex<SpriteFrameState>) -> MutexGuard<'_, SpriteFrameState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Pause control for sprite-bearing objects
pub trait SpritePause {
    fn sprite_pause(&mut self, pause: bool);
    fn is_sprite_paused(&self) -> bool;
}

/// Thread-safe handle for pausing a sprite sequencer from outside the render loop
#[derive(Clone, Debug)]
pub struct SpritePauseHandle {
    state: Arc<Mutex<SpriteFrameState>>,
}

impl SpritePauseHandle {
    pub fn set_paused(&self, paused: bool) {
        lock(&self.state).paused = paused;
    }

    pub fn is_paused(&self) -> bool {
        lock(&self.state).paused
    }

    pub fn frame_index(&self) -> u32 {
        lock(&self.state).frame_index
    }
}

/// Advances sprite frames on a frame-rate divisor
#[derive(Debug)]
pub struct SpriteFrameSequencer {
    sheet: SpriteSheet,
    state: Arc<Mutex<SpriteFrameState>>,
    on_finish: CallbackSlot,
}

impl SpriteFrameSequencer {
    /// Loops from frame 0, advancing every tick
    pub fn new(sheet: SpriteSheet) -> Self {
        Self {
            sheet,
            state: Arc::new(Mutex::new(SpriteFrameState {
                frame_index: 0,
                tick_counter: 0,
                frame_rate_divisor: 1,
                looping: true,
                paused: false,
                finished: false,
            })),
            on_finish: CallbackSlot::new(),
        }
    }

    /// Builder: ticks per frame advance. Zero is rejected.
    pub fn frequency(self, divisor: u32) -> Result<Self> {
        self.set_frequency(divisor)?;
        Ok(self)
    }

    pub fn set_frequency(&self, divisor: u32) -> Result<()> {
        if divisor == 0 {
            return Err(AnimationError::ZeroFrameRate);
        }
        let mut state = lock(&self.state);
        state.frame_rate_divisor = divisor;
        state.tick_counter = state.tick_counter.min(divisor - 1);
        Ok(())
    }

    /// Builder: first frame shown. Must exist on the sheet.
    pub fn start_frame(self, frame: u32) -> Result<Self> {
        self.set_frame(frame)?;
        Ok(self)
    }

    /// Jump to `frame`, restarting the hold period
    pub fn set_frame(&self, frame: u32) -> Result<()> {
        if frame >= self.sheet.frame_num {
            return Err(AnimationError::FrameOutOfRange {
                frame,
                frame_num: self.sheet.frame_num,
            });
        }
        let mut state = lock(&self.state);
        state.frame_index = frame;
        state.tick_counter = 0;
        state.finished = false;
        Ok(())
    }

    /// Builder: wrap to frame 0 after the last frame, or hold on it
    pub fn looping(self, looping: bool) -> Self {
        self.set_loop(looping);
        self
    }

    pub fn set_loop(&self, looping: bool) {
        lock(&self.state).looping = looping;
    }

    /// Builder: callback fired once when a non-looping sequence ends
    pub fn on_finish<F: FnMut() + Send + 'static>(mut self, f: F) -> Self {
        self.on_finish.set(f);
        self
    }

    pub fn set_on_finish<F: FnMut() + Send + 'static>(&mut self, f: F) {
        self.on_finish.set(f);
    }

    pub fn set_paused(&self, paused: bool) {
        lock(&self.state).paused = paused;
    }

    pub fn is_paused(&self) -> bool {
        lock(&self.state).paused
    }

    /// Handle for pausing from another thread
    pub fn pause_handle(&self) -> SpritePauseHandle {
        SpritePauseHandle {
            state: Arc::clone(&self.state),
        }
    }

    /// Count one render tick, advancing the frame when the divisor is reached
    pub fn tick(&mut self) {
        let finished_now = {
            let mut state = lock(&self.state);
            if state.paused {
                return;
            }
            state.tick_counter += 1;
            if state.tick_counter < state.frame_rate_divisor {
                return;
            }
            state.tick_counter = 0;

            if state.frame_index + 1 < self.sheet.frame_num {
                state.frame_index += 1;
                false
            } else if state.looping {
                state.frame_index = 0;
                false
            } else if !state.finished {
                state.finished = true;
                true
            } else {
                false
            }
        };

        // Fired outside the lock so the callback may use a pause handle.
        if finished_now {
            tracing::debug!(frame = self.sheet.frame_num - 1, "sprite sequence finished");
            self.on_finish.fire();
        }
    }

    pub fn sheet(&self) -> &SpriteSheet {
        &self.sheet
    }

    pub fn frame_index(&self) -> u32 {
        lock(&self.state).frame_index
    }

    pub fn tick_counter(&self) -> u32 {
        lock(&self.state).tick_counter
    }

    pub fn frame_rate_divisor(&self) -> u32 {
        lock(&self.state).frame_rate_divisor
    }

    /// True once a non-looping sequence has held its last frame to completion
    pub fn is_finished(&self) -> bool {
        lock(&self.state).finished
    }

    /// Sheet sub-rectangle for the current frame
    pub fn frame_source_rect(&self) -> Rect {
        self.sheet.frame_rect(self.frame_index())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::thread;

    fn sheet(frames: u32, per_line: u32) -> SpriteSheet {
        SpriteSheet::new(32.0, 16.0, frames, per_line).unwrap()
    }

    #[test]
    fn test_sheet_validation() {
        assert_eq!(
            SpriteSheet::new(32.0, 32.0, 0, 4),
            Err(AnimationError::ZeroFrameCount)
        );
        assert_eq!(
            SpriteSheet::new(32.0, 32.0, 4, 0),
            Err(AnimationError::ZeroFramesPerLine)
        );
        assert!(matches!(
            SpriteSheet::new(0.0, 32.0, 4, 4),
            Err(AnimationError::InvalidFrameSize { .. })
        ));
    }

    #[test]
    fn test_sequencer_validation() {
        assert!(matches!(
            SpriteFrameSequencer::new(sheet(4, 4)).frequency(0),
            Err(AnimationError::ZeroFrameRate)
        ));
        assert!(matches!(
            SpriteFrameSequencer::new(sheet(4, 4)).start_frame(4),
            Err(AnimationError::FrameOutOfRange {
                frame: 4,
                frame_num: 4
            })
        ));
        assert!(SpriteFrameSequencer::new(sheet(4, 4)).start_frame(3).is_ok());
    }

    #[test]
    fn test_frame_source_rect_row_major() {
        let seq = SpriteFrameSequencer::new(sheet(8, 3)).start_frame(4).unwrap();
        // frame 4 -> row 1, col 1
        assert_eq!(seq.frame_source_rect(), Rect::new(32.0, 16.0, 32.0, 16.0));
        assert_eq!(seq.sheet().frame_rect(7), Rect::new(32.0, 32.0, 32.0, 16.0));
    }

    #[test]
    fn test_divisor_controls_advance() {
        let mut seq = SpriteFrameSequencer::new(sheet(4, 4)).frequency(3).unwrap();
        seq.tick();
        seq.tick();
        assert_eq!(seq.frame_index(), 0);
        assert_eq!(seq.tick_counter(), 2);
        seq.tick();
        assert_eq!(seq.frame_index(), 1);
        assert_eq!(seq.tick_counter(), 0);
    }

    #[test]
    fn test_loop_wraps_to_first_frame() {
        let mut seq = SpriteFrameSequencer::new(sheet(3, 3));
        let frames: Vec<u32> = (0..5)
            .map(|_| {
                seq.tick();
                seq.frame_index()
            })
            .collect();
        assert_eq!(frames, vec![1, 2, 0, 1, 2]);
    }

    #[test]
    fn test_one_shot_holds_and_fires_once() {
        let fired = Arc::new(AtomicU32::new(0));
        let f = fired.clone();
        let mut seq = SpriteFrameSequencer::new(sheet(4, 4))
            .looping(false)
            .on_finish(move || {
                f.fetch_add(1, Ordering::SeqCst);
            });

        for _ in 0..3 {
            seq.tick();
        }
        assert_eq!(seq.frame_index(), 3);
        assert_eq!(fired.load(Ordering::SeqCst), 0);

        for _ in 0..10 {
            seq.tick();
            assert_eq!(seq.frame_index(), 3);
        }
        assert_eq!(fired.load(Ordering::SeqCst), 1);
        assert!(seq.is_finished());
    }

    #[test]
    fn test_pause_freezes_frame_and_counter() {
        let mut seq = SpriteFrameSequencer::new(sheet(4, 4)).frequency(2).unwrap();
        seq.tick();
        seq.set_paused(true);
        for _ in 0..20 {
            seq.tick();
            assert_eq!(seq.frame_index(), 0);
            assert_eq!(seq.tick_counter(), 1);
        }
        seq.set_paused(false);
        seq.tick();
        assert_eq!(seq.frame_index(), 1);
    }

    #[test]
    fn test_pause_from_other_thread() {
        let mut seq = SpriteFrameSequencer::new(sheet(4, 4));
        let handle = seq.pause_handle();

        thread::spawn(move || handle.set_paused(true))
            .join()
            .unwrap();

        assert!(seq.is_paused());
        seq.tick();
        assert_eq!(seq.frame_index(), 0);
    }

    #[test]
    fn test_finish_callback_can_pause_without_deadlock() {
        let seq = SpriteFrameSequencer::new(sheet(2, 2)).looping(false);
        let handle = seq.pause_handle();
        let mut seq = seq.on_finish(move || handle.set_paused(true));

        seq.tick();
        seq.tick();
        assert!(seq.is_paused());
    }
}
