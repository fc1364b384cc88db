//! Single-slot animation callbacks
//!
//! Every event an animated object exposes (step completed, edge hit, sprite
//! finished) has exactly one listener slot. Setting a new callback replaces
//! the previous one.

use std::fmt;

/// A callback invoked synchronously from the tick that raised the event
pub type AnimCallback = Box<dyn FnMut() + Send>;

/// Holds at most one [`AnimCallback`]
#[derive(Default)]
pub struct CallbackSlot {
    callback: Option<AnimCallback>,
}

impl CallbackSlot {
    pub fn new() -> Self {
        Self { callback: None }
    }

    /// Create a slot already holding `f`
    pub fn with<F: FnMut() + Send + 'static>(f: F) -> Self {
        Self {
            callback: Some(Box::new(f)),
        }
    }

    /// Replace the stored callback
    pub fn set<F: FnMut() + Send + 'static>(&mut self, f: F) {
        self.callback = Some(Box::new(f));
    }

    /// Store an already boxed callback
    pub fn set_boxed(&mut self, f: AnimCallback) {
        self.callback = Some(f);
    }

    pub fn clear(&mut self) {
        self.callback = None;
    }

    pub fn is_set(&self) -> bool {
        self.callback.is_some()
    }

    /// Invoke the callback if one is set. Returns whether anything ran.
    pub fn fire(&mut self) -> bool {
        match self.callback.as_mut() {
            Some(cb) => {
                cb();
                true
            }
            None => false,
        }
    }
}

impl fmt::Debug for CallbackSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CallbackSlot")
            .field("set", &self.is_set())
            .finish()
    }
}
