//! Input handling for the engine.
//!
//! Key down/up events arrive asynchronously over a channel from whatever
//! produces them (a window, the automated pilot, a test). They are applied to
//! the keyboard state at the start of each frame, then sampled per fighter.

use crossbeam_channel::{unbounded, Receiver, Sender};
use tracing::debug;

use skirmish_gameplay::input::{sample_both, InputState, KeyCode, KeyEvent, KeyboardState};

/// Collects key events and provides per-frame fighter input.
#[derive(Debug)]
pub struct InputHandler {
    /// Keeps the channel open and hands out producer handles
    sender: Sender<KeyEvent>,
    /// Pending key events
    receiver: Receiver<KeyEvent>,
    /// Held keys as of the last pump
    keyboard: KeyboardState,
    /// Escape was pressed
    quit_requested: bool,
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl InputHandler {
    /// Create a new input handler.
    #[must_use]
    pub fn new() -> Self {
        let (sender, receiver) = unbounded();
        Self {
            sender,
            receiver,
            keyboard: KeyboardState::new(),
            quit_requested: false,
        }
    }

    /// Handle for producing key events, possibly from another thread.
    #[must_use]
    pub fn sender(&self) -> Sender<KeyEvent> {
        self.sender.clone()
    }

    /// Applies every pending key event. Returns how many were applied.
    pub fn pump(&mut self) -> usize {
        let mut applied = 0;
        for event in self.receiver.try_iter() {
            if event.key == KeyCode::Escape && event.pressed {
                debug!("Quit requested");
                self.quit_requested = true;
            }
            self.keyboard.apply(event);
            applied += 1;
        }
        applied
    }

    /// Both fighters' input for this frame.
    #[must_use]
    pub fn inputs(&self) -> [InputState; 2] {
        sample_both(&self.keyboard)
    }

    /// Returns whether Escape has been pressed.
    #[must_use]
    pub fn quit_requested(&self) -> bool {
        self.quit_requested
    }
}
