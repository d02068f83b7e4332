//! Input handling for the two fighters.
//!
//! Raw key state is tracked in a [`KeyboardState`] that is updated by key
//! down/up events. Once per frame each fighter's [`ControlScheme`] samples it
//! into an [`InputState`], so the simulation never sees key identifiers.

use serde::{Deserialize, Serialize};
use skirmish_common::PlayerSlot;
use std::collections::HashSet;

/// Keys the game reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyCode {
    /// A key
    A,
    /// D key
    D,
    /// S key
    S,
    /// W key
    W,
    /// Up arrow
    Up,
    /// Down arrow
    Down,
    /// Left arrow
    Left,
    /// Right arrow
    Right,
    /// Escape
    Escape,
}

/// A key transition delivered by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyEvent {
    /// Key that changed
    pub key: KeyCode,
    /// True for key down, false for key up
    pub pressed: bool,
}

impl KeyEvent {
    /// Key down event.
    #[must_use]
    pub const fn down(key: KeyCode) -> Self {
        Self { key, pressed: true }
    }

    /// Key up event.
    #[must_use]
    pub const fn up(key: KeyCode) -> Self {
        Self {
            key,
            pressed: false,
        }
    }
}

/// Pressed state of every key, as last reported by the host.
#[derive(Debug, Clone, Default)]
pub struct KeyboardState {
    pressed: HashSet<KeyCode>,
}

impl KeyboardState {
    /// Creates a keyboard with nothing held.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies a key down/up event.
    pub fn apply(&mut self, event: KeyEvent) {
        if event.pressed {
            self.pressed.insert(event.key);
        } else {
            self.pressed.remove(&event.key);
        }
    }

    /// Returns whether a key is held.
    #[must_use]
    pub fn is_pressed(&self, key: KeyCode) -> bool {
        self.pressed.contains(&key)
    }
}

/// The four control flags a fighter reads each frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct InputState {
    /// Move left
    pub left: bool,
    /// Move right
    pub right: bool,
    /// Jump
    pub up: bool,
    /// Attack
    pub action: bool,
}

impl InputState {
    /// No input held.
    pub const NONE: Self = Self {
        left: false,
        right: false,
        up: false,
        action: false,
    };

    /// Only left held.
    pub const LEFT: Self = Self {
        left: true,
        ..Self::NONE
    };

    /// Only right held.
    pub const RIGHT: Self = Self {
        right: true,
        ..Self::NONE
    };

    /// Only jump held.
    pub const JUMP: Self = Self {
        up: true,
        ..Self::NONE
    };

    /// Only attack held.
    pub const ATTACK: Self = Self {
        action: true,
        ..Self::NONE
    };
}

/// Key assignment for one fighter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlScheme {
    /// Move left
    pub left: KeyCode,
    /// Move right
    pub right: KeyCode,
    /// Jump
    pub up: KeyCode,
    /// Attack
    pub action: KeyCode,
}

impl ControlScheme {
    /// Arrow keys; down arrow attacks.
    pub const ARROWS: Self = Self {
        left: KeyCode::Left,
        right: KeyCode::Right,
        up: KeyCode::Up,
        action: KeyCode::Down,
    };

    /// WASD; S attacks.
    pub const WASD: Self = Self {
        left: KeyCode::A,
        right: KeyCode::D,
        up: KeyCode::W,
        action: KeyCode::S,
    };

    /// Fixed scheme for a slot: arrows for player one, WASD for player two.
    #[must_use]
    pub const fn for_slot(slot: PlayerSlot) -> Self {
        match slot {
            PlayerSlot::One => Self::ARROWS,
            PlayerSlot::Two => Self::WASD,
        }
    }

    /// Reads this scheme's four flags from the keyboard.
    #[must_use]
    pub fn sample(&self, keyboard: &KeyboardState) -> InputState {
        InputState {
            left: keyboard.is_pressed(self.left),
            right: keyboard.is_pressed(self.right),
            up: keyboard.is_pressed(self.up),
            action: keyboard.is_pressed(self.action),
        }
    }
}

/// Samples both fighters' inputs in slot order.
#[must_use]
pub fn sample_both(keyboard: &KeyboardState) -> [InputState; 2] {
    PlayerSlot::ALL.map(|slot| ControlScheme::for_slot(slot).sample(keyboard))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyboard_apply_events() {
        let mut keyboard = KeyboardState::new();
        keyboard.apply(KeyEvent::down(KeyCode::Left));
        assert!(keyboard.is_pressed(KeyCode::Left));

        keyboard.apply(KeyEvent::up(KeyCode::Left));
        assert!(!keyboard.is_pressed(KeyCode::Left));
    }

    #[test]
    fn test_schemes_are_independent() {
        let mut keyboard = KeyboardState::new();
        keyboard.apply(KeyEvent::down(KeyCode::Left));
        keyboard.apply(KeyEvent::down(KeyCode::S));

        let [one, two] = sample_both(&keyboard);
        assert_eq!(one, InputState::LEFT);
        assert_eq!(two, InputState::ATTACK);
    }

    #[test]
    fn test_arrow_scheme_mapping() {
        let mut keyboard = KeyboardState::new();
        keyboard.apply(KeyEvent::down(KeyCode::Up));
        keyboard.apply(KeyEvent::down(KeyCode::Down));
        keyboard.apply(KeyEvent::down(KeyCode::Right));

        let input = ControlScheme::ARROWS.sample(&keyboard);
        assert!(input.up);
        assert!(input.action);
        assert!(input.right);
        assert!(!input.left);
    }

    #[test]
    fn test_wasd_scheme_mapping() {
        let mut keyboard = KeyboardState::new();
        keyboard.apply(KeyEvent::down(KeyCode::A));
        keyboard.apply(KeyEvent::down(KeyCode::W));

        let input = ControlScheme::for_slot(PlayerSlot::Two).sample(&keyboard);
        assert_eq!(
            input,
            InputState {
                left: true,
                up: true,
                ..InputState::NONE
            }
        );
    }

    #[test]
    fn test_keys_outside_schemes_are_ignored() {
        let mut keyboard = KeyboardState::new();
        keyboard.apply(KeyEvent::down(KeyCode::Escape));
        assert!(keyboard.is_pressed(KeyCode::Escape));
        assert_eq!(sample_both(&keyboard), [InputState::NONE; 2]);
    }
}
