//! # Skirmish Gameplay
//!
//! Simulation core for a two-player platform fighter.
//!
//! This crate provides the per-frame simulation and nothing that touches a
//! window, a clock or the filesystem:
//! - Fighter model and hit-flash bookkeeping
//! - Input abstraction with the two fixed control schemes
//! - Physics and input integration (gravity, movement, jump, attack pulse)
//! - Arena with platform landing
//! - Combat resolution
//! - Match controller with win detection, countdown and rematch
//! - Event bus and rendering seam for the host

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

pub mod arena;
pub mod combat;
pub mod events;
pub mod fighter;
pub mod frame;
pub mod game_state;
pub mod hud;
pub mod input;
pub mod physics;
pub mod rules;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::arena::*;
    pub use crate::combat::*;
    pub use crate::events::*;
    pub use crate::fighter::*;
    pub use crate::frame::*;
    pub use crate::game_state::*;
    pub use crate::hud::*;
    pub use crate::input::*;
    pub use crate::physics::*;
    pub use crate::rules::*;
}

pub use prelude::*;

#[cfg(test)]
mod tests {
    use super::*;
    use skirmish_common::PlayerSlot;

    /// Plays a short scripted exchange through the keyboard layer.
    #[test]
    fn test_scripted_exchange_through_keyboard() {
        let mut controller =
            MatchController::new(MatchRules::default()).expect("default rules are valid");
        let mut keyboard = KeyboardState::new();

        // Let both fighters land
        for _ in 0..60 {
            controller.step(16.0, sample_both(&keyboard), &mut NullSink);
        }

        // Walk towards each other until they touch
        keyboard.apply(KeyEvent::down(KeyCode::Right));
        keyboard.apply(KeyEvent::down(KeyCode::A));
        let mut frames = 0;
        while !skirmish_common::check_collision(
            controller.state().fighter(PlayerSlot::One),
            controller.state().fighter(PlayerSlot::Two),
        ) {
            controller.step(16.0, sample_both(&keyboard), &mut NullSink);
            frames += 1;
            assert!(frames < 200, "fighters never met");
        }
        keyboard.apply(KeyEvent::up(KeyCode::Right));
        keyboard.apply(KeyEvent::up(KeyCode::A));

        // Player two swings
        keyboard.apply(KeyEvent::down(KeyCode::S));
        controller.step(16.0, sample_both(&keyboard), &mut NullSink);

        let state = controller.state();
        assert_eq!(state.fighter(PlayerSlot::One).health, 90);
        assert_eq!(state.fighter(PlayerSlot::Two).health, 100);
        assert!(state.fighter(PlayerSlot::One).facing_right);
        assert!(!state.fighter(PlayerSlot::Two).facing_right);
    }
}
