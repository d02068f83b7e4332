//! Per-frame physics and input integration for a single fighter.
//!
//! Gravity, horizontal movement, arena-edge clamping, the ground plane, the
//! jump impulse and the attack pulse are all applied here. Platform landings
//! happen later in the frame, see [`crate::arena`].

use serde::{Deserialize, Serialize};

use crate::fighter::Fighter;
use crate::input::InputState;
use crate::rules::MatchRules;

/// Integrator configuration, extracted from [`MatchRules`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Integrator {
    /// Added to vertical speed every frame (positive = down)
    pub gravity: f32,
    /// Upward speed set when a jump starts
    pub jump_impulse: f32,
    /// Frames an attack blocks the next one
    pub attack_cooldown_frames: u32,
    /// Right edge of the arena
    pub arena_width: f32,
    /// Y of the ground plane
    pub ground_height: f32,
}

impl Integrator {
    /// Builds the integrator for a rule set.
    #[must_use]
    pub fn from_rules(rules: &MatchRules) -> Self {
        Self {
            gravity: rules.gravity,
            jump_impulse: rules.jump_impulse,
            attack_cooldown_frames: rules.attack_cooldown_frames,
            arena_width: rules.arena_width,
            ground_height: rules.ground_height(),
        }
    }

    /// Advances one fighter by exactly one frame.
    ///
    /// Step order matters: when both left and right are held, right is
    /// applied last and wins the facing; the ground clamp runs before the
    /// jump check so a fighter that lands this frame can jump immediately.
    pub fn update(&self, fighter: &mut Fighter, input: InputState) {
        fighter.vertical_speed += self.gravity;
        fighter.position.y += fighter.vertical_speed;

        if input.left {
            fighter.position.x -= fighter.move_speed;
            fighter.facing_right = false;
        }
        if input.right {
            fighter.position.x += fighter.move_speed;
            fighter.facing_right = true;
        }

        let max_x = self.arena_width - fighter.size.x;
        if fighter.position.x < 0.0 {
            fighter.position.x = 0.0;
        } else if fighter.position.x > max_x {
            fighter.position.x = max_x;
        }

        if fighter.feet() > self.ground_height {
            fighter.land_on(self.ground_height);
        }

        if input.up && !fighter.jumping {
            fighter.vertical_speed = -self.jump_impulse;
            fighter.jumping = true;
        }

        if fighter.attack_cooldown > 0 {
            fighter.attack_cooldown -= 1;
        }

        if input.action && fighter.attack_cooldown == 0 {
            fighter.is_attacking = true;
            fighter.attack_cooldown = self.attack_cooldown_frames;
        } else {
            fighter.is_attacking = false;
        }
    }
}
