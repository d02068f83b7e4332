//! Fighter model: per-character mutable combat state.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use skirmish_common::{Bounded, PlayerSlot, Rect};

use crate::rules::MatchRules;

/// Which sprite a fighter should be drawn with this frame.
///
/// This enum is used to communicate the current look to the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum FighterPose {
    /// Regular body sprite
    #[default]
    Normal,
    /// Attack-effect sprite, drawn translucent
    Attacking,
    /// Hit-flash sprite
    Hit,
}

/// A controllable combat entity.
///
/// `position` is the top-left corner of the bounding box in canvas pixels.
/// Health may drop below zero between the knockout and the end of the frame;
/// it is only clamped when displayed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fighter {
    /// Side of the match this fighter plays for
    pub slot: PlayerSlot,
    /// Display name drawn above the fighter
    pub name: String,
    /// Top-left corner
    pub position: Vec2,
    /// Bounding box size, fixed for the match
    pub size: Vec2,
    /// Horizontal distance per frame while moving
    pub move_speed: f32,
    /// Signed vertical speed, positive is downward
    pub vertical_speed: f32,
    /// Airborne from a jump
    pub jumping: bool,
    /// Last horizontal direction pressed
    pub facing_right: bool,
    /// Remaining health
    pub health: i32,
    /// True only on the frame an attack starts
    pub is_attacking: bool,
    /// Frames until another attack may start
    pub attack_cooldown: u32,
    /// Attack effect should be drawn
    pub attack_effect_active: bool,
    /// Took damage and the hit flash has not started yet
    pub is_hit: bool,
    /// Frames of hit flash remaining
    pub hit_cooldown: u32,
}

impl Fighter {
    /// Creates a fighter at its slot's spawn point.
    #[must_use]
    pub fn spawn(slot: PlayerSlot, rules: &MatchRules) -> Self {
        Self {
            slot,
            name: rules.player_name(slot).to_string(),
            position: rules.spawn_position(slot),
            size: rules.fighter_size(),
            move_speed: rules.move_speed,
            vertical_speed: 0.0,
            jumping: false,
            facing_right: slot == PlayerSlot::One,
            health: rules.starting_health,
            is_attacking: false,
            attack_cooldown: 0,
            attack_effect_active: false,
            is_hit: false,
            hit_cooldown: 0,
        }
    }

    /// Bottom edge of the bounding box.
    #[must_use]
    pub fn feet(&self) -> f32 {
        self.position.y + self.size.y
    }

    /// Returns true when health has run out.
    #[must_use]
    pub fn is_knocked_out(&self) -> bool {
        self.health <= 0
    }

    /// Stops vertical motion with the feet resting at `surface_y`.
    pub fn land_on(&mut self, surface_y: f32) {
        self.position.y = surface_y - self.size.y;
        self.vertical_speed = 0.0;
        self.jumping = false;
    }

    /// Returns true while the hit flash is showing.
    #[must_use]
    pub fn is_flashing(&self) -> bool {
        self.hit_cooldown > 0
    }

    /// Advances the hit flash by one frame.
    ///
    /// A pending hit starts a fresh flash of `flash_frames` and is consumed;
    /// otherwise a running flash counts down.
    pub fn update_hit_flash(&mut self, flash_frames: u32) {
        if self.is_hit {
            self.is_hit = false;
            self.hit_cooldown = flash_frames;
        } else if self.hit_cooldown > 0 {
            self.hit_cooldown -= 1;
        }
    }

    /// Sprite to draw this frame.
    #[must_use]
    pub fn pose(&self) -> FighterPose {
        if self.is_attacking {
            FighterPose::Attacking
        } else if self.is_flashing() {
            FighterPose::Hit
        } else {
            FighterPose::Normal
        }
    }
}

impl Bounded for Fighter {
    fn bounds(&self) -> Rect {
        Rect::from_position_size(self.position, self.size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawn_defaults() {
        let rules = MatchRules::default();
        let one = Fighter::spawn(PlayerSlot::One, &rules);
        let two = Fighter::spawn(PlayerSlot::Two, &rules);

        assert_eq!(one.position, Vec2::new(50.0, 0.0));
        assert_eq!(two.position, Vec2::new(940.0, 0.0));
        assert!(one.facing_right);
        assert!(!two.facing_right);
        assert_eq!(one.health, 100);
        assert_eq!(one.size, Vec2::new(40.0, 60.0));
        assert_eq!(two.name, "Player 2");
    }

    #[test]
    fn test_bounds_match_position_and_size() {
        let rules = MatchRules::default();
        let fighter = Fighter::spawn(PlayerSlot::One, &rules);
        assert_eq!(fighter.bounds(), Rect::new(50.0, 0.0, 40.0, 60.0));
    }

    #[test]
    fn test_land_on_clears_jump() {
        let rules = MatchRules::default();
        let mut fighter = Fighter::spawn(PlayerSlot::One, &rules);
        fighter.jumping = true;
        fighter.vertical_speed = 7.0;

        fighter.land_on(486.0);

        assert_eq!(fighter.position.y, 426.0);
        assert_eq!(fighter.feet(), 486.0);
        assert_eq!(fighter.vertical_speed, 0.0);
        assert!(!fighter.jumping);
    }

    #[test]
    fn test_knocked_out_at_zero_or_below() {
        let rules = MatchRules::default();
        let mut fighter = Fighter::spawn(PlayerSlot::Two, &rules);
        assert!(!fighter.is_knocked_out());

        fighter.health = 0;
        assert!(fighter.is_knocked_out());

        fighter.health = -20;
        assert!(fighter.is_knocked_out());
    }

    #[test]
    fn test_hit_flash_lifecycle() {
        let rules = MatchRules::default();
        let mut fighter = Fighter::spawn(PlayerSlot::One, &rules);
        fighter.is_hit = true;

        fighter.update_hit_flash(3);
        assert!(!fighter.is_hit);
        assert_eq!(fighter.hit_cooldown, 3);
        assert_eq!(fighter.pose(), FighterPose::Hit);

        for _ in 0..3 {
            fighter.update_hit_flash(3);
        }
        assert_eq!(fighter.hit_cooldown, 0);
        assert_eq!(fighter.pose(), FighterPose::Normal);

        // Stays idle without a new hit
        fighter.update_hit_flash(3);
        assert_eq!(fighter.hit_cooldown, 0);
    }

    #[test]
    fn test_attack_pose_wins_over_flash() {
        let rules = MatchRules::default();
        let mut fighter = Fighter::spawn(PlayerSlot::One, &rules);
        fighter.hit_cooldown = 10;
        fighter.is_attacking = true;
        assert_eq!(fighter.pose(), FighterPose::Attacking);
    }
}
