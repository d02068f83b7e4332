//! Match rules: arena dimensions, movement tuning, combat numbers, timing.
//!
//! All speeds are in pixels per frame and all cooldowns in frames; the
//! simulation advances one tick per call regardless of wall-clock delta.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use skirmish_common::{PlayerSlot, Rect, RulesError};

/// Default canvas width in pixels.
pub const DEFAULT_ARENA_WIDTH: f32 = 1030.0;
/// Default canvas height in pixels.
pub const DEFAULT_ARENA_HEIGHT: f32 = 650.0;
/// Height of the ground band drawn at the bottom of the canvas.
pub const DEFAULT_GROUND_BAND: f32 = 64.0;
/// Default match length in milliseconds (three minutes).
pub const DEFAULT_MATCH_DURATION_MS: f64 = 180_000.0;

/// Tunable rules for a match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchRules {
    /// Arena (canvas) width
    pub arena_width: f32,
    /// Arena (canvas) height
    pub arena_height: f32,
    /// Height of the ground band; the ground plane sits at `arena_height - ground_band`
    pub ground_band: f32,
    /// Downward acceleration per frame
    pub gravity: f32,
    /// Horizontal distance covered per frame while a direction is held
    pub move_speed: f32,
    /// Upward speed applied when a jump starts
    pub jump_impulse: f32,
    /// Frames before another attack can start
    pub attack_cooldown_frames: u32,
    /// Health removed by a landed attack
    pub attack_damage: i32,
    /// Health at match start and after a rematch
    pub starting_health: i32,
    /// Frames the hit flash stays visible after taking damage
    pub hit_flash_frames: u32,
    /// Match length in milliseconds
    pub match_duration_ms: f64,
    /// End the match when the countdown reaches zero
    pub enforce_time_limit: bool,
    /// Fighter bounding box width
    pub fighter_width: f32,
    /// Fighter bounding box height
    pub fighter_height: f32,
    /// Distance of each spawn point from its arena edge
    pub spawn_inset: f32,
    /// Display names for player one and player two
    pub player_names: [String; 2],
    /// Static platforms, absolute canvas coordinates
    pub platforms: Vec<Rect>,
}

impl Default for MatchRules {
    fn default() -> Self {
        let ground_height = DEFAULT_ARENA_HEIGHT - DEFAULT_GROUND_BAND;
        Self {
            arena_width: DEFAULT_ARENA_WIDTH,
            arena_height: DEFAULT_ARENA_HEIGHT,
            ground_band: DEFAULT_GROUND_BAND,
            gravity: 1.0,
            move_speed: 5.0,
            jump_impulse: 25.0,
            attack_cooldown_frames: 30,
            attack_damage: 10,
            starting_health: 100,
            hit_flash_frames: 30,
            match_duration_ms: DEFAULT_MATCH_DURATION_MS,
            enforce_time_limit: true,
            fighter_width: 40.0,
            fighter_height: 60.0,
            spawn_inset: 50.0,
            player_names: ["player 1".to_string(), "Player 2".to_string()],
            platforms: vec![
                Rect::new(150.0, ground_height - 100.0, 100.0, 10.0),
                Rect::new(400.0, ground_height - 150.0, 120.0, 10.0),
                Rect::new(600.0, ground_height - 200.0, 150.0, 10.0),
            ],
        }
    }
}

impl MatchRules {
    /// Creates the default rules.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Y coordinate of the ground plane.
    #[must_use]
    pub fn ground_height(&self) -> f32 {
        self.arena_height - self.ground_band
    }

    /// Fighter bounding box size.
    #[must_use]
    pub fn fighter_size(&self) -> Vec2 {
        Vec2::new(self.fighter_width, self.fighter_height)
    }

    /// Top-left spawn position for a slot. Both spawn at the top of the
    /// canvas and fall to the ground during the first frames.
    #[must_use]
    pub fn spawn_position(&self, slot: PlayerSlot) -> Vec2 {
        match slot {
            PlayerSlot::One => Vec2::new(self.spawn_inset, 0.0),
            PlayerSlot::Two => Vec2::new(
                self.arena_width - self.spawn_inset - self.fighter_width,
                0.0,
            ),
        }
    }

    /// Display name for a slot.
    #[must_use]
    pub fn player_name(&self, slot: PlayerSlot) -> &str {
        &self.player_names[slot.index()]
    }

    /// Checks that the rules describe a playable arena.
    pub fn validate(&self) -> Result<(), RulesError> {
        if self.arena_width <= 0.0 || self.arena_height <= 0.0 {
            return Err(RulesError::NonPositiveSize {
                what: "arena",
                width: self.arena_width,
                height: self.arena_height,
            });
        }
        if self.fighter_width <= 0.0 || self.fighter_height <= 0.0 {
            return Err(RulesError::NonPositiveSize {
                what: "fighter",
                width: self.fighter_width,
                height: self.fighter_height,
            });
        }

        let ground_height = self.ground_height();
        if self.fighter_width > self.arena_width || self.fighter_height > ground_height {
            return Err(RulesError::FighterDoesNotFit {
                fighter_width: self.fighter_width,
                fighter_height: self.fighter_height,
                arena_width: self.arena_width,
                ground_height,
            });
        }

        if !(0.0..=self.arena_height).contains(&self.ground_band) {
            return Err(RulesError::InvalidValue {
                field: "ground_band",
                reason: format!(
                    "{} is outside 0..={}",
                    self.ground_band, self.arena_height
                ),
            });
        }
        if self.gravity < 0.0 {
            return Err(RulesError::InvalidValue {
                field: "gravity",
                reason: format!("{} is negative", self.gravity),
            });
        }
        if self.move_speed < 0.0 || self.jump_impulse < 0.0 {
            return Err(RulesError::InvalidValue {
                field: "move_speed/jump_impulse",
                reason: "speeds must not be negative".to_string(),
            });
        }
        if self.starting_health <= 0 {
            return Err(RulesError::InvalidValue {
                field: "starting_health",
                reason: format!("{} must be positive", self.starting_health),
            });
        }
        if self.match_duration_ms.is_nan() || self.match_duration_ms < 0.0 {
            return Err(RulesError::InvalidValue {
                field: "match_duration_ms",
                reason: format!("{} is negative", self.match_duration_ms),
            });
        }

        let playable = Rect::new(0.0, 0.0, self.arena_width, ground_height);
        for (index, platform) in self.platforms.iter().enumerate() {
            if platform.width <= 0.0 || platform.height <= 0.0 {
                return Err(RulesError::NonPositiveSize {
                    what: "platform",
                    width: platform.width,
                    height: platform.height,
                });
            }
            if !playable.contains_rect(platform) {
                return Err(RulesError::PlatformOutOfBounds {
                    index,
                    x: platform.x,
                    y: platform.y,
                    width: platform.width,
                    height: platform.height,
                });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_rules_are_valid() {
        let rules = MatchRules::default();
        assert!(rules.validate().is_ok());
        assert_eq!(rules.ground_height(), 586.0);
        assert_eq!(rules.platforms.len(), 3);
        assert_eq!(rules.platforms[0].y, 486.0);
        assert_eq!(rules.platforms[2].y, 386.0);
    }

    #[test]
    fn test_spawn_positions() {
        let rules = MatchRules::default();
        assert_eq!(rules.spawn_position(PlayerSlot::One), Vec2::new(50.0, 0.0));
        assert_eq!(rules.spawn_position(PlayerSlot::Two), Vec2::new(940.0, 0.0));
    }

    #[test]
    fn test_player_names() {
        let rules = MatchRules::default();
        assert_eq!(rules.player_name(PlayerSlot::One), "player 1");
        assert_eq!(rules.player_name(PlayerSlot::Two), "Player 2");
    }

    #[test]
    fn test_rejects_zero_arena() {
        let rules = MatchRules {
            arena_width: 0.0,
            ..MatchRules::default()
        };
        assert!(matches!(
            rules.validate(),
            Err(RulesError::NonPositiveSize { what: "arena", .. })
        ));
    }

    #[test]
    fn test_rejects_oversized_fighter() {
        let rules = MatchRules {
            fighter_height: 600.0,
            ..MatchRules::default()
        };
        assert!(matches!(
            rules.validate(),
            Err(RulesError::FighterDoesNotFit { .. })
        ));
    }

    #[test]
    fn test_rejects_platform_outside_arena() {
        let mut rules = MatchRules::default();
        rules.platforms.push(Rect::new(1000.0, 100.0, 100.0, 10.0));
        assert_eq!(
            rules.validate(),
            Err(RulesError::PlatformOutOfBounds {
                index: 3,
                x: 1000.0,
                y: 100.0,
                width: 100.0,
                height: 10.0,
            })
        );
    }

    #[test]
    fn test_rejects_negative_duration() {
        let rules = MatchRules {
            match_duration_ms: -1.0,
            ..MatchRules::default()
        };
        assert!(matches!(
            rules.validate(),
            Err(RulesError::InvalidValue {
                field: "match_duration_ms",
                ..
            })
        ));
    }
}
