//! Arena: static platforms plus the implicit ground plane.
//!
//! The ground is enforced by the integrator; this module only resolves
//! landings on the platform list.

use serde::{Deserialize, Serialize};
use skirmish_common::{check_collision, Bounded, Rect};

use crate::fighter::Fighter;
use crate::rules::MatchRules;

/// A static rectangle fighters can land on from above.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Platform {
    /// Platform rectangle
    pub rect: Rect,
}

impl Platform {
    /// Creates a platform.
    #[must_use]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            rect: Rect::new(x, y, width, height),
        }
    }

    /// Top surface.
    #[must_use]
    pub fn top(&self) -> f32 {
        self.rect.y
    }
}

impl Bounded for Platform {
    fn bounds(&self) -> Rect {
        self.rect
    }
}

/// The static playing field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Arena {
    /// Canvas width
    pub width: f32,
    /// Canvas height
    pub height: f32,
    /// Y of the ground plane
    pub ground_height: f32,
    /// Platforms in declaration order
    pub platforms: Vec<Platform>,
}

impl Arena {
    /// Builds the arena described by a rule set.
    #[must_use]
    pub fn from_rules(rules: &MatchRules) -> Self {
        Self {
            width: rules.arena_width,
            height: rules.arena_height,
            ground_height: rules.ground_height(),
            platforms: rules.platforms.iter().map(|rect| Platform { rect: *rect }).collect(),
        }
    }

    /// Lands a falling fighter on any platform it overlaps.
    ///
    /// Only fighters moving downward are caught, so a fighter jumping up
    /// through a platform passes it. Platforms are checked in list order and
    /// a landing stops the fall, so the first overlapping platform wins.
    /// Returns true if a landing happened.
    pub fn resolve_landing(&self, fighter: &mut Fighter) -> bool {
        let mut landed = false;
        for platform in &self.platforms {
            if check_collision(&*fighter, platform) && fighter.vertical_speed > 0.0 {
                fighter.land_on(platform.top());
                landed = true;
            }
        }
        landed
    }

    /// Resolves landings for both fighters. Fighters do not land on each
    /// other, so each is resolved on its own.
    pub fn resolve_landings(&self, fighters: &mut [Fighter; 2]) {
        for fighter in fighters.iter_mut() {
            self.resolve_landing(fighter);
        }
    }

    /// Whole canvas rectangle.
    #[must_use]
    pub fn bounds(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width, self.height)
    }
}
