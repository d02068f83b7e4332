//! Central match state and the frame-step controller.
//!
//! [`MatchState`] is the single source of truth for a match and is owned by
//! the [`MatchController`], which advances it one frame per [`MatchController::step`].
//! The host decides when to call `step`; tests drive it with a fixed `dt`.

use serde::{Deserialize, Serialize};
use skirmish_common::{PlayerSlot, RulesError};
use tracing::{info, trace};

use crate::arena::Arena;
use crate::combat::CombatResolver;
use crate::events::{EventBus, MatchEvent};
use crate::fighter::Fighter;
use crate::frame::{FrameSink, FrameView};
use crate::input::InputState;
use crate::physics::Integrator;
use crate::rules::MatchRules;

/// Lifecycle phase of a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MatchPhase {
    /// Fighters are being simulated
    #[default]
    Running,
    /// A result was reached; `step` is a no-op until a rematch
    GameOver,
}

/// Who won.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchOutcome {
    /// The slot with strictly more health
    Winner(PlayerSlot),
    /// Equal health
    Draw,
}

impl MatchOutcome {
    /// Decides the outcome from both fighters' health: higher wins, equal draws.
    #[must_use]
    pub fn from_health(health: [i32; 2]) -> Self {
        let [one, two] = health;
        match one.cmp(&two) {
            std::cmp::Ordering::Greater => Self::Winner(PlayerSlot::One),
            std::cmp::Ordering::Less => Self::Winner(PlayerSlot::Two),
            std::cmp::Ordering::Equal => Self::Draw,
        }
    }
}

/// Why the match ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EndReason {
    /// A fighter's health reached zero
    Knockout,
    /// The countdown ran out
    TimeUp,
}

/// Final result of a match.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    /// Winner or draw
    pub outcome: MatchOutcome,
    /// What ended the match
    pub reason: EndReason,
    /// Health of both fighters when the match ended
    pub health: [i32; 2],
    /// Elapsed match time in milliseconds
    pub elapsed_ms: f64,
}

/// All mutable match data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchState {
    /// Both fighters in slot order
    pub fighters: [Fighter; 2],
    /// Static arena
    pub arena: Arena,
    /// Milliseconds since the match (or rematch) started
    pub elapsed_ms: f64,
    /// Current phase
    pub phase: MatchPhase,
    /// Frames simulated since the match started
    pub frame: u64,
    /// Result of the last finished match
    pub result: Option<MatchResult>,
}

impl MatchState {
    /// Creates the initial state for a rule set.
    #[must_use]
    pub fn new(rules: &MatchRules) -> Self {
        Self {
            fighters: PlayerSlot::ALL.map(|slot| Fighter::spawn(slot, rules)),
            arena: Arena::from_rules(rules),
            elapsed_ms: 0.0,
            phase: MatchPhase::Running,
            frame: 0,
            result: None,
        }
    }

    /// Returns a fighter by slot.
    #[must_use]
    pub fn fighter(&self, slot: PlayerSlot) -> &Fighter {
        &self.fighters[slot.index()]
    }

    /// Both fighters' health in slot order.
    #[must_use]
    pub fn health(&self) -> [i32; 2] {
        [self.fighters[0].health, self.fighters[1].health]
    }

    /// Returns whether the match has ended.
    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.phase == MatchPhase::GameOver
    }
}

/// Owns a [`MatchState`] and advances it frame by frame.
#[derive(Debug)]
pub struct MatchController {
    rules: MatchRules,
    state: MatchState,
    integrator: Integrator,
    combat: CombatResolver,
    events: EventBus,
}

impl MatchController {
    /// Validates the rules and sets up a fresh match.
    pub fn new(rules: MatchRules) -> Result<Self, RulesError> {
        rules.validate()?;

        let controller = Self {
            state: MatchState::new(&rules),
            integrator: Integrator::from_rules(&rules),
            combat: CombatResolver::from_rules(&rules),
            events: EventBus::default(),
            rules,
        };

        info!(
            duration_ms = controller.rules.match_duration_ms,
            platforms = controller.state.arena.platforms.len(),
            "Match started"
        );
        controller.events.publish(MatchEvent::MatchStarted {
            duration_ms: controller.rules.match_duration_ms,
        });

        Ok(controller)
    }

    /// Simulates one frame.
    ///
    /// Order within the frame: integrate player one, integrate player two,
    /// hand the view to `sink`, land fighters on platforms, resolve combat,
    /// advance hit flashes, check for a result. `dt_ms` only advances the
    /// match clock; movement is per frame.
    ///
    /// Returns the result on the frame the match ends. Once the match is
    /// over this does nothing until [`Self::rematch`].
    pub fn step<S: FrameSink + ?Sized>(
        &mut self,
        dt_ms: f64,
        inputs: [InputState; 2],
        sink: &mut S,
    ) -> Option<MatchResult> {
        if self.state.is_game_over() {
            return None;
        }

        self.state.elapsed_ms += dt_ms.max(0.0);

        let [input_one, input_two] = inputs;
        self.integrator.update(&mut self.state.fighters[0], input_one);
        self.integrator.update(&mut self.state.fighters[1], input_two);

        sink.render(&FrameView {
            fighters: &self.state.fighters,
            arena: &self.state.arena,
            remaining_ms: self.remaining_ms(),
            max_health: self.rules.starting_health,
            frame: self.state.frame,
        });

        self.state.arena.resolve_landings(&mut self.state.fighters);

        if let Some(hit) = self.combat.resolve(&mut self.state.fighters) {
            self.events.publish(MatchEvent::FighterHit(hit));
        }

        for fighter in &mut self.state.fighters {
            fighter.update_hit_flash(self.rules.hit_flash_frames);
        }

        trace!(
            frame = self.state.frame,
            p1_health = self.state.fighters[0].health,
            p2_health = self.state.fighters[1].health,
            "Frame simulated"
        );
        self.state.frame += 1;

        let result = self.check_result()?;
        self.finish(result);
        Some(result)
    }

    /// Decides whether this frame ended the match.
    fn check_result(&self) -> Option<MatchResult> {
        let health = self.state.health();
        let reason = if self.state.fighters.iter().any(Fighter::is_knocked_out) {
            EndReason::Knockout
        } else if self.rules.enforce_time_limit && self.remaining_ms() <= 0.0 {
            EndReason::TimeUp
        } else {
            return None;
        };

        Some(MatchResult {
            outcome: MatchOutcome::from_health(health),
            reason,
            health,
            elapsed_ms: self.state.elapsed_ms,
        })
    }

    fn finish(&mut self, result: MatchResult) {
        self.state.phase = MatchPhase::GameOver;
        self.state.result = Some(result);

        info!(
            outcome = ?result.outcome,
            reason = ?result.reason,
            p1_health = result.health[0],
            p2_health = result.health[1],
            "Game over"
        );
        self.events.publish(MatchEvent::MatchEnded(result));
    }

    /// Starts another round in place.
    ///
    /// Health and the clock are reset; positions, facing and cooldowns carry
    /// over from the previous round.
    pub fn rematch(&mut self) {
        for fighter in &mut self.state.fighters {
            fighter.health = self.rules.starting_health;
        }
        self.state.elapsed_ms = 0.0;
        self.state.phase = MatchPhase::Running;

        info!("Rematch started");
        self.events.publish(MatchEvent::RematchStarted);
    }

    /// Countdown in milliseconds; negative once time has run out.
    #[must_use]
    pub fn remaining_ms(&self) -> f64 {
        self.rules.match_duration_ms - self.state.elapsed_ms
    }

    /// Game-over message naming the winner, or announcing a draw.
    #[must_use]
    pub fn announcement(&self, result: &MatchResult) -> String {
        match result.outcome {
            MatchOutcome::Winner(slot) => {
                format!("Game Over!\nWinner: {}", self.rules.player_name(slot))
            },
            MatchOutcome::Draw => "Game Over!\nIt's a draw!".to_string(),
        }
    }

    /// Returns the match state.
    #[must_use]
    pub const fn state(&self) -> &MatchState {
        &self.state
    }

    /// Returns a mutable reference to the match state.
    pub fn state_mut(&mut self) -> &mut MatchState {
        &mut self.state
    }

    /// Returns the rules this match was created with.
    #[must_use]
    pub const fn rules(&self) -> &MatchRules {
        &self.rules
    }

    /// Returns the event bus.
    #[must_use]
    pub const fn events(&self) -> &EventBus {
        &self.events
    }
}
