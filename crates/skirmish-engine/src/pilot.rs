//! Automated pilot for headless runs.
//!
//! Plays both fighters by sending the same key events a person would: each
//! fighter walks towards its opponent, attacks when in reach and jumps now and
//! then. Only changes in held keys are sent.

use crossbeam_channel::Sender;
use skirmish_common::{check_collision, Bounded, PlayerSlot};
use skirmish_gameplay::{ControlScheme, Fighter, InputState, KeyCode, KeyEvent};
use tracing::debug;

/// Chance per frame of starting a jump while grounded.
const JUMP_CHANCE: f32 = 0.01;
/// Chance per frame of holding attack while in reach.
const ATTACK_CHANCE: f32 = 0.6;
/// Chance per frame of standing still instead of approaching.
const IDLE_CHANCE: f32 = 0.05;

/// Drives both fighters through key events.
#[derive(Debug)]
pub struct Pilot {
    rng: fastrand::Rng,
    sender: Sender<KeyEvent>,
    held: [InputState; 2],
}

impl Pilot {
    /// Creates a pilot sending into `sender`. Equal seeds replay equal matches.
    #[must_use]
    pub fn new(seed: u64, sender: Sender<KeyEvent>) -> Self {
        debug!(seed, "Pilot engaged");
        Self {
            rng: fastrand::Rng::with_seed(seed),
            sender,
            held: [InputState::NONE; 2],
        }
    }

    /// Chooses what `me` should hold this frame.
    pub fn decide(&mut self, me: &Fighter, foe: &Fighter) -> InputState {
        let mine = me.bounds();
        let theirs = foe.bounds();
        let gap = (theirs.x + theirs.width / 2.0) - (mine.x + mine.width / 2.0);

        let mut input = InputState::NONE;
        if check_collision(me, foe) {
            input.action = self.rng.f32() < ATTACK_CHANCE;
        } else if self.rng.f32() >= IDLE_CHANCE {
            input.right = gap > 0.0;
            input.left = gap < 0.0;
        }
        input.up = !me.jumping && self.rng.f32() < JUMP_CHANCE;
        input
    }

    /// Decides for both fighters and sends the key changes. Returns how many
    /// events were sent.
    pub fn drive(&mut self, fighters: &[Fighter; 2]) -> usize {
        let mut sent = 0;
        for slot in PlayerSlot::ALL {
            let me = &fighters[slot.index()];
            let foe = &fighters[slot.opponent().index()];
            let next = self.decide(me, foe);
            sent += self.send_changes(slot, next);
        }
        sent
    }

    /// Lets go of every held key.
    pub fn release_all(&mut self) -> usize {
        PlayerSlot::ALL
            .into_iter()
            .map(|slot| self.send_changes(slot, InputState::NONE))
            .sum()
    }

    /// Keys currently held for a fighter.
    #[must_use]
    pub fn held(&self, slot: PlayerSlot) -> InputState {
        self.held[slot.index()]
    }

    fn send_changes(&mut self, slot: PlayerSlot, next: InputState) -> usize {
        let scheme = ControlScheme::for_slot(slot);
        let prev = self.held[slot.index()];
        self.held[slot.index()] = next;

        let changes: [(KeyCode, bool, bool); 4] = [
            (scheme.left, prev.left, next.left),
            (scheme.right, prev.right, next.right),
            (scheme.up, prev.up, next.up),
            (scheme.action, prev.action, next.action),
        ];

        let mut sent = 0;
        for (key, was, now) in changes {
            if was == now {
                continue;
            }
            let event = if now {
                KeyEvent::down(key)
            } else {
                KeyEvent::up(key)
            };
            // A closed channel means the host is shutting down
            if self.sender.send(event).is_ok() {
                sent += 1;
            }
        }
        sent
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::unbounded;
    use skirmish_gameplay::MatchRules;

    fn fighters() -> [Fighter; 2] {
        let rules = MatchRules::default();
        [
            Fighter::spawn(PlayerSlot::One, &rules),
            Fighter::spawn(PlayerSlot::Two, &rules),
        ]
    }

    #[test]
    fn test_apart_fighters_never_attack() {
        let (sender, _receiver) = unbounded();
        let mut pilot = Pilot::new(7, sender);
        let [one, two] = fighters();

        for _ in 0..200 {
            let input = pilot.decide(&one, &two);
            assert!(!input.action);
            assert!(!input.left);
            let input = pilot.decide(&two, &one);
            assert!(!input.right);
        }
    }

    #[test]
    fn test_only_changes_are_sent() {
        let (sender, receiver) = unbounded();
        let mut pilot = Pilot::new(1, sender);
        let fighters = fighters();

        let mut total = 0;
        for _ in 0..50 {
            total += pilot.drive(&fighters);
        }
        let events: Vec<_> = receiver.try_iter().collect();
        assert_eq!(events.len(), total);

        // Replaying the events reproduces what the pilot holds
        let mut keyboard = skirmish_gameplay::KeyboardState::new();
        for event in events {
            keyboard.apply(event);
        }
        let sampled = skirmish_gameplay::sample_both(&keyboard);
        assert_eq!(sampled[0], pilot.held(PlayerSlot::One));
        assert_eq!(sampled[1], pilot.held(PlayerSlot::Two));
    }

    #[test]
    fn test_same_seed_same_decisions() {
        let fighters = fighters();
        let (sender_a, receiver_a) = unbounded();
        let (sender_b, receiver_b) = unbounded();
        let mut a = Pilot::new(99, sender_a);
        let mut b = Pilot::new(99, sender_b);

        for _ in 0..100 {
            a.drive(&fighters);
            b.drive(&fighters);
        }

        let a: Vec<_> = receiver_a.try_iter().collect();
        let b: Vec<_> = receiver_b.try_iter().collect();
        assert_eq!(a, b);
    }

    #[test]
    fn test_release_all() {
        let (sender, receiver) = unbounded();
        let mut pilot = Pilot::new(3, sender);
        pilot.drive(&fighters());
        pilot.release_all();

        let mut keyboard = skirmish_gameplay::KeyboardState::new();
        for event in receiver.try_iter() {
            keyboard.apply(event);
        }
        assert_eq!(
            skirmish_gameplay::sample_both(&keyboard),
            [InputState::NONE; 2]
        );
    }
}
