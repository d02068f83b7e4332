//! Identifiers for the two fighters in a match.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which side of the match a fighter belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerSlot {
    /// Left-side fighter, arrow-key controls
    One,
    /// Right-side fighter, WASD controls
    Two,
}

impl PlayerSlot {
    /// Both slots in priority order.
    pub const ALL: [Self; 2] = [Self::One, Self::Two];

    /// Index into per-player arrays.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::One => 0,
            Self::Two => 1,
        }
    }

    /// The other fighter.
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Self::One => Self::Two,
            Self::Two => Self::One,
        }
    }
}

impl fmt::Display for PlayerSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::One => write!(f, "P1"),
            Self::Two => write!(f, "P2"),
        }
    }
}
