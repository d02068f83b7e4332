//! Rendering seam between the simulation and the presentation layer.
//!
//! The match controller hands a [`FrameView`] to a [`FrameSink`] once per
//! frame, after both fighters have been integrated and before platform
//! landings and combat are resolved.

use crate::arena::Arena;
use crate::fighter::Fighter;
use crate::hud::format_time;

/// Read-only view of the match for drawing.
#[derive(Debug, Clone, Copy)]
pub struct FrameView<'a> {
    /// Both fighters in slot order
    pub fighters: &'a [Fighter; 2],
    /// Static arena
    pub arena: &'a Arena,
    /// Countdown in milliseconds, may be negative
    pub remaining_ms: f64,
    /// Health that fills a bar completely
    pub max_health: i32,
    /// Frame number since the match started
    pub frame: u64,
}

impl FrameView<'_> {
    /// Countdown text as shown on screen.
    #[must_use]
    pub fn timer_text(&self) -> String {
        format_time(self.remaining_ms)
    }
}

/// Receives a view of every simulated frame.
pub trait FrameSink {
    /// Draws the frame.
    fn render(&mut self, view: &FrameView<'_>);
}

/// Sink that draws nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl FrameSink for NullSink {
    fn render(&mut self, _view: &FrameView<'_>) {}
}
