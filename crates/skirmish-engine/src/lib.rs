//! Skirmish Engine - host for the Skirmish platform fighter.
//!
//! This crate wires the gameplay simulation to the outside world: it loads
//! configuration and assets, paces frames, turns key events into fighter
//! input, builds the draw list for each frame and handles the end of a match.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

pub mod app;
pub mod assets;
pub mod config;
pub mod input;
pub mod notify;
pub mod pilot;
pub mod renderer;
pub mod timing;

pub use app::{run, App, FrameStatus, RunSummary};
pub use config::EngineConfig;
