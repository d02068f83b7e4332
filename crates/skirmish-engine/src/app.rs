//! Application lifecycle management.
//!
//! Main frame loop that integrates all subsystems.

use anyhow::{Context, Result};
use std::time::Duration;
use tracing::{debug, info};

use skirmish_common::SkirmishResult;
use skirmish_gameplay::{MatchController, MatchEvent, MatchResult};

use crate::assets::{AssetLoader, AssetStore};
use crate::config::EngineConfig;
use crate::input::InputHandler;
use crate::notify::{LogNavigator, LogNotifier, Navigator, Notifier};
use crate::pilot::Pilot;
use crate::renderer::SceneRenderer;
use crate::timing::{Clock, FrameTiming, SystemClock};

/// What a frame did to the application's lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameStatus {
    /// The match is still going
    Running,
    /// A match ended and another one started in place
    Rematch,
    /// The match ended and the app navigated away
    Finished,
    /// The player asked to quit
    Quit,
}

/// What a run produced.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    /// Frames simulated
    pub frames: u64,
    /// Every match result, in order
    pub results: Vec<MatchResult>,
    /// Where the app navigated after the last match, if it did
    pub destination: Option<String>,
}

/// Application state machine.
#[derive(Debug)]
pub struct App<N = LogNotifier, V = LogNavigator> {
    /// Engine configuration
    config: EngineConfig,

    // === Game Systems ===
    /// Match simulation
    controller: MatchController,
    /// Input handler
    input: InputHandler,
    /// Draw-list renderer
    renderer: SceneRenderer,
    /// Frame timing
    timing: FrameTiming,
    /// Automated player, if enabled
    pilot: Option<Pilot>,

    // === Collaborators ===
    /// Announces results
    notifier: N,
    /// Moves on after a match
    navigator: V,

    // === Run State ===
    /// Frames simulated
    frames: u64,
    /// Results so far
    results: Vec<MatchResult>,
    /// Where we navigated, once finished
    destination: Option<String>,
    /// Set once the loop must stop
    stopped: Option<FrameStatus>,
}

impl App {
    /// Creates an application that logs its announcements.
    pub fn new(config: EngineConfig, assets: AssetStore) -> SkirmishResult<Self> {
        Self::with_collaborators(config, assets, LogNotifier::new(), LogNavigator::new())
    }
}

impl<N: Notifier, V: Navigator> App<N, V> {
    /// Creates an application with custom game-over collaborators.
    pub fn with_collaborators(
        config: EngineConfig,
        assets: AssetStore,
        notifier: N,
        navigator: V,
    ) -> SkirmishResult<Self> {
        let controller = MatchController::new(config.rules.clone())?;
        let input = InputHandler::new();
        let pilot = config
            .autopilot
            .then(|| Pilot::new(config.pilot_seed, input.sender()));

        Ok(Self {
            controller,
            input,
            renderer: SceneRenderer::new(assets),
            timing: FrameTiming::new(config.target_fps),
            pilot,
            notifier,
            navigator,
            frames: 0,
            results: Vec::new(),
            destination: None,
            stopped: None,
            config,
        })
    }

    /// Runs one frame at time `now_ms`.
    pub fn frame(&mut self, now_ms: f64) -> FrameStatus {
        if let Some(status) = self.stopped {
            return status;
        }

        let dt = self.timing.tick(now_ms);

        if let Some(pilot) = &mut self.pilot {
            pilot.drive(&self.controller.state().fighters);
        }
        self.input.pump();
        if self.input.quit_requested() {
            info!(frames = self.frames, "Quit requested");
            self.stopped = Some(FrameStatus::Quit);
            return FrameStatus::Quit;
        }

        let result = self
            .controller
            .step(dt, self.input.inputs(), &mut self.renderer);
        self.frames += 1;

        for event in self.controller.events().drain() {
            match &event {
                MatchEvent::FighterHit(hit) => {
                    debug!(target_slot = %hit.target, health = hit.target_health, "Hit");
                },
                other => debug!(event = ?other, "Match event"),
            }
        }

        match result {
            Some(result) => self.game_over(result),
            None => FrameStatus::Running,
        }
    }

    /// Announces a result, then either restarts or navigates away.
    fn game_over(&mut self, result: MatchResult) -> FrameStatus {
        let message = self.controller.announcement(&result);
        self.notifier.notify(&message);
        self.results.push(result);

        if self.config.rematch_on_game_over {
            self.controller.rematch();
            return FrameStatus::Rematch;
        }

        if let Some(pilot) = &mut self.pilot {
            pilot.release_all();
        }
        self.navigator.navigate(&self.config.next_destination);
        self.destination = Some(self.config.next_destination.clone());
        self.stopped = Some(FrameStatus::Finished);
        FrameStatus::Finished
    }

    /// Handle for feeding key events in from outside.
    #[must_use]
    pub fn key_sender(&self) -> crossbeam_channel::Sender<skirmish_gameplay::KeyEvent> {
        self.input.sender()
    }

    /// Frames simulated so far.
    #[must_use]
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Returns the match controller.
    #[must_use]
    pub fn controller(&self) -> &MatchController {
        &self.controller
    }

    /// Returns the renderer.
    #[must_use]
    pub fn renderer(&self) -> &SceneRenderer {
        &self.renderer
    }

    /// Returns the frame timing.
    #[must_use]
    pub fn timing(&self) -> &FrameTiming {
        &self.timing
    }

    /// Returns the notifier.
    #[must_use]
    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    /// Returns the navigator.
    #[must_use]
    pub fn navigator(&self) -> &V {
        &self.navigator
    }

    /// Summarizes the run so far.
    #[must_use]
    pub fn summary(&self) -> RunSummary {
        RunSummary {
            frames: self.frames,
            results: self.results.clone(),
            destination: self.destination.clone(),
        }
    }
}

/// Loads the configured assets, waiting for the background image first.
pub fn load_assets(config: &EngineConfig) -> SkirmishResult<AssetStore> {
    let mut loader = AssetLoader::spawn(config.asset_dir.clone());
    loader.wait_until_ready(Duration::from_millis(config.asset_timeout_ms))?;
    Ok(loader.finish()?)
}

/// Runs the main application loop until the match ends, the player quits
/// or the frame limit is reached.
pub fn run(config: EngineConfig) -> Result<RunSummary> {
    info!("Configuration loaded:");
    info!("  Target FPS: {}", config.target_fps);
    info!("  Frame limit: {}", config.max_frames);
    info!("  Autopilot: {}", config.autopilot);

    info!("Loading assets...");
    let assets = load_assets(&config).context("Failed to load assets")?;

    let clock = SystemClock::new();
    let pace = config.pace_frames;
    let max_frames = config.max_frames;
    let mut app = App::new(config, assets).context("Invalid match rules")?;

    info!("Starting frame loop...");
    loop {
        let status = app.frame(clock.now_ms());
        if matches!(status, FrameStatus::Finished | FrameStatus::Quit) {
            break;
        }
        if max_frames > 0 && app.frames() >= max_frames {
            info!(frames = max_frames, "Frame limit reached");
            break;
        }
        if pace {
            app.timing().sleep_remainder(&clock);
        }
    }

    info!(
        frames = app.frames(),
        fps = app.timing().current_fps(),
        "Frame loop stopped"
    );
    Ok(app.summary())
}
