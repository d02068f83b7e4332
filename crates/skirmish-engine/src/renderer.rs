//! Scene renderer.
//!
//! Turns each simulated frame into an ordered draw list. A windowed backend
//! replays the list onto a canvas; headless runs keep it for inspection.

use skirmish_common::{Bounded, PlayerSlot, Rect};
use skirmish_gameplay::{health_fraction, Fighter, FighterPose, FrameSink, FrameView};
use tracing::trace;

use crate::assets::{AssetId, AssetStore};

/// Health bar size.
const HEALTH_BAR_WIDTH: f32 = 200.0;
const HEALTH_BAR_HEIGHT: f32 = 20.0;
/// Distance of the health bars from the canvas edges.
const HUD_MARGIN: f32 = 10.0;
/// Baseline of the countdown text.
const TIMER_Y: f32 = 30.0;
const TIMER_TEXT_PX: u32 = 24;
const NAME_TEXT_PX: u32 = 18;
/// Gap between a fighter's top edge and its name label.
const NAME_OFFSET: f32 = 10.0;
/// Opacity of the attack effect sprite.
const ATTACK_EFFECT_ALPHA: f32 = 0.7;

/// Named colors used by the scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    /// Health bar fill
    Red,
    /// Outlines and text
    White,
    /// Platforms
    Brown,
}

/// Horizontal anchor for text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    /// `x` is the left edge
    Left,
    /// `x` is the center
    Center,
}

/// One drawing operation.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Draw an image stretched into `rect`
    Image {
        /// Which image
        asset: AssetId,
        /// Destination rectangle
        rect: Rect,
        /// Flip horizontally within `rect`
        mirrored: bool,
        /// Opacity in `0.0..=1.0`
        alpha: f32,
    },
    /// Fill a rectangle
    FillRect {
        /// Rectangle
        rect: Rect,
        /// Fill color
        color: Color,
    },
    /// Outline a rectangle
    StrokeRect {
        /// Rectangle
        rect: Rect,
        /// Line color
        color: Color,
    },
    /// Draw a line of text
    Text {
        /// Contents
        text: String,
        /// Anchor x
        x: f32,
        /// Baseline y
        y: f32,
        /// Font size in pixels
        size_px: u32,
        /// How `x` is interpreted
        align: TextAlign,
        /// Text color
        color: Color,
    },
}

/// Builds the draw list for each frame.
#[derive(Debug)]
pub struct SceneRenderer {
    assets: AssetStore,
    commands: Vec<DrawCommand>,
    frames_rendered: u64,
}

impl SceneRenderer {
    /// Creates a renderer drawing with the given assets.
    #[must_use]
    pub fn new(assets: AssetStore) -> Self {
        Self {
            assets,
            commands: Vec::with_capacity(64),
            frames_rendered: 0,
        }
    }

    /// Draw list of the most recent frame.
    #[must_use]
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Number of frames drawn so far.
    #[must_use]
    pub fn frames_rendered(&self) -> u64 {
        self.frames_rendered
    }

    fn image(&mut self, asset: AssetId, rect: Rect, mirrored: bool, alpha: f32) {
        self.commands.push(DrawCommand::Image {
            asset,
            rect,
            mirrored,
            alpha,
        });
    }

    fn text(&mut self, text: String, x: f32, y: f32, size_px: u32, align: TextAlign) {
        self.commands.push(DrawCommand::Text {
            text,
            x,
            y,
            size_px,
            align,
            color: Color::White,
        });
    }

    fn draw_ground(&mut self, view: &FrameView<'_>) {
        let tile = self.assets.get(AssetId::GroundTile);
        let tile_width = tile.width.max(1) as f32;
        let tile_height = tile.height as f32;

        let mut x = 0.0;
        while x < view.arena.width {
            self.image(
                AssetId::GroundTile,
                Rect::new(x, view.arena.ground_height, tile_width, tile_height),
                false,
                1.0,
            );
            x += tile_width;
        }
    }

    fn draw_fighter(&mut self, fighter: &Fighter) {
        let rect = fighter.bounds();
        let mirrored = !fighter.facing_right;

        match fighter.pose() {
            FighterPose::Attacking => {
                self.image(AssetId::AttackEffect, rect, mirrored, ATTACK_EFFECT_ALPHA);
            },
            FighterPose::Hit => self.image(AssetId::HitFlash, rect, mirrored, 1.0),
            FighterPose::Normal => {
                let body = match fighter.slot {
                    PlayerSlot::One => AssetId::PlayerOne,
                    PlayerSlot::Two => AssetId::PlayerTwo,
                };
                self.image(body, rect, mirrored, 1.0);
            },
        }

        self.text(
            fighter.name.clone(),
            rect.x,
            rect.y - NAME_OFFSET,
            NAME_TEXT_PX,
            TextAlign::Left,
        );
    }

    fn draw_health_bar(&mut self, fighter: &Fighter, x: f32, max_health: i32) {
        let outline = Rect::new(x, HUD_MARGIN, HEALTH_BAR_WIDTH, HEALTH_BAR_HEIGHT);
        let fill_width = HEALTH_BAR_WIDTH * health_fraction(fighter.health, max_health);

        self.commands.push(DrawCommand::FillRect {
            rect: Rect::new(x, HUD_MARGIN, fill_width, HEALTH_BAR_HEIGHT),
            color: Color::Red,
        });
        self.commands.push(DrawCommand::StrokeRect {
            rect: outline,
            color: Color::White,
        });
    }
}

impl FrameSink for SceneRenderer {
    fn render(&mut self, view: &FrameView<'_>) {
        self.commands.clear();

        self.image(AssetId::Background, view.arena.bounds(), false, 1.0);
        self.draw_ground(view);

        for fighter in view.fighters {
            self.draw_fighter(fighter);
        }

        let [one, two] = view.fighters;
        self.draw_health_bar(one, HUD_MARGIN, view.max_health);
        self.draw_health_bar(
            two,
            view.arena.width - HEALTH_BAR_WIDTH - HUD_MARGIN,
            view.max_health,
        );
        self.text(
            view.timer_text(),
            view.arena.width / 2.0,
            TIMER_Y,
            TIMER_TEXT_PX,
            TextAlign::Center,
        );

        for platform in &view.arena.platforms {
            self.commands.push(DrawCommand::FillRect {
                rect: platform.rect,
                color: Color::Brown,
            });
        }

        self.frames_rendered += 1;
        trace!(frame = view.frame, commands = self.commands.len(), "Scene built");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use skirmish_gameplay::{Arena, MatchRules};

    fn scene(fighters: &[Fighter; 2], remaining_ms: f64) -> Vec<DrawCommand> {
        let rules = MatchRules::default();
        let arena = Arena::from_rules(&rules);
        let mut renderer = SceneRenderer::new(AssetStore::placeholders());
        renderer.render(&FrameView {
            fighters,
            arena: &arena,
            remaining_ms,
            max_health: rules.starting_health,
            frame: 0,
        });
        renderer.commands().to_vec()
    }

    fn fighters() -> [Fighter; 2] {
        let rules = MatchRules::default();
        [
            Fighter::spawn(PlayerSlot::One, &rules),
            Fighter::spawn(PlayerSlot::Two, &rules),
        ]
    }

    fn images(commands: &[DrawCommand], wanted: AssetId) -> Vec<(Rect, bool, f32)> {
        commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Image {
                    asset,
                    rect,
                    mirrored,
                    alpha,
                } if *asset == wanted => Some((*rect, *mirrored, *alpha)),
                _ => None,
            })
            .collect()
    }

    fn fills(commands: &[DrawCommand], wanted: Color) -> Vec<Rect> {
        commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::FillRect { rect, color } if *color == wanted => Some(*rect),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_background_first_platforms_last() {
        let commands = scene(&fighters(), 180_000.0);

        assert_eq!(
            commands.first(),
            Some(&DrawCommand::Image {
                asset: AssetId::Background,
                rect: Rect::new(0.0, 0.0, 1030.0, 650.0),
                mirrored: false,
                alpha: 1.0,
            })
        );
        assert!(matches!(
            commands.last(),
            Some(DrawCommand::FillRect {
                color: Color::Brown,
                ..
            })
        ));
        assert_eq!(fills(&commands, Color::Brown).len(), 3);
    }

    #[test]
    fn test_ground_tiles_cover_width() {
        let commands = scene(&fighters(), 0.0);
        let tiles = images(&commands, AssetId::GroundTile);

        // 64 px placeholder tiles across 1030 px
        assert_eq!(tiles.len(), 17);
        assert!(tiles.iter().all(|(rect, _, _)| rect.y == 586.0));
        assert_eq!(tiles[16].0.x, 1024.0);
    }

    #[test]
    fn test_fighters_mirror_by_facing() {
        let commands = scene(&fighters(), 0.0);

        let one = images(&commands, AssetId::PlayerOne);
        let two = images(&commands, AssetId::PlayerTwo);
        assert_eq!(one, vec![(Rect::new(50.0, 0.0, 40.0, 60.0), false, 1.0)]);
        assert_eq!(two, vec![(Rect::new(940.0, 0.0, 40.0, 60.0), true, 1.0)]);
    }

    #[test]
    fn test_pose_selects_sprite() {
        let mut fighters = fighters();
        fighters[0].is_attacking = true;
        fighters[1].hit_cooldown = 12;

        let commands = scene(&fighters, 0.0);

        assert!(images(&commands, AssetId::PlayerOne).is_empty());
        assert!(images(&commands, AssetId::PlayerTwo).is_empty());
        assert_eq!(images(&commands, AssetId::AttackEffect)[0].2, 0.7);
        assert!(images(&commands, AssetId::HitFlash)[0].1);
    }

    #[test]
    fn test_health_bars_clamp() {
        let mut fighters = fighters();
        fighters[0].health = 50;
        fighters[1].health = -30;

        let commands = scene(&fighters, 0.0);
        let bars = fills(&commands, Color::Red);

        assert_eq!(bars[0], Rect::new(10.0, 10.0, 100.0, 20.0));
        assert_eq!(bars[1], Rect::new(820.0, 10.0, 0.0, 20.0));
    }

    #[test]
    fn test_labels_and_timer() {
        let commands = scene(&fighters(), 61_500.0);
        let texts: Vec<_> = commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text {
                    text,
                    x,
                    y,
                    size_px,
                    align,
                    ..
                } => Some((text.as_str(), *x, *y, *size_px, *align)),
                _ => None,
            })
            .collect();

        assert_eq!(
            texts,
            vec![
                ("player 1", 50.0, -10.0, 18, TextAlign::Left),
                ("Player 2", 940.0, -10.0, 18, TextAlign::Left),
                ("01:01", 515.0, 30.0, 24, TextAlign::Center),
            ]
        );
    }

    #[test]
    fn test_commands_reset_each_frame() {
        let rules = MatchRules::default();
        let arena = Arena::from_rules(&rules);
        let fighters = fighters();
        let view = FrameView {
            fighters: &fighters,
            arena: &arena,
            remaining_ms: 1_000.0,
            max_health: 100,
            frame: 3,
        };

        let mut renderer = SceneRenderer::new(AssetStore::placeholders());
        renderer.render(&view);
        let first = renderer.commands().len();
        renderer.render(&view);

        assert_eq!(renderer.commands().len(), first);
        assert_eq!(renderer.frames_rendered(), 2);
    }
}
