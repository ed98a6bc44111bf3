//! Gameplay screen: runs a timed match and draws the playfield and HUD

use anyhow::Result;
use glam::IVec2;

use super::{Screen, ScreenRequest};
use crate::audio::{SoundEffect, Track};
use crate::format_clock;
use crate::platform::{Context, Fill, ImageId, InputEvent, Key};
use crate::sim::{Direction, GameEvent, GamePhase, MatchResult, MatchState, Rect, Side, TickInput, tick};
use crate::ui::{Color, FontId, Label, Placement, TextStyle};

const SCORE_STYLE: TextStyle = TextStyle::new(FontId::Title, 40, Color::WHITE);
const CLOCK_STYLE: TextStyle = TextStyle::new(FontId::Body, 32, Color::WHITE);
const PROMPT_STYLE: TextStyle = TextStyle::new(FontId::Body, 24, Color::GREY);

/// Height of one dash of the centre line
const DASH: i32 = 12;

/// Entities and labels that exist only while a match is running
#[derive(Debug)]
struct GameplayResources {
    state: MatchState,
    ball_sprite: IVec2,
    player_score: Label,
    enemy_score: Label,
    clock: Label,
    prompt: Label,
}

#[derive(Debug, Default)]
pub struct GameplayState {
    resources: Option<GameplayResources>,
    /// Input gathered since the last tick
    pending: TickInput,
    up_held: bool,
    down_held: bool,
    next_screen: ScreenRequest,
}

impl GameplayState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_initialized(&self) -> bool {
        self.resources.is_some()
    }

    /// Running match, if initialized
    pub fn match_state(&self) -> Option<&MatchState> {
        self.resources.as_ref().map(|r| &r.state)
    }

    pub fn match_state_mut(&mut self) -> Option<&mut MatchState> {
        self.resources.as_mut().map(|r| &mut r.state)
    }

    /// Current totals (0-0 if no match is running)
    pub fn match_result(&self) -> MatchResult {
        self.match_state().map(MatchState::match_result).unwrap_or_default()
    }

    pub fn handle_event(&mut self, event: InputEvent) {
        match event {
            // The latest press wins; some terminals never report releases
            InputEvent::KeyDown(Key::Up) => self.set_held(true, false),
            InputEvent::KeyDown(Key::Down) => self.set_held(false, true),
            InputEvent::KeyUp(Key::Up) => self.set_held(false, self.down_held),
            InputEvent::KeyUp(Key::Down) => self.set_held(self.up_held, false),
            InputEvent::KeyDown(Key::Space) => {
                self.pending.serve = true;
                // A round reset stopped the paddle; keys still held steer again
                self.set_held(self.up_held, self.down_held);
            }
            InputEvent::KeyDown(Key::Escape) => {
                self.next_screen = ScreenRequest::Switch(Screen::MainMenu);
            }
            _ => {}
        }
    }

    fn set_held(&mut self, up: bool, down: bool) {
        self.up_held = up;
        self.down_held = down;
        self.pending.steer = Some(match (up, down) {
            (true, false) => Direction::UP,
            (false, true) => Direction::DOWN,
            _ => Direction::Still,
        });
    }

    /// Start a brand new match
    fn setup(&mut self, ctx: &mut Context) -> Result<GameplayResources> {
        self.pending = TickInput::default();
        self.up_held = false;
        self.down_held = false;
        self.next_screen = ScreenRequest::SameScreen;

        let assets = &mut *ctx.assets;
        let state = MatchState::new();
        let hud_pad = IVec2::new(40, 10);
        let resources = GameplayResources {
            ball_sprite: assets.image_size(ImageId::Ball)?,
            enemy_score: Label::new(assets, "0", SCORE_STYLE, Placement::TopLeft, hud_pad)?,
            player_score: Label::new(assets, "0", SCORE_STYLE, Placement::TopRight, hud_pad)?,
            clock: Label::new(assets, format_clock(0), CLOCK_STYLE, Placement::Top, IVec2::new(0, 14))?,
            prompt: Label::new(
                assets,
                "Press Space to serve",
                PROMPT_STYLE,
                Placement::Center,
                IVec2::new(0, 60),
            )?,
            state,
        };

        ctx.audio.play_music(Track::Match);
        log::info!("New match started");
        Ok(resources)
    }

    pub fn update(&mut self, ctx: &mut Context) -> Result<ScreenRequest> {
        if self.resources.is_none() {
            self.resources = Some(self.setup(ctx)?);
        }
        let Some(res) = self.resources.as_mut() else {
            return Ok(self.next_screen);
        };

        let input = std::mem::take(&mut self.pending);
        for event in tick(&mut res.state, &input, ctx.now_ms) {
            match event {
                GameEvent::PaddleHit(_) => ctx.audio.play(SoundEffect::PaddleHit),
                GameEvent::Scored(Side::Player) => log::debug!("Player scores"),
                GameEvent::Scored(Side::Enemy) => log::debug!("Enemy scores"),
                GameEvent::Served => {}
                GameEvent::MatchOver(_) => {
                    self.next_screen = ScreenRequest::Switch(Screen::ResultMenu);
                }
            }
        }

        let assets = &mut *ctx.assets;
        let score = res.state.score;
        res.player_score.set_text(assets, &score.player.to_string())?;
        res.enemy_score.set_text(assets, &score.enemy.to_string())?;
        res.clock.set_text(assets, &format_clock(res.state.elapsed_secs(ctx.now_ms)))?;

        draw(res, ctx)?;

        Ok(self.next_screen)
    }

    pub fn teardown(&mut self) {
        if let Some(res) = self.resources.take() {
            log::debug!(
                "Match released at {} - {}",
                res.state.score.player,
                res.state.score.enemy
            );
        }
    }
}

fn draw(res: &GameplayResources, ctx: &mut Context) -> Result<()> {
    let canvas = &mut *ctx.canvas;
    let state = &res.state;

    canvas.clear(Color::BLACK)?;

    for border in state.borders.iter() {
        canvas.draw_rect(*border, Color::WHITE, Fill::Solid)?;
    }

    // Dashed centre line
    let mid_x = crate::consts::WINDOW_WIDTH / 2 - 1;
    let mut y = state.borders.top.bottom() + DASH / 2;
    while y + DASH <= state.borders.bottom.top() {
        canvas.draw_rect(Rect::new(mid_x, y, 2, DASH), Color::GREY, Fill::Outline)?;
        y += DASH * 2;
    }

    canvas.draw_rect(state.player.rect, Color::WHITE, Fill::Solid)?;
    canvas.draw_rect(state.enemy.rect, Color::WHITE, Fill::Solid)?;

    let sprite_at = state.ball.rect.center() - res.ball_sprite / 2;
    canvas.draw_image(ImageId::Ball, sprite_at)?;

    res.enemy_score.draw(canvas)?;
    res.player_score.draw(canvas)?;
    res.clock.draw(canvas)?;
    if state.phase == GamePhase::Waiting {
        res.prompt.draw(canvas)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::AudioManager;
    use crate::consts::MATCH_DURATION_SECS;
    use crate::platform::Canvas;
    use crate::platform::headless::{DrawCall, FixedMetrics, RecordingAudio, RecordingCanvas};
    use crate::settings::Settings;

    struct Harness {
        canvas: RecordingCanvas,
        assets: FixedMetrics,
        audio: AudioManager,
        sink: RecordingAudio,
    }

    impl Harness {
        fn new() -> Self {
            let sink = RecordingAudio::default();
            Self {
                canvas: RecordingCanvas::default(),
                assets: FixedMetrics,
                audio: AudioManager::new(Box::new(sink.clone()), &Settings::default()),
                sink,
            }
        }

        fn frame(&mut self, screen: &mut GameplayState, now_ms: u64) -> ScreenRequest {
            let mut ctx = Context {
                canvas: &mut self.canvas,
                assets: &mut self.assets,
                audio: &mut self.audio,
                now_ms,
            };
            let request = screen.update(&mut ctx).unwrap();
            self.canvas.present().unwrap();
            request
        }
    }

    #[test]
    fn test_first_update_starts_match() {
        let mut h = Harness::new();
        let mut screen = GameplayState::new();
        assert!(!screen.is_initialized());
        assert_eq!(screen.match_result(), MatchResult::default());

        assert_eq!(h.frame(&mut screen, 0), ScreenRequest::SameScreen);
        assert!(screen.is_initialized());
        assert_eq!(h.sink.tracks(), vec![Track::Match]);
        assert_eq!(screen.match_state().map(|s| s.phase), Some(GamePhase::Waiting));
        assert!(h.canvas.texts().contains(&"Press Space to serve"));
        assert!(h.canvas.texts().contains(&"00:00"));
    }

    #[test]
    fn test_serve_hides_prompt_and_moves_ball() {
        let mut h = Harness::new();
        let mut screen = GameplayState::new();
        h.frame(&mut screen, 0);
        let start = screen.match_state().map(|s| s.ball.rect);

        screen.handle_event(InputEvent::KeyDown(Key::Space));
        h.frame(&mut screen, 16);
        h.frame(&mut screen, 32);

        assert_eq!(screen.match_state().map(|s| s.phase), Some(GamePhase::Playing));
        assert_ne!(screen.match_state().map(|s| s.ball.rect), start);
        assert!(!h.canvas.texts().contains(&"Press Space to serve"));
        assert!(h.canvas.frame.iter().any(|c| matches!(c, DrawCall::Image(ImageId::Ball, _))));
    }

    #[test]
    fn test_held_keys_steer_player() {
        let mut h = Harness::new();
        let mut screen = GameplayState::new();
        h.frame(&mut screen, 0);
        screen.handle_event(InputEvent::KeyDown(Key::Space));
        h.frame(&mut screen, 16);

        screen.handle_event(InputEvent::KeyDown(Key::Up));
        h.frame(&mut screen, 32);
        assert_eq!(screen.match_state().map(|s| s.player.y_dir), Some(Direction::UP));

        // Pressing down while up is held takes over
        screen.handle_event(InputEvent::KeyDown(Key::Down));
        h.frame(&mut screen, 48);
        assert_eq!(screen.match_state().map(|s| s.player.y_dir), Some(Direction::DOWN));

        screen.handle_event(InputEvent::KeyUp(Key::Up));
        h.frame(&mut screen, 64);
        assert_eq!(screen.match_state().map(|s| s.player.y_dir), Some(Direction::DOWN));

        screen.handle_event(InputEvent::KeyUp(Key::Down));
        h.frame(&mut screen, 80);
        assert_eq!(screen.match_state().map(|s| s.player.y_dir), Some(Direction::Still));
    }

    #[test]
    fn test_presses_without_releases_keep_steering() {
        let mut h = Harness::new();
        let mut screen = GameplayState::new();
        h.frame(&mut screen, 0);
        screen.handle_event(InputEvent::KeyDown(Key::Space));
        h.frame(&mut screen, 16);

        let mut now = 16;
        for (key, expected) in [
            (Key::Up, Direction::UP),
            (Key::Down, Direction::DOWN),
            (Key::Up, Direction::UP),
            (Key::Down, Direction::DOWN),
        ] {
            now += 16;
            screen.handle_event(InputEvent::KeyDown(key));
            h.frame(&mut screen, now);
            assert_eq!(screen.match_state().map(|s| s.player.y_dir), Some(expected));
        }
    }

    #[test]
    fn test_held_key_steers_again_after_serve() {
        let mut h = Harness::new();
        let mut screen = GameplayState::new();
        h.frame(&mut screen, 0);
        screen.handle_event(InputEvent::KeyDown(Key::Space));
        h.frame(&mut screen, 16);
        screen.handle_event(InputEvent::KeyDown(Key::Up));
        h.frame(&mut screen, 32);

        // Point scored while Up stays held
        if let Some(state) = screen.match_state_mut() {
            state.finish_round(48);
        }
        assert_eq!(screen.match_state().map(|s| s.player.y_dir), Some(Direction::Still));

        screen.handle_event(InputEvent::KeyDown(Key::Space));
        h.frame(&mut screen, 64);
        let state = screen.match_state().unwrap();
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.player.y_dir, Direction::UP);
    }

    #[test]
    fn test_paddle_hit_plays_effect() {
        let mut h = Harness::new();
        let mut screen = GameplayState::new();
        h.frame(&mut screen, 0);
        screen.handle_event(InputEvent::KeyDown(Key::Space));
        h.frame(&mut screen, 16);

        if let Some(state) = screen.match_state_mut() {
            let paddle = state.enemy.rect;
            state.ball.rect = Rect::new(paddle.right() + 1, paddle.top() + 20, 16, 16);
            state.ball.y_dir = Direction::Still;
        }
        h.frame(&mut screen, 32);
        assert_eq!(h.sink.effect_count(), 1);
    }

    #[test]
    fn test_match_over_requests_results() {
        let mut h = Harness::new();
        let mut screen = GameplayState::new();
        h.frame(&mut screen, 0);
        screen.handle_event(InputEvent::KeyDown(Key::Space));
        h.frame(&mut screen, 0);
        if let Some(state) = screen.match_state_mut() {
            state.score = MatchResult { player: 2, enemy: 5 };
        }

        let end = MATCH_DURATION_SECS * 1000;
        assert_eq!(h.frame(&mut screen, end), ScreenRequest::Switch(Screen::ResultMenu));
        assert_eq!(screen.match_result(), MatchResult { player: 2, enemy: 5 });
        assert!(h.canvas.texts().contains(&"02:00"));
    }

    #[test]
    fn test_escape_leaves_to_main_menu() {
        let mut h = Harness::new();
        let mut screen = GameplayState::new();
        h.frame(&mut screen, 0);
        screen.handle_event(InputEvent::KeyDown(Key::Escape));
        assert_eq!(h.frame(&mut screen, 16), ScreenRequest::Switch(Screen::MainMenu));
    }

    #[test]
    fn test_teardown_destroys_entities() {
        let mut h = Harness::new();
        let mut screen = GameplayState::new();
        h.frame(&mut screen, 0);
        screen.teardown();
        assert!(screen.match_state().is_none());
        assert!(!screen.is_initialized());
    }
}
