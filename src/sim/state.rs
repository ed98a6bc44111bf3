//! Match state and core simulation types
//!
//! Everything the gameplay screen simulates lives here; rendering and audio
//! only ever read it.

use serde::{Deserialize, Serialize};

use super::collision::Rect;
use super::entity::{Direction, MovingEntity};
use crate::consts::*;

/// Current phase of a match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Ball and paddles parked, waiting for the serve key
    Waiting,
    /// Ball in play, clock running
    Playing,
    /// Someone just scored; the round is reset before the tick ends
    RoundOver,
    /// Match clock ran out
    MatchOver,
}

/// Who came out ahead
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    PlayerWins,
    EnemyWins,
    Draw,
}

/// Final (or running) point totals
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MatchResult {
    pub player: u32,
    pub enemy: u32,
}

impl MatchResult {
    pub fn outcome(&self) -> Outcome {
        use std::cmp::Ordering;
        match self.player.cmp(&self.enemy) {
            Ordering::Greater => Outcome::PlayerWins,
            Ordering::Less => Outcome::EnemyWins,
            Ordering::Equal => Outcome::Draw,
        }
    }
}

/// The four walls around the playfield
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Borders {
    pub top: Rect,
    pub bottom: Rect,
    pub left: Rect,
    pub right: Rect,
}

impl Default for Borders {
    fn default() -> Self {
        let side_height = WINDOW_HEIGHT - HUD_HEIGHT;
        Self {
            top: Rect::new(0, HUD_HEIGHT, WINDOW_WIDTH, BORDER_THICKNESS),
            bottom: Rect::new(0, WINDOW_HEIGHT - BORDER_THICKNESS, WINDOW_WIDTH, BORDER_THICKNESS),
            left: Rect::new(0, HUD_HEIGHT, BORDER_THICKNESS, side_height),
            right: Rect::new(WINDOW_WIDTH - BORDER_THICKNESS, HUD_HEIGHT, BORDER_THICKNESS, side_height),
        }
    }
}

impl Borders {
    /// Iterate in drawing order
    pub fn iter(&self) -> impl Iterator<Item = &Rect> {
        [&self.top, &self.bottom, &self.left, &self.right].into_iter()
    }

    /// Vertical space between the top and bottom walls
    pub fn inner_height(&self) -> i32 {
        self.bottom.top() - self.top.bottom()
    }

    /// Collision volume of the top wall, extended away from the playfield
    pub fn top_zone(&self) -> Rect {
        let r = self.top;
        Rect::new(r.x - WALL_DEPTH, r.y - WALL_DEPTH, r.w + 2 * WALL_DEPTH, r.h + WALL_DEPTH)
    }

    pub fn bottom_zone(&self) -> Rect {
        let r = self.bottom;
        Rect::new(r.x - WALL_DEPTH, r.y, r.w + 2 * WALL_DEPTH, r.h + WALL_DEPTH)
    }

    pub fn left_zone(&self) -> Rect {
        let r = self.left;
        Rect::new(r.x - WALL_DEPTH, r.y - WALL_DEPTH, r.w + WALL_DEPTH, r.h + 2 * WALL_DEPTH)
    }

    pub fn right_zone(&self) -> Rect {
        let r = self.right;
        Rect::new(r.x, r.y - WALL_DEPTH, r.w + WALL_DEPTH, r.h + 2 * WALL_DEPTH)
    }
}

/// How far wall collision volumes reach past the visible strip, so a fast
/// ball cannot step over a wall in one tick
pub const WALL_DEPTH: i32 = 10_000;

/// Ball as it is placed at the start of every round
pub fn serve_ball(borders: &Borders) -> MovingEntity {
    let x = (WINDOW_WIDTH - BALL_SIZE) / 2;
    let y = borders.top.bottom() + (borders.inner_height() - BALL_SIZE) / 2;
    MovingEntity::new(Rect::new(x, y, BALL_SIZE, BALL_SIZE), BALL_START_SPEED)
        .with_direction(Direction::LEFT, Direction::DOWN)
}

fn paddle_at(x: i32, borders: &Borders, speed: i32) -> MovingEntity {
    let y = borders.top.bottom() + (borders.inner_height() - PADDLE_HEIGHT) / 2;
    MovingEntity::new(Rect::new(x, y, PADDLE_WIDTH, PADDLE_HEIGHT), speed)
}

/// Complete match state (deterministic given inputs and timestamps)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchState {
    pub phase: GamePhase,
    pub ball: MovingEntity,
    /// Right-hand paddle, steered by the keyboard
    pub player: MovingEntity,
    /// Left-hand paddle, steered by the reactive opponent
    pub enemy: MovingEntity,
    pub borders: Borders,
    pub score: MatchResult,
    /// Whole seconds played in finished rounds
    pub accumulated_secs: u64,
    /// Timestamp (ms) the current round was served, while the clock runs
    pub round_start_ms: Option<u64>,
    /// Simulation ticks since the current round was served
    pub round_ticks: u64,
}

impl Default for MatchState {
    fn default() -> Self {
        Self::new()
    }
}

impl MatchState {
    /// Fresh match: 0-0, clock at zero, waiting for the serve
    pub fn new() -> Self {
        let borders = Borders::default();
        let enemy_x = borders.left.right() + PADDLE_INSET;
        let player_x = borders.right.left() - PADDLE_INSET - PADDLE_WIDTH;
        Self {
            phase: GamePhase::Waiting,
            ball: serve_ball(&borders),
            player: paddle_at(player_x, &borders, PLAYER_SPEED),
            enemy: paddle_at(enemy_x, &borders, DIFFICULTY.paddle_speed()),
            borders,
            score: MatchResult::default(),
            accumulated_secs: 0,
            round_start_ms: None,
            round_ticks: 0,
        }
    }

    /// Seconds on the match clock at `now_ms`
    pub fn elapsed_secs(&self, now_ms: u64) -> u64 {
        let running = self
            .round_start_ms
            .map(|start| now_ms.saturating_sub(start) / 1000)
            .unwrap_or(0);
        self.accumulated_secs + running
    }

    /// Serve: start the clock and put the ball in play
    pub fn begin_round(&mut self, now_ms: u64) {
        self.round_start_ms = Some(now_ms);
        self.round_ticks = 0;
        self.phase = GamePhase::Playing;
    }

    /// Bank the round's time, re-serve the ball and wait for the next serve
    ///
    /// Score and accumulated time survive; ball speed and direction do not.
    pub fn finish_round(&mut self, now_ms: u64) {
        self.accumulated_secs = self.elapsed_secs(now_ms);
        self.round_start_ms = None;
        self.round_ticks = 0;
        self.ball = serve_ball(&self.borders);
        self.player.stop_vertical();
        self.enemy.stop_vertical();
        self.phase = GamePhase::Waiting;
    }

    pub fn match_result(&self) -> MatchResult {
        self.score
    }

    /// Whether the clock has run out
    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::MatchOver
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::collision::intersects;

    #[test]
    fn test_new_match_layout() {
        let state = MatchState::new();
        assert_eq!(state.phase, GamePhase::Waiting);
        assert_eq!(state.score, MatchResult::default());

        // Everything starts inside the walls
        for entity in [&state.ball, &state.player, &state.enemy] {
            for border in state.borders.iter() {
                assert!(!intersects(&entity.rect, border));
            }
        }

        // Player on the right, opponent on the left
        assert!(state.player.rect.x > state.ball.rect.x);
        assert!(state.enemy.rect.x < state.ball.rect.x);
    }

    #[test]
    fn test_elapsed_clock() {
        let mut state = MatchState::new();
        state.accumulated_secs = 7;
        assert_eq!(state.elapsed_secs(50_000), 7);

        state.begin_round(10_000);
        assert_eq!(state.elapsed_secs(10_999), 7);
        assert_eq!(state.elapsed_secs(11_000), 8);
        assert_eq!(state.elapsed_secs(25_500), 22);
    }

    #[test]
    fn test_finish_round_without_play() {
        let mut state = MatchState::new();
        let served = serve_ball(&state.borders);

        state.phase = GamePhase::RoundOver;
        state.finish_round(0);

        assert_eq!(state.score, MatchResult { player: 0, enemy: 0 });
        assert_eq!(state.ball, served);
        assert_eq!(state.ball.speed, BALL_START_SPEED);
        assert_eq!(state.ball.x_dir, Direction::LEFT);
        assert_eq!(state.phase, GamePhase::Waiting);
        assert_eq!(state.accumulated_secs, 0);
    }

    #[test]
    fn test_finish_round_banks_time() {
        let mut state = MatchState::new();
        state.begin_round(1_000);
        state.finish_round(4_700);
        assert_eq!(state.accumulated_secs, 3);
        assert_eq!(state.round_start_ms, None);

        state.begin_round(10_000);
        assert_eq!(state.elapsed_secs(12_000), 5);
    }

    #[test]
    fn test_outcome() {
        assert_eq!(MatchResult { player: 3, enemy: 1 }.outcome(), Outcome::PlayerWins);
        assert_eq!(MatchResult { player: 0, enemy: 2 }.outcome(), Outcome::EnemyWins);
        assert_eq!(MatchResult { player: 4, enemy: 4 }.outcome(), Outcome::Draw);
    }
}
