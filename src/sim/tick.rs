//! Fixed timestep simulation tick
//!
//! Advances a match by one frame: serve handling, opponent steering,
//! movement, collision response, scoring and the match clock.

use super::collision::intersects;
use super::entity::Direction;
use super::state::{GamePhase, MatchResult, MatchState};
use crate::consts::{DIFFICULTY, Difficulty, MATCH_DURATION_SECS};

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Serve key pressed since the last tick
    pub serve: bool,
    /// New vertical direction for the player paddle, if it changed
    pub steer: Option<Direction>,
}

/// Which paddle a collision or point belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Player,
    Enemy,
}

/// Something the presentation layer may want to react to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// Ball put in play
    Served,
    /// Ball bounced off a paddle
    PaddleHit(Side),
    /// A point was scored by this side
    Scored(Side),
    /// Match clock ran out with these totals
    MatchOver(MatchResult),
}

/// Advance the match by one tick at wall-clock time `now_ms`
pub fn tick(state: &mut MatchState, input: &TickInput, now_ms: u64) -> Vec<GameEvent> {
    let mut events = Vec::new();

    if state.is_over() {
        return events;
    }

    if let Some(dir) = input.steer {
        state.player.y_dir = dir;
    }

    match state.phase {
        GamePhase::Waiting => {
            if input.serve {
                state.begin_round(now_ms);
                log::debug!("Round served at {} ms", now_ms);
                events.push(GameEvent::Served);
            }
        }

        GamePhase::Playing => {
            state.round_ticks += 1;
            steer_opponent(state, DIFFICULTY);

            state.ball.advance();
            state.player.advance();
            state.enemy.advance();

            resolve_collisions(state, &mut events);
        }

        // Never survives a tick, but finish it if something left it behind
        GamePhase::RoundOver | GamePhase::MatchOver => {}
    }

    if state.phase == GamePhase::RoundOver {
        state.finish_round(now_ms);
        log::info!(
            "Round over: player {} - enemy {} at {}s",
            state.score.player,
            state.score.enemy,
            state.accumulated_secs
        );
    }

    if state.elapsed_secs(now_ms) >= MATCH_DURATION_SECS {
        state.accumulated_secs = state.elapsed_secs(now_ms);
        state.round_start_ms = None;
        state.phase = GamePhase::MatchOver;
        log::info!(
            "Match over: player {} - enemy {}",
            state.score.player,
            state.score.enemy
        );
        events.push(GameEvent::MatchOver(state.match_result()));
    }

    events
}

/// Reactive opponent: every `action_delay` ticks, mirror the ball's vertical
/// direction if the ball is close enough, otherwise hold still
pub fn steer_opponent(state: &mut MatchState, difficulty: Difficulty) {
    if state.round_ticks % difficulty.action_delay() != 0 {
        return;
    }

    state.enemy.y_dir = if state.ball.rect.x < difficulty.activation_distance() {
        state.ball.y_dir
    } else {
        Direction::Still
    };
}

/// Apply every collision rule in order; paddles are checked before walls
fn resolve_collisions(state: &mut MatchState, events: &mut Vec<GameEvent>) {
    let ball = &mut state.ball;
    let player = &mut state.player;
    let enemy = &mut state.enemy;
    let top = state.borders.top_zone();
    let bottom = state.borders.bottom_zone();
    let left = state.borders.left_zone();
    let right = state.borders.right_zone();

    if intersects(&ball.rect, &player.rect) {
        ball.x_dir = Direction::LEFT;
        ball.rect.x = player.rect.left() - ball.rect.w;
        ball.speed += 1;
        events.push(GameEvent::PaddleHit(Side::Player));
    }

    if intersects(&ball.rect, &enemy.rect) {
        ball.x_dir = Direction::RIGHT;
        ball.rect.x = enemy.rect.right();
        ball.speed += 1;
        events.push(GameEvent::PaddleHit(Side::Enemy));
    }

    if intersects(&ball.rect, &top) {
        ball.y_dir = Direction::DOWN;
        ball.rect.y = top.bottom();
    }

    if intersects(&ball.rect, &right) {
        ball.x_dir = Direction::LEFT;
        ball.rect.x = right.left() - ball.rect.w;
        state.score.enemy += 1;
        state.phase = GamePhase::RoundOver;
        events.push(GameEvent::Scored(Side::Enemy));
    }

    if intersects(&ball.rect, &bottom) {
        ball.y_dir = Direction::UP;
        ball.rect.y = bottom.top() - ball.rect.h;
    }

    if intersects(&ball.rect, &left) {
        ball.x_dir = Direction::RIGHT;
        ball.rect.x = left.right();
        state.score.player += 1;
        state.phase = GamePhase::RoundOver;
        events.push(GameEvent::Scored(Side::Player));
    }

    for paddle in [player, enemy] {
        if intersects(&paddle.rect, &top) {
            paddle.stop_vertical();
            paddle.rect.y = top.bottom();
        }
        if intersects(&paddle.rect, &bottom) {
            paddle.stop_vertical();
            paddle.rect.y = bottom.top() - paddle.rect.h;
        }
    }
}
