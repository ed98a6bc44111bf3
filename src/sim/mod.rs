//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One call to `tick` per frame
//! - Time only enters through the `now_ms` timestamp passed in
//! - No rendering, audio or platform dependencies

pub mod collision;
pub mod entity;
pub mod state;
pub mod tick;

pub use collision::{Rect, intersects};
pub use entity::{Direction, MovingEntity};
pub use state::{Borders, GamePhase, MatchResult, MatchState, Outcome, serve_ball};
pub use tick::{GameEvent, Side, TickInput, steer_opponent, tick};
