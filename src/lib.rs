//! Pong - a classic two-paddle arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (geometry, entities, match state, tick)
//! - `ui`: Text labels, placement rules and menu selection
//! - `screens`: Main menu, gameplay and result screens plus transitions
//! - `platform`: Rendering/input/clock collaborators and their backends
//! - `audio`: Sound identifiers and the volume-aware audio manager
//! - `settings`: User preferences

pub mod audio;
pub mod game_loop;
pub mod platform;
pub mod screens;
pub mod settings;
pub mod sim;
pub mod ui;

pub use game_loop::GameLoop;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    use crate::sim::Rect;

    pub const WINDOW_TITLE: &str = "Pong";
    pub const WINDOW_WIDTH: i32 = 960;
    pub const WINDOW_HEIGHT: i32 = 540;

    /// Frame rate cap
    pub const SCREEN_FPS: u64 = 60;
    pub const SCREEN_TICKS_PER_FRAME: u64 = 1000 / SCREEN_FPS;

    /// Length of a match in seconds
    pub const MATCH_DURATION_SECS: u64 = 120;

    /// Space above the playfield reserved for scores and the clock
    pub const HUD_HEIGHT: i32 = 60;
    pub const BORDER_THICKNESS: i32 = 4;

    /// Paddle defaults
    pub const PADDLE_WIDTH: i32 = 16;
    pub const PADDLE_HEIGHT: i32 = 96;
    /// Gap between a side border and the paddle guarding it
    pub const PADDLE_INSET: i32 = 40;
    pub const PLAYER_SPEED: i32 = 6;

    /// Ball defaults
    pub const BALL_SIZE: i32 = 16;
    pub const BALL_START_SPEED: i32 = 5;

    /// Whole window in logical pixels
    pub const SCREEN: Rect = Rect::new(0, 0, WINDOW_WIDTH, WINDOW_HEIGHT);

    /// Opponent behaviour, fixed at build time
    pub const DIFFICULTY: Difficulty = Difficulty::Normal;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum Difficulty {
        Easy,
        Normal,
        Hard,
    }

    impl Difficulty {
        /// Ticks between opponent decisions
        pub const fn action_delay(self) -> u64 {
            match self {
                Difficulty::Easy => 12,
                Difficulty::Normal => 6,
                Difficulty::Hard => 2,
            }
        }

        /// The opponent only tracks the ball once it is left of this x
        pub const fn activation_distance(self) -> i32 {
            match self {
                Difficulty::Easy => WINDOW_WIDTH / 3,
                Difficulty::Normal => WINDOW_WIDTH / 2,
                Difficulty::Hard => WINDOW_WIDTH * 2 / 3,
            }
        }

        pub const fn paddle_speed(self) -> i32 {
            match self {
                Difficulty::Easy => 4,
                Difficulty::Normal => 5,
                Difficulty::Hard => 6,
            }
        }
    }
}

/// Format whole seconds as `mm:ss`
pub fn format_clock(secs: u64) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}
