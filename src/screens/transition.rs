//! Screen transitions
//!
//! `plan` decides what a screen's request means; `ScreenManager` carries it
//! out by tearing down the screen being left and swapping in a fresh,
//! uninitialized state for the one being entered. Setup itself is deferred
//! to that screen's first `update`.

use super::{Screen, ScreenRequest, ScreenState};
use crate::sim::MatchResult;

/// Outcome of reconciling one request against the active screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Keep the active screen untouched
    Stay,
    /// Stop the frame loop
    Exit,
    /// Leave `from` and enter `to`
    Switch { from: Screen, to: Screen },
}

/// Pure transition table
pub fn plan(current: Screen, requested: ScreenRequest) -> Transition {
    match requested {
        ScreenRequest::SameScreen => Transition::Stay,
        ScreenRequest::Exit => Transition::Exit,
        ScreenRequest::Switch(to) if to == current => Transition::Stay,
        ScreenRequest::Switch(to) => Transition::Switch { from: current, to },
    }
}

/// Owns the active screen state
#[derive(Debug)]
pub struct ScreenManager {
    state: ScreenState,
    /// Totals of the most recent match, handed to the result menu
    last_result: MatchResult,
}

impl Default for ScreenManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ScreenManager {
    /// Start at the main menu
    pub fn new() -> Self {
        Self::starting_at(Screen::MainMenu)
    }

    pub fn starting_at(screen: Screen) -> Self {
        Self {
            state: ScreenState::enter(screen, MatchResult::default()),
            last_result: MatchResult::default(),
        }
    }

    pub fn current(&self) -> Screen {
        self.state.screen()
    }

    pub fn state(&self) -> &ScreenState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut ScreenState {
        &mut self.state
    }

    pub fn last_result(&self) -> MatchResult {
        self.last_result
    }

    /// Apply the active screen's request; returns false once the loop
    /// should stop
    ///
    /// Exit skips teardown entirely and leaves the state as it was.
    pub fn reconcile(&mut self, requested: ScreenRequest) -> bool {
        match plan(self.current(), requested) {
            Transition::Stay => true,
            Transition::Exit => {
                log::info!("Exit requested from {:?}", self.current());
                false
            }
            Transition::Switch { from, to } => {
                if let ScreenState::Gameplay(gameplay) = &self.state {
                    self.last_result = gameplay.match_result();
                }
                self.state.teardown();
                self.state = ScreenState::enter(to, self.last_result);
                log::info!("Screen change: {:?} -> {:?}", from, to);
                true
            }
        }
    }
}
