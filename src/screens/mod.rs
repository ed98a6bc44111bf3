//! Top-level screens and the tagged union that holds the active one
//!
//! Each screen sets itself up lazily on its first `update` after becoming
//! active and owns its labels/entities only while initialized.

pub mod gameplay;
pub mod main_menu;
pub mod result_menu;
pub mod transition;

pub use gameplay::GameplayState;
pub use main_menu::MainMenuState;
pub use result_menu::ResultMenuState;
pub use transition::{ScreenManager, Transition, plan};

use anyhow::Result;

use crate::platform::{AssetProvider, Context, InputEvent, Key};
use crate::sim::MatchResult;
use crate::ui::{Label, Selector, option_style};

/// The mutually exclusive application modes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    MainMenu,
    Gameplay,
    ResultMenu,
}

/// What a screen asks for at the end of its update
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScreenRequest {
    #[default]
    SameScreen,
    Switch(Screen),
    Exit,
}

/// State of whichever screen is active
#[derive(Debug)]
pub enum ScreenState {
    MainMenu(MainMenuState),
    Gameplay(GameplayState),
    ResultMenu(ResultMenuState),
}

impl ScreenState {
    /// Fresh, uninitialized state for `screen`
    ///
    /// `carried` is only read by the result menu.
    pub fn enter(screen: Screen, carried: MatchResult) -> Self {
        match screen {
            Screen::MainMenu => ScreenState::MainMenu(MainMenuState::new()),
            Screen::Gameplay => ScreenState::Gameplay(GameplayState::new()),
            Screen::ResultMenu => ScreenState::ResultMenu(ResultMenuState::new(carried)),
        }
    }

    pub fn screen(&self) -> Screen {
        match self {
            ScreenState::MainMenu(_) => Screen::MainMenu,
            ScreenState::Gameplay(_) => Screen::Gameplay,
            ScreenState::ResultMenu(_) => Screen::ResultMenu,
        }
    }

    pub fn is_initialized(&self) -> bool {
        match self {
            ScreenState::MainMenu(s) => s.is_initialized(),
            ScreenState::Gameplay(s) => s.is_initialized(),
            ScreenState::ResultMenu(s) => s.is_initialized(),
        }
    }

    pub fn handle_event(&mut self, event: InputEvent) {
        match self {
            ScreenState::MainMenu(s) => s.handle_event(event),
            ScreenState::Gameplay(s) => s.handle_event(event),
            ScreenState::ResultMenu(s) => s.handle_event(event),
        }
    }

    /// Run one frame of the active screen's logic and drawing
    pub fn update(&mut self, ctx: &mut Context) -> Result<ScreenRequest> {
        match self {
            ScreenState::MainMenu(s) => s.update(ctx),
            ScreenState::Gameplay(s) => s.update(ctx),
            ScreenState::ResultMenu(s) => s.update(ctx),
        }
    }

    /// Release everything the screen acquired during setup
    pub fn teardown(&mut self) {
        match self {
            ScreenState::MainMenu(s) => s.teardown(),
            ScreenState::Gameplay(s) => s.teardown(),
            ScreenState::ResultMenu(s) => s.teardown(),
        }
    }
}

/// Shared key handling for the two-option menus
///
/// Up/down flip the cursor; confirm returns the selected request.
fn menu_key(selector: &mut Selector<ScreenRequest>, event: InputEvent) -> Option<ScreenRequest> {
    match event {
        InputEvent::KeyDown(Key::Up | Key::Down) => {
            selector.toggle();
            None
        }
        InputEvent::KeyDown(Key::Enter) => Some(selector.selected()),
        _ => None,
    }
}

/// Re-derive option emphasis from the cursor
fn style_options(
    assets: &mut dyn AssetProvider,
    options: &mut [Label; 2],
    selector: &Selector<ScreenRequest>,
) -> Result<()> {
    for (i, label) in options.iter_mut().enumerate() {
        label.set_style(assets, option_style(selector.is_selected(i)))?;
    }
    Ok(())
}
