//! Main menu: Play or Quit

use anyhow::Result;
use glam::IVec2;

use super::{Screen, ScreenRequest, menu_key, style_options};
use crate::audio::Track;
use crate::consts::WINDOW_TITLE;
use crate::platform::{Context, InputEvent};
use crate::ui::{Color, FontId, Label, Placement, Selector, TextStyle, option_style};

const TITLE_STYLE: TextStyle = TextStyle::new(FontId::Title, 96, Color::WHITE);
const HINT_STYLE: TextStyle = TextStyle::new(FontId::Body, 18, Color::GREY);

/// Labels that exist only while the menu is initialized
#[derive(Debug)]
struct MainMenuResources {
    title: Label,
    options: [Label; 2],
    hint: Label,
}

#[derive(Debug)]
pub struct MainMenuState {
    resources: Option<MainMenuResources>,
    selector: Selector<ScreenRequest>,
    next_screen: ScreenRequest,
}

impl Default for MainMenuState {
    fn default() -> Self {
        Self::new()
    }
}

impl MainMenuState {
    pub fn new() -> Self {
        Self {
            resources: None,
            selector: Selector::new([ScreenRequest::Switch(Screen::Gameplay), ScreenRequest::Exit]),
            next_screen: ScreenRequest::SameScreen,
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.resources.is_some()
    }

    pub fn handle_event(&mut self, event: InputEvent) {
        if let Some(request) = menu_key(&mut self.selector, event) {
            self.next_screen = request;
        }
    }

    fn setup(&mut self, ctx: &mut Context) -> Result<MainMenuResources> {
        self.selector.reset();
        self.next_screen = ScreenRequest::SameScreen;

        let assets = &mut *ctx.assets;
        let resources = MainMenuResources {
            title: Label::new(assets, WINDOW_TITLE, TITLE_STYLE, Placement::Top, IVec2::new(0, 80))?,
            options: [
                Label::new(assets, "Play", option_style(true), Placement::Center, IVec2::new(0, 10))?,
                Label::new(assets, "Quit", option_style(false), Placement::Center, IVec2::new(0, 90))?,
            ],
            hint: Label::new(
                assets,
                "Up/Down to choose, Enter to confirm",
                HINT_STYLE,
                Placement::Bottom,
                IVec2::new(0, 24),
            )?,
        };

        ctx.audio.play_music(Track::Menu);
        log::debug!("Main menu initialized");
        Ok(resources)
    }

    pub fn update(&mut self, ctx: &mut Context) -> Result<ScreenRequest> {
        if self.resources.is_none() {
            self.resources = Some(self.setup(ctx)?);
        }
        let Some(res) = self.resources.as_mut() else {
            return Ok(self.next_screen);
        };

        style_options(ctx.assets, &mut res.options, &self.selector)?;

        ctx.canvas.clear(Color::BLACK)?;
        res.title.draw(ctx.canvas)?;
        for option in &res.options {
            option.draw(ctx.canvas)?;
        }
        res.hint.draw(ctx.canvas)?;

        Ok(self.next_screen)
    }

    pub fn teardown(&mut self) {
        if self.resources.take().is_some() {
            log::debug!("Main menu released");
        }
    }
}
