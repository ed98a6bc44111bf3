//! Result screen: final score, then Play Again or Main Menu

use anyhow::Result;
use glam::IVec2;

use super::{Screen, ScreenRequest, menu_key, style_options};
use crate::audio::Track;
use crate::platform::{Context, InputEvent};
use crate::sim::{MatchResult, Outcome};
use crate::ui::{Color, FontId, Label, Placement, Selector, TextStyle, option_style};

const HEADLINE_STYLE: TextStyle = TextStyle::new(FontId::Title, 72, Color::WHITE);
const SCORE_STYLE: TextStyle = TextStyle::new(FontId::Body, 36, Color::GREY);

fn headline(outcome: Outcome) -> &'static str {
    match outcome {
        Outcome::PlayerWins => "You Win!",
        Outcome::EnemyWins => "You Lose",
        Outcome::Draw => "Draw",
    }
}

#[derive(Debug)]
struct ResultMenuResources {
    headline: Label,
    score: Label,
    options: [Label; 2],
}

#[derive(Debug)]
pub struct ResultMenuState {
    result: MatchResult,
    resources: Option<ResultMenuResources>,
    selector: Selector<ScreenRequest>,
    next_screen: ScreenRequest,
}

impl ResultMenuState {
    pub fn new(result: MatchResult) -> Self {
        Self {
            result,
            resources: None,
            selector: Selector::new([
                ScreenRequest::Switch(Screen::Gameplay),
                ScreenRequest::Switch(Screen::MainMenu),
            ]),
            next_screen: ScreenRequest::SameScreen,
        }
    }

    /// Totals of the match that just ended
    pub fn result(&self) -> MatchResult {
        self.result
    }

    pub fn is_initialized(&self) -> bool {
        self.resources.is_some()
    }

    pub fn handle_event(&mut self, event: InputEvent) {
        if let Some(request) = menu_key(&mut self.selector, event) {
            self.next_screen = request;
        }
    }

    fn setup(&mut self, ctx: &mut Context) -> Result<ResultMenuResources> {
        self.selector.reset();
        self.next_screen = ScreenRequest::SameScreen;

        let assets = &mut *ctx.assets;
        let score = format!("Player {} - {} CPU", self.result.player, self.result.enemy);
        let resources = ResultMenuResources {
            headline: Label::new(
                assets,
                headline(self.result.outcome()),
                HEADLINE_STYLE,
                Placement::Top,
                IVec2::new(0, 70),
            )?,
            score: Label::new(assets, score, SCORE_STYLE, Placement::Top, IVec2::new(0, 170))?,
            options: [
                Label::new(assets, "Play Again", option_style(true), Placement::Center, IVec2::new(0, 40))?,
                Label::new(assets, "Main Menu", option_style(false), Placement::Center, IVec2::new(0, 120))?,
            ],
        };

        ctx.audio.play_music(Track::Results);
        log::debug!("Result menu initialized for {:?}", self.result);
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
        res.headline.draw(ctx.canvas)?;
        res.score.draw(ctx.canvas)?;
        for option in &res.options {
            option.draw(ctx.canvas)?;
        }

        Ok(self.next_screen)
    }

    pub fn teardown(&mut self) {
        if self.resources.take().is_some() {
            log::debug!("Result menu released");
        }
    }
}
