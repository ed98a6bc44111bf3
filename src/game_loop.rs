//! Frame loop
//!
//! Each frame: drain input (a quit event stops before any screen logic),
//! route the events to the active screen, run its update, present, then
//! reconcile the requested screen change.

use anyhow::Result;

use crate::audio::AudioManager;
use crate::consts::SCREEN_TICKS_PER_FRAME;
use crate::platform::{AssetProvider, Canvas, Clock, Context, InputEvent, InputSource};
use crate::screens::ScreenManager;

pub struct GameLoop<C, A, I, K> {
    canvas: C,
    assets: A,
    input: I,
    clock: K,
    audio: AudioManager,
    screens: ScreenManager,
    frames: u64,
}

impl<C, A, I, K> GameLoop<C, A, I, K>
where
    C: Canvas,
    A: AssetProvider,
    I: InputSource,
    K: Clock,
{
    pub fn new(canvas: C, assets: A, input: I, clock: K, audio: AudioManager) -> Self {
        Self {
            canvas,
            assets,
            input,
            clock,
            audio,
            screens: ScreenManager::new(),
            frames: 0,
        }
    }

    pub fn screens(&self) -> &ScreenManager {
        &self.screens
    }

    pub fn canvas(&self) -> &C {
        &self.canvas
    }

    pub fn input_mut(&mut self) -> &mut I {
        &mut self.input
    }

    pub fn clock_mut(&mut self) -> &mut K {
        &mut self.clock
    }

    /// Frames completed so far
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Run one frame; returns false once the game should stop
    pub fn run_frame(&mut self) -> Result<bool> {
        while let Some(event) = self.input.poll_event()? {
            if event == InputEvent::Quit {
                log::info!("Quit event after {} frames", self.frames);
                return Ok(false);
            }
            self.screens.state_mut().handle_event(event);
        }

        let mut ctx = Context {
            canvas: &mut self.canvas,
            assets: &mut self.assets,
            audio: &mut self.audio,
            now_ms: self.clock.now_ms(),
        };
        let requested = self.screens.state_mut().update(&mut ctx)?;
        self.canvas.present()?;
        self.frames += 1;

        Ok(self.screens.reconcile(requested))
    }

    /// Run frames until quit or exit, capped at `SCREEN_FPS`
    pub fn run(&mut self) -> Result<()> {
        log::info!("Entering frame loop at {:?}", self.screens.current());
        loop {
            let start = self.clock.now_ms();
            if !self.run_frame()? {
                break;
            }
            let spent = self.clock.now_ms().saturating_sub(start);
            if spent < SCREEN_TICKS_PER_FRAME {
                self.clock.sleep_ms(SCREEN_TICKS_PER_FRAME - spent);
            }
        }
        log::info!("Frame loop finished after {} frames", self.frames);
        Ok(())
    }
}
