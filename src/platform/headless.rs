//! Headless platform: records draw and audio calls, replays scripted input
//!
//! Used to drive screens and the frame loop deterministically.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use anyhow::Result;
use glam::IVec2;

use super::{AssetProvider, Canvas, Clock, Fill, ImageId, InputEvent, InputSource};
use crate::audio::{AudioPlayer, SoundEffect, Track};
use crate::consts::BALL_SIZE;
use crate::sim::Rect;
use crate::ui::{Color, TextStyle};

/// One recorded draw request
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    Clear(Color),
    Rect(Rect, Color, Fill),
    Image(ImageId, IVec2),
    Text(String, TextStyle, IVec2),
}

/// Canvas that keeps the calls of the frame being built and the last
/// presented frame
#[derive(Debug, Default)]
pub struct RecordingCanvas {
    pending: Vec<DrawCall>,
    pub frame: Vec<DrawCall>,
    pub presented: u64,
}

impl RecordingCanvas {
    /// Text of every label in the last presented frame
    pub fn texts(&self) -> Vec<&str> {
        self.frame
            .iter()
            .filter_map(|call| match call {
                DrawCall::Text(text, _, _) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Style a text was drawn with in the last presented frame
    pub fn style_of(&self, needle: &str) -> Option<TextStyle> {
        self.frame.iter().find_map(|call| match call {
            DrawCall::Text(text, style, _) if text == needle => Some(*style),
            _ => None,
        })
    }
}

impl Canvas for RecordingCanvas {
    fn clear(&mut self, color: Color) -> Result<()> {
        self.pending.push(DrawCall::Clear(color));
        Ok(())
    }

    fn draw_rect(&mut self, rect: Rect, color: Color, fill: Fill) -> Result<()> {
        self.pending.push(DrawCall::Rect(rect, color, fill));
        Ok(())
    }

    fn draw_image(&mut self, image: ImageId, at: IVec2) -> Result<()> {
        self.pending.push(DrawCall::Image(image, at));
        Ok(())
    }

    fn draw_text(&mut self, text: &str, style: &TextStyle, at: IVec2) -> Result<()> {
        self.pending.push(DrawCall::Text(text.to_owned(), *style, at));
        Ok(())
    }

    fn present(&mut self) -> Result<()> {
        self.frame = std::mem::take(&mut self.pending);
        self.presented += 1;
        Ok(())
    }
}

/// Text is `size / 2` pixels per character and `size` pixels tall
#[derive(Debug, Default, Clone, Copy)]
pub struct FixedMetrics;

impl AssetProvider for FixedMetrics {
    fn text_size(&mut self, text: &str, style: &TextStyle) -> Result<IVec2> {
        let size = i32::from(style.size);
        Ok(IVec2::new(text.chars().count() as i32 * size / 2, size))
    }

    fn image_size(&mut self, image: ImageId) -> Result<IVec2> {
        match image {
            ImageId::Ball => Ok(IVec2::splat(BALL_SIZE)),
        }
    }
}

/// Replays one batch of events per frame
#[derive(Debug, Default)]
pub struct ScriptedInput {
    frames: VecDeque<VecDeque<InputEvent>>,
}

impl ScriptedInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the events of the next frame (an empty batch is an idle frame)
    pub fn frame(mut self, events: impl IntoIterator<Item = InputEvent>) -> Self {
        self.push_frame(events);
        self
    }

    /// Queue `count` frames without input
    pub fn idle(mut self, count: usize) -> Self {
        for _ in 0..count {
            self.push_frame([]);
        }
        self
    }

    pub fn push_frame(&mut self, events: impl IntoIterator<Item = InputEvent>) {
        self.frames.push_back(events.into_iter().collect());
    }

    pub fn is_exhausted(&self) -> bool {
        self.frames.is_empty()
    }
}

impl InputSource for ScriptedInput {
    fn poll_event(&mut self) -> Result<Option<InputEvent>> {
        let Some(frame) = self.frames.front_mut() else {
            return Ok(None);
        };
        match frame.pop_front() {
            Some(event) => Ok(Some(event)),
            None => {
                // End of this frame's batch
                self.frames.pop_front();
                Ok(None)
            }
        }
    }
}

/// Clock that only moves when slept on or advanced by hand
#[derive(Debug, Default)]
pub struct ManualClock {
    now: u64,
}

impl ManualClock {
    pub fn advance(&mut self, ms: u64) {
        self.now += ms;
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.now
    }

    fn sleep_ms(&mut self, ms: u64) {
        self.now += ms;
    }
}

/// One recorded audio request
#[derive(Debug, Clone, PartialEq)]
pub enum AudioCall {
    Track(Track, f32),
    Stop,
    Effect(SoundEffect, f32),
}

/// Audio player that logs every request; clones share the log
#[derive(Debug, Default, Clone)]
pub struct RecordingAudio {
    log: Rc<RefCell<Vec<AudioCall>>>,
}

impl RecordingAudio {
    pub fn calls(&self) -> Vec<AudioCall> {
        self.log.borrow().clone()
    }

    pub fn tracks(&self) -> Vec<Track> {
        self.log
            .borrow()
            .iter()
            .filter_map(|call| match call {
                AudioCall::Track(track, _) => Some(*track),
                _ => None,
            })
            .collect()
    }

    pub fn effect_count(&self) -> usize {
        self.log
            .borrow()
            .iter()
            .filter(|call| matches!(call, AudioCall::Effect(..)))
            .count()
    }
}

impl AudioPlayer for RecordingAudio {
    fn play_track(&mut self, track: Track, volume: f32) {
        self.log.borrow_mut().push(AudioCall::Track(track, volume));
    }

    fn stop_track(&mut self) {
        self.log.borrow_mut().push(AudioCall::Stop);
    }

    fn play_effect(&mut self, effect: SoundEffect, volume: f32) {
        self.log.borrow_mut().push(AudioCall::Effect(effect, volume));
    }
}
