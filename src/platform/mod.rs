//! Platform abstraction layer
//!
//! The game core only ever talks to these traits:
//! - `Canvas`: draw calls, visible after `present`
//! - `AssetProvider`: sizes of text and images
//! - `InputSource`: discrete key/quit events, drained once per frame
//! - `Clock`: monotonic milliseconds and the end-of-frame sleep
//!
//! `terminal` implements them on top of crossterm, `headless` records
//! everything for tests.

pub mod headless;
pub mod terminal;

use anyhow::Result;
use glam::IVec2;

use crate::audio::AudioManager;
use crate::sim::Rect;
use crate::ui::{Color, TextStyle};

/// Rectangle drawing mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fill {
    Solid,
    Outline,
}

/// Images the game draws
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageId {
    Ball,
}

impl ImageId {
    pub fn resource(&self) -> &'static str {
        match self {
            ImageId::Ball => "resources/img/ball.png",
        }
    }
}

/// Keys the game distinguishes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Up,
    Down,
    Enter,
    Space,
    Escape,
    Other,
}

/// A single polled input event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Quit,
    KeyDown(Key),
    KeyUp(Key),
}

/// Rendering surface
pub trait Canvas {
    fn clear(&mut self, color: Color) -> Result<()>;
    fn draw_rect(&mut self, rect: Rect, color: Color, fill: Fill) -> Result<()>;
    fn draw_image(&mut self, image: ImageId, at: IVec2) -> Result<()>;
    fn draw_text(&mut self, text: &str, style: &TextStyle, at: IVec2) -> Result<()>;
    fn present(&mut self) -> Result<()>;
}

/// Resolves fonts and images to their rendered sizes
pub trait AssetProvider {
    fn text_size(&mut self, text: &str, style: &TextStyle) -> Result<IVec2>;
    fn image_size(&mut self, image: ImageId) -> Result<IVec2>;
}

/// Source of input events
pub trait InputSource {
    /// Next pending event, or `None` once this frame's events are drained
    fn poll_event(&mut self) -> Result<Option<InputEvent>>;
}

/// Monotonic time source
pub trait Clock {
    fn now_ms(&self) -> u64;
    fn sleep_ms(&mut self, ms: u64);
}

/// Everything a screen may touch during one frame
pub struct Context<'a> {
    pub canvas: &'a mut dyn Canvas,
    pub assets: &'a mut dyn AssetProvider,
    pub audio: &'a mut AudioManager,
    /// Timestamp of the frame start
    pub now_ms: u64,
}
