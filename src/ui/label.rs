//! Text labels and their placement rules

use anyhow::Result;
use glam::IVec2;

use crate::consts::SCREEN;
use crate::platform::{AssetProvider, Canvas};
use crate::sim::Rect;

/// Opaque RGB colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const GREY: Color = Color::rgb(150, 150, 150);
    pub const YELLOW: Color = Color::rgb(255, 210, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Font faces the game uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FontId {
    Title,
    Body,
}

impl FontId {
    pub fn resource(&self) -> &'static str {
        match self {
            FontId::Title => "resources/fonts/work_sans/static/WorkSans-Bold.ttf",
            FontId::Body => "resources/fonts/work_sans/static/WorkSans-Regular.ttf",
        }
    }
}

/// Everything that decides how a piece of text is rasterized
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextStyle {
    pub font: FontId,
    pub size: u16,
    pub color: Color,
}

impl TextStyle {
    pub const fn new(font: FontId, size: u16, color: Color) -> Self {
        Self { font, size, color }
    }
}

/// Where a label sits relative to the screen edges
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    Top,
    Bottom,
    Left,
    Right,
    Center,
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Placement {
    /// Absolute position of a `size` box inside `bounds`
    ///
    /// Padding pushes away from the anchoring edge; on a centred axis it is a
    /// plain signed offset.
    pub fn resolve(self, bounds: Rect, size: IVec2, padding: IVec2) -> IVec2 {
        let center_x = bounds.x + (bounds.w - size.x) / 2 + padding.x;
        let center_y = bounds.y + (bounds.h - size.y) / 2 + padding.y;
        let left = bounds.left() + padding.x;
        let right = bounds.right() - size.x - padding.x;
        let top = bounds.top() + padding.y;
        let bottom = bounds.bottom() - size.y - padding.y;

        let (x, y) = match self {
            Placement::Top => (center_x, top),
            Placement::Bottom => (center_x, bottom),
            Placement::Left => (left, center_y),
            Placement::Right => (right, center_y),
            Placement::Center => (center_x, center_y),
            Placement::TopLeft => (left, top),
            Placement::TopRight => (right, top),
            Placement::BottomLeft => (left, bottom),
            Placement::BottomRight => (right, bottom),
        };
        IVec2::new(x, y)
    }
}

/// A piece of rendered text with a fixed placement rule
///
/// Changing the text or style rebuilds the label, which re-measures it and
/// re-resolves its position.
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    pub rect: Rect,
    text: String,
    style: TextStyle,
    placement: Placement,
    padding: IVec2,
}

impl Label {
    pub fn new(
        assets: &mut dyn AssetProvider,
        text: impl Into<String>,
        style: TextStyle,
        placement: Placement,
        padding: IVec2,
    ) -> Result<Self> {
        let mut label = Self {
            rect: Rect::default(),
            text: text.into(),
            style,
            placement,
            padding,
        };
        label.layout(assets)?;
        Ok(label)
    }

    fn layout(&mut self, assets: &mut dyn AssetProvider) -> Result<()> {
        let size = assets.text_size(&self.text, &self.style)?;
        let pos = self.placement.resolve(SCREEN, size, self.padding);
        self.rect = Rect::new(pos.x, pos.y, size.x, size.y);
        Ok(())
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn style(&self) -> TextStyle {
        self.style
    }

    /// Replace the text; no-op if unchanged
    pub fn set_text(&mut self, assets: &mut dyn AssetProvider, text: &str) -> Result<()> {
        if self.text == text {
            return Ok(());
        }
        self.text = text.to_owned();
        self.layout(assets)
    }

    /// Replace the style; no-op if unchanged
    pub fn set_style(&mut self, assets: &mut dyn AssetProvider, style: TextStyle) -> Result<()> {
        if self.style == style {
            return Ok(());
        }
        self.style = style;
        self.layout(assets)
    }

    pub fn draw(&self, canvas: &mut dyn Canvas) -> Result<()> {
        canvas.draw_text(&self.text, &self.style, self.rect.position())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::headless::FixedMetrics;

    const BOUNDS: Rect = Rect::new(0, 0, 960, 540);

    #[test]
    fn test_placement_anchors() {
        let size = IVec2::new(100, 20);
        let pad = IVec2::new(10, 5);
        assert_eq!(Placement::Top.resolve(BOUNDS, size, pad), IVec2::new(440, 5));
        assert_eq!(Placement::Bottom.resolve(BOUNDS, size, pad), IVec2::new(440, 515));
        assert_eq!(Placement::Left.resolve(BOUNDS, size, pad), IVec2::new(10, 265));
        assert_eq!(Placement::Right.resolve(BOUNDS, size, pad), IVec2::new(850, 265));
        assert_eq!(Placement::Center.resolve(BOUNDS, size, pad), IVec2::new(440, 265));
        assert_eq!(Placement::TopLeft.resolve(BOUNDS, size, pad), IVec2::new(10, 5));
        assert_eq!(Placement::TopRight.resolve(BOUNDS, size, pad), IVec2::new(850, 5));
        assert_eq!(Placement::BottomLeft.resolve(BOUNDS, size, pad), IVec2::new(10, 515));
        assert_eq!(Placement::BottomRight.resolve(BOUNDS, size, pad), IVec2::new(850, 515));
    }

    #[test]
    fn test_center_padding_is_signed_offset() {
        let size = IVec2::new(40, 40);
        let above = Placement::Center.resolve(BOUNDS, size, IVec2::new(0, -50));
        let below = Placement::Center.resolve(BOUNDS, size, IVec2::new(0, 50));
        assert_eq!(below.y - above.y, 100);
    }

    #[test]
    fn test_label_relayout_on_text_change() {
        let mut assets = FixedMetrics;
        let style = TextStyle::new(FontId::Body, 20, Color::WHITE);
        let mut label =
            Label::new(&mut assets, "0", style, Placement::TopRight, IVec2::new(20, 10)).unwrap();
        let narrow = label.rect;

        label.set_text(&mut assets, "10").unwrap();
        assert_eq!(label.text(), "10");
        assert!(label.rect.w > narrow.w);
        // Right edge stays anchored
        assert_eq!(label.rect.right(), narrow.right());
    }

    #[test]
    fn test_label_restyle_resizes() {
        let mut assets = FixedMetrics;
        let small = TextStyle::new(FontId::Body, 20, Color::WHITE);
        let big = TextStyle::new(FontId::Body, 40, Color::YELLOW);
        let mut label = Label::new(&mut assets, "Play", small, Placement::Center, IVec2::ZERO).unwrap();
        let before = label.rect;

        label.set_style(&mut assets, big).unwrap();
        assert_eq!(label.style(), big);
        assert_eq!(label.rect.h, before.h * 2);
        assert_eq!(label.rect.center(), before.center());
    }
}
