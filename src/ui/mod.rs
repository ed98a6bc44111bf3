//! Screen furniture: text labels, placement and menu selection

pub mod label;
pub mod menu;

pub use label::{Color, FontId, Label, Placement, TextStyle};
pub use menu::Selector;

/// Menu option emphasis, recomputed every frame from the cursor
pub const OPTION_SELECTED: TextStyle = TextStyle::new(FontId::Title, 48, Color::YELLOW);
pub const OPTION_IDLE: TextStyle = TextStyle::new(FontId::Body, 32, Color::WHITE);

pub fn option_style(selected: bool) -> TextStyle {
    if selected { OPTION_SELECTED } else { OPTION_IDLE }
}
