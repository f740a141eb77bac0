//! src/view/theme.rs
//! ============================================================================
//! # Catppuccin Mocha Palette
//!
//! Color constants shared by every component. Values follow the published
//! Catppuccin Mocha palette: https://github.com/catppuccin/catppuccin

use ratatui::style::Color;
use tracing::{debug, instrument};

/// Logs the active palette once at startup.
#[instrument(level = "debug")]
pub fn init_theme() {
    debug!("Theme: Catppuccin Mocha");
    debug!("Background: {:?}, foreground: {:?}", BACKGROUND, FOREGROUND);
    debug!("Highlight: {:?}", CURRENT_LINE);
}

pub const BACKGROUND: Color = Color::Rgb(30, 30, 46); // Base
pub const CURRENT_LINE: Color = Color::Rgb(69, 71, 90); // Surface1
pub const FOREGROUND: Color = Color::Rgb(205, 214, 244); // Text
pub const COMMENT: Color = Color::Rgb(127, 132, 156); // Overlay1
pub const CYAN: Color = Color::Rgb(137, 220, 235); // Sky
pub const GREEN: Color = Color::Rgb(166, 227, 161); // Green
pub const PURPLE: Color = Color::Rgb(203, 166, 247); // Mauve
pub const RED: Color = Color::Rgb(243, 139, 168); // Red
pub const YELLOW: Color = Color::Rgb(249, 226, 175); // Yellow
