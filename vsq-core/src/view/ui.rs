//! src/view/ui.rs
//! ============================================================================
//! # View: TUI Render Orchestrator
//!
//! Uses the simplified `Frame<'_>` API (no backend generic).
//! Each draw cycle refreshes the home panel, status bar, and overlays.
//! Overlays stack bottom-up: search, help, notification.

use crate::model::app_state::AppState;
use crate::view::components::{
    help_overlay::HelpOverlay, home_panel::HomePanel, notification_overlay::NotificationOverlay,
    search_overlay::SearchOverlay, status_bar::StatusBar,
};

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
};

pub struct View;

impl View {
    /// Draws the full UI for one frame; to be called in the `terminal.draw(|frame| ...)` callback.
    pub fn redraw(frame: &mut Frame<'_>, app: &AppState) {
        let full: Rect = frame.area();
        let chunks: Vec<Rect> = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(2), Constraint::Length(1)])
            .split(full)
            .to_vec();

        // Render the background view
        HomePanel::render(frame, app, chunks[0]);

        // Render the bottom status bar
        StatusBar::render(frame, app, chunks[1]);

        // Modal overlays over the full frame
        if app.overlay.visible {
            SearchOverlay::render(frame, app, full);
        }

        if app.help_visible {
            HelpOverlay::render(frame, app, full);
        }

        // Toast banner draws above everything
        if app.notification.is_some() {
            NotificationOverlay::render(frame, app, full);
        }
    }
}
