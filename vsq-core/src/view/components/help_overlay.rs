//! src/view/components/help_overlay.rs

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, Paragraph},
};

use crate::model::app_state::AppState;
use crate::view::theme;

pub struct HelpOverlay;

/// Renders the help overlay centered in the given area.
impl HelpOverlay {
    pub fn render(frame: &mut Frame<'_>, _app: &AppState, area: Rect) {
        let help_text = vec![
            Line::from(Span::styled(
                "Vector Space Search — Help",
                Style::default()
                    .fg(theme::YELLOW)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from("Anywhere:"),
            Line::from("  Ctrl+Space    Toggle the search overlay"),
            Line::from("  Ctrl+C        Quit"),
            Line::from(""),
            Line::from("Search overlay:"),
            Line::from("  Enter         Build index / run search / open selection"),
            Line::from("  Up/Down       Cycle through results"),
            Line::from("  Backspace     Delete a character"),
            Line::from("  Esc           Close the overlay"),
            Line::from(""),
            Line::from("Home view:"),
            Line::from("  ?             Show/hide help"),
            Line::from("  q             Quit"),
            Line::from("  Esc           Dismiss notification, else quit"),
            Line::from(""),
            Line::from("Press Esc or ? to close this help."),
        ];

        // Center overlay
        let overlay_area = Self::centered_rect(60, 70, area);

        // Clear area before drawing modal
        frame.render_widget(Clear, overlay_area);

        let help_paragraph = Paragraph::new(Text::from(help_text))
            .block(
                Block::default()
                    .title(" Help ")
                    .title_alignment(Alignment::Center)
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(theme::PURPLE))
                    .style(Style::default().bg(theme::BACKGROUND)),
            )
            .alignment(Alignment::Left)
            .wrap(ratatui::widgets::Wrap { trim: true });

        frame.render_widget(help_paragraph, overlay_area);
    }

    /// Returns a centered rectangle of given width/height percentages inside area.
    fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
        let vertical = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Percentage((100 - percent_y) / 2),
                Constraint::Percentage(percent_y),
                Constraint::Percentage((100 - percent_y) / 2),
            ])
            .split(area);

        let horizontal = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage((100 - percent_x) / 2),
                Constraint::Percentage(percent_x),
                Constraint::Percentage((100 - percent_x) / 2),
            ])
            .split(vertical[1]);

        horizontal[1]
    }
}
