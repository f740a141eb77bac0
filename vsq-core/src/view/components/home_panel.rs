//! src/view/components/home_panel.rs
//! ============================================================================
//! # HomePanel: Background View
//!
//! Fills the screen behind the overlays with the usage walkthrough and the
//! configured endpoint. Pure presentation, reads nothing but AppState.

use crate::model::app_state::AppState;
use crate::view::theme;
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph},
};

pub struct HomePanel;

impl HomePanel {
    pub fn render(frame: &mut Frame<'_>, app: &AppState, area: Rect) {
        let heading_style = Style::default()
            .fg(theme::YELLOW)
            .add_modifier(Modifier::BOLD);

        let mut lines = vec![
            Line::from(""),
            Line::from(Span::styled("Vector Space Search", heading_style)),
            Line::from(Span::styled(
                "Rank a folder of documents against free-text queries",
                Style::default().fg(theme::COMMENT),
            )),
            Line::from(""),
            Line::from("How to use:"),
            Line::from("  1. Press Ctrl+Space to open the search overlay"),
            Line::from("  2. Enter a corpus directory and press Enter to build the index"),
            Line::from("  3. Type a query and press Enter to rank the corpus"),
            Line::from("  4. Use Up/Down to cycle results, Enter to open one"),
            Line::from(""),
            Line::from(Span::styled(
                format!("API endpoint: {}", app.config.base_url()),
                Style::default().fg(theme::PURPLE),
            )),
        ];

        if !app.overlay.dir_input.is_empty() {
            lines.push(Line::from(Span::styled(
                format!("Last corpus: {}", app.overlay.dir_input),
                Style::default().fg(theme::COMMENT),
            )));
        }

        let panel = Paragraph::new(Text::from(lines))
            .block(
                Block::default()
                    .title(" vsq ")
                    .title_alignment(Alignment::Center)
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(theme::CURRENT_LINE))
                    .style(Style::default().bg(theme::BACKGROUND)),
            )
            .alignment(Alignment::Center);

        frame.render_widget(panel, area);
    }
}
