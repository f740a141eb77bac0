//! src/view/components/status_bar.rs
//! ============================================================================
//! # StatusBar: Persistent Status/Error Display
//!
//! - Renders the last gateway error or current activity at the bottom row
//! - Right side shows the configured API endpoint
//! - Themed, immediate-mode

use crate::model::app_state::AppState;
use crate::model::overlay::Phase;
use crate::view::theme;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

pub struct StatusBar;

impl StatusBar {
    pub fn render(frame: &mut Frame<'_>, app: &AppState, area: Rect) {
        let status_block = Block::default()
            .borders(Borders::TOP)
            .border_style(Style::default().fg(theme::COMMENT));
        frame.render_widget(status_block, area);

        let (msg, style) = if app.overlay.loading {
            (
                "Working...".to_string(),
                Style::default().fg(theme::YELLOW),
            )
        } else if let Some(ref err) = app.overlay.error {
            (
                format!("Error: {err}"),
                Style::default().fg(theme::RED).bold(),
            )
        } else if let Some(ref results) = app.overlay.results {
            (
                format!("{} results for '{}'", results.len(), results.query),
                Style::default().fg(theme::GREEN),
            )
        } else {
            ("Ready".to_string(), Style::default().fg(theme::COMMENT))
        };

        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .margin(0)
            .split(area);

        let left_para = Paragraph::new(Line::from(Span::styled(format!(" {msg} "), style)))
            .alignment(Alignment::Left);

        let right_text = if app.overlay.visible {
            let phase = match app.overlay.phase {
                Phase::Directory => "directory",
                Phase::Query => "query",
            };
            format!("{phase} phase | {} ", app.config.base_url())
        } else {
            format!("{} ", app.config.base_url())
        };
        let right_para = Paragraph::new(Line::from(Span::styled(
            right_text,
            Style::default().fg(theme::PURPLE),
        )))
        .alignment(Alignment::Right);

        frame.render_widget(left_para, chunks[0]);
        frame.render_widget(right_para, chunks[1]);
    }
}
