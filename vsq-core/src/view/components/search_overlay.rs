//! src/view/components/search_overlay.rs
//! ============================================================================
//! # SearchOverlay: Two-Phase Corpus Search Modal
//!
//! Directory phase picks the corpus to index, query phase ranks it.
//! The body area shows exactly one of: spinner, error, phase hint, results.

use crate::model::app_state::AppState;
use crate::model::overlay::Phase;
use crate::view::components::result_list::ResultList;
use crate::view::{icons, theme};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Style,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

const SPINNER_FRAMES: [&str; 9] = ["⠁", "⠃", "⠇", "⠧", "⠷", "⠿", "⠻", "⠹", "⠸"];
const SPINNER_FRAME_MS: u128 = 120;

pub struct SearchOverlay;

impl SearchOverlay {
    pub fn render(frame: &mut Frame<'_>, app: &AppState, area: Rect) {
        let overlay_area = Self::centered_rect(70, 60, area);
        frame.render_widget(Clear, overlay_area);

        // Split the overlay into input and body
        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Input box
                Constraint::Fill(1),   // Results, spinner or error
            ])
            .split(overlay_area);

        Self::render_input(frame, app, layout[0]);
        Self::render_body(frame, app, layout[1]);

        // Render help text at bottom
        let help_text = match app.overlay.phase {
            Phase::Directory => "Type a directory • Enter to build the index • Esc to close",
            Phase::Query => "Type a query • Enter to search • ↑/↓ select • Esc to close",
        };
        let help_paragraph = Paragraph::new(help_text)
            .style(Style::default().fg(theme::COMMENT))
            .alignment(Alignment::Center);

        let help_area = Rect {
            x: overlay_area.x,
            y: overlay_area.y + overlay_area.height,
            width: overlay_area.width,
            height: 1,
        };

        if help_area.y < area.height {
            frame.render_widget(help_paragraph, help_area);
        }
    }

    fn render_input(frame: &mut Frame<'_>, app: &AppState, area: Rect) {
        let (title, border_color, input, placeholder) = match app.overlay.phase {
            Phase::Directory => (
                format!(" {} Corpus Directory ", icons::FOLDER_ICON),
                theme::CYAN,
                &app.overlay.dir_input,
                "/path/to/corpus",
            ),
            Phase::Query => (
                " Search Query ".to_string(),
                theme::YELLOW,
                &app.overlay.query_input,
                "search the corpus",
            ),
        };

        let input_block = Block::default()
            .borders(Borders::ALL)
            .title(title)
            .title_alignment(Alignment::Center)
            .border_style(Style::default().fg(border_color))
            .style(Style::default().bg(theme::BACKGROUND));

        let (text, text_style) = if input.is_empty() {
            (placeholder, Style::default().fg(theme::COMMENT))
        } else {
            (input.as_str(), Style::default().fg(theme::FOREGROUND))
        };

        let input_paragraph = Paragraph::new(text)
            .style(text_style)
            .block(input_block)
            .wrap(Wrap { trim: false });

        frame.render_widget(input_paragraph, area);

        // Show cursor
        frame.set_cursor_position((area.x + input.chars().count() as u16 + 1, area.y + 1));
    }

    fn render_body(frame: &mut Frame<'_>, app: &AppState, area: Rect) {
        // Show loading state while a gateway call is in flight
        if app.overlay.loading {
            let spinner = Self::spinner_frame(app);
            let loading_text = match app.overlay.phase {
                Phase::Directory => {
                    format!("{spinner} Building index for '{}'...", app.overlay.dir_input)
                }
                Phase::Query => format!("{spinner} Searching for '{}'...", app.overlay.query_input),
            };

            let loading = Paragraph::new(loading_text)
                .style(Style::default().fg(theme::YELLOW))
                .alignment(Alignment::Center)
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(theme::YELLOW))
                        .style(Style::default().bg(theme::BACKGROUND)),
                );
            frame.render_widget(loading, area);
            return;
        }

        // A failed call leaves its message here until the input changes
        if let Some(ref error) = app.overlay.error {
            let error_paragraph = Paragraph::new(error.as_str())
                .style(Style::default().fg(theme::RED))
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true })
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .title(" Error ")
                        .title_alignment(Alignment::Center)
                        .border_style(Style::default().fg(theme::RED))
                        .style(Style::default().bg(theme::BACKGROUND)),
                );
            frame.render_widget(error_paragraph, area);
            return;
        }

        match app.overlay.phase {
            Phase::Directory => {
                let status_text = if app.overlay.dir_input.is_empty() {
                    "Enter the folder whose documents should be indexed"
                } else {
                    "Press Enter to build the index"
                };

                let status = Paragraph::new(status_text)
                    .style(Style::default().fg(theme::COMMENT))
                    .alignment(Alignment::Center)
                    .block(
                        Block::default()
                            .borders(Borders::ALL)
                            .border_style(Style::default().fg(theme::COMMENT))
                            .style(Style::default().bg(theme::BACKGROUND)),
                    );
                frame.render_widget(status, area);
            }

            Phase::Query => ResultList::render(frame, app, area),
        }
    }

    fn spinner_frame(app: &AppState) -> &'static str {
        let tick = (app.started_at.elapsed().as_millis() / SPINNER_FRAME_MS) as usize;
        SPINNER_FRAMES[tick % SPINNER_FRAMES.len()]
    }

    fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
        let popup_layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Percentage((100 - percent_y) / 2),
                Constraint::Percentage(percent_y),
                Constraint::Percentage((100 - percent_y) / 2),
            ])
            .split(area);

        Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage((100 - percent_x) / 2),
                Constraint::Percentage(percent_x),
                Constraint::Percentage((100 - percent_x) / 2),
            ])
            .split(popup_layout[1])[1]
    }
}
