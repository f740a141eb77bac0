//! src/view/components/result_list.rs
//! ============================================================================
//! # ResultList: Ranked Search Results
//!
//! Renders the whole-replaced result set of the last completed search with
//! the cyclic ▶ selection, or a status line when nothing has been searched.

use crate::model::app_state::AppState;
use crate::view::{icons, theme};
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};

pub struct ResultList;

impl ResultList {
    pub fn render(frame: &mut Frame<'_>, app: &AppState, area: Rect) {
        let Some(results) = &app.overlay.results else {
            let status_text = if app.overlay.query_input.is_empty() {
                "Type a query to rank the indexed corpus"
            } else {
                "Press Enter to search"
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
            return;
        };

        if results.is_empty() {
            let empty = Paragraph::new("No matching documents found.")
                .style(Style::default().fg(theme::COMMENT))
                .alignment(Alignment::Center)
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .title(format!(" No results for '{}' ", results.query))
                        .border_style(Style::default().fg(theme::COMMENT))
                        .style(Style::default().bg(theme::BACKGROUND)),
                );
            frame.render_widget(empty, area);
            return;
        }

        // Create list items from the ranked entries, score as percentage and raw
        let list_items: Vec<ListItem> = results
            .entries
            .iter()
            .map(|entry| {
                let display_text = format!(
                    "{} {}  {:.1}% match (score {:.4})",
                    icons::FILE_ICON,
                    entry.label,
                    entry.score * 100.0,
                    entry.score
                );

                ListItem::new(display_text).style(Style::default().fg(theme::FOREGROUND))
            })
            .collect();

        let results_block = Block::default()
            .borders(Borders::ALL)
            .title(format!(
                " {} results for '{}' in {:.2} ms ",
                results.len(),
                results.query,
                results.elapsed_millis()
            ))
            .border_style(Style::default().fg(theme::YELLOW))
            .style(Style::default().bg(theme::BACKGROUND));

        let list = List::new(list_items)
            .block(results_block)
            .highlight_symbol("▶ ")
            .highlight_style(
                Style::default()
                    .bg(theme::CURRENT_LINE)
                    .add_modifier(Modifier::BOLD),
            );

        let mut list_state = ListState::default();
        list_state.select(app.overlay.selected);

        frame.render_stateful_widget(list, area, &mut list_state);
    }
}
