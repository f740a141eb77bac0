//! src/view/components/notification_overlay.rs
//! ============================================================================
//! # NotificationOverlay: Toast Banner
//!
//! Draws the current notification near the top of the screen. Severity picks
//! the border color, title and icon.

use crate::model::app_state::{AppState, NotificationLevel};
use crate::view::theme;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style, Stylize},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

pub struct NotificationOverlay;

impl NotificationOverlay {
    pub fn render(frame: &mut Frame<'_>, app: &AppState, area: Rect) {
        let Some(notification) = &app.notification else {
            return;
        };

        let rect = Self::notification_rect(area, notification.level);
        frame.render_widget(Clear, rect);

        let (border_style, title, icon) = match notification.level {
            NotificationLevel::Info => (Style::default().fg(theme::CYAN), "Info", "ℹ"),
            NotificationLevel::Warning => (Style::default().fg(theme::YELLOW), "Warning", "⚠"),
            NotificationLevel::Error => (Style::default().fg(theme::RED), "Error", "✕"),
            NotificationLevel::Success => (Style::default().fg(theme::GREEN), "Success", "✓"),
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .title(format!(" {icon} {title} "))
            .title_style(border_style.bold())
            .border_style(border_style)
            .style(Style::default().bg(theme::BACKGROUND));

        let inner_area = block.inner(rect);
        frame.render_widget(block, rect);

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Fill(1), Constraint::Length(1)])
            .split(inner_area);

        let message = Paragraph::new(notification.message.as_str())
            .style(Style::default().fg(theme::FOREGROUND))
            .wrap(Wrap { trim: true })
            .alignment(Alignment::Left);
        frame.render_widget(message, layout[0]);

        let dismiss_text = if notification.auto_dismiss_ms.is_some() {
            "Auto-dismissing... Press any key to dismiss"
        } else {
            "Press any key to dismiss"
        };

        let dismiss = Paragraph::new(dismiss_text)
            .style(
                Style::default()
                    .fg(theme::COMMENT)
                    .add_modifier(Modifier::ITALIC),
            )
            .alignment(Alignment::Center);
        frame.render_widget(dismiss, layout[1]);
    }

    /// Errors get an extra message row, everything else stays compact.
    fn notification_rect(scr: Rect, level: NotificationLevel) -> Rect {
        let h = if level == NotificationLevel::Error {
            5
        } else {
            4
        };
        let w = (scr.width * 60) / 100;
        Rect {
            x: (scr.width - w) / 2,
            y: 2,
            width: w,
            height: h,
        }
    }
}
