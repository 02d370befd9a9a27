//! Status bar component

use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Style},
    widgets::{Block, Paragraph},
    Frame,
};

/// What the status bar needs to know about the app.
#[derive(Debug, Clone, Default)]
pub struct StatusInfo {
    pub active_tasks: usize,
    pub user_name: Option<String>,
    pub is_admin: bool,
    pub info_message: Option<String>,
}

/// Status bar component
pub struct StatusBar;

impl StatusBar {
    pub fn render(f: &mut Frame, area: Rect, status: &StatusInfo) {
        let status_text = if let Some(message) = &status.info_message {
            message.clone()
        } else if status.active_tasks > 0 {
            format!("🔄 Working... ({} request(s) in flight)", status.active_tasks)
        } else {
            let user = match (&status.user_name, status.is_admin) {
                (Some(name), true) => format!("{} (admin) • ", name),
                (Some(name), false) => format!("{} • ", name),
                (None, _) => String::new(),
            };
            format!("{}Tab: screen • Enter: open • l: log • r: refresh • ?: help • q: quit", user)
        };

        let status_color = if status.info_message.is_some() {
            Color::Green
        } else if status.active_tasks > 0 {
            Color::Yellow
        } else {
            Color::Gray
        };

        let status_bar = Paragraph::new(status_text)
            .block(Block::default())
            .alignment(Alignment::Center)
            .style(Style::default().fg(status_color));

        f.render_widget(status_bar, area);
    }
}
