use super::common::{create_dialog_block, create_instructions_paragraph, shortcuts};
use crate::constants::DIALOG_TITLE_LOGS;
use crate::logger::Logger;
use crate::ui::layout::LayoutManager;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::Line,
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap},
    Frame,
};

/// Yes/no prompt used for both the close and the delete confirmation.
pub fn render_confirmation_dialog(f: &mut Frame, area: Rect, title: &str, message: &str, color: Color) {
    let dialog_area = LayoutManager::centered_rect_lines(50, 7, area);
    f.render_widget(Clear, dialog_area);

    let block = create_dialog_block(format!(" {} ", title), color);
    let inner = block.inner(dialog_area);
    f.render_widget(block, dialog_area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(inner);

    let message_paragraph = Paragraph::new(message)
        .style(Style::default().fg(Color::White))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    let instructions =
        create_instructions_paragraph(&[shortcuts::CONFIRM, shortcuts::SEPARATOR, shortcuts::CANCEL]);

    f.render_widget(message_paragraph, chunks[0]);
    f.render_widget(instructions, chunks[1]);
}

pub fn render_error_dialog(f: &mut Frame, area: Rect, message: &str) {
    render_message_dialog(f, area, " ⚠ Error ", message, Color::Red);
}

pub fn render_info_dialog(f: &mut Frame, area: Rect, message: &str) {
    render_message_dialog(f, area, " ℹ Info ", message, Color::Blue);
}

fn render_message_dialog(f: &mut Frame, area: Rect, title: &str, message: &str, color: Color) {
    let dialog_area = LayoutManager::centered_rect_lines(60, 8, area);
    f.render_widget(Clear, dialog_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(title.to_string())
        .style(Style::default().fg(color));
    let inner = block.inner(dialog_area);
    f.render_widget(block, dialog_area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(inner);

    let message_paragraph = Paragraph::new(message)
        .style(Style::default().fg(Color::White))
        .wrap(Wrap { trim: true });
    let instructions = Paragraph::new("Press any key to continue")
        .style(Style::default().fg(Color::Gray))
        .alignment(Alignment::Center);

    f.render_widget(message_paragraph, chunks[0]);
    f.render_widget(instructions, chunks[1]);
}

pub fn render_logs_dialog(f: &mut Frame, area: Rect, logger: &Logger) {
    let dialog_area = LayoutManager::centered_rect(80, 80, area);
    f.render_widget(Clear, dialog_area);

    let visible = dialog_area.height.saturating_sub(2) as usize;
    let items: Vec<ListItem> = logger
        .get_logs()
        .into_iter()
        .take(visible)
        .map(|line| ListItem::new(Line::from(line)))
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .title(DIALOG_TITLE_LOGS)
            .style(Style::default().fg(Color::Magenta)),
    );
    f.render_widget(list, dialog_area);
}

pub fn render_help_dialog(f: &mut Frame, area: Rect) {
    let dialog_area = LayoutManager::centered_rect(60, 85, area);
    f.render_widget(Clear, dialog_area);

    let lines = vec![
        Line::from("Global"),
        Line::from("  Tab        switch screen"),
        Line::from("  r          refresh"),
        Line::from("  G          logs"),
        Line::from("  ?          this help"),
        Line::from("  q / Ctrl+C quit"),
        Line::from(""),
        Line::from("Actions"),
        Line::from("  j/k        move selection"),
        Line::from("  Enter      open action"),
        Line::from("  l          log that you did this action"),
        Line::from(""),
        Line::from("Action dialog"),
        Line::from("  e          edit"),
        Line::from("  Tab        next field"),
        Line::from("  Enter      add item / label, set icon"),
        Line::from("  Del / x    remove selected item / label"),
        Line::from("  Ctrl+S     save"),
        Line::from("  Ctrl+D     delete action"),
        Line::from("  Esc        close"),
        Line::from(""),
        Line::from("Log dialog"),
        Line::from("  Tab        next field"),
        Line::from("  0-9 .      quantity of selected item"),
        Line::from("  Space      toggle quiz flag"),
        Line::from("  Enter      log action"),
    ];

    let help = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Help ")
            .style(Style::default().fg(Color::Cyan)),
    );
    f.render_widget(help, dialog_area);
}
