use crate::dashboard::Dashboard;
use crate::ui::core::{actions::Action, Component};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, List, ListItem, Paragraph},
    Frame,
};

/// Landing screen: progress, alerts and groups of the signed-in user.
pub struct DashboardComponent {
    dashboard: Option<Dashboard>,
    loading: bool,
}

impl Default for DashboardComponent {
    fn default() -> Self {
        Self::new()
    }
}

impl DashboardComponent {
    pub fn new() -> Self {
        Self {
            dashboard: None,
            loading: true,
        }
    }

    pub fn set_loading(&mut self) {
        self.loading = true;
    }

    pub fn update_data(&mut self, dashboard: Dashboard) {
        self.dashboard = Some(dashboard);
        self.loading = false;
    }

    pub fn dashboard(&self) -> Option<&Dashboard> {
        self.dashboard.as_ref()
    }

    fn render_stats(&self, f: &mut Frame, area: Rect, dashboard: &Dashboard) {
        let name = dashboard.user.as_ref().map(|u| u.name.as_str()).unwrap_or("");
        let lines = vec![
            Line::from(Span::styled(
                format!("Welcome back, {}", name),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(format!("Total CO2 saved:   {:.1} g", dashboard.stats.total_co2)),
            Line::from(format!("CO2 saved this week: {:.1} g", dashboard.stats.weekly_co2)),
            Line::from(format!("Global CO2 saved:  {:.1} g", dashboard.stats.global_co2)),
        ];

        let paragraph = Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .title(" Your progress "),
        );
        f.render_widget(paragraph, area);
    }

    fn render_alerts(&self, f: &mut Frame, area: Rect, dashboard: &Dashboard) {
        let mut lines = Vec::new();
        if dashboard.has_actions_to_validate() {
            lines.push(Line::from(Span::styled(
                format!("{} submitted action(s) waiting for your validation", dashboard.actions_to_validate),
                Style::default().fg(Color::Yellow),
            )));
        }
        if dashboard.has_pending_actions() {
            lines.push(Line::from(Span::styled(
                format!(
                    "{} of your action(s) awaiting validation, {:.1} g CO2 pending",
                    dashboard.pending_actions.len(),
                    dashboard.pending_co2
                ),
                Style::default().fg(Color::Cyan),
            )));
        }
        if lines.is_empty() {
            lines.push(Line::from(Span::styled("Nothing pending", Style::default().fg(Color::Gray))));
        }

        let paragraph = Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .title(" Alerts "),
        );
        f.render_widget(paragraph, area);
    }

    fn render_groups(&self, f: &mut Frame, area: Rect, dashboard: &Dashboard) {
        let items: Vec<ListItem> = dashboard
            .groups
            .iter()
            .map(|group| {
                let visibility = if group.is_public { "public" } else { "private" };
                ListItem::new(Line::from(vec![
                    Span::styled(group.group_name.clone(), Style::default().fg(Color::White)),
                    Span::styled(format!("  ({})", visibility), Style::default().fg(Color::Gray)),
                ]))
            })
            .collect();

        let list = List::new(items).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .title(format!(" Groups ({}) ", dashboard.groups.len())),
        );
        f.render_widget(list, area);
    }
}

impl Component for DashboardComponent {
    fn handle_key_events(&mut self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Char('r') => Action::RefreshData,
            _ => Action::None,
        }
    }

    fn render(&mut self, f: &mut Frame, rect: Rect) {
        let Some(dashboard) = self.dashboard.clone() else {
            let text = if self.loading { "Loading dashboard..." } else { "No data" };
            let paragraph = Paragraph::new(text)
                .style(Style::default().fg(Color::Gray))
                .block(Block::default().borders(Borders::ALL).title(" Dashboard "));
            f.render_widget(paragraph, rect);
            return;
        };

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(6), Constraint::Length(4), Constraint::Min(3)])
            .split(rect);

        self.render_stats(f, chunks[0], &dashboard);
        self.render_alerts(f, chunks[1], &dashboard);
        self.render_groups(f, chunks[2], &dashboard);
    }
}
