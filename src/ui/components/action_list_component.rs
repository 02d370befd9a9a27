use crate::backend::BackendAction;
use crate::ui::core::{actions::Action, Component};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, List, ListItem, ListState},
    Frame,
};

pub struct ActionListComponent {
    actions: Vec<BackendAction>,
    list_state: ListState,
    loading: bool,
}

impl Default for ActionListComponent {
    fn default() -> Self {
        Self::new()
    }
}

impl ActionListComponent {
    pub fn new() -> Self {
        Self {
            actions: Vec::new(),
            list_state: ListState::default(),
            loading: true,
        }
    }

    pub fn update_data(&mut self, actions: Vec<BackendAction>) {
        self.actions = actions;
        self.loading = false;

        // Keep selection in bounds after a reload
        let selected = match self.list_state.selected() {
            _ if self.actions.is_empty() => None,
            Some(index) => Some(index.min(self.actions.len() - 1)),
            None => Some(0),
        };
        self.list_state.select(selected);
    }

    pub fn actions(&self) -> &[BackendAction] {
        &self.actions
    }

    pub fn get(&self, index: usize) -> Option<&BackendAction> {
        self.actions.get(index)
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.list_state.selected()
    }

    pub fn next(&mut self) {
        if self.actions.is_empty() {
            return;
        }
        let next = match self.list_state.selected() {
            Some(index) if index + 1 < self.actions.len() => index + 1,
            Some(_) => 0,
            None => 0,
        };
        self.list_state.select(Some(next));
    }

    pub fn previous(&mut self) {
        if self.actions.is_empty() {
            return;
        }
        let previous = match self.list_state.selected() {
            Some(0) | None => self.actions.len() - 1,
            Some(index) => index - 1,
        };
        self.list_state.select(Some(previous));
    }
}

impl Component for ActionListComponent {
    fn handle_key_events(&mut self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                self.next();
                Action::None
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.previous();
                Action::None
            }
            KeyCode::Enter => match self.list_state.selected() {
                Some(index) => Action::OpenAction(index),
                None => Action::None,
            },
            KeyCode::Char('l') => match self.list_state.selected() {
                Some(index) => Action::LogAction(index),
                None => Action::None,
            },
            KeyCode::Char('r') => Action::RefreshData,
            _ => Action::None,
        }
    }

    fn render(&mut self, f: &mut Frame, rect: Rect) {
        let items: Vec<ListItem> = self
            .actions
            .iter()
            .map(|action| {
                let icon = action.action_icon.as_deref().unwrap_or("-");
                ListItem::new(Line::from(vec![
                    Span::styled(action.action_name.clone(), Style::default().fg(Color::White)),
                    Span::styled(format!("  [{}]", icon), Style::default().fg(Color::DarkGray)),
                    Span::styled(
                        format!("  {}", action.validation_labels.join(", ")),
                        Style::default().fg(Color::Gray),
                    ),
                ]))
            })
            .collect();

        let title = if self.loading {
            " Actions (loading...) ".to_string()
        } else {
            format!(" Actions ({}) ", self.actions.len())
        };

        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .title(title),
            )
            .highlight_style(Style::default().bg(Color::Blue).add_modifier(Modifier::BOLD))
            .highlight_symbol("▶ ");

        f.render_stateful_widget(list, rect, &mut self.list_state);
    }
}
