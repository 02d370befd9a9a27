use crate::backend::{ActionItem, BackendAction, BackendError};
use crate::constants::{CONFIRM_CLOSE_BODY, CONFIRM_CLOSE_TITLE, CONFIRM_DELETE_BODY};
use crate::editor::{
    ActionForm, CloseOutcome, DraftField, Field, FormCommand, FormState, ItemField, SaveTicket, SubmitOutcome,
    ValidationRules,
};
use crate::ui::components::dialogs::common::{
    create_dialog_block, create_input_paragraph, create_instructions_paragraph, create_selection_paragraph,
    shortcuts, InstructionShortcut,
};
use crate::ui::components::dialogs::render_confirmation_dialog;
use crate::ui::core::{actions::Action, Component, SessionId};
use crate::ui::layout::LayoutManager;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use log::warn;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};
use std::path::PathBuf;

/// Which input receives key presses while editing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    ActionName,
    Icon,
    ItemName,
    ItemDescription,
    ItemCo2,
    Label,
    Items,
    Labels,
}

impl Focus {
    const ORDER: [Focus; 8] = [
        Focus::ActionName,
        Focus::Icon,
        Focus::Items,
        Focus::Labels,
        Focus::ItemName,
        Focus::ItemDescription,
        Focus::ItemCo2,
        Focus::Label,
    ];

    fn position(self) -> usize {
        Self::ORDER.iter().position(|f| *f == self).unwrap_or(0)
    }

    pub fn next(self) -> Self {
        Self::ORDER[(self.position() + 1) % Self::ORDER.len()]
    }

    pub fn previous(self) -> Self {
        Self::ORDER[(self.position() + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }
}

/// Modal dialog showing one action, with inline editing.
pub struct ActionDialogComponent {
    session: SessionId,
    form: ActionForm,
    focus: Focus,
    icon_input: String,
    item_state: ListState,
    label_state: ListState,
}

impl ActionDialogComponent {
    pub fn new(session: SessionId, action: BackendAction, rules: ValidationRules) -> Self {
        Self {
            session,
            form: ActionForm::new(action, rules),
            focus: Focus::ActionName,
            icon_input: String::new(),
            item_state: ListState::default(),
            label_state: ListState::default(),
        }
    }

    pub fn session(&self) -> SessionId {
        self.session
    }

    pub fn form(&self) -> &ActionForm {
        &self.form
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub fn load_items(&mut self, items: Vec<ActionItem>) {
        self.form.load_items(items);
    }

    pub fn finish_save(&mut self, ticket: SaveTicket, result: Result<BackendAction, BackendError>) -> Result<bool, BackendError> {
        self.form.finish_save(ticket, result)
    }

    pub fn finish_delete(&mut self, ticket: SaveTicket, result: Result<(), BackendError>) -> Result<bool, BackendError> {
        self.form.finish_delete(ticket, result)
    }

    fn apply(&mut self, command: FormCommand) {
        if let Err(e) = self.form.apply(command) {
            warn!("Ignoring edit: {}", e);
        }
    }

    /// Text of the focused input, if the focus is on one.
    fn focused_text(&self) -> Option<String> {
        match self.focus {
            Focus::ActionName => self.form.draft().map(|d| d.name.clone()),
            Focus::Icon => Some(self.icon_input.clone()),
            Focus::ItemName => Some(self.form.item_form().value(ItemField::Name).to_string()),
            Focus::ItemDescription => Some(self.form.item_form().value(ItemField::Description).to_string()),
            Focus::ItemCo2 => Some(self.form.item_form().value(ItemField::Co2SavedPerUnit).to_string()),
            Focus::Label => Some(self.form.label_editor().pending.clone()),
            Focus::Items | Focus::Labels => None,
        }
    }

    fn set_focused_text(&mut self, value: String) {
        let command = match self.focus {
            Focus::ActionName => FormCommand::UpdateDraftField(DraftField::ActionName, value),
            Focus::ItemName => FormCommand::UpdateItemField(ItemField::Name, value),
            Focus::ItemDescription => FormCommand::UpdateItemField(ItemField::Description, value),
            Focus::ItemCo2 => FormCommand::UpdateItemField(ItemField::Co2SavedPerUnit, value),
            Focus::Label => FormCommand::UpdateLabelField(value),
            Focus::Icon => {
                self.icon_input = value;
                return;
            }
            Focus::Items | Focus::Labels => return,
        };
        self.apply(command);
    }

    fn remove_selected(&mut self) {
        let Some(draft) = self.form.draft() else {
            return;
        };
        let command = match self.focus {
            Focus::Items => self
                .item_state
                .selected()
                .and_then(|i| draft.items.get(i))
                .map(|item| FormCommand::RemoveItem(item.item_name.clone())),
            Focus::Labels => self
                .label_state
                .selected()
                .and_then(|i| draft.labels.get(i))
                .map(|label| FormCommand::RemoveLabel(label.clone())),
            _ => None,
        };
        if let Some(command) = command {
            self.apply(command);
            self.clamp_selections();
        }
    }

    fn move_selection(&mut self, down: bool) {
        let Some(draft) = self.form.draft() else {
            return;
        };
        let (state, len) = match self.focus {
            Focus::Items => (&mut self.item_state, draft.items.len()),
            Focus::Labels => (&mut self.label_state, draft.labels.len()),
            _ => return,
        };
        if len == 0 {
            state.select(None);
            return;
        }
        let next = match (state.selected(), down) {
            (None, _) => 0,
            (Some(i), true) => (i + 1) % len,
            (Some(0), false) => len - 1,
            (Some(i), false) => i - 1,
        };
        state.select(Some(next));
    }

    fn clamp_selections(&mut self) {
        let (items, labels) = match self.form.draft() {
            Some(draft) => (draft.items.len(), draft.labels.len()),
            None => (0, 0),
        };
        for (state, len) in [(&mut self.item_state, items), (&mut self.label_state, labels)] {
            match state.selected() {
                Some(_) if len == 0 => state.select(None),
                Some(i) if i >= len => state.select(Some(len - 1)),
                _ => {}
            }
        }
    }

    fn handle_viewing_key(&mut self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Char('e') => {
                if let Err(e) = self.form.enter_edit() {
                    warn!("Cannot edit: {}", e);
                }
                self.focus = Focus::ActionName;
                self.icon_input.clear();
                Action::None
            }
            KeyCode::Esc | KeyCode::Char('q') => self.request_close(),
            _ => Action::None,
        }
    }

    fn handle_editing_key(&mut self, key: KeyEvent) -> Action {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return match key.code {
                KeyCode::Char('s') => self.submit(),
                KeyCode::Char('d') => {
                    if let Err(e) = self.form.request_delete() {
                        warn!("Cannot delete: {}", e);
                    }
                    Action::None
                }
                _ => Action::None,
            };
        }

        match key.code {
            KeyCode::Esc => self.request_close(),
            KeyCode::Tab => {
                self.focus = self.focus.next();
                Action::None
            }
            KeyCode::BackTab => {
                self.focus = self.focus.previous();
                Action::None
            }
            KeyCode::Enter => {
                match self.focus {
                    Focus::ItemName | Focus::ItemDescription | Focus::ItemCo2 => self.apply(FormCommand::AddItem),
                    Focus::Label => self.apply(FormCommand::AddLabel),
                    Focus::Icon if !self.icon_input.trim().is_empty() => {
                        let path = PathBuf::from(self.icon_input.trim());
                        self.apply(FormCommand::ReplaceIcon(path));
                        self.icon_input.clear();
                    }
                    _ => {}
                }
                Action::None
            }
            KeyCode::Up | KeyCode::Down if matches!(self.focus, Focus::Items | Focus::Labels) => {
                self.move_selection(key.code == KeyCode::Down);
                Action::None
            }
            KeyCode::Delete | KeyCode::Char('x') if matches!(self.focus, Focus::Items | Focus::Labels) => {
                self.remove_selected();
                Action::None
            }
            KeyCode::Backspace => {
                if let Some(mut text) = self.focused_text() {
                    text.pop();
                    self.set_focused_text(text);
                }
                Action::None
            }
            KeyCode::Char(c) => {
                if let Some(mut text) = self.focused_text() {
                    text.push(c);
                    self.set_focused_text(text);
                }
                Action::None
            }
            _ => Action::None,
        }
    }

    fn request_close(&mut self) -> Action {
        match self.form.request_close() {
            Ok(CloseOutcome::Closed) => Action::CloseDialog,
            Ok(CloseOutcome::NeedsConfirmation) => Action::None,
            Err(e) => {
                warn!("Cannot close: {}", e);
                Action::None
            }
        }
    }

    fn submit(&mut self) -> Action {
        match self.form.submit() {
            Ok(SubmitOutcome::Ready(ticket, args)) => Action::SaveAction {
                session: self.session,
                ticket,
                args,
            },
            Ok(SubmitOutcome::Rejected(_)) => Action::None,
            Err(e) => {
                warn!("Cannot save: {}", e);
                Action::ShowInfo(format!("Cannot save: {}", e))
            }
        }
    }

    fn instructions(&self) -> Vec<InstructionShortcut> {
        match self.form.state() {
            FormState::Viewing => vec![shortcuts::EDIT, shortcuts::SEPARATOR, shortcuts::ESC_CLOSE],
            FormState::Editing => vec![
                shortcuts::TAB_NEXT,
                shortcuts::SEPARATOR,
                shortcuts::ENTER_ADD,
                shortcuts::SEPARATOR,
                shortcuts::REMOVE,
                shortcuts::SEPARATOR,
                shortcuts::SAVE,
                shortcuts::SEPARATOR,
                shortcuts::DELETE,
                shortcuts::SEPARATOR,
                shortcuts::ESC_CLOSE,
            ],
            FormState::Saving => vec![("", Color::Yellow, "Saving..."), shortcuts::SEPARATOR, shortcuts::ESC_CLOSE],
            FormState::Deleting => vec![("", Color::Yellow, "Deleting...")],
            FormState::Deleted => vec![("", Color::Gray, "Deleted. Press any key to close")],
            FormState::ClosingConfirm | FormState::DeleteConfirm => {
                vec![shortcuts::CONFIRM, shortcuts::SEPARATOR, shortcuts::CANCEL]
            }
        }
    }

    fn render_lists(&mut self, f: &mut Frame, area: Rect, failing: &[Field]) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(area);

        let (items, labels) = match self.form.draft() {
            Some(draft) => (draft.items.clone(), draft.labels.clone()),
            None => (
                self.form.committed_items().to_vec(),
                self.form.committed().validation_labels.clone(),
            ),
        };

        let item_rows: Vec<ListItem> = items
            .iter()
            .map(|item| {
                ListItem::new(Line::from(vec![
                    Span::styled(item.item_name.clone(), Style::default().fg(Color::White)),
                    Span::styled(format!(" - {}", item.item_description), Style::default().fg(Color::Gray)),
                    Span::styled(
                        format!("  {} g/unit", item.co2_saved_per_unit),
                        Style::default().fg(Color::Green),
                    ),
                ]))
            })
            .collect();
        let items_title = if self.form.items_loaded() {
            " Action items "
        } else {
            " Action items (loading...) "
        };
        let item_list = List::new(item_rows)
            .block(list_block(items_title, self.focus == Focus::Items, failing.contains(&Field::ActionItems)))
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED));
        f.render_stateful_widget(item_list, chunks[0], &mut self.item_state);

        let label_rows: Vec<ListItem> = labels.iter().map(|label| ListItem::new(label.clone())).collect();
        let label_list = List::new(label_rows)
            .block(list_block(
                " Validation labels ",
                self.focus == Focus::Labels,
                failing.contains(&Field::ValidationLabels),
            ))
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED));
        f.render_stateful_widget(label_list, chunks[1], &mut self.label_state);
    }
}

fn list_block(title: &str, focused: bool, invalid: bool) -> Block<'static> {
    let color = if invalid {
        Color::Red
    } else if focused {
        Color::Cyan
    } else {
        Color::Gray
    };
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .title(title.to_string())
        .style(Style::default().fg(color))
}

impl Component for ActionDialogComponent {
    fn handle_key_events(&mut self, key: KeyEvent) -> Action {
        match self.form.state() {
            FormState::Viewing => self.handle_viewing_key(key),
            FormState::Editing => self.handle_editing_key(key),
            FormState::Saving => match key.code {
                KeyCode::Esc => self.request_close(),
                _ => Action::None,
            },
            FormState::ClosingConfirm => match key.code {
                KeyCode::Char('y') | KeyCode::Enter => match self.form.confirm_close() {
                    Ok(()) => Action::CloseDialog,
                    Err(e) => {
                        warn!("Cannot close: {}", e);
                        Action::None
                    }
                },
                KeyCode::Char('n') | KeyCode::Esc => {
                    if let Err(e) = self.form.cancel_close() {
                        warn!("Cannot cancel close: {}", e);
                    }
                    Action::None
                }
                _ => Action::None,
            },
            FormState::DeleteConfirm => match key.code {
                KeyCode::Char('y') | KeyCode::Enter => match self.form.confirm_delete() {
                    Ok((ticket, action_id)) => Action::DeleteAction {
                        session: self.session,
                        ticket,
                        action_id,
                    },
                    Err(e) => {
                        warn!("Cannot delete: {}", e);
                        Action::None
                    }
                },
                KeyCode::Char('n') | KeyCode::Esc => {
                    if let Err(e) = self.form.cancel_delete() {
                        warn!("Cannot cancel delete: {}", e);
                    }
                    Action::None
                }
                _ => Action::None,
            },
            FormState::Deleting => Action::None,
            FormState::Deleted => Action::CloseDialog,
        }
    }

    fn render(&mut self, f: &mut Frame, rect: Rect) {
        let dialog_area = LayoutManager::centered_rect(80, 85, rect);
        f.render_widget(Clear, dialog_area);

        let state = self.form.state();
        let editing = self.form.is_editing();
        let title = format!(" {} ({:?}) ", self.form.committed().action_name, state);
        let color = if editing { Color::Yellow } else { Color::Cyan };
        let block = create_dialog_block(title, color);
        let inner = block.inner(dialog_area);
        f.render_widget(block, dialog_area);

        let chunks = LayoutManager::action_dialog_layout(inner);
        let errors = self.form.visible_errors();
        let failing: Vec<Field> = errors.iter().map(|(field, _)| *field).collect();
        let focus = if state == FormState::Editing { Some(self.focus) } else { None };

        let (name, icon) = match self.form.draft() {
            Some(draft) => {
                let icon = match (&draft.icon.reference(), draft.icon.is_replaced()) {
                    (Some(reference), true) => format!("{} (new)", reference),
                    (Some(reference), false) => reference.clone(),
                    (None, _) => "-".to_string(),
                };
                (draft.name.clone(), icon)
            }
            None => (
                self.form.committed().action_name.clone(),
                self.form.committed().action_icon.clone().unwrap_or_else(|| "-".to_string()),
            ),
        };

        if editing {
            f.render_widget(
                create_input_paragraph(&name, "Action name", focus == Some(Focus::ActionName), failing.contains(&Field::ActionName)),
                chunks[0],
            );
            if focus == Some(Focus::Icon) {
                f.render_widget(
                    create_input_paragraph(&self.icon_input, &format!("Icon file (current: {})", icon), true, false),
                    chunks[1],
                );
            } else {
                f.render_widget(create_selection_paragraph(icon, "Icon"), chunks[1]);
            }
        } else {
            f.render_widget(create_selection_paragraph(name, "Action name"), chunks[0]);
            f.render_widget(create_selection_paragraph(icon, "Icon"), chunks[1]);
        }

        self.render_lists(f, chunks[2], &failing);

        if editing {
            let item_form = self.form.item_form().clone();
            let item_chunks = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(30), Constraint::Percentage(45), Constraint::Percentage(25)])
                .split(chunks[3]);
            f.render_widget(
                create_input_paragraph(
                    &item_form.item_name,
                    "Item name",
                    focus == Some(Focus::ItemName),
                    failing.contains(&Field::ItemName),
                ),
                item_chunks[0],
            );
            f.render_widget(
                create_input_paragraph(
                    &item_form.item_description,
                    "Item description",
                    focus == Some(Focus::ItemDescription),
                    failing.contains(&Field::ItemDescription),
                ),
                item_chunks[1],
            );
            f.render_widget(
                create_input_paragraph(
                    &item_form.co2_saved_per_unit,
                    "CO2 saved per unit (g)",
                    focus == Some(Focus::ItemCo2),
                    failing.contains(&Field::Co2),
                ),
                item_chunks[2],
            );

            let pending = self.form.label_editor().pending.clone();
            f.render_widget(
                create_input_paragraph(&pending, "New validation label", focus == Some(Focus::Label), false),
                chunks[4],
            );
        }

        let mut helper_lines: Vec<Line> = errors
            .iter()
            .map(|(field, text)| {
                Line::from(Span::styled(format!("{:?}: {}", field, text), Style::default().fg(Color::Red)))
            })
            .collect();
        if let Some(error) = self.form.last_error() {
            helper_lines.push(Line::from(Span::styled(error.to_string(), Style::default().fg(Color::Red))));
        }
        f.render_widget(Paragraph::new(helper_lines).wrap(Wrap { trim: true }), chunks[5]);

        f.render_widget(create_instructions_paragraph(&self.instructions()), chunks[6]);

        match state {
            FormState::ClosingConfirm => {
                render_confirmation_dialog(f, rect, CONFIRM_CLOSE_TITLE, CONFIRM_CLOSE_BODY, Color::Yellow)
            }
            FormState::DeleteConfirm => render_confirmation_dialog(
                f,
                rect,
                &format!("Delete {}?", self.form.committed().action_name),
                CONFIRM_DELETE_BODY,
                Color::Red,
            ),
            _ => {}
        }
    }
}
