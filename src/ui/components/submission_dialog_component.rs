use crate::backend::{ActionItem, BackendAction, BackendError, SubmittedAction};
use crate::constants::{HELP_DATE_FORMAT, HELP_QUANTITY_NUMBER, HELP_QUANTITY_REQUIRED};
use crate::submission::SubmissionDraft;
use crate::ui::components::dialogs::common::{
    create_dialog_block, create_input_paragraph, create_instructions_paragraph, shortcuts, InstructionShortcut,
};
use crate::ui::core::{actions::Action, Component, SessionId};
use crate::ui::layout::LayoutManager;
use chrono::NaiveDate;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use log::debug;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, List, ListItem, ListState, Paragraph},
    Frame,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitFocus {
    Date,
    Items,
    QuizAnswered,
    FirstAnswerCorrect,
}

impl SubmitFocus {
    const ORDER: [SubmitFocus; 4] = [
        SubmitFocus::Date,
        SubmitFocus::Items,
        SubmitFocus::QuizAnswered,
        SubmitFocus::FirstAnswerCorrect,
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

/// Modal dialog for logging that the user performed an action.
///
/// Quantities are typed per item; an empty quantity counts as zero.
pub struct SubmissionDialogComponent {
    session: SessionId,
    action: BackendAction,
    items: Vec<ActionItem>,
    items_loaded: bool,
    quantities: Vec<String>,
    date_input: String,
    quiz_answered: bool,
    first_answer_correct: bool,
    focus: SubmitFocus,
    item_state: ListState,
    submitting: bool,
    error: Option<String>,
}

impl SubmissionDialogComponent {
    pub fn new(session: SessionId, action: BackendAction, today: NaiveDate) -> Self {
        Self {
            session,
            action,
            items: Vec::new(),
            items_loaded: false,
            quantities: Vec::new(),
            date_input: today.format("%Y-%m-%d").to_string(),
            quiz_answered: false,
            first_answer_correct: false,
            focus: SubmitFocus::Items,
            item_state: ListState::default(),
            submitting: false,
            error: None,
        }
    }

    pub fn session(&self) -> SessionId {
        self.session
    }

    pub fn action(&self) -> &BackendAction {
        &self.action
    }

    pub fn focus(&self) -> SubmitFocus {
        self.focus
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn load_items(&mut self, items: Vec<ActionItem>) {
        self.quantities = vec![String::new(); items.len()];
        self.item_state.select(if items.is_empty() { None } else { Some(0) });
        self.items = items;
        self.items_loaded = true;
    }

    /// Apply the gateway's answer. Returns the created submission on success.
    pub fn finish_submit(
        &mut self,
        result: Result<SubmittedAction, BackendError>,
    ) -> Result<SubmittedAction, BackendError> {
        self.submitting = false;
        if let Err(e) = &result {
            self.error = Some(e.to_string());
        }
        result
    }

    /// Build the submission from the current inputs.
    pub fn build_draft(&self) -> Result<SubmissionDraft, &'static str> {
        let date = NaiveDate::parse_from_str(self.date_input.trim(), "%Y-%m-%d").map_err(|_| HELP_DATE_FORMAT)?;

        let mut draft = SubmissionDraft::new(self.action.action_id, date)
            .with_quiz(self.quiz_answered, self.first_answer_correct);
        for (item, raw) in self.items.iter().zip(&self.quantities) {
            let raw = raw.trim();
            if raw.is_empty() {
                continue;
            }
            let quantity = raw
                .parse::<f64>()
                .ok()
                .filter(|q| q.is_finite() && *q >= 0.0)
                .ok_or(HELP_QUANTITY_NUMBER)?;
            if quantity > 0.0 {
                draft = draft.with_quantity(item.clone(), quantity);
            }
        }

        if draft.quantities.is_empty() {
            return Err(HELP_QUANTITY_REQUIRED);
        }
        Ok(draft)
    }

    fn submit(&mut self) -> Action {
        if !self.items_loaded {
            debug!("Submission of action {} before its items loaded", self.action.action_id);
            return Action::None;
        }
        match self.build_draft() {
            Ok(draft) => {
                self.error = None;
                self.submitting = true;
                Action::SubmitAction {
                    session: self.session,
                    draft,
                }
            }
            Err(message) => {
                self.error = Some(message.to_string());
                Action::None
            }
        }
    }

    fn selected_quantity(&mut self) -> Option<&mut String> {
        let index = self.item_state.selected()?;
        self.quantities.get_mut(index)
    }

    fn move_selection(&mut self, down: bool) {
        let len = self.items.len();
        if len == 0 {
            return;
        }
        let next = match (self.item_state.selected(), down) {
            (None, _) => 0,
            (Some(i), true) => (i + 1) % len,
            (Some(0), false) => len - 1,
            (Some(i), false) => i - 1,
        };
        self.item_state.select(Some(next));
    }

    fn toggle_focused(&mut self) {
        match self.focus {
            SubmitFocus::QuizAnswered => {
                self.quiz_answered = !self.quiz_answered;
                if !self.quiz_answered {
                    self.first_answer_correct = false;
                }
            }
            SubmitFocus::FirstAnswerCorrect if self.quiz_answered => {
                self.first_answer_correct = !self.first_answer_correct;
            }
            _ => {}
        }
    }

    fn preview(&self) -> Option<SubmissionDraft> {
        self.build_draft().ok()
    }

    fn instructions(&self) -> Vec<InstructionShortcut> {
        if self.submitting {
            return vec![("", Color::Yellow, "Logging...")];
        }
        vec![
            shortcuts::TAB_NEXT,
            shortcuts::SEPARATOR,
            ("Space", Color::Cyan, " Toggle"),
            shortcuts::SEPARATOR,
            ("Enter", Color::Green, " Log action"),
            shortcuts::SEPARATOR,
            shortcuts::ESC_CLOSE,
        ]
    }
}

impl Component for SubmissionDialogComponent {
    fn handle_key_events(&mut self, key: KeyEvent) -> Action {
        if self.submitting {
            return Action::None;
        }
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return match key.code {
                KeyCode::Char('s') => self.submit(),
                _ => Action::None,
            };
        }

        match key.code {
            KeyCode::Esc => Action::CloseDialog,
            KeyCode::Enter => self.submit(),
            KeyCode::Tab => {
                self.focus = self.focus.next();
                Action::None
            }
            KeyCode::BackTab => {
                self.focus = self.focus.previous();
                Action::None
            }
            KeyCode::Up | KeyCode::Down if self.focus == SubmitFocus::Items => {
                self.move_selection(key.code == KeyCode::Down);
                Action::None
            }
            KeyCode::Char(' ') => {
                self.toggle_focused();
                Action::None
            }
            KeyCode::Backspace => {
                match self.focus {
                    SubmitFocus::Date => {
                        self.date_input.pop();
                    }
                    SubmitFocus::Items => {
                        if let Some(quantity) = self.selected_quantity() {
                            quantity.pop();
                        }
                    }
                    _ => {}
                }
                Action::None
            }
            KeyCode::Char(c) => {
                match self.focus {
                    SubmitFocus::Date => self.date_input.push(c),
                    SubmitFocus::Items if c.is_ascii_digit() || c == '.' => {
                        if let Some(quantity) = self.selected_quantity() {
                            quantity.push(c);
                        }
                    }
                    _ => {}
                }
                Action::None
            }
            _ => Action::None,
        }
    }

    fn render(&mut self, f: &mut Frame, rect: Rect) {
        let dialog_area = LayoutManager::centered_rect(70, 70, rect);
        f.render_widget(Clear, dialog_area);

        let block = create_dialog_block(format!(" Log: {} ", self.action.action_name), Color::Green);
        let inner = block.inner(dialog_area);
        f.render_widget(block, dialog_area);

        let chunks = LayoutManager::submission_dialog_layout(inner);
        let date_invalid = self.error.as_deref() == Some(HELP_DATE_FORMAT);
        f.render_widget(
            create_input_paragraph(
                &self.date_input,
                "Date of action (YYYY-MM-DD)",
                self.focus == SubmitFocus::Date,
                date_invalid,
            ),
            chunks[0],
        );

        let rows: Vec<ListItem> = self
            .items
            .iter()
            .zip(&self.quantities)
            .map(|(item, quantity)| {
                let shown = if quantity.is_empty() { "0" } else { quantity.as_str() };
                ListItem::new(Line::from(vec![
                    Span::styled(format!("{:>6} x ", shown), Style::default().fg(Color::Yellow)),
                    Span::styled(item.item_name.clone(), Style::default().fg(Color::White)),
                    Span::styled(
                        format!("  {} g/unit", item.co2_saved_per_unit),
                        Style::default().fg(Color::Green),
                    ),
                ]))
            })
            .collect();
        let title = if self.items_loaded {
            " Quantities "
        } else {
            " Quantities (loading...) "
        };
        let border = if self.focus == SubmitFocus::Items {
            Color::Cyan
        } else {
            Color::Gray
        };
        let list = List::new(rows)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .title(title)
                    .style(Style::default().fg(border)),
            )
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED));
        f.render_stateful_widget(list, chunks[1], &mut self.item_state);

        let quiz_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(chunks[2]);
        for (area, label, checked, focus) in [
            (quiz_chunks[0], "Quiz answered", self.quiz_answered, SubmitFocus::QuizAnswered),
            (
                quiz_chunks[1],
                "First answer correct",
                self.first_answer_correct,
                SubmitFocus::FirstAnswerCorrect,
            ),
        ] {
            let mark = if checked { "[x]" } else { "[ ]" };
            f.render_widget(
                create_input_paragraph(mark, label, self.focus == focus, false),
                area,
            );
        }

        let totals = match self.preview() {
            Some(draft) => format!("{:.1} g CO2 saved • {} points", draft.g_co2_saved(), draft.points_earned()),
            None => String::new(),
        };
        f.render_widget(Paragraph::new(totals).style(Style::default().fg(Color::Green)), chunks[3]);

        if let Some(error) = &self.error {
            f.render_widget(
                Paragraph::new(error.clone()).style(Style::default().fg(Color::Red)),
                chunks[4],
            );
        }

        f.render_widget(create_instructions_paragraph(&self.instructions()), chunks[5]);
    }
}
