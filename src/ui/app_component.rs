use crate::backend::{Backend, UserProfile};
use crate::config::Config;
use crate::constants::{
    ERROR_ACTION_DELETE_FAILED, ERROR_ACTION_SUBMIT_FAILED, ERROR_ACTION_UPDATE_FAILED, SUCCESS_ACTION_DELETED,
    SUCCESS_ACTION_LOGGED, SUCCESS_ACTION_UPDATED,
};
use crate::editor::ValidationRules;
use crate::logger::Logger;
use crate::ui::components::dialogs::{render_error_dialog, render_help_dialog, render_info_dialog, render_logs_dialog};
use crate::ui::components::{
    ActionDialogComponent, ActionListComponent, DashboardComponent, StatusBar, StatusInfo, SubmissionDialogComponent,
};
use crate::ui::core::{
    actions::{Action, DialogType, Screen, SessionId},
    event_handler::EventType,
    task_manager::TaskManager,
    Component,
};
use crate::ui::layout::LayoutManager;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Tabs},
    Frame,
};
use std::sync::Arc;
use tokio::sync::mpsc;

pub struct AppComponent {
    // Component composition
    screen: Screen,
    dashboard: DashboardComponent,
    action_list: ActionListComponent,
    action_dialog: Option<ActionDialogComponent>,
    submission_dialog: Option<SubmissionDialogComponent>,
    system_dialog: Option<DialogType>,

    // Services
    backend: Arc<dyn Backend>,
    user: UserProfile,
    rules: ValidationRules,
    task_manager: TaskManager,
    background_action_rx: mpsc::UnboundedReceiver<Action>,
    logger: Logger,

    // Simple UI state
    next_session: SessionId,
    info_message: Option<String>,
    should_quit: bool,
}

impl AppComponent {
    pub fn new(backend: Arc<dyn Backend>, user: UserProfile, config: &Config, logger: Logger) -> Self {
        let (task_manager, background_action_rx) = TaskManager::new();

        Self {
            screen: Screen::from_name(&config.ui.default_screen),
            dashboard: DashboardComponent::new(),
            action_list: ActionListComponent::new(),
            action_dialog: None,
            submission_dialog: None,
            system_dialog: None,
            backend,
            user,
            rules: config.validation.rules(),
            task_manager,
            background_action_rx,
            logger,
            next_session: 1,
            info_message: None,
            should_quit: false,
        }
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn action_dialog(&self) -> Option<&ActionDialogComponent> {
        self.action_dialog.as_ref()
    }

    pub fn submission_dialog(&self) -> Option<&SubmissionDialogComponent> {
        self.submission_dialog.as_ref()
    }

    pub fn system_dialog(&self) -> Option<&DialogType> {
        self.system_dialog.as_ref()
    }

    pub fn info_message(&self) -> Option<&str> {
        self.info_message.as_deref()
    }

    /// Get the number of active background tasks
    pub fn active_task_count(&self) -> usize {
        self.task_manager.task_count()
    }

    /// Kick off the dashboard and action catalogue loads
    pub fn trigger_initial_load(&mut self) {
        self.logger.log("AppComponent: Starting initial load".to_string());
        self.refresh();
    }

    fn refresh(&mut self) {
        self.dashboard.set_loading();
        self.task_manager
            .spawn_dashboard_load(Arc::clone(&self.backend), self.user.clone());
        self.task_manager.spawn_actions_load(Arc::clone(&self.backend));
    }

    /// True when `session` is the dialog currently on screen.
    fn is_current_session(&self, session: SessionId) -> bool {
        self.action_dialog.as_ref().is_some_and(|dialog| dialog.session() == session)
            || self
                .submission_dialog
                .as_ref()
                .is_some_and(|dialog| dialog.session() == session)
    }

    fn open_session(&mut self) -> SessionId {
        // Only one dialog at a time
        self.close_dialogs();
        let session = self.next_session;
        self.next_session += 1;
        session
    }

    fn close_dialogs(&mut self) {
        self.close_action_dialog();
        self.close_submission_dialog();
    }

    fn close_submission_dialog(&mut self) {
        if let Some(dialog) = self.submission_dialog.take() {
            let cancelled = self.task_manager.cancel_session(dialog.session());
            self.logger.log(format!(
                "Dialog: Closed log form for action {} (session {}, {} task(s) cancelled)",
                dialog.action().action_id,
                dialog.session(),
                cancelled
            ));
        }
    }

    fn close_action_dialog(&mut self) {
        if let Some(dialog) = self.action_dialog.take() {
            let cancelled = self.task_manager.cancel_session(dialog.session());
            self.logger.log(format!(
                "Dialog: Closed action {} (session {}, {} task(s) cancelled)",
                dialog.form().committed().action_id,
                dialog.session(),
                cancelled
            ));
        }
    }

    /// Handle global keyboard shortcuts that aren't component-specific
    fn handle_global_key(&mut self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Char('q') => {
                self.logger.log("Global key: 'q' - quitting application".to_string());
                Action::Quit
            }
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.logger.log("Global key: Ctrl+C - quitting application".to_string());
                Action::Quit
            }
            KeyCode::Tab => Action::SwitchScreen(self.screen.next()),
            KeyCode::Char('?') => Action::ShowDialog(DialogType::Help),
            KeyCode::Char('G') => Action::ShowDialog(DialogType::Logs),
            KeyCode::Char('r') => Action::RefreshData,
            _ => Action::None,
        }
    }

    fn handle_system_dialog_key(&mut self, dialog: &DialogType, key: KeyEvent) -> Action {
        match dialog {
            DialogType::Logs | DialogType::Help => match key.code {
                KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('G') | KeyCode::Char('?') => Action::HideDialog,
                _ => Action::None,
            },
            DialogType::Error(_) | DialogType::Info(_) => Action::HideDialog,
        }
    }

    /// Execute an action at app level
    pub fn handle_app_action(&mut self, action: Action) -> Action {
        match action {
            Action::SwitchScreen(screen) => {
                self.logger.log(format!("Navigation: Switched to {}", screen.title()));
                self.screen = screen;
                Action::None
            }
            Action::OpenAction(index) => {
                let Some(action) = self.action_list.get(index).cloned() else {
                    self.logger.log(format!("Navigation: No action at index {}", index));
                    return Action::None;
                };

                let session = self.open_session();
                self.logger.log(format!(
                    "Dialog: Opening action {} '{}' (session {})",
                    action.action_id, action.action_name, session
                ));
                let action_id = action.action_id;
                self.action_dialog = Some(ActionDialogComponent::new(session, action, self.rules));
                self.task_manager
                    .spawn_item_fetch(Arc::clone(&self.backend), session, action_id);
                Action::None
            }
            Action::LogAction(index) => {
                let Some(action) = self.action_list.get(index).cloned() else {
                    self.logger.log(format!("Navigation: No action at index {}", index));
                    return Action::None;
                };

                let session = self.open_session();
                self.logger.log(format!(
                    "Dialog: Logging action {} '{}' (session {})",
                    action.action_id, action.action_name, session
                ));
                let action_id = action.action_id;
                let today = chrono::Local::now().date_naive();
                self.submission_dialog = Some(SubmissionDialogComponent::new(session, action, today));
                self.task_manager
                    .spawn_item_fetch(Arc::clone(&self.backend), session, action_id);
                Action::None
            }
            Action::CloseDialog => {
                self.close_dialogs();
                Action::None
            }
            Action::RefreshData => {
                self.logger.log("Data: Refreshing dashboard and actions".to_string());
                self.refresh();
                Action::None
            }
            Action::DashboardLoaded(dashboard) => {
                self.logger.log(format!(
                    "Data: Dashboard loaded ({} groups, {} to validate, {} pending)",
                    dashboard.groups.len(),
                    dashboard.actions_to_validate,
                    dashboard.pending_actions.len()
                ));
                self.dashboard.update_data(*dashboard);
                Action::None
            }
            Action::ActionsLoaded(actions) => {
                self.logger.log(format!("Data: Loaded {} actions", actions.len()));
                self.action_list.update_data(actions);
                Action::None
            }
            Action::ActionItemsLoaded { session, items } => {
                if let Some(dialog) = self.submission_dialog.as_mut().filter(|d| d.session() == session) {
                    self.logger
                        .log(format!("Data: Loaded {} items for session {}", items.len(), session));
                    dialog.load_items(items);
                    return Action::None;
                }
                match self.action_dialog.as_mut() {
                    Some(dialog) if dialog.session() == session => {
                        self.logger
                            .log(format!("Data: Loaded {} items for session {}", items.len(), session));
                        dialog.load_items(items);
                    }
                    _ => self
                        .logger
                        .log(format!("Data: Discarding items for closed session {}", session)),
                }
                Action::None
            }
            Action::SaveAction { session, ticket, args } => {
                if self.is_current_session(session) {
                    self.logger
                        .log(format!("Action: Saving action {} '{}'", args.action_id, args.action_name));
                    self.task_manager
                        .spawn_save(Arc::clone(&self.backend), session, ticket, args);
                }
                Action::None
            }
            Action::ActionSaved { session, ticket, result } => {
                let Some(dialog) = self.action_dialog.as_mut().filter(|d| d.session() == session) else {
                    self.logger
                        .log(format!("Action: Discarding save result for closed session {}", session));
                    return Action::None;
                };

                match dialog.finish_save(ticket, result) {
                    Ok(true) => {
                        self.info_message = Some(SUCCESS_ACTION_UPDATED.to_string());
                        self.refresh();
                        Action::None
                    }
                    Ok(false) => {
                        self.logger
                            .log(format!("Action: Discarding stale save result for session {}", session));
                        Action::None
                    }
                    Err(e) => {
                        self.logger.log(format!("Action: Save failed: {}", e));
                        self.handle_app_action(Action::ShowDialog(DialogType::Error(format!(
                            "{}: {}",
                            ERROR_ACTION_UPDATE_FAILED, e
                        ))))
                    }
                }
            }
            Action::DeleteAction {
                session,
                ticket,
                action_id,
            } => {
                if self.is_current_session(session) {
                    self.logger.log(format!("Action: Deleting action {}", action_id));
                    self.task_manager
                        .spawn_delete(Arc::clone(&self.backend), session, ticket, action_id);
                }
                Action::None
            }
            Action::ActionDeleted { session, ticket, result } => {
                let Some(dialog) = self.action_dialog.as_mut().filter(|d| d.session() == session) else {
                    self.logger
                        .log(format!("Action: Discarding delete result for closed session {}", session));
                    return Action::None;
                };

                match dialog.finish_delete(ticket, result) {
                    Ok(true) => {
                        self.close_action_dialog();
                        self.info_message = Some(SUCCESS_ACTION_DELETED.to_string());
                        self.refresh();
                        Action::None
                    }
                    Ok(false) => Action::None,
                    Err(e) => {
                        self.logger.log(format!("Action: Delete failed: {}", e));
                        self.handle_app_action(Action::ShowDialog(DialogType::Error(format!(
                            "{}: {}",
                            ERROR_ACTION_DELETE_FAILED, e
                        ))))
                    }
                }
            }
            Action::SubmitAction { session, draft } => {
                if self.is_current_session(session) {
                    self.logger.log(format!(
                        "Action: Logging action {} ({} g CO2)",
                        draft.action_id,
                        draft.g_co2_saved()
                    ));
                    self.task_manager
                        .spawn_submit(Arc::clone(&self.backend), session, draft, self.user.clone());
                }
                Action::None
            }
            Action::ActionSubmitted { session, result } => {
                let Some(dialog) = self.submission_dialog.as_mut().filter(|d| d.session() == session) else {
                    self.logger
                        .log(format!("Action: Discarding submission result for closed session {}", session));
                    return Action::None;
                };

                match dialog.finish_submit(result) {
                    Ok(submitted) => {
                        self.logger.log(format!(
                            "Action: Logged submission {} ({} g CO2, {} points)",
                            submitted.sa_id, submitted.g_co2_saved, submitted.points_earned
                        ));
                        self.close_submission_dialog();
                        self.info_message = Some(SUCCESS_ACTION_LOGGED.to_string());
                        self.refresh();
                        Action::None
                    }
                    Err(e) => {
                        self.logger.log(format!("Action: Logging failed: {}", e));
                        self.handle_app_action(Action::ShowDialog(DialogType::Error(format!(
                            "{}: {}",
                            ERROR_ACTION_SUBMIT_FAILED, e
                        ))))
                    }
                }
            }
            Action::ShowDialog(dialog) => {
                self.system_dialog = Some(dialog);
                Action::None
            }
            Action::HideDialog => {
                self.system_dialog = None;
                Action::None
            }
            Action::ShowInfo(message) => {
                self.info_message = Some(message);
                Action::None
            }
            Action::Quit => {
                self.should_quit = true;
                Action::Quit
            }
            Action::None => Action::None,
        }
    }

    /// Process background actions from task manager
    pub fn process_background_actions(&mut self) -> Vec<Action> {
        let mut actions = Vec::new();

        // Process all available background actions
        while let Ok(action) = self.background_action_rx.try_recv() {
            self.logger
                .log(format!("Background: Received action (session {:?})", action.session()));
            actions.push(action);
        }

        self.task_manager.cleanup_finished_tasks();
        actions
    }

    /// Route an input event to whoever owns the keyboard right now
    pub fn handle_event(&mut self, event_type: EventType) -> Action {
        let action = match event_type {
            EventType::Key(key) => {
                self.info_message = None;

                if let Some(dialog) = self.system_dialog.clone() {
                    self.handle_system_dialog_key(&dialog, key)
                } else if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
                    Action::Quit
                } else if let Some(dialog) = self.action_dialog.as_mut() {
                    // Dialog has priority when visible
                    dialog.handle_key_events(key)
                } else if let Some(dialog) = self.submission_dialog.as_mut() {
                    dialog.handle_key_events(key)
                } else {
                    let screen_action = match self.screen {
                        Screen::Dashboard => self.dashboard.handle_key_events(key),
                        Screen::Actions => self.action_list.handle_key_events(key),
                    };
                    if matches!(screen_action, Action::None) {
                        self.handle_global_key(key)
                    } else {
                        screen_action
                    }
                }
            }
            EventType::Resize(_, _) | EventType::Tick | EventType::Other => Action::None,
        };

        self.handle_app_action(action)
    }

    fn status_info(&self) -> StatusInfo {
        StatusInfo {
            active_tasks: self.task_manager.task_count(),
            user_name: Some(self.user.name.clone()),
            is_admin: self.user.is_admin(),
            info_message: self.info_message.clone(),
        }
    }

    fn render_tabs(&self, f: &mut Frame, rect: Rect) {
        let titles: Vec<Line> = [Screen::Dashboard, Screen::Actions]
            .iter()
            .map(|screen| Line::from(screen.title()))
            .collect();
        let selected = match self.screen {
            Screen::Dashboard => 0,
            Screen::Actions => 1,
        };
        let tabs = Tabs::new(titles)
            .select(selected)
            .block(Block::default().borders(Borders::ALL).title(" commit2act "))
            .highlight_style(Style::default().fg(Color::Green).add_modifier(Modifier::BOLD));
        f.render_widget(tabs, rect);
    }
}

impl Component for AppComponent {
    fn handle_key_events(&mut self, key: KeyEvent) -> Action {
        self.handle_global_key(key)
    }

    fn render(&mut self, f: &mut Frame, rect: Rect) {
        let chunks = LayoutManager::main_layout(rect);

        self.render_tabs(f, chunks[0]);
        match self.screen {
            Screen::Dashboard => self.dashboard.render(f, chunks[1]),
            Screen::Actions => self.action_list.render(f, chunks[1]),
        }
        StatusBar::render(f, chunks[2], &self.status_info());

        if let Some(dialog) = self.action_dialog.as_mut() {
            dialog.render(f, rect);
        }
        if let Some(dialog) = self.submission_dialog.as_mut() {
            dialog.render(f, rect);
        }

        match &self.system_dialog {
            Some(DialogType::Error(message)) => render_error_dialog(f, rect, message),
            Some(DialogType::Info(message)) => render_info_dialog(f, rect, message),
            Some(DialogType::Logs) => render_logs_dialog(f, rect, &self.logger),
            Some(DialogType::Help) => render_help_dialog(f, rect),
            None => {}
        }
    }
}
