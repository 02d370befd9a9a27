use crate::backend::{ActionItem, BackendAction, BackendError, SubmittedAction, UpdateActionArgs};
use crate::dashboard::Dashboard;
use crate::editor::SaveTicket;
use crate::submission::SubmissionDraft;

/// Identifies one opening of an action or submission dialog.
pub type SessionId = u64;

/// Top-level screens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    #[default]
    Dashboard,
    Actions,
}

impl Screen {
    pub fn from_name(name: &str) -> Self {
        match name {
            "actions" => Screen::Actions,
            _ => Screen::Dashboard,
        }
    }

    pub fn next(self) -> Self {
        match self {
            Screen::Dashboard => Screen::Actions,
            Screen::Actions => Screen::Dashboard,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Screen::Dashboard => "Dashboard",
            Screen::Actions => "Actions",
        }
    }
}

#[derive(Debug)]
pub enum Action {
    // Navigation
    SwitchScreen(Screen),
    OpenAction(usize),
    LogAction(usize),
    CloseDialog,

    // Data loading
    RefreshData,
    DashboardLoaded(Box<Dashboard>),
    ActionsLoaded(Vec<BackendAction>),
    ActionItemsLoaded {
        session: SessionId,
        items: Vec<ActionItem>,
    },

    // Action dialog operations
    SaveAction {
        session: SessionId,
        ticket: SaveTicket,
        args: UpdateActionArgs,
    },
    ActionSaved {
        session: SessionId,
        ticket: SaveTicket,
        result: Result<BackendAction, BackendError>,
    },
    DeleteAction {
        session: SessionId,
        ticket: SaveTicket,
        action_id: i64,
    },
    ActionDeleted {
        session: SessionId,
        ticket: SaveTicket,
        result: Result<(), BackendError>,
    },

    // Submission dialog operations
    SubmitAction {
        session: SessionId,
        draft: SubmissionDraft,
    },
    ActionSubmitted {
        session: SessionId,
        result: Result<SubmittedAction, BackendError>,
    },

    // UI operations
    ShowDialog(DialogType),
    HideDialog,
    ShowInfo(String),

    // App control
    Quit,
    None,
}

impl Action {
    /// Session the action belongs to, for results of dialog-bound calls.
    pub fn session(&self) -> Option<SessionId> {
        match self {
            Action::ActionItemsLoaded { session, .. }
            | Action::SaveAction { session, .. }
            | Action::ActionSaved { session, .. }
            | Action::DeleteAction { session, .. }
            | Action::ActionDeleted { session, .. }
            | Action::SubmitAction { session, .. }
            | Action::ActionSubmitted { session, .. } => Some(*session),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogType {
    Error(String),
    Info(String),
    Help,
    Logs,
}
