//! Reusable UI components

pub mod action_dialog_component;
pub mod action_list_component;
pub mod dashboard_component;
pub mod dialogs;
pub mod status_bar;
pub mod submission_dialog_component;

// Component exports
pub use action_dialog_component::{ActionDialogComponent, Focus};
pub use action_list_component::ActionListComponent;
pub use dashboard_component::DashboardComponent;
pub use status_bar::{StatusBar, StatusInfo};
pub use submission_dialog_component::{SubmissionDialogComponent, SubmitFocus};
