//! Dialog rendering helpers

pub mod common;
pub mod system_dialogs;

pub use system_dialogs::{
    render_confirmation_dialog, render_error_dialog, render_help_dialog, render_info_dialog, render_logs_dialog,
};
