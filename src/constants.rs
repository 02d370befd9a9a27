//! Constants used throughout the application
//!
//! This module centralizes magic strings, UI text, and other constant values
//! to improve maintainability and consistency.

// Field helper texts
pub const HELP_INPUT_REQUIRED: &str = "Input is required";
pub const HELP_CO2_NUMBER: &str = "Input must be a number greater than 0";
pub const HELP_ACTION_NAME_REQUIRED: &str = "Action name is required";
pub const HELP_ACTION_ITEMS_REQUIRED: &str = "Action must have at least 1 action item";
pub const HELP_VALIDATION_LABELS_REQUIRED: &str = "Action must have at least 1 image validation label";
pub const HELP_DATE_FORMAT: &str = "Date must be YYYY-MM-DD";
pub const HELP_QUANTITY_NUMBER: &str = "Quantities must be non-negative numbers";
pub const HELP_QUANTITY_REQUIRED: &str = "Enter a quantity for at least 1 item";

// Success Messages
pub const SUCCESS_ACTION_UPDATED: &str = "✅ Action saved";
pub const SUCCESS_ACTION_DELETED: &str = "✅ Action deleted";
pub const SUCCESS_ACTION_LOGGED: &str = "✅ Action logged, an admin will review it shortly";

// Error Messages
pub const ERROR_ACTION_UPDATE_FAILED: &str = "❌ Failed to save action";
pub const ERROR_ACTION_DELETE_FAILED: &str = "❌ Failed to delete action";
pub const ERROR_ACTION_SUBMIT_FAILED: &str = "❌ Failed to log action";
pub const ERROR_ACTION_ITEMS_FETCH_FAILED: &str = "❌ Failed to load action items";
pub const ERROR_ACTIONS_FETCH_FAILED: &str = "❌ Failed to load actions";
pub const ERROR_DASHBOARD_FETCH_FAILED: &str = "❌ Failed to load dashboard";

// Confirmation prompts
pub const CONFIRM_CLOSE_TITLE: &str = "Exit?";
pub const CONFIRM_CLOSE_BODY: &str = "Your changes for this action will not be saved";
pub const CONFIRM_DELETE_BODY: &str = "You will lose all user submitted content for this action.";

// UI Messages
pub const CONFIG_GENERATED: &str = "✅ Generated default configuration file";
pub const ERROR_NO_ENDPOINT: &str = "❌ Error: no GraphQL endpoint configured";
pub const ERROR_NOT_SIGNED_IN: &str = "❌ Error: no signed-in user (set [identity] user_id)";
pub const DIALOG_TITLE_LOGS: &str = "🔍 Logs - Press 'Esc', 'G' or 'q' to close";

// Submission rules
/// Points awarded when the first quiz answer is correct
pub const POINTS_FIRST_QUIZ_ANSWER_CORRECT: i32 = 10;

// Limits
/// Upper bound for `request_timeout_seconds`
pub const MAX_REQUEST_TIMEOUT_SECONDS: u64 = 300;
/// Number of in-memory log lines kept for the logs dialog
pub const MAX_IN_MEMORY_LOGS: usize = 1000;
