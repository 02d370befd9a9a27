//! Remote data gateway.
//!
//! This module defines the interface every commit2act data source must implement,
//! along with the domain types exchanged with it and the error taxonomy for
//! transport failures. The production implementation talks to the hosted GraphQL
//! API ([`graphql::GraphQlBackend`]); tests provide in-memory implementations.

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub mod factory;
pub mod graphql;
pub mod identity;
pub mod queries;

/// Common error types for gateway operations.
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("GraphQL error in {operation}: {message}")]
    GraphQl { operation: String, message: String },

    #[error("Backend error: {0}")]
    Other(String),
}

/// A sustainability action template, e.g. "Recycle".
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BackendAction {
    pub action_id: i64,
    pub action_name: String,
    pub action_icon: Option<String>,
    pub validation_labels: Vec<String>,
    pub fallback_quiz_media: Option<String>,
}

/// One measurable sub-unit of an action.
///
/// `co2_saved_per_unit` is kept as the text the user typed; it is only turned
/// into a number when handed to the gateway.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ActionItem {
    pub item_name: String,
    pub item_description: String,
    pub co2_saved_per_unit: String,
}

impl ActionItem {
    pub fn new(name: impl Into<String>, description: impl Into<String>, co2_saved_per_unit: impl Into<String>) -> Self {
        Self {
            item_name: name.into(),
            item_description: description.into(),
            co2_saved_per_unit: co2_saved_per_unit.into(),
        }
    }

    /// Numeric value of `co2_saved_per_unit`, if it parses.
    pub fn co2_value(&self) -> Option<f64> {
        self.co2_saved_per_unit.parse::<f64>().ok().filter(|v| v.is_finite())
    }
}

/// A user's dated claim of having performed an action.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SubmittedAction {
    pub sa_id: i64,
    pub user_id: i64,
    pub action_id: i64,
    pub date_of_action: NaiveDate,
    pub g_co2_saved: f64,
    pub points_earned: i32,
    pub is_validated: bool,
    pub quiz_answered: bool,
    pub first_quiz_answer_correct: bool,
}

/// Aggregate statistics for a single user.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UserStats {
    pub user_id: i64,
    pub name: String,
    pub total_co2: f64,
    pub weekly_co2: f64,
    pub total_points: Option<i64>,
    pub weekly_points: Option<i64>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Group {
    pub group_id: i64,
    pub group_name: String,
    pub group_description: Option<String>,
    pub is_public: bool,
}

/// Privilege level of the signed-in user.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    #[default]
    Standard,
}

/// The authenticated user as reported by the identity service.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub user_id: i64,
    pub name: String,
    pub role: UserRole,
}

impl UserProfile {
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }
}

/// Arguments for saving an edited action.
#[derive(Clone, Debug, PartialEq)]
pub struct UpdateActionArgs {
    pub action_id: i64,
    pub action_name: String,
    /// Either the committed icon reference or the file name of a newly chosen icon.
    pub action_icon: Option<String>,
    pub validation_labels: Vec<String>,
    pub action_items: Vec<ActionItem>,
    pub fallback_quiz_media: Option<String>,
}

/// Arguments for recording a submitted action.
#[derive(Clone, Debug, PartialEq)]
pub struct CreateSubmittedActionArgs {
    pub action_id: i64,
    pub date_of_action: NaiveDate,
    pub first_quiz_answer_correct: bool,
    pub g_co2_saved: f64,
    pub is_validated: bool,
    pub points_earned: i32,
    pub quiz_answered: bool,
    pub user_id: i64,
}

/// Backend trait that every remote data source must implement.
///
/// Each method maps onto one named operation of the hosted API. Failures are
/// never retried here; they propagate to the caller.
#[async_trait]
pub trait Backend: Send + Sync {
    /// Returns the backend type identifier (e.g., "graphql").
    fn backend_type(&self) -> &str;

    // Action catalogue
    async fn fetch_actions(&self) -> Result<Vec<BackendAction>, BackendError>;
    async fn fetch_action_items(&self, action_id: i64) -> Result<Vec<ActionItem>, BackendError>;
    async fn update_action(&self, args: UpdateActionArgs) -> Result<BackendAction, BackendError>;
    async fn delete_action(&self, action_id: i64) -> Result<(), BackendError>;

    // Submissions
    async fn create_submitted_action(&self, args: CreateSubmittedActionArgs) -> Result<SubmittedAction, BackendError>;

    // Dashboard statistics
    async fn fetch_total_global_co2(&self) -> Result<f64, BackendError>;
    async fn fetch_user(&self, user_id: i64) -> Result<UserStats, BackendError>;
    async fn fetch_groups_for_user(&self, user_id: i64) -> Result<Vec<Group>, BackendError>;
    async fn fetch_submitted_actions_to_validate(&self, user_id: i64) -> Result<Vec<SubmittedAction>, BackendError>;
    async fn fetch_groupless_submitted_actions_to_validate(&self) -> Result<Vec<SubmittedAction>, BackendError>;
    async fn fetch_unvalidated_submitted_actions(&self, user_id: i64) -> Result<Vec<SubmittedAction>, BackendError>;
}
