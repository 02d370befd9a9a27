//! GraphQL backend implementation.
//!
//! Every gateway call is a single POST of `{ query, variables }` to the hosted
//! endpoint. The response envelope is `{ data: { <operation>: ... }, errors: [...] }`;
//! the payload under the operation name is decoded into the wire structs below and
//! then converted into the backend-agnostic types.

use async_trait::async_trait;
use chrono::NaiveDate;
use log::{debug, warn};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use std::time::Duration;

use super::{
    queries, ActionItem, Backend, BackendAction, BackendError, CreateSubmittedActionArgs, Group, SubmittedAction,
    UpdateActionArgs, UserStats,
};
use crate::editor::labels::{join_labels, split_labels};

/// Backend talking to the hosted GraphQL API.
pub struct GraphQlBackend {
    client: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
    auth_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GraphQlResponse {
    data: Option<serde_json::Map<String, Value>>,
    #[serde(default)]
    errors: Vec<GraphQlErrorEntry>,
}

#[derive(Debug, Deserialize)]
struct GraphQlErrorEntry {
    message: String,
    #[serde(rename = "errorType")]
    error_type: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiAction {
    action_id: i64,
    action_name: String,
    action_icon: Option<String>,
    validation_labels: Option<String>,
    fallback_quiz_media: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiActionItem {
    item_name: String,
    item_description: Option<String>,
    co2_saved_per_unit: f64,
}

#[derive(Debug, Deserialize)]
struct ApiSubmittedAction {
    sa_id: i64,
    user_id: i64,
    action_id: i64,
    date_of_action: String,
    g_co2_saved: Option<f64>,
    points_earned: Option<i32>,
    is_validated: Option<bool>,
    quiz_answered: Option<bool>,
    first_quiz_answer_correct: Option<bool>,
}

#[derive(Debug, Deserialize)]
struct ApiUser {
    user_id: i64,
    name: String,
    total_co2: Option<f64>,
    weekly_co2: Option<f64>,
    total_points: Option<i64>,
    weekly_points: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct ApiGroup {
    group_id: i64,
    group_name: String,
    group_description: Option<String>,
    is_public: Option<bool>,
}

impl GraphQlBackend {
    /// Create a new GraphQL backend for the given endpoint.
    ///
    /// `api_key` is sent as `x-api-key`, `auth_token` as the `Authorization` header.
    pub fn new(
        endpoint: String,
        api_key: Option<String>,
        auth_token: Option<String>,
        timeout: Duration,
    ) -> Result<Self, BackendError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| BackendError::Other(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            endpoint,
            api_key,
            auth_token,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Issue one named operation and decode the payload stored under its name.
    async fn execute<T: DeserializeOwned>(&self, operation: &str, query: &str, variables: Value) -> Result<T, BackendError> {
        debug!("GraphQL {} -> {}", operation, self.endpoint);

        let mut request = self
            .client
            .post(&self.endpoint)
            .json(&json!({ "query": query, "variables": variables }));

        if let Some(api_key) = &self.api_key {
            request = request.header("x-api-key", api_key);
        }
        if let Some(token) = &self.auth_token {
            request = request.header("authorization", token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| BackendError::Network(format!("{}: {}", operation, e)))?;

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(BackendError::Auth(format!("{} rejected with HTTP {}", operation, status)));
        }
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(BackendError::NotFound(format!("GraphQL endpoint {}", self.endpoint)));
        }
        if !status.is_success() {
            return Err(BackendError::Network(format!("{} failed with HTTP {}", operation, status)));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| BackendError::InvalidData(format!("{}: response is not JSON: {}", operation, e)))?;

        decode_payload(operation, body)
    }

    // Helper: Transform API action → Backend action
    fn action_to_backend(api_action: ApiAction) -> BackendAction {
        BackendAction {
            action_id: api_action.action_id,
            action_name: api_action.action_name,
            action_icon: api_action.action_icon.filter(|icon| !icon.is_empty()),
            validation_labels: split_labels(api_action.validation_labels.as_deref().unwrap_or_default()),
            fallback_quiz_media: api_action.fallback_quiz_media,
        }
    }

    // Helper: Transform API action item → ActionItem
    fn item_to_backend(api_item: ApiActionItem) -> ActionItem {
        ActionItem {
            item_name: api_item.item_name,
            item_description: api_item.item_description.unwrap_or_default(),
            co2_saved_per_unit: api_item.co2_saved_per_unit.to_string(),
        }
    }

    // Helper: Transform API submitted action → SubmittedAction
    fn submitted_action_to_backend(api: ApiSubmittedAction) -> Result<SubmittedAction, BackendError> {
        Ok(SubmittedAction {
            sa_id: api.sa_id,
            user_id: api.user_id,
            action_id: api.action_id,
            date_of_action: parse_action_date(&api.date_of_action)?,
            g_co2_saved: api.g_co2_saved.unwrap_or(0.0),
            points_earned: api.points_earned.unwrap_or(0),
            is_validated: api.is_validated.unwrap_or(false),
            quiz_answered: api.quiz_answered.unwrap_or(false),
            first_quiz_answer_correct: api.first_quiz_answer_correct.unwrap_or(false),
        })
    }

    fn submitted_actions_to_backend(list: Vec<ApiSubmittedAction>) -> Result<Vec<SubmittedAction>, BackendError> {
        list.into_iter().map(Self::submitted_action_to_backend).collect()
    }

    // Helper: Transform API user → UserStats
    fn user_to_backend(api_user: ApiUser) -> UserStats {
        UserStats {
            user_id: api_user.user_id,
            name: api_user.name,
            total_co2: api_user.total_co2.unwrap_or(0.0),
            weekly_co2: api_user.weekly_co2.unwrap_or(0.0),
            total_points: api_user.total_points,
            weekly_points: api_user.weekly_points,
        }
    }

    // Helper: Transform API group → Group
    fn group_to_backend(api_group: ApiGroup) -> Group {
        Group {
            group_id: api_group.group_id,
            group_name: api_group.group_name,
            group_description: api_group.group_description,
            is_public: api_group.is_public.unwrap_or(false),
        }
    }
}

/// Extract `data.<operation>` from a GraphQL response body.
fn decode_payload<T: DeserializeOwned>(operation: &str, body: Value) -> Result<T, BackendError> {
    let response: GraphQlResponse = serde_json::from_value(body)
        .map_err(|e| BackendError::InvalidData(format!("{}: malformed GraphQL envelope: {}", operation, e)))?;

    if let Some(first) = response.errors.first() {
        let message = response
            .errors
            .iter()
            .map(|e| e.message.as_str())
            .collect::<Vec<_>>()
            .join("; ");
        let unauthorized = first
            .error_type
            .as_deref()
            .map(|t| t.contains("Unauthorized"))
            .unwrap_or(false);
        if unauthorized {
            return Err(BackendError::Auth(message));
        }
        return Err(BackendError::GraphQl {
            operation: operation.to_string(),
            message,
        });
    }

    let mut data = response
        .data
        .ok_or_else(|| BackendError::InvalidData(format!("{}: response has no data", operation)))?;
    let payload = data.remove(operation).unwrap_or(Value::Null);

    serde_json::from_value(payload).map_err(|e| BackendError::InvalidData(format!("{}: {}", operation, e)))
}

/// Dates come back either as `YYYY-MM-DD` or as a full timestamp.
fn parse_action_date(raw: &str) -> Result<NaiveDate, BackendError> {
    let date_part = raw.get(..10).unwrap_or(raw);
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
        .map_err(|e| BackendError::InvalidData(format!("invalid date_of_action '{}': {}", raw, e)))
}

#[async_trait]
impl Backend for GraphQlBackend {
    fn backend_type(&self) -> &str {
        "graphql"
    }

    async fn fetch_actions(&self) -> Result<Vec<BackendAction>, BackendError> {
        let actions: Vec<ApiAction> = self
            .execute("getAllActions", queries::GET_ALL_ACTIONS, json!({}))
            .await?;
        Ok(actions.into_iter().map(Self::action_to_backend).collect())
    }

    async fn fetch_action_items(&self, action_id: i64) -> Result<Vec<ActionItem>, BackendError> {
        let items: Option<Vec<ApiActionItem>> = self
            .execute(
                "getActionItemsForAction",
                queries::GET_ACTION_ITEMS_FOR_ACTION,
                json!({ "action_id": action_id }),
            )
            .await?;
        Ok(items.unwrap_or_default().into_iter().map(Self::item_to_backend).collect())
    }

    async fn update_action(&self, args: UpdateActionArgs) -> Result<BackendAction, BackendError> {
        let mut items = Vec::with_capacity(args.action_items.len());
        for item in &args.action_items {
            let co2 = item.co2_value().ok_or_else(|| {
                BackendError::InvalidData(format!(
                    "item '{}' has non-numeric co2_saved_per_unit '{}'",
                    item.item_name, item.co2_saved_per_unit
                ))
            })?;
            items.push(json!({
                "item_name": item.item_name,
                "item_description": item.item_description,
                "co2_saved_per_unit": co2,
            }));
        }

        let variables = json!({
            "action_id": args.action_id,
            "action_name": args.action_name,
            "action_icon": args.action_icon,
            "validation_labels": join_labels(&args.validation_labels),
            "fallback_quiz_media": args.fallback_quiz_media,
            "action_items": items,
        });

        let action: Option<ApiAction> = self.execute("updateAction", queries::UPDATE_ACTION, variables).await?;
        action
            .map(Self::action_to_backend)
            .ok_or_else(|| BackendError::NotFound(format!("action {}", args.action_id)))
    }

    async fn delete_action(&self, action_id: i64) -> Result<(), BackendError> {
        let _: Value = self
            .execute("deleteAction", queries::DELETE_ACTION, json!({ "action_id": action_id }))
            .await?;
        Ok(())
    }

    async fn create_submitted_action(&self, args: CreateSubmittedActionArgs) -> Result<SubmittedAction, BackendError> {
        let variables = json!({
            "action_id": args.action_id,
            "date_of_action": args.date_of_action.format("%Y-%m-%d").to_string(),
            "first_quiz_answer_correct": args.first_quiz_answer_correct,
            "g_co2_saved": args.g_co2_saved,
            "is_validated": args.is_validated,
            "points_earned": args.points_earned,
            "quiz_answered": args.quiz_answered,
            "user_id": args.user_id,
        });

        let created: ApiSubmittedAction = self
            .execute("createSubmittedAction", queries::CREATE_SUBMITTED_ACTION, variables)
            .await?;
        Self::submitted_action_to_backend(created)
    }

    async fn fetch_total_global_co2(&self) -> Result<f64, BackendError> {
        let total: Option<f64> = self
            .execute("getTotalGlobalCO2", queries::GET_TOTAL_GLOBAL_CO2, json!({}))
            .await?;
        if total.is_none() {
            warn!("getTotalGlobalCO2 returned null, treating as 0");
        }
        Ok(total.unwrap_or(0.0))
    }

    async fn fetch_user(&self, user_id: i64) -> Result<UserStats, BackendError> {
        let user: Option<ApiUser> = self
            .execute("getSingleUser", queries::GET_SINGLE_USER, json!({ "user_id": user_id }))
            .await?;
        user.map(Self::user_to_backend)
            .ok_or_else(|| BackendError::NotFound(format!("user {}", user_id)))
    }

    async fn fetch_groups_for_user(&self, user_id: i64) -> Result<Vec<Group>, BackendError> {
        let groups: Option<Vec<ApiGroup>> = self
            .execute(
                "getAllGroupsForUser",
                queries::GET_ALL_GROUPS_FOR_USER,
                json!({ "user_id": user_id }),
            )
            .await?;
        Ok(groups.unwrap_or_default().into_iter().map(Self::group_to_backend).collect())
    }

    async fn fetch_submitted_actions_to_validate(&self, user_id: i64) -> Result<Vec<SubmittedAction>, BackendError> {
        let list: Option<Vec<ApiSubmittedAction>> = self
            .execute(
                "getAllSubmittedActionsToValidate",
                &queries::get_all_submitted_actions_to_validate(),
                json!({ "user_id": user_id }),
            )
            .await?;
        Self::submitted_actions_to_backend(list.unwrap_or_default())
    }

    async fn fetch_groupless_submitted_actions_to_validate(&self) -> Result<Vec<SubmittedAction>, BackendError> {
        let list: Option<Vec<ApiSubmittedAction>> = self
            .execute(
                "getAllSubmittedActionsOfUsersWithoutGroupToValidateForAdmin",
                &queries::get_all_submitted_actions_of_users_without_group_to_validate_for_admin(),
                json!({}),
            )
            .await?;
        Self::submitted_actions_to_backend(list.unwrap_or_default())
    }

    async fn fetch_unvalidated_submitted_actions(&self, user_id: i64) -> Result<Vec<SubmittedAction>, BackendError> {
        let list: Option<Vec<ApiSubmittedAction>> = self
            .execute(
                "getAllUnvalidatedSubmittedActionsForUser",
                &queries::get_all_unvalidated_submitted_actions_for_user(),
                json!({ "user_id": user_id }),
            )
            .await?;
        Self::submitted_actions_to_backend(list.unwrap_or_default())
    }
}
