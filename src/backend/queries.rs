//! GraphQL documents for every operation the gateway issues.
//!
//! Field selections mirror what the client actually reads; the server schema is
//! owned by the hosted API.

pub const GET_ALL_ACTIONS: &str = r#"query getAllActions {
  getAllActions {
    action_id
    action_name
    action_icon
    validation_labels
    fallback_quiz_media
  }
}"#;

pub const GET_ACTION_ITEMS_FOR_ACTION: &str = r#"query getActionItemsForAction($action_id: Int!) {
  getActionItemsForAction(action_id: $action_id) {
    item_name
    item_description
    co2_saved_per_unit
  }
}"#;

pub const UPDATE_ACTION: &str = r#"mutation updateAction(
  $action_id: Int!
  $action_name: String!
  $action_icon: String
  $validation_labels: String!
  $fallback_quiz_media: String
  $action_items: [ActionItemInput!]!
) {
  updateAction(
    action_id: $action_id
    action_name: $action_name
    action_icon: $action_icon
    validation_labels: $validation_labels
    fallback_quiz_media: $fallback_quiz_media
    action_items: $action_items
  ) {
    action_id
    action_name
    action_icon
    validation_labels
    fallback_quiz_media
  }
}"#;

pub const DELETE_ACTION: &str = r#"mutation deleteAction($action_id: Int!) {
  deleteAction(action_id: $action_id)
}"#;

pub const CREATE_SUBMITTED_ACTION: &str = r#"mutation createSubmittedAction(
  $action_id: Int!
  $date_of_action: AWSDate!
  $first_quiz_answer_correct: Boolean!
  $g_co2_saved: Float!
  $is_validated: Boolean!
  $points_earned: Int!
  $quiz_answered: Boolean!
  $user_id: Int!
) {
  createSubmittedAction(
    action_id: $action_id
    date_of_action: $date_of_action
    first_quiz_answer_correct: $first_quiz_answer_correct
    g_co2_saved: $g_co2_saved
    is_validated: $is_validated
    points_earned: $points_earned
    quiz_answered: $quiz_answered
    user_id: $user_id
  ) {
    sa_id
    user_id
    action_id
    date_of_action
    g_co2_saved
    points_earned
    is_validated
    quiz_answered
    first_quiz_answer_correct
  }
}"#;

pub const GET_TOTAL_GLOBAL_CO2: &str = r#"query getTotalGlobalCO2 {
  getTotalGlobalCO2
}"#;

pub const GET_SINGLE_USER: &str = r#"query getSingleUser($user_id: Int!) {
  getSingleUser(user_id: $user_id) {
    user_id
    name
    total_co2
    weekly_co2
    total_points
    weekly_points
  }
}"#;

pub const GET_ALL_GROUPS_FOR_USER: &str = r#"query getAllGroupsForUser($user_id: Int!) {
  getAllGroupsForUser(user_id: $user_id) {
    group_id
    group_name
    group_description
    is_public
  }
}"#;

const SUBMITTED_ACTION_FIELDS: &str = "sa_id user_id action_id date_of_action g_co2_saved points_earned is_validated quiz_answered first_quiz_answer_correct";

/// Builds a list query over submitted actions with the shared field selection.
fn submitted_action_query(operation: &str, takes_user: bool) -> String {
    if takes_user {
        format!(
            "query {op}($user_id: Int!) {{\n  {op}(user_id: $user_id) {{ {fields} }}\n}}",
            op = operation,
            fields = SUBMITTED_ACTION_FIELDS
        )
    } else {
        format!("query {op} {{\n  {op} {{ {fields} }}\n}}", op = operation, fields = SUBMITTED_ACTION_FIELDS)
    }
}

pub fn get_all_submitted_actions_to_validate() -> String {
    submitted_action_query("getAllSubmittedActionsToValidate", true)
}

pub fn get_all_submitted_actions_of_users_without_group_to_validate_for_admin() -> String {
    submitted_action_query("getAllSubmittedActionsOfUsersWithoutGroupToValidateForAdmin", false)
}

pub fn get_all_unvalidated_submitted_actions_for_user() -> String {
    submitted_action_query("getAllUnvalidatedSubmittedActionsForUser", true)
}
