#![allow(dead_code)]

use async_trait::async_trait;
use chrono::NaiveDate;
use commit2act::backend::{
    ActionItem, Backend, BackendAction, BackendError, CreateSubmittedActionArgs, Group, SubmittedAction,
    UpdateActionArgs, UserProfile, UserRole, UserStats,
};
use std::collections::HashMap;
use std::sync::Mutex;

/// In-memory gateway that records every mutation it receives.
#[derive(Default)]
pub struct MockBackend {
    pub actions: Mutex<Vec<BackendAction>>,
    pub items: Mutex<HashMap<i64, Vec<ActionItem>>>,
    pub user_stats: Option<UserStats>,
    pub global_co2: f64,
    pub groups: Vec<Group>,
    pub to_validate: Vec<SubmittedAction>,
    pub groupless_to_validate: Vec<SubmittedAction>,
    pub unvalidated: Vec<SubmittedAction>,
    /// When set, every call fails with a network error carrying this message.
    pub fail_with: Mutex<Option<String>>,
    pub updates: Mutex<Vec<UpdateActionArgs>>,
    pub deletes: Mutex<Vec<i64>>,
    pub submissions: Mutex<Vec<CreateSubmittedActionArgs>>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_action(self, action: BackendAction, items: Vec<ActionItem>) -> Self {
        self.items.lock().unwrap().insert(action.action_id, items);
        self.actions.lock().unwrap().push(action);
        self
    }

    pub fn fail(&self, message: &str) {
        *self.fail_with.lock().unwrap() = Some(message.to_string());
    }

    pub fn recover(&self) {
        *self.fail_with.lock().unwrap() = None;
    }

    fn check(&self) -> Result<(), BackendError> {
        match self.fail_with.lock().unwrap().as_ref() {
            Some(message) => Err(BackendError::Network(message.clone())),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl Backend for MockBackend {
    fn backend_type(&self) -> &str {
        "mock"
    }

    async fn fetch_actions(&self) -> Result<Vec<BackendAction>, BackendError> {
        self.check()?;
        Ok(self.actions.lock().unwrap().clone())
    }

    async fn fetch_action_items(&self, action_id: i64) -> Result<Vec<ActionItem>, BackendError> {
        self.check()?;
        Ok(self.items.lock().unwrap().get(&action_id).cloned().unwrap_or_default())
    }

    async fn update_action(&self, args: UpdateActionArgs) -> Result<BackendAction, BackendError> {
        self.check()?;
        let action = BackendAction {
            action_id: args.action_id,
            action_name: args.action_name.clone(),
            action_icon: args.action_icon.clone(),
            validation_labels: args.validation_labels.clone(),
            fallback_quiz_media: args.fallback_quiz_media.clone(),
        };
        self.items.lock().unwrap().insert(args.action_id, args.action_items.clone());
        self.updates.lock().unwrap().push(args);
        Ok(action)
    }

    async fn delete_action(&self, action_id: i64) -> Result<(), BackendError> {
        self.check()?;
        self.actions.lock().unwrap().retain(|a| a.action_id != action_id);
        self.deletes.lock().unwrap().push(action_id);
        Ok(())
    }

    async fn create_submitted_action(&self, args: CreateSubmittedActionArgs) -> Result<SubmittedAction, BackendError> {
        self.check()?;
        let submitted = SubmittedAction {
            sa_id: self.submissions.lock().unwrap().len() as i64 + 1,
            user_id: args.user_id,
            action_id: args.action_id,
            date_of_action: args.date_of_action,
            g_co2_saved: args.g_co2_saved,
            points_earned: args.points_earned,
            is_validated: args.is_validated,
            quiz_answered: args.quiz_answered,
            first_quiz_answer_correct: args.first_quiz_answer_correct,
        };
        self.submissions.lock().unwrap().push(args);
        Ok(submitted)
    }

    async fn fetch_total_global_co2(&self) -> Result<f64, BackendError> {
        self.check()?;
        Ok(self.global_co2)
    }

    async fn fetch_user(&self, user_id: i64) -> Result<UserStats, BackendError> {
        self.check()?;
        self.user_stats
            .clone()
            .filter(|stats| stats.user_id == user_id)
            .ok_or_else(|| BackendError::NotFound(format!("user {}", user_id)))
    }

    async fn fetch_groups_for_user(&self, _user_id: i64) -> Result<Vec<Group>, BackendError> {
        self.check()?;
        Ok(self.groups.clone())
    }

    async fn fetch_submitted_actions_to_validate(&self, _user_id: i64) -> Result<Vec<SubmittedAction>, BackendError> {
        self.check()?;
        Ok(self.to_validate.clone())
    }

    async fn fetch_groupless_submitted_actions_to_validate(&self) -> Result<Vec<SubmittedAction>, BackendError> {
        self.check()?;
        Ok(self.groupless_to_validate.clone())
    }

    async fn fetch_unvalidated_submitted_actions(&self, _user_id: i64) -> Result<Vec<SubmittedAction>, BackendError> {
        self.check()?;
        Ok(self.unvalidated.clone())
    }
}

pub fn action(id: i64, name: &str, labels: &[&str]) -> BackendAction {
    BackendAction {
        action_id: id,
        action_name: name.to_string(),
        action_icon: Some(format!("{}.png", name.to_lowercase())),
        validation_labels: labels.iter().map(|l| l.to_string()).collect(),
        fallback_quiz_media: None,
    }
}

pub fn submitted(sa_id: i64, user_id: i64, g_co2_saved: f64) -> SubmittedAction {
    SubmittedAction {
        sa_id,
        user_id,
        action_id: 1,
        date_of_action: NaiveDate::from_ymd_opt(2023, 3, 14).unwrap(),
        g_co2_saved,
        points_earned: 0,
        is_validated: false,
        quiz_answered: false,
        first_quiz_answer_correct: false,
    }
}

pub fn stats(user_id: i64, total_co2: f64, weekly_co2: f64) -> UserStats {
    UserStats {
        user_id,
        name: "Sam".to_string(),
        total_co2,
        weekly_co2,
        total_points: Some(120),
        weekly_points: Some(20),
    }
}

pub fn group(id: i64, name: &str) -> Group {
    Group {
        group_id: id,
        group_name: name.to_string(),
        group_description: None,
        is_public: true,
    }
}

pub fn user(user_id: i64, role: UserRole) -> UserProfile {
    UserProfile {
        user_id,
        name: "Sam".to_string(),
        role,
    }
}
