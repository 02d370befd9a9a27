//! Recording that a user performed an action.

use chrono::NaiveDate;
use log::info;

use crate::backend::{ActionItem, Backend, BackendError, CreateSubmittedActionArgs, SubmittedAction, UserProfile};
use crate::constants::POINTS_FIRST_QUIZ_ANSWER_CORRECT;

/// One item of the action and how many units of it were done.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemQuantity {
    pub item: ActionItem,
    pub quantity: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SubmissionDraft {
    pub action_id: i64,
    pub date_of_action: NaiveDate,
    pub quantities: Vec<ItemQuantity>,
    pub quiz_answered: bool,
    pub first_quiz_answer_correct: bool,
}

impl SubmissionDraft {
    pub fn new(action_id: i64, date_of_action: NaiveDate) -> Self {
        Self {
            action_id,
            date_of_action,
            quantities: Vec::new(),
            quiz_answered: false,
            first_quiz_answer_correct: false,
        }
    }

    pub fn with_quantity(mut self, item: ActionItem, quantity: f64) -> Self {
        self.quantities.push(ItemQuantity { item, quantity });
        self
    }

    pub fn with_quiz(mut self, answered: bool, first_answer_correct: bool) -> Self {
        self.quiz_answered = answered;
        self.first_quiz_answer_correct = answered && first_answer_correct;
        self
    }

    /// Grams of CO2 saved; items whose per-unit value does not parse count as 0.
    pub fn g_co2_saved(&self) -> f64 {
        self.quantities
            .iter()
            .map(|q| q.quantity * q.item.co2_value().unwrap_or(0.0))
            .fold(0.0, |total, co2| total + co2)
    }

    pub fn points_earned(&self) -> i32 {
        if self.first_quiz_answer_correct {
            POINTS_FIRST_QUIZ_ANSWER_CORRECT
        } else {
            0
        }
    }

    pub fn into_args(self, user_id: i64) -> CreateSubmittedActionArgs {
        CreateSubmittedActionArgs {
            action_id: self.action_id,
            date_of_action: self.date_of_action,
            first_quiz_answer_correct: self.first_quiz_answer_correct,
            g_co2_saved: self.g_co2_saved(),
            is_validated: false,
            points_earned: self.points_earned(),
            quiz_answered: self.quiz_answered,
            user_id,
        }
    }

    pub async fn submit(self, backend: &dyn Backend, user: &UserProfile) -> Result<SubmittedAction, BackendError> {
        let args = self.into_args(user.user_id);
        info!(
            "Submitting action {} for user {}: {} g CO2, {} points",
            args.action_id, args.user_id, args.g_co2_saved, args.points_earned
        );
        backend.create_submitted_action(args).await
    }
}
