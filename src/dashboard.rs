//! Dashboard aggregation.
//!
//! Loads everything the landing screen shows for one user. The underlying calls
//! are independent, so they are fanned out and joined rather than chained.

use log::{debug, info};

use crate::backend::{Backend, BackendError, Group, SubmittedAction, UserProfile};

/// Personal and global CO2 figures.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProgressStats {
    pub global_co2: f64,
    pub total_co2: f64,
    pub weekly_co2: f64,
}

/// Everything the dashboard renders.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dashboard {
    pub user: Option<UserProfile>,
    pub stats: ProgressStats,
    pub groups: Vec<Group>,
    pub actions_to_validate: usize,
    pub pending_actions: Vec<SubmittedAction>,
    pub pending_co2: f64,
}

impl Dashboard {
    pub fn has_actions_to_validate(&self) -> bool {
        self.actions_to_validate > 0
    }

    pub fn has_pending_actions(&self) -> bool {
        !self.pending_actions.is_empty()
    }
}

/// Sum of CO2 saved over submissions; zero for none.
pub fn pending_co2_total(actions: &[SubmittedAction]) -> f64 {
    actions.iter().map(|action| action.g_co2_saved).fold(0.0, |total, co2| total + co2)
}

pub struct DashboardAggregator<'a> {
    backend: &'a dyn Backend,
}

impl<'a> DashboardAggregator<'a> {
    pub fn new(backend: &'a dyn Backend) -> Self {
        Self { backend }
    }

    /// User stats and the global total, fetched together.
    pub async fn progress_stats(&self, user_id: i64) -> Result<ProgressStats, BackendError> {
        let (user, global_co2) = tokio::try_join!(
            self.backend.fetch_user(user_id),
            self.backend.fetch_total_global_co2()
        )?;

        Ok(ProgressStats {
            global_co2,
            total_co2: user.total_co2,
            weekly_co2: user.weekly_co2,
        })
    }

    pub async fn groups(&self, user_id: i64) -> Result<Vec<Group>, BackendError> {
        self.backend.fetch_groups_for_user(user_id).await
    }

    /// Submissions waiting for this user's review. Admins also review the
    /// submissions of users that belong to no group.
    pub async fn actions_to_validate(&self, user: &UserProfile) -> Result<usize, BackendError> {
        if user.is_admin() {
            let (group_scoped, groupless) = tokio::try_join!(
                self.backend.fetch_submitted_actions_to_validate(user.user_id),
                self.backend.fetch_groupless_submitted_actions_to_validate()
            )?;
            Ok(group_scoped.len() + groupless.len())
        } else {
            let group_scoped = self.backend.fetch_submitted_actions_to_validate(user.user_id).await?;
            Ok(group_scoped.len())
        }
    }

    /// The user's own unvalidated submissions and their CO2 sum.
    pub async fn pending_actions(&self, user_id: i64) -> Result<(Vec<SubmittedAction>, f64), BackendError> {
        let pending = self.backend.fetch_unvalidated_submitted_actions(user_id).await?;
        let pending_co2 = pending_co2_total(&pending);
        Ok((pending, pending_co2))
    }

    pub async fn load(&self, user: &UserProfile) -> Result<Dashboard, BackendError> {
        debug!("Loading dashboard for user {}", user.user_id);

        let (stats, groups, actions_to_validate, (pending_actions, pending_co2)) = tokio::try_join!(
            self.progress_stats(user.user_id),
            self.groups(user.user_id),
            self.actions_to_validate(user),
            self.pending_actions(user.user_id),
        )?;

        info!(
            "Dashboard loaded: {} groups, {} to validate, {} pending",
            groups.len(),
            actions_to_validate,
            pending_actions.len()
        );

        Ok(Dashboard {
            user: Some(user.clone()),
            stats,
            groups,
            actions_to_validate,
            pending_actions,
            pending_co2,
        })
    }
}
