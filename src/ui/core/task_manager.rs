use super::actions::{Action, DialogType, SessionId};
use crate::backend::{Backend, UpdateActionArgs, UserProfile};
use crate::constants::{ERROR_ACTIONS_FETCH_FAILED, ERROR_ACTION_ITEMS_FETCH_FAILED, ERROR_DASHBOARD_FETCH_FAILED};
use crate::dashboard::DashboardAggregator;
use crate::editor::SaveTicket;
use crate::submission::SubmissionDraft;
use log::{debug, error};
use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

pub type TaskId = u64;

#[derive(Debug)]
pub struct BackgroundTask {
    pub id: TaskId,
    pub handle: JoinHandle<()>,
    pub description: String,
    /// Dialog session the task is bound to; aborted when that dialog closes.
    pub session: Option<SessionId>,
    pub started_at: std::time::Instant,
}

/// Runs gateway calls off the UI loop and reports back through actions.
pub struct TaskManager {
    tasks: HashMap<TaskId, BackgroundTask>,
    next_task_id: TaskId,
    action_sender: mpsc::UnboundedSender<Action>,
}

impl TaskManager {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<Action>) {
        let (tx, rx) = mpsc::unbounded_channel();

        (
            Self {
                tasks: HashMap::new(),
                next_task_id: 1,
                action_sender: tx,
            },
            rx,
        )
    }

    fn spawn<Fut>(&mut self, description: String, session: Option<SessionId>, operation: Fut) -> TaskId
    where
        Fut: Future<Output = Action> + Send + 'static,
    {
        self.cleanup_finished_tasks();

        let task_id = self.next_task_id;
        self.next_task_id += 1;

        debug!("Spawning task {}: {}", task_id, description);
        let action_sender = self.action_sender.clone();
        let handle = tokio::spawn(async move {
            let action = operation.await;
            let _ = action_sender.send(action);
        });

        self.tasks.insert(
            task_id,
            BackgroundTask {
                id: task_id,
                handle,
                description,
                session,
                started_at: std::time::Instant::now(),
            },
        );
        task_id
    }

    /// Spawn the dashboard fan-out for `user`
    pub fn spawn_dashboard_load(&mut self, backend: Arc<dyn Backend>, user: UserProfile) -> TaskId {
        self.spawn("Loading dashboard".to_string(), None, async move {
            match DashboardAggregator::new(backend.as_ref()).load(&user).await {
                Ok(dashboard) => Action::DashboardLoaded(Box::new(dashboard)),
                Err(e) => {
                    error!("{}: {}", ERROR_DASHBOARD_FETCH_FAILED, e);
                    Action::ShowDialog(DialogType::Error(format!("{}: {}", ERROR_DASHBOARD_FETCH_FAILED, e)))
                }
            }
        })
    }

    /// Spawn loading of the action catalogue
    pub fn spawn_actions_load(&mut self, backend: Arc<dyn Backend>) -> TaskId {
        self.spawn("Loading actions".to_string(), None, async move {
            match backend.fetch_actions().await {
                Ok(actions) => Action::ActionsLoaded(actions),
                Err(e) => {
                    error!("{}: {}", ERROR_ACTIONS_FETCH_FAILED, e);
                    Action::ShowDialog(DialogType::Error(format!("{}: {}", ERROR_ACTIONS_FETCH_FAILED, e)))
                }
            }
        })
    }

    /// Spawn the item fetch of a freshly opened action dialog
    pub fn spawn_item_fetch(&mut self, backend: Arc<dyn Backend>, session: SessionId, action_id: i64) -> TaskId {
        let description = format!("Loading items of action {}", action_id);
        self.spawn(description, Some(session), async move {
            match backend.fetch_action_items(action_id).await {
                Ok(items) => Action::ActionItemsLoaded { session, items },
                Err(e) => {
                    error!("{}: {}", ERROR_ACTION_ITEMS_FETCH_FAILED, e);
                    Action::ShowDialog(DialogType::Error(format!("{}: {}", ERROR_ACTION_ITEMS_FETCH_FAILED, e)))
                }
            }
        })
    }

    pub fn spawn_save(
        &mut self,
        backend: Arc<dyn Backend>,
        session: SessionId,
        ticket: SaveTicket,
        args: UpdateActionArgs,
    ) -> TaskId {
        let description = format!("Saving action {}", args.action_id);
        self.spawn(description, Some(session), async move {
            let result = backend.update_action(args).await;
            Action::ActionSaved { session, ticket, result }
        })
    }

    pub fn spawn_delete(&mut self, backend: Arc<dyn Backend>, session: SessionId, ticket: SaveTicket, action_id: i64) -> TaskId {
        let description = format!("Deleting action {}", action_id);
        self.spawn(description, Some(session), async move {
            let result = backend.delete_action(action_id).await;
            Action::ActionDeleted { session, ticket, result }
        })
    }

    /// Spawn `createSubmittedAction` for a finished submission dialog
    pub fn spawn_submit(
        &mut self,
        backend: Arc<dyn Backend>,
        session: SessionId,
        draft: SubmissionDraft,
        user: UserProfile,
    ) -> TaskId {
        let description = format!("Logging action {}", draft.action_id);
        self.spawn(description, Some(session), async move {
            let result = draft.submit(backend.as_ref(), &user).await;
            Action::ActionSubmitted { session, result }
        })
    }

    /// Abort everything bound to a dialog session
    pub fn cancel_session(&mut self, session: SessionId) -> usize {
        let ids: Vec<TaskId> = self
            .tasks
            .values()
            .filter(|task| task.session == Some(session))
            .map(|task| task.id)
            .collect();

        for id in &ids {
            if let Some(task) = self.tasks.remove(id) {
                debug!("Aborting task {}: {}", task.id, task.description);
                task.handle.abort();
            }
        }
        ids.len()
    }

    /// Forget finished tasks
    pub fn cleanup_finished_tasks(&mut self) -> usize {
        let before = self.tasks.len();
        self.tasks.retain(|_, task| !task.handle.is_finished());
        before - self.tasks.len()
    }

    /// Cancel all running tasks
    pub fn cancel_all_tasks(&mut self) {
        for (_, task) in self.tasks.drain() {
            task.handle.abort();
        }
    }

    /// Get the number of active tasks
    pub fn task_count(&self) -> usize {
        self.tasks.len()
    }

    /// Descriptions of tasks running for longer than `threshold`
    pub fn long_running(&self, threshold: std::time::Duration) -> Vec<&str> {
        self.tasks
            .values()
            .filter(|task| task.started_at.elapsed() > threshold)
            .map(|task| task.description.as_str())
            .collect()
    }
}

impl Drop for TaskManager {
    fn drop(&mut self) {
        // Cancel all tasks when the manager is dropped
        self.cancel_all_tasks();
    }
}
