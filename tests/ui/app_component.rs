use crate::mock_backend::{action, stats, user, MockBackend};
use commit2act::backend::{ActionItem, Backend, UserRole};
use commit2act::config::Config;
use commit2act::logger::Logger;
use commit2act::ui::core::{Action, DialogType, EventType, Screen};
use commit2act::ui::AppComponent;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::sync::Arc;
use tokio::time::{sleep, Duration};

fn key(code: KeyCode) -> EventType {
    EventType::Key(KeyEvent::new(code, KeyModifiers::NONE))
}

fn backend() -> Arc<MockBackend> {
    let mock = MockBackend {
        user_stats: Some(stats(3, 100.0, 10.0)),
        ..MockBackend::default()
    }
    .with_action(
        action(7, "Recycle", &["bottle"]),
        vec![ActionItem::new("Bottle", "Plastic bottle", "12.5")],
    )
    .with_action(action(8, "Cycle", &["bike"]), vec![]);
    Arc::new(mock)
}

fn app(backend: Arc<MockBackend>) -> AppComponent {
    let backend: Arc<dyn Backend> = backend;
    AppComponent::new(backend, user(3, UserRole::Admin), &Config::default(), Logger::new())
}

/// Feed background results back into the app until no task is left.
async fn settle(app: &mut AppComponent) {
    for _ in 0..100 {
        for action in app.process_background_actions() {
            app.handle_app_action(action);
        }
        if app.active_task_count() == 0 {
            break;
        }
        sleep(Duration::from_millis(5)).await;
    }
    for action in app.process_background_actions() {
        app.handle_app_action(action);
    }
}

#[tokio::test]
async fn test_starts_on_configured_screen() {
    let app = app(backend());
    assert_eq!(app.screen(), Screen::Dashboard);
    assert!(!app.should_quit());
}

#[tokio::test]
async fn test_open_edit_and_save_action() {
    let mock = backend();
    let mut app = app(Arc::clone(&mock));
    app.trigger_initial_load();
    settle(&mut app).await;

    app.handle_event(key(KeyCode::Tab));
    assert_eq!(app.screen(), Screen::Actions);

    app.handle_event(key(KeyCode::Enter));
    settle(&mut app).await;
    let dialog = app.action_dialog().expect("dialog open");
    assert_eq!(dialog.form().committed().action_id, 7);
    assert!(dialog.form().items_loaded());

    app.handle_event(key(KeyCode::Char('e')));
    app.handle_event(key(KeyCode::Char('!')));
    app.handle_event(EventType::Key(KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL)));
    settle(&mut app).await;

    let updates = mock.updates.lock().unwrap();
    assert_eq!(updates.len(), 1);
    assert_eq!(updates[0].action_name, "Recycle!");
    assert_eq!(
        app.action_dialog().unwrap().form().committed().action_name,
        "Recycle!"
    );
    assert!(app.info_message().is_some());
}

#[tokio::test]
async fn test_results_for_closed_sessions_are_discarded() {
    let mut app = app(backend());
    app.trigger_initial_load();
    settle(&mut app).await;

    app.handle_event(key(KeyCode::Tab));
    app.handle_event(key(KeyCode::Enter));
    let session = app.action_dialog().unwrap().session();
    app.handle_event(key(KeyCode::Esc));
    assert!(app.action_dialog().is_none());

    app.handle_app_action(Action::ActionItemsLoaded {
        session,
        items: vec![ActionItem::new("Late", "late", "1")],
    });
    assert!(app.action_dialog().is_none());
}

#[tokio::test]
async fn test_failed_save_shows_error_dialog() {
    let mock = backend();
    let mut app = app(Arc::clone(&mock));
    app.trigger_initial_load();
    settle(&mut app).await;

    app.handle_event(key(KeyCode::Tab));
    app.handle_event(key(KeyCode::Enter));
    settle(&mut app).await;
    app.handle_event(key(KeyCode::Char('e')));

    mock.fail("gateway timeout");
    app.handle_event(EventType::Key(KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL)));
    settle(&mut app).await;

    assert!(matches!(app.system_dialog(), Some(DialogType::Error(message)) if message.contains("gateway timeout")));
    assert!(app.action_dialog().unwrap().form().draft().is_some());

    // Any key dismisses the error; the draft is still there
    app.handle_event(key(KeyCode::Enter));
    assert!(app.system_dialog().is_none());
    assert!(app.action_dialog().unwrap().form().is_editing());
}

#[tokio::test]
async fn test_log_action_records_submission() {
    let mock = backend();
    let mut app = app(Arc::clone(&mock));
    app.trigger_initial_load();
    settle(&mut app).await;

    app.handle_event(key(KeyCode::Tab));
    app.handle_event(key(KeyCode::Char('l')));
    settle(&mut app).await;
    assert_eq!(app.submission_dialog().unwrap().action().action_id, 7);

    app.handle_event(key(KeyCode::Char('2')));
    app.handle_event(key(KeyCode::Enter));
    settle(&mut app).await;

    let submissions = mock.submissions.lock().unwrap();
    assert_eq!(submissions.len(), 1);
    assert_eq!(submissions[0].action_id, 7);
    assert_eq!(submissions[0].user_id, 3);
    assert_eq!(submissions[0].g_co2_saved, 25.0);
    assert!(!submissions[0].is_validated);
    assert!(app.submission_dialog().is_none());
    assert!(app.info_message().is_some());
}

#[tokio::test]
async fn test_failed_log_keeps_form_open() {
    let mock = backend();
    let mut app = app(Arc::clone(&mock));
    app.trigger_initial_load();
    settle(&mut app).await;

    app.handle_event(key(KeyCode::Tab));
    app.handle_event(key(KeyCode::Char('l')));
    settle(&mut app).await;
    app.handle_event(key(KeyCode::Char('1')));

    mock.fail("gateway timeout");
    app.handle_event(key(KeyCode::Enter));
    settle(&mut app).await;

    assert!(matches!(app.system_dialog(), Some(DialogType::Error(message)) if message.contains("gateway timeout")));
    let dialog = app.submission_dialog().expect("form still open");
    assert!(!dialog.is_submitting());
    assert!(mock.submissions.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_quit_key() {
    let mut app = app(backend());
    app.handle_event(key(KeyCode::Char('q')));
    assert!(app.should_quit());
}
