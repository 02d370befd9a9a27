use commit2act::ui::core::{Action, Screen, TaskManager};
use commit2act::ui::LayoutManager;
use ratatui::layout::Rect;

#[test]
fn test_screen_cycle() {
    assert_eq!(Screen::Dashboard.next(), Screen::Actions);
    assert_eq!(Screen::Actions.next(), Screen::Dashboard);
    assert_eq!(Screen::from_name("actions"), Screen::Actions);
    assert_eq!(Screen::from_name("anything"), Screen::Dashboard);
}

#[test]
fn test_action_session() {
    assert_eq!(Action::RefreshData.session(), None);
    let loaded = Action::ActionItemsLoaded {
        session: 4,
        items: vec![],
    };
    assert_eq!(loaded.session(), Some(4));
}

#[tokio::test]
async fn test_task_manager_starts_empty() {
    let (mut manager, _rx) = TaskManager::new();
    assert_eq!(manager.task_count(), 0);
    assert_eq!(manager.cancel_session(1), 0);
    assert_eq!(manager.cleanup_finished_tasks(), 0);
}

#[test]
fn test_centered_rect_lines() {
    let area = Rect::new(0, 0, 100, 50);
    let popup = LayoutManager::centered_rect_lines(50, 10, area);
    assert_eq!(popup.height, 10);
    assert_eq!(popup.width, 50);
}
