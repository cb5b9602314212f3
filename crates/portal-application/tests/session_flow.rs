mod common;

use common::{MockApi, RecordingNotifier, login_ok, stored_session};
use portal_application::PortalUseCase;
use portal_application::notices::{CREDENTIALS_REQUIRED, LOGIN_FAILED_TITLE, SESSION_EXPIRED};
use portal_core::PortalError;
use portal_core::dashboard::{DashboardState, Section};
use portal_core::notifier::NoticeLevel;
use portal_core::session::{CredentialStore, TOKEN_KEY, USER_KEY};
use portal_core::user::Role;
use portal_infrastructure::MemoryCredentialStore;
use std::sync::Arc;

#[tokio::test]
async fn test_restore_enters_dashboard_without_network() {
    let api = Arc::new(MockApi::default());
    let notifier = Arc::new(RecordingNotifier::default());
    let mut portal = PortalUseCase::new(stored_session(Role::Teacher), api.clone(), notifier.clone());

    assert!(portal.init().unwrap());
    assert_eq!(
        portal.state(),
        DashboardState::Dashboard {
            active: Section::Iep
        }
    );
    let dashboard = portal.view().dashboard.as_ref().unwrap();
    assert_eq!(dashboard.user_name, "A");
    assert_eq!(dashboard.role_label, "教師");
    assert!(api.calls().is_empty());
    assert!(notifier.shown().is_empty());
}

#[tokio::test]
async fn test_init_without_session_stays_logged_out() {
    let api = Arc::new(MockApi::default());
    let mut portal = PortalUseCase::new(
        Arc::new(MemoryCredentialStore::new()),
        api.clone(),
        Arc::new(RecordingNotifier::default()),
    );

    assert!(!portal.init().unwrap());
    assert_eq!(portal.state(), DashboardState::LoggedOut);
    assert!(portal.view().dashboard.is_none());
}

#[tokio::test]
async fn test_login_with_empty_password_sends_nothing() {
    let api = Arc::new(MockApi::default());
    let notifier = Arc::new(RecordingNotifier::default());
    let mut portal = PortalUseCase::new(
        Arc::new(MemoryCredentialStore::new()),
        api.clone(),
        notifier.clone(),
    );

    let err = portal.login("amy", "").await.unwrap_err();
    assert!(err.is_validation());
    assert!(api.calls().is_empty());
    assert_eq!(portal.state(), DashboardState::LoggedOut);

    let notices = notifier.notices();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].level, NoticeLevel::Warning);
    assert_eq!(notices[0].text, CREDENTIALS_REQUIRED);
}

#[tokio::test]
async fn test_login_persists_session_and_greets() {
    let api = Arc::new(MockApi::default());
    *api.login.lock().unwrap() = login_ok(Role::Therapist);
    let store = Arc::new(MemoryCredentialStore::new());
    let notifier = Arc::new(RecordingNotifier::default());
    let mut portal = PortalUseCase::new(store.clone(), api.clone(), notifier.clone());

    portal.login("  wang ", "secret").await.unwrap();

    assert_eq!(api.calls(), vec!["login wang".to_string()]);
    assert_eq!(store.get(TOKEN_KEY).unwrap().as_deref(), Some("t1"));
    assert!(store.get(USER_KEY).unwrap().is_some());
    assert_eq!(portal.context().unwrap().user.role, Role::Therapist);
    assert_eq!(portal.state().active_section(), Some(Section::Iep));

    let notices = notifier.notices();
    assert_eq!(notices[0].level, NoticeLevel::Success);
    assert_eq!(notices[0].text, "歡迎回來，治療師 A");
}

#[tokio::test]
async fn test_rejected_login_shows_server_message() {
    let api = Arc::new(MockApi::default());
    let notifier = Arc::new(RecordingNotifier::default());
    let store = Arc::new(MemoryCredentialStore::new());
    let mut portal = PortalUseCase::new(store.clone(), api.clone(), notifier.clone());

    let err = portal.login("amy", "wrong").await.unwrap_err();
    assert_eq!(err, PortalError::rejected(401, "帳號或密碼錯誤"));
    assert_eq!(portal.state(), DashboardState::LoggedOut);
    assert!(store.is_empty());

    let notices = notifier.notices();
    assert_eq!(notices[0].title, LOGIN_FAILED_TITLE);
    assert_eq!(notices[0].text, "帳號或密碼錯誤");
}

#[tokio::test]
async fn test_logout_clears_store_and_view() {
    let store = stored_session(Role::Teacher);
    let mut portal = PortalUseCase::new(
        store.clone(),
        Arc::new(MockApi::default()),
        Arc::new(RecordingNotifier::default()),
    );
    portal.init().unwrap();

    portal.logout().unwrap();
    assert!(store.is_empty());
    assert!(portal.context().is_none());
    assert_eq!(portal.state(), DashboardState::LoggedOut);
    assert!(portal.view().dashboard.is_none());
}

#[tokio::test]
async fn test_unauthorized_response_logs_out() {
    let api = Arc::new(MockApi::default());
    *api.messages.lock().unwrap() = Err(PortalError::Unauthorized);
    let store = stored_session(Role::Parents);
    let notifier = Arc::new(RecordingNotifier::default());
    let mut portal = PortalUseCase::new(store.clone(), api.clone(), notifier.clone());
    portal.init().unwrap();

    let err = portal.show_section(Section::Messages).await.unwrap_err();
    assert_eq!(err, PortalError::Unauthorized);
    assert_eq!(portal.state(), DashboardState::LoggedOut);
    assert!(store.is_empty());
    assert_eq!(notifier.notices()[0].text, SESSION_EXPIRED);
}

#[tokio::test]
async fn test_actions_require_login() {
    let api = Arc::new(MockApi::default());
    let mut portal = PortalUseCase::new(
        Arc::new(MemoryCredentialStore::new()),
        api.clone(),
        Arc::new(RecordingNotifier::default()),
    );

    assert_eq!(
        portal.show_section(Section::Records).await,
        Err(PortalError::NotLoggedIn)
    );
    portal.set_input("hello");
    assert_eq!(portal.send_message().await, Err(PortalError::NotLoggedIn));
    assert!(api.calls().is_empty());
}
