#![allow(dead_code)]

use async_trait::async_trait;
use portal_core::api::{LoginResponse, PortalApi};
use portal_core::message::{EntityId, Message};
use portal_core::notifier::{Notice, Notifier};
use portal_core::record::Record;
use portal_core::session::{SessionToken, TOKEN_KEY, USER_KEY};
use portal_core::user::{Role, User};
use portal_core::{PortalError, Result};
use portal_infrastructure::MemoryCredentialStore;
use std::sync::{Arc, Mutex};

/// Scripted API. Every call is recorded by name; responses are cloned from
/// the configured results.
pub struct MockApi {
    pub calls: Mutex<Vec<String>>,
    pub login: Mutex<Result<LoginResponse>>,
    pub messages: Mutex<Result<Vec<Message>>>,
    pub records: Mutex<Result<Vec<Record>>>,
    pub summary: Mutex<Result<String>>,
    pub write: Mutex<Result<()>>,
}

impl Default for MockApi {
    fn default() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            login: Mutex::new(Err(PortalError::rejected(401, "帳號或密碼錯誤"))),
            messages: Mutex::new(Ok(Vec::new())),
            records: Mutex::new(Ok(Vec::new())),
            summary: Mutex::new(Ok(String::new())),
            write: Mutex::new(Ok(())),
        }
    }
}

impl MockApi {
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, name: &str) -> usize {
        self.calls().iter().filter(|c| c.starts_with(name)).count()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl PortalApi for MockApi {
    async fn login(&self, username: &str, _password: &str) -> Result<LoginResponse> {
        self.record(format!("login {username}"));
        self.login.lock().unwrap().clone()
    }

    async fn list_messages(&self) -> Result<Vec<Message>> {
        self.record("list_messages".to_string());
        self.messages.lock().unwrap().clone()
    }

    async fn post_message(&self, text: &str) -> Result<()> {
        self.record(format!("post_message {text}"));
        self.write.lock().unwrap().clone()
    }

    async fn message_summary(&self) -> Result<String> {
        self.record("message_summary".to_string());
        self.summary.lock().unwrap().clone()
    }

    async fn list_records(&self) -> Result<Vec<Record>> {
        self.record("list_records".to_string());
        self.records.lock().unwrap().clone()
    }

    async fn create_record(&self, content: &str) -> Result<()> {
        self.record(format!("create_record {content}"));
        self.write.lock().unwrap().clone()
    }

    async fn reply_record(&self, id: &EntityId, reply: &str) -> Result<()> {
        self.record(format!("reply_record {id} {reply}"));
        self.write.lock().unwrap().clone()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Shown {
    Notice(Notice),
    Busy(String),
    CloseBusy,
}

#[derive(Default)]
pub struct RecordingNotifier {
    pub shown: Mutex<Vec<Shown>>,
}

impl RecordingNotifier {
    pub fn shown(&self) -> Vec<Shown> {
        self.shown.lock().unwrap().clone()
    }

    pub fn notices(&self) -> Vec<Notice> {
        self.shown()
            .into_iter()
            .filter_map(|s| match s {
                Shown::Notice(n) => Some(n),
                _ => None,
            })
            .collect()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notice: Notice) {
        self.shown.lock().unwrap().push(Shown::Notice(notice));
    }

    fn busy(&self, title: &str, _text: &str) {
        self.shown.lock().unwrap().push(Shown::Busy(title.to_string()));
    }

    fn close_busy(&self) {
        self.shown.lock().unwrap().push(Shown::CloseBusy);
    }
}

pub fn user(role: Role) -> User {
    User {
        id: EntityId::Number(1),
        name: "A".to_string(),
        role,
    }
}

pub fn login_ok(role: Role) -> Result<LoginResponse> {
    Ok(LoginResponse {
        token: SessionToken::new("t1"),
        user: user(role),
    })
}

/// A store holding a persisted session for `role`.
pub fn stored_session(role: Role) -> Arc<MemoryCredentialStore> {
    let raw_user = serde_json::to_string(&user(role)).unwrap();
    Arc::new(MemoryCredentialStore::with_entries([
        (TOKEN_KEY, "t1"),
        (USER_KEY, raw_user.as_str()),
    ]))
}

pub fn record(id: i64, reply: Option<&str>) -> Record {
    Record {
        id: EntityId::Number(id),
        date: "2024-05-01".to_string(),
        content: "專注力進步".to_string(),
        therapist_name: "Wang".to_string(),
        teacher_reply: reply.map(str::to_string),
    }
}
