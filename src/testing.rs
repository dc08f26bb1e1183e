//! In-memory repositories and request helpers for handler tests.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{HeaderMap, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::util::ServiceExt;
use uuid::Uuid;

use crate::app::build_app;
use crate::auth::{
    repo::UserRepo,
    repo_types::{NewUser, User},
};
use crate::comments::{repo::CommentRepo, repo_types::Comment};
use crate::error::StoreError;
use crate::records::{
    repo::RecordRepo,
    repo_types::{IncidentRecord, WeatherRecord},
};
use crate::state::AppState;

#[derive(Default)]
pub struct MemoryStore {
    users: Mutex<Vec<User>>,
    comments: Mutex<Vec<Comment>>,
    incidents: Mutex<Vec<IncidentRecord>>,
    weather: Mutex<Vec<WeatherRecord>>,
    failure: Mutex<Option<String>>,
    blind_username_lookup: Mutex<bool>,
}

impl MemoryStore {
    /// Every later repository call fails with `message`.
    pub fn fail_with(&self, message: &str) {
        *self.failure.lock().unwrap() = Some(message.to_string());
    }

    /// Username lookups report nothing, so only the insert-time uniqueness
    /// check can catch a duplicate.
    pub fn hide_usernames_from_lookup(&self) {
        *self.blind_username_lookup.lock().unwrap() = true;
    }

    pub fn user_count(&self) -> usize {
        self.users.lock().unwrap().len()
    }

    pub fn comments(&self) -> Vec<Comment> {
        self.comments.lock().unwrap().clone()
    }

    pub fn seed_incidents(&self, rows: &[(&str, f64, i32)]) {
        let mut incidents = self.incidents.lock().unwrap();
        for (incident, amount, year) in rows {
            incidents.push(IncidentRecord {
                id: Uuid::new_v4(),
                incident: incident.to_string(),
                injury: "Fatal".into(),
                amount: *amount,
                total: *amount,
                year: *year,
            });
        }
    }

    pub fn seed_weather(&self, year: i32, amount: f64, metrics: Value) {
        self.weather.lock().unwrap().push(WeatherRecord {
            id: Uuid::new_v4(),
            year,
            amount,
            metrics: metrics.as_object().cloned().unwrap_or_default(),
        });
    }

    fn check(&self) -> Result<(), StoreError> {
        match self.failure.lock().unwrap().as_ref() {
            Some(message) => Err(StoreError::Backend(anyhow::anyhow!(message.clone()))),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl UserRepo for MemoryStore {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        self.check()?;
        if *self.blind_username_lookup.lock().unwrap() {
            return Ok(None);
        }
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|u| u.username == username).cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        self.check()?;
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|u| u.id == id).cloned())
    }

    async fn create(&self, new_user: NewUser) -> Result<User, StoreError> {
        self.check()?;
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|u| u.username == new_user.username) {
            return Err(StoreError::Duplicate);
        }
        let user = User {
            id: Uuid::new_v4(),
            username: new_user.username,
            password_hash: new_user.password_hash,
            is_staff: false,
            favourite: Vec::new(),
        };
        users.push(user.clone());
        Ok(user)
    }
}

#[async_trait]
impl CommentRepo for MemoryStore {
    async fn list(&self) -> Result<Vec<Comment>, StoreError> {
        self.check()?;
        Ok(self.comments.lock().unwrap().clone())
    }

    async fn insert(&self, comment: &Comment) -> Result<(), StoreError> {
        self.check()?;
        self.comments.lock().unwrap().push(comment.clone());
        Ok(())
    }
}

#[async_trait]
impl RecordRepo for MemoryStore {
    async fn all_incidents(&self) -> Result<Vec<IncidentRecord>, StoreError> {
        self.check()?;
        Ok(self.incidents.lock().unwrap().clone())
    }

    async fn weather_by_year(&self, year: i32) -> Result<Vec<WeatherRecord>, StoreError> {
        self.check()?;
        let weather = self.weather.lock().unwrap();
        Ok(weather.iter().filter(|w| w.year == year).cloned().collect())
    }
}

pub fn test_app_with(store: Arc<MemoryStore>) -> (Router, AppState) {
    let state = AppState::with_memory(store);
    (build_app(state.clone()), state)
}

pub fn test_app_state() -> (Router, AppState) {
    test_app_with(Arc::new(MemoryStore::default()))
}

pub fn test_app() -> (Router, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::default());
    let (app, _) = test_app_with(store.clone());
    (app, store)
}

pub async fn request_json(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value, HeaderMap) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("Authorization", format!("Bearer {token}"));
    }
    let req_body = match body {
        Some(body) => {
            builder = builder.header("Content-Type", "application/json");
            Body::from(body.to_string())
        }
        None => Body::empty(),
    };
    let req = builder.body(req_body).expect("request should build");

    let resp = app.clone().oneshot(req).await.expect("router is infallible");
    let status = resp.status();
    let headers = resp.headers().clone();
    let bytes = to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("body should read");
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| {
            Value::String(String::from_utf8_lossy(&bytes).into_owned())
        })
    };
    (status, value, headers)
}

/// Registers `username` and returns a fresh login token.
pub async fn register_and_login(app: &Router, username: &str, password: &str) -> String {
    let creds = json!({ "username": username, "password": password });
    let (status, _, _) =
        request_json(app, "POST", "/api/user/register", None, Some(creds.clone())).await;
    assert_eq!(status, StatusCode::OK, "register {username}");
    let (status, body, _) = request_json(app, "POST", "/api/user/login", None, Some(creds)).await;
    assert_eq!(status, StatusCode::OK, "login {username}");
    body["data"]["token"]
        .as_str()
        .expect("token in login response")
        .to_string()
}
