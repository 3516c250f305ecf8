//! In-memory repository doubles and request helpers for router tests

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode, header},
};
use chrono::Utc;
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

use messages::{
    models::{
        message::{Message, NewMessage, UpdateMessage},
        user::{NewUser, User},
    },
    repositories::{MessageRepository, UserRepository},
    routes::create_router,
    state::AppState,
};

/// Message store kept in a vector, in insertion order
#[derive(Default)]
pub struct InMemoryMessageRepository {
    messages: Mutex<Vec<Message>>,
}

impl InMemoryMessageRepository {
    pub fn messages(&self) -> Vec<Message> {
        self.messages.lock().unwrap().clone()
    }
}

#[async_trait]
impl MessageRepository for InMemoryMessageRepository {
    async fn create(&self, new_message: &NewMessage) -> Result<Message> {
        let message = Message {
            id: Uuid::new_v4(),
            text: new_message.text.clone(),
            user: new_message.user.clone(),
            timestamp: Utc::now(),
        };
        self.messages.lock().unwrap().push(message.clone());
        Ok(message)
    }

    async fn list(&self) -> Result<Vec<Message>> {
        Ok(self.messages.lock().unwrap().clone())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Message>> {
        let messages = self.messages.lock().unwrap();
        Ok(messages.iter().find(|m| m.id == id).cloned())
    }

    async fn update(&self, id: Uuid, changes: &UpdateMessage) -> Result<Option<Message>> {
        let mut messages = self.messages.lock().unwrap();
        let Some(message) = messages.iter_mut().find(|m| m.id == id) else {
            return Ok(None);
        };
        if let Some(text) = &changes.text {
            message.text = text.clone();
        }
        if let Some(user) = &changes.user {
            message.user = user.clone();
        }
        Ok(Some(message.clone()))
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        let mut messages = self.messages.lock().unwrap();
        let before = messages.len();
        messages.retain(|m| m.id != id);
        Ok(messages.len() < before)
    }
}

/// User store whose check-and-insert happens under one lock
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: Mutex<Vec<User>>,
}

impl InMemoryUserRepository {
    pub fn users(&self) -> Vec<User> {
        self.users.lock().unwrap().clone()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create_if_email_absent(&self, new_user: &NewUser) -> Result<Option<User>> {
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|u| u.email == new_user.email) {
            return Ok(None);
        }
        let user = User {
            id: Uuid::new_v4(),
            username: new_user.username.clone(),
            email: new_user.email.clone(),
            password_hash: new_user.password_hash.clone(),
            created_at: Utc::now(),
        };
        users.push(user.clone());
        Ok(Some(user))
    }
}

/// Store that is always unreachable
pub struct UnreachableStore;

const UNREACHABLE: &str = "connection refused: store at 10.0.0.7 unreachable";

#[async_trait]
impl MessageRepository for UnreachableStore {
    async fn create(&self, _: &NewMessage) -> Result<Message> {
        Err(anyhow!(UNREACHABLE))
    }

    async fn list(&self) -> Result<Vec<Message>> {
        Err(anyhow!(UNREACHABLE))
    }

    async fn find_by_id(&self, _: Uuid) -> Result<Option<Message>> {
        Err(anyhow!(UNREACHABLE))
    }

    async fn update(&self, _: Uuid, _: &UpdateMessage) -> Result<Option<Message>> {
        Err(anyhow!(UNREACHABLE))
    }

    async fn delete(&self, _: Uuid) -> Result<bool> {
        Err(anyhow!(UNREACHABLE))
    }
}

#[async_trait]
impl UserRepository for UnreachableStore {
    async fn create_if_email_absent(&self, _: &NewUser) -> Result<Option<User>> {
        Err(anyhow!(UNREACHABLE))
    }
}

pub fn unreachable_message() -> &'static str {
    UNREACHABLE
}

pub struct TestApp {
    pub router: Router,
    pub messages: Arc<InMemoryMessageRepository>,
    pub users: Arc<InMemoryUserRepository>,
}

impl TestApp {
    pub fn new() -> Self {
        let messages = Arc::new(InMemoryMessageRepository::default());
        let users = Arc::new(InMemoryUserRepository::default());
        let router = create_router(AppState::new(messages.clone(), users.clone()));
        Self {
            router,
            messages,
            users,
        }
    }

    pub async fn send(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        send(&self.router, method, uri, body).await
    }
}

pub fn unreachable_app() -> Router {
    let store = Arc::new(UnreachableStore);
    create_router(AppState::new(store.clone(), store))
}

pub async fn send(
    router: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    send_request(router, request).await
}

pub async fn send_request(router: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };

    (status, value)
}
