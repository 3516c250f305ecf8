//! API models for request and response payloads

use serde::{Deserialize, Serialize};

pub mod message;
pub mod user;

/// Confirmation payload for operations that do not echo a record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusMessage {
    pub message: String,
}

impl StatusMessage {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
