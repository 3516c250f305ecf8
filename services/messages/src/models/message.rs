//! Message models for the messages service

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

/// Stored message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// Store-assigned identifier
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub text: Option<String>,
    /// Author name, not a reference to a registered user
    pub user: Option<String>,
    /// Set by the store on insertion, never updated
    pub timestamp: DateTime<Utc>,
}

/// Request body for message creation
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewMessage {
    pub text: Option<String>,
    pub user: Option<String>,
}

/// Request body for message updates
///
/// The outer `Option` is `None` when the key is absent, which keeps the
/// stored value. `Some(None)` comes from an explicit `null` and clears it.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateMessage {
    #[serde(default, deserialize_with = "present")]
    pub text: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub user: Option<Option<String>>,
}

/// Wraps whatever the key held, `null` included, so that only a missing key
/// falls back to the `default` of `None`
fn present<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}
