//! Message repository for database operations

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::models::message::{Message, NewMessage, UpdateMessage};

/// Storage operations on messages
#[async_trait]
pub trait MessageRepository: Send + Sync {
    /// Insert a message; the store assigns the identifier and timestamp
    async fn create(&self, new_message: &NewMessage) -> Result<Message>;

    /// Every stored message, in store order
    async fn list(&self) -> Result<Vec<Message>>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Message>>;

    /// Overwrite the fields present in `changes` and return the updated
    /// message, or `None` if no message has this identifier
    async fn update(&self, id: Uuid, changes: &UpdateMessage) -> Result<Option<Message>>;

    /// Remove a message, returning whether it existed
    async fn delete(&self, id: Uuid) -> Result<bool>;
}

/// `text` and `user` are kept as UTF-8 bytes so that NUL survives
#[derive(FromRow)]
struct MessageRow {
    id: Uuid,
    text: Option<Vec<u8>>,
    user: Option<Vec<u8>>,
    timestamp: DateTime<Utc>,
}

impl TryFrom<MessageRow> for Message {
    type Error = anyhow::Error;

    fn try_from(row: MessageRow) -> Result<Self> {
        Ok(Message {
            id: row.id,
            text: decode(row.text).context("message text is not UTF-8")?,
            user: decode(row.user).context("message user is not UTF-8")?,
            timestamp: row.timestamp,
        })
    }
}

fn decode(field: Option<Vec<u8>>) -> Result<Option<String>> {
    Ok(field.map(String::from_utf8).transpose()?)
}

fn encode(field: Option<&String>) -> Option<&[u8]> {
    field.map(|value| value.as_bytes())
}

/// PostgreSQL-backed message repository
#[derive(Clone)]
pub struct PgMessageRepository {
    pool: PgPool,
}

impl PgMessageRepository {
    /// Create a new message repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MessageRepository for PgMessageRepository {
    async fn create(&self, new_message: &NewMessage) -> Result<Message> {
        let row = sqlx::query_as::<_, MessageRow>(
            r#"
            INSERT INTO messages (text, "user")
            VALUES ($1, $2)
            RETURNING id, text, "user", "timestamp"
            "#,
        )
        .bind(encode(new_message.text.as_ref()))
        .bind(encode(new_message.user.as_ref()))
        .fetch_one(&self.pool)
        .await?;

        row.try_into()
    }

    async fn list(&self) -> Result<Vec<Message>> {
        let rows = sqlx::query_as::<_, MessageRow>(
            r#"
            SELECT id, text, "user", "timestamp"
            FROM messages
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Message::try_from).collect()
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Message>> {
        let row = sqlx::query_as::<_, MessageRow>(
            r#"
            SELECT id, text, "user", "timestamp"
            FROM messages
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Message::try_from).transpose()
    }

    async fn update(&self, id: Uuid, changes: &UpdateMessage) -> Result<Option<Message>> {
        // $2 and $4 say whether the key was present; a present null clears
        let row = sqlx::query_as::<_, MessageRow>(
            r#"
            UPDATE messages
            SET text = CASE WHEN $2 THEN $3 ELSE text END,
                "user" = CASE WHEN $4 THEN $5 ELSE "user" END
            WHERE id = $1
            RETURNING id, text, "user", "timestamp"
            "#,
        )
        .bind(id)
        .bind(changes.text.is_some())
        .bind(encode(changes.text.as_ref().and_then(Option::as_ref)))
        .bind(changes.user.is_some())
        .bind(encode(changes.user.as_ref().and_then(Option::as_ref)))
        .fetch_optional(&self.pool)
        .await?;

        row.map(Message::try_from).transpose()
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM messages
            WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
