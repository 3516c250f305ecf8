//! Messages service routes

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post, put},
};
use axum_extra::extract::WithRejection;
use serde_json::json;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::{
    error::{ApiError, ApiResult},
    models::{
        StatusMessage,
        message::{NewMessage, UpdateMessage},
        user::{NewUser, RegisterRequest},
    },
    password,
    state::AppState,
};

/// Create the router for the messages service
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/messages", post(create_message))
        .route("/messages", get(get_messages))
        .route("/messages/:id", get(get_message))
        .route("/messages/:id", put(update_message))
        .route("/messages/:id", delete(delete_message))
        .route("/register", post(register))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Malformed identifiers surface as internal errors, like an unreachable store
fn parse_message_id(raw: &str) -> ApiResult<Uuid> {
    Uuid::parse_str(raw).map_err(|e| {
        error!("Invalid message identifier {:?}: {}", raw, e);
        ApiError::InternalServerError
    })
}

/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "messages"
    }))
}

/// Create a new message
pub async fn create_message(
    State(state): State<AppState>,
    WithRejection(Json(payload), _): WithRejection<Json<NewMessage>, ApiError>,
) -> ApiResult<impl IntoResponse> {
    let message = state
        .message_repository
        .create(&payload)
        .await
        .map_err(|e| {
            error!("Failed to create message: {}", e);
            ApiError::InternalServerError
        })?;

    info!(id = %message.id, "Message created");
    Ok((StatusCode::CREATED, Json(message)))
}

/// Get all messages
pub async fn get_messages(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    let messages = state.message_repository.list().await.map_err(|e| {
        error!("Failed to retrieve messages: {}", e);
        ApiError::InternalServerError
    })?;

    Ok(Json(messages))
}

/// Get a message by ID
pub async fn get_message(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let id = parse_message_id(&id)?;

    let message = state
        .message_repository
        .find_by_id(id)
        .await
        .map_err(|e| {
            error!("Failed to retrieve message {}: {}", id, e);
            ApiError::InternalServerError
        })?
        .ok_or(ApiError::NotFound("Message"))?;

    Ok(Json(message))
}

/// Update the text and author of a message
pub async fn update_message(
    State(state): State<AppState>,
    Path(id): Path<String>,
    WithRejection(Json(payload), _): WithRejection<Json<UpdateMessage>, ApiError>,
) -> ApiResult<impl IntoResponse> {
    let id = parse_message_id(&id)?;

    let message = state
        .message_repository
        .update(id, &payload)
        .await
        .map_err(|e| {
            error!("Failed to update message {}: {}", id, e);
            ApiError::InternalServerError
        })?
        .ok_or(ApiError::NotFound("Message"))?;

    info!(id = %message.id, "Message updated");
    Ok(Json(message))
}

/// Delete a message by ID
pub async fn delete_message(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let id = parse_message_id(&id)?;

    let deleted = state.message_repository.delete(id).await.map_err(|e| {
        error!("Failed to delete message {}: {}", id, e);
        ApiError::InternalServerError
    })?;

    if deleted {
        info!(%id, "Message deleted");
        Ok(Json(StatusMessage::new("Message deleted successfully")))
    } else {
        Err(ApiError::NotFound("Message"))
    }
}

/// Register a new user
pub async fn register(
    State(state): State<AppState>,
    WithRejection(Json(payload), _): WithRejection<Json<RegisterRequest>, ApiError>,
) -> ApiResult<impl IntoResponse> {
    let password_hash = password::hash_password_blocking(payload.password)
        .await
        .map_err(|e| {
            error!("Failed to hash password: {}", e);
            ApiError::InternalServerError
        })?;

    let new_user = NewUser {
        username: payload.username,
        email: payload.email,
        password_hash,
    };

    let user = state
        .user_repository
        .create_if_email_absent(&new_user)
        .await
        .map_err(|e| {
            error!("Failed to register user: {}", e);
            ApiError::InternalServerError
        })?;

    match user {
        Some(user) => {
            info!(user_id = %user.id, "User registered");
            Ok((
                StatusCode::CREATED,
                Json(StatusMessage::new("User has been registered successfully")),
            ))
        }
        None => {
            warn!("Registration rejected, email already in use");
            Err(ApiError::Conflict("User already exists".to_string()))
        }
    }
}
