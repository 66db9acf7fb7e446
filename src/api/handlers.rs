//! Request handlers
//!
//! The chat handler is the request orchestrator: it resolves the caller
//! identity, checks the quota, invokes the upstream model, records usage,
//! and shapes the response. All errors are converted to a caller-visible
//! status here; nothing escapes unhandled.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::api::server::AppState;
use crate::error::GatewayError;

/// Response with error details
#[derive(Serialize)]
pub struct ApiError {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

type HandlerError = (StatusCode, Json<ApiError>);

/// Convert a gateway error into a caller-visible status and body.
///
/// Internal causes (upstream failures, store errors) are logged here and
/// not echoed to the caller.
fn error_response(err: GatewayError) -> HandlerError {
    let (status, error, message) = match err {
        GatewayError::Validation(msg) => (StatusCode::BAD_REQUEST, msg, None),
        GatewayError::QuotaExceeded(reason) => (
            StatusCode::TOO_MANY_REQUESTS,
            "Usage limit exceeded".to_string(),
            Some(reason),
        ),
        GatewayError::Upstream(cause) => {
            error!("Upstream completion call failed: {}", cause);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to generate completion".to_string(),
                None,
            )
        }
        GatewayError::UserNotFound(user_id) => {
            info!("Upgrade requested for unknown user {}", user_id);
            (StatusCode::NOT_FOUND, "User not found".to_string(), None)
        }
        GatewayError::Store(e) => {
            error!("Usage store error: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                "Usage store unavailable".to_string(),
                None,
            )
        }
        GatewayError::Parse(msg) => {
            error!("Usage store returned a malformed record: {}", msg);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                "Usage store unavailable".to_string(),
                None,
            )
        }
        GatewayError::Config(msg) => {
            error!("Configuration error surfaced at request time: {}", msg);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal error".to_string(),
                None,
            )
        }
    };

    (status, Json(ApiError { error, message }))
}

/// Chat request
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    #[serde(default)]
    pub system_prompt: Option<String>,
    #[serde(default)]
    pub user_message: Option<String>,
    #[serde(default)]
    pub user_id: Option<String>,
}

/// Chat response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatResponse {
    pub reply: String,
    pub usage: UsageSummary,
}

/// Usage block attached to a successful chat response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageSummary {
    pub daily_count: i64,
    pub is_premium: bool,
}

/// POST /chat - quota-gated completion
pub async fn chat(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, HandlerError> {
    let system_prompt = payload.system_prompt.filter(|s| !s.is_empty());
    let user_message = payload.user_message.filter(|s| !s.is_empty());

    let (system_prompt, user_message) = match (system_prompt, user_message) {
        (Some(sp), Some(um)) => (sp, um),
        _ => {
            return Err(error_response(GatewayError::Validation(
                "Missing systemPrompt or userMessage".to_string(),
            )))
        }
    };

    // A request without a userId gets a fresh synthesized identity, i.e.
    // its own quota bucket. Anonymous callers are therefore effectively
    // unmetered; see DESIGN.md.
    let identity = payload
        .user_id
        .filter(|id| !id.is_empty())
        .unwrap_or_else(|| format!("temp_{}", Uuid::new_v4()));

    let record = state.store.load(&identity).await.map_err(error_response)?;

    // Check-then-increment is not transactional: concurrent requests for
    // the same user may both pass and overshoot the limit slightly. The
    // limit is soft by design.
    let decision = state.policy.evaluate(&record);
    if !decision.allowed {
        info!(
            "Quota denied for {} at {}/{}",
            identity, record.daily_count, decision.limit
        );
        let reason = decision
            .reason
            .unwrap_or_else(|| "Usage limit exceeded".to_string());
        return Err(error_response(GatewayError::QuotaExceeded(reason)));
    }

    let reply = match state
        .chat_model
        .complete(&system_prompt, &user_message)
        .await
    {
        Ok(text) => text,
        Err(err) => {
            return Err(error_response(GatewayError::Upstream(format!("{:#}", err))));
        }
    };

    // Usage accounting is best-effort relative to delivering the reply: a
    // failed increment or re-read only logs.
    if let Err(err) = state.ledger.increment(&identity).await {
        warn!("Failed to record usage for {}: {}", identity, err);
    }

    let usage = match state.store.load(&identity).await {
        Ok(fresh) => UsageSummary {
            daily_count: fresh.daily_count,
            is_premium: fresh.is_premium,
        },
        Err(err) => {
            warn!("Failed to re-read usage for {}: {}", identity, err);
            UsageSummary {
                daily_count: record.daily_count + 1,
                is_premium: record.is_premium,
            }
        }
    };

    Ok(Json(ChatResponse { reply, usage }))
}

/// Usage query parameters
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageQuery {
    #[serde(default)]
    pub user_id: Option<String>,
}

/// Usage response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageResponse {
    pub user_id: String,
    pub daily_count: i64,
    pub daily_limit: i64,
    pub is_premium: bool,
    pub total_usage: i64,
    pub remaining_today: i64,
}

/// GET /usage?userId=... - current usage for a user
pub async fn usage(
    State(state): State<Arc<AppState>>,
    Query(query): Query<UsageQuery>,
) -> Result<Json<UsageResponse>, HandlerError> {
    let user_id = query.user_id.filter(|id| !id.is_empty()).ok_or_else(|| {
        error_response(GatewayError::Validation("Missing userId".to_string()))
    })?;

    let record = state.store.load(&user_id).await.map_err(error_response)?;
    let limit = state.policy.limit_for(&record);

    Ok(Json(UsageResponse {
        user_id: record.user_id.clone(),
        daily_count: record.daily_count,
        daily_limit: limit,
        is_premium: record.is_premium,
        total_usage: record.total_usage,
        remaining_today: record.remaining_today(limit),
    }))
}

/// Upgrade request
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpgradeRequest {
    #[serde(default)]
    pub user_id: Option<String>,
}

/// Upgrade response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpgradeResponse {
    pub message: String,
    pub is_premium: bool,
}

/// POST /upgrade - set the premium flag on a user
pub async fn upgrade(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<UpgradeRequest>,
) -> Result<Json<UpgradeResponse>, HandlerError> {
    let user_id = payload.user_id.filter(|id| !id.is_empty()).ok_or_else(|| {
        error_response(GatewayError::Validation("Missing userId".to_string()))
    })?;

    state
        .store
        .set_premium(&user_id)
        .await
        .map_err(error_response)?;

    info!("User {} upgraded to premium", user_id);

    Ok(Json(UpgradeResponse {
        message: "Successfully upgraded to premium".to_string(),
        is_premium: true,
    }))
}

/// Health check endpoint
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "chat-gateway",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
