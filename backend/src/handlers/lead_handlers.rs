use std::sync::Arc;
use std::time::Duration;
use axum::{
    Json,
    extract::State,
    http::{HeaderMap, StatusCode, header::USER_AGENT},
};
use governor::{
    clock::Clock, middleware::NoOpMiddleware, state::keyed::DefaultKeyedStateStore, Quota,
    RateLimiter,
};
use nonzero_ext::nonzero;
use serde::Deserialize;
use serde_json::json;

use crate::{
    AppState,
    error::DeliveryError,
    estimator::funnel::estimate,
    handlers::calculator_handlers::funnel_error_response,
    models::funnel_models::FunnelInput,
    utils::format::{booking_url, BookingContact},
    utils::lead_delivery::LeadPayload,
};

/// How often idle emails are dropped from the submission limiter.
pub const LEAD_LIMITER_PRUNE_INTERVAL: Duration = Duration::from_secs(10 * 60);

/// 5 submissions per hour per email.
pub fn lead_quota() -> Quota {
    Quota::per_hour(nonzero!(5u32))
}

/// Drop every email whose limiter state is back to fresh. Returns the number
/// of emails still tracked.
pub fn prune_lead_limiter<C: Clock>(
    limiter: &RateLimiter<String, DefaultKeyedStateStore<String>, C, NoOpMiddleware<C::Instant>>,
) -> usize {
    limiter.retain_recent();
    limiter.shrink_to_fit();
    limiter.len()
}

#[derive(Deserialize)]
pub struct LeadRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub company: Option<String>,
    pub funnel: FunnelInput,
}

pub async fn submit_lead(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(lead_req): Json<LeadRequest>,
) -> Result<Json<serde_json::Value>, (StatusCode, Json<serde_json::Value>)> {
    let name = lead_req.name.trim();
    let email = lead_req.email.trim();
    if name.is_empty() || email.is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(json!({"error": "Name and email are required"}))
        ));
    }

    // Invalid funnels are rejected without spending quota
    let result = estimate(&lead_req.funnel).map_err(funnel_error_response)?;

    if state.lead_limiter.check_key(&email.to_lowercase()).is_err() {
        tracing::warn!("Lead submission rate limit exceeded");
        return Err((
            StatusCode::TOO_MANY_REQUESTS,
            Json(json!({"error": "Too many submissions, try again later"})),
        ));
    }

    let user_agent = headers
        .get(USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");
    let company = lead_req.company.as_deref();
    let payload = LeadPayload::new(name, email, company, &lead_req.funnel, &result, user_agent);

    let booking_url = booking_url(
        &state.config.booking_path,
        result.total_recovered_revenue,
        BookingContact {
            name: Some(name),
            email: Some(email),
            company,
        },
    );

    // Delivery problems are never surfaced: the visitor always gets a success.
    let warning = match state.lead_sink.deliver(payload).await {
        Ok(()) => None,
        Err(e) => {
            tracing::error!("Lead webhook delivery failed: {}", e);
            sentry::capture_message(
                &format!("Lead webhook delivery failed: {}", e),
                sentry::Level::Error,
            );
            match e {
                DeliveryError::Status { .. } => Some("Webhook delivery pending"),
                DeliveryError::Transport(_) => Some("Processing in background"),
            }
        }
    };

    let mut body = json!({
        "success": true,
        "message": "Lead captured successfully",
        "booking_url": booking_url,
    });
    if let Some(warning) = warning {
        body["warning"] = json!(warning);
    }
    Ok(Json(body))
}
