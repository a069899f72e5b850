use axum::{
    routing::{get, post},
    Router,
};
use governor::{RateLimiter, clock::DefaultClock, state::keyed::DefaultKeyedStateStore};
use tower_http::cors::{CorsLayer, AllowOrigin};
use tower_http::trace::{TraceLayer, DefaultMakeSpan, DefaultOnResponse};
use tracing::Level;
use std::sync::Arc;

pub mod handlers {
    pub mod calculator_handlers;
    pub mod lead_handlers;
}
pub mod utils {
    pub mod format;
    pub mod lead_delivery;
}
pub mod estimator {
    pub mod benchmarks;
    pub mod funnel;
    pub mod ratings;
}
pub mod models {
    pub mod funnel_models;
}
pub mod config;
pub mod error;
#[cfg(test)]
mod test_support;

use config::FunnelConfig;
use handlers::{calculator_handlers, lead_handlers};
use utils::lead_delivery::LeadSink;

pub use error::FunnelError;
pub use estimator::funnel::estimate;
pub use models::funnel_models::{FollowUpIntensity, FunnelInput, FunnelResult};

pub type EmailRateLimiter = RateLimiter<String, DefaultKeyedStateStore<String>, DefaultClock>;

pub struct AppState {
    pub config: FunnelConfig,
    pub lead_sink: Arc<dyn LeadSink>,
    /// One keyed limiter shared by every email; pruned by `prune_lead_limiter`.
    pub lead_limiter: EmailRateLimiter,
}

impl AppState {
    pub fn new(config: FunnelConfig, lead_sink: Arc<dyn LeadSink>) -> Self {
        Self {
            config,
            lead_sink,
            lead_limiter: RateLimiter::keyed(lead_handlers::lead_quota()),
        }
    }
}

async fn health_check() -> &'static str {
    "OK"
}

/// Public calculator API. Nothing here needs authentication; lead submission
/// is rate limited per email.
pub fn app(state: Arc<AppState>) -> Router {
    let frontend_origin = state.config.frontend_url.parse()
        .unwrap_or_else(|_| axum::http::HeaderValue::from_static("http://localhost:8080"));

    Router::new()
        .route("/api/health", get(health_check))
        .route("/api/calculate", post(calculator_handlers::calculate))
        .route("/api/submit-lead", post(lead_handlers::submit_lead))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO))
        )
        .layer(
            CorsLayer::new()
                .allow_methods([axum::http::Method::GET, axum::http::Method::POST, axum::http::Method::OPTIONS])
                .allow_origin(AllowOrigin::exact(frontend_origin))
                .allow_headers([
                    axum::http::header::CONTENT_TYPE,
                    axum::http::header::ACCEPT,
                    axum::http::header::ORIGIN,
                ])
                .expose_headers([
                    axum::http::header::CONTENT_TYPE,
                    axum::http::header::CONTENT_LENGTH,
                ])
        )
        .with_state(state)
}
