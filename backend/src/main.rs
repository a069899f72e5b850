use dotenvy::dotenv;
use std::sync::Arc;
use tokio::net::TcpListener;

use funnel_backend::{
    app,
    config::{validate_env, FunnelConfig},
    handlers::lead_handlers::{prune_lead_limiter, LEAD_LIMITER_PRUNE_INTERVAL},
    utils::lead_delivery::WebhookSink,
    AppState,
};

#[tokio::main]
async fn main() {
    dotenv().ok();
    validate_env();
    let config = FunnelConfig::from_env();

    let _guard = std::env::var("SENTRY_DSN").ok().map(|dsn| {
        sentry::init((dsn, sentry::ClientOptions {
            release: sentry::release_name!(),
            environment: Some(config.environment.clone().into()),
            ..Default::default()
        }))
    });

    use tracing_subscriber::{fmt, EnvFilter};
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,funnel_backend=debug"));
    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .init();

    let sink = match WebhookSink::new(config.lead_webhook_url.clone()) {
        Ok(sink) => sink,
        Err(e) => {
            tracing::error!("Failed to build lead webhook client: {}", e);
            std::process::exit(1);
        }
    };

    let port = config.port;
    if config.is_prod() {
        tracing::info!("Running in {} mode", config.environment);
    }
    let state = Arc::new(AppState::new(config, Arc::new(sink)));

    let limiter_state = state.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(LEAD_LIMITER_PRUNE_INTERVAL);
        loop {
            interval.tick().await;
            let tracked = prune_lead_limiter(&limiter_state.lead_limiter);
            tracing::debug!("Lead limiter pruned, {} emails still tracked", tracked);
        }
    });
    let app = app(state);

    tracing::info!("Starting server on port {}", port);
    let listener = match TcpListener::bind(format!("0.0.0.0:{}", port)).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!("Failed to bind port {}: {}", port, e);
            std::process::exit(1);
        }
    };
    if let Err(e) = axum::serve(listener, app.into_make_service()).await {
        tracing::error!("Server error: {}", e);
    }
}
