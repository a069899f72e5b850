use thiserror::Error;

/// Errors raised by the revenue estimator.
///
/// Every ratio and count is clamped rather than rejected, so the only way to
/// fail an estimate is a missing or non-positive deal size.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum FunnelError {
    #[error("{field} must be a positive number, got {value}")]
    InvalidInput { field: &'static str, value: f64 },
}

/// Errors from forwarding a captured lead to the marketing-automation webhook.
/// These are logged by the caller and never shown to the visitor.
#[derive(Debug, Error)]
pub enum DeliveryError {
    #[error("webhook request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("webhook responded with {status}: {body}")]
    Status { status: u16, body: String },
}
