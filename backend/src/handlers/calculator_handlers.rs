use std::sync::Arc;
use axum::{
    Json,
    extract::State,
    http::StatusCode,
};
use serde::Serialize;
use serde_json::json;

use crate::{
    AppState,
    error::FunnelError,
    estimator::funnel::estimate,
    models::funnel_models::{FunnelInput, FunnelResult},
    utils::format::{booking_url, format_count, format_currency, BookingContact},
};

#[derive(Debug, Serialize)]
pub struct DisplayFigures {
    pub total: String,
    pub total_alt: String,
    pub campaign_a: String,
    pub campaign_b: String,
    pub campaign_c: String,
    pub deal_range: String,
}

impl DisplayFigures {
    pub fn from_result(result: &FunnelResult) -> Self {
        Self {
            total: format_currency(result.total_recovered_revenue),
            total_alt: format_currency(result.total_recovered_revenue_alt),
            campaign_a: format_currency(result.campaign_a.revenue),
            campaign_b: format_currency(result.campaign_b.revenue),
            campaign_c: format_currency(result.campaign_c.revenue),
            deal_range: format!(
                "{} - {}",
                format_count(result.deal_count_range.lower as f64),
                format_count(result.deal_count_range.upper as f64)
            ),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CalculationResponse {
    pub result: FunnelResult,
    pub display: DisplayFigures,
    pub booking_url: String,
}

pub fn funnel_error_response(e: FunnelError) -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({"error": e.to_string()}))
    )
}

pub async fn calculate(
    State(state): State<Arc<AppState>>,
    Json(input): Json<FunnelInput>,
) -> Result<Json<CalculationResponse>, (StatusCode, Json<serde_json::Value>)> {
    let result = estimate(&input).map_err(|e| {
        tracing::warn!("Rejected calculator input: {}", e);
        funnel_error_response(e)
    })?;

    let booking_url = booking_url(
        &state.config.booking_path,
        result.total_recovered_revenue,
        BookingContact::default(),
    );

    Ok(Json(CalculationResponse {
        display: DisplayFigures::from_result(&result),
        result,
        booking_url,
    }))
}
