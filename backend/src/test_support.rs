use std::sync::Arc;

use serde_json::json;

use crate::config::{FunnelConfig, DEFAULT_BOOKING_PATH};
use crate::utils::lead_delivery::LeadSink;
use crate::AppState;

pub fn test_config() -> FunnelConfig {
    FunnelConfig {
        lead_webhook_url: "http://127.0.0.1:9/hook".to_string(),
        frontend_url: "http://localhost:8080".to_string(),
        booking_path: DEFAULT_BOOKING_PATH.to_string(),
        environment: "development".to_string(),
        port: 3000,
    }
}

pub fn test_state(sink: impl LeadSink + 'static) -> Arc<AppState> {
    Arc::new(AppState::new(test_config(), Arc::new(sink)))
}

/// The reference calculator submission used across handler tests.
pub fn scenario_json() -> serde_json::Value {
    json!({
        "average_deal_size": 15000,
        "daily_leads": 50,
        "unqualified_fraction": 0.15,
        "daily_booked_calls": 20,
        "total_crm_leads": 30000,
        "show_up_rate": 0.75,
        "conversion_rate": 0.3,
        "follow_up_intensity": "medium",
        "average_order_value": 7500,
        "num_sales_reps": 7
    })
}
