use std::time::Duration;

use chrono::Utc;
use futures::future::BoxFuture;
use reqwest::Client;
use serde::Serialize;

use crate::error::DeliveryError;
use crate::models::funnel_models::{FunnelInput, FunnelResult};

pub const LEAD_SOURCE: &str = "Revenue Calculator";

/// A captured lead in the shape the marketing-automation webhook expects.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadPayload {
    pub timestamp: String,
    pub name: String,
    pub email: String,
    pub company: String,
    pub contract_value: f64,
    pub cash_extraction: f64,
    pub deal_size: f64,
    pub daily_leads: f64,
    pub show_up_rate: f64,
    pub conversion_rate: f64,
    pub follow_up_intensity: String,
    pub total_crm_leads: f64,
    pub daily_booked_calls: f64,
    pub unqualified_fraction: f64,
    pub average_order_value: Option<f64>,
    pub source: String,
    pub user_agent: String,
}

impl LeadPayload {
    pub fn new(
        name: &str,
        email: &str,
        company: Option<&str>,
        input: &FunnelInput,
        result: &FunnelResult,
        user_agent: &str,
    ) -> Self {
        Self {
            timestamp: Utc::now().to_rfc3339(),
            name: name.trim().to_string(),
            email: email.trim().to_string(),
            company: company.unwrap_or_default().trim().to_string(),
            contract_value: result.total_recovered_revenue,
            cash_extraction: result.total_recovered_revenue_alt,
            deal_size: input.average_deal_size,
            daily_leads: input.daily_leads,
            show_up_rate: input.show_up_rate,
            conversion_rate: input.conversion_rate,
            follow_up_intensity: input.follow_up_intensity.as_str().to_string(),
            total_crm_leads: input.total_crm_leads,
            daily_booked_calls: input.daily_booked_calls,
            unqualified_fraction: input.unqualified_fraction,
            average_order_value: input.average_order_value,
            source: LEAD_SOURCE.to_string(),
            user_agent: user_agent.to_string(),
        }
    }
}

/// Where captured leads go once the estimate has been shown.
#[cfg_attr(test, mockall::automock)]
pub trait LeadSink: Send + Sync {
    fn deliver(&self, lead: LeadPayload) -> BoxFuture<'static, Result<(), DeliveryError>>;
}

/// Posts leads as JSON to a webhook URL.
pub struct WebhookSink {
    client: Client,
    url: String,
}

impl WebhookSink {
    pub fn new(url: impl Into<String>) -> Result<Self, DeliveryError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }
}

impl LeadSink for WebhookSink {
    fn deliver(&self, lead: LeadPayload) -> BoxFuture<'static, Result<(), DeliveryError>> {
        let client = self.client.clone();
        let url = self.url.clone();
        Box::pin(async move {
            let response = client.post(&url).json(&lead).send().await?;

            let status = response.status();
            if !status.is_success() {
                let body = response
                    .text()
                    .await
                    .unwrap_or_else(|_| "Unknown error".to_string());
                return Err(DeliveryError::Status {
                    status: status.as_u16(),
                    body,
                });
            }

            let body = response.text().await.unwrap_or_default();
            tracing::info!("Lead webhook accepted: {}", body);
            Ok::<(), DeliveryError>(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::estimator::funnel::estimate;
    use crate::models::funnel_models::FollowUpIntensity;
    use axum::{http::StatusCode, routing::post, Router};

    fn scenario_input() -> FunnelInput {
        FunnelInput {
            average_deal_size: 15000.0,
            average_order_value: Some(7500.0),
            daily_leads: 50.0,
            unqualified_fraction: 0.15,
            daily_booked_calls: 20.0,
            total_crm_leads: 30000.0,
            show_up_rate: 0.75,
            conversion_rate: 0.3,
            follow_up_intensity: FollowUpIntensity::Medium,
            num_sales_reps: Some(7),
        }
    }

    fn scenario_lead() -> LeadPayload {
        let input = scenario_input();
        let result = estimate(&input).unwrap();
        LeadPayload::new("Ada", "ada@example.com", Some("Acme"), &input, &result, "test-agent")
    }

    /// Serves a webhook on a free local port that always answers `status`.
    async fn spawn_webhook(status: StatusCode, body: &'static str) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let app = Router::new().route("/hook", post(move || async move { (status, body) }));
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}/hook", addr)
    }

    #[test]
    fn payload_uses_camel_case_keys() {
        let input = scenario_input();
        let result = estimate(&input).unwrap();
        let payload = LeadPayload::new(" Ada ", "ada@example.com", None, &input, &result, "test-agent");
        let json = serde_json::to_value(&payload).unwrap();

        assert_eq!(json["name"], "Ada");
        assert_eq!(json["company"], "");
        assert_eq!(json["followUpIntensity"], "medium");
        assert_eq!(json["source"], LEAD_SOURCE);
        assert_eq!(json["userAgent"], "test-agent");
        assert_eq!(json["contractValue"], result.total_recovered_revenue);
        assert_eq!(json["cashExtraction"], result.total_recovered_revenue_alt);
        assert_eq!(json["averageOrderValue"], 7500.0);
        assert!(json.get("dailyBookedCalls").is_some());
    }

    #[tokio::test]
    async fn accepted_lead_is_delivered() {
        let url = spawn_webhook(StatusCode::OK, "queued").await;
        let sink = WebhookSink::new(url).unwrap();
        assert!(sink.deliver(scenario_lead()).await.is_ok());
    }

    #[tokio::test]
    async fn non_success_status_is_reported_with_body() {
        let url = spawn_webhook(StatusCode::BAD_GATEWAY, "upstream down").await;
        let sink = WebhookSink::new(url).unwrap();
        match sink.deliver(scenario_lead()).await {
            Err(DeliveryError::Status { status, body }) => {
                assert_eq!(status, 502);
                assert_eq!(body, "upstream down");
            }
            other => panic!("expected status error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn refused_connection_is_a_transport_error() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let sink = WebhookSink::new(format!("http://{}/hook", addr)).unwrap();
        let outcome = sink.deliver(scenario_lead()).await;
        assert!(matches!(outcome, Err(DeliveryError::Transport(_))), "{:?}", outcome);
    }
}
