use std::env;

pub const DEFAULT_BOOKING_PATH: &str = "/book-strategy-call";

/// Runtime settings, read from the environment (and `.env` via dotenvy).
#[derive(Debug, Clone)]
pub struct FunnelConfig {
    pub lead_webhook_url: String,
    pub frontend_url: String,
    pub booking_path: String,
    pub environment: String,
    pub port: u16,
}

impl FunnelConfig {
    pub fn from_env() -> Self {
        let environment = env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string());
        let default_port = match environment.as_str() {
            "staging" => 3100,
            _ => 3000,
        };
        let port = env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(default_port);

        Self {
            lead_webhook_url: env::var("LEAD_WEBHOOK_URL").unwrap_or_default(),
            frontend_url: env::var("FRONTEND_URL").unwrap_or_else(|_| "http://localhost:8080".to_string()),
            booking_path: env::var("BOOKING_PATH").unwrap_or_else(|_| DEFAULT_BOOKING_PATH.to_string()),
            environment,
            port,
        }
    }

    pub fn is_prod(&self) -> bool {
        self.environment != "development"
    }
}

pub fn validate_env() {
    let required_vars = ["LEAD_WEBHOOK_URL"];
    for var in required_vars.iter() {
        if env::var(var).map(|v| v.trim().is_empty()).unwrap_or(true) {
            panic!("{} must be set", var);
        }
    }
}
