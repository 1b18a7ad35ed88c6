use crate::ports::HealthPort;

/// API reachability as shown in the header
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ApiStatus {
    #[default]
    Unknown,
    Online { status: String },
    Unreachable,
}

impl ApiStatus {
    pub fn label(&self) -> String {
        match self {
            ApiStatus::Unknown => "API: checking...".to_string(),
            ApiStatus::Online { status } => format!("API: {}", status),
            ApiStatus::Unreachable => "API: unreachable".to_string(),
        }
    }
}

/// One `GET /health` round trip, folded into a display status.
pub async fn probe(health: &dyn HealthPort) -> ApiStatus {
    match health.health_check().await {
        Ok(resp) => {
            log::info!("API health: {} at {}", resp.status, resp.timestamp);
            ApiStatus::Online { status: resp.status }
        }
        Err(e) => {
            log::warn!("API health check failed: {}", e);
            ApiStatus::Unreachable
        }
    }
}
