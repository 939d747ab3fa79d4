use std::collections::HashMap;
use std::time::Duration;

use serde::Deserialize;
use serde::Serialize;

use crate::errors::DiscoveryError;

const AGENT_TIMEOUT: Duration = Duration::from_secs(5);

/// Minimal client for the Consul agent HTTP API.
///
/// Covers the two calls the platform needs: registering a service with an
/// HTTP health check, and reading the agent's current membership snapshot.
pub struct ConsulAgent {
    base_url: String,
    http: reqwest::Client,
}

/// Registration payload for `/v1/agent/service/register`.
#[derive(Debug, Clone, Serialize)]
pub struct ServiceRegistration {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "ID")]
    pub id: String,
    #[serde(rename = "Address")]
    pub address: String,
    #[serde(rename = "Port")]
    pub port: u16,
    #[serde(rename = "Check")]
    pub check: HealthCheck,
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthCheck {
    #[serde(rename = "HTTP")]
    pub http: String,
    #[serde(rename = "Interval")]
    pub interval: String,
    #[serde(rename = "Timeout")]
    pub timeout: String,
}

/// One entry of the agent's service snapshot.
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceEntry {
    #[serde(rename = "Service")]
    pub service: String,
    #[serde(rename = "Address")]
    pub address: String,
    #[serde(rename = "Port")]
    pub port: u16,
}

impl ServiceRegistration {
    /// Build a registration with the platform's standard health check:
    /// `GET /health` every 10 seconds with a 5 second timeout, and a
    /// `{name}-{port}` service ID.
    pub fn with_http_check(name: &str, address: &str, port: u16) -> Self {
        Self {
            name: name.to_string(),
            id: format!("{}-{}", name, port),
            address: address.to_string(),
            port,
            check: HealthCheck {
                http: format!("http://{}:{}/health", address, port),
                interval: "10s".to_string(),
                timeout: "5s".to_string(),
            },
        }
    }
}

impl ConsulAgent {
    pub fn new(host: &str, port: u16) -> Result<Self, DiscoveryError> {
        let http = reqwest::Client::builder().timeout(AGENT_TIMEOUT).build()?;

        Ok(Self {
            base_url: format!("http://{}:{}", host, port),
            http,
        })
    }

    /// Register a service with the agent.
    pub async fn register(&self, registration: &ServiceRegistration) -> Result<(), DiscoveryError> {
        let response = self
            .http
            .put(format!("{}/v1/agent/service/register", self.base_url))
            .json(registration)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(DiscoveryError::Rejected(response.status().as_u16()));
        }

        Ok(())
    }

    /// Fetch the agent's current service snapshot, keyed by service ID.
    pub async fn services(&self) -> Result<HashMap<String, ServiceEntry>, DiscoveryError> {
        let response = self
            .http
            .get(format!("{}/v1/agent/services", self.base_url))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(DiscoveryError::Rejected(response.status().as_u16()));
        }

        Ok(response.json().await?)
    }
}

/// Register a service on startup, logging instead of failing.
///
/// A service that cannot reach the registry still comes up; callers fall
/// back to the statically configured address until registration succeeds on
/// a later restart.
pub async fn register_on_startup(agent: &ConsulAgent, name: &str, address: &str, port: u16) {
    let registration = ServiceRegistration::with_http_check(name, address, port);

    match agent.register(&registration).await {
        Ok(()) => tracing::info!(service = name, address, port, "Registered with Consul"),
        Err(e) => tracing::warn!(
            service = name,
            error = %e,
            "Consul registration failed; service remains reachable via fallback address"
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registration_shape() {
        let registration = ServiceRegistration::with_http_check("book-service", "10.0.0.7", 5002);

        assert_eq!(registration.id, "book-service-5002");
        assert_eq!(registration.check.http, "http://10.0.0.7:5002/health");
        assert_eq!(registration.check.interval, "10s");

        let json = serde_json::to_value(&registration).unwrap();
        assert_eq!(json["Name"], "book-service");
        assert_eq!(json["Port"], 5002);
        assert_eq!(json["Check"]["HTTP"], "http://10.0.0.7:5002/health");
    }

    #[test]
    fn test_service_entry_deserializes_agent_shape() {
        let entry: ServiceEntry = serde_json::from_str(
            r#"{"Service": "auth-service", "Address": "10.0.0.2", "Port": 5000, "Tags": []}"#,
        )
        .unwrap();

        assert_eq!(entry.service, "auth-service");
        assert_eq!(entry.port, 5000);
    }
}
