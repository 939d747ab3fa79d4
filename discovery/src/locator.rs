use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;

use crate::consul::ConsulAgent;

/// Default fallback when no address is configured for a service name.
const DEFAULT_FALLBACK: &str = "http://127.0.0.1:5000";

/// Maps a logical service name to a live base URL.
///
/// `locate` never fails: when the registry has no match the locator returns
/// a statically configured fallback address, a degraded-but-operational path
/// the caller treats like any other address.
#[async_trait]
pub trait ServiceLocator: Send + Sync + 'static {
    async fn locate(&self, service_name: &str) -> String;
}

/// Registry-backed locator with bounded fixed-delay retries.
///
/// Each call re-queries the registry; there is no cache. Call volume is one
/// lookup per inbound authenticated request, which the agent handles fine.
pub struct ConsulLocator {
    agent: ConsulAgent,
    fallbacks: HashMap<String, String>,
    attempts: u32,
    delay: Duration,
}

impl ConsulLocator {
    pub fn new(agent: ConsulAgent) -> Self {
        Self {
            agent,
            fallbacks: HashMap::new(),
            attempts: 5,
            delay: Duration::from_secs(2),
        }
    }

    /// Configure the fallback base URL for a service name.
    pub fn with_fallback(mut self, service_name: impl Into<String>, url: impl Into<String>) -> Self {
        self.fallbacks.insert(service_name.into(), url.into());
        self
    }

    /// Override the retry policy (fixed count, fixed delay).
    pub fn with_retry(mut self, attempts: u32, delay: Duration) -> Self {
        self.attempts = attempts.max(1);
        self.delay = delay;
        self
    }

    fn fallback_for(&self, service_name: &str) -> String {
        self.fallbacks
            .get(service_name)
            .cloned()
            .unwrap_or_else(|| DEFAULT_FALLBACK.to_string())
    }
}

#[async_trait]
impl ServiceLocator for ConsulLocator {
    async fn locate(&self, service_name: &str) -> String {
        for attempt in 0..self.attempts {
            if attempt > 0 {
                tokio::time::sleep(self.delay).await;
            }

            match self.agent.services().await {
                Ok(services) => {
                    if let Some(entry) = services.values().find(|s| s.service == service_name) {
                        return format!("http://{}:{}", entry.address, entry.port);
                    }
                    // Tolerates startup ordering races: the target may simply
                    // not have registered yet.
                    tracing::debug!(service = service_name, attempt, "Service not yet registered");
                }
                Err(e) => {
                    tracing::debug!(service = service_name, attempt, error = %e, "Registry snapshot unavailable");
                }
            }
        }

        let fallback = self.fallback_for(service_name);
        tracing::warn!(
            service = service_name,
            fallback = %fallback,
            "Service not found in registry; using fallback address"
        );
        fallback
    }
}

/// Fixed name-to-URL map, for tests and single-host deployments.
#[derive(Default)]
pub struct StaticLocator {
    entries: HashMap<String, String>,
}

impl StaticLocator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_service(mut self, service_name: impl Into<String>, url: impl Into<String>) -> Self {
        self.entries.insert(service_name.into(), url.into());
        self
    }
}

#[async_trait]
impl ServiceLocator for StaticLocator {
    async fn locate(&self, service_name: &str) -> String {
        self.entries
            .get(service_name)
            .cloned()
            .unwrap_or_else(|| DEFAULT_FALLBACK.to_string())
    }
}
