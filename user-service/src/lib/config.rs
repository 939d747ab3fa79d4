use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub mongo_uri: String,
    pub service_name: String,
    pub service_address: String,
    pub service_port: u16,
    pub consul_host: String,
    pub consul_port: u16,
    pub auth_service_name: String,
    pub auth_fallback_url: String,
}

impl Config {
    /// Load configuration from the environment (`MONGO_URI`, `SERVICE_NAME`,
    /// `SERVICE_ADDRESS`, `SERVICE_PORT`, `CONSUL_HOST`, `CONSUL_PORT`,
    /// `AUTH_SERVICE_NAME`, `AUTH_FALLBACK_URL`).
    pub fn load() -> Result<Self, ConfigError> {
        ConfigBuilder::builder()
            .set_default("mongo_uri", "mongodb://localhost:27017")?
            .set_default("service_name", "user-service")?
            .set_default("service_address", "127.0.0.1")?
            .set_default("service_port", 5001)?
            .set_default("consul_host", "localhost")?
            .set_default("consul_port", 8500)?
            .set_default("auth_service_name", "auth-service")?
            .set_default("auth_fallback_url", "http://127.0.0.1:5000")?
            .add_source(Environment::default())
            .build()?
            .try_deserialize()
    }
}
