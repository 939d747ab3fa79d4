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
    /// Shared signing secret. Must be identical on the issuer and on every
    /// verifying service; a mismatch silently breaks all authorization.
    pub jwt_secret: String,
    pub consul_host: String,
    pub consul_port: u16,
}

impl Config {
    /// Load configuration from the environment.
    ///
    /// Recognized variables: `MONGO_URI`, `SERVICE_NAME`, `SERVICE_ADDRESS`,
    /// `SERVICE_PORT`, `JWT_SECRET`, `CONSUL_HOST`, `CONSUL_PORT`. Defaults
    /// match the standard single-host deployment.
    pub fn load() -> Result<Self, ConfigError> {
        ConfigBuilder::builder()
            .set_default("mongo_uri", "mongodb://localhost:27017")?
            .set_default("service_name", "auth-service")?
            .set_default("service_address", "127.0.0.1")?
            .set_default("service_port", 5000)?
            .set_default("jwt_secret", "mysecretkey")?
            .set_default("consul_host", "localhost")?
            .set_default("consul_port", 8500)?
            .add_source(Environment::default())
            .build()?
            .try_deserialize()
    }
}
