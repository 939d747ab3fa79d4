use std::sync::Arc;

use auth::Authenticator;
use auth_service::config::Config;
use auth_service::domain::account::service::AuthService;
use auth_service::inbound::http::router::create_router;
use auth_service::outbound::repositories::MongoAccountRepository;
use discovery::consul::register_on_startup;
use discovery::ConsulAgent;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "auth_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::load()?;

    tracing::info!(
        service = %config.service_name,
        port = config.service_port,
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let client = mongodb::Client::with_uri_str(&config.mongo_uri).await?;
    let repository = Arc::new(MongoAccountRepository::new(&client));
    repository.ensure_indexes().await?;
    tracing::info!(database = "mongodb", "Account store ready");

    let authenticator = Arc::new(Authenticator::new(config.jwt_secret.as_bytes()));
    let account_service = Arc::new(AuthService::new(
        Arc::clone(&repository),
        Arc::clone(&authenticator),
    ));

    let agent = ConsulAgent::new(&config.consul_host, config.consul_port)?;
    register_on_startup(
        &agent,
        &config.service_name,
        &config.service_address,
        config.service_port,
    )
    .await;

    let address = format!("0.0.0.0:{}", config.service_port);
    let listener = tokio::net::TcpListener::bind(&address).await?;
    tracing::info!(address = %address, "Http server listening");

    let application = create_router(account_service, authenticator);
    axum::serve(listener, application).await?;

    Ok(())
}
