use std::sync::Arc;

use auth::PasswordHasher;
use discovery::consul::register_on_startup;
use discovery::AuthClient;
use discovery::ConsulAgent;
use discovery::ConsulLocator;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use user_service::config::Config;
use user_service::domain::account::service::UserService;
use user_service::inbound::http::router::create_router;
use user_service::outbound::repositories::MongoUserRepository;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "user_service=debug,tower_http=debug".into()),
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
    let repository = Arc::new(MongoUserRepository::new(&client));
    repository.ensure_indexes().await?;
    tracing::info!(database = "mongodb", "Account store ready");

    let user_service = Arc::new(UserService::new(
        Arc::clone(&repository),
        Arc::new(PasswordHasher::new()),
    ));

    let agent = ConsulAgent::new(&config.consul_host, config.consul_port)?;
    register_on_startup(
        &agent,
        &config.service_name,
        &config.service_address,
        config.service_port,
    )
    .await;

    let locator = Arc::new(
        ConsulLocator::new(ConsulAgent::new(&config.consul_host, config.consul_port)?)
            .with_fallback(&config.auth_service_name, &config.auth_fallback_url),
    );
    let guard = Arc::new(AuthClient::new(locator, &config.auth_service_name)?);

    let address = format!("0.0.0.0:{}", config.service_port);
    let listener = tokio::net::TcpListener::bind(&address).await?;
    tracing::info!(address = %address, "Http server listening");

    let application = create_router(user_service, guard);
    axum::serve(listener, application).await?;

    Ok(())
}
