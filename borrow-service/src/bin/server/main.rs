use std::sync::Arc;

use borrow_service::config::Config;
use borrow_service::domain::loan::service::LoanService;
use borrow_service::inbound::http::router::create_router;
use borrow_service::outbound::clients::HttpBookInventory;
use borrow_service::outbound::repositories::MongoLoanRepository;
use discovery::consul::register_on_startup;
use discovery::AuthClient;
use discovery::ConsulAgent;
use discovery::ConsulLocator;
use discovery::ServiceLocator;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "borrow_service=debug,tower_http=debug".into()),
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
    let repository = Arc::new(MongoLoanRepository::new(&client));
    repository.ensure_indexes().await?;
    tracing::info!(database = "mongodb", "Loan store ready");

    let agent = ConsulAgent::new(&config.consul_host, config.consul_port)?;
    register_on_startup(
        &agent,
        &config.service_name,
        &config.service_address,
        config.service_port,
    )
    .await;

    let locator: Arc<dyn ServiceLocator> = Arc::new(
        ConsulLocator::new(ConsulAgent::new(&config.consul_host, config.consul_port)?)
            .with_fallback(&config.auth_service_name, &config.auth_fallback_url)
            .with_fallback(&config.book_service_name, &config.book_fallback_url),
    );

    let inventory = Arc::new(HttpBookInventory::new(
        Arc::clone(&locator),
        &config.book_service_name,
    )?);
    let guard = Arc::new(AuthClient::new(
        Arc::clone(&locator),
        &config.auth_service_name,
    )?);

    let loan_service = Arc::new(LoanService::new(repository, inventory));

    let address = format!("0.0.0.0:{}", config.service_port);
    let listener = tokio::net::TcpListener::bind(&address).await?;
    tracing::info!(address = %address, "Http server listening");

    let application = create_router(loan_service, guard);
    axum::serve(listener, application).await?;

    Ok(())
}
