//! Afdian Bridge server binary.

use std::sync::Arc;

use secrecy::SecretString;
use thiserror::Error;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use afdian_bridge::adapters::http::{app_router, OrderAppState};
use afdian_bridge::adapters::{AfdianClient, ExchangeRateClient, HttpOrderNotifier, SqliteOrderLedger};
use afdian_bridge::application::RetryPolicy;
use afdian_bridge::config::{AppConfig, ConfigError, ServerConfig, ValidationError};
use afdian_bridge::domain::signing::RequestVerifier;
use afdian_bridge::ports::{LedgerError, PaymentError};

/// Errors that abort startup.
#[derive(Debug, Error)]
enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Invalid configuration: {0}")]
    Validation(#[from] ValidationError),

    #[error("Invalid bind address: {0}")]
    Address(#[from] std::net::AddrParseError),

    #[error("Order ledger unavailable: {0}")]
    Ledger(#[from] LedgerError),

    #[error("Provider client: {0}")]
    Provider(#[from] PaymentError),

    #[error("Server error: {0}")]
    Io(#[from] std::io::Error),
}

#[tokio::main]
async fn main() {
    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(e) => {
            init_tracing(&ServerConfig::default());
            tracing::error!(error = %e, "Failed to load configuration");
            std::process::exit(1);
        }
    };
    init_tracing(&config.server);

    if let Err(e) = run(config).await {
        tracing::error!(error = %e, "Afdian bridge stopped");
        std::process::exit(1);
    }
}

fn init_tracing(server: &ServerConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&server.log_level));

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if server.log_json {
        builder.json().init();
    } else {
        builder.init();
    }
}

async fn run(config: AppConfig) -> Result<(), StartupError> {
    config.validate()?;

    let ledger = SqliteOrderLedger::connect(&config.database).await?;

    let afdian_token = config
        .afdian
        .token
        .clone()
        .ok_or(ValidationError::MissingRequired("AFDIAN__TOKEN"))?;
    let provider = AfdianClient::new(
        config.afdian.user_id.clone(),
        afdian_token,
        &config.afdian.api_base_url,
        config.afdian.timeout(),
    )?;

    let converter = ExchangeRateClient::new(config.exchange.base_url.clone(), config.exchange.timeout());
    let notifier = HttpOrderNotifier::new(config.notify.timeout());

    let communication_key: SecretString = config
        .origin
        .communication_key
        .clone()
        .ok_or(ValidationError::MissingRequired("ORIGIN__COMMUNICATION_KEY"))?;

    let state = OrderAppState {
        ledger: Arc::new(ledger),
        payment_provider: Arc::new(provider),
        currency_converter: Arc::new(converter),
        order_notifier: Arc::new(notifier),
        retry_policy: RetryPolicy::from(&config.notify),
        verifier: Arc::new(RequestVerifier::new(communication_key)),
        site_url: Arc::from(config.origin.normalized_site_url()),
    };

    let app = app_router(state, config.server.request_timeout())
        .layer(TraceLayer::new_for_http());

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(
        %addr,
        site_url = config.origin.normalized_site_url(),
        "Afdian bridge listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Afdian bridge shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
