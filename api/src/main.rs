use actix_web::{web, HttpServer};
use anyhow::Context;
use log::info;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use pv_api::app::create_app;
use pv_api::config::Config;
use pv_api::middleware::cors::create_cors;
use pv_api::routes::AppState;
use pv_core::services::verification::{VerificationService, VerificationServiceConfig};
use pv_infra::sms::{create_sms_service, SmsSenderAdapter};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(error) => {
            eprintln!("{}", error.remediation());
            std::process::exit(1);
        }
    };

    // RUST_LOG overrides the per-environment default; log records are bridged
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.environment.default_log_filter())),
        )
        .init();

    info!("Starting Phone Verify API Server ({})", config.environment);

    let sms_service =
        create_sms_service(&config.sms).context("failed to initialise SMS provider")?;
    let sender = SmsSenderAdapter::from_boxed(sms_service);
    info!("Using SMS provider: {}", sender.provider_name());

    let verification_service = VerificationService::new(
        Arc::new(sender),
        VerificationServiceConfig::from_settings(&config.verification, config.app_hash.clone()),
    )
    .context("invalid verification settings")?;

    let app_state = web::Data::new(AppState::new(Arc::new(verification_service), &config));

    let bind_address = config.server.bind_address();
    info!("Server will bind to: {}", bind_address);

    let environment = config.environment;
    let cors = config.cors.clone();

    HttpServer::new(move || create_app(app_state.clone(), create_cors(environment, &cors)))
        .bind(&bind_address)
        .with_context(|| format!("failed to bind {}", bind_address))?
        .run()
        .await
        .context("server terminated with an error")
}
