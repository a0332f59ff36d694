//! Application factory
//!
//! Builds the Actix-web application around an already constructed
//! [`AppState`], so the binary and the integration tests share one routing
//! table.

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpResponse};

use pv_core::services::verification::MessageSender;

use crate::handlers::error::json_config;
use crate::routes::config::show_config;
use crate::routes::verification::{request_code, reset_verification, verify_code, AppState};

/// Create and configure the application with all routes
pub fn create_app<M>(
    app_state: web::Data<AppState<M>>,
    cors: Cors,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
>
where
    M: MessageSender + 'static,
{
    App::new()
        .app_data(app_state)
        .app_data(json_config())
        .wrap(Logger::default())
        .wrap(cors)
        .route("/health", web::get().to(health_check))
        .route("/config", web::get().to(show_config::<M>))
        .service(
            web::scope("/api")
                .route("/request", web::post().to(request_code::<M>))
                .route("/verify", web::post().to(verify_code::<M>))
                .route("/reset", web::post().to(reset_verification::<M>)),
        )
        .default_service(web::route().to(not_found))
}

/// Health check endpoint handler
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "phone-verify",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// Default 404 handler
async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(serde_json::json!({
        "error": "not_found",
        "message": "The requested resource was not found"
    }))
}
