//! CORS middleware configuration for cross-origin requests.
//!
//! Development is permissive so the API can be called from emulators and
//! local tooling. Production only accepts the origins listed in
//! `ALLOWED_ORIGINS`; mobile apps calling the API directly send no origin
//! and are unaffected.

use actix_cors::Cors;
use actix_web::http::{header, Method};

use pv_shared::Environment;

use crate::config::CorsConfig;

/// Creates a CORS middleware instance configured for `environment`.
pub fn create_cors(environment: Environment, settings: &CorsConfig) -> Cors {
    if environment.is_production() {
        create_production_cors(settings)
    } else {
        create_development_cors(settings)
    }
}

fn create_development_cors(settings: &CorsConfig) -> Cors {
    log::info!("Configuring CORS for development environment");

    Cors::default()
        .allow_any_origin()
        .allowed_methods(vec![Method::GET, Method::POST, Method::OPTIONS])
        .allowed_headers(vec![
            header::ACCEPT,
            header::CONTENT_TYPE,
            header::ORIGIN,
            header::USER_AGENT,
            header::HeaderName::from_static("x-requested-with"),
        ])
        .max_age(settings.max_age)
}

fn create_production_cors(settings: &CorsConfig) -> Cors {
    log::info!("Configuring CORS for production environment");

    let mut cors = Cors::default()
        .allowed_methods(vec![Method::GET, Method::POST, Method::OPTIONS])
        .allowed_headers(vec![header::ACCEPT, header::CONTENT_TYPE])
        .max_age(settings.max_age);

    for origin in &settings.allowed_origins {
        log::info!("Adding allowed origin: {}", origin);
        cors = cors.allowed_origin(origin);
    }

    cors
}
