use actix_web::{web, HttpResponse};

use pv_core::services::verification::MessageSender;

use super::AppState;

/// Handler for GET /config
///
/// Publishes the non-secret settings for health checks. Credentials and
/// the client secret are never part of the payload.
pub async fn show_config<M: MessageSender + 'static>(
    state: web::Data<AppState<M>>,
) -> HttpResponse {
    HttpResponse::Ok().json(&state.public_config)
}
