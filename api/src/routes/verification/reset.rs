use actix_web::{web, HttpResponse};
use validator::Validate;

use pv_core::services::verification::{MessageSender, VerificationOutcome};
use pv_shared::phone::mask_phone_number;

use crate::dto::verification::{ResetRequest, VerificationResponse};
use crate::handlers::error::ApiError;

use super::AppState;

/// Handler for POST /api/reset
///
/// Drops the pending code for the phone number so it can no longer verify.
pub async fn reset_verification<M: MessageSender + 'static>(
    state: web::Data<AppState<M>>,
    request: web::Json<ResetRequest>,
) -> Result<HttpResponse, ApiError> {
    let request = request.into_inner();
    request.validate()?;
    if let Err(error) = state.authorize(&request.client_secret) {
        log::warn!(
            "Rejected reset for {}: invalid client secret",
            mask_phone_number(&request.phone)
        );
        return Err(error);
    }

    let response = if state.verification_service.reset(&request.phone).await {
        VerificationResponse::succeeded(request.phone)
    } else {
        VerificationResponse::failed(VerificationOutcome::UnknownPhone.to_string())
    };

    Ok(HttpResponse::Ok().json(response))
}
