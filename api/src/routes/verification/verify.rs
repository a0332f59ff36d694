use actix_web::{web, HttpResponse};
use validator::Validate;

use pv_core::services::verification::MessageSender;
use pv_shared::phone::mask_phone_number;

use crate::dto::verification::{VerificationResponse, VerifyCodeRequest};
use crate::handlers::error::ApiError;

use super::AppState;

/// Handler for POST /api/verify
///
/// Checks `sms_message` against the pending code. The message may be the
/// bare code or the whole SMS body it arrived in. A refused code is a
/// normal outcome reported as `{"success": false, "msg": ...}` with 200.
pub async fn verify_code<M: MessageSender + 'static>(
    state: web::Data<AppState<M>>,
    request: web::Json<VerifyCodeRequest>,
) -> Result<HttpResponse, ApiError> {
    let request = request.into_inner();
    request.validate()?;
    if let Err(error) = state.authorize(&request.client_secret) {
        log::warn!(
            "Rejected verification for {}: invalid client secret",
            mask_phone_number(&request.phone)
        );
        return Err(error);
    }

    let outcome = state
        .verification_service
        .check(&request.phone, &request.sms_message)
        .await;

    let response = if outcome.is_verified() {
        VerificationResponse::succeeded(request.phone)
    } else {
        log::info!(
            "Verification refused for {}: {}",
            mask_phone_number(&request.phone),
            outcome
        );
        VerificationResponse::failed(outcome.to_string())
    };

    Ok(HttpResponse::Ok().json(response))
}
