use actix_web::{web, HttpResponse};
use validator::Validate;

use pv_core::services::verification::MessageSender;
use pv_shared::phone::mask_phone_number;

use crate::dto::verification::{RequestCodeRequest, RequestCodeResponse};
use crate::handlers::error::ApiError;

use super::AppState;

/// Handler for POST /api/request
///
/// Issues a fresh code for the phone number and sends it by SMS. The
/// response does not wait for delivery.
///
/// # Request Body
///
/// ```json
/// {
///     "client_secret": "...",
///     "phone": "+15551234567"
/// }
/// ```
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// {
///     "success": true,
///     "time": 1760443500000
/// }
/// ```
///
/// `time` is the code expiration in Unix epoch milliseconds.
///
/// ## Errors
/// - 400 Bad Request: missing field or malformed body
/// - 403 Forbidden: client secret mismatch
pub async fn request_code<M: MessageSender + 'static>(
    state: web::Data<AppState<M>>,
    request: web::Json<RequestCodeRequest>,
) -> Result<HttpResponse, ApiError> {
    let request = request.into_inner();
    request.validate()?;
    if let Err(error) = state.authorize(&request.client_secret) {
        log::warn!(
            "Rejected code request for {}: invalid client secret",
            mask_phone_number(&request.phone)
        );
        return Err(error);
    }

    let expires_at = state.verification_service.request(&request.phone).await;
    log::info!(
        "Verification code requested for {}",
        mask_phone_number(&request.phone)
    );

    Ok(HttpResponse::Ok().json(RequestCodeResponse {
        success: true,
        time: expires_at.timestamp_millis(),
    }))
}
