//! Request-level errors rendered as plain-text HTTP responses

use actix_web::{
    error::JsonPayloadError,
    http::{header::ContentType, StatusCode},
    web, HttpRequest, HttpResponse, ResponseError,
};
use validator::ValidationErrors;

/// Errors that reject a request before it reaches the verification store
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Required body fields were absent or empty
    #[error("Missing required field(s): {}", .0.join(", "))]
    MissingField(Vec<String>),

    /// The shared client secret did not match
    #[error("Invalid client secret")]
    InvalidClientSecret,

    /// The body was not valid JSON for this endpoint
    #[error("Malformed request body: {0}")]
    MalformedBody(String),
}

impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        let mut fields: Vec<String> = errors
            .field_errors()
            .keys()
            .map(|field| field.to_string())
            .collect();
        fields.sort();
        ApiError::MissingField(fields)
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::MissingField(_) | ApiError::MalformedBody(_) => StatusCode::BAD_REQUEST,
            ApiError::InvalidClientSecret => StatusCode::FORBIDDEN,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code())
            .content_type(ContentType::plaintext())
            .body(self.to_string())
    }
}

/// JSON extractor configuration that reports bad bodies as [`ApiError::MalformedBody`]
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(json_error_handler)
}

fn json_error_handler(err: JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    log::debug!("Rejected body for {} {}: {}", req.method(), req.path(), err);
    ApiError::MalformedBody(err.to_string()).into()
}
