use serde::{Deserialize, Serialize};
use validator::Validate;

/// Body of `POST /api/request`
///
/// Absent fields deserialize as empty strings and are reported by validation.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct RequestCodeRequest {
    #[serde(default)]
    #[validate(length(min = 1))]
    pub client_secret: String,

    /// Destination phone number, E.164 preferred; formatting is stripped
    #[serde(default)]
    #[validate(length(min = 1))]
    pub phone: String,
}

/// Body of `POST /api/verify`
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct VerifyCodeRequest {
    #[serde(default)]
    #[validate(length(min = 1))]
    pub client_secret: String,

    #[serde(default)]
    #[validate(length(min = 1))]
    pub phone: String,

    /// The received SMS body, or just the code
    #[serde(default)]
    #[validate(length(min = 1))]
    pub sms_message: String,
}

/// Body of `POST /api/reset`
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct ResetRequest {
    #[serde(default)]
    #[validate(length(min = 1))]
    pub client_secret: String,

    #[serde(default)]
    #[validate(length(min = 1))]
    pub phone: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestCodeResponse {
    pub success: bool,
    /// Code expiration as Unix epoch milliseconds
    pub time: i64,
}

/// Outcome of a verify or reset call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub msg: Option<String>,
}

impl VerificationResponse {
    pub fn succeeded(phone: impl Into<String>) -> Self {
        Self {
            success: true,
            phone: Some(phone.into()),
            msg: None,
        }
    }

    pub fn failed(msg: impl Into<String>) -> Self {
        Self {
            success: false,
            phone: None,
            msg: Some(msg.into()),
        }
    }
}
