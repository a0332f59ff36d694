//! Server configuration loaded from the process environment
//!
//! Every value comes from an environment variable (optionally seeded from a
//! `.env` file by the binary). Required values that are missing are all
//! reported together so an operator can fix them in one pass.

use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::str::FromStr;

use pv_core::services::verification::VerificationServiceConfig;
use pv_infra::config::{SmsConfig, SmsProvider};
use pv_shared::config::server::ServerConfig;
use pv_shared::config::verification::VerificationSettings;
use pv_shared::phone::mask_phone_number;
use pv_shared::Environment;

/// Default max age for CORS preflight caching in seconds
pub const DEFAULT_CORS_MAX_AGE: usize = 3600;

/// Errors raised while reading configuration at startup
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// One or more required variables are absent or empty
    #[error("missing required configuration: {}", .0.join(", "))]
    Missing(Vec<&'static str>),

    /// A variable is present but cannot be used
    #[error("invalid value for {name}: {reason}")]
    Invalid { name: &'static str, reason: String },
}

impl ConfigError {
    /// Operator-facing guidance printed before the process exits
    pub fn remediation(&self) -> String {
        match self {
            ConfigError::Missing(names) => {
                let mut message = String::from(
                    "Phone Verify cannot start: required configuration is missing.\n\n",
                );
                for name in names {
                    message.push_str(&format!("  - {} is not set\n", name));
                }
                message.push_str(
                    "\nSet these variables in the environment, or add them to a .env file \
                     in the working directory (one NAME=value per line), then restart.",
                );
                message
            }
            ConfigError::Invalid { name, reason } => format!(
                "Phone Verify cannot start: {} is invalid ({}).\n\n\
                 Correct the value in the environment or the .env file, then restart.",
                name, reason
            ),
        }
    }
}

/// Cross-origin settings for browser clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorsConfig {
    /// Max age for preflight caching in seconds
    pub max_age: usize,
    /// Origins accepted in production
    pub allowed_origins: Vec<String>,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            max_age: DEFAULT_CORS_MAX_AGE,
            allowed_origins: Vec::new(),
        }
    }
}

/// Complete server configuration
#[derive(Clone, Serialize, Deserialize)]
pub struct Config {
    pub environment: Environment,
    pub server: ServerConfig,
    pub sms: SmsConfig,
    pub verification: VerificationSettings,
    pub cors: CorsConfig,
    /// Hash identifying the mobile app, appended to every SMS
    pub app_hash: String,
    /// Shared secret every POST request must present
    #[serde(skip_serializing)]
    pub client_secret: String,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("environment", &self.environment)
            .field("server", &self.server)
            .field("sms", &self.sms)
            .field("verification", &self.verification)
            .field("cors", &self.cors)
            .field("app_hash", &self.app_hash)
            .field("client_secret", &"<redacted>")
            .finish()
    }
}

impl Config {
    /// Load configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(|name| env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_vars<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let provider: SmsProvider = parse_or(&get, "SMS_PROVIDER", SmsProvider::default())?;

        let mut missing = Vec::new();
        let mut required = |name: &'static str| {
            get(name).unwrap_or_else(|| {
                missing.push(name);
                String::new()
            })
        };

        let client_secret = required("CLIENT_SECRET");
        let app_hash = required("APP_HASH");
        let from_number = required("TWILIO_PHONE_NUMBER");
        let (account_sid, auth_token) = if provider.requires_credentials() {
            (required("TWILIO_ACCOUNT_SID"), required("TWILIO_AUTH_TOKEN"))
        } else {
            (String::new(), String::new())
        };

        if !missing.is_empty() {
            return Err(ConfigError::Missing(missing));
        }

        let environment: Environment = parse_or(&get, "ENVIRONMENT", Environment::default())?;
        let defaults = ServerConfig::default();
        let server = ServerConfig::new(
            get("SERVER_HOST").unwrap_or(defaults.host),
            parse_or(&get, "SERVER_PORT", defaults.port)?,
        );

        let settings = VerificationSettings::default();
        let verification = VerificationSettings {
            code_length: parse_or(&get, "CODE_LENGTH", settings.code_length)?,
            code_ttl_seconds: parse_or(&get, "CODE_TTL_SECONDS", settings.code_ttl_seconds)?,
            sms_timeout_secs: parse_or(&get, "SMS_TIMEOUT_SECS", settings.sms_timeout_secs)?,
        };
        VerificationServiceConfig::from_settings(&verification, app_hash.clone())
            .validate()
            .map_err(|e| ConfigError::Invalid {
                name: "verification settings",
                reason: e.to_string(),
            })?;

        let cors = CorsConfig {
            max_age: parse_or(&get, "CORS_MAX_AGE", DEFAULT_CORS_MAX_AGE)?,
            allowed_origins: parse_origins(get("ALLOWED_ORIGINS"))?,
        };

        Ok(Config {
            environment,
            server,
            sms: SmsConfig {
                provider,
                account_sid,
                auth_token,
                from_number,
                request_timeout_secs: verification.sms_timeout_secs,
            },
            verification,
            cors,
            app_hash,
            client_secret,
        })
    }

    /// Settings safe to publish on `GET /config`
    pub fn public_view(&self) -> PublicConfig {
        PublicConfig {
            environment: self.environment,
            host: self.server.host.clone(),
            port: self.server.port,
            sms_provider: self.sms.provider,
            from_number: mask_phone_number(&self.sms.from_number),
            app_hash: self.app_hash.clone(),
            code_length: self.verification.code_length,
            code_ttl_seconds: self.verification.code_ttl_seconds,
        }
    }
}

/// Non-secret configuration exposed for health checks
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicConfig {
    pub environment: Environment,
    pub host: String,
    pub port: u16,
    pub sms_provider: SmsProvider,
    /// Sending number, masked
    pub from_number: String,
    pub app_hash: String,
    pub code_length: usize,
    pub code_ttl_seconds: i64,
}

fn parse_or<T, G>(get: &G, name: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: ToString,
    G: Fn(&str) -> Option<String>,
{
    match get(name) {
        Some(raw) => raw.parse::<T>().map_err(|e| ConfigError::Invalid {
            name,
            reason: e.to_string(),
        }),
        None => Ok(default),
    }
}

fn parse_origins(raw: Option<String>) -> Result<Vec<String>, ConfigError> {
    let Some(raw) = raw else {
        return Ok(Vec::new());
    };

    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(|origin| {
            if origin.starts_with("http://") || origin.starts_with("https://") {
                Ok(origin.to_string())
            } else {
                Err(ConfigError::Invalid {
                    name: "ALLOWED_ORIGINS",
                    reason: format!("'{}' must start with http:// or https://", origin),
                })
            }
        })
        .collect()
}
