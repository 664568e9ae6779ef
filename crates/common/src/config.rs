use serde::Deserialize;

use crate::error::ConfigError;

/// Default drop generation endpoint.
pub const DEFAULT_API_URL: &str = "https://anione.me/api/discord/generate-daily-drop";

/// Default redeem-link prefix; the promo code is appended verbatim.
pub const DEFAULT_REDEEM_URL_BASE: &str = "https://www.anione.me/en/Profile?tab=redeem&code=";

const DEFAULT_WEBHOOK_USERNAME: &str = "Anione Rewards";
const DEFAULT_WEBHOOK_AVATAR_URL: &str = "https://anione.me/logo.png";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

/// Global application configuration loaded from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Webhook to post drop announcements to
    pub webhook_url: String,

    /// API key sent in the `x-discord-daily-drop-key` header
    pub daily_drop_key: String,

    /// Drop generation endpoint
    pub api_url: String,

    /// Redeem-link prefix; the code is appended to build the clickable link
    pub redeem_url_base: String,

    /// Webhook display-name override; `None` keeps the platform default
    pub webhook_username: Option<String>,

    /// Webhook avatar override; `None` keeps the platform default
    pub webhook_avatar_url: Option<String>,

    /// Timeout applied to each outbound HTTP request, in seconds
    pub request_timeout_secs: u64,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration from an arbitrary variable lookup.
    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        Ok(Self {
            webhook_url: required(&get, "DISCORD_WEBHOOK_URL")?,
            daily_drop_key: required(&get, "DISCORD_DAILY_DROP_KEY")?,
            api_url: with_default(&get, "DROP_API_URL", DEFAULT_API_URL),
            redeem_url_base: with_default(&get, "REDEEM_URL_BASE", DEFAULT_REDEEM_URL_BASE),
            webhook_username: overridable(&get, "WEBHOOK_USERNAME", DEFAULT_WEBHOOK_USERNAME),
            webhook_avatar_url: overridable(
                &get,
                "WEBHOOK_AVATAR_URL",
                DEFAULT_WEBHOOK_AVATAR_URL,
            ),
            request_timeout_secs: match get("REQUEST_TIMEOUT_SECS") {
                Some(v) if !v.is_empty() => v
                    .parse()
                    .map_err(|_| ConfigError::InvalidVar("REQUEST_TIMEOUT_SECS"))?,
                _ => DEFAULT_REQUEST_TIMEOUT_SECS,
            },
        })
    }
}

/// A required variable: missing or empty is a fatal configuration error.
fn required(
    get: &impl Fn(&str) -> Option<String>,
    name: &'static str,
) -> Result<String, ConfigError> {
    get(name)
        .filter(|v| !v.is_empty())
        .ok_or(ConfigError::MissingVar(name))
}

fn with_default(get: &impl Fn(&str) -> Option<String>, name: &str, default: &str) -> String {
    get(name)
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| default.to_string())
}

/// An optional override with a default. An explicitly empty value disables
/// the override entirely, so the receiving platform's default applies.
fn overridable(
    get: &impl Fn(&str) -> Option<String>,
    name: &str,
    default: &str,
) -> Option<String> {
    match get(name) {
        Some(v) if v.is_empty() => None,
        Some(v) => Some(v),
        None => Some(default.to_string()),
    }
}
