use std::time::Duration;

use serde::Deserialize;

use drop_common::config::AppConfig;
use drop_common::error::{FetchError, truncate_body};
use drop_common::types::PromoCode;

/// Header carrying the drop API key.
const API_KEY_HEADER: &str = "x-discord-daily-drop-key";

/// Response body of the drop generation endpoint. Extra fields are ignored.
#[derive(Debug, Deserialize)]
struct DropResponse {
    code: Option<String>,
}

/// Client for the daily-drop generation API.
pub struct DropFetcher {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
}

impl DropFetcher {
    pub fn new(config: &AppConfig) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self {
            client,
            api_url: config.api_url.clone(),
            api_key: config.daily_drop_key.clone(),
        })
    }

    /// Request a fresh promo code from the drop API.
    ///
    /// Single attempt — every failure kind is terminal for the run and carries
    /// enough context (status, truncated body) to diagnose without retrying.
    pub async fn fetch_code(&self) -> Result<PromoCode, FetchError> {
        tracing::info!(url = %self.api_url, "Requesting daily drop code");

        let response = self
            .client
            .post(&self.api_url)
            .header(API_KEY_HEADER, &self.api_key)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .send()
            .await
            .map_err(|e| FetchError::transport(&self.api_url, e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| FetchError::transport(&self.api_url, e))?;

        if !status.is_success() {
            tracing::error!(
                url = %self.api_url,
                %status,
                body = %truncate_body(&body),
                "Drop API returned an error status"
            );
            return Err(FetchError::HttpStatus {
                status,
                body: truncate_body(&body),
            });
        }

        let code = extract_code(&body)?;
        tracing::info!(code = %code, "Fetched daily drop code");
        Ok(code)
    }
}

/// Parse the drop API response body and pull out a non-empty code.
fn extract_code(body: &str) -> Result<PromoCode, FetchError> {
    let parsed: DropResponse = serde_json::from_str(body)?;
    parsed.code.and_then(PromoCode::new).ok_or(FetchError::MissingCode)
}
