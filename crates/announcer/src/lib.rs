pub mod fetcher;
pub mod notifier;

use drop_common::config::AppConfig;
use drop_common::types::PromoCode;

use crate::fetcher::DropFetcher;
use crate::notifier::WebhookNotifier;

/// Run the full announcement pipeline: fetch a code, post it to the webhook.
///
/// Stages are strictly sequential and any failure short-circuits the rest of
/// the run. Returns the announced code on success.
pub async fn run(config: &AppConfig) -> anyhow::Result<PromoCode> {
    let fetcher = DropFetcher::new(config)?;
    let code = fetcher.fetch_code().await?;

    let notifier = WebhookNotifier::new(config)?;
    notifier.notify(&code).await?;

    Ok(code)
}
