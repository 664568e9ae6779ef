use std::time::Duration;

use reqwest::StatusCode;

use drop_common::config::AppConfig;
use drop_common::error::{NotifyError, truncate_body};
use drop_common::types::{Embed, EmbedField, EmbedFooter, PromoCode, WebhookMessage};

/// Mention that triggers the channel-wide notification.
const MENTION: &str = "@everyone";

const EMBED_TITLE: &str = "🎁 TODAY'S DAILY DROP IS LIVE! 🎁";

const EMBED_DESCRIPTION: &str = "New day, new tokens! Unlock more uncensored AI roleplay and \
     high-quality image generations on **www.anione.me**.";

/// Magenta accent (0xFF00FF).
const EMBED_COLOR: u32 = 16_711_935;

const FOOTER_TEXT: &str = "Code expires in 24 hours. Don't miss out!";

/// Delivers formatted drop announcements to a chat webhook.
pub struct WebhookNotifier {
    client: reqwest::Client,
    webhook_url: String,
    redeem_url_base: String,
    username: Option<String>,
    avatar_url: Option<String>,
}

impl WebhookNotifier {
    pub fn new(config: &AppConfig) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self {
            client,
            webhook_url: config.webhook_url.clone(),
            redeem_url_base: config.redeem_url_base.clone(),
            username: config.webhook_username.clone(),
            avatar_url: config.webhook_avatar_url.clone(),
        })
    }

    /// Announce a promo code on the webhook.
    ///
    /// The receiver signals acceptance with an explicit 204; any other status
    /// (200 included) is a delivery failure. Single attempt, no retry.
    pub async fn notify(&self, code: &PromoCode) -> Result<(), NotifyError> {
        let payload = self.build_message(code);

        let response = self
            .client
            .post(&self.webhook_url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| NotifyError::transport(&self.webhook_url, e))?;

        let status = response.status();
        if status == StatusCode::NO_CONTENT {
            tracing::info!(code = %code, "Webhook accepted drop announcement");
            return Ok(());
        }

        let body = response
            .text()
            .await
            .map_err(|e| NotifyError::transport(&self.webhook_url, e))?;

        tracing::error!(
            url = %self.webhook_url,
            %status,
            body = %truncate_body(&body),
            "Webhook rejected drop announcement"
        );
        Err(NotifyError::UnexpectedStatus {
            status,
            body: truncate_body(&body),
        })
    }

    /// Assemble the webhook payload for a code.
    fn build_message(&self, code: &PromoCode) -> WebhookMessage {
        let redeem_link = format!("{}{}", self.redeem_url_base, code);

        WebhookMessage {
            username: self.username.clone(),
            avatar_url: self.avatar_url.clone(),
            content: MENTION.to_string(),
            embeds: vec![Embed {
                title: EMBED_TITLE.to_string(),
                description: EMBED_DESCRIPTION.to_string(),
                color: EMBED_COLOR,
                fields: vec![
                    EmbedField {
                        name: "🎫 Code".to_string(),
                        value: format!("``` {} ```", code),
                        inline: false,
                    },
                    EmbedField {
                        name: "⚡ Quick Redeem".to_string(),
                        value: format!("**[Click here to redeem your code!]({})**", redeem_link),
                        inline: false,
                    },
                ],
                footer: EmbedFooter {
                    text: FOOTER_TEXT.to_string(),
                },
            }],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use drop_common::config::{DEFAULT_API_URL, DEFAULT_REDEEM_URL_BASE};

    fn test_notifier() -> WebhookNotifier {
        let config = AppConfig {
            webhook_url: "https://discord.com/api/webhooks/1/t".to_string(),
            daily_drop_key: "secret-key".to_string(),
            api_url: DEFAULT_API_URL.to_string(),
            redeem_url_base: DEFAULT_REDEEM_URL_BASE.to_string(),
            webhook_username: Some("Anione Rewards".to_string()),
            webhook_avatar_url: Some("https://anione.me/logo.png".to_string()),
            request_timeout_secs: 10,
        };
        WebhookNotifier::new(&config).unwrap()
    }

    #[test]
    fn test_message_embeds_code_and_redeem_link() {
        let notifier = test_notifier();
        let code = PromoCode::new("ABC123").unwrap();
        let message = notifier.build_message(&code);

        let embed = &message.embeds[0];
        assert_eq!(embed.fields[0].value, "``` ABC123 ```");
        assert_eq!(
            embed.fields[1].value,
            "**[Click here to redeem your code!](https://www.anione.me/en/Profile?tab=redeem&code=ABC123)**"
        );
        assert!(!embed.fields[0].inline);
        assert!(!embed.fields[1].inline);
    }

    #[test]
    fn test_message_static_template_text() {
        let notifier = test_notifier();
        let code = PromoCode::new("XYZ").unwrap();
        let message = notifier.build_message(&code);

        assert_eq!(message.content, "@everyone");
        assert_eq!(message.username.as_deref(), Some("Anione Rewards"));
        assert_eq!(message.embeds.len(), 1);

        let embed = &message.embeds[0];
        assert_eq!(embed.title, EMBED_TITLE);
        assert_eq!(embed.color, 16711935);
        assert_eq!(embed.footer.text, "Code expires in 24 hours. Don't miss out!");
    }

    #[test]
    fn test_message_without_identity_override() {
        let config = AppConfig {
            webhook_url: "https://discord.com/api/webhooks/1/t".to_string(),
            daily_drop_key: "secret-key".to_string(),
            api_url: DEFAULT_API_URL.to_string(),
            redeem_url_base: DEFAULT_REDEEM_URL_BASE.to_string(),
            webhook_username: None,
            webhook_avatar_url: None,
            request_timeout_secs: 10,
        };
        let notifier = WebhookNotifier::new(&config).unwrap();
        let message = notifier.build_message(&PromoCode::new("XYZ").unwrap());

        assert_eq!(message.username, None);
        assert_eq!(message.avatar_url, None);
    }
}
