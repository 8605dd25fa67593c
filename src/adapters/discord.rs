use crate::config::AppConfig;
use crate::domain::ports::Notifier;
use async_trait::async_trait;
use chrono::Local;
use reqwest::Client;

const COLOR_ERROR: u32 = 0x00D3_2F2F;
const COLOR_WARNING: u32 = 0x00FF_A000;
const COLOR_INFO: u32 = 0x0021_96F3;

/// Posts embed messages to a Discord webhook. Delivery problems are logged
/// and swallowed; a lost notification must never break a mission update.
pub struct DiscordNotifier {
    enabled: bool,
    webhook_url: String,
    client: Client,
}

impl DiscordNotifier {
    pub fn new(enabled: bool, webhook_url: impl Into<String>) -> Self {
        Self {
            enabled,
            webhook_url: webhook_url.into(),
            client: Client::new(),
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(
            config.send_errors_to_discord,
            config.error_discord_webhook.trim(),
        )
    }

    async fn send_embed(&self, title: &str, description: &str, color: u32) {
        if !self.enabled {
            tracing::debug!("Discord notifications disabled; dropping: {}", description);
            return;
        }
        if self.webhook_url.is_empty() {
            tracing::error!("Discord notifications enabled but webhook URL missing.");
            return;
        }

        let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S");
        let payload = serde_json::json!({
            "embeds": [{
                "title": title,
                "description": format!("{}\n\n**Time:** {}", description, timestamp),
                "color": color,
            }]
        });

        match self
            .client
            .post(&self.webhook_url)
            .json(&payload)
            .send()
            .await
        {
            Ok(response) if !response.status().is_success() => {
                tracing::error!("Discord webhook returned status {}", response.status());
            }
            Ok(_) => {}
            Err(e) => {
                tracing::error!("Discord send error: {}", e);
            }
        }
    }
}

#[async_trait]
impl Notifier for DiscordNotifier {
    async fn error(&self, message: &str) {
        tracing::info!("Sending ERROR notification to Discord...");
        self.send_embed("❌ DCS Persistence Error", message, COLOR_ERROR)
            .await;
    }

    async fn warning(&self, message: &str) {
        tracing::info!("Sending WARNING notification to Discord...");
        self.send_embed("⚠️ Warning", message, COLOR_WARNING).await;
    }

    async fn info(&self, message: &str) {
        tracing::info!("Sending INFO notification to Discord...");
        self.send_embed("ℹ️ Info", message, COLOR_INFO).await;
    }
}
