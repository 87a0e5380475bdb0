use log::{error, info, warn};
use reqwest::{Client, StatusCode};

pub const PUSHOVER_API_URL: &str = "https://api.pushover.net/1/messages.json";

/// Outbound push notifications. Delivery problems are logged by the
/// implementation and collapse to `false`.
#[allow(async_fn_in_trait)]
pub trait Notifier {
    async fn send(&self, message: &str, title: &str) -> bool;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PushoverCredentials {
    pub user_key: String,
    pub api_token: String,
}

impl PushoverCredentials {
    /// Both halves present and non-blank.
    pub fn from_parts(user_key: Option<String>, api_token: Option<String>) -> Option<Self> {
        let user_key = user_key.filter(|s| !s.trim().is_empty())?;
        let api_token = api_token.filter(|s| !s.trim().is_empty())?;
        Some(Self {
            user_key,
            api_token,
        })
    }
}

pub struct PushoverNotifier {
    client: Client,
    credentials: PushoverCredentials,
    api_url: String,
}

impl PushoverNotifier {
    pub fn new(client: Client, credentials: PushoverCredentials) -> Self {
        Self {
            client,
            credentials,
            api_url: PUSHOVER_API_URL.to_string(),
        }
    }
}

impl Notifier for PushoverNotifier {
    async fn send(&self, message: &str, title: &str) -> bool {
        if self.credentials.user_key.is_empty() || self.credentials.api_token.is_empty() {
            warn!("Pushover credentials not set. Skipping notification.");
            return false;
        }

        let form = [
            ("token", self.credentials.api_token.as_str()),
            ("user", self.credentials.user_key.as_str()),
            ("message", message),
            ("title", title),
        ];

        match self.client.post(&self.api_url).form(&form).send().await {
            Ok(response) if response.status() == StatusCode::OK => {
                info!("Pushover notification sent");
                true
            }
            Ok(response) => {
                let status = response.status();
                let body = response.text().await.unwrap_or_default();
                error!("Error sending Pushover notification ({status}): {body}");
                false
            }
            Err(e) => {
                error!("Error sending Pushover notification: {e}");
                false
            }
        }
    }
}
