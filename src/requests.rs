use std::time::Duration;

use anyhow::Context;
use reqwest::{Client, ClientBuilder, Response};

use crate::{feed::FeedResponse, unexpected_status_error::UnexpectedStatusError};

const USER_AGENT: &str = concat!("courtwatch/", env!("CARGO_PKG_VERSION"));
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Where venue feeds come from. The checker only needs a decoded feed per URL.
#[allow(async_fn_in_trait)]
pub trait VenueFeed {
    async fn fetch_feed(&self, url: &str) -> anyhow::Result<FeedResponse>;
}

pub struct RequestClient {
    client: Client,
}

impl RequestClient {
    pub fn new(timeout: Duration) -> anyhow::Result<Self> {
        let client = ClientBuilder::new()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .context("failed to build http client")?;
        Ok(Self { client })
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    pub async fn fetch_url_response(&self, url: &str) -> anyhow::Result<Response> {
        let response = self.client.get(url).send().await?;
        if !response.status().is_success() {
            return Err(UnexpectedStatusError {
                url: url.to_string(),
                status: response.status(),
            }
            .into());
        }
        Ok(response)
    }
}

impl VenueFeed for RequestClient {
    async fn fetch_feed(&self, url: &str) -> anyhow::Result<FeedResponse> {
        let response = self.fetch_url_response(url).await?;
        let feed = response
            .json::<FeedResponse>()
            .await
            .with_context(|| format!("couldn't decode venue feed from {url}"))?;
        Ok(feed)
    }
}
