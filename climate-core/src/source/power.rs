use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, Url};

use crate::{
    config::{Config, USER_AGENT},
    error::FetchError,
    model::{DateRange, RequestSpec},
};

use super::ClimateSource;

/// NASA POWER daily point endpoint.
#[derive(Debug, Clone)]
pub struct PowerSource {
    base_url: String,
    http: Client,
}

impl PowerSource {
    pub fn new(config: &Config) -> Result<Self> {
        let http = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(config.timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self { base_url: config.base_url.clone(), http })
    }
}

pub fn request_url(base_url: &str, spec: &RequestSpec, range: &DateRange) -> Result<Url> {
    Url::parse_with_params(base_url, spec.query(range))
        .with_context(|| format!("Invalid base URL: {base_url}"))
}

#[async_trait]
impl ClimateSource for PowerSource {
    async fn fetch_daily(&self, spec: &RequestSpec, range: &DateRange) -> Result<String, FetchError> {
        let res = self
            .http
            .get(&self.base_url)
            .query(&spec.query(range))
            .send()
            .await
            .map_err(|source| FetchError::Transport { url: self.base_url.clone(), source })?;

        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(|source| FetchError::Transport { url: self.base_url.clone(), source })?;

        if !status.is_success() {
            return Err(FetchError::status(status.as_u16(), &body));
        }

        Ok(body)
    }
}
