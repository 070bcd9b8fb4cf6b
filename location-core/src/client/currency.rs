use anyhow::Result;
use reqwest::Client;
use serde::Deserialize;
use std::collections::HashMap;
use tracing::debug;

use super::{ProviderClient, fetch_json};

pub const DEFAULT_BASE_URL: &str = "https://api.apilayer.com/fixer/latest";

/// Latest exchange rates from the apilayer Fixer API.
#[derive(Debug, Clone)]
pub struct CurrencyClient {
    api_key: String,
    base_url: String,
    http: Client,
}

impl CurrencyClient {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    pub fn with_base_url(api_key: String, base_url: impl Into<String>) -> Self {
        Self {
            api_key,
            base_url: base_url.into(),
            http: Client::new(),
        }
    }

    /// Rates for one unit of `base`.
    ///
    /// Fixer reports some failures with a 2xx status and `success: false`;
    /// those are treated like any other unsuccessful response.
    pub async fn rates(&self, base: &str) -> Result<Option<FixerResponse>> {
        debug!(base, "Fetching exchange rates");

        let request = self
            .http
            .get(&self.base_url)
            .query(&[("base", base)])
            .header("apikey", self.api_key.as_str());

        let response: Option<FixerResponse> = fetch_json(request, "apilayer fixer").await?;
        Ok(response.filter(|r| r.success))
    }
}

impl ProviderClient for CurrencyClient {
    fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct FixerResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub base: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub rates: HashMap<String, f64>,
}
