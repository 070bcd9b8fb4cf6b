use anyhow::Result;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use super::{ProviderClient, fetch_json};

pub const DEFAULT_BASE_URL: &str = "https://newsapi.org/v2/everything";

/// Article search on newsapi.org.
#[derive(Debug, Clone)]
pub struct NewsClient {
    api_key: String,
    base_url: String,
    http: Client,
}

impl NewsClient {
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

    /// Newest `page_size` articles matching `query`.
    pub async fn everything(&self, query: &str, page_size: usize) -> Result<Option<NewsResponse>> {
        debug!(query, page_size, "Fetching news");

        let page_size = page_size.to_string();
        let request = self.http.get(&self.base_url).query(&[
            ("q", query),
            ("pageSize", page_size.as_str()),
            ("sortBy", "publishedAt"),
            ("apiKey", self.api_key.as_str()),
        ]);

        let response: Option<NewsResponse> = fetch_json(request, "NewsAPI").await?;
        Ok(response.filter(|r| r.status == "ok"))
    }
}

impl ProviderClient for NewsClient {
    fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewsSourceRef {
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub source: NewsSourceRef,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    pub url: String,
    pub published_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsResponse {
    pub status: String,
    #[serde(default)]
    pub total_results: u64,
    #[serde(default)]
    pub articles: Vec<Article>,
}
