use anyhow::{Context, Result, anyhow};
use reqwest::{Client, Url};
use serde::Deserialize;
use tracing::debug;

use super::{ProviderClient, fetch_json};

pub const DEFAULT_BASE_URL: &str = "https://api.apilayer.com/geo/country";

/// Country search on the apilayer geo API.
#[derive(Debug, Clone)]
pub struct CountriesClient {
    api_key: String,
    base_url: String,
    http: Client,
}

impl CountriesClient {
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

    /// Countries whose name matches `name`.
    pub async fn by_name(&self, name: &str) -> Result<Option<Vec<ApiCountry>>> {
        self.search("name", name).await
    }

    /// Countries whose capital matches `capital`.
    pub async fn by_capital(&self, capital: &str) -> Result<Option<Vec<ApiCountry>>> {
        self.search("capital", capital).await
    }

    async fn search(&self, field: &str, term: &str) -> Result<Option<Vec<ApiCountry>>> {
        let mut url = Url::parse(&self.base_url)
            .with_context(|| format!("Invalid countries base URL: {}", self.base_url))?;
        url.path_segments_mut()
            .map_err(|_| anyhow!("Countries base URL cannot take a path: {}", self.base_url))?
            .pop_if_empty()
            .push(field)
            .push(term);

        debug!(field, term, "Searching countries");

        let request = self.http.get(url).header("apikey", self.api_key.as_str());
        fetch_json(request, "apilayer countries").await
    }
}

impl ProviderClient for CountriesClient {
    fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiCurrency {
    pub code: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiLanguage {
    pub name: String,
    #[serde(default)]
    pub native_name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiCountry {
    pub name: String,
    pub alpha2code: String,
    #[serde(default)]
    pub capital: Option<String>,
    #[serde(default)]
    pub alt_spellings: Vec<String>,
    #[serde(default)]
    pub currencies: Vec<ApiCurrency>,
    #[serde(default)]
    pub flag: String,
    #[serde(default)]
    pub languages: Vec<ApiLanguage>,
    #[serde(default)]
    pub population: u64,
    #[serde(default)]
    pub area: Option<f64>,
    #[serde(default)]
    pub subregion: String,
    #[serde(default)]
    pub timezones: Vec<String>,
    /// `[latitude, longitude]` when the provider knows it.
    #[serde(default)]
    pub latlng: Vec<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_base_url() {
        let client = CountriesClient::new("KEY".into());
        assert_eq!(client.base_url(), DEFAULT_BASE_URL);
    }

    #[test]
    fn parses_sparse_country() {
        let country: ApiCountry =
            serde_json::from_str(r#"{"name": "Antarctica", "alpha2code": "AQ"}"#).unwrap();

        assert_eq!(country.capital, None);
        assert!(country.currencies.is_empty());
        assert!(country.latlng.is_empty());
    }
}
