//! Thin HTTP clients for the external data providers.
//!
//! Every client returns `Ok(None)` when the provider answers with a non-success
//! status and only errors on transport or decoding problems.

use anyhow::{Context, Result};
use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;
use std::fmt::Debug;
use tracing::debug;

pub mod countries;
pub mod currency;
pub mod news;
pub mod weather;

pub use countries::CountriesClient;
pub use currency::CurrencyClient;
pub use news::NewsClient;
pub use weather::WeatherClient;

/// Providers that need an API key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderId {
    /// apilayer.com, serves both country and currency data.
    Apilayer,
    OpenWeather,
    NewsApi,
}

impl ProviderId {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderId::Apilayer => "apilayer",
            ProviderId::OpenWeather => "openweather",
            ProviderId::NewsApi => "newsapi",
        }
    }

    /// Environment variable that overrides the configured key.
    pub fn env_var(&self) -> &'static str {
        match self {
            ProviderId::Apilayer => "APILAYER_API_KEY",
            ProviderId::OpenWeather => "OPENWEATHER_API_KEY",
            ProviderId::NewsApi => "NEWSAPI_API_KEY",
        }
    }

    pub const fn all() -> &'static [ProviderId] {
        &[ProviderId::Apilayer, ProviderId::OpenWeather, ProviderId::NewsApi]
    }
}

impl std::fmt::Display for ProviderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for ProviderId {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let lower = value.to_lowercase();

        match lower.as_str() {
            "apilayer" => Ok(ProviderId::Apilayer),
            "openweather" => Ok(ProviderId::OpenWeather),
            "newsapi" => Ok(ProviderId::NewsApi),
            _ => Err(anyhow::anyhow!(
                "Unknown provider '{value}'. Supported providers: apilayer, openweather, newsapi."
            )),
        }
    }
}

/// Common surface of every provider client.
pub trait ProviderClient: Send + Sync + Debug {
    /// Endpoint the client talks to.
    fn base_url(&self) -> &str;
}

/// Send `request` and decode a successful JSON body.
///
/// A non-2xx status is reported as `Ok(None)`.
pub(crate) async fn fetch_json<T: DeserializeOwned>(
    request: RequestBuilder,
    provider: &str,
) -> Result<Option<T>> {
    let res = request
        .send()
        .await
        .with_context(|| format!("Failed to send request to {provider}"))?;

    let status = res.status();
    debug!(%status, url = %res.url(), "{provider} responded");

    let body = res
        .text()
        .await
        .with_context(|| format!("Failed to read {provider} response body"))?;

    if !status.is_success() {
        debug!(
            "{provider} request failed with status {status}: {}",
            truncate_body(&body)
        );
        return Ok(None);
    }

    let parsed = serde_json::from_str(&body)
        .with_context(|| format!("Failed to parse {provider} JSON"))?;

    Ok(Some(parsed))
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.chars().count() > MAX {
        format!("{}...", body.chars().take(MAX).collect::<String>())
    } else {
        body.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_id_as_str_roundtrip() {
        for id in ProviderId::all() {
            let s = id.as_str();
            let parsed = ProviderId::try_from(s).expect("roundtrip should succeed");
            assert_eq!(*id, parsed);
        }
    }

    #[test]
    fn provider_id_is_case_insensitive() {
        assert_eq!(
            ProviderId::try_from("OpenWeather").unwrap(),
            ProviderId::OpenWeather
        );
    }

    #[test]
    fn unknown_provider_error() {
        let err = ProviderId::try_from("doesnotexist").unwrap_err();
        assert!(err.to_string().contains("Unknown provider"));
    }

    #[test]
    fn truncate_body_keeps_short_bodies() {
        assert_eq!(truncate_body("not found"), "not found");
    }

    #[test]
    fn truncate_body_cuts_on_char_boundaries() {
        let body = "ё".repeat(300);
        let cut = truncate_body(&body);
        assert!(cut.ends_with("..."));
        assert_eq!(cut.chars().count(), 203);
    }
}
