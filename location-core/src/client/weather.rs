use anyhow::Result;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use super::{ProviderClient, fetch_json};

pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data/2.5/weather";

/// Current weather from OpenWeather, in metric units.
#[derive(Debug, Clone)]
pub struct WeatherClient {
    api_key: String,
    base_url: String,
    http: Client,
}

impl WeatherClient {
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

    /// `location` is an OpenWeather geocoding query such as `Stockholm,SE`.
    pub async fn current(&self, location: &str) -> Result<Option<OwCurrentResponse>> {
        debug!(location, "Fetching current weather");

        let request = self.http.get(&self.base_url).query(&[
            ("q", location),
            ("appid", self.api_key.as_str()),
            ("units", "metric"),
        ]);

        fetch_json(request, "OpenWeather").await
    }
}

impl ProviderClient for WeatherClient {
    fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct OwMain {
    pub temp: f64,
    pub pressure: u32,
    pub humidity: u8,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OwWeather {
    pub description: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OwWind {
    pub speed: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OwCurrentResponse {
    pub main: OwMain,
    #[serde(default)]
    pub weather: Vec<OwWeather>,
    pub wind: OwWind,
    /// Metres; missing in some responses.
    #[serde(default)]
    pub visibility: Option<f64>,
    /// Shift from UTC in seconds.
    #[serde(default)]
    pub timezone: i64,
}
