//! Per-domain collectors turning provider payloads into DTOs.
//!
//! The reader only sees the `*Source` traits, so any of them can be swapped
//! for a stub.

use anyhow::Result;
use async_trait::async_trait;
use std::{
    collections::{HashMap, HashSet},
    fmt::Debug,
};

use crate::model::{CountryDto, LocationDto, NewsInfoDto, WeatherInfoDto};

pub mod country;
pub mod currency;
pub mod news;
pub mod weather;

pub use country::CountryCollector;
pub use currency::{CurrencyCollector, DEFAULT_BASE_CURRENCY};
pub use news::NewsCollector;
pub use weather::WeatherCollector;

#[async_trait]
pub trait CountrySource: Send + Sync + Debug {
    /// Resolve free text (city and/or country) to a country.
    async fn collect(&self, query: &str) -> Result<Option<CountryDto>>;
}

#[async_trait]
pub trait WeatherSource: Send + Sync + Debug {
    /// Current weather in the country's capital.
    async fn collect(&self, location: &CountryDto) -> Result<Option<WeatherInfoDto>>;
}

#[async_trait]
pub trait CurrencySource: Send + Sync + Debug {
    /// Currency code to rate, relative to `base`.
    async fn collect(&self, base: &str) -> Result<Option<HashMap<String, f64>>>;
}

#[async_trait]
pub trait NewsSource: Send + Sync + Debug {
    /// Latest news per location. Locations whose fetch failed are left out.
    async fn collect(
        &self,
        locations: &HashSet<LocationDto>,
    ) -> Result<HashMap<LocationDto, Vec<NewsInfoDto>>>;
}
