//! Core library for the `location` CLI.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - Clients for the country, weather, currency and news providers
//! - Collectors that turn provider payloads into DTOs
//! - The reader that merges everything into one report per query
//!
//! It is used by `location-cli`, but can also be reused by other binaries or services.

pub mod client;
pub mod collector;
pub mod config;
pub mod error;
pub mod model;
pub mod reader;

pub use client::ProviderId;
pub use config::{Config, ProviderConfig};
pub use error::ValidationError;
pub use model::{
    Alpha2Code, CountryDto, CurrencyInfoDto, CurrencyRatesDto, LanguagesInfoDto, LocationDto,
    LocationInfoDto, NewsInfoDto, WeatherInfoDto,
};
pub use reader::Reader;
