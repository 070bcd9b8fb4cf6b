use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{
    collections::{BTreeSet, HashMap},
    fmt,
};

use crate::error::ValidationError;

/// ISO 3166-1 alpha-2 country code. Always two ASCII letters, kept as given.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Alpha2Code(String);

impl Alpha2Code {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Alpha2Code {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if value.chars().count() == 2 && value.chars().all(|c| c.is_ascii_alphabetic()) {
            Ok(Self(value))
        } else {
            Err(ValidationError::Alpha2Code(value))
        }
    }
}

impl TryFrom<&str> for Alpha2Code {
    type Error = ValidationError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::try_from(value.to_string())
    }
}

impl From<Alpha2Code> for String {
    fn from(code: Alpha2Code) -> Self {
        code.0
    }
}

impl fmt::Display for Alpha2Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl PartialEq<&str> for Alpha2Code {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Key used to look up news for a place.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct LocationDto {
    pub capital: String,
    pub alpha2code: Alpha2Code,
}

impl LocationDto {
    pub fn new(capital: impl Into<String>, alpha2code: &str) -> Result<Self, ValidationError> {
        Ok(Self {
            capital: capital.into(),
            alpha2code: Alpha2Code::try_from(alpha2code)?,
        })
    }

    /// Query text understood by the news provider, e.g. `Stockholm, SE`.
    pub fn query(&self) -> String {
        format!("{}, {}", self.capital, self.alpha2code)
    }
}

impl From<&CountryDto> for LocationDto {
    fn from(country: &CountryDto) -> Self {
        Self {
            capital: country.capital.clone(),
            alpha2code: country.alpha2code.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct CurrencyInfoDto {
    pub code: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct LanguagesInfoDto {
    pub name: String,
    pub native_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CountryDto {
    pub capital: String,
    pub capital_latitude: Option<f64>,
    pub capital_longitude: Option<f64>,
    pub alpha2code: Alpha2Code,
    pub alt_spellings: Vec<String>,
    pub currencies: BTreeSet<CurrencyInfoDto>,
    pub flag: String,
    pub languages: BTreeSet<LanguagesInfoDto>,
    pub name: String,
    pub population: u64,
    pub area: Option<f64>,
    pub subregion: String,
    pub timezones: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurrencyRatesDto {
    pub base: String,
    pub date: String,
    pub rates: HashMap<String, f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherInfoDto {
    pub temp: f64,
    pub pressure: u32,
    pub humidity: u8,
    pub wind_speed: f64,
    pub description: String,
    pub visibility: f64,
    /// UTC offset in hours, may be fractional (e.g. 5.5).
    pub timezone: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewsInfoDto {
    pub title: String,
    pub description: String,
    pub source: String,
    pub url: String,
    pub published_at: DateTime<Utc>,
}

/// Everything known about one place, built once per query.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LocationInfoDto {
    pub location: CountryDto,
    pub weather: WeatherInfoDto,
    pub currency_rates: HashMap<String, f64>,
    /// `None` when the news fetch failed, empty when there simply was no news.
    pub news: Option<Vec<NewsInfoDto>>,
}
