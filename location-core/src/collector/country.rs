use anyhow::Result;
use async_trait::async_trait;
use tracing::debug;

use super::CountrySource;
use crate::{
    client::{CountriesClient, countries::ApiCountry},
    error::ValidationError,
    model::{Alpha2Code, CountryDto, CurrencyInfoDto, LanguagesInfoDto},
};

#[derive(Debug, Clone)]
pub struct CountryCollector {
    client: CountriesClient,
}

impl CountryCollector {
    pub fn new(client: CountriesClient) -> Self {
        Self { client }
    }

    /// First country matching `query` by name or, failing that, by capital.
    ///
    /// `"Paris, France"` is tried as a whole first, then part by part.
    pub async fn read(&self, query: &str) -> Result<Option<CountryDto>> {
        for term in candidate_terms(query) {
            let mut found = first_with_capital(self.client.by_name(&term).await?);
            if found.is_none() {
                found = first_with_capital(self.client.by_capital(&term).await?);
            }

            if let Some(country) = found {
                debug!(term = %term, country = %country.name, "Resolved country");
                return Ok(Some(CountryDto::try_from(country)?));
            }
        }

        debug!(query, "No country matched");
        Ok(None)
    }
}

#[async_trait]
impl CountrySource for CountryCollector {
    async fn collect(&self, query: &str) -> Result<Option<CountryDto>> {
        self.read(query).await
    }
}

/// Weather and news are keyed by capital, so countries without one are skipped.
fn first_with_capital(countries: Option<Vec<ApiCountry>>) -> Option<ApiCountry> {
    countries?
        .into_iter()
        .find(|c| c.capital.as_deref().is_some_and(|cap| !cap.trim().is_empty()))
}

fn candidate_terms(query: &str) -> Vec<String> {
    let whole = query.trim();
    if whole.is_empty() {
        return Vec::new();
    }

    let mut terms = vec![whole.to_string()];
    for part in whole.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        if !terms.iter().any(|t| t == part) {
            terms.push(part.to_string());
        }
    }
    terms
}

impl TryFrom<ApiCountry> for CountryDto {
    type Error = ValidationError;

    fn try_from(country: ApiCountry) -> Result<Self, Self::Error> {
        let (capital_latitude, capital_longitude) = match country.latlng.as_slice() {
            [lat, lon] => (Some(*lat), Some(*lon)),
            _ => (None, None),
        };

        Ok(Self {
            capital: country.capital.unwrap_or_default(),
            capital_latitude,
            capital_longitude,
            alpha2code: Alpha2Code::try_from(country.alpha2code)?,
            alt_spellings: country.alt_spellings,
            currencies: country
                .currencies
                .into_iter()
                .map(|c| CurrencyInfoDto { code: c.code })
                .collect(),
            flag: country.flag,
            languages: country
                .languages
                .into_iter()
                .map(|l| LanguagesInfoDto {
                    name: l.name,
                    native_name: l.native_name,
                })
                .collect(),
            name: country.name,
            population: country.population,
            area: country.area,
            subregion: country.subregion,
            timezones: country.timezones,
        })
    }
}
