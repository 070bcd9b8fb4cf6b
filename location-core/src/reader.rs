//! Aggregation of all collectors into one report per query.

use anyhow::Result;
use std::collections::HashSet;
use tracing::{debug, info, warn};

use crate::{
    client::{CountriesClient, CurrencyClient, NewsClient, ProviderId, WeatherClient},
    collector::{
        CountryCollector, CountrySource, CurrencyCollector, CurrencySource,
        DEFAULT_BASE_CURRENCY, NewsCollector, NewsSource, WeatherCollector, WeatherSource,
    },
    config::Config,
    model::{CountryDto, LocationDto, LocationInfoDto, NewsInfoDto},
};

#[derive(Debug)]
pub struct Reader {
    country: Box<dyn CountrySource>,
    weather: Box<dyn WeatherSource>,
    currency: Box<dyn CurrencySource>,
    /// `None` when news is not configured; reports then carry `news: None`.
    news: Option<Box<dyn NewsSource>>,
}

impl Reader {
    pub fn new(
        country: Box<dyn CountrySource>,
        weather: Box<dyn WeatherSource>,
        currency: Box<dyn CurrencySource>,
        news: Option<Box<dyn NewsSource>>,
    ) -> Self {
        Self {
            country,
            weather,
            currency,
            news,
        }
    }

    /// Reader backed by the real providers, with keys taken from `config`.
    ///
    /// Country, weather and currency keys are required. Without a newsapi key
    /// the reader still works, just without news.
    pub fn from_config(config: &Config) -> Result<Self> {
        let apilayer = config.require_api_key(ProviderId::Apilayer)?;
        let openweather = config.require_api_key(ProviderId::OpenWeather)?;

        let news = match config.provider_api_key(ProviderId::NewsApi) {
            Some(newsapi) => {
                let client = NewsClient::new(newsapi.to_owned());
                let collector = NewsCollector::with_page_size(client, config.news_page_size());
                Some(Box::new(collector) as Box<dyn NewsSource>)
            }
            None => {
                warn!(
                    "No API key for {}, news will be skipped. Set {} to enable it.",
                    ProviderId::NewsApi,
                    ProviderId::NewsApi.env_var()
                );
                None
            }
        };

        Ok(Self::new(
            Box::new(CountryCollector::new(CountriesClient::new(apilayer.to_owned()))),
            Box::new(WeatherCollector::new(WeatherClient::new(openweather.to_owned()))),
            Box::new(CurrencyCollector::new(CurrencyClient::new(apilayer.to_owned()))),
            news,
        ))
    }

    /// Everything known about `location`, or `None` when the country cannot be
    /// resolved or its weather or exchange rates are unavailable.
    ///
    /// News is best effort: when it cannot be fetched, `news` is `None`.
    /// Transport errors from the required sources always win over absence.
    pub async fn find(&self, location: &str) -> Result<Option<LocationInfoDto>> {
        let Some(country) = self.country.collect(location).await? else {
            info!(location, "Country not found");
            return Ok(None);
        };

        let (weather, currency_rates, news) = tokio::join!(
            self.weather.collect(&country),
            self.currency.collect(DEFAULT_BASE_CURRENCY),
            self.news_for(&country),
        );
        let weather = weather?;
        let currency_rates = currency_rates?;

        let Some(weather) = weather else {
            info!(capital = %country.capital, "Weather not available");
            return Ok(None);
        };
        let Some(currency_rates) = currency_rates else {
            info!(base = DEFAULT_BASE_CURRENCY, "Exchange rates not available");
            return Ok(None);
        };

        Ok(Some(LocationInfoDto {
            location: country,
            weather,
            currency_rates,
            news,
        }))
    }

    async fn news_for(&self, country: &CountryDto) -> Option<Vec<NewsInfoDto>> {
        let source = self.news.as_ref()?;
        let location = LocationDto::from(country);
        let locations = HashSet::from([location.clone()]);

        match source.collect(&locations).await {
            Ok(mut news) => {
                let found = news.remove(&location);
                if found.is_none() {
                    debug!(location = %location.query(), "News not available");
                }
                found
            }
            Err(err) => {
                warn!(location = %location.query(), "Failed to fetch news: {err:#}");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::WeatherInfoDto;
    use anyhow::anyhow;
    use async_trait::async_trait;
    use chrono::{TimeZone, Utc};
    use Outcome::{Absent, Failed, Found};
    use std::{
        collections::HashMap,
        sync::{
            Arc,
            atomic::{AtomicUsize, Ordering},
        },
    };

    #[derive(Debug, Clone, Copy)]
    enum Outcome {
        Found,
        Absent,
        Failed,
    }

    fn sweden() -> CountryDto {
        CountryDto {
            capital: "Stockholm".into(),
            capital_latitude: Some(59.33),
            capital_longitude: Some(18.07),
            alpha2code: "SE".try_into().unwrap(),
            alt_spellings: vec!["SE".into(), "Kingdom of Sweden".into()],
            currencies: Default::default(),
            flag: "http://assets.promptapi.com/flags/SE.svg".into(),
            languages: Default::default(),
            name: "Sweden".into(),
            population: 9_894_888,
            area: Some(450_295.0),
            subregion: "Northern Europe".into(),
            timezones: vec!["UTC+01:00".into()],
        }
    }

    fn weather() -> WeatherInfoDto {
        WeatherInfoDto {
            temp: 4.2,
            pressure: 1011,
            humidity: 81,
            wind_speed: 3.6,
            description: "light rain".into(),
            visibility: 10_000.0,
            timezone: 1.0,
        }
    }

    fn news_item() -> NewsInfoDto {
        NewsInfoDto {
            title: "Snow in Stockholm".into(),
            description: "First snow of the season".into(),
            source: "Example Wire".into(),
            url: "https://news.example.com/snow".into(),
            published_at: Utc.with_ymd_and_hms(2023, 2, 21, 12, 56, 51).unwrap(),
        }
    }

    fn resolve<T>(outcome: Outcome, value: T) -> Result<Option<T>> {
        match outcome {
            Outcome::Found => Ok(Some(value)),
            Outcome::Absent => Ok(None),
            Outcome::Failed => Err(anyhow!("connection reset")),
        }
    }

    #[derive(Debug)]
    struct StubCountry(Outcome);

    #[async_trait]
    impl CountrySource for StubCountry {
        async fn collect(&self, _query: &str) -> Result<Option<CountryDto>> {
            resolve(self.0, sweden())
        }
    }

    #[derive(Debug)]
    struct StubWeather(Outcome, Arc<AtomicUsize>);

    #[async_trait]
    impl WeatherSource for StubWeather {
        async fn collect(&self, location: &CountryDto) -> Result<Option<WeatherInfoDto>> {
            self.1.fetch_add(1, Ordering::SeqCst);
            assert_eq!(location.capital, "Stockholm");
            resolve(self.0, weather())
        }
    }

    #[derive(Debug)]
    struct StubCurrency(Outcome, Arc<AtomicUsize>);

    #[async_trait]
    impl CurrencySource for StubCurrency {
        async fn collect(&self, base: &str) -> Result<Option<HashMap<String, f64>>> {
            self.1.fetch_add(1, Ordering::SeqCst);
            assert_eq!(base, DEFAULT_BASE_CURRENCY);
            resolve(self.0, HashMap::from([("SEK".to_string(), 0.17721)]))
        }
    }

    #[derive(Debug)]
    struct StubNews(Outcome, Arc<AtomicUsize>);

    #[async_trait]
    impl NewsSource for StubNews {
        async fn collect(
            &self,
            locations: &HashSet<LocationDto>,
        ) -> Result<HashMap<LocationDto, Vec<NewsInfoDto>>> {
            self.1.fetch_add(1, Ordering::SeqCst);
            match self.0 {
                Outcome::Found => Ok(locations
                    .iter()
                    .map(|l| (l.clone(), vec![news_item()]))
                    .collect()),
                Outcome::Absent => Ok(HashMap::new()),
                Outcome::Failed => Err(anyhow!("dns error")),
            }
        }
    }

    struct Harness {
        reader: Reader,
        calls: Arc<AtomicUsize>,
    }

    fn harness(
        country: Outcome,
        weather: Outcome,
        currency: Outcome,
        news: Outcome,
    ) -> Harness {
        let calls = Arc::new(AtomicUsize::new(0));
        let reader = Reader::new(
            Box::new(StubCountry(country)),
            Box::new(StubWeather(weather, calls.clone())),
            Box::new(StubCurrency(currency, calls.clone())),
            Some(Box::new(StubNews(news, calls.clone()))),
        );
        Harness { reader, calls }
    }

    #[tokio::test]
    async fn everything_found() {
        let h = harness(Found, Found, Found, Found);
        let info = h
            .reader
            .find("Stockholm")
            .await
            .unwrap()
            .expect("info expected");

        assert_eq!(info.location.alpha2code, "SE");
        assert_eq!(info.weather.description, "light rain");
        assert_eq!(info.currency_rates.get("SEK"), Some(&0.17721));
        assert_eq!(info.news, Some(vec![news_item()]));
        assert_eq!(h.calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn missing_country_short_circuits() {
        let h = harness(Absent, Found, Found, Found);

        assert!(h.reader.find("Nonexistent City").await.unwrap().is_none());
        assert_eq!(h.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn missing_weather_is_absent() {
        let h = harness(Found, Absent, Found, Found);
        assert!(h.reader.find("Stockholm").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn missing_rates_are_absent() {
        let h = harness(Found, Found, Absent, Found);
        assert!(h.reader.find("Stockholm").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn missing_news_keeps_the_rest() {
        let h = harness(Found, Found, Found, Absent);
        let info = h
            .reader
            .find("Stockholm")
            .await
            .unwrap()
            .expect("info expected");

        assert_eq!(info.location.name, "Sweden");
        assert_eq!(info.news, None);
    }

    #[tokio::test]
    async fn failing_news_keeps_the_rest() {
        let h = harness(Found, Found, Found, Failed);
        let info = h
            .reader
            .find("Stockholm")
            .await
            .unwrap()
            .expect("info expected");

        assert_eq!(info.news, None);
    }

    #[tokio::test]
    async fn weather_transport_error_propagates() {
        let h = harness(Found, Failed, Found, Found);
        let err = h.reader.find("Stockholm").await.unwrap_err();

        assert!(err.to_string().contains("connection reset"));
    }

    #[tokio::test]
    async fn rates_error_is_not_hidden_by_missing_weather() {
        let h = harness(Found, Absent, Failed, Found);
        let err = h.reader.find("Stockholm").await.unwrap_err();

        assert!(err.to_string().contains("connection reset"));
    }

    #[tokio::test]
    async fn weather_error_is_not_hidden_by_missing_rates() {
        let h = harness(Found, Failed, Absent, Found);

        assert!(h.reader.find("Stockholm").await.is_err());
    }

    #[tokio::test]
    async fn country_transport_error_propagates() {
        let h = harness(Failed, Found, Found, Found);

        assert!(h.reader.find("Stockholm").await.is_err());
        assert_eq!(h.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn without_news_source_news_is_none() {
        let calls = Arc::new(AtomicUsize::new(0));
        let reader = Reader::new(
            Box::new(StubCountry(Outcome::Found)),
            Box::new(StubWeather(Outcome::Found, calls.clone())),
            Box::new(StubCurrency(Outcome::Found, calls.clone())),
            None,
        );

        let info = reader
            .find("Stockholm")
            .await
            .unwrap()
            .expect("info expected");

        assert_eq!(info.location.alpha2code, "SE");
        assert_eq!(info.news, None);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn from_config_requires_country_weather_and_rates_keys() {
        let mut cfg = Config::default();
        cfg.upsert_provider_api_key(ProviderId::Apilayer, "LAYER".into());

        let err = Reader::from_config(&cfg).unwrap_err();
        assert!(err.to_string().contains("openweather"));

        cfg.upsert_provider_api_key(ProviderId::OpenWeather, "OW".into());
        let reader = Reader::from_config(&cfg).expect("newsapi key is optional");
        assert!(reader.news.is_none());

        cfg.upsert_provider_api_key(ProviderId::NewsApi, "NEWS".into());
        let reader = Reader::from_config(&cfg).unwrap();
        assert!(reader.news.is_some());
    }
}
