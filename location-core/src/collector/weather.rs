use anyhow::Result;
use async_trait::async_trait;

use super::WeatherSource;
use crate::{
    client::{WeatherClient, weather::OwCurrentResponse},
    model::{CountryDto, WeatherInfoDto},
};

#[derive(Debug, Clone)]
pub struct WeatherCollector {
    client: WeatherClient,
}

impl WeatherCollector {
    pub fn new(client: WeatherClient) -> Self {
        Self { client }
    }

    pub async fn read(&self, location: &CountryDto) -> Result<Option<WeatherInfoDto>> {
        let query = format!("{},{}", location.capital, location.alpha2code);
        let response = self.client.current(&query).await?;
        Ok(response.map(WeatherInfoDto::from))
    }
}

#[async_trait]
impl WeatherSource for WeatherCollector {
    async fn collect(&self, location: &CountryDto) -> Result<Option<WeatherInfoDto>> {
        self.read(location).await
    }
}

impl From<OwCurrentResponse> for WeatherInfoDto {
    fn from(response: OwCurrentResponse) -> Self {
        let description = response
            .weather
            .into_iter()
            .next()
            .map(|w| w.description)
            .unwrap_or_else(|| "Unknown".to_string());

        Self {
            temp: response.main.temp,
            pressure: response.main.pressure,
            humidity: response.main.humidity,
            wind_speed: response.wind.speed,
            description,
            visibility: response.visibility.unwrap_or_default(),
            timezone: response.timezone as f64 / 3600.0,
        }
    }
}
