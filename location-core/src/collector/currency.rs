use anyhow::Result;
use async_trait::async_trait;
use std::collections::HashMap;

use super::CurrencySource;
use crate::{client::CurrencyClient, model::CurrencyRatesDto};

/// Rates are quoted against the rouble unless asked otherwise.
pub const DEFAULT_BASE_CURRENCY: &str = "rub";

#[derive(Debug, Clone)]
pub struct CurrencyCollector {
    client: CurrencyClient,
}

impl CurrencyCollector {
    pub fn new(client: CurrencyClient) -> Self {
        Self { client }
    }

    pub async fn read(&self, base: &str) -> Result<Option<CurrencyRatesDto>> {
        let response = self.client.rates(base).await?;

        Ok(response.map(|r| CurrencyRatesDto {
            base: r.base,
            date: r.date,
            rates: r.rates,
        }))
    }
}

#[async_trait]
impl CurrencySource for CurrencyCollector {
    async fn collect(&self, base: &str) -> Result<Option<HashMap<String, f64>>> {
        Ok(self.read(base).await?.map(|rates| rates.rates))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    #[tokio::test]
    async fn read_keeps_base_and_date() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/latest")
                    .query_param("base", DEFAULT_BASE_CURRENCY);
                then.status(200).json_body(json!({
                    "success": true,
                    "timestamp": 1663146903,
                    "base": "RUB",
                    "date": "2022-09-14",
                    "rates": {"EUR": 0.016503, "SEK": 0.17721}
                }));
            })
            .await;

        let client = CurrencyClient::with_base_url("KEY".into(), server.url("/latest"));
        let collector = CurrencyCollector::new(client);

        let rates = collector
            .read(DEFAULT_BASE_CURRENCY)
            .await
            .unwrap()
            .expect("rates expected");
        assert_eq!(rates.base, "RUB");
        assert_eq!(rates.date, "2022-09-14");

        let flat = collector
            .collect(DEFAULT_BASE_CURRENCY)
            .await
            .unwrap()
            .expect("rates expected");
        assert_eq!(flat.len(), 2);
        assert_eq!(flat.get("EUR"), Some(&0.016503));
    }
}
