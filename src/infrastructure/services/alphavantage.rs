//! Alpha Vantage daily time series client.

use std::collections::BTreeMap;

use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use serde::Deserialize;

use super::{ensure_success, http_client};
use crate::domain::config::StockConfig;
use crate::domain::traits::StockSource;
use crate::domain::types::{DailyBar, DailySeries};

const FUNCTION: &str = "TIME_SERIES_DAILY";

#[derive(Debug, Deserialize)]
struct DailyResponse {
    #[serde(rename = "Time Series (Daily)")]
    series: Option<BTreeMap<String, AvBar>>,
    /// Rate-limit and key problems come back as 200 with one of these set.
    #[serde(rename = "Note")]
    note: Option<String>,
    #[serde(rename = "Information")]
    information: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AvBar {
    #[serde(rename = "1. open")]
    open: String,
    #[serde(rename = "2. high")]
    high: String,
    #[serde(rename = "3. low")]
    low: String,
    #[serde(rename = "4. close")]
    close: String,
    #[serde(rename = "5. volume")]
    volume: String,
}

impl From<AvBar> for DailyBar {
    fn from(bar: AvBar) -> Self {
        Self {
            open: bar.open,
            high: bar.high,
            low: bar.low,
            close: bar.close,
            volume: bar.volume,
        }
    }
}

fn into_series(response: DailyResponse) -> Result<Option<DailySeries>> {
    if let Some(notice) = response.note.or(response.information) {
        bail!("alphavantage: {notice}");
    }
    Ok(response.series.map(|series| {
        series
            .into_iter()
            .map(|(date, bar)| (date, DailyBar::from(bar)))
            .collect()
    }))
}

pub struct AlphaVantage {
    base_url: String,
    api_key: Option<String>,
}

impl AlphaVantage {
    pub fn from_config(config: &StockConfig) -> Self {
        Self {
            base_url: config.base_url.clone(),
            api_key: config.key.resolve(),
        }
    }
}

#[async_trait]
impl StockSource for AlphaVantage {
    async fn daily(&self, symbol: &str) -> Result<Option<DailySeries>> {
        tracing::info!("Retrieve stock information for {}", symbol);
        let response = http_client()
            .get(&self.base_url)
            .query(&[
                ("function", FUNCTION),
                ("symbol", symbol),
                ("apikey", self.api_key.as_deref().unwrap_or_default()),
            ])
            .send()
            .await
            .context("alphavantage: HTTP request failed")?;

        let body: DailyResponse = ensure_success("alphavantage", response)
            .await?
            .json()
            .await
            .context("alphavantage: failed to parse response")?;
        into_series(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_series_payload() {
        let body: DailyResponse = serde_json::from_str(
            r#"{
                "Meta Data": {"2. Symbol": "MSFT"},
                "Time Series (Daily)": {
                    "2024-03-01": {"1. open": "411.27", "2. high": "415.87", "3. low": "410.88",
                                   "4. close": "415.50", "5. volume": "17823446"}
                }
            }"#,
        )
        .unwrap();
        let series = into_series(body).unwrap().unwrap();
        assert_eq!(series["2024-03-01"].close, "415.50");
        assert_eq!(series["2024-03-01"].volume, "17823446");
    }

    #[test]
    fn test_unknown_symbol_has_no_series() {
        let body: DailyResponse = serde_json::from_str(
            r#"{"Error Message": "Invalid API call. Please retry or visit the documentation."}"#,
        )
        .unwrap();
        assert_eq!(into_series(body).unwrap(), None);
    }

    #[test]
    fn test_rate_limit_note_is_an_error() {
        let body: DailyResponse =
            serde_json::from_str(r#"{"Note": "Thank you for using Alpha Vantage!"}"#).unwrap();
        assert!(into_series(body).is_err());
    }
}
