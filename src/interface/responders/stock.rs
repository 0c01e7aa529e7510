//! # Stock Responder
//!
//! Handles `stock track <symbol>` and `stock history <yyyy-mm-dd> <symbol>`.
//! Prices come from a daily time series; a day missing from the series means the market
//! was closed or the date is older than the series reaches.

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use chrono::{Local, NaiveDate};

use crate::domain::traits::{Responder, StockSource};
use crate::domain::types::{DailySeries, RequestContext};
use crate::strings::messages;

const ACTIONS: &[&str] = &["track", "history"];
const DATE_FORMAT: &str = "%Y-%m-%d";

pub struct StockResponder {
    source: Arc<dyn StockSource>,
}

impl StockResponder {
    pub fn new(source: Arc<dyn StockSource>) -> Self {
        Self { source }
    }

    async fn track(&self, detail: &str) -> Result<Option<String>> {
        let symbol = detail.trim();
        if symbol.is_empty() {
            return Ok(None);
        }
        let today = Local::now().format(DATE_FORMAT).to_string();
        let series = self.source.daily(symbol).await?;
        Ok(Some(track_reply(symbol, series.as_ref(), &today)))
    }

    async fn history(&self, detail: &str) -> Result<Option<String>> {
        let parts: Vec<&str> = detail.split_whitespace().collect();
        let [date, symbol] = parts.as_slice() else {
            return Ok(None);
        };
        if NaiveDate::parse_from_str(date, DATE_FORMAT).is_err() {
            return Ok(Some(messages::INVALID_DATE.to_string()));
        }
        let series = self.source.daily(symbol).await?;
        Ok(Some(history_reply(symbol, series.as_ref(), date)))
    }
}

fn bar_reply(symbol: &str, series: &DailySeries, date: &str) -> Option<String> {
    series.get(date).map(|bar| {
        messages::stock_bar(
            symbol, date, &bar.open, &bar.high, &bar.low, &bar.close, &bar.volume,
        )
    })
}

fn track_reply(symbol: &str, series: Option<&DailySeries>, today: &str) -> String {
    match series {
        None => messages::INVALID_SYMBOL.to_string(),
        Some(series) => bar_reply(symbol, series, today)
            .unwrap_or_else(|| messages::MARKET_CLOSED_TODAY.to_string()),
    }
}

fn history_reply(symbol: &str, series: Option<&DailySeries>, date: &str) -> String {
    match series {
        None => messages::INVALID_SYMBOL.to_string(),
        Some(series) => {
            bar_reply(symbol, series, date).unwrap_or_else(|| messages::no_data_on(date))
        }
    }
}

#[async_trait]
impl Responder for StockResponder {
    fn key(&self) -> &str {
        "stock"
    }

    fn is_complex(&self) -> bool {
        true
    }

    fn actions(&self) -> &[&str] {
        ACTIONS
    }

    async fn respond(&self, ctx: &RequestContext) -> Result<Option<String>> {
        match (ctx.action(), ctx.detail()) {
            (Some("track"), Some(detail)) => self.track(detail).await,
            (Some("history"), Some(detail)) => self.history(detail).await,
            _ => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::{DailyBar, ParsedRequest};

    fn series() -> DailySeries {
        let mut series = DailySeries::new();
        series.insert(
            "2024-03-01".to_string(),
            DailyBar {
                open: "180.0000".to_string(),
                high: "182.5000".to_string(),
                low: "179.1000".to_string(),
                close: "181.9000".to_string(),
                volume: "1234567".to_string(),
            },
        );
        series
    }

    struct KnownSymbol;

    #[async_trait]
    impl StockSource for KnownSymbol {
        async fn daily(&self, symbol: &str) -> Result<Option<DailySeries>> {
            Ok((symbol == "MSFT").then(series))
        }
    }

    async fn send(action: &str, detail: &str) -> Option<String> {
        let responder = StockResponder::new(Arc::new(KnownSymbol));
        let ctx = RequestContext::new("@alice", ParsedRequest::complex("stock", action, detail));
        responder.respond(&ctx).await.unwrap()
    }

    #[test]
    fn test_track_reply() {
        let s = series();
        assert_eq!(track_reply("X", None, "2024-03-01"), "Invalid stock symbol");
        assert_eq!(
            track_reply("MSFT", Some(&s), "2024-03-02"),
            "Stock market closed, no data given."
        );
        assert_eq!(
            track_reply("MSFT", Some(&s), "2024-03-01"),
            "Stock symbol: MSFT\nDate: 2024-03-01\nOpen: 180.0000\nHigh: 182.5000\n\
             Low: 179.1000\nClose: 181.9000\nVolume: 1234567"
        );
    }

    #[tokio::test]
    async fn test_history() {
        let reply = send("history", "2024-03-01 MSFT").await.unwrap();
        assert!(reply.starts_with("Stock symbol: MSFT\nDate: 2024-03-01\n"));

        assert_eq!(
            send("history", "2023-01-01 MSFT").await.as_deref(),
            Some("Date too long ago or stock market was closed at: 2023-01-01")
        );
        assert_eq!(
            send("history", "2024-03-01 NOPE").await.as_deref(),
            Some("Invalid stock symbol")
        );
        assert_eq!(
            send("history", "03/01/2024 MSFT").await.as_deref(),
            Some("Invalid date, must be in format yyyy-mm-dd")
        );
        assert_eq!(
            send("history", "2024-02-30 MSFT").await.as_deref(),
            Some("Invalid date, must be in format yyyy-mm-dd")
        );
    }

    #[tokio::test]
    async fn test_history_needs_exactly_two_tokens() {
        assert_eq!(send("history", "MSFT").await, None);
        assert_eq!(send("history", "2024-03-01 MSFT extra").await, None);
    }

    #[tokio::test]
    async fn test_track_unknown_symbol() {
        assert_eq!(send("track", "NOPE").await.as_deref(), Some("Invalid stock symbol"));
    }
}
