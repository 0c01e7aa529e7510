//! # Weather Responder
//!
//! Handles the `weather` keyword.
//! Replies with the current conditions of the configured city. The last report is reused
//! while it is younger than the cache window, so repeated requests do not hit the service.

use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::traits::{Responder, WeatherSource};
use crate::domain::types::{RequestContext, WeatherReport};
use crate::strings::messages;

pub struct WeatherResponder {
    source: Arc<dyn WeatherSource>,
    max_age: Duration,
    last: Mutex<Option<(Instant, WeatherReport)>>,
}

impl WeatherResponder {
    pub fn new(source: Arc<dyn WeatherSource>, max_age: Duration) -> Self {
        Self {
            source,
            max_age,
            last: Mutex::new(None),
        }
    }

    async fn report(&self) -> Result<WeatherReport> {
        let mut last = self.last.lock().await;
        if let Some((fetched_at, report)) = last.as_ref()
            && fetched_at.elapsed() < self.max_age
        {
            tracing::debug!("Using saved weather data");
            return Ok(report.clone());
        }

        tracing::info!("Retrieve new weather data");
        let report = self.source.current().await?;
        *last = Some((Instant::now(), report.clone()));
        Ok(report)
    }
}

#[async_trait]
impl Responder for WeatherResponder {
    fn key(&self) -> &str {
        "weather"
    }

    fn is_complex(&self) -> bool {
        false
    }

    async fn respond(&self, _ctx: &RequestContext) -> Result<Option<String>> {
        let r = self.report().await?;
        Ok(Some(messages::weather_report(
            &r.city,
            r.temperature,
            r.min_temperature,
            r.max_temperature,
            &r.condition,
            &r.condition_detail,
        )))
    }
}
