//! OpenWeatherMap current-weather client.

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Deserialize;

use super::{ensure_success, http_client};
use crate::domain::config::WeatherConfig;
use crate::domain::traits::WeatherSource;
use crate::domain::types::WeatherReport;

#[derive(Debug, Deserialize)]
struct OwmResponse {
    weather: Vec<OwmCondition>,
    main: OwmMain,
}

#[derive(Debug, Deserialize)]
struct OwmCondition {
    main: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct OwmMain {
    temp: f64,
    temp_min: f64,
    temp_max: f64,
}

pub struct OpenWeather {
    base_url: String,
    api_key: Option<String>,
    city_id: u64,
    city_name: String,
    units: String,
}

impl OpenWeather {
    pub fn from_config(config: &WeatherConfig) -> Self {
        Self {
            base_url: config.base_url.clone(),
            api_key: config.key.resolve(),
            city_id: config.city_id,
            city_name: config.city_name.clone(),
            units: config.units.clone(),
        }
    }

    fn to_report(&self, response: OwmResponse) -> Result<WeatherReport> {
        let condition = response
            .weather
            .into_iter()
            .next()
            .context("openweathermap: no weather conditions in response")?;
        Ok(WeatherReport {
            city: self.city_name.clone(),
            temperature: response.main.temp,
            min_temperature: response.main.temp_min,
            max_temperature: response.main.temp_max,
            condition: condition.main,
            condition_detail: condition.description,
        })
    }
}

#[async_trait]
impl WeatherSource for OpenWeather {
    async fn current(&self) -> Result<WeatherReport> {
        let response = http_client()
            .get(&self.base_url)
            .query(&[
                ("id", self.city_id.to_string()),
                ("appid", self.api_key.clone().unwrap_or_default()),
                ("units", self.units.clone()),
            ])
            .send()
            .await
            .context("openweathermap: HTTP request failed")?;

        let body: OwmResponse = ensure_success("openweathermap", response)
            .await?
            .json()
            .await
            .context("openweathermap: failed to parse response")?;
        self.to_report(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "weather": [{"id": 803, "main": "Clouds", "description": "broken clouds", "icon": "04d"}],
        "main": {"temp": 12.3, "feels_like": 11.0, "temp_min": 10.0, "temp_max": 14.1, "pressure": 1012},
        "name": "Toronto"
    }"#;

    #[test]
    fn test_parses_sample_payload() {
        let source = OpenWeather::from_config(&WeatherConfig::default());
        let parsed: OwmResponse = serde_json::from_str(SAMPLE).unwrap();
        let report = source.to_report(parsed).unwrap();
        assert_eq!(report.city, "Toronto");
        assert_eq!(report.temperature, 12.3);
        assert_eq!(report.max_temperature, 14.1);
        assert_eq!(report.condition, "Clouds");
        assert_eq!(report.condition_detail, "broken clouds");
    }

    #[test]
    fn test_empty_conditions_is_an_error() {
        let source = OpenWeather::from_config(&WeatherConfig::default());
        let parsed: OwmResponse =
            serde_json::from_str(r#"{"weather": [], "main": {"temp": 1.0, "temp_min": 0.0, "temp_max": 2.0}}"#)
                .unwrap();
        assert!(source.to_report(parsed).is_err());
    }
}
