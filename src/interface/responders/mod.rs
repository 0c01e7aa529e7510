//! # Responders
//!
//! One module per keyword. `builtin` assembles the default, ordered responder list that
//! the registry is built from at startup.

pub mod help;
pub mod note;
pub mod stock;
pub mod translate;
pub mod weather;

use std::sync::Arc;
use std::time::Duration;

use crate::domain::config::RespondersConfig;
use crate::domain::traits::Responder;
use crate::infrastructure::services::{
    alphavantage::AlphaVantage, google_translate::GoogleTranslate, openweather::OpenWeather,
};
use crate::infrastructure::storage::JsonNoteStore;

pub use help::HelpResponder;
pub use note::NoteResponder;
pub use stock::StockResponder;
pub use translate::TranslateResponder;
pub use weather::WeatherResponder;

/// The default responder set, wired to the real external services.
pub fn builtin(config: &RespondersConfig) -> Vec<Arc<dyn Responder>> {
    let mut responders: Vec<Arc<dyn Responder>> = Vec::new();
    responders.push(Arc::new(HelpResponder));
    responders.push(Arc::new(WeatherResponder::new(
        Arc::new(OpenWeather::from_config(&config.weather)),
        Duration::from_secs(config.weather.cache_minutes * 60),
    )));
    responders.push(Arc::new(NoteResponder::new(Arc::new(JsonNoteStore::new(
        &config.notes.path,
    )))));
    responders.push(Arc::new(StockResponder::new(Arc::new(
        AlphaVantage::from_config(&config.stock),
    ))));
    responders.push(Arc::new(TranslateResponder::new(Arc::new(
        GoogleTranslate::from_config(&config.translate),
    ))));
    responders
}
