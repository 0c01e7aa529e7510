//! # Messages
//!
//! Contains constant strings and format functions for replies sent to users.

// Notes
pub const NOTE_EMPTY: &str = "Note cannot be empty";
pub const NOTE_SAVED: &str = "Successfully saved your note";
pub const NO_NOTES: &str = "No notes found";
pub const NO_NOTES_BY_INDEX: &str = "No notes found by given index";
pub const NOTES_CLEARED: &str = "Successfully deleted all the notes";

pub fn index_out_of_range(len: usize) -> String {
    format!("Index out of range, should be in [0, {}]", len.saturating_sub(1))
}

pub fn note_deleted(index: &str) -> String {
    format!("Successfully deleted note at index: {index}")
}

pub fn note_updated(index: &str) -> String {
    format!("Successfully updated note at index: {index}")
}

pub fn note_line(index: usize, note: &str) -> String {
    format!("{index}: {note}\n\n")
}

// Stocks
pub const INVALID_SYMBOL: &str = "Invalid stock symbol";
pub const MARKET_CLOSED_TODAY: &str = "Stock market closed, no data given.";
pub const INVALID_DATE: &str = "Invalid date, must be in format yyyy-mm-dd";

pub fn no_data_on(date: &str) -> String {
    format!("Date too long ago or stock market was closed at: {date}")
}

pub fn stock_bar(symbol: &str, date: &str, open: &str, high: &str, low: &str, close: &str, volume: &str) -> String {
    format!(
        "Stock symbol: {symbol}\nDate: {date}\nOpen: {open}\nHigh: {high}\nLow: {low}\nClose: {close}\nVolume: {volume}"
    )
}

// Weather
pub fn weather_report(
    city: &str,
    temp: f64,
    min: f64,
    max: f64,
    condition: &str,
    detail: &str,
) -> String {
    format!(
        "City: {city}\nCurrent temperature: {temp}°C\nLowest temperature: {min}°C\nHighest temperature: {max}°C\nCondition: {condition}\nCondition detail: {detail}\n"
    )
}
