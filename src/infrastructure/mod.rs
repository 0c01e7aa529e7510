//! # Infrastructure Layer
//!
//! Handles interactions with external systems and services.
//! Implements the traits defined in the Domain layer (e.g., ChatProvider, NoteStore, WeatherSource).

pub mod console;
pub mod matrix;
pub mod services;
pub mod storage;
