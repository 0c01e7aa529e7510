//! # Domain Traits
//!
//! Abstract interfaces for core system components (Chat, Responders and their collaborators).
//! Allows for pluggable implementations in the Infrastructure and Interface layers.

use anyhow::Result;
use async_trait::async_trait;

use crate::domain::types::{DailySeries, NoteBook, RequestContext, WeatherReport};

/// Abstract interface for a Chat Provider (e.g., Matrix, Console)
#[async_trait]
pub trait ChatProvider: Send + Sync {
    /// Send a message to the room, returning the id of the sent event
    async fn send_message(&self, content: &str) -> Result<String, String>;

    /// Send a notice (bot output; never dispatched back into the bot)
    async fn send_notice(&self, content: &str) -> Result<(), String>;

    /// Get the current room ID
    fn room_id(&self) -> String;
}

/// A pluggable unit that answers to one keyword.
///
/// Simple responders are triggered by the bare keyword. Complex responders additionally
/// take an action from [`Responder::actions`] and a free-form detail.
#[async_trait]
pub trait Responder: Send + Sync {
    /// Keyword this responder answers to. Non-empty, no whitespace.
    fn key(&self) -> &str;

    /// `true` if the responder needs an action and a detail.
    fn is_complex(&self) -> bool;

    /// Legal action tokens. Empty for simple responders.
    fn actions(&self) -> &[&str] {
        &[]
    }

    /// Produce the reply for one request.
    ///
    /// `Ok(None)` means the request was understood but nothing should be sent back.
    /// `Err` is a collaborator failure; the dispatcher logs it and sends nothing.
    async fn respond(&self, ctx: &RequestContext) -> Result<Option<String>>;
}

/// Key-value persistence for user notes.
#[async_trait]
pub trait NoteStore: Send + Sync {
    async fn read(&self) -> Result<NoteBook>;
    async fn write(&self, notes: &NoteBook) -> Result<()>;
}

/// Source of current weather conditions.
#[async_trait]
pub trait WeatherSource: Send + Sync {
    async fn current(&self) -> Result<WeatherReport>;
}

/// Source of daily stock prices.
#[async_trait]
pub trait StockSource: Send + Sync {
    /// `Ok(None)` when the service does not know the symbol.
    async fn daily(&self, symbol: &str) -> Result<Option<DailySeries>>;
}

/// Text translation service.
#[async_trait]
pub trait Translator: Send + Sync {
    async fn translate(&self, text: &str, target_lang: &str) -> Result<String>;
}
