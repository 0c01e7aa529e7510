//! # Domain Types
//!
//! Common data structures passed between the parser, the dispatcher and the responders.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// A message as it arrives from the chat transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inbound {
    pub sender: String,
    pub text: String,
}

impl Inbound {
    pub fn new(sender: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            sender: sender.into(),
            text: text.into(),
        }
    }
}

/// Tokenized form of a message after the arity rules have been applied.
///
/// `action` and `detail` are either both present (complex request) or both absent (simple request).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedRequest {
    pub keyword: String,
    pub action: Option<String>,
    pub detail: Option<String>,
}

impl ParsedRequest {
    pub fn simple(keyword: impl Into<String>) -> Self {
        Self {
            keyword: keyword.into(),
            action: None,
            detail: None,
        }
    }

    pub fn complex(
        keyword: impl Into<String>,
        action: impl Into<String>,
        detail: impl Into<String>,
    ) -> Self {
        Self {
            keyword: keyword.into(),
            action: Some(action.into()),
            detail: Some(detail.into()),
        }
    }
}

/// Everything a responder gets to see for a single dispatch.
///
/// Built fresh for every message and handed to `Responder::respond` by reference,
/// so responders never keep per-request state between calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    pub sender: String,
    pub request: ParsedRequest,
}

impl RequestContext {
    pub fn new(sender: impl Into<String>, request: ParsedRequest) -> Self {
        Self {
            sender: sender.into(),
            request,
        }
    }

    pub fn action(&self) -> Option<&str> {
        self.request.action.as_deref()
    }

    pub fn detail(&self) -> Option<&str> {
        self.request.detail.as_deref()
    }
}

/// Notes keyed by sender id. The on-disk shape of the note store.
pub type NoteBook = HashMap<String, Vec<String>>;

/// Current conditions for a single city.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReport {
    pub city: String,
    pub temperature: f64,
    pub min_temperature: f64,
    pub max_temperature: f64,
    pub condition: String,
    pub condition_detail: String,
}

/// One trading day of a daily time series. Values are kept as the service formats them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyBar {
    pub open: String,
    pub high: String,
    pub low: String,
    pub close: String,
    pub volume: String,
}

/// Daily bars keyed by `yyyy-mm-dd`.
pub type DailySeries = BTreeMap<String, DailyBar>;
