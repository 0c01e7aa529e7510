//! # Request Router
//!
//! Ties the parser and the registry together. Every incoming message runs one full cycle:
//! parse, look up the responder, hand it a fresh `RequestContext`, and collect its reply.
//! Nothing in here returns an error to the transport; every failure ends as "no reply".

use std::sync::Arc;

use anyhow::Result;

use crate::application::parsing::{NoMatchReason, parse_request};
use crate::application::registry::ResponderRegistry;
use crate::domain::traits::ChatProvider;
use crate::domain::types::{Inbound, RequestContext};
use crate::strings::logs;

/// How a single dispatch cycle ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// The message did not select any responder.
    NoMatch(NoMatchReason),
    /// A responder was invoked but chose not to reply.
    Declined { keyword: String },
    /// A responder was invoked and its collaborator failed.
    Failed { keyword: String },
    Replied { keyword: String, reply: String },
}

impl DispatchOutcome {
    /// The text to send back, if any.
    pub fn reply(&self) -> Option<&str> {
        match self {
            DispatchOutcome::Replied { reply, .. } => Some(reply),
            _ => None,
        }
    }
}

/// Shared entry point for every transport. Cheap to clone.
#[derive(Clone)]
pub struct Dispatcher {
    registry: Arc<ResponderRegistry>,
}

impl Dispatcher {
    pub fn new(registry: Arc<ResponderRegistry>) -> Self {
        Self { registry }
    }

    pub async fn dispatch(&self, sender: &str, text: &str) -> DispatchOutcome {
        tracing::info!("{}", logs::request_received(sender, text));

        let (responder, request) = match parse_request(&self.registry, text) {
            Ok(found) => found,
            Err(reason) => {
                tracing::info!("{} ({})", logs::NOT_A_VALID_REQUEST, reason);
                return DispatchOutcome::NoMatch(reason);
            }
        };

        let keyword = request.keyword.clone();
        tracing::info!(
            "Request type: {} action={:?} detail={:?}",
            keyword,
            request.action,
            request.detail
        );

        let ctx = RequestContext::new(sender, request);
        match responder.respond(&ctx).await {
            Ok(Some(reply)) if !reply.is_empty() => {
                tracing::info!("Respond: {}", reply);
                DispatchOutcome::Replied { keyword, reply }
            }
            Ok(_) => {
                tracing::info!("Responder '{}' declined to reply", keyword);
                DispatchOutcome::Declined { keyword }
            }
            Err(e) => {
                tracing::error!("Responder '{}' failed: {:#}", keyword, e);
                DispatchOutcome::Failed { keyword }
            }
        }
    }

    pub async fn dispatch_inbound(&self, message: &Inbound) -> DispatchOutcome {
        self.dispatch(&message.sender, &message.text).await
    }

    /// Dispatch and send any reply through `chat` as a notice.
    pub async fn route<C>(&self, chat: &C, message: &Inbound) -> Result<DispatchOutcome>
    where
        C: ChatProvider + ?Sized,
    {
        let outcome = self.dispatch_inbound(message).await;
        if let Some(reply) = outcome.reply() {
            chat.send_notice(reply)
                .await
                .map_err(|e| anyhow::anyhow!(logs::send_failed(&chat.room_id(), &e)))?;
        }
        Ok(outcome)
    }
}
