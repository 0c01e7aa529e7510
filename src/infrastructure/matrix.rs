//! # Matrix Service Adapter
//!
//! Implements the `ChatProvider` trait for the Matrix protocol using the `matrix_sdk`.
//! Replies go out as notices: only text messages are dispatched, so the bot never
//! reads its own replies back as requests, even with `allow_self` on.

use anyhow::Result;
use async_trait::async_trait;
use matrix_sdk::room::Room;
use matrix_sdk::ruma::OwnedEventId;
use matrix_sdk::ruma::api::client::receipt::create_receipt::v3::ReceiptType;
use matrix_sdk::ruma::events::receipt::ReceiptThread;
use matrix_sdk::ruma::events::room::message::RoomMessageEventContent;

use crate::domain::traits::ChatProvider;

#[derive(Clone)]
pub struct MatrixService {
    room: Room,
}

impl MatrixService {
    pub fn new(room: Room) -> Self {
        Self { room }
    }

    /// Send a read receipt for a dispatched message
    pub async fn mark_read(&self, event_id: OwnedEventId) -> Result<()> {
        self.room
            .send_single_receipt(ReceiptType::Read, ReceiptThread::Unthreaded, event_id)
            .await?;
        Ok(())
    }
}

#[async_trait]
impl ChatProvider for MatrixService {
    fn room_id(&self) -> String {
        self.room.room_id().as_str().to_string()
    }

    async fn send_message(&self, content: &str) -> Result<String, String> {
        tracing::info!("Bot sending message to {}: {}", self.room_id(), content);
        self.room
            .send(RoomMessageEventContent::text_markdown(content))
            .await
            .map(|resp| resp.event_id.to_string())
            .map_err(|e| e.to_string())
    }

    async fn send_notice(&self, content: &str) -> Result<(), String> {
        tracing::debug!("Bot sending notice to {}", self.room_id());
        self.room
            .send(RoomMessageEventContent::notice_plain(content))
            .await
            .map(|_| ())
            .map_err(|e| e.to_string())
    }
}
