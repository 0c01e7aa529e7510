//! # Console Adapter
//!
//! A `ChatProvider` over stdin/stdout for running the bot locally without a homeserver.
//! Every line typed is dispatched as a message from the `console` sender.

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::sync::Mutex;

use crate::application::router::Dispatcher;
use crate::domain::traits::ChatProvider;
use crate::domain::types::Inbound;
use crate::strings::logs;

pub const CONSOLE_SENDER: &str = "console";

#[derive(Clone)]
pub struct ConsoleService {
    out: Arc<Mutex<tokio::io::Stdout>>,
}

impl ConsoleService {
    pub fn new() -> Self {
        Self {
            out: Arc::new(Mutex::new(tokio::io::stdout())),
        }
    }

    async fn write_block(&self, content: &str) -> Result<(), String> {
        let mut out = self.out.lock().await;
        out.write_all(format!("{content}\n").as_bytes())
            .await
            .map_err(|e| e.to_string())?;
        out.flush().await.map_err(|e| e.to_string())
    }

    /// Reads stdin until EOF, dispatching one message per line.
    pub async fn run(&self, dispatcher: &Dispatcher) -> Result<()> {
        tracing::info!("{}", logs::CONSOLE_READY);
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        while let Some(line) = lines.next_line().await? {
            if line.trim().is_empty() {
                continue;
            }
            let message = Inbound::new(CONSOLE_SENDER, line);
            if let Err(e) = dispatcher.route(self, &message).await {
                tracing::error!("Failed to route message: {}", e);
            }
        }
        Ok(())
    }
}

impl Default for ConsoleService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ChatProvider for ConsoleService {
    fn room_id(&self) -> String {
        CONSOLE_SENDER.to_string()
    }

    async fn send_message(&self, content: &str) -> Result<String, String> {
        self.write_block(content).await?;
        Ok(String::new())
    }

    async fn send_notice(&self, content: &str) -> Result<(), String> {
        self.write_block(content).await
    }
}
