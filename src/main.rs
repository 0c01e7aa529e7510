//! # Main Entry Point
//!
//! Wires the bot together:
//! - Domain: Configuration, Types and Traits
//! - Application: Registry, Parser, Router, Access Policy
//! - Interface: The keyword responders
//! - Infrastructure: Matrix, Console, External Services, Note Storage
//!

#![recursion_limit = "256"]

mod application;
mod domain;
mod infrastructure;
mod interface;
mod strings;

use anyhow::{Context, Result};
use clap::Parser;
use matrix_sdk::{
    Client,
    config::SyncSettings,
    room::Room,
    ruma::events::room::{
        member::{MembershipState, StrippedRoomMemberEvent},
        message::{MessageType, SyncRoomMessageEvent},
    },
};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::application::access::AccessPolicy;
use crate::application::registry::ResponderRegistry;
use crate::application::router::Dispatcher;
use crate::domain::config::AppConfig;
use crate::domain::traits::ChatProvider;
use crate::domain::types::Inbound;
use crate::infrastructure::console::ConsoleService;
use crate::infrastructure::matrix::MatrixService;
use crate::strings::logs;

/// Keyword responder bot for Matrix rooms.
#[derive(Debug, Parser)]
#[command(name = "switchboard", version, about)]
struct Cli {
    /// Path to the YAML configuration file
    #[arg(long, default_value = "data/config.yaml")]
    config: PathBuf,

    /// Read requests from stdin instead of connecting to Matrix
    #[arg(long)]
    console: bool,

    /// Validate the configuration and responder set, then exit
    #[arg(long)]
    check: bool,
}

fn init_logging(log_dir: &str, console: bool) -> Result<tracing_appender::non_blocking::WorkerGuard> {
    use tracing_subscriber::Layer;
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    if !Path::new(log_dir).exists() {
        std::fs::create_dir_all(log_dir).context("Failed to create log directory")?;
    }

    // Clear previous session log
    let log_path = Path::new(log_dir).join("session.log");
    if log_path.exists() {
        let _ = std::fs::remove_file(&log_path);
    }

    let file_appender = tracing_appender::rolling::never(log_dir, "session.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        tracing_subscriber::EnvFilter::new(
            "info,matrix_sdk=warn,matrix_sdk_base=warn,matrix_sdk_crypto=error,ruma=warn,hyper=warn",
        )
    });

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false);

    // In console mode stdout carries the replies, so logs go to stderr
    let console_layer = if console {
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stdout)
            .boxed()
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(console_layer)
        .init();

    Ok(guard)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // 1. Load Configuration
    let config = AppConfig::load(&cli.config)?;

    // 2. Logging Setup
    let _guard = init_logging(&config.system.log_dir, cli.console)?;
    tracing::info!("Starting Switchboard...");
    tracing::info!("{}", logs::config_loaded(&config.services.matrix.username));

    // 3. Responders
    let registry = ResponderRegistry::from_responders(interface::responders::builtin(
        &config.responders,
    ))
    .context("Failed to register responders")?;
    tracing::info!("{}", logs::registered_keywords(&registry.keys()));

    if cli.check {
        println!("{}", registry.keys().join("\n"));
        return Ok(());
    }

    let dispatcher = Dispatcher::new(Arc::new(registry));

    if cli.console {
        return ConsoleService::new().run(&dispatcher).await;
    }

    run_matrix(config, dispatcher).await
}

async fn run_matrix(config: AppConfig, dispatcher: Dispatcher) -> Result<()> {
    let matrix = &config.services.matrix;
    let client = Client::builder()
        .homeserver_url(&matrix.homeserver)
        .build()
        .await?;

    client
        .matrix_auth()
        .login_username(&matrix.username, &matrix.password)
        .send()
        .await?;
    tracing::info!("Logged in as {}", matrix.username);

    if let Some(name) = &matrix.display_name
        && let Err(e) = client.account().set_display_name(Some(name.as_str())).await
    {
        tracing::warn!("Failed to set display name: {}", e);
    }

    tracing::info!("Accepted users (all when unrestricted): {:?}", config.bot.allowed_users);

    // Message Handler
    let start_time = std::time::SystemTime::now();
    let policy = Arc::new(AccessPolicy::from_config(&config.bot));
    let auto_mark_read = config.bot.auto_mark_read;

    client.add_event_handler(move |ev: SyncRoomMessageEvent, room: Room| {
        let dispatcher = dispatcher.clone();
        let policy = policy.clone();

        async move {
            let Some(original_msg) = ev.as_original() else {
                return;
            };

            // Ignore events older than start_time
            let ts = ev.origin_server_ts();
            let event_time =
                std::time::UNIX_EPOCH + std::time::Duration::from_millis(ts.get().into());
            if event_time < start_time {
                return;
            }

            let MessageType::Text(text_content) = &original_msg.content.msgtype else {
                return;
            };

            let sender = original_msg.sender.as_str();
            if !policy.permits(sender, room.own_user_id().as_str()) {
                tracing::debug!("Ignoring message from {}", sender);
                return;
            }

            let chat = MatrixService::new(room);
            let message = Inbound::new(sender, text_content.body.clone());
            match dispatcher.route(&chat, &message).await {
                Ok(outcome) => {
                    if auto_mark_read
                        && outcome.reply().is_some()
                        && let Err(e) = chat.mark_read(original_msg.event_id.clone()).await
                    {
                        tracing::warn!("Failed to mark message as read: {}", e);
                    }
                }
                Err(e) => tracing::error!("Failed to route message: {}", e),
            }
        }
    });

    // Handle Invites
    client.add_event_handler(|ev: StrippedRoomMemberEvent, room: Room| async move {
        if ev.content.membership == MembershipState::Invite {
            tracing::info!("{}", logs::invite_received(room.room_id().as_str()));
            if let Err(e) = room.join().await {
                tracing::error!("{}", logs::join_invite_fail(&e.to_string()));
            }
        }
    });

    // Initial sync so the joined room list is known before announcing
    tracing::info!("{}", logs::SYNC_LOOP_START);
    let first = client.sync_once(SyncSettings::default()).await?;

    if config.bot.send_greeting {
        announce(&client, &config.bot.announce_rooms, &config.bot.greeting).await;
    }

    let sync_client = client.clone();
    let sync_handle = tokio::spawn(async move {
        sync_client
            .sync(SyncSettings::default().token(first.next_batch))
            .await
    });

    tokio::select! {
        res = sync_handle => {
            match res {
                Ok(Err(e)) => tracing::error!("{}", logs::sync_loop_fail(&e.to_string())),
                Err(e) => tracing::error!("Matrix Sync Panic: {}", e),
                Ok(Ok(())) => {}
            }
        }
        signal = tokio::signal::ctrl_c() => {
            if let Err(e) = signal {
                tracing::error!("{}", logs::shutdown_fail(&e.to_string()));
            }
            tracing::info!("{}", logs::SHUTDOWN);
            if config.bot.send_bye {
                announce(&client, &config.bot.announce_rooms, &config.bot.bye).await;
            }
        }
    }

    Ok(())
}

/// Sends `text` to the announce rooms, or to every joined room when none are configured.
async fn announce(client: &Client, rooms: &[String], text: &str) {
    for room in client.joined_rooms() {
        if !rooms.is_empty() && !rooms.iter().any(|r| r == room.room_id().as_str()) {
            continue;
        }
        let chat = MatrixService::new(room);
        if let Err(e) = chat.send_message(text).await {
            tracing::error!("{}", logs::send_failed(&chat.room_id(), &e));
        }
    }
}
