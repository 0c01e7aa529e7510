//! # Log Lines
//!
//! Messages written to the tracing log by the dispatcher and the transports.

pub const CONFIG_PARSE_ERROR: &str = "Failed to parse YAML";
pub const NOT_A_VALID_REQUEST: &str = "Not a valid request, ignored";
pub const SYNC_LOOP_START: &str = "Starting sync loop...";
pub const SHUTDOWN: &str = "Shutting down...";
pub const CONSOLE_READY: &str = "Console transport ready, type a request (Ctrl-D to quit)";

pub fn config_loaded(user: &str) -> String {
    format!("Loaded configuration for user: {user}")
}

pub fn registered_keywords(keys: &[&str]) -> String {
    format!("Registered responders: {}", keys.join(", "))
}

pub fn request_received(sender: &str, text: &str) -> String {
    format!("Request from {sender}: {text}")
}

pub fn sync_loop_fail(err: &str) -> String {
    format!("Sync loop failed: {err}")
}

pub fn shutdown_fail(err: &str) -> String {
    format!("Unable to listen for shutdown signal: {err}")
}

pub fn send_failed(room: &str, err: &str) -> String {
    format!("Failed to send to room {room}: {err}")
}

pub fn invite_received(room_id: &str) -> String {
    format!("Received invite for room {room_id}")
}

pub fn join_invite_fail(err: &str) -> String {
    format!("Failed to join room after invite: {err}")
}
