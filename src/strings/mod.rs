//! # Strings Module
//!
//! Centralizes user-facing strings, help text and log lines.
//! Ensures consistency in messaging and easier updates.

pub mod help;
pub mod logs;
pub mod messages;
