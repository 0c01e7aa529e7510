//! # Access Policy
//!
//! Decides which senders the bot answers. Mirrors the `bot` section of the config:
//! the bot's own account is served only with `allow_self`, and with `restrict` on every
//! other sender must be listed in `allowed_users`.

use std::collections::HashSet;

use crate::domain::config::BotConfig;

#[derive(Debug, Clone, Default)]
pub struct AccessPolicy {
    restrict: bool,
    allow_self: bool,
    allowed_users: HashSet<String>,
}

impl AccessPolicy {
    pub fn from_config(config: &BotConfig) -> Self {
        Self {
            restrict: config.restrict,
            allow_self: config.allow_self,
            allowed_users: config.allowed_users.iter().cloned().collect(),
        }
    }

    pub fn permits(&self, sender: &str, own_id: &str) -> bool {
        if sender == own_id {
            return self.allow_self;
        }
        !self.restrict || self.allowed_users.contains(sender)
    }
}
