//! # Responder Registry
//!
//! Indexes every active responder by its keyword. Built once at startup from an explicit,
//! ordered list and read-only afterwards, so lookups need no locking.

use std::collections::HashMap;
use std::sync::Arc;

use thiserror::Error;

use crate::domain::traits::Responder;

/// Startup-time registration failures. All of them are fatal.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("responder keyword '{key}' is already registered")]
    DuplicateKey { key: String },

    #[error("responder keyword must not be empty")]
    EmptyKey,

    #[error("responder keyword '{key}' contains whitespace")]
    InvalidKey { key: String },

    #[error("complex responder '{key}' declares no actions")]
    MissingActions { key: String },

    #[error("simple responder '{key}' declares actions")]
    UnexpectedActions { key: String },
}

#[derive(Default, Clone)]
pub struct ResponderRegistry {
    responders: HashMap<String, Arc<dyn Responder>>,
    order: Vec<String>,
}

impl ResponderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers each responder in order, stopping at the first failure.
    pub fn from_responders(
        responders: impl IntoIterator<Item = Arc<dyn Responder>>,
    ) -> Result<Self, RegistryError> {
        let mut registry = Self::new();
        for responder in responders {
            registry.register(responder)?;
        }
        Ok(registry)
    }

    pub fn register(&mut self, responder: Arc<dyn Responder>) -> Result<(), RegistryError> {
        let key = responder.key().to_string();
        if key.is_empty() {
            return Err(RegistryError::EmptyKey);
        }
        if key.chars().any(char::is_whitespace) {
            return Err(RegistryError::InvalidKey { key });
        }
        match (responder.is_complex(), responder.actions().is_empty()) {
            (true, true) => return Err(RegistryError::MissingActions { key }),
            (false, false) => return Err(RegistryError::UnexpectedActions { key }),
            _ => {}
        }
        if self.responders.contains_key(&key) {
            return Err(RegistryError::DuplicateKey { key });
        }

        tracing::debug!(
            "Registered responder '{}' (complex: {})",
            key,
            responder.is_complex()
        );
        self.order.push(key.clone());
        self.responders.insert(key, responder);
        Ok(())
    }

    pub fn lookup(&self, keyword: &str) -> Option<&Arc<dyn Responder>> {
        self.responders.get(keyword)
    }

    /// Keywords in registration order.
    pub fn keys(&self) -> Vec<&str> {
        self.order.iter().map(String::as_str).collect()
    }
}
