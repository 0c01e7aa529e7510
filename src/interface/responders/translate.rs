//! # Translate Responder
//!
//! Handles `translate <lang code> <sentence>`.
//! The action is the target language; only codes listed in `LANGUAGE_CODES` are dispatched.

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;

use crate::domain::traits::{Responder, Translator};
use crate::domain::types::RequestContext;

pub const LANGUAGE_CODES: &[&str] = &[
    "af", "sq", "ar", "be", "bg", "ca", "zh-CN", "zh-TW", "hr", "cs", "da", "nl", "en", "et",
    "tl", "fi", "fr", "gl", "de", "el", "iw", "hi", "hu", "is", "id", "ga", "it", "ja", "ko",
    "lv", "lt", "mk", "ms", "mt", "no", "fa", "pl", "pt", "ro", "ru", "sr", "sk", "sl", "es",
    "sw", "sv", "th", "tr", "uk", "vi", "cy", "yi",
];

pub struct TranslateResponder {
    translator: Arc<dyn Translator>,
}

impl TranslateResponder {
    pub fn new(translator: Arc<dyn Translator>) -> Self {
        Self { translator }
    }
}

#[async_trait]
impl Responder for TranslateResponder {
    fn key(&self) -> &str {
        "translate"
    }

    fn is_complex(&self) -> bool {
        true
    }

    fn actions(&self) -> &[&str] {
        LANGUAGE_CODES
    }

    async fn respond(&self, ctx: &RequestContext) -> Result<Option<String>> {
        let (Some(target), Some(text)) = (ctx.action(), ctx.detail()) else {
            return Ok(None);
        };
        if text.trim().is_empty() {
            return Ok(None);
        }
        tracing::info!("Translating sentence to '{}'", target);
        let translated = self.translator.translate(text, target).await?;
        Ok(Some(translated))
    }
}
