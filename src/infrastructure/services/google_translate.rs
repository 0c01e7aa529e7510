//! Google Cloud Translation (v2 REST) client.

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::{ensure_success, http_client};
use crate::domain::config::TranslateConfig;
use crate::domain::traits::Translator;

#[derive(Debug, Serialize)]
struct TranslateRequest<'a> {
    q: &'a str,
    target: &'a str,
    format: &'static str,
}

#[derive(Debug, Deserialize)]
struct TranslateResponse {
    data: TranslateData,
}

#[derive(Debug, Deserialize)]
struct TranslateData {
    translations: Vec<Translation>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Translation {
    translated_text: String,
}

fn first_translation(response: TranslateResponse) -> Result<String> {
    response
        .data
        .translations
        .into_iter()
        .next()
        .map(|t| t.translated_text)
        .context("google translate: no translations in response")
}

pub struct GoogleTranslate {
    base_url: String,
    api_key: Option<String>,
}

impl GoogleTranslate {
    pub fn from_config(config: &TranslateConfig) -> Self {
        Self {
            base_url: config.base_url.clone(),
            api_key: config.key.resolve(),
        }
    }
}

#[async_trait]
impl Translator for GoogleTranslate {
    async fn translate(&self, text: &str, target_lang: &str) -> Result<String> {
        let request = TranslateRequest {
            q: text,
            target: target_lang,
            format: "text",
        };
        let response = http_client()
            .post(&self.base_url)
            .query(&[("key", self.api_key.as_deref().unwrap_or_default())])
            .json(&request)
            .send()
            .await
            .context("google translate: HTTP request failed")?;

        let body: TranslateResponse = ensure_success("google translate", response)
            .await?
            .json()
            .await
            .context("google translate: failed to parse response")?;
        first_translation(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_shape() {
        let request = TranslateRequest {
            q: "hello",
            target: "fr",
            format: "text",
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            serde_json::json!({"q": "hello", "target": "fr", "format": "text"})
        );
    }

    #[test]
    fn test_response_shape() {
        let body: TranslateResponse = serde_json::from_str(
            r#"{"data": {"translations": [{"translatedText": "bonjour", "detectedSourceLanguage": "en"}]}}"#,
        )
        .unwrap();
        assert_eq!(first_translation(body).unwrap(), "bonjour");
    }
}
