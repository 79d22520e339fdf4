//! LibreTranslate HTTP client.

use super::Translator;
use crate::config::TranslateConfig;
use crate::error::{Result, SubcleanError};
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Serialize)]
struct TranslateRequest<'a> {
    q: &'a str,
    source: &'a str,
    target: &'a str,
    format: &'a str,
    alternatives: u32,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TranslateResponse {
    #[serde(default)]
    translated_text: Option<String>,
    #[serde(default)]
    alternatives: Vec<String>,
    #[serde(default)]
    error: Option<String>,
}

/// Pick the translation out of a response body.
///
/// `translatedText` wins; an empty one falls back to the first alternative.
fn extract_translation(response: TranslateResponse) -> Result<String> {
    if let Some(error) = response.error {
        return Err(SubcleanError::Translation { message: error });
    }
    match response.translated_text {
        Some(text) if !text.trim().is_empty() => Ok(text),
        _ => response
            .alternatives
            .into_iter()
            .next()
            .ok_or_else(|| SubcleanError::Translation {
                message: "response has no translatedText".to_string(),
            }),
    }
}

/// Client for a LibreTranslate-compatible `/translate` endpoint.
pub struct LibreTranslator {
    client: reqwest::Client,
    url: String,
    source: String,
    target: String,
}

impl LibreTranslator {
    pub fn new(url: &str, source: &str, target: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SubcleanError::Translation {
                message: format!("Failed to build HTTP client: {e}"),
            })?;
        Ok(Self::with_client(client, url, source, target))
    }

    /// Use a preconfigured HTTP client.
    pub fn with_client(client: reqwest::Client, url: &str, source: &str, target: &str) -> Self {
        Self {
            client,
            url: url.to_string(),
            source: source.to_string(),
            target: target.to_string(),
        }
    }

    pub fn from_config(config: &TranslateConfig) -> Result<Self> {
        Self::new(
            &config.url,
            &config.source,
            &config.target,
            Duration::from_secs(config.timeout_secs),
        )
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait::async_trait]
impl Translator for LibreTranslator {
    async fn translate(&self, text: &str) -> Result<String> {
        let request = TranslateRequest {
            q: text,
            source: &self.source,
            target: &self.target,
            format: "text",
            alternatives: 1,
        };

        let response = self
            .client
            .post(&self.url)
            .json(&request)
            .send()
            .await
            .map_err(|e| SubcleanError::Translation {
                message: format!("request to {} failed: {e}", self.url),
            })?;

        if !response.status().is_success() {
            return Err(SubcleanError::Translation {
                message: format!("{} returned status {}", self.url, response.status()),
            });
        }

        let body: TranslateResponse =
            response
                .json()
                .await
                .map_err(|e| SubcleanError::Translation {
                    message: format!("unreadable response from {}: {e}", self.url),
                })?;
        extract_translation(body)
    }

    fn target(&self) -> &str {
        &self.target
    }
}
