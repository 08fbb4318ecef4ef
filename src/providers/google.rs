use std::time::Duration;
use async_trait::async_trait;
use log::{debug, error};
use reqwest::Client;
use serde_json::Value;
use url::Url;

use crate::errors::ProviderError;
use crate::names::TranslationResult;
use crate::providers::Translator;

/// Default Google Translate web endpoint
pub const DEFAULT_ENDPOINT: &str = "https://translate.googleapis.com/translate_a/single";

/// Default URL used for the reachability probe
pub const DEFAULT_PROBE_URL: &str = "https://translate.google.com";

/// Google Translate client for the public web endpoint
#[derive(Debug)]
pub struct GoogleTranslate {
    /// HTTP client for API requests
    client: Client,
    /// Translation endpoint URL
    endpoint: String,
    /// URL fetched by `test_connection`
    probe_url: String,
}

impl GoogleTranslate {
    /// Create a new Google Translate client
    pub fn new(endpoint: impl Into<String>, probe_url: impl Into<String>, timeout_secs: u64) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(timeout_secs))
                .build()
                .unwrap_or_default(),
            endpoint: endpoint.into(),
            probe_url: probe_url.into(),
        }
    }

    /// Build the request URL for one text
    pub fn request_url(&self, text: &str, target_language: &str) -> Result<Url, ProviderError> {
        Url::parse_with_params(
            &self.endpoint,
            &[
                ("client", "gtx"),
                ("sl", "auto"),
                ("tl", target_language),
                ("dt", "t"),
                ("q", text),
            ],
        )
        .map_err(|e| ProviderError::RequestFailed(format!("Invalid endpoint '{}': {}", self.endpoint, e)))
    }

    /// Extract the translated text from a `translate_a/single` response.
    ///
    /// The body is a nested JSON array whose first element lists translated
    /// segments; the translation is the concatenation of each segment's
    /// first string.
    pub fn parse_response(body: &Value) -> Result<String, ProviderError> {
        let segments = body
            .get(0)
            .and_then(Value::as_array)
            .ok_or_else(|| ProviderError::ParseError("Missing translation segments".to_string()))?;

        let translated: String = segments
            .iter()
            .filter_map(|segment| segment.get(0).and_then(Value::as_str))
            .collect();

        if translated.is_empty() {
            return Err(ProviderError::ParseError("Empty translation".to_string()));
        }
        Ok(translated)
    }
}

#[async_trait]
impl Translator for GoogleTranslate {
    fn name(&self) -> &str {
        "Google Translate"
    }

    async fn test_connection(&self) -> Result<(), ProviderError> {
        let response = self
            .client
            .get(&self.probe_url)
            .send()
            .await
            .map_err(|e| ProviderError::ConnectionError(format!("{}: {}", self.probe_url, e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::ApiError {
                status_code: status.as_u16(),
                message: format!("Probe of {} failed", self.probe_url),
            });
        }
        debug!("Probe of {} answered {}", self.probe_url, status);
        Ok(())
    }

    async fn translate(
        &self,
        text: &str,
        target_language: &str,
    ) -> Result<TranslationResult, ProviderError> {
        let url = self.request_url(text, target_language)?;

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ProviderError::RequestFailed(format!("Failed to send request to Google Translate: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to get error response text".to_string());
            error!("Google Translate error ({}): {}", status, error_text);
            return Err(ProviderError::ApiError {
                status_code: status.as_u16(),
                message: error_text,
            });
        }

        let body = response
            .json::<Value>()
            .await
            .map_err(|e| ProviderError::ParseError(e.to_string()))?;

        let result = Self::parse_response(&body)?;
        Ok(TranslationResult::new(text, result))
    }
}
