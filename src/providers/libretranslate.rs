use std::time::Duration;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

use crate::errors::ProviderError;
use crate::providers::Provider;

/// LibreTranslate client for a self-hosted or public LibreTranslate server
#[derive(Debug)]
pub struct LibreTranslate {
    /// HTTP client for API requests
    client: Client,
    /// Full URL of the translate endpoint
    endpoint: String,
    /// Source language code (ISO 639-1)
    source_language: String,
    /// Target language code (ISO 639-1)
    target_language: String,
}

/// LibreTranslate request body
#[derive(Debug, Serialize)]
pub struct LibreTranslateRequest<'a> {
    /// Text to translate
    q: &'a str,
    /// Source language code
    source: &'a str,
    /// Target language code
    target: &'a str,
    /// Response format; "text" keeps the server from HTML-escaping
    format: &'a str,
}

impl<'a> LibreTranslateRequest<'a> {
    /// Create a new request for one text segment
    pub fn new(text: &'a str, source: &'a str, target: &'a str) -> Self {
        Self {
            q: text,
            source,
            target,
            format: "text",
        }
    }
}

/// LibreTranslate response body
#[derive(Debug, Deserialize)]
pub struct LibreTranslateResponse {
    /// The translated text
    #[serde(rename = "translatedText")]
    pub translated_text: String,
}

impl LibreTranslate {
    /// Create a new LibreTranslate client
    pub fn new(
        endpoint: impl Into<String>,
        source_language: impl Into<String>,
        target_language: impl Into<String>,
    ) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(30))
                .build()
                .unwrap_or_default(),
            endpoint: endpoint.into(),
            source_language: source_language.into(),
            target_language: target_language.into(),
        }
    }
}

#[async_trait]
impl Provider for LibreTranslate {
    async fn translate(&self, text: &str) -> Result<String, ProviderError> {
        let request =
            LibreTranslateRequest::new(text, &self.source_language, &self.target_language);

        let response = self
            .client
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await
            .map_err(|e| ProviderError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(ProviderError::RateLimitExceeded(format!(
                "LibreTranslate returned {}",
                status
            )));
        }
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to get error response text".to_string());
            return Err(ProviderError::ApiError {
                status_code: status.as_u16(),
                message: error_text,
            });
        }

        let parsed = response
            .json::<LibreTranslateResponse>()
            .await
            .map_err(|e| ProviderError::ParseError(e.to_string()))?;

        Ok(parsed.translated_text)
    }

    async fn test_connection(&self) -> Result<(), ProviderError> {
        self.translate("Hello").await?;
        Ok(())
    }

    fn name(&self) -> &'static str {
        "LibreTranslate"
    }
}
