use std::time::Duration;
use async_trait::async_trait;
use reqwest::{Client, StatusCode, header};
use serde::{Deserialize, Serialize};

use crate::errors::ProviderError;
use crate::language_utils;
use crate::providers::Provider;

/// Default endpoint of the DeepL free API tier
pub const DEFAULT_DEEPL_ENDPOINT: &str = "https://api-free.deepl.com/v2/translate";

/// DeepL client for the DeepL REST API
#[derive(Debug)]
pub struct DeepL {
    /// HTTP client for API requests
    client: Client,
    /// Full URL of the translate endpoint
    endpoint: String,
    /// API key for authentication
    api_key: String,
    /// Source language tag in DeepL form (uppercase)
    source_lang: String,
    /// Target language tag in DeepL form (uppercase)
    target_lang: String,
}

/// DeepL request body. The API takes a batch of segments; the client sends
/// one segment per request and reads back the first translation.
#[derive(Debug, Serialize)]
pub struct DeepLRequest<'a> {
    /// Text segments to translate
    text: Vec<&'a str>,
    /// Source language tag (uppercase)
    source_lang: &'a str,
    /// Target language tag (uppercase)
    target_lang: &'a str,
}

impl<'a> DeepLRequest<'a> {
    /// Create a new single-segment request
    pub fn new(text: &'a str, source_lang: &'a str, target_lang: &'a str) -> Self {
        Self {
            text: vec![text],
            source_lang,
            target_lang,
        }
    }
}

/// DeepL response body
#[derive(Debug, Deserialize)]
pub struct DeepLResponse {
    /// One translation object per submitted segment
    pub translations: Vec<DeepLTranslation>,
}

/// Individual translation in a DeepL response
#[derive(Debug, Deserialize)]
pub struct DeepLTranslation {
    /// The translated text
    pub text: String,
}

impl DeepL {
    /// Create a new DeepL client. Language codes are ISO 639-1 and get
    /// uppercased to the tag form the API expects.
    pub fn new(
        endpoint: impl Into<String>,
        api_key: impl Into<String>,
        source_language: &str,
        target_language: &str,
    ) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(30))
                .build()
                .unwrap_or_default(),
            endpoint: endpoint.into(),
            api_key: api_key.into(),
            source_lang: language_utils::to_deepl_tag(source_language),
            target_lang: language_utils::to_deepl_tag(target_language),
        }
    }
}

#[async_trait]
impl Provider for DeepL {
    async fn translate(&self, text: &str) -> Result<String, ProviderError> {
        let request = DeepLRequest::new(text, &self.source_lang, &self.target_lang);

        let response = self
            .client
            .post(&self.endpoint)
            .header(
                header::AUTHORIZATION,
                format!("DeepL-Auth-Key {}", self.api_key),
            )
            .json(&request)
            .send()
            .await
            .map_err(|e| ProviderError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(ProviderError::RateLimitExceeded(format!(
                "DeepL returned {}",
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
            .json::<DeepLResponse>()
            .await
            .map_err(|e| ProviderError::ParseError(e.to_string()))?;

        parsed
            .translations
            .into_iter()
            .next()
            .map(|t| t.text)
            .ok_or_else(|| {
                ProviderError::ParseError("DeepL response contained no translations".to_string())
            })
    }

    async fn test_connection(&self) -> Result<(), ProviderError> {
        self.translate("Hello").await?;
        Ok(())
    }

    fn name(&self) -> &'static str {
        "DeepL"
    }
}
