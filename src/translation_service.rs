/*!
 * Core translation service implementation.
 *
 * This module contains the TranslationService struct, which owns the active
 * provider client and wraps every call in the rate-limit retry policy. A
 * failed translation never surfaces to the caller: the service degrades to
 * returning the original text unchanged, so a flaky provider costs quality,
 * not progress.
 */

use anyhow::{Result, anyhow};
use log::warn;
use std::time::Duration;

use crate::app_config::{TranslationConfig, TranslationProvider as ConfigTranslationProvider};
use crate::errors::ProviderError;
use crate::providers::Provider;
use crate::providers::deepl::DeepL;
use crate::providers::libretranslate::LibreTranslate;

/// Retry policy for rate-limited requests: bounded attempts with linearly
/// increasing backoff (attempt n waits n * step).
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Maximum number of attempts for one segment
    pub max_attempts: u32,

    /// Backoff step; the wait after attempt index n is (n + 1) * step
    pub backoff_step: Duration,
}

impl RetryPolicy {
    /// Backoff duration to wait after the given zero-based attempt index
    pub fn delay_for(&self, attempt_index: u32) -> Duration {
        self.backoff_step * (attempt_index + 1)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            backoff_step: Duration::from_secs(2),
        }
    }
}

/// Translation service holding the provider selected at startup
pub struct TranslationService {
    /// Active provider client
    provider: Box<dyn Provider>,

    /// Rate-limit retry policy
    retry: RetryPolicy,
}

impl TranslationService {
    /// Create a new translation service from the translation configuration
    /// and the run's fixed language pair
    pub fn new(
        config: &TranslationConfig,
        source_language: &str,
        target_language: &str,
    ) -> Result<Self> {
        let endpoint = config.get_endpoint();

        let provider: Box<dyn Provider> = match config.provider {
            ConfigTranslationProvider::LibreTranslate => {
                if endpoint.is_empty() {
                    return Err(anyhow!("LibreTranslate endpoint is not configured"));
                }
                Box::new(LibreTranslate::new(
                    endpoint,
                    source_language,
                    target_language,
                ))
            }
            ConfigTranslationProvider::DeepL => {
                let api_key = config.get_api_key();
                if api_key.is_empty() {
                    return Err(anyhow!("DeepL API key is not configured"));
                }
                Box::new(DeepL::new(
                    endpoint,
                    api_key,
                    source_language,
                    target_language,
                ))
            }
        };

        Ok(Self {
            provider,
            retry: RetryPolicy {
                max_attempts: config.common.retry_max_attempts,
                backoff_step: Duration::from_secs(config.common.retry_backoff_secs),
            },
        })
    }

    /// Create a service around an already-built provider. Used by tests to
    /// inject stub providers.
    pub fn with_provider(provider: Box<dyn Provider>, retry: RetryPolicy) -> Self {
        Self { provider, retry }
    }

    /// Short name of the active provider for log output
    pub fn provider_name(&self) -> &'static str {
        self.provider.name()
    }

    /// Translate one text segment, absorbing every failure.
    ///
    /// On HTTP 429 the call sleeps (attempt + 1) * backoff_step and retries,
    /// up to the configured attempt limit. Any other provider failure, or an
    /// exhausted retry budget, falls back to returning `text` unchanged.
    pub async fn translate_line(&self, text: &str) -> String {
        for attempt in 0..self.retry.max_attempts {
            match self.provider.translate(text).await {
                Ok(translated) => return translated,
                Err(e) if e.is_rate_limited() => {
                    let delay = self.retry.delay_for(attempt);
                    warn!(
                        "{}: rate limited, waiting {}s (attempt {}/{})",
                        self.provider.name(),
                        delay.as_secs(),
                        attempt + 1,
                        self.retry.max_attempts
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(e) => {
                    warn!(
                        "{}: translation failed, keeping original text: {}",
                        self.provider.name(),
                        e
                    );
                    return text.to_string();
                }
            }
        }

        warn!(
            "{}: rate limit retries exhausted after {} attempts, keeping original text",
            self.provider.name(),
            self.retry.max_attempts
        );
        text.to_string()
    }

    /// Probe the provider with a minimal request. Failure here is advisory:
    /// the run still proceeds and individual lines fall back as usual.
    pub async fn test_connection(&self) -> Result<(), ProviderError> {
        self.provider.test_connection().await
    }
}
