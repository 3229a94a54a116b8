/*!
 * Provider implementations for the supported translation services.
 *
 * This module contains client implementations for the translation providers:
 * - LibreTranslate: self-hosted or public LibreTranslate server
 * - DeepL: DeepL REST API (free tier endpoint by default)
 */

use async_trait::async_trait;
use std::fmt::Debug;

use crate::errors::ProviderError;

/// Common trait for all translation providers
///
/// This trait defines the interface that all provider implementations must follow,
/// allowing them to be used interchangeably by the translation service. The
/// active provider is chosen once at configuration time.
#[async_trait]
pub trait Provider: Send + Sync + Debug {
    /// Translate one text segment using the language pair the client was
    /// constructed with.
    ///
    /// # Arguments
    /// * `text` - The text segment to translate
    ///
    /// # Returns
    /// * `Result<String, ProviderError>` - The translated text or an error
    async fn translate(&self, text: &str) -> Result<String, ProviderError>;

    /// Test the connection to the provider with a minimal request
    ///
    /// # Returns
    /// * `Result<(), ProviderError>` - Ok if the provider is reachable, or an error
    async fn test_connection(&self) -> Result<(), ProviderError>;

    /// Short provider name for log output
    fn name(&self) -> &'static str;
}

pub mod deepl;
pub mod libretranslate;
