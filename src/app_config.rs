use anyhow::{Result, anyhow};
use serde::{Deserialize, Serialize};
use std::default::Default;
use url::Url;

use crate::providers::deepl::DEFAULT_DEEPL_ENDPOINT;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Source language code (ISO 639-1)
    pub source_language: String,

    /// Target language code (ISO 639-1); also used as the translated-file
    /// suffix marker and the default output folder name
    pub target_language: String,

    /// Translation config
    pub translation: TranslationConfig,

    /// Output root folder. Translated files land in a mirror of the source
    /// tree under this folder; empty means write beside the source files.
    #[serde(default = "default_output_folder")]
    pub output_folder: String,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Translation provider type
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum TranslationProvider {
    // @provider: LibreTranslate
    #[default]
    LibreTranslate,
    // @provider: DeepL
    DeepL,
}

impl TranslationProvider {
    // @returns: Capitalized provider name
    pub fn display_name(&self) -> &str {
        match self {
            Self::LibreTranslate => "LibreTranslate",
            Self::DeepL => "DeepL",
        }
    }

    // @returns: Lowercase provider identifier
    pub fn to_lowercase_string(&self) -> String {
        match self {
            Self::LibreTranslate => "libretranslate".to_string(),
            Self::DeepL => "deepl".to_string(),
        }
    }
}

// Implement Display trait for TranslationProvider
impl std::fmt::Display for TranslationProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_lowercase_string())
    }
}

// Implement FromStr trait for TranslationProvider
impl std::str::FromStr for TranslationProvider {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "libretranslate" | "libre" => Ok(Self::LibreTranslate),
            "deepl" => Ok(Self::DeepL),
            _ => Err(anyhow!("Invalid provider type: {}", s)),
        }
    }
}

/// Provider configuration wrapper
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ProviderConfig {
    // @field: Provider type identifier
    #[serde(rename = "type")]
    pub provider_type: String,

    // @field: API key
    #[serde(default = "String::new")]
    pub api_key: String,

    // @field: Service URL
    #[serde(default = "String::new")]
    pub endpoint: String,
}

impl ProviderConfig {
    // @param provider_type: Provider enum
    // @returns: Provider config with defaults
    pub fn new(provider_type: TranslationProvider) -> Self {
        match provider_type {
            TranslationProvider::LibreTranslate => Self {
                provider_type: "libretranslate".to_string(),
                api_key: String::new(),
                endpoint: default_libretranslate_endpoint(),
            },
            TranslationProvider::DeepL => Self {
                provider_type: "deepl".to_string(),
                api_key: String::new(),
                endpoint: DEFAULT_DEEPL_ENDPOINT.to_string(),
            },
        }
    }
}

/// Translation service configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TranslationConfig {
    /// Translation provider to use
    #[serde(default)]
    pub provider: TranslationProvider,

    /// Available translation providers
    #[serde(default)]
    pub available_providers: Vec<ProviderConfig>,

    /// Common translation settings
    #[serde(default)]
    pub common: TranslationCommonConfig,
}

/// Common translation settings applicable to all providers
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TranslationCommonConfig {
    /// Maximum attempts for a single segment before giving up and keeping
    /// the original text
    #[serde(default = "default_retry_max_attempts")]
    pub retry_max_attempts: u32,

    /// Backoff step in seconds; attempt n waits n * step after a rate limit
    #[serde(default = "default_retry_backoff_secs")]
    pub retry_backoff_secs: u64,
}

impl Default for TranslationCommonConfig {
    fn default() -> Self {
        Self {
            retry_max_attempts: default_retry_max_attempts(),
            retry_backoff_secs: default_retry_backoff_secs(),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

fn default_retry_max_attempts() -> u32 {
    5
}

fn default_retry_backoff_secs() -> u64 {
    2
}

fn default_libretranslate_endpoint() -> String {
    "http://localhost:5000/translate".to_string()
}

fn default_output_folder() -> String {
    "bg".to_string()
}

/// Raw answers collected from the interactive provider selection, kept as
/// plain strings so parsing stays a pure function testable without a
/// terminal.
#[derive(Debug, Clone)]
pub struct PromptAnswers {
    /// Provider choice: "1" for LibreTranslate, "2" for DeepL
    pub provider_choice: String,

    /// Endpoint URL (LibreTranslate) or API key (DeepL); empty keeps the default
    pub endpoint_or_key: String,

    /// Whether to write into the default output folder ("y") or beside the
    /// source files (anything else)
    pub use_output_folder: String,
}

impl Config {
    /// Build a validated configuration from interactive prompt answers.
    /// An unrecognized provider choice is a fatal configuration error.
    pub fn from_prompt_answers(answers: &PromptAnswers) -> Result<Self> {
        let mut config = Config::default();

        match answers.provider_choice.trim() {
            "1" => {
                config.translation.provider = TranslationProvider::LibreTranslate;
                let endpoint = answers.endpoint_or_key.trim();
                if !endpoint.is_empty() {
                    if let Some(provider_config) = config
                        .translation
                        .available_providers
                        .iter_mut()
                        .find(|p| p.provider_type == "libretranslate")
                    {
                        provider_config.endpoint = endpoint.to_string();
                    }
                }
            }
            "2" => {
                config.translation.provider = TranslationProvider::DeepL;
                let api_key = answers.endpoint_or_key.trim();
                if !api_key.is_empty() {
                    if let Some(provider_config) = config
                        .translation
                        .available_providers
                        .iter_mut()
                        .find(|p| p.provider_type == "deepl")
                    {
                        provider_config.api_key = api_key.to_string();
                    }
                }
            }
            other => return Err(anyhow!("Invalid provider selection: {}", other)),
        }

        config.output_folder = if answers.use_output_folder.trim().eq_ignore_ascii_case("y") {
            config.target_language.clone()
        } else {
            String::new()
        };

        Ok(config)
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        // Validate languages
        crate::language_utils::validate_part1_code(&self.source_language)?;
        crate::language_utils::validate_part1_code(&self.target_language)?;

        match self.translation.provider {
            TranslationProvider::LibreTranslate => {
                let endpoint = self.translation.get_endpoint();
                if endpoint.is_empty() {
                    return Err(anyhow!(
                        "An endpoint URL is required for the LibreTranslate provider"
                    ));
                }
                Url::parse(&endpoint)
                    .map_err(|e| anyhow!("Invalid LibreTranslate endpoint '{}': {}", endpoint, e))?;
            }
            TranslationProvider::DeepL => {
                if self.translation.get_api_key().is_empty() {
                    return Err(anyhow!("An API key is required for the DeepL provider"));
                }
            }
        }

        Ok(())
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            source_language: "en".to_string(),
            target_language: "bg".to_string(),
            translation: TranslationConfig::default(),
            output_folder: default_output_folder(),
            log_level: LogLevel::default(),
        }
    }
}

impl TranslationConfig {
    /// Get the active provider configuration from the available_providers array
    pub fn get_active_provider_config(&self) -> Option<&ProviderConfig> {
        let provider_str = self.provider.to_lowercase_string();
        self.available_providers
            .iter()
            .find(|p| p.provider_type == provider_str)
    }

    /// Get a specific provider configuration by type
    pub fn get_provider_config(&self, provider_type: &TranslationProvider) -> Option<&ProviderConfig> {
        let provider_str = provider_type.to_lowercase_string();
        self.available_providers
            .iter()
            .find(|p| p.provider_type == provider_str)
    }

    /// Get the API key for the active provider
    pub fn get_api_key(&self) -> String {
        if let Some(provider_config) = self.get_active_provider_config() {
            if !provider_config.api_key.is_empty() {
                return provider_config.api_key.clone();
            }
        }

        // Default fallback - LibreTranslate doesn't use API keys
        String::new()
    }

    /// Get the endpoint for the active provider
    pub fn get_endpoint(&self) -> String {
        if let Some(provider_config) = self.get_active_provider_config() {
            if !provider_config.endpoint.is_empty() {
                return provider_config.endpoint.clone();
            }
        }

        // Default fallback based on provider type
        match self.provider {
            TranslationProvider::LibreTranslate => default_libretranslate_endpoint(),
            TranslationProvider::DeepL => DEFAULT_DEEPL_ENDPOINT.to_string(),
        }
    }
}

impl Default for TranslationConfig {
    fn default() -> Self {
        let mut config = Self {
            provider: TranslationProvider::default(),
            available_providers: Vec::new(),
            common: TranslationCommonConfig::default(),
        };

        // Add default providers
        config
            .available_providers
            .push(ProviderConfig::new(TranslationProvider::LibreTranslate));
        config
            .available_providers
            .push(ProviderConfig::new(TranslationProvider::DeepL));

        config
    }
}
