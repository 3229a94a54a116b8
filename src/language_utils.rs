use anyhow::{Result, anyhow};
use isolang::Language;

/// Language utilities for ISO language code handling
///
/// Source and target languages are ISO 639-1 (2-letter) codes throughout the
/// application: they drive both the provider request bodies and the
/// `.<code>.srt` output naming scheme.
/// Validate that a language code is a well-formed ISO 639-1 code
pub fn validate_part1_code(code: &str) -> Result<()> {
    let normalized = code.trim().to_lowercase();

    if normalized.len() != 2 {
        return Err(anyhow!(
            "Language code must be a 2-letter ISO 639-1 code, got: {}",
            code
        ));
    }

    if Language::from_639_1(&normalized).is_none() {
        return Err(anyhow!("Invalid language code: {}", code));
    }

    Ok(())
}

/// Normalize a language code to lowercase ISO 639-1 form
pub fn normalize_part1_code(code: &str) -> Result<String> {
    let normalized = code.trim().to_lowercase();
    validate_part1_code(&normalized)?;
    Ok(normalized)
}

/// Language tag in the form the DeepL API expects (uppercase, e.g. "EN", "BG")
pub fn to_deepl_tag(code: &str) -> String {
    code.trim().to_uppercase()
}

/// Get the English language name from a code, for log output
pub fn get_language_name(code: &str) -> Result<String> {
    let normalized = code.trim().to_lowercase();
    let lang = Language::from_639_1(&normalized)
        .ok_or_else(|| anyhow!("Failed to get language from code: {}", code))?;

    Ok(lang.to_name().to_string())
}
