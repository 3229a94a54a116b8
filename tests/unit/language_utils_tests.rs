/*!
 * Tests for language code utilities
 */

use subtrans::language_utils::{
    get_language_name, normalize_part1_code, to_deepl_tag, validate_part1_code,
};

/// Test that valid ISO 639-1 codes are accepted
#[test]
fn test_validate_part1_code_withValidCodes_shouldSucceed() {
    assert!(validate_part1_code("en").is_ok());
    assert!(validate_part1_code("bg").is_ok());
    assert!(validate_part1_code(" DE ").is_ok());
}

/// Test that non-2-letter or unknown codes are rejected
#[test]
fn test_validate_part1_code_withInvalidCodes_shouldFail() {
    assert!(validate_part1_code("eng").is_err());
    assert!(validate_part1_code("english").is_err());
    assert!(validate_part1_code("xx").is_err());
    assert!(validate_part1_code("").is_err());
}

/// Test normalization to lowercase ISO 639-1
#[test]
fn test_normalize_part1_code_withMixedCase_shouldLowercase() {
    assert_eq!(normalize_part1_code("EN").unwrap(), "en");
    assert_eq!(normalize_part1_code(" Bg ").unwrap(), "bg");
    assert!(normalize_part1_code("spanish").is_err());
}

/// Test the DeepL tag form
#[test]
fn test_to_deepl_tag_withPart1Code_shouldUppercase() {
    assert_eq!(to_deepl_tag("en"), "EN");
    assert_eq!(to_deepl_tag(" bg "), "BG");
}

/// Test language display names used in log output
#[test]
fn test_get_language_name_withValidCode_shouldReturnName() {
    assert_eq!(get_language_name("en").unwrap(), "English");
    assert_eq!(get_language_name("bg").unwrap(), "Bulgarian");
    assert!(get_language_name("zz").is_err());
}
