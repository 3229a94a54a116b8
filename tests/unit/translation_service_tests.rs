/*!
 * Tests for the translation service retry and fallback behavior.
 *
 * These tests run on a paused tokio clock, so the backoff sleeps complete
 * instantly while still being observable through the virtual elapsed time.
 */

use std::sync::atomic::Ordering;
use std::time::Duration;

use subtrans::translation_service::{RetryPolicy, TranslationService};
use crate::common::mock_providers::MockProvider;

fn service_with(provider: MockProvider) -> TranslationService {
    TranslationService::with_provider(Box::new(provider), RetryPolicy::default())
}

/// Test the backoff schedule: attempt n waits (n + 1) * step
#[test]
fn test_delay_for_withDefaultPolicy_shouldIncreaseLinearly() {
    let policy = RetryPolicy::default();

    assert_eq!(policy.max_attempts, 5);
    assert_eq!(policy.delay_for(0), Duration::from_secs(2));
    assert_eq!(policy.delay_for(1), Duration::from_secs(4));
    assert_eq!(policy.delay_for(4), Duration::from_secs(10));
}

/// Test that a translation succeeding first try performs exactly one call
#[tokio::test(start_paused = true)]
async fn test_translate_line_withWorkingProvider_shouldReturnTranslation() {
    let provider = MockProvider::working().with_translation("Hello", "Zdravej");
    let calls = provider.call_count_handle();
    let service = service_with(provider);

    let result = service.translate_line("Hello").await;

    assert_eq!(result, "Zdravej");
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

/// Test that two rate limits are retried after 2s and 4s, then succeed
#[tokio::test(start_paused = true)]
async fn test_translate_line_withRateLimitedTwice_shouldRetryWithBackoff() {
    let provider = MockProvider::rate_limited(2).with_translation("Hello", "Zdravej");
    let calls = provider.call_count_handle();
    let service = service_with(provider);

    let started = tokio::time::Instant::now();
    let result = service.translate_line("Hello").await;

    assert_eq!(result, "Zdravej");
    assert_eq!(calls.load(Ordering::SeqCst), 3);
    // 2s after the first 429, 4s after the second
    assert_eq!(started.elapsed(), Duration::from_secs(6));
}

/// Test that exhausted retries fall back to the original text
#[tokio::test(start_paused = true)]
async fn test_translate_line_withPersistentRateLimit_shouldFallBackToOriginal() {
    let provider = MockProvider::always_rate_limited();
    let calls = provider.call_count_handle();
    let service = service_with(provider);

    let started = tokio::time::Instant::now();
    let result = service.translate_line("Hello").await;

    assert_eq!(result, "Hello");
    assert_eq!(calls.load(Ordering::SeqCst), 5);
    // Strictly increasing waits: 2 + 4 + 6 + 8 + 10 seconds
    assert_eq!(started.elapsed(), Duration::from_secs(30));
}

/// Test that a non-retryable failure falls back immediately
#[tokio::test(start_paused = true)]
async fn test_translate_line_withRequestFailure_shouldFallBackImmediately() {
    let provider = MockProvider::failing();
    let calls = provider.call_count_handle();
    let service = service_with(provider);

    let started = tokio::time::Instant::now();
    let result = service.translate_line("Hello world").await;

    assert_eq!(result, "Hello world");
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(started.elapsed(), Duration::ZERO);
}

/// Test that a custom retry budget is honored
#[tokio::test(start_paused = true)]
async fn test_translate_line_withCustomPolicy_shouldHonorAttemptLimit() {
    let provider = MockProvider::always_rate_limited();
    let calls = provider.call_count_handle();
    let service = TranslationService::with_provider(
        Box::new(provider),
        RetryPolicy {
            max_attempts: 2,
            backoff_step: Duration::from_secs(1),
        },
    );

    let started = tokio::time::Instant::now();
    let result = service.translate_line("Hello").await;

    assert_eq!(result, "Hello");
    assert_eq!(calls.load(Ordering::SeqCst), 2);
    assert_eq!(started.elapsed(), Duration::from_secs(3));
}
