/*!
 * Mock translator implementations for testing.
 *
 * This module provides mock translators that simulate different behaviors:
 * - `MockTranslator::working()` - Always succeeds with a marked translation
 * - `MockTranslator::echo()` - Returns the source text, i.e. declines
 * - `MockTranslator::failing()` - Always fails with an error
 * - `MockTranslator::failing_on(key)` - Fails for one key only
 */

use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use super::translator::Translator;
use crate::errors::TranslatorError;

/// A request received by the mock
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockRequest {
    pub source_context: String,
    pub text: String,
    pub target_language: String,
}

/// Behavior mode for the mock translator
#[derive(Debug, Clone, PartialEq)]
pub enum MockBehavior {
    /// Always succeeds with `[<language>] <text>`
    Working,
    /// Returns the text unchanged
    Echo,
    /// Always fails with an error
    Failing,
    /// Fails for this exact text, succeeds otherwise
    FailingOn(String),
    /// Succeeds after a delay
    Slow { delay_ms: u64 },
}

/// Mock translator for testing merge and pool behavior
#[derive(Debug, Clone)]
pub struct MockTranslator {
    behavior: MockBehavior,
    request_count: Arc<AtomicUsize>,
    in_flight: Arc<AtomicUsize>,
    max_in_flight: Arc<AtomicUsize>,
    requests: Arc<Mutex<Vec<MockRequest>>>,
}

impl MockTranslator {
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            request_count: Arc::new(AtomicUsize::new(0)),
            in_flight: Arc::new(AtomicUsize::new(0)),
            max_in_flight: Arc::new(AtomicUsize::new(0)),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn working() -> Self {
        Self::new(MockBehavior::Working)
    }

    pub fn echo() -> Self {
        Self::new(MockBehavior::Echo)
    }

    pub fn failing() -> Self {
        Self::new(MockBehavior::Failing)
    }

    pub fn failing_on(text: &str) -> Self {
        Self::new(MockBehavior::FailingOn(text.to_string()))
    }

    pub fn slow(delay_ms: u64) -> Self {
        Self::new(MockBehavior::Slow { delay_ms })
    }

    /// Number of translate calls received so far
    pub fn call_count(&self) -> usize {
        self.request_count.load(Ordering::SeqCst)
    }

    /// Highest number of calls that were running at the same time
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    /// Every request received, in arrival order
    pub fn requests(&self) -> Vec<MockRequest> {
        self.requests.lock().clone()
    }

    /// The translation `Working` produces for a text
    pub fn expected(text: &str, target_language: &str) -> String {
        format!("[{}] {}", target_language, text)
    }
}

#[async_trait]
impl Translator for MockTranslator {
    async fn translate(
        &self,
        source_context: &str,
        text: &str,
        target_language: &str,
    ) -> Result<String, TranslatorError> {
        self.request_count.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().push(MockRequest {
            source_context: source_context.to_string(),
            text: text.to_string(),
            target_language: target_language.to_string(),
        });

        let running = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(running, Ordering::SeqCst);

        // Yield so concurrent calls overlap
        tokio::task::yield_now().await;

        let result = match &self.behavior {
            MockBehavior::Working => Ok(Self::expected(text, target_language)),
            MockBehavior::Echo => Ok(text.to_string()),
            MockBehavior::Failing => Err(TranslatorError::RequestFailed(
                "Simulated translator failure".to_string(),
            )),
            MockBehavior::FailingOn(failing) if failing == text => Err(
                TranslatorError::RequestFailed(format!("Simulated failure for '{}'", text)),
            ),
            MockBehavior::FailingOn(_) => Ok(Self::expected(text, target_language)),
            MockBehavior::Slow { delay_ms } => {
                tokio::time::sleep(tokio::time::Duration::from_millis(*delay_ms)).await;
                Ok(Self::expected(text, target_language))
            }
        };

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        result
    }
}
