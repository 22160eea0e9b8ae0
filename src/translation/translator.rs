/*!
 * The translate capability.
 *
 * Everything that produces translations plugs in through `Translator`:
 * remote backends, the cache decorator and the test doubles.
 */

use async_trait::async_trait;
use std::fmt::Debug;

use crate::errors::TranslatorError;

/// Common trait for all translation backends
///
/// Implementations must be shareable across the worker pool.
#[async_trait]
pub trait Translator: Send + Sync + Debug {
    /// Translate `text` into `target_language`
    ///
    /// # Arguments
    /// * `source_context` - The surrounding content, used to disambiguate `text`
    /// * `text` - The key or chunk to translate
    /// * `target_language` - The target culture, e.g. `zh-CN`
    async fn translate(
        &self,
        source_context: &str,
        text: &str,
        target_language: &str,
    ) -> Result<String, TranslatorError>;
}

#[async_trait]
impl<T: Translator + ?Sized> Translator for std::sync::Arc<T> {
    async fn translate(
        &self,
        source_context: &str,
        text: &str,
        target_language: &str,
    ) -> Result<String, TranslatorError> {
        (**self).translate(source_context, text, target_language).await
    }
}

/// Translator that returns the source text unchanged
///
/// Seeds neutral-culture stores where every value equals its key.
#[derive(Debug, Default, Clone, Copy)]
pub struct SourceTextTranslator;

#[async_trait]
impl Translator for SourceTextTranslator {
    async fn translate(
        &self,
        _source_context: &str,
        text: &str,
        _target_language: &str,
    ) -> Result<String, TranslatorError> {
        Ok(text.to_string())
    }
}

/// True when a translation only repeats its source text
pub fn is_declined(source: &str, translation: &str) -> bool {
    source.trim().to_lowercase() == translation.trim().to_lowercase()
}
