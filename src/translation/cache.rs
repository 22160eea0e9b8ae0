/*!
 * Translation caching functionality.
 *
 * Translations are memoized under a SHA-256 digest of the source context,
 * the text and the target language. The cache is an explicit value handed
 * to `CachedTranslator`, never process-wide state.
 */

use async_trait::async_trait;
use log::debug;
use parking_lot::RwLock;
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::sync::Arc;

use super::translator::Translator;
use crate::errors::TranslatorError;

/// Translation cache for storing and retrieving translations
#[derive(Debug)]
pub struct TranslationCache {
    /// Internal cache storage, keyed by content digest
    cache: Arc<RwLock<HashMap<String, String>>>,

    /// Cache hit counter
    hits: Arc<RwLock<usize>>,

    /// Cache miss counter
    misses: Arc<RwLock<usize>>,

    /// Whether caching is enabled
    enabled: bool,
}

impl TranslationCache {
    /// Create a new translation cache
    pub fn new(enabled: bool) -> Self {
        Self {
            cache: Arc::new(RwLock::new(HashMap::new())),
            hits: Arc::new(RwLock::new(0)),
            misses: Arc::new(RwLock::new(0)),
            enabled,
        }
    }

    /// Digest identifying one translation request
    pub fn cache_key(source_context: &str, text: &str, target_language: &str) -> String {
        let mut hasher = Sha256::new();
        for part in [target_language, source_context, text] {
            hasher.update((part.len() as u64).to_le_bytes());
            hasher.update(part.as_bytes());
        }
        format!("{:x}", hasher.finalize())
    }

    /// Get a translation from the cache
    pub fn get(&self, source_context: &str, text: &str, target_language: &str) -> Option<String> {
        if !self.enabled {
            return None;
        }

        let key = Self::cache_key(source_context, text, target_language);
        let cached = self.cache.read().get(&key).cloned();

        match &cached {
            Some(_) => {
                *self.hits.write() += 1;
                debug!("Cache hit for '{}' ({})", truncate_text(text, 30), target_language);
            }
            None => {
                *self.misses.write() += 1;
                debug!("Cache miss for '{}' ({})", truncate_text(text, 30), target_language);
            }
        }

        cached
    }

    /// Store a translation in the cache
    pub fn store(&self, source_context: &str, text: &str, target_language: &str, translation: &str) {
        if !self.enabled {
            return;
        }

        let key = Self::cache_key(source_context, text, target_language);
        self.cache.write().insert(key, translation.to_string());
    }

    /// Get cache statistics as (hits, misses, hit rate)
    pub fn stats(&self) -> (usize, usize, f64) {
        let hits = *self.hits.read();
        let misses = *self.misses.read();
        let total = hits + misses;

        let hit_rate = if total > 0 {
            hits as f64 / total as f64
        } else {
            0.0
        };

        (hits, misses, hit_rate)
    }

    /// Clear the cache and its counters
    pub fn clear(&self) {
        self.cache.write().clear();
        *self.hits.write() = 0;
        *self.misses.write() = 0;
        debug!("Translation cache cleared");
    }

    pub fn len(&self) -> usize {
        self.cache.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.read().is_empty()
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}

impl Default for TranslationCache {
    fn default() -> Self {
        Self::new(true)
    }
}

impl Clone for TranslationCache {
    fn clone(&self) -> Self {
        Self {
            cache: self.cache.clone(),
            hits: self.hits.clone(),
            misses: self.misses.clone(),
            enabled: self.enabled,
        }
    }
}

/// Decorator that answers repeated requests from a `TranslationCache`
///
/// Only successful translations are cached; failures always reach the
/// inner translator again.
#[derive(Debug)]
pub struct CachedTranslator<T> {
    inner: T,
    cache: TranslationCache,
}

impl<T: Translator> CachedTranslator<T> {
    pub fn new(inner: T, cache: TranslationCache) -> Self {
        Self { inner, cache }
    }

    pub fn cache(&self) -> &TranslationCache {
        &self.cache
    }

    pub fn inner(&self) -> &T {
        &self.inner
    }
}

#[async_trait]
impl<T: Translator> Translator for CachedTranslator<T> {
    async fn translate(
        &self,
        source_context: &str,
        text: &str,
        target_language: &str,
    ) -> Result<String, TranslatorError> {
        if let Some(cached) = self.cache.get(source_context, text, target_language) {
            return Ok(cached);
        }

        let translation = self.inner.translate(source_context, text, target_language).await?;
        self.cache.store(source_context, text, target_language, &translation);
        Ok(translation)
    }
}

/// Truncate text to a maximum number of characters with ellipsis
fn truncate_text(text: &str, max_length: usize) -> String {
    if text.chars().count() <= max_length {
        text.to_string()
    } else {
        let truncated: String = text.chars().take(max_length).collect();
        format!("{}...", truncated)
    }
}
