/*!
 * Bounded fan-out of key translations.
 *
 * The keys missing from one resource store are translated concurrently,
 * at most `max_concurrent_requests` at a time. Results land in a shared
 * collection behind a mutex; awaiting the whole stream is the barrier
 * before anything is merged or persisted.
 */

use futures::stream::{self, StreamExt};
use log::{debug, error};
use parking_lot::Mutex;
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::Semaphore;

use super::translator::Translator;
use crate::errors::TranslatorError;

/// Outcome of translating a batch of keys
#[derive(Debug, Default, Clone, PartialEq)]
pub struct KeyTranslations {
    /// Successful `(key, translation)` pairs, in key submission order
    pub translated: Vec<(String, String)>,
    /// Keys whose translation failed, in key submission order
    pub failures: Vec<(String, TranslatorError)>,
}

impl KeyTranslations {
    /// True when every submitted key was translated
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Worker pool translating keys through a shared translator
#[derive(Debug, Clone)]
pub struct KeyTranslationPool {
    translator: Arc<dyn Translator>,
    max_concurrent_requests: usize,
}

impl KeyTranslationPool {
    /// Create a pool; a concurrency of zero is raised to one
    pub fn new(translator: Arc<dyn Translator>, max_concurrent_requests: usize) -> Self {
        Self {
            translator,
            max_concurrent_requests: max_concurrent_requests.max(1),
        }
    }

    pub fn max_concurrent_requests(&self) -> usize {
        self.max_concurrent_requests
    }

    pub fn translator(&self) -> &Arc<dyn Translator> {
        &self.translator
    }

    /// Translate every key once and wait for all of them
    ///
    /// Exact duplicates in `keys` are submitted once. Failures are collected,
    /// never dropped; the caller decides whether to persist.
    pub async fn translate_keys(
        &self,
        source_context: &str,
        keys: &[String],
        target_language: &str,
    ) -> KeyTranslations {
        let mut seen = HashSet::new();
        let tasks: Vec<(usize, String)> = keys
            .iter()
            .filter(|key| seen.insert(key.as_str()))
            .cloned()
            .enumerate()
            .collect();

        if tasks.is_empty() {
            return KeyTranslations::default();
        }

        debug!(
            "Translating {} key(s) into {} with {} worker(s)",
            tasks.len(),
            target_language,
            self.max_concurrent_requests
        );

        let semaphore = Arc::new(Semaphore::new(self.max_concurrent_requests));
        let results: Arc<Mutex<Vec<(usize, String, Result<String, TranslatorError>)>>> =
            Arc::new(Mutex::new(Vec::with_capacity(tasks.len())));

        stream::iter(tasks)
            .map(|(index, key)| {
                let semaphore = semaphore.clone();
                let translator = self.translator.clone();
                let results = results.clone();

                async move {
                    let outcome = match semaphore.acquire().await {
                        Ok(_permit) => translator.translate(source_context, &key, target_language).await,
                        Err(e) => Err(TranslatorError::RequestFailed(e.to_string())),
                    };

                    if let Err(e) = &outcome {
                        error!("Failed to translate '{}' into {}: {}", key, target_language, e);
                    }

                    results.lock().push((index, key, outcome));
                }
            })
            .buffer_unordered(self.max_concurrent_requests)
            .collect::<Vec<()>>()
            .await;

        let mut collected = std::mem::take(&mut *results.lock());
        collected.sort_by_key(|(index, _, _)| *index);

        let mut translations = KeyTranslations::default();
        for (_, key, outcome) in collected {
            match outcome {
                Ok(value) => translations.translated.push((key, value)),
                Err(e) => translations.failures.push((key, e)),
            }
        }

        translations
    }
}
