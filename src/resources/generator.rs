/*!
 * Resource store updates for one source file and one culture.
 *
 * The generator de-duplicates a file's keys, diffs them against the
 * persisted store, translates what is missing through the worker pool and
 * persists the merged store. A translation failure aborts before anything
 * is written, so the previous store stays exactly as it was.
 */

use log::{debug, info, warn};
use std::path::Path;

use super::merge::{dedupe_keys_case_insensitive, merge_resources, missing_keys};
use super::store::ResourceStore;
use crate::errors::{MergeError, TranslatorError};
use crate::language_utils::describe_language;
use crate::translation::{is_declined, KeyTranslationPool};

/// What an update did to one store
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoreOutcome {
    /// Keys newly added to the store
    pub added: Vec<String>,
    /// Entries in the store after the merge
    pub total: usize,
    /// Whether the store file was written
    pub written: bool,
}

/// Merges translated keys into resource stores
#[derive(Debug, Clone)]
pub struct ResourceGenerator {
    pool: KeyTranslationPool,
}

impl ResourceGenerator {
    pub fn new(pool: KeyTranslationPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &KeyTranslationPool {
        &self.pool
    }

    /// Bring the store at `store_path` up to date with `keys`
    ///
    /// # Arguments
    /// * `source_path` - The file the keys came from, for diagnostics
    /// * `source_content` - Context handed to the translator with every key
    /// * `keys` - Extracted keys, possibly with duplicates
    /// * `store_path` - The store for this file and culture
    /// * `language` - The target culture code
    /// * `take_action` - When false nothing is written
    pub async fn update_store(
        &self,
        source_path: &Path,
        source_content: &str,
        keys: &[String],
        store_path: &Path,
        language: &str,
        take_action: bool,
    ) -> Result<StoreOutcome, MergeError> {
        let source = source_path.display().to_string();
        let keys = dedupe_keys_case_insensitive(keys, &source);
        let store = ResourceStore::load(store_path);
        let missing = missing_keys(&keys, &store);

        if missing.is_empty() && store.is_empty() {
            debug!("No localizable keys in {}; no store for {}", source, language);
            return Ok(StoreOutcome::default());
        }

        let translations = self
            .pool
            .translate_keys(source_content, &missing, &describe_language(language))
            .await;

        let mut failures = translations.failures;
        let mut pairs = Vec::with_capacity(translations.translated.len());
        for (key, translated) in translations.translated {
            let translated = translated.trim().to_string();
            if translated.is_empty() {
                failures.push((key.clone(), TranslatorError::EmptyResult(key)));
                continue;
            }
            if is_declined(&key, &translated) {
                info!("No translation needed for \"{}\" in {} ({})", key, source, language);
            } else {
                debug!("Translated \"{}\" -> \"{}\" ({})", key, translated, language);
            }
            pairs.push((key, translated));
        }

        if !failures.is_empty() {
            warn!("Leaving {} untouched: {} key(s) failed", store_path.display(), failures.len());
            return Err(MergeError::Translation { source_file: source, failures });
        }

        let merged = ResourceStore::from_entries(merge_resources(store.entries(), &pairs));
        let added: Vec<String> = pairs
            .into_iter()
            .map(|(key, _)| key)
            .filter(|key| !store.contains_key(key) && merged.contains_key(key))
            .collect();

        let written = if take_action {
            merged.save_if_changed(store_path)?
        } else {
            false
        };

        if written {
            info!("Wrote {} ({} new, {} total)", store_path.display(), added.len(), merged.len());
        }

        Ok(StoreOutcome { added, total: merged.len(), written })
    }
}
