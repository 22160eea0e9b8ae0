/*!
 * Key de-duplication and store merging.
 */

use log::warn;
use std::collections::{BTreeMap, HashMap};

use super::store::ResourceStore;

/// Drop repeated keys, comparing case-insensitively
///
/// The first spelling of a key wins. A later spelling that differs only by
/// case is logged against `source` and dropped; exact repeats are dropped
/// silently.
pub fn dedupe_keys_case_insensitive(keys: &[String], source: &str) -> Vec<String> {
    let mut accepted: HashMap<String, &str> = HashMap::new();
    let mut unique = Vec::new();

    for key in keys {
        let folded = key.to_lowercase();
        match accepted.get(&folded) {
            Some(first) if *first == key.as_str() => {}
            Some(first) => {
                warn!(
                    "Key '{}' in {} differs only by case from '{}'; keeping '{}'",
                    key, source, first, first
                );
            }
            None => {
                accepted.insert(folded, key.as_str());
                unique.push(key.clone());
            }
        }
    }

    unique
}

/// Keys absent from the store, compared exactly
pub fn missing_keys(keys: &[String], store: &ResourceStore) -> Vec<String> {
    keys.iter()
        .filter(|key| !store.contains_key(key))
        .cloned()
        .collect()
}

/// Merge new pairs into an existing mapping
///
/// Existing values are never overwritten. A new key that matches an
/// existing one case-insensitively is skipped with a warning, as is a later
/// pair repeating an earlier one by case.
pub fn merge_resources(
    existing: &BTreeMap<String, String>,
    new_pairs: &[(String, String)],
) -> BTreeMap<String, String> {
    let mut merged = existing.clone();
    let mut folded: HashMap<String, String> = existing
        .keys()
        .map(|key| (key.to_lowercase(), key.clone()))
        .collect();

    for (key, value) in new_pairs {
        match folded.get(&key.to_lowercase()) {
            Some(present) if present == key => {}
            Some(present) => {
                warn!("Skipping '{}': the store already holds '{}'", key, present);
            }
            None => {
                folded.insert(key.to_lowercase(), key.clone());
                merged.insert(key.clone(), value.clone());
            }
        }
    }

    merged
}
