/*!
 * Tests for resource stores, merging and generation
 */

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use viewlingo::resources::{merge_resources, ResourceGenerator, ResourceStore};
use viewlingo::translation::{KeyTranslationPool, MockTranslator};
use viewlingo::MergeError;

use crate::common;

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|item| item.to_string()).collect()
}

#[test]
fn test_store_save_withSpecialCharacters_shouldLoadSameEntries() {
    let dir = common::create_temp_dir().unwrap();
    let path = dir.path().join("Resources").join("Views").join("Index.fr-FR.resx");
    let mut store = ResourceStore::new();
    store.insert("Terms & Conditions", "Conditions <générales>");
    store.insert("Say \"hi\"", "Dites \"salut\"");
    store.insert("Padded", "  padded  ");

    store.save(&path).unwrap();
    let loaded = ResourceStore::load(&path);

    assert_eq!(loaded, store);
}

#[test]
fn test_store_to_resx_shouldKeepTemplateScaffold() {
    let mut store = ResourceStore::new();
    store.insert("b", "2");
    store.insert("a", "1");

    let document = store.to_resx();

    assert!(document.contains("<resheader name=\"resmimetype\">"));
    assert!(!document.contains("{{CONTENT}}"));
    let first = document.find("<data name=\"a\"").unwrap();
    let second = document.find("<data name=\"b\"").unwrap();
    assert!(first < second);
    assert!(document.trim_end().ends_with("</root>"));
}

#[test]
fn test_store_save_if_changed_withSameEntries_shouldNotRewrite() {
    let dir = common::create_temp_dir().unwrap();
    let path = dir.path().join("Home.de-DE.resx");
    let mut store = ResourceStore::new();
    store.insert("Hello", "Hallo");

    assert!(store.save_if_changed(&path).unwrap());
    assert!(!ResourceStore::load(&path).save_if_changed(&path).unwrap());

    store.insert("World", "Welt");
    assert!(store.save_if_changed(&path).unwrap());
}

#[test]
fn test_merge_resources_withRepeatedCaseVariants_shouldKeepFirstPair() {
    let pairs = vec![
        ("Save".to_string(), "Enregistrer".to_string()),
        ("SAVE".to_string(), "ENREGISTRER".to_string()),
    ];

    let merged = merge_resources(&BTreeMap::new(), &pairs);

    assert_eq!(merged.len(), 1);
    assert_eq!(merged.get("Save").map(String::as_str), Some("Enregistrer"));
}

#[tokio::test]
async fn test_update_store_withCaseConflict_shouldWriteSingleEntry() {
    let dir = common::create_temp_dir().unwrap();
    let store_path = dir.path().join("Nav.xx.resx");
    let mock = Arc::new(MockTranslator::working());
    let generator = ResourceGenerator::new(KeyTranslationPool::new(mock.clone(), 4));

    let outcome = generator
        .update_store(Path::new("Nav.cs"), "", &strings(&["Go To", "go to"]), &store_path, "xx", true)
        .await
        .unwrap();

    assert_eq!(outcome.added, vec!["Go To"]);
    assert_eq!(mock.call_count(), 1);
    let store = ResourceStore::load(&store_path);
    assert_eq!(store.len(), 1);
    assert_eq!(store.get("Go To"), Some("[xx] Go To"));
}

#[tokio::test]
async fn test_update_store_withMalformedStore_shouldRebuildIt() {
    let dir = common::create_temp_dir().unwrap();
    let store_path = common::create_test_file(dir.path(), "Broken.xx.resx", "<root><data name=\"x\">").unwrap();
    let generator = ResourceGenerator::new(KeyTranslationPool::new(Arc::new(MockTranslator::working()), 2));

    let outcome = generator
        .update_store(Path::new("Broken.cs"), "", &strings(&["Hello"]), &store_path, "xx", true)
        .await
        .unwrap();

    assert!(outcome.written);
    assert_eq!(ResourceStore::load(&store_path).get("Hello"), Some("[xx] Hello"));
}

#[tokio::test]
async fn test_update_store_withEmptyTranslation_shouldFailWithoutWriting() {
    let dir = common::create_temp_dir().unwrap();
    let store_path = dir.path().join("Blank.xx.resx");
    let generator = ResourceGenerator::new(KeyTranslationPool::new(Arc::new(MockTranslator::echo()), 2));

    let result = generator
        .update_store(Path::new("Blank.cs"), "", &strings(&["Fine", " "]), &store_path, "xx", true)
        .await;

    // A blank key reaches the translator only when callers skip extraction
    assert!(matches!(result, Err(MergeError::Translation { .. })));
    assert!(!store_path.exists());
    assert!(fs::read_dir(dir.path()).unwrap().next().is_none());
}
