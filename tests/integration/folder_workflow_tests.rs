/*!
 * End-to-end tests for folder translation
 */

use std::fs;
use std::sync::Arc;
use viewlingo::app_config::Config;
use viewlingo::translation::MockTranslator;

use crate::common;

const GUIDE: &str = "# Title\n\nSome text.\n\n```bash\nls -la\n```\n\nEnd.";

#[tokio::test]
async fn test_translate_folder_withCodeBlock_shouldCopyCodeVerbatim() {
    let dir = common::create_temp_dir().unwrap();
    let source = dir.path().join("en");
    let destination = dir.path().join("xx");
    common::create_test_file(&source, "guide/intro.md", GUIDE).unwrap();
    let controller = common::test_controller(Config::default(), Arc::new(MockTranslator::working()));

    let summary = controller.translate_folder(&source, &destination, "xx", true).await.unwrap();

    assert_eq!(summary.processed, 1);
    assert_eq!(summary.files_written, 1);
    assert_eq!(
        fs::read_to_string(destination.join("guide/intro.md")).unwrap(),
        "[xx] # Title\n\nSome text.\n\n```bash\nls -la\n```\n\n[xx] End."
    );
}

#[tokio::test]
async fn test_translate_folder_withSkipExisting_shouldLeaveDestinationFile() {
    let dir = common::create_temp_dir().unwrap();
    let source = dir.path().join("en");
    let destination = dir.path().join("xx");
    common::create_test_file(&source, "a.md", "Alpha").unwrap();
    common::create_test_file(&source, "b.md", "Beta").unwrap();
    common::create_test_file(&destination, "a.md", "Already done").unwrap();
    let mut config = Config::default();
    config.folder.skip_existing = true;
    let mock = Arc::new(MockTranslator::working());
    let controller = common::test_controller(config, mock.clone());

    let summary = controller.translate_folder(&source, &destination, "xx", true).await.unwrap();

    assert_eq!(summary.skipped, 1);
    assert_eq!(summary.processed, 1);
    assert_eq!(fs::read_to_string(destination.join("a.md")).unwrap(), "Already done");
    assert_eq!(fs::read_to_string(destination.join("b.md")).unwrap(), "[xx] Beta");
    assert_eq!(mock.call_count(), 1);
}

#[tokio::test]
async fn test_translate_folder_withoutSkipExisting_shouldOverwrite() {
    let dir = common::create_temp_dir().unwrap();
    let source = dir.path().join("en");
    let destination = dir.path().join("xx");
    common::create_test_file(&source, "a.md", "Alpha").unwrap();
    common::create_test_file(&destination, "a.md", "Stale").unwrap();
    let controller = common::test_controller(Config::default(), Arc::new(MockTranslator::working()));

    controller.translate_folder(&source, &destination, "xx", true).await.unwrap();

    assert_eq!(fs::read_to_string(destination.join("a.md")).unwrap(), "[xx] Alpha");
}

#[tokio::test]
async fn test_translate_folder_withTrashAndOtherExtensions_shouldSkipThem() {
    let dir = common::create_temp_dir().unwrap();
    let source = dir.path().join("en");
    let destination = dir.path().join("xx");
    common::create_test_file(&source, "keep.md", "Keep").unwrap();
    common::create_test_file(&source, "page.html", "<p>Page</p>").unwrap();
    common::create_test_file(&source, "old.trash/gone.md", "Gone").unwrap();
    common::create_test_file(&source, "image.svg", "<svg/>").unwrap();
    common::create_test_file(&source, "nested/deep.txt", "Deep").unwrap();
    let mut config = Config::default();
    config.folder.extensions = vec!["md".to_string(), "html".to_string()];
    config.folder.recursive = false;
    let controller = common::test_controller(config, Arc::new(MockTranslator::working()));

    controller.translate_folder(&source, &destination, "xx", true).await.unwrap();

    assert_eq!(common::list_files(&destination), vec!["keep.md", "page.html"]);
}

#[tokio::test]
async fn test_translate_folder_withFailingTranslator_shouldNotWriteDestination() {
    let dir = common::create_temp_dir().unwrap();
    let source = dir.path().join("en");
    let destination = dir.path().join("xx");
    common::create_test_file(&source, "a.md", "Alpha").unwrap();
    let controller = common::test_controller(Config::default(), Arc::new(MockTranslator::failing()));

    let summary = controller.translate_folder(&source, &destination, "xx", true).await.unwrap();

    assert_eq!(summary.failed, 1);
    assert!(!destination.join("a.md").exists());
}

#[tokio::test]
async fn test_translate_folder_withDryRun_shouldNotCreateDestination() {
    let dir = common::create_temp_dir().unwrap();
    let source = dir.path().join("en");
    let destination = dir.path().join("xx");
    common::create_test_file(&source, "a.md", "Alpha").unwrap();
    let controller = common::test_controller(Config::default(), Arc::new(MockTranslator::working()));

    let summary = controller.translate_folder(&source, &destination, "xx", false).await.unwrap();

    assert_eq!(summary.processed, 1);
    assert!(!destination.exists());
}

#[tokio::test]
async fn test_translate_content_withSmallChunks_shouldKeepChunkOrder() {
    let mut config = Config::default();
    config.translation.max_chunk_length = 8;
    config.translation.max_concurrent_requests = 3;
    let controller = common::test_controller(config, Arc::new(MockTranslator::slow(5)));

    let translated = controller
        .translate_content("First\n\nSecond\n\nThird\n\nFourth", "xx")
        .await
        .unwrap();

    assert_eq!(
        translated,
        "[xx] First\n\n[xx] Second\n\n[xx] Third\n\n[xx] Fourth"
    );
}

#[tokio::test]
async fn test_translate_content_withKnownCulture_shouldDescribeLanguage() {
    let mock = Arc::new(MockTranslator::working());
    let controller = common::test_controller(Config::default(), mock.clone());

    controller.translate_content("Hello", "fr-FR").await.unwrap();

    assert_eq!(mock.requests()[0].target_language, "fr-FR, Français (France)");
}
