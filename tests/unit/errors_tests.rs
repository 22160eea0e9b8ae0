/*!
 * Tests for error types
 */

use std::io;
use viewlingo::errors::{InjectionError, MergeError, ResourceError, TranslatorError};

#[test]
fn test_translatorError_display_shouldIncludeDetail() {
    let error = TranslatorError::RequestFailed("timeout".to_string());
    assert_eq!(error.to_string(), "Translation request failed: timeout");

    let error = TranslatorError::EmptyResult("Hello".to_string());
    assert!(error.to_string().contains("Hello"));
}

#[test]
fn test_mergeError_translation_shouldListFailedKeys() {
    let error = MergeError::Translation {
        source_file: "Views/Home/Index.cshtml".to_string(),
        failures: vec![
            ("Save".to_string(), TranslatorError::RequestFailed("boom".to_string())),
            ("Cancel".to_string(), TranslatorError::EmptyResult("Cancel".to_string())),
        ],
    };

    let message = error.to_string();
    assert!(message.starts_with("Failed to translate 2 key(s) for Views/Home/Index.cshtml"));
    assert!(message.contains("\"Save\""));
    assert!(message.contains("\"Cancel\""));
}

#[test]
fn test_resourceError_fromIo_shouldWrap() {
    let error: ResourceError = io::Error::new(io::ErrorKind::PermissionDenied, "denied").into();
    assert!(matches!(error, ResourceError::Io(_)));

    let merge: MergeError = error.into();
    assert!(merge.to_string().starts_with("Resource error:"));
}

#[test]
fn test_injectionError_display_shouldNameMethodAndLocation() {
    let error = InjectionError::MethodNotFound {
        method: "_useless_for_localizer".to_string(),
        location: "/app".to_string(),
    };
    assert_eq!(error.to_string(), "No _useless_for_localizer() method found in /app");

    let error = InjectionError::MalformedBody {
        method: "_useless_for_localizer".to_string(),
        file: "Services/ViewModelArgsInjector.cs".to_string(),
    };
    assert!(error.to_string().ends_with("in Services/ViewModelArgsInjector.cs"));
}
