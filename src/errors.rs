/*!
 * Error types for the viewlingo application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

use thiserror::Error;

/// Errors raised by a translate capability
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TranslatorError {
    /// The backend could not produce a translation
    #[error("Translation request failed: {0}")]
    RequestFailed(String),

    /// The backend answered with nothing usable
    #[error("Translation result is empty for: {0}")]
    EmptyResult(String),
}

/// Errors that can occur while reading or writing a resource store
#[derive(Error, Debug)]
pub enum ResourceError {
    /// The persisted document is not a readable resource store
    #[error("Malformed resource store: {0}")]
    Malformed(String),

    /// Error from a file operation
    #[error("Resource file error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<quick_xml::Error> for ResourceError {
    fn from(error: quick_xml::Error) -> Self {
        Self::Malformed(error.to_string())
    }
}

/// Errors that abort the merge of one source file's resources
#[derive(Error, Debug)]
pub enum MergeError {
    /// One or more keys could not be translated
    #[error("Failed to translate {} key(s) for {source_file}: {}", .failures.len(), describe_failures(.failures))]
    Translation {
        /// Source file whose keys were being translated
        source_file: String,
        /// Key and failure pairs, in submission order
        failures: Vec<(String, TranslatorError)>,
    },

    /// The store could not be persisted
    #[error("Resource error: {0}")]
    Resource(#[from] ResourceError),
}

fn describe_failures(failures: &[(String, TranslatorError)]) -> String {
    failures
        .iter()
        .map(|(key, error)| format!("\"{}\" ({})", key, error))
        .collect::<Vec<_>>()
        .join("; ")
}

/// Errors that stop navigation keys from being injected into the views' localizer
#[derive(Error, Debug, PartialEq)]
pub enum InjectionError {
    /// No source declares the injector method
    #[error("No {method}() method found in {location}")]
    MethodNotFound {
        /// Name of the method that was searched for
        method: String,
        /// File or project root that was scanned
        location: String,
    },

    /// The method has no block body, or its braces never close
    #[error("Cannot find the body of {method}() in {file}")]
    MalformedBody {
        /// Name of the method being rewritten
        method: String,
        /// File declaring the method
        file: String,
    },
}
