/*!
 * # viewlingo - localization tooling for Razor views and C# sources
 *
 * A Rust library that prepares server-rendered views and C# source files
 * for translation.
 *
 * ## Features
 *
 * - Classify view lines as Razor script or HTML markup and group them into segments
 * - Rewrite prose in markup segments into `@Localizer["..."]` lookups
 * - Extract localizer keys from views, `localizer["..."]` calls, data annotations
 *   and navigation metadata
 * - Split markdown-like content into translatable and static chunks
 * - Merge translated keys into `.resx` resource stores without losing existing values
 * - Inject controller navigation labels into a localizer-visible method so view
 *   stores pick them up
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `razor`: Line classification, segmentation and markup localization:
 *   - `razor::line`: Script/markup line classifier
 *   - `razor::segment`: Grouping of classified lines
 *   - `razor::markup`: Markup fragment capability backed by html5ever
 *   - `razor::localizer`: Text-node wrapping and lookup extraction
 * - `shredder`: Chunking of whole-file content under a size budget
 * - `extract`: Regex-driven key extractors for C# sources
 * - `injection`: Rewriting of the navigation-label injector method
 * - `resources`: Resource store parsing, merging and persistence
 * - `translation`: The translate capability, its cache and the bounded worker pool
 * - `app_config`: Configuration management
 * - `app_controller`: File-level orchestration
 * - `file_utils`: File system operations and resource path mapping
 * - `language_utils`: Culture codes and display names
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod errors;
pub mod extract;
pub mod file_utils;
pub mod injection;
pub mod language_utils;
pub mod razor;
pub mod resources;
pub mod shredder;
pub mod translation;

// Re-export main types for easier usage
pub use app_config::Config;
pub use errors::{InjectionError, MergeError, ResourceError, TranslatorError};
pub use razor::{classify_and_segment, Line, LineKind, Segment, ViewLocalizer};
pub use resources::{merge_resources, ResourceGenerator, ResourceStore};
pub use shredder::{ChunkKind, MarkdownChunk, MarkdownShredder};
pub use translation::{CachedTranslator, KeyTranslationPool, TranslationCache, Translator};
