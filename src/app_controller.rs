use anyhow::{anyhow, Result};
use futures::stream::{self, StreamExt, TryStreamExt};
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, error, info, warn};
use std::path::Path;
use std::sync::Arc;

use crate::app_config::Config;
use crate::errors::{InjectionError, TranslatorError};
use crate::extract::{extract_csharp_keys, unique_trimmed, KeyExtractor, NavBarExtractor};
use crate::file_utils::FileManager;
use crate::injection::{declares_injector, is_controller_source, rewrite_injector_body, INJECTOR_METHOD};
use crate::language_utils::describe_language;
use crate::razor::ViewLocalizer;
use crate::resources::ResourceGenerator;
use crate::shredder::{MarkdownChunk, MarkdownShredder};
use crate::translation::{CachedTranslator, KeyTranslationPool, TranslationCache, Translator};

// @module: File-level orchestration of localization runs

/// Counters reported at the end of a run
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// Files fully processed
    pub processed: usize,
    /// Files skipped: excluded, missing, empty or already translated
    pub skipped: usize,
    /// Files whose processing failed
    pub failed: usize,
    /// Resource stores written
    pub stores_written: usize,
    /// Source or destination files written
    pub files_written: usize,
}

/// Main application controller
pub struct Controller {
    // @field: App configuration
    config: Config,
    // @field: Translator shared by every file, cached when configured
    translator: Arc<dyn Translator>,
    // @field: Merges translated keys into stores
    generator: ResourceGenerator,
    localizer: ViewLocalizer,
    shredder: MarkdownShredder,
    // @field: Draw progress bars on stderr
    show_progress: bool,
}

impl Controller {
    // @method: Create a new controller with the given configuration and translator
    pub fn with_config(config: Config, translator: Arc<dyn Translator>) -> Result<Self> {
        config.validate()?;

        let translator: Arc<dyn Translator> = if config.translation.cache_enabled {
            Arc::new(CachedTranslator::new(translator, TranslationCache::new(true)))
        } else {
            translator
        };

        let pool = KeyTranslationPool::new(translator.clone(), config.translation.max_concurrent_requests);

        Ok(Self {
            config,
            translator,
            generator: ResourceGenerator::new(pool),
            localizer: ViewLocalizer::new(),
            shredder: MarkdownShredder::new(),
            show_progress: true,
        })
    }

    /// Enable or disable progress bars
    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Rewrite every view under `root` with lookup expressions, without stores
    pub async fn wrap_views(&self, root: &Path, take_action: bool) -> Result<RunSummary> {
        let views = self.discover_views(root)?;
        let progress = self.progress_bar(views.len(), "views");
        let mut summary = RunSummary::default();

        for view in &views {
            progress.set_message(display_name(view));

            let Some(original) = read_source(view, &mut summary) else {
                progress.inc(1);
                continue;
            };

            let (rewritten, keys) = self.localizer.localize_markup(&original);
            info!("Wrapped {} key(s) in {}", keys.len(), view.display());

            if take_action && rewritten != original {
                match FileManager::write_to_file(view, &rewritten) {
                    Ok(()) => summary.files_written += 1,
                    Err(e) => {
                        error!("Error writing {}: {:#}", view.display(), e);
                        summary.failed += 1;
                        progress.inc(1);
                        continue;
                    }
                }
            }

            summary.processed += 1;
            progress.inc(1);
        }

        progress.finish_with_message("Views wrapped");
        log_summary("Wrap", &summary);
        Ok(summary)
    }

    /// Localize every view under `root` and update its stores for each language
    ///
    /// Keys already wrapped in a view come first, then keys wrapped by this
    /// run. The rewritten view is saved only after all of its stores were
    /// updated.
    pub async fn generate_view_resources(
        &self,
        root: &Path,
        languages: &[String],
        take_action: bool,
    ) -> Result<RunSummary> {
        let views = self.discover_views(root)?;
        let progress = self.progress_bar(views.len(), "views");
        let mut summary = RunSummary::default();

        for view in &views {
            progress.set_message(display_name(view));

            let Some(original) = read_source(view, &mut summary) else {
                progress.inc(1);
                continue;
            };

            let (rewritten, keys) = localize_view(&self.localizer, &original);
            debug!("Found {} key(s) in {}", keys.len(), view.display());

            if !self
                .update_stores(root, view, &original, &keys, languages, take_action, &mut summary)
                .await
            {
                summary.failed += 1;
                progress.inc(1);
                continue;
            }

            if take_action && rewritten != original {
                match FileManager::write_to_file(view, &rewritten) {
                    Ok(()) => {
                        info!("Updated view file: {}", view.display());
                        summary.files_written += 1;
                    }
                    Err(e) => {
                        error!("Error writing {}: {:#}", view.display(), e);
                        summary.failed += 1;
                        progress.inc(1);
                        continue;
                    }
                }
            }

            summary.processed += 1;
            progress.inc(1);
        }

        progress.finish_with_message("View resources generated");
        log_summary("View resources", &summary);
        Ok(summary)
    }

    /// Extract keys from every C# source under `root` and update its stores
    pub async fn generate_csharp_resources(
        &self,
        root: &Path,
        languages: &[String],
        take_action: bool,
    ) -> Result<RunSummary> {
        ensure_directory(root)?;
        let sources = FileManager::find_csharp_sources(root)?;
        info!("Found {} C# file(s) under {}", sources.len(), root.display());

        let progress = self.progress_bar(sources.len(), "files");
        let mut summary = RunSummary::default();

        for source in &sources {
            progress.set_message(display_name(source));

            let Some(content) = read_source(source, &mut summary) else {
                progress.inc(1);
                continue;
            };

            let keys = extract_csharp_keys(&content);
            debug!("Found {} key(s) in {}", keys.len(), source.display());

            if self
                .update_stores(root, source, &content, &keys, languages, take_action, &mut summary)
                .await
            {
                summary.processed += 1;
            } else {
                summary.failed += 1;
            }
            progress.inc(1);
        }

        progress.finish_with_message("C# resources generated");
        log_summary("C# resources", &summary);
        Ok(summary)
    }

    /// Copy the navigation labels of every controller into the injector method
    ///
    /// Labels are gathered in file order from the `[RenderInNavBar]`
    /// properties of controller sources under `root`. The injector body is
    /// replaced as a whole, so a run with unchanged controllers writes nothing.
    pub async fn generate_view_injections(&self, root: &Path, take_action: bool) -> Result<RunSummary> {
        ensure_directory(root)?;
        let sources = FileManager::find_csharp_sources(root)?;
        let mut summary = RunSummary::default();
        let mut labels = Vec::new();
        let mut injector = None;

        for source in &sources {
            let Some(content) = read_source(source, &mut summary) else {
                continue;
            };

            if is_controller_source(source) {
                let found = NavBarExtractor.extract_keys(&content);
                debug!("Found {} navigation label(s) in {}", found.len(), source.display());
                labels.extend(found);
                summary.processed += 1;
            }

            if injector.is_none() && declares_injector(&content) {
                injector = Some((source.clone(), content));
            }
        }

        let Some((injector_path, original)) = injector else {
            return Err(InjectionError::MethodNotFound {
                method: INJECTOR_METHOD.to_string(),
                location: root.display().to_string(),
            }
            .into());
        };

        let labels = unique_trimmed(labels);
        let rewritten = rewrite_injector_body(&original, &labels, &injector_path.display().to_string())?;
        info!(
            "Injecting {} navigation label(s) into {}",
            labels.len(),
            injector_path.display()
        );

        if rewritten == original {
            info!("{} is up to date", injector_path.display());
        } else if take_action {
            FileManager::write_to_file(&injector_path, &rewritten)?;
            summary.files_written += 1;
        }

        log_summary("View injections", &summary);
        Ok(summary)
    }

    /// Translate every matching file from `source_root` into `destination_root`
    pub async fn translate_folder(
        &self,
        source_root: &Path,
        destination_root: &Path,
        language: &str,
        take_action: bool,
    ) -> Result<RunSummary> {
        ensure_directory(source_root)?;
        let folder = &self.config.folder;
        let files = FileManager::find_folder_files(source_root, &folder.extensions, folder.recursive)?;
        info!(
            "Translating {} file(s) from {} to {} into {}",
            files.len(),
            source_root.display(),
            destination_root.display(),
            language
        );

        let progress = self.progress_bar(files.len(), "files");
        let mut summary = RunSummary::default();

        for file in &files {
            progress.set_message(display_name(file));

            let destination = FileManager::folder_destination_path(source_root, destination_root, file)?;
            if folder.skip_existing && destination.exists() {
                info!("Skipping {} because {} already exists", file.display(), destination.display());
                summary.skipped += 1;
                progress.inc(1);
                continue;
            }

            let Some(content) = read_source(file, &mut summary) else {
                progress.inc(1);
                continue;
            };

            let translated = match self.translate_content(&content, language).await {
                Ok(translated) => translated,
                Err(e) => {
                    error!("Error translating {}: {}", file.display(), e);
                    summary.failed += 1;
                    progress.inc(1);
                    continue;
                }
            };

            if take_action {
                if let Err(e) = FileManager::write_to_file(&destination, &translated) {
                    error!("Error writing {}: {:#}", destination.display(), e);
                    summary.failed += 1;
                    progress.inc(1);
                    continue;
                }
                info!("Saved translated content to {}", destination.display());
                summary.files_written += 1;
            }

            summary.processed += 1;
            progress.inc(1);
        }

        progress.finish_with_message("Folder translated");
        log_summary("Folder translation", &summary);
        Ok(summary)
    }

    /// Translate whole-file content chunk by chunk
    ///
    /// Code blocks and blank chunks are copied verbatim; the whitespace around
    /// each translated chunk is preserved.
    pub async fn translate_content(&self, content: &str, language: &str) -> Result<String, TranslatorError> {
        let chunks = self.shredder.shred(content, self.config.translation.max_chunk_length);
        let language = describe_language(language);
        let language = language.as_str();

        let translated: Vec<String> = stream::iter(chunks)
            .map(|chunk| self.translate_chunk(chunk, language))
            .buffered(self.config.translation.max_concurrent_requests)
            .try_collect()
            .await?;

        Ok(translated.concat())
    }

    async fn translate_chunk(&self, chunk: MarkdownChunk, language: &str) -> Result<String, TranslatorError> {
        if !chunk.is_translatable() {
            return Ok(chunk.content);
        }

        let core = chunk.content.trim();
        if core.is_empty() {
            return Ok(chunk.content);
        }

        let leading = &chunk.content[..chunk.content.len() - chunk.content.trim_start().len()];
        let trailing = &chunk.content[chunk.content.trim_end().len()..];

        let translated = self.translator.translate(core, core, language).await?;
        let translated = translated.trim();
        if translated.is_empty() {
            return Err(TranslatorError::EmptyResult(core.to_string()));
        }

        Ok(format!("{}{}{}", leading, translated, trailing))
    }

    /// Update the stores of one source file for every language
    ///
    /// Returns false when any language failed; stores of the languages that
    /// succeeded are kept.
    #[allow(clippy::too_many_arguments)]
    async fn update_stores(
        &self,
        root: &Path,
        source: &Path,
        content: &str,
        keys: &[String],
        languages: &[String],
        take_action: bool,
        summary: &mut RunSummary,
    ) -> bool {
        let mut all_succeeded = true;

        for language in languages {
            let store_path = match FileManager::resource_path(root, source, language) {
                Ok(path) => path,
                Err(e) => {
                    error!("Error mapping {}: {}", source.display(), e);
                    return false;
                }
            };

            match self
                .generator
                .update_store(source, content, keys, &store_path, language, take_action)
                .await
            {
                Ok(outcome) => {
                    if outcome.written {
                        summary.stores_written += 1;
                    }
                }
                Err(e) => {
                    error!("Error processing {} for {}: {}", source.display(), language, e);
                    all_succeeded = false;
                }
            }
        }

        all_succeeded
    }

    fn discover_views(&self, root: &Path) -> Result<Vec<std::path::PathBuf>> {
        ensure_directory(root)?;
        let skip_files = &self.config.views.skip_files;
        let views: Vec<_> = FileManager::find_views(root)?
            .into_iter()
            .filter(|view| !FileManager::is_skipped_view(view, skip_files))
            .collect();
        info!("Found {} view(s) under {}", views.len(), root.display());
        Ok(views)
    }

    fn progress_bar(&self, len: usize, unit: &str) -> ProgressBar {
        if !self.show_progress {
            return ProgressBar::hidden();
        }

        let progress = ProgressBar::new(len as u64);
        let style = ProgressStyle::default_bar()
            .template(&format!(
                "{{spinner:.green}} [{{elapsed_precise}}] [{{bar:40.cyan/blue}}] {{pos}}/{{len}} {} ({{percent}}%) {{msg}}",
                unit
            ))
            .or_else(|_| ProgressStyle::default_bar().template("{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} ({percent}%) {msg}"))
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        progress.set_style(style.progress_chars("█▓▒░"));
        progress
    }
}

/// Keys a single file would contribute to its stores
///
/// Views yield their existing lookups followed by the text a wrap pass
/// would turn into lookups; other files go through the C# extractors.
pub fn keys_for_file(path: &Path, content: &str) -> Vec<String> {
    let is_view = path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("cshtml"))
        .unwrap_or(false);

    if is_view {
        localize_view(&ViewLocalizer::new(), content).1
    } else {
        extract_csharp_keys(content)
    }
}

/// Rewrite a view and list its keys: existing lookups first, then new ones
fn localize_view(localizer: &ViewLocalizer, original: &str) -> (String, Vec<String>) {
    let (rewritten, wrapped) = localizer.localize_markup(original);
    let mut keys = localizer.extract_keys(original);
    for key in wrapped {
        if !keys.contains(&key) {
            keys.push(key);
        }
    }
    (rewritten, keys)
}

fn ensure_directory(path: &Path) -> Result<()> {
    if !FileManager::dir_exists(path) {
        return Err(anyhow!("Directory does not exist: {:?}", path));
    }
    Ok(())
}

/// Read a source file, logging and counting it as skipped when unusable
fn read_source(path: &Path, summary: &mut RunSummary) -> Option<String> {
    match FileManager::read_to_string(path) {
        Ok(content) if content.trim().is_empty() => {
            warn!("Skipping empty file: {}", path.display());
            summary.skipped += 1;
            None
        }
        Ok(content) => {
            info!("Processing file: {}", path.display());
            Some(content)
        }
        Err(e) => {
            warn!("Skipping {}: {:#}", path.display(), e);
            summary.skipped += 1;
            None
        }
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

fn log_summary(operation: &str, summary: &RunSummary) {
    info!(
        "{} completed: {} processed, {} skipped, {} errors, {} store(s) and {} file(s) written",
        operation,
        summary.processed,
        summary.skipped,
        summary.failed,
        summary.stores_written,
        summary.files_written
    );
}
