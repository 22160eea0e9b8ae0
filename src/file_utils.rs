use anyhow::{Context, Result, anyhow};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use walkdir::{DirEntry, WalkDir};

// @module: File discovery, atomic writes and resource path mapping

/// Build output directories never scanned for sources
pub const BUILD_OUTPUT_DIRS: &[&str] = &["bin", "obj"];

/// Directory holding generated resource stores, relative to the project root
pub const RESOURCES_DIR: &str = "Resources";

/// Suffix of folders excluded from folder translation
pub const TRASH_DIR_SUFFIX: &str = ".trash";

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @checks: File existence
    pub fn file_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().is_file()
    }

    // @checks: Directory existence
    pub fn dir_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().is_dir()
    }

    // @creates: Directory and parents if needed
    pub fn ensure_dir<P: AsRef<Path>>(path: P) -> Result<()> {
        let path = path.as_ref();
        if !path.exists() {
            fs::create_dir_all(path)
                .with_context(|| format!("Failed to create directory: {:?}", path))?;
        }
        Ok(())
    }

    /// Find files with an extension, pruning directories rejected by `skip_dir`
    ///
    /// Results are sorted so runs visit files in a stable order.
    pub fn find_files_where<P, F>(dir: P, extension: &str, recursive: bool, skip_dir: F) -> Result<Vec<PathBuf>>
    where
        P: AsRef<Path>,
        F: Fn(&DirEntry) -> bool,
    {
        let wanted = extension.trim_start_matches('.');
        let mut walker = WalkDir::new(dir.as_ref()).follow_links(true);
        if !recursive {
            walker = walker.max_depth(1);
        }

        let mut result = Vec::new();
        let entries = walker
            .into_iter()
            .filter_entry(|entry| entry.depth() == 0 || !entry.file_type().is_dir() || !skip_dir(entry));

        for entry in entries {
            let entry = entry.context("Failed to read directory entry")?;
            let path = entry.path();

            if entry.file_type().is_file() && has_extension(path, wanted) {
                result.push(path.to_path_buf());
            }
        }

        result.sort();
        Ok(result)
    }

    /// Find files with a specific extension in a directory tree
    pub fn find_files<P: AsRef<Path>>(dir: P, extension: &str) -> Result<Vec<PathBuf>> {
        Self::find_files_where(dir, extension, true, |_| false)
    }

    /// Find Razor views, skipping build output
    pub fn find_views<P: AsRef<Path>>(root: P) -> Result<Vec<PathBuf>> {
        Self::find_files_where(root, "cshtml", true, |entry| {
            BUILD_OUTPUT_DIRS.contains(&dir_name(entry).as_str())
        })
    }

    /// Find C# sources, skipping build output and generated resources
    pub fn find_csharp_sources<P: AsRef<Path>>(root: P) -> Result<Vec<PathBuf>> {
        Self::find_files_where(root, "cs", true, |entry| {
            let name = dir_name(entry);
            BUILD_OUTPUT_DIRS.contains(&name.as_str()) || name == RESOURCES_DIR
        })
    }

    /// Find files to translate in a content folder
    ///
    /// Extensions are compared case-insensitively, with or without a leading
    /// dot. Folders whose name ends in `.trash` are skipped.
    pub fn find_folder_files<P: AsRef<Path>>(
        dir: P,
        extensions: &[String],
        recursive: bool,
    ) -> Result<Vec<PathBuf>> {
        let mut result = Vec::new();
        for extension in extensions {
            result.extend(Self::find_files_where(dir.as_ref(), extension, recursive, |entry| {
                dir_name(entry).ends_with(TRASH_DIR_SUFFIX)
            })?);
        }
        result.sort();
        result.dedup();
        Ok(result)
    }

    /// True when a view's file name contains one of the skip patterns
    pub fn is_skipped_view<P: AsRef<Path>>(path: P, skip_files: &[String]) -> bool {
        let name = path
            .as_ref()
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_default();
        skip_files.iter().any(|pattern| name.contains(pattern.as_str()))
    }

    // @generates: Resource store path for a source file and culture
    // @maps: <root>/<rel>/<Name>.<ext> -> <root>/Resources/<rel>/<Name>.<culture>.resx
    pub fn resource_path<P1: AsRef<Path>, P2: AsRef<Path>>(
        root: P1,
        source: P2,
        culture: &str,
    ) -> Result<PathBuf> {
        let root = root.as_ref();
        let source = source.as_ref();
        let relative = source
            .strip_prefix(root)
            .map_err(|_| anyhow!("{:?} is not inside {:?}", source, root))?;

        let stem = source
            .file_stem()
            .ok_or_else(|| anyhow!("Source path has no file name: {:?}", source))?
            .to_string_lossy();

        let mut path = root.join(RESOURCES_DIR);
        if let Some(parent) = relative.parent() {
            path.push(parent);
        }
        path.push(format!("{}.{}.resx", stem, culture));
        Ok(path)
    }

    // @generates: Destination of a translated file, same relative path
    pub fn folder_destination_path<P1, P2, P3>(source_root: P1, destination_root: P2, file: P3) -> Result<PathBuf>
    where
        P1: AsRef<Path>,
        P2: AsRef<Path>,
        P3: AsRef<Path>,
    {
        let relative = file
            .as_ref()
            .strip_prefix(source_root.as_ref())
            .map_err(|_| anyhow!("{:?} is not inside {:?}", file.as_ref(), source_root.as_ref()))?;
        Ok(destination_root.as_ref().join(relative))
    }

    /// Read a file to a string
    pub fn read_to_string<P: AsRef<Path>>(path: P) -> Result<String> {
        fs::read_to_string(&path)
            .with_context(|| format!("Failed to read file: {:?}", path.as_ref()))
    }

    /// Write a string to a file through a temporary file and a rename
    pub fn write_to_file<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
        let path = path.as_ref();
        let parent = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        Self::ensure_dir(parent)?;

        let mut temp = NamedTempFile::new_in(parent)
            .with_context(|| format!("Failed to create temporary file in {:?}", parent))?;
        temp.write_all(content.as_bytes())
            .with_context(|| format!("Failed to write to file: {:?}", path))?;
        temp.persist(path)
            .map_err(|e| e.error)
            .with_context(|| format!("Failed to replace file: {:?}", path))?;

        Ok(())
    }
}

fn has_extension(path: &Path, wanted: &str) -> bool {
    path.extension()
        .map(|ext| ext.to_string_lossy().eq_ignore_ascii_case(wanted))
        .unwrap_or(false)
}

fn dir_name(entry: &DirEntry) -> String {
    entry.file_name().to_string_lossy().to_string()
}
