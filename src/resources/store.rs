/*!
 * Resource store persistence.
 *
 * A store is the key to translated value mapping for one source file and
 * one culture, persisted as a `.resx` document. Entries are emitted sorted
 * by key inside a fixed template, so the same store always serializes to
 * the same bytes.
 */

use log::{debug, warn};
use quick_xml::events::{BytesStart, Event};
use quick_xml::escape::escape;
use quick_xml::Reader;
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

use crate::errors::ResourceError;

/// Document scaffold surrounding the entries
const RESX_TEMPLATE: &str = include_str!("../../assets/resx_template.xml");

/// Marker in the template replaced by the entries
const CONTENT_PLACEHOLDER: &str = "{{CONTENT}}";

/// Key to value mapping persisted for one (source file, culture) pair
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResourceStore {
    entries: BTreeMap<String, String>,
}

impl ResourceStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entries(entries: BTreeMap<String, String>) -> Self {
        Self { entries }
    }

    /// Load a store from disk
    ///
    /// A missing file yields an empty store. An unreadable or malformed file
    /// is logged and also yields an empty store.
    pub fn load(path: &Path) -> Self {
        if !path.exists() {
            return Self::new();
        }

        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                warn!("Could not read resource store {}: {}; treating it as empty", path.display(), e);
                return Self::new();
            }
        };

        match Self::parse(&content) {
            Ok(store) => {
                debug!("Loaded {} entries from {}", store.len(), path.display());
                store
            }
            Err(e) => {
                warn!("Malformed resource store {}: {}; treating it as empty", path.display(), e);
                Self::new()
            }
        }
    }

    /// Parse a resx document
    ///
    /// Keys that differ only by case keep the first occurrence.
    pub fn parse(xml: &str) -> Result<Self, ResourceError> {
        let mut reader = Reader::from_str(xml);
        reader.trim_text(false);

        let mut parsed: Vec<(String, String)> = Vec::new();
        let mut current: Option<(String, String)> = None;
        let mut in_value = false;

        loop {
            match reader.read_event()? {
                Event::Start(element) => match element.name().as_ref() {
                    b"data" => current = Some((data_name(&element)?, String::new())),
                    b"value" if current.is_some() => in_value = true,
                    _ => {}
                },
                Event::Empty(element) if element.name().as_ref() == b"data" => {
                    parsed.push((data_name(&element)?, String::new()));
                }
                Event::Text(text) if in_value => {
                    if let Some((_, value)) = current.as_mut() {
                        value.push_str(&text.unescape()?);
                    }
                }
                Event::CData(data) if in_value => {
                    if let Some((_, value)) = current.as_mut() {
                        value.push_str(&String::from_utf8_lossy(&data.into_inner()));
                    }
                }
                Event::End(element) => match element.name().as_ref() {
                    b"value" => in_value = false,
                    b"data" => {
                        if let Some(entry) = current.take() {
                            parsed.push(entry);
                        }
                        in_value = false;
                    }
                    _ => {}
                },
                Event::Eof => break,
                _ => {}
            }
        }

        let mut entries = BTreeMap::new();
        let mut seen: HashMap<String, String> = HashMap::new();
        for (key, value) in parsed {
            if let Some(first) = seen.get(&key.to_lowercase()) {
                if *first != key {
                    warn!("Resource key '{}' conflicts with '{}' by case; keeping '{}'", key, first, first);
                }
                continue;
            }
            seen.insert(key.to_lowercase(), key.clone());
            entries.insert(key, value);
        }

        Ok(Self { entries })
    }

    /// Serialize to a resx document with entries sorted by key
    pub fn to_resx(&self) -> String {
        let mut content = String::new();
        for (key, value) in &self.entries {
            content.push_str(&format!(
                "  <data name=\"{}\" xml:space=\"preserve\">\n    <value>{}</value>\n  </data>\n",
                escape(key.as_str()),
                escape(value.as_str())
            ));
        }
        RESX_TEMPLATE.replace(CONTENT_PLACEHOLDER, &content)
    }

    /// Write the store atomically, creating parent directories
    ///
    /// The document is written to a temporary file next to `path` and then
    /// renamed over it, so readers see either the old or the new store.
    pub fn save(&self, path: &Path) -> Result<(), ResourceError> {
        let parent = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(parent)?;

        let mut temp = NamedTempFile::new_in(parent)?;
        temp.write_all(self.to_resx().as_bytes())?;
        temp.flush()?;
        temp.persist(path).map_err(|e| ResourceError::Io(e.error))?;

        debug!("Wrote {} entries to {}", self.len(), path.display());
        Ok(())
    }

    /// Save only when the serialized store differs from the file on disk
    ///
    /// Returns whether the file was written.
    pub fn save_if_changed(&self, path: &Path) -> Result<bool, ResourceError> {
        let rendered = self.to_resx();
        if let Ok(existing) = fs::read_to_string(path) {
            if existing == rendered {
                return Ok(false);
            }
        }
        self.save(path)?;
        Ok(true)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(|value| value.as_str())
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.entries.keys()
    }

    pub fn entries(&self) -> &BTreeMap<String, String> {
        &self.entries
    }

    pub fn into_entries(self) -> BTreeMap<String, String> {
        self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn data_name(element: &BytesStart<'_>) -> Result<String, ResourceError> {
    for attribute in element.attributes() {
        let attribute = attribute.map_err(|e| ResourceError::Malformed(e.to_string()))?;
        if attribute.key.as_ref() == b"name" {
            return Ok(attribute.unescape_value()?.into_owned());
        }
    }
    Err(ResourceError::Malformed("<data> element without a name".to_string()))
}
