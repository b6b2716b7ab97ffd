use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;

/// Shared shape of every reference-table record.
pub trait CatalogEntry {
    fn id(&self) -> &str;
    fn name(&self) -> &str;
    fn tags(&self) -> &[String];
}

#[derive(Debug)]
pub enum CatalogError {
    Io { path: String, source: std::io::Error },
    Json { path: String, source: serde_json::Error },
    Validation(String),
}

impl std::fmt::Display for CatalogError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogError::Io { path, source } => {
                write!(f, "failed to read {}: {}", path, source)
            }
            CatalogError::Json { path, source } => {
                write!(f, "failed to parse {}: {}", path, source)
            }
            CatalogError::Validation(message) => write!(f, "{}", message),
        }
    }
}

impl std::error::Error for CatalogError {}

/// Read-only lookup table keyed by record id, preserving file order.
#[derive(Debug, Clone)]
pub struct Catalog<T> {
    entries: Vec<T>,
    index: HashMap<String, usize>,
}

impl<T> Default for Catalog<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }
}

impl<T: CatalogEntry> Catalog<T> {
    pub fn new(label: &str, entries: Vec<T>) -> Result<Self, CatalogError> {
        ensure_unique_ids(label, entries.iter().map(|entry| entry.id()))?;
        for entry in &entries {
            if entry.id().trim().is_empty() {
                return Err(CatalogError::Validation(format!(
                    "{} id cannot be empty",
                    label
                )));
            }
            if entry.name().trim().is_empty() {
                return Err(CatalogError::Validation(format!(
                    "{} {} has empty name",
                    label,
                    entry.id()
                )));
            }
        }

        let index = entries
            .iter()
            .enumerate()
            .map(|(idx, entry)| (entry.id().to_string(), idx))
            .collect();
        Ok(Self { entries, index })
    }

    pub fn get(&self, id: &str) -> Option<&T> {
        self.index.get(id).and_then(|idx| self.entries.get(*idx))
    }

    pub fn all(&self) -> &[T] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// False for ids absent from the table.
    pub fn has_tag(&self, id: &str, tag: &str) -> bool {
        self.get(id)
            .map(|entry| entry.tags().iter().any(|t| t == tag))
            .unwrap_or(false)
    }
}

pub(crate) fn parse_document<D: DeserializeOwned>(
    raw: &str,
    origin: &str,
) -> Result<D, CatalogError> {
    serde_json::from_str(raw).map_err(|source| CatalogError::Json {
        path: origin.to_string(),
        source,
    })
}

pub(crate) fn read_document<D: DeserializeOwned>(path: &Path) -> Result<D, CatalogError> {
    let raw = fs::read_to_string(path).map_err(|source| CatalogError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse_document(&raw, &path.display().to_string())
}

fn ensure_unique_ids<'a>(
    label: &str,
    ids: impl Iterator<Item = &'a str>,
) -> Result<(), CatalogError> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(CatalogError::Validation(format!(
                "duplicate {} id {}",
                label, id
            )));
        }
    }
    Ok(())
}
