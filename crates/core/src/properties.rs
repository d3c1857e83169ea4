//! Flat `key=value` properties file parsing
//!
//! The signing credentials for release builds live in a `key.properties`
//! file that is excluded from version control. The format is the flat
//! subset of Java properties the Android descriptor consumes: one pair per
//! line, `#`/`!` comments, `=` or `:` as separator. Escape sequences and
//! line continuations are not supported.

use crate::error::{Error, Result};
use std::collections::HashMap;
use std::path::Path;

/// Parsed properties file contents
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Properties {
    entries: HashMap<String, String>,
}

impl Properties {
    /// Load and parse a properties file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::io(format!("Failed to read {}: {}", path.display(), e)).with_source(e)
        })?;
        Self::parse(&content, path)
    }

    /// Parse properties text
    ///
    /// `path` is only used for error messages. Later duplicates overwrite
    /// earlier ones, matching `java.util.Properties` load order.
    pub fn parse(content: &str, path: &Path) -> Result<Self> {
        let mut entries = HashMap::new();

        for (idx, line) in content.lines().enumerate() {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with('!') {
                continue;
            }

            let separator = trimmed.find(['=', ':']);
            let Some(pos) = separator else {
                return Err(Error::properties_parse(path, idx + 1, trimmed));
            };

            let key = trimmed[..pos].trim();
            let value = trimmed[pos + 1..].trim();
            if key.is_empty() {
                return Err(Error::properties_parse(path, idx + 1, trimmed));
            }

            entries.insert(key.to_string(), value.to_string());
        }

        Ok(Self { entries })
    }

    /// Look up a value by key
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the file contained no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Keys not in the given recognized set, sorted for stable output
    pub fn unrecognized_keys(&self, recognized: &[&str]) -> Vec<String> {
        let mut extra: Vec<String> = self
            .entries
            .keys()
            .filter(|k| !recognized.contains(&k.as_str()))
            .cloned()
            .collect();
        extra.sort();
        extra
    }
}
