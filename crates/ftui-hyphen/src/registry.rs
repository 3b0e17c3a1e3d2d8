//! Language tag → dictionary file lookup.
//!
//! Dictionaries follow the hunspell naming scheme `hyph_<lang>.dic`, e.g.
//! `hyph_de_DE.dic`. Each file registers `<lang>`, and the bare language
//! (`de`) when no earlier file claimed it. Lookups use locale truncation:
//! `de-AT-1901` tries `de_AT_1901`, then `de_AT`, then `de`.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::{DICTIONARIES_ENV, dictionaries_dir_from_env};
use crate::error::{HyphenError, Result};

const PREFIX: &str = "hyph_";
const SUFFIX: &str = ".dic";

/// Known dictionaries keyed by language name.
#[derive(Debug, Clone, Default)]
pub struct DictionaryRegistry {
    languages: BTreeMap<String, PathBuf>,
}

impl DictionaryRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register every `hyph_*.dic` file in `dir`, in file-name order.
    ///
    /// # Errors
    ///
    /// [`HyphenError::Io`] when `dir` cannot be listed.
    pub fn scan(dir: &Path) -> Result<Self> {
        let entries = fs::read_dir(dir).map_err(|e| HyphenError::io_at(dir, e))?;
        let mut files: Vec<(String, PathBuf)> = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| HyphenError::io_at(dir, e))?;
            let file_name = entry.file_name();
            let Some(file_name) = file_name.to_str() else {
                continue;
            };
            if file_name.starts_with(PREFIX) && file_name.ends_with(SUFFIX) {
                files.push((file_name.to_string(), entry.path()));
            }
        }
        files.sort();

        let mut registry = Self::new();
        for (file_name, path) in files {
            let name = &file_name[PREFIX.len()..file_name.len() - SUFFIX.len()];
            registry.register(name, path);
        }
        tracing::debug!(
            message = "hyphen.registry.scanned",
            dir = %dir.display(),
            languages = registry.languages.len(),
        );
        Ok(registry)
    }

    /// Scan the directory named by [`crate::config::DICTIONARIES_ENV`].
    ///
    /// # Errors
    ///
    /// [`HyphenError::MissingDirectory`] when the variable is unset or empty,
    /// otherwise as [`Self::scan`].
    pub fn from_env() -> Result<Self> {
        Self::scan_configured(dictionaries_dir_from_env().as_deref())
    }

    /// Scan `dir` if one is configured.
    ///
    /// # Errors
    ///
    /// [`HyphenError::MissingDirectory`] for `None`, otherwise as [`Self::scan`].
    pub fn scan_configured(dir: Option<&Path>) -> Result<Self> {
        let dir = dir.ok_or(HyphenError::MissingDirectory {
            variable: DICTIONARIES_ENV,
        })?;
        Self::scan(dir)
    }

    /// Register `name` and, if unclaimed, its bare language before the first `_`.
    pub fn register(&mut self, name: &str, path: impl Into<PathBuf>) {
        let path = path.into();
        let short = name.split('_').next().unwrap_or(name);
        if short != name && !self.languages.contains_key(short) {
            self.languages.insert(short.to_string(), path.clone());
        }
        self.languages.insert(name.to_string(), path);
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.languages.contains_key(name)
    }

    /// Registered names, sorted.
    pub fn languages(&self) -> impl Iterator<Item = &str> {
        self.languages.keys().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.languages.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.languages.is_empty()
    }

    /// Longest registered truncation of `language`.
    ///
    /// # Errors
    ///
    /// [`HyphenError::NotFound`] when no truncation is registered.
    pub fn language_fallback(&self, language: &str) -> Result<String> {
        let normalized = language.replace('-', "_");
        let mut parts: Vec<&str> = normalized.split('_').collect();
        while !parts.is_empty() {
            let candidate = parts.join("_");
            if self.contains(&candidate) {
                return Ok(candidate);
            }
            parts.pop();
        }
        Err(HyphenError::not_found(language))
    }

    /// Dictionary path for `language`, after fallback.
    ///
    /// # Errors
    ///
    /// [`HyphenError::NotFound`] when no truncation is registered.
    pub fn resolve_dictionary_path(&self, language: &str) -> Result<PathBuf> {
        let name = self.language_fallback(language)?;
        self.languages
            .get(&name)
            .cloned()
            .ok_or_else(|| HyphenError::not_found(language))
    }
}
