//! Dictionary loader: reads `<dir>/<code>.json` for a language.
//!
//! Loading never fails from the caller's point of view. A missing resource
//! falls back to the default language's resource, then to an empty
//! dictionary; a malformed resource becomes an empty dictionary.

use crate::i18n::{Dictionary, Language, TranslationMetrics};
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Language file not found: {path}")]
    Missing { path: PathBuf },

    #[error("Failed to read language file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Language file is not a valid dictionary {path}: {source}")]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Locates and parses dictionary resources. Each call re-reads the file;
/// per-request memoisation belongs to `TranslationContext`.
#[derive(Debug, Clone)]
pub struct DictionaryLoader {
    dir: PathBuf,
}

impl DictionaryLoader {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Resource path for a language (`<dir>/<code>.json`).
    pub fn path_for(&self, language: Language) -> PathBuf {
        self.dir.join(format!("{}.json", language.code()))
    }

    /// Load the dictionary for `language`, applying the fallback policy.
    pub fn load(&self, language: Language) -> Dictionary {
        let metrics = TranslationMetrics::global();
        metrics.record_dictionary_load();

        match self.try_load(language) {
            Ok(dictionary) => {
                debug!("Loaded dictionary for {}", language);
                dictionary
            }
            Err(LoadError::Missing { path }) => {
                warn!("Language file not found: {}", path.display());
                metrics.record_dictionary_fallback();

                let default = Language::default_language();
                if language == default {
                    return Dictionary::empty();
                }

                warn!("Falling back to default language '{}'", default);
                match self.try_load(default) {
                    Ok(dictionary) => dictionary,
                    Err(e) => {
                        warn!("Default language file unusable: {}", e);
                        Dictionary::empty()
                    }
                }
            }
            Err(e) => {
                warn!("{}", e);
                metrics.record_dictionary_fallback();
                Dictionary::empty()
            }
        }
    }

    /// Load without any fallback.
    pub fn try_load(&self, language: Language) -> Result<Dictionary, LoadError> {
        let path = self.path_for(language);

        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(LoadError::Missing { path });
            }
            Err(source) => return Err(LoadError::Io { path, source }),
        };

        Dictionary::from_json(&content).map_err(|source| LoadError::Malformed { path, source })
    }
}
