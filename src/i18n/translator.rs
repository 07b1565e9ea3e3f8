//! Per-request translation context.
//!
//! A `TranslationContext` is built once at the request boundary with the
//! visitor's language and threaded through rendering. The dictionary is
//! loaded on the first lookup and kept for the rest of the request; it is
//! bound to the language given at construction, so a language change needs
//! a new context.

use crate::i18n::{Dictionary, DictionaryLoader, Language, TranslationMetrics, Value};
use std::cell::OnceCell;
use std::sync::Arc;
use tracing::warn;

#[derive(Debug)]
pub struct TranslationContext {
    language: Language,
    loader: Arc<DictionaryLoader>,
    dictionary: OnceCell<Dictionary>,
}

impl TranslationContext {
    pub fn new(language: Language, loader: Arc<DictionaryLoader>) -> Self {
        Self {
            language,
            loader,
            dictionary: OnceCell::new(),
        }
    }

    /// Context over an already loaded dictionary.
    pub fn with_dictionary(
        language: Language,
        loader: Arc<DictionaryLoader>,
        dictionary: Dictionary,
    ) -> Self {
        Self {
            language,
            loader,
            dictionary: OnceCell::from(dictionary),
        }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    /// The whole dictionary for the bound language, loading it if needed.
    pub fn get_all_translations(&self) -> &Dictionary {
        self.dictionary
            .get_or_init(|| self.loader.load(self.language))
    }

    /// Resolve a dotted key.
    ///
    /// A resolved leaf is returned as found: strings stay strings, lists keep
    /// their entries and order. A miss logs a warning and returns the key
    /// itself as a string.
    pub fn t(&self, key: &str) -> Value {
        match self.lookup(key) {
            Some(value) => value.clone(),
            None => Value::Str(key.to_string()),
        }
    }

    /// Resolve a key that a template prints as text.
    ///
    /// Returns the key when the lookup misses or the leaf is not a string.
    pub fn text(&self, key: &str) -> String {
        match self.lookup(key) {
            Some(Value::Str(s)) => s.clone(),
            Some(_) => {
                warn!(
                    "Translation key is not a string: {} for language: {}",
                    key, self.language
                );
                key.to_string()
            }
            None => key.to_string(),
        }
    }

    /// String entries of a list leaf. A miss or a non-list leaf yields an
    /// empty list; record entries are skipped.
    pub fn list(&self, key: &str) -> Vec<String> {
        self.lookup(key)
            .and_then(Value::as_list)
            .map(|items| {
                items
                    .iter()
                    .filter_map(|item| item.as_str().map(str::to_string))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Borrowing lookup with hit/miss accounting. Used by templates that
    /// iterate structured leaves such as lists of records.
    pub fn lookup(&self, key: &str) -> Option<&Value> {
        let metrics = TranslationMetrics::global();

        match self.get_all_translations().resolve(key) {
            Some(value) => {
                metrics.record_key_hit();
                Some(value)
            }
            None => {
                metrics.record_key_miss();
                warn!(
                    "Translation key not found: {} for language: {}",
                    key, self.language
                );
                None
            }
        }
    }
}
