//! Internationalization (i18n) module for the bilingual site.
//!
//! All language-related logic lives here: the closed set of supported
//! languages, dictionary loading, key resolution and the visitor's stored
//! language preference.
//!
//! # Architecture
//!
//! - `registry`: Supported-language table
//! - `language`: Validated `Language` type
//! - `dictionary`: Nested string tree and dotted-key resolution
//! - `loader`: Reads dictionary resources with the missing/malformed fallback chain
//! - `translator`: Per-request `TranslationContext` (`t`, `get_all_translations`)
//! - `preferences`: Session-backed language preference store
//! - `validator`: Cross-language dictionary parity checks
//! - `metrics`: Lookup and load counters
//!
//! # Example
//!
//! ```rust,ignore
//! use crate::i18n::{DictionaryLoader, Language, TranslationContext};
//!
//! let loader = Arc::new(DictionaryLoader::new("lang"));
//! let ctx = TranslationContext::new(Language::from_code("en")?, loader);
//! assert_eq!(ctx.text("nav.home"), "Home");
//! ```

mod dictionary;
mod language;
mod loader;
mod metrics;
mod preferences;
mod registry;
mod translator;
mod validator;

pub use dictionary::{Dictionary, Value, KEY_DELIMITER};
pub use language::{InvalidCodeError, Language};
pub use loader::{DictionaryLoader, LoadError};
pub use metrics::{MetricsReport, TranslationMetrics};
pub use preferences::{LanguagePreferences, PreferenceError, LANGUAGE_SESSION_KEY};
pub use registry::{LanguageConfig, LanguageRegistry};
pub use translator::TranslationContext;
pub use validator::{DictionaryValidator, ValidationReport};
