//! Language type: the closed set of language codes a visitor can select.
//!
//! A `Language` can only be built from an enabled registry entry, so holding
//! one is proof that the code was validated.

use crate::i18n::{LanguageConfig, LanguageRegistry};
use serde::{Serialize, Serializer};
use std::fmt;
use thiserror::Error;

/// Rejected language code.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid language code: '{code}'")]
pub struct InvalidCodeError {
    /// The raw input that was rejected
    pub code: String,
}

/// A validated language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Language {
    /// ISO 639-1 language code (e.g., "es", "en")
    code: &'static str,
}

impl Language {
    /// Spanish, the default language.
    pub const SPANISH: Language = Language { code: "es" };

    /// English, the secondary language.
    pub const ENGLISH: Language = Language { code: "en" };

    /// Create a Language from a language code string.
    ///
    /// No coercion is applied: `"ES"`, `" es"` and `""` are all rejected.
    ///
    /// # Example
    /// ```ignore
    /// let english = Language::from_code("en")?;
    /// ```
    pub fn from_code(code: &str) -> Result<Language, InvalidCodeError> {
        match LanguageRegistry::get().get_by_code(code) {
            Some(config) if config.enabled => Ok(Language { code: config.code }),
            _ => Err(InvalidCodeError {
                code: code.to_string(),
            }),
        }
    }

    /// The language new visitors get.
    pub fn default_language() -> Language {
        Language {
            code: LanguageRegistry::get().default_language().code,
        }
    }

    /// All enabled languages, in registry order.
    pub fn all() -> Vec<Language> {
        LanguageRegistry::get()
            .list_enabled()
            .into_iter()
            .map(|config| Language { code: config.code })
            .collect()
    }

    /// Get the ISO 639-1 language code.
    pub fn code(&self) -> &'static str {
        self.code
    }

    /// Get the full language configuration from the registry.
    ///
    /// # Panics
    /// Panics if the code is not registered, which cannot happen for values
    /// built through `from_code` or the constants.
    pub fn config(&self) -> &'static LanguageConfig {
        LanguageRegistry::get()
            .get_by_code(self.code)
            .expect("Language code should always be valid")
    }

    /// English name of the language (e.g., "Spanish").
    pub fn name(&self) -> &'static str {
        self.config().name
    }

    /// Native name of the language (e.g., "Español").
    pub fn native_name(&self) -> &'static str {
        self.config().native_name
    }

    pub fn is_default(&self) -> bool {
        self.config().is_default
    }
}

impl Default for Language {
    fn default() -> Self {
        Language::default_language()
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code)
    }
}

impl Serialize for Language {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    // ==================== Constant Tests ====================

    #[test]
    fn test_spanish_constant() {
        let spanish = Language::SPANISH;
        assert_eq!(spanish.code(), "es");
        assert_eq!(spanish.name(), "Spanish");
        assert!(spanish.is_default());
    }

    #[test]
    fn test_english_constant() {
        let english = Language::ENGLISH;
        assert_eq!(english.code(), "en");
        assert_eq!(english.name(), "English");
        assert!(!english.is_default());
    }

    // ==================== from_code Tests ====================

    #[test]
    fn test_from_code_valid() {
        assert_eq!(Language::from_code("es"), Ok(Language::SPANISH));
        assert_eq!(Language::from_code("en"), Ok(Language::ENGLISH));
    }

    #[test]
    fn test_from_code_invalid() {
        let err = Language::from_code("fr").unwrap_err();
        assert_eq!(err.code, "fr");
        assert!(err.to_string().contains("Invalid language code"));
    }

    #[test]
    fn test_from_code_is_not_coerced() {
        assert!(Language::from_code("ES").is_err());
        assert!(Language::from_code("En").is_err());
        assert!(Language::from_code(" es").is_err());
        assert!(Language::from_code("es ").is_err());
        assert!(Language::from_code("").is_err());
    }

    proptest! {
        #[test]
        fn test_from_code_rejects_non_members(code in "\\PC*") {
            prop_assume!(code != "es" && code != "en");
            prop_assert!(Language::from_code(&code).is_err());
        }
    }

    // ==================== Default Tests ====================

    #[test]
    fn test_default_is_spanish() {
        assert_eq!(Language::default_language(), Language::SPANISH);
        assert_eq!(Language::default(), Language::SPANISH);
    }

    #[test]
    fn test_all_lists_enabled_languages() {
        assert_eq!(Language::all(), vec![Language::SPANISH, Language::ENGLISH]);
    }

    // ==================== Trait Tests ====================

    #[test]
    fn test_display_is_code() {
        assert_eq!(Language::ENGLISH.to_string(), "en");
    }

    #[test]
    fn test_serializes_as_code() {
        let json = serde_json::to_string(&Language::SPANISH).expect("Should serialize");
        assert_eq!(json, "\"es\"");
    }

    #[test]
    fn test_native_name() {
        assert_eq!(Language::SPANISH.native_name(), "Español");
        assert_eq!(Language::ENGLISH.native_name(), "English");
    }
}
