//! Language preference store over a visitor session.
//!
//! The preference is a single `language` field holding a language code. It
//! is absent until the first visit initialises it to the default language,
//! and only `set_language` changes it afterwards.

use crate::i18n::{InvalidCodeError, Language};
use crate::session::{SessionError, SessionState};
use thiserror::Error;
use tracing::{info, warn};

/// Session field holding the language code.
pub const LANGUAGE_SESSION_KEY: &str = "language";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PreferenceError {
    #[error(transparent)]
    InvalidCode(#[from] InvalidCodeError),

    #[error("Failed to store language preference: {0}")]
    Storage(#[from] SessionError),
}

#[derive(Debug)]
pub struct LanguagePreferences<S> {
    session: S,
}

impl<S: SessionState> LanguagePreferences<S> {
    pub fn new(session: S) -> Self {
        Self { session }
    }

    pub fn session(&self) -> &S {
        &self.session
    }

    pub fn into_session(self) -> S {
        self.session
    }

    /// Store the default language unless a valid preference already exists.
    /// Calling it again never overwrites a stored preference.
    pub fn init_language(&mut self) -> Result<Language, PreferenceError> {
        if let Some(language) = self.stored()? {
            return Ok(language);
        }

        let default = Language::default_language();
        self.session.set(LANGUAGE_SESSION_KEY, default.code())?;
        Ok(default)
    }

    /// The visitor's language, initialising the preference on first use.
    ///
    /// Never fails: if the session cannot be read or written the default
    /// language is returned.
    pub fn get_current_language(&mut self) -> Language {
        match self.init_language() {
            Ok(language) => language,
            Err(e) => {
                warn!("Using default language: {}", e);
                Language::default_language()
            }
        }
    }

    /// Validate and store a new preference. Rejected codes leave the stored
    /// preference untouched.
    pub fn set_language(&mut self, code: &str) -> Result<Language, PreferenceError> {
        let language = Language::from_code(code).map_err(|e| {
            warn!("Invalid language code attempted: {:?}", code);
            e
        })?;

        self.session.set(LANGUAGE_SESSION_KEY, language.code())?;
        info!("Language preference set to {}", language);
        Ok(language)
    }

    /// The stored preference. A value outside the supported set is treated
    /// as absent.
    fn stored(&self) -> Result<Option<Language>, PreferenceError> {
        let Some(code) = self.session.get(LANGUAGE_SESSION_KEY)? else {
            return Ok(None);
        };

        match Language::from_code(&code) {
            Ok(language) => Ok(Some(language)),
            Err(_) => {
                warn!("Ignoring unsupported stored language code: {:?}", code);
                Ok(None)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::HashMap;

    type MapPreferences = LanguagePreferences<HashMap<String, String>>;

    fn fresh() -> MapPreferences {
        LanguagePreferences::new(HashMap::new())
    }

    fn stored_code(prefs: &MapPreferences) -> Option<String> {
        prefs.session().get(LANGUAGE_SESSION_KEY).cloned()
    }

    /// Session that accepts reads but fails every write.
    #[derive(Debug, Default)]
    struct ReadOnlySession {
        values: HashMap<String, String>,
    }

    impl SessionState for ReadOnlySession {
        fn get(&self, key: &str) -> Result<Option<String>, SessionError> {
            Ok(self.values.get(key).cloned())
        }

        fn set(&mut self, _key: &str, _value: &str) -> Result<(), SessionError> {
            Err(SessionError::Unavailable)
        }
    }

    // ==================== get_current_language Tests ====================

    #[test]
    fn test_fresh_visitor_gets_spanish() {
        let mut prefs = fresh();
        assert_eq!(stored_code(&prefs), None);

        assert_eq!(prefs.get_current_language(), Language::SPANISH);
        assert_eq!(stored_code(&prefs), Some("es".to_string()));
    }

    #[test]
    fn test_current_language_reflects_set_language() {
        let mut prefs = fresh();
        prefs.set_language("en").unwrap();
        assert_eq!(prefs.get_current_language(), Language::ENGLISH);
    }

    #[test]
    fn test_unwritable_session_still_answers_default() {
        let mut prefs = LanguagePreferences::new(ReadOnlySession::default());
        assert_eq!(prefs.get_current_language(), Language::SPANISH);
    }

    #[test]
    fn test_corrupt_stored_value_is_replaced_by_default() {
        let mut session = HashMap::new();
        session.insert(LANGUAGE_SESSION_KEY.to_string(), "klingon".to_string());
        let mut prefs = LanguagePreferences::new(session);

        assert_eq!(prefs.get_current_language(), Language::SPANISH);
        assert_eq!(stored_code(&prefs), Some("es".to_string()));
    }

    // ==================== init_language Tests ====================

    #[test]
    fn test_init_preserves_existing_preference() {
        let mut session = HashMap::new();
        session.insert(LANGUAGE_SESSION_KEY.to_string(), "en".to_string());
        let mut prefs = LanguagePreferences::new(session);

        assert_eq!(prefs.init_language(), Ok(Language::ENGLISH));
        assert_eq!(stored_code(&prefs), Some("en".to_string()));
    }

    #[test]
    fn test_init_is_idempotent() {
        let mut prefs = fresh();
        prefs.init_language().unwrap();
        let after_first = stored_code(&prefs);
        prefs.init_language().unwrap();

        assert_eq!(stored_code(&prefs), after_first);
    }

    #[test]
    fn test_init_reports_storage_failure() {
        let mut prefs = LanguagePreferences::new(ReadOnlySession::default());
        assert_eq!(
            prefs.init_language(),
            Err(PreferenceError::Storage(SessionError::Unavailable))
        );
    }

    // ==================== set_language Tests ====================

    #[test]
    fn test_set_language_accepts_every_supported_code() {
        for language in Language::all() {
            let mut prefs = fresh();
            assert_eq!(prefs.set_language(language.code()), Ok(language));
            assert_eq!(prefs.get_current_language(), language);
        }
    }

    #[test]
    fn test_set_language_rejects_and_preserves() {
        let mut prefs = fresh();
        prefs.set_language("en").unwrap();

        for code in ["fr", "ES", "EN", "invalid", ""] {
            let err = prefs.set_language(code).unwrap_err();
            assert!(matches!(err, PreferenceError::InvalidCode(_)));
            assert_eq!(stored_code(&prefs), Some("en".to_string()));
        }
    }

    #[test]
    fn test_set_language_rejection_creates_nothing() {
        let mut prefs = fresh();
        assert!(prefs.set_language("fr").is_err());
        assert_eq!(stored_code(&prefs), None);
    }

    #[test]
    fn test_set_language_storage_failure() {
        let mut prefs = LanguagePreferences::new(ReadOnlySession::default());
        assert_eq!(
            prefs.set_language("en"),
            Err(PreferenceError::Storage(SessionError::Unavailable))
        );
    }

    proptest! {
        #[test]
        fn test_set_language_rejects_arbitrary_strings(code in "\\PC{0,12}") {
            prop_assume!(code != "es" && code != "en");
            let mut prefs = fresh();
            prefs.set_language("en").unwrap();

            prop_assert!(prefs.set_language(&code).is_err());
            prop_assert_eq!(prefs.get_current_language(), Language::ENGLISH);
        }
    }
}
