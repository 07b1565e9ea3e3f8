//! Dictionary consistency validation.
//!
//! Every dotted key of one language's dictionary must exist in every other
//! language's dictionary. URLs and e-mail addresses are expected to be the
//! same in all languages, so differences there are flagged as warnings.

use crate::i18n::{Dictionary, Value};
use regex::Regex;
use std::sync::OnceLock;

/// Validation report containing errors and warnings about a dictionary pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    /// Keys missing on one side
    pub errors: Vec<String>,

    /// Language-invariant strings that differ
    pub warnings: Vec<String>,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self {
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    pub fn is_clean(&self) -> bool {
        !self.has_errors() && !self.has_warnings()
    }
}

impl Default for ValidationReport {
    fn default() -> Self {
        Self::new()
    }
}

/// Validator for dictionary parity.
#[derive(Debug)]
pub struct DictionaryValidator;

static URL_REGEX: OnceLock<Regex> = OnceLock::new();
static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();

impl DictionaryValidator {
    /// Compare `candidate` against `reference`.
    ///
    /// Errors list keys present on only one side. Warnings list string
    /// leaves that are URLs or e-mail addresses in `reference` and differ in
    /// `candidate`.
    pub fn compare(reference: &Dictionary, candidate: &Dictionary) -> ValidationReport {
        let mut report = ValidationReport::new();

        let reference_keys = reference.keys();
        let candidate_keys = candidate.keys();

        for key in reference_keys.difference(&candidate_keys) {
            report.errors.push(format!("Missing key in candidate: {}", key));
        }
        for key in candidate_keys.difference(&reference_keys) {
            report.errors.push(format!("Unexpected key in candidate: {}", key));
        }

        for (key, value) in reference.paths() {
            let Value::Str(original) = value else {
                continue;
            };
            if !Self::is_language_invariant(original) {
                continue;
            }
            if let Some(Value::Str(translated)) = candidate.resolve(&key) {
                if translated != original {
                    report.warnings.push(format!(
                        "Invariant value changed at {}: '{}' vs '{}'",
                        key, original, translated
                    ));
                }
            }
        }

        report
    }

    /// Strings that should read the same in every language.
    fn is_language_invariant(text: &str) -> bool {
        let url = URL_REGEX.get_or_init(|| Regex::new(r"^https?://\S+$").unwrap());
        let email = EMAIL_REGEX
            .get_or_init(|| Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").unwrap());

        url.is_match(text) || email.is_match(text)
    }
}
