//! Supported-language table.
//!
//! The site speaks a closed set of languages. The table below is the only
//! place a language is declared; `Language::from_code` validates against it
//! and the navigation renders one switch button per enabled entry.

use std::sync::OnceLock;

/// One row of the language table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageConfig {
    /// Two-letter code, as stored in the session and sent by the switcher
    pub code: &'static str,

    /// Name in English, for logs
    pub name: &'static str,

    /// Name in the language itself, shown on the switch buttons
    pub native_name: &'static str,

    /// New visitors get this language; exactly one row sets it
    pub is_default: bool,

    /// Disabled rows are known but not selectable
    pub enabled: bool,
}

static SUPPORTED: [LanguageConfig; 2] = [
    LanguageConfig {
        code: "es",
        name: "Spanish",
        native_name: "Español",
        is_default: true,
        enabled: true,
    },
    LanguageConfig {
        code: "en",
        name: "English",
        native_name: "English",
        is_default: false,
        enabled: true,
    },
];

/// Process-wide view of the language table.
#[derive(Debug)]
pub struct LanguageRegistry {
    table: &'static [LanguageConfig],
    default_index: usize,
}

static REGISTRY: OnceLock<LanguageRegistry> = OnceLock::new();

impl LanguageRegistry {
    /// Shared registry, built on first use.
    ///
    /// # Panics
    /// Panics if the table does not flag exactly one enabled default.
    pub fn get() -> &'static LanguageRegistry {
        REGISTRY.get_or_init(|| Self::from_table(&SUPPORTED))
    }

    fn from_table(table: &'static [LanguageConfig]) -> Self {
        let mut defaults = table
            .iter()
            .enumerate()
            .filter(|(_, row)| row.is_default && row.enabled)
            .map(|(i, _)| i);

        let default_index = match (defaults.next(), defaults.next()) {
            (Some(i), None) => i,
            (None, _) => panic!("Language table has no enabled default"),
            (Some(_), Some(_)) => panic!("Language table has several defaults"),
        };

        Self {
            table,
            default_index,
        }
    }

    /// Row for an exact code. Matching is case-sensitive: `"ES"` is unknown.
    pub fn get_by_code(&self, code: &str) -> Option<&LanguageConfig> {
        self.table.iter().find(|row| row.code == code)
    }

    /// Selectable languages, in table order.
    pub fn list_enabled(&self) -> Vec<&LanguageConfig> {
        self.table.iter().filter(|row| row.enabled).collect()
    }

    pub fn default_language(&self) -> &LanguageConfig {
        &self.table[self.default_index]
    }
}
