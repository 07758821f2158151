//! Language registry: the allow-list of language codes the service accepts.
//!
//! The registry is built once on first access and is immutable thereafter.
//! Every code maps to the locale string handed to the providers, which for
//! the current table is the code itself.

use std::sync::OnceLock;

/// One supported language code and the locale string it resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LanguageEntry {
    /// Code accepted from clients (e.g., "en", "en-US")
    pub code: &'static str,

    /// Locale string passed to the providers
    pub locale: &'static str,
}

/// Global language registry singleton.
pub struct LanguageRegistry {
    entries: Vec<LanguageEntry>,
}

static REGISTRY: OnceLock<LanguageRegistry> = OnceLock::new();

/// Bare language codes, in the order the index page lists them.
const SHORT_CODES: &[&str] = &[
    "id", "en", "ja", "zh", "ar", "fr", "es", "de", "ru", "ko", "it", "pt", "nl", "sv", "no",
    "da", "fi", "cs", "tr", "he", "el", "hi", "th", "vi",
];

/// Language-region codes, mostly paired with a short code above.
const LOCALE_CODES: &[&str] = &[
    "id-ID", "en-US", "ja-JP", "zh-CN", "ar-XA", "fr-FR", "es-ES", "de-DE", "ru-RU", "ko-KR",
    "it-IT", "pt-BR", "nl-NL", "sv-SE", "no-NO", "da-DK", "fi-FI", "pl-PL", "cs-CZ", "tr-TR",
    "he-IL", "el-GR", "hi-IN", "th-TH", "vi-VN",
];

impl LanguageRegistry {
    /// Get the global language registry instance.
    pub fn get() -> &'static LanguageRegistry {
        REGISTRY.get_or_init(|| LanguageRegistry {
            entries: default_entries(),
        })
    }

    /// Resolve a client-supplied code to its locale string.
    ///
    /// Lookup is exact and case-sensitive. `None` means the code is not on
    /// the allow-list and the request must be rejected.
    pub fn resolve(&self, code: &str) -> Option<&'static str> {
        self.entries
            .iter()
            .find(|entry| entry.code == code)
            .map(|entry| entry.locale)
    }

    /// Check if a code is on the allow-list.
    pub fn contains(&self, code: &str) -> bool {
        self.resolve(code).is_some()
    }

    /// All supported codes in declaration order.
    pub fn codes(&self) -> Vec<&'static str> {
        self.entries.iter().map(|entry| entry.code).collect()
    }

    /// All registry entries.
    pub fn entries(&self) -> &[LanguageEntry] {
        &self.entries
    }
}

fn default_entries() -> Vec<LanguageEntry> {
    SHORT_CODES
        .iter()
        .chain(LOCALE_CODES.iter())
        .map(|&code| LanguageEntry { code, locale: code })
        .collect()
}
