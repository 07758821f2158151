//! Locale identifiers: structured `language[-script][-region][-variant]*` tags.
//!
//! Registry values are parsed into a `LocaleId` before they are sent to the
//! translation provider, so a malformed entry is rejected locally instead of
//! producing a remote error.

use regex::Regex;
use std::fmt;
use std::sync::OnceLock;
use thiserror::Error;

/// Why a locale string could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LocaleError {
    #[error("locale identifier is empty")]
    Empty,

    #[error("'{0}' is not a well-formed locale identifier")]
    Malformed(String),
}

/// A parsed locale identifier in canonical casing.
///
/// The language subtag is lowercase, the script is titlecase and the region
/// is uppercase, so `EN_us` and `en-US` parse to the same value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LocaleId {
    language: String,
    script: Option<String>,
    region: Option<String>,
    variants: Vec<String>,
}

static LOCALE_REGEX: OnceLock<Regex> = OnceLock::new();

fn locale_regex() -> &'static Regex {
    LOCALE_REGEX.get_or_init(|| {
        Regex::new(
            r"(?x)^
            (?P<language>[A-Za-z]{2,3}|[A-Za-z]{5,8})
            (?:-(?P<script>[A-Za-z]{4}))?
            (?:-(?P<region>[A-Za-z]{2}|[0-9]{3}))?
            (?P<variants>(?:-(?:[A-Za-z0-9]{5,8}|[0-9][A-Za-z0-9]{3}))*)
            $",
        )
        .expect("locale pattern is valid")
    })
}

impl LocaleId {
    /// Parse a locale string such as `en`, `en-US` or `zh-Hant-TW`.
    ///
    /// Underscores are accepted as separators.
    pub fn parse(input: &str) -> Result<Self, LocaleError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(LocaleError::Empty);
        }

        let normalized = trimmed.replace('_', "-");
        let captures = locale_regex()
            .captures(&normalized)
            .ok_or_else(|| LocaleError::Malformed(input.to_string()))?;

        let language = captures["language"].to_ascii_lowercase();
        let script = captures.name("script").map(|m| titlecase(m.as_str()));
        let region = captures
            .name("region")
            .map(|m| m.as_str().to_ascii_uppercase());
        let variants = captures
            .name("variants")
            .map(|m| {
                m.as_str()
                    .split('-')
                    .filter(|v| !v.is_empty())
                    .map(|v| v.to_ascii_lowercase())
                    .collect()
            })
            .unwrap_or_default();

        Ok(Self {
            language,
            script,
            region,
            variants,
        })
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn script(&self) -> Option<&str> {
        self.script.as_deref()
    }

    pub fn region(&self) -> Option<&str> {
        self.region.as_deref()
    }
}

impl fmt::Display for LocaleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.language)?;
        if let Some(script) = &self.script {
            write!(f, "-{}", script)?;
        }
        if let Some(region) = &self.region {
            write!(f, "-{}", region)?;
        }
        for variant in &self.variants {
            write!(f, "-{}", variant)?;
        }
        Ok(())
    }
}

impl std::str::FromStr for LocaleId {
    type Err = LocaleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

fn titlecase(s: &str) -> String {
    let lower = s.to_ascii_lowercase();
    let mut chars = lower.chars();
    match chars.next() {
        Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bare_language() {
        let locale = LocaleId::parse("en").expect("Should parse");
        assert_eq!(locale.language(), "en");
        assert_eq!(locale.region(), None);
        assert_eq!(locale.to_string(), "en");
    }

    #[test]
    fn test_parse_language_region() {
        let locale = LocaleId::parse("pt-BR").expect("Should parse");
        assert_eq!(locale.language(), "pt");
        assert_eq!(locale.region(), Some("BR"));
        assert_eq!(locale.to_string(), "pt-BR");
    }

    #[test]
    fn test_parse_private_use_region() {
        // XA is a pseudo-region used for Arabic voices
        let locale = LocaleId::parse("ar-XA").expect("Should parse");
        assert_eq!(locale.region(), Some("XA"));
    }

    #[test]
    fn test_parse_script_and_numeric_region() {
        let locale = LocaleId::parse("zh-hant-419").expect("Should parse");
        assert_eq!(locale.script(), Some("Hant"));
        assert_eq!(locale.region(), Some("419"));
        assert_eq!(locale.to_string(), "zh-Hant-419");
    }

    #[test]
    fn test_parse_normalizes_case_and_separator() {
        let a = LocaleId::parse("EN_us").expect("Should parse");
        let b = LocaleId::parse("en-US").expect("Should parse");
        assert_eq!(a, b);
    }

    #[test]
    fn test_parse_variants() {
        let locale = LocaleId::parse("de-DE-1996").expect("Should parse");
        assert_eq!(locale.to_string(), "de-DE-1996");
    }

    #[test]
    fn test_parse_empty() {
        assert_eq!(LocaleId::parse(""), Err(LocaleError::Empty));
        assert_eq!(LocaleId::parse("   "), Err(LocaleError::Empty));
    }

    #[test]
    fn test_parse_malformed() {
        for input in ["e", "englishlanguage", "en--US", "en-", "-en", "en-U", "en US", "1234"] {
            assert!(
                matches!(LocaleId::parse(input), Err(LocaleError::Malformed(_))),
                "{:?} should be rejected",
                input
            );
        }
    }

    #[test]
    fn test_from_str() {
        let locale: LocaleId = "ja-JP".parse().expect("Should parse");
        assert_eq!(locale.language(), "ja");
    }

    #[test]
    fn test_error_message_names_input() {
        let err = LocaleId::parse("en--US").unwrap_err();
        assert!(err.to_string().contains("en--US"));
    }
}
