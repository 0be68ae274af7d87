//! Language type: validated representation of a supported language.
//!
//! The supported set is deliberately explicit and enumerable rather than
//! inferred from whatever the message catalog happens to contain: language
//! negotiation must behave the same whether or not a catalog was loaded.

use anyhow::{bail, Result};
use std::fmt;

/// A validated language.
///
/// Only codes from the supported set can be constructed, so a `Language` in
/// hand is always safe to use for catalog lookups and cookie values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Language {
    /// ISO 639-1 language code (e.g., "zh", "en")
    code: &'static str,
}

impl Language {
    /// Chinese, the default language. Lookups and negotiation fall back to it.
    pub const CHINESE: Language = Language { code: "zh" };

    /// English.
    pub const ENGLISH: Language = Language { code: "en" };

    /// Create a Language from a language code string.
    ///
    /// # Arguments
    /// * `code` - The ISO 639-1 language code (e.g., "zh", "en")
    ///
    /// # Returns
    /// * `Ok(Language)` if the code is in the supported set
    /// * `Err` otherwise
    pub fn from_code(code: &str) -> Result<Language> {
        match Language::supported().iter().find(|lang| lang.code == code) {
            Some(lang) => Ok(*lang),
            None => bail!("unsupported language code: '{}'", code),
        }
    }

    /// All supported languages, default first.
    pub fn supported() -> &'static [Language] {
        &[Language::CHINESE, Language::ENGLISH]
    }

    /// Get the ISO 639-1 language code.
    pub fn code(&self) -> &'static str {
        self.code
    }

    /// Check if this is the default language.
    pub fn is_default(&self) -> bool {
        *self == Language::default()
    }
}

impl Default for Language {
    fn default() -> Language {
        Language::CHINESE
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code)
    }
}
