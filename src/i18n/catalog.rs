//! Message catalog: language-keyed table of message key → localized string.
//!
//! The catalog is loaded once at process start from a JSON resource shaped as
//! `{"<lang>": {"<key>": "<localized string>"}}` and is immutable thereafter,
//! so concurrent lookups need no locking. Loading twice is a no-op: whatever
//! table became resident first stays resident for the life of the process.
//!
//! Lookup never fails. A missing language falls back to the default language's
//! table; a missing key (or a catalog that was never loaded) falls back to the
//! raw key itself.

use std::collections::HashMap;
use std::path::Path;
use std::sync::OnceLock;

use tracing::{debug, info};

use crate::i18n::Language;

/// Failure to bring a message catalog into memory.
///
/// Callers are expected to treat this as fatal at startup: running without a
/// catalog that was asked for would silently strand users on raw message keys.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to read message catalog from {path}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed message catalog: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Immutable language → (key → localized string) table.
#[derive(Debug, Clone, Default)]
pub struct MessageCatalog {
    tables: HashMap<String, HashMap<String, String>>,
}

/// Process-wide catalog instance (populated at most once)
static CATALOG: OnceLock<MessageCatalog> = OnceLock::new();

impl MessageCatalog {
    /// Parse a catalog from its JSON document form.
    pub fn from_json(json: &str) -> Result<MessageCatalog, CatalogError> {
        let tables = serde_json::from_str(json)?;
        Ok(MessageCatalog { tables })
    }

    /// Read and parse a catalog file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<MessageCatalog, CatalogError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.display().to_string(),
            source,
        })?;
        MessageCatalog::from_json(&raw)
    }

    /// Translate `key` for `lang`, best-effort.
    ///
    /// Resolution order:
    /// 1. the table for `lang`, if present;
    /// 2. otherwise the table for the default language, if present;
    /// 3. if no table resolved, or the resolved table has no entry for `key`,
    ///    the raw `key` is returned unchanged.
    ///
    /// A language table that exists but lacks `key` does NOT fall through to
    /// the default table; partial translations surface the raw key instead of
    /// mixing languages.
    pub fn lookup(&self, lang: &str, key: &str) -> String {
        let table = match self.tables.get(lang) {
            Some(table) => table,
            None => match self.tables.get(Language::default().code()) {
                Some(table) => table,
                None => return key.to_string(),
            },
        };
        match table.get(key) {
            Some(localized) => localized.clone(),
            None => key.to_string(),
        }
    }

    /// Number of language tables in the catalog.
    pub fn language_count(&self) -> usize {
        self.tables.len()
    }
}

/// Load the process-wide catalog from a JSON file.
///
/// Idempotent: if a catalog is already resident, this returns `Ok` without
/// reading the file and without replacing any data. There is no runtime
/// refresh; readers observe one immutable table for the process lifetime.
pub fn init_global(path: impl AsRef<Path>) -> Result<(), CatalogError> {
    if CATALOG.get().is_some() {
        debug!("message catalog already loaded, skipping");
        return Ok(());
    }
    let catalog = MessageCatalog::from_file(path.as_ref())?;
    info!(
        languages = catalog.language_count(),
        path = %path.as_ref().display(),
        "message catalog loaded"
    );
    // A lost set race means another thread finished loading first, which is
    // the same outcome as arriving after init.
    let _ = CATALOG.set(catalog);
    Ok(())
}

/// The process-wide catalog, if one was loaded.
///
/// `None` means "never asked to load", a valid state in which translation
/// degrades to returning raw keys.
pub fn global() -> Option<&'static MessageCatalog> {
    CATALOG.get()
}
