//! Language negotiation across request channels.
//!
//! Every channel carries the language under the same field name, [`LANG_FIELD`].
//! Channels are probed in a fixed priority order (URL query, then header,
//! then cookie, then form) and the first value that names a supported
//! language wins. A query override therefore always beats a stored cookie
//! preference. The order is an external contract; changing it is an
//! observable behavioral change.

use axum::http::HeaderMap;

use crate::i18n::Language;
use crate::session;

/// Field name probed in every negotiation channel.
pub const LANG_FIELD: &str = "lang";

/// The four language negotiation channels of one request.
///
/// Each channel yields the raw string it carried, if any; validation against
/// the supported set happens in [`LanguageSources::resolve`].
#[derive(Debug, Clone, Default)]
pub struct LanguageSources {
    /// URL query parameter value
    pub query: Option<String>,
    /// Request header value
    pub header: Option<String>,
    /// Cookie value
    pub cookie: Option<String>,
    /// Form field value (urlencoded bodies; filled by the handler when read)
    pub form: Option<String>,
}

impl LanguageSources {
    /// Collect the query, header, and cookie channels from request material.
    ///
    /// The form channel stays empty here since reading it consumes the
    /// request body; handlers that parse an urlencoded form can attach the
    /// field afterwards with [`LanguageSources::with_form`].
    pub fn from_request(headers: &HeaderMap, query: &str) -> LanguageSources {
        LanguageSources {
            query: query_value(query, LANG_FIELD),
            header: headers
                .get(LANG_FIELD)
                .and_then(|value| value.to_str().ok())
                .map(str::to_string),
            cookie: session::cookie_value(headers, LANG_FIELD),
            form: None,
        }
    }

    /// Attach the form channel.
    pub fn with_form(mut self, value: impl Into<String>) -> LanguageSources {
        self.form = Some(value.into());
        self
    }

    /// Pick the caller's language: first supported value in priority order
    /// (query, header, cookie, form), else the default language.
    ///
    /// An unsupported value in a higher-priority channel does not veto the
    /// request; probing simply continues with the next channel.
    pub fn resolve(&self) -> Language {
        [&self.query, &self.header, &self.cookie, &self.form]
            .into_iter()
            .flatten()
            .find_map(|code| Language::from_code(code).ok())
            .unwrap_or_default()
    }
}

/// Extract a raw (undecoded) field from a query string.
fn query_value(query: &str, field: &str) -> Option<String> {
    query.split('&').find_map(|pair| {
        let (name, value) = pair.split_once('=')?;
        (name == field).then(|| value.to_string())
    })
}
